use std::fmt::Display;

use rand::distr::uniform::SampleUniform;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Builder;

use crate::error::{Error, Result};

/// Source of inclusive index draws consumed by the expression resolver.
///
/// Digit wildcards draw `next_index(9)` and candidate picks draw
/// `next_index(len - 1)`. Tests plug scripted sources in here.
pub trait RandomSource {
	/// Returns a value in `[0, max]`.
	fn next_index(&mut self, max: usize) -> usize;
}

/// Seeded random sampler with inclusive-bound draws.
///
/// Every draw advances a single `StdRng` stream, so two services built
/// from the same seed and asked the same sequence of questions answer
/// identically. A service is meant to be owned by one dummy-data session;
/// sharing it between threads would interleave draws and break replay.
///
/// ## Invariants
/// - The seed never changes after construction
/// - All bounded draws include both ends of the range
#[derive(Debug)]
pub struct RandomService {
	seed: u64,
	rng: StdRng,
}

impl RandomService {
	/// Creates a sampler whose stream is fully determined by `seed`.
	pub fn new(seed: u64) -> Self {
		Self {
			seed,
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// Returns the seed this sampler was created with.
	pub fn seed(&self) -> u64 {
		self.seed
	}

	/// Draws from `[min, max]` for any uniformly sampleable type.
	///
	/// # Errors
	/// `InvalidRange` when `max < min`, when a bound is not comparable
	/// (NaN) or when the distribution cannot be built (non-finite floats,
	/// spans overflowing the type).
	fn sample_inclusive<T>(&mut self, min: T, max: T) -> Result<T>
	where
		T: SampleUniform + PartialOrd + Display + Copy,
	{
		if !(min <= max) {
			return Err(Error::InvalidRange(format!(
				"max ({max}) must not be lower than min ({min})"
			)));
		}
		let distribution = Uniform::<T>::new_inclusive(min, max)
			.map_err(|e| Error::InvalidRange(format!("[{min}, {max}]: {e}")))?;
		Ok(distribution.sample(&mut self.rng))
	}

	/// Returns a non-negative `i32`.
	pub fn next_int(&mut self) -> i32 {
		self.rng.random_range(0..=i32::MAX)
	}

	/// Returns an `i32` in `[0, max]`.
	pub fn next_int_to(&mut self, max: i32) -> Result<i32> {
		self.sample_inclusive(0, max)
	}

	/// Returns an `i32` in `[min, max]`.
	pub fn next_int_between(&mut self, min: i32, max: i32) -> Result<i32> {
		self.sample_inclusive(min, max)
	}

	/// Returns a non-negative `i64`.
	pub fn next_long(&mut self) -> i64 {
		self.rng.random_range(0..=i64::MAX)
	}

	/// Returns an `i64` in `[0, max]`.
	pub fn next_long_to(&mut self, max: i64) -> Result<i64> {
		self.sample_inclusive(0, max)
	}

	/// Returns an `i64` in `[min, max]`.
	pub fn next_long_between(&mut self, min: i64, max: i64) -> Result<i64> {
		self.sample_inclusive(min, max)
	}

	/// Returns an `f64` in `[0, 1)`.
	pub fn next_double(&mut self) -> f64 {
		self.rng.random()
	}

	/// Returns an `f64` in `[0, max]`.
	pub fn next_double_to(&mut self, max: f64) -> Result<f64> {
		self.sample_inclusive(0.0, max)
	}

	/// Returns an `f64` in `[min, max]`.
	pub fn next_double_between(&mut self, min: f64, max: f64) -> Result<f64> {
		self.sample_inclusive(min, max)
	}

	/// Returns an `f32` in `[0, 1)`.
	pub fn next_float(&mut self) -> f32 {
		self.rng.random()
	}

	/// Returns an `f32` in `[0, max]`.
	pub fn next_float_to(&mut self, max: f32) -> Result<f32> {
		self.sample_inclusive(0.0, max)
	}

	/// Returns an `f32` in `[min, max]`.
	pub fn next_float_between(&mut self, min: f32, max: f32) -> Result<f32> {
		self.sample_inclusive(min, max)
	}

	/// Returns `true` or `false` with equal probability.
	pub fn next_boolean(&mut self) -> bool {
		self.rng.random()
	}

	/// Returns a version 4 UUID in canonical `8-4-4-4-12` form.
	///
	/// The bytes come from the seeded stream, so the value is reproducible.
	pub fn uuid(&mut self) -> String {
		let mut bytes = [0u8; 16];
		self.rng.fill(&mut bytes);
		Builder::from_random_bytes(bytes).into_uuid().to_string()
	}

	/// Has a `numerator` in `denominator` chance to return `true`.
	///
	/// Computed as `next_int_between(1, denominator) <= numerator`, so
	/// `chance(1, 2)` is `true` half of the time.
	///
	/// # Errors
	/// `InvalidRange` if `denominator <= 0` or `numerator < 0`.
	pub fn chance(&mut self, numerator: i32, denominator: i32) -> Result<bool> {
		if denominator <= 0 || numerator < 0 {
			return Err(Error::InvalidRange(format!(
				"chance of {numerator} in {denominator} requires numerator >= 0 and denominator > 0"
			)));
		}
		Ok(self.next_int_between(1, denominator)? <= numerator)
	}

	/// Has a `numerator` in `denominator` chance to return the supplied value.
	///
	/// The supplier only runs when the chance succeeds.
	pub fn chance_with<T, F>(&mut self, numerator: i32, denominator: i32, supplier: F) -> Result<Option<T>>
	where
		F: FnOnce() -> T,
	{
		if self.chance(numerator, denominator)? {
			Ok(Some(supplier()))
		} else {
			Ok(None)
		}
	}

	/// Picks one of the given variants uniformly.
	///
	/// Returns `None` when `variants` is empty.
	pub fn enum_value<'a, T>(&mut self, variants: &'a [T]) -> Option<&'a T> {
		let last = variants.len().checked_sub(1)?;
		variants.get(self.next_index(last))
	}
}

impl RandomSource for RandomService {
	fn next_index(&mut self, max: usize) -> usize {
		self.rng.random_range(0..=max)
	}
}
