use log::info;
use rand::Rng;

use crate::definitions::DefinitionProvider;
use crate::error::Result;
use crate::expression::resolver::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANSIONS, ExpressionResolver};
use crate::random::RandomService;

/// Configuration for a `Dummy`.
///
/// # Defaults
/// - `seed`: drawn from the thread RNG at build time (and logged)
/// - `locale`: empty, which the resolver turns into `["en"]`
/// - `max_depth`: `DEFAULT_MAX_DEPTH`
/// - `max_expansions`: `DEFAULT_MAX_EXPANSIONS`
#[derive(Debug, Clone)]
pub struct DummyBuilder {
	seed: Option<u64>,
	locale: Vec<String>,
	max_depth: usize,
	max_expansions: usize,
}

impl Default for DummyBuilder {
	fn default() -> Self {
		Self {
			seed: None,
			locale: Vec::new(),
			max_depth: DEFAULT_MAX_DEPTH,
			max_expansions: DEFAULT_MAX_EXPANSIONS,
		}
	}
}

impl DummyBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Fixes the seed, making every generated value reproducible.
	pub fn seed(mut self, seed: u64) -> Self {
		self.seed = Some(seed);
		self
	}

	/// Sets the locale priority list, highest priority first.
	pub fn locale<I, S>(mut self, locale: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.locale = locale.into_iter().map(Into::into).collect();
		self
	}

	/// Caps how deep dictionary values may expand into further values.
	pub fn max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Caps how many dictionary values one expression may expand.
	pub fn max_expansions(mut self, max_expansions: usize) -> Self {
		self.max_expansions = max_expansions;
		self
	}

	/// Builds a `Dummy` over the dictionaries supplied by `provider`.
	///
	/// # Errors
	/// `MissingLocale` or `DuplicateLocale` from the resolver.
	pub fn build<P>(self, provider: &P) -> Result<Dummy>
	where
		P: DefinitionProvider + ?Sized,
	{
		let seed = match self.seed {
			Some(seed) => seed,
			None => {
				let seed = rand::rng().random();
				info!("No seed configured, using {seed}");
				seed
			}
		};

		let resolver = ExpressionResolver::new(self.locale, RandomService::new(seed), provider)?
			.with_max_depth(self.max_depth)
			.with_max_expansions(self.max_expansions);

		Ok(Dummy { resolver })
	}
}

/// Entry point for generating dummy data.
///
/// Owns one random stream; every method that draws advances it. Build one
/// `Dummy` per session (or per thread) and share the dictionaries instead.
pub struct Dummy {
	resolver: ExpressionResolver<RandomService>,
}

impl Dummy {
	pub fn builder() -> DummyBuilder {
		DummyBuilder::new()
	}

	/// Seed of the underlying random stream.
	pub fn seed(&self) -> u64 {
		self.resolver.random().seed()
	}

	pub fn locales(&self) -> &[String] {
		self.resolver.locales()
	}

	/// Resolves a template such as `"#{name.first} #{name.last}, ###"`.
	pub fn expression(&mut self, template: &str) -> String {
		self.resolver.resolve(template)
	}

	/// Sampler shared with the resolver, for generators that need raw draws.
	pub fn random(&mut self) -> &mut RandomService {
		self.resolver.random_mut()
	}
}
