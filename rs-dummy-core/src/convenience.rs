use std::collections::HashSet;
use std::hash::Hash;

use crate::dummy::Dummy;
use crate::error::Result;
use crate::random::RandomSource;

impl Dummy {
	/// Calls `supplier` `count` times and collects the results.
	pub fn list_of<T, F>(&mut self, count: usize, mut supplier: F) -> Vec<T>
	where
		F: FnMut(&mut Dummy) -> T,
	{
		(0..count).map(|_| supplier(self)).collect()
	}

	/// Calls `supplier` `count` times and keeps the distinct results.
	///
	/// The set may hold fewer than `count` values.
	pub fn set_of<T, F>(&mut self, count: usize, mut supplier: F) -> HashSet<T>
	where
		T: Eq + Hash,
		F: FnMut(&mut Dummy) -> T,
	{
		(0..count).map(|_| supplier(self)).collect()
	}

	/// Picks a random element.
	///
	/// A single element is returned without drawing.
	pub fn of<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
		match items {
			[] => None,
			[only] => Some(only),
			_ => {
				let index = self.random().next_index(items.len() - 1);
				items.get(index)
			}
		}
	}

	/// Runs one randomly chosen supplier and returns its value.
	pub fn of_suppliers<T>(&mut self, suppliers: Vec<Box<dyn FnOnce(&mut Dummy) -> T + '_>>) -> Option<T> {
		let index = match suppliers.len() {
			0 => return None,
			1 => 0,
			len => self.random().next_index(len - 1),
		};
		suppliers.into_iter().nth(index).map(|supplier| supplier(self))
	}

	/// Has a `numerator` in `denominator` chance to supply a value.
	///
	/// E.g. `chance(1, 2, ...)` supplies half of the time. The supplier is not
	/// called otherwise.
	pub fn chance<T, F>(&mut self, numerator: i32, denominator: i32, supplier: F) -> Result<Option<T>>
	where
		F: FnOnce(&mut Dummy) -> T,
	{
		if self.random().chance(numerator, denominator)? {
			Ok(Some(supplier(self)))
		} else {
			Ok(None)
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;
	use std::sync::Arc;

	use crate::definitions::{Definition, DefinitionMap, LocalizedDefinitions};
	use crate::dummy::Dummy;

	fn dummy(seed: u64) -> Dummy {
		let root = BTreeMap::from([("color".to_owned(), Definition::from(vec!["red", "green", "blue"]))]);
		let provider: Vec<Arc<dyn LocalizedDefinitions>> = vec![DefinitionMap::new("en", root).shared()];
		Dummy::builder().seed(seed).build(&provider).unwrap()
	}

	#[test]
	fn list_of_calls_the_supplier_count_times() {
		let mut dummy = dummy(1);
		let colors = dummy.list_of(5, |d| d.expression("#{color}"));
		assert_eq!(colors.len(), 5);
		assert!(colors.iter().all(|c| ["red", "green", "blue"].contains(&c.as_str())));
	}

	#[test]
	fn set_of_deduplicates() {
		let mut dummy = dummy(1);
		let colors = dummy.set_of(50, |d| d.expression("#{color}"));
		assert!(!colors.is_empty() && colors.len() <= 3);
	}

	#[test]
	fn of_handles_empty_and_single_inputs() {
		let mut dummy = dummy(1);
		let empty: [u8; 0] = [];
		assert_eq!(dummy.of(&empty), None);
		assert_eq!(dummy.of(&[7]), Some(&7));
		assert!([1, 2, 3].contains(dummy.of(&[1, 2, 3]).unwrap()));
	}

	#[test]
	fn single_element_does_not_advance_the_stream() {
		let mut with_pick = dummy(8);
		let mut without_pick = dummy(8);
		with_pick.of(&["only"]);
		assert_eq!(with_pick.random().next_long(), without_pick.random().next_long());
	}

	#[test]
	fn of_suppliers_runs_only_the_chosen_one() {
		let mut dummy = dummy(4);
		let suppliers: Vec<Box<dyn FnOnce(&mut Dummy) -> &'static str>> = vec![
			Box::new(|_: &mut Dummy| "first"),
			Box::new(|_: &mut Dummy| "second"),
		];
		assert!(matches!(dummy.of_suppliers(suppliers), Some("first") | Some("second")));

		let mut calls = 0;
		let single: Vec<Box<dyn FnOnce(&mut Dummy) -> i32 + '_>> = vec![Box::new(|_: &mut Dummy| {
			calls += 1;
			calls
		})];
		assert_eq!(dummy.of_suppliers(single), Some(1));
		assert_eq!(dummy.of_suppliers::<u8>(Vec::new()), None);
	}

	#[test]
	fn chance_skips_the_supplier_when_it_fails() {
		let mut dummy = dummy(2);
		let mut calls = 0;
		for _ in 0..10 {
			assert_eq!(dummy.chance(0, 4, |_| calls += 1), Ok(None));
		}
		assert_eq!(calls, 0);
		assert_eq!(dummy.chance(4, 4, |d| d.expression("#{color}").is_empty()), Ok(Some(false)));
		assert!(dummy.chance(1, 0, |_| ()).is_err());
	}
}
