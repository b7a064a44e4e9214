use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Locale dictionary consumed by the expression resolver.
///
/// `resolve` takes a dot-separated key path (`something.deep`) and returns
/// the candidate values stored there. `None` and an empty slice both mean
/// "no data for this locale" and are treated the same by the resolver.
///
/// Implementations are read-only once built and may be shared between
/// resolvers on different threads.
pub trait LocalizedDefinitions: Send + Sync {
	/// Locale identifier (`en`, `fr`, ...).
	fn locale(&self) -> &str;

	/// Candidate values at `key`, if any.
	fn resolve(&self, key: &str) -> Option<&[String]>;
}

/// Supplies the dictionaries a resolver is built from.
///
/// Called once, at construction time.
pub trait DefinitionProvider {
	fn definitions(&self) -> Vec<Arc<dyn LocalizedDefinitions>>;
}

impl DefinitionProvider for Vec<Arc<dyn LocalizedDefinitions>> {
	fn definitions(&self) -> Vec<Arc<dyn LocalizedDefinitions>> {
		self.clone()
	}
}

/// Node of an in-memory definition tree.
///
/// Serialized untagged, so the JSON shape is the natural one:
/// `"value"`, `["a", "b"]` or `{ "child": ... }`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum Definition {
	/// Single value, resolves to a one-element candidate list.
	Text(String),
	/// Several candidate values.
	List(Vec<String>),
	/// Named children, addressed by the next segment of the key path.
	Map(BTreeMap<String, Definition>),
}

impl From<&str> for Definition {
	fn from(value: &str) -> Self {
		Definition::Text(value.to_owned())
	}
}

impl From<Vec<&str>> for Definition {
	fn from(values: Vec<&str>) -> Self {
		Definition::List(values.into_iter().map(str::to_owned).collect())
	}
}

impl<K: Into<String>> FromIterator<(K, Definition)> for Definition {
	fn from_iter<I: IntoIterator<Item = (K, Definition)>>(iter: I) -> Self {
		Definition::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

/// Dictionary for one locale backed by a `Definition` tree.
///
/// # Example
/// With `root = { "something": { "deep": "value" } }`, the key
/// `something.deep` resolves to `["value"]` while `something` resolves
/// to nothing (maps are not candidates).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DefinitionMap {
	locale: String,
	root: BTreeMap<String, Definition>,
}

impl DefinitionMap {
	pub fn new(locale: &str, root: BTreeMap<String, Definition>) -> Self {
		Self {
			locale: locale.to_owned(),
			root,
		}
	}

	/// Wraps the map for handing to a `DefinitionProvider`.
	pub fn shared(self) -> Arc<dyn LocalizedDefinitions> {
		Arc::new(self)
	}
}

impl LocalizedDefinitions for DefinitionMap {
	fn locale(&self) -> &str {
		&self.locale
	}

	fn resolve(&self, key: &str) -> Option<&[String]> {
		let mut segments = key.split('.');
		let mut node = self.root.get(segments.next()?)?;
		for segment in segments {
			node = match node {
				Definition::Map(children) => children.get(segment)?,
				_ => return None,
			};
		}

		match node {
			Definition::Text(value) => Some(std::slice::from_ref(value)),
			Definition::List(values) => Some(values.as_slice()),
			Definition::Map(_) => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn english() -> DefinitionMap {
		let nested: Definition = [
			("deep", Definition::from("value")),
			("empty", Definition::List(Vec::new())),
		]
		.into_iter()
		.collect();

		DefinitionMap::new(
			"en",
			BTreeMap::from([
				("something".to_owned(), nested),
				("list".to_owned(), Definition::from(vec!["1", "2"])),
			]),
		)
	}

	#[test]
	fn resolves_nested_text_as_single_candidate() {
		assert_eq!(english().resolve("something.deep"), Some(&["value".to_owned()][..]));
	}

	#[test]
	fn resolves_lists_in_declaration_order() {
		let en = english();
		assert_eq!(en.resolve("list").unwrap(), ["1", "2"]);
	}

	#[test]
	fn maps_and_missing_paths_have_no_candidates() {
		let en = english();
		assert_eq!(en.resolve("something"), None);
		assert_eq!(en.resolve("something.missing"), None);
		assert_eq!(en.resolve("list.deeper"), None);
		assert_eq!(en.resolve(""), None);
	}

	#[test]
	fn empty_lists_resolve_to_empty_slices() {
		assert_eq!(english().resolve("something.empty"), Some(&[][..]));
	}

	#[test]
	fn deserializes_the_natural_json_shape() {
		let root: BTreeMap<String, Definition> = serde_json::from_str(
			r##"{ "name": { "first": ["Ann", "Bob"], "pattern": "#{name.first} ###" } }"##,
		)
		.unwrap();
		let map = DefinitionMap::new("en", root);

		assert_eq!(map.resolve("name.first").unwrap(), ["Ann", "Bob"]);
		assert_eq!(map.resolve("name.pattern").unwrap(), ["#{name.first} ###"]);
	}

	#[test]
	fn vec_provider_hands_out_every_dictionary() {
		let provider: Vec<Arc<dyn LocalizedDefinitions>> = vec![english().shared()];
		let locales: Vec<String> = provider.definitions().iter().map(|d| d.locale().to_owned()).collect();
		assert_eq!(locales, vec!["en"]);
	}
}
