use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use log::{debug, trace, warn};

use crate::definitions::{DefinitionProvider, LocalizedDefinitions};
use crate::error::{Error, Result};
use crate::expression::parser::{Scope, Segment, Template};
use crate::random::{RandomService, RandomSource};

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// How many times a dictionary value may expand into further dictionary values.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// How many dictionary values one `resolve` call may expand in total.
pub const DEFAULT_MAX_EXPANSIONS: usize = 1_024;

/// Expands templates into text using locale dictionaries and a random source.
///
/// ## Responsibilities:
/// - Resolve `#{key}` against the first locale (in priority order) with data
/// - Resolve `#{{key}}` against the pooled data of all locales
/// - Replace bare `#` with a random digit and `\#` with a literal `#`
/// - Expand dictionary values that are themselves templates
///
/// ## Invariants
/// - Every configured locale has a dictionary
/// - One `resolve` call expands at most `max_expansions` dictionary values,
///   each at most `max_depth` levels deep
/// - Draws happen left to right, innermost placeholder first, so the same
///   seed and template always give the same text
pub struct ExpressionResolver<R: RandomSource = RandomService> {
	random: R,
	locales: Vec<String>,
	/// Dictionaries in locale priority order.
	definitions: Vec<Arc<dyn LocalizedDefinitions>>,
	max_depth: usize,
	max_expansions: usize,
	/// Expansions left in the current `resolve` call.
	budget: usize,
	/// Values the current `resolve` call left unexpanded for lack of budget.
	skipped: usize,
}

impl<R: RandomSource> ExpressionResolver<R> {
	/// Creates a resolver over the dictionaries supplied by `provider`.
	///
	/// An empty `locales` list falls back to [`DEFAULT_LOCALE`].
	///
	/// # Errors
	/// - `MissingLocale` if a configured locale has no dictionary
	/// - `DuplicateLocale` if the provider supplies a locale twice
	pub fn new<P>(locales: Vec<String>, random: R, provider: &P) -> Result<Self>
	where
		P: DefinitionProvider + ?Sized,
	{
		let locales = if locales.is_empty() {
			vec![DEFAULT_LOCALE.to_owned()]
		} else {
			locales
		};

		let mut by_locale: HashMap<String, Arc<dyn LocalizedDefinitions>> = HashMap::new();
		for definitions in provider.definitions() {
			match by_locale.entry(definitions.locale().to_owned()) {
				Entry::Occupied(entry) => return Err(Error::DuplicateLocale(entry.key().clone())),
				Entry::Vacant(entry) => {
					entry.insert(definitions);
				}
			}
		}

		let definitions = locales
			.iter()
			.map(|locale| {
				by_locale
					.get(locale)
					.cloned()
					.ok_or_else(|| Error::MissingLocale(locale.clone()))
			})
			.collect::<Result<Vec<_>>>()?;

		debug!("Expression resolver ready for locales {:?}", locales);

		Ok(Self {
			random,
			locales,
			definitions,
			max_depth: DEFAULT_MAX_DEPTH,
			max_expansions: DEFAULT_MAX_EXPANSIONS,
			budget: DEFAULT_MAX_EXPANSIONS,
			skipped: 0,
		})
	}

	/// Caps how deep dictionary values may expand into further values.
	///
	/// Past the cap the value is emitted as-is.
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Caps how many dictionary values a single `resolve` call may expand.
	///
	/// Once spent, further values are emitted as-is.
	pub fn with_max_expansions(mut self, max_expansions: usize) -> Self {
		self.max_expansions = max_expansions;
		self
	}

	/// Configured locales, highest priority first.
	pub fn locales(&self) -> &[String] {
		&self.locales
	}

	pub fn random(&self) -> &R {
		&self.random
	}

	/// Gives other generators access to the same draw stream.
	pub fn random_mut(&mut self) -> &mut R {
		&mut self.random
	}

	/// Expands `expression` into text.
	///
	/// Unknown keys resolve to an empty string and malformed placeholders are
	/// copied verbatim, so this never fails.
	pub fn resolve(&mut self, expression: &str) -> String {
		self.budget = self.max_expansions;
		self.skipped = 0;
		let result = self.expand(expression, 0);
		if self.skipped > 0 {
			warn!(
				"Expansion limit of {} reached, {} values kept as-is in '{expression}'",
				self.max_expansions, self.skipped
			);
		}
		trace!("Resolved '{expression}' to '{result}'");
		result
	}

	fn expand(&mut self, expression: &str, depth: usize) -> String {
		let template = Template::parse(expression);
		let mut output = String::with_capacity(expression.len());
		self.evaluate(template.segments(), depth, &mut output);
		output
	}

	fn evaluate(&mut self, segments: &[Segment], depth: usize, output: &mut String) {
		for segment in segments {
			match segment {
				Segment::Literal(text) => output.push_str(text),
				Segment::Digit => output.push_str(&self.random.next_index(9).to_string()),
				Segment::Placeholder { scope, key } => {
					// Innermost first: the key path is fully expanded before lookup.
					let mut path = String::new();
					self.evaluate(key, depth, &mut path);
					let value = self.resolve_key(*scope, &path, depth);
					output.push_str(&value);
				}
			}
		}
	}

	/// Picks a value for `key` and expands it in turn.
	fn resolve_key(&mut self, scope: Scope, key: &str, depth: usize) -> String {
		let picked = match scope {
			Scope::Single => self.pick_single(key),
			Scope::Multi => self.pick_multi(key),
		};

		let Some(value) = picked else {
			debug!("No definitions for key '{key}' in locales {:?}", self.locales);
			return String::new();
		};

		if !value.contains('#') {
			return value;
		}
		if depth >= self.max_depth {
			warn!("Stopped expanding '{value}' for key '{key}' after {depth} nested values");
			return value;
		}
		if self.budget == 0 {
			self.skipped += 1;
			return value;
		}
		self.budget -= 1;
		self.expand(&value, depth + 1)
	}

	fn pick_single(&mut self, key: &str) -> Option<String> {
		let candidates = self
			.definitions
			.iter()
			.find_map(|definitions| definitions.resolve(key).filter(|c| !c.is_empty()))?;
		let index = self.random.next_index(candidates.len() - 1);
		candidates.get(index).cloned()
	}

	fn pick_multi(&mut self, key: &str) -> Option<String> {
		let pool: Vec<&String> = self
			.definitions
			.iter()
			.filter_map(|definitions| definitions.resolve(key))
			.flatten()
			.collect();
		let last = pool.len().checked_sub(1)?;
		pool.get(self.random.next_index(last)).map(|value| (*value).clone())
	}
}
