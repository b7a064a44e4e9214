//! Template language and its evaluation.
//!
//! A template mixes literal text with:
//! - `#{key}` single-locale placeholders
//! - `#{{key}}` multi-locale placeholders
//! - `#` digit wildcards
//! - `\#` escapes
//!
//! Placeholders nest (`#{something.#{somethingKey}}`) and dictionary
//! values may themselves be templates.

/// Parser turning template text into segments.
///
/// Never fails: unterminated openers, and placeholders nested deeper than
/// `MAX_NESTING`, are kept as literal text.
pub mod parser;

/// Evaluation of parsed templates against locale dictionaries.
///
/// Owns the random source and performs every draw, innermost placeholder first.
pub mod resolver;
