use std::collections::HashMap;

/// Deepest placeholder nesting kept as structure.
///
/// A placeholder opened deeper than this is copied to its parent key path
/// as literal text, so evaluation never recurses further.
pub const MAX_NESTING: usize = 32;

/// Which locales a placeholder is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
	/// `#{key}`: first configured locale that has data.
	Single,
	/// `#{{key}}`: pooled data of every configured locale.
	Multi,
}

/// One parsed piece of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	/// Verbatim text, escapes already applied.
	Literal(String),
	/// Bare `#`, replaced by one random digit.
	Digit,
	/// Dictionary reference whose key path is itself a sequence of segments.
	Placeholder { scope: Scope, key: Vec<Segment> },
}

/// Parsed template.
///
/// Grammar, tried in this order at every position:
/// - `\#` is a literal `#`
/// - `#{{` key `}}` is a multi-locale placeholder
/// - `#{` key `}` is a single-locale placeholder
/// - `#` is a digit wildcard
/// - anything else is literal
///
/// Key paths nest any of the forms above, up to [`MAX_NESTING`] levels. An
/// opener that is never closed is kept as literal text and parsing resumes
/// right after it, so parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
	segments: Vec<Segment>,
}

impl Template {
	pub fn parse(input: &str) -> Self {
		Parser::new(input).run()
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// `true` when the template contains no placeholder and no digit wildcard.
	pub fn is_literal(&self) -> bool {
		self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
	}
}

/// What ends the sequence currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Closer {
	End,
	Single,
	Multi,
}

/// Outcome of parsing a key path from a given start position.
#[derive(Debug, Clone, Copy)]
enum Attempt {
	/// Input ended before the closer.
	Unclosed,
	/// Closer found, parsing continues at this position.
	Closed(usize),
}

/// A sequence being parsed: the top level or one placeholder key path.
struct Frame {
	closer: Closer,
	scope: Scope,
	/// Position of the opener's `#`.
	opener: usize,
	/// Position right after the opener.
	start: usize,
	/// `false` past `MAX_NESTING`: only the closer is looked for.
	builds: bool,
	segments: Vec<Segment>,
	literal: String,
}

impl Frame {
	fn top() -> Self {
		Self::new(Closer::End, Scope::Single, 0, 0, true)
	}

	fn new(closer: Closer, scope: Scope, opener: usize, start: usize, builds: bool) -> Self {
		Self {
			closer,
			scope,
			opener,
			start,
			builds,
			segments: Vec::new(),
			literal: String::new(),
		}
	}

	fn push_str(&mut self, text: &str) {
		if self.builds {
			self.literal.push_str(text);
		}
	}

	fn push_char(&mut self, c: char) {
		if self.builds {
			self.literal.push(c);
		}
	}

	fn push(&mut self, segment: Segment) {
		if self.builds {
			self.flush();
			self.segments.push(segment);
		}
	}

	fn flush(&mut self) {
		if !self.literal.is_empty() {
			self.segments.push(Segment::Literal(std::mem::take(&mut self.literal)));
		}
	}
}

/// Single pass over the input with an explicit stack of open key paths, so
/// nesting depth never grows the call stack.
struct Parser<'a> {
	input: &'a str,
	bytes: &'a [u8],
	pos: usize,
	/// Key paths already attempted, by start position. Backtracking over
	/// unterminated openers revisits the same positions.
	memo: HashMap<(usize, Closer), Attempt>,
	/// Enclosing frames, outermost first.
	parents: Vec<Frame>,
	frame: Frame,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self {
			input,
			bytes: input.as_bytes(),
			pos: 0,
			memo: HashMap::new(),
			parents: Vec::new(),
			frame: Frame::top(),
		}
	}

	fn peek(&self, offset: usize) -> Option<u8> {
		self.bytes.get(self.pos + offset).copied()
	}

	fn run(mut self) -> Template {
		loop {
			// Positions only ever advance over ASCII bytes or whole chars,
			// so `pos` is always a char boundary here.
			let Some(c) = self.input[self.pos..].chars().next() else {
				if self.frame.closer == Closer::End {
					self.frame.flush();
					return Template { segments: self.frame.segments };
				}
				self.unclosed();
				continue;
			};

			match c {
				'}' if self.frame.closer == Closer::Single => self.close(1),
				'}' if self.frame.closer == Closer::Multi && self.peek(1) == Some(b'}') => self.close(2),
				'\\' if self.peek(1) == Some(b'#') => {
					self.frame.push_char('#');
					self.pos += 2;
				}
				'#' if self.peek(1) == Some(b'{') => self.open(),
				'#' => {
					self.frame.push(Segment::Digit);
					self.pos += 1;
				}
				_ => {
					self.frame.push_char(c);
					self.pos += c.len_utf8();
				}
			}
		}
	}

	/// Starts the key path of the opener at `pos`, or copies the opener
	/// when an earlier attempt already settled it.
	fn open(&mut self) {
		let opener = self.pos;
		let (scope, closer, len) = if self.peek(2) == Some(b'{') {
			(Scope::Multi, Closer::Multi, 3)
		} else {
			(Scope::Single, Closer::Single, 2)
		};
		let start = opener + len;
		let builds = self.parents.len() < MAX_NESTING;

		match self.memo.get(&(start, closer)).copied() {
			Some(Attempt::Unclosed) => {
				self.frame.push_str(&self.input[opener..start]);
				self.pos = start;
			}
			Some(Attempt::Closed(end)) if !builds => {
				self.frame.push_str(&self.input[opener..end]);
				self.pos = end;
			}
			_ => {
				let frame = Frame::new(closer, scope, opener, start, builds);
				self.parents.push(std::mem::replace(&mut self.frame, frame));
				self.pos = start;
			}
		}
	}

	/// Consumes the closer of the current key path and hands the
	/// placeholder to the enclosing frame.
	fn close(&mut self, len: usize) {
		let Some(parent) = self.parents.pop() else {
			return;
		};
		self.pos += len;
		let mut frame = std::mem::replace(&mut self.frame, parent);
		self.memo.insert((frame.start, frame.closer), Attempt::Closed(self.pos));

		if frame.builds {
			frame.flush();
			self.frame.push(Segment::Placeholder {
				scope: frame.scope,
				key: frame.segments,
			});
		} else {
			self.frame.push_str(&self.input[frame.opener..self.pos]);
		}
	}

	/// Input ended inside a key path: its opener becomes literal text and
	/// the enclosing frame resumes right after it.
	fn unclosed(&mut self) {
		while let Some(parent) = self.parents.pop() {
			let frame = std::mem::replace(&mut self.frame, parent);
			self.memo.insert((frame.start, frame.closer), Attempt::Unclosed);
			self.frame.push_str(&self.input[frame.opener..frame.start]);
			self.pos = frame.start;

			// Resuming with the same closer would rescan the same text and
			// run out of input again.
			if self.frame.closer != frame.closer {
				break;
			}
		}
	}
}
