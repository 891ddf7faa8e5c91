// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A [`Selector`] is a path string that identifies a nested field in the state tree.
//! Dot separated keys and bracket indexes can be mixed freely:
//!
//! | Selector              | Segments                              |
//! | :-------------------- | :------------------------------------ |
//! | `todos`               | `Key("todos")`                        |
//! | `todos.items[0].done` | `Key("todos") Key("items") Index(0) Key("done")` |
//! | `grid[1][2]`          | `Key("grid") Index(1) Index(2)`       |
//! | `users["a.b"]`        | `Key("users") Key("a.b")`             |
//! | `users['x y']`        | `Key("users") Key("x y")`             |
//! | `lists.0`             | `Key("lists") Key("0")`               |
//!
//! Inside quotes, a backslash escapes the next character.

use std::{borrow::Cow,
          fmt::{Display, Formatter},
          iter::Peekable,
          str::{Chars, FromStr}};

use crate::{SlicerError, SlicerResult};

/// One step of a [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// The array index this segment addresses. Keys only qualify if they are a canonical
    /// unsigned integer (`"0"`, `"12"`, but not `"012"` or `"+1"`).
    pub fn as_array_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(index) => Some(*index),
            PathSegment::Key(key) => parse_canonical_index(key),
        }
    }

    /// The object key this segment addresses. Indexes use their decimal text.
    pub fn as_object_key(&self) -> Cow<'_, str> {
        match self {
            PathSegment::Key(key) => Cow::Borrowed(key),
            PathSegment::Index(index) => Cow::Owned(index.to_string()),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

fn parse_canonical_index(text: &str) -> Option<usize> {
    let is_canonical = match text.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        bytes => bytes.iter().all(u8::is_ascii_digit),
    };
    if is_canonical { text.parse().ok() } else { None }
}

/// A parsed path into the state tree. Keeps the text it was parsed from, which is what
/// [`Display`] renders and what action type names are derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Selector {
    raw: String,
    segments: Vec<PathSegment>,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// # Errors
    ///
    /// Returns [`SlicerError::InvalidSelector`] if the selector is empty, has an empty
    /// segment (`a..b`, `.a`, `a.`), empty brackets, an unterminated bracket or quote,
    /// or anything other than `.` or `[` after a `]`.
    pub fn try_parse(raw: &str) -> SlicerResult<Self> {
        let invalid = |reason: &'static str| SlicerError::InvalidSelector {
            selector: raw.to_string(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("selector is empty"));
        }

        let mut segments = vec![];
        let mut iter = raw.chars().peekable();
        let mut at_start = true;

        while let Some(&ch) = iter.peek() {
            match ch {
                '.' => {
                    if at_start {
                        return Err(invalid("empty segment"));
                    }
                    iter.next();
                    let key = read_key(&mut iter);
                    if key.is_empty() {
                        return Err(invalid("empty segment"));
                    }
                    segments.push(PathSegment::Key(key));
                }
                '[' => {
                    iter.next();
                    segments.push(read_bracket(&mut iter).map_err(invalid)?);
                }
                ']' => return Err(invalid("unexpected `]`")),
                _ => {
                    if !at_start {
                        return Err(invalid("expected `.` or `[` after `]`"));
                    }
                    segments.push(PathSegment::Key(read_key(&mut iter)));
                }
            }
            at_start = false;
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The selector for the whole state tree. It can't be parsed from a string, and
    /// generic actions that carry it are not intercepted by the wrapped reducer.
    pub fn root() -> Self { Self::default() }

    pub fn segments(&self) -> &[PathSegment] { &self.segments }

    pub fn as_str(&self) -> &str { &self.raw }

    pub fn is_root(&self) -> bool { self.segments.is_empty() }
}

/// Read a dot key, up to (not including) the next `.`, `[`, or `]`.
fn read_key(iter: &mut Peekable<Chars<'_>>) -> String {
    let mut key = String::new();
    while let Some(&ch) = iter.peek() {
        if matches!(ch, '.' | '[' | ']') {
            break;
        }
        key.push(ch);
        iter.next();
    }
    key
}

/// Read the inside of a bracket, the opening `[` has already been consumed. The closing
/// `]` is consumed.
fn read_bracket(iter: &mut Peekable<Chars<'_>>) -> Result<PathSegment, &'static str> {
    match iter.peek().copied() {
        None => Err("unterminated `[`"),
        Some(quote @ ('\'' | '"')) => {
            iter.next();
            let mut key = String::new();
            loop {
                match iter.next() {
                    None => return Err("unterminated quote"),
                    Some('\\') => match iter.next() {
                        Some(escaped) => key.push(escaped),
                        None => return Err("unterminated quote"),
                    },
                    Some(ch) if ch == quote => break,
                    Some(ch) => key.push(ch),
                }
            }
            match iter.next() {
                Some(']') => Ok(PathSegment::Key(key)),
                _ => Err("expected `]` after closing quote"),
            }
        }
        Some(_) => {
            let mut content = String::new();
            loop {
                match iter.next() {
                    None => return Err("unterminated `[`"),
                    Some(']') => break,
                    Some('[') => return Err("nested `[`"),
                    Some(ch) => content.push(ch),
                }
            }
            if content.is_empty() {
                return Err("empty brackets");
            }
            Ok(match parse_canonical_index(&content) {
                Some(index) => PathSegment::Index(index),
                None => PathSegment::Key(content),
            })
        }
    }
}

impl FromStr for Selector {
    type Err = SlicerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::try_parse(s) }
}

impl TryFrom<&str> for Selector {
    type Error = SlicerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> { Self::try_parse(value) }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str { &self.raw }
}

impl Display for Selector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.raw) }
}
