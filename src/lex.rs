//! Line-oriented tokenizing shared by the `.obj` and `.mtl` parsers.
//!
//! Both formats are one directive per line: a keyword followed by
//! whitespace-separated fields. Blank lines and lines whose keyword starts
//! with `#` carry nothing and are never handed to the parsers.
use std::iter::TakeWhile;
use std::str::SplitWhitespace;
use thiserror::Error;

/// A problem found in the text of an `.obj` or `.mtl` file.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("line {line_number}: {message}")]
pub struct ParseError {
  /// The line number (1-based) the error occurred on.
  pub line_number: usize,
  /// A description of what went wrong.
  pub message: String,
}

impl ParseError {
  pub(crate) fn new<M: Into<String>>(line_number: usize, message: M) -> Self {
    ParseError {
      line_number,
      message: message.into(),
    }
  }
}

/// The fields of a line, up to a trailing `#` comment.
pub(crate) type Fields<'a> = TakeWhile<SplitWhitespace<'a>, fn(&&'a str) -> bool>;

fn not_comment(field: &&str) -> bool {
  !field.starts_with('#')
}

/// One non-empty, non-comment line split into its keyword and its fields.
#[derive(Clone, Debug)]
pub(crate) struct Line<'a> {
  pub(crate) number: usize,
  pub(crate) keyword: &'a str,
  fields: Fields<'a>,
}

/// Iterates over the meaningful lines of `input`, numbering them from 1.
/// A leading byte order mark is dropped.
pub(crate) fn lines(input: &str) -> impl Iterator<Item = Line<'_>> {
  input
    .strip_prefix('\u{feff}')
    .unwrap_or(input)
    .lines()
    .enumerate()
    .filter_map(|(i, text)| Line::new(i + 1, text))
}

impl<'a> Line<'a> {
  pub(crate) fn new(number: usize, text: &'a str) -> Option<Line<'a>> {
    let mut fields = text.split_whitespace();
    let keyword = fields.next()?;
    if keyword.starts_with('#') {
      return None;
    }
    Some(Line {
      number,
      keyword,
      fields: fields.take_while(not_comment as fn(&&'a str) -> bool),
    })
  }

  pub(crate) fn error<A, M: Into<String>>(&self, message: M) -> Result<A, ParseError> {
    Err(ParseError::new(self.number, message))
  }

  /// The next field, failing if the line has run out.
  pub(crate) fn parse_str(&mut self, what: &str) -> Result<&'a str, ParseError> {
    match self.fields.next() {
      Some(s) => Ok(s),
      None => self.error(format!("`{}` expects {} but the line ended.", self.keyword, what)),
    }
  }

  pub(crate) fn parse_f32(&mut self, what: &str) -> Result<f32, ParseError> {
    let s = self.parse_str(what)?;
    parse_f32_from(s).ok_or_else(|| {
      ParseError::new(
        self.number,
        format!("Expected f32 for {} of `{}` but got {}.", what, self.keyword, s),
      )
    })
  }

  /// Like `parse_f32`, but an exhausted line yields `None` instead of an error.
  pub(crate) fn parse_optional_f32(&mut self, what: &str) -> Result<Option<f32>, ParseError> {
    match self.fields.clone().next() {
      None => Ok(None),
      Some(_) => self.parse_f32(what).map(Some),
    }
  }

  pub(crate) fn parse_triple(&mut self) -> Result<[f32; 3], ParseError> {
    let x = self.parse_f32("a first component")?;
    let y = self.parse_f32("a second component")?;
    let z = self.parse_f32("a third component")?;
    Ok([x, y, z])
  }

  /// All fields left on the line.
  pub(crate) fn rest(self) -> Fields<'a> {
    self.fields
  }
}

pub(crate) fn parse_f32_from(s: &str) -> Option<f32> {
  lexical::parse::<f32, _>(s).ok()
}

pub(crate) fn parse_isize_from(s: &str) -> Option<isize> {
  lexical::parse::<isize, _>(s).ok()
}
