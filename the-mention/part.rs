//! Parsed pieces of a mention value.
//!
//! A value is a sequence of contiguous [`Part`]s. Each part knows its text in
//! both coordinate systems:
//!
//! ```text
//! encoded: "Hello @[David](1)!"   display: "Hello @David!"
//!           [ plain ][ trigger ][p]         [ plain ][trig][p]
//! ```
//!
//! Concatenating every part's `encoded` text gives back the encoded value and
//! concatenating every part's `text` gives the display text.

use serde::Serialize;

use crate::{
  Tendril,
  part_type::PartTypeId,
};

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
  pub start: usize,
  pub end:   usize,
}

impl Span {
  pub fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  pub fn len(&self) -> usize {
    self.end - self.start
  }

  pub fn is_empty(&self) -> bool {
    self.start == self.end
  }

  /// A caret at `pos` belongs to this span if it sits after the first char
  /// and no later than the end.
  pub fn holds_caret(&self, pos: usize) -> bool {
    self.start < pos && pos <= self.end
  }

  pub fn overlaps(&self, other: Span) -> bool {
    self.start < other.end && other.start < self.end
  }
}

/// A committed trigger token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mention {
  pub part_type: PartTypeId,
  pub trigger:   char,
  pub name:      Tendril,
  pub id:        Tendril,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PartKind {
  Plain,
  Trigger(Mention),
  Pattern { part_type: PartTypeId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
  pub kind:             PartKind,
  /// Display text.
  pub text:             Tendril,
  pub encoded:          Tendril,
  /// Span in the display text.
  pub position:         Span,
  /// Span in the encoded value.
  pub encoded_position: Span,
}

impl Part {
  pub fn plain(text: &str, display_start: usize, encoded_start: usize) -> Self {
    Self {
      kind:             PartKind::Plain,
      text:             text.into(),
      encoded:          text.into(),
      position:         Span::new(display_start, display_start + text.len()),
      encoded_position: Span::new(encoded_start, encoded_start + text.len()),
    }
  }

  pub fn is_plain(&self) -> bool {
    matches!(self.kind, PartKind::Plain)
  }

  /// Trigger and pattern parts are tokens; plain text is not.
  pub fn is_token(&self) -> bool {
    !self.is_plain()
  }

  pub fn mention(&self) -> Option<&Mention> {
    match &self.kind {
      PartKind::Trigger(mention) => Some(mention),
      _ => None,
    }
  }

  pub fn part_type(&self) -> Option<PartTypeId> {
    match &self.kind {
      PartKind::Plain => None,
      PartKind::Trigger(mention) => Some(mention.part_type),
      PartKind::Pattern { part_type } => Some(*part_type),
    }
  }
}

/// Canonical encoded form of a trigger token.
pub fn mention_value(trigger: char, name: &str, id: &str) -> String {
  let mut value = String::with_capacity(name.len() + id.len() + trigger.len_utf8() + 4);
  value.push(trigger);
  value.push('[');
  value.push_str(name);
  value.push_str("](");
  value.push_str(id);
  value.push(')');
  value
}

pub fn encode_parts(parts: &[Part]) -> String {
  parts.iter().map(|part| part.encoded.as_str()).collect()
}

pub fn render_parts(parts: &[Part]) -> String {
  parts.iter().map(|part| part.text.as_str()).collect()
}
