//! Mention-aware text input core.
//!
//! A mention input shows the user a clean *display text* (`Hello @David!`)
//! while the value of record is an *encoded* string that keeps every token
//! reversible (`Hello @[David](1)!`). This crate converts between the two and
//! keeps them in sync while the user types:
//!
//! - [`part_type`] describes the recognized token kinds.
//! - [`parse`] turns an encoded value into [`part::Part`]s and display text.
//! - [`keyword`] finds the partially typed keyword under the caret.
//! - [`implicit`] tracks hashtag-like tokens committed at word boundaries.
//! - [`reconcile`] folds a display-text edit back into the encoded value.
//! - [`suggestion`] splices a chosen suggestion into the encoded value.
//!
//! Every operation is a pure function of its arguments. The caller owns the
//! encoded value and the selection; [`field::MentionField`] is a small
//! caller-side bundle of that state for front ends that want one.

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod config;
pub mod field;
pub mod implicit;
pub mod keyword;
pub mod parse;
pub mod part;
pub mod part_type;
pub mod reconcile;
pub mod selection;
pub mod suggestion;

#[cfg(test)]
mod test_utils;

pub type Tendril = SmartString<LazyCompact>;

pub use crate::{
  parse::{
    Parsed,
    parse_value,
  },
  part::{
    Part,
    PartKind,
    Span,
  },
  part_type::{
    PartType,
    PartTypeId,
    PartTypes,
  },
  selection::Selection,
  suggestion::Suggestion,
};
