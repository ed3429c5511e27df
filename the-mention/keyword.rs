//! The keyword being typed after a trigger.
//!
//! With the caret right after `@Dav` in `Hello @Dav`, the active keyword for
//! `@` is `Dav`. The scan walks backward from the caret inside the part that
//! holds it and stops at:
//!
//! - the trigger: success, if it starts a word (start of text or after
//!   whitespace), so `mail@host` never opens a mention
//! - a line ending, or more spaces than the part type allows: no keyword
//! - the start of the part: no keyword, a committed token is never reopened
//!
//! A range selection never has a keyword.

use serde::Serialize;
use smallvec::SmallVec;
use the_core::{
  chars::{
    char_is_boundary,
    char_is_line_ending,
    char_is_whitespace,
  },
  text::{
    is_char_offset,
    prev_char,
  },
};

use crate::{
  parse::Parsed,
  part::Span,
  part_type::{
    PartTypeId,
    PartTypes,
  },
  selection::Selection,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Keyword {
  pub part_type:      PartTypeId,
  pub trigger:        char,
  /// Text typed after the trigger, up to the caret. May be empty.
  pub value:          String,
  /// Display offset of the trigger character.
  pub trigger_offset: usize,
  /// Index of the part holding the trigger and the caret.
  pub part_index:     usize,
}

impl Keyword {
  /// Display offset right after the keyword (the caret it was read at).
  pub fn end(&self) -> usize {
    self.trigger_offset + self.trigger.len_utf8() + self.value.len()
  }

  /// Display span from the trigger through the end of the keyword.
  pub fn span(&self) -> Span {
    Span::new(self.trigger_offset, self.end())
  }
}

/// Keyword for one trigger part type at the selection.
pub fn keyword_for(
  parsed: &Parsed,
  selection: Selection,
  part_types: &PartTypes,
  id: PartTypeId,
) -> Option<Keyword> {
  let part_type = part_types.get(id)?;
  let trigger = part_type.trigger_char()?;
  if !selection.is_within(&parsed.display_text) {
    return None;
  }
  let caret = selection.caret()?;
  keyword_at(parsed, caret, id, trigger, part_type.space_budget())
}

/// Keyword of every trigger part type, in registry order.
pub fn keywords_by_trigger(
  parsed: &Parsed,
  selection: Selection,
  part_types: &PartTypes,
) -> SmallVec<[(PartTypeId, Option<Keyword>); 4]> {
  part_types
    .triggers()
    .map(|(id, ..)| (id, keyword_for(parsed, selection, part_types, id)))
    .collect()
}

/// The first trigger part type with an open keyword at the selection.
pub fn active_keyword(
  parsed: &Parsed,
  selection: Selection,
  part_types: &PartTypes,
) -> Option<Keyword> {
  part_types
    .triggers()
    .find_map(|(id, ..)| keyword_for(parsed, selection, part_types, id))
}

pub(crate) fn keyword_at(
  parsed: &Parsed,
  caret: usize,
  id: PartTypeId,
  trigger: char,
  space_budget: usize,
) -> Option<Keyword> {
  let text = parsed.display_text.as_str();
  if !is_char_offset(text, caret) {
    return None;
  }

  let (part_index, part) = parsed.part_at_caret(caret)?;
  if part.mention().is_some() {
    return None;
  }

  let start = part.position.start;
  let mut spaces = 0;
  for (index, ch) in text[start..caret].char_indices().rev() {
    let offset = start + index;
    if ch == trigger {
      if !starts_word(text, offset) {
        return None;
      }
      return Some(Keyword {
        part_type: id,
        trigger,
        value: text[offset + ch.len_utf8()..caret].to_string(),
        trigger_offset: offset,
        part_index,
      });
    }
    if char_is_line_ending(ch) {
      return None;
    }
    if char_is_whitespace(ch) {
      spaces += 1;
      if spaces > space_budget {
        return None;
      }
    }
  }

  None
}

fn starts_word(text: &str, offset: usize) -> bool {
  prev_char(text, offset).is_none_or(char_is_boundary)
}
