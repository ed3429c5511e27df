//! Splicing a chosen suggestion into the encoded value.
//!
//! The open keyword (`@Dav` in `Hello @Dav`) is replaced by the token
//! `@[David Tabaka](42)`, optionally followed by a space. Every other part
//! keeps its stored encoding byte for byte.
//!
//! The keyword is re-derived from the caller's current state on every call.
//! If it no longer exists (the caret moved, or the text changed since the
//! suggestion list was shown) the commit is stale and returns `None`.

use serde::{
  Deserialize,
  Serialize,
};

use crate::{
  Tendril,
  keyword::{
    Keyword,
    keyword_for,
  },
  parse::Parsed,
  part::mention_value,
  part_type::{
    PartTypeId,
    PartTypes,
  },
  selection::Selection,
};

/// Caller supplied candidate. `name` is shown after the trigger, `id` is
/// kept only in the encoded value.
///
/// Neither is escaped: `name` must not contain `[` or `]` and `id` must not
/// contain `(` or `)`, or the token will not parse back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
  pub id:   Tendril,
  pub name: Tendril,
}

impl Suggestion {
  pub fn new(id: impl Into<Tendril>, name: impl Into<Tendril>) -> Self {
    Self {
      id:   id.into(),
      name: name.into(),
    }
  }
}

/// New encoded value with the keyword at `selection` replaced by
/// `suggestion`, or `None` if there is no open keyword for `id` there.
pub fn commit_suggestion(
  parsed: &Parsed,
  part_types: &PartTypes,
  id: PartTypeId,
  selection: Selection,
  suggestion: &Suggestion,
) -> Option<String> {
  let part_type = part_types.get(id)?;
  let Some(keyword) = keyword_for(parsed, selection, part_types, id) else {
    tracing::debug!(?selection, part_type = id.index(), "stale suggestion commit");
    return None;
  };
  splice(parsed, &keyword, suggestion, part_type.insert_trailing_space)
}

/// Display offset right after a token committed for `keyword`, including the
/// trailing space when one is inserted.
pub fn caret_after_commit(keyword: &Keyword, suggestion: &Suggestion, trailing_space: bool) -> usize {
  keyword.trigger_offset
    + keyword.trigger.len_utf8()
    + suggestion.name.len()
    + usize::from(trailing_space)
}

pub(crate) fn splice(
  parsed: &Parsed,
  keyword: &Keyword,
  suggestion: &Suggestion,
  trailing_space: bool,
) -> Option<String> {
  let part = parsed.parts.get(keyword.part_index)?;
  let start = keyword.trigger_offset.checked_sub(part.position.start)?;
  let end = keyword.end().checked_sub(part.position.start)?;
  let before = part.text.get(..start)?;
  let after = part.text.get(end..)?;

  let token = mention_value(keyword.trigger, &suggestion.name, &suggestion.id);
  tracing::trace!(%token, part_index = keyword.part_index, "committing suggestion");

  let mut value = String::with_capacity(parsed.display_text.len() + token.len() + 1);
  for (index, part) in parsed.parts.iter().enumerate() {
    if index != keyword.part_index {
      value.push_str(&part.encoded);
      continue;
    }
    value.push_str(before);
    value.push_str(&token);
    if trailing_space {
      value.push(' ');
    }
    value.push_str(after);
  }
  Some(value)
}
