//! Subcommand implementations. Each one returns a serializable report that
//! `main` prints as JSON.

use serde::Serialize;
use the_mention::{
  Parsed,
  PartTypeId,
  PartTypes,
  Selection,
  Suggestion,
  keyword::{
    Keyword,
    keyword_for,
    keywords_by_trigger,
  },
  parse_value,
  reconcile::apply_edit,
  suggestion::{
    caret_after_commit,
    commit_suggestion,
  },
};

#[derive(Debug, Serialize)]
pub struct KeywordReport {
  pub part_type: PartTypeId,
  pub trigger:   Option<char>,
  pub keyword:   Option<Keyword>,
}

#[derive(Debug, Serialize)]
pub struct CommitReport {
  /// New encoded value, `null` when no keyword was open at the caret.
  pub value: Option<String>,
  /// Display offset after the inserted token.
  pub caret: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EditReport {
  pub value:        String,
  pub display_text: String,
}

pub fn parse(part_types: &PartTypes, encoded: &str) -> Parsed {
  parse_value(encoded, part_types)
}

pub fn keywords(part_types: &PartTypes, encoded: &str, caret: usize) -> Vec<KeywordReport> {
  let parsed = parse_value(encoded, part_types);
  keywords_by_trigger(&parsed, Selection::point(caret), part_types)
    .into_iter()
    .map(|(part_type, keyword)| {
      KeywordReport {
        part_type,
        trigger: part_types.get(part_type).and_then(|ty| ty.trigger_char()),
        keyword,
      }
    })
    .collect()
}

pub fn commit(
  part_types: &PartTypes,
  encoded: &str,
  caret: usize,
  id: PartTypeId,
  suggestion: &Suggestion,
) -> CommitReport {
  let parsed = parse_value(encoded, part_types);
  let selection = Selection::point(caret);
  let value = commit_suggestion(&parsed, part_types, id, selection, suggestion);
  let caret = value.as_ref().and_then(|_| {
    let keyword = keyword_for(&parsed, selection, part_types, id)?;
    let trailing_space = part_types.get(id)?.insert_trailing_space;
    Some(caret_after_commit(&keyword, suggestion, trailing_space))
  });
  CommitReport { value, caret }
}

pub fn edit(part_types: &PartTypes, encoded: &str, new_display: &str) -> EditReport {
  let parsed = parse_value(encoded, part_types);
  let value = apply_edit(&parsed.parts, &parsed.display_text, new_display);
  let display_text = parse_value(&value, part_types).display_text;
  EditReport {
    value,
    display_text,
  }
}
