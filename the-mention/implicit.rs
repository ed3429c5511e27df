//! Tracking of implicit tokens, hashtags committed at a word boundary.
//!
//! An implicit part type never shows a suggestion list. While the user types
//! `#rust` the keyword is tracked live; the moment a boundary char follows it
//! (`#rust `) the keyword is complete and can be committed as
//! `#[rust](rust) ` without any interaction.
//!
//! ```text
//!              keyword at caret               boundary typed after keyword
//!   Idle ─────────────────────► TrackingOpen ─────────────────────────► TrackingClosed
//!    ▲                               │                                       │
//!    └───────── anything else ───────┴──────────── next step ────────────────┘
//! ```
//!
//! The state is a plain value owned by the caller and advanced with
//! [`ImplicitState::step`] after every text or selection change.

use serde::Serialize;
use the_core::{
  chars::char_is_boundary,
  text::char_at,
};

use crate::{
  keyword::{
    Keyword,
    keyword_at,
    keyword_for,
  },
  parse::Parsed,
  part_type::PartTypes,
  selection::Selection,
  suggestion::{
    Suggestion,
    splice,
  },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum ImplicitState {
  #[default]
  Idle,
  /// The caret sits right after an implicit keyword that is still growing.
  TrackingOpen(Keyword),
  /// A boundary char was just typed at `boundary`, right after `keyword`.
  TrackingClosed { keyword: Keyword, boundary: usize },
}

impl ImplicitState {
  /// Next state for the current text and selection.
  pub fn step(&self, parsed: &Parsed, selection: Selection, part_types: &PartTypes) -> Self {
    if let Some(keyword) = implicit_keyword(parsed, selection, part_types) {
      return Self::TrackingOpen(keyword);
    }

    match self {
      Self::TrackingOpen(open) => {
        closed_keyword(parsed, selection, open)
          .map(|(keyword, boundary)| Self::TrackingClosed { keyword, boundary })
          .unwrap_or_default()
      },
      _ => Self::Idle,
    }
  }

  /// The partially typed value, for live styling.
  pub fn live_value(&self) -> Option<&str> {
    match self {
      Self::TrackingOpen(keyword) => Some(&keyword.value),
      _ => None,
    }
  }

  /// The keyword completed by the boundary char just typed.
  pub fn completed(&self) -> Option<&Keyword> {
    match self {
      Self::TrackingClosed { keyword, .. } => Some(keyword),
      _ => None,
    }
  }

  pub fn is_tracking(&self) -> bool {
    !matches!(self, Self::Idle)
  }
}

/// New encoded value with the completed keyword committed as a token whose
/// name and id are both the keyword text. `None` unless `state` is closed and
/// still matches `parsed` and `selection`.
///
/// No trailing space is added, the boundary char is already in the text.
pub fn commit_implicit(
  parsed: &Parsed,
  part_types: &PartTypes,
  state: &ImplicitState,
  selection: Selection,
) -> Option<String> {
  let ImplicitState::TrackingClosed { keyword, boundary } = state else {
    return None;
  };
  let part_type = part_types.get(keyword.part_type)?;
  if !part_type.is_implicit_trigger() {
    return None;
  }

  let caret = selection.caret()?;
  let boundary_char = char_at(&parsed.display_text, *boundary)?;
  if caret != boundary + boundary_char.len_utf8() {
    tracing::debug!(?selection, boundary, "stale implicit commit");
    return None;
  }

  let current = keyword_at(parsed, *boundary, keyword.part_type, keyword.trigger, 0)?;
  if current.value != keyword.value || current.trigger_offset != keyword.trigger_offset {
    return None;
  }

  let suggestion = Suggestion::new(current.value.as_str(), current.value.as_str());
  splice(parsed, &current, &suggestion, false)
}

/// Keyword of the first implicit trigger part type open at the selection.
fn implicit_keyword(
  parsed: &Parsed,
  selection: Selection,
  part_types: &PartTypes,
) -> Option<Keyword> {
  part_types
    .triggers()
    .filter(|(_, part_type, _)| part_type.implicit)
    .find_map(|(id, ..)| keyword_for(parsed, selection, part_types, id))
}

fn closed_keyword(parsed: &Parsed, selection: Selection, open: &Keyword) -> Option<(Keyword, usize)> {
  if open.value.is_empty() {
    return None;
  }
  let caret = selection.caret()?;
  let boundary = open.end();
  let ch = char_at(&parsed.display_text, boundary)?;
  if !char_is_boundary(ch) || caret != boundary + ch.len_utf8() {
    return None;
  }

  let keyword = keyword_at(parsed, boundary, open.part_type, open.trigger, 0)?;
  (keyword.value == open.value && keyword.trigger_offset == open.trigger_offset)
    .then_some((keyword, boundary))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    parse::parse_value,
    part_type::PartTypeId,
    test_utils::registry,
  };

  const HASHTAG: PartTypeId = PartTypeId::new(1);

  /// Feed `text` one char at a time, stepping the state after each keystroke.
  fn type_text(text: &str) -> (Parsed, ImplicitState) {
    let part_types = registry();
    let mut state = ImplicitState::Idle;
    let mut typed = String::new();
    let mut parsed = parse_value("", &part_types);
    for ch in text.chars() {
      typed.push(ch);
      parsed = parse_value(&typed, &part_types);
      state = state.step(&parsed, Selection::point(typed.len()), &part_types);
    }
    (parsed, state)
  }

  #[test]
  fn test_tracks_live_value() {
    let (_, state) = type_text("tags #ru");
    assert_eq!(state.live_value(), Some("ru"));
    assert!(state.is_tracking());
    assert_eq!(state.completed(), None);

    let (_, state) = type_text("tags #");
    assert_eq!(state.live_value(), Some(""));
  }

  #[test]
  fn test_boundary_closes_keyword() {
    let (_, state) = type_text("#rust ");
    let keyword = state.completed().unwrap();
    assert_eq!(keyword.value, "rust");
    assert_eq!(keyword.part_type, HASHTAG);
    assert!(matches!(state, ImplicitState::TrackingClosed { boundary: 5, .. }));

    let (_, state) = type_text("#rust\n");
    assert_eq!(state.completed().map(|kw| kw.value.as_str()), Some("rust"));
  }

  #[test]
  fn test_closed_returns_to_idle() {
    let (_, state) = type_text("#rust x");
    assert_eq!(state, ImplicitState::Idle);
  }

  #[test]
  fn test_empty_keyword_never_closes() {
    let (_, state) = type_text("# ");
    assert_eq!(state, ImplicitState::Idle);
  }

  #[test]
  fn test_explicit_triggers_are_not_tracked() {
    let (_, state) = type_text("@dav");
    assert_eq!(state, ImplicitState::Idle);
    let (_, state) = type_text("@dav ");
    assert_eq!(state, ImplicitState::Idle);
  }

  #[test]
  fn test_jumping_the_caret_does_not_close() {
    let part_types = registry();
    let parsed = parse_value("#rust is fun", &part_types);
    let open = ImplicitState::Idle.step(&parsed, Selection::point(5), &part_types);
    assert_eq!(open.live_value(), Some("rust"));
    // the boundary is there but the caret moved two chars ahead
    let next = open.step(&parsed, Selection::point(7), &part_types);
    assert_eq!(next, ImplicitState::Idle);
  }

  #[test]
  fn test_commit_implicit() {
    let part_types = registry();
    let (parsed, state) = type_text("I like #rust ");
    let value = commit_implicit(&parsed, &part_types, &state, Selection::point(13));
    assert_eq!(value.as_deref(), Some("I like #[rust](rust) "));

    let committed = parse_value(value.as_deref().unwrap(), &part_types);
    assert_eq!(committed.display_text, "I like #rust ");
    assert_eq!(committed.parts[1].mention().unwrap().id, "rust");
  }

  #[test]
  fn test_commit_implicit_rejects_stale_state() {
    let part_types = registry();
    let (parsed, state) = type_text("#rust ");
    assert_eq!(
      commit_implicit(&parsed, &part_types, &state, Selection::point(2)),
      None
    );
    assert_eq!(
      commit_implicit(&parsed, &part_types, &state, Selection::new(0, 6)),
      None
    );

    // the text changed under the closed state
    let other = parse_value("#rusty ", &part_types);
    assert_eq!(
      commit_implicit(&other, &part_types, &state, Selection::point(7)),
      None
    );

    let (parsed, open) = type_text("#rust");
    assert_eq!(
      commit_implicit(&parsed, &part_types, &open, Selection::point(5)),
      None
    );
  }
}
