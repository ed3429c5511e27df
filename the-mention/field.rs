//! Caller-side state of one mention input.
//!
//! [`MentionField`] bundles the value of record, the selection and the
//! implicit tracking state, and drives the pure functions of this crate from
//! text-field events. Every field is public; the struct holds nothing the
//! caller could not hold itself.

use smallvec::SmallVec;
use the_core::text::clamp_to_char_boundary;

use crate::{
  implicit::{
    ImplicitState,
    commit_implicit,
  },
  keyword::{
    Keyword,
    keyword_for,
    keywords_by_trigger,
  },
  parse::{
    Parsed,
    parse_value,
  },
  part_type::{
    PartTypeId,
    PartTypes,
  },
  reconcile::{
    TextChange,
    apply_edit,
  },
  selection::Selection,
  suggestion::{
    Suggestion,
    caret_after_commit,
    commit_suggestion,
  },
};

/// What a text change did to the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
  Unchanged,
  Changed,
  /// The change completed an implicit keyword, which was committed as a token.
  ImplicitCommitted(Keyword),
}

#[derive(Debug, Clone)]
pub struct MentionField {
  pub part_types: PartTypes,
  /// Encoded value of record.
  pub value:      String,
  pub selection:  Selection,
  pub implicit:   ImplicitState,
}

impl MentionField {
  pub fn new(part_types: PartTypes) -> Self {
    Self::with_value(part_types, String::new())
  }

  /// Field holding `value`, caret at the end of its display text.
  pub fn with_value(part_types: PartTypes, value: impl Into<String>) -> Self {
    let value = value.into();
    let end = parse_value(&value, &part_types).display_text.len();
    Self {
      part_types,
      value,
      selection: Selection::point(end),
      implicit: ImplicitState::Idle,
    }
  }

  pub fn parsed(&self) -> Parsed {
    parse_value(&self.value, &self.part_types)
  }

  pub fn display_text(&self) -> String {
    self.parsed().display_text
  }

  /// Record a selection change reported by the text field.
  ///
  /// Moving the caret never completes an implicit keyword, only typing does.
  pub fn set_selection(&mut self, selection: Selection) {
    let parsed = self.parsed();
    self.selection = selection;
    self.implicit = match self.implicit.step(&parsed, selection, &self.part_types) {
      ImplicitState::TrackingClosed { .. } => ImplicitState::Idle,
      state => state,
    };
  }

  /// Apply the text field's new display text. The caret is placed at the end
  /// of the changed region.
  pub fn change_text(&mut self, new_display: &str) -> FieldEvent {
    let parsed = self.parsed();
    if parsed.display_text == new_display {
      return FieldEvent::Unchanged;
    }

    let change = TextChange::between(&parsed.display_text, new_display);
    self.value = apply_edit(&parsed.parts, &parsed.display_text, new_display);
    self.selection = Selection::point(clamp_to_char_boundary(new_display, change.new_end));

    let parsed = self.parsed();
    self.implicit = self.implicit.step(&parsed, self.selection, &self.part_types);

    let Some(value) = commit_implicit(&parsed, &self.part_types, &self.implicit, self.selection)
    else {
      return FieldEvent::Changed;
    };
    let keyword = match std::mem::take(&mut self.implicit) {
      ImplicitState::TrackingClosed { keyword, .. } => keyword,
      _ => return FieldEvent::Changed,
    };
    tracing::debug!(value = %keyword.value, "committed implicit keyword");
    self.value = value;
    FieldEvent::ImplicitCommitted(keyword)
  }

  /// Open keywords of the part types that show a suggestion list.
  pub fn keywords(&self) -> SmallVec<[(PartTypeId, Option<Keyword>); 4]> {
    let mut keywords = keywords_by_trigger(&self.parsed(), self.selection, &self.part_types);
    keywords.retain(|(id, _)| {
      self
        .part_types
        .get(*id)
        .is_some_and(|part_type| !part_type.implicit)
    });
    keywords
  }

  /// Commit `suggestion` for the keyword of part type `id` and move the caret
  /// past it. Returns `false` if the keyword is gone.
  pub fn select_suggestion(&mut self, id: PartTypeId, suggestion: &Suggestion) -> bool {
    let parsed = self.parsed();
    let Some(keyword) = keyword_for(&parsed, self.selection, &self.part_types, id) else {
      return false;
    };
    let Some(value) = commit_suggestion(&parsed, &self.part_types, id, self.selection, suggestion)
    else {
      return false;
    };

    let trailing_space = self
      .part_types
      .get(id)
      .is_some_and(|part_type| part_type.insert_trailing_space);
    self.value = value;
    self.selection = Selection::point(caret_after_commit(&keyword, suggestion, trailing_space));
    self.implicit = ImplicitState::Idle;
    true
  }
}
