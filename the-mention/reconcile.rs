//! Folding a display-text edit back into the encoded value.
//!
//! The hosting text field only ever reports the new display text. The change
//! is recovered by trimming the common prefix and suffix of the old and new
//! display text, which leaves one changed region:
//!
//! ```text
//! old: "Hello @David!"      prefix "Hello @David", suffix "!"
//! new: "Hello @Davidx!"     region old 12..12 -> new 12..13
//! ```
//!
//! Parts outside the region keep their encoded text. Parts the region touches
//! are demoted to plain text: an edited token is never repaired, its display
//! text simply becomes literal text (`Hello @Davidx!` above).
//!
//! # Touch Rules
//!
//! - A deletion or replacement touches every part overlapping the old region.
//! - An insertion at `k` touches a part with `start < k < end`, and a part
//!   ending at `k` unless the inserted text begins with whitespace or a line
//!   ending. Typing a space right after a token leaves it intact.
//!
//! An insertion next to a run of equal chars (`@@` + `@`) could have happened
//! at any position in the run; all of them give the same new text. The
//! rightmost position that touches no token is used, so typing next to a
//! token never demotes one elsewhere in the run.

use the_core::{
  chars::char_is_boundary,
  text::{
    common_prefix_len,
    common_suffix_len,
    prev_char,
  },
};

use crate::part::{
  Part,
  Span,
  encode_parts,
};

/// The single changed region between two display texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
  pub start:   usize,
  /// End of the replaced region in the old text.
  pub old_end: usize,
  /// End of the replacement in the new text.
  pub new_end: usize,
}

impl TextChange {
  pub fn between(old: &str, new: &str) -> Self {
    let prefix = common_prefix_len(old, new);
    let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);
    Self {
      start:   prefix,
      old_end: old.len() - suffix,
      new_end: new.len() - suffix,
    }
  }

  pub fn old_span(&self) -> Span {
    Span::new(self.start, self.old_end)
  }

  pub fn new_span(&self) -> Span {
    Span::new(self.start, self.new_end)
  }

  pub fn is_insertion(&self) -> bool {
    self.start == self.old_end
  }

  pub fn is_noop(&self) -> bool {
    self.start == self.old_end && self.start == self.new_end
  }

  /// Slide a pure insertion left across a run of text equal to it, to the
  /// rightmost position that touches no token.
  fn settle_insertion(self, parts: &[Part], old: &str, new: &str) -> Self {
    if !self.is_insertion() || self.is_noop() {
      return self;
    }
    let len = self.new_end - self.start;
    let touches_token = |change: &Self| {
      let inserted = &new[change.start..change.new_end];
      parts
        .iter()
        .any(|part| part.is_token() && change.touches(part, inserted))
    };

    let mut change = self;
    loop {
      if !touches_token(&change) {
        return change;
      }
      let Some(ch) = prev_char(old, change.start) else {
        return self;
      };
      let start = change.start - ch.len_utf8();
      // the insertion may move left only if the text it passes over reappears
      // right after it
      if new.get(start + len..change.start + len) != old.get(start..change.start) {
        return self;
      }
      change = Self {
        start,
        old_end: start,
        new_end: start + len,
      };
    }
  }

  fn touches(&self, part: &Part, inserted: &str) -> bool {
    let span = part.position;
    if !self.is_insertion() {
      return span.overlaps(self.old_span());
    }

    let at = self.start;
    if span.start < at && at < span.end {
      return true;
    }
    span.end == at && !span.is_empty() && !inserted.starts_with(char_is_boundary)
  }
}

/// New encoded value after the display text changed from `old_display` to
/// `new_display`. `parts` must be the parts of `old_display`.
pub fn apply_edit(parts: &[Part], old_display: &str, new_display: &str) -> String {
  let rendered_len = parts.last().map_or(0, |part| part.position.end);
  if rendered_len != old_display.len() {
    tracing::warn!(
      rendered_len,
      display_len = old_display.len(),
      "parts do not match the old display text, keeping the edit as plain text"
    );
    return new_display.to_string();
  }

  let change =
    TextChange::between(old_display, new_display).settle_insertion(parts, old_display, new_display);
  if change.is_noop() {
    return encode_parts(parts);
  }
  let inserted = &new_display[change.start..change.new_end];

  // widen the literal region over every demoted part
  let mut from = change.start;
  let mut to = change.old_end;
  for part in parts.iter().filter(|part| change.touches(part, inserted)) {
    from = from.min(part.position.start);
    to = to.max(part.position.end);
  }
  tracing::trace!(?change, from, to, "reconciling display edit");

  let new_to = to + new_display.len() - old_display.len();
  let Some(literal) = new_display.get(from..new_to) else {
    return new_display.to_string();
  };

  let mut value = String::with_capacity(new_display.len() + 16);
  for part in parts.iter().take_while(|part| part.position.end <= from) {
    value.push_str(&part.encoded);
  }
  value.push_str(literal);
  for part in parts.iter().filter(|part| part.position.start >= to) {
    value.push_str(&part.encoded);
  }
  value
}
