//! Caret / selection in display-text coordinates.
//!
//! ```text
//! start=6, end=6:  "Hello |@Dav"   (caret)
//! start=0, end=5:  "[Hello] @Dav"  (range)
//! ```
//!
//! Offsets are bytes into the display text. Unlike an editor range there is
//! no anchor/head distinction; the hosting text field only reports bounds.

use serde::{
  Deserialize,
  Serialize,
};
use the_core::text::is_char_offset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
  pub start: usize,
  pub end:   usize,
}

impl Selection {
  /// Build a selection from two bounds in any order.
  pub fn new(a: usize, b: usize) -> Self {
    Self {
      start: a.min(b),
      end:   a.max(b),
    }
  }

  pub fn point(pos: usize) -> Self {
    Self::new(pos, pos)
  }

  pub fn is_caret(&self) -> bool {
    self.start == self.end
  }

  /// The caret position, or `None` when a range is selected.
  pub fn caret(&self) -> Option<usize> {
    self.is_caret().then_some(self.end)
  }

  pub fn len(&self) -> usize {
    self.end.saturating_sub(self.start)
  }

  /// `true` when both bounds can be used to slice `text`.
  pub fn is_within(&self, text: &str) -> bool {
    self.start <= self.end && is_char_offset(text, self.start) && is_char_offset(text, self.end)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_normalizes() {
    let selection = Selection::new(10, 5);
    assert_eq!(selection, Selection { start: 5, end: 10 });
    assert_eq!(selection.len(), 5);
    assert_eq!(selection.caret(), None);
  }

  #[test]
  fn test_point() {
    let selection = Selection::point(7);
    assert!(selection.is_caret());
    assert_eq!(selection.caret(), Some(7));
    assert_eq!(selection.len(), 0);
  }

  #[test]
  fn test_is_within() {
    assert!(Selection::point(3).is_within("abc"));
    assert!(!Selection::point(4).is_within("abc"));
    assert!(!Selection::point(2).is_within("a€"));
    // hand-built selections may be inverted
    assert!(!Selection { start: 2, end: 1 }.is_within("abc"));
  }
}
