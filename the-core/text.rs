//! UTF-8 offset helpers.
//!
//! Offsets throughout the mention crates are byte offsets into a `&str`. The
//! helpers here keep them on char boundaries so slicing never panics.
//!
//! ```
//! use the_core::text::{common_prefix_len, common_suffix_len};
//!
//! assert_eq!(common_prefix_len("hello", "help"), 3);
//! assert_eq!(common_suffix_len("hello", "jello"), 4);
//! ```

/// Returns `true` if `offset` can be used to slice `text`.
#[inline]
pub fn is_char_offset(text: &str, offset: usize) -> bool {
  offset <= text.len() && text.is_char_boundary(offset)
}

/// Clamp an arbitrary byte offset to the nearest char boundary at or before
/// it, never past the end of `text`.
#[inline]
pub fn clamp_to_char_boundary(text: &str, offset: usize) -> usize {
  let mut offset = offset.min(text.len());
  while offset > 0 && !text.is_char_boundary(offset) {
    offset -= 1;
  }
  offset
}

/// The char immediately before `offset`, if any.
pub fn prev_char(text: &str, offset: usize) -> Option<char> {
  if !is_char_offset(text, offset) {
    return None;
  }
  text[..offset].chars().next_back()
}

/// The char starting at `offset`, if any.
pub fn char_at(text: &str, offset: usize) -> Option<char> {
  if !is_char_offset(text, offset) {
    return None;
  }
  text[offset..].chars().next()
}

/// Length in bytes of the longest common prefix, aligned to whole chars.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
  a.chars()
    .zip(b.chars())
    .take_while(|(x, y)| x == y)
    .map(|(ch, _)| ch.len_utf8())
    .sum()
}

/// Length in bytes of the longest common suffix, aligned to whole chars.
///
/// The result never exceeds the length of the shorter input.
pub fn common_suffix_len(a: &str, b: &str) -> usize {
  a.chars()
    .rev()
    .zip(b.chars().rev())
    .take_while(|(x, y)| x == y)
    .map(|(ch, _)| ch.len_utf8())
    .sum()
}
