//! Character classes used to find token and keyword boundaries.

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  matches!(
    ch,
    '\u{000A}' // LineFeed
      | '\u{000B}' // VerticalTab
      | '\u{000C}' // FormFeed
      | '\u{000D}' // CarriageReturn
      | '\u{0085}' // NextLine
      | '\u{2028}' // Line Separator
      | '\u{2029}' // ParagraphSeparator
  )
}

#[inline]
pub fn char_is_whitespace(ch: char) -> bool {
  match ch {
      '\u{0009}' | // Character Tabulation
      '\u{0020}' | // Space
      '\u{00A0}' | // No-break Space
      '\u{180E}' | // Mongolian Vowel Separator
      '\u{202F}' | // Narrow No-break Space
      '\u{205F}' | // Medium Mathematical Space
      '\u{3000}' | // Ideographic Space
      '\u{FEFF}'   // Zero Width No-break Space
      => true,

      // En Quad, Em Quad, En Space, Em Space, Three-per-em Space,
      // Four-per-em Space, Six-per-em Space, Figure Space,
      // Punctuation Space, Thin Space, Hair Space, Zero Width Space.
      ch if ('\u{2000}' ..= '\u{200B}').contains(&ch) => true,

      _ => false,
    }
}

/// Characters that end a word for token purposes: whitespace or a line
/// ending.
#[inline]
pub fn char_is_boundary(ch: char) -> bool {
  char_is_whitespace(ch) || char_is_line_ending(ch)
}
