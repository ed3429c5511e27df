use quickcheck::{
  Arbitrary,
  Gen,
};

use crate::part_type::{
  PartType,
  PartTypes,
};

/// `@` mentions, implicit `#` hashtags and a small URL pattern.
pub fn registry() -> PartTypes {
  PartTypes::new([
    PartType::trigger('@'),
    PartType::trigger('#').with_implicit(true),
    PartType::pattern(r"www\.[a-z]+\.[a-z]{2,}").unwrap(),
  ])
  .unwrap()
}

/// Encoded values stitched together from fragments that exercise tokens,
/// broken token syntax, patterns and multibyte text.
#[derive(Debug, Clone)]
pub struct EncodedValue(pub String);

const FRAGMENTS: &[&str] = &[
  "Hello ",
  "x",
  " ",
  "\n",
  "é",
  "@",
  "#",
  "[",
  "]",
  "(",
  ")",
  "@[David](1)",
  "@[David Tabaka](42)",
  "#[rust](rust)",
  "@[](",
  "www.example.com",
  "www.",
];

impl Arbitrary for EncodedValue {
  fn arbitrary(g: &mut Gen) -> Self {
    let len = usize::arbitrary(g) % 12;
    let mut value = String::new();
    for _ in 0..len {
      if let Some(fragment) = g.choose(FRAGMENTS) {
        value.push_str(fragment);
      }
    }
    Self(value)
  }
}
