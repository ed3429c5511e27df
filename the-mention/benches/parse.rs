//! Benchmarks for the per-keystroke operations of the-mention.
//!
//! Run with: `cargo bench -p the-mention --bench parse`

use divan::{
  Bencher,
  black_box,
};
use the_mention::{
  PartTypes,
  Selection,
  config::default_part_types,
  keyword::active_keyword,
  parse_value,
  reconcile::apply_edit,
};

fn main() {
  divan::main();
}

fn part_types() -> PartTypes {
  default_part_types().unwrap()
}

/// Encoded value of roughly `size` bytes mixing mentions, hashtags and URLs.
fn make_value(size: usize) -> String {
  let chunk = "Hey @[David Tabaka](42), see www.example.com/docs about #[rust](rust). ";
  let mut value = String::with_capacity(size + chunk.len());
  while value.len() < size {
    value.push_str(chunk);
  }
  value
}

fn make_plain(size: usize) -> String {
  let line = "The quick brown fox jumps over the lazy dog. ";
  let mut s = String::with_capacity(size + line.len());
  while s.len() < size {
    s.push_str(line);
  }
  s
}

// `parse_value` benchmarks.

mod parse {
  use super::*;

  #[divan::bench(args = [256, 4 * 1024, 64 * 1024])]
  fn tokens(bencher: Bencher, size: usize) {
    let part_types = part_types();
    let value = make_value(size);

    bencher.bench(|| black_box(parse_value(black_box(&value), &part_types)));
  }

  #[divan::bench(args = [256, 4 * 1024, 64 * 1024])]
  fn plain(bencher: Bencher, size: usize) {
    let part_types = part_types();
    let value = make_plain(size);

    bencher.bench(|| black_box(parse_value(black_box(&value), &part_types)));
  }
}

// One keystroke: reconcile the edit, then look up the keyword.

mod keystroke {
  use super::*;

  #[divan::bench(args = [256, 4 * 1024, 64 * 1024])]
  fn type_at_end(bencher: Bencher, size: usize) {
    let part_types = part_types();
    let mut value = make_value(size);
    value.push_str("@Da");
    let parsed = parse_value(&value, &part_types);
    let mut new_display = parsed.display_text.clone();
    new_display.push('v');

    bencher.bench(|| {
      let encoded = apply_edit(&parsed.parts, &parsed.display_text, black_box(&new_display));
      let next = parse_value(&encoded, &part_types);
      let caret = Selection::point(next.display_text.len());
      black_box(active_keyword(&next, caret, &part_types))
    });
  }
}
