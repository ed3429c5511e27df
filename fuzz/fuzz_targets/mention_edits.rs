#![no_main]

//! Random display-text edits folded back into an encoded value.
//!
//! Input layout: initial value length, initial value bytes, op count, then
//! per op an anchor, a delete count, an insert length and the insert bytes.

use libfuzzer_sys::fuzz_target;
use the_mention::{
  Parsed,
  PartType,
  PartTypes,
  parse_value,
  part::render_parts,
  reconcile::apply_edit,
};

const MAX_INITIAL_BYTES: usize = 4 * 1024;
const MAX_OPS: usize = 64;
const MAX_INSERT_BYTES: usize = 32;

struct EditOp {
  anchor: u16,
  delete: u16,
  insert: String,
}

fuzz_target!(|data: &[u8]| {
  let Some(part_types) = part_types() else {
    return;
  };
  let mut cursor = ByteCursor::new(data);
  let initial_len = cursor.next_usize(MAX_INITIAL_BYTES);
  let mut value = lossy_text(cursor.next_bytes(initial_len));

  let op_count = cursor.next_usize(MAX_OPS);
  for _ in 0..op_count {
    let op = EditOp {
      anchor: cursor.next_u16(),
      delete: cursor.next_u16(),
      insert: {
        let len = cursor.next_usize(MAX_INSERT_BYTES);
        lossy_text(cursor.next_bytes(len))
      },
    };

    let parsed = parse_value(&value, &part_types);
    check_parsed(&parsed, &value);

    let new_display = edit_display(&parsed.display_text, &op);
    value = apply_edit(&parsed.parts, &parsed.display_text, &new_display);
    // without a `[` no literal text can form a new trigger token
    if !new_display.contains('[') {
      assert_eq!(parse_value(&value, &part_types).display_text, new_display);
    }
  }
});

fn part_types() -> Option<PartTypes> {
  PartTypes::new([
    PartType::trigger('@'),
    PartType::trigger('#').with_implicit(true),
    PartType::pattern(r"www\.[a-z]+\.[a-z]{2,}").ok()?,
  ])
  .ok()
}

fn check_parsed(parsed: &Parsed, value: &str) {
  assert_eq!(parsed.encoded(), value);
  assert_eq!(render_parts(&parsed.parts), parsed.display_text);

  let mut display = 0;
  let mut encoded = 0;
  for part in &parsed.parts {
    assert_eq!(part.position.start, display);
    assert_eq!(part.encoded_position.start, encoded);
    display = part.position.end;
    encoded = part.encoded_position.end;
  }
  assert_eq!(display, parsed.display_text.len());
}

/// Replace `delete` chars at char index `anchor` with the insert text.
fn edit_display(text: &str, op: &EditOp) -> String {
  let boundaries: Vec<usize> = text
    .char_indices()
    .map(|(offset, _)| offset)
    .chain(std::iter::once(text.len()))
    .collect();
  let from = op.anchor as usize % boundaries.len();
  let to = (from + op.delete as usize % (boundaries.len() - from)).min(boundaries.len() - 1);

  let mut edited = String::with_capacity(text.len() + op.insert.len());
  edited.push_str(&text[..boundaries[from]]);
  edited.push_str(&op.insert);
  edited.push_str(&text[boundaries[to]..]);
  edited
}

fn lossy_text(bytes: &[u8]) -> String {
  String::from_utf8_lossy(bytes).into_owned()
}

struct ByteCursor<'a> {
  data: &'a [u8],
  pos:  usize,
}

impl<'a> ByteCursor<'a> {
  fn new(data: &'a [u8]) -> Self {
    Self { data, pos: 0 }
  }

  fn next_u8(&mut self) -> u8 {
    let value = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos = self.pos.saturating_add(1);
    value
  }

  fn next_u16(&mut self) -> u16 {
    u16::from_le_bytes([self.next_u8(), self.next_u8()])
  }

  fn next_usize(&mut self, max: usize) -> usize {
    usize::from(self.next_u16()) % (max + 1)
  }

  fn next_bytes(&mut self, len: usize) -> &'a [u8] {
    let start = self.pos.min(self.data.len());
    let end = start.saturating_add(len).min(self.data.len());
    self.pos = end;
    &self.data[start..end]
  }
}
