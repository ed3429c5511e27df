//! Encoded value → display text and parts.
//!
//! The scan walks the encoded value left to right. At each step every part
//! type reports its next match; the earliest one wins, then the longest, then
//! the one registered first. Text between matches becomes plain parts.
//!
//! Parsing is total. Malformed token syntax such as `@[David](1` simply does
//! not match and stays plain text.

use std::ops::Range;

use serde::Serialize;

use crate::{
  part::{
    Mention,
    Part,
    PartKind,
    Span,
    encode_parts,
  },
  part_type::{
    Matcher,
    PartType,
    PartTypeId,
    PartTypes,
  },
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parsed {
  pub display_text: String,
  pub parts:        Vec<Part>,
}

impl Parsed {
  pub fn encoded(&self) -> String {
    encode_parts(&self.parts)
  }

  /// The part a caret at `caret` belongs to, with its index.
  pub fn part_at_caret(&self, caret: usize) -> Option<(usize, &Part)> {
    self
      .parts
      .iter()
      .enumerate()
      .find(|(_, part)| part.position.holds_caret(caret))
  }
}

pub fn parse_value(encoded: &str, part_types: &PartTypes) -> Parsed {
  let mut builder = PartsBuilder::default();
  let mut lookahead = vec![Lookahead::Pending; part_types.len()];
  let mut pos = 0;

  while pos < encoded.len() {
    let mut best: Option<&Candidate> = None;

    for (id, part_type) in part_types.iter() {
      let slot = &mut lookahead[id.index()];
      if matches!(slot, Lookahead::Found(candidate) if candidate.start < pos) {
        *slot = Lookahead::Pending;
      }
      if matches!(slot, Lookahead::Pending) {
        *slot = match find_candidate(encoded, pos, id, part_type, part_types) {
          Some(candidate) => Lookahead::Found(candidate),
          None => Lookahead::Exhausted,
        };
      }
    }

    for slot in &lookahead {
      let Lookahead::Found(candidate) = slot else {
        continue;
      };
      let better = best.is_none_or(|best| {
        candidate.start < best.start
          || (candidate.start == best.start && candidate.len() > best.len())
      });
      if better {
        best = Some(candidate);
      }
    }

    let Some(best) = best else {
      break;
    };
    builder.push_plain(&encoded[pos..best.start]);
    builder.push_token(encoded, best);
    pos = best.end;
  }

  builder.push_plain(&encoded[pos..]);
  let parsed = builder.finish();
  tracing::trace!(parts = parsed.parts.len(), "parsed mention value");
  parsed
}

#[derive(Debug, Clone)]
enum Lookahead {
  /// Needs a search from the current position.
  Pending,
  Found(Candidate),
  /// No match anywhere after the last search position.
  Exhausted,
}

#[derive(Debug, Clone)]
struct Candidate {
  part_type: PartTypeId,
  start:     usize,
  end:       usize,
  token:     Option<TokenFields>,
}

impl Candidate {
  fn len(&self) -> usize {
    self.end - self.start
  }
}

#[derive(Debug, Clone)]
struct TokenFields {
  trigger: char,
  name:    Range<usize>,
  id:      Range<usize>,
}

fn find_candidate(
  encoded: &str,
  from: usize,
  id: PartTypeId,
  part_type: &PartType,
  part_types: &PartTypes,
) -> Option<Candidate> {
  match &part_type.matcher {
    Matcher::Trigger(trigger) => {
      let captures = part_types.grammar(id)?.captures_at(encoded, from)?;
      let whole = captures.get(0)?;
      Some(Candidate {
        part_type: id,
        start:     whole.start(),
        end:       whole.end(),
        token:     Some(TokenFields {
          trigger: *trigger,
          name:    captures.get(1)?.range(),
          id:      captures.get(2)?.range(),
        }),
      })
    },
    Matcher::Pattern(regex) => {
      let mut at = from;
      loop {
        let found = regex.find_at(encoded, at)?;
        if !found.is_empty() {
          return Some(Candidate {
            part_type: id,
            start:     found.start(),
            end:       found.end(),
            token:     None,
          });
        }
        // empty matches never produce a part
        at = found.end() + encoded[found.end()..].chars().next()?.len_utf8();
      }
    },
  }
}

#[derive(Default)]
struct PartsBuilder {
  display_text: String,
  encoded_len:  usize,
  parts:        Vec<Part>,
}

impl PartsBuilder {
  fn push_plain(&mut self, text: &str) {
    if text.is_empty() {
      return;
    }
    self
      .parts
      .push(Part::plain(text, self.display_text.len(), self.encoded_len));
    self.display_text.push_str(text);
    self.encoded_len += text.len();
  }

  fn push_token(&mut self, encoded: &str, candidate: &Candidate) {
    let raw = &encoded[candidate.start..candidate.end];
    let display_start = self.display_text.len();

    let kind = match &candidate.token {
      Some(token) => {
        let name = &encoded[token.name.clone()];
        self.display_text.push(token.trigger);
        self.display_text.push_str(name);
        PartKind::Trigger(Mention {
          part_type: candidate.part_type,
          trigger:   token.trigger,
          name:      name.into(),
          id:        encoded[token.id.clone()].into(),
        })
      },
      None => {
        self.display_text.push_str(raw);
        PartKind::Pattern {
          part_type: candidate.part_type,
        }
      },
    };

    self.parts.push(Part {
      kind,
      text: self.display_text[display_start..].into(),
      encoded: raw.into(),
      position: Span::new(display_start, self.display_text.len()),
      encoded_position: Span::new(self.encoded_len, self.encoded_len + raw.len()),
    });
    self.encoded_len += raw.len();
  }

  fn finish(self) -> Parsed {
    Parsed {
      display_text: self.display_text,
      parts:        self.parts,
    }
  }
}
