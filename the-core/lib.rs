//! Text primitives shared by the mention crates.
//!
//! Everything here works on plain `&str` values and UTF-8 byte offsets.

pub mod chars;
pub mod text;
