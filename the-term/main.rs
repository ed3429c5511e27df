//! Command line front end for the-mention.
//!
//! Every subcommand reads an encoded value, runs one core operation and
//! prints the result as JSON on stdout:
//!
//! ```text
//! the-mention parse 'Hello @[David](1)!'
//! the-mention keyword 'Hello @Dav' --caret 10
//! the-mention commit 'Hello @Dav' --caret 10 --trigger @ --id 42 --name 'David Tabaka'
//! the-mention edit 'Hello @[David](1)!' 'Hello @Davidx!'
//! ```

mod commands;
mod logging;

use std::{
  io::Write,
  path::{
    Path,
    PathBuf,
  },
};

use clap::{
  Parser,
  Subcommand,
};
use eyre::{
  Result,
  WrapErr,
};
use serde::Serialize;
use the_mention::{
  PartTypes,
  Suggestion,
  config::{
    default_part_types,
    part_types_from_toml,
  },
};

#[derive(Debug, Parser)]
#[command(name = "the-mention")]
#[command(about = "Parse, edit and complete mention-encoded text")]
struct Cli {
  /// TOML file with `[[part-types]]`, instead of the built-in registry
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Show the display text and parts of an encoded value
  Parse { encoded: String },

  /// Show the open keyword of every trigger at a caret
  Keyword {
    encoded: String,
    /// Byte offset into the display text
    #[arg(long)]
    caret:   usize,
  },

  /// Replace the open keyword at a caret with a suggestion
  Commit {
    encoded: String,
    #[arg(long)]
    caret:   usize,
    #[arg(long)]
    trigger: char,
    #[arg(long)]
    id:      String,
    #[arg(long)]
    name:    String,
  },

  /// Fold a new display text into an encoded value
  Edit {
    encoded:     String,
    new_display: String,
  },
}

fn main() -> Result<()> {
  logging::init();
  let cli = Cli::parse();
  let part_types = load_part_types(cli.config.as_deref())?;

  match cli.command {
    Command::Parse { encoded } => print_json(&commands::parse(&part_types, &encoded)),
    Command::Keyword { encoded, caret } => {
      print_json(&commands::keywords(&part_types, &encoded, caret))
    },
    Command::Commit {
      encoded,
      caret,
      trigger,
      id,
      name,
    } => {
      let part_type = part_types
        .by_trigger(trigger)
        .ok_or_else(|| eyre::eyre!("no part type is triggered by {trigger:?}"))?;
      let suggestion = Suggestion::new(id, name);
      print_json(&commands::commit(
        &part_types,
        &encoded,
        caret,
        part_type,
        &suggestion,
      ))
    },
    Command::Edit {
      encoded,
      new_display,
    } => print_json(&commands::edit(&part_types, &encoded, &new_display)),
  }
}

fn load_part_types(path: Option<&Path>) -> Result<PartTypes> {
  let Some(path) = path else {
    return default_part_types().wrap_err("built-in part types are invalid");
  };
  let source = std::fs::read_to_string(path)
    .wrap_err_with(|| format!("failed to read {}", path.display()))?;
  let part_types = part_types_from_toml(&source)
    .wrap_err_with(|| format!("invalid part types in {}", path.display()))?;
  tracing::debug!(path = %path.display(), count = part_types.len(), "loaded part types");
  Ok(part_types)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
  let mut stdout = std::io::stdout().lock();
  serde_json::to_writer_pretty(&mut stdout, value).wrap_err("failed to write output")?;
  writeln!(stdout)?;
  Ok(())
}
