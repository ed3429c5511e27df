//! The registry of token kinds a mention input recognizes.
//!
//! A [`PartType`] is either trigger based (`@`, `#`) or pattern based (a
//! regular expression such as a URL matcher). Trigger tokens are stored in the
//! encoded value as `<trigger>[<name>](<id>)`; pattern tokens are stored
//! verbatim.
//!
//! ```ignore
//! use the_mention::part_type::{PartType, PartTypes};
//!
//! let part_types = PartTypes::new([
//!   PartType::trigger('@'),
//!   PartType::trigger('#').with_implicit(true),
//!   PartType::pattern(r"www\.[a-z]+\.[a-z]{2,}")?,
//! ])?;
//! ```
//!
//! # Error Handling
//!
//! Construction returns [`Result<T, RegistryError>`]:
//!
//! - **InvalidTrigger** - The trigger is whitespace or a token delimiter
//! - **DuplicateTrigger** - Two part types share a trigger
//! - **InvalidPattern** - The regular expression does not compile

use regex::Regex;
use serde::{
  Deserialize,
  Serialize,
};
use the_core::chars::char_is_boundary;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Characters that make up the encoded token grammar and so cannot be
/// triggers.
pub const TOKEN_DELIMITERS: [char; 4] = ['[', ']', '(', ')'];

pub const DEFAULT_ALLOWED_SPACES_COUNT: usize = 1;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
  #[error("invalid trigger {trigger:?}: triggers cannot be whitespace or token delimiters")]
  InvalidTrigger { trigger: char },
  #[error("trigger {trigger:?} is registered more than once")]
  DuplicateTrigger { trigger: char },
  #[error("invalid pattern {pattern:?}: {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source:  regex::Error,
  },
}

/// Index of a [`PartType`] inside its [`PartTypes`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PartTypeId(usize);

impl PartTypeId {
  pub const fn new(index: usize) -> Self {
    Self(index)
  }

  pub const fn index(self) -> usize {
    self.0
  }
}

/// Styling passed through to the rendering layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleHint {
  pub color:       Option<String>,
  pub font_weight: Option<String>,
}

impl StyleHint {
  /// Bold blue, the style mentions get when none is configured.
  pub fn mention_default() -> Self {
    Self {
      color:       Some("blue".to_string()),
      font_weight: Some("bold".to_string()),
    }
  }
}

/// Where the suggestion list for a part type is rendered relative to the
/// input. Not interpreted by this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
  #[default]
  Top,
  Bottom,
}

#[derive(Debug, Clone)]
pub enum Matcher {
  Trigger(char),
  Pattern(Regex),
}

#[derive(Debug, Clone)]
pub struct PartType {
  pub matcher:               Matcher,
  /// Spaces a keyword may contain before tracking is abandoned.
  pub allowed_spaces_count:  usize,
  pub insert_trailing_space: bool,
  /// Committed at a word boundary instead of through a suggestion list.
  pub implicit:              bool,
  pub style:                 Option<StyleHint>,
  pub placement:             Placement,
}

impl PartType {
  pub fn trigger(trigger: char) -> Self {
    Self {
      matcher:               Matcher::Trigger(trigger),
      allowed_spaces_count:  DEFAULT_ALLOWED_SPACES_COUNT,
      insert_trailing_space: true,
      implicit:              false,
      style:                 None,
      placement:             Placement::Top,
    }
  }

  pub fn pattern(pattern: &str) -> Result<Self> {
    let regex = Regex::new(pattern).map_err(|source| {
      RegistryError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
      }
    })?;
    Ok(Self::from_regex(regex))
  }

  pub fn from_regex(regex: Regex) -> Self {
    Self {
      matcher:               Matcher::Pattern(regex),
      allowed_spaces_count:  0,
      insert_trailing_space: false,
      implicit:              false,
      style:                 None,
      placement:             Placement::Top,
    }
  }

  #[must_use]
  pub fn with_allowed_spaces_count(mut self, count: usize) -> Self {
    self.allowed_spaces_count = count;
    self
  }

  #[must_use]
  pub fn with_trailing_space(mut self, insert: bool) -> Self {
    self.insert_trailing_space = insert;
    self
  }

  #[must_use]
  pub fn with_implicit(mut self, implicit: bool) -> Self {
    self.implicit = implicit;
    self
  }

  #[must_use]
  pub fn with_style(mut self, style: StyleHint) -> Self {
    self.style = Some(style);
    self
  }

  #[must_use]
  pub fn with_placement(mut self, placement: Placement) -> Self {
    self.placement = placement;
    self
  }

  pub fn trigger_char(&self) -> Option<char> {
    match self.matcher {
      Matcher::Trigger(trigger) => Some(trigger),
      Matcher::Pattern(_) => None,
    }
  }

  pub fn pattern_regex(&self) -> Option<&Regex> {
    match &self.matcher {
      Matcher::Trigger(_) => None,
      Matcher::Pattern(regex) => Some(regex),
    }
  }

  pub fn is_implicit_trigger(&self) -> bool {
    self.implicit && self.trigger_char().is_some()
  }

  /// Spaces tolerated inside an open keyword. Implicit tokens end at the
  /// first boundary character.
  pub fn space_budget(&self) -> usize {
    if self.implicit {
      0
    } else {
      self.allowed_spaces_count
    }
  }

  /// Style to render parts of this type with.
  pub fn effective_style(&self) -> StyleHint {
    match (&self.style, &self.matcher) {
      (Some(style), _) => style.clone(),
      (None, Matcher::Trigger(_)) => StyleHint::mention_default(),
      (None, Matcher::Pattern(_)) => StyleHint::default(),
    }
  }
}

/// Ordered collection of part types. Order breaks ties when two part types
/// match at the same position.
#[derive(Debug, Clone, Default)]
pub struct PartTypes {
  types:    Vec<PartType>,
  /// Compiled `<trigger>[name](id)` grammar, one per trigger part type.
  grammars: Vec<Option<Regex>>,
}

impl PartTypes {
  pub fn new<I>(part_types: I) -> Result<Self>
  where
    I: IntoIterator<Item = PartType>,
  {
    let types: Vec<PartType> = part_types.into_iter().collect();
    let mut grammars = Vec::with_capacity(types.len());

    for (index, part_type) in types.iter().enumerate() {
      let Some(trigger) = part_type.trigger_char() else {
        grammars.push(None);
        continue;
      };

      if char_is_boundary(trigger) || TOKEN_DELIMITERS.contains(&trigger) {
        return Err(RegistryError::InvalidTrigger { trigger });
      }
      if types[..index]
        .iter()
        .any(|other| other.trigger_char() == Some(trigger))
      {
        return Err(RegistryError::DuplicateTrigger { trigger });
      }

      grammars.push(Some(token_grammar(trigger)?));
    }

    tracing::debug!(count = types.len(), "built part type registry");
    Ok(Self { types, grammars })
  }

  pub fn len(&self) -> usize {
    self.types.len()
  }

  pub fn is_empty(&self) -> bool {
    self.types.is_empty()
  }

  pub fn get(&self, id: PartTypeId) -> Option<&PartType> {
    self.types.get(id.index())
  }

  pub fn iter(&self) -> impl Iterator<Item = (PartTypeId, &PartType)> {
    self
      .types
      .iter()
      .enumerate()
      .map(|(index, part_type)| (PartTypeId(index), part_type))
  }

  /// Trigger based part types with their trigger, in registry order.
  pub fn triggers(&self) -> impl Iterator<Item = (PartTypeId, &PartType, char)> {
    self
      .iter()
      .filter_map(|(id, part_type)| Some((id, part_type, part_type.trigger_char()?)))
  }

  pub fn by_trigger(&self, trigger: char) -> Option<PartTypeId> {
    self
      .triggers()
      .find(|(_, _, candidate)| *candidate == trigger)
      .map(|(id, ..)| id)
  }

  pub(crate) fn grammar(&self, id: PartTypeId) -> Option<&Regex> {
    self.grammars.get(id.index())?.as_ref()
  }
}

fn token_grammar(trigger: char) -> Result<Regex> {
  let mut buf = [0; 4];
  let pattern = format!(
    r"{}\[([^\[\]]*)\]\(([^()]*)\)",
    regex::escape(trigger.encode_utf8(&mut buf))
  );
  Regex::new(&pattern).map_err(|source| RegistryError::InvalidPattern { pattern, source })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_registry_order_and_lookup() {
    let part_types = PartTypes::new([
      PartType::trigger('@'),
      PartType::pattern(r"www\.\w+\.com").unwrap(),
      PartType::trigger('#').with_implicit(true),
    ])
    .unwrap();

    assert_eq!(part_types.len(), 3);
    assert_eq!(part_types.by_trigger('@'), Some(PartTypeId::new(0)));
    assert_eq!(part_types.by_trigger('#'), Some(PartTypeId::new(2)));
    assert_eq!(part_types.by_trigger('!'), None);

    let triggers: Vec<char> = part_types.triggers().map(|(.., ch)| ch).collect();
    assert_eq!(triggers, vec!['@', '#']);

    assert!(part_types.grammar(PartTypeId::new(0)).is_some());
    assert!(part_types.grammar(PartTypeId::new(1)).is_none());
    assert!(part_types.grammar(PartTypeId::new(7)).is_none());
  }

  #[test]
  fn test_registry_rejects_bad_triggers() {
    for trigger in [' ', '\n', '[', ')'] {
      let err = PartTypes::new([PartType::trigger(trigger)]).unwrap_err();
      assert!(matches!(err, RegistryError::InvalidTrigger { trigger: t } if t == trigger));
    }

    let err = PartTypes::new([PartType::trigger('@'), PartType::trigger('@')]).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateTrigger { trigger: '@' }));
  }

  #[test]
  fn test_invalid_pattern() {
    let err = PartType::pattern("(unclosed").unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPattern { .. }));
  }

  #[test]
  fn test_grammar_escapes_trigger() {
    // `.` and `$` are regex metacharacters
    let part_types = PartTypes::new([PartType::trigger('.'), PartType::trigger('$')]).unwrap();
    let dot = part_types.grammar(PartTypeId::new(0)).unwrap();
    assert!(dot.is_match(".[a](1)"));
    assert!(!dot.is_match("x[a](1)"));
    let dollar = part_types.grammar(PartTypeId::new(1)).unwrap();
    assert!(dollar.is_match("$[USD](usd)"));
  }

  #[test]
  fn test_space_budget_and_style() {
    let mention = PartType::trigger('@').with_allowed_spaces_count(2);
    assert_eq!(mention.space_budget(), 2);
    assert_eq!(mention.effective_style(), StyleHint::mention_default());

    let hashtag = PartType::trigger('#')
      .with_allowed_spaces_count(2)
      .with_implicit(true);
    assert_eq!(hashtag.space_budget(), 0);
    assert!(hashtag.is_implicit_trigger());

    let url = PartType::pattern("www").unwrap().with_implicit(true);
    assert!(!url.is_implicit_trigger());
    assert_eq!(url.effective_style(), StyleHint::default());
  }
}
