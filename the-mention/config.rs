//! Part type registries described in TOML.
//!
//! ```toml
//! [[part-types]]
//! trigger = "@"
//! allowed-spaces-count = 1
//!
//! [[part-types]]
//! pattern = 'www\.[a-z]+\.[a-z]{2,}'
//! render-at-bottom = true
//! style = { color = "blue" }
//! ```
//!
//! Keys are kebab-case and unknown keys are rejected. Omitted settings take
//! the defaults of [`PartType::trigger`] and [`PartType::pattern`].

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

use crate::part_type::{
  PartType,
  PartTypes,
  Placement,
  RegistryError,
  StyleHint,
};

/// Registry used when none is configured.
pub const DEFAULT_PART_TYPES: &str = include_str!("default_part_types.toml");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
  #[error("failed to parse part types: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("part type {index} needs a `trigger` or a `pattern`")]
  MissingMatcher { index: usize },
  #[error("part type {index} sets both `trigger` and `pattern`")]
  ConflictingMatcher { index: usize },
  #[error(transparent)]
  Registry(#[from] RegistryError),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistryConfig {
  #[serde(default)]
  pub part_types: Vec<PartTypeConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartTypeConfig {
  pub trigger:               Option<char>,
  pub pattern:               Option<String>,
  pub allowed_spaces_count:  Option<usize>,
  pub insert_trailing_space: Option<bool>,
  #[serde(default)]
  pub implicit:              bool,
  #[serde(default)]
  pub render_at_bottom:      bool,
  pub style:                 Option<StyleHint>,
}

impl PartTypeConfig {
  fn build(&self, index: usize) -> Result<PartType> {
    let mut part_type = match (self.trigger, &self.pattern) {
      (Some(trigger), None) => PartType::trigger(trigger),
      (None, Some(pattern)) => PartType::pattern(pattern)?,
      (None, None) => return Err(ConfigError::MissingMatcher { index }),
      (Some(_), Some(_)) => return Err(ConfigError::ConflictingMatcher { index }),
    };

    if let Some(count) = self.allowed_spaces_count {
      part_type = part_type.with_allowed_spaces_count(count);
    }
    if let Some(insert) = self.insert_trailing_space {
      part_type = part_type.with_trailing_space(insert);
    }
    if let Some(style) = &self.style {
      part_type = part_type.with_style(style.clone());
    }
    let placement = if self.render_at_bottom {
      Placement::Bottom
    } else {
      Placement::Top
    };
    Ok(part_type.with_implicit(self.implicit).with_placement(placement))
  }
}

impl RegistryConfig {
  pub fn build(&self) -> Result<PartTypes> {
    let part_types = self
      .part_types
      .iter()
      .enumerate()
      .map(|(index, config)| config.build(index))
      .collect::<Result<Vec<_>>>()?;
    Ok(PartTypes::new(part_types)?)
  }
}

pub fn part_types_from_toml(source: &str) -> Result<PartTypes> {
  let config: RegistryConfig = toml::from_str(source)?;
  config.build()
}

/// The built-in registry: `@` mentions, implicit `#` hashtags and URLs.
pub fn default_part_types() -> Result<PartTypes> {
  part_types_from_toml(DEFAULT_PART_TYPES)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    parse::parse_value,
    part::PartKind,
    part_type::PartTypeId,
  };

  #[test]
  fn test_default_part_types() {
    let part_types = default_part_types().unwrap();
    assert_eq!(part_types.len(), 3);
    assert_eq!(part_types.by_trigger('@'), Some(PartTypeId::new(0)));

    let hashtag = part_types.get(PartTypeId::new(1)).unwrap();
    assert!(hashtag.is_implicit_trigger());
    assert_eq!(hashtag.effective_style().color.as_deref(), Some("blue"));

    let parsed = parse_value(
      "ping @[David](1) about #[rust](rust) at https://www.Example.com/a?b=1.",
      &part_types,
    );
    assert_eq!(
      parsed.display_text,
      "ping @David about #rust at https://www.Example.com/a?b=1."
    );
    let url = parsed.parts.iter().find(|part| matches!(part.kind, PartKind::Pattern { .. }));
    assert_eq!(url.map(|part| part.text.as_str()), Some("https://www.Example.com/a?b=1"));
  }

  #[test]
  fn test_custom_registry() {
    let part_types = part_types_from_toml(
      r#"
        [[part-types]]
        trigger = "$"
        allowed-spaces-count = 0
        insert-trailing-space = false
        render-at-bottom = true
        style = { color = "green", font-weight = "bold" }
      "#,
    )
    .unwrap();
    let cash = part_types.get(PartTypeId::new(0)).unwrap();
    assert_eq!(cash.trigger_char(), Some('$'));
    assert_eq!(cash.space_budget(), 0);
    assert!(!cash.insert_trailing_space);
    assert_eq!(cash.placement, Placement::Bottom);
    assert_eq!(cash.effective_style().font_weight.as_deref(), Some("bold"));

    assert!(part_types_from_toml("").unwrap().is_empty());
  }

  #[test]
  fn test_matcher_errors() {
    let err = part_types_from_toml("[[part-types]]\nimplicit = true").unwrap_err();
    assert!(matches!(err, ConfigError::MissingMatcher { index: 0 }));

    let err = part_types_from_toml(
      "[[part-types]]\ntrigger = \"@\"\n[[part-types]]\ntrigger = \"#\"\npattern = \"x\"",
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::ConflictingMatcher { index: 1 }));
  }

  #[test]
  fn test_invalid_values_are_rejected() {
    let err = part_types_from_toml("[[part-types]]\ntrigger = \"@@\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));

    let err = part_types_from_toml("[[part-types]]\ntrigger = \"@\"\ncolour = 1").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));

    let err = part_types_from_toml("[[part-types]]\npattern = \"(\"").unwrap_err();
    assert!(matches!(
      err,
      ConfigError::Registry(RegistryError::InvalidPattern { .. })
    ));

    let err = part_types_from_toml("[[part-types]]\ntrigger = \"@\"\n[[part-types]]\ntrigger = \"@\"")
      .unwrap_err();
    assert!(matches!(
      err,
      ConfigError::Registry(RegistryError::DuplicateTrigger { trigger: '@' })
    ));
  }
}
