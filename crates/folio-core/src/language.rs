//! Language codes for the localized document variant.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A lowercase language code such as `en`, `nl` or `pt-br`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
  pub fn parse(code: &str) -> Result<Self> {
    let code = code.trim().to_ascii_lowercase();
    let valid = (2..=8).contains(&code.len())
      && code.chars().all(|c| c.is_ascii_lowercase() || c == '-')
      && !code.starts_with('-')
      && !code.ends_with('-');
    if valid {
      Ok(Self(code))
    } else {
      Err(Error::InvalidLanguage(code))
    }
  }

  pub fn english() -> Self { Self("en".to_owned()) }

  pub fn dutch() -> Self { Self("nl".to_owned()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl FromStr for Language {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Language {
  type Error = Error;

  fn try_from(value: String) -> Result<Self> { Self::parse(&value) }
}

impl From<Language> for String {
  fn from(value: Language) -> Self { value.0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalises_case_and_whitespace() {
    assert_eq!(Language::parse(" NL ").unwrap().as_str(), "nl");
    assert_eq!(Language::parse("pt-BR").unwrap().as_str(), "pt-br");
  }

  #[test]
  fn rejects_malformed_codes() {
    for bad in ["", "e", "english-uk", "-en", "en-", "e1"] {
      assert!(Language::parse(bad).is_err(), "{bad:?} should be rejected");
    }
  }

  #[test]
  fn deserialises_through_validation() {
    let lang: Language = serde_json::from_str("\"EN\"").unwrap();
    assert_eq!(lang, Language::english());
    assert!(serde_json::from_str::<Language>("\"x\"").is_err());
  }
}
