//! Runtime configuration, deserialised from `config.toml` and `FOLIO__*`
//! environment variables.

use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use folio_api::InquirySettings;
use folio_core::{
  defaults::{DEFAULT_STORAGE_KEY, builtin_documents},
  document::SiteDocument,
  editor::DEFAULT_PASSPHRASE,
  language::Language,
  loader::{RemoteFolder, default_folders},
};
use folio_remote::{RepoConfig, relay::DEFAULT_RELAY_ENDPOINT};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_path:       PathBuf,
  pub storage_key:      String,
  pub admin_passphrase: String,
  pub default_language: String,
  pub languages:        Vec<String>,
  pub github:           RepoConfig,
  pub folders:          Vec<RemoteFolder>,
  pub relay:            RelayConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             "127.0.0.1".to_owned(),
      port:             8080,
      store_path:       PathBuf::from("folio.db"),
      storage_key:      DEFAULT_STORAGE_KEY.to_owned(),
      admin_passphrase: DEFAULT_PASSPHRASE.to_owned(),
      default_language: "en".to_owned(),
      languages:        vec!["en".to_owned(), "nl".to_owned()],
      github:           RepoConfig::default(),
      folders:          default_folders(),
      relay:            RelayConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
  pub endpoint:         String,
  pub template:         String,
  pub fallback_subject: String,
  pub greeting:         String,
}

impl Default for RelayConfig {
  fn default() -> Self {
    let inquiry = InquirySettings::default();
    Self {
      endpoint:         DEFAULT_RELAY_ENDPOINT.to_owned(),
      template:         inquiry.template,
      fallback_subject: inquiry.fallback_subject,
      greeting:         inquiry.greeting,
    }
  }
}

impl RelayConfig {
  pub fn inquiry_settings(&self) -> InquirySettings {
    InquirySettings {
      fallback_subject: self.fallback_subject.clone(),
      template:         self.template.clone(),
      greeting:         self.greeting.clone(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file under the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("FOLIO").separator("__"))
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  /// The primary language and the built-in default document for every
  /// configured language.
  pub fn content_defaults(&self) -> anyhow::Result<(Language, BTreeMap<Language, SiteDocument>)> {
    let primary = Language::parse(&self.default_language)
      .with_context(|| format!("default_language {:?}", self.default_language))?;

    let mut builtin = builtin_documents();
    let mut defaults = BTreeMap::new();
    for code in &self.languages {
      let language =
        Language::parse(code).with_context(|| format!("languages entry {code:?}"))?;
      let Some(document) = builtin.remove(&language) else {
        bail!("no built-in content for language {language}");
      };
      defaults.insert(language, document);
    }

    if !defaults.contains_key(&primary) {
      bail!("default_language {primary} is not listed in languages");
    }
    Ok((primary, defaults))
  }
}
