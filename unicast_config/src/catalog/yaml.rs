//! YAML catalog support backed by `serde-saphyr`.

use figment::{
    Metadata, Profile, Provider,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

/// Figment provider that parses an in-memory YAML catalog.
#[derive(Debug, Clone)]
pub(super) struct YamlCatalog {
    origin: String,
    contents: String,
}

impl YamlCatalog {
    /// Wrap `contents`, naming `origin` in diagnostics.
    pub(super) fn new(origin: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            contents: contents.into(),
        }
    }

    /// `yes`/`no` stay strings: only `true` and `false` are booleans.
    fn parse_value(&self) -> Result<FigmentValue, serde_saphyr::Error> {
        serde_saphyr::from_str_with_options(
            &self.contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
    }
}

impl Provider for YamlCatalog {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("YAML catalog {}", self.origin))
    }

    fn data(&self) -> Result<std::collections::BTreeMap<Profile, Dict>, figment::Error> {
        let value = self.parse_value().map_err(|err| {
            figment::Error::from(Kind::Message(format!(
                "failed to parse {}: {err}",
                self.origin
            )))
        })?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}
