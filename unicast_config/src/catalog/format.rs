//! Format selection and parsing for catalog documents.

use std::path::Path;

#[cfg(feature = "toml")]
use figment::providers::Toml;
use figment::{
    Figment,
    providers::{Format, Json},
};

use crate::{UnicastError, UnicastResult};

#[cfg(feature = "yaml")]
use super::yaml::YamlCatalog;

/// Serialisation format of a catalog document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogFormat {
    /// TOML, the default for unrecognised extensions.
    Toml,
    /// JSON.
    Json,
    /// YAML; requires the `yaml` feature.
    Yaml,
}

impl CatalogFormat {
    /// Pick a format from the extension of `path`.
    ///
    /// `.json` selects JSON, `.yaml`/`.yml` select YAML and anything else,
    /// including no extension, selects TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

#[cfg(any(not(feature = "yaml"), not(feature = "toml")))]
fn feature_disabled(origin: &Path, feature: &str) -> std::sync::Arc<UnicastError> {
    UnicastError::file(
        origin,
        std::io::Error::other(format!(
            "{feature} feature disabled: enable the '{feature}' feature to read this catalog"
        )),
    )
}

/// Build a figment over `data` in `format`, attributing errors to `origin`.
///
/// TOML is validated eagerly so syntax errors carry the catalog path rather
/// than surfacing later as an extraction failure.
pub(super) fn parse_catalog(
    origin: &Path,
    data: &str,
    format: CatalogFormat,
) -> UnicastResult<Figment> {
    let figment = match format {
        CatalogFormat::Json => Figment::from(Json::string(data)),
        CatalogFormat::Yaml => {
            #[cfg(feature = "yaml")]
            {
                Figment::from(YamlCatalog::new(origin.display().to_string(), data))
            }
            #[cfg(not(feature = "yaml"))]
            {
                return Err(feature_disabled(origin, "yaml"));
            }
        }
        CatalogFormat::Toml => {
            #[cfg(feature = "toml")]
            {
                toml::from_str::<toml::Table>(data).map_err(|e| UnicastError::file(origin, e))?;
                Figment::from(Toml::string(data))
            }
            #[cfg(not(feature = "toml"))]
            {
                return Err(feature_disabled(origin, "toml"));
            }
        }
    };
    Ok(figment)
}
