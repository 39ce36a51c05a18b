use std::collections::BTreeMap;
use std::path::Path;

use dark_recolor::Scheme;
use serde::Deserialize;

use super::options::ConversionMode;
use crate::error::ConfigError;

/// Application configuration loaded from an optional YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Conversion mode used when `--mode` is not given
    #[serde(default)]
    pub mode: Option<ConversionMode>,

    /// Rendering resolution for raster mode
    #[serde(default = "default_dpi")]
    pub dpi: u32,

    /// Leave embedded images untouched in direct mode
    #[serde(default = "default_preserve_images")]
    pub preserve_images: bool,

    /// Scheme used when `--scheme` is not given (preset or a key of `schemes`)
    #[serde(default)]
    pub scheme: Option<String>,

    /// User-defined schemes
    #[serde(default)]
    pub schemes: BTreeMap<String, SchemeConfig>,
}

fn default_dpi() -> u32 {
    150
}

fn default_preserve_images() -> bool {
    true
}

/// A background/text pair defined in the config file
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SchemeConfig {
    pub background: String,
    pub text: String,
}

impl AppConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file that must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            schemes = config.schemes.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve a scheme name, looking at config schemes before presets
    pub fn lookup_scheme(&self, name: &str) -> Result<Scheme, ConfigError> {
        if let Some(custom) = self.schemes.get(name) {
            return custom.to_scheme(name);
        }
        Ok(Scheme::preset(name)?)
    }

    /// Pick the scheme from explicit colors, an explicit name, or the config.
    ///
    /// Returns `None` when nothing selects a scheme, leaving the choice to
    /// the caller (interactive prompt or the default scheme).
    pub fn select_scheme(
        &self,
        name: Option<&str>,
        background: Option<&str>,
        text: Option<&str>,
    ) -> Result<Option<Scheme>, ConfigError> {
        if background.is_some() || text.is_some() {
            let fallback = Scheme::default();
            let background = background.map_or_else(|| fallback.background().hex(), str::to_string);
            let text = text.map_or_else(|| fallback.text().hex(), str::to_string);
            return Ok(Some(Scheme::custom(&background, &text)?));
        }

        match name.or(self.scheme.as_deref()) {
            Some(name) => self.lookup_scheme(name).map(Some),
            None => Ok(None),
        }
    }

    /// Names of the config-defined schemes, sorted
    pub fn scheme_names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    /// Config schemes and presets, sorted by name; config entries shadow
    /// presets of the same name.
    pub fn available_schemes(&self) -> Vec<Scheme> {
        let mut names: Vec<&str> = self.scheme_names().collect();
        for name in Scheme::preset_names() {
            names.push(name);
        }
        names.sort_unstable();
        names.dedup();
        names
            .into_iter()
            .filter_map(|name| self.lookup_scheme(name).ok())
            .collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, scheme) in &self.schemes {
            scheme.to_scheme(name)?;
        }
        Ok(())
    }
}

impl SchemeConfig {
    fn to_scheme(&self, name: &str) -> Result<Scheme, ConfigError> {
        let custom = Scheme::custom(&self.background, &self.text).map_err(|source| {
            ConfigError::InvalidScheme {
                name: name.to_string(),
                source,
            }
        })?;
        Ok(Scheme::new(
            name.to_string(),
            custom.background(),
            custom.text(),
        ))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: None,
            dpi: default_dpi(),
            preserve_images: default_preserve_images(),
            scheme: None,
            schemes: BTreeMap::new(),
        }
    }
}
