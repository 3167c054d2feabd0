use masker_core::generator::{DEFAULT_GENERIC_MAX_LEN, DEFAULT_GENERIC_MIN_LEN};
use masker_core::{FieldCategory, GeneratorContext, Locale};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration for masker (config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub consistent: bool,

    #[serde(default)]
    pub generic: GenericConfig,

    /// Field name -> category, for columns whose names don't say what they hold
    #[serde(default)]
    pub categories: BTreeMap<String, FieldCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericConfig {
    #[serde(default = "default_min_len")]
    pub min_len: usize,

    #[serde(default = "default_max_len")]
    pub max_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            consistent: false,
            generic: GenericConfig::default(),
            categories: BTreeMap::new(),
        }
    }
}

impl Default for GenericConfig {
    fn default() -> Self {
        Self {
            min_len: default_min_len(),
            max_len: default_max_len(),
        }
    }
}

fn default_locale() -> String {
    Locale::default().code().to_string()
}

fn default_min_len() -> usize {
    DEFAULT_GENERIC_MIN_LEN
}

fn default_max_len() -> usize {
    DEFAULT_GENERIC_MAX_LEN
}

impl Config {
    /// Load config from `path`, or from the default location if it exists.
    ///
    /// An explicit path must exist. The default file is optional and never
    /// created implicitly.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::load_from(&default_path)?
                } else {
                    Config::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e)
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e)
        })?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "masker", "masker") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.masker/config.toml")
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.locale.parse::<Locale>()?;
        if self.generic.min_len == 0 || self.generic.min_len > self.generic.max_len {
            anyhow::bail!(
                "generic.min_len must be between 1 and generic.max_len (got {}..={})",
                self.generic.min_len,
                self.generic.max_len
            );
        }
        Ok(())
    }

    /// Category configured for a field name
    pub fn category_for(&self, field: &str) -> Option<FieldCategory> {
        self.categories.get(field).copied()
    }

    /// Build the generator context, letting command-line values win
    pub fn generator_context(
        &self,
        locale: Option<&str>,
        seed: Option<u64>,
        consistent: bool,
    ) -> masker_core::Result<GeneratorContext> {
        let locale: Locale = locale.unwrap_or(&self.locale).parse()?;

        GeneratorContext::new(locale)
            .with_seed(seed)
            .with_consistent(consistent || self.consistent)
            .with_generic_len(self.generic.min_len, self.generic.max_len)
    }
}
