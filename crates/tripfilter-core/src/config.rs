use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Slider bounds for one catalog's price range field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSettings {
    pub floor: f64,
    pub ceiling: f64,
    pub step: f64,
}

impl RangeSettings {
    pub const fn new(floor: f64, ceiling: f64, step: f64) -> Self {
        Self { floor, ceiling, step }
    }
}

impl Default for RangeSettings {
    fn default() -> Self {
        Self::new(0.0, 1000.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    pub dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingSettings {
    pub max_stars: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data: DataSettings,
    #[serde(default)]
    pub ranges: BTreeMap<String, RangeSettings>,
    pub ratings: RatingSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DataSettings { dir: "./data".to_string() },
            ranges: BTreeMap::new(),
            ratings: RatingSettings { max_stars: 5 },
            logging: LoggingSettings { filter: "info".to_string() },
        }
    }
}

pub struct Config {
    figment: Figment,
    base: PathBuf,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Merge built-in defaults, `config.toml`, `config.<env>.toml` and `APP_*`
    /// variables (nested keys split on `__`), resolving files against `base`.
    pub fn load_from(base: &Path) -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(base.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(base.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(base.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(base.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base: base.to_path_buf() };
        config.validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to extract settings: {}", e))
    }

    /// Slider bounds for `catalog`, or `fallback` when none are configured.
    pub fn range_for(&self, catalog: &str, fallback: RangeSettings) -> RangeSettings {
        let key = format!("ranges.{}", catalog);
        match self.get(&key) {
            Ok(range) => range,
            Err(e) => {
                let configured: Vec<String> =
                    self.settings().map(|s| s.ranges.into_keys().collect()).unwrap_or_default();
                tracing::debug!(key = %key, ?configured, error = %e, "no configured range, using catalog default");
                fallback
            }
        }
    }

    /// `[ranges.*]` sections that name none of `known`, usually a typo.
    pub fn unknown_ranges(&self, known: &[&str]) -> Vec<String> {
        self.settings()
            .map(|s| s.ranges.into_keys().filter(|k| !known.contains(&k.as_str())).collect())
            .unwrap_or_default()
    }

    pub fn max_stars(&self) -> u8 {
        self.get("ratings.max_stars").unwrap_or(5)
    }

    pub fn data_dir(&self) -> PathBuf {
        let dir: String = self.get("data.dir").unwrap_or_else(|_| "./data".to_string());
        resolve_with_base(&self.base, dir)
    }

    pub fn log_filter(&self) -> String {
        self.get("logging.filter").unwrap_or_else(|_| "info".to_string())
    }

    fn validate(&self) -> anyhow::Result<()> {
        let settings = self.settings()?;
        for (catalog, range) in &settings.ranges {
            if !(range.floor <= range.ceiling) {
                return Err(Error::InvalidConfig(format!(
                    "ranges.{}: floor {} is above ceiling {}",
                    catalog, range.floor, range.ceiling
                ))
                .into());
            }
            if !(range.step > 0.0) {
                return Err(Error::InvalidConfig(format!("ranges.{}: step must be positive", catalog)).into());
            }
        }
        if settings.ratings.max_stars == 0 {
            return Err(Error::InvalidConfig("ratings.max_stars must be at least 1".to_string()).into());
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
