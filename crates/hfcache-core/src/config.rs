use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::probe::looks_like_cache_root;
use crate::{Error, Result};

/// Overrides the directory holding `config.json`.
pub const CONFIG_DIR_ENV: &str = "HFCACHE_CONFIG_DIR";

const APP_DIR: &str = "hfcache";
const CONFIG_FILE: &str = "config.json";

/// The persisted preferences document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub custom_directories: Vec<String>,
    #[serde(default = "default_include_default_cache")]
    pub include_default_cache: bool,
    #[serde(default = "Utc::now", deserialize_with = "timestamp::deserialize")]
    pub last_updated: DateTime<Utc>,
}

const fn default_include_default_cache() -> bool {
    true
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            custom_directories: Vec::new(),
            include_default_cache: default_include_default_cache(),
            last_updated: Utc::now(),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    /// Accepts RFC 3339 or a naive ISO-8601 stamp (read as UTC). Anything
    /// else becomes "now" instead of failing the whole document.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = serde_json::Value::deserialize(d)?;
        Ok(raw.as_str().and_then(parse).unwrap_or_else(Utc::now))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|t| t.and_utc())
            })
    }
}

/// A configured custom directory and whether it is currently on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryStatus {
    pub path: String,
    pub exists: bool,
}

/// The two well-known hub cache locations under the home directory.
pub fn default_cache_roots() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| {
            let base = home.join(".cache").join("huggingface");
            vec![base.join("hub"), base.join("datasets")]
        })
        .unwrap_or_default()
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    let rest = match input.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') || rest.starts_with(std::path::MAIN_SEPARATOR) => {
            &rest[1..]
        }
        _ => return PathBuf::from(input),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(input),
    }
}

/// Owns the configuration document and an in-memory copy of it.
///
/// The copy is filled on first [`load`](Self::load) and replaced only by
/// [`save`](Self::save) on the same instance. Edits made to the file by
/// anything else are not noticed.
#[derive(Debug)]
pub struct ConfigStore {
    config_file: PathBuf,
    default_roots: Vec<PathBuf>,
    cache: Option<Configuration>,
}

impl ConfigStore {
    /// Open the store at `$HFCACHE_CONFIG_DIR`, or `<config dir>/hfcache`.
    pub fn open() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir().ok_or(Error::NoConfigDir)?.join(APP_DIR),
        };
        Self::open_in(dir)
    }

    /// Open the store in `dir`, creating the directory if needed.
    pub fn open_in(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            tracing::error!("Failed to create config directory {}: {e}", dir.display());
            Error::io(&dir, e)
        })?;
        tracing::debug!("Configuration directory ensured at: {}", dir.display());

        Ok(Self {
            config_file: dir.join(CONFIG_FILE),
            default_roots: default_cache_roots(),
            cache: None,
        })
    }

    #[must_use]
    pub fn with_default_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.default_roots = roots;
        self
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn default_roots(&self) -> &[PathBuf] {
        &self.default_roots
    }

    /// Current configuration. Never fails: a missing, unreadable or
    /// corrupt document yields the defaults, which are not written back.
    pub fn load(&mut self) -> &Configuration {
        let file = &self.config_file;
        self.cache.get_or_insert_with(|| read_document(file))
    }

    /// Stamp `last_updated` and overwrite the document.
    pub fn save(&mut self, mut config: Configuration) -> Result<()> {
        config.last_updated = Utc::now();
        let content = serde_json::to_string_pretty(&config)?;
        fs::write(&self.config_file, content).map_err(|e| {
            tracing::error!("Failed to save config: {e}");
            Error::io(&self.config_file, e)
        })?;
        tracing::info!("Saved configuration to {}", self.config_file.display());
        self.cache = Some(config);
        Ok(())
    }

    /// Register a custom root. Returns `false` if it was already present.
    pub fn add_directory(&mut self, path: &Path) -> Result<bool> {
        let resolved = fs::canonicalize(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::InvalidDirectory {
                path: path.to_path_buf(),
                reason: "directory does not exist",
            },
            io::ErrorKind::NotADirectory => Error::InvalidDirectory {
                path: path.to_path_buf(),
                reason: "path is not a directory",
            },
            _ => Error::io(path, e),
        })?;
        if !resolved.is_dir() {
            return Err(Error::InvalidDirectory {
                path: path.to_path_buf(),
                reason: "path is not a directory",
            });
        }
        let entry = resolved
            .into_os_string()
            .into_string()
            .map_err(|_| Error::InvalidDirectory {
                path: path.to_path_buf(),
                reason: "path is not valid UTF-8",
            })?;

        let mut config = self.load().clone();
        if config.custom_directories.contains(&entry) {
            tracing::info!("Directory already in config: {entry}");
            return Ok(false);
        }

        config.custom_directories.push(entry.clone());
        self.save(config)?;
        tracing::info!("Added directory to config: {entry}");
        Ok(true)
    }

    /// Unregister a custom root, matching its canonical form first and the
    /// string exactly as given second. Returns `false` if neither matched.
    pub fn remove_directory(&mut self, path: &str) -> Result<bool> {
        let mut config = self.load().clone();
        let stored = &config.custom_directories;

        let position = canonical_form(Path::new(path))
            .and_then(|canonical| stored.iter().position(|d| *d == canonical))
            .or_else(|| stored.iter().position(|d| d == path));

        let Some(index) = position else {
            tracing::info!("Directory not in config: {path}");
            return Ok(false);
        };

        config.custom_directories.remove(index);
        self.save(config)?;
        tracing::info!("Removed directory from config: {path}");
        Ok(true)
    }

    /// Every root a full scan should visit: default roots first (when
    /// enabled), then custom roots in stored order. Only roots that exist
    /// right now are returned.
    pub fn get_all_directories(&mut self) -> Vec<PathBuf> {
        let Configuration {
            custom_directories,
            include_default_cache,
            ..
        } = self.load().clone();

        let mut roots = Vec::new();
        if include_default_cache {
            roots.extend(self.default_roots.iter().filter(|r| r.exists()).cloned());
        }

        for dir in custom_directories {
            let path = PathBuf::from(&dir);
            if path.exists() {
                roots.push(path);
            } else {
                tracing::warn!("Configured directory no longer exists: {dir}");
            }
        }

        roots
    }

    pub fn directory_status(&mut self) -> Vec<DirectoryStatus> {
        self.load()
            .custom_directories
            .iter()
            .map(|dir| DirectoryStatus {
                path: dir.clone(),
                exists: Path::new(dir).exists(),
            })
            .collect()
    }

    /// Flip whether the default roots are scanned; returns the new value.
    pub fn toggle_default_cache(&mut self) -> Result<bool> {
        let mut config = self.load().clone();
        config.include_default_cache = !config.include_default_cache;
        let enabled = config.include_default_cache;
        self.save(config)?;
        tracing::info!("Toggled default cache inclusion to: {enabled}");
        Ok(enabled)
    }

    pub fn validate_directory(&self, path: &Path) -> bool {
        looks_like_cache_root(path)
    }
}

fn read_document(file: &Path) -> Configuration {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("No config file found, using defaults");
            return Configuration::default();
        }
        Err(e) => {
            tracing::error!("Failed to read config file {}: {e}", file.display());
            return Configuration::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => {
            tracing::info!("Loaded configuration from {}", file.display());
            config
        }
        Err(e) => {
            tracing::error!("Config file corrupted, using default configuration: {e}");
            Configuration::default()
        }
    }
}

/// Canonical form when the path exists, otherwise just made absolute.
fn canonical_form(path: &Path) -> Option<String> {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .ok()
        .and_then(|p| p.into_os_string().into_string().ok())
}
