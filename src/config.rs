//! Codec and command-line configuration.

use std::env;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "BYTE_HUFFMAN_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Extension appended to the input path when compressing without an explicit output.
    #[serde(default = "default_compressed_extension")]
    pub compressed_extension: String,

    /// File name prefix for decompressed output written next to the artifact.
    #[serde(default = "default_decompressed_prefix")]
    pub decompressed_prefix: String,

    /// Decode every artifact right after writing it and fail on mismatch.
    #[serde(default)]
    pub verify: bool,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Also append log lines to this file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            compressed_extension: default_compressed_extension(),
            decompressed_prefix: default_decompressed_prefix(),
            verify: false,
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<()> {
        if self.compressed_extension.is_empty() {
            return Err(HuffmanError::config("compressed_extension must not be empty"));
        }
        if self.compressed_extension.contains(['/', '\\']) {
            return Err(HuffmanError::config(format!(
                "compressed_extension {:?} must not contain path separators",
                self.compressed_extension
            )));
        }
        if self.decompressed_prefix.contains(['/', '\\']) {
            return Err(HuffmanError::config(format!(
                "decompressed_prefix {:?} must not contain path separators",
                self.decompressed_prefix
            )));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(HuffmanError::config(format!(
                "log_level {:?} must be one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        if let Some(path) = &self.log_file {
            if path.file_name().is_none() {
                return Err(HuffmanError::config(format!(
                    "log_file {} does not name a file",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// Defaults overridden by `BYTE_HUFFMAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    pub fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides(prefix);
        config.validate()?;
        Ok(config)
    }

    /// Overwrite fields from `<prefix>*` variables. Values are not validated here.
    pub fn apply_env_overrides(&mut self, prefix: &str) {
        if let Ok(ext) = env::var(format!("{}COMPRESSED_EXTENSION", prefix)) {
            self.compressed_extension = ext;
        }
        if let Ok(decompressed) = env::var(format!("{}DECOMPRESSED_PREFIX", prefix)) {
            self.decompressed_prefix = decompressed;
        }
        self.verify = parse_env_bool(&format!("{}VERIFY", prefix), self.verify);
        if let Ok(level) = env::var(format!("{}LOG_LEVEL", prefix)) {
            self.log_level = level;
        }
        if let Ok(file) = env::var(format!("{}LOG_FILE", prefix)) {
            self.log_file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
    }

    /// Layer the optional config file, the `BYTE_HUFFMAN_*` environment and
    /// then `cli`, validating only the final result.
    pub fn resolve<F>(file: Option<&Path>, cli: F) -> Result<Self>
    where
        F: FnOnce(&mut Self),
    {
        Self::resolve_with_prefix(ENV_PREFIX, file, cli)
    }

    pub fn resolve_with_prefix<F>(prefix: &str, file: Option<&Path>, cli: F) -> Result<Self>
    where
        F: FnOnce(&mut Self),
    {
        let mut config = match file {
            Some(path) => Self::read_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(prefix);
        cli(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file without validating it.
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            HuffmanError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            HuffmanError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Open `log_file` for appending, creating missing parent directories.
    pub fn open_log_file(&self) -> Result<Option<File>> {
        let Some(path) = &self.log_file else {
            return Ok(None);
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Some(file))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| HuffmanError::config(format!("failed to serialize config: {}", e)))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// `<input>.<ext>`, keeping the original extension inside the name.
    pub fn compressed_path(&self, input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_owned();
        name.push(".");
        name.push(&self.compressed_extension);
        PathBuf::from(name)
    }

    /// `<artifact dir>/<prefix><source file name>`, so the source's extension is restored.
    pub fn decompressed_path(&self, artifact: &Path, source: &Path) -> PathBuf {
        let mut name = std::ffi::OsString::from(&self.decompressed_prefix);
        if let Some(file_name) = source.file_name() {
            name.push(file_name);
        }
        artifact.with_file_name(name)
    }
}

fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "1" | "yes" | "on"))
        .unwrap_or(default)
}

fn default_compressed_extension() -> String {
    "bin".to_string()
}

fn default_decompressed_prefix() -> String {
    "decompressed_".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
