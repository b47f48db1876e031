//! Where lexicon and letter distribution files live.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the data directory.
pub const DATA_PATH_ENV: &str = "DATA_PATH";
/// Environment variable holding an optional sub-directory for word graphs.
pub const KWG_PATH_PREFIX_ENV: &str = "KWG_PATH_PREFIX";

/// Locations of the data files used by the loaders.
///
/// The data directory is laid out as:
///
/// ```text
/// <data_path>/lexica/gaddag[/<kwg_path_prefix>]/<LEXICON>.kwg
/// <data_path>/letterdistributions/<name>.csv
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the data directory.
    pub data_path: PathBuf,
    /// Optional sub-directory of `lexica/gaddag` holding the word graphs.
    pub kwg_path_prefix: Option<String>,
}

impl Config {
    /// Creates a configuration rooted at `data_path`.
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Config {
            data_path: data_path.into(),
            kwg_path_prefix: None,
        }
    }

    /// Reads the configuration from `DATA_PATH` and `KWG_PATH_PREFIX`.
    pub fn from_env() -> Self {
        Config {
            data_path: env::var_os(DATA_PATH_ENV).map(PathBuf::from).unwrap_or_default(),
            kwg_path_prefix: env::var(KWG_PATH_PREFIX_ENV).ok().filter(|p| !p.is_empty()),
        }
    }

    /// Sets the word graph sub-directory.
    pub fn with_kwg_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.kwg_path_prefix = Some(prefix.into());
        self
    }

    /// Returns the data directory, or an error if none is configured.
    pub fn data_path(&self) -> Result<&Path> {
        if self.data_path.as_os_str().is_empty() {
            Err(Error::MissingDataPath)
        } else {
            Ok(&self.data_path)
        }
    }

    /// Directory holding the word graph files.
    pub fn kwg_dir(&self) -> Result<PathBuf> {
        let mut dir = self.data_path()?.join("lexica").join("gaddag");
        if let Some(prefix) = &self.kwg_path_prefix {
            dir.push(prefix);
        }
        Ok(dir)
    }

    /// Directory holding the letter distribution tables.
    pub fn letter_distribution_dir(&self) -> Result<PathBuf> {
        Ok(self.data_path()?.join("letterdistributions"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_env()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_data_path_is_an_error() {
        let cfg = Config::new("");
        assert!(matches!(cfg.kwg_dir(), Err(Error::MissingDataPath)));
        assert!(matches!(cfg.letter_distribution_dir(), Err(Error::MissingDataPath)));
    }

    #[test]
    fn kwg_dir_with_and_without_prefix() {
        let cfg = Config::new("/data");
        assert_eq!(cfg.kwg_dir().unwrap(), Path::new("/data/lexica/gaddag"));
        let cfg = cfg.with_kwg_path_prefix("v2");
        assert_eq!(cfg.kwg_dir().unwrap(), Path::new("/data/lexica/gaddag/v2"));
        assert_eq!(
            cfg.letter_distribution_dir().unwrap(),
            Path::new("/data/letterdistributions")
        );
    }
}
