//! TOML file configuration layer.

use std::path::{Path, PathBuf};

use super::source::{ConfigLayer, LayerEntry};
use super::ConfigError;

/// A configuration layer loaded from a TOML file.
///
/// Required files that don't exist cause an error; optional files that
/// don't exist contribute nothing.
#[derive(Debug, Clone)]
pub struct FileLayer {
    path: PathBuf,
    required: bool,
}

impl FileLayer {
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl ConfigLayer for FileLayer {
    fn entries(&self) -> Result<Vec<LayerEntry>, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if self.required {
                    return Err(ConfigError::FileNotFound(self.path.clone()));
                }
                tracing::debug!(path = %self.path.display(), "optional config file missing, skipping");
                return Ok(vec![]);
            }
            Err(e) => {
                return Err(ConfigError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let table = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %self.path.display(), "loaded config file");
        Ok(vec![LayerEntry::root(table)])
    }
}
