//! daygrid configuration at ~/.config/daygrid/config.toml

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DayGridError, DayGridResult};
use crate::event::DEFAULT_COLOR;

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

const fn default_preview_limit() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayGridConfig {
    /// Where persisted events live. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Color given to new events when none is chosen.
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Events listed per day in the month view before "+N more".
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for DayGridConfig {
    fn default() -> Self {
        DayGridConfig {
            data_dir: None,
            default_color: default_color(),
            preview_limit: default_preview_limit(),
        }
    }
}

impl DayGridConfig {
    pub fn config_path() -> DayGridResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DayGridError::Config("Could not determine config directory".into()))?
            .join("daygrid");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config at `path`, or at the default location when `None`.
    /// A missing default config file is created with every option commented out.
    pub fn load(path: Option<&Path>) -> DayGridResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path()?;
                if !path.exists() {
                    Self::create_default_config(&path)?;
                }
                path
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            DayGridError::Config(format!("Could not read {}: {e}", path.display()))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> DayGridResult<Self> {
        let config: DayGridConfig =
            toml::from_str(content).map_err(|e| DayGridError::Config(e.to_string()))?;

        crate::event::Color::parse(&config.default_color)
            .map_err(|e| DayGridError::Config(format!("default_color: {e}")))?;

        Ok(config)
    }

    /// Resolved data directory, with `~` expanded.
    pub fn data_path(&self) -> DayGridResult<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(PathBuf::from(
                shellexpand::tilde(&dir.to_string_lossy()).into_owned(),
            )),
            None => Ok(dirs::data_dir()
                .ok_or_else(|| DayGridError::Config("Could not determine data directory".into()))?
                .join("daygrid")),
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DayGridResult<()> {
        let contents = format!(
            "\
# daygrid configuration

# Where events are stored (defaults to the platform data directory):
# data_dir = \"~/.local/share/daygrid\"

# Color of new events:
# default_color = \"{}\"

# Events shown per day in the month view:
# preview_limit = {}
",
            DEFAULT_COLOR,
            default_preview_limit()
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DayGridError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DayGridError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
