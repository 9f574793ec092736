//! Global daycal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{DaycalError, DaycalResult};

static DEFAULT_CALENDAR_DIR: &str = "~/.daycal";

/// Color used for categories missing from the palette.
pub const DEFAULT_CATEGORY_COLOR: &str = "#808080";

fn default_calendar_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_DIR)
}

fn is_default_calendar_dir(p: &PathBuf) -> bool {
    *p == default_calendar_dir()
}

/// How days are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreLayout {
    /// `days/<date>`: one file per day, one event per line.
    #[default]
    Lines,
    /// `days/<date>/<event>`: one directory per day, one file per event.
    EventFiles,
}

/// A named category and the color views draw it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
}

impl Category {
    fn new(name: &str, color: &str) -> Self {
        Category {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Work", "#4287f5"),
        Category::new("Personal", "#42f554"),
        Category::new("Health", "#f54242"),
        Category::new("Meeting", "#f5a442"),
        Category::new("Important", "#f542e0"),
        Category::new("Travel", "#42f5f5"),
        Category::new("Family", "#f5f542"),
        Category::new("Project", "#8b42f5"),
    ]
}

/// Global configuration at ~/.config/daycal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DaycalConfig {
    #[serde(default = "default_calendar_dir", skip_serializing_if = "is_default_calendar_dir")]
    pub calendar_dir: PathBuf,

    #[serde(default)]
    pub layout: StoreLayout,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<Category>,
}

impl Default for DaycalConfig {
    fn default() -> Self {
        DaycalConfig {
            calendar_dir: default_calendar_dir(),
            layout: StoreLayout::default(),
            categories: default_categories(),
        }
    }
}

impl DaycalConfig {
    pub fn config_path() -> DaycalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DaycalError::Config("Could not determine config directory".into()))?
            .join("daycal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/daycal/config.toml, creating a commented default first.
    pub fn load() -> DaycalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> DaycalResult<Self> {
        let mut config: DaycalConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| DaycalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DaycalError::Config(e.to_string()))?;

        if config.categories.is_empty() {
            config.categories = default_categories();
        }

        Ok(config)
    }

    /// Save the current config to ~/.config/daycal/config.toml
    pub fn save(&self) -> DaycalResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> DaycalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DaycalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| DaycalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> DaycalResult<()> {
        let contents = format!(
            "\
# daycal configuration

# Where your day files live:
# calendar_dir = \"{}\"

# \"lines\" (one file per day) or \"event-files\" (one file per event):
# layout = \"lines\"

# Category colors:
# [[categories]]
# name = \"Work\"
# color = \"#4287f5\"
",
            DEFAULT_CALENDAR_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DaycalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DaycalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The calendar directory with `~` expanded, or `None` when the home
    /// directory cannot be resolved.
    pub fn data_path(&self) -> Option<PathBuf> {
        let raw = self.calendar_dir.to_string_lossy();
        let expanded = shellexpand::tilde(&raw);

        if expanded.starts_with('~') {
            return None;
        }

        Some(PathBuf::from(expanded.into_owned()))
    }

    /// Returns the calendar directory in display-friendly form,
    /// keeping `~` instead of expanding to the full home directory.
    pub fn display_path(&self) -> &Path {
        &self.calendar_dir
    }

    /// Palette color of a category, matched case-insensitively.
    pub fn category_color(&self, name: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}
