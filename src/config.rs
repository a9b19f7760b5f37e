use crate::error::{HerdOpsError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub herd: HerdConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HerdConfig {
    pub name: String,
    /// Accepted species names. Empty accepts any species.
    #[serde(default = "default_species")]
    pub species: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Window used by `history` and `show` when `--days` is not given.
    #[serde(default = "default_history_days")]
    pub default_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            default_days: default_history_days(),
        }
    }
}

fn default_history_days() -> u32 {
    7
}

fn default_species() -> Vec<String> {
    [
        "Cow",
        "Sheep",
        "Goat",
        "Horse",
        "Donkey",
        "Water Buffalo",
        "Chicken",
        "Duck",
        "Goose",
        "Turkey",
        "Bull",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Config {
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(HerdOpsError::Config(format!(
                "Config file not found at {:?}. Run `herdops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| HerdOpsError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    /// Load the config file if one exists, otherwise fall back to defaults.
    pub fn load_or_default(config_override: Option<&PathBuf>) -> Result<Self> {
        if Self::exists(config_override) {
            Self::load(config_override)
        } else {
            tracing::warn!("No config file found, using defaults. Run `herdops init` to create one.");
            Ok(Self::default())
        }
    }

    fn parse(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        serde_yaml::from_str(&content)
            .map_err(|e| HerdOpsError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/herdops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HerdOpsError::Config("Cannot determine config directory".into()))?
            .join("herdops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive(target: Option<&PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up HerdOps!");
        println!();

        let herd_name: String = Input::new()
            .with_prompt("  Herd name")
            .default("Main Barn".into())
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        let species: String = Input::new()
            .with_prompt("  Species (comma separated, blank for any)")
            .default(default_species().join(", "))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        let default_days: u32 = Input::new()
            .with_prompt("  Default history window (days)")
            .default(default_history_days())
            .interact_text()
            .map_err(|e| HerdOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            herd: HerdConfig {
                name: herd_name,
                species: parse_species_list(&species),
            },
            history: HistoryConfig { default_days },
        };

        let config_path = match target {
            Some(p) => p.clone(),
            None => Self::default_config_path()?,
        };
        config.write(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let content = format!(
            "# HerdOps Configuration\n# Generated by `herdops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "Wrote config");
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        if let Ok(dir) = std::env::var("HERDOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| HerdOpsError::Config("Cannot determine data directory".into()))?
            .join("herdops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("herdops.db"))
    }

    pub fn photos_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("photos"))
    }
}

fn parse_species_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            herd: HerdConfig {
                name: "Main Barn".into(),
                species: default_species(),
            },
            history: HistoryConfig::default(),
        }
    }
}
