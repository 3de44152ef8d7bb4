use crate::core::ledger::{DEFAULT_PLAUSIBLE_DELTA, LedgerSettings};
use crate::errors::{AppError, AppResult};
use crate::models::unit::{
    DEFAULT_INITIAL_READING, DEFAULT_RATION_RATE, DEFAULT_TANK_CAPACITY, UnitCatalog,
    UnitDefaults, UnitSpec,
};
use crate::ui::messages::success;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub backup_dir: Option<String>,
    #[serde(default = "default_plausible_delta")]
    pub plausible_delta: f64,
    #[serde(default = "default_strict_units")]
    pub strict_units: bool,
    #[serde(default = "default_ration_rate")]
    pub default_ration_rate: f64,
    #[serde(default = "default_tank_capacity")]
    pub default_tank_capacity: f64,
    #[serde(default = "default_initial_reading")]
    pub default_initial_reading: f64,
    #[serde(default = "default_units")]
    pub units: Vec<UnitSpec>,
}

fn default_plausible_delta() -> f64 {
    DEFAULT_PLAUSIBLE_DELTA
}
fn default_strict_units() -> bool {
    true
}
fn default_ration_rate() -> f64 {
    DEFAULT_RATION_RATE
}
fn default_tank_capacity() -> f64 {
    DEFAULT_TANK_CAPACITY
}
fn default_initial_reading() -> f64 {
    DEFAULT_INITIAL_READING
}

/// Site tables shipped with a fresh configuration: (code, rate, capacity, initial HM).
fn default_units() -> Vec<UnitSpec> {
    [
        ("DZ3007", 52.0, 1000.0, 45324.0),
        ("DZ3014", 52.0, 1000.0, 45964.0),
        ("DZ3026", 52.0, 1200.0, 20151.0),
        ("EX1022", 58.0, 980.0, 34317.0),
        ("EX2017", 93.0, 1380.0, 46028.0),
        ("EX2027", 93.0, 1380.0, 35373.0),
        ("EX2032", 93.0, 1380.0, 27023.0),
        ("EX2033", 93.0, 1380.0, 26172.0),
        ("EX2040", 93.0, 1380.0, 18948.0),
        ("EX3009", 126.0, 3400.0, 35880.0),
    ]
    .iter()
    .map(|(code, rate, cap, hm)| UnitSpec::new(code, *rate, *cap, *hm))
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            backup_dir: None,
            plausible_delta: default_plausible_delta(),
            strict_units: default_strict_units(),
            default_ration_rate: default_ration_rate(),
            default_tank_capacity: default_tank_capacity(),
            default_initial_reading: default_initial_reading(),
            units: default_units(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rationlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rationlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rationlog.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rationlog.sqlite")
    }

    /// Load configuration from file, or defaults when there is none.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Read-only unit tables for the ledger.
    pub fn unit_catalog(&self) -> UnitCatalog {
        UnitCatalog::new(
            self.units.iter().cloned(),
            UnitDefaults {
                ration_rate: self.default_ration_rate,
                tank_capacity: self.default_tank_capacity,
                initial_reading: self.default_initial_reading,
            },
            self.strict_units,
        )
    }

    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            plausible_delta: self.plausible_delta,
        }
    }

    /// Directory for reset snapshots: `backup_dir`, else next to the database.
    pub fn backup_dir(&self) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => crate::utils::path::expand_tilde(dir),
            None => Path::new(&self.database)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory, the config file (unless `is_test`) and
    /// an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            let config = Self::with_database(db_path.clone());
            fs::write(Self::config_file(), config.to_yaml()?)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
