//! Static unit tables: ration rate, tank capacity and initial hour-meter.
//! Built once from configuration and passed to the ledger read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_RATION_RATE: f64 = 62.0;
pub const DEFAULT_TANK_CAPACITY: f64 = 0.0;
pub const DEFAULT_INITIAL_READING: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSpec {
    pub code: String,
    pub ration_rate: f64,
    #[serde(default)]
    pub tank_capacity: f64,
    #[serde(default)]
    pub initial_reading: f64,
}

impl UnitSpec {
    pub fn new(code: &str, ration_rate: f64, tank_capacity: f64, initial_reading: f64) -> Self {
        Self {
            code: UnitCatalog::normalize(code),
            ration_rate,
            tank_capacity,
            initial_reading,
        }
    }
}

/// Fallback values for units missing from the tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefaults {
    pub ration_rate: f64,
    pub tank_capacity: f64,
    pub initial_reading: f64,
}

impl Default for UnitDefaults {
    fn default() -> Self {
        Self {
            ration_rate: DEFAULT_RATION_RATE,
            tank_capacity: DEFAULT_TANK_CAPACITY,
            initial_reading: DEFAULT_INITIAL_READING,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: BTreeMap<String, UnitSpec>,
    defaults: UnitDefaults,
    strict: bool,
}

impl UnitCatalog {
    pub fn new(specs: impl IntoIterator<Item = UnitSpec>, defaults: UnitDefaults, strict: bool) -> Self {
        let units = specs
            .into_iter()
            .map(|mut s| {
                s.code = Self::normalize(&s.code);
                (s.code.clone(), s)
            })
            .collect();

        Self {
            units,
            defaults,
            strict,
        }
    }

    /// Trimmed, upper-cased unit code.
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// When strict, appends for units outside the allow-list are rejected.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn is_allowed(&self, code: &str) -> bool {
        self.units.contains_key(&Self::normalize(code))
    }

    pub fn get(&self, code: &str) -> Option<&UnitSpec> {
        self.units.get(&Self::normalize(code))
    }

    pub fn codes(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    pub fn specs(&self) -> impl Iterator<Item = &UnitSpec> {
        self.units.values()
    }

    pub fn ration_rate(&self, code: &str) -> f64 {
        self.get(code)
            .map(|s| s.ration_rate)
            .unwrap_or(self.defaults.ration_rate)
    }

    pub fn tank_capacity(&self, code: &str) -> f64 {
        self.get(code)
            .map(|s| s.tank_capacity)
            .unwrap_or(self.defaults.tank_capacity)
    }

    pub fn initial_reading(&self, code: &str) -> f64 {
        self.get(code)
            .map(|s| s.initial_reading)
            .unwrap_or(self.defaults.initial_reading)
    }
}
