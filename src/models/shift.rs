use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating period a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    First,  // Shift 1, 06:00-18:00
    Second, // Shift 2, 18:00-06:00
}

/// Rank used for records without a recognised shift.
pub const UNMARKED_RANK: u8 = 3;

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::First => "Shift 1",
            Shift::Second => "Shift 2",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Shift::First => 1,
            Shift::Second => 2,
        }
    }

    /// Long form used in report titles.
    pub fn display_window(&self) -> &'static str {
        match self {
            Shift::First => "Shift 1 (06:00-18:00 WITA)",
            Shift::Second => "Shift 2 (18:00-06:00 WITA)",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.label()
    }

    /// Convert DB string → enum. Unknown labels read back as unmarked.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Shift 1" => Some(Shift::First),
            "Shift 2" => Some(Shift::Second),
            _ => None,
        }
    }

    /// Helper: parse user input ("1", "shift1", "Shift 2", ...)
    pub fn from_code(code: &str) -> Option<Self> {
        let compact: String = code
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match compact.as_str() {
            "1" | "shift1" | "s1" => Some(Shift::First),
            "2" | "shift2" | "s2" => Some(Shift::Second),
            _ => None,
        }
    }
}

/// Rank of an optional shift: Shift 1 = 1, Shift 2 = 2, unmarked = 3.
pub fn shift_rank(shift: Option<Shift>) -> u8 {
    shift.map(|s| s.rank()).unwrap_or(UNMARKED_RANK)
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shift selector for reports and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftSelector {
    Only(Shift),
    Both,
}

impl ShiftSelector {
    pub fn from_code(code: &str) -> Option<Self> {
        if code.trim().eq_ignore_ascii_case("both") || code.trim().eq_ignore_ascii_case("all") {
            return Some(ShiftSelector::Both);
        }
        Shift::from_code(code).map(ShiftSelector::Only)
    }

    pub fn matches(&self, shift: Option<Shift>) -> bool {
        match self {
            ShiftSelector::Both => true,
            ShiftSelector::Only(s) => shift == Some(*s),
        }
    }

    pub fn display_window(&self) -> &'static str {
        match self {
            ShiftSelector::Only(s) => s.display_window(),
            ShiftSelector::Both => "Shift 1 & 2 (All Day)",
        }
    }

    /// File-name fragment for generated reports.
    pub fn file_tag(&self) -> &'static str {
        match self {
            ShiftSelector::Only(Shift::First) => "Shift1_0600-1800",
            ShiftSelector::Only(Shift::Second) => "Shift2_1800-0600",
            ShiftSelector::Both => "Both_Shifts",
        }
    }
}
