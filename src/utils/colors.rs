/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Buffer stock color:
/// \>0 → green
/// \<=0 → red (tank exhausted by the ration)
pub fn color_for_buffer(value: f64) -> &'static str {
    if value > 0.0 { GREEN } else { RED }
}
