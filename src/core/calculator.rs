//! Fuel ration arithmetic for a single hour-meter interval.

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Figures derived from one pair of readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RationFigures {
    pub delta: f64,
    pub consumption: f64,
    pub buffer_stock: f64,
}

/// delta = ending - starting (2 dp), consumption = delta * rate,
/// buffer stock = capacity - consumption. Both rounded to 2 dp.
pub fn compute(starting: f64, ending: f64, ration_rate: f64, tank_capacity: f64) -> RationFigures {
    let delta = round2(ending - starting);
    let raw_consumption = delta * ration_rate;

    RationFigures {
        delta,
        consumption: round2(raw_consumption),
        buffer_stock: round2(tank_capacity - raw_consumption),
    }
}

/// Soft check: does the jump exceed what a unit can run in one day?
pub fn is_implausible(starting: f64, ending: f64, limit: f64) -> bool {
    round2(ending - starting) > limit
}
