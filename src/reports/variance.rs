use serde::{Deserialize, Serialize};

/// Three-valued classification of a variance's sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn from_change(value: f64) -> Self {
        if value > 0.0 {
            Trend::Up
        } else if value < 0.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

/// Percentage change between two periods, with its trend classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub value: f64,
    pub trend: Trend,
}

/// Month-over-month change for flow metrics (income, expense). A previous
/// value of zero yields 0, signalling "no comparison possible" rather than a
/// true 0% change; callers must not conflate the two.
pub fn flow_variation(current: f64, previous: f64) -> Variation {
    let value = if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    };
    Variation {
        value,
        trend: Trend::from_change(value),
    }
}

/// Month-over-month change for the balance metric. Balance may be negative,
/// so the guard is `!= 0` and the denominator is the absolute previous value.
/// The asymmetry with [`flow_variation`] is intentional, observable behavior.
pub fn balance_variation(current: f64, previous: f64) -> Variation {
    let value = if previous != 0.0 {
        (current - previous) / previous.abs() * 100.0
    } else {
        0.0
    };
    Variation {
        value,
        trend: Trend::from_change(value),
    }
}
