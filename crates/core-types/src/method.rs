use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one of the statistical detection methods.
///
/// The serialized names (`moving_average`, `standard_deviation`, `iqr`) are
/// the public contract: they are what callers pass in `methods` and what the
/// report uses as keys in its `results` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    MovingAverage,
    StandardDeviation,
    Iqr,
}

impl Method {
    /// All methods, in their canonical order.
    pub const ALL: [Method; 3] = [
        Method::MovingAverage,
        Method::StandardDeviation,
        Method::Iqr,
    ];

    /// Returns the canonical wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::MovingAverage => "moving_average",
            Method::StandardDeviation => "standard_deviation",
            Method::Iqr => "iqr",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moving_average" => Ok(Method::MovingAverage),
            "standard_deviation" => Ok(Method::StandardDeviation),
            "iqr" => Ok(Method::Iqr),
            _ => Err(()),
        }
    }
}
