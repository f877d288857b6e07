use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConversionError;

/// How hard the synthesized jammers transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    #[default]
    Medium,
    High,
}

/// How many jammers are synthesized relative to the vehicle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Sparse,
    #[default]
    Balanced,
    Dense,
}

pub fn intensity_to_power(level: Intensity) -> f64 {
    match level {
        Intensity::Low => 10.0,
        Intensity::Medium => 23.0,
        Intensity::High => 40.0,
    }
}

/// Share of the vehicle count in whole percent.
pub fn density_percent(level: Density) -> u32 {
    match level {
        Density::Sparse => 5,
        Density::Balanced => 10,
        Density::Dense => 20,
    }
}

pub fn density_to_fraction(level: Density) -> f64 {
    density_percent(level) as f64 / 100.0
}

/// `ceil(vehicles * fraction)`, computed on whole percents so that values
/// like 30 * 0.10 do not round up past the exact product.
pub fn implied_jammer_count(vehicles: u32, level: Density) -> u32 {
    let scaled = vehicles as u64 * density_percent(level) as u64;
    scaled.div_ceil(100) as u32
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for Intensity {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Intensity::Low),
            "medium" => Ok(Intensity::Medium),
            "high" => Ok(Intensity::High),
            _ => Err(ConversionError::UnknownIntensity(s.to_string())),
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Density::Sparse => "sparse",
            Density::Balanced => "balanced",
            Density::Dense => "dense",
        };
        f.write_str(name)
    }
}

impl FromStr for Density {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sparse" => Ok(Density::Sparse),
            "balanced" => Ok(Density::Balanced),
            "dense" => Ok(Density::Dense),
            _ => Err(ConversionError::UnknownDensity(s.to_string())),
        }
    }
}
