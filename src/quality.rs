//! # Fix Quality Advisor
//!
//! Turns a GNSS state snapshot into tiered, human-readable quality ratings and
//! a single "safe to use" recommendation.
//!
//! Only fix quality and satellite count gate the recommendation. HDOP is
//! reported for information, and a missing DOP never blocks a position.
//!
//! ## Usage
//!
//! ```
//! use nmea_health::parser::{Dop, GnssSnapshot};
//! use nmea_health::quality::{QualityAdvisor, Recommendation};
//!
//! let snapshot = GnssSnapshot { fix_quality: 1, dop: Dop::new(1.2), satellites_used: 7 };
//! let assessment = QualityAdvisor::assess(&snapshot);
//! assert_eq!(assessment.recommendation, Recommendation::SafeToUse);
//! ```

use std::fmt;

use crate::parser::GnssSnapshot;

/// HDOP below this is excellent
pub const HDOP_EXCELLENT_BELOW: f32 = 1.0;

/// HDOP below this is good
pub const HDOP_GOOD_BELOW: f32 = 2.0;

/// HDOP below this is moderate; anything else is poor
pub const HDOP_MODERATE_BELOW: f32 = 5.0;

/// Fewest satellites for a usable 3D fix
pub const MIN_SATELLITES_FOR_FIX: u32 = 4;

/// Satellite count below this is minimal
pub const SATELLITES_MINIMAL_BELOW: u32 = 6;

/// Satellite count below this is good; anything else is excellent
pub const SATELLITES_GOOD_BELOW: u32 = 8;

/// Fix type from the GGA quality indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixTier {
    NoFix,
    StandardFix,
    DifferentialFix,
    HighPrecisionFix,
}

impl FixTier {
    pub fn from_quality(fix_quality: u8) -> Self {
        match fix_quality {
            0 => FixTier::NoFix,
            1 => FixTier::StandardFix,
            2 => FixTier::DifferentialFix,
            _ => FixTier::HighPrecisionFix,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FixTier::NoFix => "No fix - position unavailable",
            FixTier::StandardFix => "Standard GPS fix",
            FixTier::DifferentialFix => "Differential GPS fix - improved accuracy",
            FixTier::HighPrecisionFix => "High precision fix (RTK/PPS)",
        }
    }
}

/// Horizontal dilution of precision rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdopTier {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl HdopTier {
    /// Half-open bands checked in ascending order; NaN falls through to `Poor`
    pub fn from_hdop(hdop: f32) -> Self {
        if hdop < HDOP_EXCELLENT_BELOW {
            HdopTier::Excellent
        } else if hdop < HDOP_GOOD_BELOW {
            HdopTier::Good
        } else if hdop < HDOP_MODERATE_BELOW {
            HdopTier::Moderate
        } else {
            HdopTier::Poor
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HdopTier::Excellent => "Excellent horizontal precision",
            HdopTier::Good => "Good horizontal precision",
            HdopTier::Moderate => "Moderate horizontal precision",
            HdopTier::Poor => "Poor horizontal precision",
        }
    }
}

/// Satellite geometry rating by count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatelliteTier {
    Insufficient,
    Minimal,
    Good,
    Excellent,
}

impl SatelliteTier {
    pub fn from_count(satellites_used: u32) -> Self {
        if satellites_used < MIN_SATELLITES_FOR_FIX {
            SatelliteTier::Insufficient
        } else if satellites_used < SATELLITES_MINIMAL_BELOW {
            SatelliteTier::Minimal
        } else if satellites_used < SATELLITES_GOOD_BELOW {
            SatelliteTier::Good
        } else {
            SatelliteTier::Excellent
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SatelliteTier::Insufficient => "Insufficient satellites for reliable fix",
            SatelliteTier::Minimal => "Minimal satellite coverage",
            SatelliteTier::Good => "Good satellite coverage",
            SatelliteTier::Excellent => "Excellent satellite coverage",
        }
    }
}

/// What the caller should do with the current position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    SafeToUse,
    UseLastKnownOrWait,
}

impl Recommendation {
    pub fn description(self) -> &'static str {
        match self {
            Recommendation::SafeToUse => "Position data is reliable for use",
            Recommendation::UseLastKnownOrWait => {
                "Position data unreliable - use last known position or wait"
            }
        }
    }
}

/// Result of [`QualityAdvisor::assess`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    pub fix: FixTier,
    /// `None` when the snapshot carries no valid DOP
    pub hdop: Option<HdopTier>,
    pub satellites: SatelliteTier,
    pub recommendation: Recommendation,
}

impl Assessment {
    pub fn is_safe_to_use(&self) -> bool {
        self.recommendation == Recommendation::SafeToUse
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fix:            {}", self.fix.description())?;
        match self.hdop {
            Some(tier) => writeln!(f, "HDOP:           {}", tier.description())?,
            None => writeln!(f, "HDOP:           not available")?,
        }
        writeln!(f, "Satellites:     {}", self.satellites.description())?;
        write!(f, "Recommendation: {}", self.recommendation.description())
    }
}

/// Stateless fix-quality decision function
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAdvisor;

impl QualityAdvisor {
    /// Rates a snapshot. Pure: the snapshot is only read.
    pub fn assess(snapshot: &GnssSnapshot) -> Assessment {
        let recommendation =
            if snapshot.fix_quality > 0 && snapshot.satellites_used >= MIN_SATELLITES_FOR_FIX {
                Recommendation::SafeToUse
            } else {
                Recommendation::UseLastKnownOrWait
            };

        Assessment {
            fix: FixTier::from_quality(snapshot.fix_quality),
            hdop: snapshot.dop.hdop().map(HdopTier::from_hdop),
            satellites: SatelliteTier::from_count(snapshot.satellites_used),
            recommendation,
        }
    }
}
