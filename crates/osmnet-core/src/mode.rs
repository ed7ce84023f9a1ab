//! Travel mode, mode-permission sets, and the optimisation criterion.
//!
//! The graph is built for exactly one [`TravelMode`].  Each edge still
//! records the full [`ModeSet`] of modes allowed to traverse it in that
//! direction, so a result formatter can annotate shared infrastructure.

use std::fmt;
use std::str::FromStr;

use crate::NetError;

/// The means of travel a graph is built for.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Motor vehicle; honours oneway restrictions.
    #[default]
    Drive,
    /// On foot; oneway tags do not apply.
    Walk,
    /// Bicycle; oneway tags do not apply in this model.
    Bike,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Drive, TravelMode::Walk, TravelMode::Bike];

    /// Lowercase label, as used on the command line and in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Walk  => "walk",
            TravelMode::Bike  => "bike",
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            TravelMode::Drive => 0b001,
            TravelMode::Walk  => 0b010,
            TravelMode::Bike  => 0b100,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drive" | "car" => Ok(TravelMode::Drive),
            "walk" | "foot" => Ok(TravelMode::Walk),
            "bike" | "bicycle" => Ok(TravelMode::Bike),
            other => Err(NetError::InvalidArgument(format!(
                "unknown travel mode {other:?}: expected drive, walk, or bike"
            ))),
        }
    }
}

// ── ModeSet ───────────────────────────────────────────────────────────────────

/// A subset of {drive, walk, bike} packed into one byte.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeSet(u8);

impl ModeSet {
    pub const EMPTY: ModeSet = ModeSet(0);

    pub fn only(mode: TravelMode) -> Self {
        ModeSet(mode.bit())
    }

    #[inline]
    pub fn insert(&mut self, mode: TravelMode) {
        self.0 |= mode.bit();
    }

    #[inline]
    pub fn contains(self, mode: TravelMode) -> bool {
        self.0 & mode.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in `drive, walk, bike` order.
    pub fn iter(self) -> impl Iterator<Item = TravelMode> {
        TravelMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.iter().map(TravelMode::as_str).collect();
        f.write_str(&labels.join("|"))
    }
}

// ── Optimize ──────────────────────────────────────────────────────────────────

/// Which edge weight drives a shortest-path search.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Optimize {
    /// Minimise traversal time in seconds.
    #[default]
    Time,
    /// Minimise geometric length in metres.
    Distance,
}

impl Optimize {
    pub fn as_str(self) -> &'static str {
        match self {
            Optimize::Time     => "time",
            Optimize::Distance => "distance",
        }
    }
}

impl fmt::Display for Optimize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Optimize {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" | "fastest" => Ok(Optimize::Time),
            "distance" | "shortest" => Ok(Optimize::Distance),
            other => Err(NetError::InvalidArgument(format!(
                "unknown optimisation criterion {other:?}: expected time or distance"
            ))),
        }
    }
}
