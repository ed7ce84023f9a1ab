//! Per-mode routing profiles: which road classes a mode may use, at what
//! default speed, and how posted limits and oneway tags are applied.
//!
//! The built-in tables are the defaults; a caller can load a replacement
//! (for example from JSON with the `serde` feature) and pass it to
//! [`build_graph`](crate::build_graph).

use std::collections::BTreeMap;

use osmnet_core::TravelMode;

use crate::attrs::WayAttrs;
use crate::error::{GraphError, GraphResult};

/// How a way's `maxspeed` tag affects the traversal speed for a mode.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaxSpeedPolicy {
    /// Use the posted limit when present.
    #[default]
    Use,
    /// Use the lower of the posted limit and the class default.
    Cap,
    /// Always use the class default.
    Ignore,
}

/// Road table for one travel mode.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModeProfile {
    /// Permitted `highway=*` classes and their default speed in km/h.
    /// A class missing from this table is excluded for the mode.
    pub speeds_kmh: BTreeMap<String, f64>,
    /// Speed used when a permitted class has no table entry of its own.
    pub fallback_kmh: f64,
    pub maxspeed: MaxSpeedPolicy,
    /// Whether `oneway` restrictions suppress the reverse direction.
    pub honor_oneway: bool,
}

impl ModeProfile {
    fn from_table(
        classes: &[(&str, Option<f64>)],
        fallback_kmh: f64,
        maxspeed: MaxSpeedPolicy,
        honor_oneway: bool,
    ) -> Self {
        let speeds_kmh = classes
            .iter()
            .map(|&(class, speed)| (class.to_owned(), speed.unwrap_or(fallback_kmh)))
            .collect();
        ModeProfile { speeds_kmh, fallback_kmh, maxspeed, honor_oneway }
    }

    pub fn default_drive() -> Self {
        Self::from_table(
            &[
                ("motorway", Some(110.0)),
                ("motorway_link", Some(60.0)),
                ("trunk", Some(90.0)),
                ("trunk_link", Some(50.0)),
                ("primary", Some(60.0)),
                ("primary_link", Some(40.0)),
                ("secondary", Some(50.0)),
                ("secondary_link", Some(35.0)),
                ("tertiary", Some(40.0)),
                ("tertiary_link", Some(30.0)),
                ("residential", Some(30.0)),
                ("living_street", Some(20.0)),
                ("unclassified", Some(30.0)),
                ("service", Some(20.0)),
                ("road", None),
            ],
            30.0,
            MaxSpeedPolicy::Use,
            true,
        )
    }

    pub fn default_walk() -> Self {
        Self::from_table(
            &[
                ("primary", None),
                ("secondary", None),
                ("tertiary", None),
                ("residential", Some(5.0)),
                ("living_street", Some(5.0)),
                ("unclassified", None),
                ("service", None),
                ("pedestrian", Some(5.0)),
                ("footway", Some(5.0)),
                ("path", Some(4.0)),
                ("steps", Some(3.0)),
                ("track", None),
            ],
            5.0,
            MaxSpeedPolicy::Ignore,
            false,
        )
    }

    pub fn default_bike() -> Self {
        Self::from_table(
            &[
                ("primary", Some(15.0)),
                ("secondary", Some(20.0)),
                ("tertiary", Some(18.0)),
                ("residential", Some(15.0)),
                ("living_street", None),
                ("unclassified", None),
                ("service", None),
                ("cycleway", Some(18.0)),
                ("path", Some(12.0)),
                ("track", None),
            ],
            15.0,
            MaxSpeedPolicy::Cap,
            false,
        )
    }

    /// `true` if ways of `highway` class are usable by this mode.
    #[inline]
    pub fn accepts(&self, highway: &str) -> bool {
        self.speeds_kmh.contains_key(highway)
    }

    /// Traversal speed in km/h for a way, or `None` if the mode may not use
    /// it at all.
    pub fn speed_kmh(&self, attrs: &WayAttrs) -> Option<f64> {
        let class = attrs.highway.as_deref()?;
        let default = *self.speeds_kmh.get(class)?;
        let speed = match (self.maxspeed, attrs.maxspeed_kmh) {
            (MaxSpeedPolicy::Use, Some(posted)) => posted,
            (MaxSpeedPolicy::Cap, Some(posted)) => posted.min(default),
            _ => default,
        };
        Some(speed)
    }

    fn validate(&self, mode: TravelMode) -> GraphResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.fallback_kmh) {
            return Err(GraphError::Profile(format!(
                "{mode}: fallback speed must be a positive number"
            )));
        }
        if let Some((class, _)) = self.speeds_kmh.iter().find(|(_, v)| !positive(**v)) {
            return Err(GraphError::Profile(format!(
                "{mode}: speed for highway={class} must be a positive number"
            )));
        }
        Ok(())
    }
}

/// Profiles for all three travel modes.
///
/// When deserialised, a missing mode falls back to its built-in table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingProfiles {
    pub drive: ModeProfile,
    pub walk:  ModeProfile,
    pub bike:  ModeProfile,
}

impl RoutingProfiles {
    pub fn get(&self, mode: TravelMode) -> &ModeProfile {
        match mode {
            TravelMode::Drive => &self.drive,
            TravelMode::Walk  => &self.walk,
            TravelMode::Bike  => &self.bike,
        }
    }

    /// Reject non-positive or non-finite speeds.
    pub fn validate(&self) -> GraphResult<()> {
        TravelMode::ALL
            .into_iter()
            .try_for_each(|mode| self.get(mode).validate(mode))
    }
}

impl Default for RoutingProfiles {
    fn default() -> Self {
        RoutingProfiles {
            drive: ModeProfile::default_drive(),
            walk:  ModeProfile::default_walk(),
            bike:  ModeProfile::default_bike(),
        }
    }
}
