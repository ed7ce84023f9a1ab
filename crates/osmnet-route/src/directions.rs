//! Turn-by-turn instructions derived from a [`Route`].
//!
//! Consecutive edges on the same road (same way label and classification)
//! merge into one instruction.  At every change of road the turn is
//! classified by the bearing change between the last edge of the previous
//! road and the first edge of the next one:
//!
//! | \|Δ bearing\|  | Maneuver           |
//! |----------------|--------------------|
//! | < 20°          | continue straight  |
//! | 20° – 70°      | slight left/right  |
//! | 70° – 135°     | left/right         |
//! | 135° – 165°    | sharp left/right   |
//! | ≥ 165°         | U-turn             |

use std::fmt;

use osmnet_core::GeoPoint;
use osmnet_core::geo::bearing_delta;
use osmnet_graph::RoadGraph;

use crate::route::Route;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Maneuver {
    Depart,
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    UTurn,
    Arrive,
}

impl Maneuver {
    /// Classify a signed bearing change (positive = clockwise).
    pub fn from_delta(delta_deg: f64) -> Self {
        let right = delta_deg > 0.0;
        match delta_deg.abs() {
            d if d < 20.0 => Maneuver::Straight,
            d if d < 70.0 => if right { Maneuver::SlightRight } else { Maneuver::SlightLeft },
            d if d < 135.0 => if right { Maneuver::Right } else { Maneuver::Left },
            d if d < 165.0 => if right { Maneuver::SharpRight } else { Maneuver::SharpLeft },
            _ => Maneuver::UTurn,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Maneuver::Depart      => "depart",
            Maneuver::Straight    => "straight",
            Maneuver::SlightLeft  => "slight_left",
            Maneuver::SlightRight => "slight_right",
            Maneuver::Left        => "left",
            Maneuver::Right       => "right",
            Maneuver::SharpLeft   => "sharp_left",
            Maneuver::SharpRight  => "sharp_right",
            Maneuver::UTurn       => "u_turn",
            Maneuver::Arrive      => "arrive",
        }
    }
}

/// One step of a turn-by-turn listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub maneuver:    Maneuver,
    /// Label of the road this step travels on.
    pub road:        String,
    pub highway:     String,
    /// Where the step starts.
    pub location:    GeoPoint,
    /// Initial heading of the step, degrees from north.
    pub bearing_deg: f64,
    /// Signed bearing change into this step; 0 for depart and arrive.
    pub turn_deg:    f64,
    pub distance_m:  f64,
    pub time_s:      f64,
}

impl Instruction {
    pub fn text(&self) -> String {
        let road = &self.road;
        match self.maneuver {
            Maneuver::Depart      => format!("Head {} on {road}", compass(self.bearing_deg)),
            Maneuver::Straight    => format!("Continue onto {road}"),
            Maneuver::SlightLeft  => format!("Bear left onto {road}"),
            Maneuver::SlightRight => format!("Bear right onto {road}"),
            Maneuver::Left        => format!("Turn left onto {road}"),
            Maneuver::Right       => format!("Turn right onto {road}"),
            Maneuver::SharpLeft   => format!("Turn sharp left onto {road}"),
            Maneuver::SharpRight  => format!("Turn sharp right onto {road}"),
            Maneuver::UTurn       => format!("Make a U-turn onto {road}"),
            Maneuver::Arrive      => "Arrive at destination".to_owned(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Eight-point compass label for a bearing.
fn compass(bearing_deg: f64) -> &'static str {
    const POINTS: [&str; 8] = ["north", "northeast", "east", "southeast", "south", "southwest", "west", "northwest"];
    let idx = ((bearing_deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[idx]
}

struct Group {
    road:          String,
    highway:       String,
    location:      GeoPoint,
    start_bearing: f64,
    end_bearing:   f64,
    distance_m:    f64,
    time_s:        f64,
}

/// Instructions for `route`, ending with an `Arrive` step.
///
/// A trivial route yields only the `Arrive` step.
pub fn directions(graph: &RoadGraph, route: &Route) -> Vec<Instruction> {
    let mut groups: Vec<Group> = Vec::new();
    for &e in &route.edges {
        let way = graph.way_of(e);
        let (a, b) = (graph.pos(graph.edge_from[e.index()]), graph.pos(graph.edge_to[e.index()]));
        let bearing = a.bearing_deg(b);
        let road = way.label();

        match groups.last_mut() {
            Some(g) if g.road == road && g.highway == way.highway => {
                g.end_bearing = bearing;
                g.distance_m += graph.edge_length_m[e.index()];
                g.time_s += graph.edge_time_s[e.index()];
            }
            _ => groups.push(Group {
                road,
                highway: way.highway.clone(),
                location: a,
                start_bearing: bearing,
                end_bearing: bearing,
                distance_m: graph.edge_length_m[e.index()],
                time_s: graph.edge_time_s[e.index()],
            }),
        }
    }

    let mut steps = Vec::with_capacity(groups.len() + 1);
    let mut prev_bearing: Option<f64> = None;
    for g in &groups {
        let (maneuver, turn_deg) = match prev_bearing {
            None => (Maneuver::Depart, 0.0),
            Some(prev) => {
                let delta = bearing_delta(prev, g.start_bearing);
                (Maneuver::from_delta(delta), delta)
            }
        };
        steps.push(Instruction {
            maneuver,
            road: g.road.clone(),
            highway: g.highway.clone(),
            location: g.location,
            bearing_deg: g.start_bearing,
            turn_deg,
            distance_m: g.distance_m,
            time_s: g.time_s,
        });
        prev_bearing = Some(g.end_bearing);
    }

    let end = graph.pos(route.destination());
    let (road, highway) = groups
        .last()
        .map(|g| (g.road.clone(), g.highway.clone()))
        .unwrap_or_default();
    steps.push(Instruction {
        maneuver: Maneuver::Arrive,
        road,
        highway,
        location: end,
        bearing_deg: prev_bearing.unwrap_or(0.0),
        turn_deg: 0.0,
        distance_m: 0.0,
        time_s: 0.0,
    });
    steps
}
