use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Channels of the planar record, as charted by consumers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Altitude,
    Velocity,
    Acceleration,
    Gravity,
    #[serde(rename = "TWR")]
    Twr,
    Mass,
    DynamicPressure,
    Thrust,
}

impl Channel {
    /// Every channel, in chart order.
    pub const ALL: [Channel; 8] = [
        Channel::Altitude,
        Channel::Velocity,
        Channel::Acceleration,
        Channel::Gravity,
        Channel::Twr,
        Channel::Mass,
        Channel::DynamicPressure,
        Channel::Thrust,
    ];

    /// Stable key consumers index channels by.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Altitude => "Altitude",
            Channel::Velocity => "Velocity",
            Channel::Acceleration => "Acceleration",
            Channel::Gravity => "Gravity",
            Channel::Twr => "TWR",
            Channel::Mass => "Mass",
            Channel::DynamicPressure => "DynamicPressure",
            Channel::Thrust => "Thrust",
        }
    }

    /// Axis label with unit.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Altitude => "Altitude (m)",
            Channel::Velocity => "Velocity (m/s)",
            Channel::Acceleration => "Acceleration (m/s²)",
            Channel::Gravity => "Gravity (m/s²)",
            Channel::Twr => "TWR",
            Channel::Mass => "Mass (kg)",
            Channel::DynamicPressure => "DynamicPressure (Pa)",
            Channel::Thrust => "Thrust (N)",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| SimError::UnknownChannel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One value of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelPoint {
    pub time: u32,
    pub value: f64,
}

/// Every channel at one recorded time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub time: u32,
    pub altitude: f64,         // m
    pub velocity: f64,         // m/s, vertical
    pub acceleration: f64,     // m/s^2
    pub gravity: f64,          // m/s^2
    pub twr: f64,
    pub mass: f64,             // kg
    pub dynamic_pressure: f64, // Pa
    pub thrust: f64,           // N
}

impl RecordRow {
    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Altitude => self.altitude,
            Channel::Velocity => self.velocity,
            Channel::Acceleration => self.acceleration,
            Channel::Gravity => self.gravity,
            Channel::Twr => self.twr,
            Channel::Mass => self.mass,
            Channel::DynamicPressure => self.dynamic_pressure,
            Channel::Thrust => self.thrust,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub time: u32,
    pub velocity: f64, // m/s, speed at contact
}

/// Run summary. Sections hold recorded times in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightMeta {
    pub thrust_section: Vec<u32>,
    pub coast_section: Vec<u32>,
    pub impact: Option<Impact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    pub rows: Vec<RecordRow>,
    pub meta: FlightMeta,
}

impl TrajectoryRecord {
    pub(crate) fn push(&mut self, row: RecordRow) {
        if row.thrust == 0.0 {
            self.meta.coast_section.push(row.time);
        } else {
            self.meta.thrust_section.push(row.time);
        }
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().map(|r| r.time)
    }

    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = ChannelPoint> + '_ {
        self.rows.iter().map(move |r| ChannelPoint {
            time: r.time,
            value: r.value(channel),
        })
    }

    /// Points of `channel` recorded while the engine was firing.
    pub fn thrusting(&self, channel: Channel) -> impl Iterator<Item = ChannelPoint> + '_ {
        self.channel(channel)
            .filter(|p| self.meta.thrust_section.binary_search(&p.time).is_ok())
    }

    /// Points of `channel` recorded while coasting.
    pub fn coasting(&self, channel: Channel) -> impl Iterator<Item = ChannelPoint> + '_ {
        self.channel(channel)
            .filter(|p| self.meta.coast_section.binary_search(&p.time).is_ok())
    }
}
