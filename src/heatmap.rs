//! Heatmap encoding of room metrics.
//!
//! A metric value is normalized against the mode's anchors into an intensity
//! in `[0, 1]`, and the color is the linear blend of the two anchor colors at
//! that intensity. Out-of-range values clamp to the anchors.

use crate::config::{Anchors, HeatmapConfig};
use crate::metrics::RoomMetrics;
use crate::model::room::Room;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linear RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Blends towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        if t.is_nan() || t <= 0.0 {
            return *self;
        }
        if t >= 1.0 {
            return *other;
        }
        let t = t as f32;
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// RGBA tuple in the form the drawing functions take.
    pub fn with_alpha(&self, a: f32) -> (f32, f32, f32, f32) {
        (self.r, self.g, self.b, a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapMode {
    #[default]
    Temperature,
    Occupancy,
    AirQuality,
    Energy,
}

impl HeatmapMode {
    pub const ALL: [HeatmapMode; 4] = [
        HeatmapMode::Temperature,
        HeatmapMode::Occupancy,
        HeatmapMode::AirQuality,
        HeatmapMode::Energy,
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            HeatmapMode::Temperature => "°C",
            HeatmapMode::Occupancy => "%",
            HeatmapMode::AirQuality => "ppm",
            HeatmapMode::Energy => "kW",
        }
    }

    /// The metric this mode encodes.
    pub fn value(&self, metrics: &RoomMetrics) -> f64 {
        match self {
            HeatmapMode::Temperature => metrics.temperature,
            HeatmapMode::Occupancy => metrics.occupancy_ratio,
            HeatmapMode::AirQuality => metrics.air_quality,
            HeatmapMode::Energy => metrics.energy_usage,
        }
    }

    /// Value formatted for a room label, e.g. `"27.5°C"` or `"50%"`.
    pub fn format_value(&self, value: f64) -> String {
        match self {
            HeatmapMode::Temperature => format!("{:.1}{}", value, self.unit()),
            HeatmapMode::Occupancy => format!("{:.0}{}", value * 100.0, self.unit()),
            HeatmapMode::AirQuality => format!("{:.0} {}", value, self.unit()),
            HeatmapMode::Energy => format!("{:.1} {}", value, self.unit()),
        }
    }
}

impl fmt::Display for HeatmapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeatmapMode::Temperature => "temperature",
            HeatmapMode::Occupancy => "occupancy",
            HeatmapMode::AirQuality => "air_quality",
            HeatmapMode::Energy => "energy",
        };
        f.write_str(s)
    }
}

/// Color and intensity of one encoded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatSample {
    pub value: f64,
    pub intensity: f64,
    pub color: Color,
}

/// Maps `value` into `[0, 1]` between `min` and `max`.
///
/// Values below `min` give 0 and values above `max` give 1. NaN gives 0.
/// A degenerate range (`max <= min`) acts as a step at `max`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    if max <= min {
        return if value >= max { 1.0 } else { 0.0 };
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

/// Encodes a raw value with the given anchors.
pub fn sample(anchors: &Anchors, value: f64) -> HeatSample {
    let intensity = normalize(value, anchors.min, anchors.max);
    HeatSample {
        value,
        intensity,
        color: anchors.low.lerp(&anchors.high, intensity),
    }
}

/// Encodes the metric selected by `mode` for a room.
pub fn sample_room(config: &HeatmapConfig, mode: HeatmapMode, room: &Room) -> HeatSample {
    let metrics = RoomMetrics::derive(room);
    sample(config.anchors(mode), mode.value(&metrics))
}
