//! Derived room metrics.
//!
//! There is no live sensor feed, so temperature, air quality, energy usage and
//! performance score are derived from a room's stored fields. Where a reading
//! needs per-room variation it comes from [`id_hash`], which is stable for a
//! given identifier. Every function here is pure.

use crate::model::room::{Room, RoomType};
use serde::Serialize;

/// Temperature rise (°C) of a fully occupied room.
pub const OCCUPANCY_HEAT_COEFF: f64 = 3.0;

/// CO2 baseline of an empty room (ppm).
pub const AIR_QUALITY_BASE: f64 = 400.0;
/// CO2 rise (ppm) of a fully occupied room.
pub const AIR_QUALITY_OCCUPANCY_COEFF: f64 = 300.0;
/// Range of the identifier-derived CO2 component (ppm).
pub const AIR_QUALITY_HASH_RANGE: u32 = 200;

/// Floor area (square floor units) drawing one kW at multiplier 1.
pub const ENERGY_AREA_DIVISOR: f64 = 1000.0;
/// Extra kW drawn by a fully occupied room.
pub const ENERGY_OCCUPANCY_COEFF: f64 = 2.0;

pub const PERFORMANCE_BASE: u32 = 30;
pub const PERFORMANCE_HASH_RANGE: u32 = 70;

/// Stable, non-cryptographic hash of an identifier: the sum of its UTF-8 bytes.
///
/// The sum wraps around at `u32::MAX`. Distinct identifiers with the same
/// byte sum collide; that is accepted.
pub fn id_hash(id: &str) -> u32 {
    id.bytes().fold(0u32, |h, b| h.wrapping_add(u32::from(b)))
}

/// Temperature offset (°C) for each room type.
pub fn type_temperature_offset(room_type: RoomType) -> f64 {
    match room_type {
        RoomType::Kitchen => 4.0,
        RoomType::MeetingRoom => 2.0,
        RoomType::BreakRoom => 1.5,
        RoomType::Amenity => 1.0,
        RoomType::Office => 0.5,
        RoomType::Bathroom => -0.5,
        RoomType::Storage => -1.0,
        RoomType::Other => 0.0,
    }
}

/// Energy multiplier for each room type.
pub fn type_energy_multiplier(room_type: RoomType) -> f64 {
    match room_type {
        RoomType::Kitchen => 2.5,
        RoomType::Amenity => 1.5,
        RoomType::MeetingRoom => 1.3,
        RoomType::BreakRoom => 1.2,
        RoomType::Office => 1.0,
        RoomType::Bathroom => 0.8,
        RoomType::Storage => 0.4,
        RoomType::Other => 1.0,
    }
}

/// Derived temperature in °C.
pub fn temperature(room: &Room) -> f64 {
    room.temperature
        + room.occupancy_ratio() * OCCUPANCY_HEAT_COEFF
        + type_temperature_offset(room.room_type)
}

/// Derived CO2 concentration in ppm.
pub fn air_quality(room: &Room) -> f64 {
    AIR_QUALITY_BASE
        + room.occupancy_ratio() * AIR_QUALITY_OCCUPANCY_COEFF
        + (id_hash(room.id.as_str()) % AIR_QUALITY_HASH_RANGE) as f64
}

/// Derived energy draw in kW.
pub fn energy_usage(room: &Room) -> f64 {
    room.bounds.area() / ENERGY_AREA_DIVISOR * type_energy_multiplier(room.room_type)
        + room.occupancy_ratio() * ENERGY_OCCUPANCY_COEFF
}

/// Performance score in `[30, 99]`, shown on floor-plan tiles.
pub fn performance_score(room: &Room) -> u32 {
    PERFORMANCE_BASE + id_hash(room.id.as_str()) % PERFORMANCE_HASH_RANGE
}

/// All derived metrics of one room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomMetrics {
    pub temperature: f64,
    pub occupancy_ratio: f64,
    pub air_quality: f64,
    pub energy_usage: f64,
    pub performance_score: u32,
}

impl RoomMetrics {
    pub fn derive(room: &Room) -> Self {
        Self {
            temperature: temperature(room),
            occupancy_ratio: room.occupancy_ratio(),
            air_quality: air_quality(room),
            energy_usage: energy_usage(room),
            performance_score: performance_score(room),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rect::Rect;

    fn kitchen() -> Room {
        Room::new(
            "room-101",
            "Kitchen",
            RoomType::Kitchen,
            Rect::new(0., 0., 100., 50.),
            10,
            22.0,
        )
        .with_occupancy(5)
    }

    #[test]
    fn test_id_hash() {
        assert_eq!(id_hash(""), 0);
        assert_eq!(id_hash("A"), 65);
        assert_eq!(id_hash("ab"), 97 + 98);
        // Byte-sum collisions are accepted
        assert_eq!(id_hash("ab"), id_hash("ba"));
    }

    #[test]
    fn test_id_hash_wraps() {
        // Enough bytes of 0x7f to pass u32::MAX
        let n = (u32::MAX / 127) as usize + 2;
        let id = "\u{7f}".repeat(n);
        let expected = ((127 * n as u64) % (1u64 << 32)) as u32;
        assert_eq!(id_hash(&id), expected);
    }

    #[test]
    fn test_kitchen_temperature() {
        assert!((temperature(&kitchen()) - 27.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_type_has_no_offset() {
        let mut room = kitchen();
        room.room_type = RoomType::Other;
        room.occupancy = 0;
        assert_eq!(temperature(&room), 22.0);
    }

    #[test]
    fn test_air_quality() {
        let room = kitchen();
        let expected = 400.0 + 0.5 * 300.0 + (id_hash("room-101") % 200) as f64;
        assert!((air_quality(&room) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_energy_usage() {
        // 5000 / 1000 * 2.5 + 0.5 * 2
        assert!((energy_usage(&kitchen()) - 13.5).abs() < 1e-12);
    }

    #[test]
    fn test_performance_score_range() {
        for id in ["a", "room-7", "floor-3-room-12", "ü-unicode"] {
            let mut room = kitchen();
            room.id = id.into();
            let score = performance_score(&room);
            assert!((30..100).contains(&score), "{id}: {score}");
        }
    }

    #[test]
    fn test_metrics_are_stable() {
        let room = kitchen();
        let a = RoomMetrics::derive(&room);
        let b = RoomMetrics::derive(&room.clone());
        assert_eq!(a, b);
        assert_eq!(a.performance_score, performance_score(&room));
    }

    #[test]
    fn test_zero_capacity_room() {
        let mut room = kitchen();
        room.capacity = 0;
        let m = RoomMetrics::derive(&room);
        assert_eq!(m.occupancy_ratio, 0.0);
        assert!(m.temperature.is_finite());
        assert!(m.energy_usage.is_finite());
    }
}
