//! Aggregates for the dashboard cards and the analytics chart panel.
//!
//! Means over an empty set are reported as `0.0`.

use crate::UID;
use crate::metrics::{self, RoomMetrics};
use crate::model::building::Building;
use crate::model::floor::Floor;
use crate::model::room::{Room, RoomType};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub floors: usize,
    pub rooms: usize,
    pub capacity: u32,
    pub occupancy: u32,
    /// Building occupancy over capacity.
    pub occupancy_rate: f64,
    /// Mean derived temperature (°C).
    pub mean_temperature: f64,
    /// Sum of derived energy usage (kW).
    pub total_energy: f64,
    pub over_capacity: Vec<UID>,
    pub maintenance_notes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorSummary {
    pub floor_id: UID,
    pub name: String,
    pub level: i32,
    pub rooms: usize,
    pub capacity: u32,
    pub occupancy: u32,
    pub occupancy_rate: f64,
    pub mean_temperature: f64,
    pub mean_air_quality: f64,
    pub total_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBreakdown {
    pub room_type: RoomType,
    pub count: usize,
    pub capacity: u32,
    pub occupancy: u32,
}

fn rate(occupancy: u32, capacity: u32) -> f64 {
    if capacity == 0 {
        0.0
    } else {
        occupancy as f64 / capacity as f64
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

pub fn dashboard_stats(building: &Building) -> DashboardStats {
    let rooms: Vec<&Room> = building.rooms().map(|(_, r)| r).collect();
    let capacity = building.capacity();
    let occupancy = building.occupancy();
    DashboardStats {
        floors: building.floors().len(),
        rooms: rooms.len(),
        capacity,
        occupancy,
        occupancy_rate: rate(occupancy, capacity),
        mean_temperature: mean(rooms.iter().map(|r| metrics::temperature(r))),
        total_energy: rooms.iter().map(|r| metrics::energy_usage(r)).sum(),
        over_capacity: rooms
            .iter()
            .filter(|r| r.is_over_capacity())
            .map(|r| r.id.clone())
            .collect(),
        maintenance_notes: rooms.iter().filter(|r| r.has_maintenance_notes()).count(),
    }
}

pub fn floor_summary(floor: &Floor) -> FloorSummary {
    let derived: Vec<RoomMetrics> = floor.rooms().iter().map(RoomMetrics::derive).collect();
    FloorSummary {
        floor_id: floor.id.clone(),
        name: floor.name.clone(),
        level: floor.level,
        rooms: floor.rooms().len(),
        capacity: floor.capacity(),
        occupancy: floor.occupancy(),
        occupancy_rate: rate(floor.occupancy(), floor.capacity()),
        mean_temperature: mean(derived.iter().map(|m| m.temperature)),
        mean_air_quality: mean(derived.iter().map(|m| m.air_quality)),
        total_energy: derived.iter().map(|m| m.energy_usage).sum(),
    }
}

/// Per-floor summaries, bottom floor first.
pub fn floor_summaries(building: &Building) -> Vec<FloorSummary> {
    building
        .floors_by_level()
        .into_iter()
        .map(floor_summary)
        .collect()
}

/// Room counts and occupancy per type, in `RoomType::ALL` order. Absent types are skipped.
pub fn type_breakdown(building: &Building) -> Vec<TypeBreakdown> {
    let mut by_type: BTreeMap<RoomType, TypeBreakdown> = BTreeMap::new();
    for (_, room) in building.rooms() {
        let entry = by_type.entry(room.room_type).or_insert(TypeBreakdown {
            room_type: room.room_type,
            count: 0,
            capacity: 0,
            occupancy: 0,
        });
        entry.count += 1;
        entry.capacity += room.capacity;
        entry.occupancy += room.occupancy;
    }
    by_type.into_values().collect()
}

/// Rooms ranked by performance score (highest first, ties by name).
pub fn top_performers(building: &Building, n: usize) -> Vec<(&Room, u32)> {
    let mut ranked: Vec<(&Room, u32)> = building
        .rooms()
        .map(|(_, r)| (r, metrics::performance_score(r)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rect::Rect;
    use anyhow::Result;

    fn building() -> Result<Building> {
        let ground = Floor::new(
            "g",
            "Ground",
            0,
            100.,
            100.,
            vec![
                Room::new(
                    "k",
                    "Kitchen",
                    RoomType::Kitchen,
                    Rect::new(0., 0., 50., 20.),
                    10,
                    22.,
                )
                .with_occupancy(5),
                Room::new(
                    "o1",
                    "Office 1",
                    RoomType::Office,
                    Rect::new(50., 0., 50., 20.),
                    2,
                    20.,
                )
                .with_occupancy(3),
            ],
        )?;
        let mut store = Room::new(
            "s",
            "Store",
            RoomType::Storage,
            Rect::new(0., 0., 10., 10.),
            1,
            18.,
        );
        store.notes = Some("Leaking pipe".to_string());
        let top = Floor::new("t", "Top", 3, 100., 100., vec![store])?;
        Building::new("b", "HQ", "", vec![top, ground])
    }

    #[test]
    fn test_dashboard_stats() -> Result<()> {
        let stats = dashboard_stats(&building()?);
        assert_eq!(stats.floors, 2);
        assert_eq!(stats.rooms, 3);
        assert_eq!(stats.capacity, 13);
        assert_eq!(stats.occupancy, 8);
        assert!((stats.occupancy_rate - 8.0 / 13.0).abs() < 1e-12);
        assert_eq!(stats.over_capacity, vec![UID::from("o1")]);
        assert_eq!(stats.maintenance_notes, 1);
        // Kitchen 27.5, Office 20 + 1.5*3 + 0.5 = 25, Store 18 - 1 = 17
        assert!((stats.mean_temperature - (27.5 + 25.0 + 17.0) / 3.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_floor_summaries_by_level() -> Result<()> {
        let summaries = floor_summaries(&building()?);
        assert_eq!(summaries[0].name, "Ground");
        assert_eq!(summaries[1].name, "Top");
        assert_eq!(summaries[0].rooms, 2);
        assert!((summaries[0].occupancy_rate - 8.0 / 12.0).abs() < 1e-12);
        // Kitchen 1000/1000*2.5 + 0.5*2 = 3.5, Office 1000/1000*1 + 1.5*2 = 4
        assert!((summaries[0].total_energy - 7.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_empty_floor_summary() -> Result<()> {
        let floor = Floor::new("e", "Empty", 0, 10., 10., vec![])?;
        let s = floor_summary(&floor);
        assert_eq!(s.rooms, 0);
        assert_eq!(s.occupancy_rate, 0.0);
        assert_eq!(s.mean_temperature, 0.0);
        Ok(())
    }

    #[test]
    fn test_type_breakdown() -> Result<()> {
        let breakdown = type_breakdown(&building()?);
        let types: Vec<RoomType> = breakdown.iter().map(|b| b.room_type).collect();
        assert_eq!(
            types,
            vec![RoomType::Kitchen, RoomType::Office, RoomType::Storage]
        );
        assert_eq!(breakdown[1].occupancy, 3);
        Ok(())
    }

    #[test]
    fn test_top_performers() -> Result<()> {
        let bdg = building()?;
        let top = top_performers(&bdg, 2);
        assert_eq!(top.len(), 2);
        assert!(top[0].1 >= top[1].1);
        assert!(top.iter().all(|(r, s)| metrics::performance_score(r) == *s));
        Ok(())
    }
}
