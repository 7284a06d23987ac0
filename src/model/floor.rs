//! Floor container for grouping rooms.
//!
//! A Floor is the intermediate level in the hierarchy:
//! Building → Floor → Room

use crate::HasName;
use crate::UID;
use crate::model::room::Room;
use crate::name::validate_name;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: UID,
    pub name: String,
    /// Vertical stacking level, unique within a building.
    pub level: i32,
    /// Footprint width in floor units.
    pub width: f64,
    /// Footprint height (depth) in floor units.
    pub height: f64,
    rooms: Vec<Room>,
}

impl HasName for Floor {
    fn get_name(&self) -> &str {
        &self.name
    }
}

impl Floor {
    /// Creates a floor, rejecting duplicate room ids.
    ///
    /// Each room's denormalized `floor_name` is set to this floor's name.
    pub fn new(
        id: &str,
        name: &str,
        level: i32,
        width: f64,
        height: f64,
        mut rooms: Vec<Room>,
    ) -> Result<Self> {
        let name = validate_name(name)?;
        let mut ids: HashSet<&UID> = HashSet::new();
        for room in rooms.iter() {
            if !ids.insert(&room.id) {
                return Err(anyhow!(
                    "Room is already present in Floor::new(): {}",
                    room.id
                ));
            }
        }
        for room in rooms.iter_mut() {
            room.floor_name = name.clone();
        }
        Ok(Self {
            id: UID::from(id),
            name,
            level,
            width,
            height,
            rooms,
        })
    }

    /// Rooms in display order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn room(&self, id: &UID) -> Option<&Room> {
        self.rooms.iter().find(|r| &r.id == id)
    }

    pub fn room_index(&self, id: &UID) -> Option<usize> {
        self.rooms.iter().position(|r| &r.id == id)
    }

    /// Returns the room containing the floor-local point, if any.
    ///
    /// Later rooms win where rectangles overlap, matching paint order.
    pub fn room_at(&self, x: f64, y: f64) -> Option<&Room> {
        self.rooms.iter().rev().find(|r| r.bounds.contains(x, y))
    }

    /// Returns a copy of this floor with the room at `index` replaced.
    pub(crate) fn with_room(&self, index: usize, mut room: Room) -> Floor {
        let mut floor = self.clone();
        room.floor_name = floor.name.clone();
        floor.rooms[index] = room;
        floor
    }

    pub fn capacity(&self) -> u32 {
        self.rooms.iter().map(|r| r.capacity).sum()
    }

    pub fn occupancy(&self) -> u32 {
        self.rooms.iter().map(|r| r.occupancy).sum()
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Validates footprint, room ids and room placement.
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0. && self.height > 0.) {
            return Err(anyhow!(
                "Floor '{}' has a degenerate footprint {}x{}",
                self.id,
                self.width,
                self.height
            ));
        }
        let mut ids: HashSet<&UID> = HashSet::new();
        for room in self.rooms.iter() {
            if !ids.insert(&room.id) {
                return Err(anyhow!(
                    "Duplicate room id '{}' on floor '{}'",
                    room.id,
                    self.id
                ));
            }
            room.validate(self.width, self.height)?;
        }
        Ok(())
    }
}
