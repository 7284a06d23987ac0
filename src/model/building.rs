//! Building container - the top level of the hierarchy.
//!
//! Hierarchy: Building → Floor → Room
//!
//! Floors are held behind `Arc` so that a room update only replaces the floor
//! it touches. Snapshots taken before an update keep sharing every other floor.

use crate::HasName;
use crate::UID;
use crate::error::LookupError;
use crate::model::floor::Floor;
use crate::model::room::{Room, RoomUpdate};
use crate::name::{SortByName, contains_ignore_case, validate_name};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: UID,
    pub name: String,
    #[serde(default)]
    pub address: String,
    floors: Vec<Arc<Floor>>,
}

impl HasName for Building {
    fn get_name(&self) -> &str {
        &self.name
    }
}

/// A room matched by [`Building::search_rooms`] together with its floor.
#[derive(Debug, Clone, Copy)]
pub struct RoomHit<'a> {
    pub floor: &'a Floor,
    pub room: &'a Room,
}

impl HasName for RoomHit<'_> {
    fn get_name(&self) -> &str {
        &self.room.name
    }
}

/// Result of a room search. Empty when nothing matches.
#[derive(Debug, Clone)]
pub struct RoomSearch<'a> {
    pub query: String,
    pub hits: Vec<RoomHit<'a>>,
}

impl RoomSearch<'_> {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

impl Building {
    /// Creates a new building with the given floors in display order.
    pub fn new(id: &str, name: &str, address: &str, floors: Vec<Floor>) -> Result<Self> {
        let name = validate_name(name)?;
        let mut ids: HashSet<UID> = HashSet::new();
        let mut levels: HashSet<i32> = HashSet::new();
        for floor in floors.iter() {
            if !ids.insert(floor.id.clone()) {
                return Err(anyhow!(
                    "Floor is already present in Building::new(): {}",
                    floor.id
                ));
            }
            if !levels.insert(floor.level) {
                return Err(anyhow!(
                    "Floor level {} is used more than once in Building::new()",
                    floor.level
                ));
            }
        }
        Ok(Self {
            id: UID::from(id),
            name,
            address: address.to_string(),
            floors: floors.into_iter().map(Arc::new).collect(),
        })
    }

    /// Floors in display order.
    pub fn floors(&self) -> &[Arc<Floor>] {
        &self.floors
    }

    /// Floors sorted ascending by level (bottom to top).
    pub fn floors_by_level(&self) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self.floors.iter().map(|f| f.as_ref()).collect();
        floors.sort_by_key(|f| f.level);
        floors
    }

    /// Position of a floor in the bottom-to-top stacking order.
    pub fn stacking_index(&self, floor_id: &UID) -> Result<usize, LookupError> {
        self.floors_by_level()
            .iter()
            .position(|f| &f.id == floor_id)
            .ok_or_else(|| LookupError::FloorNotFound(floor_id.clone()))
    }

    pub fn floor(&self, floor_id: &UID) -> Result<&Floor, LookupError> {
        self.floors
            .iter()
            .find(|f| &f.id == floor_id)
            .map(|f| f.as_ref())
            .ok_or_else(|| LookupError::FloorNotFound(floor_id.clone()))
    }

    pub fn room(&self, floor_id: &UID, room_id: &UID) -> Result<&Room, LookupError> {
        self.floor(floor_id)?
            .room(room_id)
            .ok_or_else(|| LookupError::RoomNotFound {
                floor: floor_id.clone(),
                room: room_id.clone(),
            })
    }

    /// Iterates over all rooms with their floors, in display order.
    pub fn rooms(&self) -> impl Iterator<Item = (&Floor, &Room)> {
        self.floors
            .iter()
            .flat_map(|f| f.rooms().iter().map(move |r| (f.as_ref(), r)))
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|f| f.rooms().len()).sum()
    }

    /// Applies a partial update to one room.
    ///
    /// The affected floor is replaced by an updated copy; all other floors
    /// keep their `Arc` identity. An update that would leave the room invalid
    /// (empty name, zero capacity, non-finite temperature) is rejected.
    /// On failure nothing changes.
    pub fn update_room(
        &mut self,
        floor_id: &UID,
        room_id: &UID,
        update: &RoomUpdate,
    ) -> Result<&Room, LookupError> {
        let fi = self
            .floors
            .iter()
            .position(|f| &f.id == floor_id)
            .ok_or_else(|| LookupError::FloorNotFound(floor_id.clone()))?;
        let floor = &self.floors[fi];
        let ri = floor
            .room_index(room_id)
            .ok_or_else(|| LookupError::RoomNotFound {
                floor: floor_id.clone(),
                room: room_id.clone(),
            })?;
        let room = floor.rooms()[ri].apply(update);
        room.validate(floor.width, floor.height)
            .map_err(|e| LookupError::InvalidUpdate {
                room: room_id.clone(),
                reason: e.to_string(),
            })?;
        let updated = floor.with_room(ri, room);
        self.floors[fi] = Arc::new(updated);
        Ok(&self.floors[fi].rooms()[ri])
    }

    /// Case-insensitive search over room names, type labels and facility tags.
    ///
    /// A blank query matches nothing. Hits are sorted by room name.
    pub fn search_rooms(&self, query: &str) -> RoomSearch<'_> {
        let q = query.trim();
        let mut hits: Vec<RoomHit<'_>> = if q.is_empty() {
            Vec::new()
        } else {
            self.rooms()
                .filter(|(_, room)| {
                    contains_ignore_case(&room.name, q)
                        || contains_ignore_case(room.room_type.label(), q)
                        || room.facilities.iter().any(|f| contains_ignore_case(f, q))
                })
                .map(|(floor, room)| RoomHit { floor, room })
                .collect()
        };
        hits.as_mut_slice().sort_by_name();
        RoomSearch {
            query: q.to_string(),
            hits,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.floors.iter().map(|f| f.capacity()).sum()
    }

    pub fn occupancy(&self) -> u32 {
        self.floors.iter().map(|f| f.occupancy()).sum()
    }

    /// Validates the structural integrity of the building.
    ///
    /// Checks for:
    /// - Duplicate floor ids and floor levels
    /// - Duplicate room ids within a floor
    /// - Rooms outside their floor footprint, zero capacity, bad reservation times
    pub fn validate(&self) -> Result<()> {
        let mut ids: HashSet<&UID> = HashSet::new();
        let mut levels: HashSet<i32> = HashSet::new();
        for floor in self.floors.iter() {
            if !ids.insert(&floor.id) {
                return Err(anyhow!("Duplicate floor id: {}", floor.id));
            }
            if !levels.insert(floor.level) {
                return Err(anyhow!("Duplicate floor level: {}", floor.level));
            }
            floor.validate()?;
        }
        Ok(())
    }

    /// Re-derives each room's denormalized floor name (after deserialization).
    pub fn repair_floor_names(&mut self) {
        for floor in self.floors.iter_mut() {
            if floor.rooms().iter().any(|r| r.floor_name != floor.name) {
                let mut f = floor.as_ref().clone();
                for i in 0..f.rooms().len() {
                    let room = f.rooms()[i].clone();
                    f = f.with_room(i, room);
                }
                *floor = Arc::new(f);
            }
        }
    }
}
