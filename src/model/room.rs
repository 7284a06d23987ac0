//! Rooms: the leaves of the Building → Floor → Room hierarchy.

use crate::HasName;
use crate::UID;
use crate::geom::rect::Rect;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of room categories.
///
/// Serialized as the human-readable label; unknown labels fall back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    Kitchen,
    MeetingRoom,
    Office,
    Storage,
    Amenity,
    BreakRoom,
    Bathroom,
    Other,
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        RoomType::Kitchen,
        RoomType::MeetingRoom,
        RoomType::Office,
        RoomType::Storage,
        RoomType::Amenity,
        RoomType::BreakRoom,
        RoomType::Bathroom,
        RoomType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoomType::Kitchen => "Kitchen",
            RoomType::MeetingRoom => "Meeting Room",
            RoomType::Office => "Office",
            RoomType::Storage => "Storage",
            RoomType::Amenity => "Amenity",
            RoomType::BreakRoom => "Break Room",
            RoomType::Bathroom => "Bathroom",
            RoomType::Other => "Other",
        }
    }

    /// Parses a label, ignoring case and separators (`"meeting_room"`,
    /// `"Meeting Room"` and `"MeetingRoom"` are the same type).
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "kitchen" => RoomType::Kitchen,
            "meetingroom" | "meeting" | "conference" => RoomType::MeetingRoom,
            "office" => RoomType::Office,
            "storage" => RoomType::Storage,
            "amenity" => RoomType::Amenity,
            "breakroom" => RoomType::BreakRoom,
            "bathroom" | "restroom" => RoomType::Bathroom,
            _ => RoomType::Other,
        }
    }
}

impl From<String> for RoomType {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<RoomType> for String {
    fn from(value: RoomType) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// A booking of a room for part of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub title: String,
    /// Start time as `HH:MM` (24h).
    pub start: String,
    pub duration_minutes: u32,
}

impl Reservation {
    pub fn new(title: &str, start: &str, duration_minutes: u32) -> Result<Self> {
        let r = Self {
            title: title.to_string(),
            start: start.to_string(),
            duration_minutes,
        };
        r.start_minute()?;
        Ok(r)
    }

    /// Minutes since midnight at which the reservation starts.
    pub fn start_minute(&self) -> Result<u32> {
        let (h, m) = self
            .start
            .split_once(':')
            .ok_or_else(|| anyhow!("Invalid reservation time: {}", self.start))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid reservation hour: {}", self.start))?;
        let m: u32 = m
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid reservation minute: {}", self.start))?;
        if h > 23 || m > 59 {
            return Err(anyhow!("Reservation time out of range: {}", self.start));
        }
        Ok(h * 60 + m)
    }

    /// Checks whether the reservation covers the given minute of the day.
    pub fn is_active_at(&self, minute_of_day: u32) -> bool {
        match self.start_minute() {
            Ok(start) => minute_of_day >= start && minute_of_day < start + self.duration_minutes,
            Err(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: UID,
    pub name: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    /// Position and size in the floor-local coordinate space.
    #[serde(flatten)]
    pub bounds: Rect,
    pub capacity: u32,
    #[serde(default)]
    pub occupancy: u32,
    /// Stored temperature in °C.
    pub temperature: f64,
    #[serde(default)]
    pub activity: ActivityLevel,
    #[serde(default)]
    pub facilities: BTreeSet<String>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Name of the owning floor (denormalized, refreshed by `Floor::new`).
    #[serde(default)]
    pub floor_name: String,
}

impl HasName for Room {
    fn get_name(&self) -> &str {
        &self.name
    }
}

/// Fields of a room that may be changed after construction.
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomUpdate {
    pub name: Option<String>,
    pub room_type: Option<RoomType>,
    pub capacity: Option<u32>,
    pub occupancy: Option<u32>,
    pub temperature: Option<f64>,
    pub activity: Option<ActivityLevel>,
    pub facilities: Option<BTreeSet<String>>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<String>>,
}

impl RoomUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Room {
    /// Creates a room with default metadata (no facilities, reservations or notes).
    pub fn new(
        id: &str,
        name: &str,
        room_type: RoomType,
        bounds: Rect,
        capacity: u32,
        temperature: f64,
    ) -> Self {
        Self {
            id: UID::from(id),
            name: name.to_string(),
            room_type,
            bounds,
            capacity,
            occupancy: 0,
            temperature,
            activity: ActivityLevel::Low,
            facilities: BTreeSet::new(),
            reservations: Vec::new(),
            notes: None,
            floor_name: String::new(),
        }
    }

    pub fn with_occupancy(mut self, occupancy: u32) -> Self {
        self.occupancy = occupancy;
        self
    }

    pub fn with_facilities(mut self, facilities: &[&str]) -> Self {
        self.facilities = facilities.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Occupancy over capacity; `0.0` for a zero-capacity room.
    pub fn occupancy_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.occupancy as f64 / self.capacity as f64
        }
    }

    /// Occupancy above capacity is accepted and reported here rather than rejected.
    pub fn is_over_capacity(&self) -> bool {
        self.occupancy > self.capacity
    }

    pub fn has_maintenance_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    pub fn is_reserved_at(&self, minute_of_day: u32) -> bool {
        self.reservations.iter().any(|r| r.is_active_at(minute_of_day))
    }

    /// Merges an update into a copy of this room.
    pub fn apply(&self, update: &RoomUpdate) -> Room {
        let mut room = self.clone();
        if let Some(name) = &update.name {
            room.name = name.clone();
        }
        if let Some(room_type) = update.room_type {
            room.room_type = room_type;
        }
        if let Some(capacity) = update.capacity {
            room.capacity = capacity;
        }
        if let Some(occupancy) = update.occupancy {
            room.occupancy = occupancy;
        }
        if let Some(temperature) = update.temperature {
            room.temperature = temperature;
        }
        if let Some(activity) = update.activity {
            room.activity = activity;
        }
        if let Some(facilities) = &update.facilities {
            room.facilities = facilities.clone();
        }
        if let Some(notes) = &update.notes {
            room.notes = notes.clone();
        }
        room
    }

    /// Checks the room's own invariants against its floor footprint.
    pub fn validate(&self, floor_width: f64, floor_height: f64) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(anyhow!("Room '{}' has an empty name", self.id));
        }
        if self.capacity == 0 {
            return Err(anyhow!("Room '{}' has zero capacity", self.id));
        }
        if !self.temperature.is_finite() {
            return Err(anyhow!("Room '{}' has a non-finite temperature", self.id));
        }
        if !self.bounds.fits_within(floor_width, floor_height) {
            return Err(anyhow!(
                "Room '{}' ({}, {}, {}x{}) does not fit the floor footprint {}x{}",
                self.id,
                self.bounds.x,
                self.bounds.y,
                self.bounds.width,
                self.bounds.height,
                floor_width,
                floor_height
            ));
        }
        for r in self.reservations.iter() {
            r.start_minute()?;
        }
        Ok(())
    }
}

/// Converts °C to °F for display.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}
