//! JSON seed format.
//!
//! Every load validates the building and refreshes the rooms' denormalized
//! floor names, so a seed never needs to repeat them.

use crate::model::building::Building;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// Built-in demo building: three floors of offices, meeting rooms and amenities.
const DEMO_SEED: &str = include_str!("../../data/seed.json");

fn finish_load(mut building: Building) -> Result<Building> {
    building.repair_floor_names();
    building
        .validate()
        .with_context(|| format!("Invalid building in seed: {}", building.id))?;
    info!(
        building = %building.name,
        floors = building.floors().len(),
        rooms = building.room_count(),
        "Seed loaded"
    );
    Ok(building)
}

/// Writes a building to a JSON seed file.
pub fn write_seed(path: &Path, building: &Building) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, building)
        .with_context(|| format!("Failed to serialize building to: {}", path.display()))?;

    Ok(())
}

/// Reads and validates a building from a JSON seed file.
pub fn read_seed(path: &Path) -> Result<Building> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let building: Building = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to deserialize building from: {}", path.display()))?;

    finish_load(building)
}

pub fn to_seed_string(building: &Building) -> Result<String> {
    serde_json::to_string_pretty(building).context("Failed to serialize building to string")
}

pub fn from_seed_string(json: &str) -> Result<Building> {
    let building: Building =
        serde_json::from_str(json).context("Failed to deserialize building from string")?;
    finish_load(building)
}

/// Loads the embedded demo building.
pub fn demo_building() -> Result<Building> {
    from_seed_string(DEMO_SEED).context("Built-in demo seed is broken")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UID;
    use crate::model::room::RoomType;
    use tempfile::tempdir;

    #[test]
    fn test_demo_building() -> Result<()> {
        let bdg = demo_building()?;
        assert_eq!(bdg.name, "Harbor View Offices");
        assert_eq!(bdg.floors().len(), 3);
        assert_eq!(bdg.room_count(), 13);

        let kitchen = bdg.room(&UID::from("floor-0"), &UID::from("g-kitchen"))?;
        assert_eq!(kitchen.room_type, RoomType::Kitchen);
        assert_eq!(kitchen.floor_name, "Ground Floor");

        // Unknown type labels fall back to Other
        let server = bdg.room(&UID::from("floor-2"), &UID::from("f2-server"))?;
        assert_eq!(server.room_type, RoomType::Other);
        assert_eq!(server.occupancy, 0);

        let huddle = bdg.room(&UID::from("floor-1"), &UID::from("f1-huddle"))?;
        assert!(huddle.is_over_capacity());
        Ok(())
    }

    #[test]
    fn test_write_and_read_seed() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("seed.json");

        let original = demo_building()?;
        write_seed(&path, &original)?;
        let loaded = read_seed(&path)?;

        assert_eq!(loaded, original);
        Ok(())
    }

    #[test]
    fn test_seed_string_keeps_type_labels() -> Result<()> {
        let json = to_seed_string(&demo_building()?)?;
        assert!(json.contains("\"type\": \"Meeting Room\""));
        assert!(json.contains("\"x\":"));
        Ok(())
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        // Room outside its floor footprint
        let json = r#"{
            "id": "b", "name": "B",
            "floors": [{
                "id": "f", "name": "F", "level": 0, "width": 10, "height": 10,
                "rooms": [{
                    "id": "r", "name": "R", "type": "Office",
                    "x": 5, "y": 5, "width": 10, "height": 10,
                    "capacity": 1, "temperature": 20
                }]
            }]
        }"#;
        assert!(from_seed_string(json).is_err());
        assert!(from_seed_string("not json").is_err());
        assert!(read_seed(Path::new("/nonexistent/seed.json")).is_err());
    }
}
