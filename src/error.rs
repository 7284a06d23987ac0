use crate::UID;
use thiserror::Error;

/// Failure to resolve or update a floor or room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Floor not found: {0}")]
    FloorNotFound(UID),
    #[error("Room not found: {room} (floor {floor})")]
    RoomNotFound { floor: UID, room: UID },
    #[error("No room is selected")]
    NoSelection,
    /// The merged room would break a room invariant; nothing was changed.
    #[error("Invalid update for room {room}: {reason}")]
    InvalidUpdate { room: UID, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = LookupError::FloorNotFound(UID::from("f9"));
        assert_eq!(e.to_string(), "Floor not found: f9");
        let e = LookupError::RoomNotFound {
            floor: UID::from("f1"),
            room: UID::from("r7"),
        };
        assert_eq!(e.to_string(), "Room not found: r7 (floor f1)");
        let e = LookupError::InvalidUpdate {
            room: UID::from("r7"),
            reason: "zero capacity".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid update for room r7: zero capacity");
    }
}
