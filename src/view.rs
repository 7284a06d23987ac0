//! Navigation and interaction state.
//!
//! Selection is a single path building → floor → room. Selecting a floor drops
//! the room selection; selecting a room opens the details surface; closing the
//! details clears the room and keeps the floor.

use crate::UID;
use crate::heatmap::HeatmapMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Floors,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    Labels,
    Sensors,
    Walls,
    Animation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlays {
    pub labels: bool,
    pub sensors: bool,
    pub walls: bool,
    pub animation: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            labels: true,
            sensors: false,
            walls: true,
            animation: true,
        }
    }
}

impl Overlays {
    pub fn is_on(&self, overlay: Overlay) -> bool {
        match overlay {
            Overlay::Labels => self.labels,
            Overlay::Sensors => self.sensors,
            Overlay::Walls => self.walls,
            Overlay::Animation => self.animation,
        }
    }

    fn flag_mut(&mut self, overlay: Overlay) -> &mut bool {
        match overlay {
            Overlay::Labels => &mut self.labels,
            Overlay::Sensors => &mut self.sensors,
            Overlay::Walls => &mut self.walls,
            Overlay::Animation => &mut self.animation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub view: View,
    selected_floor: Option<UID>,
    selected_room: Option<UID>,
    details_open: bool,
    /// Hovered room with its floor; room ids are only unique within a floor.
    hovered: Option<(UID, UID)>,
    pub heatmap_mode: HeatmapMode,
    pub overlays: Overlays,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_floor(&self) -> Option<&UID> {
        self.selected_floor.as_ref()
    }

    pub fn selected_room(&self) -> Option<&UID> {
        self.selected_room.as_ref()
    }

    pub fn hovered_room(&self) -> Option<&UID> {
        self.hovered.as_ref().map(|(_, room)| room)
    }

    pub fn is_details_open(&self) -> bool {
        self.details_open
    }

    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Selects a floor. Any room selection and hover is cleared, even when
    /// the same floor is selected again.
    pub fn select_floor(&mut self, floor_id: UID) {
        self.selected_floor = Some(floor_id);
        self.selected_room = None;
        self.hovered = None;
        self.details_open = false;
    }

    /// Selects a room on the current floor and opens its details.
    pub fn select_room(&mut self, room_id: UID) {
        self.selected_room = Some(room_id);
        self.details_open = true;
    }

    /// Closes the details surface, clearing the room but keeping the floor.
    pub fn close_details(&mut self) {
        self.details_open = false;
        self.selected_room = None;
    }

    /// Clears the whole selection path.
    pub fn clear_selection(&mut self) {
        self.selected_floor = None;
        self.close_details();
    }

    /// Sets the hovered room as a `(floor, room)` pair.
    pub fn set_hovered(&mut self, hovered: Option<(UID, UID)>) {
        self.hovered = hovered;
    }

    pub fn set_heatmap_mode(&mut self, mode: HeatmapMode) {
        self.heatmap_mode = mode;
    }

    /// Flips an overlay and returns its new state.
    pub fn toggle(&mut self, overlay: Overlay) -> bool {
        let flag = self.overlays.flag_mut(overlay);
        *flag = !*flag;
        *flag
    }

    pub fn is_room_selected(&self, room_id: &UID) -> bool {
        self.selected_room.as_ref() == Some(room_id)
    }

    pub fn is_room_hovered(&self, floor_id: &UID, room_id: &UID) -> bool {
        matches!(&self.hovered, Some((f, r)) if f == floor_id && r == room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_switch_clears_room() {
        let mut state = ViewState::new();
        state.select_floor(UID::from("f1"));
        state.select_room(UID::from("r1"));
        assert_eq!(state.selected_room(), Some(&UID::from("r1")));
        assert!(state.is_details_open());

        state.select_floor(UID::from("f2"));
        assert_eq!(state.selected_floor(), Some(&UID::from("f2")));
        assert_eq!(state.selected_room(), None);
        assert!(!state.is_details_open());
    }

    #[test]
    fn test_close_details_keeps_floor() {
        let mut state = ViewState::new();
        state.select_floor(UID::from("f1"));
        state.select_room(UID::from("r1"));
        state.close_details();
        assert_eq!(state.selected_room(), None);
        assert_eq!(state.selected_floor(), Some(&UID::from("f1")));
    }

    #[test]
    fn test_clear_selection() {
        let mut state = ViewState::new();
        state.select_floor(UID::from("f1"));
        state.select_room(UID::from("r1"));
        state.clear_selection();
        assert_eq!(state.selected_floor(), None);
        assert_eq!(state.selected_room(), None);
    }

    #[test]
    fn test_toggle_overlays() {
        let mut state = ViewState::new();
        assert!(state.overlays.is_on(Overlay::Labels));
        assert!(!state.toggle(Overlay::Labels));
        assert!(!state.overlays.is_on(Overlay::Labels));
        assert!(state.toggle(Overlay::Sensors));
        assert!(state.overlays.sensors);
    }

    #[test]
    fn test_hover_and_mode() {
        let mut state = ViewState::new();
        state.set_hovered(Some((UID::from("f1"), UID::from("r2"))));
        assert!(state.is_room_hovered(&UID::from("f1"), &UID::from("r2")));
        assert!(!state.is_room_hovered(&UID::from("f2"), &UID::from("r2")));
        assert_eq!(state.hovered_room(), Some(&UID::from("r2")));
        state.set_heatmap_mode(HeatmapMode::Energy);
        assert_eq!(state.heatmap_mode, HeatmapMode::Energy);
        state.select_floor(UID::from("f1"));
        assert_eq!(state.hovered_room(), None);
        state.set_view(View::Analytics);
        assert_eq!(state.view, View::Analytics);
    }
}
