//! Dashboard session: the building graph plus everything the user is doing with it.
//!
//! All transitions are synchronous and driven by user events or by explicit
//! frame ticks. The building is only changed through [`Session::update_room`].

pub mod frame;
pub mod loading;

use crate::UID;
use crate::config::DashboardConfig;
use crate::error::LookupError;
use crate::heatmap::HeatmapMode;
use crate::mapping::plan::PlanView;
use crate::mapping::twin::TwinLayout;
use crate::model::building::Building;
use crate::model::floor::Floor;
use crate::model::room::{Room, RoomUpdate};
use crate::notify::{LogNotifier, Notification, Notifier};
use crate::view::{Overlay, View, ViewState};
use frame::{Frame, PlanTile};
use loading::LoadingGate;
use tracing::{debug, info, warn};

/// Floor-plan viewport size used until the renderer reports one.
pub const DEFAULT_VIEWPORT: (f64, f64) = (800.0, 600.0);

pub struct Session<N: Notifier = LogNotifier> {
    building: Building,
    view: ViewState,
    plan: PlanView,
    layout: TwinLayout,
    loading: LoadingGate,
    viewport: (f64, f64),
    config: DashboardConfig,
    notifier: N,
}

impl Session<LogNotifier> {
    pub fn with_log_notifier(building: Building, config: DashboardConfig) -> Self {
        Self::new(building, config, LogNotifier)
    }
}

impl<N: Notifier> Session<N> {
    pub fn new(building: Building, config: DashboardConfig, notifier: N) -> Self {
        info!(
            building = %building.name,
            floors = building.floors().len(),
            rooms = building.room_count(),
            "Session started"
        );
        Self {
            building,
            view: ViewState::new(),
            plan: PlanView::new(config.plan.clone()),
            layout: TwinLayout::new(config.twin.clone()),
            loading: LoadingGate::new(config.loading_delay_secs),
            viewport: DEFAULT_VIEWPORT,
            config,
            notifier,
        }
    }

    pub fn building(&self) -> &Building {
        &self.building
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn plan(&self) -> &PlanView {
        &self.plan
    }

    pub fn layout(&self) -> &TwinLayout {
        &self.layout
    }

    pub fn loading(&self) -> &LoadingGate {
        &self.loading
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn set_view(&mut self, view: View) {
        debug!(?view, "View changed");
        self.view.set_view(view);
    }

    pub fn set_heatmap_mode(&mut self, mode: HeatmapMode) {
        debug!(%mode, "Heatmap mode changed");
        self.view.set_heatmap_mode(mode);
    }

    pub fn toggle(&mut self, overlay: Overlay) -> bool {
        let on = self.view.toggle(overlay);
        debug!(?overlay, on, "Overlay toggled");
        on
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    pub fn selected_floor(&self) -> Option<&Floor> {
        let id = self.view.selected_floor()?;
        self.building.floor(id).ok()
    }

    pub fn selected_room(&self) -> Option<&Room> {
        let floor = self.selected_floor()?;
        floor.room(self.view.selected_room()?)
    }

    /// Selects a floor, clearing the room selection and recentering the floor plan.
    pub fn select_floor(&mut self, floor_id: &UID) -> Result<(), LookupError> {
        let floor = self.building.floor(floor_id).inspect_err(|e| {
            warn!("{}", e);
        })?;
        self.plan.recenter(floor, self.viewport);
        self.view.select_floor(floor_id.clone());
        debug!(floor = %floor_id, "Floor selected");
        Ok(())
    }

    /// Selects a room and opens its details. Selecting a room on another
    /// floor switches to that floor first.
    pub fn select_room(&mut self, floor_id: &UID, room_id: &UID) -> Result<(), LookupError> {
        self.building.room(floor_id, room_id).inspect_err(|e| {
            warn!("{}", e);
        })?;
        if self.view.selected_floor() != Some(floor_id) {
            self.select_floor(floor_id)?;
        }
        self.view.select_room(room_id.clone());
        debug!(floor = %floor_id, room = %room_id, "Room selected");
        Ok(())
    }

    pub fn close_details(&mut self) {
        self.view.close_details();
    }

    /// Hover reported by the renderer as a `(floor, room)` pair.
    pub fn hover(&mut self, hovered: Option<(UID, UID)>) {
        self.view.set_hovered(hovered);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.plan.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if self.plan.pointer_move(x, y) {
            return true;
        }
        let hovered = self.selected_floor().and_then(|f| {
            self.plan
                .room_at(f, x, y)
                .map(|r| (f.id.clone(), r.id.clone()))
        });
        self.view.set_hovered(hovered);
        false
    }

    pub fn pointer_up(&mut self) {
        self.plan.pointer_up();
    }

    pub fn pointer_leave(&mut self) {
        self.plan.pointer_leave();
        self.view.set_hovered(None);
    }

    pub fn wheel(&mut self, delta: f64) {
        self.plan.zoom_by(delta);
    }

    /// Selects the room under a floor-plan screen point. Returns its id.
    pub fn click(&mut self, x: f64, y: f64) -> Option<UID> {
        let floor = self.selected_floor()?;
        let floor_id = floor.id.clone();
        let room_id = self.plan.room_at(floor, x, y)?.id.clone();
        self.select_room(&floor_id, &room_id).ok()?;
        Some(room_id)
    }

    /// The single entry point for changing the building.
    pub fn update_room(
        &mut self,
        floor_id: &UID,
        room_id: &UID,
        update: &RoomUpdate,
    ) -> Result<&Room, LookupError> {
        match self.building.update_room(floor_id, room_id, update) {
            Ok(room) => {
                info!(floor = %floor_id, room = %room_id, "Room updated");
                Ok(room)
            }
            Err(e) => {
                warn!("Room update failed: {}", e);
                Err(e)
            }
        }
    }

    /// Saves the details surface: updates the selected room and raises a notification.
    pub fn save_room_settings(&mut self, update: &RoomUpdate) -> Result<&Room, LookupError> {
        let (Some(floor_id), Some(room_id)) = (
            self.view.selected_floor().cloned(),
            self.view.selected_room().cloned(),
        ) else {
            self.notifier.notify(Notification::error(
                "Settings not saved",
                "Select a room first",
            ));
            return Err(LookupError::NoSelection);
        };
        let result = self
            .building
            .update_room(&floor_id, &room_id, update)
            .map(|r| r.name.clone());
        match result {
            Ok(name) => {
                info!(room = %room_id, "Room settings saved");
                self.notifier.notify(Notification::success(
                    "Settings saved",
                    &format!("{} has been updated", name),
                ));
                self.building.room(&floor_id, &room_id)
            }
            Err(e) => {
                warn!("Room settings not saved: {}", e);
                self.notifier
                    .notify(Notification::error("Settings not saved", &e.to_string()));
                Err(e)
            }
        }
    }

    /// Advances the startup loading gate. Returns `true` when it fires.
    pub fn tick_loading(&mut self, dt: f64) -> bool {
        let fired = self.loading.tick(dt);
        if fired {
            info!("Digital twin ready");
        }
        fired
    }

    /// The digital-twin view went away.
    pub fn unmount(&mut self) {
        self.loading.cancel();
    }

    /// Render state for one frame, or `None` while loading.
    pub fn frame(&self, elapsed: f64) -> Option<Frame> {
        if !self.loading.is_ready() {
            return None;
        }
        Some(frame::twin_frame(
            &self.building,
            &self.view,
            &self.layout,
            &self.config.heatmap,
            elapsed,
        ))
    }

    /// Floor-plan tiles of the selected floor.
    pub fn plan_tiles(&self) -> Vec<PlanTile> {
        match self.selected_floor() {
            Some(floor) => frame::plan_tiles(floor, &self.view, &self.plan, &self.config.heatmap),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::rect::Rect;
    use crate::model::room::RoomType;
    use crate::notify::NotificationLevel;
    use anyhow::Result;
    use std::sync::Arc;

    fn building() -> Result<Building> {
        let ground = Floor::new(
            "f0",
            "Ground",
            0,
            400.,
            200.,
            vec![
                Room::new(
                    "k",
                    "Kitchen",
                    RoomType::Kitchen,
                    Rect::new(0., 0., 200., 200.),
                    10,
                    22.,
                ),
                Room::new(
                    "m",
                    "Boardroom",
                    RoomType::MeetingRoom,
                    Rect::new(200., 0., 200., 200.),
                    8,
                    21.,
                ),
            ],
        )?;
        let first = Floor::new(
            "f1",
            "First",
            1,
            400.,
            200.,
            vec![Room::new(
                "o",
                "Office",
                RoomType::Office,
                Rect::new(0., 0., 400., 200.),
                20,
                21.,
            )],
        )?;
        Building::new("b", "HQ", "", vec![ground, first])
    }

    fn session() -> Result<Session<Vec<Notification>>> {
        Ok(Session::new(building()?, DashboardConfig::new(), Vec::new()))
    }

    #[test]
    fn test_select_floor_recenters_plan() -> Result<()> {
        let mut s = session()?;
        s.wheel(-500.0);
        s.select_floor(&UID::from("f0"))?;
        assert_eq!(s.plan().zoom(), 1.0);
        assert_eq!(s.plan().pan(), (200., 200.));
        assert!(s.select_floor(&UID::from("nope")).is_err());
        assert_eq!(s.view().selected_floor(), Some(&UID::from("f0")));
        Ok(())
    }

    #[test]
    fn test_floor_switch_clears_room() -> Result<()> {
        let mut s = session()?;
        s.select_floor(&UID::from("f0"))?;
        s.select_room(&UID::from("f0"), &UID::from("k"))?;
        assert_eq!(s.selected_room().map(|r| r.name.as_str()), Some("Kitchen"));
        s.select_floor(&UID::from("f1"))?;
        assert!(s.selected_room().is_none());
        assert!(!s.view().is_details_open());
        Ok(())
    }

    #[test]
    fn test_select_room_on_other_floor() -> Result<()> {
        let mut s = session()?;
        s.select_floor(&UID::from("f0"))?;
        s.select_room(&UID::from("f1"), &UID::from("o"))?;
        assert_eq!(s.view().selected_floor(), Some(&UID::from("f1")));
        assert_eq!(s.view().selected_room(), Some(&UID::from("o")));
        assert!(s.select_room(&UID::from("f1"), &UID::from("k")).is_err());
        assert_eq!(s.view().selected_room(), Some(&UID::from("o")));
        Ok(())
    }

    #[test]
    fn test_click_and_hover() -> Result<()> {
        let mut s = session()?;
        s.select_floor(&UID::from("f0"))?;
        // Floor is centered at pan (200, 200); the boardroom starts at screen x 400
        assert!(!s.pointer_move(450., 250.));
        assert_eq!(s.view().hovered_room(), Some(&UID::from("m")));
        assert_eq!(s.click(450., 250.), Some(UID::from("m")));
        assert!(s.view().is_details_open());
        assert_eq!(s.click(10., 10.), None);
        s.pointer_leave();
        assert_eq!(s.view().hovered_room(), None);
        Ok(())
    }

    #[test]
    fn test_drag_pans_plan() -> Result<()> {
        let mut s = session()?;
        s.select_floor(&UID::from("f0"))?;
        s.pointer_down(0., 0.);
        assert!(s.pointer_move(10., 20.));
        s.pointer_up();
        assert_eq!(s.plan().pan(), (210., 220.));
        Ok(())
    }

    #[test]
    fn test_save_room_settings_notifies() -> Result<()> {
        let mut s = session()?;
        let update = RoomUpdate {
            occupancy: Some(4),
            ..Default::default()
        };
        assert_eq!(s.save_room_settings(&update).unwrap_err(), LookupError::NoSelection);

        s.select_room(&UID::from("f0"), &UID::from("k"))?;
        let room = s.save_room_settings(&update)?;
        assert_eq!(room.occupancy, 4);

        let sent = s.notifier();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].level, NotificationLevel::Error);
        assert_eq!(sent[1].level, NotificationLevel::Success);
        assert_eq!(sent[1].message, "Kitchen has been updated");
        Ok(())
    }

    #[test]
    fn test_failed_update_keeps_floors() -> Result<()> {
        let mut s = session()?;
        let before: Vec<Arc<Floor>> = s.building().floors().to_vec();
        let update = RoomUpdate {
            temperature: Some(30.0),
            ..Default::default()
        };
        assert!(s.update_room(&UID::from("x"), &UID::from("y"), &update).is_err());
        for (a, b) in before.iter().zip(s.building().floors()) {
            assert!(Arc::ptr_eq(a, b));
        }
        Ok(())
    }

    #[test]
    fn test_loading_gate_and_frames() -> Result<()> {
        let mut s = session()?;
        assert!(s.frame(0.0).is_none());
        assert!(!s.tick_loading(1.0));
        assert!(s.tick_loading(1.0));
        let frame = s.frame(0.0).unwrap();
        assert_eq!(frame.rooms.len(), 3);
        assert_eq!(frame.slabs.len(), 2);
        Ok(())
    }

    #[test]
    fn test_unmount_before_ready() -> Result<()> {
        let mut s = session()?;
        s.unmount();
        assert!(!s.tick_loading(5.0));
        assert!(s.frame(0.0).is_none());
        Ok(())
    }

    #[test]
    fn test_plan_tiles_follow_selection() -> Result<()> {
        let mut s = session()?;
        assert!(s.plan_tiles().is_empty());
        s.select_floor(&UID::from("f0"))?;
        s.set_heatmap_mode(HeatmapMode::Energy);
        s.toggle(Overlay::Labels);
        let tiles = s.plan_tiles();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|t| t.label.is_none()));
        assert_eq!(tiles[0].screen, Rect::new(200., 200., 200., 200.));
        Ok(())
    }
}
