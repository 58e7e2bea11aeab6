//! Application state (Model in TEA pattern)

use std::rc::Rc;

use flashdeck_core::prelude::*;
use flashdeck_core::{DriveConstraints, SourceImage, StandardConstraints};

use crate::analytics::Analytics;
use crate::config::Settings;
use crate::drive_list::{self, DriveListState, DriveRow};
use crate::drive_selector::{DriveSelector, DriveStepProps, ModalState};
use crate::drive_source::DriveSource;
use crate::store::{Action, Store};

/// Whether the main loop keeps running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub store: Store,
    pub settings: Rc<Settings>,
    pub drive_selector: DriveSelector,
    /// Cursor of the drive list modal
    pub drive_list: DriveListState,
    /// Where drives come from; `None` when nothing feeds the store
    pub drive_source: Option<DriveSource>,
    /// Last recoverable error, shown in the status line
    pub last_error: Option<String>,
}

impl AppState {
    /// Build the store from the settings and mount the drive step
    pub fn new(settings: Rc<Settings>, analytics: Rc<dyn Analytics>) -> Result<Self> {
        let constraints: Rc<dyn DriveConstraints> = Rc::new(StandardConstraints::new(
            settings.drives.allow_system_drives,
        ));
        let store = Store::builder()
            .constraints(Rc::clone(&constraints))
            .auto_select(settings.drives.auto_select_single_drive)
            .build();
        Self::with_store(store, settings, constraints, analytics)
    }

    /// Mount the drive step on an existing store
    pub fn with_store(
        store: Store,
        settings: Rc<Settings>,
        constraints: Rc<dyn DriveConstraints>,
        analytics: Rc<dyn Analytics>,
    ) -> Result<Self> {
        let drive_selector =
            DriveSelector::mount(&store, Rc::clone(&settings), constraints, analytics)?;
        Ok(Self {
            phase: AppPhase::Running,
            store,
            settings,
            drive_selector,
            drive_list: DriveListState::default(),
            drive_source: None,
            last_error: None,
        })
    }

    pub fn with_drive_source(mut self, source: DriveSource) -> Self {
        self.drive_source = Some(source);
        self
    }

    /// Select the image to flash
    pub fn select_image(&mut self, image: SourceImage) -> Result<()> {
        info!("Selected image {}", image.path.display());
        self.store.dispatch(Action::SelectImage(image))
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Inputs to the drive step, read from the current snapshot
    pub fn step_props(&self) -> DriveStepProps {
        DriveStepProps::from_state(&self.store.get_state(), self.settings.ui.webview_showing)
    }

    pub fn modal(&self) -> ModalState {
        self.drive_selector.modal()
    }

    /// Rows of the drive list modal
    pub fn drive_rows(&self) -> Vec<DriveRow> {
        drive_list::rows(
            &self.store.get_state(),
            self.drive_selector.constraints().as_ref(),
        )
    }

    /// Unmount the drive step and close the store
    pub fn shutdown(self) {
        self.drive_selector.unmount();
        self.store.close();
        debug!("Application state shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::NoopAnalytics;
    use flashdeck_core::Drive;

    #[test]
    fn test_new_state_is_running_with_closed_modal() {
        let state = AppState::new(Rc::new(Settings::default()), Rc::new(NoopAnalytics)).unwrap();

        assert!(!state.should_quit());
        assert_eq!(state.modal(), ModalState::Closed);
        assert_eq!(state.store.listener_count(), 1);
    }

    #[test]
    fn test_step_props_follow_store() {
        let mut state =
            AppState::new(Rc::new(Settings::default()), Rc::new(NoopAnalytics)).unwrap();
        assert!(state.step_props().disabled);

        state
            .select_image(SourceImage::new("/tmp/os.img", 1_000))
            .unwrap();

        let props = state.step_props();
        assert!(!props.disabled);
        assert!(props.next_step_disabled);
        assert!(!props.has_drive);
    }

    #[test]
    fn test_auto_select_follows_settings() {
        let mut settings = Settings::default();
        settings.drives.auto_select_single_drive = false;
        let state = AppState::new(Rc::new(settings), Rc::new(NoopAnalytics)).unwrap();

        state
            .store
            .dispatch(Action::SetAvailableDrives(vec![Drive::new(
                "/dev/sdb", "SanDisk", "/dev/sdb",
            )]))
            .unwrap();

        assert!(!state.step_props().has_drive);
    }

    #[test]
    fn test_shutdown_releases_listeners() {
        let state = AppState::new(Rc::new(Settings::default()), Rc::new(NoopAnalytics)).unwrap();
        let store = state.store.clone();

        state.shutdown();

        assert_eq!(store.listener_count(), 0);
        assert!(store.is_closed());
    }
}
