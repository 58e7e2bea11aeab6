//! Drive step component state
//!
//! [`DriveSelector`] binds the drive step to the store: it seeds its
//! [`DriveSelectionSlice`] on mount, replaces it on every store
//! notification, and owns the local open/closed state of the drive list
//! modal. Rendering lives in the tui crate and only ever reads
//! [`DriveSelector::view_state`] and [`DriveSelector::target_selector_props`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use flashdeck_core::prelude::*;
use flashdeck_core::{Drive, DriveConstraints};

use crate::analytics::{session_properties, Analytics};
use crate::config::Settings;
use crate::selection::{project, DriveSelectionSlice};
use crate::store::{Store, StoreState, Subscription};

/// Analytics event emitted when the user asks to change the selected drives
pub const RESELECT_DRIVE_EVENT: &str = "Reselect drive";

/// Inputs to the drive step that come from the surrounding wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveStepProps {
    /// A featured-project panel is covering the step area
    pub webview_showing: bool,
    /// No image is selected yet
    pub disabled: bool,
    /// The flash step cannot be entered yet
    pub next_step_disabled: bool,
    pub has_drive: bool,
    pub flashing: bool,
}

impl DriveStepProps {
    /// Derive the step inputs from a store snapshot
    pub fn from_state(state: &StoreState, webview_showing: bool) -> Self {
        Self {
            webview_showing,
            disabled: state.image.is_none(),
            next_step_disabled: !state.has_drive(),
            has_drive: state.has_drive(),
            flashing: state.is_flashing,
        }
    }

    /// The lines joining this step to its neighbours are hidden only while
    /// flashing behind the featured-project panel
    pub fn show_step_connecting_lines(&self) -> bool {
        !self.webview_showing || !self.flashing
    }
}

/// Visibility of the drive list modal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

impl ModalState {
    pub fn is_open(self) -> bool {
        self == ModalState::Open
    }
}

/// Everything the drive step renders from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentViewState {
    pub selection_slice: DriveSelectionSlice,
    pub modal: ModalState,
}

/// Inputs to the target selector surface
#[derive(Clone)]
pub struct TargetSelectorProps {
    /// Offer the "select target" button instead of the selected targets
    pub show: bool,
    pub disabled: bool,
    pub flashing: bool,
    pub tooltip: String,
    pub targets: Vec<Drive>,
    pub constraints: Rc<dyn DriveConstraints>,
}

impl fmt::Debug for TargetSelectorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetSelectorProps")
            .field("show", &self.show)
            .field("disabled", &self.disabled)
            .field("flashing", &self.flashing)
            .field("tooltip", &self.tooltip)
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}

/// Mounted drive step
pub struct DriveSelector {
    store: Store,
    settings: Rc<Settings>,
    constraints: Rc<dyn DriveConstraints>,
    analytics: Rc<dyn Analytics>,
    view: Rc<RefCell<ComponentViewState>>,
    subscription: Subscription,
}

impl fmt::Debug for DriveSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveSelector")
            .field("view", &self.view.borrow())
            .field("subscription", &self.subscription)
            .finish_non_exhaustive()
    }
}

impl DriveSelector {
    /// Project the initial slice and start listening to the store.
    ///
    /// Fails with [`Error::StoreClosed`] when the store no longer accepts
    /// listeners.
    pub fn mount(
        store: &Store,
        settings: Rc<Settings>,
        constraints: Rc<dyn DriveConstraints>,
        analytics: Rc<dyn Analytics>,
    ) -> Result<Self> {
        let view = Rc::new(RefCell::new(ComponentViewState {
            selection_slice: project(&store.get_state(), &settings),
            modal: ModalState::Closed,
        }));

        let weak_view = Rc::downgrade(&view);
        let weak_store = store.downgrade();
        let listener_settings = Rc::clone(&settings);
        let subscription = store.observe(move |state| {
            let Some(view) = weak_view.upgrade() else {
                return;
            };
            // Read back the latest snapshot in case another listener
            // dispatched while this notification was in flight
            let latest = weak_store
                .upgrade()
                .map_or_else(|| Rc::clone(state), |store| store.get_state());
            view.borrow_mut().selection_slice = project(&latest, &listener_settings);
        })?;

        debug!("Drive selector mounted");
        Ok(Self {
            store: store.clone(),
            settings,
            constraints,
            analytics,
            view,
            subscription,
        })
    }

    /// Stop listening to the store
    pub fn unmount(self) {
        debug!("Drive selector unmounted ({:?})", self.subscription);
    }

    pub fn view_state(&self) -> ComponentViewState {
        self.view.borrow().clone()
    }

    pub fn slice(&self) -> DriveSelectionSlice {
        self.view.borrow().selection_slice.clone()
    }

    pub fn modal(&self) -> ModalState {
        self.view.borrow().modal
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn constraints(&self) -> Rc<dyn DriveConstraints> {
        Rc::clone(&self.constraints)
    }

    /// Build the target selector inputs from the latest slice
    pub fn target_selector_props(&self, props: &DriveStepProps) -> TargetSelectorProps {
        let view = self.view.borrow();
        let slice = &view.selection_slice;
        TargetSelectorProps {
            show: !props.has_drive && slice.show_drives_button,
            disabled: props.disabled,
            flashing: props.flashing,
            tooltip: slice.drive_list_label.clone(),
            targets: slice.targets.clone(),
            constraints: Rc::clone(&self.constraints),
        }
    }

    /// "Select target" was activated
    pub fn open_selector(&self) {
        self.set_modal(ModalState::Open);
    }

    /// "Change" was activated on the selected targets.
    ///
    /// Logs the reselect event with the current session ids, then opens the
    /// modal.
    pub fn reselect_drive(&self) {
        let properties = session_properties(&self.store.get_state());
        self.analytics.log_event(RESELECT_DRIVE_EVENT, &properties);
        self.set_modal(ModalState::Open);
    }

    pub fn close_modal(&self) {
        self.set_modal(ModalState::Closed);
    }

    fn set_modal(&self, modal: ModalState) {
        let mut view = self.view.borrow_mut();
        if view.modal != modal {
            trace!("Drive list modal {:?} -> {:?}", view.modal, modal);
            view.modal = modal;
        }
    }
}
