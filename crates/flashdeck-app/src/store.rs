//! Observable application store
//!
//! The [`Store`] is the single source of truth for drive selection. It holds
//! an immutable [`StoreState`] snapshot behind an `Rc`; every [`Action`]
//! produces a new snapshot and, when anything changed, notifies listeners
//! registered with [`Store::observe`].
//!
//! The store is single-threaded. Handles are cheap `Rc` clones and all
//! dispatches and notifications happen on the UI loop, one at a time.
//!
//! Listeners are held until their [`Subscription`] guard is dropped. A
//! listener removed while a notification is in flight still receives that
//! notification, but none after it.
//!
//! A listener may dispatch while being notified. The nested change is
//! delivered to every listener first, and the outer notification stops
//! there, so no listener ever sees an older snapshot after a newer one.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use flashdeck_core::prelude::*;
use flashdeck_core::{Drive, DriveConstraints, SourceImage};
use uuid::Uuid;

/// Identifiers attached to analytics events
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIds {
    /// Stable for the lifetime of the process
    pub application_session_uuid: String,
    /// Regenerated every time the flash state is reset
    pub flashing_workflow_uuid: String,
}

impl SessionIds {
    pub fn generate() -> Self {
        Self {
            application_session_uuid: Uuid::new_v4().to_string(),
            flashing_workflow_uuid: Uuid::new_v4().to_string(),
        }
    }
}

/// Immutable snapshot of the store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub available_drives: Vec<Drive>,
    /// Selected device ids, in the order they were selected
    pub selected_devices: Vec<String>,
    pub image: Option<SourceImage>,
    pub is_flashing: bool,
    pub session: SessionIds,
}

impl StoreState {
    fn new(session: SessionIds) -> Self {
        Self {
            available_drives: Vec::new(),
            selected_devices: Vec::new(),
            image: None,
            is_flashing: false,
            session,
        }
    }

    pub fn get_drive(&self, device: &str) -> Option<&Drive> {
        self.available_drives.iter().find(|d| d.device == device)
    }

    /// Selected drives in selection order
    pub fn selected_drives(&self) -> Vec<Drive> {
        self.selected_devices
            .iter()
            .filter_map(|device| self.get_drive(device).cloned())
            .collect()
    }

    pub fn has_drive(&self) -> bool {
        !self.selected_devices.is_empty()
    }

    pub fn is_drive_selected(&self, device: &str) -> bool {
        self.selected_devices.iter().any(|d| d == device)
    }
}

/// State transitions understood by the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the list of connected drives
    SetAvailableDrives(Vec<Drive>),
    SelectDrive(String),
    DeselectDrive(String),
    ToggleDrive(String),
    DeselectAllDrives,
    SelectImage(SourceImage),
    DeselectImage,
    SetFlashing(bool),
    /// Leave the flashing state and start a new flashing workflow
    ResetFlashState,
}

type Listener = Rc<dyn Fn(&Rc<StoreState>)>;

struct StoreInner {
    state: RefCell<Rc<StoreState>>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener_id: Cell<u64>,
    version: Cell<u64>,
    closed: Cell<bool>,
    constraints: Option<Rc<dyn DriveConstraints>>,
    auto_select: bool,
}

/// Shared handle to the application store
#[derive(Clone)]
pub struct Store {
    inner: Rc<StoreInner>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("version", &self.inner.version.get())
            .field("listeners", &self.listener_count())
            .field("closed", &self.inner.closed.get())
            .finish()
    }
}

/// Non-owning [`Store`] handle, for listeners that read back from the store
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<Store> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

/// Builder for [`Store`]
#[derive(Default)]
pub struct StoreBuilder {
    constraints: Option<Rc<dyn DriveConstraints>>,
    auto_select: bool,
    session: Option<SessionIds>,
}

impl StoreBuilder {
    /// Reject selections the evaluator considers ineligible
    pub fn constraints(mut self, constraints: Rc<dyn DriveConstraints>) -> Self {
        self.constraints = Some(constraints);
        self
    }

    /// Auto-select the only drive when it is eligible and removable
    pub fn auto_select(mut self, enabled: bool) -> Self {
        self.auto_select = enabled;
        self
    }

    /// Use fixed session identifiers instead of random ones
    pub fn session(mut self, session: SessionIds) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Store {
        let session = self.session.unwrap_or_else(SessionIds::generate);
        Store {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(StoreState::new(session))),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                version: Cell::new(0),
                closed: Cell::new(false),
                constraints: self.constraints,
                auto_select: self.auto_select,
            }),
        }
    }
}

impl Store {
    /// A store with no constraints and auto-select disabled
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> StoreBuilder {
        StoreBuilder::default()
    }

    /// Current snapshot. Never fails; a fresh store has an empty selection.
    pub fn get_state(&self) -> Rc<StoreState> {
        Rc::clone(&*self.inner.state.borrow())
    }

    /// Number of state changes applied so far
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Handle that does not keep the store alive
    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Register a change listener.
    ///
    /// The listener runs once after every dispatch that changes the state,
    /// receiving the new snapshot. It stays registered until the returned
    /// guard is dropped.
    pub fn observe<F>(&self, listener: F) -> Result<Subscription>
    where
        F: Fn(&Rc<StoreState>) + 'static,
    {
        if self.is_closed() {
            return Err(Error::StoreClosed);
        }

        let id = self.inner.next_listener_id.get();
        self.inner.next_listener_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        trace!("Store listener {} registered", id);

        Ok(Subscription {
            id,
            store: Rc::downgrade(&self.inner),
        })
    }

    /// Apply an action and notify listeners if the state changed
    pub fn dispatch(&self, action: Action) -> Result<()> {
        if self.is_closed() {
            return Err(Error::StoreClosed);
        }

        let current = self.get_state();
        let next = self.reduce(&current, action)?;
        if next == *current {
            return Ok(());
        }

        let next = Rc::new(next);
        *self.inner.state.borrow_mut() = Rc::clone(&next);
        let version = self.inner.version.get() + 1;
        self.inner.version.set(version);
        self.notify(&next, version);
        Ok(())
    }

    /// Drop every listener and refuse further subscriptions and dispatches
    pub fn close(&self) {
        self.inner.closed.set(true);
        let dropped = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        if !dropped.is_empty() {
            debug!("Store closed with {} listener(s) still registered", dropped.len());
        }
    }

    fn notify(&self, state: &Rc<StoreState>, version: u64) {
        // Snapshot the list so listeners may subscribe, unsubscribe or
        // dispatch while being called
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            if self.version() != version {
                trace!("Notification for version {} superseded", version);
                break;
            }
            listener(state);
        }
    }

    fn reduce(&self, state: &StoreState, action: Action) -> Result<StoreState> {
        let mut next = state.clone();

        match action {
            Action::SetAvailableDrives(drives) => {
                next.selected_devices
                    .retain(|device| drives.iter().any(|d| &d.device == device));
                next.available_drives = drives;
                if self.inner.auto_select {
                    self.auto_select_single_drive(&mut next);
                }
            }

            Action::SelectDrive(device) => {
                self.check_selectable(&next, &device)?;
                if !next.is_drive_selected(&device) {
                    next.selected_devices.push(device);
                }
            }

            Action::DeselectDrive(device) => {
                next.selected_devices.retain(|d| d != &device);
            }

            Action::ToggleDrive(device) => {
                if next.is_drive_selected(&device) {
                    next.selected_devices.retain(|d| d != &device);
                } else {
                    self.check_selectable(&next, &device)?;
                    next.selected_devices.push(device);
                }
            }

            Action::DeselectAllDrives => {
                next.selected_devices.clear();
            }

            Action::SelectImage(image) => {
                next.image = Some(image);
                // Drop targets the new image rules out
                if let Some(constraints) = &self.inner.constraints {
                    let image = next.image.as_ref();
                    let drives = &next.available_drives;
                    next.selected_devices.retain(|device| {
                        drives
                            .iter()
                            .find(|d| &d.device == device)
                            .is_some_and(|drive| constraints.is_selectable(drive, image, &[]))
                    });
                }
            }

            Action::DeselectImage => {
                next.image = None;
            }

            Action::SetFlashing(flashing) => {
                next.is_flashing = flashing;
            }

            Action::ResetFlashState => {
                next.is_flashing = false;
                next.session.flashing_workflow_uuid = Uuid::new_v4().to_string();
            }
        }

        Ok(next)
    }

    fn check_selectable(&self, state: &StoreState, device: &str) -> Result<()> {
        let drive = state
            .get_drive(device)
            .ok_or_else(|| Error::unknown_drive(device))?;

        if let Some(constraints) = &self.inner.constraints {
            let selected = state.selected_drives();
            if !constraints.is_selectable(drive, state.image.as_ref(), &selected) {
                let reason = constraints
                    .blocking_reason(drive, state.image.as_ref())
                    .map(|status| status.message())
                    .unwrap_or_else(|| "not eligible".to_string());
                return Err(Error::drive_not_selectable(device, reason));
            }
        }
        Ok(())
    }

    fn auto_select_single_drive(&self, state: &mut StoreState) {
        if state.has_drive() || state.available_drives.len() != 1 {
            return;
        }
        let drive = &state.available_drives[0];
        if !drive.is_removable || drive.is_system {
            return;
        }
        let eligible = self
            .inner
            .constraints
            .as_ref()
            .map_or(true, |c| c.is_selectable(drive, state.image.as_ref(), &[]));
        if eligible {
            debug!("Auto-selecting single drive {}", drive.device);
            state.selected_devices.push(drive.device.clone());
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a store listener; dropping it unregisters the listener
#[must_use = "dropping a Subscription immediately unregisters its listener"]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Subscription {
    /// Unregister now. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
            trace!("Store listener {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashdeck_core::StandardConstraints;

    fn sandisk() -> Drive {
        Drive::new("/dev/sdb", "SanDisk Ultra", "/dev/sdb").with_size(16_000_000_000)
    }

    fn kingston() -> Drive {
        Drive::new("/dev/sdc", "Kingston DataTraveler", "/dev/sdc").with_size(32_000_000_000)
    }

    fn store_with_drives() -> Store {
        let store = Store::new();
        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk(), kingston()]))
            .unwrap();
        store
    }

    #[test]
    fn test_fresh_store_has_empty_selection() {
        let store = Store::new();
        let state = store.get_state();
        assert!(state.selected_drives().is_empty());
        assert!(!state.has_drive());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_selection_keeps_order() {
        let store = store_with_drives();
        store.dispatch(Action::SelectDrive("/dev/sdc".into())).unwrap();
        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();

        let devices: Vec<_> = store
            .get_state()
            .selected_drives()
            .into_iter()
            .map(|d| d.device)
            .collect();
        assert_eq!(devices, vec!["/dev/sdc", "/dev/sdb"]);
    }

    #[test]
    fn test_select_unknown_drive_fails() {
        let store = store_with_drives();
        let err = store
            .dispatch(Action::SelectDrive("/dev/sdz".into()))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownDrive { .. }));
    }

    #[test]
    fn test_listener_called_once_per_change() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store
            .observe(move |_| counter.set(counter.get() + 1))
            .unwrap();

        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk()]))
            .unwrap();
        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();

        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_no_notification_without_change() {
        let store = store_with_drives();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store
            .observe(move |_| counter.set(counter.get() + 1))
            .unwrap();

        store.dispatch(Action::DeselectAllDrives).unwrap();
        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk(), kingston()]))
            .unwrap();

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_listener_sees_new_snapshot() {
        let store = store_with_drives();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store
            .observe(move |state| sink.borrow_mut().push(state.selected_devices.clone()))
            .unwrap();

        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();

        assert_eq!(*seen.borrow(), vec![vec!["/dev/sdb".to_string()]]);
    }

    #[test]
    fn test_dropping_subscription_releases_listener() {
        let store = Store::new();
        let sub = store.observe(|_| {}).unwrap();
        let other = store.observe(|_| {}).unwrap();
        assert_eq!(store.listener_count(), 2);

        drop(sub);
        assert_eq!(store.listener_count(), 1);

        other.unsubscribe();
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_store_is_harmless() {
        let sub = {
            let store = Store::new();
            store.observe(|_| {}).unwrap()
        };
        drop(sub);
    }

    #[test]
    fn test_listener_may_dispatch() {
        let store = store_with_drives();
        let inner = store.clone();
        let _sub = store
            .observe(move |state| {
                if state.is_drive_selected("/dev/sdb") && !state.is_drive_selected("/dev/sdc") {
                    inner
                        .dispatch(Action::SelectDrive("/dev/sdc".into()))
                        .unwrap();
                }
            })
            .unwrap();

        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();

        assert_eq!(
            store.get_state().selected_devices,
            vec!["/dev/sdb".to_string(), "/dev/sdc".to_string()]
        );
    }

    #[test]
    fn test_nested_dispatch_never_delivers_stale_snapshot() {
        let store = store_with_drives();
        let inner = store.clone();
        let _first = store
            .observe(move |state| {
                if state.is_drive_selected("/dev/sdb") && !state.is_drive_selected("/dev/sdc") {
                    inner
                        .dispatch(Action::SelectDrive("/dev/sdc".into()))
                        .unwrap();
                }
            })
            .unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_in = Rc::clone(&seen);
        let _second = store
            .observe(move |state| seen_in.borrow_mut().push(state.selected_devices.len()))
            .unwrap();

        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();

        assert_eq!(*seen.borrow(), vec![2]);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn test_weak_store_does_not_keep_store_alive() {
        let store = Store::new();
        let weak = store.downgrade();
        assert!(weak.upgrade().is_some());

        drop(store);

        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_closed_store_rejects_subscriptions() {
        let store = Store::new();
        let _sub = store.observe(|_| {}).unwrap();
        store.close();

        assert_eq!(store.listener_count(), 0);
        let err = store.observe(|_| {}).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            store.dispatch(Action::DeselectAllDrives),
            Err(Error::StoreClosed)
        ));
    }

    #[test]
    fn test_vanished_drives_are_deselected() {
        let store = store_with_drives();
        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();
        store.dispatch(Action::SelectDrive("/dev/sdc".into())).unwrap();

        store
            .dispatch(Action::SetAvailableDrives(vec![kingston()]))
            .unwrap();

        assert_eq!(
            store.get_state().selected_devices,
            vec!["/dev/sdc".to_string()]
        );
    }

    #[test]
    fn test_toggle_drive() {
        let store = store_with_drives();
        store.dispatch(Action::ToggleDrive("/dev/sdb".into())).unwrap();
        assert!(store.get_state().is_drive_selected("/dev/sdb"));
        store.dispatch(Action::ToggleDrive("/dev/sdb".into())).unwrap();
        assert!(!store.get_state().has_drive());
    }

    #[test]
    fn test_constraints_reject_ineligible_drive() {
        let store = Store::builder()
            .constraints(Rc::new(StandardConstraints::default()))
            .build();
        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk().read_only()]))
            .unwrap();

        let err = store
            .dispatch(Action::SelectDrive("/dev/sdb".into()))
            .unwrap_err();
        assert!(matches!(err, Error::DriveNotSelectable { ref reason, .. } if reason == "Locked"));
    }

    #[test]
    fn test_select_image_drops_too_small_targets() {
        let store = Store::builder()
            .constraints(Rc::new(StandardConstraints::default()))
            .build();
        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk(), kingston()]))
            .unwrap();
        store.dispatch(Action::SelectDrive("/dev/sdb".into())).unwrap();
        store.dispatch(Action::SelectDrive("/dev/sdc".into())).unwrap();

        store
            .dispatch(Action::SelectImage(SourceImage::new(
                "/home/me/big.img",
                20_000_000_000,
            )))
            .unwrap();

        assert_eq!(
            store.get_state().selected_devices,
            vec!["/dev/sdc".to_string()]
        );
    }

    #[test]
    fn test_auto_select_single_removable_drive() {
        let store = Store::builder().auto_select(true).build();
        store
            .dispatch(Action::SetAvailableDrives(vec![sandisk()]))
            .unwrap();
        assert!(store.get_state().is_drive_selected("/dev/sdb"));
    }

    #[test]
    fn test_auto_select_skips_system_drive() {
        let store = Store::builder().auto_select(true).build();
        let system = Drive::new("/dev/nvme0n1", "Samsung", "/dev/nvme0n1").system();
        store
            .dispatch(Action::SetAvailableDrives(vec![system]))
            .unwrap();
        assert!(!store.get_state().has_drive());
    }

    #[test]
    fn test_reset_flash_state_regenerates_workflow_uuid() {
        let store = Store::new();
        store.dispatch(Action::SetFlashing(true)).unwrap();
        let before = store.get_state().session.clone();

        store.dispatch(Action::ResetFlashState).unwrap();

        let after = store.get_state();
        assert!(!after.is_flashing);
        assert_eq!(
            after.session.application_session_uuid,
            before.application_session_uuid
        );
        assert_ne!(
            after.session.flashing_workflow_uuid,
            before.flashing_workflow_uuid
        );
    }

    #[test]
    fn test_fixed_session_ids() {
        let store = Store::builder()
            .session(SessionIds {
                application_session_uuid: "A".into(),
                flashing_workflow_uuid: "B".into(),
            })
            .build();
        assert_eq!(store.get_state().session.application_session_uuid, "A");
    }
}
