//! End-to-end flow through the drive step: scan, open the selector, pick
//! targets, reselect, and render each stage with a test backend.

use std::rc::Rc;

use flashdeck_app::analytics::{Analytics, JsonlAnalytics, RecordingAnalytics};
use flashdeck_app::config::Settings;
use flashdeck_app::drive_source::parse_drive_list;
use flashdeck_app::process::process_message;
use flashdeck_app::{AppState, InputKey, Message, ModalState};
use flashdeck_core::{Drive, SourceImage};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

// ─────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────

fn fixture_drives() -> Vec<Drive> {
    parse_drive_list(include_str!("fixtures/drives.json")).expect("fixture parses")
}

struct Harness {
    state: AppState,
    analytics: Rc<RecordingAnalytics>,
    msg_tx: mpsc::Sender<Message>,
    _msg_rx: mpsc::Receiver<Message>,
}

impl Harness {
    fn new() -> Self {
        let analytics = Rc::new(RecordingAnalytics::default());
        let mut state = AppState::new(Rc::new(Settings::default()), analytics.clone()).unwrap();
        state
            .select_image(SourceImage::new("/home/me/raspios.img", 4_000_000_000))
            .unwrap();
        let (msg_tx, msg_rx) = mpsc::channel(16);
        Self {
            state,
            analytics,
            msg_tx,
            _msg_rx: msg_rx,
        }
    }

    fn send(&mut self, message: Message) {
        process_message(&mut self.state, message, &self.msg_tx);
    }

    fn press(&mut self, key: InputKey) {
        self.send(Message::Key(key));
    }

    fn screen(&self) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| flashdeck_tui::render::view(frame, &self.state))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut content = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                content.push_str(buffer[(x, y)].symbol());
            }
            content.push('\n');
        }
        content
    }
}

// ─────────────────────────────────────────────────────────
// Flow
// ─────────────────────────────────────────────────────────

#[test]
fn test_fixture_parses() {
    let drives = fixture_drives();

    assert_eq!(drives.len(), 4);
    assert_eq!(drives[0].mountpoints[0].label.as_deref(), Some("SANDISK"));
    assert!(drives[2].is_read_only);
    assert!(drives[3].is_system);
}

#[test]
fn test_select_two_targets_then_reselect() {
    let mut h = Harness::new();
    h.send(Message::DrivesScanned {
        drives: fixture_drives(),
    });
    assert!(h.screen().contains("Select target"));

    h.press(InputKey::Enter);
    assert_eq!(h.state.modal(), ModalState::Open);
    let screen = h.screen();
    assert!(screen.contains("Locked"));
    assert!(screen.contains("System drive"));

    h.press(InputKey::Char(' '));
    h.press(InputKey::Down);
    h.press(InputKey::Char(' '));
    h.press(InputKey::Enter);

    assert_eq!(h.state.modal(), ModalState::Closed);
    assert_eq!(
        h.state.drive_selector.slice().drive_list_label,
        "SanDisk Ultra (/dev/sdb)\nKingston DataTraveler (/dev/sdc)"
    );
    let screen = h.screen();
    assert!(screen.contains("2 targets"));
    assert!(!screen.contains("Select target"));
    assert!(h.analytics.events().is_empty());

    h.press(InputKey::Char('r'));

    let events = h.analytics.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "Reselect drive");
    let session = h.state.store.get_state().session.clone();
    assert_eq!(
        events[0].1["applicationSessionUuid"],
        session.application_session_uuid.as_str()
    );
    assert_eq!(
        events[0].1["flashingWorkflowUuid"],
        session.flashing_workflow_uuid.as_str()
    );
    assert_eq!(h.state.modal(), ModalState::Open);
}

#[test]
fn test_locked_drive_cannot_be_toggled() {
    let mut h = Harness::new();
    h.send(Message::DrivesScanned {
        drives: fixture_drives(),
    });
    h.press(InputKey::Char('s'));

    h.press(InputKey::Down);
    h.press(InputKey::Down);
    h.press(InputKey::Char(' '));

    assert!(h.state.drive_selector.slice().targets.is_empty());
    assert!(h
        .screen()
        .contains("Drive /dev/sdd cannot be selected: Locked"));
}

#[test]
fn test_unplugged_target_drops_out_of_selection() {
    let mut h = Harness::new();
    h.send(Message::DrivesScanned {
        drives: fixture_drives(),
    });
    h.press(InputKey::Enter);
    h.press(InputKey::Char(' '));
    h.press(InputKey::Esc);
    assert!(h.screen().contains("SanDisk Ultra"));

    let remaining: Vec<Drive> = fixture_drives().into_iter().skip(1).collect();
    h.send(Message::DrivesScanned { drives: remaining });

    assert!(h.state.drive_selector.slice().targets.is_empty());
    assert!(h.screen().contains("Select target"));
}

#[test]
fn test_quit_shuts_down_cleanly() {
    let mut h = Harness::new();
    h.press(InputKey::Char('q'));

    assert!(h.state.should_quit());
    let store = h.state.store.clone();
    h.state.shutdown();
    assert!(store.is_closed());
}

#[test]
fn test_jsonl_analytics_appends_events() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("events.jsonl");
    let analytics = JsonlAnalytics::new(&path);

    let mut properties = serde_json::Map::new();
    properties.insert("applicationSessionUuid".into(), "A".into());
    analytics.log_event("Reselect drive", &properties);
    analytics.log_event("Reselect drive", &properties);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], "Reselect drive");
    assert_eq!(lines[0]["properties"]["applicationSessionUuid"], "A");
}
