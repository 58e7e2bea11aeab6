//! Analytics event sinks
//!
//! Events are fire-and-forget: [`Analytics::log_event`] returns nothing and
//! sinks swallow their own failures after logging them.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::Local;
use flashdeck_core::prelude::*;
use serde_json::{json, Map, Value};

use crate::config::AnalyticsSettings;
use crate::store::StoreState;

/// Event properties as a JSON object
pub type EventProperties = Map<String, Value>;

/// Destination for analytics events
#[cfg_attr(test, mockall::automock)]
pub trait Analytics {
    fn log_event(&self, name: &str, properties: &EventProperties);
}

/// Properties identifying the current session, read from `state`
pub fn session_properties(state: &StoreState) -> EventProperties {
    let mut properties = EventProperties::new();
    properties.insert(
        "applicationSessionUuid".to_string(),
        Value::String(state.session.application_session_uuid.clone()),
    );
    properties.insert(
        "flashingWorkflowUuid".to_string(),
        Value::String(state.session.flashing_workflow_uuid.clone()),
    );
    properties
}

/// Pick a sink from the settings
pub fn from_settings(settings: &AnalyticsSettings) -> Rc<dyn Analytics> {
    match (settings.enabled, &settings.file) {
        (false, _) => Rc::new(NoopAnalytics),
        (true, Some(path)) => Rc::new(JsonlAnalytics::new(path)),
        (true, None) => Rc::new(TracingAnalytics),
    }
}

/// Discards every event
#[derive(Debug, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn log_event(&self, _name: &str, _properties: &EventProperties) {}
}

/// Writes events to the application log
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn log_event(&self, name: &str, properties: &EventProperties) {
        info!(
            target: "flashdeck::analytics",
            event = name,
            properties = %serde_json::Value::Object(properties.clone()),
            "analytics event"
        );
    }
}

/// Appends one JSON object per event to a file
#[derive(Debug)]
pub struct JsonlAnalytics {
    path: PathBuf,
}

impl JsonlAnalytics {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, name: &str, properties: &EventProperties) -> Result<()> {
        let line = json!({
            "event": name,
            "properties": properties,
            "timestamp": Local::now().to_rfc3339(),
        });
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

impl Analytics for JsonlAnalytics {
    fn log_event(&self, name: &str, properties: &EventProperties) {
        if let Err(e) = self.append(name, properties) {
            warn!("Dropping analytics event {:?}: {}", name, e);
        }
    }
}

/// Keeps events in memory so tests can assert on them
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: std::cell::RefCell<Vec<(String, EventProperties)>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingAnalytics {
    pub fn events(&self) -> Vec<(String, EventProperties)> {
        self.events.borrow().clone()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Analytics for RecordingAnalytics {
    fn log_event(&self, name: &str, properties: &EventProperties) {
        self.events
            .borrow_mut()
            .push((name.to_string(), properties.clone()));
    }
}
