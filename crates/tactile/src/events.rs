//! Recorded browser events
//!
//! Test pages push a flat object per DOM event onto `allEvents.events`. This
//! module fetches that log through script evaluation and normalizes the
//! fields browsers disagree on:
//!
//! - `key` values of the form `U+XXXX` become the code point itself
//! - `code` values of `Unidentified` become the empty string

use crate::geometry::Viewport;
use crate::result::InteractionResult;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const EVENTS_SCRIPT: &str = "return allEvents.events;";

const VIEWPORT_SCRIPT: &str = "return {\
    width: window.innerWidth || document.documentElement.clientWidth,\
    height: window.innerHeight || document.documentElement.clientHeight\
};";

/// One DOM event as recorded by a test page
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordedEvent(pub Map<String, Value>);

impl RecordedEvent {
    /// Raw field
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// DOM event type (`pointerdown`, `keyup`, ...)
    #[must_use]
    pub fn event_type(&self) -> Option<&str> {
        self.str_field("type")
    }

    /// String field
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Numeric field
    #[must_use]
    pub fn number_field(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }
}

impl From<Map<String, Value>> for RecordedEvent {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Decode `U+XXXX` into the code point it names.
///
/// Surrogate halves are not valid `char`s and decode to U+FFFD. Anything
/// that is not `U+` followed by hex is left alone.
fn decode_key(key: &str) -> Option<String> {
    let hex = key.strip_prefix("U+")?;
    let code = u32::from_str_radix(hex, 16).ok()?;
    Some(
        char::from_u32(code)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
            .to_string(),
    )
}

/// Normalize one event
#[must_use]
pub fn normalize_event(mut event: RecordedEvent) -> RecordedEvent {
    if let Some(decoded) = event.str_field("key").and_then(decode_key) {
        event.0.insert("key".to_string(), Value::String(decoded));
    }
    if event.str_field("code") == Some("Unidentified") {
        event.0.insert("code".to_string(), Value::String(String::new()));
    }
    event
}

/// Normalize every event, keeping order
#[must_use]
pub fn normalize_events(events: Vec<RecordedEvent>) -> Vec<RecordedEvent> {
    events.into_iter().map(normalize_event).collect()
}

/// Fetch and normalize the page's event log
pub async fn get_events<S: Session + ?Sized>(session: &S) -> InteractionResult<Vec<RecordedEvent>> {
    let value = session.execute_script(EVENTS_SCRIPT, Vec::new()).await?;
    if value.is_null() {
        return Ok(Vec::new());
    }
    let events: Vec<RecordedEvent> = serde_json::from_value(value)?;
    Ok(normalize_events(events))
}

/// Current viewport size
pub async fn get_viewport_rect<S: Session + ?Sized>(session: &S) -> InteractionResult<Viewport> {
    let value = session.execute_script(VIEWPORT_SCRIPT, Vec::new()).await?;
    Ok(serde_json::from_value(value)?)
}
