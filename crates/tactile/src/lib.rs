//! Tactile: W3C WebDriver action composition and a live interaction suite
//!
//! Tactile composes pointer and keyboard input sequences, sends them to a
//! WebDriver remote end in one `perform` call and checks what the page saw:
//! clicks, drags, modifier keys, pauses and pen properties.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      TACTILE Architecture                       │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Action     │    │ Session    │            │
//! │   │ (suite)    │───►│ Builder    │───►│ (remote /  │            │
//! │   │            │    │            │    │  mock)     │            │
//! │   └─────┬──────┘    └────────────┘    └─────┬──────┘            │
//! │         │  assert on DOM, events, geometry  │                   │
//! │         └◄──────────────────────────────────┘                   │
//! │   ┌────────────┐                                                │
//! │   │ PageServer │  bundled HTML pages over axum                  │
//! │   └────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tactile::{ActionBuilder, By, RemoteSession, Session, SuiteConfig};
//!
//! let config = SuiteConfig::from_env()?;
//! let session = RemoteSession::connect(&config).await?;
//! let field = session.find_element(&By::id("clickField")).await?;
//!
//! let mut actions = ActionBuilder::new();
//! actions.pointer_action().move_to(&field).click();
//! actions.perform(&session).await?;
//! ```

#![warn(missing_docs)]

mod assertion;
mod events;
mod geometry;
mod keys;
mod result;
mod wait;

/// Action composition: input sources, chainable builders, wire payloads
pub mod actions;
/// Suite configuration and browser families
pub mod config;
/// Tracing subscriber setup
pub mod logging;
/// Recording session for unit tests
pub mod mock;
/// Test pages and the page server
pub mod pages;
/// W3C WebDriver HTTP session
pub mod remote;
/// The session seam and element references
pub mod session;
/// Interaction scenarios and their runner
pub mod suite;

pub use actions::{
    ActionBuilder, ActionsPayload, KeyActions, KeyInput, MouseButton, Origin, PointerActions,
    PointerInput, PointerKind, PointerProperties, DEFAULT_MOVE_DURATION,
};
pub use assertion::{Assertion, AssertionResult};
pub use config::{BrowserFamily, SuiteConfig};
pub use events::{get_events, get_viewport_rect, normalize_event, normalize_events, RecordedEvent};
pub use geometry::{in_view_center, Point, Rect, Viewport};
pub use keys::Keys;
pub use mock::MockSession;
pub use pages::{PageServer, Pages};
pub use remote::RemoteSession;
pub use result::{InteractionError, InteractionResult};
pub use session::{property_string, By, Session, WebElement, ELEMENT_KEY};
pub use suite::{
    Harness, Marker, MarkerTarget, OutcomeStatus, Scenario, ScenarioOutcome, SuiteReport,
    SuiteRunner,
};
pub use wait::{
    is_element_available, Wait, WaitResult, DEFAULT_ELEMENT_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod reexport_tests {
        use super::*;

        #[test]
        fn test_in_view_center_partially_offscreen() {
            let center = in_view_center(
                &Rect::new(-10.0, 0.0, 20.0, 10.0),
                &Viewport::new(100.0, 100.0),
            );
            assert_eq!(center, Point::new(5.0, 5.0));
        }

        #[test]
        fn test_shift_code_point() {
            assert_eq!(Keys::SHIFT, '\u{E008}');
        }

        #[test]
        fn test_builder_defaults_through_root() {
            let actions = ActionBuilder::new();
            assert!(!actions.pointer_inputs().is_empty());
            assert!(!actions.key_inputs().is_empty());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_timeout_display() {
            let err = InteractionError::Timeout {
                ms: 15_000,
                waited_for: "#draggable".to_string(),
            };
            assert_eq!(err.to_string(), "Timed out after 15000ms waiting for #draggable");
        }
    }
}
