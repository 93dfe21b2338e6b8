//! Input sources and their wire encoding.
//!
//! Each input source owns an ordered list of actions. Position `i` of every
//! source's list forms tick `i`; the remote end runs ticks in order and the
//! actions of one tick concurrently.

use crate::session::WebElement;
use serde::ser::Serializer;
use serde::Serialize;
use std::time::Duration;

/// Default duration of a pointer move
pub const DEFAULT_MOVE_DURATION: Duration = Duration::from_millis(250);

/// Pointer button index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Primary button
    #[default]
    Left,
    /// Wheel button
    Middle,
    /// Secondary button (context menu)
    Right,
    /// Browser back
    Back,
    /// Browser forward
    Forward,
}

impl MouseButton {
    /// Button number on the wire
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Back => 3,
            Self::Forward => 4,
        }
    }
}

/// Kind of pointer device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// Mouse
    #[default]
    Mouse,
    /// Pen / stylus
    Pen,
    /// Touch contact
    Touch,
}

impl PointerKind {
    /// Wire name of the pointer type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mouse => "mouse",
            Self::Pen => "pen",
            Self::Touch => "touch",
        }
    }
}

impl std::fmt::Display for PointerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional pointer event properties.
///
/// A property left unset is not sent, and the remote end fills in the
/// protocol default.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerProperties {
    /// Contact width in CSS pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Contact height in CSS pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Normalized pressure in `[0, 1]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Normalized tangential pressure in `[-1, 1]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tangential_pressure: Option<f64>,
    /// Tilt along the X axis in degrees, `[-90, 90]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt_x: Option<i32>,
    /// Tilt along the Y axis in degrees, `[-90, 90]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt_y: Option<i32>,
    /// Clockwise rotation in degrees, `[0, 359]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twist: Option<i32>,
    /// Altitude angle in radians, `[0, π/2]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_angle: Option<f64>,
    /// Azimuth angle in radians, `[0, 2π]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azimuth_angle: Option<f64>,
}

impl PointerProperties {
    /// No properties set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set contact size
    #[must_use]
    pub const fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set pressure
    #[must_use]
    pub const fn pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Set tangential pressure
    #[must_use]
    pub const fn tangential_pressure(mut self, pressure: f64) -> Self {
        self.tangential_pressure = Some(pressure);
        self
    }

    /// Set tilt on both axes
    #[must_use]
    pub const fn tilt(mut self, tilt_x: i32, tilt_y: i32) -> Self {
        self.tilt_x = Some(tilt_x);
        self.tilt_y = Some(tilt_y);
        self
    }

    /// Set twist
    #[must_use]
    pub const fn twist(mut self, twist: i32) -> Self {
        self.twist = Some(twist);
        self
    }

    /// Set altitude and azimuth angles
    #[must_use]
    pub const fn angles(mut self, altitude: f64, azimuth: f64) -> Self {
        self.altitude_angle = Some(altitude);
        self.azimuth_angle = Some(azimuth);
        self
    }

    /// Whether no property is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Coordinate origin of a pointer move
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    /// Relative to the top-left corner of the viewport
    #[default]
    Viewport,
    /// Relative to the current pointer position
    Pointer,
    /// Relative to the in-view center of an element
    Element(WebElement),
}

impl Serialize for Origin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Viewport => serializer.serialize_str("viewport"),
            Self::Pointer => serializer.serialize_str("pointer"),
            Self::Element(element) => element.serialize(serializer),
        }
    }
}

/// One key source action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum KeyAction {
    /// Press a key
    KeyDown {
        /// Single character or named key code point
        value: String,
    },
    /// Release a key
    KeyUp {
        /// Single character or named key code point
        value: String,
    },
    /// Idle for a tick
    Pause {
        /// Milliseconds
        duration: u64,
    },
}

impl KeyAction {
    fn duration_ms(&self) -> u64 {
        match self {
            Self::Pause { duration } => *duration,
            Self::KeyDown { .. } | Self::KeyUp { .. } => 0,
        }
    }
}

/// One pointer source action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PointerAction {
    /// Press a button
    PointerDown {
        /// Button number
        button: u8,
        /// Event properties
        #[serde(flatten)]
        properties: PointerProperties,
    },
    /// Release a button
    PointerUp {
        /// Button number
        button: u8,
        /// Event properties
        #[serde(flatten)]
        properties: PointerProperties,
    },
    /// Move to a position relative to an origin
    PointerMove {
        /// Milliseconds the move takes
        duration: u64,
        /// X offset from the origin
        x: i64,
        /// Y offset from the origin
        y: i64,
        /// Coordinate origin
        origin: Origin,
        /// Event properties
        #[serde(flatten)]
        properties: PointerProperties,
    },
    /// Idle for a tick
    Pause {
        /// Milliseconds
        duration: u64,
    },
}

impl PointerAction {
    fn duration_ms(&self) -> u64 {
        match self {
            Self::Pause { duration } | Self::PointerMove { duration, .. } => *duration,
            Self::PointerDown { .. } | Self::PointerUp { .. } => 0,
        }
    }
}

/// A keyboard input source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    id: String,
    actions: Vec<KeyAction>,
}

impl KeyInput {
    /// Create a key source with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            actions: Vec::new(),
        }
    }

    /// Source id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Queued actions
    #[must_use]
    pub fn actions(&self) -> &[KeyAction] {
        &self.actions
    }

    /// Queue a key press
    pub fn create_key_down(&mut self, key: char) {
        self.actions.push(KeyAction::KeyDown {
            value: key.to_string(),
        });
    }

    /// Queue a key release
    pub fn create_key_up(&mut self, key: char) {
        self.actions.push(KeyAction::KeyUp {
            value: key.to_string(),
        });
    }

    /// Queue an idle tick
    pub fn create_pause(&mut self, duration: Duration) {
        self.actions.push(KeyAction::Pause {
            duration: millis(duration),
        });
    }

    /// Drop queued actions
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Encode as a W3C input source
    #[must_use]
    pub fn encode(&self) -> SourcePayload {
        SourcePayload::Key {
            id: self.id.clone(),
            actions: self.actions.clone(),
        }
    }
}

/// A pointer input source
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInput {
    id: String,
    kind: PointerKind,
    actions: Vec<PointerAction>,
}

impl PointerInput {
    /// Create a pointer source of the given kind
    pub fn new(kind: PointerKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            actions: Vec::new(),
        }
    }

    /// Source id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Pointer kind
    #[must_use]
    pub const fn kind(&self) -> PointerKind {
        self.kind
    }

    /// Queued actions
    #[must_use]
    pub fn actions(&self) -> &[PointerAction] {
        &self.actions
    }

    /// Queue a button press
    pub fn create_pointer_down(&mut self, button: MouseButton, properties: PointerProperties) {
        self.actions.push(PointerAction::PointerDown {
            button: button.code(),
            properties,
        });
    }

    /// Queue a button release
    pub fn create_pointer_up(&mut self, button: MouseButton) {
        self.actions.push(PointerAction::PointerUp {
            button: button.code(),
            properties: PointerProperties::default(),
        });
    }

    /// Queue a move
    pub fn create_pointer_move(
        &mut self,
        duration: Duration,
        x: i64,
        y: i64,
        origin: Origin,
        properties: PointerProperties,
    ) {
        self.actions.push(PointerAction::PointerMove {
            duration: millis(duration),
            x,
            y,
            origin,
            properties,
        });
    }

    /// Queue an idle tick
    pub fn create_pause(&mut self, duration: Duration) {
        self.actions.push(PointerAction::Pause {
            duration: millis(duration),
        });
    }

    /// Drop queued actions
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Encode as a W3C input source
    #[must_use]
    pub fn encode(&self) -> SourcePayload {
        SourcePayload::Pointer {
            id: self.id.clone(),
            parameters: PointerParameters {
                pointer_type: self.kind,
            },
            actions: self.actions.clone(),
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Parameters of a pointer source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerParameters {
    /// Pointer type
    pub pointer_type: PointerKind,
}

/// One encoded input source
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourcePayload {
    /// Keyboard source
    Key {
        /// Source id
        id: String,
        /// Actions, one per tick
        actions: Vec<KeyAction>,
    },
    /// Pointer source
    Pointer {
        /// Source id
        id: String,
        /// Pointer parameters
        parameters: PointerParameters,
        /// Actions, one per tick
        actions: Vec<PointerAction>,
    },
}

impl SourcePayload {
    /// Source id
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Key { id, .. } | Self::Pointer { id, .. } => id,
        }
    }

    /// Number of actions (ticks) in this source
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Key { actions, .. } => actions.len(),
            Self::Pointer { actions, .. } => actions.len(),
        }
    }

    /// Whether this source has no actions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn tick_duration_ms(&self, tick: usize) -> u64 {
        match self {
            Self::Key { actions, .. } => actions.get(tick).map_or(0, KeyAction::duration_ms),
            Self::Pointer { actions, .. } => {
                actions.get(tick).map_or(0, PointerAction::duration_ms)
            }
        }
    }
}

/// Body of `POST /session/{id}/actions`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ActionsPayload {
    /// Input sources with at least one action
    pub actions: Vec<SourcePayload>,
}

impl ActionsPayload {
    /// Number of ticks (longest source)
    #[must_use]
    pub fn tick_count(&self) -> usize {
        self.actions.iter().map(SourcePayload::len).max().unwrap_or(0)
    }

    /// Lower bound on dispatch time: each tick lasts as long as its longest
    /// pause or move.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        let ms = (0..self.tick_count())
            .map(|tick| {
                self.actions
                    .iter()
                    .map(|source| source.tick_duration_ms(tick))
                    .max()
                    .unwrap_or(0)
            })
            .sum();
        Duration::from_millis(ms)
    }

    /// Find an encoded source by id
    #[must_use]
    pub fn source(&self, id: &str) -> Option<&SourcePayload> {
        self.actions.iter().find(|s| s.id() == id)
    }
}
