//! Chainable pointer actions.
//!
//! Compound gestures expand to primitive actions on the same source:
//!
//! | gesture           | primitives                              |
//! |-------------------|-----------------------------------------|
//! | `click_element`   | move, down, up                          |
//! | `click_and_hold`  | move, down                              |
//! | `context_click`   | move, down(right), up(right)            |
//! | `double_click`    | move, down, up, down, up                |

use super::input::{MouseButton, Origin, PointerInput, PointerProperties};
use crate::session::WebElement;
use std::time::Duration;

/// Fluent pointer action composer bound to one [`PointerInput`]
#[derive(Debug, Clone)]
pub struct PointerActions {
    source: PointerInput,
    move_duration: Duration,
}

impl PointerActions {
    /// Wrap a pointer source; moves take `move_duration`
    #[must_use]
    pub const fn new(source: PointerInput, move_duration: Duration) -> Self {
        Self {
            source,
            move_duration,
        }
    }

    /// Underlying source
    #[must_use]
    pub const fn source(&self) -> &PointerInput {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut PointerInput {
        &mut self.source
    }

    pub(crate) fn set_move_duration(&mut self, duration: Duration) {
        self.move_duration = duration;
    }

    /// Press a button
    pub fn pointer_down(&mut self, button: MouseButton) -> &mut Self {
        self.pointer_down_with(button, PointerProperties::default())
    }

    /// Press a button with explicit event properties
    pub fn pointer_down_with(
        &mut self,
        button: MouseButton,
        properties: PointerProperties,
    ) -> &mut Self {
        self.source.create_pointer_down(button, properties);
        self
    }

    /// Release a button
    pub fn pointer_up(&mut self, button: MouseButton) -> &mut Self {
        self.source.create_pointer_up(button);
        self
    }

    /// Move to the in-view center of `element`
    pub fn move_to(&mut self, element: &WebElement) -> &mut Self {
        self.move_to_with(element, 0, 0, PointerProperties::default())
    }

    /// Move to an offset from the in-view center of `element`
    pub fn move_to_offset(&mut self, element: &WebElement, x: i64, y: i64) -> &mut Self {
        self.move_to_with(element, x, y, PointerProperties::default())
    }

    /// Move to an offset from `element` with explicit event properties
    pub fn move_to_with(
        &mut self,
        element: &WebElement,
        x: i64,
        y: i64,
        properties: PointerProperties,
    ) -> &mut Self {
        self.source.create_pointer_move(
            self.move_duration,
            x,
            y,
            Origin::Element(element.clone()),
            properties,
        );
        self
    }

    /// Move relative to the current pointer position
    pub fn move_by(&mut self, x: i64, y: i64) -> &mut Self {
        self.source.create_pointer_move(
            self.move_duration,
            x,
            y,
            Origin::Pointer,
            PointerProperties::default(),
        );
        self
    }

    /// Move to a viewport coordinate
    pub fn move_to_location(&mut self, x: i64, y: i64) -> &mut Self {
        self.source.create_pointer_move(
            self.move_duration,
            x,
            y,
            Origin::Viewport,
            PointerProperties::default(),
        );
        self
    }

    /// Left click at the current position
    pub fn click(&mut self) -> &mut Self {
        self.pointer_down(MouseButton::Left)
            .pointer_up(MouseButton::Left)
    }

    /// Move to `element` and left click
    pub fn click_element(&mut self, element: &WebElement) -> &mut Self {
        self.move_to(element).click()
    }

    /// Move to `element` and press the left button without releasing
    pub fn click_and_hold(&mut self, element: &WebElement) -> &mut Self {
        self.move_to(element).pointer_down(MouseButton::Left)
    }

    /// Release the left button
    pub fn release(&mut self) -> &mut Self {
        self.pointer_up(MouseButton::Left)
    }

    /// Move to `element` and right click
    pub fn context_click(&mut self, element: &WebElement) -> &mut Self {
        self.move_to(element)
            .pointer_down(MouseButton::Right)
            .pointer_up(MouseButton::Right)
    }

    /// Move to `element` and left click twice
    pub fn double_click(&mut self, element: &WebElement) -> &mut Self {
        self.move_to(element).click().click()
    }

    /// Idle for one tick
    pub fn pause(&mut self, duration: Duration) -> &mut Self {
        self.source.create_pause(duration);
        self
    }
}
