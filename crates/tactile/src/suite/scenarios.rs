//! Scenario bodies.
//!
//! Every scenario returns `AssertionFailed` rather than panicking so the
//! runner can tell an expected failure from a broken harness.

use super::{Harness, Marker, MarkerTarget, Scenario};
use crate::actions::{ActionBuilder, MouseButton, PointerInput, PointerKind, PointerProperties};
use crate::assertion::Assertion;
use crate::config::BrowserFamily;
use crate::events::{get_events, get_viewport_rect, RecordedEvent};
use crate::geometry::in_view_center;
use crate::keys::Keys;
use crate::result::{InteractionError, InteractionResult};
use crate::session::{property_string, By, Session, WebElement};
use crate::wait::{is_element_available, Wait};
use futures::future::BoxFuture;
use std::time::{Duration, Instant};

const XFAIL_CHROME: Marker =
    Marker::xfail(MarkerTarget::Browser(BrowserFamily::Chrome)).because("Fails on Travis");
const XFAIL_FIREFOX: Marker = Marker::xfail(MarkerTarget::Browser(BrowserFamily::Firefox));
const XFAIL_SAFARI: Marker = Marker::xfail(MarkerTarget::Browser(BrowserFamily::Safari));
const XFAIL_REMOTE: Marker = Marker::xfail(MarkerTarget::Remote);
const XFAIL_REMOTE_TRAVIS: Marker = Marker::xfail(MarkerTarget::Remote).because("Fails on Travis");

/// Upper bound for a one-second pause, in whole seconds
const PAUSE_BOUND_SECS: u64 = 3;

/// Registered scenarios
pub(super) static SCENARIOS: [Scenario; 12] = [
    Scenario {
        name: "pointer_and_keyboard_inputs",
        description: "a fresh builder exposes pointer and key inputs",
        markers: &[],
        run: pointer_and_keyboard_inputs,
    },
    Scenario {
        name: "sending_keys_with_modifier",
        description: "shift held around \"abc\" types \"ABC\"",
        markers: &[XFAIL_SAFARI, XFAIL_REMOTE],
        run: sending_keys_with_modifier,
    },
    Scenario {
        name: "pause_on_keyboard",
        description: "a one-second key pause completes promptly",
        markers: &[XFAIL_FIREFOX, XFAIL_REMOTE],
        run: pause_on_keyboard,
    },
    Scenario {
        name: "pause_on_pointer",
        description: "a one-second pointer pause completes promptly",
        markers: &[],
        run: pause_on_pointer,
    },
    Scenario {
        name: "clear_actions",
        description: "clearing actions leaves the session usable",
        markers: &[],
        run: clear_actions,
    },
    Scenario {
        name: "move_and_click",
        description: "move to a field and click it",
        markers: &[],
        run: move_and_click,
    },
    Scenario {
        name: "drag_and_drop",
        description: "drag a box onto its drop target",
        markers: &[],
        run: drag_and_drop,
    },
    Scenario {
        name: "context_click",
        description: "right click fires contextmenu",
        markers: &[],
        run: context_click,
    },
    Scenario {
        name: "double_click",
        description: "two clicks fire dblclick",
        markers: &[XFAIL_FIREFOX, XFAIL_SAFARI, XFAIL_REMOTE_TRAVIS, XFAIL_CHROME],
        run: double_click,
    },
    Scenario {
        name: "dragging_moves_to_other_list",
        description: "dragging a list item moves it to the other list",
        markers: &[],
        run: dragging_moves_to_other_list,
    },
    Scenario {
        name: "dragging_fires_events",
        description: "dragging a list item reports DragOut and DropIn",
        markers: &[],
        run: dragging_fires_events,
    },
    Scenario {
        name: "pen_pointer_properties",
        description: "pen pressure, tilt and twist reach the page",
        markers: &[XFAIL_FIREFOX, XFAIL_REMOTE],
        run: pen_pointer_properties,
    },
];

// =============================================================================
// HELPERS
// =============================================================================

async fn value_of(session: &dyn Session, element: &WebElement) -> InteractionResult<String> {
    Ok(property_string(session, element, "value")
        .await?
        .unwrap_or_default())
}

fn event_at(events: &[RecordedEvent], index: usize) -> InteractionResult<&RecordedEvent> {
    events.get(index).ok_or_else(|| {
        InteractionError::assertion(format!(
            "expected at least {} recorded events, got {}",
            index + 1,
            events.len()
        ))
    })
}

fn field_str<'a>(event: &'a RecordedEvent, field: &str) -> &'a str {
    event.str_field(field).unwrap_or_default()
}

fn field_num(event: &RecordedEvent, field: &str) -> InteractionResult<f64> {
    event.number_field(field).ok_or_else(|| {
        InteractionError::assertion(format!("event has no numeric '{field}': {:?}", event.0))
    })
}

/// Drag `#rightitem-3` over `#leftitem-4` into `#sortable1`.
///
/// Checks the reporter reads "Nothing happened." before the drag and
/// mentions the drag-out afterwards.
pub async fn perform_drag_and_drop_with_mouse(h: &Harness) -> InteractionResult<()> {
    let session = h.session();
    h.load("draggableLists.html").await?;
    let reporter = session.find_element(&By::id("dragging_reports")).await?;
    let to_drag = session.find_element(&By::id("rightitem-3")).await?;
    let drag_into = session.find_element(&By::id("sortable1")).await?;
    let landmark = session.find_element(&By::id("leftitem-4")).await?;

    let mut actions = ActionBuilder::new();
    actions
        .pointer_action()
        .click_and_hold(&to_drag)
        .move_to(&landmark)
        .move_to(&drag_into)
        .release();

    let before = session.element_text(&reporter).await?;
    Assertion::equals("Nothing happened.", before.as_str()).check("drag report before drag")?;

    actions.perform(session).await?;

    let after = session.element_text(&reporter).await?;
    Assertion::contains(&after, "Nothing happened. DragOut").check("drag report after drag")
}

async fn timed_pause(h: &Harness, on_pointer: bool) -> InteractionResult<()> {
    let session = h.session();
    let start = Instant::now();
    let mut actions = ActionBuilder::new();
    if on_pointer {
        actions.pointer_action().pause(Duration::from_secs(1));
    } else {
        actions.key_action().pause(Duration::from_secs(1));
    }
    actions.perform(session).await?;
    let elapsed = start.elapsed();
    Assertion::is_true(
        elapsed.as_secs() <= PAUSE_BOUND_SECS,
        &format!("one-second pause took {elapsed:?}"),
    )
    .check("pause duration")?;

    let mut filler = ActionBuilder::new();
    if on_pointer {
        filler.pointer_action().pause(Duration::ZERO);
    } else {
        filler.key_action().pause(Duration::ZERO);
    }
    filler.perform(session).await
}

// =============================================================================
// SCENARIOS
// =============================================================================

fn pointer_and_keyboard_inputs(_h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let actions = ActionBuilder::new();
        Assertion::is_true(!actions.pointer_inputs().is_empty(), "no pointer inputs")
            .check("action builder")?;
        Assertion::is_true(!actions.key_inputs().is_empty(), "no key inputs")
            .check("action builder")
    })
}

fn sending_keys_with_modifier(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        h.load("formPage.html").await?;
        let field = session.find_element(&By::id("working")).await?;
        session.element_click(&field).await?;

        let mut actions = ActionBuilder::new();
        actions
            .key_action()
            .key_down(Keys::SHIFT)
            .send_keys("abc")
            .key_up(Keys::SHIFT);
        actions.perform(session).await?;

        let value = value_of(session, &field).await?;
        Assertion::equals("ABC", value.as_str()).check("#working value")
    })
}

fn pause_on_keyboard(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(timed_pause(h, false))
}

fn pause_on_pointer(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(timed_pause(h, true))
}

fn clear_actions(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        let mut actions = ActionBuilder::new();
        actions.pointer_action().pause(Duration::from_millis(10));
        actions.clear_actions(session).await?;
        Assertion::is_true(actions.is_empty(), "queued actions survived clear")
            .check("clear_actions")?;
        actions.perform(session).await
    })
}

fn move_and_click(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        h.load("javascriptPage.html").await?;
        let to_click = session.find_element(&By::id("clickField")).await?;

        let mut actions = ActionBuilder::new();
        actions.pointer_action().move_to(&to_click).click();
        actions.perform(session).await?;

        let value = value_of(session, &to_click).await?;
        Assertion::equals("Clicked", value.as_str()).check("#clickField value")
    })
}

fn drag_and_drop(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        let timeout = h.config().element_timeout;
        let wait = Wait::new(timeout).with_poll_interval(h.config().poll_interval);
        h.load("droppableItems.html").await?;

        let waited = wait
            .until("#draggable", || is_element_available(session, "draggable"))
            .await;
        if waited.is_err() || !is_element_available(session, "draggable").await {
            return Err(InteractionError::assertion(format!(
                "Could not find draggable element after {} seconds.",
                timeout.as_secs()
            )));
        }

        let to_drag = session.find_element(&By::id("draggable")).await?;
        let drop_into = session.find_element(&By::id("droppable")).await?;
        let mut actions = ActionBuilder::new();
        actions
            .pointer_action()
            .click_and_hold(&to_drag)
            .move_to(&drop_into)
            .release();
        actions.perform(session).await?;

        let drop_into = session.find_element(&By::id("droppable")).await?;
        let label = session.find_child_element(&drop_into, &By::tag("p")).await?;
        let text = session.element_text(&label).await?;
        Assertion::equals("Dropped!", text.as_str()).check("#droppable label")
    })
}

fn context_click(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        h.load("javascriptPage.html").await?;
        let target = session.find_element(&By::id("doubleClickField")).await?;

        let mut actions = ActionBuilder::new();
        actions.pointer_action().context_click(&target);
        actions.perform(session).await?;

        let value = value_of(session, &target).await?;
        Assertion::equals("ContextClicked", value.as_str()).check("#doubleClickField value")
    })
}

fn double_click(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        h.load("javascriptPage.html").await?;
        let target = session.find_element(&By::id("doubleClickField")).await?;

        let mut actions = ActionBuilder::new();
        actions.pointer_action().double_click(&target);
        actions.perform(session).await?;

        let value = value_of(session, &target).await?;
        Assertion::equals("DoubleClicked", value.as_str()).check("#doubleClickField value")
    })
}

fn dragging_moves_to_other_list(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        perform_drag_and_drop_with_mouse(h).await?;
        let drag_into = session.find_element(&By::id("sortable1")).await?;
        let items = session
            .find_child_elements(&drag_into, &By::tag("li"))
            .await?;
        Assertion::has_length(&items, 6).check("#sortable1 items")
    })
}

fn dragging_fires_events(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        perform_drag_and_drop_with_mouse(h).await?;
        let reporter = session.find_element(&By::id("dragging_reports")).await?;
        let text = session.element_text(&reporter).await?;
        Assertion::equals("Nothing happened. DragOut DropIn RightItem 3", text.as_str())
            .check("drag report")
    })
}

fn pen_pointer_properties(h: &Harness) -> BoxFuture<'_, InteractionResult<()>> {
    Box::pin(async move {
        let session = h.session();
        h.load("pointerActionsPage.html").await?;
        let area = session.find_element(&By::css("#pointerArea")).await?;
        let mut actions =
            ActionBuilder::new().with_mouse(PointerInput::new(PointerKind::Pen, "pen"));
        let rect = session.element_rect(&area).await?;
        let center = in_view_center(&rect, &get_viewport_rect(session).await?);

        actions
            .pointer_action()
            .move_to(&area)
            .pointer_down_with(
                MouseButton::Left,
                PointerProperties::new()
                    .pressure(0.36)
                    .tilt(-72, 9)
                    .twist(86),
            )
            .move_to_offset(&area, 10, 40)
            .pointer_up(MouseButton::Left)
            .move_to_offset(&area, 10, 50);
        actions.perform(session).await?;

        let events = get_events(session).await?;

        let down = event_at(&events, 3)?;
        Assertion::equals("pointerdown", field_str(down, "type")).check("events[3].type")?;
        Assertion::approx_eq(center.x, field_num(down, "pageX")?, 1.0).check("events[3].pageX")?;
        Assertion::approx_eq(center.y, field_num(down, "pageY")?, 1.0).check("events[3].pageY")?;
        Assertion::equals("pointerArea", field_str(down, "target")).check("events[3].target")?;
        Assertion::equals("pen", field_str(down, "pointerType")).check("events[3].pointerType")?;
        // mouse and pen default to a 1x1 contact
        Assertion::rounds_to(1.0, field_num(down, "width")?, 2).check("events[3].width")?;
        Assertion::rounds_to(1.0, field_num(down, "height")?, 2).check("events[3].height")?;
        Assertion::rounds_to(0.36, field_num(down, "pressure")?, 2).check("events[3].pressure")?;
        Assertion::equals(&-72.0, &field_num(down, "tiltX")?).check("events[3].tiltX")?;
        Assertion::equals(&9.0, &field_num(down, "tiltY")?).check("events[3].tiltY")?;
        Assertion::equals(&86.0, &field_num(down, "twist")?).check("events[3].twist")?;

        let moved = event_at(&events, 6)?;
        Assertion::equals("pointermove", field_str(moved, "type")).check("events[6].type")?;
        Assertion::equals("pointerArea", field_str(moved, "target")).check("events[6].target")?;
        Assertion::equals("pen", field_str(moved, "pointerType")).check("events[6].pointerType")?;
        Assertion::rounds_to(1.0, field_num(moved, "width")?, 2).check("events[6].width")?;
        Assertion::rounds_to(1.0, field_num(moved, "height")?, 2).check("events[6].height")?;
        // unset properties fall back to pressure 0.5 and zero tilt and twist
        Assertion::rounds_to(0.5, field_num(moved, "pressure")?, 2).check("events[6].pressure")?;
        Assertion::equals(&0.0, &field_num(moved, "tiltX")?).check("events[6].tiltX")?;
        Assertion::equals(&0.0, &field_num(moved, "tiltY")?).check("events[6].tiltY")?;
        Assertion::equals(&0.0, &field_num(moved, "twist")?).check("events[6].twist")
    })
}
