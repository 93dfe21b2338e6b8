//! W3C action composition
//!
//! An [`ActionBuilder`] owns one keyboard and one pointer source by default
//! (ids `keyboard` and `mouse`), plus any sources added later. Actions are
//! queued through [`KeyActions`] and [`PointerActions`], then sent to the
//! remote end in a single `perform` call:
//!
//! ```ignore
//! let mut actions = ActionBuilder::new();
//! actions.pointer_action().move_to(&field).click();
//! actions.perform(&session).await?;
//! ```

mod input;
mod key;
mod pointer;

pub use input::{
    ActionsPayload, KeyAction, KeyInput, MouseButton, Origin, PointerAction, PointerInput,
    PointerKind, PointerParameters, PointerProperties, SourcePayload, DEFAULT_MOVE_DURATION,
};
pub use key::KeyActions;
pub use pointer::PointerActions;

use crate::result::{InteractionError, InteractionResult};
use crate::session::Session;
use std::time::Duration;
use tracing::debug;

/// Builder for one atomic action sequence
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    keyboards: Vec<KeyActions>,
    pointers: Vec<PointerActions>,
    move_duration: Duration,
}

impl Default for ActionBuilder {
    fn default() -> Self {
        Self {
            keyboards: vec![KeyActions::new(KeyInput::new("keyboard"))],
            pointers: vec![PointerActions::new(
                PointerInput::new(PointerKind::Mouse, "mouse"),
                DEFAULT_MOVE_DURATION,
            )],
            move_duration: DEFAULT_MOVE_DURATION,
        }
    }
}

impl ActionBuilder {
    /// Builder with a `keyboard` key source and a `mouse` pointer source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the primary pointer source (e.g. with a pen)
    #[must_use]
    pub fn with_mouse(mut self, mouse: PointerInput) -> Self {
        self.pointers[0] = PointerActions::new(mouse, self.move_duration);
        self
    }

    /// Replace the primary key source
    #[must_use]
    pub fn with_keyboard(mut self, keyboard: KeyInput) -> Self {
        self.keyboards[0] = KeyActions::new(keyboard);
        self
    }

    /// Set the duration of every pointer move queued afterwards
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.move_duration = duration;
        for pointer in &mut self.pointers {
            pointer.set_move_duration(duration);
        }
        self
    }

    /// All key sources
    #[must_use]
    pub fn key_inputs(&self) -> Vec<&KeyInput> {
        self.keyboards.iter().map(KeyActions::source).collect()
    }

    /// All pointer sources
    #[must_use]
    pub fn pointer_inputs(&self) -> Vec<&PointerInput> {
        self.pointers.iter().map(PointerActions::source).collect()
    }

    /// Actions on the primary key source
    pub fn key_action(&mut self) -> &mut KeyActions {
        &mut self.keyboards[0]
    }

    /// Actions on the primary pointer source
    pub fn pointer_action(&mut self) -> &mut PointerActions {
        &mut self.pointers[0]
    }

    /// Add another key source; ids must be unique across all sources
    pub fn add_key_input(&mut self, id: impl Into<String>) -> InteractionResult<&mut KeyActions> {
        let id = id.into();
        self.ensure_unique(&id)?;
        self.keyboards.push(KeyActions::new(KeyInput::new(id)));
        let last = self.keyboards.len() - 1;
        Ok(&mut self.keyboards[last])
    }

    /// Add another pointer source; ids must be unique across all sources
    pub fn add_pointer_input(
        &mut self,
        kind: PointerKind,
        id: impl Into<String>,
    ) -> InteractionResult<&mut PointerActions> {
        let id = id.into();
        self.ensure_unique(&id)?;
        self.pointers.push(PointerActions::new(
            PointerInput::new(kind, id),
            self.move_duration,
        ));
        let last = self.pointers.len() - 1;
        Ok(&mut self.pointers[last])
    }

    fn ensure_unique(&self, id: &str) -> InteractionResult<()> {
        let taken = self.keyboards.iter().any(|k| k.source().id() == id)
            || self.pointers.iter().any(|p| p.source().id() == id);
        if taken {
            return Err(InteractionError::invalid_state(format!(
                "input source id '{id}' is already in use"
            )));
        }
        Ok(())
    }

    /// Whether no source has queued actions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keyboards
            .iter()
            .all(|k| k.source().actions().is_empty())
            && self
                .pointers
                .iter()
                .all(|p| p.source().actions().is_empty())
    }

    /// Encode every source that has queued actions
    #[must_use]
    pub fn encode(&self) -> ActionsPayload {
        let keys = self.keyboards.iter().map(|k| k.source().encode());
        let pointers = self.pointers.iter().map(|p| p.source().encode());
        ActionsPayload {
            actions: keys.chain(pointers).filter(|s| !s.is_empty()).collect(),
        }
    }

    fn clear_local(&mut self) {
        for keyboard in &mut self.keyboards {
            keyboard.source_mut().clear();
        }
        for pointer in &mut self.pointers {
            pointer.source_mut().clear();
        }
    }

    /// Dispatch the queued actions and empty every source.
    ///
    /// The sources are emptied even when the remote end rejects the sequence.
    pub async fn perform<S: Session + ?Sized>(&mut self, session: &S) -> InteractionResult<()> {
        let payload = self.encode();
        self.clear_local();
        debug!(
            sources = payload.actions.len(),
            ticks = payload.tick_count(),
            "performing actions"
        );
        session.perform_actions(&payload).await
    }

    /// Drop queued actions and release any keys or buttons the remote end
    /// still holds from earlier sequences
    pub async fn clear_actions<S: Session + ?Sized>(
        &mut self,
        session: &S,
    ) -> InteractionResult<()> {
        self.clear_local();
        debug!("releasing actions");
        session.release_actions().await
    }
}
