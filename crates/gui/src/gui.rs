//! # Anvil GUI
//!
//! A text-input GUI built on an anvil window. The builder collects the
//! initial items, title and callbacks; [`AnvilGui::open`] shows it through a
//! [`Dispatcher`] and the event methods drive it afterwards.
//!
//! # Event Flow
//!
//! 1. Rename text arrives: stored, then the recompute callback refreshes the output
//! 2. A slot is clicked: the click is cancelled unless the slot is
//!    interactable, then the click handler's actions run in order
//! 3. The window closes: the close listener receives a snapshot, also when
//!    prevent-close reopens the window right away
//!
//! # Re-entrancy
//!
//! The close listener and `Run` actions are handed back as [`Deferred`]
//! callbacks by the `*_deferred` methods so an owner holding the GUI behind a
//! lock can release it first. The plain methods run them before returning.
//! The click handler and the recompute callback always run with the GUI
//! borrowed and must not call back into its owner.

use crate::dispatcher::Dispatcher;
use crate::session::Session;
use anvilgui_core::{AnvilError, Component, ItemStack, PlayerId, Result, Slot, SlotContents};
use anvilgui_protocol::ClickMode;
use std::fmt;
use std::sync::Arc;

/// Slot number the host uses for clicks outside the window
pub const OUTSIDE_WINDOW_SLOT: i16 = -999;

/// Click handler: logical slot and current state in, actions out
pub type ClickHandler = Box<dyn Fn(Slot, &StateSnapshot) -> Vec<ResponseAction> + Send + Sync>;

/// Receives the state on every close
pub type CloseListener = Arc<dyn Fn(StateSnapshot) + Send + Sync>;

/// Computes the output item from the current state
pub type RecomputeCallback = Box<dyn Fn(&StateSnapshot) -> Option<ItemStack> + Send + Sync>;

/// State of the GUI at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub player: PlayerId,
    /// Rename field
    pub text: String,
    pub left: Option<ItemStack>,
    pub right: Option<ItemStack>,
    pub output: Option<ItemStack>,
}

/// Something to do after a click
pub enum ResponseAction {
    /// Put text into the rename field
    ReplaceInputText(String),
    /// Change the title, optionally carrying the typed text over
    UpdateTitle {
        title: Component,
        preserve_rename_text: bool,
    },
    /// Close the GUI, ignoring prevent-close
    Close,
    /// Run arbitrary code for the player
    Run(Box<dyn FnOnce(PlayerId) + Send>),
}

impl ResponseAction {
    pub fn replace_input_text(text: impl Into<String>) -> Self {
        Self::ReplaceInputText(text.into())
    }

    pub fn update_title(title: impl Into<Component>, preserve_rename_text: bool) -> Self {
        Self::UpdateTitle {
            title: title.into(),
            preserve_rename_text,
        }
    }

    pub fn run(f: impl FnOnce(PlayerId) + Send + 'static) -> Self {
        Self::Run(Box::new(f))
    }
}

impl fmt::Debug for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReplaceInputText(text) => f.debug_tuple("ReplaceInputText").field(text).finish(),
            Self::UpdateTitle {
                title,
                preserve_rename_text,
            } => f
                .debug_struct("UpdateTitle")
                .field("title", title)
                .field("preserve_rename_text", preserve_rename_text)
                .finish(),
            Self::Close => f.write_str("Close"),
            Self::Run(_) => f.write_str("Run(..)"),
        }
    }
}

/// Callbacks held back until the caller lets go of the GUI
#[must_use = "deferred callbacks do nothing unless run"]
#[derive(Default)]
pub struct Deferred {
    callbacks: Vec<Box<dyn FnOnce() + Send>>,
}

impl Deferred {
    fn push(&mut self, callback: impl FnOnce() + Send + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run the callbacks in the order they were queued
    pub fn run(self) {
        for callback in self.callbacks {
            callback();
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// Whether the host should apply a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickResult {
    Allowed,
    Cancelled,
}

/// Why a GUI is closing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The viewer closed the window
    Player,
    /// Plugin code, a `Close` action or shutdown
    Plugin,
    /// The viewer left the server
    Disconnect,
}

/// What a close request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    /// Prevent-close showed the window again
    Reopened,
    AlreadyClosed,
}

/// Builder for [`AnvilGui`]
#[derive(Default)]
pub struct AnvilGuiBuilder {
    title: Option<Component>,
    text: Option<String>,
    items: SlotContents,
    interactable: Vec<Slot>,
    prevent_close: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseListener>,
    on_recompute: Option<RecomputeCallback>,
}

impl AnvilGuiBuilder {
    pub fn title(mut self, title: impl Into<Component>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Initial rename text, shown as the left item's name
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn item_left(mut self, item: ItemStack) -> Self {
        self.items.set(Slot::InputLeft, Some(item));
        self
    }

    pub fn item_right(mut self, item: ItemStack) -> Self {
        self.items.set(Slot::InputRight, Some(item));
        self
    }

    pub fn item_output(mut self, item: ItemStack) -> Self {
        self.items.set(Slot::Output, Some(item));
        self
    }

    /// Slots whose clicks the host may apply
    pub fn interactable_slots(mut self, slots: &[Slot]) -> Self {
        self.interactable.extend_from_slice(slots);
        self
    }

    /// Reopen the window whenever the viewer closes it
    pub fn prevent_close(mut self) -> Self {
        self.prevent_close = true;
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(Slot, &StateSnapshot) -> Vec<ResponseAction> + Send + Sync + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Called on every close, including one that prevent-close turns into a reopen
    pub fn on_close(mut self, listener: impl Fn(StateSnapshot) + Send + Sync + 'static) -> Self {
        self.on_close = Some(Arc::new(listener));
        self
    }

    pub fn on_recompute(
        mut self,
        callback: impl Fn(&StateSnapshot) -> Option<ItemStack> + Send + Sync + 'static,
    ) -> Self {
        self.on_recompute = Some(Box::new(callback));
        self
    }

    pub fn build(mut self) -> AnvilGui {
        if let Some(text) = &self.text {
            let left = self
                .items
                .take(Slot::InputLeft)
                .unwrap_or_else(ItemStack::paper)
                .with_display_name(text.clone());
            self.items.set(Slot::InputLeft, Some(left));
        }

        AnvilGui {
            title: self.title.unwrap_or_default(),
            text: self.text,
            items: self.items,
            interactable: self.interactable,
            prevent_close: self.prevent_close,
            on_click: self.on_click,
            on_close: self.on_close,
            on_recompute: self.on_recompute,
            session: None,
        }
    }
}

/// Anvil text-input GUI
///
/// # Lifecycle
/// Built closed; [`AnvilGui::open`] shows it once. After it closes it stays
/// closed and the event methods report [`AnvilError::SessionClosed`].
pub struct AnvilGui {
    title: Component,
    text: Option<String>,
    items: SlotContents,
    interactable: Vec<Slot>,
    prevent_close: bool,
    on_click: Option<ClickHandler>,
    on_close: Option<CloseListener>,
    on_recompute: Option<RecomputeCallback>,
    session: Option<Session>,
}

impl AnvilGui {
    pub fn builder() -> AnvilGuiBuilder {
        AnvilGuiBuilder::default()
    }

    /// Show the GUI to `player`
    ///
    /// # Errors
    /// [`AnvilError::InvalidState`] if the GUI was already opened.
    pub fn open(&mut self, dispatcher: &Dispatcher, player: PlayerId) -> Result<()> {
        if self.session.is_some() {
            return Err(AnvilError::InvalidState("GUI was already opened".into()));
        }

        let session = dispatcher.open(player, &self.items, self.title.clone())?;
        if let Some(text) = &self.text {
            dispatcher.set_rename_text(&session, text)?;
        }

        tracing::info!("Opened anvil GUI for {} (window {})", player, session.window_id().get());
        self.session = Some(session);
        Ok(())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.as_ref().map_or(false, Session::is_open)
    }

    pub fn prevents_close(&self) -> bool {
        self.prevent_close
    }

    pub fn is_interactable(&self, slot: Slot) -> bool {
        self.interactable.contains(&slot)
    }

    fn live_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| AnvilError::InvalidState("GUI is not open".into()))
    }

    /// Current state
    pub fn snapshot(&self, dispatcher: &Dispatcher) -> Result<StateSnapshot> {
        let session = self.live_session()?;
        Ok(StateSnapshot {
            player: session.owner(),
            text: dispatcher.rename_text(session)?,
            left: dispatcher.item(session, Slot::InputLeft)?,
            right: dispatcher.item(session, Slot::InputRight)?,
            output: dispatcher.item(session, Slot::Output)?,
        })
    }

    /// The viewer typed into the rename field
    pub fn on_rename_text_changed(&mut self, dispatcher: &Dispatcher, text: &str) -> Result<()> {
        dispatcher.record_rename_text(self.live_session()?, text)?;
        tracing::debug!("Rename text is now {:?}", text);
        self.recompute(dispatcher)
    }

    /// Write a slot; input changes refresh the output
    pub fn set_item(&mut self, dispatcher: &Dispatcher, slot: Slot, item: Option<ItemStack>) -> Result<()> {
        dispatcher.set_item(self.live_session()?, slot, item)?;
        if slot != Slot::Output {
            self.recompute(dispatcher)?;
        }
        Ok(())
    }

    /// Refresh the output item through the recompute callback
    pub fn recompute(&mut self, dispatcher: &Dispatcher) -> Result<()> {
        let Some(callback) = &self.on_recompute else {
            return Ok(());
        };
        let snapshot = self.snapshot(dispatcher)?;
        let output = callback(&snapshot);
        if output != snapshot.output {
            dispatcher.set_item(self.live_session()?, Slot::Output, output)?;
        }
        Ok(())
    }

    /// Raw click from the host
    ///
    /// `host_slot` uses the host's numbering; slots past the anvil belong to
    /// the viewer's inventory.
    ///
    /// A click on an anvil slot goes through [`AnvilGui::on_slot_click`] in
    /// every mode, so the handler also sees double clicks and shift-moves
    /// there. Inventory clicks never reach the handler: double clicks and
    /// shift-moves are cancelled since they would pull items through the
    /// anvil, anything else is allowed.
    pub fn on_click(
        &mut self,
        dispatcher: &Dispatcher,
        host_slot: i16,
        mode: ClickMode,
    ) -> Result<ClickResult> {
        let mut deferred = Deferred::default();
        let result = self.on_click_deferred(dispatcher, host_slot, mode, &mut deferred);
        deferred.run();
        result
    }

    /// [`AnvilGui::on_click`], queueing callbacks into `deferred` instead of running them
    pub fn on_click_deferred(
        &mut self,
        dispatcher: &Dispatcher,
        host_slot: i16,
        mode: ClickMode,
        deferred: &mut Deferred,
    ) -> Result<ClickResult> {
        self.live_session()?.live_handle()?;
        if host_slot == OUTSIDE_WINDOW_SLOT {
            return Ok(ClickResult::Allowed);
        }

        let logical = match u16::try_from(host_slot) {
            Ok(slot) => dispatcher.logical_slot(slot)?,
            Err(_) => return Ok(ClickResult::Cancelled),
        };

        match logical {
            Some(slot) => self.on_slot_click_deferred(dispatcher, slot, deferred),
            None if matches!(mode, ClickMode::PickupAll | ClickMode::QuickMove) => {
                tracing::debug!("Cancelled {:?} click in the inventory", mode);
                Ok(ClickResult::Cancelled)
            }
            None => Ok(ClickResult::Allowed),
        }
    }

    /// Drag across `host_slots`
    ///
    /// Cancelled when it covers any anvil slot that is not interactable.
    pub fn on_drag(&self, dispatcher: &Dispatcher, host_slots: &[u16]) -> Result<ClickResult> {
        self.live_session()?.live_handle()?;
        for &host_slot in host_slots {
            if let Some(slot) = dispatcher.logical_slot(host_slot)? {
                if !self.is_interactable(slot) {
                    return Ok(ClickResult::Cancelled);
                }
            }
        }
        Ok(ClickResult::Allowed)
    }

    /// Click on one of the anvil slots
    pub fn on_slot_click(&mut self, dispatcher: &Dispatcher, slot: Slot) -> Result<ClickResult> {
        let mut deferred = Deferred::default();
        let result = self.on_slot_click_deferred(dispatcher, slot, &mut deferred);
        deferred.run();
        result
    }

    /// [`AnvilGui::on_slot_click`], queueing callbacks into `deferred` instead of running them
    ///
    /// Actions stop at the first failure. Callbacks queued before it stay in
    /// `deferred`.
    pub fn on_slot_click_deferred(
        &mut self,
        dispatcher: &Dispatcher,
        slot: Slot,
        deferred: &mut Deferred,
    ) -> Result<ClickResult> {
        self.live_session()?.live_handle()?;
        let result = if self.is_interactable(slot) {
            ClickResult::Allowed
        } else {
            ClickResult::Cancelled
        };

        let Some(handler) = &self.on_click else {
            return Ok(result);
        };
        let snapshot = self.snapshot(dispatcher)?;
        let actions = handler(slot, &snapshot);

        for action in actions {
            if let Err(err) = self.apply(dispatcher, action, deferred) {
                tracing::error!("Click action on {} failed: {}", slot.as_str(), err);
                return Err(err);
            }
            if !self.is_open() {
                break;
            }
        }
        Ok(result)
    }

    fn apply(
        &mut self,
        dispatcher: &Dispatcher,
        action: ResponseAction,
        deferred: &mut Deferred,
    ) -> Result<()> {
        tracing::debug!("Applying {:?}", action);
        match action {
            ResponseAction::ReplaceInputText(text) => {
                dispatcher.set_rename_text(self.live_session()?, &text)
            }
            ResponseAction::UpdateTitle {
                title,
                preserve_rename_text,
            } => self.update_title(dispatcher, title, preserve_rename_text),
            ResponseAction::Close => self
                .close_deferred(dispatcher, CloseReason::Plugin, deferred)
                .map(|_| ()),
            ResponseAction::Run(f) => {
                let owner = self.live_session()?.owner();
                deferred.push(move || f(owner));
                Ok(())
            }
        }
    }

    /// Change the title, keeping the typed text when asked to
    pub fn update_title(
        &mut self,
        dispatcher: &Dispatcher,
        title: impl Into<Component>,
        preserve_rename_text: bool,
    ) -> Result<()> {
        let text = dispatcher.rename_text(self.live_session()?)?;
        let title = title.into();

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| AnvilError::InvalidState("GUI is not open".into()))?;
        dispatcher.set_title(session, title.clone())?;
        self.title = title;

        if preserve_rename_text && !text.is_empty() {
            dispatcher.set_rename_text(self.live_session()?, &text)?;
        }
        Ok(())
    }

    /// Close the GUI
    ///
    /// A [`CloseReason::Player`] close of a prevent-close GUI reopens the
    /// window instead. Otherwise the container is emptied and removed. Either
    /// way the close listener receives the state at that moment.
    pub fn close(&mut self, dispatcher: &Dispatcher, reason: CloseReason) -> Result<CloseOutcome> {
        let mut deferred = Deferred::default();
        let outcome = self.close_deferred(dispatcher, reason, &mut deferred);
        deferred.run();
        outcome
    }

    /// [`AnvilGui::close`], queueing the close listener into `deferred`
    ///
    /// The listener is queued only once the window was closed or reopened.
    pub fn close_deferred(
        &mut self,
        dispatcher: &Dispatcher,
        reason: CloseReason,
        deferred: &mut Deferred,
    ) -> Result<CloseOutcome> {
        if !self.is_open() {
            return Ok(CloseOutcome::AlreadyClosed);
        }

        let snapshot = self.snapshot(dispatcher)?;
        let reopen = reason == CloseReason::Player && self.prevent_close;
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| AnvilError::InvalidState("GUI is not open".into()))?;

        let outcome = if reopen {
            dispatcher.reopen(session)?;
            tracing::debug!("Reopened prevent-close GUI for {}", snapshot.player);
            CloseOutcome::Reopened
        } else {
            dispatcher.close(session)?;
            tracing::info!("Closed anvil GUI for {} ({:?})", snapshot.player, reason);
            CloseOutcome::Closed
        };

        if let Some(listener) = &self.on_close {
            let listener = Arc::clone(listener);
            deferred.push(move || listener(snapshot));
        }
        Ok(outcome)
    }
}

impl fmt::Debug for AnvilGui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnvilGui")
            .field("title", &self.title)
            .field("items", &self.items)
            .field("interactable", &self.interactable)
            .field("prevent_close", &self.prevent_close)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
