//! # GUI Manager
//!
//! Tracks the open GUI of every player and routes host events to it.

use crate::dispatcher::Dispatcher;
use crate::gui::{AnvilGui, ClickResult, CloseOutcome, CloseReason, Deferred};
use crate::handlers::InboundEvent;
use anvilgui_core::{PlayerId, Result, WindowId};
use anvilgui_protocol::{ClickMode, ServerboundPacket};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// What happened to an inbound packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketOutcome {
    /// Not for an open GUI
    Ignored,
    /// Rename text stored
    Renamed,
    Click(ClickResult),
    Close(CloseOutcome),
}

/// GUI Manager
///
/// # Purpose
/// Owns the open GUIs, at most one per player, and forwards host events.
///
/// # Thread Safety
/// Host event threads may call in concurrently. Each GUI sits behind its own
/// `Mutex`, so events for one player are serialized while different players
/// proceed independently.
///
/// Close listeners and `Run` actions run after the GUI's lock is released
/// and after a closed GUI left the table, so they may call back into the
/// manager. Click handlers and recompute callbacks run under the lock.
pub struct GuiManager {
    /// Shared facade
    dispatcher: Arc<Dispatcher>,

    /// Open GUIs
    /// Key: viewer, Value: GUI
    guis: DashMap<PlayerId, Arc<Mutex<AnvilGui>>>,
}

impl GuiManager {
    /// Create a new GUI manager
    #[inline]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        tracing::debug!("Creating GuiManager");

        Self {
            dispatcher,
            guis: DashMap::new(),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Open `gui` for `player`
    ///
    /// A GUI the player already has open is closed first.
    pub fn open(&self, player: PlayerId, mut gui: AnvilGui) -> Result<Arc<Mutex<AnvilGui>>> {
        if let Some((_, previous)) = self.guis.remove(&player) {
            tracing::debug!("Replacing the open GUI of {}", player);
            self.close_removed(player, previous, CloseReason::Plugin)?;
        }

        gui.open(&self.dispatcher, player)?;
        let gui = Arc::new(Mutex::new(gui));
        // A close listener above may already have opened another GUI
        if let Some(displaced) = self.guis.insert(player, gui.clone()) {
            self.close_removed(player, displaced, CloseReason::Plugin)?;
        }
        Ok(gui)
    }

    /// Close a GUI already taken out of the table
    ///
    /// A GUI that is still open afterwards goes back in, unless the player
    /// got a new one meanwhile. Callbacks run once the lock is released.
    fn close_removed(
        &self,
        player: PlayerId,
        gui: Arc<Mutex<AnvilGui>>,
        reason: CloseReason,
    ) -> Result<CloseOutcome> {
        let mut deferred = Deferred::default();
        let (outcome, still_open) = {
            let mut guard = gui.lock();
            let outcome = guard.close_deferred(&self.dispatcher, reason, &mut deferred);
            (outcome, guard.is_open())
        };

        if still_open {
            self.guis.entry(player).or_insert(gui);
        }
        deferred.run();
        outcome
    }

    /// Drop `gui` from the table if it is still the player's GUI
    fn forget(&self, player: PlayerId, gui: &Arc<Mutex<AnvilGui>>) {
        self.guis
            .remove_if(&player, |_, current| Arc::ptr_eq(current, gui));
    }

    /// The player's open GUI
    #[inline]
    pub fn get(&self, player: PlayerId) -> Option<Arc<Mutex<AnvilGui>>> {
        self.guis.get(&player).map(|entry| entry.clone())
    }

    #[inline]
    pub fn is_open(&self, player: PlayerId) -> bool {
        self.guis.contains_key(&player)
    }

    #[inline]
    pub fn open_count(&self) -> usize {
        self.guis.len()
    }

    /// The player's GUI if it shows `window_id`
    fn gui_for_window(&self, player: PlayerId, window_id: WindowId) -> Option<Arc<Mutex<AnvilGui>>> {
        let gui = self.get(player)?;
        let shows_window = gui
            .lock()
            .session()
            .map_or(false, |session| session.window_id() == window_id);
        shows_window.then_some(gui)
    }

    /// Route one serverbound packet
    pub fn handle_packet(&self, player: PlayerId, packet: &ServerboundPacket) -> Result<PacketOutcome> {
        if !self.is_open(player) {
            return Ok(PacketOutcome::Ignored);
        }

        match InboundEvent::from_packet(&self.dispatcher, packet)? {
            Some(InboundEvent::Click {
                window_id,
                host_slot,
                mode,
            }) => Ok(self
                .handle_click(player, window_id, host_slot, mode)?
                .map_or(PacketOutcome::Ignored, PacketOutcome::Click)),
            Some(InboundEvent::RenameText(text)) => self.handle_rename(player, &text),
            Some(InboundEvent::Close { window_id }) => Ok(self
                .handle_close(player, window_id)?
                .map_or(PacketOutcome::Ignored, PacketOutcome::Close)),
            None => Ok(PacketOutcome::Ignored),
        }
    }

    /// Route a window click
    ///
    /// # Returns
    /// `None` when the click is for a window this manager does not own.
    pub fn handle_click(
        &self,
        player: PlayerId,
        window_id: WindowId,
        host_slot: i16,
        mode: ClickMode,
    ) -> Result<Option<ClickResult>> {
        let Some(gui) = self.gui_for_window(player, window_id) else {
            return Ok(None);
        };

        let mut deferred = Deferred::default();
        let (result, closed) = {
            let mut guard = gui.lock();
            let result = guard.on_click_deferred(&self.dispatcher, host_slot, mode, &mut deferred);
            (result, !guard.is_open())
        };

        if closed {
            self.forget(player, &gui);
        }
        deferred.run();
        result.map(Some)
    }

    /// Route a drag the host reports as a whole
    ///
    /// # Returns
    /// `None` when the drag is in a window this manager does not own.
    pub fn handle_drag(
        &self,
        player: PlayerId,
        window_id: WindowId,
        host_slots: &[u16],
    ) -> Result<Option<ClickResult>> {
        let Some(gui) = self.gui_for_window(player, window_id) else {
            return Ok(None);
        };
        let result = gui.lock().on_drag(&self.dispatcher, host_slots)?;
        Ok(Some(result))
    }

    /// The recompute callback runs with the GUI locked
    fn handle_rename(&self, player: PlayerId, text: &str) -> Result<PacketOutcome> {
        let Some(gui) = self.get(player) else {
            return Ok(PacketOutcome::Ignored);
        };
        gui.lock().on_rename_text_changed(&self.dispatcher, text)?;
        Ok(PacketOutcome::Renamed)
    }

    /// The viewer closed `window_id`
    pub fn handle_close(&self, player: PlayerId, window_id: WindowId) -> Result<Option<CloseOutcome>> {
        let Some(gui) = self.gui_for_window(player, window_id) else {
            return Ok(None);
        };

        let mut deferred = Deferred::default();
        let (outcome, closed) = {
            let mut guard = gui.lock();
            let outcome = guard.close_deferred(&self.dispatcher, CloseReason::Player, &mut deferred);
            (outcome, !guard.is_open())
        };

        if closed {
            self.forget(player, &gui);
        }
        deferred.run();
        outcome.map(Some)
    }

    /// Close the player's GUI from plugin code
    pub fn close(&self, player: PlayerId) -> Result<CloseOutcome> {
        match self.guis.remove(&player) {
            Some((_, gui)) => self.close_removed(player, gui, CloseReason::Plugin),
            None => Ok(CloseOutcome::AlreadyClosed),
        }
    }

    /// The player left the server
    pub fn handle_disconnect(&self, player: PlayerId) -> Result<()> {
        if let Some((_, gui)) = self.guis.remove(&player) {
            self.close_removed(player, gui, CloseReason::Disconnect)?;
        }
        Ok(())
    }

    /// Close every open GUI
    ///
    /// Keeps going past failures and returns the first one.
    pub fn shutdown(&self) -> Result<()> {
        let players: Vec<PlayerId> = self.guis.iter().map(|entry| *entry.key()).collect();
        tracing::info!("Closing {} open anvil GUIs", players.len());

        let mut first_error = None;
        for player in players {
            if let Some((_, gui)) = self.guis.remove(&player) {
                if let Err(err) = self.close_removed(player, gui, CloseReason::Plugin) {
                    tracing::warn!("Failed to close the GUI of {}: {}", player, err);
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvilgui_adapters::AdapterRegistry;
    use crate::gui::ResponseAction;
    use anvilgui_core::{AnvilError, ItemStack, Slot};
    use anvilgui_host::MemoryHost;
    use anvilgui_protocol::ClientboundPacket;
    use std::sync::mpsc;
    use std::time::Duration;

    fn setup(version: &str) -> (Arc<MemoryHost>, GuiManager) {
        let host = Arc::new(MemoryHost::new(version));
        let dispatcher = Arc::new(Dispatcher::new(host.clone(), AdapterRegistry::with_defaults().unwrap()));
        (host, GuiManager::new(dispatcher))
    }

    fn online(host: &MemoryHost, id: u32) -> PlayerId {
        let player = PlayerId::new(id);
        host.connect(player);
        player
    }

    fn window_of(manager: &GuiManager, player: PlayerId) -> WindowId {
        manager.get(player).unwrap().lock().session().unwrap().window_id()
    }

    /// Run `f` on another thread and fail if it does not return in time
    fn finishes<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(f());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("manager call did not return")
    }

    #[test]
    fn test_manager_creation() {
        let (_, manager) = setup("1.19.4");
        assert_eq!(manager.open_count(), 0);
    }

    #[test]
    fn test_full_interaction() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        let gui = AnvilGui::builder()
            .text("")
            .on_recompute(|state| Some(ItemStack::paper().with_display_name(state.text.clone())))
            .build();
        manager.open(player, gui).unwrap();
        let window = window_of(&manager, player);

        let rename = ServerboundPacket::RenameItem { name: "Steve".into() };
        assert_eq!(manager.handle_packet(player, &rename).unwrap(), PacketOutcome::Renamed);

        let gui = manager.get(player).unwrap();
        let snapshot = gui.lock().snapshot(manager.dispatcher()).unwrap();
        assert_eq!(snapshot.text, "Steve");
        assert_eq!(snapshot.output, Some(ItemStack::paper().with_display_name("Steve")));
        drop(gui);

        let click = ServerboundPacket::ClickWindow {
            window_id: window,
            slot: 2,
            button: 0,
            mode: ClickMode::Pickup,
        };
        assert_eq!(
            manager.handle_packet(player, &click).unwrap(),
            PacketOutcome::Click(ClickResult::Cancelled)
        );

        let close = ServerboundPacket::CloseWindow { window_id: window };
        assert_eq!(
            manager.handle_packet(player, &close).unwrap(),
            PacketOutcome::Close(CloseOutcome::Closed)
        );
        assert!(!manager.is_open(player));
        assert_eq!(host.container_count(), 0);
    }

    #[test]
    fn test_foreign_window_ignored() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        manager.open(player, AnvilGui::builder().build()).unwrap();

        assert_eq!(
            manager.handle_click(player, WindowId::new(99), 0, ClickMode::Pickup).unwrap(),
            None
        );
        assert_eq!(manager.handle_close(player, WindowId::new(99)).unwrap(), None);
        assert!(manager.is_open(player));
    }

    #[test]
    fn test_packets_without_gui_ignored() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        let rename = ServerboundPacket::RenameItem { name: "x".into() };
        assert_eq!(manager.handle_packet(player, &rename).unwrap(), PacketOutcome::Ignored);
    }

    #[test]
    fn test_opening_again_replaces() {
        let (host, manager) = setup("1.17.1");
        let player = online(&host, 1);
        manager.open(player, AnvilGui::builder().text("one").build()).unwrap();
        let first = window_of(&manager, player);

        manager.open(player, AnvilGui::builder().text("two").build()).unwrap();
        assert_ne!(window_of(&manager, player), first);
        assert_eq!(manager.open_count(), 1);
        assert_eq!(host.container_count(), 1);
    }

    #[test]
    fn test_prevent_close_keeps_gui() {
        let (host, manager) = setup("1.8.8");
        let player = online(&host, 1);
        manager
            .open(player, AnvilGui::builder().text("stay").prevent_close().build())
            .unwrap();
        let window = window_of(&manager, player);

        assert_eq!(
            manager.handle_close(player, window).unwrap(),
            Some(CloseOutcome::Reopened)
        );
        assert!(manager.is_open(player));
        assert_ne!(window_of(&manager, player), window);
    }

    #[test]
    fn test_disconnect_closes_without_packets() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        manager.open(player, AnvilGui::builder().text("x").build()).unwrap();
        host.take_sent();

        host.disconnect(player);
        manager.handle_disconnect(player).unwrap();
        assert!(!manager.is_open(player));
        assert_eq!(host.container_count(), 0);
        assert!(host.sent_packets().is_empty());
    }

    #[test]
    fn test_shutdown_closes_all() {
        let (host, manager) = setup("1.19.4");
        for id in 1..=3 {
            let player = online(&host, id);
            manager
                .open(player, AnvilGui::builder().item_left(ItemStack::paper()).build())
                .unwrap();
        }
        assert_eq!(manager.open_count(), 3);

        manager.shutdown().unwrap();
        assert_eq!(manager.open_count(), 0);
        assert_eq!(host.container_count(), 0);
        let closes = host
            .sent_packets()
            .into_iter()
            .filter(|s| matches!(s.packet, ClientboundPacket::CloseWindow { .. }))
            .count();
        assert_eq!(closes, 3);
    }

    #[test]
    fn test_interactable_slot_click_allowed() {
        let (host, manager) = setup("1.14.4");
        let player = online(&host, 1);
        manager
            .open(
                player,
                AnvilGui::builder()
                    .text("x")
                    .interactable_slots(&[Slot::InputLeft])
                    .build(),
            )
            .unwrap();
        let window = window_of(&manager, player);

        assert_eq!(
            manager.handle_click(player, window, 0, ClickMode::Pickup).unwrap(),
            Some(ClickResult::Allowed)
        );
    }

    #[test]
    fn test_drag_routed_to_gui() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        manager.open(player, AnvilGui::builder().text("x").build()).unwrap();
        let window = window_of(&manager, player);

        assert_eq!(
            manager.handle_drag(player, window, &[0, 9]).unwrap(),
            Some(ClickResult::Cancelled)
        );
        assert_eq!(
            manager.handle_drag(player, window, &[9, 10]).unwrap(),
            Some(ClickResult::Allowed)
        );
        assert_eq!(manager.handle_drag(player, WindowId::new(77), &[0]).unwrap(), None);
    }

    #[test]
    fn test_close_listener_opens_next_gui() {
        let (host, manager) = setup("1.19.4");
        let manager = Arc::new(manager);
        let player = online(&host, 1);

        let chained = manager.clone();
        let first = AnvilGui::builder()
            .text("first")
            .on_close(move |state| {
                let next = AnvilGui::builder().text("second").build();
                chained.open(state.player, next).unwrap();
            })
            .build();
        manager.open(player, first).unwrap();
        let window = window_of(&manager, player);

        let routed = manager.clone();
        let outcome = finishes(move || routed.handle_close(player, window).unwrap());
        assert_eq!(outcome, Some(CloseOutcome::Closed));

        assert!(manager.is_open(player));
        assert_ne!(window_of(&manager, player), window);
        let gui = manager.get(player).unwrap();
        assert_eq!(gui.lock().snapshot(manager.dispatcher()).unwrap().text, "second");
        assert_eq!(host.container_count(), 1);
    }

    #[test]
    fn test_replacing_gui_runs_close_listener_unlocked() {
        let (host, manager) = setup("1.17.1");
        let manager = Arc::new(manager);
        let player = online(&host, 1);

        let observer = manager.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let first = AnvilGui::builder()
            .text("one")
            .on_close(move |state| sink.lock().push(observer.is_open(state.player)))
            .build();
        manager.open(player, first).unwrap();

        let opener = manager.clone();
        finishes(move || {
            opener
                .open(player, AnvilGui::builder().text("two").build())
                .unwrap();
        });
        assert_eq!(seen.lock().as_slice(), &[false]);
        assert_eq!(manager.open_count(), 1);
        assert_eq!(host.container_count(), 1);
    }

    #[test]
    fn test_run_action_closes_through_manager() {
        let (host, manager) = setup("1.19.4");
        let manager = Arc::new(manager);
        let player = online(&host, 1);

        let closer = manager.clone();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let sink = outcomes.clone();
        let gui = AnvilGui::builder()
            .text("x")
            .on_click(move |slot, _| {
                if slot != Slot::Output {
                    return Vec::new();
                }
                let closer = closer.clone();
                let sink = sink.clone();
                vec![ResponseAction::run(move |player| {
                    sink.lock().push(closer.close(player).unwrap());
                })]
            })
            .build();
        manager.open(player, gui).unwrap();
        let window = window_of(&manager, player);

        let routed = manager.clone();
        let result = finishes(move || {
            routed
                .handle_click(player, window, 2, ClickMode::Pickup)
                .unwrap()
        });
        assert_eq!(result, Some(ClickResult::Cancelled));
        assert_eq!(outcomes.lock().as_slice(), &[CloseOutcome::Closed]);
        assert!(!manager.is_open(player));
        assert_eq!(host.container_count(), 0);
    }

    #[test]
    fn test_failed_close_keeps_gui_tracked() {
        let (host, manager) = setup("1.19.4");
        let player = online(&host, 1);
        manager.open(player, AnvilGui::builder().text("x").build()).unwrap();
        let container = manager
            .get(player)
            .unwrap()
            .lock()
            .session()
            .unwrap()
            .handle()
            .container;
        host.fail_writes(container);

        assert!(matches!(
            manager.close(player),
            Err(AnvilError::HostOperationFailed { operation: "set_item", .. })
        ));
        assert!(manager.is_open(player));
        assert!(manager.get(player).unwrap().lock().is_open());
        assert_eq!(host.container_count(), 1);
    }

    #[test]
    fn test_failed_reopen_surfaces_host_error() {
        let (host, manager) = setup("1.8.8");
        let player = online(&host, 1);
        manager
            .open(player, AnvilGui::builder().text("stay").prevent_close().build())
            .unwrap();
        let window = window_of(&manager, player);
        host.disconnect(player);

        assert!(matches!(
            manager.handle_close(player, window),
            Err(AnvilError::HostOperationFailed {
                operation: "create_container",
                ..
            })
        ));
        // The old window is still tracked and can be cleaned up on disconnect
        assert!(manager.is_open(player));
        manager.handle_disconnect(player).unwrap();
        assert!(!manager.is_open(player));
        assert_eq!(host.container_count(), 0);
    }
}
