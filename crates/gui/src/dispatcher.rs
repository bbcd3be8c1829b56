//! # Dispatcher
//!
//! The single entry point callers use. The first operation detects the host
//! version, resolves it against the registry and keeps the outcome; every
//! later operation forwards to that adapter. A failed resolution is kept as
//! well, and every operation then fails with it.
//!
//! # Thread Safety
//!
//! Binding happens at most once. Concurrent first calls block on the one
//! initializer and then observe the same adapter (or the same failure).
//!
//! # Example
//!
//! ```
//! use anvilgui_adapters::AdapterRegistry;
//! use anvilgui_core::{Component, ItemStack, PlayerId, SlotContents};
//! use anvilgui_gui::Dispatcher;
//! use anvilgui_host::MemoryHost;
//! use std::sync::Arc;
//!
//! let host = Arc::new(MemoryHost::new("1.19.4-R0.1-SNAPSHOT"));
//! let player = PlayerId::new(1);
//! host.connect(player);
//!
//! let dispatcher = Dispatcher::new(host, AdapterRegistry::with_defaults().unwrap());
//! let contents = SlotContents::new(Some(ItemStack::paper()), None, None);
//! let session = dispatcher.open(player, &contents, Component::repair()).unwrap();
//! assert!(session.is_open());
//! ```

use crate::session::Session;
use anvilgui_adapters::{AdapterKind, AdapterRegistry, VersionAdapter};
use anvilgui_core::{Component, ItemStack, PlayerId, Result, Slot, SlotContents};
use anvilgui_host::{Host, HostResultExt};
use anvilgui_protocol::ServerboundPacket;
use anvilgui_version::VersionDetector;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Version-independent facade over the bound adapter
pub struct Dispatcher {
    /// Embedding server
    host: Arc<dyn Host>,

    /// Reads the host version once
    detector: VersionDetector,

    /// Range table built at startup
    registry: AdapterRegistry,

    /// Bound adapter or the failure to bind one
    binding: OnceCell<Result<AdapterKind>>,
}

impl Dispatcher {
    /// Create a dispatcher for `host`
    ///
    /// Nothing is detected until the first operation.
    pub fn new<H: Host + 'static>(host: Arc<H>, registry: AdapterRegistry) -> Self {
        Self::with_version_override(host, registry, None)
    }

    /// Create a dispatcher that uses `version_override` instead of the
    /// host's version string
    pub fn with_version_override<H: Host + 'static>(
        host: Arc<H>,
        registry: AdapterRegistry,
        version_override: Option<String>,
    ) -> Self {
        let detector = VersionDetector::with_override(host.clone(), version_override);
        Self {
            host,
            detector,
            registry,
            binding: OnceCell::new(),
        }
    }

    /// The bound adapter, binding it on first use
    ///
    /// # Errors
    /// [`AnvilError::UnrecognizedVersion`] or [`AnvilError::UnsupportedVersion`],
    /// identical on every call once binding failed.
    pub fn adapter(&self) -> Result<&AdapterKind> {
        self.binding
            .get_or_init(|| self.bind())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn bind(&self) -> Result<AdapterKind> {
        let bound = self
            .detector
            .detect()
            .clone()
            .into_result()
            .and_then(|version| {
                let adapter = self.registry.resolve(version)?;
                tracing::info!("Using adapter {} for server version {}", adapter.family(), version);
                Ok(adapter)
            });

        if let Err(err) = &bound {
            tracing::warn!("AnvilGUI is unavailable on this server: {}", err);
        }
        bound
    }

    /// Whether binding already ran, successfully or not
    pub fn is_bound(&self) -> bool {
        self.binding.get().is_some()
    }

    pub fn host(&self) -> &dyn Host {
        self.host.as_ref()
    }

    pub fn registry(&self) -> &AdapterRegistry {
        &self.registry
    }

    // ========== Facade ==========

    /// Open an anvil for `owner` holding `contents`
    pub fn open(
        &self,
        owner: PlayerId,
        contents: &SlotContents,
        title: impl Into<Component>,
    ) -> Result<Session> {
        let adapter = self.adapter()?;
        let title = title.into();
        let handle = adapter.open_container(self.host(), owner, contents, &title)?;
        Ok(Session::new(handle, title))
    }

    /// Change the window title
    ///
    /// On error the session keeps its current handle and title.
    pub fn set_title(&self, session: &mut Session, title: impl Into<Component>) -> Result<()> {
        let adapter = self.adapter()?;
        let handle = session.live_handle()?;
        let title = title.into();
        let handle = adapter.set_title(self.host(), handle, &title)?;
        session.replace(handle, title);
        Ok(())
    }

    /// Show the window again with its current title
    ///
    /// Used after the viewer closed a window that must stay open.
    pub fn reopen(&self, session: &mut Session) -> Result<()> {
        let title = session.title().clone();
        self.set_title(session, title)
    }

    pub fn rename_text(&self, session: &Session) -> Result<String> {
        let adapter = self.adapter()?;
        adapter.rename_text(self.host(), session.live_handle()?)
    }

    /// Replace the rename field shown to the viewer
    pub fn set_rename_text(&self, session: &Session, text: &str) -> Result<()> {
        let adapter = self.adapter()?;
        adapter.set_rename_text(self.host(), session.live_handle()?, text)
    }

    /// Store text the viewer typed
    ///
    /// Unlike [`Dispatcher::set_rename_text`] nothing is sent back; the
    /// viewer already shows the text.
    pub fn record_rename_text(&self, session: &Session, text: &str) -> Result<()> {
        self.adapter()?;
        let handle = session.live_handle()?;
        self.host
            .set_rename_text(handle.container, Some(text.to_string()))
            .op("set_rename_text")
    }

    pub fn item(&self, session: &Session, slot: Slot) -> Result<Option<ItemStack>> {
        let adapter = self.adapter()?;
        adapter.item(self.host(), session.live_handle()?, slot)
    }

    pub fn set_item(&self, session: &Session, slot: Slot, item: Option<ItemStack>) -> Result<()> {
        let adapter = self.adapter()?;
        adapter.set_item(self.host(), session.live_handle()?, slot, item)
    }

    /// Host slot number of a logical slot
    pub fn translate_slot(&self, slot: Slot) -> Result<u16> {
        Ok(self.adapter()?.translate_slot(slot))
    }

    /// Logical slot of a host slot number, `None` for the player's inventory
    pub fn logical_slot(&self, host_slot: u16) -> Result<Option<Slot>> {
        Ok(self.adapter()?.logical_slot(host_slot))
    }

    /// Rename text carried by an inbound packet
    pub fn decode_rename(&self, packet: &ServerboundPacket) -> Result<Option<String>> {
        Ok(self.adapter()?.decode_rename(packet))
    }

    /// Close the window and drop the container
    ///
    /// The session is marked closed only once the container is gone.
    ///
    /// # Errors
    /// [`AnvilError::SessionClosed`] if the session was already closed.
    pub fn close(&self, session: &mut Session) -> Result<()> {
        let adapter = self.adapter()?;
        let handle = session.live_handle()?;
        adapter.close_container(self.host(), handle)?;
        session.mark_closed();
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("binding", &self.binding.get())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
