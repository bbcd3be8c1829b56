//! # Sessions
//!
//! A [`Session`] is one open anvil as seen through the dispatcher: the
//! current container handle, the title it was shown with and whether it is
//! still open. The handle changes when a title change replaces the container.

use anvilgui_adapters::ContainerHandle;
use anvilgui_core::{AnvilError, Component, PlayerId, Result, WindowId};

/// One open anvil interaction
///
/// # Thread Safety
/// Not synchronized; one caller owns a session at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Current container
    handle: ContainerHandle,

    /// Title the window was last shown with
    title: Component,

    /// Cleared once the container is closed
    open: bool,
}

impl Session {
    pub(crate) fn new(handle: ContainerHandle, title: Component) -> Self {
        Self {
            handle,
            title,
            open: true,
        }
    }

    pub fn owner(&self) -> PlayerId {
        self.handle.owner
    }

    pub fn handle(&self) -> ContainerHandle {
        self.handle
    }

    pub fn window_id(&self) -> WindowId {
        self.handle.window_id
    }

    pub fn title(&self) -> &Component {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Handle of an open session
    ///
    /// # Errors
    /// [`AnvilError::SessionClosed`] once the session was closed.
    pub fn live_handle(&self) -> Result<ContainerHandle> {
        if self.open {
            Ok(self.handle)
        } else {
            Err(AnvilError::SessionClosed(self.handle.container.get()))
        }
    }

    pub(crate) fn replace(&mut self, handle: ContainerHandle, title: Component) {
        self.handle = handle;
        self.title = title;
    }

    pub(crate) fn mark_closed(&mut self) {
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anvilgui_core::ContainerId;

    fn handle(container: u32) -> ContainerHandle {
        ContainerHandle {
            owner: PlayerId::new(1),
            container: ContainerId::new(container),
            window_id: WindowId::new(1),
        }
    }

    #[test]
    fn test_closed_session_has_no_handle() {
        let mut session = Session::new(handle(5), Component::repair());
        assert_eq!(session.live_handle(), Ok(handle(5)));

        session.mark_closed();
        assert!(!session.is_open());
        assert_eq!(session.live_handle(), Err(AnvilError::SessionClosed(5)));
    }
}
