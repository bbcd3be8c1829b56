//! Container and window id generation

use crate::{ContainerId, WindowId};
use parking_lot::Mutex;
use std::sync::atomic::{self, AtomicU32};

/// Largest window id handed to clients before the counter wraps
pub const MAX_WINDOW_ID: u8 = 100;

/// Thread-safe id source for synthetic containers
///
/// Container ids are unique for the lifetime of the generator. Window ids
/// follow the host's container counter: `1..=100`, wrapping back to 1.
/// Window id 0 belongs to the player's own inventory and is never issued.
pub struct IdGenerator {
    next_container: AtomicU32,
    window_counter: Mutex<u8>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            next_container: AtomicU32::new(1),
            window_counter: Mutex::new(0),
        }
    }

    /// Get the next container id
    pub fn next_container_id(&self) -> ContainerId {
        ContainerId::new(self.next_container.fetch_add(1, atomic::Ordering::Relaxed))
    }

    /// Get the next window id
    pub fn next_window_id(&self) -> WindowId {
        let mut counter = self.window_counter.lock();
        *counter = *counter % MAX_WINDOW_ID + 1;
        WindowId::new(*counter)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_ids_unique() {
        let gen = IdGenerator::new();
        let id1 = gen.next_container_id();
        let id2 = gen.next_container_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_window_ids_wrap() {
        let gen = IdGenerator::new();
        assert_eq!(gen.next_window_id().get(), 1);
        for _ in 0..98 {
            gen.next_window_id();
        }
        assert_eq!(gen.next_window_id().get(), 100);
        assert_eq!(gen.next_window_id().get(), 1);
    }
}
