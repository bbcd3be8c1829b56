//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connected player (the actor a GUI is shown to)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Host-side identity of a synthetic container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u32);

impl ContainerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Window id the viewing client knows the container by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowId(pub u8);

impl WindowId {
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// One of the three fixed anvil positions, independent of host numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    /// Far left, the item being renamed
    InputLeft = 0,
    /// Second ingredient
    InputRight = 1,
    /// Result of combining or renaming
    Output = 2,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::InputLeft, Slot::InputRight, Slot::Output];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::InputLeft),
            1 => Some(Self::InputRight),
            2 => Some(Self::Output),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InputLeft => "input_left",
            Self::InputRight => "input_right",
            Self::Output => "output",
        }
    }
}

/// Text shown to the player (titles, item names)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Component {
    /// Literal text
    Text(String),
    /// Client-side translation key such as `container.repair`
    Translatable(String),
}

impl Component {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn translatable(key: impl Into<String>) -> Self {
        Self::Translatable(key.into())
    }

    /// Default anvil title
    pub fn repair() -> Self {
        Self::translatable("container.repair")
    }

    /// Plain rendering for hosts without chat components
    ///
    /// Translation keys are resolved only for the keys the anvil uses.
    pub fn to_plain(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Translatable(key) if key == "container.repair" => "Repair".to_string(),
            Self::Translatable(key) => key.clone(),
        }
    }

    /// JSON chat component rendering
    pub fn to_json(&self) -> String {
        match self {
            Self::Text(text) => serde_json::json!({ "text": text }).to_string(),
            Self::Translatable(key) => serde_json::json!({ "translate": key }).to_string(),
        }
    }
}

impl Default for Component {
    fn default() -> Self {
        Self::repair()
    }
}

impl From<&str> for Component {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for Component {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Item in one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Material key, e.g. `minecraft:paper`
    pub material: String,
    pub amount: u8,
    /// Custom display name, if any
    pub display_name: Option<String>,
}

impl ItemStack {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            amount: 1,
            display_name: None,
        }
    }

    pub fn paper() -> Self {
        Self::new("minecraft:paper")
    }

    pub fn with_amount(mut self, amount: u8) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

/// Contents of the three anvil slots, indexed by [`Slot`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotContents {
    items: [Option<ItemStack>; 3],
}

impl SlotContents {
    pub fn new(
        left: Option<ItemStack>,
        right: Option<ItemStack>,
        output: Option<ItemStack>,
    ) -> Self {
        Self {
            items: [left, right, output],
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&ItemStack> {
        self.items[slot.index()].as_ref()
    }

    pub fn set(&mut self, slot: Slot, item: Option<ItemStack>) {
        self.items[slot.index()] = item;
    }

    pub fn take(&mut self, slot: Slot) -> Option<ItemStack> {
        self.items[slot.index()].take()
    }

    pub fn clear(&mut self) {
        self.items = [None, None, None];
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }

    /// Occupied slots in logical order
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &ItemStack)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_index(slot.index()), Some(slot));
        }
        assert_eq!(Slot::from_index(3), None);
    }

    #[test]
    fn test_component_rendering() {
        assert_eq!(Component::repair().to_plain(), "Repair");
        assert_eq!(Component::text("Hi").to_json(), r#"{"text":"Hi"}"#);
        assert_eq!(
            Component::repair().to_json(),
            r#"{"translate":"container.repair"}"#
        );
    }

    #[test]
    fn test_slot_contents() {
        let mut contents = SlotContents::default();
        assert!(contents.is_empty());

        contents.set(Slot::Output, Some(ItemStack::paper()));
        assert_eq!(contents.iter().count(), 1);
        assert_eq!(contents.get(Slot::Output).unwrap().material, "minecraft:paper");

        let taken = contents.take(Slot::Output);
        assert!(taken.is_some());
        assert!(contents.is_empty());
    }
}
