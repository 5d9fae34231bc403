//! Slot registry
//!
//! The authoritative store of "the font so far": every registered character
//! and the raster drawn for it, if any. Insertion order is kept for listing.
//! The registry is unaware of history; callers record snapshots after they
//! mutate it.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::raster::RasterSnapshot;

/// One character's position in the font
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub character: String,
    pub glyph: Option<RasterSnapshot>,
}

impl Slot {
    pub fn empty(character: impl Into<String>) -> Self {
        Self {
            character: character.into(),
            glyph: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.glyph.is_none()
    }
}

/// Insertion-ordered mapping from character to slot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlotRegistry {
    slots: Vec<Slot>,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, character: &str) -> Option<usize> {
        self.slots.iter().position(|s| s.character == character)
    }

    /// Register an empty slot. Returns false if the character already had one.
    pub fn add_slot(&mut self, character: &str) -> bool {
        if self.contains(character) {
            return false;
        }
        self.slots.push(Slot::empty(character));
        true
    }

    /// Assign a glyph, creating the slot if needed. Returns the previous glyph.
    pub fn set_glyph(&mut self, character: &str, raster: RasterSnapshot) -> Option<RasterSnapshot> {
        match self.position(character) {
            Some(idx) => self.slots[idx].glyph.replace(raster),
            None => {
                self.slots.push(Slot {
                    character: character.to_string(),
                    glyph: Some(raster),
                });
                None
            }
        }
    }

    /// Delete a slot entirely. Absent characters are ignored.
    pub fn remove_slot(&mut self, character: &str) -> Option<Slot> {
        self.position(character).map(|idx| self.slots.remove(idx))
    }

    pub fn get_glyph(&self, character: &str) -> Option<&RasterSnapshot> {
        self.get_slot(character).and_then(|s| s.glyph.as_ref())
    }

    pub fn get_slot(&self, character: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.character == character)
    }

    pub fn contains(&self, character: &str) -> bool {
        self.position(character).is_some()
    }

    /// Characters in insertion order
    pub fn list_characters(&self) -> Vec<String> {
        self.slots.iter().map(|s| s.character.clone()).collect()
    }

    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// Serialized as a JSON object in insertion order; empty slots become `null`.
impl Serialize for SlotRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.slots.len()))?;
        for slot in &self.slots {
            map.serialize_entry(&slot.character, &slot.glyph)?;
        }
        map.end()
    }
}

struct SlotRegistryVisitor;

impl<'de> Visitor<'de> for SlotRegistryVisitor {
    type Value = SlotRegistry;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping from character to raster payload or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut registry = SlotRegistry::new();
        while let Some((character, glyph)) =
            access.next_entry::<String, Option<RasterSnapshot>>()?
        {
            if character.is_empty() {
                return Err(serde::de::Error::custom("empty character key"));
            }
            match glyph {
                Some(raster) => {
                    registry.set_glyph(&character, raster);
                }
                None => {
                    if let Some(idx) = registry.position(&character) {
                        registry.slots[idx].glyph = None;
                    } else {
                        registry.add_slot(&character);
                    }
                }
            }
        }
        Ok(registry)
    }
}

impl<'de> Deserialize<'de> for SlotRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SlotRegistryVisitor)
    }
}
