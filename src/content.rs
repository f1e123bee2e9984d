//! Static mansion content: rooms, item texts, and presentation settings.
//!
//! The shipped mansion is embedded at build time and parsed once at
//! startup. Custom narration lives here as data, so new rooms or items never
//! need new code.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ContentError;
use crate::registry::RoomRegistry;
use crate::room::Room;

const MANSION_JSON: &str = include_str!("../content/mansion.json");

/// Narration and inspection text for one item. Either may be missing, in
/// which case the game falls back to generic wording.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemText {
    pub name: String,
    #[serde(default)]
    pub discovery: Option<String>,
    #[serde(default)]
    pub inspection: Option<String>,
}

/// Presentation tunables. Every key is optional in the content file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of entries kept in the message log.
    pub log_capacity: usize,
    /// Length of each half (out, then in) of the room fade.
    pub fade_ms: u32,
    /// Presentation clock rate.
    pub ticks_per_sec: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_capacity: 50,
            fade_ms: 1000,
            ticks_per_sec: 20,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Content {
    pub start_room: String,
    #[serde(default)]
    pub ending_room: Option<String>,
    #[serde(default)]
    pub settings: Settings,
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub items: Vec<ItemText>,
}

impl Content {
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let content: Content = serde_json::from_str(json)?;
        Ok(content)
    }

    /// The mansion that ships with the game.
    pub fn mansion() -> Result<Self, ContentError> {
        Self::from_json(MANSION_JSON)
    }

    /// Check room references and build the registry.
    pub fn build_registry(&self) -> Result<RoomRegistry, ContentError> {
        let registry = RoomRegistry::new(self.rooms.clone())?;
        if !registry.contains(&self.start_room) {
            return Err(ContentError::UnknownStartRoom(self.start_room.clone()));
        }
        if let Some(end) = &self.ending_room {
            if !registry.contains(end) {
                return Err(ContentError::UnknownEndingRoom(end.clone()));
            }
        }
        Ok(registry)
    }

    pub fn discovery_table(&self) -> HashMap<String, String> {
        self.items
            .iter()
            .filter_map(|i| i.discovery.clone().map(|d| (i.name.clone(), d)))
            .collect()
    }

    pub fn inspection_table(&self) -> HashMap<String, String> {
        self.items
            .iter()
            .filter_map(|i| i.inspection.clone().map(|d| (i.name.clone(), d)))
            .collect()
    }
}
