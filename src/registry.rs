//! The set of rooms making up the mansion, keyed by name.

use std::collections::HashMap;

use crate::error::ContentError;
use crate::room::Room;

pub struct RoomRegistry {
    rooms: Vec<Room>,
    index: HashMap<String, usize>,
}

impl RoomRegistry {
    /// Build a registry, rejecting duplicate names and exits that lead
    /// nowhere.
    pub fn new(rooms: Vec<Room>) -> Result<Self, ContentError> {
        let mut index = HashMap::with_capacity(rooms.len());
        for (i, room) in rooms.iter().enumerate() {
            if index.insert(room.name.clone(), i).is_some() {
                return Err(ContentError::DuplicateRoom(room.name.clone()));
            }
        }

        for room in &rooms {
            if let Some(exit) = room.exits.iter().find(|e| !index.contains_key(*e)) {
                return Err(ContentError::DanglingExit {
                    room: room.name.clone(),
                    exit: exit.clone(),
                });
            }
        }

        Ok(Self { rooms, index })
    }

    pub fn get(&self, name: &str) -> Option<&Room> {
        self.index.get(name).map(|&i| &self.rooms[i])
    }

    /// Only the game state mutates rooms (lock flag and remaining items).
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Room> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.rooms[i]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }
}
