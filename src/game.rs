//! Game state and logic for the haunted mansion.
//!
//! `GameState` is the single owner of everything that changes during play:
//! where the player is, what they carry, which items have already been
//! narrated, and the rooms' lock/item state (through the registry). It knows
//! nothing about rendering; the screen layer calls in and shows what comes
//! back.

use std::collections::{HashMap, HashSet};

use log::{debug, info};

use crate::content::Content;
use crate::error::{ActionError, ContentError};
use crate::registry::RoomRegistry;
use crate::room::Room;

pub const NOTHING_OF_INTEREST: &str =
    "You search the room diligently but find nothing of importance seems to be here.";

pub const MYSTERIOUS_ITEM: &str = "A mysterious item. You wonder what it could be used for.";

#[derive(Clone, Debug, PartialEq)]
pub enum GamePhase {
    /// Normal play: every action is accepted.
    Exploring,
    /// A room was just unlocked. Only `acknowledge` moves the player in.
    AwaitingAcknowledgment { room: String },
    /// The ending room was reached.
    Escaped,
}

/// Result of trying to walk into a room.
#[derive(Clone, Debug, PartialEq)]
pub enum Navigation {
    /// The player is now in the room.
    Entered {
        description: String,
        exits: Vec<String>,
    },
    /// The required items were used up and the room is open. The player
    /// stays put until `acknowledge` is called.
    Unlocked { narration: String },
    /// Items are missing. Nothing changed.
    Locked {
        message: String,
        missing: Vec<String>,
    },
}

/// Result of searching the current room.
#[derive(Clone, Debug, PartialEq)]
pub struct Search {
    pub narration: String,
    pub found: Vec<String>,
    pub inventory_changed: bool,
}

pub struct GameState {
    registry: RoomRegistry,
    current: Option<String>,
    phase: GamePhase,
    inventory: Vec<String>,
    // Item names already narrated anywhere in the mansion
    discovered: HashSet<String>,
    discoveries: HashMap<String, String>,
    inspections: HashMap<String, String>,
    ending_room: Option<String>,
}

impl GameState {
    pub fn new(
        registry: RoomRegistry,
        discoveries: HashMap<String, String>,
        inspections: HashMap<String, String>,
    ) -> Self {
        GameState {
            registry,
            current: None,
            phase: GamePhase::Exploring,
            inventory: Vec::new(),
            discovered: HashSet::new(),
            discoveries,
            inspections,
            ending_room: None,
        }
    }

    /// Entering this room ends the game.
    pub fn with_ending(mut self, room: impl Into<String>) -> Self {
        self.ending_room = Some(room.into());
        self
    }

    /// Fresh state for the given content. The player is not in any room
    /// until the first `navigate`.
    pub fn from_content(content: &Content) -> Result<Self, ContentError> {
        let registry = content.build_registry()?;
        let mut state = GameState::new(
            registry,
            content.discovery_table(),
            content.inspection_table(),
        );
        state.ending_room = content.ending_room.clone();
        Ok(state)
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    pub fn is_escaped(&self) -> bool {
        self.phase == GamePhase::Escaped
    }

    pub fn is_awaiting_acknowledgment(&self) -> bool {
        matches!(self.phase, GamePhase::AwaitingAcknowledgment { .. })
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.current.as_deref().and_then(|name| self.registry.get(name))
    }

    pub fn current_exits(&self) -> &[String] {
        self.current_room()
            .map(|room| room.exits.as_slice())
            .unwrap_or(&[])
    }

    pub fn current_inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    pub fn is_discovered(&self, item: &str) -> bool {
        self.discovered.contains(item)
    }

    fn ensure_accepting(&self) -> Result<(), ActionError> {
        match self.phase {
            GamePhase::Exploring => Ok(()),
            GamePhase::AwaitingAcknowledgment { .. } => Err(ActionError::AwaitingAcknowledgment),
            GamePhase::Escaped => Err(ActionError::GameOver),
        }
    }

    /// Try to move into `target`, unlocking it on the way if the player
    /// carries everything it requires.
    pub fn navigate(&mut self, target: &str) -> Result<Navigation, ActionError> {
        self.ensure_accepting()?;

        let room = self
            .registry
            .get(target)
            .ok_or_else(|| ActionError::UnknownRoom(target.to_string()))?;

        if !room.locked {
            return self.enter(target);
        }

        let missing = room.missing_from(&self.inventory);
        if !missing.is_empty() {
            debug!("{target} is locked, missing {missing:?}");
            return Ok(Navigation::Locked {
                message: room.locked_text(&missing),
                missing,
            });
        }

        let narration = room.unlock_text();
        let requires: Vec<String> = room
            .required_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for item in &requires {
            if let Some(pos) = self.inventory.iter().position(|i| i == item) {
                self.inventory.remove(pos);
            }
        }
        if let Some(room) = self.registry.get_mut(target) {
            room.locked = false;
        }
        self.phase = GamePhase::AwaitingAcknowledgment {
            room: target.to_string(),
        };
        info!("unlocked {target} using {requires:?}");

        Ok(Navigation::Unlocked { narration })
    }

    /// Confirm the unlock narration and step into the room it opened.
    pub fn acknowledge(&mut self) -> Result<Navigation, ActionError> {
        match std::mem::replace(&mut self.phase, GamePhase::Exploring) {
            GamePhase::AwaitingAcknowledgment { room } => self.enter(&room),
            other => {
                self.phase = other;
                Err(ActionError::NothingToAcknowledge)
            }
        }
    }

    fn enter(&mut self, name: &str) -> Result<Navigation, ActionError> {
        let room = self
            .registry
            .get(name)
            .ok_or_else(|| ActionError::UnknownRoom(name.to_string()))?;
        let entered = Navigation::Entered {
            description: room.entry.clone(),
            exits: room.exits.clone(),
        };

        self.current = Some(name.to_string());
        if self.ending_room.as_deref() == Some(name) {
            info!("reached the ending room {name}");
            self.phase = GamePhase::Escaped;
        } else {
            debug!("entered {name}");
        }

        Ok(entered)
    }

    /// Collect everything left in the current room. Each item name is
    /// narrated only the first time it is found anywhere.
    pub fn search(&mut self) -> Result<Search, ActionError> {
        self.ensure_accepting()?;

        let name = self.current.clone().ok_or(ActionError::NoCurrentRoom)?;
        let room = self
            .registry
            .get_mut(&name)
            .ok_or(ActionError::NoCurrentRoom)?;

        if room.items.is_empty() {
            return Ok(Search {
                narration: NOTHING_OF_INTEREST.to_string(),
                found: Vec::new(),
                inventory_changed: false,
            });
        }

        let found = std::mem::take(&mut room.items);
        let mut narration = String::new();
        for item in &found {
            if self.discovered.insert(item.clone()) {
                match self.discoveries.get(item) {
                    Some(text) => narration.push_str(text),
                    None => narration.push_str(&format!("You found {item}!")),
                }
                narration.push('\n');
            }
            self.inventory.push(item.clone());
        }
        debug!("searched {name}, found {found:?}");

        Ok(Search {
            narration: narration.trim().to_string(),
            found,
            inventory_changed: true,
        })
    }

    pub fn look(&self) -> Result<&str, ActionError> {
        self.ensure_accepting()?;
        self.current_room()
            .map(|room| room.look.as_str())
            .ok_or(ActionError::NoCurrentRoom)
    }

    /// Flavor text for an item. Works whether or not the item is carried.
    pub fn inspect(&self, item: &str) -> &str {
        self.inspections
            .get(item)
            .map(String::as_str)
            .unwrap_or(MYSTERIOUS_ITEM)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const ROOMS: [&str; 5] = ["Hall", "Cellar", "Study", "Vault", "Nowhere"];

    #[derive(Clone, Debug)]
    enum Step {
        Go(usize),
        Search,
        Look,
        Acknowledge,
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0..ROOMS.len()).prop_map(Step::Go),
            Just(Step::Search),
            Just(Step::Look),
            Just(Step::Acknowledge),
        ]
    }

    /// A small mansion where "Key" and "Gem" each appear in two rooms.
    fn mansion() -> GameState {
        let registry = RoomRegistry::new(vec![
            Room::new("Hall", "hall", "hall look")
                .with_exits(&["Cellar", "Study", "Vault"])
                .with_items(&["Key", "Coin"]),
            Room::new("Cellar", "cellar", "cellar look")
                .with_exits(&["Hall"])
                .with_items(&["Key", "Gem"]),
            Room::new("Study", "study", "study look")
                .with_exits(&["Hall"])
                .with_items(&["Gem"])
                .locked_by(&["Coin"]),
            Room::new("Vault", "vault", "vault look")
                .with_exits(&["Hall"])
                .locked_by(&["Key", "Gem"]),
        ])
        .unwrap();
        let discoveries = ["Key", "Coin", "Gem"]
            .iter()
            .map(|i| (i.to_string(), format!("<found {i}>")))
            .collect();
        GameState::new(registry, discoveries, HashMap::new())
    }

    fn snapshot(gs: &GameState) -> (Option<String>, Vec<String>, GamePhase) {
        (
            gs.current_room().map(|r| r.name.clone()),
            gs.current_inventory().to_vec(),
            gs.phase().clone(),
        )
    }

    fn remove_each(mut from: Vec<String>, items: &[String]) -> Vec<String> {
        for item in items {
            if let Some(pos) = from.iter().position(|i| i == item) {
                from.remove(pos);
            }
        }
        from
    }

    proptest! {
        #[test]
        fn prop_errors_never_change_state(steps in prop::collection::vec(arb_step(), 0..40)) {
            let mut gs = mansion();
            for step in steps {
                let before = snapshot(&gs);
                let failed = match step {
                    Step::Go(i) => gs.navigate(ROOMS[i]).is_err(),
                    Step::Search => gs.search().is_err(),
                    Step::Look => gs.look().is_err(),
                    Step::Acknowledge => gs.acknowledge().is_err(),
                };
                if failed {
                    prop_assert_eq!(before, snapshot(&gs));
                }
            }
        }

        #[test]
        fn prop_discovery_narrated_at_most_once(steps in prop::collection::vec(arb_step(), 0..60)) {
            let mut gs = mansion();
            let mut narration = String::new();
            for step in steps {
                match step {
                    Step::Go(i) => { let _ = gs.navigate(ROOMS[i]); }
                    Step::Search => {
                        if let Ok(s) = gs.search() {
                            narration.push_str(&s.narration);
                        }
                    }
                    Step::Look => { let _ = gs.look(); }
                    Step::Acknowledge => { let _ = gs.acknowledge(); }
                }
            }
            for item in ["Key", "Coin", "Gem"] {
                let tag = format!("<found {item}>");
                prop_assert!(narration.matches(&tag).count() <= 1, "{} narrated twice", item);
            }
        }

        #[test]
        fn prop_unlock_consumes_exactly_required(steps in prop::collection::vec(arb_step(), 0..60)) {
            let mut gs = mansion();
            let mut unlocked: Vec<String> = Vec::new();
            for step in steps {
                match step {
                    Step::Go(i) => {
                        let before = gs.current_inventory().to_vec();
                        let required: Vec<String> = gs
                            .registry()
                            .get(ROOMS[i])
                            .map(|r| r.required_names().into_iter().map(str::to_string).collect())
                            .unwrap_or_default();
                        match gs.navigate(ROOMS[i]) {
                            Ok(Navigation::Unlocked { .. }) => {
                                prop_assert_eq!(gs.current_inventory().to_vec(), remove_each(before, &required));
                                unlocked.push(ROOMS[i].to_string());
                            }
                            Ok(Navigation::Locked { missing, .. }) => {
                                prop_assert!(!missing.is_empty());
                                prop_assert_eq!(gs.current_inventory().to_vec(), before);
                            }
                            _ => {}
                        }
                    }
                    Step::Search => { let _ = gs.search(); }
                    Step::Look => { let _ = gs.look(); }
                    Step::Acknowledge => { let _ = gs.acknowledge(); }
                }
                for name in &unlocked {
                    prop_assert!(!gs.registry().get(name).unwrap().locked);
                }
            }
        }

        #[test]
        fn prop_items_are_conserved(steps in prop::collection::vec(arb_step(), 0..60)) {
            let mut gs = mansion();
            let total: usize = gs.registry().iter().map(|r| r.items.len()).sum();
            let mut consumed = 0;
            for step in steps {
                match step {
                    Step::Go(i) => {
                        if let Ok(Navigation::Unlocked { .. }) = gs.navigate(ROOMS[i]) {
                            let room = gs.registry().get(ROOMS[i]).unwrap();
                            consumed += room.required_names().len();
                        }
                    }
                    Step::Search => { let _ = gs.search(); }
                    Step::Look => { let _ = gs.look(); }
                    Step::Acknowledge => { let _ = gs.acknowledge(); }
                }
                let in_rooms: usize = gs.registry().iter().map(|r| r.items.len()).sum();
                prop_assert_eq!(in_rooms + gs.current_inventory().len() + consumed, total);
            }
        }

        #[test]
        fn prop_open_room_navigation_is_idempotent(i in 0..3usize, repeats in 1..5usize) {
            // Hall and Cellar are open from the start
            let mut gs = mansion();
            let name = ["Hall", "Cellar", "Hall"][i];
            let first = gs.navigate(name).unwrap();
            for _ in 0..repeats {
                prop_assert_eq!(&gs.navigate(name).unwrap(), &first);
                prop_assert_eq!(gs.current_room().map(|r| r.name.as_str()), Some(name));
            }
        }
    }
}
