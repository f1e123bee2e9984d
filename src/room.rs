//! Room records as authored in the content file.

use serde::Deserialize;

/// A node in the mansion graph.
///
/// Everything except `locked` and `items` is fixed once the registry is
/// built. `locked` only ever goes from `true` to `false`, and `items` only
/// ever shrinks (to empty, after a search).
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Room {
    pub name: String,
    /// Shown every time the player walks in.
    pub entry: String,
    /// Shown on "look around".
    pub look: String,
    /// Opaque image reference. The core never reads it.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub exits: Vec<String>,
    #[serde(default)]
    pub locked: bool,
    /// Items still waiting to be found here.
    #[serde(default)]
    pub items: Vec<String>,
    /// Items consumed to unlock the room.
    #[serde(default)]
    pub requires: Vec<String>,
    #[serde(default)]
    pub locked_message: Option<String>,
    #[serde(default)]
    pub unlock_message: Option<String>,
}

impl Room {
    /// Build a plain unlocked room with no items. Handy for tests and for
    /// content assembled in code.
    pub fn new(name: &str, entry: &str, look: &str) -> Self {
        Room {
            name: name.to_string(),
            entry: entry.to_string(),
            look: look.to_string(),
            image: String::new(),
            exits: Vec::new(),
            locked: false,
            items: Vec::new(),
            requires: Vec::new(),
            locked_message: None,
            unlock_message: None,
        }
    }

    pub fn with_exits(mut self, exits: &[&str]) -> Self {
        self.exits = exits.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items = items.iter().map(|i| i.to_string()).collect();
        self
    }

    /// Lock the room behind the given items.
    pub fn locked_by(mut self, requires: &[&str]) -> Self {
        self.locked = true;
        self.requires = requires.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Distinct required item names, in authoring order.
    pub fn required_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for req in &self.requires {
            if !names.contains(&req.as_str()) {
                names.push(req);
            }
        }
        names
    }

    /// Required item names absent from `inventory`, in authoring order. A
    /// name listed twice is satisfied by a single carried copy.
    pub fn missing_from(&self, inventory: &[String]) -> Vec<String> {
        self.required_names()
            .into_iter()
            .filter(|req| !inventory.iter().any(|item| item == req))
            .map(str::to_string)
            .collect()
    }

    /// Text shown when the player tries the door without the right items.
    pub fn locked_text(&self, missing: &[String]) -> String {
        match &self.locked_message {
            Some(msg) => msg.clone(),
            None => format!(
                "The door to {} is locked. You need: {}",
                self.name,
                missing.join(", ")
            ),
        }
    }

    /// Text shown once, when the required items open the room.
    pub fn unlock_text(&self) -> String {
        match &self.unlock_message {
            Some(msg) => msg.clone(),
            None => format!(
                "You used {} to unlock the {}!",
                self.required_names().join(", "),
                self.name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_keeps_authoring_order() {
        let room = Room::new("Piano", "", "").locked_by(&["Red", "Green", "Eye"]);
        assert_eq!(room.missing_from(&inv(&["Green"])), inv(&["Red", "Eye"]));
        assert!(room.missing_from(&inv(&["Eye", "Green", "Red"])).is_empty());
    }

    #[test]
    fn repeated_requirement_is_one_name() {
        let room = Room::new("Toll", "", "").locked_by(&["Coin", "Map", "Coin"]);
        assert_eq!(room.required_names(), vec!["Coin", "Map"]);
        assert!(room.missing_from(&inv(&["Coin", "Map"])).is_empty());
        assert_eq!(room.missing_from(&inv(&["Key"])), inv(&["Coin", "Map"]));
        assert_eq!(room.unlock_text(), "You used Coin, Map to unlock the Toll!");
    }

    #[test]
    fn generic_locked_text_lists_missing_items() {
        let room = Room::new("Vault", "", "").locked_by(&["Key", "Coin"]);
        let text = room.locked_text(&inv(&["Coin"]));
        assert_eq!(text, "The door to Vault is locked. You need: Coin");
    }

    #[test]
    fn custom_texts_win_over_generic() {
        let mut room = Room::new("Vault", "", "").locked_by(&["Key"]);
        room.locked_message = Some("Sealed.".into());
        room.unlock_message = Some("It creaks open.".into());
        assert_eq!(room.locked_text(&inv(&["Key"])), "Sealed.");
        assert_eq!(room.unlock_text(), "It creaks open.");
    }

    #[test]
    fn generic_unlock_text() {
        let room = Room::new("Vault", "", "").locked_by(&["Key", "Coin"]);
        assert_eq!(room.unlock_text(), "You used Key, Coin to unlock the Vault!");
    }

    #[test]
    fn deserialize_defaults() {
        let room: Room =
            serde_json::from_str(r#"{"name":"Hall","entry":"in","look":"around"}"#).unwrap();
        assert!(!room.locked);
        assert!(room.exits.is_empty());
        assert!(room.items.is_empty());
        assert!(room.requires.is_empty());
        assert_eq!(room.locked_message, None);
    }
}
