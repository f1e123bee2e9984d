//! Presentation model: what the terminal shows and which buttons it offers.
//!
//! `Screen` owns the `GameState` and turns key presses and taps into core
//! calls. It keeps the narration panel text, the message log, the action
//! list and the room fade. Nothing here decides game rules.

use log::{debug, warn};

use crate::content::{Content, Settings};
use crate::error::{ActionError, ContentError};
use crate::game::{GameState, Navigation};
use crate::transition::Fade;

/// Everything a key or a tap can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Search,
    Look,
    /// Walk through the n-th exit of the current room.
    Go(usize),
    /// Examine the n-th inventory item.
    Inspect(usize),
    ToggleInventory,
    /// Acknowledge an unlock narration.
    Continue,
    Restart,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InputMode {
    Explore,
    Inventory,
}

/// A button the player can press in the current context.
#[derive(Clone, Debug)]
pub struct Action {
    pub label: String,
    pub key: char,
    pub command: Command,
}

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// The room shown in the scene panel. It lags behind the game state while a
/// fade is running.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub room: String,
    pub image: String,
}

pub struct Screen {
    content: Content,
    game: GameState,
    pub input_mode: InputMode,
    pub scene: Option<Scene>,
    pub narration: String,
    pub log: Vec<LogEntry>,
    pub actions: Vec<Action>,
    pub fade: Fade,
    pending: Option<(Scene, String)>,
    ms_per_tick: f64,
}

impl Screen {
    pub fn new(content: Content) -> Result<Self, ContentError> {
        let game = GameState::from_content(&content)?;
        let settings = content.settings.clone();
        let mut screen = Screen {
            content,
            game,
            input_mode: InputMode::Explore,
            scene: None,
            narration: String::new(),
            log: Vec::new(),
            actions: Vec::new(),
            fade: Fade::new(settings.fade_ms),
            pending: None,
            ms_per_tick: 1000.0 / settings.ticks_per_sec.max(1) as f64,
        };
        screen.add_log("You wake in front of a house that should not exist...", true);
        let start = screen.content.start_room.clone();
        match screen.game.navigate(&start) {
            Ok(Navigation::Entered { description, .. }) => {
                // No fade for the very first room
                screen.scene = Some(screen.current_scene());
                screen.narration = description;
            }
            other => warn!("start room {start} did not open: {other:?}"),
        }
        screen.update_actions();
        Ok(screen)
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn settings(&self) -> &Settings {
        &self.content.settings
    }

    /// The unlock narration is on screen and waits for a tap.
    pub fn is_awaiting_continue(&self) -> bool {
        self.game.is_awaiting_acknowledgment()
    }

    pub fn is_escaped(&self) -> bool {
        self.game.is_escaped()
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        let cap = self.content.settings.log_capacity.max(1);
        if self.log.len() > cap {
            let excess = self.log.len() - cap;
            self.log.drain(..excess);
        }
    }

    pub fn inventory_display(&self) -> Vec<String> {
        let inventory = self.game.current_inventory();
        if inventory.is_empty() {
            vec!["(carrying nothing)".to_string()]
        } else {
            inventory.to_vec()
        }
    }

    /// The action shown in the help bar. It is always clickable and has its
    /// own key.
    pub fn help_action(&self) -> Action {
        if self.game.is_escaped() {
            Action {
                label: "Play again".into(),
                key: 'r',
                command: Command::Restart,
            }
        } else if self.game.is_awaiting_acknowledgment() {
            Action {
                label: "Click to continue...".into(),
                key: 'c',
                command: Command::Continue,
            }
        } else {
            let label = match self.input_mode {
                InputMode::Explore => "Inventory",
                InputMode::Inventory => "Close inventory",
            };
            Action {
                label: label.into(),
                key: 'i',
                command: Command::ToggleInventory,
            }
        }
    }

    pub fn update_actions(&mut self) {
        self.actions.clear();
        if self.game.is_escaped() || self.game.is_awaiting_acknowledgment() {
            // The help bar carries the only available action
            return;
        }

        match self.input_mode {
            InputMode::Explore => {
                self.actions.push(Action {
                    label: "Search for items".into(),
                    key: 's',
                    command: Command::Search,
                });
                self.actions.push(Action {
                    label: "Look around".into(),
                    key: 'l',
                    command: Command::Look,
                });
                let exits: Vec<String> = self.game.current_exits().to_vec();
                for (i, exit) in exits.iter().enumerate() {
                    if let Some(key) = digit_key(i) {
                        self.actions.push(Action {
                            label: format!("Go to {exit}"),
                            key,
                            command: Command::Go(i),
                        });
                    }
                }
            }
            InputMode::Inventory => {
                let items: Vec<String> = self.game.current_inventory().to_vec();
                for (i, item) in items.iter().enumerate() {
                    if let Some(key) = digit_key(i) {
                        self.actions.push(Action {
                            label: format!("Inspect {item}"),
                            key,
                            command: Command::Inspect(i),
                        });
                    }
                }
            }
        }
    }

    /// Keyboard entry point.
    pub fn handle_key(&mut self, key: char) {
        let key = key.to_ascii_lowercase();
        let help = self.help_action();
        let command = if help.key == key {
            Some(help.command)
        } else {
            self.actions.iter().find(|a| a.key == key).map(|a| a.command)
        };
        if let Some(command) = command {
            self.dispatch(command);
        }
    }

    /// Run a command from a key or a tap. Input is ignored while the scene
    /// is fading, the same way the menus vanish during the transition.
    pub fn dispatch(&mut self, command: Command) {
        if self.fade.is_active() {
            debug!("ignored {command:?} during fade");
            return;
        }

        let result = match command {
            Command::Search => self.search(),
            Command::Look => self.look(),
            Command::Go(i) => self.go(i),
            Command::Inspect(i) => {
                self.inspect(i);
                Ok(())
            }
            Command::ToggleInventory => {
                self.input_mode = match self.input_mode {
                    InputMode::Explore => InputMode::Inventory,
                    InputMode::Inventory => InputMode::Explore,
                };
                Ok(())
            }
            Command::Continue => self.continue_after_unlock(),
            Command::Restart => self.restart(),
        };

        if let Err(err) = result {
            warn!("ignored {command:?}: {err}");
        }
        self.update_actions();
    }

    /// Advance the fade by `delta_ticks` presentation ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        let ms = (delta_ticks as f64 * self.ms_per_tick) as u32;
        if self.fade.advance(ms) {
            self.show_pending();
        }
    }

    fn search(&mut self) -> Result<(), ActionError> {
        let search = self.game.search()?;
        for item in &search.found {
            self.add_log(&format!("Picked up {item}."), true);
        }
        if search.found.is_empty() {
            self.add_log("Nothing of interest here.", false);
        }
        self.narration = search.narration;
        Ok(())
    }

    fn look(&mut self) -> Result<(), ActionError> {
        self.narration = self.game.look()?.to_string();
        Ok(())
    }

    fn go(&mut self, index: usize) -> Result<(), ActionError> {
        let Some(target) = self.game.current_exits().get(index).cloned() else {
            return Ok(());
        };

        match self.game.navigate(&target)? {
            Navigation::Entered { description, .. } => self.begin_scene(description),
            Navigation::Unlocked { narration } => {
                self.add_log(&format!("Unlocked {target}!"), true);
                self.input_mode = InputMode::Explore;
                self.narration = narration;
            }
            Navigation::Locked { message, .. } => {
                self.add_log(&format!("{target} is locked."), false);
                self.narration = message;
            }
        }
        Ok(())
    }

    fn inspect(&mut self, index: usize) {
        if let Some(item) = self.game.current_inventory().get(index) {
            self.narration = self.game.inspect(item).to_string();
        }
    }

    fn continue_after_unlock(&mut self) -> Result<(), ActionError> {
        if let Navigation::Entered { description, .. } = self.game.acknowledge()? {
            self.begin_scene(description);
        }
        Ok(())
    }

    fn restart(&mut self) -> Result<(), ActionError> {
        if !self.game.is_escaped() {
            return Ok(());
        }
        match Screen::new(self.content.clone()) {
            Ok(fresh) => *self = fresh,
            // Content was validated at startup
            Err(err) => warn!("restart failed: {err}"),
        }
        Ok(())
    }

    fn current_scene(&self) -> Scene {
        match self.game.current_room() {
            Some(room) => Scene {
                room: room.name.clone(),
                image: room.image.clone(),
            },
            None => Scene {
                room: String::new(),
                image: String::new(),
            },
        }
    }

    /// Start the fade toward the room the player just entered. The text and
    /// scene swap once the old room has dimmed out.
    fn begin_scene(&mut self, description: String) {
        let scene = self.current_scene();
        self.add_log(&format!("Entered {}.", scene.room), false);
        if self.game.is_escaped() {
            self.add_log("You escaped the mansion!", true);
        }
        self.input_mode = InputMode::Explore;
        self.pending = Some((scene, description));
        self.fade.start();
        if !self.fade.is_active() {
            self.show_pending();
        }
    }

    fn show_pending(&mut self) {
        if let Some((scene, description)) = self.pending.take() {
            self.scene = Some(scene);
            self.narration = description;
        }
    }
}

fn digit_key(index: usize) -> Option<char> {
    if index >= 9 {
        return None;
    }
    char::from_digit(index as u32 + 1, 10)
}
