//! Haunted House: a point-and-click escape from a haunted mansion, played in
//! a browser terminal.
//!
//! The game rules (`room`, `registry`, `game`) know nothing about drawing.
//! `screen` turns player commands into narration, and `render` draws it.

pub mod click;
pub mod content;
pub mod error;
pub mod game;
pub mod registry;
pub mod render;
pub mod room;
pub mod screen;
pub mod transition;
