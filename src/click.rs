//! Click/tap handling for the mansion screen.
//!
//! The pure parts (pixel to row conversion, target lookup) live here, apart
//! from the web_sys DOM access in `main.rs`, so they can be unit tested.

use std::ops::Range;

use crate::screen::Command;

/// A terminal row that triggers a command when tapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickTarget {
    pub row: u16,
    pub command: Command,
}

/// Shared between the render loop (which registers targets) and the mouse
/// handler (which looks them up).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_target(&mut self, row: u16, command: Command) {
        self.targets.push(ClickTarget { row, command });
    }

    /// Make every row in `rows` trigger `command` (whole panels, help bar).
    pub fn add_rows(&mut self, rows: Range<u16>, command: Command) {
        for row in rows {
            self.add_target(row, command);
        }
    }

    /// First command registered for `row`. Rows registered earlier win, so
    /// specific buttons should be added before panel-wide fallbacks.
    pub fn find_command(&self, row: u16) -> Option<Command> {
        self.targets
            .iter()
            .find(|t| t.row == row)
            .map(|t| t.command)
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a pixel Y coordinate (relative to the grid's top edge) into a
/// terminal row. `None` when the click is outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Phones get the stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_to_row_basic() {
        // 30 rows, grid 450px tall → 15px per row
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
    }

    #[test]
    fn pixel_to_row_outside_grid() {
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);
    }

    #[test]
    fn find_command_by_row() {
        let mut cs = ClickState::new();
        cs.add_target(5, Command::Search);
        cs.add_target(6, Command::Look);
        cs.add_target(7, Command::Go(0));

        assert_eq!(cs.find_command(5), Some(Command::Search));
        assert_eq!(cs.find_command(7), Some(Command::Go(0)));
        assert_eq!(cs.find_command(8), None);
    }

    #[test]
    fn earlier_target_wins() {
        let mut cs = ClickState::new();
        cs.add_target(4, Command::Inspect(1));
        cs.add_rows(3..6, Command::Continue);
        assert_eq!(cs.find_command(4), Some(Command::Inspect(1)));
        assert_eq!(cs.find_command(5), Some(Command::Continue));
    }

    #[test]
    fn clear_removes_everything() {
        let mut cs = ClickState::new();
        cs.add_rows(0..3, Command::ToggleInventory);
        assert_eq!(cs.targets.len(), 3);
        cs.clear_targets();
        assert_eq!(cs.find_command(1), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn tap_on_exit_row() {
        // 80x30 terminal at 15px per row; exits start at row 12
        let mut cs = ClickState::new();
        cs.terminal_cols = 80;
        cs.terminal_rows = 30;
        cs.add_target(12, Command::Go(0));
        cs.add_target(13, Command::Go(1));
        cs.add_rows(27..30, Command::ToggleInventory);

        let cell = 450.0 / 30.0;
        let row = pixel_y_to_row(13.0 * cell + cell / 2.0, 450.0, cs.terminal_rows).unwrap();
        assert_eq!(cs.find_command(row), Some(Command::Go(1)));

        let row = pixel_y_to_row(28.0 * cell + 1.0, 450.0, cs.terminal_rows).unwrap();
        assert_eq!(cs.find_command(row), Some(Command::ToggleInventory));

        let row = pixel_y_to_row(20.0 * cell, 450.0, cs.terminal_rows).unwrap();
        assert_eq!(cs.find_command(row), None);
    }
}
