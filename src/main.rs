use std::{cell::RefCell, io, rc::Rc};

use haunted_mansion::click::{pixel_y_to_row, ClickState};
use haunted_mansion::content::Content;
use haunted_mansion::error::ContentError;
use haunted_mansion::render;
use haunted_mansion::screen::{Command, InputMode, Screen};
use haunted_mansion::transition::Clock;
use log::{debug, Level};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// Query the grid container's bounding rect and convert pixel coordinates to a row.
fn dom_pixel_to_row(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<u16> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_y = mouse_y as f64 - rect.top();
    let click_x = mouse_x as f64 - rect.left();

    if click_x < 0.0 {
        return None;
    }

    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows);
    debug!(
        "click: pixel_y={}, row={:?}, targets={}",
        mouse_y,
        row,
        cs.targets.len()
    );
    row
}

/// Milliseconds from `performance.now()`, or wall-clock time when the
/// Performance API is unavailable.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn invalid_content(e: ContentError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(Level::Info) {
        web_sys::console::warn_1(&format!("logger already installed: {e}").into());
    }

    let content = Content::mansion().map_err(invalid_content)?;
    let screen = Screen::new(content).map_err(invalid_content)?;
    let ticks_per_sec = screen.settings().ticks_per_sec;

    let screen = Rc::new(RefCell::new(screen));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = RefCell::new(Clock::new(ticks_per_sec));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let screen = screen.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let row = match dom_pixel_to_row(mouse_event.x, mouse_event.y, &cs) {
                Some(r) => r,
                None => return,
            };

            let command = cs.find_command(row);
            drop(cs);

            if let Some(command) = command {
                screen.borrow_mut().dispatch(command);
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let screen = screen.clone();
        move |key_event| {
            let mut sc = screen.borrow_mut();
            match key_event.code {
                KeyCode::Char(c) => sc.handle_key(c),
                KeyCode::Enter if sc.is_awaiting_continue() => sc.dispatch(Command::Continue),
                KeyCode::Esc if sc.input_mode == InputMode::Inventory => {
                    sc.dispatch(Command::ToggleInventory)
                }
                _ => {}
            }
        }
    });

    terminal.draw_web(move |f| {
        let ticks = clock.borrow_mut().update(now_ms());
        let mut sc = screen.borrow_mut();
        if ticks > 0 {
            sc.tick(ticks);
        }
        render::draw(f, &sc, &click_state);
    });

    Ok(())
}
