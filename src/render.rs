//! Terminal drawing for the mansion screen.
//!
//! Every button drawn here is registered as a click target on the row it
//! ends up on, so taps and key presses always reach the same `Command`.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::click::{is_narrow_layout, ClickState};
use crate::screen::{Command, InputMode, Screen};

pub fn draw(f: &mut Frame, screen: &Screen, click_state: &Rc<RefCell<ClickState>>) {
    let size = f.area();
    {
        let mut cs = click_state.borrow_mut();
        cs.terminal_cols = size.width;
        cs.terminal_rows = size.height;
        cs.clear_targets();
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(size);

    render_title(f, screen, main_chunks[0]);
    if is_narrow_layout(size.width) {
        render_narrow_layout(f, screen, main_chunks[1], click_state);
    } else {
        render_wide_layout(f, screen, main_chunks[1], click_state);
    }
    render_help(f, screen, main_chunks[2], click_state);
}

fn render_title(f: &mut Frame, screen: &Screen, area: Rect) {
    let (title, color) = if screen.is_escaped() {
        ("★ You escaped the nightmare ★".to_string(), Color::Yellow)
    } else {
        match &screen.scene {
            Some(scene) => (format!("Haunted House - {}", scene.room), Color::Cyan),
            None => ("Haunted House".to_string(), Color::Cyan),
        }
    };
    let title_block = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(title_block, area);
}

/// Wide layout: narration on the left, actions and log on the right.
fn render_wide_layout(
    f: &mut Frame,
    screen: &Screen,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let action_height = (action_rows(screen) + 2).max(3);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(action_height), Constraint::Min(3)])
        .split(columns[1]);

    render_actions_or_inventory(f, screen, right[0], click_state);
    render_narration(f, screen, columns[0], click_state);
    render_log(f, screen, right[1]);
}

/// Narrow layout: narration, actions and log stacked vertically.
fn render_narrow_layout(
    f: &mut Frame,
    screen: &Screen,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let action_height = (action_rows(screen) + 2).max(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),
            Constraint::Length(action_height),
            Constraint::Length(6),
        ])
        .split(area);

    render_actions_or_inventory(f, screen, chunks[1], click_state);
    render_narration(f, screen, chunks[0], click_state);
    render_log(f, screen, chunks[2]);
}

fn action_rows(screen: &Screen) -> u16 {
    match screen.input_mode {
        InputMode::Explore => screen.actions.len() as u16,
        InputMode::Inventory => screen.inventory_display().len() as u16,
    }
}

/// Scale a color toward black by the fade brightness.
fn faded(r: u8, g: u8, b: u8, brightness: f32) -> Color {
    let scale = |c: u8| (c as f32 * brightness.clamp(0.0, 1.0)) as u8;
    Color::Rgb(scale(r), scale(g), scale(b))
}

fn render_narration(
    f: &mut Frame,
    screen: &Screen,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let brightness = screen.fade.brightness();
    let mut lines: Vec<Line> = screen
        .narration
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();

    if screen.is_awaiting_continue() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "(Click to continue...)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let title = match &screen.scene {
        Some(scene) => format!(" {} ", scene.room),
        None => " ".to_string(),
    };
    let narration = Paragraph::new(lines)
        .style(Style::default().fg(faded(255, 255, 0, brightness)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(faded(0, 160, 0, brightness)))
                .title(title),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(narration, area);

    // The whole panel acknowledges an unlock, like clicking anywhere on it
    if screen.is_awaiting_continue() {
        click_state
            .borrow_mut()
            .add_rows(area.y..area.y + area.height, Command::Continue);
    }
}

fn render_actions_or_inventory(
    f: &mut Frame,
    screen: &Screen,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (title, color) = match screen.input_mode {
        InputMode::Explore => (" Actions (tap to choose) ", Color::Yellow),
        InputMode::Inventory => (" Inventory (tap to inspect) ", Color::Magenta),
    };

    let showing_bare_inventory =
        screen.actions.is_empty() && screen.input_mode == InputMode::Inventory;
    let items: Vec<ListItem> = if showing_bare_inventory {
        screen
            .inventory_display()
            .into_iter()
            .map(|item| {
                ListItem::new(Span::styled(format!("  {item}"), Style::default().fg(color)))
            })
            .collect()
    } else {
        screen
            .actions
            .iter()
            .map(|a| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!(" [{}] ", a.key.to_ascii_uppercase()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(a.label.clone(), Style::default().fg(Color::White)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );
    f.render_widget(list, area);

    let mut cs = click_state.borrow_mut();
    let last_row = area.y + area.height.saturating_sub(1);
    for (i, action) in screen.actions.iter().enumerate() {
        let row = area.y + 1 + i as u16;
        if row < last_row {
            cs.add_target(row, action.command);
        }
    }
}

fn render_log(f: &mut Frame, screen: &Screen, area: Rect) {
    let lines: Vec<Line> = screen
        .log
        .iter()
        .map(|entry| {
            let style = if entry.is_important {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    // Keep the newest entries in view once the log outgrows the panel
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let visible = area.height.saturating_sub(2) as usize;
    let total = paragraph.line_count(area.width.saturating_sub(2));
    let scroll = total.saturating_sub(visible).min(u16::MAX as usize) as u16;

    let log_widget = paragraph
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .scroll((scroll, 0));
    f.render_widget(log_widget, area);
}

fn render_help(
    f: &mut Frame,
    screen: &Screen,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let help = screen.help_action();
    let text = format!("[{}] {}", help.key.to_ascii_uppercase(), help.label);
    let widget = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(widget, area);

    click_state
        .borrow_mut()
        .add_rows(area.y..area.y + area.height, help.command);
}
