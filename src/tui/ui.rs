//! Stateless rendering of the shell surface.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::bootstrap::Shell;
use crate::stage::Stage;
use crate::surface::{ContainerId, MemorySurface};

/// Draws the whole shell for the current stage.
pub fn draw(frame: &mut Frame, shell: &Shell) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Score
            Constraint::Min(8),    // Main panel
            Constraint::Length(8), // Helper
        ])
        .split(area);

    let title = Paragraph::new("Arcade Shell")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let surface = shell.surface();
    let layout = shell.layout();

    draw_score(frame, chunks[1], &surface, layout.score_current(), layout.score_max());

    let stage = shell.manager().stage();
    match stage {
        Stage::Menu => draw_list(frame, chunks[2], &surface, layout.menu(), "Games"),
        Stage::Playing => {
            let name = shell.manager().active_name().unwrap_or_else(|| "game".to_string());
            draw_game(frame, chunks[2], &name, shell.manager().active_view());
        }
        Stage::Win | Stage::Lose => {
            let result = layout.result();
            draw_result(frame, chunks[2], &surface, result.text(), result.score(), result.buttons_container());
        }
    }

    draw_helper(frame, chunks[3], &surface, layout.helper(), stage);
}

fn draw_score(frame: &mut Frame, area: Rect, surface: &MemorySurface, current: &ContainerId, max: &ContainerId) {
    let line = Line::from(vec![
        Span::raw("Score "),
        Span::styled(
            surface.text(current).to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Best "),
        Span::styled(surface.text(max).to_string(), Style::default().fg(Color::Green)),
    ]);
    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// Renders a container's items, highlighting the active one.
fn draw_list(frame: &mut Frame, area: Rect, surface: &MemorySurface, container: &ContainerId, title: &str) {
    let lines: Vec<Line> = surface
        .panel(container)
        .map(|panel| {
            panel
                .items()
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    if *panel.active() == Some(i) {
                        Line::from(Span::styled(
                            format!("> {} <", item),
                            Style::default().fg(Color::Black).bg(Color::Cyan),
                        ))
                    } else {
                        Line::from(format!("  {}  ", item))
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn draw_game(frame: &mut Frame, area: Rect, name: &str, view: Vec<String>) {
    let lines: Vec<Line> = view.into_iter().map(Line::from).collect();
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(name.to_string()).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn draw_result(
    frame: &mut Frame,
    area: Rect,
    surface: &MemorySurface,
    text: &ContainerId,
    score: &ContainerId,
    buttons: &ContainerId,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(3)])
        .split(area);

    let headline = vec![
        Line::from(Span::styled(
            surface.text(text).to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Score {}", surface.text(score))),
    ];
    let widget = Paragraph::new(headline)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, chunks[0]);

    draw_list(frame, chunks[1], surface, buttons, "Next");
}

fn draw_helper(frame: &mut Frame, area: Rect, surface: &MemorySurface, container: &ContainerId, stage: Stage) {
    let mut lines: Vec<Line> = surface
        .panel(container)
        .map(|panel| panel.items().iter().map(|item| Line::from(item.clone())).collect())
        .unwrap_or_default();
    if stage == Stage::Menu {
        lines.push(Line::from("q             Quit"));
    }

    let widget = Paragraph::new(lines)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title("Keys").borders(Borders::ALL));
    frame.render_widget(widget, area);
}
