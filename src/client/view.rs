use chrono::{Local, Timelike};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use super::controller::{Controller, Mode};

/// Pure rendering over a controller snapshot; holds no state of its own.
pub fn render(frame: &mut Frame, app: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_input(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_hints(frame, app, chunks[4]);
}

fn render_header(frame: &mut Frame, app: &Controller, area: Rect) {
    let progress = format!(
        "{}/{} done ({}%)",
        app.completed_count(),
        app.tasks().len(),
        app.percent_complete()
    );
    let line = Line::from(vec![
        Span::styled(greeting(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  ·  "),
        Span::raw(progress),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Today's Focus"),
    );
    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, app: &Controller, area: Rect) {
    let active = app.mode() == Mode::Insert && app.editing().is_none();
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text = if active {
        format!("{}▏", app.input())
    } else {
        app.input().to_string()
    };
    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task"),
    );
    frame.render_widget(input, area);
}

fn render_list(frame: &mut Frame, app: &Controller, area: Rect) {
    let items: Vec<ListItem> = app
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            let marker = if task.completed { "[x] " } else { "[ ] " };
            let line = match app.editing().filter(|edit| edit.id == task.id) {
                Some(edit) => Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{}▏", edit.draft),
                        Style::default().fg(Color::Yellow),
                    ),
                ]),
                None => {
                    let style = if task.completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![
                        Span::raw(marker),
                        Span::styled(task.title.clone(), style),
                    ])
                }
            };
            let item = ListItem::new(line);
            if index == app.selected_index() && app.editing().is_none() {
                item.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Tasks"));
    frame.render_widget(list, area);
}

fn render_status(frame: &mut Frame, app: &Controller, area: Rect) {
    let line = if app.loading() {
        Line::styled("Loading tasks…", Style::default().fg(Color::Cyan))
    } else if let Some(error) = app.error() {
        Line::styled(error.to_string(), Style::default().fg(Color::Red))
    } else if app.tasks().is_empty() {
        Line::raw("Add a few things so Future You can relax.")
    } else if app.remaining_count() == 0 {
        Line::styled(
            "Everything is checked off. Go do something for you.",
            Style::default().fg(Color::Green),
        )
    } else {
        Line::raw(fun_message(app.remaining_count()))
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame, app: &Controller, area: Rect) {
    let hints = if app.editing().is_some() {
        "Enter save · Esc cancel"
    } else if app.mode() == Mode::Insert {
        "Enter add · Esc back"
    } else {
        "i add · j/k move · space toggle · e edit · d delete · r refresh · q quit"
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

fn fun_message(remaining: usize) -> &'static str {
    if remaining <= 3 {
        "Just a few more, you've got this."
    } else if remaining <= 7 {
        "One task at a time."
    } else {
        "Busy day. Prioritize."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_tracks_the_hour() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }

    #[test]
    fn fun_message_scales_with_the_backlog() {
        assert_eq!(fun_message(1), "Just a few more, you've got this.");
        assert_eq!(fun_message(5), "One task at a time.");
        assert_eq!(fun_message(12), "Busy day. Prioritize.");
    }
}
