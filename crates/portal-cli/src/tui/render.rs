use portal_core::{classify_link, DirectoryState, LinkTarget};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Field, Screen};
use super::types::InfoBar;

pub(super) const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const ACCENT: Color = Color::Cyan;

pub(super) fn render(app: &mut App, info: &InfoBar, frame: &mut Frame) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // info box
            Constraint::Min(1),    // screen body
            Constraint::Length(1), // key hints
        ])
        .split(area);

    // ── info box ──────────────────────────────────────────────────────────────
    let info_lines = vec![
        Line::from(vec![
            Span::styled("  api      ", Style::default().fg(Color::DarkGray)),
            Span::styled(&info.api, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("  account  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                &info.account,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];
    let info_widget = Paragraph::new(info_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(Span::styled(
                " tool portal ",
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(info_widget, chunks[0]);

    match app.screen {
        Screen::Directory => render_directory(app, frame, chunks[1]),
        Screen::AddTool => render_form(app, frame, chunks[1]),
    }

    // ── key hints ─────────────────────────────────────────────────────────────
    let hints = match app.screen {
        Screen::Directory => "  ↑/↓ select · Enter open · r refresh · a add tool · Ctrl+D sign out · q quit",
        Screen::AddTool => "  Tab next field · Ctrl+K check URL · Ctrl+S add tool · Esc cancel",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[2],
    );
}

// ── directory screen ─────────────────────────────────────────────────────────

fn render_directory(app: &mut App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let mut lines: Vec<Line> = vec![Line::raw("")];

    match &app.directory {
        DirectoryState::Loading => {
            lines.push(Line::from(Span::styled(
                format!("  {} Loading tools…", SPINNER[app.spin_i % SPINNER.len()]),
                Style::default().fg(ACCENT),
            )));
        }
        DirectoryState::Error(msg) => {
            lines.push(Line::from(vec![
                Span::styled(" error ", Style::default().fg(Color::White).bg(Color::Red)),
                Span::raw("  "),
                Span::styled(
                    format!("Error loading tools: {msg}"),
                    Style::default().fg(Color::Red),
                ),
            ]));
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                "  press r to try again",
                Style::default().fg(Color::DarkGray),
            )));
        }
        DirectoryState::Ready(tools) if tools.is_empty() => {
            lines.push(Line::from(Span::styled(
                "  No tools yet — press a to add one.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        DirectoryState::Ready(tools) => {
            for (i, tool) in tools.iter().enumerate() {
                let selected = i == app.selected;
                let marker = match classify_link(&tool.target_path) {
                    LinkTarget::External(_) => "↗",
                    LinkTarget::Internal(_) => "→",
                    LinkTarget::Untrusted => "⚠",
                };
                let name_style = if selected {
                    Style::default()
                        .fg(Color::Black)
                        .bg(ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                };
                lines.push(Line::from(vec![
                    Span::raw(if selected { "▸ " } else { "  " }),
                    Span::styled(format!(" {} ", tool.name), name_style),
                    Span::raw("  "),
                    Span::styled(
                        format!("{marker} {}", tool.target_path),
                        Style::default().fg(ACCENT),
                    ),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("    {}", tool.description),
                    Style::default().fg(Color::DarkGray),
                )));
                lines.push(Line::raw(""));
            }
            if app.fetching {
                lines.push(Line::from(Span::styled(
                    format!("  {} refreshing…", SPINNER[app.spin_i % SPINNER.len()]),
                    Style::default().fg(ACCENT),
                )));
            }
        }
    }

    if !app.status.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", app.status),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " available tools ",
                    Style::default().fg(Color::DarkGray),
                )),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

// ── add-tool screen ──────────────────────────────────────────────────────────

fn render_form(app: &mut App, frame: &mut Frame, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // name
            Constraint::Length(3), // description
            Constraint::Length(3), // url
            Constraint::Length(2), // validation message
            Constraint::Length(2), // form error / progress
            Constraint::Min(0),
        ])
        .split(area);

    render_input(frame, chunks[0], " Tool Name ", app, Field::Name);
    render_input(frame, chunks[1], " Description ", app, Field::Description);
    render_input(frame, chunks[2], " URL/Link ", app, Field::TargetPath);

    // validation line
    let validation = app.form.validation();
    let validation_line = if validation.checking {
        Line::from(Span::styled(
            format!("  {} Checking…", SPINNER[app.spin_i % SPINNER.len()]),
            Style::default().fg(ACCENT),
        ))
    } else if validation.checked {
        let (color, mark) = if validation.is_valid {
            (Color::Green, "✓")
        } else {
            (Color::Red, "✗")
        };
        Line::from(Span::styled(
            format!("  {mark} {}", validation.message),
            Style::default().fg(color),
        ))
    } else {
        Line::from(Span::styled(
            "  URL not checked yet — Ctrl+K to validate",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(validation_line), chunks[3]);

    // submit progress / error line
    let action_line = if app.form.is_submitting() {
        Line::from(Span::styled(
            format!("  {} Adding Tool…", SPINNER[app.spin_i % SPINNER.len()]),
            Style::default().fg(ACCENT),
        ))
    } else if !app.form_error.is_empty() {
        Line::from(vec![
            Span::styled(" error ", Style::default().fg(Color::White).bg(Color::Red)),
            Span::raw("  "),
            Span::styled(&app.form_error, Style::default().fg(Color::Red)),
        ])
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(action_line), chunks[4]);
}

fn render_input(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    title: &str,
    app: &App,
    field: Field,
) {
    let value = match field {
        Field::Name => app.form.name(),
        Field::Description => app.form.description(),
        Field::TargetPath => app.form.target_path(),
    };
    let focused = app.focus == field;
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = if focused {
        let cursor = app.cursor.min(value.len());
        let before = &value[..cursor];
        let (cur_ch, after) = if cursor < value.len() {
            let ch = value[cursor..].chars().next().unwrap_or(' ');
            let end = cursor + ch.len_utf8();
            (ch.to_string(), value[end..].to_string())
        } else {
            (" ".to_string(), String::new())
        };
        Line::from(vec![
            Span::styled(before.to_string(), Style::default().fg(Color::White)),
            Span::styled(cur_ch, Style::default().fg(Color::Black).bg(Color::White)),
            Span::styled(after, Style::default().fg(Color::White)),
        ])
    } else {
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White),
        ))
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title.to_string(), border)),
    );
    frame.render_widget(widget, area);
}
