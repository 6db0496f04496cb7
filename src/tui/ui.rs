use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};

use crate::output::{format_score, format_value};
use crate::scoring::DISCLAIMER;
use crate::tui::app::{App, InputMode, View};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Planet table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    // Render overlays based on input mode
    match app.input_mode {
        InputMode::NoteInput => render_note_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::ScoreBreakdown => render_breakdown_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let left = "exohab";
    let right = format!("{} planets stored", app.store.len());
    let padding_len = (area.width as usize).saturating_sub(left.len() + right.len());

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.title_color).bold()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right, Style::default().fg(app.theme.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let favorites_title = format!("Favorites ({})", app.store.favorites.len());
    let titles = vec!["Explore".to_string(), favorites_title];
    let selected = match app.current_view {
        View::Explore => 0,
        View::Favorites => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive_style)
        .highlight_style(app.theme.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let records = app.current_records();

    if records.is_empty() {
        let text = match app.current_view {
            View::Explore if app.store.is_empty() => {
                "No planets stored. Run `exohab seed` or `exohab analyze <CSV>`."
            }
            View::Explore => "No planets match the label filter",
            View::Favorites => "No favorites yet. Press f on a planet to add it.",
        };
        let empty_msg = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let theme = &app.theme;
    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let r = &record.result;
            let index = format!("{}.", idx + 1);

            let score_color = theme.score_color(r.score);
            let mut score_spans = vec![Span::styled(
                format!("{:>5} ", format_score(r.score)),
                Style::default().fg(score_color),
            )];
            score_spans.extend(score_bar(r.score, 8, score_color, theme.bar_empty).spans);

            let marker = if app.store.is_favorite(record.name()) {
                Span::styled("* ", Style::default().fg(theme.favorite_marker))
            } else {
                Span::raw("  ")
            };
            let name = Line::from(vec![marker, Span::raw(record.name().to_string())]);

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(theme.index_color)),
                Cell::from(Line::from(score_spans)),
                Cell::from(r.label.as_str()).style(Style::default().fg(score_color)),
                Cell::from(format_value(r.radius_re, 2)),
                Cell::from(format_value(r.s_earth, 2)),
                Cell::from(format_value(r.teq_k, 0)),
                Cell::from(name),
            ])
            .style(row_style)
        })
        .collect();

    // Column widths
    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Length(15), // Score + bar: " 72.3 ██████░░"
        Constraint::Length(9),  // Label
        Constraint::Length(7),  // Radius
        Constraint::Length(7),  // Insolation
        Constraint::Length(6),  // Teq
        Constraint::Fill(1),    // Name
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Score", "Label", "R_E", "S_E", "Teq K", "Name"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        // Show flash message with color based on message type
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} planets", app.rows.len());
        let filter = app
            .label_filter
            .map_or("all".to_string(), |l| l.to_string());

        let hints = [
            ("j/k", ":nav"),
            ("b", ":breakdown"),
            ("f", ":favorite"),
            ("n", ":note"),
            ("l", ":label"),
            ("Tab", ":view"),
            ("?", ":help"),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(count, Style::default().fg(theme.muted)),
            Span::raw(" "),
            Span::styled(format!("[{}]", filter), Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Horizontal bar for a 0-100 score
fn score_bar(score: f64, width: usize, filled_color: Color, empty_color: Color) -> Line<'static> {
    let ratio = (score / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(filled_color)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(empty_color)));
    }

    Line::from(spans)
}

/// Bordered popup block on the theme's background
fn popup_block<'a>(app: &App, title: String) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, app.theme.popup_title))
        .border_style(Style::default().fg(app.theme.popup_border))
        .style(Style::default().bg(app.theme.popup_bg))
}

/// Render the note text input popup
fn render_note_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(60, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let name = app.selected_record().map_or("", |r| r.name());
    let block = popup_block(app, format!(" Note: {} ", name));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    let input = Paragraph::new(format!("{}|", app.note_input));
    frame.render_widget(input, chunks[0]);

    let help = Paragraph::new("Enter: save | Esc: cancel")
        .style(Style::default().fg(app.theme.muted));
    frame.render_widget(help, chunks[1]);
}

/// Render the score breakdown popup for the selected planet
fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(record) = app.selected_record() else {
        return;
    };
    let r = &record.result;
    let theme = &app.theme;

    let popup_area = centered_rect_fixed(58, 19, frame.area());
    frame.render_widget(Clear, popup_area);
    let block = popup_block(app, format!(" {} ", record.name()));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Score {} ", format_score(r.score)),
                Style::default().fg(theme.score_color(r.score)).bold(),
            ),
            Span::raw(format!("({})", r.label)),
        ]),
        Line::from(""),
    ];

    for c in r.subscores.contributions() {
        let mut spans = vec![Span::raw(format!("{:<13}{:>5.1} ", c.name, c.value))];
        spans.extend(score_bar(c.value, 10, theme.score_color(c.value), theme.bar_empty).spans);
        spans.push(Span::styled(
            format!("  x{:.2} = {:>4.1}", c.weight, c.weighted()),
            Style::default().fg(theme.muted),
        ));
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    let hz = match (r.hz_bounds(), r.in_hz) {
        (Some(b), Some(inside)) => format!(
            "HZ S {:.2}..{:.2}, planet S {} ({})",
            b.inner,
            b.outer,
            format_value(r.s_earth, 2),
            if inside { "inside" } else { "outside" }
        ),
        (Some(b), None) => format!("HZ S {:.2}..{:.2}, planet S unknown", b.inner, b.outer),
        (None, _) => "HZ unknown (no stellar temperature)".to_string(),
    };
    lines.push(Line::from(hz));
    lines.push(Line::from(format!(
        "a {} AU  L {:.3} Lsun  Teq {} K",
        format_value(r.a_au, 3),
        r.l_lsun,
        format_value(r.teq_k, 0)
    )));

    if let Some(note) = app.store.notes(record.name()).first() {
        lines.push(Line::from(Span::styled(
            format!("Note: {}", note.text),
            Style::default().italic(),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(DISCLAIMER, Style::default().fg(theme.muted))));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(50, 15, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Keyboard Shortcuts ".to_string());
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(app.theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("b / Enter     ", "Score breakdown"),
        ("f             ", "Toggle favorite"),
        ("n             ", "Add note"),
        ("l             ", "Cycle label filter"),
        ("Tab           ", "Toggle Explore/Favorites"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
