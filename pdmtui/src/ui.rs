//! UI rendering functions.

use crate::app::App;
use crate::state::{PanelInput, StatusKind, StatusMessage};
use pdm::types::{BasalState, BolusState, PodStatus};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Render the status panel.
pub fn render_app(f: &mut ratatui::Frame, app: &App) {
    let size = f.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(size);

    let block = Block::default()
        .title_top("pdmtui")
        .title_top(Line::from("[r]efresh  [q]uit").right_aligned())
        .borders(Borders::ALL);

    let inner = block.inner(layout[0]);
    f.render_widget(block, layout[0]);

    if let Some(pod) = &app.pod {
        let lines = build_status_lines(app, pod);
        f.render_widget(Paragraph::new(lines), inner);
    } else {
        let empty = Paragraph::new("No status yet - press r to refresh").alignment(Alignment::Center);
        f.render_widget(empty, inner);
    }

    render_footer(f, app, layout[1]);

    if let Some(prompt) = app.input.prompt() {
        set_footer_cursor(f, layout[1], UnicodeWidthStr::width(prompt.as_str()));
    }
}

fn build_status_lines(app: &App, pod: &PodStatus) -> Vec<Line<'static>> {
    let mut lines = vec![
        status_line("Last updated", app.formatted.last_updated.clone(), Style::default()),
        status_line("Time active", app.formatted.time_active.clone(), Style::default()),
        status_line(
            "Bolus",
            app.formatted.bolus_state.clone(),
            delivery_style(pod.bolus().is_some_and(|s| s != BolusState::NotRunning)),
        ),
        status_line(
            "Basal",
            app.formatted.basal_state.clone(),
            delivery_style(pod.basal().is_some_and(|s| s != BasalState::NotRunning)),
        ),
    ];

    if app.config.display.show_reservoir {
        lines.push(status_line(
            "Reservoir",
            format!("{:.2} U", pod.reservoir),
            reservoir_style(pod.reservoir),
        ));
    }

    if app.config.display.show_insulin {
        lines.push(status_line(
            "Delivered",
            format!("{:.2} U ({:.2} U canceled)", pod.total_insulin, pod.canceled_insulin),
            Style::default(),
        ));
    }

    if pod.faulted {
        lines.push(status_line(
            "Fault",
            "POD FAULTED".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    lines
}

fn status_line(label: &'static str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<14}"),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(value, value_style),
    ])
}

fn delivery_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

fn reservoir_style(reservoir: f64) -> Style {
    if reservoir < 10.0 {
        Style::default().fg(Color::Red)
    } else if reservoir < 20.0 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_footer(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_status_line(f, app.message.as_ref(), layout[0]);

    let line = match &app.input {
        PanelInput::Normal => Line::from(
            "r: refresh  t: temp basal  x: cancel temp basal  b: bolus  c: cancel bolus  q: quit",
        ),
        input => {
            let prompt = input.prompt().unwrap_or_default();
            Line::from(vec![
                Span::raw(prompt),
                Span::raw("  Enter: submit  Esc: cancel"),
            ])
        }
    };

    f.render_widget(Paragraph::new(line), layout[1]);
}

fn render_status_line(f: &mut ratatui::Frame, message: Option<&StatusMessage>, area: Rect) {
    let widget = message.map(|message| {
        let style = match message.kind {
            StatusKind::Info => Style::default().fg(Color::Blue),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        Paragraph::new(message.text.clone()).style(style)
    });

    if let Some(widget) = widget {
        f.render_widget(widget, area);
    } else {
        f.render_widget(Paragraph::new(""), area);
    }
}

fn set_footer_cursor(f: &mut ratatui::Frame, area: Rect, x_offset: usize) {
    if area.width == 0 || area.height < 2 {
        return;
    }
    let offset = u16::try_from(x_offset).unwrap_or(u16::MAX);
    let max_x = area.x + area.width - 1;
    let cursor_x = area.x.saturating_add(offset).min(max_x);
    let cursor_y = area.y + 1;
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}
