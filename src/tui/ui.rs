//! UI rendering for the TUI.
//!
//! Handles layout and widget rendering using ratatui.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::model::{Category, Sector};
use crate::wizard::{EditTarget, ProfileField, WizardStep};
use crate::WizardApp;

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;

/// Draw the main UI.
pub fn draw(frame: &mut Frame, app: &WizardApp) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen body
            Constraint::Length(2), // Status / key hints
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);
    match app.step {
        WizardStep::Profile => draw_profile(frame, app, chunks[1]),
        WizardStep::ValidateAnalysis => draw_validate_analysis(frame, app, chunks[1]),
        WizardStep::ValidateTows => draw_validate_tows(frame, app, chunks[1]),
        WizardStep::Report => draw_report(frame, app, chunks[1]),
    }
    draw_footer(frame, app, chunks[2]);

    // Overlays replace interaction with the screen below
    if let Some(message) = &app.busy {
        draw_center_box(frame, " working ", message, ACCENT);
    }
    if let Some(error) = &app.error {
        let text = format!("{error}\n\nPress Enter to retry.");
        draw_center_box(frame, " error ", &text, Color::Red);
    }
}

/// Header: app name and wizard progress.
fn draw_header(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let title = format!(" Step {} - {} ", app.step.number(), app.step.title());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" konteks ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled("| context analysis for ISO 9001:2015", Style::default().fg(DIM)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title(title),
    );
    frame.render_widget(header, area);
}

/// Screen 1: the profile form.
fn draw_profile(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let mut lines = Vec::new();
    for field in ProfileField::ALL {
        let focused = field == app.profile_focus;
        let marker = if focused { "> " } else { "  " };
        let value = match field {
            ProfileField::AnalystName => app.profile.analyst_name.clone(),
            ProfileField::AnalystTitle => app.profile.analyst_title.clone(),
            ProfileField::AnalysisDate => app.profile.analysis_date.clone(),
            ProfileField::CompanyName => app.profile.company_name.clone(),
            ProfileField::UnitName => app.profile.unit_name.clone(),
            ProfileField::Sector => match &app.profile.sector {
                Sector::Lainnya(text) => format!("< lainnya > {text}"),
                sector => format!("< {} >", sector.label()),
            },
        };
        let style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<22}", field.label()), style),
            Span::raw(value),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "All fields are required before drafting can start.",
        Style::default().fg(DIM),
    )));

    let form = Paragraph::new(lines).block(
        Block::default().borders(Borders::ALL).title(" organization profile "),
    );
    frame.render_widget(form, area);
}

/// Screen 2: category tabs plus the factor list, with the inline editor.
fn draw_validate_analysis(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let mut constraints = vec![Constraint::Length(3), Constraint::Min(4)];
    if app.edit.is_some() {
        constraints.push(Constraint::Length(3));
    }
    let chunks =
        Layout::default().direction(Direction::Vertical).constraints(constraints).split(area);

    // Category tabs, with counts and a spinner mark while generating
    let titles: Vec<Line> = Category::ALL
        .iter()
        .map(|category| {
            let busy = if app.busy_categories.contains(category) { "*" } else { "" };
            Line::from(format!(
                "{}({}){}",
                category.title(),
                app.store.list(*category).len(),
                busy
            ))
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.category_index)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" categories "));
    frame.render_widget(tabs, chunks[0]);

    // Factor list for the focused category
    let category = app.current_category();
    let items: Vec<ListItem> = app
        .store
        .list(category)
        .iter()
        .map(|factor| {
            let origin = if factor.is_external { "ext" } else { "int" };
            ListItem::new(Line::from(vec![
                Span::raw(factor.text.clone()),
                Span::styled(
                    format!("  [{} / P{} / {}]", factor.impact.label(), factor.priority, origin),
                    Style::default().fg(DIM),
                ),
            ]))
        })
        .collect();
    let generating = if app.busy_categories.contains(&category) { " (generating...)" } else { "" };
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {}{} ", category.title(), generating)),
        );
    let mut state = ListState::default();
    state.select(Some(app.item_index));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    // Inline editor bar
    if let Some(edit) = &app.edit {
        let title = match edit.target {
            EditTarget::NewFactor => " add factor ",
            EditTarget::FactorText(_) => " edit factor ",
        };
        let editor = Paragraph::new(Line::from(vec![
            Span::raw(edit.buffer.clone()),
            Span::styled("_", Style::default().fg(ACCENT)),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(title),
        );
        frame.render_widget(editor, chunks[2]);
    }
}

/// Screen 4: the TOWS strategy list, in generation order.
fn draw_validate_tows(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let items: Vec<ListItem> = app
        .store
        .tows
        .iter()
        .map(|strategy| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", strategy.category.key().to_uppercase()),
                    Style::default().fg(ACCENT),
                ),
                Span::raw(strategy.text.clone()),
                Span::styled(
                    format!("  [{} / P{}]", strategy.impact.label(), strategy.priority),
                    Style::default().fg(DIM),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ")
        .block(Block::default().borders(Borders::ALL).title(" recommended strategies "));
    let mut state = ListState::default();
    state.select(Some(app.tows_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Screen 5: compiled report preview.
fn draw_report(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let report = crate::export::ReportDocument::compile(&app.profile, &app.store);

    let mut lines = vec![
        Line::from(Span::styled(
            report.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(report.subtitle.clone(), Style::default().fg(DIM))),
        Line::from(""),
    ];
    for (label, value) in &report.meta {
        lines.push(Line::from(format!("{label}: {value}")));
    }
    lines.push(Line::from(""));
    for section in &report.sections {
        lines.push(Line::from(Span::styled(
            section.heading.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        if section.bullets.is_empty() {
            lines.push(Line::from(Span::styled("  (none)", Style::default().fg(DIM))));
        }
        for bullet in &section.bullets {
            lines.push(Line::from(format!("  - {bullet}")));
        }
        lines.push(Line::from(""));
    }

    let preview = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" report preview "));
    frame.render_widget(preview, area);
}

/// Status line plus the per-screen key hints.
fn draw_footer(frame: &mut Frame, app: &WizardApp, area: Rect) {
    let hints = match app.step {
        WizardStep::Profile => {
            "Tab/Up/Down move - Left/Right sector - Enter draft analysis - Esc quit"
        }
        WizardStep::ValidateAnalysis => {
            "Left/Right category - a add - e edit - d delete - i impact - +/- priority - g generate more - Enter derive TOWS - Esc back"
        }
        WizardStep::ValidateTows => "Up/Down move - i impact - +/- priority - Enter report - Esc back",
        WizardStep::Report => "x export PDF - n new analysis - Esc back - q quit",
    };

    let mut lines = Vec::new();
    if let Some(status) = &app.status_message {
        lines.push(Line::from(Span::styled(
            status.clone(),
            Style::default().fg(Color::Yellow),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(hints, Style::default().fg(DIM))));

    frame.render_widget(Paragraph::new(lines), area);
}

/// Centered overlay box used for the busy and error states.
fn draw_center_box(frame: &mut Frame, title: &str, text: &str, color: Color) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);
    let content = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(title),
        );
    frame.render_widget(content, area);
}

/// A centered rect using percentages of the given area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
