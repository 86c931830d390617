use mfiles_core::action::{ActionCategory, ActionRegistry};
use mfiles_core::config::keymap::Keymap;
use mfiles_core::config::theme::{parse_color, Theme};
use mfiles_core::dispatch::{Dialog, DialogKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};

use crate::app::{App, AppMode};
use crate::ui::breadcrumb::render_breadcrumb;
use crate::ui::panel::render_file_list;
use crate::ui::popup::render_popup;
use crate::ui::statusbar::{render_statusbar, StatusBarProps};

const HELP_CATEGORIES: [ActionCategory; 5] = [
    ActionCategory::Navigation,
    ActionCategory::Selection,
    ActionCategory::FileOps,
    ActionCategory::View,
    ActionCategory::System,
];

/// Renders the full UI for the current app state.
pub fn render(f: &mut Frame, app: &App) {
    let theme = app.theme();
    let area = browser_area(f.area(), app.window_size());
    let view = app.view();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_breadcrumb(f, chunks[0], view.directory, theme);
    render_file_list(f, chunks[1], &view, theme);

    let status = app.status();
    let props = StatusBarProps {
        entry_count: view.entries.len(),
        cursor: view.cursor,
        selected_count: view.selected.len(),
        clipboard: view
            .clipboard
            .mode()
            .map(|mode| (mode, view.clipboard.sources().len())),
        show_hidden: !view.hide_hidden,
        status_message: status.map(|s| s.text.as_str()),
        is_error: status.is_some_and(|s| s.is_error),
    };
    render_statusbar(f, chunks[2], &props, theme);

    match app.mode() {
        AppMode::Help => {
            let lines = help_lines(app.action_registry(), app.keymap())
                .into_iter()
                .map(Line::from)
                .collect();
            render_popup(f, area, (60, 70), "Help", lines, theme);
        }
        AppMode::Dialog => {
            if let Some(dialog) = view.mode.dialog() {
                render_dialog(f, area, dialog, theme);
            }
        }
        AppMode::Normal => {}
    }
}

/// Caps the drawing area at the configured window size, centered.
fn browser_area(area: Rect, window_size: Option<(u16, u16)>) -> Rect {
    let Some((width, height)) = window_size else {
        return area;
    };
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_dialog(f: &mut Frame, area: Rect, dialog: &Dialog, theme: &Theme) {
    let title = match dialog.kind {
        DialogKind::NewFile => "New file",
    };
    let mut lines = vec![
        Line::from("Name:"),
        Line::from(Span::styled(
            format!("> {}_", dialog.input),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    match &dialog.error {
        Some(error) => lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(parse_color(&theme.popup.error_fg)),
        ))),
        None => lines.push(Line::from("Enter to create, Esc to cancel")),
    }
    render_popup(f, area, (50, 30), title, lines, theme);
}

/// Builds the help text: one section per category, each action with its keys.
fn help_lines(registry: &ActionRegistry, keymap: &Keymap) -> Vec<String> {
    let mut lines = Vec::new();
    for category in HELP_CATEGORIES {
        let descriptors: Vec<_> = registry
            .all()
            .iter()
            .filter(|d| d.category == category)
            .collect();
        if descriptors.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(category.label().to_owned());
        for descriptor in descriptors {
            let keys = keymap
                .keys_for_action(descriptor.action)
                .map(|keys| keys.join("/"))
                .unwrap_or_else(|| "-".to_owned());
            lines.push(format!("  {keys:<14} {}", descriptor.description));
        }
    }
    lines.push(String::new());
    lines.push("Press Esc or ? to close".to_owned());
    lines
}
