//! File list panel rendering with selection and pin highlighting.
//!
//! Renders the listing as a scrollable `List` widget. Selected entries get a
//! background color, pinned entries a different one; the cursor row is
//! marked with `> ` and the cursor color.

use mfiles_core::config::theme::{parse_color, Theme};
use mfiles_core::dispatch::View;
use mfiles_core::fs::entry::FileEntry;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Renders the file list for `view`, with the title showing the directory name.
pub fn render_file_list(f: &mut Frame, area: Rect, view: &View<'_>, theme: &Theme) {
    let cursor_color = parse_color(&theme.panel.cursor_fg);

    let items: Vec<ListItem> = view
        .entries
        .iter()
        .map(|entry| ListItem::new(entry_line(entry, theme)))
        .collect();

    let title = view
        .directory
        .file_name()
        .map(|n| mfiles_core::nfc_string(&n.to_string_lossy()))
        .unwrap_or_else(|| "/".to_string());

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} "))
                .border_style(Style::default().fg(cursor_color)),
        )
        .highlight_style(Style::default().fg(cursor_color).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !view.entries.is_empty() {
        state.select(Some(view.cursor));
    }

    f.render_stateful_widget(list, area, &mut state);
}

/// Builds one list row: the name (with a `/` suffix for directories) styled
/// by kind, with the selection background behind it.
fn entry_line(entry: &FileEntry, theme: &Theme) -> Line<'static> {
    let suffix = if entry.is_dir() && !entry.is_parent() { "/" } else { "" };
    let display = format!("{}{suffix}", entry.name());
    let style = entry_style(entry, theme).patch(selection_style(entry, theme));
    Line::from(Span::styled(display, style))
}

fn entry_style(entry: &FileEntry, theme: &Theme) -> Style {
    if entry.is_dir() {
        Style::default()
            .fg(parse_color(&theme.panel.dir_fg))
            .add_modifier(Modifier::BOLD)
    } else if entry.is_symlink() {
        Style::default().fg(parse_color(&theme.panel.symlink_fg))
    } else if entry.is_hidden() {
        Style::default().fg(parse_color(&theme.panel.hidden_fg))
    } else {
        Style::default()
    }
}

/// Pinned wins over plain selection so pins stay visible.
fn selection_style(entry: &FileEntry, theme: &Theme) -> Style {
    if entry.is_sticky() {
        Style::default().bg(parse_color(&theme.panel.sticky_bg))
    } else if entry.is_selected() {
        Style::default().bg(parse_color(&theme.panel.selected_bg))
    } else {
        Style::default()
    }
}
