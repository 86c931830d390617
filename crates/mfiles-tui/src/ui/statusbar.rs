//! Status bar rendering.
//!
//! The status bar occupies a single row at the bottom of the terminal and
//! shows the cursor position, the selection count, the clipboard contents,
//! a hidden-file indicator and the latest status message.

use mfiles_core::clipboard::ClipboardMode;
use mfiles_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Data needed to render the status bar.
pub struct StatusBarProps<'a> {
    pub entry_count: usize,
    pub cursor: usize,
    pub selected_count: usize,
    pub clipboard: Option<(ClipboardMode, usize)>,
    pub show_hidden: bool,
    pub status_message: Option<&'a str>,
    pub is_error: bool,
}

/// Renders the bottom status bar.
pub fn render_statusbar(f: &mut Frame, area: Rect, props: &StatusBarProps<'_>, theme: &Theme) {
    let bg = parse_color(&theme.statusbar.bg);
    let bar = Paragraph::new(status_line(props, theme)).style(Style::default().bg(bg));
    f.render_widget(bar, area);
}

fn status_line(props: &StatusBarProps<'_>, theme: &Theme) -> Line<'static> {
    let bg = parse_color(&theme.statusbar.bg);
    let position_fg = parse_color(&theme.statusbar.position_fg);

    let position = if props.entry_count > 0 {
        format!(" {}/{}", props.cursor + 1, props.entry_count)
    } else {
        " 0/0".to_owned()
    };

    let selection = if props.selected_count > 1 {
        format!("  {} selected", props.selected_count)
    } else {
        String::new()
    };

    let clipboard_span = props
        .clipboard
        .map(|(mode, count)| {
            Span::styled(
                format!("  [{mode}: {count}]"),
                Style::default()
                    .fg(parse_color(&theme.statusbar.clipboard_fg))
                    .bg(bg),
            )
        })
        .unwrap_or_default();

    let hidden_indicator = if props.show_hidden { " [H]" } else { "" };

    let status_span = props
        .status_message
        .map(|msg| {
            let fg = if props.is_error {
                parse_color(&theme.statusbar.error_fg)
            } else {
                parse_color(&theme.statusbar.message_fg)
            };
            Span::styled(
                format!("  {msg}"),
                Style::default().fg(fg).bg(bg).add_modifier(Modifier::ITALIC),
            )
        })
        .unwrap_or_default();

    Line::from(vec![
        Span::styled(
            position,
            Style::default()
                .fg(position_fg)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(selection, Style::default().fg(position_fg).bg(bg)),
        clipboard_span,
        Span::styled(
            hidden_indicator.to_owned(),
            Style::default()
                .fg(parse_color(&theme.statusbar.hidden_fg))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        status_span,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn props() -> StatusBarProps<'static> {
        StatusBarProps {
            entry_count: 5,
            cursor: 2,
            selected_count: 1,
            clipboard: None,
            show_hidden: false,
            status_message: None,
            is_error: false,
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn shows_one_based_position() {
        let line = status_line(&props(), &Theme::default());
        assert_eq!(text(&line), " 3/5");
    }

    #[test]
    fn empty_listing_shows_zero() {
        let p = StatusBarProps {
            entry_count: 0,
            cursor: 0,
            ..props()
        };
        assert!(text(&status_line(&p, &Theme::default())).starts_with(" 0/0"));
    }

    #[test]
    fn multi_selection_and_clipboard() {
        let p = StatusBarProps {
            selected_count: 3,
            clipboard: Some((ClipboardMode::Cut, 2)),
            show_hidden: true,
            ..props()
        };
        let line = status_line(&p, &Theme::default());
        assert_eq!(text(&line), " 3/5  3 selected  [cut: 2] [H]");
    }

    #[test]
    fn error_message_uses_error_color() {
        let p = StatusBarProps {
            status_message: Some("paste: 1 failed"),
            is_error: true,
            ..props()
        };
        let line = status_line(&p, &Theme::default());
        let last = line.spans.last().unwrap();
        assert_eq!(last.content.as_ref(), "  paste: 1 failed");
        assert_eq!(last.style.fg, Some(Color::Red));
    }

    #[test]
    fn info_message_uses_message_color() {
        let p = StatusBarProps {
            status_message: Some("1 item(s) staged for copy"),
            ..props()
        };
        let line = status_line(&p, &Theme::default());
        assert_eq!(line.spans.last().unwrap().style.fg, Some(Color::Magenta));
    }
}
