use std::path::Path;

use mfiles_core::config::theme::{parse_color, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Renders a breadcrumb trail for the given directory path.
/// Example: " ~ / projects / mfiles"
pub fn render_breadcrumb(f: &mut Frame, area: Rect, current_dir: &Path, theme: &Theme) {
    let bg = parse_color(&theme.breadcrumb.bg);
    let parts = breadcrumb_spans(current_dir, &dirs_or_home(), theme);
    let breadcrumb = Paragraph::new(Line::from(parts)).style(Style::default().bg(bg));
    f.render_widget(breadcrumb, area);
}

/// Builds the breadcrumb spans, abbreviating `home` to `~`.
fn breadcrumb_spans(current_dir: &Path, home: &Path, theme: &Theme) -> Vec<Span<'static>> {
    let sep_fg = parse_color(&theme.breadcrumb.separator_fg);
    let comp_fg = parse_color(&theme.breadcrumb.component_fg);

    match current_dir.strip_prefix(home) {
        Ok(stripped) => {
            let mut parts = vec![Span::styled(
                " ~",
                Style::default().fg(comp_fg).add_modifier(Modifier::BOLD),
            )];
            for component in stripped.components() {
                parts.push(Span::styled(" / ", Style::default().fg(sep_fg)));
                parts.push(Span::styled(
                    mfiles_core::nfc_string(&component.as_os_str().to_string_lossy()),
                    Style::default().fg(comp_fg),
                ));
            }
            parts
        }
        Err(_) => {
            let path_str = mfiles_core::nfc_string(&current_dir.to_string_lossy());
            vec![Span::styled(format!(" {path_str}"), Style::default().fg(comp_fg))]
        }
    }
}

/// Returns the home directory, falling back to "/" if unavailable.
fn dirs_or_home() -> std::path::PathBuf {
    std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn home_is_abbreviated() {
        let spans = breadcrumb_spans(
            Path::new("/home/user/projects/mfiles"),
            Path::new("/home/user"),
            &Theme::default(),
        );
        assert_eq!(text(&spans), " ~ / projects / mfiles");
    }

    #[test]
    fn home_itself_is_tilde() {
        let spans = breadcrumb_spans(Path::new("/home/user"), Path::new("/home/user"), &Theme::default());
        assert_eq!(text(&spans), " ~");
    }

    #[test]
    fn outside_home_shows_full_path() {
        let spans = breadcrumb_spans(Path::new("/etc/ssh"), Path::new("/home/user"), &Theme::default());
        assert_eq!(text(&spans), " /etc/ssh");
    }
}
