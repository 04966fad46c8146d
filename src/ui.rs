use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::models::Screen;
use crate::session::SessionState;
use crate::theme::Theme;

const TITLE: &str = "Gitscribe – Commit Exporter";
const BAND_WIDTH: u16 = 64;

pub fn render(f: &mut Frame, state: &SessionState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // toast overlay region
            Constraint::Length(1), // title
            Constraint::Length(2), // status message
            Constraint::Min(5),    // screen content
            Constraint::Length(3), // footer
        ])
        .split(f.area());

    render_toast(f, state, theme, chunks[0]);

    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(theme.title);
    f.render_widget(title, centered_band(BAND_WIDTH, chunks[1]));

    let status = Paragraph::new(state.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(theme.severity(state.severity));
    f.render_widget(status, centered_band(BAND_WIDTH, chunks[2]));

    let body = match state.screen {
        Screen::Home => home_lines(theme),
        Screen::Directory => directory_lines(state, theme),
        Screen::Author => author_lines(state, theme),
        Screen::Options => options_lines(state, theme),
        Screen::Results => results_lines(state, theme, chunks[3]),
    };
    let content = Paragraph::new(Text::from(body)).wrap(Wrap { trim: false });
    f.render_widget(content, centered_band(BAND_WIDTH + 8, chunks[3]));

    let footer = Paragraph::new(Line::from(vec![
        Span::raw("Navigation: "),
        Span::styled("Enter", theme.highlight),
        Span::raw(" to proceed, "),
        Span::styled("B", theme.highlight),
        Span::raw(" for back, "),
        Span::styled("Esc/Ctrl+C", theme.highlight),
        Span::raw(" to quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .style(theme.footer);
    f.render_widget(footer, chunks[4]);
}

fn home_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::raw("Welcome to Gitscribe!"),
        Line::raw(""),
        Line::raw("Analyze a repository's commit history and export the changed files."),
        Line::raw(""),
        Line::styled("Features:", theme.highlight),
        Line::raw("• Find commits by a specific author"),
        Line::raw("• Scope results to the current branch against a parent branch"),
        Line::raw("• Preview commit details and changed files"),
        Line::raw("• Export to CSV or a styled Excel workbook"),
        Line::raw(""),
        help_line(theme, "start", false),
    ]
}

fn directory_lines(state: &SessionState, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        input_line(state, theme),
        Line::raw(""),
        help_line(theme, "continue", true),
        Line::styled(
            "Hint: Press Tab to use current directory (.).",
            theme.dimmed,
        ),
    ]
}

fn author_lines(state: &SessionState, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        input_line(state, theme),
        Line::raw(""),
        help_line(theme, "continue", true),
    ]
}

fn options_lines(state: &SessionState, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        input_line(state, theme),
        Line::raw(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Enter", theme.highlight),
            Span::raw(" to fetch commits."),
        ]),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Tab", theme.highlight),
            Span::raw(format!(
                " to toggle current branch only ({}).",
                yes_no(state.current_branch_only)
            )),
        ]),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("Alt+Tab", theme.highlight),
            Span::raw(format!(" to toggle show files ({}).", yes_no(state.show_files))),
        ]),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("P", theme.highlight),
            Span::raw(format!(" to edit parent branch ({}).", state.parent_branch)),
        ]),
        help_line(theme, "", true),
    ]
}

fn results_lines(state: &SessionState, theme: &Theme, area: Rect) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if state.commits.is_empty() {
        lines.push(Line::raw("No commits found for this author."));
        lines.push(Line::raw(""));
    } else {
        lines.push(Line::raw(format!("Found {} commits:", state.commits.len())));
        lines.push(Line::raw(""));

        let available = area.height.saturating_sub(5).max(10) as usize;
        let lines_per_commit = if state.show_files { 7 } else { 5 };
        let max_display = (available / lines_per_commit).clamp(1, 5);
        let display_count = state.commits.len().min(max_display);

        for commit in &state.commits[..display_count] {
            lines.push(Line::styled(
                format!("Commit: {}", commit.hash),
                theme.commit_hash,
            ));
            lines.push(Line::from(vec![
                Span::raw("  Author: "),
                Span::styled(commit.author.clone(), theme.commit_author),
            ]));
            lines.push(Line::raw(format!("  Date: {}", commit.date)));
            lines.push(Line::raw(format!(
                "  Message: {}",
                truncate(&commit.subject, 60)
            )));
            if state.show_files && !commit.files.is_empty() {
                lines.push(Line::from(vec![
                    Span::raw("  Files: "),
                    Span::styled(file_summary(&commit.files), theme.commit_files),
                ]));
            }
            lines.push(Line::raw(""));
        }

        if state.commits.len() > display_count {
            lines.push(Line::styled(
                format!("...and {} more commits", state.commits.len() - display_count),
                theme.dimmed,
            ));
        }
    }

    lines.push(Line::from(vec![
        Span::raw("Press "),
        Span::styled("Enter", theme.highlight),
        Span::raw(" to export the commit list."),
    ]));
    lines.push(help_line(theme, "", true));
    lines
}

fn input_line(state: &SessionState, theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::styled("> ", theme.highlight)];
    if state.input.is_empty() {
        spans.push(Span::styled(state.placeholder.to_string(), theme.placeholder));
    } else {
        spans.push(Span::styled(state.input.clone(), theme.input));
        spans.push(Span::styled("▌", theme.highlight));
    }
    Line::from(spans)
}

fn help_line(theme: &Theme, enter_action: &str, include_back: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("Press ")];
    if !enter_action.is_empty() {
        spans.push(Span::styled("Enter", theme.highlight));
        spans.push(Span::raw(format!(" to {enter_action}, ")));
    }
    if include_back {
        spans.push(Span::styled("B", theme.highlight));
        spans.push(Span::raw(" for back, "));
    }
    spans.push(Span::styled("Esc", theme.highlight));
    spans.push(Span::raw(" to quit."));
    Line::from(spans)
}

fn render_toast(f: &mut Frame, state: &SessionState, theme: &Theme, area: Rect) {
    let toast = &state.toast;
    if !toast.visible || toast.opacity <= 0.0 || area.height < 3 {
        return;
    }

    // Slide down from the top edge as `position` approaches 1.
    let offset = (2.0 * (1.0 - toast.position)).round() as u16;
    let width = (toast.message.chars().count() as u16 + 6).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let rect = Rect {
        x,
        y: area.y + offset.min(area.height - 3),
        width,
        height: 3,
    };

    let palette = theme.toast_palette(toast.severity);
    let background = palette.background.blend(theme.toast_backdrop, toast.opacity);
    let border = palette.border.blend(theme.toast_backdrop, toast.opacity);
    let text = theme.toast_text.blend(theme.toast_backdrop, toast.opacity);

    f.render_widget(Clear, rect);
    let widget = Paragraph::new(toast.message.clone())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(text)
                .bg(background)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border).bg(background)),
        );
    f.render_widget(widget, rect);
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn file_summary(files: &[String]) -> String {
    if files.len() > 3 {
        format!("{} and {} more...", files[..3].join(", "), files.len() - 3)
    } else {
        files.join(", ")
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Center a fixed-width band inside the given area.
fn centered_band(width: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}
