//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching business logic.
//!
//! ## For contributors
//!
//! * The layout is a vertical stack: path input, tag input, the scrollable
//!   feed list and a one-line status bar.  Dialogs are drawn last, centred
//!   over everything else.
//! * Colours and styles are defined inline.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{feed_count, App, Dialog, Focus};
use crate::launch;

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [path_area, tag_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_input(frame, path_area, " Feed Path ", &app.path_input, app.focus == Focus::Path);
    draw_input(frame, tag_area, " Feed Tag ", &app.tag_input, app.focus == Focus::Tag);
    draw_feed_list(app, frame, list_area);
    draw_status_bar(app, frame, status_area);

    if let Some(dialog) = app.dialog {
        draw_dialog(frame, dialog);
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, value: &str, focused: bool) {
    let input = Paragraph::new(value).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(focused)),
    );
    frame.render_widget(input, area);

    if focused {
        // Cursor sits just after the text, inside the border.
        let width = u16::try_from(Span::raw(value).width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(width);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y.saturating_add(1)));
    }
}

/// Render the scrollable feed list, or a placeholder when it is empty.
fn draw_feed_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Favorite Feeds ")
        .borders(Borders::ALL)
        .border_style(border_style(app.focus == Focus::List));

    if app.feeds.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No Feeds to Display",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .centered()
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let list_items: Vec<ListItem> = app
        .feeds
        .iter()
        .map(|feed| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<16}", feed.tag),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::styled(
                    launch::feed_url(app.base_url(), feed),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let help = match app.focus {
        Focus::Path | Focus::Tag => "Tab: next field  Enter: save  Esc: list",
        Focus::List => "Enter: open  e: edit  d: delete  C: clear  q: quit",
    };
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            feed_count(app.feeds.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::raw(help),
    ]));
    frame.render_widget(status, area);
}

fn draw_dialog(frame: &mut Frame, dialog: Dialog) {
    let (title, message, hint) = match dialog {
        Dialog::MissingInput => (
            " Missing Information ",
            "Please enter both a feed path and a tag.",
            "Enter: OK",
        ),
        Dialog::ConfirmClear => (
            " Clear Tags ",
            "Remove every saved feed? This cannot be undone.",
            "y: clear  any other key: cancel",
        ),
    };

    let area = centered(frame.area(), 50, 6);
    let body = Paragraph::new(vec![
        Line::raw(message),
        Line::raw(""),
        Line::styled(hint, Style::default().fg(Color::DarkGray)),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

// ---------------------------------------------------------------------------
// Tests — rendering smoke tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedRecord;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    fn sample_app() -> App {
        App::new(
            "http://rss.cnn.com/rss/",
            vec![
                FeedRecord::new("Tech", "cnn_tech.rss"),
                FeedRecord::new("World", "cnn_world.rss"),
            ],
        )
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut app = App::new("http://rss.cnn.com/rss/", vec![]);
        let text = render(&mut app);
        assert!(text.contains("No Feeds to Display"));
    }

    #[test]
    fn feeds_and_count_are_rendered() {
        let mut app = sample_app();
        app.select_first();
        let text = render(&mut app);

        assert!(text.contains("Tech"));
        assert!(text.contains("cnn_world.rss"));
        assert!(text.contains("2 feeds"), "status bar should show feed count");
    }

    #[test]
    fn missing_input_dialog_is_drawn() {
        let mut app = sample_app();
        app.save_draft();
        let text = render(&mut app);
        assert!(text.contains("Missing Information"));
    }

    #[test]
    fn confirm_dialog_is_drawn() {
        let mut app = sample_app();
        app.request_clear_all();
        let text = render(&mut app);
        assert!(text.contains("Clear Tags"));
    }

    #[test]
    fn single_feed_count_is_singular() {
        let mut app = App::new("http://rss.cnn.com/rss/", vec![FeedRecord::new("Tech", "cnn_tech.rss")]);
        let text = render(&mut app);
        assert!(text.contains("1 feed "));
        assert!(!text.contains("1 feeds"));
    }

    #[test]
    fn very_long_input_does_not_overflow_cursor() {
        let mut app = sample_app();
        app.path_input = "x".repeat(70_000);
        render(&mut app);

        app.path_input = "界".repeat(40_000);
        render(&mut app);
    }

    #[test]
    fn draw_does_not_panic_on_tiny_terminal() {
        let mut app = sample_app();
        app.request_clear_all();
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }
}
