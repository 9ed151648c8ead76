use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, BorderType, Gauge, List, ListItem, Paragraph, Tabs},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::client::TaskApi;
use crate::tui::app::{App, Filter, InputMode, Theme};

const PLACEHOLDER: &str = "What do you need to do today?";

struct Palette {
    background: Color,
    text: Color,
    muted: Color,
    accent: Color,
    done: Color,
    warning: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            background: Color::White,
            text: Color::Black,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            done: Color::Green,
            warning: Color::Red,
        },
        Theme::Dark => Palette {
            background: Color::Black,
            text: Color::Gray,
            muted: Color::DarkGray,
            accent: Color::LightCyan,
            done: Color::LightGreen,
            warning: Color::LightRed,
        },
    }
}

pub fn draw<A: TaskApi>(f: &mut Frame, app: &mut App<A>) {
    let size = f.area();
    let colors = palette(app.state.theme);
    let base = Style::default().fg(colors.text).bg(colors.background);
    f.render_widget(Block::default().style(base), size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Progress
            Constraint::Length(3), // Input
            Constraint::Length(1), // Filters
            Constraint::Min(3),    // Tasks
            Constraint::Length(1), // Footer/Notice
        ])
        .split(size);

    draw_header(f, app, &colors, chunks[0]);
    draw_progress(f, app, &colors, chunks[1]);
    draw_input(f, app, &colors, chunks[2]);
    draw_filters(f, app, &colors, chunks[3]);
    draw_task_list(f, app, &colors, chunks[4]);
    draw_footer(f, app, &colors, chunks[5]);
}

fn draw_header<A: TaskApi>(f: &mut Frame, app: &App<A>, colors: &Palette, area: Rect) {
    let theme_icon = match app.state.theme {
        Theme::Light => "☾ dark",
        Theme::Dark => "☀ light",
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("✨ Task Manager", Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(format!("[t] {}", theme_icon), Style::default().fg(colors.muted)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_progress<A: TaskApi>(f: &mut Frame, app: &App<A>, colors: &Palette, area: Rect) {
    let label = format!(
        "{} / {} completed",
        app.state.completed_count(),
        app.state.tasks.len()
    );
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(colors.done).bg(colors.background))
        .ratio(app.state.progress())
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_input<A: TaskApi>(f: &mut Frame, app: &App<A>, colors: &Palette, area: Rect) {
    let editing = matches!(app.input_mode, InputMode::Editing);
    let text = if app.state.draft_text.is_empty() && !editing {
        Span::styled(PLACEHOLDER, Style::default().fg(colors.muted))
    } else {
        Span::raw(app.state.draft_text.as_str())
    };
    let border_style = if editing {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.muted)
    };

    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style),
    );
    f.render_widget(input, area);

    if editing {
        let before: String = app.state.draft_text.chars().take(app.cursor_position).collect();
        let x = area.x + 1 + before.width() as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_filters<A: TaskApi>(f: &mut Frame, app: &App<A>, colors: &Palette, area: Rect) {
    let titles: Vec<Line> = Filter::ALL.iter().map(|filter| Line::from(filter.label())).collect();
    let tabs = Tabs::new(titles)
        .select(app.state.filter.index())
        .style(Style::default().fg(colors.muted))
        .highlight_style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD))
        .divider(" ");
    f.render_widget(tabs, area);
}

fn draw_task_list<A: TaskApi>(f: &mut Frame, app: &mut App<A>, colors: &Palette, area: Rect) {
    let block = Block::default().title(" Tasks ").borders(Borders::ALL).border_type(BorderType::Rounded);
    let filtered = app.state.filtered_tasks();

    if filtered.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("📭 No tasks found", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("Stay productive ✨", Style::default().fg(colors.muted))),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = filtered.iter().map(|task| {
        let (check, text_style) = if task.completed {
            ("[✓] ", Style::default().fg(colors.done).add_modifier(Modifier::CROSSED_OUT))
        } else {
            ("[ ] ", Style::default().fg(colors.text))
        };
        ListItem::new(Line::from(vec![
            Span::styled(check, Style::default().fg(colors.done)),
            Span::styled(task.text.clone(), text_style),
        ]))
    }).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(colors.muted).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut app.selection);
}

fn draw_footer<A: TaskApi>(f: &mut Frame, app: &App<A>, colors: &Palette, area: Rect) {
    let footer = match (&app.state.notice, &app.input_mode) {
        (Some(notice), _) => Paragraph::new(notice.as_str()).style(Style::default().fg(colors.warning)),
        (None, InputMode::Editing) => Paragraph::new("Enter: Add | Esc: Cancel")
            .style(Style::default().fg(colors.muted)),
        (None, InputMode::Normal) => Paragraph::new(
            "a: Add | space: Toggle | d: Delete done | f: Filter | t: Theme | r: Reload | q: Quit",
        )
        .style(Style::default().fg(colors.muted)),
    };
    f.render_widget(footer.alignment(Alignment::Center), area);
}
