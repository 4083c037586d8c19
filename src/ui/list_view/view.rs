use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::task::{CompletionFilter, Task};

use super::app::{AppState, Focus, StatusKind};
use super::picker::{owner_label, OwnerPicker};

const OWNER_WIDTH: usize = 9;
const HELP_KEY_WIDTH: usize = 14;
const MAX_BREADCRUMBS: usize = 9;
const EMPTY_FAVORITES: &str = "No items have been added to Favorites yet.";
// Side-by-side favorites pane fits the empty message on one line.
const FAVORITES_MIN_WIDTH: u16 = EMPTY_FAVORITES.len() as u16 + 4;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_FAVORITES: Color = Color::Rgb(180, 156, 92);
const COLOR_FAVORITE: Color = Color::Rgb(255, 92, 92);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let header = chunks[0];
    let controls = chunks[1];
    let main = chunks[2];
    let footer = chunks[3];

    render_header(frame, app, header);
    render_controls(frame, app, controls);

    let panes = if app.is_narrow() {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
            .split(main)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(
                [
                    Constraint::Min(0),
                    Constraint::Length(favorites_width(main.width)),
                ]
                .as_ref(),
            )
            .split(main)
    };
    render_list(frame, app, panes[0]);
    render_favorites(frame, app, panes[1]);

    render_footer(frame, app, footer);

    if let Some(picker) = app.owner_picker.as_ref() {
        render_owner_modal(frame, area, picker);
    }
}

/// 35% of the row, but never narrower than the empty message nor wider than half.
fn favorites_width(total: u16) -> u16 {
    let share = (u32::from(total) * 35 / 100) as u16;
    share.max(FAVORITES_MIN_WIDTH).min(total / 2)
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let spans = vec![
        Span::styled(
            "Todo List",
            Style::default()
                .fg(COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)),
        Span::styled(app.source_label.clone(), Style::default().fg(COLOR_MUTED_DARK)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_controls(frame: &mut Frame, app: &AppState, area: Rect) {
    let query = app.controller.query();
    let search_text = if app.search_active {
        format!("{}_", query.search_text)
    } else if query.search_text.is_empty() {
        "search by task number or title...".to_string()
    } else {
        query.search_text.clone()
    };
    let search_style = if app.search_active || !query.search_text.is_empty() {
        Style::default().fg(COLOR_INFO)
    } else {
        Style::default().fg(COLOR_MUTED_DARK)
    };

    let mut spans = vec![
        Span::styled("search: ", Style::default().fg(COLOR_MUTED)),
        Span::styled(search_text, search_style),
        Span::raw("   "),
    ];
    for (idx, filter) in CompletionFilter::ALL.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let style = if *filter == query.completion {
            Style::default()
                .fg(COLOR_WARNING)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(filter.label(), style));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        owner_label(query.owner),
        Style::default().fg(COLOR_SUCCESS),
    ));

    let border = if app.search_active {
        COLOR_INFO
    } else {
        COLOR_BG_MUTED
    };
    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if app.show_help {
        lines.extend(build_help_lines(content_width));
    } else if app.is_loading() {
        lines.push(Line::from(Span::styled(
            "Loading tasks...",
            Style::default().fg(COLOR_MUTED),
        )));
    } else if app.controller.total_pages() == 0 {
        lines.push(Line::from(Span::styled(
            "No results found.",
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        lines.push(render_breadcrumbs(
            app.controller.current_page(),
            app.controller.total_pages(),
        ));
        lines.push(Line::from(Span::styled(
            format!(
                "Page {} of {}",
                app.controller.current_page(),
                app.controller.total_pages()
            ),
            Style::default().fg(COLOR_MUTED_DARK),
        )));
        lines.push(Line::from(""));
        let focused = app.focus == Focus::List;
        for (pos, task) in app.controller.page_tasks().into_iter().enumerate() {
            let selected = focused && pos == app.selected;
            lines.push(render_task_row(
                task,
                app.controller.is_favorite(task.id),
                selected,
                content_width,
            ));
        }
    }

    let border = if app.focus == Focus::List {
        COLOR_BORDER_LIST
    } else {
        COLOR_BG_MUTED
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tasks")
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_favorites(frame: &mut Frame, app: &AppState, area: Rect) {
    let content_width = area.width.saturating_sub(2) as usize;
    let favorites = app.controller.favorite_tasks();
    let list_height = area.height.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    if favorites.is_empty() {
        lines.push(Line::from(Span::styled(
            EMPTY_FAVORITES,
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let focused = app.focus == Focus::Favorites;
        let selected = focused.then_some(app.favorite_selected);
        let (start, end) = list_window(favorites.len(), selected, list_height);
        for (pos, task) in favorites.iter().enumerate().take(end).skip(start) {
            lines.push(render_task_row(
                task,
                true,
                selected == Some(pos),
                content_width,
            ));
        }
    }

    let border = if app.focus == Focus::Favorites {
        COLOR_BORDER_FAVORITES
    } else {
        COLOR_BG_MUTED
    };
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Favorites ({})", favorites.len()))
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let hint = app.footer_hint();
    let hint_span = Span::styled(hint, Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };
    let counts_line = Line::from(Span::styled(
        app.count_summary(),
        Style::default().fg(COLOR_ACCENT),
    ));
    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn render_owner_modal(frame: &mut Frame, area: Rect, picker: &OwnerPicker) {
    let content_width = 26u16.min(area.width.saturating_sub(6));
    let max_height = area.height.saturating_sub(4);
    let height = (picker.options().len() as u16 + 4).min(max_height);
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let list_height = height.saturating_sub(4) as usize;
    let (start, end) = list_window(
        picker.options().len(),
        Some(picker.selected_index()),
        list_height.max(1),
    );
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (idx, option) in picker.options().iter().enumerate().take(end).skip(start) {
        let base_style = if option.is_none() {
            Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let mut span = Span::styled(owner_label(*option), base_style);
        if idx == picker.selected_index() {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(span));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "enter apply  esc cancel",
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("User Filter"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

/// `< 1 2 [3] 4 >` with the page list windowed around the active page.
fn render_breadcrumbs(current: usize, total: usize) -> Line<'static> {
    let edge_style = |enabled: bool| {
        if enabled {
            Style::default().fg(COLOR_ACCENT)
        } else {
            Style::default().fg(COLOR_BG_MUTED)
        }
    };
    let mut spans = vec![Span::styled("<", edge_style(current > 1)), Span::raw(" ")];
    let (start, end) = list_window(total, Some(current - 1), MAX_BREADCRUMBS);
    if start > 0 {
        spans.push(Span::styled("... ", Style::default().fg(COLOR_MUTED_DARK)));
    }
    for page in (start + 1)..=end {
        if page == current {
            spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            spans.push(Span::styled(
                page.to_string(),
                Style::default().fg(COLOR_TEXT),
            ));
        }
        spans.push(Span::raw(" "));
    }
    if end < total {
        spans.push(Span::styled("... ", Style::default().fg(COLOR_MUTED_DARK)));
    }
    spans.push(Span::styled(">", edge_style(current < total)));
    Line::from(spans)
}

fn render_task_row(task: &Task, favorite: bool, selected: bool, width: usize) -> Line<'static> {
    let (marker, marker_color) = if task.completed {
        ("✔", COLOR_SUCCESS)
    } else {
        ("✘", COLOR_ERROR)
    };
    let star = if favorite { "★" } else { "☆" };
    let owner_text = pad_text(&format!("user {}", task.owner_id), OWNER_WIDTH);
    let used = 2 + 1 + OWNER_WIDTH + 1 + 1 + 1;
    let title_width = width.saturating_sub(used);
    let title = pad_text(&format!("{}. {}", task.id, task.title), title_width);

    let mut spans = vec![
        Span::styled(
            format!("{marker} "),
            Style::default()
                .fg(marker_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(title, Style::default().fg(COLOR_TEXT)),
        Span::raw(" "),
        Span::styled(owner_text, Style::default().fg(COLOR_MUTED)),
        Span::raw(" "),
        Span::styled(
            star,
            Style::default().fg(if favorite {
                COLOR_FAVORITE
            } else {
                COLOR_MUTED_DARK
            }),
        ),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    vec![
        help_header("Commands"),
        help_line("j/k or up/down", "move selection", width),
        help_line("h/l or left/right", "previous/next page", width),
        help_line("g/G", "first/last page", width),
        help_line("1-9", "jump to page", width),
        help_line("/", "search by number or title", width),
        help_line("c", "cycle all/completed/not completed", width),
        help_line("u", "filter by user", width),
        help_line("space/f", "toggle favorite", width),
        help_line("tab", "switch tasks/favorites", width),
        help_line("d/x", "remove favorite (favorites panel)", width),
        help_line("q/esc", "quit", width),
        help_line("?", "hide help", width),
    ]
}

fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH);
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    Line::from(vec![
        Span::styled(key_text, Style::default().fg(COLOR_INFO)),
        Span::raw(" "),
        Span::styled(truncate_text(desc, desc_width), Style::default().fg(COLOR_TEXT)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn pad_text(value: &str, width: usize) -> String {
    let text = truncate_text(value, width);
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}
