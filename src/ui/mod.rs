pub mod input;
pub mod view;

use tracing::{span, trace, Level};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

use self::view::{render, Body, Detail, Row, Screen};

const ACCENT: Color = Color::Rgb(0xFF, 0x98, 0x00);

pub fn draw_main_layout<B>(f: &mut Frame<B>, app: &App)
where
    B: Backend,
{
    let span = span!(Level::TRACE, "render_main");
    let _entered = span.enter();

    let screen = render(app);
    let header_height = if screen.subtitle.is_some() { 2 } else { 1 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints(
            [
                Constraint::Length(header_height), // title
                Constraint::Min(3),                // body
                Constraint::Length(1),             // key bindings
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_header(f, &screen, chunks[0]);
    draw_body(f, app, &screen.body, chunks[1]);
    draw_footer(f, &screen, chunks[2]);
}

fn draw_header<B: Backend>(f: &mut Frame<B>, screen: &Screen, parent: Rect) {
    let mut lines = vec![Spans::from(Span::styled(
        screen.title.as_str(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtitle) = &screen.subtitle {
        lines.push(Spans::from(Span::styled(
            subtitle.as_str(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    f.render_widget(Paragraph::new(lines), parent);
}

fn draw_footer<B: Backend>(f: &mut Frame<B>, screen: &Screen, parent: Rect) {
    let mut spans = Vec::new();
    for (idx, (keys, action)) in screen.footer.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" • "));
        }
        spans.push(Span::styled(
            *keys,
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    let help = Paragraph::new(Text::from(Spans::from(spans)))
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, parent);
}

fn draw_body<B: Backend>(f: &mut Frame<B>, app: &App, body: &Body, parent: Rect) {
    match body {
        Body::Prompt { value, placeholder } => draw_input_box(f, app, value, *placeholder, parent),
        Body::Loading(msg) => draw_status(f, msg, Style::default().fg(ACCENT), parent),
        Body::Error(msg) => draw_status(f, msg, Style::default().fg(Color::Red), parent),
        Body::Empty(msg) => draw_status(f, msg, Style::default(), parent),
        Body::List {
            summary,
            rows,
            selected,
            detail,
        } => draw_list(f, summary, rows, *selected, detail.as_ref(), parent),
    }
}

fn draw_input_box<B: Backend>(
    f: &mut Frame<B>,
    app: &App,
    value: &str,
    placeholder: bool,
    parent: Rect,
) {
    let area = Rect {
        height: parent.height.min(3),
        ..parent
    };
    let style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input = Paragraph::new(value)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(input, area);

    // Put the terminal cursor where the next character goes, inside the border
    f.set_cursor(area.x + app.input.cursor_width() as u16 + 1, area.y + 1);
}

fn draw_status<B: Backend>(f: &mut Frame<B>, msg: &str, style: Style, parent: Rect) {
    let status = Paragraph::new(Span::styled(msg, style)).wrap(Wrap { trim: true });
    f.render_widget(status, parent);
}

fn draw_list<B: Backend>(
    f: &mut Frame<B>,
    summary: &str,
    rows: &[Row],
    selected: usize,
    detail: Option<&Detail>,
    parent: Rect,
) {
    let span = span!(Level::TRACE, "render_list");
    let _entered = span.enter();
    trace!(rows = rows.len(), selected);

    let mut constraints = vec![Constraint::Length(1), Constraint::Min(3)];
    if detail.is_some() {
        constraints.push(Constraint::Percentage(35));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(parent);

    f.render_widget(
        Paragraph::new(Span::styled(summary, Style::default().fg(Color::Green))),
        chunks[0],
    );

    let items = rows
        .iter()
        .map(|row| {
            let mut lines = vec![Spans::from(vec![
                Span::styled(
                    format!("{:2}. ", row.ordinal),
                    Style::default().fg(ACCENT),
                ),
                Span::raw(row.title.as_str()),
            ])];
            if let Some(meta) = &row.meta {
                lines.push(Spans::from(Span::styled(
                    format!("    {meta}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            ListItem::new(lines)
        })
        .collect::<Vec<ListItem>>();

    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
        .highlight_style(
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::ITALIC),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, chunks[1], &mut state);

    if let Some(detail) = detail {
        draw_episode_details(f, detail, chunks[2]);
    }
}

fn draw_episode_details<B: Backend>(f: &mut Frame<B>, detail: &Detail, parent: Rect) {
    let span = span!(Level::TRACE, "render_episode");
    let _entered = span.enter();

    let width = parent.width.saturating_sub(2).max(1);
    let description = html2text::from_read(detail.description.as_bytes(), width.into());
    let audio_link = if detail.audio_url.is_empty() {
        "[no audio]".to_string()
    } else if detail.mime_type.is_empty() {
        detail.audio_url.clone()
    } else {
        format!("{} ({})", detail.audio_url, detail.mime_type)
    };

    let mut text = vec![
        Spans::from(Span::styled(
            audio_link,
            Style::default()
                .add_modifier(Modifier::ITALIC)
                .add_modifier(Modifier::BOLD),
        )),
        Spans::from(Span::raw("")),
    ];
    text.extend(description.lines().map(|l| Spans::from(Span::raw(l.to_string()))));

    let contents = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Episode"));
    f.render_widget(contents, parent);
}
