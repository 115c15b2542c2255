use crate::tui::theme::*;
use chrono::NaiveDate;
use noteminder_core::{Note, StatsSummary};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub struct Screen<'a> {
    pub notes: &'a [&'a Note],
    pub cursor: usize,
    pub current: Option<&'a Note>,
    pub due_only: bool,
    pub today: NaiveDate,
    pub stats: &'a StatsSummary,
    pub status: &'a str,
}

pub fn draw_ui(f: &mut Frame, area: Rect, s: &Screen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    draw_list(f, cols[0], s);
    draw_note(f, cols[1], s.current);

    let st = s.stats;
    let status = Paragraph::new(Line::from(vec![
        Span::raw(format!(
            " notes {}  tags {}  due {}  avg strength {:.1}  ",
            st.total_notes, st.total_tags, st.due, st.avg_streak
        )),
        Span::raw(s.status).style(selected_style()),
    ]));
    f.render_widget(status, rows[1]);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j move  "),
        Span::raw(" Enter open  "),
        Span::raw(" r review  "),
        Span::raw(" e/g/h easy/good/hard  "),
        Span::raw(" d due only  "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style());
    f.render_widget(foot, rows[2]);
}

fn draw_list(f: &mut Frame, area: Rect, s: &Screen) {
    let items: Vec<_> = s
        .notes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let line = Line::from(n.title.clone());
            let line = if i == s.cursor {
                line.style(selected_style())
            } else if n.is_due(s.today) {
                line.style(due_style())
            } else {
                line
            };
            ListItem::new(line)
        })
        .collect();

    let title = if s.due_only { "Due today" } else { "Notes" };
    let list = List::new(items).block(
        Block::default()
            .title(Span::raw(title).style(title_style()))
            .borders(Borders::ALL),
    );
    f.render_widget(list, area);
}

fn draw_note(f: &mut Frame, area: Rect, note: Option<&Note>) {
    let block = Block::default().title("Note").borders(Borders::ALL);
    let Some(n) = note else {
        let p = Paragraph::new("Press r to pick a note for review, or Enter to open one.")
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    };

    let mut text = vec![
        Line::from(Span::raw(n.title.as_str()).style(title_style())),
        Line::from(Span::raw(format!("Tags: {}", n.tags.join(", "))).style(meta_style())),
        Line::from(""),
    ];
    text.extend(n.content.lines().map(Line::from));
    text.push(Line::from(""));
    text.push(
        Line::from(format!(
            "Created: {} | Last Reviewed: {} | Next Review: {} | Strength: {}",
            n.created, n.last_reviewed, n.next_review, n.streak
        ))
        .style(meta_style()),
    );

    let p = Paragraph::new(text).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}
