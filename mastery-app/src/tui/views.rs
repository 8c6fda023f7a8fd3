use crate::tui::theme::*;
use mastery_core::{Deck, Face, StudySession, Topic};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub enum LeftPane<'a> {
    Decks {
        decks: &'a [Deck],
        sel: usize,
        search: Option<&'a str>,
    },
    Topics {
        deck: &'a Deck,
        sel: usize,
    },
}

pub enum RightPane<'a> {
    Idle,
    Deck(&'a Deck),
    Topic(&'a Topic),
    Card { session: &'a StudySession, topic: &'a str },
    Empty(&'a str),
}

const LIST_KEYS: &str = " ↑/↓ select  Enter open  Esc back  K/J reorder  / search  q quit ";
const STUDY_KEYS: &str = " space flip  ←/h prev  →/l next  Esc stop  q quit ";

pub fn draw_ui(f: &mut Frame, area: Rect, left: LeftPane, right: RightPane, status: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    let keys = if matches!(right, RightPane::Card { .. }) { STUDY_KEYS } else { LIST_KEYS };
    draw_left(f, chunks[0], left);
    draw_right(f, chunks[1], right);

    let foot = match status {
        Some(msg) => Line::from(Span::raw(format!(" {msg}")).style(status_style())),
        None => Line::from(Span::raw(keys)).style(footer_style()),
    };
    f.render_widget(Paragraph::new(foot), rows[1]);
}

fn draw_left(f: &mut Frame, area: Rect, left: LeftPane) {
    let (title, items, empty_msg): (String, Vec<ListItem>, &str) = match left {
        LeftPane::Decks { decks, sel, search } => {
            let title = match search {
                Some(q) => format!("Decks  /{q}"),
                None => "Decks".to_string(),
            };
            let items = decks
                .iter()
                .enumerate()
                .map(|(i, d)| {
                    let name = if i == sel {
                        Span::raw(d.name.clone()).style(selected_style())
                    } else {
                        Span::raw(d.name.clone())
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw("■ ").style(deck_swatch(d.color())),
                        name,
                        Span::raw(format!("  {}", d.card_count())).style(hint_style()),
                    ]))
                })
                .collect();
            let msg = if search.is_some() {
                "No search results."
            } else {
                "Create a deck with `mastery deck add`."
            };
            (title, items, msg)
        }
        LeftPane::Topics { deck, sel } => {
            let items = deck
                .topics
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let s = if i == sel {
                        Line::from(t.name.clone()).style(selected_style())
                    } else {
                        Line::from(t.name.clone())
                    };
                    ListItem::new(s)
                })
                .collect();
            (deck.name.clone(), items, "")
        }
    };

    let block = Block::default()
        .title(Span::raw(title).style(title_style()))
        .borders(Borders::ALL);
    if items.is_empty() {
        let p = Paragraph::new(empty_msg)
            .style(hint_style())
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
    } else {
        f.render_widget(List::new(items).block(block), area);
    }
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Idle => {
            let p = Paragraph::new("Press Enter to open the selected deck.")
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Study").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Study").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Deck(deck) => {
            let mut text = vec![
                Line::from(Span::raw(deck.name.clone()).style(title_style())),
                Line::from(format!("{} topic(s), {} card(s)", deck.topics.len(), deck.card_count())),
                Line::from(Span::raw(format!("color: {}", deck.color().name())).style(deck_swatch(deck.color()))),
            ];
            if let Some(img) = &deck.image {
                text.push(Line::from(Span::raw(format!("image: {} bytes", img.len())).style(hint_style())));
            }
            let p = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Deck").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Topic(topic) => {
            let mut text = vec![Line::from(format!("{} card(s)", topic.cards.len()))];
            for c in topic.cards.iter().take(area.height.saturating_sub(3) as usize) {
                text.push(Line::from(Span::raw(format!("· {}", c.front.text)).style(hint_style())));
            }
            let p = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().title(topic.name.clone()).borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Card { session, topic } => {
            let title = format!("{topic}  [{}/{}]", session.cursor() + 1, session.len());
            let block = Block::default().title(title).borders(Borders::ALL);
            let inner = block.inner(area);
            f.render_widget(block, area);

            let label = match session.face() {
                Face::Front => "Front",
                Face::Back => "Back",
            };
            let side = session.current_side();
            let mut text = vec![
                Line::from(Span::raw(label).style(title_style())),
                Line::from(""),
                Line::from(side.text.clone()),
            ];
            if let Some(img) = &side.image {
                text.push(Line::from(""));
                text.push(Line::from(Span::raw(format!("[image {} bytes]", img.len())).style(hint_style())));
            }
            let p = Paragraph::new(text).wrap(Wrap { trim: true });
            f.render_widget(p, inner);
        }
    }
}
