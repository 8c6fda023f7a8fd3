use crate::tui::{
    inputs::{map_event, Action},
    views::{self, LeftPane, RightPane},
};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mastery_core::{filter_by_name, CoreError, Deck, Repository, StudySession};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;

enum Screen {
    Decks,
    Topics,
    Study { session: StudySession, topic: String },
}

pub struct TuiApp {
    pub repo: Arc<dyn Repository>,
    pub rt: Arc<Runtime>,
    all_decks: Vec<Deck>,
    /// `all_decks` narrowed by `search`.
    decks: Vec<Deck>,
    search: String,
    typing: bool,
    sel: usize,
    topic_sel: usize,
    screen: Screen,
    status: Option<String>,
}

impl TuiApp {
    pub fn new(repo: Arc<dyn Repository>, rt: Arc<Runtime>) -> Self {
        Self {
            repo,
            rt,
            all_decks: vec![],
            decks: vec![],
            search: String::new(),
            typing: false,
            sel: 0,
            topic_sel: 0,
            screen: Screen::Decks,
            status: None,
        }
    }

    fn load_decks(&mut self) {
        match self.rt.block_on(self.repo.list_decks()) {
            Ok(v) => self.all_decks = v,
            Err(e) => self.report(e),
        }
        self.apply_search();
    }

    fn apply_search(&mut self) {
        self.decks = filter_by_name(&self.all_decks, &self.search);
        self.sel = self.sel.min(self.decks.len().saturating_sub(1));
        if let Some(d) = self.decks.get(self.sel) {
            self.topic_sel = self.topic_sel.min(d.topics.len().saturating_sub(1));
        }
    }

    fn report(&mut self, e: CoreError) {
        tracing::debug!(error = %e, "tui action failed");
        self.status = Some(e.to_string());
    }

    fn selected_deck(&self) -> Option<&Deck> {
        self.decks.get(self.sel)
    }

    fn start_study(&mut self) {
        let Some(topic) = self
            .selected_deck()
            .and_then(|d| d.topics.get(self.topic_sel))
            .cloned()
        else {
            return;
        };
        match StudySession::new(topic.cards) {
            Ok(session) => {
                self.screen = Screen::Study {
                    session,
                    topic: topic.name,
                }
            }
            Err(CoreError::EmptySession) => {
                self.status = Some(format!("{} has no cards yet", topic.name));
            }
            Err(e) => self.report(e),
        }
    }

    /// Shifts the selected deck or topic one place; `up` means towards the top.
    fn reorder(&mut self, up: bool) {
        let step = |i: usize, len: usize| -> Option<usize> {
            if up {
                i.checked_sub(1)
            } else if i + 1 < len {
                Some(i + 1)
            } else {
                None
            }
        };
        let res = match self.screen {
            Screen::Decks => {
                if !self.search.is_empty() {
                    self.status = Some("clear the search to reorder decks".into());
                    return;
                }
                let Some(to) = step(self.sel, self.decks.len()) else { return };
                let id = self.decks[self.sel].id;
                let res = self.rt.block_on(self.repo.move_deck(id, to));
                if res.is_ok() {
                    self.sel = to;
                }
                res
            }
            Screen::Topics => {
                let Some(deck) = self.selected_deck() else { return };
                let Some(to) = step(self.topic_sel, deck.topics.len()) else { return };
                let id = deck.topics[self.topic_sel].id;
                let res = self.rt.block_on(self.repo.move_topic(id, to));
                if res.is_ok() {
                    self.topic_sel = to;
                }
                res
            }
            Screen::Study { .. } => return,
        };
        if let Err(e) = res {
            self.report(e);
        }
        self.load_decks();
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load_decks();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        let search = (self.typing || !self.search.is_empty()).then_some(self.search.as_str());
        terminal.draw(|f| {
            let deck = self.selected_deck();
            let left = match (&self.screen, deck) {
                (Screen::Decks, _) | (_, None) => LeftPane::Decks {
                    decks: &self.decks,
                    sel: self.sel,
                    search,
                },
                (_, Some(deck)) => LeftPane::Topics {
                    deck,
                    sel: self.topic_sel,
                },
            };
            let right = match (&self.screen, deck) {
                (Screen::Study { session, topic }, _) => RightPane::Card {
                    session,
                    topic: topic.as_str(),
                },
                (Screen::Decks, Some(d)) => RightPane::Deck(d),
                (Screen::Topics, Some(d)) => match d.topics.get(self.topic_sel) {
                    Some(t) => RightPane::Topic(t),
                    None => RightPane::Empty("No topics."),
                },
                (_, None) => RightPane::Idle,
            };
            let area = f.size();
            views::draw_ui(f, area, left, right, self.status.as_deref());
        })?;
        Ok(())
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            self.draw(terminal)?;

            if !event::poll(std::time::Duration::from_millis(100))? {
                continue;
            }
            let action = map_event(event::read()?, self.typing);
            if action != Action::None {
                self.status = None;
            }
            if self.typing {
                match action {
                    Action::Type(c) => self.search.push(c),
                    Action::Erase => {
                        self.search.pop();
                    }
                    Action::Back => {
                        self.search.clear();
                        self.typing = false;
                    }
                    Action::Enter => self.typing = false,
                    Action::Up => self.sel = self.sel.saturating_sub(1),
                    Action::Down => self.sel += 1,
                    _ => {}
                }
                self.apply_search();
                continue;
            }
            match action {
                Action::Quit => break,
                Action::Search => {
                    if matches!(self.screen, Screen::Decks) {
                        self.typing = true;
                    }
                }
                Action::Up => match self.screen {
                    Screen::Decks => self.sel = self.sel.saturating_sub(1),
                    Screen::Topics => self.topic_sel = self.topic_sel.saturating_sub(1),
                    Screen::Study { .. } => {}
                },
                Action::Down => match self.screen {
                    Screen::Decks => {
                        if self.sel + 1 < self.decks.len() {
                            self.sel += 1;
                            self.topic_sel = 0;
                        }
                    }
                    Screen::Topics => {
                        let n = self.selected_deck().map_or(0, |d| d.topics.len());
                        if self.topic_sel + 1 < n {
                            self.topic_sel += 1;
                        }
                    }
                    Screen::Study { .. } => {}
                },
                Action::MoveUp => self.reorder(true),
                Action::MoveDown => self.reorder(false),
                Action::Enter => match self.screen {
                    Screen::Decks => {
                        if self.selected_deck().is_some() {
                            self.topic_sel = 0;
                            self.screen = Screen::Topics;
                        }
                    }
                    Screen::Topics => self.start_study(),
                    Screen::Study { .. } => {}
                },
                Action::Back => match self.screen {
                    Screen::Decks => {
                        if !self.search.is_empty() {
                            self.search.clear();
                            self.apply_search();
                        }
                    }
                    Screen::Topics => self.screen = Screen::Decks,
                    // The snapshot may be stale by now; reload on the way out.
                    Screen::Study { .. } => {
                        self.screen = Screen::Topics;
                        self.load_decks();
                    }
                },
                Action::Flip | Action::Next | Action::Prev => {
                    if let Screen::Study { session, .. } = &mut self.screen {
                        match action {
                            Action::Flip => session.flip(),
                            Action::Next => session.advance(),
                            _ => session.retreat(),
                        }
                    }
                }
                Action::Type(_) | Action::Erase | Action::None => {}
            }
        }
        Ok(())
    }
}
