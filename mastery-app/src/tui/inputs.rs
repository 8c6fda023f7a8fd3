use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    Enter,
    Back,
    Flip,
    Next,
    Prev,
    MoveUp,
    MoveDown,
    Search,
    Type(char),
    Erase,
    None,
}

/// `typing` is set while the search box has focus; letters then go to the query.
pub fn map_event(ev: Event, typing: bool) -> Action {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = ev
    else {
        return Action::None;
    };
    if kind == KeyEventKind::Release {
        return Action::None;
    }
    if typing {
        return match code {
            KeyCode::Esc => Action::Back,
            KeyCode::Enter => Action::Enter,
            KeyCode::Backspace => Action::Erase,
            KeyCode::Up => Action::Up,
            KeyCode::Down => Action::Down,
            KeyCode::Char(c) => Action::Type(c),
            _ => Action::None,
        };
    }
    match (code, modifiers) {
        (KeyCode::Char('q'), _) => Action::Quit,
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => Action::Back,
        (KeyCode::Up, KeyModifiers::SHIFT) | (KeyCode::Char('K'), _) => Action::MoveUp,
        (KeyCode::Down, KeyModifiers::SHIFT) | (KeyCode::Char('J'), _) => Action::MoveDown,
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Action::Up,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::Down,
        (KeyCode::Enter, _) => Action::Enter,
        (KeyCode::Char(' '), _) | (KeyCode::Char('f'), _) => Action::Flip,
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) | (KeyCode::Char('n'), _) => Action::Next,
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) | (KeyCode::Char('p'), _) => Action::Prev,
        (KeyCode::Char('/'), _) => Action::Search,
        _ => Action::None,
    }
}
