use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Fullscreen,
    Up,
    Down,
    Left,
    Right,
    EndRound,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (_, KeyCode::Esc) | (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (_, KeyCode::F(11)) | (KeyModifiers::NONE, KeyCode::Char('f')) => {
                Some(Command::Fullscreen)
            }
            (KeyModifiers::NONE, KeyCode::Char('w') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::EndRound),
            _ => None,
        }
    }
}
