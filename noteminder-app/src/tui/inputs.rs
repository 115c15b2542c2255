use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use noteminder_core::Feedback;

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Quit,
    Up,
    Down,
    Select,
    Pick,
    Feedback(Feedback),
    ToggleDue,
    None,
}

pub fn map_event(ev: Event) -> Action {
    if let Event::Key(KeyEvent { code, kind, .. }) = ev {
        if kind != KeyEventKind::Press {
            return Action::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => Action::Up,
            KeyCode::Down | KeyCode::Char('j') => Action::Down,
            KeyCode::Enter => Action::Select,
            KeyCode::Char('r') => Action::Pick,
            KeyCode::Char('1') | KeyCode::Char('e') => Action::Feedback(Feedback::Easy),
            KeyCode::Char('2') | KeyCode::Char('g') => Action::Feedback(Feedback::Good),
            KeyCode::Char('3') | KeyCode::Char('h') => Action::Feedback(Feedback::Hard),
            KeyCode::Char('d') => Action::ToggleDue,
            _ => Action::None,
        }
    } else {
        Action::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn feedback_keys() {
        assert!(matches!(
            map_event(press(KeyCode::Char('e'))),
            Action::Feedback(Feedback::Easy)
        ));
        assert!(matches!(
            map_event(press(KeyCode::Char('2'))),
            Action::Feedback(Feedback::Good)
        ));
        assert!(matches!(
            map_event(press(KeyCode::Char('h'))),
            Action::Feedback(Feedback::Hard)
        ));
        assert!(matches!(map_event(press(KeyCode::Char('x'))), Action::None));
    }
}
