use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::handler::{Command, Focus};
use crate::terminal::RESIZE_KEY;

pub fn handle_key_event(event: KeyEvent, focus: Focus) -> Option<Command> {
    // 全域按鍵（優先處理）
    match (event.code, event.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => return Some(Command::Quit),
        (code, KeyModifiers::NONE) if code == RESIZE_KEY => return Some(Command::Resize),
        _ => {}
    }

    match focus {
        Focus::Input => input_key(event),
        Focus::Sentence => sentence_key(event),
    }
}

fn input_key(event: KeyEvent) -> Option<Command> {
    match (event.code, event.modifiers) {
        // 字符輸入
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Command::Insert(c))
        }
        (KeyCode::Backspace, _) => Some(Command::Backspace),
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Some(Command::ClearInput),

        (KeyCode::Enter, _) => Some(Command::Analyze),

        // 移到句子
        (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Some(Command::FocusSentence)
        }

        // ESC 清除訊息
        (KeyCode::Esc, _) => Some(Command::ClearMessage),

        _ => None,
    }
}

fn sentence_key(event: KeyEvent) -> Option<Command> {
    match (event.code, event.modifiers) {
        (KeyCode::Right, KeyModifiers::NONE) | (KeyCode::Tab, KeyModifiers::NONE) => {
            Some(Command::NextKeyword)
        }
        (KeyCode::Left, KeyModifiers::NONE)
        | (KeyCode::BackTab, _)
        | (KeyCode::Tab, KeyModifiers::SHIFT) => Some(Command::PrevKeyword),

        (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => {
            Some(Command::OpenDetail)
        }

        (KeyCode::Esc, _) | (KeyCode::Up, KeyModifiers::NONE) => Some(Command::FocusInput),

        // 直接打字會回到輸入框
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Some(Command::Insert(c))
        }
        (KeyCode::Backspace, _) => Some(Command::Backspace),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_from_any_focus() {
        let ctrl_q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_q, Focus::Input), Some(Command::Quit));
        assert_eq!(handle_key_event(ctrl_q, Focus::Sentence), Some(Command::Quit));
    }

    #[test]
    fn test_input_typing() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('é')), Focus::Input),
            Some(Command::Insert('é'))
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT),
                Focus::Input
            ),
            Some(Command::Insert('J'))
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), Focus::Input),
            Some(Command::Analyze)
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
                Focus::Input
            ),
            Some(Command::ClearInput)
        );
    }

    #[test]
    fn test_sentence_navigation() {
        assert_eq!(
            handle_key_event(key(KeyCode::Right), Focus::Sentence),
            Some(Command::NextKeyword)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::BackTab), Focus::Sentence),
            Some(Command::PrevKeyword)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), Focus::Sentence),
            Some(Command::OpenDetail)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Esc), Focus::Sentence),
            Some(Command::FocusInput)
        );
    }

    #[test]
    fn test_enter_depends_on_focus() {
        assert_ne!(
            handle_key_event(key(KeyCode::Enter), Focus::Input),
            handle_key_event(key(KeyCode::Enter), Focus::Sentence)
        );
    }

    #[test]
    fn test_resize_marker() {
        assert_eq!(
            handle_key_event(key(RESIZE_KEY), Focus::Input),
            Some(Command::Resize)
        );
    }
}
