use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, ClearType},
};
use std::io;

/// 視窗大小改變時回傳的特殊按鍵標記
pub const RESIZE_KEY: KeyCode = KeyCode::F(21);

pub struct Terminal {
    size: (u16, u16),
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let size = terminal::size()?;
        Ok(Self { size })
    }

    pub fn enter_raw_mode() -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(())
    }

    pub fn exit_raw_mode() -> Result<()> {
        execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn clear_screen() -> Result<()> {
        execute!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    pub fn update_size(&mut self) -> Result<()> {
        self.size = terminal::size()?;
        Ok(())
    }

    pub fn read_key() -> Result<KeyEvent> {
        loop {
            let event = event::read()?;

            match event {
                Event::Key(key_event) => {
                    // 處理正常的 Press 和 Repeat 事件
                    if key_event.kind == KeyEventKind::Press
                        || key_event.kind == KeyEventKind::Repeat
                    {
                        return Ok(key_event);
                    }
                }
                Event::Resize(_cols, _rows) => {
                    // 視窗大小改變,返回特殊標記
                    return Ok(KeyEvent::new(RESIZE_KEY, KeyModifiers::NONE));
                }
                _ => {
                    // 忽略其他事件（鼠標、貼上等）
                }
            }
        }
    }

    pub fn hide_cursor() -> Result<()> {
        execute!(io::stdout(), cursor::Hide)?;
        Ok(())
    }

    pub fn show_cursor() -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        Ok(())
    }
}

/// 設置 panic hook 以確保終端正常恢復
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = Terminal::exit_raw_mode();
        let _ = Terminal::show_cursor();
        original_hook(panic_info);
    }));
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = Self::exit_raw_mode();
        let _ = Self::show_cursor();
    }
}
