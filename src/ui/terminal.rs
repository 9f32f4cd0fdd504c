use std::io::{self, Write};

use crossterm::cursor::{MoveTo, MoveToColumn};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::ui::line_input::LineInput;

/// Clear the screen and put the cursor at the top left (`ESC[2J` then `ESC[1;1H`).
pub fn clear_and_home<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Repaint the edited line from `start_col`, leaving anything left of it alone.
pub fn redraw_line<W: Write>(out: &mut W, start_col: u16, line: &LineInput) -> io::Result<()> {
    let cursor = u16::try_from(line.cursor()).unwrap_or(u16::MAX);
    queue!(
        out,
        MoveToColumn(start_col),
        Clear(ClearType::UntilNewLine),
        Print(line.value()),
        MoveToColumn(start_col.saturating_add(cursor))
    )
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[cfg(unix)]
    #[test]
    fn emits_clear_then_home() {
        let mut buf = Vec::new();
        clear_and_home(&mut buf).unwrap();
        assert_eq!(buf, b"\x1b[2J\x1b[1;1H");
    }

    #[cfg(unix)]
    #[test]
    fn redraw_keeps_text_before_start_column() {
        let mut line = LineInput::new("ok");
        line.handle(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));

        let mut buf = Vec::new();
        // "Press Enter to begin..." is 23 columns wide.
        redraw_line(&mut buf, 23, &line).unwrap();
        assert_eq!(buf, b"\x1b[24G\x1b[Kok\x1b[25G");
        assert!(!buf.windows(4).any(|w| w == b"\x1b[2K"));
        assert!(!buf.windows(3).any(|w| w == b"\x1b[1G"));
    }
}
