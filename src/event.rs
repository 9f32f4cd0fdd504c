use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use signal_hook::consts::SIGINT;
use tracing::{debug, warn};

use crate::session::SessionInterrupt;
use crate::ui::line_input::{InputResult, LineInput};
use crate::ui::terminal;

/// Exit status used when a second SIGINT arrives before the session notices the first.
const SIGINT_EXIT_STATUS: i32 = 130;

/// The session's suspension points. Every call observes the interrupt signal.
pub trait SessionInput {
    /// Blocks until one line of input arrives.
    fn read_line(&mut self) -> Result<String, SessionInterrupt>;
    /// Suspends for `duration`.
    fn pause(&mut self, duration: Duration) -> Result<(), SessionInterrupt>;
    /// Returns immediately; fails if an interrupt is pending.
    fn check_interrupt(&mut self) -> Result<(), SessionInterrupt>;
}

/// Stdin-backed input. On a TTY the suspension points run in raw mode so
/// Ctrl-C arrives as a key event; otherwise SIGINT is caught by a flag and
/// lines come from a reader thread so a blocked read never hides it.
pub struct TerminalInput {
    interrupted: Arc<AtomicBool>,
    interactive: bool,
    poll_rate: Duration,
    lines: Option<Receiver<io::Result<String>>>,
}

impl TerminalInput {
    pub fn new(poll_rate: Duration) -> io::Result<Self> {
        let interrupted = Arc::new(AtomicBool::new(false));
        // Registered first: a second SIGINT exits even if the flag is never polled.
        signal_hook::flag::register_conditional_shutdown(
            SIGINT,
            SIGINT_EXIT_STATUS,
            Arc::clone(&interrupted),
        )?;
        signal_hook::flag::register(SIGINT, Arc::clone(&interrupted))?;
        Ok(Self {
            interrupted,
            interactive: io::stdin().is_tty(),
            poll_rate,
            lines: None,
        })
    }

    /// Line input from `reader` instead of stdin. No signal handlers are installed.
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R, poll_rate: Duration) -> Self {
        Self {
            interrupted: Arc::new(AtomicBool::new(false)),
            interactive: false,
            poll_rate,
            lines: Some(spawn_line_feed(reader)),
        }
    }

    /// Handle for raising the interrupt from elsewhere, as SIGINT does.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Raw mode would race the reader thread for stdin once it exists.
    fn raw_allowed(&self) -> bool {
        self.interactive && self.lines.is_none()
    }

    fn signalled(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }

    fn interrupt(&self) -> SessionInterrupt {
        self.interrupted.store(true, Ordering::SeqCst);
        SessionInterrupt
    }

    fn read_line_raw(&mut self) -> io::Result<Result<String, SessionInterrupt>> {
        let _raw = RawMode::enable()?;
        let mut stdout = io::stdout();
        let start_col = cursor::position().map(|(col, _)| col).unwrap_or(0);
        let mut line = LineInput::default();
        loop {
            if self.signalled() {
                return Ok(Err(SessionInterrupt));
            }
            if !event::poll(self.poll_rate)? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match line.handle(key) {
                InputResult::Continue => {
                    terminal::redraw_line(&mut stdout, start_col, &line)?;
                    stdout.flush()?;
                }
                InputResult::Submit => {
                    execute!(stdout, Print("\r\n"))?;
                    return Ok(Ok(line.into_value()));
                }
                InputResult::Interrupt => return Ok(Err(self.interrupt())),
            }
        }
    }

    fn read_line_cooked(&mut self) -> io::Result<Result<String, SessionInterrupt>> {
        let lines = self
            .lines
            .get_or_insert_with(|| spawn_line_feed(BufReader::new(io::stdin())));
        loop {
            if self.interrupted.load(Ordering::SeqCst) {
                return Ok(Err(SessionInterrupt));
            }
            match lines.recv_timeout(self.poll_rate) {
                Ok(Ok(mut buf)) => {
                    let trimmed = buf.trim_end_matches(['\n', '\r']).len();
                    buf.truncate(trimmed);
                    return Ok(Ok(buf));
                }
                Ok(Err(err)) => return Err(err),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("stdin closed, treating as interrupt");
                    self.interrupted.store(true, Ordering::SeqCst);
                    return Ok(Err(SessionInterrupt));
                }
            }
        }
    }

    fn pause_raw(&mut self, deadline: Instant) -> io::Result<Result<(), SessionInterrupt>> {
        let _raw = RawMode::enable()?;
        loop {
            if self.signalled() {
                return Ok(Err(SessionInterrupt));
            }
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(Ok(()));
            }
            if !event::poll(remaining.min(self.poll_rate))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                if is_ctrl_c(&key) {
                    return Ok(Err(self.interrupt()));
                }
            }
        }
    }

    fn pause_cooked(&mut self, deadline: Instant) -> Result<(), SessionInterrupt> {
        loop {
            self.check_interrupt()?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(());
            }
            thread::sleep(remaining.min(self.poll_rate));
        }
    }
}

impl SessionInput for TerminalInput {
    fn read_line(&mut self) -> Result<String, SessionInterrupt> {
        self.check_interrupt()?;
        if self.raw_allowed() {
            match self.read_line_raw() {
                Ok(result) => return result,
                Err(err) => debug!("raw mode input unavailable ({err}), reading lines instead"),
            }
        }
        self.read_line_cooked().unwrap_or_else(|err| {
            warn!("reading input failed: {err}");
            Err(self.interrupt())
        })
    }

    fn pause(&mut self, duration: Duration) -> Result<(), SessionInterrupt> {
        self.check_interrupt()?;
        let deadline = Instant::now() + duration;
        if !self.raw_allowed() {
            return self.pause_cooked(deadline);
        }
        match self.pause_raw(deadline) {
            Ok(result) => result,
            Err(err) => {
                debug!("raw mode pause unavailable ({err}), sleeping instead");
                self.pause_cooked(deadline)
            }
        }
    }

    fn check_interrupt(&mut self) -> Result<(), SessionInterrupt> {
        if self.signalled() {
            Err(SessionInterrupt)
        } else {
            Ok(())
        }
    }
}

/// Reads lines on a helper thread. The channel disconnects at EOF or after
/// the first read error, which is forwarded.
fn spawn_line_feed<R: BufRead + Send + 'static>(mut reader: R) -> Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        loop {
            let mut buf = String::new();
            match reader.read_line(&mut buf) {
                Ok(0) => return,
                Ok(_) => {
                    if tx.send(Ok(buf)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    let _ = tx.send(Err(err));
                    return;
                }
            }
        }
    });
    rx
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == KeyCode::Char('c')
}

/// Raw mode for the lifetime of the guard.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use super::*;

    const POLL: Duration = Duration::from_millis(10);

    /// Blocks every read until its sender is dropped, like a silent terminal.
    struct Stalled(Receiver<()>);

    impl Read for Stalled {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            let _ = self.0.recv();
            Ok(0)
        }
    }

    #[test]
    fn interrupt_during_blocked_read_returns() {
        let (hold, stalled) = mpsc::channel::<()>();
        let mut input = TerminalInput::from_reader(BufReader::new(Stalled(stalled)), POLL);
        let flag = input.interrupt_flag();
        let signaller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(input.read_line(), Err(SessionInterrupt));
        signaller.join().unwrap();
        drop(hold);
    }

    #[test]
    fn lines_arrive_without_line_endings() {
        let mut input = TerminalInput::from_reader(Cursor::new("yes\r\n\nn\n"), POLL);
        assert_eq!(input.read_line(), Ok("yes".to_string()));
        assert_eq!(input.read_line(), Ok(String::new()));
        assert_eq!(input.read_line(), Ok("n".to_string()));
    }

    #[test]
    fn end_of_input_is_interrupt() {
        let mut input = TerminalInput::from_reader(Cursor::new("last\n"), POLL);
        assert_eq!(input.read_line(), Ok("last".to_string()));
        assert_eq!(input.read_line(), Err(SessionInterrupt));
        assert_eq!(input.check_interrupt(), Err(SessionInterrupt));
    }

    #[test]
    fn pause_stops_early_on_interrupt() {
        let mut input = TerminalInput::from_reader(Cursor::new(""), POLL);
        input.interrupt_flag().store(true, Ordering::SeqCst);
        let started = Instant::now();
        assert_eq!(input.pause(Duration::from_secs(5)), Err(SessionInterrupt));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn ctrl_c_press_is_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_ctrl_c(&key));
    }

    #[test]
    fn plain_c_is_not_interrupt() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(!is_ctrl_c(&key));
    }
}
