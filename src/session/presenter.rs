use std::io::Write;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::event::SessionInput;
use crate::session::clock::{Clock, Pacing, SessionClock};
use crate::session::mistakes::MistakeTracker;
use crate::session::result::Summary;
use crate::session::{GameMode, SessionError};
use crate::ui::render::WordRenderer;
use crate::ui::terminal;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    pub mode: GameMode,
    pub shuffled: bool,
    pub time_per_word: Duration,
    pub pacing: Pacing,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            shuffled: true,
            time_per_word: Duration::from_secs_f64(1342.0 / 2222.0),
            pacing: Pacing::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitingStart,
    Running { index: usize },
    Completed,
    Interrupted { index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionOutcome {
    Completed(Summary),
    Interrupted(Summary),
}

impl SessionOutcome {
    pub fn summary(&self) -> &Summary {
        match self {
            SessionOutcome::Completed(summary) | SessionOutcome::Interrupted(summary) => summary,
        }
    }
}

/// Drives one session: start prompt, one screen per word, then a summary.
pub struct PresentationLoop<I, C> {
    options: SessionOptions,
    renderer: Box<dyn WordRenderer>,
    input: I,
    clock: C,
    rng: SmallRng,
    state: SessionState,
    mistakes: MistakeTracker,
}

impl<I: SessionInput, C: Clock> PresentationLoop<I, C> {
    pub fn new(options: SessionOptions, renderer: Box<dyn WordRenderer>, input: I, clock: C) -> Self {
        Self {
            options,
            renderer,
            input,
            clock,
            rng: SmallRng::from_entropy(),
            state: SessionState::AwaitingStart,
            mistakes: MistakeTracker::new(),
        }
    }

    pub fn with_rng(mut self, rng: SmallRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mistakes(&self) -> &MistakeTracker {
        &self.mistakes
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    /// Runs the session to completion or interruption. An interrupt before
    /// the first word has been advanced past yields `SessionError::Aborted`.
    pub fn run<W: Write>(
        &mut self,
        mut corpus: Corpus,
        out: &mut W,
    ) -> Result<SessionOutcome, SessionError> {
        self.state = SessionState::AwaitingStart;
        if self.options.shuffled {
            corpus.shuffle(&mut self.rng);
        }
        let total = corpus.len();
        let mode = self.options.mode;

        info!("Playing {total} in mode {mode:?}");
        writeln!(out, "Playing {total} in {} mode", mode.label())?;
        write!(out, "Press Enter to begin...")?;
        out.flush()?;
        if self.input.read_line().is_err() {
            debug!("interrupted before the session started");
            return Err(SessionError::Aborted);
        }

        let clock = SessionClock::start(self.clock.now(), self.options.pacing);
        let mut index = 0;
        for (i, word) in corpus.iter().enumerate() {
            index = i;
            self.state = SessionState::Running { index };
            match self.present(index, word, total, &clock, out) {
                Ok(()) => {}
                Err(SessionError::Interrupted(_)) => return self.interrupted(index, total, &clock),
                Err(err) => return Err(err),
            }
        }

        self.state = SessionState::Completed;
        debug!("session completed");
        let words_reached = if total == 0 { 0 } else { index + 1 };
        let summary = self.summary(words_reached, total, &clock);
        Ok(SessionOutcome::Completed(summary))
    }

    fn present<W: Write>(
        &mut self,
        index: usize,
        word: &str,
        total: usize,
        clock: &SessionClock,
        out: &mut W,
    ) -> Result<(), SessionError> {
        self.input.check_interrupt()?;
        terminal::clear_and_home(out)?;
        writeln!(out, "{}/{}", index + 1, total)?;
        if let Some(line) = self.mistakes.header_line() {
            writeln!(out, "{line}")?;
        }
        if self.options.mode == GameMode::ManualAdvance {
            for line in clock.pacing_lines(index, self.clock.now()) {
                writeln!(out, "{line}")?;
            }
        }
        writeln!(out, "{}", self.renderer.render(word))?;
        out.flush()?;
        self.input.check_interrupt()?;

        match self.options.mode {
            GameMode::FixedTimePerWord => self.input.pause(self.options.time_per_word)?,
            GameMode::ManualAdvance => {
                let answer = self.input.read_line()?;
                if self.mistakes.observe(&answer) {
                    debug!(index, mistakes = self.mistakes.count(), "mistake recorded");
                }
            }
        }
        Ok(())
    }

    fn interrupted(
        &mut self,
        index: usize,
        total: usize,
        clock: &SessionClock,
    ) -> Result<SessionOutcome, SessionError> {
        self.state = SessionState::Interrupted { index };
        debug!(index, "session interrupted");
        if index == 0 {
            return Err(SessionError::Aborted);
        }
        let summary = self.summary(index + 1, total, clock);
        Ok(SessionOutcome::Interrupted(summary))
    }

    fn summary(&self, words_reached: usize, total: usize, clock: &SessionClock) -> Summary {
        Summary {
            words_reached,
            total_words: total,
            elapsed_secs: clock.elapsed_secs(self.clock.now()),
            mode: self.options.mode,
            mistakes: self.mistakes.count(),
        }
    }
}
