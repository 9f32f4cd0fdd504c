#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use twotwotwotwo::corpus::fetch::{FetchError, Fetcher};
use twotwotwotwo::event::SessionInput;
use twotwotwotwo::session::SessionInterrupt;
use twotwotwotwo::session::clock::Clock;

pub const WORD_COUNT: usize = 2222;

pub fn word_list(n: usize) -> String {
    (0..n).map(|i| format!("word{i:04}\n")).collect()
}

/// Fetcher that counts calls and replies with a canned result.
pub struct CountingFetcher {
    pub calls: Cell<usize>,
    reply: Result<String, u16>,
}

impl CountingFetcher {
    pub fn ok(body: String) -> Self {
        Self {
            calls: Cell::new(0),
            reply: Ok(body),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            calls: Cell::new(0),
            reply: Err(status),
        }
    }
}

impl Fetcher for CountingFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        self.calls.set(self.calls.get() + 1);
        match &self.reply {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(FetchError::Status(*status)),
        }
    }
}

#[derive(Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// What the scripted user does at each prompt.
#[derive(Clone, Debug)]
pub enum Step {
    Answer(&'static str),
    Interrupt,
}

/// Scripted user: answers prompts after a fixed think time, sleeps on the
/// simulated clock, and interrupts once the script runs out (if asked to).
pub struct ScriptedInput {
    clock: ManualClock,
    steps: VecDeque<Step>,
    think_time: Duration,
    pub reads: usize,
    pub paused: Rc<RefCell<Duration>>,
}

impl ScriptedInput {
    pub fn new(clock: ManualClock, steps: Vec<Step>, think_time: Duration) -> Self {
        Self {
            clock,
            steps: steps.into(),
            think_time,
            reads: 0,
            paused: Rc::new(RefCell::new(Duration::ZERO)),
        }
    }
}

impl SessionInput for ScriptedInput {
    fn read_line(&mut self) -> Result<String, SessionInterrupt> {
        self.reads += 1;
        match self.steps.pop_front() {
            Some(Step::Answer(line)) => {
                self.clock.advance(self.think_time);
                Ok(line.to_string())
            }
            Some(Step::Interrupt) | None => Err(SessionInterrupt),
        }
    }

    fn pause(&mut self, duration: Duration) -> Result<(), SessionInterrupt> {
        if let Some(Step::Interrupt) = self.steps.front() {
            self.steps.pop_front();
            return Err(SessionInterrupt);
        }
        self.clock.advance(duration);
        *self.paused.borrow_mut() += duration;
        Ok(())
    }

    fn check_interrupt(&mut self) -> Result<(), SessionInterrupt> {
        Ok(())
    }
}

/// Words in the order they were shown, read back from plain-renderer output.
pub fn shown_words(output: &str) -> Vec<String> {
    output
        .split("\x1b[2J\x1b[1;1H")
        .skip(1)
        .filter_map(|screen| screen.lines().rev().find(|l| !l.is_empty()))
        .map(str::to_string)
        .collect()
}
