use std::fmt;
use std::time::Instant;

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Thresholds below which pacing statistics are too noisy to show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    pub total_words: usize,
    /// Average seconds per word is hidden while `index <= stats_after_index`.
    pub stats_after_index: usize,
    /// The ETA is hidden while `index <= eta_after_index`.
    pub eta_after_index: usize,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            total_words: 2222,
            stats_after_index: 5,
            eta_after_index: 20,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eta {
    Minutes(u64),
    UnderOneMinute,
}

impl Eta {
    pub fn from_secs(secs: f64) -> Self {
        if secs > 60.0 {
            // Halves round away from zero, not to even.
            Eta::Minutes((secs / 60.0).round() as u64)
        } else {
            Eta::UnderOneMinute
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Minutes(minutes) => write!(f, "about ~{minutes} minutes to go"),
            Eta::UnderOneMinute => write!(f, "ETA: <1m"),
        }
    }
}

pub struct SessionClock {
    started_at: Instant,
    pacing: Pacing,
}

impl SessionClock {
    pub fn start(now: Instant, pacing: Pacing) -> Self {
        Self {
            started_at: now,
            pacing,
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64()
    }

    pub fn average_secs_per_word(&self, index: usize, now: Instant) -> f64 {
        self.elapsed_secs(now) / (index + 1) as f64
    }

    pub fn eta_secs(avg: f64, index: usize, total: usize) -> f64 {
        avg * total.saturating_sub(index) as f64
    }

    /// Header lines shown above the word in manual-advance mode.
    pub fn pacing_lines(&self, index: usize, now: Instant) -> Vec<String> {
        if index <= self.pacing.stats_after_index {
            return vec![String::new(), String::new()];
        }
        let avg = round_to(self.average_secs_per_word(index, now), 3);
        let mut lines = vec![format!("Avg seconds per word: {avg}")];
        if index <= self.pacing.eta_after_index {
            lines.push(String::new());
            return lines;
        }
        let eta = Eta::from_secs(Self::eta_secs(avg, index, self.pacing.total_words));
        lines.push(eta.to_string());
        lines
    }
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
