use std::fmt;

use crate::session::GameMode;

/// End-of-session report, produced on completion or on an interruption
/// after the first word.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub words_reached: usize,
    pub total_words: usize,
    pub elapsed_secs: f64,
    pub mode: GameMode,
    pub mistakes: usize,
}

impl Summary {
    /// Elapsed time over the index reached; `None` outside manual-advance
    /// mode or when no word was advanced past.
    pub fn avg_secs_per_word(&self) -> Option<f64> {
        if self.mode != GameMode::ManualAdvance {
            return None;
        }
        let index = self.words_reached.checked_sub(1)?;
        if index == 0 {
            return None;
        }
        Some(self.elapsed_secs / index as f64)
    }

    pub fn lines(&self) -> Vec<String> {
        // Halves round away from zero, not to even.
        let mut lines = vec![format!(
            "Made it to word {}/{} in {} seconds",
            self.words_reached,
            self.total_words,
            self.elapsed_secs.round() as u64
        )];
        if let Some(avg) = self.avg_secs_per_word() {
            lines.push(format!("{avg:.3} seconds per word"));
        }
        lines
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(words_reached: usize, elapsed_secs: f64, mode: GameMode) -> Summary {
        Summary {
            words_reached,
            total_words: 2222,
            elapsed_secs,
            mode,
            mistakes: 0,
        }
    }

    #[test]
    fn manual_summary_reports_average_over_index() {
        let s = summary(11, 25.4, GameMode::ManualAdvance);
        assert_eq!(
            s.lines(),
            vec![
                "Made it to word 11/2222 in 25 seconds".to_string(),
                "2.540 seconds per word".to_string(),
            ]
        );
    }

    #[test]
    fn fixed_time_summary_has_no_average() {
        let s = summary(2222, 1342.0, GameMode::FixedTimePerWord);
        assert_eq!(s.avg_secs_per_word(), None);
        assert_eq!(s.to_string(), "Made it to word 2222/2222 in 1342 seconds");
    }

    #[test]
    fn average_omitted_when_index_is_zero() {
        let s = summary(1, 3.0, GameMode::ManualAdvance);
        assert_eq!(s.avg_secs_per_word(), None);
        assert_eq!(s.lines().len(), 1);
    }

    #[test]
    fn elapsed_rounds_to_nearest_second() {
        let s = summary(5, 9.6, GameMode::FixedTimePerWord);
        assert_eq!(s.to_string(), "Made it to word 5/2222 in 10 seconds");

        let half = summary(5, 20.5, GameMode::FixedTimePerWord);
        assert_eq!(half.to_string(), "Made it to word 5/2222 in 21 seconds");
    }
}
