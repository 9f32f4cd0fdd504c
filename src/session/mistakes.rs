/// Any advance input containing this character counts as a self-reported
/// mistake. Coarse on purpose: "n", "no", "nah" and "nope" all match.
pub const MISTAKE_MARKER: char = 'n';

#[derive(Clone, Debug, Default)]
pub struct MistakeTracker {
    count: usize,
}

impl MistakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_mistake(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_mistake(input: &str) -> bool {
        input.contains(MISTAKE_MARKER)
    }

    /// Records a mistake if `input` carries the marker. Returns whether it did.
    pub fn observe(&mut self, input: &str) -> bool {
        let mistake = Self::is_mistake(input);
        if mistake {
            self.record_mistake();
        }
        mistake
    }

    pub fn header_line(&self) -> Option<String> {
        match self.count {
            0 => None,
            1 => Some("1 mistake so far".to_string()),
            n => Some(format!("{n} mistakes so far")),
        }
    }
}
