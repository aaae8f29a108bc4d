//! Best score tracking
//!
//! A single value persisted to LocalStorage as a decimal string. Anything
//! unreadable (missing key, garbage, negative number) counts as no record.

use crate::persistence;

/// Outcome of comparing a finished run against the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub best: u64,
    pub new_record: bool,
}

impl ScoreReport {
    /// Text shown by the high-score button
    pub fn message(&self) -> String {
        let tail = if self.new_record {
            "🎉 NEW RECORD! 🎉"
        } else {
            "Keep jumping to beat it!"
        };
        format!("🏆 HIGH SCORE: {} 🏆\n\n{}", self.best, tail)
    }
}

/// Persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "spaceJumpHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value; anything that is not a non-negative integer is 0
    pub fn parse(stored: &str) -> Self {
        Self::new(stored.trim().parse().unwrap_or(0))
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Fold a finished run into the record. Returns true if it was beaten.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            log::info!("New high score: {} (was {})", score, self.best);
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Compare a score against the stored record, then fold it in.
    ///
    /// The report carries the record as it stood before this score, so a
    /// beaten record still shows the old value next to "NEW RECORD".
    pub fn submit(&mut self, score: u64) -> ScoreReport {
        let report = ScoreReport {
            best: self.best,
            new_record: score > self.best,
        };
        self.record(score);
        report
    }

    pub fn load() -> Self {
        match persistence::load_string(Self::STORAGE_KEY) {
            Some(stored) => {
                let high = Self::parse(&stored);
                log::info!("Loaded high score {}", high.best);
                high
            }
            None => Self::default(),
        }
    }

    pub fn save(&self) {
        persistence::save_string(Self::STORAGE_KEY, &self.best.to_string());
    }

    /// Read the stored record fresh, compare the score against it, and
    /// write it back only when beaten
    pub fn check_and_store(score: u64) -> ScoreReport {
        let mut high = Self::load();
        let report = high.submit(score);
        if report.new_record {
            high.save();
        }
        report
    }
}
