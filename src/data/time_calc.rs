//! File/code adapted from https://github.com/jamjamjon/usls

use std::time::Duration;

/// Running totals for the pipeline stages, indexed by stage.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    runs: usize,
    stages: Vec<Duration>,
}

#[allow(dead_code)]
impl TimeCalc {
    /// Adds `x` to stage `i`. A new stage is appended when `i` is one past the end.
    pub fn add_or_push(&mut self, i: usize, x: Duration) {
        match self.stages.get_mut(i) {
            Some(elem) => *elem += x,
            None => self.stages.push(x),
        }
        if i == 0 {
            self.runs += 1;
        }
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().sum()
    }

    pub fn avg(&self) -> Duration {
        match self.runs {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    pub fn avg_i(&self, i: usize) -> Duration {
        match (self.stages.get(i), self.runs) {
            (Some(d), n) if n > 0 => *d / n as u32,
            _ => Duration::ZERO,
        }
    }

    pub fn clear(&mut self) {
        self.runs = 0;
        self.stages.clear();
    }
}
