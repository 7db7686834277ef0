use std::time::Instant;

/// Wall-clock timing for a single test run. Elapsed time is always derived
/// from the stored instants at the moment of the call, never accumulated
/// tick by tick, so a delayed or dropped tick cannot skew it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    pub started_at: Option<Instant>,
    pub stopped_at: Option<Instant>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the start instant. Calling again is a no-op, so the first
    /// keystroke of a run is the one that counts.
    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Freezes the elapsed value for final results. The start instant is
    /// kept so elapsed stays readable after the run ends.
    pub fn stop(&mut self) {
        if self.started_at.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(Instant::now());
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed_secs(&self) -> f64 {
        match self.started_at {
            Some(started) => {
                let end = self.stopped_at.unwrap_or_else(Instant::now);
                end.saturating_duration_since(started).as_secs_f64()
            }
            None => 0.0,
        }
    }
}
