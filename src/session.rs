use crate::clock::Clock;
use crate::evaluate::{evaluate, Evaluation, TypedChar, WordState};
use crate::metrics::Metrics;
use crate::scroll::ScrollWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Waiting,
    Running,
    Finished,
}

/// One timed run against a passage. Owns the lifecycle: input arbitration,
/// the clock, scoring, and the scroll window. Status only ever moves
/// forward; starting over means replacing the whole session.
#[derive(Debug)]
pub struct Session {
    pub passage: String,
    pub words: Vec<String>,
    pub typed: String,
    pub status: Status,
    pub clock: Clock,
    pub duration_secs: f64,
    pub scroll: ScrollWindow,
    pub evaluation: Evaluation,
    pub metrics: Metrics,
    char_limit: usize,
}

/// Read-only view of a session for rendering.
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub status: Status,
    pub remaining_secs: f64,
    pub duration_secs: f64,
    pub words: Vec<WordView<'a>>,
    pub current_chars: &'a [TypedChar],
    pub metrics: Metrics,
    pub visible_line: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct WordView<'a> {
    pub text: &'a str,
    pub state: WordState,
}

impl Session {
    pub fn new(passage: String, duration_secs: f64) -> Self {
        let words: Vec<String> = passage.split_whitespace().map(str::to_string).collect();
        let char_limit = passage.chars().count();
        let evaluation = evaluate(&words, "", false);

        Self {
            words,
            typed: String::new(),
            status: Status::Waiting,
            clock: Clock::new(),
            duration_secs,
            scroll: ScrollWindow::default(),
            evaluation,
            metrics: Metrics::default(),
            char_limit,
            passage,
        }
    }

    /// Accepts the full raw input string after an edit. Ignored once the
    /// run is over. The first non-empty value starts the clock. Input is
    /// kept to the passage's character count; anything past it is dropped
    /// whole, a character is never split. Filling the passage ends the
    /// run on the spot rather than on the next tick.
    pub fn submit_input(&mut self, raw: &str) {
        if self.status == Status::Finished {
            return;
        }

        if self.status == Status::Waiting && !raw.is_empty() {
            self.clock.start();
            self.status = Status::Running;
        }

        self.typed = raw.chars().take(self.char_limit).collect();

        if self.status == Status::Running && self.typed.chars().count() == self.char_limit {
            self.finish();
        } else {
            self.refresh();
        }
    }

    /// Periodic heartbeat. Does nothing unless the run is live; a tick
    /// that lands on a fresh or finished session is inert. At expiry the
    /// session finishes with one final scoring pass, so the reported
    /// figures are never a stale pre-expiry value.
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }

        if self.clock.elapsed_secs() >= self.duration_secs {
            self.finish();
        } else {
            self.refresh();
        }
    }

    /// Replaces this session with a fresh waiting one. `passage` swaps in
    /// a new text; `None` reuses the current one.
    pub fn restart(&mut self, passage: Option<String>) {
        let passage = passage.unwrap_or_else(|| self.passage.clone());
        *self = Session::new(passage, self.duration_secs);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            status: self.status,
            remaining_secs: self.remaining_secs(),
            duration_secs: self.duration_secs,
            words: self
                .words
                .iter()
                .zip(self.evaluation.states.iter())
                .map(|(word, state)| WordView {
                    text: word,
                    state: *state,
                })
                .collect(),
            current_chars: &self.evaluation.current_chars,
            metrics: self.metrics,
            visible_line: self.scroll.visible_line,
        }
    }

    /// Elapsed wall-clock time clamped to the configured duration.
    pub fn elapsed_secs(&self) -> f64 {
        self.clock.elapsed_secs().min(self.duration_secs)
    }

    pub fn remaining_secs(&self) -> f64 {
        (self.duration_secs - self.elapsed_secs()).max(0.0)
    }

    pub fn has_started(&self) -> bool {
        self.clock.has_started()
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Finished
    }

    fn finish(&mut self) {
        self.status = Status::Finished;
        self.clock.stop();
        self.refresh();
    }

    fn refresh(&mut self) {
        self.evaluation = evaluate(&self.words, &self.typed, self.status == Status::Finished);
        if self.evaluation.current < self.words.len() {
            self.scroll.follow(self.evaluation.current);
        }
        self.metrics = Metrics::compute(&self.evaluation, self.elapsed_secs());
    }
}
