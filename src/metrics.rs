use crate::evaluate::Evaluation;

/// Standard word length used to normalize raw speed.
const CHARS_PER_WORD: f64 = 5.0;

/// Figures shown to the user. Recomputed in full from the latest
/// evaluation and elapsed time on every input and tick; nothing here is
/// incremented in place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    pub wpm_gross: f64,
    /// gross speed scaled by accuracy; the headline score
    pub wpm_net: f64,
    pub accuracy: f64,
    pub errors: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            wpm_gross: 0.0,
            wpm_net: 0.0,
            accuracy: 100.0,
            errors: 0,
        }
    }
}

impl Metrics {
    pub fn compute(eval: &Evaluation, elapsed_secs: f64) -> Self {
        let accuracy = if eval.completed > 0 {
            (eval.correct as f64 / eval.completed as f64 * 100.0).round()
        } else {
            100.0
        };

        let errors = eval.completed - eval.correct;

        let wpm_gross = if elapsed_secs > 0.0 {
            ((eval.correct_chars as f64 / CHARS_PER_WORD) / (elapsed_secs / 60.0)).round()
        } else {
            0.0
        };

        let wpm_net = (wpm_gross * accuracy / 100.0).round().max(0.0);

        Self {
            wpm_gross,
            wpm_net,
            accuracy,
            errors,
        }
    }
}
