use itertools::{EitherOrBoth, Itertools};

#[derive(Clone, Debug, Copy, PartialEq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// Classification of one target word against the typed text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WordState {
    Pending,
    Current,
    Correct,
    Incorrect,
}

/// One typed character of the word currently being typed, with its
/// display flag. Characters typed past the end of the word are kept and
/// flagged incorrect so the UI can show them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TypedChar {
    pub char: char,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    pub states: Vec<WordState>,
    /// index of the word being typed; equals `states.len()` once every
    /// word has been scored
    pub current: usize,
    pub current_chars: Vec<TypedChar>,
    pub correct: usize,
    pub completed: usize,
    /// characters credited for speed: length of each correct word plus
    /// the space that sealed it
    pub correct_chars: usize,
}

/// Scores the typed text against the target words. A word counts as
/// completed once a whitespace follows it, or unconditionally when
/// `complete` is set (the run is over). Completed words are scored by
/// exact equality only; there is no partial credit. A mismatch inside
/// the word still being typed shows up in `current_chars` but never
/// changes a word classification early.
pub fn evaluate(words: &[String], typed: &str, complete: bool) -> Evaluation {
    let tokens: Vec<&str> = typed.split_whitespace().collect();
    let in_progress = !complete && !typed.is_empty() && !typed.ends_with(char::is_whitespace);

    let completed = if in_progress {
        tokens.len().saturating_sub(1)
    } else {
        tokens.len()
    }
    .min(words.len());
    let current = completed;

    let mut correct = 0;
    let mut correct_chars = 0;
    let mut states = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        let state = if i < completed {
            if tokens[i] == word.as_str() {
                correct += 1;
                correct_chars += word.chars().count() + 1;
                WordState::Correct
            } else {
                WordState::Incorrect
            }
        } else if i == current && !complete {
            WordState::Current
        } else {
            WordState::Pending
        };
        states.push(state);
    }

    let current_chars = if in_progress && current < words.len() {
        char_flags(tokens.last().copied().unwrap_or(""), &words[current])
    } else {
        Vec::new()
    };

    Evaluation {
        states,
        current,
        current_chars,
        correct,
        completed,
        correct_chars,
    }
}

fn char_flags(partial: &str, word: &str) -> Vec<TypedChar> {
    partial
        .chars()
        .zip_longest(word.chars())
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(c, expected) => Some(TypedChar {
                char: c,
                outcome: if c == expected {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                },
            }),
            EitherOrBoth::Left(c) => Some(TypedChar {
                char: c,
                outcome: Outcome::Incorrect,
            }),
            EitherOrBoth::Right(_) => None,
        })
        .collect()
}
