/// Words laid out per passage line. The UI renders lines with the same
/// constant so the window index and the drawn rows always agree.
pub const WORDS_PER_LINE: usize = 8;

/// Tracks which passage line should be at the top of the visible window.
/// The window only ever moves forward; backspacing into an earlier word
/// never scrolls back up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollWindow {
    pub visible_line: usize,
}

impl ScrollWindow {
    pub fn line_for(word_index: usize) -> usize {
        word_index / WORDS_PER_LINE
    }

    pub fn advance(&mut self, line: usize) {
        if line > self.visible_line {
            self.visible_line = line;
        }
    }

    pub fn follow(&mut self, word_index: usize) {
        self.advance(Self::line_for(word_index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_for_boundaries() {
        assert_eq!(ScrollWindow::line_for(0), 0);
        assert_eq!(ScrollWindow::line_for(WORDS_PER_LINE - 1), 0);
        assert_eq!(ScrollWindow::line_for(WORDS_PER_LINE), 1);
        assert_eq!(ScrollWindow::line_for(2 * WORDS_PER_LINE - 1), 1);
        assert_eq!(ScrollWindow::line_for(2 * WORDS_PER_LINE), 2);
    }

    #[test]
    fn test_advance_moves_forward_only() {
        let mut window = ScrollWindow::default();

        window.advance(2);
        assert_eq!(window.visible_line, 2);

        window.advance(1);
        assert_eq!(window.visible_line, 2);

        window.advance(3);
        assert_eq!(window.visible_line, 3);
    }

    #[test]
    fn test_follow_tracks_word_index() {
        let mut window = ScrollWindow::default();

        window.follow(3);
        assert_eq!(window.visible_line, 0);

        window.follow(WORDS_PER_LINE);
        assert_eq!(window.visible_line, 1);

        // moving the cursor back up must not retreat the window
        window.follow(0);
        assert_eq!(window.visible_line, 1);
    }

    #[test]
    fn test_default_starts_at_line_zero() {
        assert_eq!(ScrollWindow::default().visible_line, 0);
    }
}
