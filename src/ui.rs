use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use webbrowser::Browser;

use crate::evaluate::{Outcome, TypedChar, WordState};
use crate::scroll::WORDS_PER_LINE;
use crate::session::Status;
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
/// Passage lines shown at once; the window starts at the session's
/// visible line.
const VISIBLE_LINES: usize = 3;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.session.snapshot();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        match self.state {
            AppState::Typing => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Min(1),
                            Constraint::Length(1), // countdown
                            Constraint::Length(1), // progress
                            Constraint::Length(1),
                            Constraint::Length(VISIBLE_LINES as u16),
                            Constraint::Length(1),
                            Constraint::Length(1), // live figures
                            Constraint::Length(1), // hint
                            Constraint::Min(1),
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let timer = Paragraph::new(Span::styled(
                    format!("{:.1}", snap.remaining_secs),
                    dim_bold_style,
                ))
                .alignment(Alignment::Center);
                timer.render(chunks[1], buf);

                let ratio = if snap.duration_secs > 0.0 {
                    ((snap.duration_secs - snap.remaining_secs) / snap.duration_secs)
                        .clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let progress = Gauge::default()
                    .gauge_style(Style::default().fg(Color::Green).add_modifier(Modifier::DIM))
                    .ratio(ratio)
                    .label("");
                progress.render(chunks[2], buf);

                // window of passage lines, WORDS_PER_LINE words per row
                let mut lines: Vec<Line> = Vec::with_capacity(VISIBLE_LINES);
                let mut widest = 0usize;
                for row in 0..VISIBLE_LINES {
                    let start = (snap.visible_line + row) * WORDS_PER_LINE;
                    if start >= snap.words.len() {
                        break;
                    }
                    let end = (start + WORDS_PER_LINE).min(snap.words.len());

                    let mut spans: Vec<Span> = Vec::new();
                    let mut line_width = 0usize;
                    let mut underline_next_space = false;
                    for (i, view) in snap.words[start..end].iter().enumerate() {
                        match view.state {
                            WordState::Correct => {
                                spans.push(Span::styled(view.text.to_string(), green_bold_style));
                                line_width += view.text.width();
                            }
                            WordState::Incorrect => {
                                spans.push(Span::styled(view.text.to_string(), red_bold_style));
                                line_width += view.text.width();
                            }
                            WordState::Pending => {
                                spans.push(Span::styled(view.text.to_string(), dim_bold_style));
                                line_width += view.text.width();
                            }
                            WordState::Current => {
                                let (mut word_spans, cursor_past_end) = current_word_spans(
                                    view.text,
                                    snap.current_chars,
                                    green_bold_style,
                                    red_bold_style,
                                    dim_bold_style,
                                    underlined_dim_bold_style,
                                );
                                spans.append(&mut word_spans);
                                underline_next_space = cursor_past_end;
                                line_width += view.text.width().max(snap.current_chars.len());
                            }
                        }
                        if i + 1 < end - start {
                            let space_style = if underline_next_space {
                                underlined_dim_bold_style
                            } else {
                                Style::default()
                            };
                            spans.push(Span::styled(" ".to_string(), space_style));
                            underline_next_space = false;
                            line_width += 1;
                        }
                    }
                    widest = widest.max(line_width);
                    lines.push(Line::from(spans));
                }

                let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
                let passage = Paragraph::new(lines)
                    .alignment(if widest <= max_chars_per_line as usize {
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true });
                passage.render(chunks[4], buf);

                let live = Paragraph::new(Span::styled(
                    format!(
                        "{} wpm   {}% acc   {} err",
                        snap.metrics.wpm_gross, snap.metrics.accuracy, snap.metrics.errors
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);
                live.render(chunks[6], buf);

                if snap.status == Status::Waiting {
                    let hint = Paragraph::new(Span::styled(
                        "start typing to begin",
                        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
                    ))
                    .alignment(Alignment::Center);
                    hint.render(chunks[7], buf);
                }
            }
            AppState::Results => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Min(1),
                            Constraint::Length(1), // tier headline
                            Constraint::Length(1),
                            Constraint::Length(1), // figures
                            Constraint::Length(1), // typos and settings
                            Constraint::Length(1),
                            Constraint::Length(1), // legend
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let metrics = snap.metrics;

                let headline = Paragraph::new(Span::styled(
                    performance_tier(metrics.wpm_net),
                    Style::default().patch(bold_style).fg(Color::Magenta),
                ))
                .alignment(Alignment::Center);
                headline.render(chunks[1], buf);

                let figures = Paragraph::new(Span::styled(
                    format!(
                        "{} wpm x {}% acc = {} net",
                        metrics.wpm_gross, metrics.accuracy, metrics.wpm_net
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);
                figures.render(chunks[3], buf);

                let detail = Paragraph::new(Span::styled(
                    format!(
                        "{} typos   |   difficulty: {}   |   duration: {}s",
                        metrics.errors,
                        self.settings.difficulty.to_string().to_lowercase(),
                        self.settings.seconds
                    ),
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center);
                detail.render(chunks[4], buf);

                let legend = Paragraph::new(Span::styled(
                    String::from(if Browser::is_available() {
                        "(r)etry / (n)ew / (1)easy / (2)medium / (3)hard / (t)weet / (esc)ape"
                    } else {
                        "(r)etry / (n)ew / (1)easy / (2)medium / (3)hard / (esc)ape"
                    }),
                    italic_style,
                ));
                legend.render(chunks[6], buf);
            }
        }
    }
}

/// Spans for the word being typed: typed characters carry their outcome
/// color, the next expected character is underlined as the cursor, and
/// the untyped remainder stays dim. The flag reports whether the cursor
/// has moved past the word's end onto the separating space.
fn current_word_spans(
    word: &str,
    typed: &[TypedChar],
    green_bold: Style,
    red_bold: Style,
    dim_bold: Style,
    underlined_dim_bold: Style,
) -> (Vec<Span<'static>>, bool) {
    let mut spans = Vec::new();
    let word_chars: Vec<char> = word.chars().collect();

    for flag in typed {
        let style = match flag.outcome {
            Outcome::Correct => green_bold,
            Outcome::Incorrect => red_bold,
        };
        spans.push(Span::styled(flag.char.to_string(), style));
    }

    if typed.len() < word_chars.len() {
        spans.push(Span::styled(
            word_chars[typed.len()].to_string(),
            underlined_dim_bold,
        ));
        if typed.len() + 1 < word_chars.len() {
            let rest: String = word_chars[typed.len() + 1..].iter().collect();
            spans.push(Span::styled(rest, dim_bold));
        }
        (spans, false)
    } else {
        (spans, true)
    }
}

/// Performance label for the results headline, keyed off net wpm.
pub fn performance_tier(wpm_net: f64) -> &'static str {
    if wpm_net >= 90.0 {
        "Elite Typer"
    } else if wpm_net >= 70.0 {
        "Fast Fingers"
    } else if wpm_net >= 50.0 {
        "Getting Stronger"
    } else {
        "Warming Up"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::{Difficulty, Settings};
    use ratatui::{buffer::Buffer, layout::Rect};

    fn create_test_app(passage: &str, finished: bool) -> App {
        let mut session = Session::new(passage.to_string(), 30.0);

        if finished {
            session.submit_input(&passage.to_string());
        }

        App {
            cli: None,
            session,
            settings: Settings {
                difficulty: Difficulty::Medium,
                seconds: 30,
            },
            state: if finished {
                AppState::Results
            } else {
                AppState::Typing
            },
        }
    }

    fn rendered_text(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_typing_view_shows_passage_words() {
        let app = create_test_app("hello world", false);
        let rendered = rendered_text(&app);

        assert!(rendered.contains("hello"));
        assert!(rendered.contains("world"));
    }

    #[test]
    fn test_waiting_view_shows_hint_and_countdown() {
        let app = create_test_app("hello world", false);
        let rendered = rendered_text(&app);

        assert!(rendered.contains("start typing to begin"));
        assert!(rendered.contains("30.0"));
    }

    #[test]
    fn test_running_view_hides_hint() {
        let mut app = create_test_app("hello world", false);
        app.write('h');
        let rendered = rendered_text(&app);

        assert!(!rendered.contains("start typing to begin"));
    }

    #[test]
    fn test_current_word_shows_typed_mistake() {
        let mut app = create_test_app("test word", false);
        app.write('t');
        app.write('x');
        let rendered = rendered_text(&app);

        // typed chars then the untyped remainder of the word
        assert!(rendered.contains("txst"));
    }

    #[test]
    fn test_results_view_shows_figures_and_legend() {
        let app = create_test_app("hi", true);
        let rendered = rendered_text(&app);

        assert!(rendered.contains("net"));
        assert!(rendered.contains("(r)etry"));
        assert!(rendered.contains("(n)ew"));
        assert!(rendered.contains("(esc)ape"));
        assert!(rendered.contains("difficulty: medium"));
    }

    #[test]
    fn test_results_view_tweet_key_follows_browser() {
        let app = create_test_app("hi", true);
        let rendered = rendered_text(&app);

        if Browser::is_available() {
            assert!(rendered.contains("(t)weet"));
        } else {
            assert!(!rendered.contains("(t)weet"));
        }
    }

    #[test]
    fn test_small_area_renders_without_panic() {
        let app = create_test_app("hello", false);
        let area = Rect::new(0, 0, 20, 5);
        let mut buffer = Buffer::empty(area);

        (&app).render(area, &mut buffer);

        assert!(*buffer.area() == area);
    }

    #[test]
    fn test_window_starts_at_visible_line() {
        // seventeen words: three lines of eight, eight, one
        let passage = "aa bb cc dd ee ff gg hh ii jj kk ll mm nn oo pp qq";
        let mut app = create_test_app(passage, false);
        for c in "aa bb cc dd ee ff gg hh ".chars() {
            app.write(c);
        }
        let rendered = rendered_text(&app);

        // window advanced past the first line
        assert!(!rendered.contains("aa"));
        assert!(rendered.contains("ii"));
        assert!(rendered.contains("qq"));
    }

    #[test]
    fn test_performance_tier_thresholds() {
        assert_eq!(performance_tier(95.0), "Elite Typer");
        assert_eq!(performance_tier(90.0), "Elite Typer");
        assert_eq!(performance_tier(89.0), "Fast Fingers");
        assert_eq!(performance_tier(70.0), "Fast Fingers");
        assert_eq!(performance_tier(69.0), "Getting Stronger");
        assert_eq!(performance_tier(50.0), "Getting Stronger");
        assert_eq!(performance_tier(49.0), "Warming Up");
        assert_eq!(performance_tier(0.0), "Warming Up");
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);
        assert_eq!(VISIBLE_LINES, 3);
    }
}
