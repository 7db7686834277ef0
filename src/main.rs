pub mod clock;
pub mod config;
pub mod evaluate;
pub mod metrics;
pub mod passage;
pub mod runtime;
pub mod scroll;
pub mod session;
pub mod ui;

pub use passage::Difficulty;

use crate::config::{Config, ConfigStore, FileConfigStore};
use crate::runtime::{AppEvent, CrosstermEventSource, Runner, TICK_RATE_MS};
use crate::session::{Session, Status};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use webbrowser::Browser;

/// timed typing test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing test for the terminal: type a passage against the clock and get live wpm, accuracy, and error figures."
)]
pub struct Cli {
    /// difficulty of the drawn passage
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Difficulty>,

    /// number of seconds to run the test
    #[clap(short = 's', long)]
    seconds: Option<usize>,

    /// custom passage to type instead of drawing from the corpus
    #[clap(short = 'p', long)]
    passage: Option<String>,
}

/// Effective settings for the run: CLI flags over the stored config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub seconds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub session: Session,
    pub settings: Settings,
    pub state: AppState,
}

impl App {
    pub fn new(cli: Cli, settings: Settings) -> Self {
        let passage = cli
            .passage
            .clone()
            .unwrap_or_else(|| settings.difficulty.draw());

        Self {
            session: Session::new(passage, settings.seconds as f64),
            cli: Some(cli),
            settings,
            state: AppState::Typing,
        }
    }

    /// Installs a fresh waiting session. `passage` replays a given text
    /// (retry); `None` draws a new one from the corpus, unless a custom
    /// passage was given on the command line.
    pub fn reset(&mut self, passage: Option<String>) {
        let passage = passage
            .or_else(|| self.cli.as_ref().and_then(|cli| cli.passage.clone()))
            .unwrap_or_else(|| self.settings.difficulty.draw());
        self.session = Session::new(passage, self.settings.seconds as f64);
        self.state = AppState::Typing;
    }

    pub fn write(&mut self, c: char) {
        let mut typed = self.session.typed.clone();
        typed.push(c);
        self.session.submit_input(&typed);
    }

    pub fn backspace(&mut self) {
        let mut typed = self.session.typed.clone();
        typed.pop();
        self.session.submit_input(&typed);
    }

    pub fn on_tick(&mut self) {
        self.session.tick();
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let stored = store.load();
    let settings = Settings {
        difficulty: cli
            .difficulty
            .or_else(|| Difficulty::from_name(&stored.difficulty))
            .unwrap_or_default(),
        seconds: cli.seconds.unwrap_or(stored.seconds),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli, settings);
    start_tui(&mut terminal, &mut app, &store)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    New,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    store: &dyn ConfigStore,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        Duration::from_millis(TICK_RATE_MS),
    );

    loop {
        let mut exit_type: ExitType = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match runner.step() {
                AppEvent::Tick => {
                    // A tick that lands on a waiting or finished session
                    // is inert; only a live run needs a redraw.
                    if app.session.status == Status::Running {
                        app.on_tick();
                        if app.session.has_finished() {
                            app.state = AppState::Results;
                        }
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                AppEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                AppEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        KeyCode::Backspace => {
                            if app.state == AppState::Typing && !app.session.has_finished() {
                                app.backspace();
                            }
                        }
                        KeyCode::Left => {
                            exit_type = ExitType::Restart;
                            break;
                        }
                        KeyCode::Right => {
                            exit_type = ExitType::New;
                            break;
                        }
                        KeyCode::Char(c) => {
                            if key.modifiers.contains(KeyModifiers::CONTROL) && c == 'c' {
                                break;
                            }

                            match app.state {
                                AppState::Typing => {
                                    if !app.session.has_finished() {
                                        app.write(c);
                                        if app.session.has_finished() {
                                            app.state = AppState::Results;
                                        }
                                    }
                                }
                                AppState::Results => match c {
                                    't' => {
                                        if Browser::is_available() {
                                            let m = app.session.metrics;
                                            webbrowser::open(&format!(
                                                "https://twitter.com/intent/tweet?text={}%20wpm%20net%20%2F%20{}%25%20acc%20%2F%20{}%20err",
                                                m.wpm_net, m.accuracy, m.errors
                                            ))
                                            .unwrap_or_default();
                                        }
                                    }
                                    'r' => {
                                        exit_type = ExitType::Restart;
                                        break;
                                    }
                                    'n' => {
                                        exit_type = ExitType::New;
                                        break;
                                    }
                                    '1' | '2' | '3' => {
                                        app.settings.difficulty = match c {
                                            '1' => Difficulty::Easy,
                                            '2' => Difficulty::Medium,
                                            _ => Difficulty::Hard,
                                        };
                                        let _ = store.save(&Config {
                                            difficulty: app
                                                .settings
                                                .difficulty
                                                .to_string()
                                                .to_lowercase(),
                                            seconds: app.settings.seconds,
                                        });
                                        exit_type = ExitType::New;
                                        break;
                                    }
                                    _ => {}
                                },
                            }
                        }
                        _ => {}
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.reset(Some(app.session.passage.clone()));
            }
            ExitType::New => {
                app.reset(None);
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
