mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    cell::RefCell,
    error::Error,
    io::{self, stdin},
    rc::Rc,
    time::{Duration, Instant},
};
use word_drop::{
    app_dirs::AppDirs,
    audio::{Muted, SoundCue, SoundPlayer, TerminalBell},
    config::{Config, ConfigStore, FileConfigStore},
    difficulty::Difficulty,
    game::{Game, GameEvent},
    language::{LanguageTag, RandomWordSource, WordListError},
    logging,
    runtime::{CrosstermInputSource, FixedFrameClock, FrameClock, InputEvent, InputSource, Runner},
    session::{Phase, SessionConfig},
    store::FileHighScoreStore,
};

/// type the falling words before they hit the ground
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing game: words fall from the top of the screen and vanish when you type them. Let five reach the bottom and the run is over."
)]
pub struct Cli {
    /// difficulty to play at: easy, medium or hard (anything else opens the menu)
    #[clap(short = 'd', long)]
    difficulty: Option<String>,

    /// language to pull words from
    #[clap(short = 'l', long, value_enum)]
    language: Option<LanguageTag>,

    /// never ring the terminal bell
    #[clap(long)]
    mute: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Game,
}

/// Builds a game for a chosen difficulty
pub type GameFactory = Box<dyn Fn(SessionConfig) -> Result<Game, WordListError>>;

pub struct App {
    pub state: AppState,
    pub config: Config,
    pub menu_selection: usize,
    pub game: Option<Game>,
    /// One-line message shown on the menu, e.g. why a game could not start
    pub notice: Option<String>,
    new_game: GameFactory,
    sound: Box<dyn SoundPlayer>,
}

impl App {
    pub fn new(cli: &Cli, config: Config) -> Self {
        let sound: Box<dyn SoundPlayer> = if cli.mute || !config.sound {
            Box::new(Muted)
        } else {
            Box::new(TerminalBell::stdout())
        };

        let high_score = Rc::new(RefCell::new(FileHighScoreStore::new()));
        let mut app = Self::with_factory(config, file_backed_games(high_score), sound);
        app.select_from_cli(cli.difficulty.as_deref());
        app
    }

    pub fn with_factory(config: Config, new_game: GameFactory, sound: Box<dyn SoundPlayer>) -> Self {
        Self {
            state: AppState::Menu,
            config,
            menu_selection: 0,
            game: None,
            notice: None,
            new_game,
            sound,
        }
    }

    /// Jump straight into a game for a valid difficulty, otherwise stay on
    /// the menu and say why.
    pub fn select_from_cli(&mut self, raw: Option<&str>) {
        match Difficulty::from_selection(raw) {
            Some(difficulty) => self.enter_game(difficulty),
            None => {
                if let Some(raw) = raw {
                    tracing::info!("unknown difficulty {raw:?}; showing menu");
                    self.notice = Some(format!("unknown difficulty '{raw}', pick one below"));
                }
            }
        }
    }

    pub fn enter_game(&mut self, difficulty: Difficulty) {
        if let Some(idx) = Difficulty::ALL.iter().position(|d| *d == difficulty) {
            self.menu_selection = idx;
        }
        match (self.new_game)(self.config.session_config(difficulty)) {
            Ok(game) => {
                self.game = Some(game);
                self.notice = None;
                self.state = AppState::Game;
            }
            Err(e) => {
                tracing::warn!("could not start a {difficulty} game: {e}");
                self.notice = Some(e.to_string());
                self.state = AppState::Menu;
            }
        }
    }

    pub fn leave_game(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.teardown();
        }
        self.state = AppState::Menu;
    }

    /// Feed wall-clock time into the running game
    pub fn on_frame(&mut self, elapsed: Duration) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let events = game.advance(elapsed);
        self.play(&events);
    }

    /// Returns true when the app should quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.state {
            AppState::Menu => self.on_menu_key(key),
            AppState::Game => {
                self.on_game_key(key);
                false
            }
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) -> bool {
        let last = Difficulty::ALL.len() - 1;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selection = self.menu_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selection = (self.menu_selection + 1).min(last);
            }
            KeyCode::Enter => self.enter_game(Difficulty::ALL[self.menu_selection.min(last)]),
            KeyCode::Char(c) => {
                let picked = match c {
                    '1' | 'e' => Some(Difficulty::Easy),
                    '2' | 'm' => Some(Difficulty::Medium),
                    '3' | 'h' => Some(Difficulty::Hard),
                    _ => None,
                };
                if let Some(difficulty) = picked {
                    self.enter_game(difficulty);
                }
            }
            _ => {}
        }
        false
    }

    fn on_game_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.leave_game();
            return;
        }
        let Some(game) = self.game.as_mut() else {
            self.state = AppState::Menu;
            return;
        };

        let event = match (game.phase(), key.code) {
            (Phase::NotStarted, KeyCode::Enter | KeyCode::Char(' ')) => {
                game.start();
                None
            }
            (Phase::Over, KeyCode::Enter | KeyCode::Char('r')) => {
                game.start();
                None
            }
            (Phase::Running, KeyCode::Backspace) => {
                game.backspace();
                None
            }
            (Phase::Running, KeyCode::Char(c)) => game.push_char(c),
            _ => None,
        };

        if let Some(event) = event {
            self.play(&[event]);
        }
    }

    fn play(&mut self, events: &[GameEvent]) {
        for cue in events.iter().filter_map(SoundCue::for_event) {
            self.sound.play(cue);
        }
    }
}

/// Random words from the bundled lists, high score kept on disk. Every game
/// shares the one store, read when the app starts.
fn file_backed_games(high_score: Rc<RefCell<FileHighScoreStore>>) -> GameFactory {
    Box::new(move |config: SessionConfig| {
        let words = RandomWordSource::new(config.language)?;
        Ok(Game::new(
            config,
            Box::new(words),
            Box::new(Rc::clone(&high_score)),
        ))
    })
}

/// A language given on the command line becomes the saved preference
fn remember_language<S: ConfigStore>(
    store: &S,
    mut config: Config,
    language: Option<LanguageTag>,
) -> Config {
    let Some(language) = language.filter(|l| *l != config.language) else {
        return config;
    };
    config.language = language;
    if let Err(e) = store.save(&config) {
        tracing::warn!("could not save language preference: {e}");
    }
    config
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(e) = logging::init(&AppDirs::log_path()) {
        eprintln!("word-drop: logging disabled: {e}");
    }

    let config_store = FileConfigStore::new();
    let config = remember_language(&config_store, config_store.load(), cli.language);
    let frame_clock = FixedFrameClock::from_millis(config.tick_ms);
    let mut app = App::new(&cli, config);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermInputSource::new(), frame_clock);
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, S: InputSource, C: FrameClock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<S, C>,
) -> Result<(), Box<dyn Error>> {
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        let event = runner.step();

        let now = Instant::now();
        app.on_frame(now.duration_since(last_frame));
        last_frame = now;

        match event {
            InputEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
            InputEvent::Resize | InputEvent::Frame => {}
        }
    }

    app.leave_game();
    Ok(())
}
