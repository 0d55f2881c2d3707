pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use leave_call::{
    config::{ConfigStore, FileConfigStore},
    game::{ClickOutcome, Game, Variant},
    hitbox::{self, Hit},
    logging,
    random::RngSource,
    runtime::{CrosstermEventSource, FixedTicker, LeaveEvent, Runner},
    theme::{self, Theme},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{debug, info};

const TICK_RATE_MS: u64 = 100;

/// a call screen whose leave button refuses to be clicked
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A call-in-progress screen. Click \"Leave Call\" enough times to leave; the button moves every time you try, and the decoys around it do not help."
)]
pub struct Cli {
    /// how the leave button misbehaves
    #[clap(short = 'v', long, value_enum, default_value_t = Variant::Panic)]
    variant: Variant,

    /// seed for a reproducible layout
    #[clap(short = 's', long)]
    seed: Option<u64>,

    /// config file holding the theme preference
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// write logs to this file (defaults to the state dir when RUST_LOG is set)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

pub struct App {
    pub game: Game,
    pub theme: Theme,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(cli: &Cli, store: Box<dyn ConfigStore>, host_theme: Option<Theme>) -> Self {
        let game = match cli.seed {
            Some(seed) => Game::with_source(cli.variant, Box::new(RngSource::seeded(seed))),
            None => Game::new(cli.variant),
        };
        let theme = theme::resolve(store.as_ref(), host_theme);

        Self { game, theme, store }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = theme::toggle(self.store.as_ref(), self.theme);
        debug!(theme = %self.theme, "theme toggled");
    }

    /// Returns true when the app should quit
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('t') => {
                self.toggle_theme();
                false
            }
            _ => false,
        }
    }

    /// Routes a click at a terminal cell to whatever is drawn there
    pub fn on_click(&mut self, area: Rect, column: u16, row: u16) -> Option<ClickOutcome> {
        match hitbox::hit_test(&self.game.view(), area, column, row)? {
            Hit::ThemeToggle => {
                self.toggle_theme();
                None
            }
            Hit::Target => Some(self.game.on_target_click()),
            Hit::Decoy(id) => Some(self.game.on_decoy_click(id)),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = logging::log_target(cli.log_file.clone()) {
        if let Err(err) = logging::init(&path) {
            eprintln!("logging disabled: {err}");
        }
    }

    let store: Box<dyn ConfigStore> = match &cli.config {
        Some(path) => Box::new(FileConfigStore::with_path(path)),
        None => Box::new(FileConfigStore::new()),
    };
    let mut app = App::new(&cli, store, theme::detect_host());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);
    app.game.teardown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    info!("hung up");
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut last = Instant::now();

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        let event = runner.step();

        // clocks follow wall time no matter which event woke us
        let now = Instant::now();
        app.game.advance(now - last);
        last = now;

        match event {
            LeaveEvent::Key(key) => {
                if app.on_key(key) {
                    break;
                }
            }
            LeaveEvent::Click { column, row } => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                if let Some(outcome) = app.on_click(area, column, row) {
                    debug!(?outcome, column, row, "click");
                }
            }
            LeaveEvent::Resize | LeaveEvent::Tick => {}
        }

        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}
