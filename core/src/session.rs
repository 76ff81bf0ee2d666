use alloc::format;
use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::*;

/// Line-based player I/O.
pub trait Frontend {
    /// Shows `prompt` and waits for one line; `None` once input has ended.
    fn read_line(&mut self, prompt: &str) -> Option<String>;

    fn show_message(&mut self, message: &str);

    /// Draws the grid; mines are shown only when `reveal_mines` is set.
    fn show_grid(&mut self, grid: &Grid, reveal_mines: bool);

    fn clear(&mut self) {}
}

/// Named durable storage for games in progress.
pub trait GameStore {
    fn save(&mut self, name: &str, game: &Game) -> core::result::Result<(), StoreError>;

    fn load(&mut self, name: &str) -> core::result::Result<Game, StoreError>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Menu,
    Playing,
    GameOver,
    Won,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::Won)
    }
}

/// A live grid plus whether a mine has gone off. This is what gets saved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: Grid,
    game_over: bool,
}

impl Game {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            game_over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else if self.grid.is_won() {
            SessionState::Won
        } else {
            SessionState::Playing
        }
    }

    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        let outcome = self.grid.open_cell(coords)?;
        self.game_over = outcome.hit_mine();
        Ok(outcome)
    }

    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.grid.set_flag(coords)
    }

    pub fn check_consistency(&self) -> Result<()> {
        self.grid.check_consistency()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
}

/// Drives the menu / play / end-of-game cycle, one command at a time.
pub struct Controller<F, S, R> {
    frontend: F,
    store: S,
    rng: R,
    game: Option<Game>,
}

impl<F, S, R> Controller<F, S, R>
where
    F: Frontend,
    S: GameStore,
    R: rand::Rng,
{
    pub fn new(frontend: F, store: S, rng: R) -> Self {
        Self {
            frontend,
            store,
            rng,
            game: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.game
            .as_ref()
            .map_or(SessionState::Menu, Game::state)
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs until the player quits or input runs out.
    pub fn run(&mut self) -> Exit {
        self.enter_menu(true);
        loop {
            match self.step() {
                Some(Flow::Continue) => {}
                Some(Flow::Quit) => return Exit::Quit,
                None => return Exit::EndOfInput,
            }
        }
    }

    /// Handles one round of input for the current state; `None` when input ended.
    pub fn step(&mut self) -> Option<Flow> {
        let state = self.state();
        if state.is_finished() {
            return self.finish_turn(state);
        }

        match state {
            SessionState::Menu => self.menu_turn(),
            _ => self.play_turn(),
        }
    }

    fn enter_menu(&mut self, greeting: bool) {
        self.frontend.clear();
        if greeting {
            self.frontend.show_message("Welcome to Minesweeper!");
        }
        self.frontend.show_message(COMMANDS_HELP);
    }

    fn menu_turn(&mut self) -> Option<Flow> {
        let line = self.frontend.read_line("What would you like to do?")?;
        match MenuCommand::parse(&line) {
            Ok(command) => self.menu_command(command),
            Err(err) => {
                log::debug!("rejected menu input {:?}: {}", line, err);
                self.frontend.clear();
                self.frontend.show_message(&format!("{err}. Try again."));
                self.frontend.show_message(COMMANDS_HELP);
                Some(Flow::Continue)
            }
        }
    }

    fn menu_command(&mut self, command: MenuCommand) -> Option<Flow> {
        match command {
            MenuCommand::New => {
                let size = self.ask_size()?;
                let config = self.ask_mine_count(size)?;
                let grid = Grid::new(config, &mut self.rng);
                self.start(Game::new(grid));
            }
            MenuCommand::Load => self.load_game()?,
            MenuCommand::Quit => {
                self.frontend.clear();
                return Some(Flow::Quit);
            }
            MenuCommand::Help => self.frontend.show_message(COMMANDS_HELP),
        }
        Some(Flow::Continue)
    }

    fn ask_size(&mut self) -> Option<Coord2> {
        let mut prompt = "Enter the grid size (height width): ";
        loop {
            let line = self.frontend.read_line(prompt)?;
            match parse_size(&line) {
                Ok(size) => return Some(size),
                Err(err) => {
                    self.frontend.show_message(&err.to_string());
                    prompt = "Enter the size (two numbers separated by a space) again: ";
                }
            }
        }
    }

    fn ask_mine_count(&mut self, size: Coord2) -> Option<GameConfig> {
        let mut prompt = "And the number of mines: ";
        loop {
            let line = self.frontend.read_line(prompt)?;
            match parse_mine_count(&line, size) {
                Ok(config) => return Some(config),
                Err(err) => {
                    self.frontend.show_message(&err.to_string());
                    prompt = "Enter the number of mines again: ";
                }
            }
        }
    }

    fn load_game(&mut self) -> Option<()> {
        let name = self.frontend.read_line("Name of the saved game: ")?;
        let name = name.trim();

        match self.store.load(name) {
            Ok(game) => {
                log::info!("loaded game `{}`", name);
                self.frontend
                    .show_message(&format!("Game `{name}` loaded successfully"));
                self.frontend.read_line("Press Enter to start playing")?;
                self.start(game);
            }
            Err(err) => {
                log::warn!("failed to load game `{}`: {}", name, err);
                self.frontend.clear();
                self.frontend
                    .show_message(&format!("Could not load the game. {err}"));
                self.frontend.show_message(COMMANDS_HELP);
            }
        }
        Some(())
    }

    /// Swaps in a new game, discarding whatever was live before.
    fn start(&mut self, game: Game) {
        let (height, width) = game.grid().size();
        log::debug!(
            "starting {}x{} game, {} mines",
            height,
            width,
            game.grid().mine_count()
        );
        self.game = Some(game);
        self.refresh();
    }

    fn refresh(&mut self) {
        if let Some(game) = &self.game {
            self.frontend.clear();
            self.frontend.show_grid(game.grid(), game.is_game_over());
        }
    }

    fn play_turn(&mut self) -> Option<Flow> {
        let size = self.game.as_ref()?.grid().size();
        let line = self.frontend.read_line("Enter a command: ")?;

        match PlayCommand::parse(&line, size) {
            Ok(command) => self.play_command(command),
            Err(err) => {
                log::debug!("rejected play input {:?}: {}", line, err);
                self.frontend.show_message(&format!("{err}. Try again."));
                Some(Flow::Continue)
            }
        }
    }

    fn play_command(&mut self, command: PlayCommand) -> Option<Flow> {
        let Some(game) = self.game.as_mut() else {
            return Some(Flow::Continue);
        };

        match command {
            PlayCommand::Open(coords) => match game.open(coords) {
                Ok(outcome) if outcome.has_update() => self.refresh(),
                Ok(_) => self.frontend.show_message("That cell is already open"),
                Err(err) => self.frontend.show_message(&err.to_string()),
            },
            PlayCommand::Flag(coords) => match game.flag(coords) {
                Ok(outcome) if outcome.has_update() => self.refresh(),
                Ok(_) => self.frontend.show_message("Opened cells cannot be flagged"),
                Err(err) => self.frontend.show_message(&err.to_string()),
            },
            PlayCommand::Save => self.save_game()?,
            PlayCommand::Menu => {
                let answer = self.frontend.read_line(
                    "Progress that has not been saved will be lost. Continue? [Y/n] ",
                )?;
                if is_confirmation(&answer) {
                    log::debug!("game abandoned");
                    self.game = None;
                    self.enter_menu(false);
                }
            }
            PlayCommand::Help => self.frontend.show_message(COMMANDS_HELP),
        }
        Some(Flow::Continue)
    }

    fn save_game(&mut self) -> Option<()> {
        let name = self.frontend.read_line("Name for the saved game: ")?;
        let name = name.trim();
        let game = self.game.as_ref()?;

        match self.store.save(name, game) {
            Ok(()) => {
                log::info!("saved game `{}`", name);
                self.frontend
                    .show_message(&format!("Game saved as `{name}`"));
                self.frontend.read_line("Press Enter to continue playing")?;
                self.refresh();
            }
            Err(err) => {
                log::warn!("failed to save game `{}`: {}", name, err);
                self.frontend
                    .show_message(&format!("Could not save the game. {err}"));
            }
        }
        Some(())
    }

    fn finish_turn(&mut self, state: SessionState) -> Option<Flow> {
        let message = if state == SessionState::Won {
            "You won!"
        } else {
            "You lost :("
        };
        log::info!("game finished: {:?}", state);
        self.frontend.show_message(message);
        self.frontend
            .read_line("Press Enter to return to the menu")?;

        self.game = None;
        self.enter_menu(true);
        Some(Flow::Continue)
    }
}
