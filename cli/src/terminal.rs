use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use minefield_core::{Frontend, Grid};

use crate::render::render_grid;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Line-based frontend over any reader/writer pair, stdin/stdout in practice.
pub struct Terminal<I, O> {
    input: I,
    output: O,
    clear_screen: bool,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Screen clearing is only enabled when stdout is an interactive terminal.
    pub fn stdio() -> Self {
        let stdout = io::stdout();
        let clear_screen = stdout.is_terminal();
        Self::new(io::stdin().lock(), stdout, clear_screen)
    }
}

impl<I: BufRead, O: Write> Terminal<I, O> {
    pub fn new(input: I, output: O, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush());
        if let Err(err) = result {
            log::error!("failed to write output: {}", err);
        }
    }
}

impl<I: BufRead, O: Write> Frontend for Terminal<I, O> {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if prompt.ends_with(char::is_whitespace) {
            self.emit(prompt);
        } else {
            self.emit(&format!("{prompt}\n"));
        }

        // Undecodable bytes become replacement characters and fail parsing later.
        let mut line = Vec::new();
        match self.input.read_until(b'\n', &mut line) {
            Ok(0) => {
                log::debug!("end of input");
                None
            }
            Ok(_) => {
                let line = String::from_utf8_lossy(&line);
                Some(line.trim_end_matches(['\r', '\n']).to_string())
            }
            Err(err) => {
                log::error!("failed to read input: {}", err);
                None
            }
        }
    }

    fn show_message(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn show_grid(&mut self, grid: &Grid, reveal_mines: bool) {
        self.emit(&render_grid(grid, reveal_mines));
        self.emit("\n");
    }

    fn clear(&mut self) {
        if self.clear_screen {
            self.emit(CLEAR_SCREEN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonStore;
    use minefield_core::{Controller, Exit};
    use rand::{SeedableRng, rngs::SmallRng};
    use std::io::Cursor;

    fn terminal(input: &str) -> Terminal<Cursor<Vec<u8>>, Vec<u8>> {
        Terminal::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), false)
    }

    fn written(terminal: &Terminal<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(terminal.output.clone()).unwrap()
    }

    #[test]
    fn reads_lines_until_end_of_input() {
        let mut terminal = terminal("open 1 2\r\nquit\n");

        assert_eq!(terminal.read_line("> ").as_deref(), Some("open 1 2"));
        assert_eq!(terminal.read_line("> ").as_deref(), Some("quit"));
        assert_eq!(terminal.read_line("> "), None);
    }

    #[test]
    fn last_line_without_newline_is_read() {
        let mut terminal = terminal("new");

        assert_eq!(terminal.read_line("> ").as_deref(), Some("new"));
        assert_eq!(terminal.read_line("> "), None);
    }

    #[test]
    fn invalid_utf8_line_is_not_end_of_input() {
        let mut terminal = Terminal::new(
            Cursor::new(b"\xff\xfe bad\nquit\n".to_vec()),
            Vec::new(),
            false,
        );

        let garbled = terminal.read_line("> ").unwrap();
        assert!(garbled.ends_with(" bad"));
        assert!(garbled.contains(char::REPLACEMENT_CHARACTER));
        assert_eq!(terminal.read_line("> ").as_deref(), Some("quit"));
        assert_eq!(terminal.read_line("> "), None);
    }

    #[test]
    fn invalid_utf8_menu_input_asks_again() {
        let dir = tempfile::tempdir().unwrap();
        let terminal = Terminal::new(Cursor::new(b"\xff\nquit\n".to_vec()), Vec::new(), false);
        let mut controller =
            Controller::new(terminal, JsonStore::new(dir.path()), SmallRng::seed_from_u64(3));

        assert_eq!(controller.run(), Exit::Quit);
        assert!(written(controller.frontend()).contains("Unknown command"));
    }

    #[test]
    fn prompts_end_with_line_break_unless_spaced() {
        let mut terminal = terminal("\n\n");

        terminal.read_line("What now?");
        terminal.read_line("Size: ");

        assert_eq!(written(&terminal), "What now?\nSize: ");
    }

    #[test]
    fn grid_is_rendered() {
        let mut terminal = terminal("");
        let grid = Grid::with_mines((4, 4), &[(0, 0)]).unwrap();

        terminal.show_grid(&grid, true);

        let output = written(&terminal);
        assert!(output.starts_with("     |  0  |"));
        assert!(output.contains("  0  |  *  |  .  |"));
    }

    #[test]
    fn clear_only_when_enabled() {
        let mut quiet = terminal("");
        quiet.clear();
        assert!(written(&quiet).is_empty());

        let mut clearing = Terminal::new(Cursor::new(Vec::new()), Vec::new(), true);
        clearing.clear();
        assert_eq!(String::from_utf8(clearing.output).unwrap(), CLEAR_SCREEN);
    }
}
