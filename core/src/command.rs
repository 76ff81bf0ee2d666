use alloc::string::{String, ToString};

use crate::*;

/// Command list shown on entering the menu and on `help`.
pub const COMMANDS_HELP: &str = "\
Available commands:

new      - start a new game
help     - show this list
menu     - return to the menu
save     - save the current game
load     - load a saved game
quit     - leave the game
open i j - open the cell in row i, column j
flag i j - toggle a flag on the cell in row i, column j

new, load and quit are only available from the menu
";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    New,
    Load,
    Quit,
    Help,
}

impl MenuCommand {
    pub fn parse(line: &str) -> core::result::Result<Self, CommandError> {
        match line.trim() {
            "" => Err(CommandError::Empty),
            "new" => Ok(Self::New),
            "load" => Ok(Self::Load),
            "quit" => Ok(Self::Quit),
            "help" => Ok(Self::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayCommand {
    Open(Coord2),
    Flag(Coord2),
    Save,
    Menu,
    Help,
}

impl PlayCommand {
    /// Parses a command typed during play; cell commands are checked against `size`.
    pub fn parse(line: &str, size: Coord2) -> core::result::Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Err(CommandError::Empty);
        };

        match name {
            "open" => parse_cell("open", tokens, size).map(Self::Open),
            "flag" => parse_cell("flag", tokens, size).map(Self::Flag),
            "save" => Ok(Self::Save),
            "menu" => Ok(Self::Menu),
            "help" => Ok(Self::Help),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_cell<'a>(
    name: &'static str,
    mut tokens: impl Iterator<Item = &'a str>,
    (height, width): Coord2,
) -> core::result::Result<Coord2, CommandError> {
    let (Some(row), Some(col), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(CommandError::WrongArity(name));
    };

    let row = parse_number(row)?;
    let col = parse_number(col)?;

    match (Coord::try_from(row), Coord::try_from(col)) {
        (Ok(r), Ok(c)) if r < height && c < width => Ok((r, c)),
        _ => Err(CommandError::OutOfBounds {
            row,
            col,
            height,
            width,
        }),
    }
}

fn parse_number(token: &str) -> core::result::Result<u32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(String::from(token)))
}

/// Parses the `height width` answer of a new game.
pub fn parse_size(line: &str) -> core::result::Result<Coord2, SetupError> {
    let mut tokens = line.split_whitespace();
    let (Some(height), Some(width), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(SetupError::MalformedSize);
    };

    let side = |token: &str| -> core::result::Result<Coord, SetupError> {
        let value: u32 = token.parse().map_err(|_| SetupError::MalformedSize)?;
        match Coord::try_from(value) {
            Ok(value) if value >= MIN_SIDE => Ok(value),
            _ => Err(SetupError::SideOutOfRange),
        }
    };

    Ok((side(height)?, side(width)?))
}

/// Parses the mine-count answer of a new game into a full configuration.
pub fn parse_mine_count(line: &str, size: Coord2) -> core::result::Result<GameConfig, SetupError> {
    let max = GameConfig::max_mines(size);
    let count: u32 = line.trim().parse().map_err(|_| SetupError::MalformedCount)?;
    let count = CellCount::try_from(count).map_err(|_| SetupError::CountOutOfRange { max })?;
    GameConfig::new(size, count).map_err(|_| SetupError::CountOutOfRange { max })
}

/// Only an explicit "y" or "yes" counts as agreement.
pub fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_commands() {
        assert_eq!(MenuCommand::parse("new"), Ok(MenuCommand::New));
        assert_eq!(MenuCommand::parse("  load \n"), Ok(MenuCommand::Load));
        assert_eq!(MenuCommand::parse("quit"), Ok(MenuCommand::Quit));
        assert_eq!(MenuCommand::parse("help"), Ok(MenuCommand::Help));
        assert_eq!(MenuCommand::parse(""), Err(CommandError::Empty));
        assert_eq!(
            MenuCommand::parse("open 1 1"),
            Err(CommandError::Unknown("open 1 1".into()))
        );
    }

    #[test]
    fn play_cell_commands() {
        assert_eq!(PlayCommand::parse("open 1 2", (4, 4)), Ok(PlayCommand::Open((1, 2))));
        assert_eq!(PlayCommand::parse(" flag  3 0 ", (4, 4)), Ok(PlayCommand::Flag((3, 0))));
    }

    #[test]
    fn play_cell_commands_need_two_numbers() {
        assert_eq!(
            PlayCommand::parse("open 1", (4, 4)),
            Err(CommandError::WrongArity("open"))
        );
        assert_eq!(
            PlayCommand::parse("flag 1 2 3", (4, 4)),
            Err(CommandError::WrongArity("flag"))
        );
        assert_eq!(
            PlayCommand::parse("open a 2", (4, 4)),
            Err(CommandError::InvalidNumber("a".into()))
        );
        assert_eq!(
            PlayCommand::parse("open 1 -2", (4, 4)),
            Err(CommandError::InvalidNumber("-2".into()))
        );
    }

    #[test]
    fn play_cell_commands_are_bounds_checked() {
        assert_eq!(
            PlayCommand::parse("open 4 0", (4, 6)),
            Err(CommandError::OutOfBounds {
                row: 4,
                col: 0,
                height: 4,
                width: 6
            })
        );
        assert_eq!(
            PlayCommand::parse("flag 0 1000", (4, 6)),
            Err(CommandError::OutOfBounds {
                row: 0,
                col: 1000,
                height: 4,
                width: 6
            })
        );
        assert_eq!(PlayCommand::parse("flag 3 5", (4, 6)), Ok(PlayCommand::Flag((3, 5))));
    }

    #[test]
    fn play_other_commands() {
        assert_eq!(PlayCommand::parse("save", (4, 4)), Ok(PlayCommand::Save));
        assert_eq!(PlayCommand::parse("menu", (4, 4)), Ok(PlayCommand::Menu));
        assert_eq!(PlayCommand::parse("help", (4, 4)), Ok(PlayCommand::Help));
        assert_eq!(PlayCommand::parse("   ", (4, 4)), Err(CommandError::Empty));
        assert_eq!(
            PlayCommand::parse("quit", (4, 4)),
            Err(CommandError::Unknown("quit".into()))
        );
    }

    #[test]
    fn size_answers() {
        assert_eq!(parse_size("4 4"), Ok((4, 4)));
        assert_eq!(parse_size(" 10   20\n"), Ok((10, 20)));
        assert_eq!(parse_size("10"), Err(SetupError::MalformedSize));
        assert_eq!(parse_size("10 x"), Err(SetupError::MalformedSize));
        assert_eq!(parse_size("10 10 10"), Err(SetupError::MalformedSize));
        assert_eq!(parse_size("3 10"), Err(SetupError::SideOutOfRange));
        assert_eq!(parse_size("10 256"), Err(SetupError::SideOutOfRange));
    }

    #[test]
    fn mine_count_answers() {
        let config = parse_mine_count("15", (4, 4)).unwrap();
        assert_eq!(config.mines(), 15);
        assert_eq!(config.size(), (4, 4));

        assert_eq!(parse_mine_count("many", (4, 4)), Err(SetupError::MalformedCount));
        assert_eq!(
            parse_mine_count("0", (4, 4)),
            Err(SetupError::CountOutOfRange { max: 15 })
        );
        assert_eq!(
            parse_mine_count("16", (4, 4)),
            Err(SetupError::CountOutOfRange { max: 15 })
        );
        assert_eq!(
            parse_mine_count("100000", (4, 4)),
            Err(SetupError::CountOutOfRange { max: 15 })
        );
    }

    #[test]
    fn confirmation_answers() {
        assert!(is_confirmation("y"));
        assert!(is_confirmation("YES\n"));
        assert!(is_confirmation(" Yes "));
        assert!(!is_confirmation(""));
        assert!(!is_confirmation("n"));
        assert!(!is_confirmation("yep"));
    }
}
