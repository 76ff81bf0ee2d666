use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use minefield_core::{Game, GameStore, StoreError};

/// Keeps each saved game as `<name>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let usable = !name.is_empty()
            && !name.starts_with('.')
            && !name
                .chars()
                .any(|c| std::path::is_separator(c) || c.is_control());
        if usable {
            Ok(self.dir.join(format!("{name}.json")))
        } else {
            Err(StoreError::InvalidName(name.to_string()))
        }
    }
}

impl GameStore for JsonStore {
    fn save(&mut self, name: &str, game: &Game) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let json = serde_json::to_string_pretty(game)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        // Replace the old save only once the new one is fully on disk.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)
            .and_then(|()| fs::rename(&staging, &path))
            .map_err(|err| {
                let _ = fs::remove_file(&staging);
                StoreError::Io(err.to_string())
            })?;

        log::debug!("wrote {}", path.display());
        Ok(())
    }

    fn load(&mut self, name: &str) -> Result<Game, StoreError> {
        let path = self.path_for(name)?;
        let json = fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io(err.to_string()),
        })?;

        let game: Game =
            serde_json::from_str(&json).map_err(|err| StoreError::Corrupt(err.to_string()))?;
        game.check_consistency()
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;

        log::debug!("read {}", path.display());
        Ok(game)
    }
}
