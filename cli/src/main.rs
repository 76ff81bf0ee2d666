use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minefield_core::Controller;
use rand::{SeedableRng, rngs::SmallRng};

use store::JsonStore;
use terminal::Terminal;

mod render;
mod store;
mod terminal;

/// Play Minesweeper in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory saved games are written to and loaded from
    #[arg(short = 'd', long, default_value = ".")]
    save_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();
    log::debug!("seed: {:?}", args.seed);

    fs::create_dir_all(&args.save_dir).with_context(|| {
        format!(
            "could not create save directory {}",
            args.save_dir.display()
        )
    })?;

    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let mut controller = Controller::new(Terminal::stdio(), JsonStore::new(args.save_dir), rng);
    let exit = controller.run();
    log::debug!("session ended: {:?}", exit);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn no_arguments_needed() {
        let args = Args::try_parse_from(["minefield"]).unwrap();

        assert_eq!(args.seed, None);
        assert_eq!(args.save_dir, PathBuf::from("."));
    }

    #[test]
    fn seed_and_save_dir_are_parsed() {
        let args = Args::try_parse_from(["minefield", "-s", "7", "--save-dir", "saves"]).unwrap();

        assert_eq!(args.seed, Some(7));
        assert_eq!(args.save_dir, PathBuf::from("saves"));
    }
}
