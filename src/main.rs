//! Tree Lights entry point
//!
//! The browser build starts from `platform::web`. Natively this binary runs
//! headless rounds with the autopilot and reports how each one ended.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use tree_lights::Tuning;
    use tree_lights::sim::{RoundInput, RoundOutcome, Session, SessionEvent, autopilot_input};

    /// Simulated frame length (60 fps)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a session after this many frames
    const MAX_FRAMES: u64 = 60 * 60 * 30;

    #[derive(Debug, Parser)]
    #[command(name = "tree-lights")]
    #[command(about = "Run Tree Lights rounds headless and report the outcomes")]
    struct Cli {
        /// Level to start at
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// RNG seed
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        /// Number of rounds to play
        #[arg(long, default_value_t = 5)]
        rounds: u32,
        /// JSON tuning file (partial documents are fine)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Stand still instead of letting the autopilot play
        #[arg(long, default_value_t = false)]
        idle: bool,
        /// Print the effective tuning as JSON and exit
        #[arg(long, default_value_t = false)]
        dump_tuning: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("loading tuning from {}", path.display()))
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let cli = Cli::parse();
        let tuning = load_tuning(cli.tuning.as_ref())?;

        if cli.dump_tuning {
            println!("{}", tuning.to_json()?);
            return Ok(());
        }

        log::info!("Tree Lights (headless) starting at level {}", cli.level);

        let mut session = Session::new(cli.level, tuning, cli.seed);
        let mut finished_rounds = 0;
        let mut wins = 0;
        let mut frames = 0u64;

        while finished_rounds < cli.rounds && frames < MAX_FRAMES {
            frames += 1;
            let input = if cli.idle {
                RoundInput::default()
            } else {
                autopilot_input(session.round())
            };

            match session.frame(&input, FRAME_DT) {
                Some(SessionEvent::RoundEnded { level, outcome }) => {
                    finished_rounds += 1;
                    if outcome == RoundOutcome::Won {
                        wins += 1;
                    }
                    let round = session.round();
                    println!(
                        "level {:>2}: {:?} ({}/{} lit) - {}",
                        level,
                        outcome,
                        round.lit_count(),
                        round.lights.len(),
                        round.message
                    );
                }
                Some(SessionEvent::Finished { level }) => {
                    finished_rounds += 1;
                    wins += 1;
                    println!("level {:>2}: {}", level, session.round().message);
                    break;
                }
                Some(SessionEvent::RoundStarted { level }) => {
                    log::debug!("Level {} started", level);
                }
                None => {}
            }
        }

        if frames >= MAX_FRAMES {
            log::warn!("Stopped after {} frames", frames);
        }
        println!(
            "{} rounds, {} won, {} frames simulated",
            finished_rounds, wins, frames
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
