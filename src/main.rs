#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battlesheep::{
    init_logging, init_logging_at, transport::lines::LinesTransport, GameStore, Skeleton,
};

#[cfg(feature = "std")]
use anyhow::Context;
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use log::{info, warn, LevelFilter};
#[cfg(feature = "std")]
use std::path::{Path, PathBuf};
#[cfg(feature = "std")]
use tokio::io::BufReader;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Overrides BATTLESHEEP_LOG (error, warn, info, debug, trace, off).
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Serve JSON-lines requests on stdin, answering on stdout.
    Serve {
        #[arg(long, help = "Load games from this file at start and save them on exit")]
        state: Option<PathBuf>,
    },
    /// Create a game with randomly placed ships and print it.
    Random {
        #[arg(long, help = "Fix RNG seed for a reproducible layout (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn load_store(path: Option<&Path>) -> anyhow::Result<GameStore> {
    match path {
        Some(p) if p.exists() => {
            let bytes = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            let store = GameStore::restore(&bytes)
                .with_context(|| format!("decoding {}", p.display()))?;
            info!("restored games from {}", p.display());
            Ok(store)
        }
        _ => Ok(GameStore::new()),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.log_level {
        Some(level) => init_logging_at(level),
        None => init_logging(),
    }

    match cli.command {
        Commands::Serve { state } => {
            let store = load_store(state.as_deref())?;
            let transport =
                LinesTransport::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());
            let mut skeleton = Skeleton::new(store, transport);
            info!("serving JSON-lines requests on stdin");
            let served = skeleton.run().await;
            if let Err(e) = &served {
                warn!("session ended with error: {:#}", e);
            }

            if let Some(path) = state {
                let bytes = skeleton.api().snapshot().await?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("saved games to {}", path.display());
            }
            served?;
        }
        Commands::Random { seed } => {
            let store = GameStore::new();
            let summary = store.random_game(seed).await?;
            let detail = store.game(summary.id).await?;
            println!("{}", store.board_view(summary.id).await?);
            println!("{}", serde_json::to_string(&detail)?);
        }
    }
    Ok(())
}
