use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use pokecatch::prelude::*;
use pokecatch::prompt::read_leader_name;
use tracing_subscriber::prelude::*;

/// Run one catch-the-Pokemon room from creation to its end.
#[derive(Parser, Debug)]
#[command(name = "pokecatch", version, about)]
struct Args {
    /// Room capacity, leader included.
    #[arg(long, env = "POKECATCH_MAX_PLAYERS", default_value_t = 5)]
    max_players: usize,

    /// Leader display name. Skips the prompt.
    #[arg(long)]
    leader: Option<String>,

    /// Seed for a reproducible run.
    #[arg(long, env = "POKECATCH_SEED")]
    seed: Option<u64>,

    /// Wait out the timers in real time instead of jumping ahead.
    #[arg(long)]
    realtime: bool,

    /// Don't ask for a leader name; use the default.
    #[arg(long)]
    no_prompt: bool,

    /// Print the run report as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokecatch=info,pokecatch_room=info,pokecatch_player=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_file(false)
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn leader_name(args: &Args) -> Result<String, PokecatchError> {
    if let Some(name) = &args.leader {
        return Ok(name.clone());
    }
    if args.no_prompt {
        return Ok(pokecatch::DEFAULT_LEADER_NAME.to_string());
    }
    Ok(read_leader_name(&mut io::stdin().lock(), &mut io::stderr())?)
}

async fn run(args: Args) -> Result<(), PokecatchError> {
    let mut builder = Simulation::builder()
        .max_players(args.max_players)
        .leader_name(leader_name(&args)?)
        .pacing(if args.realtime {
            Pacing::RealTime
        } else {
            Pacing::Virtual
        });
    if let Some(seed) = args.seed {
        builder = builder.seed(seed);
    }

    let report = builder.build()?.run().await?;

    if args.json {
        let mut bytes = JsonCodec::pretty().encode(&report)?;
        bytes.push(b'\n');
        let mut stdout = io::stdout().lock();
        stdout.write_all(&bytes)?;
        stdout.flush()?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, validation = e.is_validation(), "simulation failed");
            ExitCode::FAILURE
        }
    }
}
