// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use logging::LoggingConfig;
use moledit::replay::{replay, Session};

/// Replays a recorded editing session and prints the resulting state data and drawing.
#[derive(Parser, Debug)]
#[command(name = moledit::APP_NAME, version, about)]
struct Args {
    /// Session file (JSON). Reads standard input when omitted.
    session: Option<PathBuf>,

    /// Print only the final state data
    #[arg(long)]
    state_only: bool,
}

fn run() -> Result<()> {
    let args = Args::parse();

    let contents = match &args.session {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read standard input")?;
            buffer
        }
    };
    let session: Session = serde_json::from_str(&contents).context("invalid session file")?;
    log::info!("Replaying {} actions", session.actions.len());

    let output = replay(session)?;
    if args.state_only {
        println!("{}", output.state_data);
    } else {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn main() {
    LoggingConfig::new(moledit::LOG_CRATES.to_vec()).init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("because: {}", cause);
        }
        std::process::exit(1);
    }
}

// End of File
