// StoryCue entry point
// Reads one JSON request per stdin line and answers on stdout.

use anyhow::{bail, Context};
use std::io;
use tracing::info;

use storycue_core::config::Settings;
use storycue_core::shell::{self, Mode};
use storycue_core::{logging, CueAnalyzer};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = Settings::from_env().context("Failed to read settings")?;
    logging::init(settings.log_format);

    let command = std::env::args().nth(1);
    let mode = match command.as_deref() {
        None | Some("analyze") => Mode::Analyze,
        Some("explain") => Mode::Explain,
        Some("health") => {
            println!("{}", serde_json::to_string(&shell::health())?);
            return Ok(());
        }
        Some(other) => bail!("unknown command '{}', expected analyze, explain or health", other),
    };

    let analyzer = CueAnalyzer::from_settings(&settings).context("Failed to build cue analyzer")?;
    info!("Reading requests from stdin ({:?} mode)", mode);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::run(&analyzer, mode, stdin.lock(), stdout.lock())?;

    Ok(())
}
