//! Register a reference audio sample and print the generated voice ID.
//!
//! ```text
//! enroll-voice <AudioURL> <Prefix>
//! ```
//!
//! On success prints `SUCCESS:<voice_id>`; parent processes extract the
//! identifier by matching the `SUCCESS:` prefix.

use clap::Parser;
use cosyvox::{ApiConfig, DashScope, EnrollmentRequest};
use cosyvox_cli::CliError;

const USAGE: &str = "enroll-voice <AudioURL> <Prefix>";

#[derive(Parser)]
#[command(name = "enroll-voice")]
#[command(about = "Clone a voice from a reference audio URL", long_about = None)]
#[command(version)]
struct Cli {
    /// Publicly reachable URL of the reference audio sample
    #[arg(allow_hyphen_values = true)]
    audio_url: String,
    /// Label prefix for the generated voice ID
    #[arg(allow_hyphen_values = true)]
    prefix: String,
}

#[tokio::main]
async fn main() {
    cosyvox_cli::init_tracing();

    let cli: Cli = cosyvox_cli::parse_args(USAGE);

    match run(cli).await {
        Ok(voice_id) => println!("SUCCESS:{voice_id}"),
        Err(err) => cosyvox_cli::exit_with_error(err),
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let config = ApiConfig::from_env()?;
    let client = DashScope::new(config);
    let request = EnrollmentRequest::new(cli.audio_url, cli.prefix);
    let voice_id = client.enroll_voice(&request).await?;
    tracing::debug!(voice_id = %voice_id, "Voice enrolled");
    Ok(voice_id)
}
