//! Synthesize an MP3 from text using an enrolled voice.
//!
//! ```text
//! tts-worker <Text> <VoiceID> <OutputPath> [Model]
//! ```
//!
//! Writes the audio bytes to `<OutputPath>` (overwriting any existing file)
//! and prints `SUCCESS` as the final stdout line.

use clap::Parser;
use cosyvox::{ApiConfig, DashScope, SynthesisRequest};
use cosyvox_cli::CliError;

const USAGE: &str = "tts-worker <Text> <VoiceID> <OutputPath> [Model]";

#[derive(Parser)]
#[command(name = "tts-worker")]
#[command(about = "Synthesize speech from text with a cloned voice", long_about = None)]
#[command(version)]
struct Cli {
    /// Text to synthesize (any string is accepted, including one starting
    /// with a hyphen)
    #[arg(allow_hyphen_values = true)]
    text: String,
    /// Voice ID from a prior enrollment
    voice_id: String,
    /// Where to write the MP3
    output_path: String,
    /// Synthesis model (defaults to cosyvoice-v3-plus)
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    cosyvox_cli::init_tracing();

    let cli: Cli = cosyvox_cli::parse_args(USAGE);

    match run(cli).await {
        Ok(()) => println!("SUCCESS"),
        Err(err) => cosyvox_cli::exit_with_error(err),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ApiConfig::from_env()?;
    let client = DashScope::new(config);

    let mut request = SynthesisRequest::new(cli.text, cli.voice_id);
    if let Some(model) = cli.model {
        request = request.with_model(model);
    }

    // Advisory diagnostic, not part of the parseable contract
    println!(
        "🎙️ Generating with Model: {}, Voice: {}",
        request.model, request.voice_id
    );

    let audio = client.synthesize(&request).await?;

    std::fs::write(&cli.output_path, &audio).map_err(|source| CliError::WriteOutput {
        path: cli.output_path.clone(),
        source,
    })?;
    tracing::debug!(path = %cli.output_path, bytes = audio.len(), "Wrote audio file");

    Ok(())
}
