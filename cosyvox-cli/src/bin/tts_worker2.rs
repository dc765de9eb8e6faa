//! Synthesis worker with base64 input support.
//!
//! ```text
//! tts-worker2 <Text-or-Base64> <VoiceID> <OutputPath> [Model] [--base64]
//! ```
//!
//! With `--base64` the first positional is decoded before use, which lets
//! parent processes pass arbitrary text through argv without quoting hazards.
//! On success prints `SUCCESS - <N> bytes`.

use clap::Parser;
use cosyvox::{ApiConfig, DashScope, SynthesisRequest};
use cosyvox_cli::{CliError, PREVIEW_CHARS};

const USAGE: &str = "tts-worker2 <Text-or-Base64> <VoiceID> <OutputPath> [Model] [--base64]";

#[derive(Parser)]
#[command(name = "tts-worker2")]
#[command(about = "Synthesize speech from text with a cloned voice", long_about = None)]
#[command(version)]
struct Cli {
    /// Text to synthesize, or base64-encoded text with --base64 (any string
    /// is accepted, including one starting with a hyphen)
    #[arg(allow_hyphen_values = true)]
    text: String,
    /// Voice ID from a prior enrollment
    voice_id: String,
    /// Where to write the MP3
    output_path: String,
    /// Synthesis model (defaults to cosyvoice-v3-plus)
    model: Option<String>,
    /// Treat the text argument as base64-encoded UTF-8
    #[arg(long)]
    base64: bool,
}

#[tokio::main]
async fn main() {
    cosyvox_cli::init_tracing();

    let cli: Cli = cosyvox_cli::parse_args(USAGE);

    match run(cli).await {
        Ok(bytes_written) => println!("SUCCESS - {bytes_written} bytes"),
        Err(err) => cosyvox_cli::exit_with_error(err),
    }
}

async fn run(cli: Cli) -> Result<usize, CliError> {
    let config = ApiConfig::from_env()?;
    let client = DashScope::new(config);

    let text = if cli.base64 {
        cosyvox_cli::decode_base64_text(&cli.text)?
    } else {
        cli.text
    };

    let mut request = SynthesisRequest::new(text, cli.voice_id);
    if let Some(model) = cli.model {
        request = request.with_model(model);
    }

    // Advisory diagnostics, not part of the parseable contract
    println!(
        "🎙️ Generating with Model: {}, Voice: {}",
        request.model, request.voice_id
    );
    println!(
        "📝 Text preview: {}",
        cosyvox_cli::preview(&request.text, PREVIEW_CHARS)
    );

    let audio = client.synthesize(&request).await?;

    std::fs::write(&cli.output_path, &audio).map_err(|source| CliError::WriteOutput {
        path: cli.output_path.clone(),
        source,
    })?;
    tracing::debug!(path = %cli.output_path, bytes = audio.len(), "Wrote audio file");

    Ok(audio.len())
}
