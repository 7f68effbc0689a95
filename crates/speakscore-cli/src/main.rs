//! speakscore CLI - canonical WAV encoding and pronunciation assessment
//!
//! This binary converts recordings into the 16-bit PCM WAV container the
//! speech service expects, inspects WAV headers, submits recordings for
//! pronunciation scoring and serves both operations over a WebSocket.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use speakscore_assess::config::{DEFAULT_LANGUAGE, DEFAULT_TIMEOUT, KEY_ENV, REGION_ENV};
use speakscore_cli::commands;
use speakscore_cli::input::PrepareOptions;
use speakscore_wav::QuantizePolicy;

/// speakscore - pronunciation assessment tooling
#[derive(Parser)]
#[command(name = "speakscore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Re-encode a WAV file as canonical 16-bit PCM
    Encode {
        /// Path to the source WAV (any PCM or float layout)
        #[arg(short, long)]
        input: String,

        /// Path of the canonical WAV to write
        #[arg(short, long)]
        output: String,

        /// Average all channels into one
        #[arg(long)]
        mono: bool,

        /// Out-of-range sample handling (clamp, wrap)
        #[arg(long, default_value = "clamp", value_parser = commands::encode::parse_policy)]
        policy: QuantizePolicy,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a WAV file and print its header fields
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Score a recording against a reference sentence
    Assess {
        /// Path to the recording (WAV)
        #[arg(short, long)]
        input: String,

        /// Sentence the speaker was asked to read
        #[arg(short, long)]
        reference_text: String,

        /// Speech service subscription key
        #[arg(long, env = KEY_ENV, hide_env_values = true)]
        key: Option<String>,

        /// Speech service region (e.g. eastus)
        #[arg(long, env = REGION_ENV)]
        region: Option<String>,

        /// Recognition language
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout_secs: u64,

        /// Downmix to mono before submitting
        #[arg(long)]
        mono: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Start the WebSocket encode/assess server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = commands::serve::DEFAULT_PORT)]
        port: u16,

        /// Speech service subscription key
        #[arg(long, env = KEY_ENV, hide_env_values = true)]
        key: Option<String>,

        /// Speech service region (e.g. eastus)
        #[arg(long, env = REGION_ENV)]
        region: Option<String>,

        /// Recognition language
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            mono,
            policy,
            json,
        } => commands::encode::run(&input, &output, PrepareOptions::new(mono, policy), json),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Assess {
            input,
            reference_text,
            key,
            region,
            language,
            timeout_secs,
            mono,
            json,
        } => {
            let args = commands::assess::AssessArgs {
                input,
                reference_text,
                key,
                region,
                language,
                timeout_secs,
                mono,
            };
            commands::assess::run(&args, json)
        }
        Commands::Serve {
            port,
            key,
            region,
            language,
        } => commands::serve::run(port, commands::serve::speech_config(key, region, language)),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
