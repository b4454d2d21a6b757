use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use typepipe_lines::{CommandSpec, Config, LinePipeline, Outcome, StripMode, TypeSet, TypeTag};

/// Exit status after an interrupt
const EXIT_INTERRUPTED: i32 = 130;

/// typepipe - Pipe lines of a given type through a command, pass the rest through
#[derive(Parser, Debug)]
#[command(name = "typepipe")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Invert the match result
    #[arg(short, long)]
    complement: bool,

    /// Drop unmatched lines instead of passing them through
    #[arg(short, long)]
    filter: bool,

    /// Trim leading and trailing whitespace from matched lines
    #[arg(long)]
    strip: bool,

    /// Remove only the trailing newline from matched lines
    #[arg(long)]
    strip_trailing_newline: bool,

    /// Match every line (default when no type is given)
    #[arg(short, long)]
    all: bool,

    /// Match no line
    #[arg(short, long)]
    none: bool,

    /// Match lines that are valid JSON
    #[arg(short, long)]
    json: bool,

    /// Command that each matched line is piped to, given after `--`
    #[arg(last = true, value_name = "COMMAND")]
    command: Vec<String>,
}

impl Args {
    fn into_config(self) -> Config {
        let tags = [
            (self.all, TypeTag::All),
            (self.none, TypeTag::None),
            (self.json, TypeTag::Json),
        ]
        .into_iter()
        .filter_map(|(enabled, tag)| enabled.then_some(tag));

        Config::new(TypeSet::from_tags(tags))
            .with_complement(self.complement)
            .with_filter_unmatched(self.filter)
            .with_strip(StripMode::from_flags(
                self.strip,
                self.strip_trailing_newline,
            ))
            .with_command(CommandSpec::from_argv(self.command))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr, stdout carries only line data
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.into_config();
    tracing::debug!(types = %config.types, ?config, "starting");

    match run(&config).await {
        Ok(outcome) => {
            tracing::debug!(stats = ?outcome.stats(), "stopped");
            if let Outcome::Interrupted(_) = outcome {
                // A stdin read blocked in the runtime's thread pool would keep a
                // graceful shutdown waiting, so leave right away
                std::process::exit(EXIT_INTERRUPTED);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config) -> Result<Outcome> {
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let pipeline = LinePipeline::new(config).with_cancellation(cancel);
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    let outcome = pipeline
        .run(input, output)
        .await
        .with_context(|| match &config.command {
            Some(command) => format!("failed to process input with `{}`", command),
            None => "failed to process input".to_string(),
        })?;
    Ok(outcome)
}
