use clap::Parser;
use pardis::picker::{InputSlot, Mode, Picker, PickerConfig};
use pardis::terminal::KeyEvent;
use pardis::{CalendarDate, ConfigError, InteractionResult, ParseError, PickerAction, Unit};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Replays picker interactions and prints the bound value as JSON.
#[derive(Debug, Parser)]
#[command(name = "pardis", version, about, long_about = None)]
struct Cli {
    /// Picker config (YAML, or JSON for `.json` files).
    config: Option<PathBuf>,

    /// Pin "today", as `YYYY-MM-DD`.
    #[arg(long)]
    now: Option<String>,

    /// Override the configured locale (`fa`, `en`, `ar`, `fa,en`).
    #[arg(long)]
    locale: Option<String>,

    /// Override the configured mode.
    #[arg(long, value_parser = ["single", "range", "multiple"])]
    mode: Option<String>,

    /// Steps separated by whitespace: key names (`down`, `enter`, `ctrl+w`),
    /// `type:TEXT`, `commit:TEXT`, `commit-end:TEXT`, `click:DATE`.
    #[arg(short, long, default_value = "")]
    script: String,

    /// Print the config JSON schema and exit.
    #[arg(long)]
    schema: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid --now value: {0}")]
    Now(ParseError),
    #[error("invalid script step {step:?}: {reason}")]
    Script { step: String, reason: String },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct Report {
    value: pardis::Value,
    input: Vec<String>,
    state: String,
    open: bool,
    locale: &'static str,
    rejected: Vec<String>,
}

fn main() {
    init_tracing();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    if cli.schema {
        println!(
            "{}",
            serde_json::to_string_pretty(&PickerConfig::json_schema())?
        );
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => PickerConfig::load(path)?,
        None => PickerConfig::default(),
    };
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale);
    }
    if let Some(mode) = cli.mode.as_deref() {
        config = config.with_mode(match mode {
            "range" => Mode::Range,
            "multiple" => Mode::Multiple,
            _ => Mode::Single,
        });
    }

    let mut picker = match cli.now.as_deref() {
        Some(now) => {
            let now = CalendarDate::parse(now, "YYYY-MM-DD")
                .map_err(CliError::Now)?
                .start_of(Unit::Day);
            Picker::with_now(config, now)?
        }
        None => Picker::new(config)?,
    };

    let mut rejected = Vec::new();
    for step in cli.script.split_whitespace() {
        let result = replay(&mut picker, step)?;
        rejected.extend(result.actions.iter().filter_map(|action| match action {
            PickerAction::Rejected(reason) => Some(format!("{step}: {reason}")),
            _ => None,
        }));
    }

    let report = Report {
        value: picker.value(),
        input: picker.input_texts(),
        state: format!("{:?}", picker.state()),
        open: picker.is_open(),
        locale: picker.locale().code,
        rejected,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn replay(picker: &mut Picker, step: &str) -> Result<InteractionResult, CliError> {
    debug!(step, "replaying");
    let fail = |reason: String| CliError::Script {
        step: step.to_string(),
        reason,
    };
    if let Some(text) = step.strip_prefix("type:") {
        let mut result = InteractionResult::ignored();
        for ch in text.chars() {
            let key = ch.to_string().parse::<KeyEvent>().map_err(fail)?;
            result = result.merge(picker.handle_key(key));
        }
        return Ok(result);
    }
    if let Some(text) = step.strip_prefix("commit:") {
        return Ok(picker.on_text_commit_at(InputSlot::Start, text));
    }
    if let Some(text) = step.strip_prefix("commit-end:") {
        return Ok(picker.on_text_commit_at(InputSlot::End, text));
    }
    if let Some(text) = step.strip_prefix("click:") {
        let date = picker.parse_text(text).map_err(|err| fail(err.to_string()))?;
        return Ok(picker.on_pick(date));
    }
    let key = step.parse::<KeyEvent>().map_err(fail)?;
    Ok(picker.handle_key(key))
}
