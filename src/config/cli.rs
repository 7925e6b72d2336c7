use crate::app::runner::FormEdits;
use crate::domain::kind::FormKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "prediction-form")]
#[command(about = "Fill in a prediction form and submit it to the prediction service")]
pub struct CliConfig {
    /// Path to a deployment config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the fields of a form with their defaults
    Fields { form: FormKind },

    /// List the example records
    Presets,

    /// Apply edits and print the form without submitting
    Render(FormArgs),

    /// Apply edits, submit once and print the outcome
    Predict {
        #[command(flatten)]
        form: FormArgs,

        /// Also print the JSON payload that was sent
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    pub form: FormKind,

    /// Fill the form from an example record (hiring-examples only)
    #[arg(long)]
    pub preset: Option<String>,

    /// Set a field, e.g. --set age=42
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub set: Vec<(String, String)>,

    /// Pick a categorical value, e.g. --choose productivity=productive
    #[arg(long = "choose", value_name = "GROUP=CHOICE", value_parser = parse_assignment)]
    pub choose: Vec<(String, String)>,
}

impl FormArgs {
    pub fn edits(&self) -> FormEdits {
        FormEdits {
            preset: self.preset.clone(),
            set: self.set.clone(),
            choose: self.choose.clone(),
        }
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
