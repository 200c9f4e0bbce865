use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cascade")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chaining mutation/invocation engine for JSON object graphs", long_about = None)]
pub struct Args {
    /// Subject JSON (reads stdin when neither this nor --file is given)
    #[arg(value_name = "JSON")]
    pub subject: Option<String>,

    #[arg(short, long, value_name = "FILE", conflicts_with = "subject")]
    pub file: Option<PathBuf>,

    /// Step script: a JSON array of steps (arrays) and directives
    /// (strings like "enter a.b", "exit", "repeat 3")
    #[arg(short, long, value_name = "SCRIPT")]
    pub script: Option<String>,

    #[arg(long = "script-file", value_name = "PATH", conflicts_with = "script")]
    pub script_file: Option<PathBuf>,

    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub out: Option<PathBuf>,

    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    #[arg(long = "compact")]
    pub compact: bool,

    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Allow populating members that are currently undefined
    #[arg(long = "override-undefined")]
    pub override_undefined: bool,

    /// Allow assignments that change a member's type
    #[arg(long = "no-maintain-type")]
    pub no_maintain_type: bool,

    #[arg(long = "no-replace-variables")]
    pub no_replace_variables: bool,

    #[arg(long = "no-evaluate-variables")]
    pub no_evaluate_variables: bool,

    #[arg(long = "no-store-results")]
    pub no_store_results: bool,

    #[arg(long = "no-evaluate-arguments")]
    pub no_evaluate_arguments: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Complete {
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}
