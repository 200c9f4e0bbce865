use crate::cli::{Args, ColorChoice};
use crate::engine::Options;

pub struct AppConfig {
    pub color_enabled: bool,
    pub compact: bool,
    pub verbose: bool,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout),
        };

        AppConfig {
            color_enabled,
            compact: args.compact,
            verbose: args.verbose,
        }
    }

    pub fn engine_options(args: &Args) -> Options {
        Options {
            override_undefined: args.override_undefined,
            maintain_data_type: !args.no_maintain_type,
            replace_variables: !args.no_replace_variables,
            evaluate_variables: !args.no_evaluate_variables,
            store_results: !args.no_store_results,
            evaluate_arguments: !args.no_evaluate_arguments,
            ..Options::default()
        }
    }
}
