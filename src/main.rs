use cascade::chain::{cascade_with, Chain};
use cascade::cli::{Args, Commands};
use cascade::config::AppConfig;
use cascade::convert::json_to_value;
use cascade::format::value_to_json_string;
use cascade::json;
use cascade::value::Value;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use owo_colors::OwoColorize;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

fn main() {
    let args = Args::parse();

    if let Some(Commands::Complete { shell }) = &args.command {
        generate_completions(*shell);
        return;
    }

    let config = AppConfig::from_args(&args);

    verbose_log(&config, "Starting cascade");

    let subject_str = match read_subject_input(&args, &config) {
        Ok(s) => s,
        Err(e) => {
            error_message(&config, &e);
            std::process::exit(1);
        }
    };

    let subject = match json::parse_json(&subject_str) {
        Ok(val) => {
            verbose_log(&config, "Successfully parsed subject JSON");
            json_to_value(val)
        }
        Err(e) => {
            error_message(&config, &format!("JSON parse error: {}", e));
            std::process::exit(1);
        }
    };

    let script_str = match read_script_input(&args, &config) {
        Ok(s) => s,
        Err(e) => {
            error_message(&config, &e);
            std::process::exit(1);
        }
    };

    match run_script(&script_str, subject, &args, &config) {
        Ok(result) => {
            let output = format!("{}\n", value_to_json_string(&result, config.compact));
            write_result(&output, &args.out, &config);
        }
        Err(e) => {
            error_message(&config, &e);
            std::process::exit(1);
        }
    }
}

/// Runs a step script: a JSON array whose elements are either arrays
/// (one raw chain-step argument list each) or directive strings
/// ("enter PATH", "exit", "repeat N").
fn run_script(
    script_str: &str,
    subject: Value,
    args: &Args,
    config: &AppConfig,
) -> Result<Value, String> {
    let script = json::parse_json(script_str)?;
    let steps = match script {
        serde_json::Value::Array(steps) => steps,
        _ => return Err("script must be a JSON array of steps".to_string()),
    };

    let root = cascade_with(subject, AppConfig::engine_options(args));
    let mut chain = root.clone();

    for (step_no, step) in steps.into_iter().enumerate() {
        match step {
            serde_json::Value::Array(raw) => {
                let raw_values: Vec<Value> = raw.into_iter().map(json_to_value).collect();
                verbose_log(
                    config,
                    &format!(
                        "step {}: {}",
                        step_no,
                        value_to_json_string(&Value::array(raw_values.clone()), true)
                    ),
                );
                chain = chain.step(raw_values).map_err(|e| e.to_string())?;
            }
            serde_json::Value::String(directive) => {
                verbose_log(config, &format!("step {}: directive `{}`", step_no, directive));
                chain = apply_directive(&chain, &directive)?;
            }
            other => {
                return Err(format!(
                    "step {} must be a JSON array or a directive string, got: {}",
                    step_no, other
                ))
            }
        }
    }

    if config.verbose {
        if let Some(results) = root.variable("$results") {
            verbose_log(
                config,
                &format!("results: {}", value_to_json_string(&results, true)),
            );
        }
    }

    Ok(root.release())
}

fn apply_directive(chain: &Chain, directive: &str) -> Result<Chain, String> {
    let mut words = directive.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("enter"), Some(path), None) => chain.enter(path).map_err(|e| e.to_string()),
        (Some("exit"), None, None) => Ok(chain.exit()),
        (Some("repeat"), Some(times), None) => {
            let times: usize = times
                .parse()
                .map_err(|_| format!("invalid repeat count: {}", times))?;
            chain.repeat(times).map_err(|e| e.to_string())
        }
        _ => Err(format!("unknown directive: {}", directive)),
    }
}

fn read_subject_input(args: &Args, config: &AppConfig) -> Result<String, String> {
    if let Some(file) = &args.file {
        verbose_log(config, &format!("Reading subject from file: {}", file.display()));
        read_file(file)
    } else if let Some(json) = &args.subject {
        verbose_log(config, "Reading subject from command-line argument");
        Ok(json.clone())
    } else {
        verbose_log(config, "Reading subject from stdin");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;

        if buffer.trim().is_empty() {
            return Err(
                "No input provided. Must provide --file, JSON string argument, or JSON via stdin"
                    .to_string(),
            );
        }

        Ok(buffer)
    }
}

fn read_script_input(args: &Args, config: &AppConfig) -> Result<String, String> {
    if let Some(script) = &args.script {
        verbose_log(config, "Using script from command-line argument");
        Ok(script.clone())
    } else if let Some(script_file) = &args.script_file {
        verbose_log(
            config,
            &format!("Reading script from file: {}", script_file.display()),
        );
        read_file(script_file)
    } else {
        Err("No script provided (use --script or --script-file)".to_string())
    }
}

fn write_result(output: &str, out_file: &Option<PathBuf>, config: &AppConfig) {
    match out_file {
        None => {
            print!("{}", output);
            let _ = io::stdout().flush();
        }
        Some(out_path) => {
            verbose_log(
                config,
                &format!("Writing output to file: {}", out_path.display()),
            );
            if let Err(e) = std::fs::write(out_path, output) {
                error_message(config, &format!("failed to write output file: {}", e));
                std::process::exit(1);
            }
        }
    }
}

fn generate_completions(shell: Shell) {
    let mut cmd = Args::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut io::stdout());
}

fn read_file(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))
}

fn verbose_log(config: &AppConfig, message: &str) {
    if config.verbose {
        eprintln!("[cascade:debug] {}", message);
    }
}

// Every failure path goes through here so the prefix stays uniform.
fn error_message(config: &AppConfig, message: &str) {
    let message = format!("error: {}", message);
    if config.color_enabled {
        eprintln!("{}", message.red().bold());
    } else {
        eprintln!("{}", message);
    }
}
