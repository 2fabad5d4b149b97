use std::fs;
use std::io::{self, IsTerminal, Read};

use docuscope_tagger::{Config, Dictionary, InMemoryStore, Tagger, TokenTypeSet};

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: CliConfig) -> Result<(), String> {
    let bytes = fs::read(&cli.dictionary_path)
        .map_err(|e| format!("failed to read dictionary '{}': {e}", cli.dictionary_path))?;
    let gzip = cli.dictionary_path.ends_with(".gz");
    let dictionary = Dictionary::from_bytes(&bytes, gzip).map_err(|e| e.to_string())?;
    let store = InMemoryStore::new(dictionary.long_rules, dictionary.short_rules);

    let mut tag_config = Config::default();
    tag_config.allow_overlapping_tags = cli.overlapping;
    if let Some(label) = cli.label {
        tag_config.label = label;
    }

    let tagger = Tagger::new(&dictionary.words, &store, tag_config).map_err(|e| e.to_string())?;

    match cli.format {
        OutputFormat::Html => {
            let html = tagger.tag_to_html(&cli.input).map_err(|e| e.to_string())?;
            println!("{html}");
        }
        OutputFormat::Json => {
            let outcome = tagger.tag(&cli.input).map_err(|e| e.to_string())?;
            let json = serde_json::json!({
                "spans": outcome.spans,
                "stats": outcome.stats,
            });
            println!("{}", serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?);
        }
    }

    Ok(())
}

enum OutputFormat {
    Html,
    Json,
}

struct CliConfig {
    dictionary_path: String,
    label: Option<String>,
    overlapping: bool,
    format: OutputFormat,
    input: String,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut dictionary_path: Option<String> = None;
    let mut label: Option<String> = None;
    let mut overlapping = false;
    let mut format = OutputFormat::Html;
    let mut input: Option<String> = None;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("docuscope-tag {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--dictionary" => {
                let value = args.next().ok_or_else(|| "error: --dictionary expects a value".to_string())?;
                dictionary_path = Some(value);
            }
            "--label" => {
                let value = args.next().ok_or_else(|| "error: --label expects a value".to_string())?;
                label = Some(value);
            }
            "--overlapping" => overlapping = true,
            "--format" => {
                let value = args.next().ok_or_else(|| "error: --format expects a value".to_string())?;
                format = parse_format(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--dictionary=") => {
                dictionary_path = Some(arg.trim_start_matches("--dictionary=").to_string());
            }
            _ if arg.starts_with("--label=") => {
                label = Some(arg.trim_start_matches("--label=").to_string());
            }
            _ if arg.starts_with("--format=") => {
                format = parse_format(arg.trim_start_matches("--format="))?;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let dictionary_path = dictionary_path.ok_or_else(|| format!("error: --dictionary is required\n\n{}", help_text()))?;

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };
    if input.is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { dictionary_path, label, overlapping, format, input })
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value {
        "html" => Ok(OutputFormat::Html),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("error: invalid --format '{other}' (expected 'html' or 'json')")),
    }
}

fn read_stdin_input() -> Result<String, String> {
    if io::stdin().is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "docuscope-tag {version}

Rhetorical-style tagger: tokenize, apply dictionary rules, render HTML or JSON.

Usage:
  docuscope-tag --dictionary <path> [OPTIONS] [--] <input...>
  docuscope-tag --dictionary <path> [OPTIONS] --input <text>

Options:
  --dictionary <path>     Dictionary JSON file, optionally gzip-compressed
                          (detected by a '.gz' suffix). Required.
  -i, --input <text>      Input text to tag. If omitted, reads remaining
                          positional args or stdin.
  --label <label>         Prefix for tag names (default: 'label').
  --overlapping           Allow overlapping tags instead of the default
                          non-overlapping longest-match walk.
  --format <html|json>    Output format (default: html).
  -h, --help              Show this help message.
  -V, --version           Print version information.

Exit codes:
  0  Success.
  1  Internal error (bad dictionary, tagging failure).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_rejects_unknown_value() {
        assert!(parse_format("xml").is_err());
    }

    #[test]
    fn format_accepts_html_and_json() {
        assert!(matches!(parse_format("html").unwrap(), OutputFormat::Html));
        assert!(matches!(parse_format("json").unwrap(), OutputFormat::Json));
    }

    #[test]
    fn token_type_set_is_reachable_from_the_public_api() {
        let _ = TokenTypeSet::default_excluded();
    }
}
