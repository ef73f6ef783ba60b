use anyhow::{bail, Result};
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub help: bool,
    /// Append the run's diagnostics to this JSONL file.
    pub report: Option<PathBuf>,
}

/// Parse arguments (without the program name).
///
/// Supported forms:
///   board-migrate
///   board-migrate --report run.jsonl
///   board-migrate --help
pub fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => opts.help = true,
            "-r" | "--report" => {
                i += 1;
                match args.get(i) {
                    Some(path) if !path.is_empty() => opts.report = Some(PathBuf::from(path)),
                    _ => bail!("Missing value for -r/--report flag"),
                }
            }
            other => bail!("Unknown argument: {other}\n\nRun `board-migrate --help` for usage."),
        }
        i += 1;
    }

    Ok(opts)
}

pub fn print_help() {
    println!("board-migrate — copy Trello boards into Asana projects\n");
    println!("USAGE:");
    println!("  board-migrate                 Migrate every board, list and card");
    println!();
    println!("OPTIONS:");
    println!("  -r, --report <file>  Append run diagnostics to a JSONL file");
    println!("  -h, --help           Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("  TRELLO_API_KEY, TRELLO_TOKEN      Trello credentials");
    println!("  ASANA_ACCESS_TOKEN, WORKSPACE_ID  Asana credentials and target workspace");
    println!("  RUST_LOG                          Log filter (default: info)");
    println!();
    println!("Settings may also live in ~/.board-migrate/config.toml; the environment wins.");
}
