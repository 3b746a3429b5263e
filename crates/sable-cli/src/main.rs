//! The `sable` command-line tool.
//!
//! - `sable FILE` - run a source file
//! - `sable` - start the REPL
//! - `sable --dump-ast FILE` - print the parsed program as canonical source

use anyhow::{Context, Result, bail};
use clap::Parser;
use sable_cli::{Config, RenderOptions, Session, config, dump_ast, on_large_stack, repl};
use sable_log::{Level, info};
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sable")]
#[command(author, version, about = "Sable language interpreter", long_about = None)]
struct Cli {
    /// Source file to run; starts the REPL when omitted
    file: Option<PathBuf>,

    /// Configuration file (`key = value` lines)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the parsed program instead of running it
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> Result<ExitCode> {
    on_large_stack(run).context("Failed to start interpreter thread")?
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let settings = load_config(cli.config.as_deref())?;
    if settings.get_bool("debug", false) {
        sable_log::set_level(Level::Debug);
    }
    if let Some(level) = &cli.log_level {
        sable_log::set_level_from_str(level)?;
    }
    let options = RenderOptions::from_config(&settings);

    match (&cli.file, cli.dump_ast) {
        (Some(file), true) => print_ast(file, &settings),
        (None, true) => bail!("--dump-ast requires a source file"),
        (Some(file), false) => run_file(file, &options),
        (None, false) => {
            repl::run(&mut Session::new(), &options).context("REPL I/O failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut settings = Config::new();
    if let Some(path) = path {
        settings.load_from_file(path)?;
        info!("loaded configuration from {}", path.display());
    }
    config::install(settings.clone());
    Ok(settings)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

fn run_file(path: &Path, options: &RenderOptions) -> Result<ExitCode> {
    let source = read_source(path)?;
    let report = Session::new().run(&source);
    eprint!("{}", report.render(options));
    eprint!("{}", report.render_snippets(&source, options, io::stderr().is_terminal()));

    if report.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_ast(path: &Path, settings: &Config) -> Result<ExitCode> {
    let source = read_source(path)?;
    let indent = usize::try_from(settings.get_int("indent_size", 4)).unwrap_or(4);
    match dump_ast(&source, indent) {
        Ok(printed) => {
            print!("{printed}");
            Ok(ExitCode::SUCCESS)
        }
        Err(report) => {
            eprint!("{}", report.render(&RenderOptions::from_config(settings)));
            Ok(ExitCode::FAILURE)
        }
    }
}
