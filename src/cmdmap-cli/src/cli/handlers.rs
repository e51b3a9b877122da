//! Top-level run handler.

use std::fs::File;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cmdmap::Handler;

use super::args::Cli;
use crate::builtins::{BUILTIN_NAMES, Builtins};
use crate::config::CliConfig;
use crate::output::{Printer, Tee};
use crate::repl::{LineSource, Repl, execute};

/// Build the command map from the configured table and run the requested mode.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load command table")?;

    let stdout: Box<dyn Write + Send> = Box::new(io::stdout());
    let sink: Box<dyn Write + Send> = match &cli.transcript {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create transcript {}", path.display()))?;
            Box::new(Tee::new(vec![stdout, Box::new(file)]))
        }
        None => stdout,
    };
    let printer = Printer::new(sink);
    let _prefix = config
        .prefix
        .as_deref()
        .filter(|prefix| !prefix.is_empty())
        .map(|prefix| printer.scoped_prefix(prefix));

    let builtins = Builtins::new(&printer);
    let echo = |args: &[String]| builtins.echo(args);
    let paths = |args: &[String]| builtins.paths(args);
    let quit = |args: &[String]| builtins.quit(args);
    let handlers: [&Handler<'_>; 3] = [&echo, &paths, &quit];

    let map = config
        .build_map(|name| {
            BUILTIN_NAMES
                .iter()
                .position(|builtin| *builtin == name)
                .map(|index| handlers[index])
        })
        .context("Failed to build command map")?;
    builtins.set_paths(&map);

    if !cli.tokens.is_empty() {
        let outcome = execute(&map, &printer, &cli.tokens)?;
        tracing::debug!(?outcome, "one-shot dispatch finished");
        return Ok(outcome.exit_code());
    }

    let mut lines = LineSource::new(io::stdin().lock());
    for command in &cli.commands {
        lines.push(command);
    }
    let prompt = if io::stdin().is_terminal() {
        config.prompt.as_str()
    } else {
        ""
    };
    Repl::new(&map, &printer, builtins.quit_flag(), prompt).run(&mut lines)?;
    Ok(ExitCode::SUCCESS)
}
