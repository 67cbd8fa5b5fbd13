mod command;
mod repl;
mod report;

use std::{
    error,
    io::{self, BufRead, Write},
    path::Path,
};

use clap::Parser;
use session::Config;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::repl::Repl;
use crate::report::Report;

fn main() -> Result<(), Box<dyn error::Error>> {
    let config = Config::parse();
    let _guard = init_tracing(&config)?;

    tracing::info!("armcalc v{} {config:?}", env!("CARGO_PKG_VERSION"));

    let mut repl = Repl::new(&config);
    let mut stdout = io::stdout().lock();

    if !config.json {
        writeln!(stdout, "armcalc v{}, `help` lists the commands", env!("CARGO_PKG_VERSION"))?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(report) = repl.handle(&line) else {
            break;
        };
        print_report(&mut stdout, &report, config.json)?;
    }

    tracing::info!("armcalc stopped");
    Ok(())
}

fn print_report(
    out: &mut impl Write,
    report: &Report,
    json: bool,
) -> Result<(), Box<dyn error::Error>> {
    if json {
        serde_json::to_writer(&mut *out, report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{report}")?;
    }
    out.flush()?;

    Ok(())
}

/// Logs go to stderr, or to `--log-file` when one is given. The returned
/// guard flushes the file writer and must live until `main` returns.
fn init_tracing(config: &Config) -> Result<Option<WorkerGuard>, Box<dyn error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = &config.log_file else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr))
            .with(env_filter)
            .init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| format!("`{}` is not a file path", path.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .with(env_filter)
        .init();

    Ok(Some(guard))
}
