use anyhow::Context;
use avl::command::{self, Session};
use clap::{ArgAction, Parser, ValueHint};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

mod logger;

/// Runs AVL tree commands, one per line, and prints their results.
#[derive(Debug, Parser)]
#[command(version)]
struct Options {
    /// File of commands to run. Reads standard input when omitted.
    #[clap(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,
    /// Enables verbose logging
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Stop at the first malformed line instead of skipping it
    #[clap(long, env = "AVL_STRICT")]
    strict: bool,
    /// Print the session counters once the input is exhausted
    #[clap(long)]
    stats: bool,
    /// Log every rebalance and rotation (shown with `-v`)
    #[clap(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let opts = Options::parse();
    logger::init(opts.verbose);
    log::debug!("{opts:?}");

    let mut session = Session::new().with_trace(opts.trace);
    let input = open_input(opts.input.as_deref())?;

    let stdout = io::stdout().lock();
    command::run(input, stdout, &mut session, opts.strict)?;

    if opts.stats {
        let mut stdout = io::stdout().lock();
        for line in session.summary() {
            writeln!(stdout, "{line}")?;
        }
    }
    log::debug!(
        "{} operation(s), {} key(s) left",
        session.counts().operations,
        session.tree().len()
    );
    Ok(())
}

/// The command source: the given file, or standard input.
fn open_input(path: Option<&Path>) -> anyhow::Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
