//! A line-oriented interpreter that drives a [`Tree`] of integer keys.
//!
//! Each non-blank line holds one command word followed by its keys, separated by whitespace.
//! Command words are case-insensitive and lines starting with `#` are comments. Every query
//! produces deterministic output lines; mutations other than `DELETE` produce none.
//!
//! # Examples
//!
//! ```
//! use avl::command::{run, Session};
//!
//! let script = "\
//! INSERT 30 20 10
//! INORDER
//! SEARCH 20
//! SUCCESSOR 30
//! DELETE 20
//! ";
//!
//! let mut output = Vec::new();
//! run(script.as_bytes(), &mut output, &mut Session::new(), true).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(output).unwrap(),
//!     "10 20 30\nFOUND\nNONE\nYES\n10 30\n",
//! );
//! ```

use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

use thiserror::Error;

use crate::observe::{Observer, Stats, Tracer};
use crate::util::join_keys;
use crate::Tree;

/// The key type the interpreter works with.
pub type Key = i64;

/// Printed by `MIN`, `MAX`, `SUCCESSOR` and `PREDECESSOR` when there is no such key.
pub const NONE: &str = "NONE";

/// One parsed line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `INSERT k...`: insert every key, in order.
    Insert(Vec<Key>),
    /// `DELETE k`: remove the key, then print the validity flag and the keys in order.
    Delete(Key),
    /// `SEARCH k`: print `FOUND` or `NOT FOUND`.
    Search(Key),
    /// `MIN`: print the smallest key.
    Min,
    /// `MAX`: print the largest key.
    Max,
    /// `SUCCESSOR k`: print the smallest key greater than `k`.
    Successor(Key),
    /// `PREDECESSOR k`: print the largest key less than `k`.
    Predecessor(Key),
    /// `RANGE low high`: print the keys in `[low, high]` in order.
    Range(Key, Key),
    /// `INORDER`: print every key in order.
    Inorder,
    /// `PREORDER`: print every key, each parent before its subtrees.
    Preorder,
    /// `POSTORDER`: print every key, each parent after its subtrees.
    Postorder,
    /// `VALID`: print `YES` if the tree satisfies the AVL invariants, else `NO`.
    Valid,
    /// `HEIGHT`: print the tree's height, -1 when empty.
    Height,
    /// `SIZE`: print how many keys are stored.
    Size,
    /// `PRINT`: print the tree's shape.
    Print,
    /// `CLEAR`: release every node.
    Clear,
    /// `STATS`: print the session's counters.
    Stats,
}

/// Why a line couldn't be turned into a [`Command`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The command word isn't one the interpreter knows.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// The command was given the wrong number of keys.
    #[error("`{command}` expects {expected} key(s), found {found}")]
    Arity {
        /// The command word.
        command: &'static str,
        /// How many keys it takes.
        expected: usize,
        /// How many keys were on the line.
        found: usize,
    },
    /// `INSERT` was given no keys.
    #[error("`{0}` expects at least one key")]
    NoKeys(&'static str),
    /// A key isn't an integer.
    #[error("invalid key `{token}`")]
    InvalidKey {
        /// The offending token.
        token: String,
        /// Why it didn't parse.
        source: ParseIntError,
    },
}

/// Why [`run`] stopped early.
#[derive(Debug, Error)]
pub enum Error {
    /// A line failed to parse in strict mode.
    #[error("line {line}: {source}")]
    Parse {
        /// The 1-based line number.
        line: usize,
        /// What was wrong with it.
        source: ParseError,
    },
    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Command {
    /// Parses one line. Blank lines and comments give `Ok(None)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::command::Command;
    ///
    /// assert_eq!(Command::parse("range 5 10"), Ok(Some(Command::Range(5, 10))));
    /// assert_eq!(Command::parse("  # a comment"), Ok(None));
    /// assert!(Command::parse("SEARCH").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = tokens.collect();

        let command = match word.to_ascii_uppercase().as_str() {
            "INSERT" => {
                if args.is_empty() {
                    return Err(ParseError::NoKeys("INSERT"));
                }
                let keys = args
                    .iter()
                    .map(|token| parse_key(token))
                    .collect::<Result<_, _>>()?;
                Self::Insert(keys)
            }
            "DELETE" => {
                let [key] = exact::<1>("DELETE", &args)?;
                Self::Delete(key)
            }
            "SEARCH" => {
                let [key] = exact::<1>("SEARCH", &args)?;
                Self::Search(key)
            }
            "SUCCESSOR" => {
                let [key] = exact::<1>("SUCCESSOR", &args)?;
                Self::Successor(key)
            }
            "PREDECESSOR" => {
                let [key] = exact::<1>("PREDECESSOR", &args)?;
                Self::Predecessor(key)
            }
            "RANGE" => {
                let [low, high] = exact::<2>("RANGE", &args)?;
                Self::Range(low, high)
            }
            "MIN" => exact::<0>("MIN", &args).map(|_| Self::Min)?,
            "MAX" => exact::<0>("MAX", &args).map(|_| Self::Max)?,
            "INORDER" => exact::<0>("INORDER", &args).map(|_| Self::Inorder)?,
            "PREORDER" => exact::<0>("PREORDER", &args).map(|_| Self::Preorder)?,
            "POSTORDER" => exact::<0>("POSTORDER", &args).map(|_| Self::Postorder)?,
            "VALID" => exact::<0>("VALID", &args).map(|_| Self::Valid)?,
            "HEIGHT" => exact::<0>("HEIGHT", &args).map(|_| Self::Height)?,
            "SIZE" => exact::<0>("SIZE", &args).map(|_| Self::Size)?,
            "PRINT" => exact::<0>("PRINT", &args).map(|_| Self::Print)?,
            "CLEAR" => exact::<0>("CLEAR", &args).map(|_| Self::Clear)?,
            "STATS" => exact::<0>("STATS", &args).map(|_| Self::Stats)?,
            _ => return Err(ParseError::UnknownCommand(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_key(token: &str) -> Result<Key, ParseError> {
    token.parse().map_err(|source| ParseError::InvalidKey {
        token: token.to_string(),
        source,
    })
}

/// Parses exactly `N` keys for `command`.
fn exact<const N: usize>(command: &'static str, args: &[&str]) -> Result<[Key; N], ParseError> {
    if args.len() != N {
        return Err(ParseError::Arity {
            command,
            expected: N,
            found: args.len(),
        });
    }
    let mut keys = [0; N];
    for (slot, token) in keys.iter_mut().zip(args) {
        *slot = parse_key(token)?;
    }
    Ok(keys)
}

/// How many of each kind of command a session has run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    /// Every executed command.
    pub operations: usize,
    /// Keys passed to `INSERT`.
    pub insertions: usize,
    /// `DELETE` commands.
    pub deletions: usize,
    /// `SEARCH` commands.
    pub searches: usize,
}

/// A tree plus the bookkeeping that the interpreter reports on.
#[derive(Default)]
pub struct Session {
    tree: Tree<Key>,
    stats: Stats,
    counts: Counts,
    trace: bool,
}

impl Session {
    /// A session over an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether to log every rebalance and rotation through [`Tracer`].
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// The tree being driven.
    pub fn tree(&self) -> &Tree<Key> {
        &self.tree
    }

    /// Structural counters gathered from every insert, delete and search.
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Per-command counters.
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// Runs one command against the tree and returns the lines it prints.
    pub fn execute(&mut self, command: Command) -> Vec<String> {
        self.counts.operations += 1;

        match command {
            Command::Insert(keys) => {
                self.counts.insertions += keys.len();
                for key in keys {
                    self.observe(|tree, observer| tree.insert_with(key, observer));
                }
                Vec::new()
            }
            Command::Delete(key) => {
                self.counts.deletions += 1;
                self.observe(|tree, observer| tree.remove_with(&key, observer));
                vec![flag(self.tree.is_valid()), join_keys(&self.tree)]
            }
            Command::Search(key) => {
                self.counts.searches += 1;
                let found = self.observe(|tree, observer| tree.find_with(&key, observer).is_some());
                let line = if found { "FOUND" } else { "NOT FOUND" };
                vec![line.to_string()]
            }
            Command::Min => vec![or_none(self.tree.min())],
            Command::Max => vec![or_none(self.tree.max())],
            Command::Successor(key) => vec![or_none(self.tree.successor(&key))],
            Command::Predecessor(key) => vec![or_none(self.tree.predecessor(&key))],
            Command::Range(low, high) => vec![join_keys(self.tree.range(low..=high))],
            Command::Inorder => vec![join_keys(&self.tree)],
            Command::Preorder => vec![join_keys(self.tree.preorder())],
            Command::Postorder => vec![join_keys(self.tree.postorder())],
            Command::Valid => vec![flag(self.tree.is_valid())],
            Command::Height => vec![self.tree.height().to_string()],
            Command::Size => vec![self.tree.len().to_string()],
            Command::Print => self
                .tree
                .pretty()
                .to_string()
                .lines()
                .map(str::to_string)
                .collect(),
            Command::Clear => {
                self.tree.clear();
                Vec::new()
            }
            Command::Stats => self.summary(),
        }
    }

    /// The counters as `name: value` lines.
    pub fn summary(&self) -> Vec<String> {
        [
            ("operations", self.counts.operations.to_string()),
            ("insertions", self.counts.insertions.to_string()),
            ("deletions", self.counts.deletions.to_string()),
            ("searches", self.counts.searches.to_string()),
            ("rotations", self.stats.rotations.to_string()),
            ("comparisons", self.stats.comparisons.to_string()),
            ("nodes", self.tree.len().to_string()),
            ("height", self.tree.height().to_string()),
        ]
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect()
    }

    /// Runs `f` with the session's observer: the statistics, plus the tracer when enabled.
    fn observe<R>(&mut self, f: impl FnOnce(&mut Tree<Key>, &mut dyn Observer<Key>) -> R) -> R {
        if self.trace {
            f(&mut self.tree, &mut (&mut self.stats, Tracer))
        } else {
            f(&mut self.tree, &mut self.stats)
        }
    }
}

fn flag(valid: bool) -> String {
    let flag = if valid { "YES" } else { "NO" };
    flag.to_string()
}

fn or_none(key: Option<&Key>) -> String {
    key.map_or_else(|| NONE.to_string(), Key::to_string)
}

/// Feeds every line of `input` through the session, writing the output lines to `output`.
///
/// Lines that fail to parse abort the run with [`Error::Parse`] when `strict` is set. Otherwise
/// they are logged and skipped.
pub fn run<R, W>(
    input: R,
    mut output: W,
    session: &mut Session,
    strict: bool,
) -> Result<(), Error>
where
    R: BufRead,
    W: Write,
{
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index + 1;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(source) if strict => return Err(Error::Parse { line: number, source }),
            Err(error) => {
                log::warn!("line {number}: {error}, skipping");
                continue;
            }
        };

        log::debug!("line {number}: {command:?}");
        for out in session.execute(command) {
            writeln!(output, "{out}")?;
        }
    }
    output.flush()?;
    Ok(())
}
