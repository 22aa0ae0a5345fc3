use log::{log_enabled, Level, LevelFilter};
use std::env;
use std::ffi::OsStr;
use std::io::Write;

/// Installs the global logger. When `RUST_LOG` is set its directives decide what is logged,
/// otherwise the level is taken from how many times `--verbose` was passed.
pub fn init(verbosity: u8) {
    let mut builder = env_logger::Builder::from_default_env();

    if let Some(level) = default_filter(env::var_os("RUST_LOG").as_deref(), verbosity) {
        builder.filter(None, level);
    }

    builder
        .format_indent(Some(8))
        .format(|f, record| {
            let style = f.default_level_style(record.level()).bold();

            write!(
                f,
                "{style}{:>6}{style:#} ",
                prettyprint_level(record.level())
            )?;

            if log_enabled!(Level::Trace) {
                write!(f, "[{}] ", record.target())?;
            }

            writeln!(f, "{}", record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();
}

/// The global filter to apply on top of `RUST_LOG`, if any. An unset or blank `RUST_LOG` falls
/// back to the `--verbose` count.
fn default_filter(rust_log: Option<&OsStr>, verbosity: u8) -> Option<LevelFilter> {
    match rust_log {
        Some(directives) if !directives.is_empty() => None,
        _ => Some(verbosity_level(verbosity).to_level_filter()),
    }
}

/// This maps the occurrence of `--verbose` flags to the correct log level
fn verbosity_level(num: u8) -> Level {
    match num {
        0 => Level::Info,
        1 => Level::Debug,
        2.. => Level::Trace,
    }
}

/// The default string representation for `Level` is all uppercaps, which is loud next to the
/// interpreter's own output.
fn prettyprint_level(lvl: Level) -> &'static str {
    match lvl {
        Level::Error => "Error",
        Level::Warn => "Warn",
        Level::Info => "Info",
        Level::Debug => "Debug",
        Level::Trace => "Trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(verbosity_level(0), Level::Info);
        assert_eq!(verbosity_level(1), Level::Debug);
        assert_eq!(verbosity_level(2), Level::Trace);
        assert_eq!(verbosity_level(9), Level::Trace);
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        let directives = OsStr::new("trace");
        assert_eq!(default_filter(Some(directives), 0), None);
        assert_eq!(default_filter(Some(directives), 2), None);
    }

    #[test]
    fn verbosity_applies_without_rust_log() {
        assert_eq!(default_filter(None, 0), Some(LevelFilter::Info));
        assert_eq!(default_filter(None, 1), Some(LevelFilter::Debug));
        assert_eq!(default_filter(Some(OsStr::new("")), 3), Some(LevelFilter::Trace));
    }
}
