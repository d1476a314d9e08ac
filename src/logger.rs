use std::io::Write;

use log::{LevelFilter, SetLoggerError};

/// `-v` count to level, starting at warn.
pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    return match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
}

/// Logs go to stderr, stdout is reserved for the raw http output.
///
/// `RUST_LOG` is read first, `level` overrides it.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", level.min(LevelFilter::Info));
    builder.filter_module("hyper", level.min(LevelFilter::Info));
    builder.target(env_logger::Target::Stderr);
    builder.format(|buf, record| {
        writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args())
    });
    return builder.try_init();
}
