use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Logger writing `c <LEVEL> - <message>` lines, so that log output mixed into
/// a DIMACS style result stays a comment.
pub fn build_logger_for_level(level: LevelFilter) {
    let mut builder = Builder::from_default_env();
    builder
        .format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()))
        .filter(None, level)
        .init();
}

pub fn build_logger() {
    let mut builder = Builder::from_default_env();
    builder
        .format(|buf, record| writeln!(buf, "c {} - {}", record.level(), record.args()))
        .init();
}

/// `0` warnings only, `1` info, `2` debug, anything above trace.
pub fn level_from_verbosity(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
