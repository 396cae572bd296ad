//! `log` backend setup.

use log::LevelFilter;
use std::io::Write;

/// Level name as accepted by `log`, plus `warning` as an alias for `warn`.
pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let level = level.trim();
    if level.eq_ignore_ascii_case("warning") {
        return Some(LevelFilter::Warn);
    }
    level.parse().ok()
}

/// Install the logger. Only the first call installs the backend and fixes its
/// filter; later calls can lower verbosity but never raise it past that filter.
pub fn init_logger(level: LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .format(move |buf, record| {
            writeln!(
                buf,
                "{}: {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .filter_level(level);

    let _ = builder.try_init();

    log::set_max_level(level);
}

/// Like [`init_logger`] but from a config string; unknown names fall back to `info`.
pub fn init_from_str(level: &str) -> LevelFilter {
    let lvl = parse_level(level).unwrap_or(LevelFilter::Info);
    init_logger(lvl);
    lvl
}
