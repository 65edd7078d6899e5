use log::LevelFilter;
use std::io::Write;

/// Installs a compact stderr logger showing messages up to `level`.
/// `RUST_LOG` still overrides the level if set. Repeated calls are ignored.
pub fn build_pace_logger_for_level(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{:>5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .try_init();
}

/// Raises `base` by one level per `verbosity` step (e.g. the number of `-v` flags)
pub fn build_pace_logger_for_verbosity(base: LevelFilter, verbosity: usize) {
    build_pace_logger_for_level(level_for_verbosity(base, verbosity));
}

fn level_for_verbosity(base: LevelFilter, verbosity: usize) -> LevelFilter {
    LevelFilter::iter()
        .skip_while(|&l| l != base)
        .nth(verbosity)
        .unwrap_or(LevelFilter::Trace)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn verbosity() {
        assert_eq!(level_for_verbosity(LevelFilter::Warn, 0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(LevelFilter::Warn, 1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(LevelFilter::Warn, 2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(LevelFilter::Warn, 9), LevelFilter::Trace);
        assert_eq!(level_for_verbosity(LevelFilter::Off, 1), LevelFilter::Error);
    }
}
