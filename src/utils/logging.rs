use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::str::FromStr;

/// Installs the process-wide logger writing to stderr. Unknown level names
/// fall back to `info`.
pub fn init(level: &str) -> Result<(), log::SetLoggerError> {
    let parsed = parse_level(level);
    SimpleLogger::new()
        .with_level(parsed.unwrap_or(LevelFilter::Info))
        .init()?;

    if parsed.is_none() {
        log::warn!("Unknown log level '{}', using info", level);
    }
    Ok(())
}

fn parse_level(level: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(level.trim()).ok()
}
