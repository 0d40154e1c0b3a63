use std::env;

use tracing::Level;
pub use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{filter::Directive, fmt, prelude::*, EnvFilter};

pub const LOG_LEVEL_ENV: &str = "MEDIA_PORTAL_LOG_LEVEL";

pub const COMPONENT_LEVELS: &[(&str, Level)] = &[
    ("portal_cli", Level::INFO),
    ("app_classifier", Level::INFO),
    ("app_config", Level::INFO),
    ("app_logger", Level::INFO),
    ("app_service", Level::INFO),
];

/// Initialize the logger
///
/// # Panics
/// Panics if a global subscriber was already set
pub fn init() {
    init_with(COMPONENT_LEVELS.to_vec());
}

pub fn init_with_app_level(level: Level) {
    let levels = COMPONENT_LEVELS
        .iter()
        .map(|(k, _v)| (*k, level))
        .collect::<Vec<_>>();

    init_with(levels);
}

pub fn init_with<T>(levels: T)
where
    T: IntoIterator<Item = (&'static str, Level)>,
{
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(levels))
        .try_init()
        .expect("setting default subscriber failed");
}

/// Filter with one directive per component, plus whatever is in
/// `MEDIA_PORTAL_LOG_LEVEL` on top.
#[must_use]
pub fn env_filter<T>(levels: T) -> EnvFilter
where
    T: IntoIterator<Item = (&'static str, Level)>,
{
    let mut filter = EnvFilter::builder()
        .with_default_directive(Level::WARN.into())
        .parse_lossy(default_directives(levels));

    for d in env_directives(&env::var(LOG_LEVEL_ENV).unwrap_or_default()) {
        filter = filter.add_directive(d);
    }

    filter
}

fn default_directives<T>(levels: T) -> String
where
    T: IntoIterator<Item = (&'static str, Level)>,
{
    levels
        .into_iter()
        .map(|(k, v)| {
            if k.is_empty() {
                v.to_string()
            } else {
                format!("{}={}", k, v)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn env_directives(value: &str) -> Vec<Directive> {
    value
        .split(',')
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(d) => Some(d),
            Err(e) => {
                eprintln!("Failed to parse log level directive {s:?}: {e:?}");
                None
            }
        })
        .collect()
}
