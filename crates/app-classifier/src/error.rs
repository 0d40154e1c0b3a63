use thiserror::Error;

use crate::{decode::DecodeError, site::Site, template::Captures};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

/// Why a URL is not expected to be supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("Malformed URL: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("Only https URLs are supported")]
    InsecureScheme,

    #[error("No site is known for host {0:?}")]
    UnknownHost(String),

    #[error("Site {0} is disabled")]
    DisabledSite(Site),

    #[error("URL {url:?} has no path after .{top_level_domain}/")]
    MissingPath {
        url: String,
        top_level_domain: String,
    },

    #[error("No {site} template matches {path:?}")]
    NoTemplateMatch { site: Site, path: String },

    #[error("Captured values don't look like a {site} id: {captures:?}")]
    ValidationFailed { site: Site, captures: Captures },
}
