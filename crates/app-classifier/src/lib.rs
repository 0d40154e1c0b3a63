//! Guess whether the media service will accept a page URL, before asking it.
//!
//! The guess is a hint for the user and can be wrong both ways. Nothing in here
//! does I/O and nothing in here fails loudly: every problem with the input
//! ends up as "not supported".

pub mod clean;
pub mod decode;
pub mod error;
pub mod host;
pub mod rules;
pub mod site;
pub mod template;
mod url_shape;

pub use error::{ClassifyError, MalformedInput};
pub use rules::{SiteRule, SiteRules, DEFAULT_RULES};
pub use site::{Site, UnknownSite};
pub use template::{Captures, TemplateError, UrlTemplate};
pub use url_shape::looks_like_url;

/// Whether `raw` is likely supported, using the built-in site table.
#[must_use]
pub fn classify(raw: &str) -> bool {
    classify_with(&DEFAULT_RULES, raw)
}

#[must_use]
pub fn classify_with(rules: &SiteRules, raw: &str) -> bool {
    rules.classify(raw)
}

/// The site `raw` most likely belongs to, if it looks supported
#[must_use]
pub fn classify_site(raw: &str) -> Option<Site> {
    DEFAULT_RULES.classify_site(raw)
}

pub fn check(raw: &str) -> Result<Site, ClassifyError> {
    DEFAULT_RULES.check(raw)
}
