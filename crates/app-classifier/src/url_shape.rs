use once_cell::sync::Lazy;
use regex::Regex;

static HTTPS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"https://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()!@:%_+.~#?&/=]*)",
    )
    .expect("Invalid regex")
});

/// Whether `text` contains something shaped like an `https` URL.
///
/// Much looser than [`crate::classify`], it says nothing about the site.
#[must_use]
pub fn looks_like_url(text: &str) -> bool {
    HTTPS_URL.is_match(text)
}
