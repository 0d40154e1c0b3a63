use once_cell::sync::Lazy;
use regex::Regex;

use crate::site::Site;

#[rustfmt::skip]
const FORBIDDEN_CHARS: &[char] = &[
    '}', '{', '(', ')', '\\', '%', '>', '<', '^', '*', '!', '~', ';', ':', ',', '`', '[', ']', '#', '$', '"', '\'', '@',
];

const MAX_URL_LENGTH: usize = 128;

/// `@user.name` style handles
static TIKTOK_HANDLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@([a-zA-Z]+(\.[a-zA-Z]+)+)").expect("Invalid regex"));

/// Normalize a URL of `site` before its path is matched against templates.
///
/// Drops query strings that don't carry the id, strips characters that never
/// show up in ids, and caps the length.
#[must_use]
pub fn clean_url(url: &str, site: Site) -> String {
    let mut url = match site {
        Site::Vk | Site::Youtube => before(url, '&').to_string(),

        // `@` gets stripped below, the placeholder keeps the segment in place
        Site::Tiktok => without_query(&TIKTOK_HANDLE.replace(url, "@a")),

        _ => without_query(url),
    };

    url.retain(|c| !FORBIDDEN_CHARS.contains(&c));

    let mut url = url.replacen("https//", "https://", 1);

    if url.contains("youtube.com/shorts/") {
        url = before(&url, '?').replacen("shorts/", "watch?v=", 1);
    }

    url.chars().take(MAX_URL_LENGTH).collect()
}

/// The part of a cleaned URL after `.<tld>/`, without any dots.
#[must_use]
pub fn path_of(url: &str, top_level_domain: &str) -> Option<String> {
    let separator = format!(".{top_level_domain}/");

    url.split_once(&separator)
        .map(|(_, path)| path.replace('.', ""))
}

fn before(s: &str, c: char) -> &str {
    s.split_once(c).map_or(s, |(head, _)| head)
}

fn without_query(url: &str) -> String {
    let url = before(url, '?');

    url.strip_suffix('/').unwrap_or(url).to_string()
}
