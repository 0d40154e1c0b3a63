use std::collections::HashMap;

use regex::Regex;

/// Characters a named capture is allowed to consume.
const CAPTURE_CHARSET: &str = r"[a-zA-Z0-9_~ %\-]";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Capture at byte {position} of {template:?} has no name")]
    EmptyName { template: String, position: usize },

    #[error("Capture {name:?} appears more than once in {template:?}")]
    DuplicateName { template: String, name: String },

    #[error("Failed to build matcher for {template:?}: {source}")]
    Matcher {
        template: String,
        source: regex::Error,
    },
}

/// A path template like `:user/status/:id`.
///
/// Everything that isn't a `:name` capture is matched literally, and the
/// template has to cover the whole path. Captures are one or more characters
/// out of `A-Z a-z 0-9 - _ ~ % ` (space included), so a capture never spans a
/// `/` or a `.`.
#[derive(Debug, Clone)]
pub struct UrlTemplate {
    source: String,
    names: Vec<String>,
    matcher: Regex,
}

impl UrlTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut pattern = String::from("^");
        let mut names = Vec::<String>::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            if c != ':' {
                literal.push(c);
                continue;
            }

            let mut name = String::new();
            while let Some((_, next)) = chars.next_if(|(_, x)| x.is_ascii_alphanumeric()) {
                name.push(next);
            }

            if name.is_empty() {
                return Err(TemplateError::EmptyName {
                    template: source.to_string(),
                    position,
                });
            }

            if names.contains(&name) {
                return Err(TemplateError::DuplicateName {
                    template: source.to_string(),
                    name,
                });
            }

            pattern.push_str(&regex::escape(&literal));
            literal.clear();
            pattern.push('(');
            pattern.push_str(CAPTURE_CHARSET);
            pattern.push_str("+)");
            names.push(name);
        }

        pattern.push_str(&regex::escape(&literal));
        pattern.push('$');

        let matcher = Regex::new(&pattern).map_err(|source_err| TemplateError::Matcher {
            template: source.to_string(),
            source: source_err,
        })?;

        Ok(Self {
            source: source.to_string(),
            names,
            matcher,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Captures> {
        let found = self.matcher.captures(path)?;

        let values = self
            .names
            .iter()
            .zip(found.iter().skip(1))
            .filter_map(|(name, value)| value.map(|v| (name.clone(), v.as_str().to_string())))
            .collect();

        Some(Captures(values))
    }
}

impl std::fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Named values captured by a [`UrlTemplate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures(HashMap<String, String>);

impl Captures {
    /// Captured value, if there is a non-empty one under `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|x| !x.is_empty())
    }

    #[must_use]
    pub fn len_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(str::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Captures
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(source: &str) -> UrlTemplate {
        UrlTemplate::parse(source).expect("template should parse")
    }

    #[test]
    fn captures_named_segments() {
        let t = template(":user/status/:id");
        let caps = t.captures("someone/status/1234").expect("should match");

        assert_eq!(caps.get("user"), Some("someone"));
        assert_eq!(caps.get("id"), Some("1234"));
        assert_eq!(t.names(), ["user", "id"]);
    }

    #[test]
    fn requires_the_whole_path() {
        let t = template(":user/status/:id");

        assert!(t.captures("someone/status/1234/video/1").is_none());
        assert!(t.captures("prefix/someone/status/1234").is_none());
        assert!(t.captures("someone/status/").is_none());
    }

    #[test]
    fn literal_text_is_not_a_pattern() {
        let t = template("watch?v=:id");

        assert_eq!(
            t.captures("watch?v=dQw4w9WgXcQ").and_then(|c| c.get("id").map(String::from)),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert!(t.captures("watchv=dQw4w9WgXcQ").is_none());
        assert!(t.captures("watch?v=a/b").is_none());
    }

    #[test]
    fn capture_names_stop_at_non_alphanumerics() {
        let t = template("video:userId_:videoId");
        let caps = t.captures("video-12345_456239017").expect("should match");

        assert_eq!(caps.get("userId"), Some("-12345"));
        assert_eq!(caps.get("videoId"), Some("456239017"));
    }

    #[test]
    fn captures_reject_dots() {
        let t = template(":id");

        assert!(t.captures("abc.mp4").is_none());
        assert!(t.captures("abc-mp4").is_some());
    }

    #[test]
    fn rejects_broken_templates() {
        assert!(matches!(
            UrlTemplate::parse("video/:"),
            Err(TemplateError::EmptyName { position: 6, .. })
        ));
        assert!(matches!(
            UrlTemplate::parse(":id/:id"),
            Err(TemplateError::DuplicateName { .. })
        ));
    }
}
