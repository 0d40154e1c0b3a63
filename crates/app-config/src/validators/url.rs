use std::borrow::Cow;

use url::Url;
use validator::ValidationError;

pub fn validate_is_absolute_url<'a, T>(url: T) -> Result<(), ValidationError>
where
    T: Into<Cow<'a, str>>,
{
    let parsed =
        Url::parse(url.into().as_ref()).map_err(|_| ValidationError::new("Invalid URL"))?;

    if parsed.cannot_be_a_base() {
        return Err(ValidationError::new("URL must be absolute"));
    }

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::new("URL must be http or https"));
    }

    Ok(())
}

/// Parse an absolute URL, handing it on without a trailing slash
#[must_use]
pub fn value_parser_parse_absolute_url() -> impl clap::builder::TypedValueParser {
    move |s: &str| {
        let parsed = match Url::parse(s) {
            Ok(parsed) => parsed,
            Err(e) => return Err(format!("URL must be absolute: {e}")),
        };

        if parsed.cannot_be_a_base() {
            return Err("URL must be absolute".to_string());
        }

        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_endpoints() {
        assert!(validate_is_absolute_url("https://co.example.net").is_ok());
        assert!(validate_is_absolute_url("http://localhost:9000/").is_ok());
    }

    #[test]
    fn rejects_other_endpoints() {
        assert!(validate_is_absolute_url("co.example.net").is_err());
        assert!(validate_is_absolute_url("mailto:someone@example.net").is_err());
        assert!(validate_is_absolute_url("ftp://example.net").is_err());
    }
}
