use url::Url;

const SOUNDCLOUD_SHORT_LINK: &str = "https://soundcloud.app.goo.gl/";

/// The second-to-last label of the URL's host name.
///
/// `www.youtube.com` gives `youtube`. Hosts under a multi-label public suffix
/// (`example.co.uk`) come out as the suffix's first label (`co`) and won't
/// match any site.
#[must_use]
pub fn host_key(url: &Url) -> Option<&str> {
    let mut labels = url.host_str()?.rsplit('.');
    labels.next()?;
    labels.next()
}

/// A host key and URL after short links and alternate domains were resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub host: String,
    pub url: String,
}

/// Rewrite short-link hosts into the form of the site they point to.
#[must_use]
pub fn canonicalize(host: &str, url: &str) -> Canonical {
    match host {
        "youtu" => {
            let id = url
                .replacen("youtu.be/", "", 1)
                .replacen("https://", "", 1);

            Canonical {
                host: "youtube".to_string(),
                url: format!("https://youtube.com/watch?v={id}"),
            }
        }

        "goo" => match url.strip_prefix(SOUNDCLOUD_SHORT_LINK) {
            Some(rest) => Canonical {
                host: "soundcloud".to_string(),
                url: format!(
                    "https://soundcloud.com/{}",
                    rest.split('/').next().unwrap_or_default()
                ),
            },
            None => unchanged(host, url),
        },

        "tumblr" if !url.contains("blog/view") => Canonical {
            host: host.to_string(),
            url: drop_tumblr_segment(url),
        },

        _ => unchanged(host, url),
    }
}

fn unchanged(host: &str, url: &str) -> Canonical {
    Canonical {
        host: host.to_string(),
        url: url.to_string(),
    }
}

/// Blank out the slug in `https://<blog>.tumblr.com/post/<id>/<slug>`.
///
/// Only that one shape is handled, other URLs just lose a trailing slash.
fn drop_tumblr_segment(url: &str) -> String {
    let url = url.strip_suffix('/').unwrap_or(url);
    let mut segments = url.split('/').collect::<Vec<_>>();

    if let Some(slug) = segments.get_mut(5) {
        *slug = "";
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(url: &str) -> Option<String> {
        let parsed = Url::parse(url).expect("test url should parse");
        host_key(&parsed).map(String::from)
    }

    #[test]
    fn takes_second_to_last_label() {
        assert_eq!(key("https://www.youtube.com/watch").as_deref(), Some("youtube"));
        assert_eq!(key("https://m.tiktok.com/").as_deref(), Some("tiktok"));
        assert_eq!(key("https://vimeo.com/1").as_deref(), Some("vimeo"));
        assert_eq!(key("https://localhost/").as_deref(), None);
    }

    #[test]
    fn keeps_public_suffix_quirk() {
        assert_eq!(key("https://www.youtube.co.uk/watch").as_deref(), Some("co"));
    }

    #[test]
    fn resolves_youtube_short_links() {
        let c = canonicalize("youtu", "https://youtu.be/dQw4w9WgXcQ");

        assert_eq!(c.host, "youtube");
        assert_eq!(c.url, "https://youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn resolves_soundcloud_short_links() {
        let c = canonicalize("goo", "https://soundcloud.app.goo.gl/xyz/extra");

        assert_eq!(c.host, "soundcloud");
        assert_eq!(c.url, "https://soundcloud.com/xyz");
    }

    #[test]
    fn other_goo_links_stay() {
        let c = canonicalize("goo", "https://maps.app.goo.gl/abc");

        assert_eq!(c.host, "goo");
        assert_eq!(c.url, "https://maps.app.goo.gl/abc");
    }

    #[test]
    fn drops_tumblr_slug() {
        let c = canonicalize("tumblr", "https://someblog.tumblr.com/post/123456/some-title/");

        assert_eq!(c.url, "https://someblog.tumblr.com/post/123456/");
    }

    #[test]
    fn short_tumblr_urls_only_lose_trailing_slash() {
        let c = canonicalize("tumblr", "https://someblog.tumblr.com/post/");

        assert_eq!(c.url, "https://someblog.tumblr.com/post");
    }

    #[test]
    fn tumblr_dashboard_urls_stay() {
        let url = "https://www.tumblr.com/blog/view/someblog/123456";

        assert_eq!(canonicalize("tumblr", url).url, url);
    }
}
