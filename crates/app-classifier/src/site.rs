use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::template::Captures;

/// Sites the media service knows how to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Bilibili,
    Reddit,
    Twitter,
    Vk,
    Youtube,
    Tumblr,
    Tiktok,
    Douyin,
    Vimeo,
    Soundcloud,
}

impl Site {
    pub const ALL: [Self; 10] = [
        Self::Bilibili,
        Self::Reddit,
        Self::Twitter,
        Self::Vk,
        Self::Youtube,
        Self::Tumblr,
        Self::Tiktok,
        Self::Douyin,
        Self::Vimeo,
        Self::Soundcloud,
    ];

    /// The key the site is looked up by.
    ///
    /// This is the second-to-last label of the host name, so `www.youtube.com`
    /// and `m.youtube.com` both end up as `youtube`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bilibili => "bilibili",
            Self::Reddit => "reddit",
            Self::Twitter => "twitter",
            Self::Vk => "vk",
            Self::Youtube => "youtube",
            Self::Tumblr => "tumblr",
            Self::Tiktok => "tiktok",
            Self::Douyin => "douyin",
            Self::Vimeo => "vimeo",
            Self::Soundcloud => "soundcloud",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Bilibili => "bilibili (.com only)",
            Self::Reddit => "reddit videos & gifs",
            Self::Twitter => "twitter posts & spaces & voice",
            Self::Vk => "vk video & clips",
            Self::Youtube => "youtube videos & shorts & music",
            Self::Tumblr => "tumblr posts",
            Self::Tiktok => "tiktok videos & photos & audio",
            Self::Douyin => "douyin videos & audio",
            Self::Vimeo => "vimeo videos",
            Self::Soundcloud => "soundcloud tracks",
        }
    }

    /// Path templates, tried in this order.
    ///
    /// Order matters where templates overlap, eg. tiktok's `:id` would
    /// otherwise shadow `t/:id`.
    #[must_use]
    pub const fn templates(self) -> &'static [&'static str] {
        match self {
            Self::Bilibili => &["video/:id"],
            Self::Reddit => &["r/:sub/comments/:id/:title"],
            Self::Twitter => &[
                ":user/status/:id",
                ":user/status/:id/video/:v",
                "i/spaces/:spaceId",
            ],
            Self::Vk => &[
                "video:userId_:videoId",
                "clip:userId_:videoId",
                "clips:duplicate?z=clip:userId_:videoId",
            ],
            Self::Youtube => &["watch?v=:id"],
            Self::Tumblr => &[
                "post/:id",
                "blog/view/:user/:id",
                ":user/:id",
                ":user/:id/:trackingId",
            ],
            Self::Tiktok => &[":user/video/:postId", ":id", "t/:id"],
            Self::Douyin => &["video/:postId", ":id"],
            Self::Vimeo => &[":id"],
            Self::Soundcloud => &[":author/:song/s-:accessKey", ":author/:song", ":shortLink"],
        }
    }

    #[must_use]
    pub const fn enabled_by_default(self) -> bool {
        !matches!(self, Self::Douyin)
    }

    /// Top-level domain that separates the host from the path, if not `com`
    #[must_use]
    pub const fn top_level_domain(self) -> Option<&'static str> {
        None
    }

    /// Audio format the service picks when asked for the "best" audio
    #[must_use]
    pub const fn best_audio(self) -> Option<&'static str> {
        match self {
            Self::Youtube => Some("opus"),
            Self::Vimeo => Some("mp3"),
            Self::Soundcloud => Some("none"),
            _ => None,
        }
    }

    #[must_use]
    pub const fn audio_formats(self) -> &'static [&'static str] {
        match self {
            Self::Tiktok => &["best", "m4a", "mp3"],
            _ => &[],
        }
    }

    /// Sanity check of the captured ids.
    ///
    /// The bounds follow the shapes of real ids on each site.
    #[must_use]
    pub fn accepts(self, captures: &Captures) -> bool {
        let len = |name: &str| captures.len_of(name);

        match self {
            Self::Twitter => len("id").is_some_and(|x| x < 20) || len("spaceId") == Some(13),

            Self::Vk => {
                len("userId").is_some_and(|x| x <= 10) && len("videoId").is_some_and(|x| x == 9)
            }

            Self::Bilibili => len("id").is_some_and(|x| x >= 12),

            Self::Youtube => len("id").is_some_and(|x| x >= 11),

            Self::Reddit => {
                len("sub").is_some_and(|x| x <= 22)
                    && len("id").is_some_and(|x| x <= 10)
                    && len("title").is_some_and(|x| x <= 96)
            }

            Self::Tiktok => {
                (captures.get("user").is_some() && len("postId").is_some_and(|x| x <= 21))
                    || len("id").is_some_and(|x| x <= 13)
            }

            Self::Douyin => {
                len("postId").is_some_and(|x| x <= 21) || len("id").is_some_and(|x| x <= 13)
            }

            // A `user` of any length is fine as long as the id fits
            Self::Tumblr => len("id").is_some_and(|x| x < 21),

            Self::Vimeo => len("id").is_some_and(|x| x <= 11),

            Self::Soundcloud => {
                let song = len("author").zip(len("song")).map(|(a, s)| a + s);

                song.is_some_and(|x| x <= 96) || len("shortLink").is_some_and(|x| x <= 32)
            }
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown site: {0:?}")]
pub struct UnknownSite(pub String);

impl FromStr for Site {
    type Err = UnknownSite;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.key() == s)
            .ok_or_else(|| UnknownSite(s.to_string()))
    }
}
