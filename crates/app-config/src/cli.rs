use clap::{ArgAction, Args, Parser};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common;

/// Check whether pages are likely to be supported by a media-processing
/// service and build the requests to send them there.
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[clap(disable_help_flag = true)]
pub struct CliArgs {
    /// Print help
    #[clap(action = ArgAction::Help, long)]
    help: Option<bool>,

    #[command(flatten)]
    pub service: common::ServiceConfig,

    #[command(flatten)]
    pub classifier: common::ClassifierConfig,

    #[command(flatten)]
    pub run: common::RunConfig,

    #[command(flatten)]
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args, Validate)]
#[clap(next_help_heading = "Cli options")]
pub struct CliConfig {
    /// URLs to check.
    ///
    /// Has the same behaviour as specifying the URL as a raw argument.
    #[clap(short = 'u', long = "url")]
    #[serde(skip)]
    pub urls: Vec<String>,

    /// Page URLs to check.
    ///
    /// Entries that don't look like URLs are reported and skipped.
    #[clap(id = "URL")]
    #[serde(skip)]
    pub entries: Vec<String>,

    /// Print the site table and exit
    #[clap(long)]
    pub list_sites: bool,

    /// Print the request that would be sent to the media service for each URL
    #[clap(long)]
    pub print_request: bool,
}
impl CliConfig {
    /// Every URL given, in the order it was given
    pub fn all_entries(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().chain(&self.entries).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use app_classifier::Site;

    use super::*;

    fn parse<const N: usize>(args: [&str; N]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("portal-cli").chain(args))
            .expect("arguments should parse")
    }

    #[test]
    fn collects_urls_from_flags_and_positionals() {
        let args = parse([
            "-u",
            "https://vimeo.com/76979871",
            "https://youtu.be/dQw4w9WgXcQ",
        ]);

        assert_eq!(
            args.cli.all_entries().collect::<Vec<_>>(),
            ["https://vimeo.com/76979871", "https://youtu.be/dQw4w9WgXcQ"]
        );
    }

    #[test]
    fn endpoint_loses_trailing_slash() {
        let args = parse(["--endpoint", "https://co.example.net/"]);

        assert_eq!(args.service.endpoint, "https://co.example.net");
    }

    #[test]
    fn rejects_unknown_sites() {
        let res = CliArgs::try_parse_from(["portal-cli", "--disable-site", "myspace"]);

        assert!(res.is_err());
    }

    #[test]
    fn site_overrides() {
        let args = parse(["--disable-site", "youtube,Vimeo", "--enable-site", "douyin"]);

        assert_eq!(args.classifier.disabled_sites, [Site::Youtube, Site::Vimeo]);

        let rules = args.classifier.rules();
        assert!(rules.rule(Site::Douyin).is_some_and(|x| x.enabled()));
        assert!(rules.rule(Site::Youtube).is_some_and(|x| !x.enabled()));
        assert!(rules.rule(Site::Reddit).is_some_and(|x| x.enabled()));
    }

    #[test]
    fn request_options_follow_flags() {
        let args = parse(["--audio-only", "--keep-tiktok-watermark"]);
        let options = args.service.request_options();

        assert!(options.audio_only);
        assert!(options.keep_tiktok_watermark);
        assert!(!options.mute_audio);
    }
}
