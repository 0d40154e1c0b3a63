use app_classifier::{Site, SiteRules};
use app_service::RequestOptions;
use clap::{Args, CommandFactory, ValueEnum, ValueHint};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    cli::CliArgs,
    validators::{
        site::value_parser_parse_site,
        url::{validate_is_absolute_url, value_parser_parse_absolute_url},
    },
    APPLICATION_NAME,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args, Validate)]
#[clap(next_help_heading = Some("Media service"))]
pub struct ServiceConfig {
    /// Base URL of the media service instance to send pages to.
    ///
    /// Requests go to `<endpoint>/api/json`.
    #[arg(long, default_value = "https://localhost:9000", env = "MEDIA_PORTAL_ENDPOINT", value_hint = ValueHint::Url, value_parser = value_parser_parse_absolute_url())]
    #[validate(custom(function = "validate_is_absolute_url"))]
    pub endpoint: String,

    /// Only ask for the audio track
    #[arg(long, env = "MEDIA_PORTAL_AUDIO_ONLY")]
    pub audio_only: bool,

    /// Keep the watermark on TikTok videos
    #[arg(long, env = "MEDIA_PORTAL_KEEP_TIKTOK_WATERMARK")]
    pub keep_tiktok_watermark: bool,

    /// Ask for the original sound of TikTok videos instead of the clip
    #[arg(long)]
    pub tiktok_full_audio: bool,

    /// Ask for videos without sound
    #[arg(long)]
    pub mute_audio: bool,
}
impl ServiceConfig {
    #[must_use]
    pub const fn request_options(&self) -> RequestOptions {
        RequestOptions {
            audio_only: self.audio_only,
            keep_tiktok_watermark: self.keep_tiktok_watermark,
            tiktok_full_audio: self.tiktok_full_audio,
            mute_audio: self.mute_audio,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Args, Validate)]
#[clap(next_help_heading = Some("Site rules"))]
pub struct ClassifierConfig {
    /// Treat URLs of this site as unsupported.
    ///
    /// Can be given multiple times or as a comma separated list.
    #[arg(long = "disable-site", value_name = "SITE", env = "MEDIA_PORTAL_DISABLED_SITES", value_delimiter = ',', value_parser = value_parser_parse_site())]
    pub disabled_sites: Vec<Site>,

    /// Check URLs of this site even if it is off by default.
    ///
    /// Can be given multiple times or as a comma separated list.
    #[arg(long = "enable-site", value_name = "SITE", env = "MEDIA_PORTAL_ENABLED_SITES", value_delimiter = ',', value_parser = value_parser_parse_site())]
    pub enabled_sites: Vec<Site>,
}
impl ClassifierConfig {
    /// The built-in site table with this config's overrides applied.
    ///
    /// Disabling wins over enabling.
    #[must_use]
    pub fn rules(&self) -> SiteRules {
        let rules = self
            .enabled_sites
            .iter()
            .fold(SiteRules::global().clone(), |rules, site| {
                rules.with_enabled(*site, true)
            });

        rules.with_disabled(self.disabled_sites.iter().copied())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ValueEnum)]
pub enum DumpConfigType {
    Json,
    Toml,
}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Args, Validate)]
#[allow(clippy::option_option)]
#[clap(next_help_heading = Some("Run options"))]
pub struct RunConfig {
    /// Dump the config to stdout
    #[arg(long, value_enum, default_value = None)]
    pub dump_config: Option<Option<DumpConfigType>>,

    /// Dump shell completions to stdout
    #[arg(long, default_value = None, value_name = "SHELL", value_parser = hacky_dump_completions())]
    #[serde(skip)]
    pub dump_completions: Option<Shell>,
}

#[must_use]
pub fn hacky_dump_completions() -> impl clap::builder::TypedValueParser {
    move |s: &str| {
        let parsed = Shell::from_str(s, true);

        if let Ok(shell) = &parsed {
            clap_complete::generate(
                *shell,
                &mut CliArgs::command(),
                APPLICATION_NAME,
                &mut std::io::stdout(),
            );
            std::process::exit(0);
        }

        parsed
            .map(|_| ())
            .map_err(|_| ValidationError::new("Invalid shell"))
    }
}
