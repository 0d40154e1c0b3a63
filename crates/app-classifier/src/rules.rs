use once_cell::sync::Lazy;
use url::Url;

use crate::{
    clean,
    decode::decode_uri_component,
    error::{ClassifyError, MalformedInput},
    host,
    site::Site,
    template::{Captures, TemplateError, UrlTemplate},
};

const SECURE_PREFIX: &str = "https://";
const DEFAULT_TOP_LEVEL_DOMAIN: &str = "com";
const MAX_HOST_LENGTH: usize = 20;

pub static DEFAULT_RULES: Lazy<SiteRules> =
    Lazy::new(|| SiteRules::new().expect("Built-in site templates should be valid"));

#[derive(Debug, Clone)]
pub struct SiteRule {
    site: Site,
    templates: Vec<UrlTemplate>,
    enabled: bool,
    top_level_domain: Option<String>,
}

impl SiteRule {
    /// The built-in rule for `site`
    pub fn new(site: Site) -> Result<Self, TemplateError> {
        let templates = site
            .templates()
            .iter()
            .map(|x| UrlTemplate::parse(x))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            site,
            templates,
            enabled: site.enabled_by_default(),
            top_level_domain: site.top_level_domain().map(String::from),
        })
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_top_level_domain<T>(mut self, top_level_domain: Option<T>) -> Self
    where
        T: Into<String>,
    {
        self.top_level_domain = top_level_domain.map(Into::into);
        self
    }

    #[must_use]
    pub const fn site(&self) -> Site {
        self.site
    }

    #[must_use]
    pub fn templates(&self) -> &[UrlTemplate] {
        &self.templates
    }

    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn top_level_domain(&self) -> &str {
        self.top_level_domain
            .as_deref()
            .unwrap_or(DEFAULT_TOP_LEVEL_DOMAIN)
    }

    /// Captures of the first template that matches `path`
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Captures> {
        self.templates.iter().find_map(|x| x.captures(path))
    }
}

/// One rule per [`Site`].
///
/// Built once and only read afterwards. Use [`SiteRules::global`] for the
/// built-in table, or build one with sites switched on or off.
#[derive(Debug, Clone)]
pub struct SiteRules {
    rules: Vec<SiteRule>,
}

impl SiteRules {
    pub fn new() -> Result<Self, TemplateError> {
        let rules = Site::ALL
            .into_iter()
            .map(SiteRule::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    #[must_use]
    #[inline]
    pub fn global() -> &'static Self {
        &DEFAULT_RULES
    }

    #[must_use]
    pub fn with_enabled(mut self, site: Site, enabled: bool) -> Self {
        self.rules = self
            .rules
            .into_iter()
            .map(|x| {
                if x.site == site {
                    x.with_enabled(enabled)
                } else {
                    x
                }
            })
            .collect();

        self
    }

    #[must_use]
    pub fn with_disabled<I>(self, sites: I) -> Self
    where
        I: IntoIterator<Item = Site>,
    {
        sites
            .into_iter()
            .fold(self, |rules, site| rules.with_enabled(site, false))
    }

    #[must_use]
    pub fn with_rule(mut self, rule: SiteRule) -> Self {
        match self.rules.iter_mut().find(|x| x.site == rule.site) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }

        self
    }

    #[must_use]
    pub fn rule(&self, site: Site) -> Option<&SiteRule> {
        self.rules.iter().find(|x| x.site == site)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteRule> {
        self.rules.iter()
    }

    /// Whether `raw` is likely to be accepted by the media service.
    ///
    /// Advisory only. Never fails, anything that goes wrong counts as `false`.
    #[must_use]
    pub fn classify(&self, raw: &str) -> bool {
        self.classify_site(raw).is_some()
    }

    #[must_use]
    pub fn classify_site(&self, raw: &str) -> Option<Site> {
        match self.check(raw) {
            Ok(site) => {
                app_logger::trace!(url = raw, %site, "URL is probably supported");
                Some(site)
            }
            Err(e) => {
                app_logger::debug!(url = raw, error = %e, "URL is probably not supported");
                None
            }
        }
    }

    /// The site `raw` belongs to, or the first reason it doesn't qualify
    pub fn check(&self, raw: &str) -> Result<Site, ClassifyError> {
        let decoded = decode_uri_component(raw).map_err(MalformedInput::from)?;
        let parsed = Url::parse(&decoded).map_err(MalformedInput::from)?;

        if !decoded.starts_with(SECURE_PREFIX) {
            return Err(ClassifyError::InsecureScheme);
        }

        let host_key = host::host_key(&parsed).unwrap_or_default();
        let host::Canonical { host, url } = host::canonicalize(host_key, &decoded);

        if host.is_empty() || host.len() >= MAX_HOST_LENGTH {
            return Err(ClassifyError::UnknownHost(host));
        }

        let site = match host.parse::<Site>() {
            Ok(site) => site,
            Err(_) => return Err(ClassifyError::UnknownHost(host)),
        };

        let rule = self
            .rule(site)
            .ok_or_else(|| ClassifyError::UnknownHost(host.clone()))?;

        if !rule.enabled() {
            return Err(ClassifyError::DisabledSite(site));
        }

        let cleaned = clean::clean_url(&url, site);
        let path = clean::path_of(&cleaned, rule.top_level_domain()).ok_or_else(|| {
            ClassifyError::MissingPath {
                url: cleaned.clone(),
                top_level_domain: rule.top_level_domain().to_string(),
            }
        })?;

        let captures = rule
            .match_path(&path)
            .ok_or(ClassifyError::NoTemplateMatch { site, path })?;

        if !site.accepts(&captures) {
            return Err(ClassifyError::ValidationFailed { site, captures });
        }

        Ok(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_every_site() {
        let rules = SiteRules::global();

        for site in Site::ALL {
            let rule = rules.rule(site).expect("every site should have a rule");
            assert_eq!(rule.templates().len(), site.templates().len());
            assert_eq!(rule.enabled(), site.enabled_by_default());
            assert_eq!(rule.top_level_domain(), "com");
        }
    }

    #[test]
    fn first_matching_template_wins() {
        let rule = SiteRule::new(Site::Tiktok).expect("rule should build");

        let caps = rule.match_path("someone/video/123").expect("should match");
        assert_eq!(caps.get("postId"), Some("123"));

        let caps = rule.match_path("ZMabcdef").expect("should match");
        assert_eq!(caps.get("id"), Some("ZMabcdef"));

        let caps = rule.match_path("t/ZMabcdef").expect("should match");
        assert_eq!(caps.get("id"), Some("ZMabcdef"));
    }

    #[test]
    fn reports_each_failure_stage() {
        let rules = SiteRules::global();

        assert!(matches!(
            rules.check("https://example.com/a%zz"),
            Err(ClassifyError::MalformedInput(MalformedInput::Decode(_)))
        ));
        assert!(matches!(
            rules.check("not a url"),
            Err(ClassifyError::MalformedInput(MalformedInput::Parse(_)))
        ));
        assert_eq!(
            rules.check("http://vimeo.com/76979871"),
            Err(ClassifyError::InsecureScheme)
        );
        assert_eq!(
            rules.check("https://example.com/video/123"),
            Err(ClassifyError::UnknownHost("example".to_string()))
        );
        assert_eq!(
            rules.check("https://www.douyin.com/video/7123456789012345678"),
            Err(ClassifyError::DisabledSite(Site::Douyin))
        );
        assert!(matches!(
            rules.check("https://vimeo.tv/76979871"),
            Err(ClassifyError::MissingPath { .. })
        ));
        assert!(matches!(
            rules.check("https://www.reddit.com/user/someone"),
            Err(ClassifyError::NoTemplateMatch {
                site: Site::Reddit,
                ..
            })
        ));
        assert!(matches!(
            rules.check("https://www.youtube.com/watch?v=short"),
            Err(ClassifyError::ValidationFailed {
                site: Site::Youtube,
                ..
            })
        ));
    }

    #[test]
    fn host_keys_must_be_short() {
        assert!(matches!(
            SiteRules::global().check("https://www.averyveryverylonghostname.com/x"),
            Err(ClassifyError::UnknownHost(_))
        ));
    }

    #[test]
    fn switching_a_site_leaves_the_rest() {
        let rules = SiteRules::new()
            .expect("rules should build")
            .with_enabled(Site::Douyin, true)
            .with_disabled([Site::Vimeo]);

        assert_eq!(
            rules.check("https://www.douyin.com/video/7123456789012345678"),
            Ok(Site::Douyin)
        );
        assert_eq!(
            rules.check("https://vimeo.com/76979871"),
            Err(ClassifyError::DisabledSite(Site::Vimeo))
        );
        assert_eq!(
            rules.check("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Ok(Site::Youtube)
        );
    }

    #[test]
    fn custom_top_level_domain() {
        let rule = SiteRule::new(Site::Bilibili)
            .expect("rule should build")
            .with_top_level_domain(Some("tv"));
        let rules = SiteRules::new().expect("rules should build").with_rule(rule);

        assert_eq!(
            rules.check("https://www.bilibili.tv/video/BV1xx411c7mD"),
            Ok(Site::Bilibili)
        );
        assert!(!rules.classify("https://www.bilibili.com/video/BV1xx411c7mD"));
    }
}
