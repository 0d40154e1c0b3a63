use std::fmt::Debug;

use app_classifier::{looks_like_url, ClassifyError, Site, SiteRules};
use app_config::Config;
use app_service::{RequestOptions, ServiceRequest};
use url::Url;

fn main() {
    app_logger::init();

    let config = Config::global();

    app_logger::debug!(config = ?*config, "Running with config");

    let rules = config.classifier.rules();
    let cli_config = config.cli();

    if cli_config.list_sites {
        print!("{}", site_table(&rules));
        return;
    }

    let entries = cli_config
        .all_entries()
        .map(|x| {
            if looks_like_url(x) {
                Ok(x)
            } else {
                Err(x)
            }
        })
        .collect::<Vec<_>>();

    if entries.is_empty() {
        app_logger::error!("No URLs given, see --help");
        std::process::exit(1);
    }

    let (urls, not_urls) = split_vec_err(entries);
    for x in not_urls {
        app_logger::warn!("{x:?} doesn't look like a URL, skipping");
    }

    let endpoint = if cli_config.print_request {
        match app_service::endpoint_url(&config.service.endpoint) {
            Ok(x) => Some(x),
            Err(e) => {
                app_logger::error!("Invalid service endpoint: {e}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    let options = config.service.request_options();

    for url in urls {
        let verdict = rules.check(url);
        println!("{}", describe_verdict(url, &verdict));

        if let Some(endpoint) = &endpoint {
            match request_for(url, endpoint, &options) {
                Ok(x) => println!("{x}"),
                Err(e) => app_logger::error!("Failed to build request for {url:?}: {e}"),
            }
        }
    }
}

fn describe_verdict(url: &str, verdict: &Result<Site, ClassifyError>) -> String {
    match verdict {
        Ok(site) => format!("{url}\tsupported ({site})"),
        Err(e) => {
            app_logger::debug!(url, error = %e, "Classified as unsupported");
            format!("{url}\tmay not be supported: {e}")
        }
    }
}

fn request_for(
    url: &str,
    endpoint: &Url,
    options: &RequestOptions,
) -> Result<String, serde_json::Error> {
    let body = ServiceRequest::for_url(url, options).to_json()?;

    Ok(format!("POST {endpoint}\n{body}"))
}

fn site_table(rules: &SiteRules) -> String {
    rules
        .iter()
        .map(|rule| {
            let site = rule.site();
            let templates = rule
                .templates()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" | ");

            let mut audio = site.audio_formats().join(", ");
            if let Some(best) = site.best_audio() {
                if !audio.is_empty() {
                    audio.push_str(", ");
                }
                audio.push_str("best: ");
                audio.push_str(best);
            }

            format!(
                "{key}\t{state}\t.{tld}\t{templates}\t{description}{audio}\n",
                key = site.key(),
                state = if rule.enabled() { "enabled" } else { "disabled" },
                tld = rule.top_level_domain(),
                description = site.description(),
                audio = if audio.is_empty() {
                    String::new()
                } else {
                    format!(" (audio {audio})")
                },
            )
        })
        .collect()
}

fn split_vec_err<T: Debug, E: Debug>(v: Vec<Result<T, E>>) -> (Vec<T>, Vec<E>) {
    let (ok, err) = v.into_iter().partition::<Vec<_>, _>(Result::is_ok);
    (
        ok.into_iter().filter_map(Result::ok).collect(),
        err.into_iter().filter_map(Result::err).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_lines() {
        let rules = SiteRules::global();

        assert_eq!(
            describe_verdict(
                "https://youtu.be/dQw4w9WgXcQ",
                &rules.check("https://youtu.be/dQw4w9WgXcQ")
            ),
            "https://youtu.be/dQw4w9WgXcQ\tsupported (youtube)"
        );
        assert_eq!(
            describe_verdict(
                "https://example.com/video/123",
                &rules.check("https://example.com/video/123")
            ),
            "https://example.com/video/123\tmay not be supported: No site is known for host \"example\""
        );
    }

    #[test]
    fn request_lines() {
        let endpoint = app_service::endpoint_url("https://co.example.net").expect("valid endpoint");
        let out = request_for("https://vimeo.com/76979871", &endpoint, &RequestOptions::default())
            .expect("should serialize");

        assert_eq!(
            out,
            "POST https://co.example.net/api/json\n\
             {\"url\":\"https%3A%2F%2Fvimeo.com%2F76979871\",\"isAudioOnly\":false,\"isNoTTWatermark\":true,\"dubLang\":false}"
        );
    }

    #[test]
    fn site_table_lists_every_site() {
        let table = site_table(SiteRules::global());

        assert_eq!(table.lines().count(), Site::ALL.len());
        assert!(table.contains("douyin\tdisabled"));
        assert!(table.contains("youtube\tenabled\t.com\twatch?v=:id\t"));
        assert!(table.contains("(audio best, m4a, mp3)"));
        assert!(table.contains("(audio best: opus)"));
    }

    #[test]
    fn splits_results() {
        let (ok, err) = split_vec_err(vec![Ok(1), Err("a"), Ok(2)]);

        assert_eq!(ok, [1, 2]);
        assert_eq!(err, ["a"]);
    }
}
