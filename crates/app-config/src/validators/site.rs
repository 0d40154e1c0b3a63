use app_classifier::Site;

#[must_use]
pub fn value_parser_parse_site() -> impl clap::builder::TypedValueParser {
    move |s: &str| {
        s.trim().to_lowercase().parse::<Site>().map_err(|_| {
            let known = Site::ALL.map(Site::key).join(", ");

            format!("Unknown site {s:?}. Known sites: {known}")
        })
    }
}
