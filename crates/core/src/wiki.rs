/// English-language edition used when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// Outcome of an upstream response, decided from the HTTP status alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamStatus {
    Success,
    NotFound,
    HttpError,
}

/// Convert a free-text subject into an article slug
///
/// Spaces become underscores, then everything outside the unreserved set is
/// percent-encoded. Path separators are kept literal so "AC/DC" stays a
/// single article path.
pub fn article_slug(subject: &str) -> String {
    urlencoding::encode(&subject.replace(' ', "_")).replace("%2F", "/")
}

/// Build the article URL for a subject on the given edition
pub fn article_url(base_url: &str, subject: &str) -> String {
    format!(
        "{}/wiki/{}",
        base_url.trim_end_matches('/'),
        article_slug(subject)
    )
}

/// Classify an upstream HTTP status code
pub fn classify_status(status: u16) -> UpstreamStatus {
    match status {
        200..=299 => UpstreamStatus::Success,
        404 => UpstreamStatus::NotFound,
        _ => UpstreamStatus::HttpError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_slug_replaces_spaces() {
        assert_eq!(article_slug("United Kingdom"), "United_Kingdom");
    }

    #[test]
    fn test_article_slug_percent_encodes() {
        assert_eq!(article_slug("Côte d'Ivoire"), "C%C3%B4te_d%27Ivoire");
        assert_eq!(article_slug("São Tomé"), "S%C3%A3o_Tom%C3%A9");
    }

    #[test]
    fn test_article_slug_keeps_slashes_and_unreserved() {
        assert_eq!(article_slug("AC/DC"), "AC/DC");
        assert_eq!(article_slug("a-b.c~d"), "a-b.c~d");
    }

    #[test]
    fn test_article_url_default_base() {
        assert_eq!(
            article_url(DEFAULT_BASE_URL, "France"),
            "https://en.wikipedia.org/wiki/France"
        );
    }

    #[test]
    fn test_article_url_trims_trailing_slash() {
        assert_eq!(
            article_url("http://127.0.0.1:8080/", "New Zealand"),
            "http://127.0.0.1:8080/wiki/New_Zealand"
        );
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status(200), UpstreamStatus::Success);
        assert_eq!(classify_status(204), UpstreamStatus::Success);
        assert_eq!(classify_status(404), UpstreamStatus::NotFound);
        assert_eq!(classify_status(403), UpstreamStatus::HttpError);
        assert_eq!(classify_status(500), UpstreamStatus::HttpError);
        assert_eq!(classify_status(503), UpstreamStatus::HttpError);
    }
}
