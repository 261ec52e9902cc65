use url::Url;

pub mod client;

pub use client::Client;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request rejected: {message}")]
    Rejected {
        message: String,
        errors: Vec<String>,
    },
    #[error("malformed attachment url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    _Http(#[from] reqwest::Error),
}

/// Client-side validation of attachment/document URLs, run before any
/// request leaves the process.
pub fn validate_urls(urls: &[String]) -> Result<()> {
    for url in urls {
        if let Err(e) = Url::parse(url) {
            return Err(Error::InvalidUrl {
                url: url.clone(),
                source: e,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        let urls = vec!["https://cdn.example.com/a.pdf".to_owned()];
        assert!(validate_urls(&urls).is_ok());
    }

    #[test]
    fn rejects_relative_paths() {
        let urls = vec![
            "https://cdn.example.com/a.pdf".to_owned(),
            "not a url".to_owned(),
        ];
        match validate_urls(&urls) {
            Err(Error::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected InvalidUrl, got {other:?}"),
        }
    }
}
