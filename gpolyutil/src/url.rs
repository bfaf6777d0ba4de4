use url::{ParseError, Url};

use crate::{Error, Result};

/// A URL broken into the pieces the sampler and fetcher care about.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitUrl {
    /// `scheme://authority`, or empty for a relative URL like `/path?a=x`
    pub host: String,
    pub path: String,
    /// Query parameters in their original order. If a key repeats, the first value wins.
    pub query: Vec<(String, String)>,
}

impl SplitUrl {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Re-joins the query as `k=v&k=v`, without escaping anything.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Splits `http://server.domain.org/path/to/resource?a=x&b=y` into
/// `("http://server.domain.org", "/path/to/resource", [("a", "x"), ("b", "y")])`, keeping only the
/// query parameters that `keep` accepts.
pub fn split_url<F: Fn(&str) -> bool>(raw: &str, keep: F) -> Result<SplitUrl> {
    let raw = raw.trim();
    let (url, relative) = match Url::parse(raw) {
        Ok(url) => (url, false),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://relative.invalid")
                .map_err(|err| Error::malformed(raw, err.to_string()))?;
            let url = base
                .join(raw)
                .map_err(|err| Error::malformed(raw, err.to_string()))?;
            (url, true)
        }
        Err(err) => {
            return Err(Error::malformed(raw, err.to_string()));
        }
    };

    let mut query: Vec<(String, String)> = Vec::new();
    for (key, value) in url.query_pairs() {
        if !keep(&key) || query.iter().any(|(k, _)| *k == key) {
            continue;
        }
        query.push((key.into_owned(), value.into_owned()));
    }

    Ok(SplitUrl {
        host: if relative {
            String::new()
        } else {
            url.origin().ascii_serialization()
        },
        path: url.path().to_string(),
        query,
    })
}
