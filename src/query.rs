//! URL query parameters.
//!
//! Every function accepts either an absolute URL (`https://a.com/p?x=1#top`) or a
//! bare search string (`?x=1&y=2` or `x=1&y=2`). Values are percent-decoded on
//! read and form-encoded on write.

use url::form_urlencoded;
use url::Url;

use crate::error_handling::Result;

enum Target {
    Absolute(Url),
    Search { pairs: Vec<(String, String)>, prefixed: bool },
}

impl Target {
    fn parse(input: &str) -> Result<Self> {
        match Url::parse(input) {
            Ok(url) => Ok(Target::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let prefixed = input.starts_with('?');
                let search = input.strip_prefix('?').unwrap_or(input);
                let search = search.split_once('#').map_or(search, |(before, _)| before);
                Ok(Target::Search {
                    pairs: parse_pairs(search),
                    prefixed,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn pairs(&self) -> Vec<(String, String)> {
        match self {
            Target::Absolute(url) => url.query_pairs().into_owned().collect(),
            Target::Search { pairs, .. } => pairs.clone(),
        }
    }

    fn render(self, pairs: Vec<(String, String)>) -> String {
        match self {
            Target::Absolute(mut url) => {
                if pairs.is_empty() {
                    url.set_query(None);
                } else {
                    url.query_pairs_mut().clear().extend_pairs(pairs);
                }
                url.to_string()
            }
            Target::Search { prefixed, .. } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs)
                    .finish();
                if prefixed && !encoded.is_empty() {
                    format!("?{}", encoded)
                } else {
                    encoded
                }
            }
        }
    }
}

fn parse_pairs(search: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(search.as_bytes())
        .into_owned()
        .collect()
}

/// First value of `key`, or `None` when absent.
///
/// Unparseable absolute URLs are logged and treated as having no parameters.
///
/// ```
/// use jmni_until::query::query_param;
///
/// let url = "http://example.com?page=2&size=10";
/// assert_eq!(query_param(url, "page").as_deref(), Some("2"));
/// assert_eq!(query_param("?size=10", "size").as_deref(), Some("10"));
/// assert_eq!(query_param(url, "nonExistent"), None);
/// ```
pub fn query_param(url_or_search: &str, key: &str) -> Option<String> {
    query_params(url_or_search)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

/// All key/value pairs in order, duplicates included.
pub fn query_params(url_or_search: &str) -> Vec<(String, String)> {
    match Target::parse(url_or_search) {
        Ok(target) => target.pairs(),
        Err(e) => {
            log::warn!("cannot read query of {:?}: {}", url_or_search, e);
            Vec::new()
        }
    }
}

/// Sets `key` to `value`.
///
/// The first existing occurrence is replaced in place and any further ones are
/// removed; when `key` is absent it is appended. Other pairs keep their order.
///
/// # Errors
///
/// `UtilError::InvalidUrl` for a malformed absolute URL.
pub fn set_query_param(url_or_search: &str, key: &str, value: &str) -> Result<String> {
    let target = Target::parse(url_or_search)?;
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = Vec::new();

    for (k, v) in target.pairs() {
        if k != key {
            pairs.push((k, v));
        } else if !replaced {
            pairs.push((k, value.to_string()));
            replaced = true;
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }

    Ok(target.render(pairs))
}

/// Removes every occurrence of `key`.
///
/// # Errors
///
/// `UtilError::InvalidUrl` for a malformed absolute URL.
pub fn remove_query_param(url_or_search: &str, key: &str) -> Result<String> {
    let target = Target::parse(url_or_search)?;
    let pairs = target.pairs().into_iter().filter(|(k, _)| k != key).collect();
    Ok(target.render(pairs))
}
