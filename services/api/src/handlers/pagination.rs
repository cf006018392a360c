use axum::http::Uri;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use foodgram_domain::pagination::{Page, PageRequest};

use crate::error::FoodgramError;

/// Parse the raw query string into `T`; malformed input is a 400.
pub fn parse_query<T>(raw_query: Option<&str>) -> Result<T, FoodgramError>
where
    T: DeserializeOwned + Default,
{
    match raw_query {
        None | Some("") => Ok(T::default()),
        Some(raw) => {
            serde_qs::from_str(raw).map_err(|e| FoodgramError::validation("query", e.to_string()))
        }
    }
}

/// Page-number envelope: `{count, next, previous, results}`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// `next`/`previous` keep every query parameter of `uri` except `page`.
    pub fn new(page: Page<T>, request: PageRequest, public_url: &str, uri: &Uri) -> Self {
        let next = request
            .has_next(page.count)
            .then(|| page_link(public_url, uri, request.page + 1));
        let previous = request
            .has_previous()
            .then(|| page_link(public_url, uri, request.page - 1));
        Self {
            count: page.count,
            next: next.flatten(),
            previous: previous.flatten(),
            results: page.items,
        }
    }
}

/// Absolute link to `page` of the listing at `uri`. Page 1 carries no
/// `page` parameter.
fn page_link(public_url: &str, uri: &Uri, page: u32) -> Option<String> {
    let mut url = Url::parse(&format!("{public_url}{}", uri.path())).ok()?;
    let kept: Vec<(String, String)> =
        url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .filter(|(key, _)| key != "page")
            .collect();
    {
        let mut query = url.query_pairs_mut();
        query.clear().extend_pairs(kept);
        if page > 1 {
            query.append_pair("page", &page.to_string());
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Some(url.into())
}
