//! Ordered candidate URLs for user search.
//!
//! The backend's user-search contract is unstable across deployments, so the
//! client probes a fixed list of endpoint shapes in order and stops at the
//! first usable result. Keeping the candidate list here, as plain data, keeps
//! the probing logic testable independently of the HTTP layer.

use url::Url;

/// Build the ordered candidate URLs for a search query.
///
/// The query is percent-encoded as a single path segment. An empty (or
/// all-whitespace) query selects the listing variants instead.
pub(crate) fn search_candidates(base: &Url, query: &str) -> Vec<Url> {
    let query = query.trim();

    if query.is_empty() {
        ["/api/user/", "/search/api/user/", "/users/"]
            .iter()
            .filter_map(|path| base.join(path).ok())
            .collect()
    } else {
        ["/api/user/", "/search/api/user/", "/users/search/"]
            .iter()
            .filter_map(|path| {
                let mut url = base.join(path).ok()?;
                url.path_segments_mut().ok()?.pop_if_empty().push(query);
                Some(url)
            })
            .collect()
    }
}
