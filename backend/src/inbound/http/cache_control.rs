//! Cache policy for `/api` responses.
//!
//! Every body is rendered for one viewer: `liked` and `owns` flags, profile
//! listings, and inbox state all differ per session. Shared caches must not
//! keep them and browsers revalidate before reuse.

use actix_web::http::header::{CacheControl, CacheDirective};

/// `Cache-Control: private, no-cache, must-revalidate`.
pub fn private_no_cache_header() -> CacheControl {
    CacheControl(vec![
        CacheDirective::Private,
        CacheDirective::NoCache,
        CacheDirective::MustRevalidate,
    ])
}
