//! Pagination primitives shared by the recipe backend and its clients.
//!
//! - [`PageRequest`] validates the `page`/`limit` pair supplied by callers.
//! - [`Page`] is the envelope returned for one page of results.
//! - [`Cursor`] wraps any serialisable key in an opaque, URL-safe token.
//! - [`ScrollState`] drives incremental, fetch-on-scroll loading: one request
//!   in flight at a time, bounded by the server-reported page count, reset
//!   whenever the active filter changes.

mod cursor;
mod page;
mod scroll;

pub use cursor::{Cursor, CursorError};
pub use page::{
    DEFAULT_LIMIT, MAX_LIMIT, Page, PageRequest, PageRequestError, total_pages,
};
pub use scroll::{Completion, FetchTicket, ScrollState};
