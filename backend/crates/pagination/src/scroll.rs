//! Fetch-on-scroll pager.
//!
//! [`ScrollState`] tracks which page an infinite-scroll view should request
//! next. It never issues more than one request at a time, stops once the
//! server-reported page count is reached, and starts over from page one when
//! the active filter (sort order, search text, and so on) changes.
//!
//! Responses are matched to requests through [`FetchTicket`]s. A ticket
//! minted before a reset carries an old generation and is discarded when it
//! comes back, so a slow response for a previous search never lands in the
//! new result set.

use crate::page::{DEFAULT_LIMIT, PageRequest};

/// Proof that a fetch was started, returned by [`ScrollState::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    request: PageRequest,
}

impl FetchTicket {
    /// Reset counter value at the time the fetch started.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Page number to request.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.request.page()
    }

    /// Page size to request.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.request.limit()
    }

    /// The page request this ticket stands for.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }
}

/// Outcome of [`ScrollState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response belonged to the current request and was recorded.
    Applied {
        /// Whether further pages remain.
        has_more: bool,
    },
    /// The response belonged to a superseded request and was ignored; the
    /// caller should drop its items.
    Stale,
}

/// Incremental pager keyed by an active filter `F`.
///
/// # Examples
/// ```
/// use pagination::{Completion, ScrollState};
///
/// let mut state = ScrollState::new("popular", 12);
/// let ticket = state.begin_fetch().expect("first page");
/// assert_eq!(ticket.page(), 1);
/// assert!(state.begin_fetch().is_none(), "single flight");
///
/// assert_eq!(state.complete(ticket, 1), Completion::Applied { has_more: false });
/// assert!(state.is_exhausted());
/// ```
#[derive(Debug, Clone)]
pub struct ScrollState<F> {
    filter: F,
    limit: u32,
    next_page: u32,
    total_pages: Option<u32>,
    in_flight: Option<FetchTicket>,
    generation: u64,
}

impl<F: PartialEq> ScrollState<F> {
    /// Start at page one for `filter`.
    ///
    /// A `limit` outside the range accepted by [`PageRequest`] falls back to
    /// [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn new(filter: F, limit: u32) -> Self {
        let page_size = PageRequest::new(1, limit).map_or(DEFAULT_LIMIT, |req| req.limit());
        Self {
            filter,
            limit: page_size,
            next_page: 1,
            total_pages: None,
            in_flight: None,
            generation: 0,
        }
    }

    /// Active filter.
    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    /// Page that the next successful [`begin_fetch`](Self::begin_fetch)
    /// will request.
    #[must_use]
    pub const fn next_page(&self) -> u32 {
        self.next_page
    }

    /// Page count reported by the most recent applied response.
    #[must_use]
    pub const fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Number of resets performed so far.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether every page reported by the server has been loaded.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        match self.total_pages {
            Some(total) => self.next_page > total,
            None => false,
        }
    }

    /// Claim the next page, or `None` while a request is in flight or once
    /// the last page has been loaded.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.is_loading() || self.is_exhausted() {
            return None;
        }
        let request = PageRequest::new(self.next_page, self.limit).ok()?;
        let ticket = FetchTicket {
            generation: self.generation,
            request,
        };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Record a successful response carrying the server's `total_pages`.
    pub fn complete(&mut self, ticket: FetchTicket, total_pages: u32) -> Completion {
        if !self.owns(ticket) {
            return Completion::Stale;
        }
        self.in_flight = None;
        self.total_pages = Some(total_pages);
        self.next_page = ticket.page().saturating_add(1);
        Completion::Applied {
            has_more: !self.is_exhausted(),
        }
    }

    /// Release a failed request so the same page can be retried.
    ///
    /// Returns `false` when the ticket was stale and nothing changed.
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if !self.owns(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Switch to `filter`, restarting from page one if it differs from the
    /// active filter. Returns whether a reset happened.
    pub fn reset(&mut self, filter: F) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.next_page = 1;
        self.total_pages = None;
        self.in_flight = None;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    fn owns(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation && self.in_flight == Some(ticket)
    }
}
