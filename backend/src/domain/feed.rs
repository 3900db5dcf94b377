//! Feed queries: ordering, search, and tag statistics.
//!
//! The helpers here define the feed's semantics once. The in-memory adapter
//! applies them directly; the SQL adapter mirrors them in its query.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use super::Recipe;

/// Maximum search term length in characters.
pub const SEARCH_TERM_MAX: usize = 100;
/// Number of tags reported alongside the feed.
pub const POPULAR_TAG_LIMIT: usize = 20;

/// Validation errors for feed parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedValidationError {
    /// The sort option is unknown.
    #[error("sort option must be one of: popular, recent")]
    UnknownSort,
    /// The search term exceeds [`SEARCH_TERM_MAX`].
    #[error("search query must be at most {max} characters")]
    SearchTooLong {
        /// The enforced maximum.
        max: usize,
    },
}

/// Feed ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Most liked first, then newest.
    #[default]
    Popular,
    /// Newest first.
    Recent,
}

impl SortOption {
    /// Wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Recent => "recent",
        }
    }

    /// Total order used by this option. Ties always fall back to the id so
    /// pages never overlap.
    pub fn compare(self, left: &Recipe, right: &Recipe) -> Ordering {
        let by_recency = right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| left.id.as_uuid().cmp(right.id.as_uuid()));
        match self {
            Self::Popular => right.like_count().cmp(&left.like_count()).then(by_recency),
            Self::Recent => by_recency,
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = FeedValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popular" => Ok(Self::Popular),
            "recent" => Ok(Self::Recent),
            _ => Err(FeedValidationError::UnknownSort),
        }
    }
}

/// Trimmed, non-empty search text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Parse optional user input. Blank input means "no search".
    ///
    /// # Examples
    /// ```
    /// use backend::domain::SearchTerm;
    ///
    /// assert!(SearchTerm::parse("   ").expect("blank is allowed").is_none());
    /// let term = SearchTerm::parse(" Basil ").expect("valid").expect("present");
    /// assert_eq!(term.as_str(), "Basil");
    /// ```
    pub fn parse(raw: &str) -> Result<Option<Self>, FeedValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > SEARCH_TERM_MAX {
            return Err(FeedValidationError::SearchTooLong {
                max: SEARCH_TERM_MAX,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Borrow the term.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the recipe's name, ingredients, dietary labels, or tags
    /// contain the term, ignoring case.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        let needle = self.0.to_lowercase();
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);
        hit(recipe.name.as_str())
            || recipe.ingredients.iter().any(|line| hit(line.name.as_str()))
            || recipe.dietary_preference.iter().any(|pref| hit(pref.label()))
            || recipe.tags.iter().any(|tag| hit(tag))
    }
}

/// One feed page request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    /// Page and size.
    pub page: PageRequest,
    /// Ordering.
    pub sort: SortOption,
    /// Optional filter.
    pub search: Option<SearchTerm>,
}

impl FeedQuery {
    /// Whether `recipe` passes the search filter.
    pub fn includes(&self, recipe: &Recipe) -> bool {
        self.search.as_ref().is_none_or(|term| term.matches(recipe))
    }
}

/// Continuation key carried inside the feed's opaque cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCursorKey {
    /// Page to fetch.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Ordering.
    pub sort: SortOption,
    /// Search text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl FeedCursorKey {
    /// Key for the page after `query`'s page.
    pub fn following(query: &FeedQuery) -> Self {
        let next = query.page.next();
        Self {
            page: next.page(),
            limit: next.limit(),
            sort: query.sort,
            query: query.search.as_ref().map(|term| term.as_str().to_owned()),
        }
    }
}

/// Tag frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    /// Tag text.
    pub tag: String,
    /// Number of recipes carrying the tag.
    pub count: u64,
}

/// Apply `query` to `recipes`: filter, order, and cut one page. Returns the
/// page and the number of matching recipes.
pub fn select_page<'a, I>(recipes: I, query: &FeedQuery) -> (Vec<Recipe>, u64)
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut matching: Vec<&Recipe> = recipes.into_iter().filter(|r| query.includes(r)).collect();
    matching.sort_by(|a, b| query.sort.compare(a, b));
    let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
    let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
    let page = matching
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();
    (page, total)
}

/// Most frequent tags across `recipes`, ties broken alphabetically.
pub fn count_tags<'a, I>(recipes: I, limit: usize) -> Vec<TagCount>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for recipe in recipes {
        for tag in &recipe.tags {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }
    let mut ranked: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_owned(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    ranked.truncate(limit);
    ranked
}
