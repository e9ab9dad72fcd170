//! Rallies
//!
//! The rally store and everything derived from it:
//!
//! - **types**: `Rally`, `Comment`, `NewComment`, `Token`
//! - **store**: `RallyStore`, the single owner of all rallies and comments
//! - **seed**: Sample rallies a new store starts with
//! - **view**: Search, sort, pagination and display helpers
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use padi::rally::{ExploreQuery, NewComment, RallyStore, SortOrder};
//!
//! let mut store = RallyStore::new();
//! store.add_comment("3", NewComment::new("neutron1xyz", "Happy to help"));
//!
//! let rallies = store.all();
//! let page = ExploreQuery::default()
//!     .sort(SortOrder::MostFunded)
//!     .apply(&rallies);
//!
//! assert_eq!(page.rallies[0].id, "3");
//! assert_eq!(page.rallies[0].percent_complete(), 91);
//! ```

pub mod error;
pub mod seed;
pub mod store;
pub mod types;
pub mod view;

pub use error::RallyError;
pub use seed::sample_rallies;
pub use store::{RallyStore, StoreEvent};
pub use types::{Comment, CommentId, NewComment, Rally, RallyId, Token};
pub use view::{
    featured, format_relative, initials, percent_complete, ExplorePage, ExploreQuery, SortOrder,
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_STEP, FEATURED_COUNT,
};
