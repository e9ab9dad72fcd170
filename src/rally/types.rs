//! Core data types for rallies and their comments
//!
//! This module defines the records held by the [`RallyStore`](super::RallyStore):
//! - `Rally`: A funding campaign with its goal and embedded comments
//! - `Comment`: A note attached to a rally by a wallet address
//! - `NewComment`: The caller-supplied part of a comment
//! - `Token`: The currency symbol a rally is funded in

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// Opaque rally identifier
pub type RallyId = String;

/// Opaque comment identifier
pub type CommentId = String;

/// A funding campaign
///
/// Every field except `comments` is fixed at creation. `raised <= goal` is
/// expected but never checked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rally {
    pub id: RallyId,
    pub title: String,
    pub description: String,
    /// URL or data URI of the cover image
    pub image: String,
    pub goal: f64,
    pub raised: f64,
    /// Address of the creating wallet
    pub creator: String,
    pub days_left: i64,
    pub token: Token,
    pub created_at: DateTime<Utc>,
    /// Newest first
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Rally {
    /// Create a rally with nothing raised and no comments
    pub fn new(
        id: impl Into<RallyId>,
        title: impl Into<String>,
        description: impl Into<String>,
        goal: f64,
        token: Token,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            image: String::new(),
            goal,
            raised: 0.0,
            creator: String::new(),
            days_left: 0,
            token,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }

    /// Builder method: set the cover image
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Builder method: set the creator address
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Builder method: set the remaining days
    pub fn days_left(mut self, days: i64) -> Self {
        self.days_left = days;
        self
    }

    /// Builder method: set the amount raised
    pub fn raised(mut self, raised: f64) -> Self {
        self.raised = raised;
        self
    }

    /// Builder method: set the creation time
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builder method: append a comment (callers keep newest-first order)
    pub fn comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    /// Funded share of the goal as a whole percentage
    pub fn percent_complete(&self) -> i64 {
        super::view::percent_complete(self.raised, self.goal)
    }

    /// Funded share of the goal as a ratio (0.0 when the goal is not positive)
    pub fn funded_ratio(&self) -> f64 {
        if self.goal > 0.0 {
            self.raised / self.goal
        } else {
            0.0
        }
    }

    /// Case-insensitive substring match over title and description
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

/// A note attached to a rally
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    /// Owning rally (relation only)
    pub rally_id: RallyId,
    pub address: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a comment with a fixed id and timestamp (sample data, imports)
    pub fn with_timestamp(
        id: impl Into<CommentId>,
        rally_id: impl Into<RallyId>,
        data: NewComment,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            rally_id: rally_id.into(),
            address: data.address,
            message: data.message,
            created_at,
        }
    }
}

/// Caller-supplied comment fields; the store fills in id, rally id and time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub address: String,
    pub message: String,
}

impl NewComment {
    pub fn new(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            message: message.into(),
        }
    }
}

/// Currency symbol a rally is funded in
///
/// Unknown symbols are kept verbatim in `Other` so that nothing upstream has
/// to reject them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Token {
    /// Neutron native token
    #[default]
    Ntrn,
    /// Testnet ATOM
    TAtom,
    Usdc,
    Other(String),
}

impl Token {
    /// Tokens a wallet session tracks balances for
    pub fn supported() -> &'static [Token] {
        &[Token::Ntrn, Token::TAtom, Token::Usdc]
    }

    /// Display symbol
    pub fn symbol(&self) -> &str {
        match self {
            Token::Ntrn => "NTRN",
            Token::TAtom => "tATOM",
            Token::Usdc => "USDC",
            Token::Other(symbol) => symbol,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Token::Other(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for Token {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NTRN" => Token::Ntrn,
            "tATOM" => Token::TAtom,
            "USDC" => Token::Usdc,
            other => Token::Other(other.to_string()),
        })
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(token) => token,
            Err(never) => match never {},
        }
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.symbol().to_string()
    }
}
