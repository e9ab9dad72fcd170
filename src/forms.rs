//! Form Submission
//!
//! The checks that run before anything reaches the store, and the
//! assembly of a complete [`Rally`] from create-form input. The store
//! itself validates nothing; rejecting bad input is this module's job.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::notice::Notice;
use crate::rally::{NewComment, Rally, RallyId, RallyStore, Token};
use crate::wallet::WalletSession;

/// Cover image used when the creator uploads none
pub const DEFAULT_RALLY_IMAGE: &str =
    "https://images.unsplash.com/photo-1620321023374-d1a68fbc720d?q=80&w=2797&auto=format&fit=crop";

/// Campaign length used when the form leaves it blank
pub const DEFAULT_DURATION_DAYS: i64 = 30;

/// Validation failures, reported before any mutation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The action needs a connected wallet
    #[error("Wallet not connected: please connect your wallet to {action}")]
    WalletNotConnected { action: &'static str },

    /// Comment text is blank
    #[error("Empty comment")]
    EmptyComment,
}

impl FormError {
    /// What to show the user
    pub fn notice(&self) -> Notice {
        match self {
            FormError::WalletNotConnected { action } => Notice::error(
                "Wallet not connected",
                format!("Please connect your wallet to {}", action),
            ),
            FormError::EmptyComment => Notice::error(
                "Empty comment",
                "Please enter a comment before submitting",
            ),
        }
    }
}

/// The comment box on a rally page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentForm {
    pub rally_id: RallyId,
    pub message: String,
}

impl CommentForm {
    pub fn new(rally_id: impl Into<RallyId>, message: impl Into<String>) -> Self {
        Self {
            rally_id: rally_id.into(),
            message: message.into(),
        }
    }

    /// Validate and post the comment as the connected wallet
    ///
    /// The message is trimmed before it is stored.
    pub fn submit(
        &self,
        session: &WalletSession,
        store: &mut RallyStore,
    ) -> Result<Notice, FormError> {
        let address = session
            .address()
            .ok_or(FormError::WalletNotConnected {
                action: "leave a comment",
            })?;

        let message = self.message.trim();
        if message.is_empty() {
            return Err(FormError::EmptyComment);
        }

        store.add_comment(&self.rally_id, NewComment::new(address, message));

        Ok(Notice::success(
            "Comment added",
            "Your comment has been added successfully",
        ))
    }
}

/// The create-rally form
#[derive(Debug, Clone, PartialEq)]
pub struct RallyForm {
    pub title: String,
    pub description: String,
    pub goal: f64,
    pub token: Token,
    /// Blank means [`DEFAULT_DURATION_DAYS`]
    pub duration_days: Option<i64>,
    /// Uploaded image as a URL or data URI; blank means [`DEFAULT_RALLY_IMAGE`]
    pub image: Option<String>,
}

impl RallyForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>, goal: f64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            goal,
            token: Token::default(),
            duration_days: None,
            image: None,
        }
    }

    /// Builder method: set the token
    pub fn token(mut self, token: Token) -> Self {
        self.token = token;
        self
    }

    /// Builder method: set the campaign length
    pub fn duration_days(mut self, days: i64) -> Self {
        self.duration_days = Some(days);
        self
    }

    /// Builder method: set the cover image
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Assemble the rally a creator at `now` would get
    pub fn build(&self, creator: impl Into<String>, now: DateTime<Utc>) -> Rally {
        let image = self
            .image
            .as_deref()
            .filter(|image| !image.is_empty())
            .unwrap_or(DEFAULT_RALLY_IMAGE);

        Rally::new(
            format!("rally-{}", now.timestamp_millis()),
            self.title.clone(),
            self.description.clone(),
            self.goal,
            self.token.clone(),
        )
        .image(image)
        .creator(creator)
        .days_left(self.duration_days.unwrap_or(DEFAULT_DURATION_DAYS))
        .created_at(now)
    }

    /// Validate, build and add the rally as the connected wallet
    pub fn submit(
        &self,
        session: &WalletSession,
        store: &mut RallyStore,
    ) -> Result<(RallyId, Notice), FormError> {
        let creator = session.address().ok_or(FormError::WalletNotConnected {
            action: "create a rally",
        })?;

        let rally = self.build(creator, Utc::now());
        let rally_id = rally.id.clone();
        store.add_rally(rally);

        Ok((
            rally_id,
            Notice::success(
                "Rally created!",
                "Your funding rally has been created successfully",
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{MemoryStore, SessionConfig, SimulatedWallet, WalletProvider};
    use std::sync::Arc;

    async fn connected_session(address: &str) -> WalletSession {
        let provider: Arc<dyn WalletProvider> = Arc::new(SimulatedWallet::new(address));
        let session = WalletSession::new(
            Some(provider),
            Arc::new(MemoryStore::new()),
            SessionConfig::default(),
        );
        session.connect().await.unwrap();
        session
    }

    fn disconnected_session() -> WalletSession {
        WalletSession::new(None, Arc::new(MemoryStore::new()), SessionConfig::default())
    }

    #[tokio::test]
    async fn test_comment_requires_wallet() {
        let session = disconnected_session();
        let mut store = RallyStore::new();

        let err = CommentForm::new("1", "Nice")
            .submit(&session, &mut store)
            .unwrap_err();
        assert_eq!(
            err,
            FormError::WalletNotConnected {
                action: "leave a comment"
            }
        );
        assert_eq!(
            err.notice().description,
            "Please connect your wallet to leave a comment"
        );
        assert_eq!(store.get("1").unwrap().comments.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_comment_rejected() {
        let session = connected_session("neutron1abc").await;
        let mut store = RallyStore::new();

        let err = CommentForm::new("1", "   \n")
            .submit(&session, &mut store)
            .unwrap_err();
        assert_eq!(err, FormError::EmptyComment);
        assert!(err.notice().is_error());
        assert_eq!(store.get("1").unwrap().comments.len(), 2);
    }

    #[tokio::test]
    async fn test_comment_posted_trimmed() {
        let session = connected_session("neutron1abc").await;
        let mut store = RallyStore::new();

        let notice = CommentForm::new("4", "  Great idea!  ")
            .submit(&session, &mut store)
            .unwrap();
        assert!(!notice.is_error());

        let comments = &store.get("4").unwrap().comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].message, "Great idea!");
        assert_eq!(comments[0].address, "neutron1abc");
    }

    #[test]
    fn test_build_defaults() {
        let now = Utc::now();
        let rally = RallyForm::new("Library", "Books for all", 2500.0).build("neutron1abc", now);

        assert_eq!(rally.id, format!("rally-{}", now.timestamp_millis()));
        assert_eq!(rally.image, DEFAULT_RALLY_IMAGE);
        assert_eq!(rally.days_left, DEFAULT_DURATION_DAYS);
        assert_eq!(rally.token, Token::Ntrn);
        assert_eq!(rally.raised, 0.0);
        assert_eq!(rally.creator, "neutron1abc");
        assert_eq!(rally.created_at, now);
        assert!(rally.comments.is_empty());
    }

    #[test]
    fn test_build_overrides() {
        let rally = RallyForm::new("Library", "Books", 2500.0)
            .token(Token::Usdc)
            .duration_days(7)
            .image("data:image/png;base64,AAAA")
            .build("neutron1abc", Utc::now());

        assert_eq!(rally.token, Token::Usdc);
        assert_eq!(rally.days_left, 7);
        assert_eq!(rally.image, "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_create_rally() {
        let session = connected_session("neutron1abc").await;
        let mut store = RallyStore::new();

        let (rally_id, notice) = RallyForm::new("Library", "Books", 2500.0)
            .submit(&session, &mut store)
            .unwrap();

        assert_eq!(notice.title, "Rally created!");
        assert_eq!(store.len(), 7);
        assert_eq!(store.all()[0].id, rally_id);
        assert_eq!(store.all()[0].creator, "neutron1abc");
    }

    #[test]
    fn test_create_rally_requires_wallet() {
        let session = disconnected_session();
        let mut store = RallyStore::new();

        let err = RallyForm::new("Library", "Books", 2500.0)
            .submit(&session, &mut store)
            .unwrap_err();
        assert_eq!(
            err.notice().description,
            "Please connect your wallet to create a rally"
        );
        assert_eq!(store.len(), 6);
    }
}
