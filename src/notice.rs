//! User-visible notifications
//!
//! Every outcome a person needs to see (a rally was created, the wallet is
//! missing, a comment was empty) is reported as a [`Notice`]. Rendering it
//! as a toast, an alert or a terminal line is the host's job.

use serde::Serialize;

use crate::wallet::WalletError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    /// Something went wrong or was refused
    Destructive,
}

/// A short titled message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl From<&WalletError> for Notice {
    fn from(err: &WalletError) -> Self {
        match err {
            WalletError::ExtensionMissing => {
                Notice::error("Wallet not found", "Please install Keplr extension")
            }
            WalletError::ConnectInProgress => {
                Notice::error("Connecting", "A wallet connection is already in progress")
            }
            _ => Notice::error(
                "Connection failed",
                "Failed to connect wallet. Please try again.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_error_notices() {
        let notice = Notice::from(&WalletError::ExtensionMissing);
        assert!(notice.is_error());
        assert_eq!(notice.description, "Please install Keplr extension");

        let notice = Notice::from(&WalletError::Rejected("closed".into()));
        assert_eq!(
            notice.description,
            "Failed to connect wallet. Please try again."
        );
    }

    #[test]
    fn test_display() {
        let notice = Notice::success("Comment added", "Your comment has been added successfully");
        assert!(!notice.is_error());
        assert_eq!(
            notice.to_string(),
            "Comment added: Your comment has been added successfully"
        );
    }
}
