//! Rally Store
//!
//! Single owner of the rally collection and every comment attached to it.
//!
//! Reads hand out an `Arc` snapshot of the list; writes go through
//! `Arc::make_mut`, so a snapshot taken before a mutation never observes it.
//! Every successful mutation is announced on a tokio broadcast channel so
//! that views can re-render without polling.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::seed::sample_rallies;
use super::types::{Comment, CommentId, NewComment, Rally, RallyId};

/// Capacity of the change notification channel
const EVENT_CAPACITY: usize = 64;

/// Change notification emitted after a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A rally was prepended to the list
    RallyAdded { rally_id: RallyId },
    /// A comment was prepended to a rally
    CommentAdded {
        rally_id: RallyId,
        comment_id: CommentId,
    },
}

/// In-memory rally collection, newest first
pub struct RallyStore {
    rallies: Arc<Vec<Rally>>,
    events: broadcast::Sender<StoreEvent>,
}

impl RallyStore {
    /// Create a store seeded with the sample rallies
    pub fn new() -> Self {
        Self::with_rallies(sample_rallies())
    }

    /// Create a store with no rallies
    pub fn empty() -> Self {
        Self::with_rallies(Vec::new())
    }

    /// Create a store holding the given rallies in the given order
    pub fn with_rallies(rallies: Vec<Rally>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            rallies: Arc::new(rallies),
            events,
        }
    }

    /// Snapshot of every rally with its comments
    pub fn all(&self) -> Arc<Vec<Rally>> {
        Arc::clone(&self.rallies)
    }

    /// Look up a single rally
    pub fn get(&self, rally_id: &str) -> Option<&Rally> {
        self.rallies.iter().find(|r| r.id == rally_id)
    }

    pub fn len(&self) -> usize {
        self.rallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rallies.is_empty()
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Prepend a rally
    ///
    /// The rally is stored as given: ids are not checked for duplicates and
    /// goals or tokens are not validated.
    pub fn add_rally(&mut self, rally: Rally) {
        let rally_id = rally.id.clone();
        tracing::info!(rally_id = %rally_id, title = %rally.title, "Rally added");

        Arc::make_mut(&mut self.rallies).insert(0, rally);
        self.publish(StoreEvent::RallyAdded { rally_id });
    }

    /// Prepend a comment to every rally with the given id
    ///
    /// Ids are not unique, so each matching rally gets its own comment with
    /// its own id and its own event. Returns the comment stored on the first
    /// (newest) match, or `None` when no rally has that id. The miss is not an
    /// error: the store is left untouched and no event fires.
    pub fn add_comment(&mut self, rally_id: &str, data: NewComment) -> Option<Comment> {
        if !self.rallies.iter().any(|r| r.id == rally_id) {
            tracing::debug!(rally_id = %rally_id, "Comment target not found, ignoring");
            return None;
        }

        let mut added = Vec::new();
        for rally in Arc::make_mut(&mut self.rallies)
            .iter_mut()
            .filter(|r| r.id == rally_id)
        {
            let comment = Comment {
                id: generate_comment_id(),
                rally_id: rally_id.to_string(),
                address: data.address.clone(),
                message: data.message.clone(),
                created_at: Utc::now(),
            };
            rally.comments.insert(0, comment.clone());
            added.push(comment);
        }

        for comment in &added {
            tracing::debug!(
                rally_id = %rally_id,
                comment_id = %comment.id,
                "Comment added"
            );
            self.publish(StoreEvent::CommentAdded {
                rally_id: rally_id.to_string(),
                comment_id: comment.id.clone(),
            });
        }

        added.into_iter().next()
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is the normal case for headless use
        let _ = self.events.send(event);
    }
}

impl Default for RallyStore {
    fn default() -> Self {
        Self::new()
    }
}

/// `comment-<unix millis>-<7 char random suffix>`
fn generate_comment_id() -> CommentId {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("comment-{}-{}", Utc::now().timestamp_millis(), &suffix[..7])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rally::types::Token;

    fn test_rally(id: &str) -> Rally {
        Rally::new(id, "Test Rally", "A rally for tests", 1000.0, Token::Usdc)
            .creator("neutron1test...")
            .days_left(30)
    }

    #[test]
    fn test_seeded_store() {
        let store = RallyStore::new();
        assert_eq!(store.len(), 6);
        assert_eq!(store.all()[0].id, "1");
        assert!(RallyStore::empty().is_empty());
    }

    #[test]
    fn test_add_rally_prepends() {
        let mut store = RallyStore::new();
        let before = store.len();

        let rally = test_rally("rally-1");
        store.add_rally(rally.clone());

        let all = store.all();
        assert_eq!(all.len(), before + 1);
        assert_eq!(all[0], rally);
    }

    #[test]
    fn test_add_rally_accepts_anything() {
        let mut store = RallyStore::empty();
        store.add_rally(Rally::new("dup", "a", "", -5.0, Token::Other("???".into())));
        store.add_rally(Rally::new("dup", "b", "", 0.0, Token::Ntrn));

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].title, "b");
        // Lookup finds the newest of the duplicates
        assert_eq!(store.get("dup").unwrap().title, "b");
    }

    #[test]
    fn test_add_comment_prepends() {
        let mut store = RallyStore::new();
        let before = store.get("1").unwrap().comments.len();

        let comment = store
            .add_comment("1", NewComment::new("neutron1xyz", "Count me in"))
            .unwrap();

        let rally = store.get("1").unwrap();
        assert_eq!(rally.comments.len(), before + 1);
        assert_eq!(rally.comments[0], comment);
        assert_eq!(comment.address, "neutron1xyz");
        assert_eq!(comment.message, "Count me in");
        assert_eq!(comment.rally_id, "1");
    }

    #[test]
    fn test_add_comment_missing_rally_is_noop() {
        let mut store = RallyStore::new();
        let before: Vec<usize> = store.all().iter().map(|r| r.comments.len()).collect();

        let result = store.add_comment("nope", NewComment::new("neutron1xyz", "hello"));
        assert!(result.is_none());

        let after: Vec<usize> = store.all().iter().map(|r| r.comments.len()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_add_comment_reaches_every_duplicate() {
        let mut store = RallyStore::empty();
        store.add_rally(test_rally("dup"));
        store.add_rally(test_rally("other"));
        store.add_rally(test_rally("dup"));
        let mut rx = store.subscribe();

        let comment = store
            .add_comment("dup", NewComment::new("neutron1xyz", "both"))
            .unwrap();

        let counts: Vec<usize> = store.all().iter().map(|r| r.comments.len()).collect();
        assert_eq!(counts, vec![1, 0, 1]);

        let all = store.all();
        assert_eq!(all[0].comments[0], comment);
        assert_eq!(all[2].comments[0].message, "both");
        assert_ne!(all[0].comments[0].id, all[2].comments[0].id);

        // One event per rally that received a comment
        assert!(matches!(rx.try_recv(), Ok(StoreEvent::CommentAdded { .. })));
        assert!(matches!(rx.try_recv(), Ok(StoreEvent::CommentAdded { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_comment_ids_unique() {
        let mut store = RallyStore::new();
        let a = store.add_comment("2", NewComment::new("a", "one")).unwrap();
        let b = store.add_comment("2", NewComment::new("b", "two")).unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("comment-"));
        let suffix = a.id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), 7);
    }

    #[test]
    fn test_snapshot_is_copy_on_write() {
        let mut store = RallyStore::new();
        let snapshot = store.all();

        store.add_rally(test_rally("rally-2"));
        store.add_comment("1", NewComment::new("a", "later"));

        assert_eq!(snapshot.len(), 6);
        assert_eq!(snapshot[0].id, "1");
        assert_eq!(snapshot[0].comments.len(), 2);
        assert_eq!(store.len(), 7);
    }

    #[tokio::test]
    async fn test_events_published() {
        let mut store = RallyStore::new();
        let mut rx = store.subscribe();

        store.add_rally(test_rally("rally-3"));
        let comment = store
            .add_comment("rally-3", NewComment::new("a", "first"))
            .unwrap();
        store.add_comment("missing", NewComment::new("a", "lost"));

        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::RallyAdded {
                rally_id: "rally-3".to_string()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::CommentAdded {
                rally_id: "rally-3".to_string(),
                comment_id: comment.id,
            }
        );
        // The miss produced nothing
        assert!(rx.try_recv().is_err());
    }
}
