//! In-memory collaborators for tests and offline use.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{EditorError, EditorResult};
use crate::validation::ValidationIssue;
use crate::wire::{OutboundPromotion, WirePromotion};

use super::ports::{Navigator, Notifier, PromotionApi};

/// Promotion backend holding raw JSON documents.
///
/// Seeded documents may use any inbound encoding; saved documents are
/// stored exactly as the editor sent them.
#[derive(Debug)]
pub struct InMemoryPromotionApi {
    documents: RwLock<BTreeMap<i64, serde_json::Value>>,
    next_id: RwLock<i64>,
    rejection: RwLock<Option<Vec<ValidationIssue>>>,
    offline: RwLock<bool>,
}

impl Default for InMemoryPromotionApi {
    fn default() -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(1),
            rejection: RwLock::new(None),
            offline: RwLock::new(false),
        }
    }
}

impl InMemoryPromotionApi {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw document under `id`.
    pub async fn insert(&self, id: i64, document: serde_json::Value) {
        self.documents.write().await.insert(id, document);
        let mut next_id = self.next_id.write().await;
        *next_id = (*next_id).max(id + 1);
    }

    /// Returns the stored document.
    pub async fn document(&self, id: i64) -> Option<serde_json::Value> {
        self.documents.read().await.get(&id).cloned()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }

    /// Rejects the next create or update with these issues.
    pub async fn reject_next(&self, issues: Vec<ValidationIssue>) {
        *self.rejection.write().await = Some(issues);
    }

    /// Makes every call fail with a transport error.
    pub async fn set_offline(&self, offline: bool) {
        *self.offline.write().await = offline;
    }

    async fn check_online(&self) -> EditorResult<()> {
        if *self.offline.read().await {
            return Err(EditorError::Transport {
                message: "backend unreachable".to_string(),
            });
        }
        Ok(())
    }

    async fn check_rejection(&self) -> EditorResult<()> {
        match self.rejection.write().await.take() {
            Some(issues) => Err(EditorError::ServerRejected { issues }),
            None => Ok(()),
        }
    }
}

fn to_json(promotion: &OutboundPromotion, id: i64) -> EditorResult<serde_json::Value> {
    let mut document = serde_json::to_value(promotion).map_err(|e| EditorError::Transport {
        message: e.to_string(),
    })?;
    if let Some(object) = document.as_object_mut() {
        object.insert("id".to_string(), serde_json::Value::from(id));
    }
    Ok(document)
}

#[async_trait]
impl PromotionApi for InMemoryPromotionApi {
    async fn fetch(&self, id: i64) -> EditorResult<WirePromotion> {
        self.check_online().await?;
        let document = self
            .document(id)
            .await
            .ok_or(EditorError::PromotionNotFound { id })?;
        serde_json::from_value(document).map_err(|e| EditorError::Transport {
            message: e.to_string(),
        })
    }

    async fn create(&self, promotion: &OutboundPromotion) -> EditorResult<i64> {
        self.check_online().await?;
        self.check_rejection().await?;
        let id = {
            let mut next_id = self.next_id.write().await;
            let id = *next_id;
            *next_id += 1;
            id
        };
        self.documents.write().await.insert(id, to_json(promotion, id)?);
        Ok(id)
    }

    async fn update(&self, id: i64, promotion: &OutboundPromotion) -> EditorResult<()> {
        self.check_online().await?;
        let mut documents = self.documents.write().await;
        if !documents.contains_key(&id) {
            return Err(EditorError::PromotionNotFound { id });
        }
        self.check_rejection().await?;
        documents.insert(id, to_json(promotion, id)?);
        Ok(())
    }

    async fn delete(&self, id: i64) -> EditorResult<()> {
        self.check_online().await?;
        self.documents
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(EditorError::PromotionNotFound { id })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A notification shown to the author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Success toast.
    Success(String),
    /// Error toast.
    Error(String),
}

/// Notifier that keeps every notification.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications so far, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        lock(&self.notifications).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        lock(&self.notifications).push(Notification::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        lock(&self.notifications).push(Notification::Error(message.to_string()));
    }
}

/// A screen the editor navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The promotion listing.
    Listing,
    /// The editor for one promotion.
    Promotion(i64),
}

/// Navigator that keeps every destination.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    destinations: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    /// Creates an empty navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the destinations so far, oldest first.
    pub fn destinations(&self) -> Vec<Destination> {
        lock(&self.destinations).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn to_listing(&self) {
        lock(&self.destinations).push(Destination::Listing);
    }

    fn to_promotion(&self, id: i64) {
        lock(&self.destinations).push(Destination::Promotion(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Promotion;
    use crate::wire::outbound;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let api = InMemoryPromotionApi::new();
        api.insert(7, serde_json::json!({"code": "OLD"})).await;

        let document = outbound(&Promotion::new());
        let id = api.create(&document).await.unwrap();
        assert_eq!(id, 8);
        assert_eq!(api.document(8).await.unwrap()["id"], 8);
        assert_eq!(api.len().await, 2);
    }

    #[tokio::test]
    async fn test_missing_documents_are_not_found() {
        let api = InMemoryPromotionApi::new();
        let document = outbound(&Promotion::new());

        assert!(matches!(
            api.fetch(3).await,
            Err(EditorError::PromotionNotFound { id: 3 })
        ));
        assert!(matches!(
            api.update(3, &document).await,
            Err(EditorError::PromotionNotFound { id: 3 })
        ));
        assert!(matches!(
            api.delete(3).await,
            Err(EditorError::PromotionNotFound { id: 3 })
        ));
    }

    #[tokio::test]
    async fn test_rejection_applies_once() {
        let api = InMemoryPromotionApi::new();
        api.reject_next(vec![ValidationIssue::new("code", "Code déjà utilisé")])
            .await;
        let document = outbound(&Promotion::new());

        assert!(matches!(
            api.create(&document).await,
            Err(EditorError::ServerRejected { .. })
        ));
        assert!(api.create(&document).await.is_ok());
    }

    #[tokio::test]
    async fn test_offline_backend_fails_with_transport_error() {
        let api = InMemoryPromotionApi::new();
        api.set_offline(true).await;
        assert!(matches!(
            api.delete(1).await,
            Err(EditorError::Transport { .. })
        ));
    }

    #[test]
    fn test_recorders_keep_order() {
        let notifier = RecordingNotifier::new();
        notifier.success("ok");
        notifier.error("ko");
        assert_eq!(
            notifier.notifications(),
            vec![
                Notification::Success("ok".to_string()),
                Notification::Error("ko".to_string())
            ]
        );

        let navigator = RecordingNavigator::new();
        navigator.to_promotion(4);
        navigator.to_listing();
        assert_eq!(
            navigator.destinations(),
            vec![Destination::Promotion(4), Destination::Listing]
        );
    }
}
