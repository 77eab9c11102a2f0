//! Collaborators the editor calls out to.

use async_trait::async_trait;

use crate::error::EditorResult;
use crate::wire::{OutboundPromotion, WirePromotion};

/// Backend promotion endpoints.
///
/// Implementations own timeouts and retries. A 404 maps to
/// [`EditorError::PromotionNotFound`](crate::error::EditorError::PromotionNotFound),
/// a 422 to [`EditorError::ServerRejected`](crate::error::EditorError::ServerRejected)
/// and anything else that did not reach the backend to
/// [`EditorError::Transport`](crate::error::EditorError::Transport).
#[async_trait]
pub trait PromotionApi: Send + Sync {
    /// Fetches a promotion in whatever shape the backend emits.
    async fn fetch(&self, id: i64) -> EditorResult<WirePromotion>;

    /// Creates a promotion and returns its identifier.
    async fn create(&self, promotion: &OutboundPromotion) -> EditorResult<i64>;

    /// Replaces an existing promotion.
    async fn update(&self, id: i64, promotion: &OutboundPromotion) -> EditorResult<()>;

    /// Deletes a promotion.
    async fn delete(&self, id: i64) -> EditorResult<()>;
}

/// Non-blocking user notifications.
pub trait Notifier: Send + Sync {
    /// Reports a completed operation.
    fn success(&self, message: &str);

    /// Reports a failed operation.
    fn error(&self, message: &str);
}

/// Screen navigation.
pub trait Navigator: Send + Sync {
    /// Returns to the promotion listing.
    fn to_listing(&self);

    /// Opens a promotion in the editor.
    fn to_promotion(&self, id: i64);
}
