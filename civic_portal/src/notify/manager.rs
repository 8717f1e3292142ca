//! Notification manager implementation.

use std::sync::Arc;

use crate::store::{NewNotification, Notification, Storage, StoreResult, UserId};

/// Notification manager
///
/// Thin coordinator over the storage backend; notifications are created
/// unread and listed newest first.
#[derive(Clone)]
pub struct NotificationManager {
    store: Arc<dyn Storage>,
}

impl NotificationManager {
    /// Create a new notification manager
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Deliver a notification to a user
    pub async fn notify(&self, notification: NewNotification) -> StoreResult<Notification> {
        self.store.create_notification(notification).await
    }

    /// List a user's notifications, newest first
    pub async fn list_for_user(&self, user_id: UserId) -> StoreResult<Vec<Notification>> {
        self.store.notifications_for_user(user_id).await
    }

    /// Mark one of `user_id`'s notifications read; repeated calls are
    /// harmless. Returns `None` if the notification does not exist or
    /// belongs to another user.
    pub async fn mark_read(&self, user_id: UserId, id: i64) -> StoreResult<Option<Notification>> {
        self.store.mark_notification_read(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemStorage, NewUser, NotificationKind};

    async fn setup() -> (NotificationManager, UserId) {
        let store: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let user = store
            .create_user(NewUser {
                national_number: "AB1234567890".to_string(),
                password_hash: "hash".to_string(),
                full_name: "Test User".to_string(),
                phone_number: None,
                email: None,
            })
            .await
            .unwrap();
        (NotificationManager::new(store), user.id)
    }

    #[tokio::test]
    async fn test_notify_creates_unread() {
        let (manager, user_id) = setup().await;

        let notification = manager
            .notify(NewNotification {
                user_id,
                title: "Welcome".to_string(),
                message: "Your account is ready.".to_string(),
                kind: NotificationKind::Success,
            })
            .await
            .unwrap();

        assert!(!notification.read);
        assert_eq!(notification.kind, NotificationKind::Success);

        let listed = manager.list_for_user(user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_idempotent() {
        let (manager, user_id) = setup().await;
        let notification = manager
            .notify(NewNotification {
                user_id,
                title: "Welcome".to_string(),
                message: "Your account is ready.".to_string(),
                kind: NotificationKind::Info,
            })
            .await
            .unwrap();

        assert!(manager.mark_read(user_id, notification.id).await.unwrap().unwrap().read);
        assert!(manager.mark_read(user_id, notification.id).await.unwrap().unwrap().read);
        assert!(manager.mark_read(user_id, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_read_is_scoped_to_the_owner() {
        let (manager, user_id) = setup().await;
        let notification = manager
            .notify(NewNotification {
                user_id,
                title: "Welcome".to_string(),
                message: "Your account is ready.".to_string(),
                kind: NotificationKind::Info,
            })
            .await
            .unwrap();

        let as_other_user = manager.mark_read(user_id + 1, notification.id).await.unwrap();
        assert!(as_other_user.is_none());

        let listed = manager.list_for_user(user_id).await.unwrap();
        assert!(!listed[0].read, "Owner's notification must stay unread");
    }
}
