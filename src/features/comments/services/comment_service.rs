use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::model::CurrentUser;
use crate::features::comments::models::Comment;
use crate::modules::store::Store;

/// Service for the comment feed
pub struct CommentService {
    store: Arc<dyn Store>,
}

impl CommentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Append a comment attributed to the caller.
    pub async fn create(&self, text: String, author: &CurrentUser) -> Result<Comment> {
        let comment = self
            .store
            .insert_comment(Comment {
                id: Uuid::new_v4(),
                text,
                author_id: author.id,
                author_name: author.name.clone(),
                created_at: Utc::now(),
            })
            .await?;

        info!("Comment posted: id={}, author={}", comment.id, comment.author_name);

        Ok(comment)
    }

    /// The whole feed, oldest first.
    pub async fn list(&self) -> Result<Vec<Comment>> {
        self.store.list_comments().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::store::MemoryStore;
    use crate::shared::test_helpers::create_named_user;

    #[tokio::test]
    async fn test_comments_are_appended_in_order() {
        let svc = CommentService::new(Arc::new(MemoryStore::new()));
        let alice = create_named_user("alice");
        let bob = create_named_user("bob");

        svc.create("first".to_string(), &alice).await.unwrap();
        svc.create("second".to_string(), &bob).await.unwrap();

        let feed = svc.list().await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].text, "first");
        assert_eq!(feed[0].author_name, "alice");
        assert_eq!(feed[1].text, "second");
        assert_eq!(feed[1].author_name, "bob");
    }
}
