//! In-memory `QuizStore` backed by a `BTreeMap`, so iteration order is ascending id.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use super::QuizStore;
use crate::error::Result;
use crate::models::{NewQuiz, Quiz};

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    quizzes: BTreeMap<i64, Quiz>,
}

/// A session-only quiz store. Clones share the same underlying map.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                next_id: 1,
                quizzes: BTreeMap::new(),
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn get_all(&self) -> Result<Vec<Quiz>> {
        Ok(self.state.lock().await.quizzes.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Quiz>> {
        Ok(self.state.lock().await.quizzes.get(&id).cloned())
    }

    async fn create(&self, quiz: &NewQuiz) -> Result<Quiz> {
        quiz.validate()?;

        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;

        let now = Utc::now();
        let created = Quiz {
            id,
            question: quiz.question.clone(),
            answer: quiz.answer.clone(),
            created_at: now,
            updated_at: now,
        };
        state.quizzes.insert(id, created.clone());
        debug!("Created in-memory quiz {}", id);
        Ok(created)
    }

    async fn update(&self, id: i64, changes: &NewQuiz) -> Result<Option<Quiz>> {
        changes.validate()?;

        let mut state = self.state.lock().await;
        Ok(state.quizzes.get_mut(&id).map(|quiz| {
            quiz.question = changes.question.clone();
            quiz.answer = changes.answer.clone();
            quiz.updated_at = Utc::now();
            quiz.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.state.lock().await.quizzes.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.state.lock().await.quizzes.len() as i64)
    }

    async fn close(&self) {
        debug!("Closing in-memory store");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_ids_are_unique_and_never_reused() {
        let store = MemoryStore::new();
        let a = store.create(&NewQuiz::new("A?", "a")).await.unwrap();
        let b = store.create(&NewQuiz::new("B?", "b")).await.unwrap();
        assert_ne!(a.id, b.id);

        assert!(store.delete(b.id).await.unwrap());
        let c = store.create(&NewQuiz::new("C?", "c")).await.unwrap();
        assert!(c.id > b.id, "deleted ids must not be handed out again");
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_replaces_both_fields() {
        let store = MemoryStore::new();
        let original = store.create(&NewQuiz::new("Old?", "old")).await.unwrap();

        let updated = store
            .update(original.id, &NewQuiz::new("New?", "new"))
            .await
            .unwrap()
            .expect("quiz should exist");
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.question, "New?");
        assert_eq!(updated.answer, "new");
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_id_returns_none() {
        let store = MemoryStore::new();
        assert!(store
            .update(7, &NewQuiz::new("Q", "A"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record_untouched() {
        let store = MemoryStore::new();
        let original = store.create(&NewQuiz::new("Q?", "a")).await.unwrap();

        let result = store.update(original.id, &NewQuiz::new("", "b")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.get(original.id).await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn test_delete_missing_id_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.create(&NewQuiz::new("Q?", "a")).await.unwrap();
        assert_eq!(handle.count().await.unwrap(), 1);
    }
}
