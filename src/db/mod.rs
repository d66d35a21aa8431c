//! Provides quiz persistence.
//!
//! `QuizStore` is the CRUD seam the command handlers talk to. Two backends implement it:
//! - `sqlite`: a `sqlx` SQLite pool, the default for interactive sessions.
//! - `memory`: a process-local map, used for `--in-memory` sessions and tests.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use crate::error::Result;
use crate::models::{NewQuiz, Quiz, STARTER_QUIZZES};
use async_trait::async_trait;
use tracing::info;

/// Abstract persistent collection of quizzes keyed by a store-assigned integer id.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Returns every quiz ordered by ascending id.
    async fn get_all(&self) -> Result<Vec<Quiz>>;

    /// Returns the quiz with the given id, or `None` if absent.
    async fn get(&self, id: i64) -> Result<Option<Quiz>>;

    /// Validates and inserts a new quiz, returning it with its assigned id.
    async fn create(&self, quiz: &NewQuiz) -> Result<Quiz>;

    /// Validates and replaces question and answer of an existing quiz in one step.
    /// Returns `None` if no quiz has that id.
    async fn update(&self, id: i64, changes: &NewQuiz) -> Result<Option<Quiz>>;

    /// Removes the quiz with the given id. Returns `false` if there was none.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Number of stored quizzes.
    async fn count(&self) -> Result<i64>;

    /// Flushes and releases the backend. Further calls are not expected.
    async fn close(&self);
}

/// Inserts the starter questions if the store holds nothing yet.
///
/// Returns the number of quizzes inserted.
pub async fn seed_if_empty(store: &dyn QuizStore) -> Result<usize> {
    if store.count().await? > 0 {
        return Ok(0);
    }

    for (question, answer) in STARTER_QUIZZES {
        store.create(&NewQuiz::new(question, answer)).await?;
    }
    info!("Seeded empty store with {} quizzes", STARTER_QUIZZES.len());
    Ok(STARTER_QUIZZES.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_if_empty_inserts_once() {
        let store = MemoryStore::new();
        assert_eq!(seed_if_empty(&store).await.unwrap(), STARTER_QUIZZES.len());
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), STARTER_QUIZZES.len() as i64);

        let all = store.get_all().await.unwrap();
        assert_eq!(all[0].question, "Capital of Italy");
        assert_eq!(all[0].answer, "Rome");
    }

    #[tokio::test]
    async fn test_seed_skips_non_empty_store() {
        let store = MemoryStore::new();
        store.create(&NewQuiz::new("2 + 2", "4")).await.unwrap();
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
