//! Provides SQLite quiz persistence using `sqlx`.
//!
//! Includes establishing the connection pool, initializing the `quizzes` table,
//! and the CRUD queries behind `QuizStore`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use tracing::{debug, error, info};

use super::QuizStore;
use crate::error::{AppError, Result};
use crate::models::{NewQuiz, Quiz};

const SELECT_COLUMNS: &str = "SELECT id, question, answer, created_at, updated_at FROM quizzes";

/// Represents the database connection pool and provides the quiz queries.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Opens (creating if missing) the SQLite database at `database_url`.
    ///
    /// # Arguments
    ///
    /// * `database_url` - e.g. `sqlite://quizzes.sqlite` or `sqlite::memory:`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the URL is malformed or the pool cannot be established.
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Opening quiz database at {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                error!("Invalid database URL {}: {}", database_url, e);
                AppError::Store(e.into())
            })?
            .create_if_missing(true);

        // One session, one connection. Also keeps `sqlite::memory:` a single shared database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to open database: {}", e);
                AppError::Store(e.into())
            })?;

        info!("Opened quiz database successfully");
        Ok(Self { pool })
    }

    /// Opens the database and makes sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let store = Self::new(database_url).await?;
        if !store.is_schema_initialized().await? {
            store.init_schema().await?;
        }
        Ok(store)
    }

    /// Creates the `quizzes` table. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the DDL fails.
    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema (if necessary)...");

        // AUTOINCREMENT so ids of deleted quizzes are never handed out again.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS quizzes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question TEXT NOT NULL CHECK (length(trim(question)) > 0),
                answer TEXT NOT NULL CHECK (length(trim(answer)) > 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create quizzes table: {}", e);
            AppError::Store(e.into())
        })?;

        info!("Database schema initialized successfully");
        Ok(())
    }

    /// Checks if the `quizzes` table exists.
    pub async fn is_schema_initialized(&self) -> Result<bool> {
        debug!("Checking if database schema is initialized...");
        let initialized = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'quizzes')",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to check schema existence: {}", e);
            AppError::Store(e.into())
        })?;
        debug!("Schema initialized status: {}", initialized);
        Ok(initialized)
    }
}

#[async_trait]
impl QuizStore for SqliteStore {
    async fn get_all(&self) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch quizzes: {}", e);
                AppError::Store(e.into())
            })?;
        debug!("Fetched {} quizzes", quizzes.len());
        Ok(quizzes)
    }

    async fn get(&self, id: i64) -> Result<Option<Quiz>> {
        sqlx::query_as::<_, Quiz>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to fetch quiz {}: {}", id, e);
                AppError::Store(e.into())
            })
    }

    async fn create(&self, quiz: &NewQuiz) -> Result<Quiz> {
        quiz.validate()?;

        let now = Utc::now();
        let id = sqlx::query(
            "INSERT INTO quizzes (question, answer, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&quiz.question)
        .bind(&quiz.answer)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert quiz: {}", e);
            AppError::Store(e.into())
        })?
        .last_insert_rowid();

        info!("Created quiz {}", id);
        Ok(Quiz {
            id,
            question: quiz.question.clone(),
            answer: quiz.answer.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: i64, changes: &NewQuiz) -> Result<Option<Quiz>> {
        changes.validate()?;

        // Single statement: both fields change together or not at all.
        let affected = sqlx::query(
            "UPDATE quizzes SET question = ?, answer = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&changes.question)
        .bind(&changes.answer)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update quiz {}: {}", id, e);
            AppError::Store(e.into())
        })?
        .rows_affected();

        if affected == 0 {
            debug!("No quiz {} to update", id);
            return Ok(None);
        }

        info!("Updated quiz {}", id);
        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let affected = sqlx::query("DELETE FROM quizzes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to delete quiz {}: {}", id, e);
                AppError::Store(e.into())
            })?
            .rows_affected();

        if affected > 0 {
            info!("Deleted quiz {}", id);
        }
        Ok(affected > 0)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quizzes")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to count quizzes: {}", e);
                AppError::Store(e.into())
            })
    }

    async fn close(&self) {
        info!("Closing quiz database");
        self.pool.close().await;
    }
}
