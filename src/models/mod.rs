//! Defines the data structures and models used throughout the application.
//!
//! This includes the persisted `Quiz` record and the `NewQuiz` candidate
//! that stores validate before writing.

mod quiz;

pub use quiz::*;
