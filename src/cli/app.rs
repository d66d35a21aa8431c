use colored::*;
use comfy_table::Color;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, error, info};

use super::commands::{validate_id, Command, AUTHORS, HELP};
use super::output::{big_log, error_log, log, quiz_detail, quiz_line};
use super::prompt::Prompter;
use crate::db::QuizStore;
use crate::error::{AppError, Result};
use crate::models::{NewQuiz, Quiz};

/// Text of the main command prompt.
pub const PROMPT: &str = "quiz > ";

/// Back-to-back unreadable command lines tolerated before the input is considered broken.
const MAX_CONSECUTIVE_READ_FAILURES: usize = 3;

/// How a `play` round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Correct answers given this round.
    pub score: usize,
    /// Quizzes still unresolved when the round stopped.
    pub remaining: usize,
    /// Whether every quiz in the pool was answered (trivially true for an empty store).
    pub finished: bool,
}

/// One interactive session: a store, an input front end, and the random source for `play`.
pub struct App {
    store: Box<dyn QuizStore>,
    prompter: Box<dyn Prompter>,
    rng: StdRng,
}

impl App {
    pub fn new(store: Box<dyn QuizStore>, prompter: Box<dyn Prompter>, rng: StdRng) -> Self {
        Self {
            store,
            prompter,
            rng,
        }
    }

    /// Runs the session loop until the prompter closes, then closes the store.
    ///
    /// Command failures are reported and never end the loop.
    ///
    /// # Errors
    ///
    /// Returns an error only if the prompter fails to read several command lines in a row.
    /// A single unreadable line is reported and the user is prompted again.
    pub async fn run(&mut self) -> Result<()> {
        info!("Session started");
        let outcome = self.session_loop().await;
        self.store.close().await;
        info!("Session ended");
        outcome
    }

    async fn session_loop(&mut self) -> Result<()> {
        let mut read_failures = 0;
        while !self.prompter.is_closed() {
            let line = match self.prompter.prompt(PROMPT).await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    read_failures += 1;
                    error!(
                        "Failed to read command line ({} in a row): {:?}",
                        read_failures, e
                    );
                    error_log(&e);
                    if read_failures >= MAX_CONSECUTIVE_READ_FAILURES {
                        return Err(e);
                    }
                    continue;
                },
            };
            read_failures = 0;
            self.execute(&line).await;
        }
        Ok(())
    }

    /// Parses and runs one entered line, reporting any failure.
    pub async fn execute(&mut self, line: &str) {
        let result = match Command::parse(line) {
            Ok(Some(command)) => {
                debug!("Dispatching {:?}", command);
                self.run_command(command).await
            },
            Ok(None) => Ok(()),
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            error!("Command execution failed: {:?}", e);
            error_log(&e);
        }
    }

    /// Runs a parsed command, returning its failure to the caller.
    pub async fn run_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => self.help(),
            Command::List => {
                self.list().await?;
            },
            Command::Show(arg) => {
                self.show(arg.as_deref()).await?;
            },
            Command::Add => {
                self.add().await?;
            },
            Command::Delete(arg) => {
                self.delete(arg.as_deref()).await?;
            },
            Command::Edit(arg) => {
                self.edit(arg.as_deref()).await?;
            },
            Command::Test(arg) => {
                self.test(arg.as_deref()).await?;
            },
            Command::Play => {
                self.play().await?;
            },
            Command::Credits => self.credits(),
            Command::Quit => self.quit(),
        }
        Ok(())
    }

    fn help(&self) {
        log("Commands:");
        for line in HELP {
            log(line);
        }
    }

    /// Prints every quiz as `[id]: question`.
    pub async fn list(&self) -> Result<Vec<Quiz>> {
        let quizzes = self.store.get_all().await?;
        for quiz in &quizzes {
            log(quiz_line(quiz));
        }
        Ok(quizzes)
    }

    /// Prints `[id]: question => answer` for the given id.
    pub async fn show(&self, arg: Option<&str>) -> Result<Quiz> {
        let quiz = self.find(arg).await?;
        log(quiz_detail(&quiz));
        Ok(quiz)
    }

    /// Asks for a question and an answer, then stores them as a new quiz.
    pub async fn add(&mut self) -> Result<Quiz> {
        let question = self.ask(" Enter a question: ", None).await?;
        let answer = self.ask(" Enter the answer: ", None).await?;

        let quiz = self.store.create(&NewQuiz::new(question, answer)).await?;
        log(format!(
            " {}: {} {} {}",
            "Added".magenta(),
            quiz.question,
            "=>".magenta(),
            quiz.answer
        ));
        Ok(quiz)
    }

    /// Removes the quiz with the given id.
    pub async fn delete(&self, arg: Option<&str>) -> Result<i64> {
        let id = validate_id(arg)?;
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(id));
        }
        log(format!(" Deleted quiz {}.", id.to_string().magenta()));
        Ok(id)
    }

    /// Replaces question and answer of an existing quiz, offering the current text for editing.
    pub async fn edit(&mut self, arg: Option<&str>) -> Result<Quiz> {
        let current = self.find(arg).await?;
        let question = self
            .ask(" Enter a question: ", Some(&current.question))
            .await?;
        let answer = self
            .ask(" Enter the answer: ", Some(&current.answer))
            .await?;

        let quiz = self
            .store
            .update(current.id, &NewQuiz::new(question, answer))
            .await?
            .ok_or(AppError::NotFound(current.id))?;
        log(format!(
            " Quiz {} changed to: {} {} {}",
            quiz.id.to_string().magenta(),
            quiz.question,
            "=>".magenta(),
            quiz.answer
        ));
        Ok(quiz)
    }

    /// Asks one quiz and judges a single attempt. Returns whether it was answered correctly.
    pub async fn test(&mut self, arg: Option<&str>) -> Result<bool> {
        let quiz = self.find(arg).await?;
        let reply = self.ask(&format!("{}? ", quiz.question), None).await?;

        let correct = quiz.is_correct(&reply);
        if correct {
            log("Your answer is correct.");
            big_log("Correct", Color::Green);
        } else {
            log("Your answer is incorrect.");
            big_log("Incorrect", Color::Red);
        }
        Ok(correct)
    }

    /// Asks every quiz in random order until one is answered wrong or none remain.
    pub async fn play(&mut self) -> Result<PlayOutcome> {
        let mut pool = self.store.get_all().await?;
        let mut score = 0;

        if pool.is_empty() {
            log("There are no questions.".red().to_string());
            return Ok(PlayOutcome {
                score,
                remaining: 0,
                finished: true,
            });
        }

        loop {
            let index = self.rng.gen_range(0..pool.len());
            let prompt = format!("{}? ", pool[index].question);
            let reply = self.ask(&prompt, None).await?;

            if !pool[index].is_correct(&reply) {
                log("INCORRECT.");
                Self::announce_final_score(score);
                return Ok(PlayOutcome {
                    score,
                    remaining: pool.len(),
                    finished: false,
                });
            }

            score += 1;
            pool.remove(index);
            if pool.is_empty() {
                log("Nothing left to ask.");
                Self::announce_final_score(score);
                return Ok(PlayOutcome {
                    score,
                    remaining: 0,
                    finished: true,
                });
            }
            log(format!("CORRECT - {} right so far.", score));
        }
    }

    fn announce_final_score(score: usize) {
        log(format!("Game over. Score: {}", score));
        big_log(&score.to_string(), Color::Magenta);
    }

    fn credits(&self) {
        log("Authors:");
        for author in AUTHORS {
            log(author.green().to_string());
        }
    }

    fn quit(&mut self) {
        info!("Quit requested");
        self.prompter.close();
    }

    async fn find(&self, arg: Option<&str>) -> Result<Quiz> {
        let id = validate_id(arg)?;
        self.store.get(id).await?.ok_or(AppError::NotFound(id))
    }

    /// Reads one line for a handler. End of input aborts the handler.
    async fn ask(&mut self, text: &str, default: Option<&str>) -> Result<String> {
        let line = match default {
            Some(default) => self.prompter.prompt_with_default(text, default).await?,
            None => self.prompter.prompt(text).await?,
        };
        line.map(|l| l.trim().to_string())
            .ok_or_else(|| AppError::Prompt("input closed before a reply was given".to_string()))
    }
}
