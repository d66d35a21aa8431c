//! Line-input front ends for the interactive session.
//!
//! `Prompter` is the seam handlers use to ask the user for text. Implementations:
//! - `TerminalPrompter`: `dialoguer` input with editable pre-fill, for interactive terminals.
//! - `LinePrompter`: plain prompt/read over any async reader and writer (piped stdin, tests).

use std::io::ErrorKind;

use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Input};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tracing::debug;

use crate::error::{AppError, Result};

/// An asynchronous source of user-entered lines.
///
/// `Ok(None)` means the input is closed: either `close` was called or the user ended input.
#[async_trait]
pub trait Prompter: Send {
    /// Shows `text` and waits for one line.
    async fn prompt(&mut self, text: &str) -> Result<Option<String>>;

    /// Like `prompt`, but offers `default` as editable initial text where the front end supports it.
    async fn prompt_with_default(&mut self, text: &str, _default: &str) -> Result<Option<String>> {
        self.prompt(text).await
    }

    /// Stops the prompter. Every later prompt yields `Ok(None)`.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}

/// Terminal front end built on `dialoguer::Input`.
///
/// The blocking read runs on tokio's blocking pool so the session task only awaits it.
#[derive(Debug, Default)]
pub struct TerminalPrompter {
    closed: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    async fn read(&mut self, text: &str, initial: Option<&str>) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }

        let text = text.trim_end().to_string();
        let initial = initial.map(str::to_string);
        let line = tokio::task::spawn_blocking(move || {
            let theme = ColorfulTheme::default();
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(text)
                .allow_empty(true);
            if let Some(initial) = initial {
                input = input.with_initial_text(initial);
            }
            input.interact_text()
        })
        .await?;

        match line {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e))
                if matches!(e.kind(), ErrorKind::UnexpectedEof | ErrorKind::Interrupted) =>
            {
                debug!("Terminal input ended: {}", e);
                self.closed = true;
                Ok(None)
            },
            Err(e) => Err(AppError::from(e)),
        }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.read(text, None).await
    }

    async fn prompt_with_default(&mut self, text: &str, default: &str) -> Result<Option<String>> {
        self.read(text, Some(default)).await
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Plain prompter: writes the prompt text, then reads one line. No pre-fill support.
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
    closed: bool,
}

impl<R, W> LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            closed: false,
        }
    }

    /// Gives back the writer, e.g. to inspect what was prompted.
    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePrompter<BufReader<Stdin>, Stdout> {
    /// Prompter over the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

#[async_trait]
impl<R, W> Prompter for LinePrompter<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        if self.closed {
            return Ok(None);
        }

        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;

        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            debug!("Line input reached end of stream");
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()))
    }

    fn close(&mut self) {
        self.closed = true;
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
