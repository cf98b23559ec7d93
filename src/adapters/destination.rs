//! Output path choosers

use crate::adapters::traits::DestinationChooser;
use crate::domain::{Result, VoyantError};
use async_trait::async_trait;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Always answers with the same path
#[derive(Debug, Clone)]
pub struct FixedDestination {
    path: PathBuf,
}

impl FixedDestination {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DestinationChooser for FixedDestination {
    async fn choose(&self, _suggested_name: &Path) -> Result<Option<PathBuf>> {
        Ok(Some(self.path.clone()))
    }
}

/// Asks for the output path on the terminal
///
/// An empty answer accepts the suggested name, `-` or end of input cancels.
#[derive(Debug, Clone)]
pub struct PromptDestination {
    directory: PathBuf,
}

impl PromptDestination {
    /// Relative answers are resolved against `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Turns one line of input into a destination
    ///
    /// `line` is `None` at end of input.
    pub fn resolve(&self, line: Option<&str>, suggested_name: &Path) -> Option<PathBuf> {
        let answer = line?.trim();
        if answer == "-" {
            return None;
        }

        let chosen = if answer.is_empty() {
            suggested_name.to_path_buf()
        } else {
            PathBuf::from(answer)
        };

        if chosen.is_absolute() {
            Some(chosen)
        } else {
            Some(self.directory.join(chosen))
        }
    }
}

fn read_answer(mut input: impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

#[async_trait]
impl DestinationChooser for PromptDestination {
    async fn choose(&self, suggested_name: &Path) -> Result<Option<PathBuf>> {
        let prompt = format!(
            "Save archive as [{}] ('-' to cancel): ",
            self.directory.join(suggested_name).display()
        );

        let line = tokio::task::spawn_blocking(move || -> std::io::Result<Option<String>> {
            let mut stderr = std::io::stderr();
            stderr.write_all(prompt.as_bytes())?;
            stderr.flush()?;
            read_answer(std::io::stdin().lock())
        })
        .await
        .map_err(|e| VoyantError::Io(format!("Prompt task failed: {e}")))??;

        let chosen = self.resolve(line.as_deref(), suggested_name);
        if chosen.is_none() {
            tracing::info!("Destination prompt cancelled");
        }
        Ok(chosen)
    }
}
