//! User prompts
//!
//! Flows ask questions through [`Prompter`]. The interactive menu uses
//! dialoguer; subcommands answer follow-up confirmations from `--yes`.

use anyhow::{anyhow, Result};
use dialoguer::{Confirm, Input, Select};
use thiserror::Error;

/// The user backed out of a prompt
#[derive(Error, Debug)]
#[error("Cancelled")]
pub struct Cancelled;

/// An entry in a selection list
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub description: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    pub fn described(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: Some(description.into()),
        }
    }

    fn render(&self) -> String {
        match &self.description {
            Some(description) => format!("{} - {}", self.label, description),
            None => self.label.clone(),
        }
    }
}

pub trait Prompter {
    /// Pick one of `choices`, returning its index
    fn select(&self, prompt: &str, choices: &[Choice]) -> Result<usize>;

    /// Free text
    fn input(&self, prompt: &str) -> Result<String>;

    /// Yes/no, defaulting to yes
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Terminal prompts
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, choices: &[Choice]) -> Result<usize> {
        let items: Vec<String> = choices.iter().map(Choice::render).collect();
        Select::new()
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()?
            .ok_or_else(|| Cancelled.into())
    }

    fn input(&self, prompt: &str) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact_opt()?
            .ok_or_else(|| Cancelled.into())
    }
}

/// Answers confirmations with a fixed value and refuses everything else
#[derive(Debug)]
pub struct Unattended {
    pub assume_yes: bool,
}

impl Prompter for Unattended {
    fn select(&self, prompt: &str, _choices: &[Choice]) -> Result<usize> {
        Err(anyhow!("'{}' needs an interactive terminal", prompt))
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Err(anyhow!("'{}' needs an interactive terminal", prompt))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        tracing::debug!("{} -> {}", prompt, self.assume_yes);
        Ok(self.assume_yes)
    }
}
