// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every failure the CLI reports says what went wrong, why it might have
//! happened, and what to try next.

use rollcall_core::{ConfigError, Rejection};
use rollcall_storage::StoreError;
use std::fmt;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Stable code when the error is an engine rejection
    pub code: Option<&'static str>,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Error for a data directory another process has open
    pub fn store_open(dir: &Path, err: StoreError) -> Self {
        let locked = matches!(err, StoreError::Locked(_));
        let error = CliError::new(format!("cannot open data directory {}", dir.display()));
        let error = if locked {
            error
                .with_context("another rollcall process holds the directory lock")
                .with_suggestion("wait for the other command to finish, then retry")
        } else {
            error
                .with_context(err.to_string())
                .with_suggestion("check the directory exists and is writable")
        };
        error.with_source(err)
    }

    pub fn config(err: ConfigError) -> Self {
        CliError::new("invalid configuration")
            .with_context(err.to_string())
            .with_suggestion(format!(
                "fix or remove {} in the data directory",
                rollcall_core::CONFIG_FILE
            ))
            .with_source(err)
    }
}

impl From<Rejection> for CliError {
    fn from(rejection: Rejection) -> Self {
        let mut error = CliError::new(rejection.to_string());
        error.code = Some(rejection.code());
        let error = match &rejection {
            Rejection::NotFound { kind: "event", .. } => {
                error.with_suggestion("list events: rollcall event list")
            }
            Rejection::NotFound { kind: "user", .. } => {
                error.with_suggestion("register the identity: rollcall user add")
            }
            Rejection::NotFound { .. } => error,
            Rejection::ValidationError(_) => error.with_suggestion("correct the input and retry"),
            Rejection::DeadlinePassed(_) | Rejection::EventEnded(_) => {
                error.with_context("registration for this event is closed")
            }
            Rejection::AlreadyRegistered { user_id, .. } => error.with_suggestion(format!(
                "show the existing ticket: rollcall tickets {user_id}"
            )),
            Rejection::CapacityExceeded { .. } => {
                error.with_context("every seat has been taken")
            }
            Rejection::TicketNotFound(_) => error
                .with_context("the ticket may be mistyped or its event deleted")
                .with_suggestion("list the holder's tickets: rollcall tickets <user>"),
            Rejection::AlreadyCheckedIn(_) => {
                error.with_context("each ticket admits once")
            }
            Rejection::EventMismatch { issued_for, .. } => error.with_suggestion(format!(
                "present the ticket at event {issued_for}"
            )),
            Rejection::EventExpired(_) => error.with_context("check-in closes when the event ends"),
            Rejection::DuplicateIdentity(_) => {
                error.with_suggestion("use a different contact address")
            }
            Rejection::RoleMismatch { .. } => {
                error.with_suggestion("show the identity: rollcall user show <id>")
            }
            Rejection::StorageFailure(_) => error
                .with_context("nothing was written")
                .with_suggestion("retry the command"),
        };
        error.with_source(rejection)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => writeln!(f, "error[{}]: {}", code, self.message)?,
            None => writeln!(f, "error: {}", self.message)?,
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
