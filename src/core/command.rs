//! # Command Dispatch
//!
//! The dashboard hands every submitted prompt line to a [`CommandDispatcher`].
//! What the line means is up to the dispatcher; the dashboard only cares how
//! it failed:
//!
//! - [`CommandError::BadCommand`]: the user typed something wrong. Shown as a
//!   warning with just the message.
//! - [`CommandError::Failed`]: anything else. Shown as an error with the full
//!   cause chain.
//!
//! Either way the failure stops at the input loop.

use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum CommandError {
    BadCommand(String),
    Failed(Box<dyn Error + Send + Sync>),
}

impl CommandError {
    pub fn bad(message: impl Into<String>) -> Self {
        CommandError::BadCommand(message.into())
    }

    /// Message plus every underlying cause, one per line.
    pub fn detail(&self) -> String {
        match self {
            CommandError::BadCommand(message) => message.clone(),
            CommandError::Failed(error) => {
                let mut detail = error.to_string();
                let mut source = error.source();
                while let Some(cause) = source {
                    detail.push_str(&format!("\n  caused by: {cause}"));
                    source = cause.source();
                }
                detail
            }
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::BadCommand(message) => write!(f, "{message}"),
            CommandError::Failed(error) => write!(f, "command failed: {error}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CommandError::BadCommand(_) => None,
            CommandError::Failed(error) => Some(error.as_ref()),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(error: std::io::Error) -> Self {
        CommandError::Failed(Box::new(error))
    }
}

/// Executes one submitted prompt line.
pub trait CommandDispatcher: Send {
    fn execute(&mut self, line: &str) -> Result<(), CommandError>;
}

impl<F> CommandDispatcher for F
where
    F: FnMut(&str) -> Result<(), CommandError> + Send,
{
    fn execute(&mut self, line: &str) -> Result<(), CommandError> {
        self(line)
    }
}
