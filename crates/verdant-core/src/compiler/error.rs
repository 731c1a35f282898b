//! # Verdant Template Compiler Errors
//!
//! [`TemplateSyntaxError`] is the only failure of the template compiler. It
//! carries the offending markup and the byte offset at which parsing stopped
//! so callers can point at the problem.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Template syntax error at {}: {message}", self.location())]
pub struct TemplateSyntaxError {
    pub markup: String,
    /// Byte offset into `markup`
    pub position: usize,
    pub message: String,
}

impl TemplateSyntaxError {
    pub fn new(markup: &str, position: usize, message: impl Into<String>) -> Self {
        Self {
            markup: markup.to_string(),
            position,
            message: message.into(),
        }
    }

    /// 1-based line and column of `position`
    pub fn line_col(&self) -> (usize, usize) {
        let end = self.position.min(self.markup.len());
        let before = self.markup.get(..end).unwrap_or(&self.markup);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        (line, column)
    }

    fn location(&self) -> String {
        let (line, column) = self.line_col();
        format!("line {}, column {}", line, column)
    }
}
