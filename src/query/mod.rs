use std::io::{stderr, Write};

use futures::executor::block_on;

use crate::style::{DefaultStyle, Style};
use crate::term::CrosstermTerminal;
use crate::Result;

mod key;
mod select;

pub use key::*;
pub use select::*;

pub struct QueryBuilder<'a, S> {
    prompt: Option<String>,
    style: &'a S,
}

impl<'a, S> QueryBuilder<'a, S> {
    pub fn with_style(style: &'a S) -> Self {
        Self {
            prompt: None,
            style,
        }
    }

    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            ..self
        }
    }
}

impl Default for QueryBuilder<'_, DefaultStyle> {
    fn default() -> Self {
        Self {
            prompt: None,
            style: &DefaultStyle,
        }
    }
}

/// A question asked interactively on the terminal.
pub trait Query: Sized {
    type Result;

    fn show(self) -> Result<Self::Result> {
        self.show_on(&mut stderr())
    }

    fn show_on(self, f: &mut impl Write) -> Result<Self::Result>;
}

impl<S: Style> Query for SelectQuery<'_, S> {
    type Result = Answer;

    /// Blocks until the prompt is answered, reading keys from the terminal.
    fn show_on(mut self, f: &mut impl Write) -> Result<Self::Result> {
        let mut term = CrosstermTerminal::new(f);
        block_on(self.run(&mut EventKeys, &mut term))
    }
}
