use std::{fmt, future::Future, sync::Arc};

use futures::future::{BoxFuture, FutureExt};

use crate::{Error, Result};

/// Represents a prompt string.
///
/// A prompt is a text which describes what you ask for.
/// It is shown on the first line of every frame.
#[derive(Debug, Clone, Default)]
pub struct Prompt(pub String);

/// Error type an asynchronous [`Field`] may fail with.
pub type FieldError = Box<dyn std::error::Error + Send + Sync>;

pub type FieldFuture = BoxFuture<'static, std::result::Result<String, FieldError>>;

type ComputeFn = dyn Fn(&Choice, usize) -> String + Send + Sync;
type ComputeAsyncFn = dyn Fn(&Choice, usize) -> FieldFuture + Send + Sync;

/// A text field of a [`Choice`] whose value may be computed lazily.
///
/// Every variant is normalized to a plain string by [`Field::resolve`]
/// before a line is rendered. Functions receive the choice being rendered
/// and its position in the visible list.
#[derive(Clone)]
pub enum Field {
    Literal(String),
    Computed(Arc<ComputeFn>),
    Async(Arc<ComputeAsyncFn>),
}

impl Field {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Choice, usize) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(&Choice, usize) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<String, FieldError>> + Send + 'static,
    {
        Self::Async(Arc::new(move |choice, index| f(choice, index).boxed()))
    }

    /// Resolves the field to its concrete value.
    ///
    /// A failing asynchronous computation is reported as [`Error::Field`];
    /// it is never replaced with an empty string.
    pub async fn resolve(&self, choice: &Choice, index: usize) -> Result<String> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Computed(f) => Ok(f(choice, index)),
            Self::Async(f) => f(choice, index).await.map_err(|e| Error::Field {
                choice: choice.name.clone(),
                message: e.to_string(),
            }),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
            Self::Async(_) => f.write_str("Async(..)"),
        }
    }
}

impl From<&str> for Field {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Field {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

/// One selectable item of a list.
///
/// `name` is what the prompt answers with. `message` is what is shown and
/// defaults to the name.
#[derive(Debug, Clone)]
pub struct Choice {
    pub name: String,
    pub message: Field,
    pub hint: Option<Field>,
    pub disabled: bool,
    pub indent: String,
    pub pad: String,
    pub(crate) selected: bool,
}

impl Choice {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            message: Field::Literal(name.clone()),
            name,
            hint: None,
            disabled: false,
            indent: String::new(),
            pad: String::new(),
            selected: false,
        }
    }

    pub fn with_message(self, message: impl Into<Field>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn with_hint(self, hint: impl Into<Field>) -> Self {
        Self {
            hint: Some(hint.into()),
            ..self
        }
    }

    pub fn with_indent(self, indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
            ..self
        }
    }

    pub fn with_pad(self, pad: impl Into<String>) -> Self {
        Self {
            pad: pad.into(),
            ..self
        }
    }

    pub fn disabled(self) -> Self {
        Self {
            disabled: true,
            ..self
        }
    }

    /// Marks the choice as initially selected. Only meaningful for
    /// multiple-choice prompts.
    pub fn selected(self, selected: bool) -> Self {
        Self { selected, ..self }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

impl From<&str> for Choice {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Choice {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn message_defaults_to_name() {
        let choice = Choice::new("apple");
        assert_eq!(block_on(choice.message.resolve(&choice, 0)).unwrap(), "apple");
    }

    #[test]
    fn computed_field_sees_choice_and_index() {
        let choice = Choice::new("kiwi")
            .with_hint(Field::computed(|c, i| format!("{}#{}", c.name, i)));
        let hint = choice.hint.clone().unwrap();
        assert_eq!(block_on(hint.resolve(&choice, 3)).unwrap(), "kiwi#3");
    }

    #[test]
    fn async_field_resolves() {
        let choice = Choice::new("a").with_message(Field::future(|c, _| {
            let name = c.name.to_uppercase();
            async move { Ok(name) }
        }));
        assert_eq!(block_on(choice.message.resolve(&choice, 0)).unwrap(), "A");
    }

    #[test]
    fn async_field_failure_is_surfaced() {
        let choice = Choice::new("broken").with_message(Field::future(|_, _| async {
            Err::<String, FieldError>("backend unavailable".into())
        }));
        let err = block_on(choice.message.resolve(&choice, 0)).unwrap_err();
        match err {
            Error::Field { choice, message } => {
                assert_eq!(choice, "broken");
                assert_eq!(message, "backend unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
