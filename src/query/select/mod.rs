mod handler;
mod query;

pub use handler::*;
pub use query::*;

use crate::{
    item::{Choice, Prompt},
    style::Style,
};

use super::QueryBuilder;

impl<'a, S: Style> QueryBuilder<'a, S> {
    pub fn select<I>(self, list: I) -> SelectQuery<'a, S>
    where
        I: IntoIterator,
        I::Item: Into<Choice>,
    {
        SelectQuery::new(
            Prompt(self.prompt.unwrap_or_default()),
            self.style,
            ListHandler::new(list.into_iter().map(Into::into).collect()),
        )
    }
}
