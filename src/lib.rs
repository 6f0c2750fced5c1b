//! Interactive select prompts for the terminal.
//!
//! ```no_run
//! use selprompt::query::{Query, QueryBuilder};
//!
//! let answer = QueryBuilder::default()
//!     .with_prompt("Which fruit is your favorite?")
//!     .select(["Apple", "Banana", "Kiwi"])
//!     .show()
//!     .unwrap();
//! println!("{:?}", answer);
//! ```

pub mod error;
pub mod item;
pub mod query;
pub mod style;
pub mod term;
pub mod util;

pub use error::{Error, Result};
