#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Hands candidate lines to an interactive finder such as `fzf` and maps what
//! the human picked back to the caller's values.
//!
//! ```no_run
//! # async fn demo() -> finder::Result<()> {
//! let mut items = finder::Items::new();
//! items.add("apple", 1);
//! items.add("banana", 2);
//!
//! let mut finder = finder::Finder::new(Vec::<String>::new())?;
//! let picked: Vec<i32> = finder.select_items(&items).await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod finder;
mod item;
mod locate;
pub mod preset;
mod registry;
mod select;
mod shell;
pub mod source;

pub use error::Error;
pub use error::Result;
pub use finder::Finder;
pub use item::Candidates;
pub use item::Item;
pub use item::Items;
pub use item::Selected;
pub use locate::Locator;
pub use registry::Registry;
pub use registry::Resolver;
pub use shell::quote;
pub use shell::Shell;
