//! CLI command implementations

mod catalog;
mod circulation;
mod maintenance;

pub use catalog::{add, author, list, search, summary};
pub use circulation::{borrow, return_book};
pub use maintenance::{import, reset};
