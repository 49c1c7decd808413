//! Runtime values, the null policy and the canonical temporal pair.

#![allow(missing_docs)]

mod datetime;
mod defaults;
mod types;

pub use datetime::*;
pub use defaults::*;
pub use types::*;
