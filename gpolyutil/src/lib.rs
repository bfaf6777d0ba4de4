//! Small pieces shared by the rest of the workspace: the error kinds, logging setup, a `Timer`
//! that also owns the bounded worker pool, and helpers for poking at untyped JSON documents and
//! request URLs.

#[macro_use]
extern crate log;

mod error;
mod json_path;
pub mod logger;
mod time;
mod url;
mod utils;

pub use crate::error::{Error, Result};
pub use crate::json_path::{get_item, get_number, get_string};
pub use crate::time::{elapsed_seconds, prettyprint_time, Timer};
pub use crate::url::{split_url, SplitUrl};
pub use crate::utils::{basename, prettyprint_usize};
