pub mod humanize;
pub mod time;
pub mod util;

pub use humanize::{Point, Timeval};
