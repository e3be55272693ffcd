pub mod point;
pub mod timeval;

pub use point::Point;
pub use timeval::{Timeval, TimevalError};
