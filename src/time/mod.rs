pub mod clock;
pub mod local;

pub use clock::{Clock, FixedClock, SystemClock};
pub use local::{FixedOffsetConverter, Identity, LocalTimeConverter, OffsetError, SystemLocal};
