pub mod builder;
mod clock;
mod date;
mod datetime;
mod duration;
mod range;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::Date;
pub use datetime::DateTime;
pub use duration::Duration;
pub use range::DateRange;
