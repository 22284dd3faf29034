//! Domain types for extracted transit schedules.
//!
//! These are plain data: what a schedule page says once its grid and prose
//! have been read. Nothing here knows about documents or selectors.

mod direction;
mod schedule;
mod service_day;
mod station;
mod time;
mod valid_as_of;

pub use direction::{Direction, DirectionCodes};
pub use schedule::{Schedule, StopEntry, SubrouteSet};
pub use service_day::{InvalidServiceDay, ServiceDay, is_holiday};
pub use station::{RETURN_SUFFIX, StationLabel};
pub use time::{TimeError, parse_stop_time};
pub use valid_as_of::ValidAsOf;
