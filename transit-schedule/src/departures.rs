//! Upcoming departures at a station.
//!
//! Merges the stop lists of one or more extracted schedules into a single
//! time-ordered board for one station.
//!
//! A service day can run past midnight: a column like `11:30P, 11:50P,
//! 12:15A` ends with a run that belongs to the same day but the next
//! calendar date. Any time earlier than its column's first run is read as
//! such a next-day run and ordered after the evening ones.

use std::fmt;

use chrono::NaiveTime;
use tracing::trace;

use crate::domain::{Schedule, parse_stop_time};
use crate::extract::ScheduleResult;
use crate::routes::WatchedStop;

/// One departure on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// When the run leaves the station.
    pub time: NaiveTime,
    /// Route label shown for the run.
    pub route: String,
    /// The run leaves after midnight, at the tail of the service day.
    pub next_day: bool,
}

impl Departure {
    /// Position within the service day.
    fn service_order(&self) -> (bool, NaiveTime) {
        (self.next_day, self.time)
    }
}

impl fmt::Display for Departure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.route, self.time.format("%-I:%M %p"))
    }
}

/// A schedule to draw departures from, and the route name to show for runs
/// that carry no route label of their own.
#[derive(Debug, Clone, Copy)]
pub struct BoardSource<'a> {
    pub route: &'a str,
    pub station: &'a str,
    pub schedule: &'a Schedule,
}

impl<'a> BoardSource<'a> {
    /// The board source for a watched stop, if `result` runs in the stop's
    /// direction.
    pub fn for_stop(stop: &'a WatchedStop, result: &'a ScheduleResult) -> Option<Self> {
        if result.direction.code() != stop.direction {
            return None;
        }
        Some(Self {
            route: &stop.route,
            station: &stop.station,
            schedule: &result.schedules,
        })
    }

    fn departures(&self) -> Vec<Departure> {
        let entries = self.schedule.get(self.station).unwrap_or_default();
        if entries.is_empty() {
            trace!(route = self.route, station = self.station, "no stops for station");
        }

        let mut first = None;
        entries
            .iter()
            .filter_map(|entry| {
                let time = parse_stop_time(&entry.time).ok()?;
                let start = *first.get_or_insert(time);
                Some(Departure {
                    time,
                    route: entry.route.as_deref().unwrap_or(self.route).to_string(),
                    next_day: time < start,
                })
            })
            .collect()
    }
}

/// The next `limit` departures at or after `after`, across all sources.
///
/// Entries whose text isn't a clock time are skipped, as are sources that
/// don't serve the station. Ties keep source order.
///
/// `after` counts as past midnight when it is no later than the last
/// next-day run on the board; the board then holds only those remaining
/// runs. It never reaches into the following service day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use transit_schedule::departures::{BoardSource, next_departures};
/// use transit_schedule::domain::{Schedule, StopEntry};
///
/// let mut schedule = Schedule::new();
/// schedule.register("Union Station".into(), " (return)");
/// let column = schedule.column_mut(0).unwrap();
/// column.push(StopEntry::new("8:05A", None));
/// column.push(StopEntry::new("9:05A", None));
/// column.push(StopEntry::new("12:20A", None));
///
/// let source = BoardSource { route: "15", station: "Union Station", schedule: &schedule };
/// let board = next_departures(&[source], NaiveTime::from_hms_opt(8, 30, 0).unwrap(), 4);
///
/// let shown: Vec<String> = board.iter().map(|d| d.to_string()).collect();
/// assert_eq!(shown, ["15 9:05 AM", "15 12:20 AM"]);
/// ```
pub fn next_departures(sources: &[BoardSource<'_>], after: NaiveTime, limit: usize) -> Vec<Departure> {
    let mut board: Vec<Departure> = sources.iter().flat_map(|source| source.departures()).collect();

    let last_late_run = board.iter().filter(|d| d.next_day).map(|d| d.time).max();
    let cutoff = (last_late_run.is_some_and(|last| after <= last), after);
    board.retain(|d| d.service_order() >= cutoff);

    board.sort_by_key(Departure::service_order);
    board.truncate(limit);
    board
}
