//! Schedule source names and request URLs.
//!
//! Hosts name what they want as a short path-like string:
//!
//! - `Routes`: the route list
//! - `Schedule/<query>[/<day>[/<direction>]]`: one schedule page, where
//!   `<query>` comes from the route list, `<day>` is a day name or `Today`,
//!   and `<direction>` is a direction code.
//! - `NextStops [<route>-<direction>:<station>,...] <count>`: a departure
//!   board merging several routes.

use chrono::NaiveDate;
use url::Url;

use crate::domain::ServiceDay;

/// Schedule page endpoint.
pub const SCHEDULE_URL: &str = "http://www3.rtd-denver.com/schedules/getSchedule.action";

/// Route menu endpoint.
pub const ROUTE_LIST_URL: &str = "http://www3.rtd-denver.com/schedules/ajax/getAjaxRouteMenu.action";

/// Error from parsing a source name or building its URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// The name isn't `Routes` or `Schedule/...`
    #[error("unknown source: {0}")]
    Unknown(String),

    /// A `Schedule/` name with too few or too many parts
    #[error("schedule source needs 2 to 4 parts, got {0}")]
    PartCount(usize),

    /// The route query part is empty
    #[error("schedule source has an empty route query")]
    EmptyQuery,

    /// A `NextStops` name that doesn't follow `NextStops [...] <count>`
    #[error("malformed next stops request: {0}")]
    NextStops(String),

    /// A base URL didn't parse
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

/// What a host asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The list of routes.
    Routes,
    /// One schedule page.
    Schedule(ScheduleSource),
    /// A departure board.
    NextStops(NextStopsRequest),
}

impl Source {
    /// Parse a source name.
    pub fn parse(name: &str) -> Result<Self, SourceError> {
        if name == "Routes" {
            return Ok(Source::Routes);
        }
        if name.starts_with("Schedule/") {
            return ScheduleSource::parse(name).map(Source::Schedule);
        }
        if name.starts_with("NextStops ") {
            return NextStopsRequest::parse(name).map(Source::NextStops);
        }
        Err(SourceError::Unknown(name.to_string()))
    }
}

/// A request for one schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSource {
    /// Route query string from the route list.
    pub query: String,

    /// Requested timetable; `None` means whatever runs on the day asked.
    pub day: Option<ServiceDay>,

    /// Requested direction code; `None` leaves it to the server.
    pub direction: Option<String>,
}

impl ScheduleSource {
    /// Parse `Schedule/<query>[/<day>[/<direction>]]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_schedule::domain::ServiceDay;
    /// use transit_schedule::routes::ScheduleSource;
    ///
    /// let s = ScheduleSource::parse("Schedule/routeId=B/Saturday/E").unwrap();
    /// assert_eq!(s.query, "routeId=B");
    /// assert_eq!(s.day, Some(ServiceDay::Saturday));
    /// assert_eq!(s.direction.as_deref(), Some("E"));
    /// ```
    pub fn parse(name: &str) -> Result<Self, SourceError> {
        let parts: Vec<&str> = name.split('/').collect();
        if parts.first() != Some(&"Schedule") {
            return Err(SourceError::Unknown(name.to_string()));
        }
        if !(2..=4).contains(&parts.len()) {
            return Err(SourceError::PartCount(parts.len()));
        }

        let query = parts[1];
        if query.is_empty() {
            return Err(SourceError::EmptyQuery);
        }

        let day = parts
            .get(2)
            .filter(|d| **d != "Today")
            .map(|d| ServiceDay::from_name(d));
        let direction = parts
            .get(3)
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string());

        Ok(Self {
            query: query.to_string(),
            day,
            direction,
        })
    }

    /// The timetable to fetch when asking on `today`.
    pub fn service_day(&self, today: NaiveDate) -> ServiceDay {
        self.day.unwrap_or_else(|| ServiceDay::for_date(today))
    }

    /// The schedule page URL for this source on `today`.
    pub fn url(&self, base: &str, today: NaiveDate) -> Result<Url, SourceError> {
        let mut url = parse_url(base)?;

        let mut query = format!(
            "{}&serviceType={}",
            self.query,
            self.service_day(today).service_type()
        );
        if let Some(direction) = &self.direction {
            query.push_str("&direction=");
            query.push_str(direction);
        }
        url.set_query(Some(&query));

        Ok(url)
    }
}

/// One route and direction to watch at a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedStop {
    pub route: String,
    pub direction: String,
    pub station: String,
}

/// A departure board request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextStopsRequest {
    pub stops: Vec<WatchedStop>,
    pub count: usize,
}

impl NextStopsRequest {
    /// Parse `NextStops [<route>-<direction>:<station>,...] <count>`.
    ///
    /// Route labels may themselves contain `/` (`B/BF/BX`); the direction is
    /// whatever follows the last `-` before the `:`.
    pub fn parse(name: &str) -> Result<Self, SourceError> {
        let malformed = || SourceError::NextStops(name.to_string());

        let body = name
            .strip_prefix("NextStops [")
            .ok_or_else(malformed)?;
        let (list, count) = body.rsplit_once(']').ok_or_else(malformed)?;
        let count = count.trim().parse().map_err(|_| malformed())?;

        let stops = list
            .split(',')
            .map(|item| {
                let (route_dir, station) = item.split_once(':')?;
                let (route, direction) = route_dir.rsplit_once('-')?;
                if route.is_empty() || station.is_empty() {
                    return None;
                }
                Some(WatchedStop {
                    route: route.to_string(),
                    direction: direction.to_string(),
                    station: station.to_string(),
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(malformed)?;

        Ok(Self { stops, count })
    }
}

/// The route list URL.
pub fn route_list_url(base: &str) -> Result<Url, SourceError> {
    parse_url(base)
}

fn parse_url(s: &str) -> Result<Url, SourceError> {
    Url::parse(s).map_err(|e| SourceError::InvalidUrl {
        url: s.to_string(),
        message: e.to_string(),
    })
}
