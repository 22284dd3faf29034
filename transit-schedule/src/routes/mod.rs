//! Route discovery and schedule request naming.
//!
//! Fetching pages is the host's job; this module only reads the route menu
//! the host fetched and tells it which URL a schedule source maps to.

mod route_list;
mod source;

pub use route_list::{RouteList, parse_route_list};
pub use source::{
    NextStopsRequest, ROUTE_LIST_URL, SCHEDULE_URL, ScheduleSource, Source, SourceError,
    WatchedStop, route_list_url,
};
