//! Transit schedule extraction.
//!
//! Turns a transit operator's schedule page into structured data: which
//! stations a route serves, when each run stops at each station, which
//! route variants run, and which direction the page describes.

pub mod cache;
pub mod departures;
pub mod domain;
pub mod extract;
pub mod routes;
pub mod tree;
