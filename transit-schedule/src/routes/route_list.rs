//! Route list scraping.
//!
//! The operator's schedule menu is backed by a JavaScript object literal
//! listing every route as `{ text: "<name>", url: "<page>?<query>" }`. We
//! don't evaluate it; we scan it for `text:`/`url:` pairs.

use std::collections::BTreeMap;

use tracing::{debug, trace};

/// Route name to schedule query string, e.g.
/// `"B - Boulder/Denver"` → `"routeType=0&routeId=B"`.
pub type RouteList = BTreeMap<String, String>;

/// Scan a route menu blob for route names and their query strings.
///
/// Each `text: "<name>"` is paired with the next `url: "<...>"`. Pairs
/// whose URL has no query string are skipped. A truncated pair ends the
/// scan; everything found before it is kept.
///
/// # Examples
///
/// ```
/// use transit_schedule::routes::parse_route_list;
///
/// let menu = r#"[{text: "15 - East Colfax", url: "/schedules/getSchedule.action?routeId=15"}]"#;
/// let routes = parse_route_list(menu);
/// assert_eq!(routes["15 - East Colfax"], "routeId=15");
/// ```
pub fn parse_route_list(menu: &str) -> RouteList {
    let mut routes = RouteList::new();
    let mut rest = menu;

    while let Some((name, url, remaining)) = next_pair(rest) {
        rest = remaining;

        match url.split_once('?') {
            Some((_, query)) if !query.is_empty() => {
                trace!(route = name, query, "found route");
                routes.insert(name.to_string(), query.to_string());
            }
            _ => trace!(route = name, url, "route url has no query, skipping"),
        }
    }

    debug!(routes = routes.len(), "parsed route list");
    routes
}

/// Find the next `text:` / `url:` pair, returning both quoted values and
/// the unscanned remainder.
fn next_pair(s: &str) -> Option<(&str, &str, &str)> {
    let after_text = &s[s.find("text:")? + "text:".len()..];
    let (name, after_name) = quoted(after_text)?;

    let after_url = &after_name[after_name.find("url:")? + "url:".len()..];
    let (url, remaining) = quoted(after_url)?;

    Some((name, url, remaining))
}

/// The contents of the first double-quoted string in `s`, and what follows
/// its closing quote.
fn quoted(s: &str) -> Option<(&str, &str)> {
    let open = s.find('"')? + 1;
    let len = s[open..].find('"')?;
    Some((&s[open..open + len], &s[open + len + 1..]))
}
