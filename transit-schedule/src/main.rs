//! Schedule extraction CLI.
//!
//! Works on pages the caller has already saved: schedule pages, the route
//! menu script. Results go to stdout as JSON or plain text; logs go to
//! stderr.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use transit_schedule::cache::{CacheError, CacheKey, ScheduleCache, ScheduleCacheConfig};
use transit_schedule::departures::{BoardSource, next_departures};
use transit_schedule::domain::parse_stop_time;
use transit_schedule::extract::{ExtractError, Extractor, ExtractorConfig, ScheduleResult, Variant};
use transit_schedule::routes::{
    ROUTE_LIST_URL, SCHEDULE_URL, Source, SourceError, parse_route_list, route_list_url,
};
use transit_schedule::tree::HtmlTree;

#[derive(Parser)]
#[command(name = "transit-schedule")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a schedule page to JSON
    Extract {
        /// Saved schedule page
        page: PathBuf,

        /// Use the basic grid algorithm (shorthand for `--variant basic`)
        #[arg(long)]
        basic: bool,

        /// Grid algorithm: basic or refined
        #[arg(long, env = "SCHEDULE_VARIANT", default_value = "refined", value_parser = parse_variant)]
        variant: Variant,

        /// Cache results in this directory, keyed by `--source`
        #[arg(long, requires = "source")]
        cache: Option<PathBuf>,

        /// Source name the page was fetched for, e.g. `Schedule/routeId=B/Today/E`
        #[arg(long)]
        source: Option<String>,

        /// Date to resolve `Today` against (defaults to the local date)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List routes from a saved route menu script
    Routes {
        /// Saved route menu
        menu: PathBuf,
    },

    /// Print the URL to fetch for a source name
    Url {
        /// `Routes` or `Schedule/<query>[/<day>[/<direction>]]`
        source: String,

        /// Date to resolve `Today` against (defaults to the local date)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show the next departures for a set of watched stops
    Departures {
        /// `NextStops [<route>-<direction>:<station>,...] <count>`
        request: String,

        /// Saved page for each watched route, as `<route>-<direction>=<page.html>`
        #[arg(long = "page", required = true, value_parser = parse_route_page)]
        pages: Vec<(String, PathBuf)>,

        /// Earliest departure, e.g. `8:05A` (defaults to now)
        #[arg(long, value_parser = parse_stop_time)]
        after: Option<NaiveTime>,

        /// How many departures to show (defaults to the request's count)
        #[arg(long)]
        count: Option<usize>,

        /// Date the board is for (defaults to the local date)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("failed to write json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_name(s).ok_or_else(|| format!("unknown variant '{s}', expected basic or refined"))
}

fn parse_route_page(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((route, page)) if !route.is_empty() && !page.is_empty() => {
            Ok((route.to_string(), PathBuf::from(page)))
        }
        _ => Err(format!("expected <route>-<direction>=<page.html>, got '{s}'")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Extract {
            page,
            basic,
            variant,
            cache,
            source,
            date,
        } => {
            let variant = if basic { Variant::Basic } else { variant };
            let today = date.unwrap_or_else(|| Local::now().date_naive());

            let cached = match (cache, source) {
                (Some(dir), Some(source)) => Some((
                    ScheduleCache::new(ScheduleCacheConfig::new(dir)),
                    cache_key(&source, today, variant)?,
                )),
                _ => None,
            };

            if let Some((cache, key)) = &cached
                && let Some(result) = cache.load_effective(key, today)
            {
                info!(path = %cache.path_for(key).display(), "using cached schedule");
                return print_json(&result);
            }

            let result = extract_page(&page, variant)?;
            if let Some((cache, key)) = &cached {
                cache.save(key, &result)?;
            }
            print_json(&result)
        }

        Commands::Routes { menu } => {
            let routes = parse_route_list(&read(&menu)?);
            info!(routes = routes.len(), "parsed route menu");
            print_json(&routes)
        }

        Commands::Url { source, date } => {
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let url = match Source::parse(&source)? {
                Source::Routes => route_list_url(ROUTE_LIST_URL)?,
                Source::Schedule(schedule) => schedule.url(SCHEDULE_URL, today)?,
                Source::NextStops(_) => {
                    return Err(CliError::Usage(
                        "a next stops board spans several pages and has no single url".into(),
                    ));
                }
            };
            println!("{url}");
            Ok(())
        }

        Commands::Departures {
            request,
            pages,
            after,
            count,
            date,
        } => {
            let Source::NextStops(request) = Source::parse(&request)? else {
                return Err(CliError::Usage(format!(
                    "departures needs a NextStops request, got '{request}'"
                )));
            };
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let after = after.unwrap_or_else(|| Local::now().time());
            let count = count.unwrap_or(request.count);

            let results = pages
                .iter()
                .map(|(name, page)| -> Result<_, CliError> {
                    let result = extract_page(page, Variant::default())?;
                    if !result.valid_as_of.is_effective_on(today) {
                        warn!(
                            page = %page.display(),
                            valid_as_of = %result.valid_as_of,
                            "schedule not in effect yet"
                        );
                    }
                    Ok((name.as_str(), result))
                })
                .collect::<Result<Vec<_>, CliError>>()?;

            let mut sources = Vec::with_capacity(request.stops.len());
            for stop in &request.stops {
                let name = format!("{}-{}", stop.route, stop.direction);
                let Some((_, result)) = results.iter().find(|(n, _)| *n == name) else {
                    return Err(CliError::Usage(format!("no --page given for {name}")));
                };
                match BoardSource::for_stop(stop, result) {
                    Some(source) => sources.push(source),
                    None => warn!(
                        stop = %name,
                        page_direction = %result.direction.code(),
                        "page runs in another direction, skipping"
                    ),
                }
            }

            let board = next_departures(&sources, after, count);
            if board.is_empty() {
                info!("no more departures");
            }
            for departure in board {
                println!("{departure}");
            }
            Ok(())
        }
    }
}

fn cache_key(source: &str, today: NaiveDate, variant: Variant) -> Result<CacheKey, CliError> {
    match Source::parse(source)? {
        Source::Schedule(s) => {
            let day = s.service_day(today);
            Ok(CacheKey::new(s.query, day, s.direction, variant))
        }
        _ => Err(CliError::Usage(format!(
            "cache key needs a Schedule/ source, got '{source}'"
        ))),
    }
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn extract_page(page: &Path, variant: Variant) -> Result<ScheduleResult, CliError> {
    let tree = HtmlTree::parse(&read(page)?);
    let extractor = Extractor::new(ExtractorConfig::new(variant))?;
    let result = extractor.extract(&tree)?;

    debug!(
        page = %page.display(),
        stations = result.schedules.len(),
        stops = result.schedules.entry_count(),
        "extracted schedule"
    );
    for warning in &result.warnings {
        info!(page = %page.display(), ?warning, "extraction warning");
    }
    Ok(result)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
