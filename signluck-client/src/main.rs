use std::error::Error;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{OnceCell, watch};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use signluck_client::api::{ApiClient, ApiConfig};
use signluck_client::cache::{CacheConfig, CachedLookup};
use signluck_client::domain::{Coordinates, Country, Language, find_country};
use signluck_client::engine::{DisplayState, EngineConfig, RouteOutcome, SearchEngine, spawn_language_reactor};
use signluck_client::geo::ConfiguredSensor;

type Engine = SearchEngine<CachedLookup<ApiClient>, ApiClient, ConfiguredSensor>;

/// Country list, fetched on first use and shared by later route requests.
type Directory = Arc<OnceCell<Vec<Country>>>;

/// A line of user input.
#[derive(Debug, PartialEq)]
enum Command {
    /// Replace the query with this text (possibly empty).
    Query(String),
    Route,
    RouteFrom(String),
    Clear,
    /// Switch to the given language, or toggle when none is given.
    Language(Option<Language>),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut words = rest.split_whitespace();
        match (words.next(), words.next()) {
            (Some("route"), None) => Command::Route,
            (Some("from"), Some(code)) => Command::RouteFrom(code.to_string()),
            (Some("clear"), None) => Command::Clear,
            (Some("lang"), None) => Command::Language(None),
            (Some("lang"), Some(code)) => match code.parse() {
                Ok(language) => Command::Language(Some(language)),
                Err(_) => Command::Unknown(line.to_string()),
            },
            (Some("help"), None) => Command::Help,
            (Some("quit"), None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Type plate characters to search. Commands:
  :route        build a route from your position
  :from XX      build a route starting from country XX
  :clear        reset query, matches and route
  :lang [ru|en] switch language (toggles without argument)
  :quit         exit";

fn env_language() -> Language {
    match std::env::var("SIGNLUCK_LANG") {
        Ok(code) => code.parse().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring SIGNLUCK_LANG");
            Language::default()
        }),
        Err(_) => Language::default(),
    }
}

fn env_position() -> Option<Coordinates> {
    let lat = std::env::var("SIGNLUCK_LAT").ok()?;
    let lng = std::env::var("SIGNLUCK_LNG").ok()?;
    match (lat.trim().parse(), lng.trim().parse()) {
        (Ok(lat), Ok(lng)) => Some(Coordinates::new(lat, lng)),
        _ => {
            warn!(%lat, %lng, "ignoring unparseable SIGNLUCK_LAT/SIGNLUCK_LNG");
            None
        }
    }
}

fn render(state: &DisplayState) {
    if state.query.is_empty() && state.route.is_empty() {
        println!("(empty)");
        return;
    }

    if !state.query.is_empty() {
        let loading = if state.matches_loading { " (searching...)" } else { "" };
        println!(
            "{}: {} countries, best {:.1}%{}",
            state.query,
            state.matches.total_results(),
            state.matches.max_probability(),
            loading
        );
        for m in state.matches.results() {
            let flag = m.flag_emoji.as_deref().unwrap_or("  ");
            println!("  {flag} {:<24} {:>6.2}%  {}", m.country_name, m.probability, m.pattern);
        }
    }

    if state.route_loading {
        println!("route: building...");
    } else if !state.route.is_empty() {
        println!("route:");
        for (i, leg) in state.route.iter().enumerate() {
            println!("  {}. {} ({:.1}%) {}", i + 1, leg.country_name, leg.probability, leg.booking_url);
        }
    }
}

fn build_engine(client: ApiClient, language: Language, position: Option<Coordinates>) -> Engine {
    let lookup = CachedLookup::new(client.clone(), &CacheConfig::default());
    let sensor = ConfiguredSensor::from_position(position);
    let config = EngineConfig::default().with_language(language);
    SearchEngine::new(lookup, client, sensor, config)
}

/// Route from the centre of `code` in the background.
///
/// Yields `None` when the directory is unavailable or the code is unknown.
fn spawn_route_from(
    engine: Engine,
    client: ApiClient,
    directory: Directory,
    code: String,
) -> JoinHandle<Option<RouteOutcome>> {
    tokio::spawn(async move {
        let countries = match directory.get_or_try_init(|| client.countries()).await {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "failed to fetch country directory");
                return None;
            }
        };

        let Some(country) = find_country(countries, &code) else {
            println!("unknown country code: {code}");
            return None;
        };

        let language = engine.language().await;
        info!(country = country.name_in(language), "routing from chosen country");
        Some(engine.build_route_from(country.coordinates()).await)
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("signluck_client=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let api_config = match std::env::var("SIGNLUCK_API_URL") {
        Ok(url) => ApiConfig::new(url),
        Err(_) => ApiConfig::default(),
    };
    let client = ApiClient::new(api_config)?;

    match client.health().await {
        Ok(health) if health.is_ok() => info!(base_url = client.base_url(), "backend is up"),
        Ok(health) => warn!(status = %health.status, "backend reports unhealthy"),
        Err(e) => warn!(error = %e, "backend unreachable, lookups will fail until it is up"),
    }

    let language = env_language();
    let position = env_position();
    info!(%language, located = position.is_some(), "starting");

    let engine = build_engine(client.clone(), language, position);

    let (language_tx, language_rx) = watch::channel(language);
    let reactor = spawn_language_reactor(engine.clone(), language_rx);

    let mut states = engine.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let directory = Directory::default();

    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Command::parse(&line) {
                    Command::Query(text) => engine.set_query(text).await,
                    Command::Route => {
                        let build = engine.trigger_route_build();
                        tokio::spawn(async move {
                            if let Ok(RouteOutcome::Skipped) = build.await {
                                println!("type a query before asking for a route");
                            }
                        });
                    }
                    Command::RouteFrom(code) => {
                        spawn_route_from(engine.clone(), client.clone(), directory.clone(), code);
                    }
                    Command::Clear => engine.clear().await,
                    Command::Language(choice) => {
                        let next = choice.unwrap_or_else(|| language_tx.borrow().toggle());
                        language_tx.send_replace(next);
                        println!("language: {next}");
                    }
                    Command::Help => println!("{HELP}"),
                    Command::Quit => break,
                    Command::Unknown(text) => println!("unknown command: {text} (:help for a list)"),
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                render(&state);
            }
        }
    }

    drop(language_tx);
    reactor.await?;
    Ok(())
}
