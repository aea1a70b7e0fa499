//! Interactive command handler
//!
//! Each stdin line is the full current text of the search field. Lines are
//! debounced into queries, results are printed as a pin list and a carousel,
//! and `:select` / `:pin` taps are mirrored between the two. `:route` draws
//! directions on a separate directions map, leaving search results alone.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::geo::{get_gateway, Coordinates};
use crate::route::{get_router, request_directions, Route, RouteRequest};
use crate::search::debounce;
use crate::search::{Annotation, ListEntry, ListSurface, MapSurface, ScrollAlignment};
use crate::search::{SearchController, UiEvent};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};

/// Interactive command arguments
#[derive(Args)]
pub struct InteractiveArgs {
    /// Search backend (nominatim, memory)
    #[arg(long, short = 'b')]
    pub backend: Option<String>,

    /// Quiet interval in milliseconds before a line is searched
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Don't bias results to the configured viewport
    #[arg(long)]
    pub anywhere: bool,
}

/// One parsed line of input
#[derive(Debug, PartialEq)]
enum Input {
    /// New search field contents
    Text(String),
    /// Tap the carousel card at this index
    Select(usize),
    /// Tap the pin with this title
    Pin(String),
    /// Directions between two coordinates
    Route(Coordinates, Coordinates),
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Text(line.to_string());
    };

    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    let arg = arg.trim();
    match name {
        "select" => arg
            .parse()
            .map(Input::Select)
            .unwrap_or_else(|_| Input::Invalid(format!("not an index: {:?}", arg))),
        "pin" if !arg.is_empty() => Input::Pin(arg.to_string()),
        "pin" => Input::Invalid("usage: :pin NAME".to_string()),
        "route" => parse_route(arg).unwrap_or_else(|| {
            Input::Invalid("usage: :route LAT,LNG LAT,LNG".to_string())
        }),
        "quit" | "q" => Input::Quit,
        _ => Input::Invalid(format!("unknown command :{}", name)),
    }
}

fn parse_route(arg: &str) -> Option<Input> {
    let mut parts = arg.split_whitespace();
    let origin = parts.next()?.parse().ok()?;
    let destination = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Input::Route(origin, destination))
}

/// Prints pins, optionally publishing them for the input loop to tap on
struct ConsoleMap {
    label: &'static str,
    pins: Option<watch::Sender<Vec<Annotation>>>,
}

impl ConsoleMap {
    /// The search results map; its pins are what `:pin` taps
    fn search(pins: watch::Sender<Vec<Annotation>>) -> Self {
        Self {
            label: "map",
            pins: Some(pins),
        }
    }

    fn directions() -> Self {
        Self {
            label: "directions",
            pins: None,
        }
    }
}

impl MapSurface for ConsoleMap {
    fn replace_annotations(&mut self, annotations: &[Annotation]) {
        println!("{}: {} pin(s)", self.label, annotations.len());
        for pin in annotations {
            let c = pin.coordinate();
            println!("  * {} ({:.5}, {:.5})", pin.title(), c.lat, c.lng);
        }
        if let Some(pins) = &self.pins {
            pins.send_replace(annotations.to_vec());
        }
    }

    fn select_annotation(&mut self, annotation: &Annotation) {
        println!("{}: selected {}", self.label, annotation.title());
    }

    fn add_overlays(&mut self, routes: &[Route]) {
        println!("{}: {} route overlay(s)", self.label, routes.len());
        for route in routes {
            println!(
                "  ~ {:.1} km, {} point(s)",
                route.distance_meters / 1000.0,
                route.polyline.len()
            );
        }
    }
}

/// First pin on the search map with this title
fn find_pin(pins: &watch::Receiver<Vec<Annotation>>, name: &str) -> Option<Annotation> {
    pins.borrow().iter().find(|a| a.title() == name).cloned()
}

#[derive(Default)]
struct ConsoleList {
    entries: Vec<ListEntry>,
}

impl ListSurface for ConsoleList {
    fn replace_items(&mut self, entries: &[ListEntry]) {
        self.entries = entries.to_vec();
        if entries.is_empty() {
            println!("carousel: empty");
            return;
        }
        println!("carousel:");
        for entry in entries {
            if entry.item.address.is_empty() {
                println!("  [{}] {}", entry.position, entry.item.name);
            } else {
                println!("  [{}] {} | {}", entry.position, entry.item.name, entry.item.address);
            }
        }
    }

    fn scroll_to(&mut self, index: usize, _alignment: ScrollAlignment, _animated: bool) {
        if let Some(entry) = self.entries.get(index) {
            println!("carousel: centered [{}] {}", index, entry.item.name);
        }
    }
}

/// Run the interactive command
pub async fn run(args: InteractiveArgs) -> Result<()> {
    let config = Config::load()?;

    let backend = args.backend.as_deref().unwrap_or(&config.search.backend);
    let gateway = Arc::new(get_gateway(backend, config.search.limit)?);
    let router = get_router(&config.route.backend, &config.route.profile)?;
    let quiet = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.debounce());
    let region = if args.anywhere {
        None
    } else {
        config.search_region()
    };

    let (raw_tx, raw_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(16);
    let (pins_tx, pins_rx) = watch::channel(Vec::new());

    let controller =
        SearchController::new(gateway, ConsoleMap::search(pins_tx), ConsoleList::default())
            .with_region(region);
    let worker = tokio::spawn(controller.run(debounce::spawn(quiet, raw_rx), ui_rx));

    let mut directions_map = ConsoleMap::directions();

    eprintln!("Type to search. Commands: :select INDEX, :pin NAME, :route FROM TO, :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let event = match parse_line(&line) {
            Input::Text(text) => {
                if raw_tx.send(text).await.is_err() {
                    break;
                }
                continue;
            }
            Input::Select(index) => UiEvent::ItemTapped(index),
            Input::Pin(name) => {
                match find_pin(&pins_rx, &name) {
                    Some(pin) => UiEvent::AnnotationTapped(pin),
                    None => {
                        eprintln!("no pin named {:?}", name);
                        continue;
                    }
                }
            }
            Input::Route(origin, destination) => {
                let request =
                    RouteRequest::new(origin, destination).with_alternates(config.route.alternates);
                if let Err(e) = request_directions(&router, &request, &mut directions_map).await {
                    eprintln!("directions unavailable: {}", e);
                }
                continue;
            }
            Input::Quit => break,
            Input::Invalid(message) => {
                eprintln!("{}", message);
                continue;
            }
        };

        if ui_tx.send(event).await.is_err() {
            break;
        }
    }

    drop(raw_tx);
    drop(ui_tx);
    worker
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::memory::InMemoryGateway;
    use crate::route::straight::StraightLineRouter;

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_line("apple park"), Input::Text("apple park".to_string()));
        assert_eq!(parse_line(""), Input::Text(String::new()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line(":select 2"), Input::Select(2));
        assert_eq!(parse_line(":pin Apple Park"), Input::Pin("Apple Park".to_string()));
        assert_eq!(parse_line(":quit"), Input::Quit);
        assert_eq!(parse_line(":q"), Input::Quit);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_line(":select two"), Input::Invalid(_)));
        assert!(matches!(parse_line(":pin"), Input::Invalid(_)));
        assert!(matches!(parse_line(":zoom 3"), Input::Invalid(_)));
        assert!(matches!(parse_line(":route 37.7,-122.4"), Input::Invalid(_)));
        assert!(matches!(parse_line(":route 95,0 37.3,-122.0"), Input::Invalid(_)));
    }

    #[test]
    fn test_parse_route() {
        assert_eq!(
            parse_line(":route 37.7666,-122.42729 37.331352,-122.030331"),
            Input::Route(
                Coordinates::new(37.7666, -122.42729),
                Coordinates::new(37.331352, -122.030331)
            )
        );
    }

    #[test]
    fn test_console_map_publishes_snapshot() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut map = ConsoleMap::search(tx);
        let pin = Annotation::pin(Coordinates::new(37.0, -122.0), "Starting Point");

        map.replace_annotations(std::slice::from_ref(&pin));
        assert_eq!(*rx.borrow(), vec![pin]);
    }

    #[tokio::test]
    async fn test_route_leaves_search_pins_selectable() {
        let (tx, rx) = watch::channel(Vec::new());
        let mut controller = SearchController::new(
            Arc::new(InMemoryGateway::bay_area()),
            ConsoleMap::search(tx),
            ConsoleList::default(),
        );
        controller.submit("apple");
        let completion = controller.next_completion().await.unwrap();
        controller.handle_completion(completion);

        let request = RouteRequest::new(
            Coordinates::new(37.7666, -122.42729),
            Coordinates::new(37.331352, -122.030331),
        );
        let mut directions = ConsoleMap::directions();
        request_directions(&StraightLineRouter, &request, &mut directions)
            .await
            .unwrap();

        // :pin still resolves against the search results
        let pin = find_pin(&rx, "Apple Park").unwrap();
        assert!(find_pin(&rx, "Starting Point").is_none());
        assert_eq!(rx.borrow().len(), 4);

        // :select 0 highlights a pin the search map is showing
        let selected = controller.select_item(0).unwrap();
        assert_eq!(selected, pin);
        assert!(rx.borrow().contains(&selected));
    }
}
