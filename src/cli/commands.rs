use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::manifest::RouteManifest;
use crate::pattern::CompiledPattern;
use crate::request::State;
use crate::router::Router;

/// Command-line interface for navrouter
#[derive(Parser, Debug)]
#[command(name = "navrouter")]
#[command(about = "Dispatch URLs against a navrouter route manifest", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch URLs and print what each one produced
    Dispatch {
        /// Path to the route manifest (YAML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// JSON object passed as navigation state
        #[arg(short, long)]
        state: Option<String>,

        /// URLs to dispatch; read JSON events from stdin when empty
        urls: Vec<String>,
    },
    /// List registered routes and their matchers
    Routes {
        /// Path to the route manifest (YAML)
        #[arg(short, long)]
        manifest: PathBuf,
    },
}

/// A navigation event read from stdin.
#[derive(Debug, Deserialize)]
struct NavigationEvent {
    url: Value,
    #[serde(default)]
    state: Option<State>,
}

/// Run `cli`, reading events from `input` and writing results to `out`.
pub fn run_cli(cli: Cli, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    match cli.command {
        Commands::Dispatch {
            manifest,
            state,
            urls,
        } => {
            let router = RouteManifest::from_yaml_file(&manifest)?.build_router()?;
            let state = state
                .map(|raw| serde_json::from_str::<State>(&raw))
                .transpose()
                .context("--state must be a JSON object")?;
            dispatch(&router, state.as_ref(), &urls, input, out)
        }
        Commands::Routes { manifest } => {
            let router = RouteManifest::from_yaml_file(&manifest)?.build_router()?;
            list_routes(&router, out)
        }
    }
}

fn dispatch(
    router: &Router,
    state: Option<&State>,
    urls: &[String],
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let results = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    let subscription = router.subscribe(move |value| sink.borrow_mut().push(value));

    if let Some(initial) = &router.config().initial {
        flush(initial, &results, out)?;
    }

    if urls.is_empty() {
        for (number, line) in input.lines().enumerate() {
            let line = line.context("Failed to read navigation event")?;
            if line.trim().is_empty() {
                continue;
            }
            let event: NavigationEvent = serde_json::from_str(&line)
                .with_context(|| format!("Invalid navigation event on line {}", number + 1))?;
            router
                .execute_value(&event.url, event.state.as_ref().or(state))
                .with_context(|| format!("Rejected navigation event on line {}", number + 1))?;
            flush(event.url.as_str().unwrap_or_default(), &results, out)?;
        }
    } else {
        for url in urls {
            router.execute(url, state);
            flush(url, &results, out)?;
        }
    }

    subscription.unsubscribe();
    Ok(())
}

fn flush(url: &str, results: &Rc<RefCell<Vec<Value>>>, out: &mut impl Write) -> Result<()> {
    let drained: Vec<Value> = results.borrow_mut().drain(..).collect();
    if drained.is_empty() {
        writeln!(out, "{}", json!({ "url": url, "result": Value::Null }))?;
    }
    for result in drained {
        writeln!(out, "{}", json!({ "url": url, "result": result }))?;
    }
    Ok(())
}

fn list_routes(router: &Router, out: &mut impl Write) -> Result<()> {
    write_patterns("use", router.middleware_patterns(), out)?;
    write_patterns("route", router.routes(), out)?;
    write_patterns("catch", router.catch_routes(), out)
}

fn write_patterns<'p>(
    kind: &str,
    patterns: impl Iterator<Item = &'p CompiledPattern>,
    out: &mut impl Write,
) -> Result<()> {
    for pattern in patterns {
        writeln!(out, "{kind:<6} /{:<32} {}", pattern.route_path(), pattern.matcher())?;
    }
    Ok(())
}
