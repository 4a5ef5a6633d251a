use std::env;
use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use tripfilter_catalogs::loader::{load_file, CollectionLoader};
use tripfilter_catalogs::{
    open, Catalog, CatalogKind, Destinations, Hotels, Resorts, Tours, Vehicles, Villas,
};
use tripfilter_core::config::Config;
use tripfilter_engine::{ActiveFilterChip, FacetOptions, FilterState};

struct Args {
    command: String,
    data: Option<PathBuf>,
    json: bool,
    assignments: Vec<(String, String)>,
}

fn usage(prog: &str) -> ! {
    eprintln!("Usage: {} <catalog|list> [--data FILE] [--json] [field=value ...]", prog);
    eprintln!("Catalogs: {}", CatalogKind::ALL.map(|k| k.name()).join(", "));
    std::process::exit(1)
}

fn parse_args() -> Args {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        usage(&prog);
    }
    let command = args.remove(0);
    let mut parsed = Args { command, data: None, json: false, assignments: Vec::new() };
    let mut rest = args.into_iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--json" => parsed.json = true,
            "--data" => match rest.next() {
                Some(path) => parsed.data = Some(PathBuf::from(path)),
                None => usage(&prog),
            },
            _ => match arg.split_once('=') {
                Some((field, value)) => parsed.assignments.push((field.to_string(), value.to_string())),
                None => {
                    eprintln!("Expected field=value, got '{}'", arg);
                    usage(&prog)
                }
            },
        }
    }
    parsed
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[derive(Serialize)]
struct Report<'a, T> {
    catalog: &'static str,
    total: usize,
    state: FilterState,
    chips: &'a [ActiveFilterChip],
    facets: &'a FacetOptions,
    items: Vec<&'a T>,
}

fn run<C: Catalog>(config: &Config, args: &Args) -> anyhow::Result<()> {
    let items = match &args.data {
        Some(path) => load_file::<C::Item>(path)?,
        None => CollectionLoader::new(config.data_dir()).load::<C>()?,
    };
    let (mut view, _keys) = open::<C>(config, items)?;
    for (field, value) in &args.assignments {
        view.set_parsed(field, value)
            .with_context(|| format!("setting {}={}", field, value))?;
    }
    tracing::info!(catalog = C::NAME, visible = view.visible_count(), chips = view.chips().len(), "filters applied");

    let facets = view.facets();
    if args.json {
        let report = Report {
            catalog: C::NAME,
            total: view.items().len(),
            state: view.state(),
            chips: view.chips(),
            facets: &facets,
            items: view.visible().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}: {} of {} shown", C::NAME, view.visible_count(), view.items().len());
    for item in view.visible() {
        println!("  {}", C::title(item));
    }
    if !view.chips().is_empty() {
        let labels: Vec<&str> = view.chips().iter().map(|c| c.label.as_str()).collect();
        println!("Active filters: {}", labels.join(" | "));
    }
    for (_, field) in view.schema().fields() {
        let name = field.name();
        let values = facets.values(name);
        if !values.is_empty() {
            let shown: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            println!("  {}: {}", field.title(), shown.join(", "));
        } else if let Some(bounds) = facets.bounds(name) {
            println!("  {}: {}", field.title(), bounds);
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    init_logging(&config);
    for name in config.unknown_ranges(&CatalogKind::ALL.map(|k| k.name())) {
        tracing::warn!(section = %format!("ranges.{}", name), "configured range matches no catalog");
    }
    let args = parse_args();

    if args.command == "list" {
        let loader = CollectionLoader::new(config.data_dir());
        for path in loader.list_collections() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    match args.command.parse::<CatalogKind>()? {
        CatalogKind::Hotels => run::<Hotels>(&config, &args),
        CatalogKind::Villas => run::<Villas>(&config, &args),
        CatalogKind::Resorts => run::<Resorts>(&config, &args),
        CatalogKind::Vehicles => run::<Vehicles>(&config, &args),
        CatalogKind::Destinations => run::<Destinations>(&config, &args),
        CatalogKind::Tours => run::<Tours>(&config, &args),
    }
}
