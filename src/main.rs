use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shrike::{
    cache_key, CacheStore, Entry, HttpTransport, LanguageLoader, LoadOptions, LoadOutcome,
    MIN_PATTERN_LEN,
};

mod cli;
use cli::{CacheCommands, Cli, Commands, LoadArgs};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Load { args } => run_load(&args),
        Commands::Query { args, pattern } => run_query(&args, &pattern),
        Commands::Cache { command } => match command {
            CacheCommands::Inspect { language, cache_dir } => run_cache_inspect(&language, cache_dir),
            CacheCommands::Clear { language, cache_dir } => run_cache_clear(&language, cache_dir),
        },
    };

    if let Err(e) = result {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}

fn open_store(cache_dir: Option<PathBuf>) -> Option<CacheStore> {
    match cache_dir {
        Some(root) => Some(CacheStore::with_root(root)),
        None => CacheStore::open_default(),
    }
}

fn build_loader(args: &LoadArgs) -> Result<LanguageLoader, Box<dyn Error>> {
    let transport = HttpTransport::new(args.base_url.clone())?;
    let cache = if args.no_cache {
        None
    } else {
        open_store(args.cache_dir.clone())
    };
    Ok(LanguageLoader::new(transport, cache))
}

fn load(args: &LoadArgs) -> Result<LoadOutcome, Box<dyn Error>> {
    let loader = build_loader(args)?;
    let options = LoadOptions {
        language: args.language.clone(),
        limit: args.limit,
    };
    Ok(loader.load_with(&options)?)
}

fn run_load(args: &LoadArgs) -> Result<(), Box<dyn Error>> {
    let outcome = load(args)?;
    print_provenance(args, &outcome);

    for (category, ranked) in outcome.ranked(args.limit) {
        println!("{} ({} entries)", category.label(), ranked.total);
        for entry in &ranked.entries {
            print_entry(entry);
        }
        let more = ranked.total.saturating_sub(args.limit);
        if more > 0 {
            println!("  » {more} more");
        }
        println!();
    }
    Ok(())
}

fn run_query(args: &LoadArgs, pattern: &str) -> Result<(), Box<dyn Error>> {
    let outcome = load(args)?;
    print_provenance(args, &outcome);

    let mut any = false;
    for (category, backend) in outcome.backends.iter() {
        let matches: Vec<Entry> = backend
            .export()
            .into_iter()
            .filter(|entry| entry.matches(pattern))
            .collect();
        if matches.is_empty() {
            continue;
        }
        any = true;

        println!("{} ({} matches)", category.label(), matches.len());
        for entry in matches.iter().take(args.limit) {
            print_entry(entry);
        }
        let more = matches.len().saturating_sub(args.limit);
        if more > 0 && pattern.len() >= MIN_PATTERN_LEN {
            println!("  » {more} more");
        }
        println!();
    }

    if !any {
        println!("no matches for '{pattern}'");
    }
    Ok(())
}

fn run_cache_inspect(language: &str, cache_dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let Some(store) = open_store(cache_dir) else {
        return Err("no usable cache directory".into());
    };
    let key = cache_key(language);
    let Some(record) = store.read(&key) else {
        println!("no snapshot for '{language}'");
        return Ok(());
    };

    let now = shrike::now_ms();
    let state = if record.is_fresh(now) { "fresh" } else { "stale" };
    println!(
        "snapshot for '{language}': {} days old ({state})",
        record.age_days(now)
    );
    for (category, backend) in record.data.iter() {
        println!("  {}: {} entries", category.label(), backend.len());
    }
    Ok(())
}

fn run_cache_clear(language: &str, cache_dir: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let Some(store) = open_store(cache_dir) else {
        return Err("no usable cache directory".into());
    };
    store.remove(&cache_key(language));
    println!("cleared snapshot for '{language}'");
    Ok(())
}

fn print_provenance(args: &LoadArgs, outcome: &LoadOutcome) {
    if outcome.language != args.language {
        eprintln!(
            "note: '{}' was unavailable, using '{}'",
            args.language, outcome.language
        );
    }
    if outcome.from_cache {
        eprintln!("(from cache)");
    } else if !outcome.described {
        eprintln!("(descriptions unavailable)");
    }
}

fn print_entry(entry: &Entry) {
    match &entry.description {
        Some(description) => println!("  {}  ({description})", entry.name),
        None => println!("  {}", entry.name),
    }
}
