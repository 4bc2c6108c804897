use anyhow::Context;
use clap::Parser;
use reel_catalog::utils::error::{CatalogError, ErrorSeverity};
use reel_catalog::core::ConfigProvider;
use reel_catalog::utils::logger;
use reel_catalog::{CatalogEngine, CliConfig, DataStore, Genre, LocalStorage};

fn exit_code(e: &CatalogError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn report(e: &CatalogError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

fn run_queries(args: &CliConfig, store: &DataStore, delimiter: u8) -> anyhow::Result<()> {
    if let Some(name) = &args.film {
        match store.get_film(name) {
            Ok(entry) => println!("{}", entry.fields_line(delimiter)?),
            Err(e) => report(&e),
        }
    }

    if let Some(id) = args.subscription {
        match store.get_subscription(id) {
            Ok(entry) => println!("{}", entry.fields_line(delimiter)?),
            Err(e) => report(&e),
        }
    }

    if args.list_free {
        for film in store.catalog.list_free() {
            println!("{}", film);
        }
    }

    if let Some(code) = args.genre {
        let genre = Genre::from_code(code).with_context(|| format!("--genre {}", code))?;
        let entries = store.get_films_by_genre(genre);
        tracing::info!("{} film(s) in genre {}", entries.len(), genre.label());
        for entry in entries {
            println!("{}", entry.fields_line(delimiter)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.verbose());
    } else {
        logger::init_cli_logger(config.verbose());
    }

    tracing::info!("Starting reel-catalog {}", reel_catalog::core::store::VERSION);
    tracing::debug!("Effective config: {:?}", config);

    let delimiter = config.delimiter();
    let engine = CatalogEngine::new(LocalStorage::new("."), config);
    let store = match engine.run().await {
        Ok(store) => store,
        Err(e) => report(&e),
    };

    println!(
        "✅ {} people, {} subscriptions, {} films ({} free)",
        store.people_count(),
        store.subscriptions_count(),
        store.films_count(),
        store.free_films_count()
    );

    run_queries(&args, &store, delimiter)
}
