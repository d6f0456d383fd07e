use std::collections::HashMap;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use reelfeed::{
    cli::{Command, HELP},
    config::Config,
    models::Shelf,
    render::{RenderSink, TerminalSink},
    services::{
        ControllerSettings, Credentials, DetailView, HttpBackend, LiveSearch, MovieBackend, Pager,
        RecommendationMerger, SharedCredentials, ShelfLoader, WelcomePanel,
    },
};

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("reelfeed=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Spawned commands must start in the order they were typed, so that the
// controllers mint tokens in issue order. The current-thread runtime runs them FIFO.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env()?;
    let settings = ControllerSettings::from(&config);

    let credentials = Arc::new(SharedCredentials::new(
        config.auth_token.clone().map(Credentials::new),
    ));
    let backend: Arc<dyn MovieBackend> = Arc::new(HttpBackend::new(&config.api_url, credentials));
    let sink: Arc<dyn RenderSink> = Arc::new(TerminalSink::stdout());

    let pager = Arc::new(Pager::new(
        config.collection(),
        backend.clone(),
        sink.clone(),
        settings.clone(),
    ));
    let search = Arc::new(LiveSearch::new(backend.clone(), sink.clone(), settings.clone()));
    let merger = Arc::new(RecommendationMerger::new(
        backend.clone(),
        sink.clone(),
        settings.clone(),
    ));
    let details = Arc::new(DetailView::new(backend.clone(), sink.clone(), settings.clone()));
    let welcome = Arc::new(WelcomePanel::new(backend.clone(), sink.clone(), settings.clone()));
    let mut shelves: HashMap<Shelf, Arc<ShelfLoader>> = HashMap::new();

    tracing::info!(
        api_url = %config.api_url,
        backend = backend.name(),
        collection = %config.collection(),
        "reelfeed started"
    );
    println!("{}", HELP);

    {
        let pager = pager.clone();
        tokio::spawn(async move { pager.first_page().await });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        // Each command runs as its own task so a slow response never blocks
        // the next keystroke; the controllers drop whatever gets superseded.
        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Page(page) => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.request_page(page).await });
            }
            Command::Next => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.next_page().await });
            }
            Command::Previous => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.previous_page().await });
            }
            Command::First => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.first_page().await });
            }
            Command::Last => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.last_page().await });
            }
            Command::Reload => {
                let pager = pager.clone();
                tokio::spawn(async move { pager.reload().await });
            }
            Command::Search(query) => {
                let search = search.clone();
                tokio::spawn(async move { search.on_query_change(&query).await });
            }
            Command::Pick(index) => match search.select(index).await {
                Some(movie) => println!("search box: {}", movie.title),
                None => println!("nothing to pick"),
            },
            Command::Ask(text) => {
                let merger = merger.clone();
                tokio::spawn(async move {
                    if let Err(e) = merger.submit(&text).await {
                        tracing::debug!(error = %e, "Chat submission failed");
                    }
                });
            }
            Command::Shelf(shelf) => {
                let loader = shelves
                    .entry(shelf.clone())
                    .or_insert_with(|| {
                        Arc::new(ShelfLoader::new(
                            shelf,
                            backend.clone(),
                            sink.clone(),
                            settings.clone(),
                        ))
                    })
                    .clone();
                tokio::spawn(async move { loader.load().await });
            }
            Command::Movie(id) => {
                let details = details.clone();
                tokio::spawn(async move { details.show(id).await });
            }
            Command::Welcome => {
                let welcome = welcome.clone();
                tokio::spawn(async move { welcome.load().await });
            }
        }
    }

    Ok(())
}
