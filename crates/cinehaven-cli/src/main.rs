//! cinehaven - terminal movie catalog browser backed by TMDB.

/// Application configuration (TOML).
mod config;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cinehaven_api::tmdb::{DEFAULT_LANGUAGE, LocalTmdbApi, TmdbClient};
use cinehaven_store::{CastMember, MovieDetail, MoviePage, Store};
use cinehaven_tui::Route;
use cinehaven_tui::pages::{DetailView, MovieCard};
use clap::{CommandFactory, Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, TmdbConfig, mask_secret, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Open the interactive browser.
    Browse(BrowseArgs),
    /// List popular movies.
    Popular(PageArgs),
    /// List top-rated movies.
    TopRated(PageArgs),
    /// List upcoming movies.
    Upcoming(PageArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// Show movie details and cast.
    Movie(MovieArgs),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Start route (e.g. `/`, `/top-rated`, `/movie/550`, `/search?query=dune`).
    #[arg(long, default_value = "/")]
    route: Route,
}

/// Page selection for listing subcommands.
#[derive(clap::Args)]
struct PageArgs {
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title query.
    #[arg(long)]
    query: String,
}

/// Arguments for the `movie` subcommand.
#[derive(clap::Args)]
struct MovieArgs {
    /// TMDB movie ID.
    #[arg(long)]
    id: u64,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a starter config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the effective settings with secrets masked.
    Show,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: clap_complete::Shell,
}

/// Which listing a listing subcommand prints.
#[derive(Debug, Clone, Copy)]
enum ListKind {
    Popular,
    TopRated,
    Upcoming,
}

/// Loads the `[tmdb]` section of the config file.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file is invalid.
fn load_tmdb_config(dir: Option<&PathBuf>) -> Result<TmdbConfig> {
    let path = resolve_config_path(dir)?;
    Ok(AppConfig::load(&path)?.tmdb)
}

/// Reads credentials from `TMDB_API_KEY` / `TMDB_API_TOKEN`, overriding the file.
fn effective_tmdb_config(config: TmdbConfig) -> TmdbConfig {
    config.with_overrides(
        std::env::var("TMDB_API_KEY").ok(),
        std::env::var("TMDB_API_TOKEN").ok(),
    )
}

/// Parses a base URL, appending the trailing slash relative joins need.
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized).with_context(|| format!("invalid TMDB base URL: {raw}"))
}

/// Builds a `TmdbClient` from the config file and environment.
///
/// # Errors
///
/// Returns an error if no credential is configured, the base URL is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: TmdbConfig) -> Result<TmdbClient> {
    let config = effective_tmdb_config(config);
    if config.api_key.is_none() && config.api_token.is_none() {
        bail!("TMDB_API_TOKEN or TMDB_API_KEY is required (environment or config file)");
    }

    let mut builder = TmdbClient::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(token) = config.api_token {
        builder = builder.api_token(token);
    }
    if let Some(key) = config.api_key {
        builder = builder.api_key(key);
    }
    if let Some(raw) = config.base_url.as_deref() {
        builder = builder.base_url(parse_base_url(raw)?);
    }
    if let Some(language) = config.language {
        builder = builder.language(language);
    }
    builder.build().context("failed to build TMDB client")
}

/// Prints one page of movies.
fn print_movie_page(heading: &str, page: &MoviePage) {
    tracing::info!("{heading}: page {} of {}", page.page, page.total_pages);
    print_movie_rows(page);
}

/// Prints movie rows as `id`, `title`, `poster`.
fn print_movie_rows(page: &MoviePage) {
    tracing::info!("ID\tTitle\t\t\tPoster");
    for card in page.results.iter().map(MovieCard::from) {
        tracing::info!("{}\t{}\t{}", card.id, card.title, card.poster_url);
    }
}

/// Runs the `popular` / `top-rated` / `upcoming` subcommands.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the API request fails.
#[instrument(skip_all, fields(kind = ?kind, page = args.page))]
async fn run_listing(kind: ListKind, args: &PageArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(load_tmdb_config(dir)?)?;

    let (heading, list) = match kind {
        ListKind::Popular => ("Popular Movies", client.popular_movies(args.page).await),
        ListKind::TopRated => ("Top Rated Movies", client.top_rated_movies(args.page).await),
        ListKind::Upcoming => ("Upcoming Movies", client.upcoming_movies(args.page).await),
    };
    let page = MoviePage::from(list.with_context(|| format!("failed to fetch {heading}"))?);

    print_movie_page(heading, &page);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the query is blank, the TMDB client fails to build,
/// or the API request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        bail!("search query must not be empty");
    }
    let client = build_tmdb_client(load_tmdb_config(dir)?)?;

    let page = MoviePage::from(
        client
            .search_movies(query)
            .await
            .context("failed to fetch search results")?,
    );

    tracing::info!("Search Results for \"{query}\": {}", page.results.len());
    if page.results.is_empty() {
        return Ok(());
    }
    print_movie_rows(&page);
    Ok(())
}

/// Runs the `movie` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or either request fails.
#[instrument(skip_all, fields(movie_id = args.id))]
async fn run_movie(args: &MovieArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(load_tmdb_config(dir)?)?;

    let (details, credits) = futures::future::try_join(
        async {
            client
                .movie_details(args.id)
                .await
                .context("failed to fetch movie details")
        },
        async {
            client
                .movie_credits(args.id)
                .await
                .context("failed to fetch cast details")
        },
    )
    .await?;

    let detail = MovieDetail::from(details);
    let cast: Vec<CastMember> = credits.into_iter().map(CastMember::from).collect();
    let view = DetailView::new(&detail, &cast);

    tracing::info!("{} ({})", view.title, view.id);
    tracing::info!("Rating: {}", view.rating);
    if let Some(runtime) = &view.runtime {
        tracing::info!("Runtime: {runtime}");
    }
    tracing::info!("Genres: {}", view.genres);
    tracing::info!("Release date: {}", view.release_date);
    tracing::info!("Overview: {}", view.overview);
    tracing::info!("Poster: {}", view.poster_url);
    tracing::info!("Backdrop: {}", view.backdrop_url);
    tracing::info!("Cast: {}", view.cast.len());
    for card in &view.cast {
        tracing::info!("  {} {}", card.name, card.role);
    }
    Ok(())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the terminal fails.
#[instrument(skip_all, fields(route = %args.route))]
async fn run_browse(args: BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_tmdb_client(load_tmdb_config(dir)?)?;
    cinehaven_tui::run_browser(Store::new(client), args.route).await
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists without `--force` or cannot be written.
#[instrument(skip_all)]
fn run_config_init(force: bool, dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    if path.exists() && !force {
        bail!(
            "config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = AppConfig {
        tmdb: TmdbConfig {
            language: Some(String::from(DEFAULT_LANGUAGE)),
            ..TmdbConfig::default()
        },
    };
    config.save(&path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

/// Formats an optional secret for display.
fn display_secret(secret: Option<&str>) -> String {
    secret.map_or_else(|| String::from("(not set)"), mask_secret)
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config file cannot be resolved or parsed.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = effective_tmdb_config(AppConfig::load(&path)?.tmdb);

    tracing::info!("Config file: {}", path.display());
    tracing::info!("api_key: {}", display_secret(config.api_key.as_deref()));
    tracing::info!("api_token: {}", display_secret(config.api_token.as_deref()));
    tracing::info!(
        "base_url: {}",
        config.base_url.as_deref().unwrap_or("(default)")
    );
    tracing::info!(
        "language: {}",
        config.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    );
    Ok(())
}

/// Installs the tracing subscriber. `RUST_LOG` overrides `default_filter`.
fn init_tracing(default_filter: &str) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log lines would tear the alternate screen.
    let default_filter = match cli.command {
        Commands::Browse(_) | Commands::Completions(_) => "off",
        _ => "info",
    };
    init_tracing(default_filter);

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Browse(args) => run_browse(args, dir).await,
        Commands::Popular(args) => run_listing(ListKind::Popular, &args, dir).await,
        Commands::TopRated(args) => run_listing(ListKind::TopRated, &args, dir).await,
        Commands::Upcoming(args) => run_listing(ListKind::Upcoming, &args, dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Movie(args) => run_movie(&args, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Init { force } => run_config_init(force, dir),
            ConfigSubcommands::Show => run_config_show(dir),
        },
        Commands::Completions(args) => {
            let mut command = Cli::command();
            clap_complete::generate(args.shell, &mut command, "cinehaven", &mut io::stdout());
            Ok(())
        }
    }
}
