use clap::{Args, Parser, Subcommand};
use embedquest_api::{AppState, RestApi};
use embedquest_core::{PuzzleConfig, PuzzleGenerator};
use embedquest_storage::{
    import_embeddings_file, load_embeddings_file, InMemoryWordSource, PuzzleService,
    StorageManager, WordSource, DEFAULT_MODEL_ID, DEFAULT_POOL_SIZE,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Word-embedding similarity puzzle server
#[derive(Parser, Debug)]
#[command(name = "embedquest")]
#[command(about = "Which word is closer in meaning?", long_about = None)]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the REST API
    Serve(ServeArgs),
    /// Load precomputed embeddings from a JSON file into the word store
    Import(ImportArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 3000)]
    http_port: u16,

    /// Embedding model whose words are served
    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    model_id: String,

    /// Words fetched per puzzle
    #[arg(long, default_value_t = DEFAULT_POOL_SIZE)]
    pool_size: usize,

    /// Serve words from this embeddings file instead of the word store
    #[arg(long)]
    words_file: Option<PathBuf>,

    /// Correct answer is drawn from this many most similar words
    #[arg(long, default_value_t = embedquest_core::DEFAULT_TOP_K)]
    top_k: usize,

    /// Required similarity gap between correct answer and distractor
    #[arg(long, default_value_t = embedquest_core::DEFAULT_MIN_GAP)]
    min_gap: f64,

    /// Minimum similarity a distractor must have to the starter
    #[arg(long, default_value_t = embedquest_core::DEFAULT_MIN_SIMILARITY)]
    min_similarity: f64,
}

#[derive(Args, Debug)]
struct ImportArgs {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Model id to store the words under
    #[arg(long, default_value = DEFAULT_MODEL_ID)]
    model_id: String,

    /// Embeddings JSON file: {"words": [{"name", "embedding"}]}
    #[arg(short, long)]
    file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Import(args) => import(args),
    }
}

fn import(args: ImportArgs) -> anyhow::Result<()> {
    let storage = StorageManager::new(&args.data_dir)?;
    let stored = import_embeddings_file(&storage.words(), &args.model_id, &args.file)?;
    info!(
        "Word store now holds {} words for {}",
        storage.words().count_words(&args.model_id)?,
        args.model_id
    );
    info!("Imported {} words from {:?}", stored, args.file);
    Ok(())
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    info!("Starting EmbedQuest v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let storage = Arc::new(StorageManager::new(&args.data_dir)?);

    let source: Arc<dyn WordSource> = match &args.words_file {
        Some(path) => {
            let words = load_embeddings_file(path)?;
            Arc::new(InMemoryWordSource::new(args.model_id.clone(), words))
        }
        None => storage.words(),
    };

    let word_count = source.word_count(&args.model_id)?;
    info!("Model {}: {} words available", args.model_id, word_count);
    if word_count < embedquest_core::MIN_POOL_SIZE {
        warn!("Not enough words to generate puzzles. Run: embedquest import --file <embeddings.json>");
    }

    let generator = PuzzleGenerator::new(PuzzleConfig {
        top_k: args.top_k,
        min_gap: args.min_gap,
        min_similarity: args.min_similarity,
        ..PuzzleConfig::default()
    })?;
    let puzzles = PuzzleService::new(source, generator, args.model_id.clone(), args.pool_size);
    let state = Arc::new(AppState::new(puzzles, storage));

    let host = args.host.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(state, &host, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("EmbedQuest started successfully");
    info!("HTTP API: http://localhost:{}/api/puzzle", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
