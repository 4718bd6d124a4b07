//! CLI entry point for mdshelf

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdshelf")]
#[command(version = "0.1.0")]
#[command(about = "Typed, queryable content collections for markdown blogs", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new shelf
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new document
    New {
        /// Content type to scaffold (post, project, or a declared type)
        #[arg(short, long, default_value = "post")]
        r#type: String,

        /// Title of the new document
        title: String,
    },

    /// Load every document and report schema validation results
    #[command(alias = "check")]
    Validate,

    /// List content (post, project, tag, category)
    #[command(alias = "ls")]
    List {
        /// What to list
        #[arg(default_value = "post")]
        r#type: String,

        /// Include drafts
        #[arg(long)]
        drafts: bool,

        /// Only records in this category
        #[arg(long)]
        category: Option<String>,

        /// Only featured records
        #[arg(long)]
        featured: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show one record by slug
    Show {
        /// Content type to search
        #[arg(short, long, default_value = "post")]
        r#type: String,

        /// Record slug
        slug: String,

        /// Also search drafts
        #[arg(long)]
        drafts: bool,

        /// Emit the full record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Watch the content tree and reload on changes
    #[command(alias = "w")]
    Watch,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdshelf=debug,info"
    } else {
        "mdshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing shelf in {:?}", target_dir);
            mdshelf::commands::init::init_shelf(&target_dir)?;
            println!("Initialized empty shelf in {:?}", target_dir);
        }

        Commands::New { r#type, title } => {
            let shelf = mdshelf::Shelf::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", r#type, title);
            mdshelf::commands::new::create_document(&shelf, &r#type, &title)?;
        }

        Commands::Validate => {
            let shelf = mdshelf::Shelf::new(&base_dir)?;
            tracing::info!("Validating content in {:?}", shelf.content_dir);
            mdshelf::commands::validate::run(&shelf)?;
        }

        Commands::List {
            r#type,
            drafts,
            category,
            featured,
            json,
        } => {
            let shelf = mdshelf::Shelf::new(&base_dir)?;
            let category = category.as_deref();
            mdshelf::commands::list::run(&shelf, &r#type, drafts, category, featured, json)?;
        }

        Commands::Show {
            r#type,
            slug,
            drafts,
            json,
        } => {
            let shelf = mdshelf::Shelf::new(&base_dir)?;
            mdshelf::commands::show::run(&shelf, &r#type, &slug, drafts, json)?;
        }

        Commands::Watch => {
            let shelf = mdshelf::Shelf::new(&base_dir)?;
            let collection = shelf.load()?;
            println!("✅ Loaded {} records", collection.len());

            let shared = mdshelf::watch::SharedCollection::new(collection);
            let (reload_tx, _) = broadcast::channel(16);

            println!("👀 Watching {:?} (Ctrl-C to stop)", shelf.content_dir);
            mdshelf::watch::run(&shelf, &shared, reload_tx)?;
        }

        Commands::Version => {
            println!("mdshelf version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
