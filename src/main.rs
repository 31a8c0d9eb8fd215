//! Newsstand CLI - insert authors, magazines, and articles, then run
//! relationship queries over them

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

#[derive(Parser)]
#[command(name = "newsstand")]
#[command(version)]
#[command(about = "Relational data-access layer over authors, magazines, and articles")]
#[command(long_about = r#"
Newsstand stores three related tables in an embedded SQLite database and
answers canned relationship queries over them:

Example usage:
  newsstand add-author "Jane Doe"
  newsstand add-magazine Tech Science
  newsstand add-article "Hello World" --author 1 --magazine 1
  newsstand contributors 1
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Path to the database file (overrides newsstand.toml)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an author
    AddAuthor {
        /// Author name (non-empty)
        name: String,
    },

    /// Create a magazine
    AddMagazine {
        /// Magazine name (2-16 characters)
        name: String,

        /// Magazine category (non-empty)
        category: String,
    },

    /// Create an article linking an author to a magazine
    AddArticle {
        /// Article title (5-50 characters)
        title: String,

        /// Article body
        #[arg(short, long, default_value = "")]
        content: String,

        /// Author id
        #[arg(short, long)]
        author: i64,

        /// Magazine id
        #[arg(short, long)]
        magazine: i64,
    },

    /// Show the author of an article
    AuthorOf {
        /// Article id
        article: i64,
    },

    /// Show the magazine of an article
    MagazineOf {
        /// Article id
        article: i64,
    },

    /// List all articles written by an author
    ArticlesByAuthor {
        /// Author id
        author: i64,
    },

    /// List all articles published in a magazine
    ArticlesInMagazine {
        /// Magazine id
        magazine: i64,
    },

    /// List distinct authors with at least one article in a magazine
    AuthorsInMagazine {
        /// Magazine id
        magazine: i64,
    },

    /// List distinct magazines containing at least one article by an author
    MagazinesByAuthor {
        /// Author id
        author: i64,
    },

    /// List the article titles of a magazine
    Titles {
        /// Magazine id
        magazine: i64,
    },

    /// List authors with more than two articles in a magazine
    Contributors {
        /// Magazine id
        magazine: i64,
    },

    /// Show row counts for the database
    Stats,

    /// Run the interactive menu (seed records, then numbered queries)
    Menu,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let db = commands::resolve_database(cli.database, cli.config.as_deref())?;

    match cli.command {
        Commands::AddAuthor { name } => commands::run_add_author(&db, mode, &name),
        Commands::AddMagazine { name, category } => {
            commands::run_add_magazine(&db, mode, &name, &category)
        }
        Commands::AddArticle {
            title,
            content,
            author,
            magazine,
        } => commands::run_add_article(&db, mode, &title, &content, author, magazine),
        Commands::AuthorOf { article } => commands::run_author_of(&db, mode, article),
        Commands::MagazineOf { article } => commands::run_magazine_of(&db, mode, article),
        Commands::ArticlesByAuthor { author } => {
            commands::run_articles_by_author(&db, mode, author)
        }
        Commands::ArticlesInMagazine { magazine } => {
            commands::run_articles_in_magazine(&db, mode, magazine)
        }
        Commands::AuthorsInMagazine { magazine } => {
            commands::run_authors_in_magazine(&db, mode, magazine)
        }
        Commands::MagazinesByAuthor { author } => {
            commands::run_magazines_by_author(&db, mode, author)
        }
        Commands::Titles { magazine } => commands::run_titles(&db, mode, magazine),
        Commands::Contributors { magazine } => commands::run_contributors(&db, mode, magazine),
        Commands::Stats => commands::run_stats(&db, mode),
        Commands::Menu => commands::run_menu(&db),
    }
}
