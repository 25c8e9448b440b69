use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{admin, config, recommend, review, search, theme};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - search movies, rate them, and keep your reviews")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie database by title
    #[command(long_about = "Search the movie database by title and show up to three matches. Use --details to fetch the full record (plot, genre, rating) for each match.")]
    Search {
        /// Movie title to search for
        title: String,

        /// Fetch full details for every match
        #[arg(long, action = ArgAction::SetTrue)]
        details: bool,
    },
    /// Show full details for one movie by IMDb id
    Movie {
        /// IMDb id, e.g. tt1375666
        id: String,
    },
    /// Write and browse reviews
    Review {
        #[command(subcommand)]
        cmd: ReviewCommands,
    },
    /// Recommend movies to others
    Recommend {
        #[command(subcommand)]
        cmd: RecommendCommands,
    },
    /// Show or change the color theme
    Theme {
        /// New theme; omit to show the current one
        #[arg(value_enum)]
        mode: Option<ThemeMode>,
    },
    /// Admin area: catalog, categories and review moderation
    #[command(long_about = "Manage the movie catalog and reviews. Requires 'marquee admin login'. The admin password is a configured plain-text value checked locally; it hides the admin commands but is not a security boundary.")]
    Admin {
        #[command(subcommand)]
        cmd: AdminCommands,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ReviewCommands {
    /// Submit a review (prompts for anything not given)
    Add {
        /// IMDb id of the movie; if omitted you will be asked to search for it
        movie_id: Option<String>,

        /// Your name
        #[arg(long)]
        name: Option<String>,

        /// Star rating from 1 to 5
        #[arg(long, allow_negative_numbers = true)]
        rating: Option<i64>,

        /// Review text
        #[arg(long)]
        comment: Option<String>,

        /// Would you recommend it? (yes/no)
        #[arg(long)]
        recommend: Option<String>,
    },
    /// List reviews
    List {
        /// Only reviews for this IMDb id
        #[arg(long)]
        movie: Option<String>,
    },
    /// Delete one review
    Delete {
        id: String,
    },
    /// Delete all reviews
    Clear {
        /// Skip confirmation
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RecommendCommands {
    /// Recommend a movie by title
    Add {
        title: String,

        /// Why you recommend it
        #[arg(long)]
        reason: String,
    },
    /// List recommendations
    List,
    /// Delete a recommendation
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
    Toggle,
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Log in to the admin area
    Login {
        /// Password (prompted with masked input if omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out of the admin area
    Logout,
    /// Show whether you are logged in
    Status,
    /// Catalog totals, average rating and recent activity
    Dashboard,
    /// List categories (configured plus those used in the catalog)
    Categories,
    /// Manage the movie catalog
    Movies {
        #[command(subcommand)]
        cmd: AdminMovieCommands,
    },
    /// Moderate reviews
    Reviews {
        #[command(subcommand)]
        cmd: AdminReviewCommands,
    },
}

#[derive(Subcommand)]
pub enum AdminMovieCommands {
    /// List catalog movies
    List {
        /// Case-insensitive title filter
        #[arg(long)]
        search: Option<String>,

        /// Only this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Search by title and add a match to the catalog
    Add {
        title: String,

        /// Category label (defaults to Uncategorized)
        #[arg(long)]
        category: Option<String>,

        /// Pick the Nth search result (1-based) instead of choosing interactively
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Change the category of a catalog movie
    SetCategory {
        id: String,
        category: String,
    },
    /// Remove one movie from the catalog
    Delete {
        id: String,
    },
    /// Remove all movies, or all movies in one category
    DeleteAll {
        /// Only movies in this category
        #[arg(long)]
        category: Option<String>,

        /// Skip confirmation
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum AdminReviewCommands {
    /// List all reviews
    List,
    /// Delete one review
    Delete {
        id: String,
    },
    /// Delete every review
    Clear {
        /// Skip confirmation
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key and password)
    Show {
        /// Show secrets unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a configuration file, prompting for missing values
    Init {
        /// OMDb API key
        #[arg(long)]
        api_key: Option<String>,

        /// Admin password
        #[arg(long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load config first so a configured log file can be used
    let ctx = commands::Context::load()?;

    logging::init_logging(cli.verbose, cli.quiet, ctx.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { title, details } => search::run_search(&ctx, &title, details, &output).await,
        Commands::Movie { id } => search::run_movie(&ctx, &id, &output).await,
        Commands::Review { cmd } => review::run_review(&ctx, cmd, &output).await,
        Commands::Recommend { cmd } => recommend::run_recommend(&ctx, cmd, &output),
        Commands::Theme { mode } => theme::run_theme(&ctx, mode, &output),
        Commands::Admin { cmd } => admin::run_admin(&ctx, cmd, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&ctx, cmd, &output)
        }
    }
}
