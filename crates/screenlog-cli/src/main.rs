use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{account, clear, config, lists, search};
use movie_log_models::ListKind;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "screenlog")]
#[command(about = "screenlog - search movies, keep your lists, rate what you've watched")]
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

/// CLI-facing list names, mapped onto the store's `ListKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ListArg {
    Favorites,
    Watched,
    #[value(name = "plan", alias = "plan-to-watch")]
    Plan,
}

impl From<ListArg> for ListKind {
    fn from(arg: ListArg) -> Self {
        match arg {
            ListArg::Favorites => ListKind::Favorites,
            ListArg::Watched => ListKind::Watched,
            ListArg::Plan => ListKind::PlanToWatch,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search the movie catalog
    #[command(long_about = "Search the movie catalog by title. When you are signed in, each result is marked with the lists it already belongs to.")]
    Search {
        /// Search text
        query: String,
    },

    /// Show recommended titles
    #[command(long_about = "Fetch and display the configured recommended titles. Edit the `recommendations` list in config.toml to change them.")]
    Browse,

    /// Show full details for one title
    Show {
        /// Catalog id (e.g. tt1375666)
        id: String,
    },

    /// Toggle a title's membership in a list
    #[command(long_about = "Toggle membership: adds the title to the list when absent, removes it when present. Toggling twice returns the list to its original state.")]
    Toggle {
        /// Which list to toggle
        #[arg(value_enum)]
        list: ListArg,

        /// Catalog id (e.g. tt1375666)
        id: String,
    },

    /// Remove a title from a list
    Remove {
        /// Which list to remove from
        #[arg(value_enum)]
        list: ListArg,

        /// Catalog id (e.g. tt1375666)
        id: String,
    },

    /// Rate a watched title
    #[command(long_about = "Attach a personal 1-10 rating to a title in your watched list. Titles you have not marked as watched cannot be rated.")]
    Rate {
        /// Catalog id (e.g. tt1375666)
        id: String,

        /// Rating from 1 to 10
        rating: u8,
    },

    /// Print your lists
    List {
        /// Which list to print (all three when omitted)
        #[arg(value_enum)]
        list: Option<ListArg>,
    },

    /// Statistics over your watched list
    Stats,

    /// Create an account and sign in
    Signup {
        /// Account email (prompts when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        /// Account email (prompts when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Sign out and discard the local session
    Logout,

    /// Configure API keys and settings
    #[command(long_about = "Manage configuration for screenlog. Running without a subcommand starts the interactive configuration wizard.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Clear local data
    #[command(long_about = "Clear locally stored data. Use --cache for the profile cache, --credentials for the stored session, or --all for both. Your account's lists in the cloud are untouched.")]
    Clear {
        /// Clear cache and credentials
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the local profile cache
        #[arg(long, action = ArgAction::SetTrue)]
        cache: bool,

        /// Clear the stored session credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show,

    /// Configure the OMDb catalog API key
    #[command(long_about = "Configure the OMDb API key used for catalog search and title lookup. Get a free key at https://www.omdbapi.com/apikey.aspx.")]
    Omdb {
        /// OMDb API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Configure the Firebase project used for account storage
    Firebase {
        /// Firebase project id (if not provided, will prompt)
        #[arg(long)]
        project_id: Option<String>,

        /// Firebase web API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Interactive configuration wizard
    Interactive,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Search { query } => search::run_search(&query, &output).await,
        Commands::Browse => search::run_browse(&output).await,
        Commands::Show { id } => search::run_show(&id, &output).await,
        Commands::Toggle { list, id } => lists::run_toggle(list.into(), &id, &output).await,
        Commands::Remove { list, id } => lists::run_remove(list.into(), &id, &output).await,
        Commands::Rate { id, rating } => lists::run_rate(&id, rating, &output).await,
        Commands::List { list } => lists::run_list(list.map(Into::into), &output).await,
        Commands::Stats => lists::run_stats(&output).await,
        Commands::Signup { email } => account::run_signup(email, &output).await,
        Commands::Login { email } => account::run_login(email, &output).await,
        Commands::Logout => account::run_logout(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Interactive);
            config::run_config(cmd, &output).await
        }
        Commands::Clear {
            all,
            cache,
            credentials,
        } => clear::run_clear(all, cache, credentials, &output).await,
    }
}
