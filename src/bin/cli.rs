//! Padi CLI
//!
//! Command-line interface for Padi:
//! - Browse and inspect rallies
//! - Create rallies and post comments
//! - Connect, disconnect and inspect the wallet session
//!
//! Rallies live in memory, so `create` and `comment` only affect the
//! listing printed by the same invocation. The wallet session is kept in
//! the configured session file and survives between runs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use padi::rally::{format_relative, initials, ExploreQuery, RallyError, SortOrder};
use padi::wallet::format_address;
use padi::{
    CommentForm, Config, FileStore, Notice, Rally, RallyForm, RallyStore, SimulatedWallet, Token,
    WalletProvider, WalletSession,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "padi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and support funding rallies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List rallies
    List {
        /// Only rallies whose title or description contains this text
        #[arg(short, long, default_value = "")]
        search: String,
        /// Sort order (newest, popular, ending-soon, most-funded)
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
        /// Number of "load more" steps to apply
        #[arg(short, long, default_value = "0")]
        more: usize,
    },

    /// Show one rally with its comments
    Show {
        /// Rally id
        id: String,
    },

    /// Create a rally as the connected wallet
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Funding goal
        #[arg(long)]
        goal: f64,
        /// Token symbol (NTRN, tATOM, USDC)
        #[arg(long, default_value = "NTRN")]
        token: String,
        /// Campaign length in days
        #[arg(long)]
        duration: Option<i64>,
        /// Cover image URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Comment on a rally as the connected wallet
    Comment {
        /// Rally id
        rally_id: String,
        /// Comment text
        message: String,
    },

    /// Connect a simulated wallet
    Connect {
        /// Address the simulated wallet reports
        address: String,
        /// Make the wallet refuse the request
        #[arg(long)]
        reject: bool,
    },

    /// Disconnect the wallet
    Disconnect,

    /// Show the wallet session
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    config.logging.init();

    let json = cli.format == "json";
    let mut store = RallyStore::new();

    match cli.command {
        Commands::List { search, sort, more } => {
            let mut query = ExploreQuery::new(config.explore.page_size, config.explore.page_step)
                .search(search)
                .sort(sort);
            for _ in 0..more {
                query.load_more();
            }
            print_list(&store, &query, json)?;
        }

        Commands::Show { id } => {
            let rally = store.get(&id).ok_or(RallyError::NotFound(id))?;
            print_rally(rally, json)?;
        }

        Commands::Create {
            title,
            description,
            goal,
            token,
            duration,
            image,
        } => {
            let session = open_session(&config, None)?;

            let mut form = RallyForm::new(title, description, goal).token(Token::from(token));
            if let Some(days) = duration {
                form = form.duration_days(days);
            }
            if let Some(image) = image {
                form = form.image(image);
            }

            match form.submit(&session, &mut store) {
                Ok((rally_id, notice)) => {
                    println!("{}", notice);
                    if let Some(rally) = store.get(&rally_id) {
                        print_rally(rally, json)?;
                    }
                }
                Err(e) => fail(e.notice()),
            }
        }

        Commands::Comment { rally_id, message } => {
            let session = open_session(&config, None)?;

            if store.get(&rally_id).is_none() {
                return Err(RallyError::NotFound(rally_id).into());
            }

            match CommentForm::new(rally_id.clone(), message).submit(&session, &mut store) {
                Ok(notice) => {
                    println!("{}", notice);
                    if let Some(rally) = store.get(&rally_id) {
                        print_rally(rally, json)?;
                    }
                }
                Err(e) => fail(e.notice()),
            }
        }

        Commands::Connect { address, reject } => {
            let mut wallet = SimulatedWallet::new(address);
            if reject {
                wallet = wallet.rejecting("Request rejected by user");
            }
            let session = open_session(&config, Some(Arc::new(wallet)))?;

            match session.connect().await {
                Ok(address) => println!("Connected as {}", format_address(&address)),
                Err(e) => fail(Notice::from(&e)),
            }
        }

        Commands::Disconnect => {
            let session = open_session(&config, None)?;
            session.disconnect()?;
            println!("Wallet disconnected");
        }

        Commands::Status => {
            let session = open_session(&config, None)?;
            let status = session.status();

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "address": status.address,
                        "balances": status.balances,
                    }))?
                );
            } else {
                match &status.address {
                    Some(address) => {
                        println!("Connected: {}", address);
                        println!();
                        for balance in &status.balances {
                            println!("  {:<6} {}", balance.token, balance.amount);
                        }
                    }
                    None => {
                        println!("No wallet connected.");
                        println!();
                        println!("Connect one with:");
                        println!("  padi-cli connect <address>");
                    }
                }
            }
        }

        Commands::Config { output } => {
            let content = padi::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Session backed by the configured file, restored from it
fn open_session(
    config: &Config,
    provider: Option<Arc<dyn WalletProvider>>,
) -> anyhow::Result<WalletSession> {
    let storage = Arc::new(FileStore::new(&config.wallet.session_file));
    let session = WalletSession::new(provider, storage, config.wallet.session_config());
    session
        .restore()
        .with_context(|| format!("reading session file {}", config.wallet.session_file))?;
    Ok(session)
}

fn fail(notice: Notice) -> ! {
    eprintln!("{}", notice);
    std::process::exit(1);
}

fn print_list(store: &RallyStore, query: &ExploreQuery, json: bool) -> anyhow::Result<()> {
    let rallies = store.all();
    let page = query.apply(&rallies);

    if json {
        println!("{}", serde_json::to_string_pretty(&page.rallies)?);
        return Ok(());
    }

    if page.is_empty() {
        println!("No rallies found.");
        println!("Try adjusting your search criteria.");
        return Ok(());
    }

    println!(
        "{:<16} {:<34} {:>8} {:>18} {:>6}",
        "ID", "Title", "Funded", "Raised / Goal", "Days"
    );
    println!("{}", "-".repeat(86));
    for rally in &page.rallies {
        println!(
            "{:<16} {:<34} {:>7}% {:>18} {:>6}",
            rally.id,
            rally.title,
            rally.percent_complete(),
            format!("{} / {} {}", rally.raised, rally.goal, rally.token),
            rally.days_left
        );
    }

    println!();
    println!(
        "Showing {} of {} ({})",
        page.rallies.len(),
        page.total,
        query.sort.label()
    );
    if page.has_more {
        println!("More available: raise --more to load them");
    }
    Ok(())
}

fn print_rally(rally: &Rally, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(rally)?);
        return Ok(());
    }

    println!("{} [{}]", rally.title, rally.id);
    println!("{}", rally.description);
    println!();
    println!(
        "{}% funded: {} / {} {}",
        rally.percent_complete(),
        rally.raised,
        rally.goal,
        rally.token
    );
    println!("{} days left, created by {}", rally.days_left, rally.creator);
    println!();

    if rally.comments.is_empty() {
        println!("No comments yet. Be the first to comment!");
        return Ok(());
    }

    let now = chrono::Utc::now();
    println!("Comments ({}):", rally.comments.len());
    for comment in &rally.comments {
        println!(
            "  [{}] {}  {}",
            initials(&comment.address),
            format_address(&comment.address),
            format_relative(comment.created_at, now)
        );
        println!("       {}", comment.message);
    }
    Ok(())
}
