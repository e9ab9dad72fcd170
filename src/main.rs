//! Padi walkthrough
//!
//! Runs one scripted browsing session against the in-memory store: explore
//! the sample rallies, connect a simulated wallet, post a comment, create a
//! rally, disconnect.

use padi::rally::{featured, format_relative, ExploreQuery, SortOrder, StoreEvent, FEATURED_COUNT};
use padi::wallet::format_address;
use padi::{
    CommentForm, Config, MemoryStore, Notice, RallyForm, RallyStore, SimulatedWallet, Token,
    WalletSession,
};
use std::sync::Arc;

const DEMO_ADDRESS: &str = "neutron1qy352euf40x77qfrg4ncn27daufrg4ncn27dau";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Padi v{}", env!("CARGO_PKG_VERSION"));

    let mut store = RallyStore::new();
    let mut events = store.subscribe();

    let session = WalletSession::new(
        Some(Arc::new(SimulatedWallet::new(DEMO_ADDRESS))),
        Arc::new(MemoryStore::new()),
        config.wallet.session_config(),
    );
    session.restore()?;

    let rallies = store.all();
    for rally in featured(&rallies, FEATURED_COUNT) {
        tracing::info!("Featured: {} ({}% funded)", rally.title, rally.percent_complete());
    }

    // Explore: every sort order over the seeded rallies
    let query = ExploreQuery::new(config.explore.page_size, config.explore.page_step);
    for order in SortOrder::all() {
        demo_explore(&store, query.clone().sort(*order));
    }
    demo_explore(&store, query.clone().search("water"));

    // Wallet
    match session.connect().await {
        Ok(address) => tracing::info!("Connected as {}", format_address(&address)),
        Err(e) => {
            tracing::warn!("{}", Notice::from(&e));
            return Ok(());
        }
    }
    for balance in session.status().balances {
        tracing::info!("  {:>6} {}", balance.token, balance.amount);
    }

    // Comment on the garden rally, then an empty one that is refused
    report(CommentForm::new("1", "Count me in for the workshops!").submit(&session, &mut store));
    report(CommentForm::new("1", "   ").submit(&session, &mut store));

    // Create a rally
    let form = RallyForm::new(
        "Neighbourhood Library",
        "A free lending library for the block.",
        2500.0,
    )
    .token(Token::Usdc)
    .duration_days(21);
    report(
        form.submit(&session, &mut store)
            .map(|(_, notice)| notice),
    );

    while let Ok(event) = events.try_recv() {
        match event {
            StoreEvent::RallyAdded { rally_id } => tracing::info!("event: rally {} added", rally_id),
            StoreEvent::CommentAdded {
                rally_id,
                comment_id,
            } => tracing::info!("event: comment {} on rally {}", comment_id, rally_id),
        }
    }

    demo_detail(&store, "1");
    demo_explore(&store, query);

    session.disconnect()?;
    report(CommentForm::new("1", "Still here?").submit(&session, &mut store));

    tracing::info!("Walkthrough complete");
    Ok(())
}

fn demo_explore(store: &RallyStore, query: ExploreQuery) {
    let rallies = store.all();
    let page = query.apply(&rallies);

    tracing::info!(
        "Explore [{}{}]: {} of {} shown{}",
        query.sort.label(),
        if query.search.is_empty() {
            String::new()
        } else {
            format!(", search \"{}\"", query.search)
        },
        page.rallies.len(),
        page.total,
        if page.has_more { ", more available" } else { "" }
    );

    for rally in &page.rallies {
        tracing::info!(
            "  {:<34} {:>3}% funded  {} / {} {}  {} days left",
            rally.title,
            rally.percent_complete(),
            rally.raised,
            rally.goal,
            rally.token,
            rally.days_left
        );
    }
}

fn demo_detail(store: &RallyStore, rally_id: &str) {
    let Some(rally) = store.get(rally_id) else {
        tracing::warn!("Rally {} not found", rally_id);
        return;
    };

    let now = chrono::Utc::now();
    tracing::info!("{} by {}", rally.title, rally.creator);
    for comment in &rally.comments {
        tracing::info!(
            "  [{}] {} ({}): {}",
            padi::rally::initials(&comment.address),
            format_address(&comment.address),
            format_relative(comment.created_at, now),
            comment.message
        );
    }
}

fn report(result: Result<Notice, padi::FormError>) {
    match result {
        Ok(notice) => tracing::info!("{}", notice),
        Err(e) => tracing::warn!("{}", e.notice()),
    }
}
