use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{
    routes::{resolve, Route, RouteOutcome},
    validate::{validate_draft, validate_login},
    Account, ClientEvent, DashboardClient, PageSize, SessionGate,
};
use shared::domain::{PostDraft, PostId};
use storage::FileStore;
use tracing::info;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
struct Args {
    /// Email to sign in with (defaults to the configured account).
    #[arg(long)]
    email: Option<String>,
    /// Password to sign in with (defaults to the configured account).
    #[arg(long)]
    password: Option<String>,
    /// Case-insensitive search over title and body.
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    /// Rows per page: 5, 10, 15 or 20.
    #[arg(long, default_value_t = 5)]
    page_size: usize,
    /// Create a post before rendering.
    #[arg(long, num_args = 2, value_names = ["TITLE", "BODY"])]
    add: Option<Vec<String>>,
    /// Delete a post by id before rendering.
    #[arg(long)]
    delete: Option<i64>,
    /// Erase the session marker and exit.
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = load_settings();

    let page_size = PageSize::from_rows(args.page_size)
        .ok_or_else(|| anyhow!("page size must be one of 5, 10, 15, 20"))?;

    let store = Arc::new(FileStore::open(&settings.token_path)?);
    let gate = SessionGate::new(
        store,
        Account {
            email: settings.account_email.clone(),
            password: settings.account_password.clone(),
        },
    );

    if args.logout {
        gate.logout().await?;
        println!("Signed out.");
        return Ok(());
    }

    if !gate.is_authenticated().await? {
        let email = args.email.unwrap_or_else(|| settings.account_email.clone());
        let password = args
            .password
            .unwrap_or_else(|| settings.account_password.clone());
        validate_login(&email, &password)?;
        gate.login(&email, &password).await?;
        info!(email = %email, "signed in");
    }

    // The dashboard only renders behind a live session.
    match resolve(Route::Dashboard.path(), gate.is_authenticated().await?) {
        RouteOutcome::Render(Route::Dashboard) => {}
        _ => return Err(anyhow!("no active session; sign in first")),
    }

    let client = DashboardClient::new(settings.api_base_url.clone());
    let mut events = client.subscribe_events();

    client.load_posts().await?;

    if let Some(fields) = &args.add {
        let draft = PostDraft::new(fields[0].clone(), fields[1].clone());
        validate_draft(&draft)?;
        client.create_post(draft).await?;
    }
    if let Some(id) = args.delete {
        client.delete_post(PostId(id)).await?;
    }

    if !args.search.is_empty() {
        client.set_search_term(args.search.clone()).await;
    }
    client.set_page_size(page_size).await;
    client.set_page(args.page).await;

    let view = client.view().await;
    println!(
        "page {} of {} ({} posts shown)",
        args.page,
        view.total_pages,
        view.page_posts.len()
    );
    for post in &view.page_posts {
        println!("{:>5}  {}  |  {}", post.id.0, post.title, post.body);
    }
    println!("pages: {:?}", view.page_numbers);

    while let Ok(event) = events.try_recv() {
        if let ClientEvent::Toast(toast) = event {
            println!("[{:?}] {}", toast.kind, toast.message);
        }
    }

    Ok(())
}
