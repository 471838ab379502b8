//! Page lookup example.
//!
//! This example exchanges the app credentials for an app access token,
//! validates it and fetches a few public pages.
//!
//! Run with: cargo run --example fetch_page -- starbucks cocacola

use facebook_rs::{Error, GraphApiVersion, GraphClient, ClientConfig};

#[tokio::main]
async fn main() -> facebook_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Get credentials from environment variables
    let app_id = std::env::var("FACEBOOK_APP_ID")
        .expect("FACEBOOK_APP_ID environment variable required");
    let app_secret = std::env::var("FACEBOOK_APP_SECRET")
        .expect("FACEBOOK_APP_SECRET environment variable required");

    let config = ClientConfig::default().with_default_version(GraphApiVersion::latest());
    let client = GraphClient::with_config(app_id, app_secret, config)?;

    let token = client.app_access_token().await?;
    client.set_access_token(token).await?;
    println!("Token: {}", client.access_token().info());

    let mut pages: Vec<String> = std::env::args().skip(1).collect();
    if pages.is_empty() {
        pages.push("starbucks".to_string());
    }

    for name in &pages {
        match client.pages().get_fields(name, &["id", "name", "username", "likes", "category"]).await {
            Ok(page) => println!(
                "  - {} ({}): {} likes, {}",
                page.name,
                page.id,
                page.likes.map(|l| l.to_string()).unwrap_or_else(|| "?".into()),
                page.category.as_deref().unwrap_or("No category")
            ),
            Err(Error::Graph(e)) => println!("  - {}: Graph error {} ({})", name, e.code, e.message),
            Err(e) => return Err(e),
        }
    }

    println!("\nDone!");
    Ok(())
}
