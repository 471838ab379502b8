//! FQL example.
//!
//! This example runs a parameterized FQL query whose array argument is
//! split across several requests.
//!
//! Run with: cargo run --example fql_query

use facebook_rs::{fql, GraphClient};

#[tokio::main]
async fn main() -> facebook_rs::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let app_id = std::env::var("FACEBOOK_APP_ID")
        .expect("FACEBOOK_APP_ID environment variable required");
    let app_secret = std::env::var("FACEBOOK_APP_SECRET")
        .expect("FACEBOOK_APP_SECRET environment variable required");
    let access_token = std::env::var("FACEBOOK_ACCESS_TOKEN")
        .expect("FACEBOOK_ACCESS_TOKEN environment variable required");

    let client = GraphClient::new(app_id, app_secret)?;
    client.set_access_token(access_token).await?;

    let query = fql!(
        "SELECT uid, name FROM user WHERE uid IN (%D)",
        vec![15504121i64, 774070614, 4, 5],
    )
    .max_batch_size(2);

    for text in query.build()? {
        println!("> {}", text);
    }

    let result = client.fql().execute(&query).await?;
    println!("\nFields: {:?}", result.fields());
    for row in &result {
        println!("  {:?}", row.values());
    }

    println!("\nDone!");
    Ok(())
}
