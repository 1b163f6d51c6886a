/* demos/setup/src/main.rs */

mod steps;

use std::env;

use axum::Router;
use axum::routing::get;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
  let addr = format!("0.0.0.0:{port}");

  let router = Router::new()
    .route("/", get(steps::welcome))
    .route("/install", get(steps::install))
    .route("/callback", get(steps::callback))
    .route("/finish", get(steps::finish));

  let listener = tokio::net::TcpListener::bind(&addr).await?;
  let local_addr = listener.local_addr()?;
  println!("Gatefold demo wizard running on http://localhost:{}", local_addr.port());
  axum::serve(listener, router).await?;
  Ok(())
}
