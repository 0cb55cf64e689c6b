use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use sha2::{Digest, Sha256};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://trackademic.db".to_string());

    let options = SqliteConnectOptions::from_str(&database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let (subjects,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM subjects")
        .fetch_one(&pool)
        .await?;
    println!("subject catalog: {subjects} rows");

    let demo_email = "hoejiaxian@gmail.com";
    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = ?")
        .bind(demo_email)
        .fetch_one(&pool)
        .await?;

    if existing > 0 {
        println!("demo user already present, nothing to do");
        return Ok(());
    }

    if is_dry_run() {
        println!("would create demo user {demo_email} (pass --apply to write)");
        return Ok(());
    }

    let digest = format!("{:x}", Sha256::digest(b"jiaxian0000"));
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, datetime('now'))",
    )
    .bind("jiaxian0331")
    .bind(demo_email)
    .bind(&digest)
    .execute(&pool)
    .await?;
    println!("created demo user {demo_email}");

    Ok(())
}
