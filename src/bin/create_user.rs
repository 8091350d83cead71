//! Creates a user and prints a fresh API key for the `X-API-Key` header.

use anyhow::Context;

use flashcard_srs::{
    clock::{Clock, SystemClock},
    config::Settings,
    data::db::{build_pool, run_migrations},
    data::repositories::UserRepository,
    utils::auth::{generate_api_key, hash_api_key},
};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Settings::from_env();
    let pool = build_pool(&settings.database_url).context("Failed to create DB pool")?;
    let mut conn = pool.get().context("Failed to get DB connection")?;
    run_migrations(&mut conn)?;

    let api_key = generate_api_key();
    let user = UserRepository::create_with_key(&mut conn, &hash_api_key(&api_key), SystemClock.now())
        .context("Failed to create user")?;

    println!("User ID: {}", user.user_id);
    println!("API Key: {}", api_key);
    println!();
    println!("Use this API key in the X-API-Key header");
    Ok(())
}
