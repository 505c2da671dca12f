use credential_store::infra::config;
use credential_store::{open_store, PasswordHasher};
use std::time::Instant;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (all optional):\n\
           DATABASE_URL, DB_MAX_CONNECTIONS, BIND_ADDR, BCRYPT_COST\n\
         Creates the users table if missing and times one hash at the configured cost.\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    // Force-read config (nice error messages if malformed)
    let database_url = config::database_url();
    let max_connections = config::max_connections()?;
    let cost = config::bcrypt_cost()?;
    let scheme = database_url.split(':').next().unwrap_or_default();

    println!("> Preflight:");
    println!("  DATABASE_URL scheme={}", scheme);
    println!("  DB_MAX_CONNECTIONS={}", max_connections);
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  BCRYPT_COST={}", cost);

    let store = open_store(&database_url, max_connections).await?;
    store.ping().await?;
    println!("  Identity store: reachable, users table ready");

    let hasher = PasswordHasher::new(cost)?;
    let started = Instant::now();
    let hash = hasher.hash("preflight-sample").await?;
    let hash_ms = started.elapsed().as_millis();
    let started = Instant::now();
    let ok = hasher.verify("preflight-sample", &hash).await?;
    let verify_ms = started.elapsed().as_millis();
    if !ok {
        anyhow::bail!("bcrypt self-check failed: fresh hash did not verify");
    }
    println!("  bcrypt: hash {} ms, verify {} ms", hash_ms, verify_ms);

    println!("> Preflight OK");
    Ok(())
}
