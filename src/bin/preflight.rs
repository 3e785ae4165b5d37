use monster_catalog::infra::{config, database};
use monster_catalog::storage::READ_MODEL_TABLES;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DB_MAX_CONNECTIONS, ASSET_ROOT, BIND_ADDR, CORS_ALLOWED_ORIGIN\n"
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

    // Force-read config (nice error messages if missing)
    let database_url = config::database_url()?;
    let asset_root = config::asset_root();

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  ASSET_ROOT={}", asset_root.display());
    println!("  DB_MAX_CONNECTIONS={}", config::db_max_connections());

    let pool = database::connect(&database_url, 1).await?;
    database::check_connection(&pool).await?;
    println!("  Database reachable.");

    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = current_schema() AND table_name = ANY($1)",
    )
    .bind(READ_MODEL_TABLES.iter().map(|t| t.to_string()).collect::<Vec<_>>())
    .fetch_all(&pool)
    .await?;
    let missing: Vec<&str> = READ_MODEL_TABLES
        .iter()
        .copied()
        .filter(|t| !present.iter().any(|p| p == t))
        .collect();
    if !missing.is_empty() {
        return Err(anyhow::anyhow!(
            "Missing read-model tables: {} (see sql/schema.sql)",
            missing.join(", ")
        ));
    }
    println!("  All {} read-model tables present.", READ_MODEL_TABLES.len());

    if asset_root.is_dir() {
        println!("  Asset root is a directory.");
    } else {
        eprintln!("  Warning: asset root is not a directory; images will be served path-only.");
    }

    println!("> Preflight OK.");
    Ok(())
}
