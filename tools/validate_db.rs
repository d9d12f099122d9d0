use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use sqlx::Row;
use std::env;

/// Report rows that break the invariants the API relies on
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    /// Lowercase offending company handles where no job references them
    #[arg(long)]
    fix: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let db_url = cli
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("DATABASE_URL must be set or passed with --database-url")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    let bad_handles = sqlx::query(
        r#"
        SELECT c.handle, COUNT(j.id) AS job_count
        FROM companies c
        LEFT JOIN jobs j ON j.company_handle = c.handle
        WHERE c.handle <> lower(c.handle)
        GROUP BY c.handle
        "#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Non-lowercase company handles: {}", bad_handles.len());
    for r in bad_handles.iter() {
        let handle: String = r.get("handle");
        let job_count: i64 = r.get("job_count");
        println!("handle: {}, jobs: {}", handle, job_count);

        if cli.fix {
            if job_count > 0 {
                println!("Skipped: {} is referenced by jobs", handle);
                continue;
            }
            sqlx::query("UPDATE companies SET handle = lower(handle) WHERE handle = $1")
                .bind(&handle)
                .execute(&pool)
                .await?;
            println!("Fixed: {} -> {}", handle, handle.to_lowercase());
        }
    }

    let bad_equity = sqlx::query(
        r#"SELECT id, equity::TEXT AS equity FROM jobs WHERE equity < 0 OR equity > 1"#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Out of range equity rows: {}", bad_equity.len());
    for r in bad_equity.iter() {
        let id: i32 = r.get("id");
        let equity: Option<String> = r.get("equity");
        println!("id: {}, equity: {:?}", id, equity);
    }

    let negative_counts = sqlx::query(
        r#"
        SELECT 'company' AS kind, handle AS key FROM companies WHERE num_employees < 0
        UNION ALL
        SELECT 'job', id::TEXT FROM jobs WHERE salary < 0
        "#,
    )
    .fetch_all(&pool)
    .await?;

    println!("Negative employee counts or salaries: {}", negative_counts.len());
    for r in negative_counts.iter() {
        let kind: String = r.get("kind");
        let key: String = r.get("key");
        println!("{}: {}", kind, key);
    }

    Ok(())
}
