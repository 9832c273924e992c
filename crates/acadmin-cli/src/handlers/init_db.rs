//! Init-db command handler.

use anyhow::Result;

use crate::commands::DatabaseArgs;

/// Create the database file and schema. Safe to run repeatedly.
pub async fn execute(args: &DatabaseArgs) -> Result<()> {
    let pool = acadmin_db::setup_database(&args.database_url).await?;
    pool.close().await;
    println!("Database ready at {}", args.database_url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_db_creates_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("acadmin.db");
        let args = DatabaseArgs {
            database_url: format!("sqlite://{}", path.display()),
        };

        execute(&args).await.unwrap();
        assert!(path.exists());
        execute(&args).await.unwrap();
    }
}
