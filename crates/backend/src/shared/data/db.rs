use once_cell::sync::OnceCell;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Open the SQLite database and bootstrap the schema.
///
/// `db_path` is a filesystem path, or `":memory:"` for an in-memory
/// database (used by tests).
pub async fn initialize_database(db_path: &str) -> anyhow::Result<()> {
    let db_url = if db_path == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let absolute_path = if std::path::Path::new(db_path).is_absolute() {
            std::path::PathBuf::from(db_path)
        } else {
            std::env::current_dir()?.join(db_path)
        };
        // Normalize path separators and ensure proper URL form on Windows
        let normalized = absolute_path.to_string_lossy().replace('\\', "/");
        let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
        let prefix = if needs_leading_slash { "/" } else { "" };
        format!("sqlite://{}{}?mode=rwc", prefix, normalized)
    };

    let mut options = ConnectOptions::new(db_url);
    if db_path == ":memory:" {
        // A pooled in-memory database exists per connection; keep exactly one
        options.max_connections(1).min_connections(1);
    }
    let conn = Database::connect(options).await?;
    bootstrap_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("database connection already initialized"))?;

    tracing::info!("Database ready at {}", db_path);
    Ok(())
}

/// Ensure required tables exist (minimal schema bootstrap).
async fn bootstrap_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    let create_receitas_table = r#"
        CREATE TABLE IF NOT EXISTS p900_receitas (
            codigo_receita TEXT NOT NULL,
            ativo TEXT NOT NULL,
            excipiente TEXT NOT NULL,
            qtd_materia_prima REAL NOT NULL,
            PRIMARY KEY (codigo_receita, excipiente)
        );
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_receitas_table.to_string(),
    ))
    .await?;

    let create_codigo_index = r#"
        CREATE INDEX IF NOT EXISTS idx_p900_receitas_codigo
        ON p900_receitas (codigo_receita);
    "#;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        create_codigo_index.to_string(),
    ))
    .await?;

    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database not initialized. Call initialize_database() first.")
}
