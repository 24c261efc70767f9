//! The store gateway: a bounded pool of SQLite connections.
//!
//! [`StoreGateway`] is constructed once at startup and cloned into every
//! handler. Connections come from a `deadpool-sqlite` pool sized to
//! [`PoolConfig::capacity`]; callers beyond capacity queue in the pool until
//! an object is returned. Statements run through `Object::interact`, which
//! moves the work onto the blocking thread pool so a slow SQLite call never
//! stalls the async runtime.
//!
//! A checked-out object goes back to the pool when it is dropped. That holds
//! on every exit path, including statement errors and a caller that gave up
//! on a timeout while the blocking task was still running.

use std::sync::Arc;
use std::time::Duration;

use deadpool_sqlite::{Config, Object, Pool, PoolError, Runtime};
use rusqlite::{params_from_iter, Connection};
use tempfile::TempDir;

use crate::entity::Entity;
use crate::error::StorageError;
use crate::schema;
use crate::statement::Statement;

/// Pool sizing and time bounds.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of pooled connections, and so the bound on in-flight calls.
    pub capacity: usize,
    /// Upper bound for one store call, queueing included.
    pub statement_timeout: Duration,
    /// How long SQLite itself retries on a locked database.
    pub busy_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            capacity: 5,
            statement_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Shared handle to the connection pool.
///
/// Cloning is cheap; all clones share the same connections and admission
/// control.
#[derive(Clone)]
pub struct StoreGateway {
    pool: Pool,
    statement_timeout: Duration,
    busy_timeout: Duration,
    // Declared last so the pool's connections close before the directory
    // holding the database file is removed.
    temp_dir: Option<Arc<TempDir>>,
}

impl StoreGateway {
    /// Opens (or creates) the database at `path` with a pool of
    /// `config.capacity` connections. Pending migrations run on a dedicated
    /// connection before the pool hands any out.
    pub fn open(path: &str, config: PoolConfig) -> Result<Self, StorageError> {
        let capacity = config.capacity.max(1);
        drop(schema::open_database(path, config.busy_timeout)?);

        let pool = Config::new(path)
            .builder(Runtime::Tokio1)
            .map_err(|e| StorageError::Pool(e.to_string()))?
            .max_size(capacity)
            .wait_timeout(Some(config.statement_timeout))
            .build()
            .map_err(|e| StorageError::Pool(e.to_string()))?;

        tracing::info!(path, capacity, "store gateway opened");

        Ok(StoreGateway {
            pool,
            statement_timeout: config.statement_timeout,
            busy_timeout: config.busy_timeout,
            temp_dir: None,
        })
    }

    /// Opens a fresh database in a private temp directory. The directory and
    /// its files are removed once the last clone of the gateway is dropped.
    pub fn temporary(config: PoolConfig) -> Result<Self, StorageError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("orders.db");
        let mut gateway = Self::open(&path.to_string_lossy(), config)?;
        gateway.temp_dir = Some(Arc::new(dir));
        Ok(gateway)
    }

    /// Total number of pooled connections.
    pub fn capacity(&self) -> usize {
        self.pool.status().max_size
    }

    /// Connections currently checked out.
    pub fn in_use(&self) -> usize {
        let status = self.pool.status();
        status.size.saturating_sub(status.available)
    }

    /// Stops admitting callers. Waiters and later calls fail with
    /// [`StorageError::PoolClosed`]; calls already running finish.
    pub fn close(&self) {
        self.pool.close();
    }

    /// Runs a write statement and returns the affected-row count.
    pub async fn execute(&self, statement: Statement) -> Result<usize, StorageError> {
        self.run(move |conn| {
            tracing::debug!(sql = %statement.sql, "execute");
            let mut stmt = conn.prepare_cached(&statement.sql)?;
            let affected = stmt.execute(params_from_iter(statement.params.iter()))?;
            Ok(affected)
        })
        .await
    }

    /// Runs a read statement selecting `E::FIELDS` in order and maps every
    /// row.
    pub async fn fetch_all<E: Entity>(&self, statement: Statement) -> Result<Vec<E>, StorageError> {
        self.run(move |conn| {
            tracing::debug!(sql = %statement.sql, "fetch_all");
            let mut stmt = conn.prepare_cached(&statement.sql)?;
            let rows = stmt.query_map(params_from_iter(statement.params.iter()), E::from_row)?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            Ok(out)
        })
        .await
    }

    async fn get_conn(&self) -> Result<Object, StorageError> {
        self.pool.get().await.map_err(|e| self.pool_error(e))
    }

    fn pool_error(&self, err: PoolError) -> StorageError {
        match err {
            PoolError::Timeout(_) => StorageError::Timeout(self.statement_timeout),
            PoolError::Closed => StorageError::PoolClosed,
            PoolError::Backend(e) => StorageError::Sqlite(e),
            other => StorageError::Pool(other.to_string()),
        }
    }

    /// Check out, run on the blocking pool, release. Bounded by the
    /// statement timeout end to end.
    async fn run<T, F>(&self, work: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let busy_timeout = self.busy_timeout;
        let call = async {
            let conn = self.get_conn().await?;
            conn.interact(move |conn| {
                schema::configure(conn, busy_timeout)?;
                work(&*conn)
            })
            .await
            .map_err(|e| StorageError::Interact(format!("{e:?}")))?
        };

        match tokio::time::timeout(self.statement_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.statement_timeout, "store call timed out");
                Err(StorageError::Timeout(self.statement_timeout))
            }
        }
    }
}
