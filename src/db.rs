//! Transaction boundary around the SQLite store.
//!
//! Every mutation runs inside one [`WriteTx`]. Write transactions are
//! serialized by a process-wide writer lock, so multi-step position updates
//! never interleave. Reads run inside their own transaction and only ever see
//! committed state.

use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::config::Config;
use crate::error::Result;

#[derive(Clone)]
pub struct Store {
    pool: Arc<SqlitePool>,
    writer: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool: Arc::new(pool),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Open the pool described by `config`. The database file is created if
    /// it does not exist yet.
    pub async fn connect(config: &Config) -> std::result::Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(config.busy_timeout)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(self.pool.as_ref()).await
    }

    pub fn pool(&self) -> &SqlitePool {
        self.pool.as_ref()
    }

    /// Begin a write transaction. Waits for any in-flight writer to finish.
    pub async fn write(&self) -> Result<WriteTx> {
        let writer = self.writer.clone().lock_owned().await;
        let tx = self.pool.begin().await?;
        Ok(WriteTx {
            tx,
            _writer: writer,
        })
    }

    /// Begin a read transaction; all queries on it observe one snapshot.
    pub async fn read(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}

/// An open write transaction holding the writer lock.
///
/// Dropping it without calling [`WriteTx::commit`] rolls the transaction back
/// before the lock is released, which also covers a cancelled request future.
pub struct WriteTx {
    // Field order matters: the transaction must drop before the guard.
    tx: Transaction<'static, Sqlite>,
    _writer: OwnedMutexGuard<()>,
}

impl WriteTx {
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl Deref for WriteTx {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.tx
    }
}

impl DerefMut for WriteTx {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.tx
    }
}
