#[macro_use]
extern crate diesel;

use std::{
    cell::{RefCell, RefMut},
    sync::Arc,
};

use anyhow::Result as Fallible;
use diesel::{r2d2, sqlite::SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod models;
mod repo_impl;
mod schema;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

type Connection = SqliteConnection;

type ConnectionManager = r2d2::ConnectionManager<Connection>;
type ConnectionPool = r2d2::Pool<ConnectionManager>;
type PooledConnection = r2d2::PooledConnection<ConnectionManager>;

type SharedConnectionPool = Arc<RwLock<ConnectionPool>>;

pub struct DbReadOnly<'a> {
    _locked_pool: RwLockReadGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadOnly<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.read();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read-only access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }
}

pub struct DbReadWrite<'a> {
    _locked_pool: RwLockWriteGuard<'a, ConnectionPool>,
    conn: RefCell<PooledConnection>,
}

impl<'a> DbReadWrite<'a> {
    fn try_new(pool: &'a SharedConnectionPool) -> Fallible<Self> {
        let locked_pool = pool.write();
        let conn = locked_pool.get().inspect_err(|err| {
            log::error!("Failed to obtain pooled database connection for read/write access: {err}");
        })?;
        Ok(Self {
            _locked_pool: locked_pool,
            conn: RefCell::new(conn),
        })
    }

    fn sqlite_conn(&self) -> RefMut<'_, PooledConnection> {
        self.conn.borrow_mut()
    }
}

#[derive(Clone)]
pub struct Connections {
    // Only a single connection with write access will be
    // handed out at a time from the pool. Multiple read
    // connections can be accessed concurrently. This locking
    // pattern around the connection pool prevents SQLITE_LOCKED
    // ("database is locked") errors under concurrent cache writes.
    pool: SharedConnectionPool,
}

/// Configure the database engine.
///
/// Some values like the text encoding can only be changed once after the
/// database has initially been created.
pub fn initialize_database(connection: &mut SqliteConnection) -> Fallible<()> {
    use diesel::RunQueryDsl as _;
    diesel::sql_query(
        r#"
PRAGMA journal_mode = WAL;   -- better write-concurrency
PRAGMA synchronous = NORMAL; -- fsync only in critical moments, safe for journal_mode = WAL
PRAGMA secure_delete = 0;    -- avoid some disk I/O
PRAGMA encoding = 'UTF-8';
"#,
    )
    .execute(connection)?;
    Ok(())
}

impl Connections {
    pub fn init(url: &str, pool_size: u32) -> Fallible<Self> {
        // Establish a test connection before creating the connection pool
        // to fail early on an inaccessible database file instead of
        // running through the pool's retry logic.
        use diesel::Connection as _;
        let _ = diesel::SqliteConnection::establish(url)?;
        let manager = ConnectionManager::new(url);
        let pool = ConnectionPool::builder().max_size(pool_size).build(manager)?;
        initialize_database(&mut *pool.get()?)?;
        Ok(Self::new(pool))
    }

    fn new(pool: ConnectionPool) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    pub fn shared(&self) -> Fallible<DbReadOnly<'_>> {
        DbReadOnly::try_new(&self.pool)
    }

    pub fn exclusive(&self) -> Fallible<DbReadWrite<'_>> {
        DbReadWrite::try_new(&self.pool)
    }
}

pub fn run_embedded_database_migrations(conn: DbReadWrite<'_>) -> Fallible<()> {
    log::info!("Running embedded database migrations");
    conn.sqlite_conn()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| anyhow::anyhow!("Failed to run database migrations: {err}"))?;
    Ok(())
}
