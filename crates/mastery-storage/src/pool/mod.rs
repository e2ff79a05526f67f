//! Connection management: one serialized writer, a small round-robin read
//! pool, and the PRAGMA set applied to every connection.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;

use mastery_core::errors::MasteryResult;

use crate::to_storage_err;

/// Apply safety and performance pragmas to a connection.
/// WAL so readers never block the writer, NORMAL sync, 5s busy_timeout,
/// foreign_keys ON.
pub fn apply_pragmas(conn: &Connection) -> MasteryResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// The single write connection. All mutations funnel through its mutex,
/// which is what makes "one transaction per pipeline invocation" cheap to
/// guarantee.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> MasteryResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> MasteryResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run a closure against the writer, holding its lock for the duration.
    pub fn with_conn_sync<F, T>(&self, f: F) -> MasteryResult<T>
    where
        F: FnOnce(&Connection) -> MasteryResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("write connection poisoned".to_string()))?;
        f(&guard)
    }
}

/// Round-robin pool of read-only connections.
pub struct ReadPool {
    conns: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    pub fn open(path: &Path, size: usize) -> MasteryResult<Self> {
        let mut conns = Vec::with_capacity(size.max(1));
        for _ in 0..size.max(1) {
            let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
            apply_pragmas(&conn)?;
            conns.push(Mutex::new(conn));
        }
        Ok(Self {
            conns,
            next: AtomicUsize::new(0),
        })
    }

    /// Run a closure against the next reader in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> MasteryResult<T>
    where
        F: FnOnce(&Connection) -> MasteryResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.conns.len();
        let guard = self.conns[idx]
            .lock()
            .map_err(|_| to_storage_err("read connection poisoned".to_string()))?;
        f(&guard)
    }
}

/// Manages the write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: Option<ReadPool>,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a pool for the given database file.
    pub fn open(path: &Path, read_pool_size: usize) -> MasteryResult<Self> {
        let writer = WriteConnection::open(path)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers: Some(readers),
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory pool (for testing). No read pool: separate
    /// in-memory connections would be isolated databases that never see
    /// the writer's rows, so all reads route through the writer instead.
    pub fn open_in_memory() -> MasteryResult<Self> {
        let writer = WriteConnection::open_in_memory()?;
        Ok(Self {
            writer,
            readers: None,
            db_path: None,
        })
    }
}
