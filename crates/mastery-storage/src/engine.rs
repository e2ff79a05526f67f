//! StorageEngine — owns the ConnectionPool, implements IClusterStorage,
//! runs migrations on startup, and commits each pipeline invocation's
//! write set in one transaction.

use std::path::Path;

use chrono::{DateTime, Utc};

use mastery_core::cluster::{ConceptCluster, InteractionSignal, Subject, SubjectCluster};
use mastery_core::errors::MasteryResult;
use mastery_core::models::{InteractionOutcome, ProgressReport};
use mastery_core::traits::IClusterStorage;

use crate::pool::ConnectionPool;
use crate::queries::{cluster_ops, progress, signal_ops, subject_ops};
use crate::{migrations, to_storage_err};

/// The main storage engine. Fixed embedding dimensionality is pinned at
/// construction and enforced on every read.
pub struct StorageEngine {
    pool: ConnectionPool,
    dimensions: usize,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, dimensions: usize) -> MasteryResult<Self> {
        let pool = ConnectionPool::open(path, 4)?;
        let engine = Self { pool, dimensions };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). Reads route through
    /// the writer since in-memory read pool connections would be isolated
    /// databases.
    pub fn open_in_memory(dimensions: usize) -> MasteryResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        let engine = Self { pool, dimensions };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the writer.
    fn initialize(&self) -> MasteryResult<()> {
        self.pool
            .writer
            .with_conn_sync(migrations::run_migrations)
    }

    /// The embedding dimensionality this engine validates against.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Execute a read-only query on the best available connection:
    /// the read pool when file-backed, the writer when in-memory.
    fn with_reader<F, T>(&self, f: F) -> MasteryResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> MasteryResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

impl IClusterStorage for StorageEngine {
    fn clusters_for_subject(
        &self,
        user_id: i64,
        subject: Subject,
    ) -> MasteryResult<Vec<ConceptCluster>> {
        self.with_reader(|conn| {
            cluster_ops::clusters_for_subject(conn, user_id, subject, self.dimensions)
        })
    }

    fn subject_cluster(
        &self,
        user_id: i64,
        subject: Subject,
    ) -> MasteryResult<Option<SubjectCluster>> {
        self.with_reader(|conn| subject_ops::get_subject_cluster(conn, user_id, subject))
    }

    fn commit_interaction(&self, outcome: &InteractionOutcome) -> MasteryResult<()> {
        self.pool.writer.with_conn_sync(|conn| {
            let tx = conn
                .unchecked_transaction()
                .map_err(|e| to_storage_err(format!("commit_interaction begin: {e}")))?;

            match commit_inner(&tx, outcome) {
                Ok(()) => {
                    tx.commit()
                        .map_err(|e| to_storage_err(format!("commit_interaction commit: {e}")))?;
                    Ok(())
                }
                Err(e) => {
                    let _ = tx.rollback();
                    Err(e)
                }
            }
        })
    }

    fn signals_for_user(&self, user_id: i64) -> MasteryResult<Vec<InteractionSignal>> {
        self.with_reader(|conn| signal_ops::signals_for_user(conn, user_id))
    }

    fn progress_report(&self, user_id: i64) -> MasteryResult<ProgressReport> {
        self.with_reader(|conn| progress::progress_report(conn, user_id))
    }

    fn mark_progress_seen(&self, user_id: i64, now: DateTime<Utc>) -> MasteryResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| progress::mark_progress_seen(conn, user_id, now))
    }
}

/// The write set, applied on the provided transaction (via Deref to
/// Connection): concept cluster upsert, subject cluster upsert, signal
/// appends. All-or-nothing with the caller's commit/rollback.
fn commit_inner(conn: &rusqlite::Connection, outcome: &InteractionOutcome) -> MasteryResult<()> {
    cluster_ops::upsert_cluster(conn, &outcome.cluster)?;
    subject_ops::upsert_subject_cluster(conn, &outcome.subject_cluster)?;
    for signal in &outcome.signals {
        signal_ops::insert_signal(conn, signal)?;
    }
    tracing::debug!(
        user_id = outcome.user_id,
        subject = %outcome.subject,
        signals = outcome.signals.len(),
        "interaction committed"
    );
    Ok(())
}
