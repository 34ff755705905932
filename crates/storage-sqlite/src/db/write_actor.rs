//! Single-writer actor for serialized database mutations.
//!
//! SQLite allows one writer at a time; funnelling every mutation through one
//! dedicated connection avoids busy-lock churn and gives multi-statement
//! jobs (like a goal contribution) a single immediate transaction. The
//! contribute path relies on this: read-increment-complete-write runs as one
//! serialized unit, so concurrent contributions cannot lose updates.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use pocketledger_core::errors::Result;

use super::DbPool;
use crate::errors::StorageError;

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;
type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection, inside
    /// an immediate transaction. The job either fully commits or fully
    /// rolls back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        ret_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor result had unexpected type"))
            })
    }
}

/// Spawns the writer task. It owns one pooled connection for its lifetime
/// and processes jobs strictly in arrival order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to get a connection for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(StorageError::into_core);

            // Receiver may have gone away (request cancelled); that's fine.
            let _ = reply_tx.send(result);
        }
        // Channel closed: all WriteHandles dropped, actor exits.
    });

    WriteHandle { tx }
}
