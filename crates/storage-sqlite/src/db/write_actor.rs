use super::DbPool;
use crate::errors::StorageError;
use cryptowallet_core::errors::{DatabaseError, Error, Result};
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

// A write job runs against the writer's dedicated connection and reports a core Result.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type BoxedReply = Result<Box<dyn Any + Send + 'static>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    #[allow(clippy::type_complexity)]
    tx: mpsc::Sender<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<BoxedReply>,
    )>,
}

impl WriteHandle {
    /// Executes a database job on the writer actor's dedicated connection.
    ///
    /// The job runs inside an immediate transaction; an `Err` rolls it back.
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
            .map_err(|_| writer_gone("writer actor is not running"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| writer_gone("writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| writer_gone("unexpected writer actor result type"))
    }
}

fn writer_gone(message: &str) -> Error {
    Error::Database(DatabaseError::Internal(message.to_string()))
}

/// Spawns a background Tokio task that acts as the single writer to the database.
///
/// The actor owns one pooled connection and processes write jobs serially.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(
        Job<Box<dyn Any + Send + 'static>>,
        oneshot::Sender<BoxedReply>,
    )>(1024);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                // Dropping the receiver makes every pending and future exec fail.
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: BoxedReply = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(Error::from);

            // The requester may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
