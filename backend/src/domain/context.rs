//! Per-request unit of work.
//!
//! Adapters stage [`PendingChange`]s into a [`Context`] while a use-case runs.
//! The service then either [`Context::complete`]s it, applying every change
//! in staging order, or [`Context::abort`]s it, rolling every change back.
//! Both consume the context, so a context is released exactly once. A
//! context dropped while still open (for example when the request future is
//! cancelled) rolls its staged changes back on a background task.

use std::fmt;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::{Instrument, Span, info, warn};
use uuid::Uuid;

use super::{Error, Subject, TraceId};

/// Identifier attached to log lines emitted for a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextId(Uuid);

impl ContextId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A change staged by an adapter and applied when the context completes.
#[async_trait]
pub trait PendingChange: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> String;

    /// Make the change visible.
    async fn commit(&mut self) -> Result<(), Error>;

    /// Undo any side effect performed while staging. Must not fail.
    async fn rollback(&mut self);
}

/// Transaction context for one request.
pub struct Context {
    id: ContextId,
    subject: Subject,
    pending: Vec<Box<dyn PendingChange>>,
    released: bool,
}

impl Context {
    /// Open a context on behalf of `subject`.
    #[must_use]
    pub fn open(subject: Subject) -> Self {
        Self {
            id: ContextId::generate(),
            subject,
            pending: Vec::new(),
            released: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Caller the context acts for.
    #[must_use]
    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Queue a change to apply on completion.
    pub fn stage(&mut self, change: Box<dyn PendingChange>) {
        self.pending.push(change);
    }

    /// Number of changes waiting to be applied.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Apply staged changes in order.
    ///
    /// When a change fails to commit it is rolled back together with every
    /// change after it, and the error is returned. Changes already committed
    /// stay applied.
    pub async fn complete(mut self) -> Result<(), Error> {
        self.released = true;
        let mut pending = std::mem::take(&mut self.pending).into_iter();
        let mut applied = 0_usize;
        while let Some(mut change) = pending.next() {
            if let Err(err) = change.commit().await {
                warn!(
                    context_id = %self.id,
                    change = %change.describe(),
                    error = %err,
                    "context commit failed; rolling back remaining changes"
                );
                change.rollback().await;
                for mut rest in pending {
                    rest.rollback().await;
                }
                return Err(err);
            }
            applied += 1;
        }
        info!(context_id = %self.id, changes = applied, "context committed");
        Ok(())
    }

    /// Roll back every staged change, most recent first.
    pub async fn abort(mut self) {
        self.released = true;
        let pending = std::mem::take(&mut self.pending);
        let count = rollback_all(pending).await;
        info!(context_id = %self.id, changes = count, "context aborted");
    }
}

async fn rollback_all(pending: Vec<Box<dyn PendingChange>>) -> usize {
    let count = pending.len();
    for mut change in pending.into_iter().rev() {
        change.rollback().await;
    }
    count
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("id", &self.id)
            .field("subject", &self.subject)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return;
        }
        let context_id = self.id;
        let Ok(handle) = Handle::try_current() else {
            warn!(
                %context_id,
                changes = pending.len(),
                "context dropped outside a runtime; staged changes cannot be rolled back"
            );
            return;
        };
        warn!(
            %context_id,
            changes = pending.len(),
            "context dropped without completion; rolling back staged changes"
        );
        let trace_id = TraceId::current();
        let rollback = async move {
            let count = rollback_all(pending).await;
            info!(%context_id, changes = count, "dropped context rolled back");
        };
        handle.spawn(
            async move {
                match trace_id {
                    Some(id) => TraceId::scope(id, rollback).await,
                    None => rollback.await,
                }
            }
            .instrument(Span::current()),
        );
    }
}
