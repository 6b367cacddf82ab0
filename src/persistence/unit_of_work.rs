// Copyright 2025 Cowboy AI, LLC.

//! Unit-of-Work
//!
//! One Unit-of-Work instance owns one transaction lifecycle. It can be driven
//! explicitly (`start` / `commit` / `rollback`) or through the scoped
//! [`UnitOfWork::run`], and both compose: `run` inside an explicit span joins
//! the live transaction instead of opening a second one.
//!
//! ```mermaid
//! graph TD
//!     R[run work] --> A{Active?}
//!     A -->|yes| J[work on live transaction]
//!     J --> K[keep transaction for the outer owner]
//!     A -->|no| S[start]
//!     S --> W[work]
//!     W -->|Ok| C[commit]
//!     W -->|Err| RB[rollback, return the error]
//! ```

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::any::Any;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::errors::{DomainError, DomainResult};
use crate::transaction_state::{UnitOfWorkAction, UnitOfWorkInput, UnitOfWorkState};

use super::registry::{downcast_repository, RepositoryContainer, RepositoryName, Resolvable};
use super::store::{Store, Transaction, TransactionSlot};

/// Transaction lifecycle shared by a set of repositories
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a transaction; a no-op when one is already active
    async fn start(&self) -> DomainResult<()>;

    /// Finalize the active transaction
    ///
    /// Fails with `NoTransaction` when idle.
    async fn commit(&self) -> DomainResult<()>;

    /// Discard the active transaction
    ///
    /// Fails with `NoTransaction` when idle.
    async fn rollback(&self) -> DomainResult<()>;

    /// Current lifecycle state
    async fn state(&self) -> UnitOfWorkState;

    /// The live transaction handle, if any
    async fn transaction(&self) -> Option<Transaction>;

    /// Resolve the repository registered under `name`, bound to this unit
    async fn resolve(&self, name: RepositoryName) -> DomainResult<Box<dyn Any + Send + Sync>>;

    /// Typed repository bound to this unit
    async fn get_repository<R>(&self) -> DomainResult<Arc<R>>
    where
        Self: Sized,
        R: ?Sized + Resolvable,
    {
        downcast_repository(self.resolve(R::NAME).await?)
    }

    /// Run `work` inside a transaction
    ///
    /// When idle, a transaction is started, committed when `work` succeeds and
    /// rolled back when it fails; the error of `work` is returned unchanged.
    /// When already active, `work` runs on the live transaction and neither
    /// commit nor rollback is issued: the outer owner finalizes it. The
    /// transaction stays in place afterwards, so `transaction()` still returns
    /// it and the unit stays `Active` until that outer `commit` or `rollback`.
    async fn run<T, F>(&self, work: F) -> DomainResult<T>
    where
        Self: Sized,
        T: Send + 'static,
        F: for<'a> FnOnce(&'a Self) -> BoxFuture<'a, DomainResult<T>> + Send + 'static,
    {
        if self.state().await.is_active() {
            debug!("joining active transaction");
            return work(self).await;
        }

        self.start().await?;
        match work(self).await {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed work also failed");
                }
                Err(err)
            }
        }
    }
}

/// Unit-of-Work over a transactional [`Store`]
pub struct StoreUnitOfWork {
    store: Arc<Store>,
    repositories: Arc<RepositoryContainer>,
    slot: TransactionSlot,
    state: Mutex<UnitOfWorkState>,
}

impl StoreUnitOfWork {
    /// Create an idle unit handing out `repositories`
    pub fn new(store: Arc<Store>, repositories: Arc<RepositoryContainer>) -> Self {
        Self {
            store,
            repositories,
            slot: TransactionSlot::new(),
            state: Mutex::new(UnitOfWorkState::Idle),
        }
    }

    /// Create an idle unit with every catalog repository registered
    pub fn for_catalog(store: Arc<Store>) -> Self {
        let repositories = Arc::new(RepositoryContainer::for_store(store.clone()));
        Self::new(store, repositories)
    }

    /// The backing store
    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

#[async_trait]
impl UnitOfWork for StoreUnitOfWork {
    async fn start(&self) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let (next, action) = state.transition(UnitOfWorkInput::Start)?;
        if action == UnitOfWorkAction::Begin {
            self.slot.set(self.store.begin().await).await;
        }
        *state = next;
        Ok(())
    }

    async fn commit(&self) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let (next, _) = state.transition(UnitOfWorkInput::Commit)?;
        *state = next;
        let tx = self.slot.take().await.ok_or(DomainError::NoTransaction)?;
        self.store.commit(&tx).await
    }

    async fn rollback(&self) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let (next, _) = state.transition(UnitOfWorkInput::Rollback)?;
        *state = next;
        let tx = self.slot.take().await.ok_or(DomainError::NoTransaction)?;
        self.store.rollback(&tx).await
    }

    async fn state(&self) -> UnitOfWorkState {
        *self.state.lock().await
    }

    async fn transaction(&self) -> Option<Transaction> {
        self.slot.current().await
    }

    async fn resolve(&self, name: RepositoryName) -> DomainResult<Box<dyn Any + Send + Sync>> {
        if !self.state().await.is_active() {
            return Err(DomainError::NoTransaction);
        }
        self.repositories.resolve_any(name, &self.slot)
    }
}

/// Unit-of-Work over in-memory repositories
///
/// Follows the same state machine but holds no physical transaction:
/// `transaction()` is always `None`, repositories can be resolved while idle,
/// and `rollback` cannot undo writes already applied to the repositories.
pub struct InMemoryUnitOfWork {
    repositories: Arc<RepositoryContainer>,
    slot: TransactionSlot,
    state: Mutex<UnitOfWorkState>,
}

impl InMemoryUnitOfWork {
    /// Create an idle unit handing out `repositories`
    pub fn new(repositories: Arc<RepositoryContainer>) -> Self {
        Self {
            repositories,
            slot: TransactionSlot::new(),
            state: Mutex::new(UnitOfWorkState::Idle),
        }
    }

    async fn apply(&self, input: UnitOfWorkInput) -> DomainResult<()> {
        let mut state = self.state.lock().await;
        let (next, _) = state.transition(input)?;
        *state = next;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn start(&self) -> DomainResult<()> {
        self.apply(UnitOfWorkInput::Start).await
    }

    async fn commit(&self) -> DomainResult<()> {
        self.apply(UnitOfWorkInput::Commit).await
    }

    async fn rollback(&self) -> DomainResult<()> {
        self.apply(UnitOfWorkInput::Rollback).await
    }

    async fn state(&self) -> UnitOfWorkState {
        *self.state.lock().await
    }

    async fn transaction(&self) -> Option<Transaction> {
        None
    }

    async fn resolve(&self, name: RepositoryName) -> DomainResult<Box<dyn Any + Send + Sync>> {
        self.repositories.resolve_any(name, &self.slot)
    }
}
