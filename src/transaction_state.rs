// Copyright 2025 Cowboy AI, LLC.

//! Unit-of-Work State Machine (Mealy)
//!
//! A Unit-of-Work is either Idle (no transaction) or Active (one live
//! transaction). Transitions are edges in a graph; the output of each edge is
//! the physical action the Unit-of-Work must perform on its backing store.
//!
//! ```mermaid
//! stateDiagram-v2
//!     [*] --> Idle
//!     Idle --> Active: Start / Begin
//!     Active --> Active: Start / Reuse
//!     Active --> Idle: Commit / Commit
//!     Active --> Idle: Rollback / Rollback
//! ```
//!
//! Commit or Rollback from Idle has no edge and fails with
//! [`DomainError::NoTransaction`].

use crate::errors::{DomainError, DomainResult};
use crate::state_machine::{MealyStateTransitions, State, TransitionInput, TransitionOutput};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lifecycle states of a Unit-of-Work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitOfWorkState {
    /// No active transaction
    #[default]
    Idle,
    /// A transaction was started and not yet finalized
    Active,
}

impl State for UnitOfWorkState {
    fn name(&self) -> &'static str {
        match self {
            UnitOfWorkState::Idle => "Idle",
            UnitOfWorkState::Active => "Active",
        }
    }
}

/// Inputs that drive Unit-of-Work transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfWorkInput {
    /// Begin a transaction
    Start,
    /// Finalize the transaction
    Commit,
    /// Discard the transaction
    Rollback,
}

impl TransitionInput for UnitOfWorkInput {
    fn description(&self) -> String {
        format!("{self:?}")
    }
}

/// Physical action emitted by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitOfWorkAction {
    /// Open a new physical transaction
    Begin,
    /// Keep using the live transaction
    Reuse,
    /// Commit the live transaction
    Commit,
    /// Roll back the live transaction
    Rollback,
}

impl TransitionOutput for UnitOfWorkAction {}

impl MealyStateTransitions for UnitOfWorkState {
    type Input = UnitOfWorkInput;
    type Output = UnitOfWorkAction;

    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool {
        use UnitOfWorkInput as I;
        use UnitOfWorkState as S;
        matches!(
            (*self, target, input),
            (S::Idle, S::Active, I::Start)
                | (S::Active, S::Active, I::Start)
                | (S::Active, S::Idle, I::Commit)
                | (S::Active, S::Idle, I::Rollback)
        )
    }

    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self> {
        use UnitOfWorkInput as I;
        use UnitOfWorkState as S;
        match (*self, input) {
            (_, I::Start) => vec![S::Active],
            (S::Active, I::Commit) | (S::Active, I::Rollback) => vec![S::Idle],
            _ => Vec::new(),
        }
    }

    fn transition_output(&self, _target: &Self, input: &Self::Input) -> Self::Output {
        use UnitOfWorkInput as I;
        use UnitOfWorkState as S;
        match (*self, input) {
            (S::Idle, I::Start) => UnitOfWorkAction::Begin,
            (S::Active, I::Start) => UnitOfWorkAction::Reuse,
            (_, I::Commit) => UnitOfWorkAction::Commit,
            (_, I::Rollback) => UnitOfWorkAction::Rollback,
        }
    }
}

impl UnitOfWorkState {
    /// Apply `input`, returning the next state and the action to perform
    pub fn transition(self, input: UnitOfWorkInput) -> DomainResult<(Self, UnitOfWorkAction)> {
        let Some(target) = self
            .valid_transitions(&input)
            .into_iter()
            .find(|target| self.can_transition_to(target, &input))
        else {
            debug!(state = self.name(), input = %input.description(), "no transition");
            return Err(DomainError::NoTransaction);
        };
        let action = self.transition_output(&target, &input);
        debug!(
            from = self.name(),
            to = target.name(),
            input = %input.description(),
            ?action,
            "unit of work transition"
        );
        Ok((target, action))
    }

    /// True when a transaction is live
    pub fn is_active(&self) -> bool {
        matches!(self, UnitOfWorkState::Active)
    }
}
