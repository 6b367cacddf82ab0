// Copyright 2025 Cowboy AI, LLC.

//! State machine traits
//!
//! States are enums; inputs drive transitions; a Mealy machine emits an output
//! that depends on both the current state and the input. The Unit-of-Work uses
//! the output to decide which physical transaction action to perform.

use std::fmt::Debug;

/// Marker for inputs that drive transitions
pub trait TransitionInput: Debug + Clone + Send + Sync {
    /// Human readable description of the input
    fn description(&self) -> String;
}

/// Marker for outputs produced by transitions
pub trait TransitionOutput: Debug + Clone + Send + Sync {}

/// A state in a state machine
pub trait State: Debug + Clone + PartialEq + Eq + Send + Sync {
    /// Name of the state
    fn name(&self) -> &'static str;
}

/// Mealy machine: output depends on state and input
pub trait MealyStateTransitions: State {
    /// Input type
    type Input: TransitionInput;
    /// Output type
    type Output: TransitionOutput;

    /// Check whether `input` moves this state to `target`
    fn can_transition_to(&self, target: &Self, input: &Self::Input) -> bool;

    /// States reachable from this one with `input`
    fn valid_transitions(&self, input: &Self::Input) -> Vec<Self>;

    /// Output emitted when moving to `target` with `input`
    fn transition_output(&self, target: &Self, input: &Self::Input) -> Self::Output;
}
