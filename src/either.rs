// Copyright (c) 2025 - Cowboy AI, LLC.

//! Either - a success or failure value with composable validation
//!
//! `Either<T, E>` is the validation primitive used across the catalog: value
//! objects return it from their constructors, and identifier lists are
//! validated element by element with [`Either::chain_each`].
//!
//! # Composition
//!
//! - `ok` / `fail`: lift a value into the success or failure arm
//! - `chain` (>>=): sequence a dependent validation, short-circuiting on failure
//! - `chain_each`: validate every element of a sequence, accumulating *all*
//!   failures instead of stopping at the first one
//!
//! # Monad Laws
//!
//! 1. Left Identity: `ok a >>= f ≡ f a`
//! 2. Right Identity: `m >>= ok ≡ m`
//! 3. Associativity: `(m >>= f) >>= g ≡ m >>= (λx. f x >>= g)`

use serde::{Deserialize, Serialize};

/// A value that is either a success (`Ok`) or a failure (`Fail`), never both
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Either<T, E> {
    /// Success arm
    Ok(T),
    /// Failure arm
    Fail(E),
}

impl<T, E> Either<T, E> {
    /// Lift a value into the success arm
    pub fn ok(value: T) -> Self {
        Either::Ok(value)
    }

    /// Lift an error into the failure arm
    pub fn fail(error: E) -> Self {
        Either::Fail(error)
    }

    /// Run a fallible computation, capturing its error in the failure arm
    ///
    /// # Example
    /// ```rust
    /// use catalog_domain::{Either, CategoryId};
    ///
    /// let id = Either::safe(|| CategoryId::parse("not-a-uuid"));
    /// assert!(id.is_fail());
    /// ```
    pub fn safe<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, E>,
    {
        f().into()
    }

    /// True when this is the success arm
    pub fn is_ok(&self) -> bool {
        matches!(self, Either::Ok(_))
    }

    /// True when this is the failure arm
    pub fn is_fail(&self) -> bool {
        matches!(self, Either::Fail(_))
    }

    /// Borrow the success value, if any
    pub fn ok_value(&self) -> Option<&T> {
        match self {
            Either::Ok(value) => Some(value),
            Either::Fail(_) => None,
        }
    }

    /// Borrow the failure value, if any
    pub fn fail_value(&self) -> Option<&E> {
        match self {
            Either::Ok(_) => None,
            Either::Fail(error) => Some(error),
        }
    }

    /// bind: apply `f` to the success value; failures pass through unchanged
    pub fn chain<U, F>(self, f: F) -> Either<U, E>
    where
        F: FnOnce(T) -> Either<U, E>,
    {
        match self {
            Either::Ok(value) => f(value),
            Either::Fail(error) => Either::Fail(error),
        }
    }

    /// Functor map over the success value
    pub fn map<U, F>(self, f: F) -> Either<U, E>
    where
        F: FnOnce(T) -> U,
    {
        self.chain(|value| Either::Ok(f(value)))
    }

    /// Map over the failure value
    pub fn map_fail<G, F>(self, f: F) -> Either<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Either::Ok(value) => Either::Ok(value),
            Either::Fail(error) => Either::Fail(f(error)),
        }
    }

    /// Destructure into `(value, error)` where exactly one side is `Some`
    pub fn as_array(self) -> (Option<T>, Option<E>) {
        match self {
            Either::Ok(value) => (Some(value), None),
            Either::Fail(error) => (None, Some(error)),
        }
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Either::Ok(value) => Ok(value),
            Either::Fail(error) => Err(error),
        }
    }
}

impl<A, E> Either<Vec<A>, Vec<E>> {
    /// Validate every element independently
    ///
    /// All successes are collected in order; if any element failed, the result
    /// is the ordered list of every failure. An already failed value is
    /// returned unchanged.
    ///
    /// # Example
    /// ```rust
    /// use catalog_domain::Either;
    ///
    /// let checked = Either::<Vec<i32>, Vec<String>>::ok(vec![1, -2, 3, -4])
    ///     .chain_each(|n| if n > 0 { Either::ok(n) } else { Either::fail(format!("{n}")) });
    /// assert_eq!(checked, Either::fail(vec!["-2".to_string(), "-4".to_string()]));
    /// ```
    pub fn chain_each<B, F>(self, mut f: F) -> Either<Vec<B>, Vec<E>>
    where
        F: FnMut(A) -> Either<B, E>,
    {
        let items = match self {
            Either::Ok(items) => items,
            Either::Fail(errors) => return Either::Fail(errors),
        };

        let mut values = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for item in items {
            match f(item) {
                Either::Ok(value) => values.push(value),
                Either::Fail(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Either::Ok(values)
        } else {
            Either::Fail(errors)
        }
    }
}

impl<T, E> From<Result<T, E>> for Either<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Either::Ok(value),
            Err(error) => Either::Fail(error),
        }
    }
}

impl<T, E> From<Either<T, E>> for Result<T, E> {
    fn from(either: Either<T, E>) -> Self {
        either.into_result()
    }
}
