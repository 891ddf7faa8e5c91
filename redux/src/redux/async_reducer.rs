// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

/// A reducer produces the next state from the current state and an action. Reducers
/// registered with a [`crate::Store`] run in sequence, in the order they were added.
#[async_trait]
pub trait AsyncReducer<S, A>
where
    S: Sync + Send,
    A: Sync + Send,
{
    async fn run(&self, action: &A, state: &S) -> S;

    /// <https://doc.rust-lang.org/book/ch10-02-traits.html>
    #[must_use]
    fn new() -> AsyncReducerItem<S, A>
    where
        Self: Default + Sized + Sync + Send + 'static,
    {
        Box::new(Self::default())
    }
}

pub type AsyncReducerItem<S, A> = Box<dyn AsyncReducer<S, A> + Send + Sync>;
pub type AsyncReducerVec<S, A> = Vec<AsyncReducerItem<S, A>>;
