// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

/// Middlewares see every action before the reducers do, along with a copy of the current
/// state. A middleware can return a follow up action, which the [`crate::Store`] reduces
/// right away (before the original action).
///
/// Your code in this trait implementation is able to deadlock if it tries to acquire
/// the [`crate::SharedStore`] write lock, since it is already held by the dispatch that
/// is running this middleware. Return the action instead, and it will be dispatched for
/// you.
#[async_trait]
pub trait AsyncMiddleware<S, A>
where
    S: Sync + Send,
    A: Sync + Send,
{
    async fn run(&self, action: A, state: S) -> Option<A>;

    /// <https://doc.rust-lang.org/book/ch10-02-traits.html>
    #[must_use]
    fn new() -> AsyncMiddlewareItem<S, A>
    where
        Self: Default + Sized + Sync + Send + 'static,
    {
        Box::new(Self::default())
    }
}

pub type AsyncMiddlewareItem<S, A> = Box<dyn AsyncMiddleware<S, A> + Send + Sync>;
pub type AsyncMiddlewareVec<S, A> = Vec<AsyncMiddlewareItem<S, A>>;
