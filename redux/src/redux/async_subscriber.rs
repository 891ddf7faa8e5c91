// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use async_trait::async_trait;

/// Subscribers are notified with a copy of the state after a dispatch changes it.
///
/// Do not dispatch to the same [`crate::SharedStore`] from inside `run()` by awaiting
/// its write lock. The lock is held for the whole dispatch and is not reentrant, so this
/// deadlocks. Use [`crate::spawn_dispatch_action!`] instead.
#[async_trait]
pub trait AsyncSubscriber<S>
where
    S: Sync + Send,
{
    async fn run(&self, state: S);

    /// <https://doc.rust-lang.org/book/ch10-02-traits.html>
    #[must_use]
    fn new() -> AsyncSubscriberItem<S>
    where
        Self: Default + Sized + Sync + Send + 'static,
    {
        Box::new(Self::default())
    }
}

pub type AsyncSubscriberItem<S> = Box<dyn AsyncSubscriber<S> + Send + Sync>;
pub type AsyncSubscriberVec<S> = Vec<AsyncSubscriberItem<S>>;
