// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter}, sync::Arc};

use async_trait::async_trait;

use crate::{AsyncReducer, AsyncReducerItem};

/// Reducer function.
pub type ReducerFn<S, A> = dyn Fn(&S, &A) -> S + Sync + Send + 'static;

/// Turns a plain (synchronous) reducer function into an [`AsyncReducer`], so it can be
/// added to a [`crate::Store`] without having to declare a struct for it.
pub struct ReducerFnWrapper<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    fn_ref: Arc<ReducerFn<S, A>>,
}

impl<S, A> Clone for ReducerFnWrapper<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            fn_ref: self.fn_ref.clone(),
        }
    }
}

impl<S, A> Debug for ReducerFnWrapper<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReducerFnWrapper")
    }
}

impl<S, A> ReducerFnWrapper<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    pub fn from_fn(fn_ref: impl Fn(&S, &A) -> S + Send + Sync + 'static) -> Self {
        Self {
            fn_ref: Arc::new(fn_ref),
        }
    }

    /// Same as [`ReducerFnWrapper::from_fn`], boxed and ready for
    /// [`crate::Store::add_reducer`].
    pub fn new_item(
        fn_ref: impl Fn(&S, &A) -> S + Send + Sync + 'static,
    ) -> AsyncReducerItem<S, A> {
        Box::new(Self::from_fn(fn_ref))
    }

    pub fn invoke(&self, state: &S, action: &A) -> S { (self.fn_ref)(state, action) }
}

#[async_trait]
impl<S, A> AsyncReducer<S, A> for ReducerFnWrapper<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    async fn run(&self, action: &A, state: &S) -> S { self.invoke(state, action) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_invoke() {
        let wrapper = ReducerFnWrapper::from_fn(|state: &Vec<i32>, action: &i32| {
            let mut it = state.clone();
            it.push(*action);
            it
        });
        assert_eq!(wrapper.invoke(&vec![1], &2), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_run_as_async_reducer() {
        let item = ReducerFnWrapper::new_item(|state: &i32, action: &i32| state * action);
        assert_eq!(item.run(&3, &5).await, 15);
    }
}
