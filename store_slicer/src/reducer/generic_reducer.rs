// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Apply [`GenericAction`]s to the state, so that slices don't need hand written
//! reducers. Any state type that round trips through [`serde_json::Value`] works.

use std::{fmt::{Debug, Formatter},
          marker::PhantomData};

use async_trait::async_trait;
use r3bl_redux::{AsyncReducer, AsyncReducerItem};
use serde::{Serialize, de::DeserializeOwned};

use crate::{GenericAction, GenericActionCarrier, SlicerError, SlicerResult, get_at_path,
            set_at_path};

/// Apply the function payload of `action` to the slice of `state` at the action's
/// selector, and return the new state. `state` itself is left alone.
///
/// # Errors
///
/// Returns an error if the state doesn't serialize, the payload fails, the selector runs
/// into an array with a non numeric key, or the updated tree doesn't deserialize back
/// into `S`.
pub fn apply_generic_action<S>(state: &S, action: &GenericAction) -> SlicerResult<S>
where
    S: Serialize + DeserializeOwned,
{
    let selector = action.selector();

    let mut tree = serde_json::to_value(state).map_err(SlicerError::SerializeState)?;
    let state_part = get_at_path(&tree, selector).cloned();
    let new_state_part = action.invoke(state_part)?;
    set_at_path(&mut tree, selector, new_state_part)?;

    serde_json::from_value(tree).map_err(|source| SlicerError::DeserializeState {
        selector: selector.to_string(),
        source,
    })
}

/// Wrap your reducer, so that actions carrying a [`GenericAction`] are applied to their
/// slice and everything else is handed to `inner` unchanged.
pub fn wrap_reducer<S, A>(inner: AsyncReducerItem<S, A>) -> AsyncReducerItem<S, A>
where
    S: Serialize + DeserializeOwned + Clone + Sync + Send + 'static,
    A: GenericActionCarrier + Sync + Send + 'static,
{
    Box::new(GenericReducer {
        maybe_inner: Some(inner),
        _phantom: PhantomData,
    })
}

/// Same as [`wrap_reducer`] for stores that are made up only of slices. Actions that
/// aren't intercepted leave the state as it is.
pub fn generic_reducer<S, A>() -> AsyncReducerItem<S, A>
where
    S: Serialize + DeserializeOwned + Clone + Sync + Send + 'static,
    A: GenericActionCarrier + Sync + Send + 'static,
{
    Box::new(GenericReducer {
        maybe_inner: None,
        _phantom: PhantomData,
    })
}

pub struct GenericReducer<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    maybe_inner: Option<AsyncReducerItem<S, A>>,
    _phantom: PhantomData<fn() -> (S, A)>,
}

impl<S, A> Debug for GenericReducer<S, A>
where
    S: Sync + Send + 'static,
    A: Sync + Send + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericReducer")
            .field("has_inner", &self.maybe_inner.is_some())
            .finish()
    }
}

#[async_trait]
impl<S, A> AsyncReducer<S, A> for GenericReducer<S, A>
where
    S: Serialize + DeserializeOwned + Clone + Sync + Send + 'static,
    A: GenericActionCarrier + Sync + Send + 'static,
{
    async fn run(&self, action: &A, state: &S) -> S {
        if let Some(generic_action) = action
            .as_generic_action()
            .filter(|it| it.is_interceptable())
        {
            return match apply_generic_action(state, generic_action) {
                Ok(new_state) => new_state,
                Err(error) => {
                    // % is Display, ? is Debug.
                    tracing::error!(
                        message = "💥 could not apply generic action, state unchanged",
                        action_type = %generic_action.action_type(),
                        selector = %generic_action.selector(),
                        error = ?error
                    );
                    state.clone()
                }
            };
        }

        match &self.maybe_inner {
            Some(inner) => inner.run(action, state).await,
            None => state.clone(),
        }
    }
}
