// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{DispatchOutcome, GenericAction, Selector, SharedConnector, SliceFn,
            SlicerError, SlicerResult, create_valid_type_name, get_at_path};

/// A typed handle to one field of the state tree. Updates are plain `T -> T` functions
/// that the reducer returned by [`crate::wrap_reducer`] applies to the field, so there
/// is no reducer code to write per field.
///
/// - `T` is the type of the field.
/// - `S` and `A` are the state and action types of the store.
///
/// ```no_run
/// use r3bl_redux::Store;
/// use r3bl_store_slicer::{GenericAction, SlicerConfig, StoreConnector, StoreSlicer,
///                         generic_reducer};
/// use serde_json::{Value, json};
///
/// # async fn run() -> miette::Result<()> {
/// let connector = StoreConnector::<Value, GenericAction>::new(SlicerConfig::default());
/// let counter = StoreSlicer::new(&connector, "stats.counter", 0_i64, None)?;
///
/// // Queued, since there is no store yet.
/// counter.dispatch(|it| it + 1, Some("INC")).await?;
///
/// let mut store = Store::<Value, GenericAction>::with_state(json!({}));
/// store.add_reducer(generic_reducer());
/// connector.connect_store(store.into_shared()).await;
///
/// assert_eq!(counter.get_state_from_store().await?, Some(1));
/// # Ok(())
/// # }
/// ```
pub struct StoreSlicer<T, S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    selector: Selector,
    action_type_prefix: String,
    initial_state: T,
    connector: SharedConnector<S, A>,
}

impl<T, S, A> StoreSlicer<T, S, A>
where
    T: Serialize + DeserializeOwned + Clone + Sync + Send + 'static,
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    /// Create a slice for the field at `selector`. Its actions are tagged
    /// `GENERIC_<maybe_type_name>`, or `GENERIC_<SELECTOR>` (see
    /// [`create_valid_type_name`]) if no type name (or an empty one) is given.
    ///
    /// # Errors
    ///
    /// Returns [`SlicerError::InvalidSelector`] if `selector` doesn't parse.
    pub fn new(
        connector: &SharedConnector<S, A>,
        selector: &str,
        initial_state: T,
        maybe_type_name: Option<&str>,
    ) -> SlicerResult<Self> {
        let selector = Selector::try_parse(selector)?;
        let action_type_prefix = match maybe_type_name.filter(|it| !it.is_empty()) {
            Some(type_name) => type_name.to_string(),
            None => create_valid_type_name(selector.as_str()),
        };
        Ok(Self {
            selector,
            action_type_prefix,
            initial_state,
            connector: connector.clone(),
        })
    }

    pub fn selector(&self) -> &Selector { &self.selector }

    pub fn action_type_prefix(&self) -> &str { &self.action_type_prefix }

    pub fn initial_state(&self) -> &T { &self.initial_state }

    /// Dispatch `func` to update this slice. The action is named
    /// `<prefix>_<maybe_type_name>`, or just `<prefix>` if the type name is missing or
    /// empty. `func` receives the slice's
    /// initial state while the field doesn't exist in the state tree (or is `null`).
    ///
    /// If the current value of the field can't be converted into `T` when the action is
    /// reduced, the error is logged and the state is left alone.
    ///
    /// # Errors
    ///
    /// Returns [`SlicerError::PendingQueueFull`] if no store is connected and no more
    /// actions can be queued.
    pub async fn dispatch<F>(
        &self,
        func: F,
        maybe_type_name: Option<&str>,
    ) -> SlicerResult<DispatchOutcome>
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        let action_name = match maybe_type_name.filter(|it| !it.is_empty()) {
            Some(type_name) => format!("{}_{type_name}", self.action_type_prefix),
            None => self.action_type_prefix.clone(),
        };
        let slice_fn = self.erase(func);
        self.connector
            .dispatch_generic(&action_name, &self.selector, slice_fn)
            .await
    }

    /// Put the slice back to its initial state.
    ///
    /// # Errors
    ///
    /// Same as [`Self::dispatch`].
    pub async fn reset_state(&self) -> SlicerResult<DispatchOutcome> {
        let initial_state = self.initial_state.clone();
        self.dispatch(move |_| initial_state.clone(), None).await
    }

    /// Read this slice out of `state`. Returns `None` if the field doesn't exist or is
    /// `null`.
    ///
    /// # Errors
    ///
    /// Returns an error if `state` doesn't serialize, or the field can't be converted
    /// into `T`.
    pub fn get_state(&self, state: &S) -> SlicerResult<Option<T>>
    where
        S: Serialize,
    {
        let tree = serde_json::to_value(state).map_err(SlicerError::SerializeState)?;
        match get_at_path(&tree, &self.selector) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| SlicerError::ConvertSlice {
                    selector: self.selector.to_string(),
                    source,
                }),
        }
    }

    /// Same as [`Self::get_state`] against the connected store. Returns `None` if no
    /// store is connected.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_state`].
    pub async fn get_state_from_store(&self) -> SlicerResult<Option<T>>
    where
        S: Serialize,
    {
        let Some(store) = self.connector.get_store().await else {
            return Ok(None);
        };
        let state = store.read().await.get_state();
        self.get_state(&state)
    }

    /// Turn a typed update into a [`SliceFn`] that works on the JSON value of the field.
    fn erase<F>(&self, func: F) -> SliceFn
    where
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        let selector = self.selector.to_string();
        let initial_state = self.initial_state.clone();
        let convert_error = move |source: serde_json::Error| SlicerError::ConvertSlice {
            selector: selector.clone(),
            source,
        };

        Arc::new(move |maybe_slice: Option<Value>| -> SlicerResult<Value> {
            let current = match maybe_slice {
                None | Some(Value::Null) => initial_state.clone(),
                Some(value) => serde_json::from_value(value).map_err(&convert_error)?,
            };
            serde_json::to_value(func(current)).map_err(&convert_error)
        })
    }
}

impl<T, S, A> Clone for StoreSlicer<T, S, A>
where
    T: Clone,
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            action_type_prefix: self.action_type_prefix.clone(),
            initial_state: self.initial_state.clone(),
            connector: self.connector.clone(),
        }
    }
}

impl<T, S, A> Debug for StoreSlicer<T, S, A>
where
    T: Debug,
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSlicer")
            .field("selector", &self.selector.as_str())
            .field("action_type_prefix", &self.action_type_prefix)
            .field("initial_state", &self.initial_state)
            .finish_non_exhaustive()
    }
}
