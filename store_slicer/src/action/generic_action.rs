// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use serde_json::Value;

use crate::{Selector, SlicerResult, generic_action_type, is_generic_action_type};

/// Type erased function payload of a [`GenericAction`]. It receives the current value of
/// the slice (`None` if the slice doesn't exist in the state tree yet) and returns its
/// next value.
pub type SliceFn = Arc<dyn Fn(Option<Value>) -> SlicerResult<Value> + Send + Sync>;

/// An action that carries the function to apply to a slice of the state, instead of
/// data that a hand written reducer has to interpret. The reducer returned by
/// [`crate::wrap_reducer`] applies it to the slice at [`GenericAction::selector`].
#[derive(Clone)]
pub struct GenericAction {
    action_type: String,
    selector: Selector,
    func: SliceFn,
}

impl GenericAction {
    /// Tags the action `GENERIC_<name>`.
    pub fn new(name: &str, selector: Selector, func: SliceFn) -> Self {
        Self::from_parts(generic_action_type(name), selector, func)
    }

    /// Keeps the `action_type` tag exactly as given.
    pub fn from_parts(
        action_type: impl Into<String>,
        selector: Selector,
        func: SliceFn,
    ) -> Self {
        Self {
            action_type: action_type.into(),
            selector,
            func,
        }
    }

    pub fn from_fn(
        name: &str,
        selector: Selector,
        func: impl Fn(Option<Value>) -> SlicerResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, selector, Arc::new(func))
    }

    pub fn action_type(&self) -> &str { &self.action_type }

    pub fn selector(&self) -> &Selector { &self.selector }

    /// Run the payload against the current value of the slice.
    ///
    /// # Errors
    ///
    /// Returns whatever error the payload returns.
    pub fn invoke(&self, slice: Option<Value>) -> SlicerResult<Value> { (self.func)(slice) }

    /// `true` if the tag marks this as a generic action and it targets a field (not the
    /// root of the state tree).
    pub fn is_interceptable(&self) -> bool {
        is_generic_action_type(&self.action_type) && !self.selector.is_root()
    }
}

impl Debug for GenericAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericAction")
            .field("action_type", &self.action_type)
            .field("selector", &self.selector.as_str())
            .field("func", &"<fn>")
            .finish()
    }
}

/// Implement this for your application's action type, so that the reducer returned by
/// [`crate::wrap_reducer`] can find the [`GenericAction`] embedded in it. Your action
/// type should also implement [`From<GenericAction>`], so that slices can dispatch into
/// your store.
///
/// ```
/// use r3bl_store_slicer::{GenericAction, GenericActionCarrier};
///
/// #[derive(Clone, Debug)]
/// enum Action {
///     Generic(GenericAction),
///     Increment,
/// }
///
/// impl From<GenericAction> for Action {
///     fn from(it: GenericAction) -> Self { Action::Generic(it) }
/// }
///
/// impl GenericActionCarrier for Action {
///     fn as_generic_action(&self) -> Option<&GenericAction> {
///         match self {
///             Action::Generic(it) => Some(it),
///             Action::Increment => None,
///         }
///     }
/// }
/// ```
pub trait GenericActionCarrier {
    fn as_generic_action(&self) -> Option<&GenericAction>;
}

impl GenericActionCarrier for GenericAction {
    fn as_generic_action(&self) -> Option<&GenericAction> { Some(self) }
}
