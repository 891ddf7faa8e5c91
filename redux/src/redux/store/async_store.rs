// Copyright (c) 2022-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use tokio::sync::RwLock;

use crate::{AsyncMiddlewareItem, AsyncMiddlewareVec, AsyncReducerItem, AsyncReducerVec,
            AsyncSubscriberItem, AsyncSubscriberVec};

pub type SharedStore<S, A> = Arc<RwLock<Store<S, A>>>;

/// Dispatch an action to a [`SharedStore`] on a spawned task. This is how you dispatch
/// from inside a subscriber or middleware without deadlocking. Returns the
/// [`tokio::task::JoinHandle`] of the spawned task.
#[macro_export]
macro_rules! spawn_dispatch_action {
    ($store: expr, $action: expr) => {{
        let store_copy = $store.clone();
        tokio::spawn(async move {
            store_copy.write().await.dispatch_action($action).await;
        })
    }};
}

/// Thread safe and async Redux store (using [`tokio`]).
pub struct Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    pub state: S,
    pub history: Vec<S>,
    pub middleware_vec: AsyncMiddlewareVec<S, A>,
    pub subscriber_vec: AsyncSubscriberVec<S>,
    pub reducer_vec: AsyncReducerVec<S, A>,
    pub maybe_previous_state: Option<S>,
}

impl<S, A> Default for Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    fn default() -> Store<S, A> {
        Store {
            state: Default::default(),
            history: Default::default(),
            middleware_vec: Default::default(),
            reducer_vec: Default::default(),
            subscriber_vec: Default::default(),
            maybe_previous_state: None,
        }
    }
}

impl<S, A> Debug for Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("history.len", &self.history.len())
            .field("middleware_vec.len", &self.middleware_vec.len())
            .field("subscriber_vec.len", &self.subscriber_vec.len())
            .field("reducer_vec.len", &self.reducer_vec.len())
            .finish()
    }
}

// Construction.
impl<S, A> Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    /// Create a store that starts out with the given state, instead of `S::default()`.
    pub fn with_state(state: S) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    pub fn into_shared(self) -> SharedStore<S, A> { Arc::new(RwLock::new(self)) }
}

// Handle subscriber, middleware, reducer management.
impl<S, A> Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    pub fn add_subscriber(&mut self, subscriber_fn: AsyncSubscriberItem<S>) -> &mut Self {
        self.subscriber_vec.push(subscriber_fn);
        self
    }

    pub fn clear_subscribers(&mut self) -> &mut Self {
        self.subscriber_vec.clear();
        self
    }

    pub fn add_middleware(
        &mut self,
        middleware_fn: AsyncMiddlewareItem<S, A>,
    ) -> &mut Self {
        self.middleware_vec.push(middleware_fn);
        self
    }

    pub fn clear_middlewares(&mut self) -> &mut Self {
        self.middleware_vec.clear();
        self
    }

    pub fn add_reducer(&mut self, reducer_fn: AsyncReducerItem<S, A>) -> &mut Self {
        self.reducer_vec.push(reducer_fn);
        self
    }

    pub fn clear_reducers(&mut self) -> &mut Self {
        self.reducer_vec.clear();
        self
    }
}

// Handle dispatch & history.
impl<S, A> Store<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send,
    A: Clone + Debug + Send + Sync,
{
    pub fn get_state(&self) -> S { self.state.clone() }

    pub fn get_history(&self) -> Vec<S> { self.history.clone() }

    pub async fn dispatch_action(&mut self, action: A) {
        // % is Display, ? is Debug.
        tracing::debug!(message = "🚀 dispatch action", action = ?action);

        // Run middlewares.
        self.middleware_runner(action.clone()).await;

        // Dispatch the action.
        self.actually_dispatch_action(&action).await;
    }

    async fn actually_dispatch_action(&mut self, action: &A) {
        self.run_reducers(action).await;
        self.run_subscribers().await;
    }

    fn has_state_changed(&self) -> bool {
        if let Some(previous_state) = &self.maybe_previous_state {
            *previous_state != self.state
        } else {
            true
        }
    }

    fn save_state_to_previous_state(&mut self) {
        self.maybe_previous_state = Some(self.state.clone());
    }

    /// Run these in parallel.
    async fn run_subscribers(&mut self) {
        // Early return if state hasn't changed.
        if !self.has_state_changed() {
            return;
        }

        // Update previous state, for next time.
        self.save_state_to_previous_state();

        // Actually run the subscribers.
        let state_clone = self.get_state();
        let vec_fut = self
            .subscriber_vec
            .iter()
            .map(|subscriber| subscriber.run(state_clone.clone()));
        futures::future::join_all(vec_fut).await;
    }

    /// Run these in sequence.
    async fn run_reducers(&mut self, action: &A) {
        if self.reducer_vec.is_empty() {
            return;
        }
        for reducer in &self.reducer_vec {
            let new_state = reducer.run(action, &self.state).await;
            self.state = new_state;
        }
        self.update_history();
    }

    fn update_history(&mut self) {
        let should_push = match self.history.last() {
            None => true,
            Some(last_known_state) => *last_known_state != self.state,
        };
        if should_push {
            self.history.push(self.get_state());
        }
    }

    /// Run concurrently (cooperatively on a single thread). Any action returned by a
    /// middleware is reduced right away.
    async fn middleware_runner(&mut self, my_action: A) {
        if self.middleware_vec.is_empty() {
            return;
        }

        let state_clone = self.get_state();
        let vec_fut = self
            .middleware_vec
            .iter()
            .map(|middleware| middleware.run(my_action.clone(), state_clone.clone()));
        let vec_opt_action = futures::future::join_all(vec_fut).await;

        for action in vec_opt_action.into_iter().flatten() {
            tracing::debug!(message = "🔀 middleware returned action", action = ?action);
            self.actually_dispatch_action(&action).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{AsyncMiddleware, AsyncReducer, AsyncSubscriber, ReducerFnWrapper};

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Action {
        Add(i32, i32),
        AddPop(i32),
        Clear,
        MwReturnsNone,
        MwReturnsClear,
    }

    #[derive(Clone, Default, PartialEq, Debug)]
    struct State {
        stack: Vec<i32>,
    }

    #[derive(Default)]
    struct MyReducer;

    #[async_trait]
    impl AsyncReducer<State, Action> for MyReducer {
        async fn run(&self, action: &Action, state: &State) -> State {
            match action {
                Action::Add(a, b) => State { stack: vec![a + b] },
                Action::AddPop(a) => State {
                    stack: vec![a + state.stack.first().copied().unwrap_or_default()],
                },
                Action::Clear => State { stack: vec![] },
                _ => state.clone(),
            }
        }
    }

    struct MySubscriber {
        shared_vec: Arc<Mutex<Vec<i32>>>,
    }

    #[async_trait]
    impl AsyncSubscriber<State> for MySubscriber {
        async fn run(&self, state: State) {
            if let Some(top) = state.stack.first() {
                self.shared_vec.lock().unwrap().push(*top);
            }
        }
    }

    struct MyMiddleware {
        shared_vec: Arc<Mutex<Vec<i32>>>,
    }

    #[async_trait]
    impl AsyncMiddleware<State, Action> for MyMiddleware {
        async fn run(&self, action: Action, _state: State) -> Option<Action> {
            match action {
                Action::MwReturnsNone => {
                    self.shared_vec.lock().unwrap().push(-1);
                    None
                }
                Action::MwReturnsClear => {
                    self.shared_vec.lock().unwrap().push(-2);
                    Some(Action::Clear)
                }
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn test_reducer_and_subscriber() {
        let shared_vec = Arc::new(Mutex::new(Vec::<i32>::new()));
        let mut store = Store::<State, Action>::default();
        store.add_reducer(MyReducer::new()).add_subscriber(Box::new(MySubscriber {
            shared_vec: shared_vec.clone(),
        }));

        store.dispatch_action(Action::Add(1, 2)).await;
        assert_eq!(shared_vec.lock().unwrap().pop(), Some(3));

        store.dispatch_action(Action::AddPop(1)).await;
        assert_eq!(shared_vec.lock().unwrap().pop(), Some(4));
        assert_eq!(store.get_state(), State { stack: vec![4] });
    }

    #[tokio::test]
    async fn test_subscribers_skip_unchanged_state() {
        let shared_vec = Arc::new(Mutex::new(Vec::<i32>::new()));
        let mut store = Store::<State, Action>::default();
        store.add_reducer(MyReducer::new()).add_subscriber(Box::new(MySubscriber {
            shared_vec: shared_vec.clone(),
        }));

        store.dispatch_action(Action::Add(1, 1)).await;
        store.dispatch_action(Action::Add(1, 1)).await;
        assert_eq!(*shared_vec.lock().unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn test_history_only_records_changes() {
        let mut store = Store::<State, Action>::default();
        store.add_reducer(MyReducer::new());

        store.dispatch_action(Action::Add(1, 1)).await;
        store.dispatch_action(Action::Add(1, 1)).await;
        store.dispatch_action(Action::Clear).await;

        assert_eq!(store.get_history(), vec![
            State { stack: vec![2] },
            State { stack: vec![] },
        ]);
    }

    #[tokio::test]
    async fn test_reducers_run_in_sequence() {
        let mut store = Store::<i32, i32>::with_state(1);
        store
            .add_reducer(ReducerFnWrapper::new_item(|state: &i32, action: &i32| {
                state + action
            }))
            .add_reducer(ReducerFnWrapper::new_item(|state: &i32, _action: &i32| {
                state * 10
            }));

        store.dispatch_action(2).await;
        assert_eq!(store.get_state(), 30);
    }

    #[tokio::test]
    async fn test_middleware_returns_none_and_action() {
        let shared_vec = Arc::new(Mutex::new(Vec::<i32>::new()));
        let mut store = Store::<State, Action>::with_state(State { stack: vec![7] });
        store.add_reducer(MyReducer::new()).add_middleware(Box::new(MyMiddleware {
            shared_vec: shared_vec.clone(),
        }));

        store.dispatch_action(Action::MwReturnsNone).await;
        assert_eq!(shared_vec.lock().unwrap().pop(), Some(-1));
        assert_eq!(store.get_state().stack, vec![7]);

        store.dispatch_action(Action::MwReturnsClear).await;
        assert_eq!(shared_vec.lock().unwrap().pop(), Some(-2));
        assert!(store.get_state().stack.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_dispatch_action() {
        let mut store = Store::<State, Action>::default();
        store.add_reducer(MyReducer::new());
        let shared_store = store.into_shared();

        spawn_dispatch_action!(shared_store, Action::Add(10, 10))
            .await
            .unwrap();

        assert_eq!(shared_store.read().await.get_state().stack, vec![20]);
    }

    #[tokio::test]
    async fn test_clear_reducers() {
        let mut store = Store::<State, Action>::default();
        store.add_reducer(MyReducer::new()).clear_reducers();
        store.dispatch_action(Action::Add(1, 2)).await;
        assert_eq!(store.get_state(), State::default());
        assert!(store.get_history().is_empty());
    }
}
