// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          fmt::{Debug, Formatter},
          sync::Arc};

use r3bl_redux::SharedStore;
use tokio::sync::Mutex;

use crate::{GenericAction, Selector, SliceFn, SlicerConfig, SlicerError, SlicerResult};

pub type SharedConnector<S, A> = Arc<StoreConnector<S, A>>;

/// What happened to a dispatched generic action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The connected store reduced it.
    Dispatched,
    /// No store is connected yet. The action waits in the queue, behind `pending - 1`
    /// others.
    Queued { pending: usize },
}

/// Links slices to a store. Slices can be created and can dispatch before the store
/// exists. Their actions wait in a FIFO queue, which [`StoreConnector::connect_store`]
/// flushes into the store.
///
/// Don't dispatch through a connector from inside a subscriber or middleware of the
/// connected store by awaiting it. The store's write lock is held for the whole dispatch
/// and is not reentrant. Spawn a task for it instead. The other methods
/// ([`StoreConnector::is_connected`], [`StoreConnector::pending_len`],
/// [`StoreConnector::get_store`] etc.) never wait for the store, so they are safe to
/// await from there.
pub struct StoreConnector<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    config: SlicerConfig,
    inner: Mutex<ConnectorState<S, A>>,
}

struct ConnectorState<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    maybe_store: Option<SharedStore<S, A>>,
    pending: VecDeque<GenericAction>,
}

impl<S, A> Debug for StoreConnector<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConnector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S, A> StoreConnector<S, A>
where
    S: Clone + Default + PartialEq + Debug + Sync + Send + 'static,
    A: From<GenericAction> + Clone + Debug + Sync + Send + 'static,
{
    pub fn new(config: impl Into<SlicerConfig>) -> SharedConnector<S, A> {
        Arc::new(Self {
            config: config.into(),
            inner: Mutex::new(ConnectorState {
                maybe_store: None,
                pending: VecDeque::new(),
            }),
        })
    }

    pub fn get_config(&self) -> SlicerConfig { self.config }

    /// Remember `store` and flush every queued action into it, oldest first. Returns how
    /// many actions were flushed. The queue is emptied, so connecting again never
    /// replays them.
    ///
    /// Dispatches that race with this call are reduced after the flushed actions.
    #[tracing::instrument(skip_all)]
    pub async fn connect_store(&self, store: SharedStore<S, A>) -> usize {
        // The store is locked first and stays locked until the flush is done, so nothing
        // dispatched once the store is visible can jump ahead of the flushed actions. The
        // connector lock is never held while waiting for the store.
        let mut store_guard = store.write().await;

        let flushed: Vec<GenericAction> = {
            let mut inner = self.inner.lock().await;
            inner.maybe_store = Some(store.clone());
            inner.pending.drain(..).collect()
        };

        let count = flushed.len();
        for action in flushed {
            store_guard.dispatch_action(action.into()).await;
        }

        // % is Display, ? is Debug.
        tracing::debug!(message = "🔌 store connected", flushed = %count);

        count
    }

    /// Forget the connected store, if any, and return it. Dispatches queue up again until
    /// a store is connected.
    pub async fn disconnect_store(&self) -> Option<SharedStore<S, A>> {
        let maybe_store = self.inner.lock().await.maybe_store.take();
        tracing::debug!(
            message = "🔌 store disconnected",
            was_connected = %maybe_store.is_some()
        );
        maybe_store
    }

    pub async fn get_store(&self) -> Option<SharedStore<S, A>> {
        self.inner.lock().await.maybe_store.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.inner.lock().await.maybe_store.is_some()
    }

    pub async fn pending_len(&self) -> usize { self.inner.lock().await.pending.len() }

    /// Build a [`GenericAction`] tagged `GENERIC_<action_name>` and dispatch it to the
    /// connected store, or queue it if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`SlicerError::PendingQueueFull`] if the action has to be queued and the
    /// queue already holds [`SlicerConfig::pending_limit`] actions.
    pub async fn dispatch_generic(
        &self,
        action_name: &str,
        selector: &Selector,
        func: SliceFn,
    ) -> SlicerResult<DispatchOutcome> {
        let action = GenericAction::new(action_name, selector.clone(), func);

        let store = {
            let mut inner = self.inner.lock().await;
            let maybe_store = inner.maybe_store.clone();
            let Some(store) = maybe_store else {
                if let Some(limit) = self.config.pending_limit
                    && inner.pending.len() >= limit
                {
                    return Err(SlicerError::PendingQueueFull { limit });
                }
                tracing::debug!(
                    message = "⏳ no store yet, queue action",
                    action_type = %action.action_type(),
                    selector = %selector
                );
                inner.pending.push_back(action);
                return Ok(DispatchOutcome::Queued {
                    pending: inner.pending.len(),
                });
            };
            store
        };

        store.write().await.dispatch_action(action.into()).await;

        Ok(DispatchOutcome::Dispatched)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use r3bl_redux::{AsyncSubscriber, Store};
    use serde_json::{Value, json};
    use tokio::sync::Notify;

    use super::*;
    use crate::generic_reducer;

    type Connector = SharedConnector<Value, GenericAction>;

    fn append(item: &'static str) -> SliceFn {
        Arc::new(move |maybe_slice: Option<Value>| -> SlicerResult<Value> {
            let mut items = match maybe_slice {
                Some(Value::Array(items)) => items,
                _ => vec![],
            };
            items.push(json!(item));
            Ok(Value::Array(items))
        })
    }

    fn create_store() -> SharedStore<Value, GenericAction> {
        let mut store = Store::<Value, GenericAction>::with_state(json!({}));
        store.add_reducer(generic_reducer());
        store.into_shared()
    }

    #[tokio::test]
    async fn test_dispatch_before_connect_is_queued_then_flushed_in_order() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        let selector = Selector::try_parse("log").unwrap();

        assert_eq!(
            connector
                .dispatch_generic("LOG", &selector, append("first"))
                .await
                .unwrap(),
            DispatchOutcome::Queued { pending: 1 }
        );
        assert_eq!(
            connector
                .dispatch_generic("LOG", &selector, append("second"))
                .await
                .unwrap(),
            DispatchOutcome::Queued { pending: 2 }
        );
        assert!(!connector.is_connected().await);

        let store = create_store();
        assert_eq!(connector.connect_store(store.clone()).await, 2);
        assert_eq!(connector.pending_len().await, 0);
        assert_eq!(store.read().await.get_state(), json!({ "log": ["first", "second"] }));
    }

    #[tokio::test]
    async fn test_dispatch_after_connect_goes_straight_to_store() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        let store = create_store();
        assert_eq!(connector.connect_store(store.clone()).await, 0);

        let selector = Selector::try_parse("log").unwrap();
        let outcome = connector
            .dispatch_generic("LOG", &selector, append("now"))
            .await
            .unwrap();

        assert_eq!(outcome, DispatchOutcome::Dispatched);
        assert_eq!(store.read().await.get_state(), json!({ "log": ["now"] }));
    }

    #[tokio::test]
    async fn test_reconnect_does_not_replay() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        let selector = Selector::try_parse("log").unwrap();
        connector
            .dispatch_generic("LOG", &selector, append("once"))
            .await
            .unwrap();

        let store = create_store();
        assert_eq!(connector.connect_store(store.clone()).await, 1);
        assert_eq!(connector.connect_store(store.clone()).await, 0);
        assert_eq!(store.read().await.get_state(), json!({ "log": ["once"] }));
    }

    #[tokio::test]
    async fn test_disconnect_queues_again() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        connector.connect_store(create_store()).await;
        assert!(connector.disconnect_store().await.is_some());
        assert!(connector.get_store().await.is_none());

        let selector = Selector::try_parse("log").unwrap();
        let outcome = connector
            .dispatch_generic("LOG", &selector, append("later"))
            .await
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Queued { pending: 1 });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_dispatch_racing_with_connect_runs_after_flushed_actions() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        let selector = Selector::try_parse("log").unwrap();
        let queued = ["q0", "q1", "q2", "q3", "q4"];
        for item in queued {
            connector
                .dispatch_generic("LOG", &selector, append(item))
                .await
                .unwrap();
        }

        let store = create_store();
        let racing = tokio::spawn({
            let connector = connector.clone();
            let selector = selector.clone();
            async move {
                connector
                    .dispatch_generic("LOG", &selector, append("racing"))
                    .await
            }
        });
        let (flushed, racing_outcome) =
            tokio::join!(connector.connect_store(store.clone()), racing);

        // The racing action either made it into the queue, or went straight to the store
        // after the flush.
        match racing_outcome.unwrap().unwrap() {
            DispatchOutcome::Queued { .. } => assert_eq!(flushed, queued.len() + 1),
            DispatchOutcome::Dispatched => assert_eq!(flushed, queued.len()),
        }
        assert_eq!(
            store.read().await.get_state(),
            json!({ "log": ["q0", "q1", "q2", "q3", "q4", "racing"] })
        );
    }

    /// Calls back into the connector while the store is locked for a dispatch.
    struct ConnectorReadingSubscriber {
        connector: Connector,
        entered: Arc<Notify>,
    }

    #[async_trait]
    impl AsyncSubscriber<Value> for ConnectorReadingSubscriber {
        async fn run(&self, _state: Value) {
            self.entered.notify_one();
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert_eq!(self.connector.pending_len().await, 0);
            self.connector.is_connected().await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_connect_while_subscriber_reads_connector() {
        let connector: Connector = StoreConnector::new(SlicerConfig::default());
        let entered = Arc::new(Notify::new());

        let store = {
            let mut store = Store::<Value, GenericAction>::with_state(json!({}));
            store
                .add_reducer(generic_reducer())
                .add_subscriber(Box::new(ConnectorReadingSubscriber {
                    connector: connector.clone(),
                    entered: entered.clone(),
                }));
            store.into_shared()
        };

        // Hold the store's write lock with a dispatch whose subscriber calls back into the
        // connector.
        let action =
            GenericAction::new("LOG", Selector::try_parse("log").unwrap(), append("direct"));
        let dispatching = tokio::spawn({
            let store = store.clone();
            async move { store.write().await.dispatch_action(action).await }
        });
        entered.notified().await;

        let flushed = tokio::time::timeout(
            Duration::from_secs(5),
            connector.connect_store(store.clone()),
        )
        .await
        .unwrap();
        assert_eq!(flushed, 0);
        dispatching.await.unwrap();
        assert!(connector.is_connected().await);
    }

    #[tokio::test]
    async fn test_pending_limit() {
        let connector: Connector = StoreConnector::new(1);
        let selector = Selector::try_parse("log").unwrap();
        connector
            .dispatch_generic("LOG", &selector, append("fits"))
            .await
            .unwrap();

        let result = connector
            .dispatch_generic("LOG", &selector, append("overflows"))
            .await;
        assert!(matches!(
            result,
            Err(SlicerError::PendingQueueFull { limit: 1 })
        ));
        assert_eq!(connector.pending_len().await, 1);
    }
}
