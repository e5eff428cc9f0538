//! Singleflight Coordinator
//!
//! Collapses concurrent cache misses for the same key into one producer call.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::cache::SharedCache;
use crate::error::ProducerError;

type Outcome<V> = Result<V, ProducerError>;
type OutcomeSender<V> = watch::Sender<Option<Outcome<V>>>;
type OutcomeReceiver<V> = watch::Receiver<Option<Outcome<V>>>;

// == Singleflight ==
/// Per-key stampede protection in front of a [`SharedCache`].
///
/// For any key at most one producer runs at a time. Every caller that misses
/// while it runs waits for that same outcome. The in-flight map has its own
/// lock, so slow producers never hold the store lock and unrelated keys
/// never wait on each other.
///
/// Producers run on spawned tasks: a caller that stops waiting does not
/// cancel the episode, which still completes and populates the cache.
#[derive(Debug)]
pub struct Singleflight<K, V> {
    cache: SharedCache<K, V>,
    inflight: Arc<Mutex<HashMap<K, OutcomeReceiver<V>>>>,
}

impl<K, V> Clone for Singleflight<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            inflight: Arc::clone(&self.inflight),
        }
    }
}

impl<K, V> Singleflight<K, V>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    pub fn new(cache: SharedCache<K, V>) -> Self {
        Self {
            cache,
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The cache this coordinator fills.
    pub fn cache(&self) -> &SharedCache<K, V> {
        &self.cache
    }

    // == Fetch ==
    /// Returns the cached value, or resolves it through `producer` on a miss.
    pub async fn fetch<F, Fut>(&self, key: K, producer: F) -> Outcome<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        if let Some(value) = self.cache.get(&key).await {
            return Ok(value);
        }
        self.resolve(key, producer).await
    }

    // == Resolve ==
    /// Resolves a key after a cache miss.
    ///
    /// The cache is checked again first. If the key is still missing the
    /// caller either joins the running episode for it or starts a new one,
    /// calling `producer` exactly once, with the in-flight map locked, so it
    /// should only build its future. A successful value is written to the
    /// cache before the registration is dropped; a failure is written nowhere
    /// and reaches every waiter of the episode unchanged.
    pub async fn resolve<F, Fut>(&self, key: K, producer: F) -> Outcome<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let mut receiver = {
            let mut inflight = self.inflight.lock().await;

            // An episode writes the cache before it deregisters, so this
            // re-check under the in-flight lock cannot miss a finished one.
            if let Some(value) = self.cache.get(&key).await {
                return Ok(value);
            }

            match inflight.get(&key) {
                Some(receiver) => {
                    debug!(?key, "Joining in-flight producer");
                    receiver.clone()
                }
                None => {
                    // Built before registering: a producer that panics here
                    // leaves no registration behind.
                    let production = panic::catch_unwind(AssertUnwindSafe(producer))
                        .map_err(|payload| {
                            let err = ProducerError::Panicked(panic_message(payload.as_ref()));
                            warn!(?key, error = %err, "Producer panicked; nothing cached");
                            err
                        })?;

                    let (sender, receiver) = watch::channel(None);
                    inflight.insert(key.clone(), receiver.clone());
                    debug!(?key, "Starting producer");
                    self.spawn_episode(key, production, sender);
                    receiver
                }
            }
        };

        Self::wait(&mut receiver).await
    }

    // == In Flight ==
    /// Number of keys with a producer currently running.
    pub async fn in_flight(&self) -> usize {
        self.inflight.lock().await.len()
    }

    fn spawn_episode<Fut>(&self, key: K, production: Fut, sender: OutcomeSender<V>)
    where
        Fut: Future<Output = anyhow::Result<V>> + Send + 'static,
    {
        let cache = self.cache.clone();
        let inflight = Arc::clone(&self.inflight);
        let production = tokio::spawn(production);

        tokio::spawn(async move {
            let outcome = match production.await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(err)) => Err(ProducerError::failed(err)),
                Err(join_err) if join_err.is_panic() => {
                    Err(ProducerError::Panicked(join_err.to_string()))
                }
                Err(_) => Err(ProducerError::Abandoned),
            };

            match &outcome {
                Ok(value) => cache.set(key.clone(), value.clone()).await,
                Err(err) => warn!(?key, error = %err, "Producer failed; nothing cached"),
            }

            inflight.lock().await.remove(&key);
            // Fails only when every waiter has gone away.
            let _ = sender.send(Some(outcome));
        });
    }

    async fn wait(receiver: &mut OutcomeReceiver<V>) -> Outcome<V> {
        match receiver.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone().unwrap_or(Err(ProducerError::Abandoned)),
            Err(_) => Err(ProducerError::Abandoned),
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
