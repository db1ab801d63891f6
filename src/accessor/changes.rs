use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::debug;

use crate::store::{ChangeListener, PreferenceStore};

/// A cancellable stream of changed-key notifications.
///
/// Each `KeyChanges` owns exactly one listener registered with the backing
/// store; the store fans commits out to every registration independently,
/// so concurrent subscriptions never share state here. Keys are forwarded
/// verbatim in the store's delivery order, unbounded and uncoalesced, and
/// the stream never completes on its own: preference data is long-lived,
/// so "done" only happens through [`cancel`](KeyChanges::cancel) or drop.
pub struct KeyChanges {
    inner: UnboundedReceiverStream<String>,
    guard: ListenerGuard,
}

/// Sole owner of the registered listener reference.
///
/// Failing to unregister would leave the subscriber retained by the
/// store's listener list indefinitely, so teardown runs on drop as well.
struct ListenerGuard {
    unregister: Option<Box<dyn FnOnce() + Send>>,
}

impl KeyChanges {
    /// Registers a forwarding listener with `store` and wraps it.
    pub(crate) fn register<S: PreferenceStore>(store: &Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let listener: ChangeListener = Arc::new(move |key: &str| {
            // Receiver gone means the stream half was dropped first;
            // the guard will unregister us shortly.
            let _ = tx.send(key.to_string());
        });

        let id = store.register_listener(listener);
        debug!(listener_id = id, "registered change listener");

        let store = Arc::clone(store);
        Self {
            inner: UnboundedReceiverStream::new(rx),
            guard: ListenerGuard {
                unregister: Some(Box::new(move || {
                    store.unregister_listener(id);
                    debug!(listener_id = id, "unregistered change listener");
                })),
            },
        }
    }

    /// Unregisters the native listener.
    ///
    /// Idempotent; safe after the store has already dropped the listener.
    /// Keys delivered before cancellation remain buffered and can still be
    /// drained, after which the stream terminates.
    pub fn cancel(&mut self) {
        self.guard.release();
    }
}

impl Stream for KeyChanges {
    type Item = String;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

impl ListenerGuard {
    fn release(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}
