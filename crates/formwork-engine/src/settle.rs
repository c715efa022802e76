//! Registration settling.
//!
//! Attachment arrives in bursts (initial hydration, list re-renders).
//! [`Settled`] is the completion signal for the burst currently pending
//! on a composite: registrations arriving before completion coalesce
//! into the same signal, and registrations after completion arm a fresh
//! one. The host drives the checkpoint by calling
//! [`FormTree::settle`](crate::FormTree::settle) once its attachment
//! work for the current turn is done.
//!
//! Completion state is shared through an `Arc` with atomic publication
//! so the handle is both synchronously queryable and awaitable from an
//! async host; it is a single-shot signal, never re-used once complete.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll, Waker};

/// Shared completion state behind one [`Settled`] handle.
#[derive(Default)]
pub(crate) struct SettleInner {
    done: AtomicBool,
    wakers: Mutex<Vec<Waker>>,
}

impl SettleInner {
    /// Mark the burst settled and wake every registered waiter.
    pub(crate) fn complete(&self) {
        self.done.store(true, Ordering::Release);
        let wakers = match self.wakers.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        for waker in wakers {
            waker.wake();
        }
    }
}

/// Completion handle for a registration burst.
///
/// Cloneable; every clone observes the same single-shot completion.
/// Query synchronously with [`is_settled`](Settled::is_settled) or
/// `.await` it as a future.
#[derive(Clone)]
pub struct Settled {
    inner: Arc<SettleInner>,
}

// Compile-time assertion: the handle must be awaitable across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Settled>();
};

impl Settled {
    /// A handle that is already complete.
    pub(crate) fn ready() -> Self {
        let inner = SettleInner::default();
        inner.done.store(true, Ordering::Release);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// A pending handle around shared state owned by the tree.
    pub(crate) fn pending(inner: Arc<SettleInner>) -> Self {
        Self { inner }
    }

    /// Whether the burst this handle tracks has settled.
    pub fn is_settled(&self) -> bool {
        self.inner.done.load(Ordering::Acquire)
    }
}

impl Future for Settled {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.is_settled() {
            return Poll::Ready(());
        }
        match self.inner.wakers.lock() {
            Ok(mut wakers) => wakers.push(cx.waker().clone()),
            Err(poisoned) => poisoned.into_inner().push(cx.waker().clone()),
        }
        // Completion may have raced between the check and registration;
        // re-check so a completed signal is never missed.
        if self.is_settled() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
