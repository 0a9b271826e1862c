//! Minimal state container
//!
//! Holds the current state behind an `Arc` and applies mutations atomically. A mutation
//! that returns the very same `Arc` is a no-op: the state is kept and subscribers are not
//! woken.

use std::sync::Arc;

use tokio::sync::watch;
use trailmark_router::RouterError;

/// A pure state transition: `state × args → state`
///
/// Implementations return the input `Arc` unchanged when nothing changes.
pub trait Mutation<S> {
    type Output;

    fn apply(self, state: &Arc<S>) -> Result<(Arc<S>, Self::Output), RouterError>;
}

/// Single-writer store with change notifications
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use trailmark::store::{Mutation, Store};
/// use trailmark_router::RouterError;
///
/// struct Increment;
///
/// impl Mutation<u32> for Increment {
///     type Output = u32;
///
///     fn apply(self, state: &Arc<u32>) -> Result<(Arc<u32>, u32), RouterError> {
///         Ok((Arc::new(**state + 1), **state + 1))
///     }
/// }
///
/// let store = Store::new(0u32);
/// assert_eq!(store.commit(Increment).unwrap(), 1);
/// assert_eq!(*store.state(), 1);
/// ```
#[derive(Debug)]
pub struct Store<S> {
    sender: watch::Sender<Arc<S>>,
}

impl<S> Store<S> {
    pub fn new(initial: S) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self { sender }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.sender.borrow())
    }

    /// Receiver woken on every state change
    pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
        self.sender.subscribe()
    }

    /// Applies `mutation` to the current state
    ///
    /// On error the state is left untouched.
    pub fn commit<M: Mutation<S>>(&self, mutation: M) -> Result<M::Output, RouterError> {
        let mut outcome = None;
        self.sender.send_if_modified(|state| match mutation.apply(state) {
            Ok((next, output)) => {
                let changed = !Arc::ptr_eq(state, &next);
                *state = next;
                outcome = Some(Ok(output));
                changed
            }
            Err(err) => {
                outcome = Some(Err(err));
                false
            }
        });
        outcome.unwrap_or_else(|| unreachable!("send_if_modified runs its closure exactly once"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Set(u32);

    impl Mutation<u32> for Set {
        type Output = ();

        fn apply(self, state: &Arc<u32>) -> Result<(Arc<u32>, ()), RouterError> {
            if **state == self.0 {
                Ok((Arc::clone(state), ()))
            } else {
                Ok((Arc::new(self.0), ()))
            }
        }
    }

    struct Fail;

    impl Mutation<u32> for Fail {
        type Output = ();

        fn apply(self, _state: &Arc<u32>) -> Result<(Arc<u32>, ()), RouterError> {
            Err(RouterError::UnknownRoute(trailmark_router::RouteId::new(9)))
        }
    }

    #[test]
    fn test_unchanged_state_keeps_reference() {
        let store = Store::new(1u32);
        let before = store.state();
        store.commit(Set(1)).unwrap();
        assert!(Arc::ptr_eq(&before, &store.state()));

        store.commit(Set(2)).unwrap();
        assert!(!Arc::ptr_eq(&before, &store.state()));
        assert_eq!(*store.state(), 2);
    }

    #[test]
    fn test_failed_mutation_keeps_state() {
        let store = Store::new(5u32);
        let before = store.state();
        assert!(store.commit(Fail).is_err());
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = Store::new(0u32);
        let mut receiver = store.subscribe();

        store.commit(Set(0)).unwrap();
        assert!(!receiver.has_changed().unwrap());

        store.commit(Set(3)).unwrap();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(**receiver.borrow_and_update(), 3);
    }
}
