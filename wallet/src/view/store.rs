// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tokio::sync::watch;

type Reducer<S, A> = Box<dyn Fn(S, A) -> S + Send + Sync>;

/// Holds the current state of a view model.
///
/// Actions are applied through the reducer under the lock of the state, so
/// concurrent dispatches are serialized. The reducer must not dispatch to the
/// same store.
pub struct Store<S, A> {
    state: watch::Sender<S>,
    reducer: Reducer<S, A>,
}

impl<S, A> Store<S, A>
where
    S: Clone + PartialEq,
{
    /// Creates a store holding `initial`, updated by `reducer`
    pub fn new<R>(initial: S, reducer: R) -> Self
    where
        R: Fn(S, A) -> S + Send + Sync + 'static,
    {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            reducer: Box::new(reducer),
        }
    }

    /// Applies `action` to the current state. Subscribers are notified, and
    /// `true` is returned, only if the state changed.
    pub fn dispatch(&self, action: A) -> bool {
        self.state.send_if_modified(|state| {
            let next = (self.reducer)(state.clone(), action);
            if next == *state {
                return false;
            }
            *state = next;
            true
        })
    }

    /// A copy of the current state
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}
