//! Toggle Reconciler
//!
//! Shadow state for switches bound to a server-decided status. A click is
//! shown at once and recorded as the status the server is expected to
//! report; refreshes are only trusted for that id once they agree.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::error::{MutationError, Rejection};
use crate::status::ToggleStatus;

/// Body of a status update: the switch position the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate<I> {
    pub id: I,
    pub is_active: bool,
}

/// Shadow entries for one id as they were before a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Prior<S> {
    displayed: S,
    expected: Option<S>,
}

/// An in-flight toggle
#[derive(Debug)]
#[must_use = "a toggle ticket must be settled"]
pub struct ToggleTicket<I, S> {
    request: StatusUpdate<I>,
    prior: Prior<S>,
    next: S,
}

impl<I, S: Copy> ToggleTicket<I, S> {
    pub fn request(&self) -> &StatusUpdate<I> {
        &self.request
    }

    /// Status the view showed right before the click
    pub fn original(&self) -> S {
        self.prior.displayed
    }

    /// Status applied optimistically by the click
    pub fn next(&self) -> S {
        self.next
    }
}

/// Per-view shadow maps keyed by resource id
#[derive(Debug, Clone)]
pub struct ToggleReconciler<I, S> {
    optimistic: HashMap<I, S>,
    expected: HashMap<I, S>,
    busy: HashSet<I>,
}

impl<I, S> Default for ToggleReconciler<I, S> {
    fn default() -> Self {
        Self {
            optimistic: HashMap::new(),
            expected: HashMap::new(),
            busy: HashSet::new(),
        }
    }
}

impl<I, S> ToggleReconciler<I, S>
where
    I: Clone + Eq + Hash + Debug,
    S: ToggleStatus,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimistic value if one is held, otherwise the server's
    pub fn effective_status(&self, id: &I, server: S) -> S {
        self.optimistic.get(id).copied().unwrap_or(server)
    }

    /// What the switch and badge render
    pub fn display_status(&self, id: &I, server: S) -> S {
        self.effective_status(id, server)
    }

    pub fn is_busy(&self, id: &I) -> bool {
        self.busy.contains(id)
    }

    pub fn expected_status(&self, id: &I) -> Option<S> {
        self.expected.get(id).copied()
    }

    /// Ids still waiting for a refresh to confirm them
    pub fn pending_count(&self) -> usize {
        self.expected.len()
    }

    /// Whether a click on this switch would be accepted right now
    pub fn can_toggle(&self, id: &I, server: S) -> bool {
        !self.is_busy(id) && self.effective_status(id, server).is_toggle_eligible()
    }

    /// Flip the switch for `id` whose last known server status is `server`.
    pub fn click(&mut self, id: I, server: S) -> Result<ToggleTicket<I, S>, Rejection<I>> {
        let current = self.effective_status(&id, server);
        if !current.is_toggle_eligible() {
            return Err(Rejection::Ineligible);
        }
        if self.busy.contains(&id) {
            return Err(Rejection::Busy);
        }

        let prior = Prior {
            displayed: current,
            expected: self.expected.get(&id).copied(),
        };
        let desired_on = !current.is_on();
        let next = S::for_desired(desired_on);

        self.optimistic.insert(id.clone(), next);
        self.expected.insert(id.clone(), next);
        self.busy.insert(id.clone());

        debug!(id = ?id, from = ?current, to = ?next, "toggle applied optimistically");

        Ok(ToggleTicket {
            request: StatusUpdate {
                id,
                is_active: desired_on,
            },
            prior,
            next,
        })
    }

    /// Resolve a ticket with the outcome of its request.
    ///
    /// Success only releases the busy marker: the expectation stays until a
    /// refresh reports it. Failure puts the id back the way it was before
    /// the click.
    pub fn settle(
        &mut self,
        ticket: ToggleTicket<I, S>,
        outcome: Result<(), MutationError>,
    ) -> Result<(), MutationError> {
        let ToggleTicket { request, prior, .. } = ticket;
        let id = request.id;
        self.busy.remove(&id);

        match outcome {
            Ok(()) => {
                debug!(id = ?id, "toggle accepted, awaiting refresh");
                Ok(())
            }
            Err(error) => {
                warn!(id = ?id, %error, "toggle failed, rolling back");
                match prior.expected {
                    Some(expected) => self.expected.insert(id.clone(), expected),
                    None => self.expected.remove(&id),
                };
                self.optimistic.insert(id, prior.displayed);
                Err(error)
            }
        }
    }

    /// Fold a freshly fetched snapshot of `(id, status)` pairs into the
    /// shadow state.
    ///
    /// Ids with an expectation adopt the server value only when it matches;
    /// a stale value leaves the optimistic one on screen. Everything else
    /// mirrors the server. Entries for ids missing from the snapshot are
    /// dropped unless a request for them is still in flight.
    pub fn reconcile<It>(&mut self, snapshot: It)
    where
        It: IntoIterator<Item = (I, S)>,
    {
        let mut seen = HashSet::new();
        for (id, server) in snapshot {
            match self.expected.get(&id).copied() {
                Some(expected) if expected == server => {
                    debug!(id = ?id, status = ?server, "toggle confirmed by refresh");
                    self.expected.remove(&id);
                    self.optimistic.insert(id.clone(), server);
                }
                Some(expected) => {
                    debug!(id = ?id, server = ?server, expected = ?expected, "stale refresh ignored");
                }
                None => {
                    self.optimistic.insert(id.clone(), server);
                }
            }
            seen.insert(id);
        }

        let busy = &self.busy;
        self.optimistic
            .retain(|id, _| seen.contains(id) || busy.contains(id));
        self.expected
            .retain(|id, _| seen.contains(id) || busy.contains(id));
    }
}
