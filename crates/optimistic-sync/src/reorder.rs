//! Reorder Engine
//!
//! Applies a drag-and-drop move to the view's collection immediately, hands
//! back a ticket describing the single-item sequence update to persist, and
//! either keeps or reverts the move once that request settles.

use tracing::{debug, warn};

use crate::entity::Sequenced;
use crate::error::{MutationError, Rejection};

/// How the engine treats a drag that starts while another is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderPolicy {
    /// Compute the next move against the current optimistic list
    #[default]
    Chain,
    /// Refuse new moves until every in-flight request has settled
    Serialized,
}

impl ReorderPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "chain" => Some(ReorderPolicy::Chain),
            "serialized" | "serialised" => Some(ReorderPolicy::Serialized),
            _ => None,
        }
    }
}

/// A finished drag: `active_id` was dropped onto the row of `over_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd<I> {
    pub active_id: I,
    pub over_id: Option<I>,
}

impl<I> DragEnd<I> {
    pub fn new(active_id: I, over_id: Option<I>) -> Self {
        Self { active_id, over_id }
    }
}

/// The one write a reorder sends: the moved item's new 1-based ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceUpdate<I> {
    pub item_id: I,
    /// Owning collection, e.g. the category of a workout
    pub context_id: Option<I>,
    pub sequence: u32,
}

/// An in-flight reorder. Owns the snapshot taken right before the move.
#[derive(Debug)]
#[must_use = "a reorder ticket must be settled"]
pub struct ReorderTicket<T: Sequenced> {
    request: SequenceUpdate<T::Id>,
    previous: Vec<T>,
    /// Owning collection generation the ticket was issued under
    generation: u64,
    serial: u64,
}

impl<T: Sequenced> ReorderTicket<T> {
    pub fn request(&self) -> &SequenceUpdate<T::Id> {
        &self.request
    }

    pub fn previous(&self) -> &[T] {
        &self.previous
    }
}

/// A move not yet confirmed, replayed onto refreshed snapshots
#[derive(Debug, Clone)]
struct OutstandingMove<I> {
    serial: u64,
    item_id: I,
    index: usize,
}

/// Per-view reorder state for one collection
#[derive(Debug, Clone)]
pub struct ReorderEngine<T: Sequenced> {
    items: Vec<T>,
    context_id: Option<T::Id>,
    policy: ReorderPolicy,
    in_flight: usize,
    /// Bumped on every context switch; older tickets no longer apply
    generation: u64,
    next_serial: u64,
    outstanding: Vec<OutstandingMove<T::Id>>,
}

impl<T: Sequenced> Default for ReorderEngine<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: Sequenced> ReorderEngine<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            context_id: None,
            policy: ReorderPolicy::default(),
            in_flight: 0,
            generation: 0,
            next_serial: 0,
            outstanding: Vec::new(),
        }
    }

    pub fn with_context(mut self, context_id: T::Id) -> Self {
        self.context_id = Some(context_id);
        self
    }

    pub fn with_policy(mut self, policy: ReorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn context_id(&self) -> Option<&T::Id> {
        self.context_id.as_ref()
    }

    pub fn policy(&self) -> ReorderPolicy {
        self.policy
    }

    /// Advisory: the view should disable dragging while this is true
    pub fn is_updating(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Replace the collection with a freshly fetched snapshot.
    ///
    /// Moves still in flight are replayed on top of it, so the optimistic
    /// order stays on screen until its request settles. Tickets already
    /// handed out keep their own snapshots.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        for pending in &self.outstanding {
            replay_move(&mut self.items, pending);
        }
        if !self.outstanding.is_empty() {
            debug!(replayed = self.outstanding.len(), "refresh applied under in-flight moves");
        }
    }

    /// Switch to another owning collection, dropping the current items.
    ///
    /// Tickets issued before the switch stay settleable but no longer
    /// touch this collection.
    pub fn reset_context(&mut self, context_id: Option<T::Id>, items: Vec<T>) {
        self.context_id = context_id;
        self.items = items;
        self.generation += 1;
        self.in_flight = 0;
        self.outstanding.clear();
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| &item.id() == id)
    }

    /// Apply a drag-end optimistically and describe the request to persist it.
    pub fn begin(
        &mut self,
        event: DragEnd<T::Id>,
    ) -> Result<ReorderTicket<T>, Rejection<T::Id>> {
        let DragEnd { active_id, over_id } = event;
        let over_id = over_id.ok_or(Rejection::NoTarget)?;
        if over_id == active_id {
            return Err(Rejection::SameItem);
        }
        if self.policy == ReorderPolicy::Serialized && self.is_updating() {
            return Err(Rejection::Busy);
        }

        let old_index = self
            .position(&active_id)
            .ok_or_else(|| Rejection::NotFound(active_id.clone()))?;
        let new_index = self
            .position(&over_id)
            .ok_or(Rejection::NotFound(over_id))?;

        let previous = self.items.clone();
        move_item(&mut self.items, old_index, new_index);

        let sequence = sequence_at(new_index);
        self.items[new_index].set_sequence(sequence);
        self.in_flight += 1;

        let serial = self.next_serial;
        self.next_serial += 1;
        self.outstanding.push(OutstandingMove {
            serial,
            item_id: active_id.clone(),
            index: new_index,
        });

        debug!(
            item = ?active_id,
            from = old_index,
            to = new_index,
            sequence,
            in_flight = self.in_flight,
            "reorder applied optimistically"
        );

        Ok(ReorderTicket {
            request: SequenceUpdate {
                item_id: active_id,
                context_id: self.context_id.clone(),
                sequence,
            },
            previous,
            generation: self.generation,
            serial,
        })
    }

    /// Resolve a ticket with the outcome of its request.
    ///
    /// On failure the collection goes back to the ticket's snapshot and the
    /// error is returned unchanged. A ticket issued before the last context
    /// switch only reports its outcome.
    pub fn settle(
        &mut self,
        ticket: ReorderTicket<T>,
        outcome: Result<(), MutationError>,
    ) -> Result<(), MutationError> {
        if ticket.generation != self.generation {
            debug!(item = ?ticket.request.item_id, "reorder settled after context switch");
            return outcome;
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Ok(()) => {
                self.outstanding.retain(|m| m.serial != ticket.serial);
                normalize_sequences(&mut self.items);
                debug!(item = ?ticket.request.item_id, "reorder confirmed");
                Ok(())
            }
            Err(error) => {
                warn!(item = ?ticket.request.item_id, %error, "reorder failed, restoring snapshot");
                // Later moves were computed on top of this one
                self.outstanding.retain(|m| m.serial < ticket.serial);
                self.items = ticket.previous;
                Err(error)
            }
        }
    }
}

fn sequence_at(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn replay_move<T: Sequenced>(items: &mut Vec<T>, pending: &OutstandingMove<T::Id>) {
    let Some(from) = items.iter().position(|item| item.id() == pending.item_id) else {
        return;
    };
    let to = pending.index.min(items.len() - 1);
    move_item(items, from, to);
    items[to].set_sequence(sequence_at(to));
}

/// Array-move: remove at `from`, reinsert at `to`.
///
/// Items strictly between the two indices shift by one; the rest stay put.
/// Out-of-range indices leave the slice untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Rewrite every sequence to its index + 1
pub fn normalize_sequences<T: Sequenced>(items: &mut [T]) {
    for (index, item) in items.iter_mut().enumerate() {
        item.set_sequence(sequence_at(index));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use proptest::prelude::*;

    use super::*;
    use crate::entity::Entity;
    use crate::writer::SequenceWriter;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
        sequence: u32,
    }

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    impl Sequenced for Row {
        fn sequence(&self) -> u32 {
            self.sequence
        }

        fn set_sequence(&mut self, sequence: u32) {
            self.sequence = sequence;
        }
    }

    fn rows(names: &[&'static str]) -> Vec<Row> {
        names
            .iter()
            .enumerate()
            .map(|(i, &name)| Row {
                id: i as u32 + 1,
                name,
                sequence: i as u32 + 1,
            })
            .collect()
    }

    fn names(engine: &ReorderEngine<Row>) -> Vec<&'static str> {
        engine.items().iter().map(|r| r.name).collect()
    }

    fn sequences(engine: &ReorderEngine<Row>) -> Vec<u32> {
        engine.items().iter().map(|r| r.sequence).collect()
    }

    /// Replays queued outcomes and records every request it receives
    struct ScriptedWriter {
        outcomes: RefCell<VecDeque<Result<(), MutationError>>>,
        calls: RefCell<Vec<SequenceUpdate<u32>>>,
    }

    impl ScriptedWriter {
        fn new(outcomes: Vec<Result<(), MutationError>>) -> Self {
            Self {
                outcomes: RefCell::new(outcomes.into()),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl SequenceWriter<u32> for ScriptedWriter {
        async fn write_sequence(&self, update: &SequenceUpdate<u32>) -> Result<(), MutationError> {
            self.calls.borrow_mut().push(update.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(MutationError::request_failed("no scripted outcome")))
        }
    }

    async fn drive(
        engine: &mut ReorderEngine<Row>,
        writer: &ScriptedWriter,
        event: DragEnd<u32>,
    ) -> Result<(), MutationError> {
        let ticket = match engine.begin(event) {
            Ok(ticket) => ticket,
            Err(_) => return Ok(()),
        };
        let outcome = writer.write_sequence(ticket.request()).await;
        engine.settle(ticket, outcome)
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut engine = ReorderEngine::new(rows(&["x", "y", "z"]));
        for id in 1..=3 {
            let result = engine.begin(DragEnd::new(id, Some(id)));
            assert_eq!(result.unwrap_err(), Rejection::SameItem);
        }
        assert_eq!(engine.items(), rows(&["x", "y", "z"]).as_slice());
        assert!(!engine.is_updating());
    }

    #[test]
    fn test_drop_without_target_is_noop() {
        let mut engine = ReorderEngine::new(rows(&["x", "y"]));
        assert_eq!(engine.begin(DragEnd::new(1, None)).unwrap_err(), Rejection::NoTarget);
        assert_eq!(names(&engine), vec!["x", "y"]);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let mut engine = ReorderEngine::new(rows(&["x", "y"]));
        assert_eq!(
            engine.begin(DragEnd::new(9, Some(1))).unwrap_err(),
            Rejection::NotFound(9)
        );
        assert_eq!(
            engine.begin(DragEnd::new(1, Some(7))).unwrap_err(),
            Rejection::NotFound(7)
        );
        assert!(!engine.is_updating());
    }

    #[test]
    fn test_move_last_to_first() {
        // [X, Y, Z], drag Z onto X
        let mut engine = ReorderEngine::new(rows(&["x", "y", "z"]));
        let ticket = engine.begin(DragEnd::new(3, Some(1))).unwrap();

        assert_eq!(names(&engine), vec!["z", "x", "y"]);
        assert_eq!(
            ticket.request(),
            &SequenceUpdate { item_id: 3, context_id: None, sequence: 1 }
        );
        assert!(engine.is_updating());

        engine.settle(ticket, Ok(())).unwrap();
        assert_eq!(sequences(&engine), vec![1, 2, 3]);
        assert_eq!(names(&engine), vec!["z", "x", "y"]);
        assert!(!engine.is_updating());
    }

    #[test]
    fn test_only_moved_row_changes_sequence_before_confirmation() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c", "d"]));
        let _ticket = engine.begin(DragEnd::new(1, Some(3))).unwrap();

        assert_eq!(names(&engine), vec!["b", "c", "a", "d"]);
        assert_eq!(sequences(&engine), vec![2, 3, 3, 4]);
    }

    #[test]
    fn test_context_id_travels_with_request() {
        let mut engine = ReorderEngine::new(rows(&["a", "b"])).with_context(42);
        let ticket = engine.begin(DragEnd::new(2, Some(1))).unwrap();
        assert_eq!(ticket.request().context_id, Some(42));
    }

    #[test]
    fn test_failure_restores_snapshot() {
        let original = rows(&["a", "b", "c", "d"]);
        let mut engine = ReorderEngine::new(original.clone());
        let ticket = engine.begin(DragEnd::new(4, Some(2))).unwrap();
        assert_ne!(engine.items(), original.as_slice());

        let err = engine
            .settle(ticket, Err(MutationError::request_failed("HTTP 500")))
            .unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(engine.items(), original.as_slice());
        assert!(!engine.is_updating());
    }

    #[tokio::test]
    async fn test_unauthorized_rolls_back_and_is_distinct() {
        let original = rows(&["a", "b", "c"]);
        let mut engine = ReorderEngine::new(original.clone());
        let writer = ScriptedWriter::new(vec![Err(MutationError::Unauthorized)]);

        let err = drive(&mut engine, &writer, DragEnd::new(1, Some(3)))
            .await
            .unwrap_err();

        assert_eq!(err, MutationError::Unauthorized);
        assert!(err.is_fatal());
        assert_eq!(engine.items(), original.as_slice());
        assert_eq!(writer.calls.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_noop_drop_issues_no_request() {
        let mut engine = ReorderEngine::new(rows(&["a", "b"]));
        let writer = ScriptedWriter::new(vec![]);

        drive(&mut engine, &writer, DragEnd::new(2, Some(2))).await.unwrap();
        drive(&mut engine, &writer, DragEnd::new(2, None)).await.unwrap();

        assert!(writer.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_successful_round_trip_normalizes() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c", "d", "e"])).with_context(7);
        let writer = ScriptedWriter::new(vec![Ok(())]);

        drive(&mut engine, &writer, DragEnd::new(2, Some(5))).await.unwrap();

        assert_eq!(names(&engine), vec!["a", "c", "d", "e", "b"]);
        assert_eq!(sequences(&engine), vec![1, 2, 3, 4, 5]);
        assert_eq!(
            writer.calls.borrow().as_slice(),
            &[SequenceUpdate { item_id: 2, context_id: Some(7), sequence: 5 }]
        );
    }

    #[test]
    fn test_chained_drag_uses_optimistic_order() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c"]));
        let first = engine.begin(DragEnd::new(3, Some(1))).unwrap();
        // c is now first; dragging a onto c computes against [c, a, b]
        let second = engine.begin(DragEnd::new(1, Some(3))).unwrap();

        assert_eq!(names(&engine), vec!["a", "c", "b"]);
        assert_eq!(second.request().sequence, 1);
        assert_eq!(engine.in_flight(), 2);

        engine.settle(second, Ok(())).unwrap();
        assert!(engine.is_updating());
        engine
            .settle(first, Err(MutationError::request_failed("boom")))
            .unwrap_err();

        // The first ticket's snapshot predates both moves
        assert_eq!(names(&engine), vec!["a", "b", "c"]);
        assert!(!engine.is_updating());
    }

    #[test]
    fn test_serialized_policy_refuses_overlap() {
        let mut engine =
            ReorderEngine::new(rows(&["a", "b", "c"])).with_policy(ReorderPolicy::Serialized);
        let first = engine.begin(DragEnd::new(3, Some(1))).unwrap();
        assert_eq!(engine.begin(DragEnd::new(1, Some(2))).unwrap_err(), Rejection::Busy);
        assert_eq!(names(&engine), vec!["c", "a", "b"]);

        engine.settle(first, Ok(())).unwrap();
        assert!(engine.begin(DragEnd::new(1, Some(2))).is_ok());
    }

    #[test]
    fn test_refresh_during_flight_then_failure_restores_pre_drag() {
        let original = rows(&["a", "b", "c"]);
        let mut engine = ReorderEngine::new(original.clone());
        let ticket = engine.begin(DragEnd::new(1, Some(2))).unwrap();

        engine.replace(rows(&["a", "b", "c", "new"]));
        engine
            .settle(ticket, Err(MutationError::request_failed("HTTP 502")))
            .unwrap_err();

        assert_eq!(engine.items(), original.as_slice());
    }

    #[test]
    fn test_refresh_during_flight_then_success_keeps_move() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c"]));
        let ticket = engine.begin(DragEnd::new(3, Some(1))).unwrap();

        // The fetch raced the write and still carries the old order
        engine.replace(rows(&["a", "b", "c"]));
        assert_eq!(names(&engine), vec!["c", "a", "b"]);

        engine.settle(ticket, Ok(())).unwrap();
        assert_eq!(names(&engine), vec!["c", "a", "b"]);
        assert_eq!(sequences(&engine), vec![1, 2, 3]);
    }

    #[test]
    fn test_refresh_during_flight_keeps_new_rows() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c"]));
        let ticket = engine.begin(DragEnd::new(3, Some(1))).unwrap();

        engine.replace(rows(&["a", "b", "c", "d"]));
        engine.settle(ticket, Ok(())).unwrap();

        assert_eq!(names(&engine), vec!["c", "a", "b", "d"]);
        assert_eq!(sequences(&engine), vec![1, 2, 3, 4]);

        // Nothing left to replay once settled
        engine.replace(rows(&["a", "b", "c"]));
        assert_eq!(names(&engine), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_context_switch_then_failure_keeps_new_collection() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c"])).with_context(100);
        let ticket = engine.begin(DragEnd::new(2, Some(1))).unwrap();

        let other = rows(&["x", "y"]);
        engine.reset_context(Some(200), other.clone());
        assert!(!engine.is_updating());

        let error = engine
            .settle(ticket, Err(MutationError::request_failed("HTTP 500")))
            .unwrap_err();
        assert_eq!(error, MutationError::request_failed("HTTP 500"));
        assert_eq!(engine.items(), other.as_slice());
        assert_eq!(engine.in_flight(), 0);

        let next = engine.begin(DragEnd::new(2, Some(1))).unwrap();
        assert_eq!(
            next.request(),
            &SequenceUpdate { item_id: 2, context_id: Some(200), sequence: 1 }
        );
        assert_eq!(names(&engine), vec!["y", "x"]);
    }

    #[test]
    fn test_context_switch_then_success_keeps_new_collection() {
        let mut engine = ReorderEngine::new(rows(&["a", "b", "c"]))
            .with_context(100)
            .with_policy(ReorderPolicy::Serialized);
        let stale = engine.begin(DragEnd::new(3, Some(1))).unwrap();

        engine.reset_context(Some(200), rows(&["x", "y", "z"]));
        // Serialized does not block on the other collection's write
        let fresh = engine.begin(DragEnd::new(1, Some(3))).unwrap();
        assert_eq!(names(&engine), vec!["y", "z", "x"]);

        engine.settle(stale, Ok(())).unwrap();
        assert!(engine.is_updating());
        assert_eq!(names(&engine), vec!["y", "z", "x"]);

        engine.settle(fresh, Ok(())).unwrap();
        assert!(!engine.is_updating());
        assert_eq!(sequences(&engine), vec![1, 2, 3]);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(ReorderPolicy::parse("Chain"), Some(ReorderPolicy::Chain));
        assert_eq!(ReorderPolicy::parse(" serialized "), Some(ReorderPolicy::Serialized));
        assert_eq!(ReorderPolicy::parse("queue"), None);
    }

    #[test]
    fn test_move_item_out_of_range_is_ignored() {
        let mut values = vec![1, 2, 3];
        move_item(&mut values, 0, 5);
        assert_eq!(values, vec![1, 2, 3]);
        move_item(&mut values, 2, 0);
        assert_eq!(values, vec![3, 1, 2]);
    }

    proptest! {
        #[test]
        fn prop_move_keeps_relative_order(n in 2usize..24, i_seed in 0usize..1000, j_seed in 0usize..1000) {
            let i = i_seed % n;
            let j = j_seed % n;
            prop_assume!(i != j);

            let original: Vec<Row> = (0..n)
                .map(|k| Row { id: k as u32 + 1, name: "row", sequence: k as u32 + 1 })
                .collect();
            let mut engine = ReorderEngine::new(original.clone());

            let moved = original[i].id;
            let over = original[j].id;
            let ticket = engine.begin(DragEnd::new(moved, Some(over))).unwrap();

            prop_assert_eq!(ticket.request().sequence as usize, j + 1);
            prop_assert_eq!(engine.items()[j].id, moved);

            let rest_before: Vec<u32> = original.iter().map(|r| r.id).filter(|id| *id != moved).collect();
            let rest_after: Vec<u32> = engine.items().iter().map(|r| r.id).filter(|id| *id != moved).collect();
            prop_assert_eq!(rest_before, rest_after);

            engine.settle(ticket, Err(MutationError::request_failed("x"))).unwrap_err();
            prop_assert_eq!(engine.items(), original.as_slice());
        }
    }
}
