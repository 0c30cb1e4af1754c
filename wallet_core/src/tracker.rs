//! Pending/confirmed bookkeeping for fragments this wallet signed.

use std::collections::{HashMap, HashSet, VecDeque};

use ballot_transactions::FragmentStatus;
use ballot_types::{FragmentId, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedFragment {
    /// Fee the fragment spends from the account.
    pub fee: Value,
    pub status: FragmentStatus,
    seq: u64,
}

/// Outcome of [`FragmentTracker::confirm`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    /// Was pending; carries the fee now spent.
    Confirmed(Value),
    AlreadyConfirmed,
    Unknown,
}

/// Tracks signed fragments until the caller reports them confirmed.
///
/// Pending fragments reserve their fee. Once more than `max_tracked`
/// fragments are held, the oldest confirmed ones are retired: only their id
/// is kept, so a late duplicate confirmation is still recognised. Pending
/// fragments are never retired.
#[derive(Clone, Debug)]
pub struct FragmentTracker {
    fragments: HashMap<FragmentId, TrackedFragment>,
    confirmed_order: VecDeque<FragmentId>,
    retired: HashSet<FragmentId>,
    reserved: Value,
    next_seq: u64,
    max_tracked: usize,
}

impl FragmentTracker {
    pub fn new(max_tracked: usize) -> Self {
        Self {
            fragments: HashMap::new(),
            confirmed_order: VecDeque::new(),
            retired: HashSet::new(),
            reserved: Value::ZERO,
            next_seq: 0,
            max_tracked,
        }
    }

    /// Sum of fees of all pending fragments.
    pub fn reserved(&self) -> Value {
        self.reserved
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn get(&self, id: &FragmentId) -> Option<&TrackedFragment> {
        self.fragments.get(id)
    }

    pub fn status(&self, id: &FragmentId) -> Option<FragmentStatus> {
        match self.get(id) {
            Some(fragment) => Some(fragment.status),
            None if self.retired.contains(id) => Some(FragmentStatus::Confirmed),
            None => None,
        }
    }

    pub fn track_pending(&mut self, id: FragmentId, fee: Value) {
        if self.fragments.contains_key(&id) || self.retired.contains(&id) {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.fragments.insert(
            id,
            TrackedFragment {
                fee,
                status: FragmentStatus::Pending,
                seq,
            },
        );
        self.reserved = self.reserved.saturating_add(fee);
        self.evict();
    }

    pub fn confirm(&mut self, id: &FragmentId) -> Confirmation {
        let Some(fragment) = self.fragments.get_mut(id) else {
            if self.retired.contains(id) {
                return Confirmation::AlreadyConfirmed;
            }
            return Confirmation::Unknown;
        };
        if fragment.status == FragmentStatus::Confirmed {
            return Confirmation::AlreadyConfirmed;
        }
        fragment.status = FragmentStatus::Confirmed;
        let fee = fragment.fee;
        self.reserved = self.reserved.saturating_sub(fee);
        self.confirmed_order.push_back(*id);
        self.evict();
        Confirmation::Confirmed(fee)
    }

    /// Pending fragment ids, oldest first.
    pub fn pending(&self) -> Vec<FragmentId> {
        let mut pending: Vec<_> = self
            .fragments
            .iter()
            .filter(|(_, f)| f.status == FragmentStatus::Pending)
            .map(|(id, f)| (f.seq, *id))
            .collect();
        pending.sort_unstable_by_key(|(seq, _)| *seq);
        pending.into_iter().map(|(_, id)| id).collect()
    }

    /// Drop every fee reservation while keeping the fragments themselves.
    ///
    /// Pending fragments stay pending with a zero fee, so confirming them
    /// later succeeds without spending anything more.
    pub fn release_reservations(&mut self) {
        for fragment in self.fragments.values_mut() {
            if fragment.status == FragmentStatus::Pending {
                fragment.fee = Value::ZERO;
            }
        }
        self.reserved = Value::ZERO;
    }

    fn evict(&mut self) {
        while self.fragments.len() > self.max_tracked {
            let Some(oldest) = self.confirmed_order.pop_front() else {
                break;
            };
            self.fragments.remove(&oldest);
            self.retired.insert(oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u8) -> FragmentId {
        FragmentId::new([n; 32])
    }

    #[test]
    fn pending_reserves_fee_until_confirmed() {
        let mut tracker = FragmentTracker::new(8);
        tracker.track_pending(id(1), Value(10));
        tracker.track_pending(id(2), Value(5));
        assert_eq!(tracker.reserved(), Value(15));

        assert_eq!(tracker.confirm(&id(1)), Confirmation::Confirmed(Value(10)));
        assert_eq!(tracker.reserved(), Value(5));
        assert_eq!(tracker.status(&id(1)), Some(FragmentStatus::Confirmed));
        assert_eq!(tracker.pending(), vec![id(2)]);
    }

    #[test]
    fn confirm_is_idempotent() {
        let mut tracker = FragmentTracker::new(8);
        tracker.track_pending(id(1), Value(3));
        tracker.confirm(&id(1));
        assert_eq!(tracker.confirm(&id(1)), Confirmation::AlreadyConfirmed);
        assert_eq!(tracker.reserved(), Value::ZERO);
    }

    #[test]
    fn unknown_id() {
        let mut tracker = FragmentTracker::new(8);
        assert_eq!(tracker.confirm(&id(9)), Confirmation::Unknown);
        assert_eq!(tracker.status(&id(9)), None);
    }

    #[test]
    fn pending_listed_in_signing_order() {
        let mut tracker = FragmentTracker::new(16);
        for n in [7, 3, 9, 1] {
            tracker.track_pending(id(n), Value(1));
        }
        assert_eq!(tracker.pending(), vec![id(7), id(3), id(9), id(1)]);
    }

    #[test]
    fn evicts_oldest_confirmed_only() {
        let mut tracker = FragmentTracker::new(2);
        tracker.track_pending(id(1), Value(1));
        tracker.track_pending(id(2), Value(1));
        tracker.track_pending(id(3), Value(1));
        // Nothing confirmed yet: all pending kept over the bound.
        assert_eq!(tracker.len(), 3);

        tracker.confirm(&id(2));
        assert_eq!(tracker.len(), 2);
        assert!(tracker.get(&id(2)).is_none());
        assert_eq!(tracker.status(&id(2)), Some(FragmentStatus::Confirmed));

        tracker.confirm(&id(1));
        tracker.confirm(&id(3));
        assert_eq!(tracker.len(), 2);
        assert_eq!(tracker.status(&id(3)), Some(FragmentStatus::Confirmed));
    }

    #[test]
    fn reconfirming_retired_fragment_is_idempotent() {
        let mut tracker = FragmentTracker::new(1);
        tracker.track_pending(id(1), Value(4));
        tracker.confirm(&id(1));
        tracker.track_pending(id(2), Value(4));
        tracker.confirm(&id(2));
        assert!(tracker.get(&id(1)).is_none());

        assert_eq!(tracker.confirm(&id(1)), Confirmation::AlreadyConfirmed);
        assert_eq!(tracker.status(&id(1)), Some(FragmentStatus::Confirmed));
        assert_eq!(tracker.reserved(), Value::ZERO);
    }

    #[test]
    fn released_reservations_keep_fragments() {
        let mut tracker = FragmentTracker::new(8);
        tracker.track_pending(id(1), Value(6));
        tracker.track_pending(id(2), Value(2));
        tracker.confirm(&id(2));
        tracker.release_reservations();

        assert_eq!(tracker.reserved(), Value::ZERO);
        assert_eq!(tracker.pending(), vec![id(1)]);
        assert_eq!(tracker.confirm(&id(1)), Confirmation::Confirmed(Value::ZERO));
        assert_eq!(tracker.confirm(&id(2)), Confirmation::AlreadyConfirmed);
    }
}
