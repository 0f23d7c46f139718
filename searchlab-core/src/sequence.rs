//! Last-issued-wins request sequencing.
//!
//! A page takes a [`Ticket`] for every request it dispatches. When the
//! response comes back it is applied only if its ticket is still the newest
//! one the page has issued; older responses are stale and dropped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_only_last_issued_is_current(n in 1usize..50) {
            let mut seq = RequestSequencer::new();
            let tickets: Vec<Ticket> = (0..n).map(|_| seq.issue()).collect();
            let current: Vec<bool> = tickets.iter().map(|t| seq.is_current(*t)).collect();
            prop_assert_eq!(current.iter().filter(|c| **c).count(), 1);
            prop_assert!(current[n - 1]);
        }
    }
}
