use crate::model::{KeyStrategy, WindowRecord};
use std::collections::HashMap;

/// Result of pairing live windows with stored records.
///
/// All indices refer to the slices passed to [`pair`]. `pairs` is ordered by
/// live index; `unmatched` and `stale` are ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    /// (live index, stored index)
    pub pairs: Vec<(usize, usize)>,
    /// Live windows with no stored record
    pub unmatched: Vec<usize>,
    /// Stored records with no live window
    pub stale: Vec<usize>,
}

/// Pairs live windows with stored records by identifier key.
///
/// Within one key, an identical title wins first; whatever is left pairs up
/// positionally in enumeration order on both sides. The result depends only on
/// the inputs, so an unchanged window set always pairs the same way.
pub fn pair(live: &[WindowRecord], stored: &[WindowRecord], strategy: KeyStrategy) -> Pairing {
    let mut stored_by_key: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, record) in stored.iter().enumerate() {
        stored_by_key.entry(record.key(strategy)).or_default().push(i);
    }

    let mut live_by_key: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut key_order: Vec<&str> = Vec::new();
    for (i, window) in live.iter().enumerate() {
        let key = window.key(strategy);
        let group = live_by_key.entry(key).or_default();
        if group.is_empty() {
            key_order.push(key);
        }
        group.push(i);
    }

    let mut assigned: Vec<Option<usize>> = vec![None; live.len()];
    let mut taken = vec![false; stored.len()];

    for key in key_order {
        let Some(candidates) = stored_by_key.get(key) else {
            continue;
        };
        let windows = &live_by_key[key];

        for &l in windows {
            let same_title = candidates
                .iter()
                .copied()
                .find(|&s| !taken[s] && stored[s].title == live[l].title);
            if let Some(s) = same_title {
                taken[s] = true;
                assigned[l] = Some(s);
            }
        }

        let free: Vec<usize> = candidates.iter().copied().filter(|&s| !taken[s]).collect();
        let mut free = free.into_iter();
        for &l in windows {
            if assigned[l].is_some() {
                continue;
            }
            match free.next() {
                Some(s) => {
                    taken[s] = true;
                    assigned[l] = Some(s);
                }
                None => break,
            }
        }
    }

    let mut pairing = Pairing::default();
    for (l, slot) in assigned.into_iter().enumerate() {
        match slot {
            Some(s) => pairing.pairs.push((l, s)),
            None => pairing.unmatched.push(l),
        }
    }
    pairing.stale = (0..stored.len()).filter(|&s| !taken[s]).collect();
    pairing
}
