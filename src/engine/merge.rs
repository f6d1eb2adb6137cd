use super::matcher::pair;
use crate::model::screen::canonical_screens;
use crate::model::{KeyStrategy, Layout, MonitorGeometry, WindowRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub added: usize,
    pub retained: usize,
    pub pruned: usize,
}

#[derive(Debug, Clone)]
pub struct Merge {
    pub layout: Layout,
    pub summary: MergeSummary,
}

/// Folds a live snapshot into the stored layout for the same screens.
///
/// Paired records are overwritten in place, new windows are appended in
/// enumeration order, and stale records stay untouched unless `prune_stale`.
pub fn merge(
    existing: Option<&Layout>,
    screens: &[MonitorGeometry],
    live: &[WindowRecord],
    strategy: KeyStrategy,
    prune_stale: bool,
) -> Merge {
    let stored: &[WindowRecord] = existing.map(|l| l.windows.as_slice()).unwrap_or(&[]);
    let pairing = pair(live, stored, strategy);

    let mut windows: Vec<Option<WindowRecord>> = stored.iter().cloned().map(Some).collect();
    for &(l, s) in &pairing.pairs {
        windows[s] = Some(live[l].clone());
    }

    let mut summary = MergeSummary {
        updated: pairing.pairs.len(),
        added: pairing.unmatched.len(),
        ..MergeSummary::default()
    };
    if prune_stale {
        for &s in &pairing.stale {
            windows[s] = None;
        }
        summary.pruned = pairing.stale.len();
    } else {
        summary.retained = pairing.stale.len();
    }

    let mut layout = Layout::new(canonical_screens(screens));
    layout.windows = windows.into_iter().flatten().collect();
    layout
        .windows
        .extend(pairing.unmatched.iter().map(|&l| live[l].clone()));

    Merge { layout, summary }
}
