// File: crates/timechart-core/src/reconcile.rs
// Summary: Keyed enter/update/exit diffing and the in-place reconciliation built on it.

use std::collections::HashMap;

/// Counts from one reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

/// Result of matching existing keys against desired keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyedDiff {
    /// For each desired entry, the index of the existing entry it reuses, if any.
    pub matched: Vec<Option<usize>>,
    /// Existing entries no desired entry claimed, in existing order.
    pub exiting: Vec<usize>,
}

impl KeyedDiff {
    /// Desired indices that need a new node.
    pub fn entering(&self) -> impl Iterator<Item = usize> + '_ {
        self.matched.iter().enumerate().filter(|(_, m)| m.is_none()).map(|(i, _)| i)
    }

    pub fn stats(&self) -> ReconcileStats {
        let entered = self.matched.iter().filter(|m| m.is_none()).count();
        ReconcileStats {
            entered,
            updated: self.matched.len() - entered,
            exited: self.exiting.len(),
        }
    }
}

/// Pure keyed diff. Each existing key is claimed at most once; a repeated desired key
/// after the first claim enters as a new node, and repeated existing keys exit.
pub fn diff_keys<'a, 'b>(
    existing: impl IntoIterator<Item = &'a str>,
    desired: impl IntoIterator<Item = &'b str>,
) -> KeyedDiff {
    let existing: Vec<&str> = existing.into_iter().collect();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(existing.len());
    for (i, &key) in existing.iter().enumerate() {
        index.entry(key).or_insert(i);
    }
    let mut claimed = vec![false; existing.len()];
    let matched = desired
        .into_iter()
        .map(|key| {
            let i = *index.get(key)?;
            if claimed[i] {
                return None;
            }
            claimed[i] = true;
            Some(i)
        })
        .collect();
    let exiting = claimed.iter().enumerate().filter(|(_, c)| !**c).map(|(i, _)| i).collect();
    KeyedDiff { matched, exiting }
}

/// Reconcile `nodes` against `desired` by key, in place.
///
/// Matched nodes are moved (not rebuilt) into desired order and passed to `update`;
/// unmatched desired entries are built with `enter`; leftover nodes are dropped.
pub fn reconcile<N, S>(
    nodes: &mut Vec<N>,
    desired: &[S],
    node_key: impl Fn(&N) -> &str,
    source_key: impl Fn(&S) -> &str,
    mut enter: impl FnMut(&S) -> N,
    mut update: impl FnMut(&mut N, &S),
) -> ReconcileStats {
    let diff = diff_keys(nodes.iter().map(&node_key), desired.iter().map(&source_key));
    let stats = diff.stats();
    let mut slots: Vec<Option<N>> = std::mem::take(nodes).into_iter().map(Some).collect();
    nodes.reserve(desired.len());
    for (src, matched) in desired.iter().zip(&diff.matched) {
        match matched.and_then(|i| slots[i].take()) {
            Some(mut node) => {
                update(&mut node, src);
                nodes.push(node);
            }
            None => nodes.push(enter(src)),
        }
    }
    stats
}
