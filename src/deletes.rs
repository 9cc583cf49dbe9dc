//! Enumeration of delete-variants used both to populate the index and to
//! expand a query during lookup.

use std::collections::BTreeSet;

/// Returns every unique byte string reachable by deleting between 0 and
/// `max_distance` bytes (by byte index) from `prefix`.
///
/// The empty string is included only when `prefix` itself is short enough
/// that deleting down to nothing is within `max_distance` deletions, i.e.
/// `prefix.len() <= max_distance`.
///
/// `prefix` should already be truncated to the index's `prefixLength`
/// before calling this; the function itself performs no truncation, and
/// in particular decides the empty-string case from `prefix.len()`, not
/// from any original untruncated term length. A caller that truncates
/// (e.g. `Index::post`) and cares about the "empty string iff the
/// untruncated term length is `<= max_distance`" invariant must filter
/// the result itself when `prefix_length == max_distance`.
pub fn deletes_of(prefix: &[u8], max_distance: u8) -> BTreeSet<Vec<u8>> {
    let mut seen: BTreeSet<Vec<u8>> = BTreeSet::new();
    seen.insert(prefix.to_vec());

    let mut frontier: Vec<Vec<u8>> = vec![prefix.to_vec()];
    for _ in 0..max_distance {
        let mut next = Vec::new();
        for s in &frontier {
            if s.is_empty() {
                continue;
            }
            for i in 0..s.len() {
                let mut t = s.clone();
                t.remove(i);
                if seen.insert(t.clone()) {
                    next.push(t);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    seen
}
