//! Turns the unordered photons of a [`PhotonStore`] into a left-balanced kd-tree.
//!
//! The tree is implicit: the root is slot 1 and the children of slot `i` are
//! slots `2i` and `2i + 1`. Every node splits its subtree at the median along
//! the widest axis of the box enclosing that subtree.

use log::debug;

use crate::{
    math::{axis::Axis, bounds::Bounds},
    store::PhotonStore,
};

/// Reorders `store` in place into kd-tree order.
///
/// Returns the leaf start, `len / 2 - 1` (0 when there are fewer than two photons).
pub fn balance(store: &mut PhotonStore) -> usize {
    let n = store.len();
    if n > 0 {
        let mut builder = TreeBuilder {
            balanced: vec![0; n + 1],
            order: (0..=n).collect(),
            store,
        };
        let bounds = builder.store.bounds();
        builder.build_segment(1, 1, n, bounds);

        let TreeBuilder {
            mut balanced,
            store,
            ..
        } = builder;
        apply_permutation(store, &mut balanced);
    }

    debug!("balanced {n} photons");
    (n / 2).saturating_sub(1)
}

struct TreeBuilder<'a> {
    store: &'a mut PhotonStore,
    /// Original slot of the photon that goes to each tree node
    balanced: Vec<usize>,
    /// Original slots, partitioned in place while building
    order: Vec<usize>,
}

impl TreeBuilder<'_> {
    /// Builds the subtree rooted at `node` from `order[lo..=hi]`.
    fn build_segment(&mut self, node: usize, lo: usize, hi: usize, bounds: Bounds) {
        if hi < lo {
            return;
        }

        let median = median_rank(lo, hi);
        let axis = bounds.widest_axis();

        median_split(self.store, &mut self.order, lo, hi, median, axis);

        let split = self.order[median];
        self.balanced[node] = split;
        self.store.set_plane(split, axis);
        let split_coord = self.store.coord(split, axis);

        if median > lo {
            if lo < median - 1 {
                self.build_segment(2 * node, lo, median - 1, bounds.with_max(axis, split_coord));
            } else {
                self.balanced[2 * node] = self.order[lo];
            }
        }

        if median < hi {
            if median + 1 < hi {
                self.build_segment(2 * node + 1, median + 1, hi, bounds.with_min(axis, split_coord));
            } else {
                self.balanced[2 * node + 1] = self.order[hi];
            }
        }
    }
}

/// Position in `lo..=hi` of the element that becomes the subtree root.
///
/// Chosen so that the left subtree has exactly the size a left-balanced
/// (complete) binary tree of `hi - lo + 1` nodes puts there.
pub fn median_rank(lo: usize, hi: usize) -> usize {
    let size = hi - lo + 1;
    let mut m = 1;
    while 4 * m <= size {
        m += m;
    }

    if 3 * m <= size {
        lo - 1 + 2 * m
    } else {
        hi - m + 1
    }
}

/// Partially sorts `order[lo..=hi]` along `axis` so that `order[median]` holds
/// the photon of that rank, with nothing greater before it and nothing smaller
/// after it.
///
/// Quickselect with the last element of the range as pivot.
pub fn median_split(
    store: &PhotonStore,
    order: &mut [usize],
    lo: usize,
    hi: usize,
    median: usize,
    axis: Axis,
) {
    let coord = |slot: usize| store.coord(slot, axis);

    let mut left = lo;
    let mut right = hi;
    while right > left {
        let pivot = coord(order[right]);
        let mut i = left;
        let mut j = right;
        loop {
            // order[right] == pivot stops this scan
            while coord(order[i]) < pivot {
                i += 1;
            }
            j -= 1;
            while coord(order[j]) > pivot && j > left {
                j -= 1;
            }
            if i >= j {
                break;
            }
            order.swap(i, j);
            i += 1;
        }

        order.swap(i, right);
        if i >= median {
            right = i - 1;
        }
        if i <= median {
            left = i + 1;
        }
    }
}

/// Moves every photon to its tree node: the record at slot `balanced[node]`
/// ends up at slot `node`.
///
/// Cycles are followed with slot 0 holding the displaced record, so no second
/// photon buffer is needed. Entries of `balanced` are zeroed once placed.
fn apply_permutation(store: &mut PhotonStore, balanced: &mut [usize]) {
    for start in 1..balanced.len() {
        if balanced[start] == 0 {
            continue;
        }

        store.copy(start, 0);
        let mut node = start;
        loop {
            let src = std::mem::take(&mut balanced[node]);
            if src == start {
                store.copy(0, node);
                break;
            }
            store.copy(src, node);
            node = src;
        }
    }
}
