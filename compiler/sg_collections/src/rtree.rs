//! An R-tree over items with point or box extents.
//!
//! Dimensionality is fixed per tree at construction. Nodes hold at most
//! `MAX_ENTRIES` entries and split linearly (Guttman) on overflow. Deleting
//! an entry condenses underfull nodes by reinserting their items.
//!
//! Boxes are inclusive on both ends: a query box touching an item's box
//! finds it. Nearest-neighbor distances are Euclidean distances from the
//! query point to the item's box, zero inside the box.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::Rejected;

mod rect;

use rect::Rect;

const MAX_ENTRIES: usize = 8;
const MIN_ENTRIES: usize = 3;

/// A coordinate scalar.
pub trait Coordinate: Copy + PartialOrd + fmt::Debug + Send + Sync + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! impl_coordinate {
    ($($ty:ty),*) => {$(
        impl Coordinate for $ty {
            #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

impl_coordinate!(f32, f64, i8, i16, i32, i64, u8, u16, u32, u64);

#[derive(Clone, Debug)]
enum Node<I, C> {
    Leaf(Vec<(Rect<C>, I)>),
    Inner(Vec<(Rect<C>, Node<I, C>)>),
}

impl<I: Copy + PartialEq, C: Coordinate> Node<I, C> {
    fn len(&self) -> usize {
        match self {
            Node::Leaf(entries) => entries.len(),
            Node::Inner(children) => children.len(),
        }
    }

    fn bounds(&self) -> Option<Rect<C>> {
        match self {
            Node::Leaf(entries) => cover(entries),
            Node::Inner(children) => cover(children),
        }
    }

    /// Insert a leaf entry below this node; returns the new sibling if this
    /// node split.
    fn insert(&mut self, rect: Rect<C>, item: I) -> Option<Node<I, C>> {
        match self {
            Node::Leaf(entries) => {
                entries.push((rect, item));
                (entries.len() > MAX_ENTRIES).then(|| Node::Leaf(split(entries)))
            }
            Node::Inner(children) => {
                let i = choose_subtree(children, &rect);
                children[i].0.expand(&rect);
                let sibling = children[i].1.insert(rect, item)?;
                if let Some(bounds) = children[i].1.bounds() {
                    children[i].0 = bounds;
                }
                if let Some(bounds) = sibling.bounds() {
                    children.push((bounds, sibling));
                }
                (children.len() > MAX_ENTRIES).then(|| Node::Inner(split(children)))
            }
        }
    }

    /// Remove the entry `(rect, item)`. Children left underfull are detached
    /// and their items pushed onto `orphans` for reinsertion.
    fn remove(&mut self, rect: &Rect<C>, item: &I, orphans: &mut Vec<(Rect<C>, I)>) -> bool {
        match self {
            Node::Leaf(entries) => {
                match entries.iter().position(|(r, i)| i == item && r == rect) {
                    Some(pos) => {
                        entries.remove(pos);
                        true
                    }
                    None => false,
                }
            }
            Node::Inner(children) => {
                for idx in 0..children.len() {
                    if !children[idx].0.contains(rect) {
                        continue;
                    }
                    if !children[idx].1.remove(rect, item, orphans) {
                        continue;
                    }
                    if children[idx].1.len() < MIN_ENTRIES {
                        let (_, child) = children.remove(idx);
                        child.drain_into(orphans);
                    } else if let Some(bounds) = children[idx].1.bounds() {
                        children[idx].0 = bounds;
                    }
                    return true;
                }
                false
            }
        }
    }

    fn drain_into(self, out: &mut Vec<(Rect<C>, I)>) {
        match self {
            Node::Leaf(entries) => out.extend(entries),
            Node::Inner(children) => {
                for (_, child) in children {
                    child.drain_into(out);
                }
            }
        }
    }

    fn visit<F: FnMut(&I)>(&self, query: &Rect<C>, f: &mut F) {
        match self {
            Node::Leaf(entries) => {
                for (r, item) in entries {
                    if query.intersects(r) {
                        f(item);
                    }
                }
            }
            Node::Inner(children) => {
                for (r, child) in children {
                    if query.intersects(r) {
                        child.visit(query, f);
                    }
                }
            }
        }
    }
}

fn cover<C: Coordinate, T>(entries: &[(Rect<C>, T)]) -> Option<Rect<C>> {
    let (first, rest) = entries.split_first()?;
    let mut bounds = first.0.clone();
    for (r, _) in rest {
        bounds.expand(r);
    }
    Some(bounds)
}

fn choose_subtree<C: Coordinate, T>(children: &[(Rect<C>, T)], rect: &Rect<C>) -> usize {
    let mut best = 0;
    let mut best_cost = (f64::INFINITY, f64::INFINITY);
    for (i, (r, _)) in children.iter().enumerate() {
        let cost = (r.enlargement(rect), r.area());
        if cost.0 < best_cost.0 || (cost.0 == best_cost.0 && cost.1 < best_cost.1) {
            best = i;
            best_cost = cost;
        }
    }
    best
}

/// Linear seed selection: the pair with the greatest normalized separation
/// along any dimension.
fn pick_seeds<C: Coordinate, T>(entries: &[(Rect<C>, T)]) -> (usize, usize) {
    let dims = entries[0].0.min.len();
    let mut best = (0, 1);
    let mut best_separation = f64::NEG_INFINITY;
    for d in 0..dims {
        let mut highest_low = 0;
        let mut lowest_high = 0;
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for (i, (r, _)) in entries.iter().enumerate() {
            let (rmin, rmax) = (r.min[d].to_f64(), r.max[d].to_f64());
            if rmin > entries[highest_low].0.min[d].to_f64() {
                highest_low = i;
            }
            if rmax < entries[lowest_high].0.max[d].to_f64() {
                lowest_high = i;
            }
            lo = lo.min(rmin);
            hi = hi.max(rmax);
        }
        if highest_low == lowest_high {
            continue;
        }
        let width = (hi - lo).max(f64::MIN_POSITIVE);
        let separation = (entries[highest_low].0.min[d].to_f64()
            - entries[lowest_high].0.max[d].to_f64())
            / width;
        if separation > best_separation {
            best_separation = separation;
            best = (lowest_high, highest_low);
        }
    }
    best
}

/// Split an overflowing entry list in two; `entries` keeps one group and
/// the other is returned.
fn split<C: Coordinate, T>(entries: &mut Vec<(Rect<C>, T)>) -> Vec<(Rect<C>, T)> {
    let (a, b) = pick_seeds(entries);
    let mut rest: Vec<_> = entries.drain(..).collect();
    let (lo, hi) = (a.min(b), a.max(b));
    let seed_hi = rest.swap_remove(hi);
    let seed_lo = rest.swap_remove(lo);

    let mut left_bounds = seed_lo.0.clone();
    let mut right_bounds = seed_hi.0.clone();
    let mut left = vec![seed_lo];
    let mut right = vec![seed_hi];

    while let Some(entry) = rest.pop() {
        let remaining = rest.len() + 1;
        let to_left = if left.len() + remaining <= MIN_ENTRIES {
            true
        } else if right.len() + remaining <= MIN_ENTRIES {
            false
        } else {
            let grow_left = left_bounds.enlargement(&entry.0);
            let grow_right = right_bounds.enlargement(&entry.0);
            match grow_left.partial_cmp(&grow_right) {
                Some(Ordering::Less) => true,
                Some(Ordering::Greater) => false,
                _ => match left_bounds.area().partial_cmp(&right_bounds.area()) {
                    Some(Ordering::Less) => true,
                    Some(Ordering::Greater) => false,
                    _ => left.len() <= right.len(),
                },
            }
        };
        if to_left {
            left_bounds.expand(&entry.0);
            left.push(entry);
        } else {
            right_bounds.expand(&entry.0);
            right.push(entry);
        }
    }

    *entries = left;
    right
}

/// A candidate in the nearest-neighbor queue: a subtree or an item.
enum Candidate<'a, I, C> {
    Node(&'a Node<I, C>),
    Item(I),
}

struct Queued<'a, I, C> {
    distance_sq: f64,
    seq: usize,
    candidate: Candidate<'a, I, C>,
}

impl<I, C> PartialEq for Queued<'_, I, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<I, C> Eq for Queued<'_, I, C> {}

impl<I, C> PartialOrd for Queued<'_, I, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, C> Ord for Queued<'_, I, C> {
    // reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance_sq
            .total_cmp(&self.distance_sq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// R-tree mapping items to point or box extents.
#[derive(Clone, Debug)]
pub struct RTree<I, C> {
    dims: usize,
    root: Node<I, C>,
    len: usize,
}

impl<I: Copy + PartialEq, C: Coordinate> RTree<I, C> {
    /// An empty tree over `dims` dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `dims` is zero.
    #[must_use]
    pub fn new(dims: usize) -> Self {
        assert!(dims > 0, "an R-tree needs at least one dimension");
        Self {
            dims,
            root: Node::Leaf(Vec::new()),
            len: 0,
        }
    }

    #[must_use]
    pub fn dims(&self) -> usize {
        self.dims
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn check(&self, coords: &[C]) -> Result<(), Rejected> {
        if coords.len() == self.dims {
            Ok(())
        } else {
            Err(Rejected::DimensionMismatch {
                expected: self.dims,
                found: coords.len(),
            })
        }
    }

    fn query(&self, min: &[C], max: &[C]) -> Result<Rect<C>, Rejected> {
        self.check(min)?;
        self.check(max)?;
        Ok(Rect::new(min, max))
    }

    /// Insert `item` at a point.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if `point` has the wrong length.
    pub fn insert_point(&mut self, item: I, point: &[C]) -> Result<(), Rejected> {
        self.check(point)?;
        self.insert_entry(Rect::point(point), item);
        self.len += 1;
        Ok(())
    }

    /// Insert `item` with the box `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if a corner has the wrong length.
    pub fn insert_box(&mut self, item: I, min: &[C], max: &[C]) -> Result<(), Rejected> {
        let rect = self.query(min, max)?;
        self.insert_entry(rect, item);
        self.len += 1;
        Ok(())
    }

    fn insert_entry(&mut self, rect: Rect<C>, item: I) {
        if let Some(sibling) = self.root.insert(rect, item) {
            let old = std::mem::replace(&mut self.root, Node::Leaf(Vec::new()));
            let mut children = Vec::with_capacity(2);
            for node in [old, sibling] {
                if let Some(bounds) = node.bounds() {
                    children.push((bounds, node));
                }
            }
            self.root = Node::Inner(children);
        }
    }

    /// Delete `item` stored with exactly the box `[min, max]`, or at the
    /// point `min` when `max` is `None`.
    ///
    /// Returns whether an entry was removed.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if a corner has the wrong length.
    pub fn delete(&mut self, item: I, min: &[C], max: Option<&[C]>) -> Result<bool, Rejected> {
        let rect = self.query(min, max.unwrap_or(min))?;
        let mut orphans = Vec::new();
        if !self.root.remove(&rect, &item, &mut orphans) {
            return Ok(false);
        }
        self.len -= 1;
        loop {
            match &mut self.root {
                Node::Inner(children) if children.len() == 1 => {
                    if let Some((_, child)) = children.pop() {
                        self.root = child;
                    }
                }
                Node::Inner(children) if children.is_empty() => {
                    self.root = Node::Leaf(Vec::new());
                }
                _ => break,
            }
        }
        for (r, i) in orphans {
            self.insert_entry(r, i);
        }
        Ok(true)
    }

    /// Number of items whose box intersects `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if a corner has the wrong length.
    pub fn count(&self, min: &[C], max: &[C]) -> Result<usize, Rejected> {
        let query = self.query(min, max)?;
        let mut n = 0;
        self.root.visit(&query, &mut |_| n += 1);
        Ok(n)
    }

    /// Items whose box intersects `[min, max]`.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if a corner has the wrong length.
    pub fn search(&self, min: &[C], max: &[C]) -> Result<Vec<I>, Rejected> {
        let query = self.query(min, max)?;
        let mut found = Vec::new();
        self.root.visit(&query, &mut |item| found.push(*item));
        Ok(found)
    }

    /// Smallest box covering every item, or `None` if the tree is empty.
    #[must_use]
    pub fn bounding_box(&self) -> Option<(Vec<C>, Vec<C>)> {
        self.root
            .bounds()
            .map(|r| (r.min.into_vec(), r.max.into_vec()))
    }

    /// The `k` items nearest to `point`, closest first, with their distances.
    ///
    /// # Errors
    ///
    /// [`Rejected::DimensionMismatch`] if `point` has the wrong length.
    pub fn nearest(&self, point: &[C], k: usize) -> Result<Vec<(I, f64)>, Rejected> {
        self.check(point)?;
        let point: Vec<f64> = point.iter().map(|c| c.to_f64()).collect();
        let mut found = Vec::with_capacity(k.min(self.len));
        let mut heap = BinaryHeap::new();
        let mut seq = 0;
        heap.push(Queued {
            distance_sq: 0.0,
            seq,
            candidate: Candidate::Node(&self.root),
        });

        while found.len() < k {
            let Some(next) = heap.pop() else { break };
            match next.candidate {
                Candidate::Item(item) => found.push((item, next.distance_sq.sqrt())),
                Candidate::Node(Node::Leaf(entries)) => {
                    for (r, item) in entries {
                        seq += 1;
                        heap.push(Queued {
                            distance_sq: r.distance_sq(&point),
                            seq,
                            candidate: Candidate::Item(*item),
                        });
                    }
                }
                Candidate::Node(Node::Inner(children)) => {
                    for (r, child) in children {
                        seq += 1;
                        heap.push(Queued {
                            distance_sq: r.distance_sq(&point),
                            seq,
                            candidate: Candidate::Node(child),
                        });
                    }
                }
            }
        }
        Ok(found)
    }
}
