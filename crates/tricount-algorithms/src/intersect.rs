//! Sorted neighbor-list intersection primitives
//!
//! Every primitive takes two ascending, duplicate-free lists and reports the
//! elements they share. They differ only in cost:
//!
//! | Strategy | Time | Extra space |
//! |----------|------|-------------|
//! | merge-path | O(a + b) | none |
//! | hash/marker | O(a + b) | marker array of size n |
//! | binary search | O(s log l) | none |
//! | partitioned | O(s log l) worst case, divide and conquer | recursion stack |
//!
//! The hybrid policy picks the marker when the shorter list exceeds a
//! threshold and merge-path otherwise.

use crate::common::{try_filled, AlgoResult, VertexId};

/// Default shorter-list length above which the hybrid policy switches to the
/// marker array.
pub const DEFAULT_HYBRID_THRESHOLD: usize = 32;

/// Which intersection primitive to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum IntersectionStrategy {
    Merge,
    Hash,
    Binary,
    Partitioned,
    #[default]
    Hybrid,
}

impl IntersectionStrategy {
    pub const ALL: [IntersectionStrategy; 5] = [
        IntersectionStrategy::Merge,
        IntersectionStrategy::Hash,
        IntersectionStrategy::Binary,
        IntersectionStrategy::Partitioned,
        IntersectionStrategy::Hybrid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IntersectionStrategy::Merge => "merge",
            IntersectionStrategy::Hash => "hash",
            IntersectionStrategy::Binary => "binary",
            IntersectionStrategy::Partitioned => "partitioned",
            IntersectionStrategy::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for IntersectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for IntersectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| format!("unknown intersection strategy '{s}'"))
    }
}

/// Vertex-indexed membership set with O(1) clearing.
///
/// A vertex is marked iff its stamp equals the current generation. Clearing
/// bumps the generation; the array is only rewritten when the counter wraps.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    stamps: Vec<u32>,
    generation: u32,
}

impl MarkerSet {
    /// Marker array covering vertex ids `0..n`.
    pub fn new(n: usize) -> AlgoResult<Self> {
        Ok(Self {
            stamps: try_filled(n, 0, "marker array")?,
            generation: 1,
        })
    }

    /// Number of vertices covered
    pub fn capacity(&self) -> usize {
        self.stamps.len()
    }

    #[inline]
    pub fn mark(&mut self, v: VertexId) {
        self.stamps[v] = self.generation;
    }

    #[inline]
    pub fn mark_all(&mut self, vs: &[VertexId]) {
        for &v in vs {
            self.stamps[v] = self.generation;
        }
    }

    #[inline]
    pub fn is_marked(&self, v: VertexId) -> bool {
        self.stamps[v] == self.generation
    }

    /// Unmarks everything.
    #[inline]
    pub fn clear(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    #[cfg(test)]
    fn set_generation(&mut self, generation: u32) {
        self.generation = generation;
    }
}

/// Intersection of two sorted neighbor lists.
pub trait Intersect {
    /// Calls `f` once for every element present in both lists.
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], f: F);

    /// Number of common elements.
    fn count(&mut self, a: &[VertexId], b: &[VertexId]) -> u64 {
        let mut count = 0u64;
        self.for_each_common(a, b, |_| count += 1);
        count
    }
}

/// Two-pointer merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergePath;

impl Intersect for MergePath {
    #[inline]
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], f: F) {
        merge_for_each(a, b, f)
    }

    #[inline]
    fn count(&mut self, a: &[VertexId], b: &[VertexId]) -> u64 {
        merge_count(a, b)
    }
}

/// Binary search of each element of the shorter list in the longer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl Intersect for BinarySearch {
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], mut f: F) {
        let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        // Both lists ascend, so the search window only ever shrinks from the left.
        let mut window = long;
        for &x in short {
            if window.is_empty() {
                break;
            }
            match window.binary_search(&x) {
                Ok(pos) => {
                    f(x);
                    window = &window[pos + 1..];
                }
                Err(pos) => window = &window[pos..],
            }
        }
    }
}

/// Divide and conquer on the median of the longer list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Partitioned;

impl Intersect for Partitioned {
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], mut f: F) {
        partition_visit(a, b, &mut f)
    }
}

fn partition_visit<F: FnMut(VertexId)>(a: &[VertexId], b: &[VertexId], f: &mut F) {
    if a.is_empty() || b.is_empty() {
        return;
    }
    // Disjoint value ranges share nothing.
    if a[a.len() - 1] < b[0] || b[b.len() - 1] < a[0] {
        return;
    }
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mid = long.len() / 2;
    let pivot = long[mid];
    match short.binary_search(&pivot) {
        Ok(pos) => {
            partition_visit(&long[..mid], &short[..pos], f);
            f(pivot);
            partition_visit(&long[mid + 1..], &short[pos + 1..], f);
        }
        Err(pos) => {
            partition_visit(&long[..mid], &short[..pos], f);
            partition_visit(&long[mid + 1..], &short[pos..], f);
        }
    }
}

/// Marks the shorter list, scans the longer one, then clears.
#[derive(Debug, Clone)]
pub struct HashMarker {
    marks: MarkerSet,
}

impl HashMarker {
    pub fn new(n: usize) -> AlgoResult<Self> {
        Ok(Self { marks: MarkerSet::new(n)? })
    }
}

impl Intersect for HashMarker {
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], f: F) {
        marker_for_each(&mut self.marks, a, b, f)
    }
}

/// Merge-path for short lists, marker otherwise.
#[derive(Debug, Clone)]
pub struct Hybrid {
    threshold: usize,
    marks: MarkerSet,
}

impl Hybrid {
    pub fn new(n: usize, threshold: usize) -> AlgoResult<Self> {
        Ok(Self {
            threshold,
            marks: MarkerSet::new(n)?,
        })
    }
}

impl Intersect for Hybrid {
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], f: F) {
        if a.len().min(b.len()) > self.threshold {
            marker_for_each(&mut self.marks, a, b, f)
        } else {
            merge_for_each(a, b, f)
        }
    }

    fn count(&mut self, a: &[VertexId], b: &[VertexId]) -> u64 {
        if a.len().min(b.len()) > self.threshold {
            let mut count = 0u64;
            marker_for_each(&mut self.marks, a, b, |_| count += 1);
            count
        } else {
            merge_count(a, b)
        }
    }
}

/// Runtime-selected primitive, built from an [`IntersectionStrategy`].
#[derive(Debug, Clone)]
pub enum Intersector {
    Merge(MergePath),
    Hash(HashMarker),
    Binary(BinarySearch),
    Partitioned(Partitioned),
    Hybrid(Hybrid),
}

impl Intersector {
    /// Builds the primitive for vertex ids `0..n`.
    pub fn new(strategy: IntersectionStrategy, n: usize, hybrid_threshold: usize) -> AlgoResult<Self> {
        Ok(match strategy {
            IntersectionStrategy::Merge => Intersector::Merge(MergePath),
            IntersectionStrategy::Hash => Intersector::Hash(HashMarker::new(n)?),
            IntersectionStrategy::Binary => Intersector::Binary(BinarySearch),
            IntersectionStrategy::Partitioned => Intersector::Partitioned(Partitioned),
            IntersectionStrategy::Hybrid => Intersector::Hybrid(Hybrid::new(n, hybrid_threshold)?),
        })
    }

    pub fn strategy(&self) -> IntersectionStrategy {
        match self {
            Intersector::Merge(_) => IntersectionStrategy::Merge,
            Intersector::Hash(_) => IntersectionStrategy::Hash,
            Intersector::Binary(_) => IntersectionStrategy::Binary,
            Intersector::Partitioned(_) => IntersectionStrategy::Partitioned,
            Intersector::Hybrid(_) => IntersectionStrategy::Hybrid,
        }
    }
}

impl Intersect for Intersector {
    #[inline]
    fn for_each_common<F: FnMut(VertexId)>(&mut self, a: &[VertexId], b: &[VertexId], f: F) {
        match self {
            Intersector::Merge(i) => i.for_each_common(a, b, f),
            Intersector::Hash(i) => i.for_each_common(a, b, f),
            Intersector::Binary(i) => i.for_each_common(a, b, f),
            Intersector::Partitioned(i) => i.for_each_common(a, b, f),
            Intersector::Hybrid(i) => i.for_each_common(a, b, f),
        }
    }

    #[inline]
    fn count(&mut self, a: &[VertexId], b: &[VertexId]) -> u64 {
        match self {
            Intersector::Merge(i) => i.count(a, b),
            Intersector::Hash(i) => i.count(a, b),
            Intersector::Binary(i) => i.count(a, b),
            Intersector::Partitioned(i) => i.count(a, b),
            Intersector::Hybrid(i) => i.count(a, b),
        }
    }
}

/// Merge-path intersection size.
#[inline]
pub fn merge_count(a: &[VertexId], b: &[VertexId]) -> u64 {
    let (mut i, mut j, mut count) = (0, 0, 0u64);
    while i < a.len() && j < b.len() {
        let (x, y) = (a[i], b[j]);
        if x == y {
            count += 1;
            i += 1;
            j += 1;
        } else if x < y {
            i += 1;
        } else {
            j += 1;
        }
    }
    count
}

#[inline]
fn merge_for_each<F: FnMut(VertexId)>(a: &[VertexId], b: &[VertexId], mut f: F) {
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let (x, y) = (a[i], b[j]);
        if x == y {
            f(x);
            i += 1;
            j += 1;
        } else if x < y {
            i += 1;
        } else {
            j += 1;
        }
    }
}

#[inline]
fn marker_for_each<F: FnMut(VertexId)>(marks: &mut MarkerSet, a: &[VertexId], b: &[VertexId], mut f: F) {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    marks.mark_all(short);
    for &x in long {
        if marks.is_marked(x) {
            f(x);
        }
    }
    marks.clear();
}
