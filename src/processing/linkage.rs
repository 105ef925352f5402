//! Average-linkage agglomerative clustering over Euclidean distance
//!
//! Merges are found with the nearest-neighbour chain algorithm, which is exact
//! for average linkage because the linkage is reducible. The merge list is then
//! stably sorted by distance; merge `i` creates tree node `n + i`, leaves are
//! nodes `0..n`.
//!
//! Cutting into `k` clusters repeatedly splits the highest node still in a
//! max-heap of node ids, and a cluster's label is its node's slot in that heap.
//! The numbering matches scikit-learn's agglomerative clustering.

use ndarray::{Array2, ArrayView1};
use rayon::prelude::*;

/// One agglomeration step. `a < b` are representative point indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	pub size: usize,
}

#[derive(Debug, Clone)]
pub struct Dendrogram {
	merges: Vec<Merge>,
	/// Child node ids of node `n + i`, smaller id first
	children: Vec<(usize, usize)>,
	n_samples: usize,
}

impl Dendrogram {
	/// Build the full merge history for the rows of `points`
	pub fn fit(points: &Array2<f64>) -> Self {
		let n = points.nrows();
		if n < 2 {
			return Self {
				merges: Vec::new(),
				children: Vec::new(),
				n_samples: n,
			};
		}

		let mut dist = DistanceMatrix::euclidean(points);
		let mut sizes = vec![1usize; n];
		let mut active = vec![true; n];
		let mut chain: Vec<usize> = Vec::with_capacity(n);
		let mut merges = Vec::with_capacity(n - 1);

		while merges.len() < n - 1 {
			if chain.is_empty() {
				let Some(start) = active.iter().position(|&alive| alive) else {
					break;
				};
				chain.push(start);
			}

			// Grow the chain until its tail is a reciprocal nearest-neighbour pair
			loop {
				let tail = chain[chain.len() - 1];
				let prev = chain.len().checked_sub(2).map(|i| chain[i]);

				let (mut best, mut best_dist) = match prev {
					Some(p) => (p, dist.get(tail, p)),
					None => (usize::MAX, f64::INFINITY),
				};
				for k in 0..n {
					if !active[k] || k == tail {
						continue;
					}
					// Overflowing distances are +inf, so take the first candidate unconditionally
					let d = dist.get(tail, k);
					if best == usize::MAX || d < best_dist {
						best = k;
						best_dist = d;
					}
				}

				if Some(best) == prev {
					break;
				}
				chain.push(best);
			}

			let (Some(x), Some(y)) = (chain.pop(), chain.pop()) else {
				break;
			};
			let (lo, hi) = if x < y { (x, y) } else { (y, x) };
			let (size_lo, size_hi) = (sizes[lo], sizes[hi]);
			let merged = size_lo + size_hi;

			merges.push(Merge {
				a: lo,
				b: hi,
				distance: dist.get(lo, hi),
				size: merged,
			});

			// The higher index represents the merged cluster
			active[lo] = false;
			sizes[hi] = merged;

			// Lance-Williams update for average linkage
			for k in 0..n {
				if !active[k] || k == hi {
					continue;
				}
				let updated = (size_lo as f64 * dist.get(lo, k) + size_hi as f64 * dist.get(hi, k))
					/ merged as f64;
				dist.set(hi, k, updated);
			}
		}

		merges.sort_by(|x, y| x.distance.total_cmp(&y.distance));
		let children = tree_children(&merges, n);

		Self {
			merges,
			children,
			n_samples: n,
		}
	}

	/// Flat labels for `k` clusters
	///
	/// `k` is clamped to `1..=n_samples`.
	pub fn cut(&self, k: usize) -> Vec<usize> {
		let n = self.n_samples;
		if n == 0 {
			return Vec::new();
		}
		let k = k.clamp(1, n);

		let mut heap = vec![2 * n - 2];
		for _ in 1..k {
			// With fewer than n nodes in the heap its top is never a leaf
			let (left, right) = self.children[heap[0] - n];
			heap_push(&mut heap, left);
			heap_push_pop(&mut heap, right);
		}

		let mut labels = vec![0; n];
		for (label, &node) in heap.iter().enumerate() {
			let mut stack = vec![node];
			while let Some(id) = stack.pop() {
				if id < n {
					labels[id] = label;
				} else {
					let (left, right) = self.children[id - n];
					stack.push(left);
					stack.push(right);
				}
			}
		}
		labels
	}

	pub fn merges(&self) -> &[Merge] {
		&self.merges
	}

	/// Merge heights in ascending order
	pub fn distances(&self) -> Vec<f64> {
		self.merges.iter().map(|m| m.distance).collect()
	}

	pub fn children(&self) -> &[(usize, usize)] {
		&self.children
	}

	pub fn n_samples(&self) -> usize {
		self.n_samples
	}
}

/// Node ids joined by each merge, in merge order
fn tree_children(merges: &[Merge], n: usize) -> Vec<(usize, usize)> {
	let mut sets = DisjointSets::new(n);
	let mut node: Vec<usize> = (0..n).collect();

	merges
		.iter()
		.enumerate()
		.map(|(i, merge)| {
			let (ra, rb) = (sets.find(merge.a), sets.find(merge.b));
			let (x, y) = (node[ra], node[rb]);
			let root = sets.union(ra, rb);
			node[root] = n + i;
			(x.min(y), x.max(y))
		})
		.collect()
}

// Binary max-heap helpers with the exact slot layout of a textbook
// sift-down/sift-up heap, since cluster labels are heap positions.

fn heap_push(heap: &mut Vec<usize>, item: usize) {
	heap.push(item);
	let last = heap.len() - 1;
	sift_toward_root(heap, 0, last);
}

/// Push `item` then drop the largest entry
fn heap_push_pop(heap: &mut [usize], item: usize) {
	if heap.first().is_some_and(|&top| top > item) {
		heap[0] = item;
		sift_toward_leaf(heap, 0);
	}
}

fn sift_toward_root(heap: &mut [usize], start: usize, mut pos: usize) {
	let item = heap[pos];
	while pos > start {
		let parent = (pos - 1) / 2;
		if item > heap[parent] {
			heap[pos] = heap[parent];
			pos = parent;
		} else {
			break;
		}
	}
	heap[pos] = item;
}

fn sift_toward_leaf(heap: &mut [usize], mut pos: usize) {
	let end = heap.len();
	let start = pos;
	let item = heap[pos];

	let mut child = 2 * pos + 1;
	while child < end {
		let right = child + 1;
		if right < end && heap[child] < heap[right] {
			child = right;
		}
		heap[pos] = heap[child];
		pos = child;
		child = 2 * pos + 1;
	}
	heap[pos] = item;
	sift_toward_root(heap, start, pos);
}

/// Condensed upper-triangular pairwise distance matrix
struct DistanceMatrix {
	n: usize,
	data: Vec<f64>,
}

impl DistanceMatrix {
	fn euclidean(points: &Array2<f64>) -> Self {
		let n = points.nrows();
		let data: Vec<f64> = (0..n)
			.into_par_iter()
			.flat_map_iter(|i| (i + 1..n).map(move |j| euclidean(points.row(i), points.row(j))))
			.collect();
		Self { n, data }
	}

	fn offset(&self, i: usize, j: usize) -> usize {
		let (i, j) = if i < j { (i, j) } else { (j, i) };
		self.n * i - i * (i + 1) / 2 + (j - i - 1)
	}

	fn get(&self, i: usize, j: usize) -> f64 {
		self.data[self.offset(i, j)]
	}

	fn set(&mut self, i: usize, j: usize, value: f64) {
		let idx = self.offset(i, j);
		self.data[idx] = value;
	}
}

fn euclidean(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
	a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum::<f64>().sqrt()
}

struct DisjointSets {
	parent: Vec<usize>,
}

impl DisjointSets {
	fn new(n: usize) -> Self {
		Self { parent: (0..n).collect() }
	}

	fn find(&mut self, mut x: usize) -> usize {
		while self.parent[x] != x {
			self.parent[x] = self.parent[self.parent[x]];
			x = self.parent[x];
		}
		x
	}

	/// Join the sets of `a` and `b`, returning the surviving root
	fn union(&mut self, a: usize, b: usize) -> usize {
		let (ra, rb) = (self.find(a), self.find(b));
		let (keep, drop) = if ra < rb { (ra, rb) } else { (rb, ra) };
		self.parent[drop] = keep;
		keep
	}
}
