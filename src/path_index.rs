//! All-pairs shortest travel distance over the candidate places.
//!
//! Built once per planning run in O(P²) (plus an optional relaxation pass)
//! and immutable afterwards, so it can be shared read-only across threads
//! and across requests for the same destination.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{PlanError, Result};
use crate::haversine::HaversineMatrix;
use crate::traits::{DistanceMatrixProvider, Id, Place};
use crate::transport::{TransportLeg, TransportModel};

#[derive(Debug, Clone)]
pub struct ShortestPathIndex<I: Id> {
    index: HashMap<I, usize>,
    distances: Vec<Vec<f64>>,
}

impl<I: Id> ShortestPathIndex<I> {
    /// Build the index over `places` using `provider` for edge weights.
    ///
    /// Duplicate ids keep their first occurrence. A malformed matrix from the
    /// provider is replaced by great-circle distances.
    pub fn build<P, M>(places: &[&P], provider: &M) -> Self
    where
        P: Place<Id = I>,
        M: DistanceMatrixProvider + ?Sized,
    {
        let mut index = HashMap::with_capacity(places.len());
        let mut locations = Vec::with_capacity(places.len());
        for place in places {
            if index.contains_key(place.id()) {
                warn!(id = ?place.id(), "duplicate place id in index build set");
                continue;
            }
            index.insert(place.id().clone(), locations.len());
            locations.push(place.location());
        }

        info!(places = locations.len(), "building shortest-path index");

        let raw = provider.matrix_for(&locations);
        let distances = if !is_well_formed(&raw, locations.len()) {
            warn!(
                rows = raw.len(),
                expected = locations.len(),
                "distance provider returned a malformed matrix, using haversine"
            );
            HaversineMatrix.matrix_for(&locations)
        } else if provider.is_metric() {
            raw
        } else {
            let mut relaxed = relax(symmetrize(raw));
            patch_unreachable(&mut relaxed, &locations);
            relaxed
        };

        Self { index, distances }
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn contains(&self, id: &I) -> bool {
        self.index.contains_key(id)
    }

    /// Shortest travel distance in km.
    ///
    /// An id outside the build set is an integration bug and is reported as
    /// [`PlanError::UnknownPlace`], never defaulted.
    pub fn distance(&self, from: &I, to: &I) -> Result<f64> {
        let from_idx = self.position(from)?;
        let to_idx = self.position(to)?;
        Ok(self.distances[from_idx][to_idx])
    }

    /// Distance plus the transport mode, time and cost for it.
    pub fn leg(&self, from: &I, to: &I, transport: &TransportModel) -> Result<TransportLeg> {
        Ok(transport.leg(self.distance(from, to)?))
    }

    fn position(&self, id: &I) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| PlanError::unknown_place(id))
    }
}

fn is_well_formed(matrix: &[Vec<f64>], n: usize) -> bool {
    matrix.len() == n
        && matrix
            .iter()
            .all(|row| row.len() == n && row.iter().all(|d| !d.is_nan() && *d >= 0.0))
}

/// Road distances may differ by direction; the index treats the cheaper
/// direction as the edge weight both ways.
fn symmetrize(mut matrix: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let n = matrix.len();
    for i in 0..n {
        matrix[i][i] = 0.0;
        for j in i + 1..n {
            let d = matrix[i][j].min(matrix[j][i]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

/// Node for Dijkstra, ordered so the heap pops the smallest distance first.
#[derive(Copy, Clone, PartialEq)]
struct DijkstraNode {
    vertex: usize,
    distance: f64,
}

impl Eq for DijkstraNode {}

impl Ord for DijkstraNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for DijkstraNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run Dijkstra from every vertex over the direct-distance graph.
fn relax(matrix: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let n = matrix.len();
    let mut shortest: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|source| dijkstra(&matrix, source))
        .collect();

    // Summation order differs by direction; keep the result exactly symmetric.
    for i in 0..n {
        for j in i + 1..n {
            let d = shortest[i][j].min(shortest[j][i]);
            shortest[i][j] = d;
            shortest[j][i] = d;
        }
    }

    let shortened = (0..n)
        .flat_map(|i| (0..n).map(move |j| (i, j)))
        .filter(|&(i, j)| shortest[i][j] < matrix[i][j])
        .count();
    debug!(shortened, "relaxation pass complete");

    shortest
}

fn dijkstra(matrix: &[Vec<f64>], source: usize) -> Vec<f64> {
    let n = matrix.len();
    let mut distances = vec![f64::INFINITY; n];
    let mut visited = vec![false; n];
    let mut queue = BinaryHeap::new();

    distances[source] = 0.0;
    queue.push(DijkstraNode {
        vertex: source,
        distance: 0.0,
    });

    while let Some(DijkstraNode { vertex, distance }) = queue.pop() {
        if visited[vertex] {
            continue;
        }
        visited[vertex] = true;

        for (neighbor, &edge) in matrix[vertex].iter().enumerate() {
            if visited[neighbor] || !edge.is_finite() {
                continue;
            }
            let candidate = distance + edge;
            if candidate < distances[neighbor] {
                distances[neighbor] = candidate;
                queue.push(DijkstraNode {
                    vertex: neighbor,
                    distance: candidate,
                });
            }
        }
    }

    distances
}

/// Pairs with no route at all fall back to great-circle distance.
fn patch_unreachable(matrix: &mut [Vec<f64>], locations: &[(f64, f64)]) {
    let mut patched = 0usize;
    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            if !matrix[i][j].is_finite() {
                matrix[i][j] = HaversineMatrix::haversine_km(locations[i], locations[j]);
                patched += 1;
            }
        }
    }
    if patched > 0 {
        warn!(pairs = patched, "unroutable pairs replaced with haversine distance");
    }
}
