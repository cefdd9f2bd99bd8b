//! The augmented bipartite graph of a pair of persistence diagrams
//!
//! Given diagrams `A` (with `a` points) and `B` (with `b` points), a bottleneck matching
//! may pair a point of `A` with a point of `B`, or send a point of either diagram to the
//! diagonal.  To express this as a perfect matching problem we work with two partitions
//! of `n = a + b` slots each:
//!
//! | slot      | side 1                              | side 2                              |
//! |-----------|-------------------------------------|-------------------------------------|
//! | `0..a`    | `A[i]`                              |                                     |
//! | `0..b`    |                                     | `B[j]`                              |
//! | `a..a+b`  | diagonal projection of `B[j-a]`     |                                     |
//! | `b..b+a`  |                                     | diagonal projection of `A[i-b]`     |
//!
//! Edges are added in a fixed order:
//!
//! 1. `(i, j)` with weight `distance(A[i], B[j])`
//! 2. `(i, b+i)` with weight `distance_to_diagonal(A[i])`
//! 3. `(a+j, j)` with weight `distance_to_diagonal(B[j])`
//! 4. `(a+j, b+i)` with weight `0`
//!
//! The zero-weight edges between diagonal projections guarantee that a perfect matching
//! exists once every edge is allowed.

use derive_getters::{Dissolve, Getters};
use itertools::{iproduct, Itertools};
use ordered_float::OrderedFloat;

use crate::diagrams::PersistenceDiagram;
use crate::intervals::{distance, distance_to_diagonal};


/// An edge from slot `source` on side 1 to slot `destination` on side 2
#[derive(Clone, Copy, Debug, PartialEq, Getters)]
pub struct WeightedEdge {
    source:         usize,
    destination:    usize,
    weight:         f64,
}

impl WeightedEdge {
    pub fn new( source: usize, destination: usize, weight: f64 ) -> Self {
        WeightedEdge { source, destination, weight }
    }
}


/// A weighted bipartite graph with two partitions of equal size
///
/// Besides the edges, the graph records the weight of every edge it holds; the sorted,
/// deduplicated list of these weights is the set of candidate thresholds for a
/// bottleneck matching.
#[derive(Clone, Debug, Getters, Dissolve)]
pub struct AugmentedBipartiteGraph {
    partition_size:     usize,
    edges:              Vec< WeightedEdge >,
}

impl AugmentedBipartiteGraph {

    /// An edgeless graph with `partition_size` slots on each side
    pub fn new( partition_size: usize ) -> Self {
        AugmentedBipartiteGraph { partition_size, edges: Vec::new() }
    }

    /// Add an edge from side-1 slot `source` to side-2 slot `destination`
    ///
    /// Slots are not checked against the partition size.
    pub fn add_edge( &mut self, source: usize, destination: usize, weight: f64 ) {
        self.edges.push( WeightedEdge { source, destination, weight } );
    }

    /// Build the augmented bipartite graph of two persistence diagrams
    ///
    /// See the [module documentation](self) for the slot layout and the edge order.
    /// Never fails; two empty diagrams produce a graph with no slots and no edges.
    pub fn from_diagrams( a: &PersistenceDiagram, b: &PersistenceDiagram ) -> Self {
        let a       =   a.intervals();
        let b       =   b.intervals();
        let ( size_a, size_b )  =   ( a.len(), b.len() );

        let mut graph   =   AugmentedBipartiteGraph::new( size_a + size_b );
        graph.edges.reserve( 2 * size_a * size_b + size_a + size_b );

        // point to point
        for ( i, j ) in iproduct!( 0 .. size_a, 0 .. size_b ) {
            graph.add_edge( i, j, distance( &a[i], &b[j] ) );
        }
        // point of A to the diagonal
        for ( i, interval ) in a.iter().enumerate() {
            graph.add_edge( i, size_b + i, distance_to_diagonal( interval ) );
        }
        // point of B to the diagonal
        for ( j, interval ) in b.iter().enumerate() {
            graph.add_edge( size_a + j, j, distance_to_diagonal( interval ) );
        }
        // diagonal to diagonal
        for ( i, j ) in iproduct!( 0 .. size_a, 0 .. size_b ) {
            graph.add_edge( size_a + j, size_b + i, 0.0 );
        }

        graph
    }

    /// The distinct edge weights, in strictly ascending order
    ///
    /// Weights are ordered by [`OrderedFloat`], so `+infinity` (if present) is last.
    pub fn candidate_weights( &self ) -> Vec< f64 > {
        self.edges.iter()
            .map( |edge| OrderedFloat( edge.weight ) )
            .sorted()
            .dedup()
            .map( OrderedFloat::into_inner )
            .collect_vec()
    }

    /// The edges of weight `<= threshold`, in insertion order
    pub fn edges_below( &self, threshold: f64 ) -> impl Iterator< Item = &WeightedEdge > + '_ {
        self.edges.iter().filter( move |edge| edge.weight <= threshold )
    }

    /// A copy of this graph that keeps only the edges of weight `<= threshold`
    pub fn filter_by_maximum( &self, threshold: f64 ) -> Self {
        AugmentedBipartiteGraph {
            partition_size:     self.partition_size,
            edges:              self.edges_below( threshold ).cloned().collect_vec(),
        }
    }
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::Interval;

    fn diagram( pairs: Vec<(f64, f64)> ) -> PersistenceDiagram {
        PersistenceDiagram::from_pairs( pairs ).unwrap()
    }

    #[test]
    fn edges_follow_construction_order() {
        let a = diagram( vec![ (0.0, 2.0), (1.0, 2.0) ] );
        let b = diagram( vec![ (0.0, 4.0) ] );
        let graph = AugmentedBipartiteGraph::from_diagrams( &a, &b );

        assert_eq!( *graph.partition_size(), 3 );
        let edges = graph.edges().iter().map( |e| ( *e.source(), *e.destination(), *e.weight() ) ).collect_vec();
        assert_eq!(
            edges,
            vec![
                ( 0, 0, 2.0 ),      // A[0] - B[0]
                ( 1, 0, 2.0 ),      // A[1] - B[0]
                ( 0, 1, 1.0 ),      // A[0] - diagonal
                ( 1, 2, 0.5 ),      // A[1] - diagonal
                ( 2, 0, 2.0 ),      // B[0] - diagonal
                ( 2, 1, 0.0 ),      // diagonal - diagonal
                ( 2, 2, 0.0 ),
            ]
        );
    }

    #[test]
    fn candidate_weights_are_sorted_and_distinct() {
        let a = diagram( vec![ (0.0, 2.0), (1.0, 2.0), (0.0, f64::INFINITY) ] );
        let b = diagram( vec![ (0.0, 4.0) ] );
        let graph = AugmentedBipartiteGraph::from_diagrams( &a, &b );
        assert_eq!( graph.candidate_weights(), vec![ 0.0, 0.5, 1.0, 2.0, f64::INFINITY ] );
    }

    #[test]
    fn empty_diagrams() {
        let empty = PersistenceDiagram::new();
        let graph = AugmentedBipartiteGraph::from_diagrams( &empty, &empty );
        assert_eq!( *graph.partition_size(), 0 );
        assert!( graph.edges().is_empty() );
        assert!( graph.candidate_weights().is_empty() );

        // one-sided: only the diagonal edges of A
        let a = PersistenceDiagram::from( vec![ Interval::finite(0.0, 1.0), Interval::finite(0.0, 3.0) ] );
        let graph = AugmentedBipartiteGraph::from_diagrams( &a, &empty );
        assert_eq!( graph.edges().len(), 2 );
        assert_eq!( graph.candidate_weights(), vec![ 0.5, 1.5 ] );
    }

    #[test]
    fn filter_by_maximum_drops_heavy_edges() {
        let a = diagram( vec![ (0.0, 2.0) ] );
        let b = diagram( vec![ (0.0, 4.0) ] );
        let graph = AugmentedBipartiteGraph::from_diagrams( &a, &b );
        let filtered = graph.filter_by_maximum( 1.0 );
        assert_eq!( *filtered.partition_size(), 2 );
        assert!( filtered.edges().iter().all( |edge| *edge.weight() <= 1.0 ) );
        assert_eq!( filtered.edges().len(), graph.edges_below( 1.0 ).count() );
        assert_eq!( filtered.edges().len(), 2 );
    }
}
