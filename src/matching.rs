//! Perfect matchings in a thresholded bipartite graph, via unit-capacity max flow
//!
//! For a graph with `n` slots per side and a threshold `θ`, the flow network has nodes
//!
//! - `0`: the source
//! - `1 ..= n`: side-1 slots
//! - `n+1 ..= 2n`: side-2 slots
//! - `2n+1`: the sink
//!
//! with unit-capacity edges source → every side-1 slot, every side-2 slot → sink, and
//! side-1 → side-2 for each graph edge of weight `<= θ`.  Edges above the threshold are
//! left out of the network entirely.  An integral maximum flow is a maximum matching, so
//! the graph has a perfect matching iff the flow equals `n`.
//!
//! A fresh network is built for every call.

use itertools::Itertools;

use crate::bipartite::AugmentedBipartiteGraph;
use crate::max_flow::{EdgeIndex, FlowNetwork};


/// A solved unit-capacity network, remembering which flow edge came from which graph edge
struct MatchingNetwork {
    network:        FlowNetwork< i64 >,
    slot_edges:     Vec< ( EdgeIndex, usize, usize ) >,
    cardinality:    usize,
}

impl MatchingNetwork {

    fn solve( graph: &AugmentedBipartiteGraph, threshold: f64 ) -> Self {
        let n           =   *graph.partition_size();
        let source      =   0;
        let sink        =   2 * n + 1;
        let side_1      =   |slot: usize| 1 + slot;
        let side_2      =   |slot: usize| 1 + n + slot;

        let mut network: FlowNetwork< i64 > = FlowNetwork::with_nodes( 2 * n + 2 );
        let slot_edges      =   graph.edges_below( threshold )
                                    .map( |edge| {
                                        let index = network.add_edge( side_1( *edge.source() ), side_2( *edge.destination() ), 1 );
                                        ( index, *edge.source(), *edge.destination() )
                                    })
                                    .collect_vec();
        for slot in 0 .. n {
            network.add_edge( source, side_1( slot ), 1 );
            network.add_edge( side_2( slot ), sink, 1 );
        }

        let flow            =   network.max_flow( source, sink );
        MatchingNetwork { network, slot_edges, cardinality: flow as usize }
    }
}


/// Size of a maximum matching that uses only edges of weight `<= threshold`
pub fn maximum_matching_cardinality( graph: &AugmentedBipartiteGraph, threshold: f64 ) -> usize {
    MatchingNetwork::solve( graph, threshold ).cardinality
}

/// `true` if the edges of weight `<= threshold` contain a matching that covers every slot on both sides
///
/// A graph with no slots trivially has a perfect matching.
pub fn has_perfect_matching( graph: &AugmentedBipartiteGraph, threshold: f64 ) -> bool {
    maximum_matching_cardinality( graph, threshold ) == *graph.partition_size()
}

/// A maximum matching among the edges of weight `<= threshold`
///
/// Returns `(side-1 slot, side-2 slot)` pairs, ordered by side-1 slot.
pub fn maximum_matching( graph: &AugmentedBipartiteGraph, threshold: f64 ) -> Vec< ( usize, usize ) > {
    let solved = MatchingNetwork::solve( graph, threshold );
    solved.slot_edges.iter()
        .filter( |( index, _, _ )| solved.network.flow( *index ) > 0 )
        .map( |&( _, source, destination )| ( source, destination ) )
        .sorted()
        .collect_vec()
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagrams::PersistenceDiagram;

    fn graph( a: Vec<(f64, f64)>, b: Vec<(f64, f64)> ) -> AugmentedBipartiteGraph {
        AugmentedBipartiteGraph::from_diagrams(
            & PersistenceDiagram::from_pairs( a ).unwrap(),
            & PersistenceDiagram::from_pairs( b ).unwrap(),
        )
    }

    #[test]
    fn threshold_controls_feasibility() {
        // A = (0,2), B = (0,3): matching the points costs 1, sending both to the diagonal costs 1.5
        let graph = graph( vec![ (0.0, 2.0) ], vec![ (0.0, 3.0) ] );
        assert!( ! has_perfect_matching( &graph, 0.5 ) );
        assert!( has_perfect_matching( &graph, 1.0 ) );
        assert!( has_perfect_matching( &graph, f64::INFINITY ) );
        assert_eq!( maximum_matching_cardinality( &graph, 0.5 ), 1 );
        assert_eq!( maximum_matching( &graph, 1.0 ), vec![ (0, 0), (1, 1) ] );
    }

    #[test]
    fn empty_graph_is_perfectly_matched() {
        let graph = graph( vec![], vec![] );
        assert!( has_perfect_matching( &graph, 0.0 ) );
        assert!( maximum_matching( &graph, 0.0 ).is_empty() );
    }

    #[test]
    fn matching_is_a_matching() {
        let graph = graph( vec![ (0.0, 1.0), (0.0, 3.0), (1.0, 2.0) ], vec![ (0.0, 1.0), (0.5, 2.5) ] );
        let pairs = maximum_matching( &graph, 10.0 );
        assert_eq!( pairs.len(), *graph.partition_size() );
        assert_eq!( pairs.iter().map( |p| p.0 ).unique().count(), pairs.len() );
        assert_eq!( pairs.iter().map( |p| p.1 ).unique().count(), pairs.len() );
    }

    #[test]
    fn filtered_graph_agrees_with_threshold() {
        let graph = graph( vec![ (0.0, 1.0), (0.0, 3.0) ], vec![ (0.0, 1.0) ] );
        for threshold in [ 0.0, 0.5, 1.0, 1.5 ] {
            assert_eq!(
                has_perfect_matching( &graph, threshold ),
                has_perfect_matching( &graph.filter_by_maximum( threshold ), f64::INFINITY ),
            );
        }
    }
}
