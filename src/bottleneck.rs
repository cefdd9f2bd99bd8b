//! Bottleneck distance between persistence diagrams
//!
//! The bottleneck distance between diagrams `A` and `B` is the smallest `θ` such that the
//! points of `A` and `B` can be paired off, each point being matched either to a point of
//! the other diagram or to the diagonal, with every pair at L-infinity distance `<= θ`.
//!
//! The optimal `θ` is always one of the edge weights of the
//! [augmented bipartite graph](crate::bipartite) of `A` and `B`.  We sort these weights,
//! then binary search for the smallest one at which the graph, restricted to edges of at
//! most that weight, has a perfect matching.
//!
//! ```
//! use oat_bottleneck::diagrams::PersistenceDiagram;
//! use oat_bottleneck::bottleneck::bottleneck_distance;
//!
//! let a = PersistenceDiagram::from_pairs( vec![ (0.0, 1.0), (0.0, 3.0) ] ).unwrap();
//! let b = PersistenceDiagram::from_pairs( vec![ (0.0, 1.0) ] ).unwrap();
//!
//! // (0,1) matches itself; (0,3) is sent to the diagonal at cost 1.5
//! assert_eq!( bottleneck_distance( &a, &b ).unwrap(), 1.5 );
//! ```
//!
//! # Infinite intervals
//!
//! A right-infinite interval is infinitely far from every finite interval and from the
//! diagonal.  If the two diagrams carry different numbers of right-infinite intervals, the
//! distance is `f64::INFINITY`; otherwise right-infinite intervals are matched among
//! themselves by birth and the distance is finite.

use derive_getters::{Dissolve, Getters};
use indicatif::ProgressBar;
use itertools::Itertools;
use log::{debug, trace};

use crate::bipartite::AugmentedBipartiteGraph;
use crate::diagrams::PersistenceDiagram;
use crate::error::{BottleneckError, Result};
use crate::intervals::{distance, distance_to_diagonal};
use crate::matching::{has_perfect_matching, maximum_matching};
use crate::options::ComparisonOptions;


/// The smallest edge weight `θ` such that the edges of weight `<= θ` contain a perfect matching
///
/// Returns `0.0` for a graph with no edges.
///
/// # Errors
///
/// Returns [`BottleneckError::NoPerfectMatching`] if there is no perfect matching even when
/// every edge is allowed.  This cannot happen for a graph built by
/// [`AugmentedBipartiteGraph::from_diagrams`].
pub fn perfect_matching_threshold( graph: &AugmentedBipartiteGraph ) -> Result< f64 > {
    let weights = graph.candidate_weights();
    let Some( &maximum ) = weights.last() else {
        return Ok( 0.0 )
    };

    if ! has_perfect_matching( graph, maximum ) {
        return Err( BottleneckError::NoPerfectMatching { threshold: maximum } )
    }
    if weights.len() == 1 {
        return Ok( maximum )
    }
    if has_perfect_matching( graph, weights[0] ) {
        return Ok( weights[0] )
    }

    // weights[ minimum_valid_index ] admits a perfect matching, weights[ maximum_invalid_index ] does not
    let mut minimum_valid_index     =   weights.len() - 1;
    let mut maximum_invalid_index   =   0;
    while minimum_valid_index > maximum_invalid_index + 1 {
        let current_index   =   ( maximum_invalid_index + minimum_valid_index ) / 2;
        let feasible        =   has_perfect_matching( graph, weights[ current_index ] );
        trace!( "threshold {} (candidate {} of {}): perfect matching {}", weights[ current_index ], current_index, weights.len(), feasible );
        if feasible {
            minimum_valid_index     =   current_index;
        } else {
            maximum_invalid_index   =   current_index;
        }
    }
    Ok( weights[ minimum_valid_index ] )
}


/// Bottleneck distance between two persistence diagrams
///
/// # Arguments
///
/// - `a`, `b`: diagrams for the same homology dimension; interval order does not affect the result
///
/// # Returns
///
/// A nonnegative number, `f64::INFINITY` when the diagrams have different numbers of
/// right-infinite intervals.
///
/// # Errors
///
/// Returns [`BottleneckError::NoPerfectMatching`] only if the matching solver is defective.
pub fn bottleneck_distance( a: &PersistenceDiagram, b: &PersistenceDiagram ) -> Result< f64 > {
    let graph       =   AugmentedBipartiteGraph::from_diagrams( a, b );
    debug!( "bottleneck distance: {} x {} intervals, {} edges", a.len(), b.len(), graph.edges().len() );
    let distance    =   perfect_matching_threshold( &graph )?;
    debug!( "bottleneck distance: {}", distance );
    Ok( distance )
}




/// One pair of an optimal bottleneck matching
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchedPair {
    /// Interval `a` of the first diagram is matched to interval `b` of the second
    Points { a: usize, b: usize, cost: f64 },
    /// Interval `a` of the first diagram is matched to the diagonal
    DiagonalA { a: usize, cost: f64 },
    /// Interval `b` of the second diagram is matched to the diagonal
    DiagonalB { b: usize, cost: f64 },
}

impl MatchedPair {
    /// L-infinity distance between the two members of the pair
    pub fn cost( &self ) -> f64 {
        match self {
            MatchedPair::Points { cost, .. }
            | MatchedPair::DiagonalA { cost, .. }
            | MatchedPair::DiagonalB { cost, .. } => *cost,
        }
    }

    /// Index into the first diagram, if the pair involves one of its intervals
    pub fn index_a( &self ) -> Option< usize > {
        match self {
            MatchedPair::Points { a, .. } | MatchedPair::DiagonalA { a, .. } => Some( *a ),
            MatchedPair::DiagonalB { .. } => None,
        }
    }

    /// Index into the second diagram, if the pair involves one of its intervals
    pub fn index_b( &self ) -> Option< usize > {
        match self {
            MatchedPair::Points { b, .. } | MatchedPair::DiagonalB { b, .. } => Some( *b ),
            MatchedPair::DiagonalA { .. } => None,
        }
    }
}


/// The bottleneck distance together with a matching that realizes it
///
/// `pairs` accounts for every interval of both diagrams exactly once; pairs of diagonal
/// points are not listed.  Every pair costs at most `distance`.
#[derive(Clone, Debug, Getters, Dissolve)]
pub struct BottleneckMatching {
    distance:   f64,
    pairs:      Vec< MatchedPair >,
}

/// Bottleneck distance between two persistence diagrams, with an optimal matching
///
/// # Errors
///
/// As for [`bottleneck_distance`].
pub fn bottleneck_matching( a: &PersistenceDiagram, b: &PersistenceDiagram ) -> Result< BottleneckMatching > {
    let graph       =   AugmentedBipartiteGraph::from_diagrams( a, b );
    let threshold   =   perfect_matching_threshold( &graph )?;

    let ( a, b )    =   ( a.intervals(), b.intervals() );
    let pairs       =   maximum_matching( &graph, threshold )
                            .into_iter()
                            .filter_map( |( slot_1, slot_2 )| {
                                match ( slot_1 < a.len(), slot_2 < b.len() ) {
                                    ( true, true )      =>  Some( MatchedPair::Points { a: slot_1, b: slot_2, cost: distance( &a[slot_1], &b[slot_2] ) } ),
                                    ( true, false )     =>  Some( MatchedPair::DiagonalA { a: slot_1, cost: distance_to_diagonal( &a[slot_1] ) } ),
                                    ( false, true )     =>  Some( MatchedPair::DiagonalB { b: slot_2, cost: distance_to_diagonal( &b[slot_2] ) } ),
                                    ( false, false )    =>  None,
                                }
                            })
                            .collect_vec();
    debug!( "bottleneck matching: distance {}, {} pairs", threshold, pairs.len() );
    Ok( BottleneckMatching { distance: threshold, pairs } )
}




/// Pairwise bottleneck distances between a collection of diagrams
///
/// Each diagram is first preprocessed according to `options`.  The result is a symmetric
/// matrix with zeros on the diagonal; each unordered pair is computed once.
///
/// # Errors
///
/// Returns the first error met while preprocessing or comparing diagrams.
pub fn bottleneck_distance_matrix(
        diagrams:   &[ PersistenceDiagram ],
        options:    &ComparisonOptions,
    )
    -> Result< Vec< Vec< f64 > > >
{
    let prepared        =   diagrams.iter()
                                .map( |diagram| options.prepare( diagram ) )
                                .collect::< Result< Vec<_> > >()?;
    let count           =   prepared.len();

    let progress_bar    =   if options.show_progress {
                                ProgressBar::new( ( count * count.saturating_sub( 1 ) / 2 ) as u64 )
                            } else {
                                ProgressBar::hidden()
                            };

    let mut matrix      =   vec![ vec![ 0.0; count ]; count ];
    for ( i, j ) in ( 0 .. count ).tuple_combinations() {
        let distance    =   bottleneck_distance( &prepared[i], &prepared[j] )?;
        matrix[i][j]    =   distance;
        matrix[j][i]    =   distance;
        progress_bar.inc( 1 );
    }
    progress_bar.finish_and_clear();
    Ok( matrix )
}




#[cfg(test)]
mod tests {
    use super::*;
    use crate::intervals::Interval;

    fn diagram( pairs: Vec<(f64, f64)> ) -> PersistenceDiagram {
        PersistenceDiagram::from_pairs( pairs ).unwrap()
    }

    #[test]
    fn threshold_of_edgeless_graph() {
        assert_eq!( perfect_matching_threshold( &AugmentedBipartiteGraph::new( 0 ) ).unwrap(), 0.0 );
    }

    #[test]
    fn threshold_of_unmatchable_graph() {
        // slot 1 on side 1 has no edges at all
        let mut graph = AugmentedBipartiteGraph::new( 2 );
        graph.add_edge( 0, 0, 1.0 );
        graph.add_edge( 0, 1, 2.0 );
        match perfect_matching_threshold( &graph ) {
            Err( BottleneckError::NoPerfectMatching { threshold } ) => assert_eq!( threshold, 2.0 ),
            other => panic!( "expected NoPerfectMatching, got {:?}", other ),
        }
    }

    #[test]
    fn threshold_of_single_weight_graph() {
        let mut graph = AugmentedBipartiteGraph::new( 2 );
        graph.add_edge( 0, 1, 0.5 );
        graph.add_edge( 1, 0, 0.5 );
        assert_eq!( graph.candidate_weights(), vec![ 0.5 ] );
        assert_eq!( perfect_matching_threshold( &graph ).unwrap(), 0.5 );
    }

    #[test]
    fn threshold_binary_search() {
        // a hand-built graph whose only perfect matching uses the edge of weight 3
        let mut graph = AugmentedBipartiteGraph::new( 2 );
        graph.add_edge( 0, 0, 1.0 );
        graph.add_edge( 1, 0, 2.0 );
        graph.add_edge( 1, 1, 3.0 );
        graph.add_edge( 0, 1, 4.0 );
        graph.add_edge( 0, 0, 5.0 );
        assert_eq!( perfect_matching_threshold( &graph ).unwrap(), 3.0 );
    }

    #[test]
    fn scenarios() {
        let empty = PersistenceDiagram::new();
        assert_eq!( bottleneck_distance( &diagram( vec![(0.0, 1.0)] ), &diagram( vec![(0.0, 1.0)] ) ).unwrap(), 0.0 );
        assert_eq!( bottleneck_distance( &diagram( vec![(0.0, 2.0)] ), &empty ).unwrap(), 1.0 );
        assert_eq!( bottleneck_distance( &empty, &empty ).unwrap(), 0.0 );
        assert_eq!(
            bottleneck_distance( &diagram( vec![(0.0, 1.0), (0.0, 2.0)] ), &diagram( vec![(0.0, 1.0)] ) ).unwrap(),
            1.0
        );
    }

    #[test]
    fn infinite_intervals() {
        let finite      =   diagram( vec![ (0.0, 5.0) ] );
        let infinite    =   PersistenceDiagram::from( vec![ Interval::right_infinite( 0.0 ) ] );
        assert_eq!( bottleneck_distance( &finite, &infinite ).unwrap(), f64::INFINITY );

        let shifted     =   PersistenceDiagram::from( vec![ Interval::right_infinite( 0.5 ), Interval::finite( 0.0, 1.0 ) ] );
        assert_eq!( bottleneck_distance( &infinite, &shifted ).unwrap(), 0.5 );
    }

    #[test]
    fn matching_accounts_for_every_interval() {
        let a = diagram( vec![ (0.0, 1.0), (0.0, 3.0), (2.0, 2.5) ] );
        let b = diagram( vec![ (0.1, 1.1), (5.0, 5.2) ] );
        let matching = bottleneck_matching( &a, &b ).unwrap();

        assert_eq!( *matching.distance(), bottleneck_distance( &a, &b ).unwrap() );
        assert_eq!( *matching.distance(), 1.5 );
        assert!( matching.pairs().iter().all( |pair| pair.cost() <= *matching.distance() ) );

        let seen_a = matching.pairs().iter().filter_map( MatchedPair::index_a ).sorted().collect_vec();
        let seen_b = matching.pairs().iter().filter_map( MatchedPair::index_b ).sorted().collect_vec();
        assert_eq!( seen_a, vec![ 0, 1, 2 ] );
        assert_eq!( seen_b, vec![ 0, 1 ] );
        assert!( matching.pairs().contains( &MatchedPair::DiagonalA { a: 1, cost: 1.5 } ) );
    }

    #[test]
    fn distance_matrix_is_symmetric() {
        let diagrams = vec![
            diagram( vec![ (0.0, 1.0) ] ),
            diagram( vec![ (0.0, 3.0) ] ),
            PersistenceDiagram::new(),
        ];
        let matrix = bottleneck_distance_matrix( &diagrams, &ComparisonOptions::default() ).unwrap();
        assert_eq!( matrix, vec![
            vec![ 0.0, 1.5, 0.5 ],
            vec![ 1.5, 0.0, 1.5 ],
            vec![ 0.5, 1.5, 0.0 ],
        ]);
        assert!( bottleneck_distance_matrix( &[], &ComparisonOptions::default() ).unwrap().is_empty() );
    }
}
