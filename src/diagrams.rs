//! Persistence diagrams
//!
//! A [`PersistenceDiagram`] is an ordered multiset of [`Interval`]s for a single
//! homology dimension.  Duplicate intervals are meaningful: two classes with the same
//! birth and death are two distinct points of the diagram.

use derive_getters::{Dissolve, Getters};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{BottleneckError, Result};
use crate::intervals::{distance_to_diagonal, Interval};


/// An ordered multiset of persistence intervals
///
/// Serializes as a JSON list of `[birth, death]` pairs, with `null` for a death that
/// never occurs.
///
/// ```
/// use oat_bottleneck::diagrams::PersistenceDiagram;
///
/// let diagram = PersistenceDiagram::from_json_str( "[[0.0, 1.0], [0.5, null]]" ).unwrap();
/// assert_eq!( diagram.len(), 2 );
/// assert!( diagram.intervals()[1].is_right_infinite() );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Getters, Dissolve)]
#[serde(transparent)]
pub struct PersistenceDiagram {
    intervals:  Vec< Interval >,
}

impl PersistenceDiagram {

    /// An empty diagram
    pub fn new() -> Self {
        PersistenceDiagram { intervals: Vec::new() }
    }

    /// Build a diagram from `(birth, death)` pairs, with `f64::INFINITY` for deaths that never occur
    ///
    /// # Errors
    ///
    /// Returns an error if any pair fails the checks of [`Interval::new`].
    pub fn from_pairs< I >( pairs: I ) -> Result< Self >
        where I: IntoIterator< Item = (f64, f64) >
    {
        let intervals   =   pairs.into_iter()
                                .map( |(birth, death)| Interval::new( birth, death ) )
                                .collect::< Result< Vec<_> > >()?;
        Ok( PersistenceDiagram { intervals } )
    }

    /// Parse a diagram from a JSON list of `[birth, death]` pairs
    pub fn from_json_str( json: &str ) -> Result< Self > {
        Ok( serde_json::from_str( json )? )
    }

    /// Write the diagram as a JSON list of `[birth, death]` pairs
    pub fn to_json_string( &self ) -> Result< String > {
        Ok( serde_json::to_string( self )? )
    }

    pub fn push( &mut self, interval: Interval ) {
        self.intervals.push( interval );
    }

    pub fn len( &self ) -> usize {
        self.intervals.len()
    }

    pub fn is_empty( &self ) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter( &self ) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// The birth-death pairs as `(f64,f64)`, with `f64::INFINITY` for right-infinite intervals
    pub fn pairs_f64( &self ) -> Vec< (f64, f64) > {
        self.intervals.iter().map( Interval::interval_f64 ).collect_vec()
    }

    /// The largest distance from any point of the diagram to the diagonal; `0.0` for an empty diagram
    ///
    /// This is the bottleneck distance between `self` and the empty diagram.
    pub fn max_distance_to_diagonal( &self ) -> f64 {
        self.intervals.iter()
            .map( distance_to_diagonal )
            .fold( 0.0, f64::max )
    }

    /// Clamp every interval into the window `[lower, upper]`
    ///
    /// Right-infinite intervals become finite intervals that die at `upper`.  The
    /// number and order of intervals is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BottleneckError::InvalidWindow`] unless `lower` and `upper` are finite
    /// and `lower <= upper`.
    pub fn truncate( &self, lower: f64, upper: f64 ) -> Result< Self > {
        if ! ( lower.is_finite() && upper.is_finite() && lower <= upper ) {
            return Err( BottleneckError::InvalidWindow { lower, upper } )
        }
        let intervals   =   self.intervals.iter()
                                .map( |interval| interval.truncate( lower, upper ) )
                                .collect_vec();
        Ok( PersistenceDiagram { intervals } )
    }

    /// Keep the `n` intervals farthest from the diagonal
    ///
    /// Every interval whose distance to the diagonal is at least the `n`th largest such
    /// distance is kept, so ties may leave more than `n` intervals.  A diagram with at
    /// most `n` intervals is returned unchanged.  Relative order is preserved.
    pub fn filter_largest( &self, n: usize ) -> Self {
        if self.len() <= n {
            return self.clone()
        }
        if n == 0 {
            return PersistenceDiagram::new()
        }
        let sorted      =   self.intervals.iter()
                                .map( |interval| OrderedFloat( distance_to_diagonal( interval ) ) )
                                .sorted()
                                .collect_vec();
        let cutoff      =   sorted[ sorted.len() - n ];
        let intervals   =   self.intervals.iter()
                                .filter( |interval| OrderedFloat( distance_to_diagonal( interval ) ) >= cutoff )
                                .cloned()
                                .collect_vec();
        PersistenceDiagram { intervals }
    }
}

impl From< Vec< Interval > > for PersistenceDiagram {
    fn from( intervals: Vec< Interval > ) -> Self {
        PersistenceDiagram { intervals }
    }
}

impl FromIterator< Interval > for PersistenceDiagram {
    fn from_iter< T: IntoIterator< Item = Interval > >( iter: T ) -> Self {
        PersistenceDiagram { intervals: iter.into_iter().collect() }
    }
}

impl< 'a > IntoIterator for &'a PersistenceDiagram {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter( self ) -> Self::IntoIter {
        self.intervals.iter()
    }
}




#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PersistenceDiagram {
        PersistenceDiagram::from_pairs( vec![ (0.0, 1.0), (0.0, 4.0), (1.0, 2.0), (0.5, f64::INFINITY) ] ).unwrap()
    }

    #[test]
    fn from_pairs_rejects_reversed_interval() {
        assert!( PersistenceDiagram::from_pairs( vec![ (0.0, 1.0), (2.0, 1.0) ] ).is_err() );
    }

    #[test]
    fn max_distance_to_diagonal() {
        assert_eq!( PersistenceDiagram::new().max_distance_to_diagonal(), 0.0 );
        let finite = PersistenceDiagram::from_pairs( vec![ (0.0, 1.0), (0.0, 4.0) ] ).unwrap();
        assert_eq!( finite.max_distance_to_diagonal(), 2.0 );
        assert_eq!( sample().max_distance_to_diagonal(), f64::INFINITY );
    }

    #[test]
    fn truncate_makes_everything_finite() {
        let truncated = sample().truncate( 0.0, 3.0 ).unwrap();
        assert_eq!( truncated.len(), 4 );
        assert!( truncated.iter().all( |interval| ! interval.is_right_infinite() ) );
        assert_eq!( truncated.intervals()[1], Interval::finite( 0.0, 3.0 ) );
        assert_eq!( truncated.intervals()[3], Interval::finite( 0.5, 3.0 ) );
        assert!( sample().truncate( 1.0, 0.0 ).is_err() );
        assert!( sample().truncate( 0.0, f64::INFINITY ).is_err() );
    }

    #[test]
    fn filter_largest_keeps_ties_and_order() {
        let diagram = sample();
        let top = diagram.filter_largest( 2 );
        assert_eq!( top.intervals(), &vec![ Interval::finite(0.0, 4.0), Interval::right_infinite(0.5) ] );

        // (0,1) and (1,2) tie for third place
        assert_eq!( diagram.filter_largest( 3 ).len(), 4 );
        assert_eq!( diagram.filter_largest( 10 ), diagram );
        assert!( diagram.filter_largest( 0 ).is_empty() );
    }

    #[test]
    fn json_round_trip_keeps_infinite_deaths() {
        let diagram = sample();
        let json = diagram.to_json_string().unwrap();
        assert_eq!( json, "[[0.0,1.0],[0.0,4.0],[1.0,2.0],[0.5,null]]" );
        assert_eq!( PersistenceDiagram::from_json_str( &json ).unwrap(), diagram );
    }
}
