//! Python wrappers for intervals and bottleneck distances
//!
//! Diagrams cross the Python boundary as lists of `(birth, death)` tuples.  Use
//! `float("inf")` (or `numpy.inf`) for a death that never occurs.

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use itertools::Itertools;

use crate::bottleneck::{self, MatchedPair};
use crate::diagrams::PersistenceDiagram;
use crate::error::BottleneckError;
use crate::intervals::{self, Interval};
use crate::options::ComparisonOptions;


impl From< BottleneckError > for PyErr {
    fn from( err: BottleneckError ) -> PyErr {
        match err {
            BottleneckError::NoPerfectMatching { .. } => PyRuntimeError::new_err( format!(
                "{}. This indicates a defect in OAT; please report it to the developers.", err
            )),
            _ => PyValueError::new_err( err.to_string() ),
        }
    }
}

fn diagram_from_pairs( pairs: Vec< (f64, f64) > ) -> PyResult< PersistenceDiagram > {
    Ok( PersistenceDiagram::from_pairs( pairs )? )
}




#[pyclass(name = "Interval")]
#[derive(Clone)]
pub struct IntervalPython {
    interval: Interval,
}

#[pymethods]
impl IntervalPython {

    /// Create a new `Interval` instance
    ///
    /// # Arguments
    ///
    /// - `birth`: a finite `float`
    /// - `death`: a `float` no smaller than `birth`; defaults to `inf`, for a class that never dies
    ///
    /// # Returns
    ///
    /// A new `Interval`, or an error if the endpoints do not describe an interval.
    #[new]
    #[pyo3(signature = (birth, death=f64::INFINITY))]
    pub fn new( birth: f64, death: f64 ) -> PyResult< Self > {
        Ok( IntervalPython { interval: Interval::new( birth, death )? } )
    }

    pub fn birth( &self ) -> f64 {
        self.interval.birth()
    }

    /// Returns the death of the interval, `inf` if the class never dies
    pub fn death( &self ) -> f64 {
        self.interval.death()
    }

    pub fn is_right_infinite( &self ) -> bool {
        self.interval.is_right_infinite()
    }

    /// Returns `death - birth`
    pub fn persistence( &self ) -> f64 {
        self.interval.persistence()
    }

    /// L-infinity distance to another interval; `inf` unless both are finite or both are right-infinite
    pub fn distance( &self, other: PyRef< '_, IntervalPython > ) -> f64 {
        intervals::distance( &self.interval, &other.interval )
    }

    /// L-infinity distance to the diagonal; half the length of a finite interval, `inf` otherwise
    pub fn distance_to_diagonal( &self ) -> f64 {
        intervals::distance_to_diagonal( &self.interval )
    }

    fn __repr__( &self ) -> String {
        format!(
            "<Interval birth={:.6} | death={:.6}>",
            self.interval.birth(),
            self.interval.death()
        )
    }

    fn __str__( &self ) -> String {
        format!( "[{}, {})", self.interval.birth(), self.interval.death() )
    }
}



/// Bottleneck distance between two persistence diagrams
///
/// # Arguments
///
/// - `diagram_a`, `diagram_b`: lists of `(birth, death)` tuples for the same homology dimension
///
/// # Returns
///
/// A nonnegative `float`; `inf` if the diagrams have different numbers of intervals that never die.
///
/// # Errors
///
/// Raises `ValueError` if some tuple has `birth > death`, a `nan`, or an infinite birth.
#[pyfunction]
#[pyo3(name = "bottleneck_distance")]
pub fn bottleneck_distance_python(
        py:         Python< '_ >,
        diagram_a:  Vec< (f64, f64) >,
        diagram_b:  Vec< (f64, f64) >,
    )
    -> PyResult< f64 >
{
    let diagram_a   =   diagram_from_pairs( diagram_a )?;
    let diagram_b   =   diagram_from_pairs( diagram_b )?;
    let distance    =   py.allow_threads( || bottleneck::bottleneck_distance( &diagram_a, &diagram_b ) )?;
    Ok( distance )
}


/// Bottleneck distance between two persistence diagrams, with an optimal matching
///
/// Returns: a pair `(distance, matching)`, where `matching` is a dictionary of columns (ready
/// for `pandas.DataFrame`) with one row per matched pair:
///
/// - `index_a`: position of the interval in `diagram_a`, or `None` if the pair is a point of `diagram_b` matched to the diagonal
/// - `index_b`: position of the interval in `diagram_b`, or `None` if the pair is a point of `diagram_a` matched to the diagonal
/// - `birth_a`, `death_a`, `birth_b`, `death_b`: endpoints of the matched intervals, `None` for the diagonal
/// - `cost`: L-infinity distance between the members of the pair
#[pyfunction]
#[pyo3(name = "bottleneck_matching")]
pub fn bottleneck_matching_python< 'py >(
        py:         Python< 'py >,
        diagram_a:  Vec< (f64, f64) >,
        diagram_b:  Vec< (f64, f64) >,
    )
    -> PyResult< ( f64, Bound< 'py, PyDict > ) >
{
    let diagram_a   =   diagram_from_pairs( diagram_a )?;
    let diagram_b   =   diagram_from_pairs( diagram_b )?;
    let matching    =   py.allow_threads( || bottleneck::bottleneck_matching( &diagram_a, &diagram_b ) )?;

    let pairs       =   matching.pairs();
    let interval_a  =   |pair: &MatchedPair| pair.index_a().map( |i| diagram_a.intervals()[i] );
    let interval_b  =   |pair: &MatchedPair| pair.index_b().map( |j| diagram_b.intervals()[j] );

    let dict = PyDict::new( py );
    dict.set_item( "index_a",
        pairs.iter().map( MatchedPair::index_a ).collect_vec() )?;
    dict.set_item( "index_b",
        pairs.iter().map( MatchedPair::index_b ).collect_vec() )?;
    dict.set_item( "birth_a",
        pairs.iter().map( |pair| interval_a( pair ).map( |x| x.birth() ) ).collect_vec() )?;
    dict.set_item( "death_a",
        pairs.iter().map( |pair| interval_a( pair ).map( |x| x.death() ) ).collect_vec() )?;
    dict.set_item( "birth_b",
        pairs.iter().map( |pair| interval_b( pair ).map( |x| x.birth() ) ).collect_vec() )?;
    dict.set_item( "death_b",
        pairs.iter().map( |pair| interval_b( pair ).map( |x| x.death() ) ).collect_vec() )?;
    dict.set_item( "cost",
        pairs.iter().map( MatchedPair::cost ).collect_vec() )?;

    Ok( ( *matching.distance(), dict ) )
}


/// Pairwise bottleneck distances between a list of persistence diagrams
///
/// # Arguments
///
/// - `diagrams`: a list of diagrams, each a list of `(birth, death)` tuples
/// - `truncate` (optional): a window `(lower, upper)`; every interval is clamped into the window before comparison
/// - `keep_largest` (optional): keep only the `keep_largest` intervals farthest from the diagonal (ties are kept)
/// - `show_progress`: display a progress bar
///
/// Returns: a symmetric matrix, as a list of lists, with zeros on the diagonal.
#[pyfunction]
#[pyo3(name = "bottleneck_distance_matrix", signature = (diagrams, truncate=None, keep_largest=None, show_progress=false))]
pub fn bottleneck_distance_matrix_python(
        py:             Python< '_ >,
        diagrams:       Vec< Vec< (f64, f64) > >,
        truncate:       Option< (f64, f64) >,
        keep_largest:   Option< usize >,
        show_progress:  bool,
    )
    -> PyResult< Vec< Vec< f64 > > >
{
    let diagrams    =   diagrams.into_iter()
                            .map( diagram_from_pairs )
                            .collect::< PyResult< Vec<_> > >()?;
    let options     =   ComparisonOptions { truncate, keep_largest, show_progress };
    let matrix      =   py.allow_threads( || bottleneck::bottleneck_distance_matrix( &diagrams, &options ) )?;
    Ok( matrix )
}


/// Clamp every interval of a diagram into the window `[lower, upper]`
///
/// Intervals that never die end at `upper`.  Returns a new list of `(birth, death)` tuples.
#[pyfunction]
#[pyo3(name = "truncate_diagram")]
pub fn truncate_diagram_python( diagram: Vec< (f64, f64) >, lower: f64, upper: f64 ) -> PyResult< Vec< (f64, f64) > > {
    Ok( diagram_from_pairs( diagram )?.truncate( lower, upper )?.pairs_f64() )
}


/// Keep the `n` intervals of a diagram that lie farthest from the diagonal
///
/// Intervals tied with the `n`th farthest are also kept.  Order is preserved.
#[pyfunction]
#[pyo3(name = "filter_largest")]
pub fn filter_largest_python( diagram: Vec< (f64, f64) >, n: usize ) -> PyResult< Vec< (f64, f64) > > {
    Ok( diagram_from_pairs( diagram )?.filter_largest( n ).pairs_f64() )
}




#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_python_exceptions() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil( |py| {
            let err: PyErr = BottleneckError::InvalidInterval { birth: 1.0, death: 0.0 }.into();
            assert!( err.is_instance_of::< PyValueError >( py ) );
            let err: PyErr = BottleneckError::NoPerfectMatching { threshold: 1.0 }.into();
            assert!( err.is_instance_of::< PyRuntimeError >( py ) );
        });
    }

    #[test]
    fn wrappers_agree_with_rust() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil( |py| {
            let a = vec![ (0.0, 1.0), (0.0, 3.0) ];
            let b = vec![ (0.0, 1.0) ];
            assert_eq!( bottleneck_distance_python( py, a.clone(), b.clone() ).unwrap(), 1.5 );

            let ( distance, dict ) = bottleneck_matching_python( py, a, b ).unwrap();
            assert_eq!( distance, 1.5 );
            let cost: Vec< f64 > = dict.get_item( "cost" ).unwrap().unwrap().extract().unwrap();
            assert_eq!( cost.len(), 2 );
            assert!( cost.iter().all( |&c| c <= 1.5 ) );

            assert!( bottleneck_distance_python( py, vec![ (2.0, 1.0) ], vec![] ).is_err() );
        });
    }

    #[test]
    fn interval_class() {
        let interval = IntervalPython::new( 0.0, 2.0 ).unwrap();
        assert_eq!( interval.distance_to_diagonal(), 1.0 );
        assert_eq!( interval.__str__(), "[0, 2)" );
        assert!( IntervalPython::new( 0.0, f64::INFINITY ).unwrap().is_right_infinite() );
        assert!( IntervalPython::new( 3.0, 2.0 ).is_err() );
    }

    #[test]
    fn preprocessing_functions() {
        let diagram = vec![ (0.0, 1.0), (0.0, 3.0), (0.5, f64::INFINITY) ];
        assert_eq!(
            truncate_diagram_python( diagram.clone(), 0.0, 2.0 ).unwrap(),
            vec![ (0.0, 1.0), (0.0, 2.0), (0.5, 2.0) ]
        );
        assert_eq!( filter_largest_python( diagram, 1 ).unwrap(), vec![ (0.5, f64::INFINITY) ] );
    }
}
