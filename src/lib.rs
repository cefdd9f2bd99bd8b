//! # Bottleneck distance for Open Applied Topology
//!
//! This package is part of the <span style="color: orange;">OAT ecosystem</span>.  It compares
//! persistence diagrams using the **bottleneck distance**, the most widely used metric on
//! the outputs of persistent homology.
//!
//! - [Persistence diagrams](#persistence-diagrams)
//! - [How the distance is computed](#how-the-distance-is-computed)
//! - [Python](#python)
//!
//! # Persistence diagrams
//!
//! A persistence diagram is a multiset of intervals `[birth, death)`, one for each homology
//! class in a fixed dimension.  Classes that never die have `death = +infinity`.  See
//! [`intervals`] and [`diagrams`].
//!
//! The bottleneck distance between two diagrams is the smallest `θ` such that every point
//! of each diagram can be matched, at L-infinity cost at most `θ`, either to a point of the
//! other diagram or to the diagonal.
//!
//! ```
//! use oat_bottleneck::diagrams::PersistenceDiagram;
//! use oat_bottleneck::bottleneck::bottleneck_distance;
//!
//! let a = PersistenceDiagram::from_pairs( vec![ (0.0, 2.0) ] ).unwrap();
//! let b = PersistenceDiagram::new();
//! assert_eq!( bottleneck_distance( &a, &b ).unwrap(), 1.0 );
//! ```
//!
//! # How the distance is computed
//!
//! 1. [`bipartite`] builds a complete weighted bipartite graph in which every point may be
//!    matched to a point of the other diagram or to its own diagonal projection.
//! 2. [`matching`] decides whether the edges below a threshold contain a perfect matching, by
//!    solving a unit-capacity flow problem with the Edmonds-Karp solver in [`max_flow`].
//! 3. [`bottleneck`] binary searches the sorted edge weights for the smallest feasible threshold.
//!
//! # Python
//!
//! The extension module exposes the submodule `bottleneck`, with the `Interval` class and
//! the functions `bottleneck_distance`, `bottleneck_matching`, `bottleneck_distance_matrix`,
//! `truncate_diagram` and `filter_largest`.  See [`python`].


pub mod bipartite;
pub mod bottleneck;
pub mod diagrams;
pub mod error;
pub mod intervals;
pub mod matching;
pub mod max_flow;
pub mod options;
pub mod python;

// ------------


use pyo3::prelude::*;

use python::{
    IntervalPython,
    bottleneck_distance_python,
    bottleneck_matching_python,
    bottleneck_distance_matrix_python,
    truncate_diagram_python,
    filter_largest_python,
};

pub use bottleneck::{bottleneck_distance, bottleneck_matching, bottleneck_distance_matrix};
pub use diagrams::PersistenceDiagram;
pub use error::BottleneckError;
pub use intervals::Interval;




/// This module contains the objects and functions exported from Rust.  It is called
/// ``core`` because Rust provides the most basic building blocks of this library.
/// **Rust does not need to be installed to use this module.**
///
/// This module contains the following submodules:
///
/// - ``bottleneck``: persistence intervals, and bottleneck distances between persistence diagrams.
#[pymodule(name="core")]
fn oat_bottleneck(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register_child_module_bottleneck(m)?;
    Ok(())
}


fn register_child_module_bottleneck(parent_module: &Bound<'_, PyModule>) -> PyResult<()> {
    let child_module = PyModule::new(parent_module.py(), "bottleneck")?;

    child_module.add_class::<IntervalPython>()?;
    child_module.add_function(wrap_pyfunction!(bottleneck_distance_python, &child_module)?)?;
    child_module.add_function(wrap_pyfunction!(bottleneck_matching_python, &child_module)?)?;
    child_module.add_function(wrap_pyfunction!(bottleneck_distance_matrix_python, &child_module)?)?;
    child_module.add_function(wrap_pyfunction!(truncate_diagram_python, &child_module)?)?;
    child_module.add_function(wrap_pyfunction!(filter_largest_python, &child_module)?)?;

    parent_module.add_submodule(&child_module)
}
