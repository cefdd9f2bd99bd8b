//! Persistence intervals and the L-infinity geometry of persistence diagrams
//!
//! A persistence interval `[birth, death)` records the filtration value at which a
//! homology class is born, and the value at which it dies.  Classes that never die
//! have `death = +infinity`; we call these *right-infinite*.
//!
//! Two distances matter for bottleneck matching:
//!
//! - [`distance`]: the L-infinity (Chebyshev) distance between two points of a diagram
//! - [`distance_to_diagonal`]: the cost of discarding a point as noise, i.e. the
//!   distance from `(birth, death)` to the nearest point of the diagonal `birth = death`
//!
//! ```
//! use oat_bottleneck::intervals::{Interval, distance, distance_to_diagonal};
//!
//! let a = Interval::finite(0.0, 2.0);
//! let b = Interval::finite(0.5, 3.0);
//! assert_eq!( distance(&a, &b), 1.0 );
//! assert_eq!( distance_to_diagonal(&a), 1.0 );
//!
//! // a class that never dies can only be matched to another class that never dies
//! let c = Interval::right_infinite(0.0);
//! assert_eq!( distance(&a, &c), f64::INFINITY );
//! assert_eq!( distance(&c, &Interval::right_infinite(0.25)), 0.25 );
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BottleneckError;


/// A point in a persistence diagram
///
/// Births are always finite.  Serializes as a pair `[birth, death]`, where `death`
/// is `null` for a right-infinite interval.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, Option<f64>)", into = "(f64, Option<f64>)")]
pub enum Interval {
    /// A class born at `birth` that dies at `death`
    Finite { birth: f64, death: f64 },
    /// A class born at `birth` that never dies
    RightInfinite { birth: f64 },
}

impl Interval {

    /// The interval `[birth, death)`, without the checks of [`Interval::new`]
    ///
    /// A `death` of `f64::INFINITY` gives the right-infinite interval, so that every lifespan
    /// has a single representation.  Endpoints must not be `NaN`.
    pub fn finite( birth: f64, death: f64 ) -> Self {
        debug_assert!( ! birth.is_nan() && ! death.is_nan(), "interval endpoints must not be NaN" );
        if death == f64::INFINITY {
            Interval::RightInfinite { birth }
        } else {
            Interval::Finite { birth, death }
        }
    }

    /// A right-infinite interval `[birth, +infinity)`
    pub fn right_infinite( birth: f64 ) -> Self {
        debug_assert!( ! birth.is_nan(), "interval endpoints must not be NaN" );
        Interval::RightInfinite { birth }
    }

    /// Create an interval from a birth-death pair, checking the endpoints
    ///
    /// # Arguments
    ///
    /// - `birth`: a finite number
    /// - `death`: a number `>= birth`; `f64::INFINITY` produces a right-infinite interval
    ///
    /// # Errors
    ///
    /// Returns [`BottleneckError::InvalidInterval`] if either endpoint is `NaN`, if `birth`
    /// is infinite, or if `birth > death`.
    pub fn new( birth: f64, death: f64 ) -> Result< Self, BottleneckError > {
        if birth.is_nan() || death.is_nan() || birth.is_infinite() || birth > death {
            return Err( BottleneckError::InvalidInterval { birth, death } )
        }
        if death == f64::INFINITY {
            Ok( Interval::RightInfinite { birth } )
        } else {
            Ok( Interval::Finite { birth, death } )
        }
    }

    /// The birth filtration value
    pub fn birth( &self ) -> f64 {
        match self {
            Interval::Finite { birth, .. } | Interval::RightInfinite { birth } => *birth,
        }
    }

    /// The death filtration value, `f64::INFINITY` for a right-infinite interval
    pub fn death( &self ) -> f64 {
        match self {
            Interval::Finite { death, .. } => *death,
            Interval::RightInfinite { .. } => f64::INFINITY,
        }
    }

    /// `true` if the class never dies
    pub fn is_right_infinite( &self ) -> bool {
        matches!( self, Interval::RightInfinite { .. } )
    }

    /// Length of the interval, `death - birth`
    pub fn persistence( &self ) -> f64 {
        self.death() - self.birth()
    }

    /// The birth-death pair as `(f64,f64)`
    pub fn interval_f64( &self ) -> (f64, f64) {
        ( self.birth(), self.death() )
    }

    /// Clamp this interval into the window `[lower, upper]`
    ///
    /// The result is always finite.  Right-infinite intervals die at `upper`; an
    /// interval lying entirely outside the window collapses to a zero-length interval
    /// on the nearest edge of the window.  The caller is responsible for `lower <= upper`.
    pub fn truncate( &self, lower: f64, upper: f64 ) -> Interval {
        let birth   =   self.birth().max( lower ).min( upper );
        let death   =   self.death().min( upper ).max( birth );
        Interval::Finite { birth, death }
    }
}

impl From<Interval> for (f64, Option<f64>) {
    fn from( interval: Interval ) -> Self {
        match interval {
            Interval::Finite { birth, death } => ( birth, Some(death) ),
            Interval::RightInfinite { birth } => ( birth, None ),
        }
    }
}

impl TryFrom<(f64, Option<f64>)> for Interval {
    type Error = BottleneckError;

    fn try_from( pair: (f64, Option<f64>) ) -> Result< Self, Self::Error > {
        Interval::new( pair.0, pair.1.unwrap_or( f64::INFINITY ) )
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = BottleneckError;

    fn try_from( pair: (f64, f64) ) -> Result< Self, Self::Error > {
        Interval::new( pair.0, pair.1 )
    }
}




/// L-infinity distance between two points of a persistence diagram
///
/// - two finite intervals: `max( |birth_i - birth_j|, |death_i - death_j| )`
/// - two right-infinite intervals: `|birth_i - birth_j|`
/// - a finite and a right-infinite interval: `+infinity`
pub fn distance( a: &Interval, b: &Interval ) -> f64 {
    match ( a, b ) {
        ( Interval::Finite { birth: b0, death: d0 }, Interval::Finite { birth: b1, death: d1 } ) => {
            ( b0 - b1 ).abs().max( ( d0 - d1 ).abs() )
        }
        ( Interval::RightInfinite { birth: b0 }, Interval::RightInfinite { birth: b1 } ) => {
            ( b0 - b1 ).abs()
        }
        _ => f64::INFINITY,
    }
}

/// L-infinity distance from a point of a persistence diagram to the diagonal
///
/// Equals half the length of a finite interval, and `+infinity` for a right-infinite
/// interval (a class that never dies cannot be discounted as noise).
pub fn distance_to_diagonal( interval: &Interval ) -> f64 {
    match interval {
        Interval::Finite { birth, death } => 0.5 * ( death - birth ).abs(),
        Interval::RightInfinite { .. } => f64::INFINITY,
    }
}
