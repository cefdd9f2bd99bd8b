//! Preprocessing applied to diagrams before they are compared

use serde::{Deserialize, Serialize};

use crate::diagrams::PersistenceDiagram;
use crate::error::Result;


/// Settings for comparing a collection of persistence diagrams
///
/// - `truncate`: clamp every interval into the window `(lower, upper)` before comparing;
///   this makes right-infinite intervals finite
/// - `keep_largest`: keep only the `n` intervals farthest from the diagonal (see
///   [`PersistenceDiagram::filter_largest`]); applied after truncation
/// - `show_progress`: display a progress bar while computing pairwise distances
///
/// The default applies no preprocessing and shows no progress bar.
///
/// ```
/// use oat_bottleneck::options::ComparisonOptions;
///
/// let options = ComparisonOptions::from_json_str( r#"{ "truncate": [0.0, 2.0] }"# ).unwrap();
/// assert_eq!( options.truncate, Some( (0.0, 2.0) ) );
/// assert_eq!( options.keep_largest, None );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonOptions {
    pub truncate:       Option< ( f64, f64 ) >,
    pub keep_largest:   Option< usize >,
    pub show_progress:  bool,
}

impl ComparisonOptions {

    pub fn from_json_str( json: &str ) -> Result< Self > {
        Ok( serde_json::from_str( json )? )
    }

    pub fn to_json_string( &self ) -> Result< String > {
        Ok( serde_json::to_string( self )? )
    }

    /// Apply the configured preprocessing to a diagram
    ///
    /// # Errors
    ///
    /// Returns an error if the truncation window is invalid.
    pub fn prepare( &self, diagram: &PersistenceDiagram ) -> Result< PersistenceDiagram > {
        let diagram     =   match self.truncate {
                                Some( ( lower, upper ) ) => diagram.truncate( lower, upper )?,
                                None => diagram.clone(),
                            };
        Ok( match self.keep_largest {
            Some( n ) => diagram.filter_largest( n ),
            None => diagram,
        })
    }
}
