//! Maximum flow by shortest augmenting paths (Edmonds-Karp)
//!
//! A [`FlowNetwork`] owns its nodes and edges outright.  Edges live in a single arena
//! and are created in pairs: every call to [`FlowNetwork::add_edge`] pushes a *forward*
//! edge with the requested capacity, followed by a *reverse* edge of capacity zero.  Each
//! edge refers to its partner by [`EdgeIndex`].
//!
//! Flow is stored skew-symmetrically: pushing `f` units along an edge adds `f` to its
//! flow and subtracts `f` from the flow of its partner.  Consequently the residual
//! capacity of every edge, forward or reverse, is `capacity - flow`; on a reverse edge
//! this equals the flow carried by the forward edge.
//!
//! ```
//! use oat_bottleneck::max_flow::FlowNetwork;
//!
//! let mut network: FlowNetwork = FlowNetwork::with_nodes( 4 );
//! network.add_edge( 0, 1, 2 );
//! network.add_edge( 0, 2, 1 );
//! network.add_edge( 1, 2, 1 );
//! network.add_edge( 1, 3, 1 );
//! network.add_edge( 2, 3, 2 );
//! assert_eq!( network.max_flow( 0, 3 ), 3 );
//! ```

use std::collections::VecDeque;
use std::fmt::Debug;

use derive_getters::Getters;
use log::trace;
use num::{PrimInt, Signed};


/// Position of an edge in the arena of a [`FlowNetwork`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex( usize );

impl EdgeIndex {
    /// The position of the edge in the arena
    pub fn index( &self ) -> usize { self.0 }

    /// `true` for edges created with a requested capacity, `false` for their zero-capacity partners
    pub fn is_forward( &self ) -> bool { self.0 % 2 == 0 }
}


/// A directed edge of a flow network
#[derive(Clone, Debug, Getters)]
pub struct FlowEdge< C > {
    source:         usize,
    destination:    usize,
    capacity:       C,
    flow:           C,
    /// The paired edge running in the opposite direction
    reverse:        EdgeIndex,
}

impl < C: PrimInt > FlowEdge< C > {
    /// Capacity still available along this edge
    pub fn residual( &self ) -> C { self.capacity - self.flow }
}


/// A node of a flow network, with scratch space for the breadth-first search
///
/// The fields describe the most recent search from the source:
///
/// - `distance`: number of edges on a shortest residual path from the source, if the node was reached
/// - `predecessor`: the last edge of that path
/// - `bottleneck`: the smallest residual capacity along that path
#[derive(Clone, Debug, Getters)]
pub struct FlowNode< C > {
    distance:       Option< usize >,
    predecessor:    Option< EdgeIndex >,
    bottleneck:     C,
}

impl < C: PrimInt > FlowNode< C > {
    fn unreached() -> Self {
        FlowNode { distance: None, predecessor: None, bottleneck: C::zero() }
    }
}


/// A flow network with integer capacities
///
/// Nodes are numbered `0 .. node_count()`.  Adding an edge that touches a node beyond the
/// current range extends the range.
#[derive(Clone, Debug)]
pub struct FlowNetwork< C = i64 > {
    nodes:          Vec< FlowNode< C > >,
    edges:          Vec< FlowEdge< C > >,
    outgoing:       Vec< Vec< EdgeIndex > >,
}

impl < C: PrimInt + Signed + Debug > Default for FlowNetwork< C > {
    fn default() -> Self {
        FlowNetwork::new()
    }
}

impl < C: PrimInt + Signed + Debug > FlowNetwork< C > {

    /// A network with no nodes
    pub fn new() -> Self {
        FlowNetwork { nodes: Vec::new(), edges: Vec::new(), outgoing: Vec::new() }
    }

    /// A network with nodes `0 .. node_count` and no edges
    pub fn with_nodes( node_count: usize ) -> Self {
        let mut network = FlowNetwork::new();
        network.ensure_node( node_count );
        network
    }

    /// Add a node and return its index
    pub fn add_node( &mut self ) -> usize {
        self.nodes.push( FlowNode::unreached() );
        self.outgoing.push( Vec::new() );
        self.nodes.len() - 1
    }

    fn ensure_node( &mut self, node_count: usize ) {
        while self.nodes.len() < node_count {
            self.add_node();
        }
    }

    /// Add an edge `source -> destination` with the given capacity, together with its
    /// zero-capacity reverse edge
    ///
    /// Returns the index of the forward edge; the reverse edge is `edge(index).reverse()`.
    /// Capacities are expected to be nonnegative.
    pub fn add_edge( &mut self, source: usize, destination: usize, capacity: C ) -> EdgeIndex {
        self.ensure_node( source.max( destination ) + 1 );

        let forward     =   EdgeIndex( self.edges.len() );
        let backward    =   EdgeIndex( self.edges.len() + 1 );
        self.edges.push( FlowEdge { source, destination, capacity, flow: C::zero(), reverse: backward } );
        self.edges.push( FlowEdge { source: destination, destination: source, capacity: C::zero(), flow: C::zero(), reverse: forward } );
        self.outgoing[ source ].push( forward );
        self.outgoing[ destination ].push( backward );
        forward
    }

    pub fn node_count( &self ) -> usize {
        self.nodes.len()
    }

    /// Number of edges added with [`add_edge`](Self::add_edge); reverse edges are not counted
    pub fn edge_count( &self ) -> usize {
        self.edges.len() / 2
    }

    pub fn node( &self, node: usize ) -> &FlowNode< C > {
        &self.nodes[ node ]
    }

    pub fn edge( &self, edge: EdgeIndex ) -> &FlowEdge< C > {
        &self.edges[ edge.0 ]
    }

    /// Indices of the edges leaving `node`, including reverse edges
    pub fn outgoing( &self, node: usize ) -> &[ EdgeIndex ] {
        &self.outgoing[ node ]
    }

    pub fn flow( &self, edge: EdgeIndex ) -> C {
        self.edges[ edge.0 ].flow
    }

    pub fn residual( &self, edge: EdgeIndex ) -> C {
        self.edges[ edge.0 ].residual()
    }

    /// Net flow leaving `node`
    pub fn outflow( &self, node: usize ) -> C {
        self.outgoing[ node ].iter()
            .fold( C::zero(), |total, edge| total + self.edges[ edge.0 ].flow )
    }

    /// Compute a maximum flow from `source` to `sink`
    ///
    /// Repeatedly finds a shortest path from `source` to `sink` in the residual graph and
    /// pushes as much flow along it as its tightest edge allows.  Flow already present in
    /// the network is kept and augmented.  Returns the net flow leaving `source`.
    ///
    /// Panics if `source` or `sink` is not a node of the network.
    pub fn max_flow( &mut self, source: usize, sink: usize ) -> C {
        if source == sink {
            return self.outflow( source )
        }
        let mut paths = 0usize;
        while self.breadth_first_search( source, sink ) {
            let increment = self.nodes[ sink ].bottleneck;
            let mut node = sink;
            while let Some( edge ) = self.nodes[ node ].predecessor {
                self.push( edge, increment );
                node = self.edges[ edge.0 ].source;
            }
            paths += 1;
            trace!( "augmenting path {} of length {:?} carries {:?}", paths, self.nodes[ sink ].distance, increment );
        }
        self.outflow( source )
    }

    /// Label every node reachable from `source` in the residual graph with its distance,
    /// predecessor edge and path bottleneck; returns `true` if `sink` was reached
    fn breadth_first_search( &mut self, source: usize, sink: usize ) -> bool {
        let FlowNetwork { nodes, edges, outgoing } = self;

        for node in nodes.iter_mut() {
            *node = FlowNode::unreached();
        }
        nodes[ source ].distance    =   Some( 0 );
        nodes[ source ].bottleneck  =   C::max_value();

        let mut queue = VecDeque::from( vec![ source ] );
        while let Some( node ) = queue.pop_front() {
            let distance    =   nodes[ node ].distance.map( |d| d + 1 );
            let bottleneck  =   nodes[ node ].bottleneck;
            for &edge in outgoing[ node ].iter() {
                let residual    =   edges[ edge.0 ].residual();
                let next        =   edges[ edge.0 ].destination;
                if residual <= C::zero() || nodes[ next ].distance.is_some() {
                    continue
                }
                nodes[ next ].distance      =   distance;
                nodes[ next ].predecessor   =   Some( edge );
                nodes[ next ].bottleneck    =   bottleneck.min( residual );
                if next == sink {
                    return true
                }
                queue.push_back( next );
            }
        }
        false
    }

    fn push( &mut self, edge: EdgeIndex, increment: C ) {
        let reverse = self.edges[ edge.0 ].reverse;
        self.edges[ edge.0 ].flow       =   self.edges[ edge.0 ].flow + increment;
        self.edges[ reverse.0 ].flow    =   self.edges[ reverse.0 ].flow - increment;
    }

    /// Check capacity constraints on forward edges and flow conservation at every node
    /// other than `source` and `sink`
    pub fn is_valid_flow( &self, source: usize, sink: usize ) -> bool {
        let capacities_ok   =   self.edges.iter()
                                    .step_by( 2 )
                                    .all( |edge| C::zero() <= edge.flow && edge.flow <= edge.capacity );
        let conserved       =   ( 0 .. self.nodes.len() )
                                    .filter( |&node| node != source && node != sink )
                                    .all( |node| self.outflow( node ) == C::zero() );
        capacities_ok && conserved
    }
}
