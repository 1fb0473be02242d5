//! Architecture diagram state: nodes, edges and the operations that change them.

mod changes;
mod layout;
mod store;
mod types;
mod validate;

pub use changes::{EdgeChange, NodeChange};
pub use layout::auto_layout;
pub use store::GraphStore;
pub use types::{
	Connection, Dimensions, EDGE_TYPE, Edge, GRID, MonitoringPolicy, NODE_HEIGHT, NODE_TYPE,
	NODE_WIDTH, Node, NodeConfig, NodeData, NodeId, Position, snap_to_grid,
};
pub use validate::Validation;
