use crate::graph::{
	Connection, GraphStore, NODE_HEIGHT, NODE_WIDTH, Node, NodeId, Position, snap_to_grid,
};

/// Radius within which a pointer grabs a connection handle, in world units.
pub const HANDLE_RADIUS: f64 = 7.0;
/// Pointer travel below this many pixels counts as a click, not a drag.
const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl ViewTransform {
	pub fn identity() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self::identity()
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node_id: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// An edge being drawn from a source handle.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectDraft {
	pub source: NodeId,
	pub handle: Handle,
	pub cursor: (f64, f64),
}

/// Connection points on a node box. `Right`/`Bottom` are sources,
/// `Left`/`Top` are targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handle {
	Top,
	Left,
	Right,
	Bottom,
}

impl Handle {
	pub fn id(self) -> &'static str {
		match self {
			Handle::Top => "top",
			Handle::Left => "left",
			Handle::Right => "right",
			Handle::Bottom => "bottom",
		}
	}

	/// Target handle paired with a source handle.
	pub fn opposite(self) -> Handle {
		match self {
			Handle::Right => Handle::Left,
			Handle::Bottom => Handle::Top,
			Handle::Left => Handle::Right,
			Handle::Top => Handle::Bottom,
		}
	}

	pub fn from_id(id: Option<&str>) -> Option<Handle> {
		match id? {
			"top" => Some(Handle::Top),
			"left" => Some(Handle::Left),
			"right" => Some(Handle::Right),
			"bottom" => Some(Handle::Bottom),
			_ => None,
		}
	}

	/// World-space anchor of this handle on `node`.
	pub fn anchor(self, node: &Node) -> (f64, f64) {
		let Position { x, y } = node.position;
		match self {
			Handle::Top => (x + NODE_WIDTH / 2.0, y),
			Handle::Left => (x, y + NODE_HEIGHT / 2.0),
			Handle::Right => (x + NODE_WIDTH, y + NODE_HEIGHT / 2.0),
			Handle::Bottom => (x + NODE_WIDTH / 2.0, y + NODE_HEIGHT),
		}
	}
}

/// What a pointer gesture asks the store to do.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasIntent {
	/// Change the selection.
	Select(Option<NodeId>),
	/// Move a node; `position` is `None` when only the drag flag changes.
	Move {
		id: NodeId,
		position: Option<Position>,
		dragging: bool,
	},
	/// Create an edge.
	Connect(Connection),
}

pub struct CanvasState {
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub connect: Option<ConnectDraft>,
	pub hover: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform::identity(),
			drag: DragState::default(),
			pan: PanState::default(),
			connect: None,
			hover: None,
			width,
			height,
			flow_time: 0.0,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.transform.screen_to_graph(sx, sy)
	}

	/// Topmost node under the pointer; later nodes paint over earlier ones.
	pub fn node_at_position<'a>(&self, store: &'a GraphStore, sx: f64, sy: f64) -> Option<&'a Node> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		store.nodes().iter().rev().find(|n| {
			gx >= n.position.x
				&& gx <= n.position.x + NODE_WIDTH
				&& gy >= n.position.y
				&& gy <= n.position.y + NODE_HEIGHT
		})
	}

	/// Source handle under the pointer, if any.
	pub fn source_handle_at(&self, store: &GraphStore, sx: f64, sy: f64) -> Option<(NodeId, Handle)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		store.nodes().iter().rev().find_map(|n| {
			[Handle::Right, Handle::Bottom].into_iter().find_map(|h| {
				let (hx, hy) = h.anchor(n);
				let (dx, dy) = (hx - gx, hy - gy);
				// HANDLE_RADIUS is in world-space, scales with zoom like nodes
				((dx * dx + dy * dy).sqrt() < HANDLE_RADIUS).then(|| (n.id.clone(), h))
			})
		})
	}

	pub fn mouse_down(&mut self, store: &GraphStore, x: f64, y: f64) -> Vec<CanvasIntent> {
		if let Some((source, handle)) = self.source_handle_at(store, x, y) {
			self.connect = Some(ConnectDraft {
				source,
				handle,
				cursor: self.screen_to_graph(x, y),
			});
			return Vec::new();
		}

		if let Some(node) = self.node_at_position(store, x, y) {
			self.drag = DragState {
				node_id: Some(node.id.clone()),
				start_x: x,
				start_y: y,
				node_start: node.position,
				moved: false,
			};
			return vec![CanvasIntent::Select(Some(node.id.clone()))];
		}

		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
		vec![CanvasIntent::Select(None)]
	}

	pub fn mouse_move(&mut self, store: &GraphStore, x: f64, y: f64) -> Vec<CanvasIntent> {
		if let Some(draft) = self.connect.as_mut() {
			draft.cursor = self.transform.screen_to_graph(x, y);
			return Vec::new();
		}

		if let Some(id) = self.drag.node_id.clone() {
			let (sdx, sdy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && sdx.hypot(sdy) < CLICK_SLOP {
				return Vec::new();
			}
			self.drag.moved = true;
			let (dx, dy) = (sdx / self.transform.k, sdy / self.transform.k);
			let position = Position::new(
				snap_to_grid(self.drag.node_start.x + dx),
				snap_to_grid(self.drag.node_start.y + dy),
			);
			return vec![CanvasIntent::Move {
				id,
				position: Some(position),
				dragging: true,
			}];
		}

		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
			return Vec::new();
		}

		self.hover = self.node_at_position(store, x, y).map(|n| n.id.clone());
		Vec::new()
	}

	pub fn mouse_up(&mut self, store: &GraphStore, x: f64, y: f64) -> Vec<CanvasIntent> {
		let mut intents = Vec::new();
		if let Some(draft) = self.connect.take() {
			if let Some(target) = self.node_at_position(store, x, y) {
				if target.id != draft.source {
					let connection = Connection::new(draft.source, target.id.clone())
						.with_handles(draft.handle.id(), draft.handle.opposite().id());
					intents.push(CanvasIntent::Connect(connection));
				}
			}
		}
		if let Some(id) = self.drag.node_id.take() {
			if self.drag.moved {
				intents.push(CanvasIntent::Move {
					id,
					position: None,
					dragging: false,
				});
			}
		}
		self.drag = DragState::default();
		self.pan.active = false;
		intents
	}

	/// Pointer left the canvas: abandon every gesture.
	pub fn cancel(&mut self) -> Vec<CanvasIntent> {
		let intents = match self.drag.node_id.take() {
			Some(id) if self.drag.moved => vec![CanvasIntent::Move {
				id,
				position: None,
				dragging: false,
			}],
			_ => Vec::new(),
		};
		self.drag = DragState::default();
		self.pan.active = false;
		self.connect = None;
		self.hover = None;
		intents
	}

	/// Zooms around the pointer; positive `delta_y` zooms out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.2, 4.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn tick(&mut self, dt: f64) {
		self.flow_time += dt;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
