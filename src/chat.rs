//! Conversation state for the "generate architecture from prompt" popup.

use log::info;

use crate::api::GenerateGraphResponse;
use crate::graph::{GraphStore, auto_layout};

const GREETING: &str =
	"Hello! I can help you design your cloud architecture. What would you like to build?";
const FALLBACK_SUMMARY: &str = "Architecture generated successfully!";
/// Shown when generation fails; nothing is applied to the canvas.
pub const APOLOGY: &str =
	"Sorry, I encountered an error generating the architecture. Please try again.";

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
	/// The person at the keyboard.
	User,
	/// The generation service.
	Assistant,
}

/// One chat bubble.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
	/// Sequence number, unique per log.
	pub id: usize,
	/// Author.
	pub role: Role,
	/// Text shown.
	pub content: String,
}

/// Messages plus the in-flight flag that guards double submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatLog {
	messages: Vec<Message>,
	pending: bool,
}

impl Default for ChatLog {
	fn default() -> Self {
		let mut log = Self {
			messages: Vec::new(),
			pending: false,
		};
		log.push(Role::Assistant, GREETING);
		log
	}
}

impl ChatLog {
	/// Log opened with the assistant greeting.
	pub fn new() -> Self {
		Self::default()
	}

	/// Messages oldest first.
	pub fn messages(&self) -> &[Message] {
		&self.messages
	}

	/// True while a prompt is being answered.
	pub fn is_pending(&self) -> bool {
		self.pending
	}

	fn push(&mut self, role: Role, content: impl Into<String>) {
		let id = self.messages.len();
		self.messages.push(Message {
			id,
			role,
			content: content.into(),
		});
	}

	/// Records a user prompt and marks the log pending.
	///
	/// Returns the trimmed prompt to send, or `None` if it is blank or a
	/// previous prompt is still in flight.
	pub fn submit(&mut self, input: &str) -> Option<String> {
		let prompt = input.trim();
		if prompt.is_empty() || self.pending {
			return None;
		}
		self.push(Role::User, prompt);
		self.pending = true;
		Some(prompt.to_owned())
	}

	/// Closes the pending prompt with an assistant reply.
	pub fn reply(&mut self, content: impl Into<String>) {
		self.push(Role::Assistant, content);
		self.pending = false;
	}
}

/// Applies a successful generation to the store and returns the reply text.
///
/// The graph is loaded only if the response carries one. Nodes are re-laid
/// out when `relayout` is set. Monitoring policies replace the stored ones
/// whenever a plan is present.
pub fn apply_generation(
	store: &mut GraphStore,
	response: GenerateGraphResponse,
	relayout: bool,
) -> String {
	if let Some(mut graph) = response.graph {
		if relayout {
			auto_layout(&mut graph.nodes, &graph.edges);
		}
		info!("loading generated graph: {} nodes", graph.nodes.len());
		store.load_architecture(graph.nodes, graph.edges);
	}
	if let Some(plan) = response.plan {
		store.set_monitoring(plan.monitoring);
	}
	response
		.summary
		.filter(|s| !s.trim().is_empty())
		.unwrap_or_else(|| FALLBACK_SUMMARY.to_owned())
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::{Node, Position};

	#[test]
	fn double_submit_is_refused_while_pending() {
		let mut log = ChatLog::new();
		assert_eq!(log.submit("  web app with db "), Some("web app with db".into()));
		assert_eq!(log.submit("another"), None);
		log.reply(APOLOGY);
		assert!(!log.is_pending());
		assert_eq!(log.submit("another"), Some("another".into()));
		assert_eq!(log.messages().len(), 4);
		assert_eq!(log.messages()[0].role, Role::Assistant);
	}

	#[test]
	fn blank_prompt_is_ignored() {
		let mut log = ChatLog::new();
		assert_eq!(log.submit("   "), None);
		assert_eq!(log.messages().len(), 1);
	}

	#[test]
	fn generation_replaces_graph_and_monitoring() {
		let mut store = GraphStore::new();
		store.add_node(Node::new("old", Position::default(), "Old", "compute", "cloud-run"));

		let response: GenerateGraphResponse = serde_json::from_value(json!({
			"graph": {
				"nodes": [{"id": "vpc-1", "type": "gcpNode", "position": {"x": 0, "y": 120},
					"data": {"label": "VPC", "category": "networking", "icon": "vpc",
						"configured": false, "config": {}}}],
				"edges": []
			},
			"summary": "A VPC.",
			"plan": {"monitoring": [{"metric_name": "cpu"}]}
		}))
		.unwrap();

		let reply = apply_generation(&mut store, response, false);
		assert_eq!(reply, "A VPC.");
		assert_eq!(store.nodes().len(), 1);
		assert_eq!(store.nodes()[0].id, "vpc-1");
		assert_eq!(store.nodes()[0].position, Position::new(0.0, 120.0));
		assert_eq!(store.monitoring().len(), 1);
	}

	#[test]
	fn response_without_graph_leaves_canvas() {
		let mut store = GraphStore::new();
		store.add_node(Node::new("keep", Position::default(), "Keep", "compute", "cloud-run"));
		let response: GenerateGraphResponse = serde_json::from_value(json!({})).unwrap();
		let reply = apply_generation(&mut store, response, true);
		assert_eq!(reply, FALLBACK_SUMMARY);
		assert_eq!(store.nodes()[0].id, "keep");
	}
}
