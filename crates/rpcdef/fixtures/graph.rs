/// Graph walks a network of nodes.
pub trait Graph {
  fn walk(&self, request: WalkRequest) -> WalkResponse;
}

pub struct WalkRequest {
  pub start: Node,
}

pub struct WalkResponse {
  pub visited: Vec<Node>,
  pub edges: Vec<Edge>,
}

/// A node links to its neighbours.
pub struct Node {
  pub id: String,
  pub edges: Vec<Edge>,
  pub parent: Option<Box<Node>>,
}

pub struct Edge {
  pub from: Node,
  pub to: Node,
}
