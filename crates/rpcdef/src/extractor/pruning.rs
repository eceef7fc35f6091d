use std::collections::BTreeSet;

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap, visit::Dfs};
use rpcdef_support::Definition;

use crate::extractor::PruneMode;

/// Objects as nodes, an edge from each object to every object one of its fields holds.
fn object_graph(definition: &Definition) -> DiGraphMap<&str, ()> {
  let mut graph = DiGraphMap::new();
  for object in &definition.objects {
    graph.add_node(object.type_id.as_str());
    for field in object.fields.iter().filter(|field| field.ty.is_object) {
      graph.add_edge(object.type_id.as_str(), field.ty.type_id.as_str(), ());
    }
  }
  graph
}

/// The start nodes and everything reachable from them.
fn closure<'a>(graph: &DiGraphMap<&'a str, ()>, starts: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
  let mut reached = BTreeSet::new();
  for start in starts {
    reached.insert(start.to_string());
    if graph.contains_node(start) {
      let mut dfs = Dfs::new(graph, start);
      while let Some(node) = dfs.next(graph) {
        reached.insert(node.to_string());
      }
    }
  }
  reached
}

fn service_roots(definition: &Definition) -> impl Iterator<Item = &str> {
  definition
    .services
    .iter()
    .flat_map(|service| &service.methods)
    .flat_map(|method| [method.input_object.type_id.as_str(), method.output_object.type_id.as_str()])
}

/// Removes the objects of excluded services and returns their type ids.
///
/// `excluded` holds the input and output type ids of the excluded services. With
/// [`PruneMode::Identity`] exactly those objects go. With [`PruneMode::Reachability`]
/// everything reachable from them goes, unless a retained service still reaches it.
pub(super) fn prune(definition: &mut Definition, excluded: &BTreeSet<String>, mode: PruneMode) -> Vec<String> {
  if excluded.is_empty() {
    return Vec::new();
  }

  let (candidates, retained) = match mode {
    PruneMode::Identity => (excluded.clone(), BTreeSet::new()),
    PruneMode::Reachability => {
      let graph = object_graph(definition);
      (
        closure(&graph, excluded.iter().map(String::as_str)),
        closure(&graph, service_roots(definition)),
      )
    }
  };

  let mut pruned = Vec::new();
  definition.objects.retain(|object| {
    let remove = candidates.contains(&object.type_id) && !retained.contains(&object.type_id);
    if remove {
      pruned.push(object.type_id.clone());
    }
    !remove
  });
  pruned
}

/// Groups of objects that reference each other, each group and the list sorted.
pub(super) fn detect_cycles(definition: &Definition) -> Vec<Vec<String>> {
  let graph = object_graph(definition);
  let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
    .into_iter()
    .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
    .map(|scc| {
      let mut cycle: Vec<String> = scc.into_iter().map(String::from).collect();
      cycle.sort();
      cycle
    })
    .collect();
  cycles.sort();
  cycles
}
