//! JSON formatter
//!
//! Serializes the graph as `{ "nodes": [...], "edges": [...] }`, both in creation order, ids
//! in their dotted text form. Meant for tools that want the graph rather than a picture.

use super::registry::FormatError;
use crate::flow::building::Graph;

pub fn render(graph: &Graph) -> Result<String, FormatError> {
    serde_json::to_string_pretty(graph).map_err(|e| FormatError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::loader::FlowLoader;

    #[test]
    fn test_json_lists_nodes_and_edges() {
        let graph = FlowLoader::from_string("a\nif b\n yes c\nd")
            .build()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&render(&graph).unwrap()).unwrap();

        let ids: Vec<_> = value["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(value["nodes"][1]["shape"], "decision");
        assert_eq!(value["edges"][1]["label"], "yes");
        assert_eq!(value["edges"][2]["guard"], "yes");
        assert_eq!(value["edges"][2]["to"], "4");
    }

    #[test]
    fn test_empty_graph() {
        let value: serde_json::Value =
            serde_json::from_str(&render(&Graph::new()).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({ "nodes": [], "edges": [] }));
    }
}
