//! Property-based tests for script conversion
//!
//! Step texts are generated so they can never be mistaken for a condition or an outcome:
//! they start with an uppercase letter while the keywords are lowercase.

use flowchart_parser::flow::testing::assert_graph;
use flowchart_parser::{convert, FlowLoader};
use proptest::prelude::*;

/// Step text: one or more words, inner spaces and `&` allowed
fn step_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{0,8}",
        "[A-Z][a-z]{0,5}( [a-z&]{1,5}){1,3}",
        "[A-Z][a-z]{0,4} & [a-z]{1,4}",
    ]
}

/// Branch label; `if` would turn the line into a condition
fn outcome_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_filter("condition keyword", |label| label != "if")
}

/// One piece of a mixed script, written out by [render_block]
#[derive(Debug, Clone)]
enum Block {
    Step(String),
    Condition(String, Vec<(String, String)>),
    Group(String, Vec<String>),
}

fn block_strategy() -> impl Strategy<Value = Block> {
    prop_oneof![
        step_strategy().prop_map(Block::Step),
        (
            step_strategy(),
            prop::collection::vec((outcome_strategy(), step_strategy()), 1..4)
        )
            .prop_map(|(condition, branches)| Block::Condition(condition, branches)),
        (step_strategy(), prop::collection::vec(step_strategy(), 1..4))
            .prop_map(|(entry, children)| Block::Group(entry, children)),
    ]
}

fn render_block(block: &Block) -> String {
    match block {
        Block::Step(text) => format!("{}\n", text),
        Block::Condition(condition, branches) => {
            let mut out = format!("if {}\n", condition);
            for (label, text) in branches {
                out.push_str(&format!(" {} {}\n", label, text));
            }
            out
        }
        Block::Group(entry, children) => {
            let mut out = format!("{}\n", entry);
            for child in children {
                out.push_str(&format!(" {}\n", child));
            }
            out
        }
    }
}

proptest! {
    #[test]
    fn sequential_steps_form_a_chain(steps in prop::collection::vec(step_strategy(), 1..20)) {
        let graph = FlowLoader::from_string(steps.join("\n")).build().unwrap();

        prop_assert_eq!(graph.node_count(), steps.len());
        prop_assert_eq!(graph.edge_count(), steps.len() - 1);
        for (i, node) in graph.nodes().enumerate() {
            prop_assert_eq!(node.id.to_string(), (i + 1).to_string());
            prop_assert_eq!(&node.label, &steps[i]);
        }
    }

    #[test]
    fn branches_fan_out_and_merge_in_order(
        before in step_strategy(),
        condition in step_strategy(),
        branches in prop::collection::vec((outcome_strategy(), step_strategy()), 1..6),
        after in step_strategy(),
    ) {
        let mut script = format!("{}\nif {}\n", before, condition);
        for (label, text) in &branches {
            script.push_str(&format!(" {} {}\n", label, text));
        }
        script.push_str(&after);

        let graph = FlowLoader::from_string(script).build().unwrap();
        let k = branches.len();
        let merge = (k + 3).to_string();
        let heads: Vec<String> = (3..k + 3).map(|n| n.to_string()).collect();
        let head_refs: Vec<&str> = heads.iter().map(String::as_str).collect();

        prop_assert_eq!(graph.node_count(), k + 3);
        prop_assert_eq!(graph.edge_count(), 2 * k + 1);
        assert_graph(&graph)
            .node("2", |n| n.decision().label(&condition).successors(&head_refs))
            .node(&merge, |n| n.label(&after).predecessors(&head_refs));
        for (i, (label, _)) in branches.iter().enumerate() {
            assert_graph(&graph)
                .edge("2", &heads[i], |e| e.label(label))
                .edge(&heads[i], &merge, |e| e.guard(label).unlabeled());
        }
    }

    #[test]
    fn conversion_is_deterministic(steps in prop::collection::vec(step_strategy(), 0..10)) {
        let script = steps.join("\n");
        prop_assert_eq!(convert(&script).unwrap(), convert(&script).unwrap());
    }

    #[test]
    fn baseline_indentation_is_ignored(
        steps in prop::collection::vec(step_strategy(), 1..10),
        indent in 0usize..8,
    ) {
        let pad = " ".repeat(indent);
        let indented: Vec<String> = steps.iter().map(|s| format!("{}{}", pad, s)).collect();
        prop_assert_eq!(
            convert(&indented.join("\n")).unwrap(),
            convert(&steps.join("\n")).unwrap()
        );
    }

    #[test]
    fn output_starts_with_envelope(steps in prop::collection::vec(step_strategy(), 0..10)) {
        let output = convert(&steps.join("\n")).unwrap();
        prop_assert!(output.starts_with("code: mmd\n graph TD;"));
        prop_assert_eq!(output.lines().count(), 2 + steps.len());
    }

    #[test]
    fn mixed_scripts_hang_from_the_first_node(
        blocks in prop::collection::vec(block_strategy(), 1..8),
    ) {
        let script: String = blocks.iter().map(render_block).collect();
        let graph = FlowLoader::from_string(script).build().unwrap();

        assert_graph(&graph).roots(&["1"]);
    }
}
