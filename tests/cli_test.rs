//! CLI argument parsing and rendering tests.

use clap::Parser;
use rstest::rstest;

use rsbst::cli::args::{Cli, Commands};
use rsbst::cli::commands::{traversal_line, DEMO_VALUES};
use rsbst::display::{render, DisplayStyle};
use rsbst::{Order, SearchTree, TreeConvert};

#[rstest]
fn given_comma_and_space_separated_values_when_parsing_then_all_collected() {
    let cli = Cli::try_parse_from(["rsbst", "show", "5,3", "8", "-1"]).unwrap();
    match cli.command {
        Some(Commands::Show { values }) => assert_eq!(values, vec![5, 3, 8, -1]),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
#[case("level", Order::Level)]
#[case("post", Order::Post)]
fn given_order_flag_when_parsing_walk_then_order_is_set(#[case] flag: &str, #[case] expected: Order) {
    let cli = Cli::try_parse_from(["rsbst", "walk", "1,2,3", "--order", flag]).unwrap();
    match cli.command {
        Some(Commands::Walk { order, .. }) => assert_eq!(order, Some(expected)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
fn given_unknown_order_when_parsing_walk_then_rejected() {
    assert!(Cli::try_parse_from(["rsbst", "walk", "1", "--order", "zigzag"]).is_err());
}

#[rstest]
fn given_insert_without_add_when_parsing_then_rejected() {
    assert!(Cli::try_parse_from(["rsbst", "insert", "1,2,3"]).is_err());
}

#[rstest]
fn given_insert_with_rebalance_when_parsing_then_flags_apply() {
    let cli = Cli::try_parse_from(["rsbst", "-dd", "insert", "5,3,8", "--add", "10,11", "-r"]).unwrap();
    assert_eq!(cli.debug, 2);
    match cli.command {
        Some(Commands::Insert { values, add, rebalance }) => {
            assert_eq!(values, vec![5, 3, 8]);
            assert_eq!(add, vec![10, 11]);
            assert!(rebalance);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
fn given_find_when_parsing_then_target_precedes_values() {
    let cli = Cli::try_parse_from(["rsbst", "find", "67", "1,7,67"]).unwrap();
    match cli.command {
        Some(Commands::Find { target, values }) => {
            assert_eq!(target, 67);
            assert_eq!(values, vec![1, 7, 67]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[rstest]
fn given_demo_values_when_rendering_sideways_then_root_line_is_unindented() {
    let tree = SearchTree::from_elements(DEMO_VALUES);
    let rendered = render(tree.root(), DisplayStyle::Sideways);
    assert!(rendered.lines().any(|line| line == "└───── 8"));
    assert_eq!(rendered.lines().count(), tree.len());
}

#[rstest]
fn given_demo_values_when_rendering_as_tree_then_root_is_first_line() {
    let tree = SearchTree::from_elements(DEMO_VALUES);
    let rendered = tree.to_tree_string().to_string();
    assert_eq!(rendered.lines().next(), Some("8"));
    assert_eq!(render(tree.root(), DisplayStyle::Tree), rendered);
}

#[rstest]
fn given_custom_separator_when_walking_then_values_joined_with_it() {
    let tree = SearchTree::from_elements([2, 1, 3]);
    assert_eq!(traversal_line(&tree, Order::Pre, ",").unwrap(), "2,1,3");
}
