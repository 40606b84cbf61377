use std::fmt;

use super::node::{Colour, Node};
use super::search::SearchTree;

/// Read-only check of the red-black invariants over a tree snapshot: no red
/// node has a red child, every path down to an absent child crosses the same
/// number of black nodes, and every node is ordered against its children by
/// the tree's own predicate.
pub fn validate_tree<T>(tree: &SearchTree<T>) -> bool
where
    T: fmt::Debug,
{
    red_nodes_valid(&tree.root())
        && black_height(&tree.root()) != -1
        && ordering_valid(tree, &tree.root())
}

fn red_nodes_valid<T>(node: &Option<Node<T>>) -> bool
where
    T: fmt::Debug,
{
    let node = match node {
        Some(node) => node,
        None => return true,
    };
    let child_is_red = node.left().as_ref().map(Node::colour) == Some(Colour::Red)
        || node.right().as_ref().map(Node::colour) == Some(Colour::Red);
    if node.colour() == Colour::Red && child_is_red {
        return false;
    }
    red_nodes_valid(&node.left()) && red_nodes_valid(&node.right())
}

// -1 flags a subtree whose paths disagree on their black node count, the
// mismatch short-circuits all the way up
fn black_height<T>(node: &Option<Node<T>>) -> i32
where
    T: fmt::Debug,
{
    let node = match node {
        Some(node) => node,
        None => return 0,
    };
    let left = black_height(&node.left());
    let right = black_height(&node.right());
    if left == -1 || right == -1 || left != right {
        return -1;
    }
    left + if node.colour() == Colour::Black { 1 } else { 0 }
}

fn ordering_valid<T>(tree: &SearchTree<T>, node: &Option<Node<T>>) -> bool
where
    T: fmt::Debug,
{
    let node = match node {
        Some(node) => node,
        None => return true,
    };
    if let Some(ref left) = node.left() {
        if !tree.ordered(&left.borrow().data, &node.borrow().data) {
            return false;
        }
    }
    if let Some(ref right) = node.right() {
        if !tree.ordered(&node.borrow().data, &right.borrow().data) {
            return false;
        }
    }
    ordering_valid(tree, &node.left()) && ordering_valid(tree, &node.right())
}
