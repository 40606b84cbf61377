use std::fmt;
use std::ops::Deref;

use super::node::{Colour, Node};
use super::search::SearchTree;

/// Search tree with red-black rebalancing run after every mutation, keeping
/// the height within 2*log2(n+1). Read-only operations come from the wrapped
/// `SearchTree`; mutation only goes through the fixup-restoring entry points.
pub struct RBTree<T: fmt::Debug> {
    tree: SearchTree<T>,
}

impl<T> RBTree<T>
where
    T: fmt::Debug,
{
    pub fn new() -> RBTree<T>
    where
        T: Ord,
    {
        RBTree {
            tree: SearchTree::new(),
        }
    }

    pub fn with_order<F>(order: F) -> RBTree<T>
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        RBTree {
            tree: SearchTree::with_order(order),
        }
    }

    pub fn insert(&mut self, data: T) -> Node<T> {
        let node = self.tree.insert(data);
        self.insert_fixup(node.duplicate());
        node
    }

    pub fn remove(&mut self, data: &T) -> Option<Node<T>> {
        match self.tree.find(data) {
            Some(mut node) => {
                self.delete_node(&mut node);
                Some(node)
            }
            None => None,
        }
    }

    pub fn delete_node(&mut self, node: &mut Node<T>) {
        trace!("delete {:?}", node);
        if node.left().is_some() && node.right().is_some() {
            let right = node.right().expect("two-children node must have a right child");
            let mut successor = SearchTree::leftmost(right);
            node.swap_data(&mut successor);
            self.delete_node(&mut successor);
        } else if let Some(mut child) = node.left().or_else(|| node.right()) {
            // a lone child is a red leaf under a black node, the black
            // height invariant allows nothing else
            child.set_colour(Colour::Black);
            self.tree.transplant(node, Some(child));
        } else {
            // a black leaf leaves a deficiency behind, repair it while the
            // node still knows its parent and sibling
            if node.colour() == Colour::Black {
                self.delete_fixup(node.duplicate());
            }
            self.tree.transplant(node, None);
        }
    }

    fn insert_fixup(&mut self, mut node: Node<T>) {
        while node.colour() == Colour::Red
            && node.parent().as_ref().map(Node::colour) == Some(Colour::Red)
        {
            let mut parent = node.parent().expect("red node in fixup must have a parent");
            let mut grandparent = parent.parent().expect("red parent must have a grandparent");

            match node.uncle() {
                Some(ref mut uncle) if uncle.colour() == Colour::Red => {
                    trace!("insert fixup, red uncle: {:?}", node);
                    parent.set_colour(Colour::Black);
                    uncle.set_colour(Colour::Black);
                    grandparent.set_colour(Colour::Red);
                    node = grandparent;
                }
                _ => {
                    trace!("insert fixup, black uncle: {:?}", node);
                    node = self.restructure(node);
                }
            }
        }

        if let Some(ref mut root) = self.tree.root {
            root.set_colour(Colour::Black);
        }
    }

    // resolves a red-red edge under a black uncle: a triangle rotates down to
    // a line, then the line recolours and rotates through the grandparent;
    // returns the new local subtree root, which is black
    fn restructure(&mut self, node: Node<T>) -> Node<T> {
        let parent = node.parent().expect("restructure requires a parent");
        let parent_is_left = parent.is_left_child();
        let node_is_left = node.is_left_child();

        let mut parent = if parent_is_left && !node_is_left {
            self.tree.rotate_left(parent)
        } else if !parent_is_left && node_is_left {
            self.tree.rotate_right(parent)
        } else {
            parent
        };

        let mut grandparent = parent.parent().expect("line shape requires a grandparent");
        parent.set_colour(Colour::Black);
        grandparent.set_colour(Colour::Red);
        if parent_is_left {
            self.tree.rotate_right(grandparent)
        } else {
            self.tree.rotate_left(grandparent)
        }
    }

    // removing a black leaf starves its side of the tree of one black node,
    // bubble the deficiency up until a red node can absorb it
    fn delete_fixup(&mut self, mut node: Node<T>) {
        while node.parent().is_some() && node.colour() == Colour::Black {
            let is_left = node.is_left_child();
            let mut parent = node.parent().expect("deficient node must have a parent");
            let mut sibling = node.sibling().expect("deficient node must have a sibling");

            if sibling.colour() == Colour::Red {
                trace!("delete fixup, red sibling: {:?}", node);
                sibling.set_colour(Colour::Black);
                parent.set_colour(Colour::Red);
                if is_left {
                    self.tree.rotate_left(parent.duplicate());
                } else {
                    self.tree.rotate_right(parent.duplicate());
                }
                sibling = node.sibling().expect("deficient node must have a sibling");
            }

            let left_is_red = sibling.left().as_ref().map(Node::colour) == Some(Colour::Red);
            let right_is_red = sibling.right().as_ref().map(Node::colour) == Some(Colour::Red);

            if !left_is_red && !right_is_red {
                trace!("delete fixup, black sibling and nephews: {:?}", node);
                sibling.set_colour(Colour::Red);
                node = parent;
                continue;
            }

            let far_is_red = if is_left { right_is_red } else { left_is_red };
            if !far_is_red {
                trace!("delete fixup, red near nephew: {:?}", node);
                let near = if is_left { sibling.left() } else { sibling.right() };
                let mut near = near.expect("near nephew must be red here");
                near.set_colour(Colour::Black);
                sibling.set_colour(Colour::Red);
                if is_left {
                    self.tree.rotate_right(sibling.duplicate());
                } else {
                    self.tree.rotate_left(sibling.duplicate());
                }
                sibling = near;
            }

            trace!("delete fixup, red far nephew: {:?}", node);
            sibling.set_colour(parent.colour());
            parent.set_colour(Colour::Black);
            let far = if is_left { sibling.right() } else { sibling.left() };
            let mut far = far.expect("far nephew must be red here");
            far.set_colour(Colour::Black);
            if is_left {
                self.tree.rotate_left(parent);
            } else {
                self.tree.rotate_right(parent);
            }
            return;
        }

        node.set_colour(Colour::Black);
    }

    pub fn dump_as_dot(&self) -> String {
        let mut definitions = Vec::new();
        let mut links = Vec::new();
        if let Some(ref root) = self.tree.root {
            Self::dot_subtree(root, &mut definitions, &mut links);
        }

        let mut lines = Vec::new();
        lines.push(String::from("graph Tree {"));
        lines.append(&mut definitions);
        lines.push(String::new());
        lines.append(&mut links);
        lines.push(String::from("}"));
        lines.push(String::new());
        lines.join("\n")
    }

    fn dot_subtree(node: &Node<T>, definitions: &mut Vec<String>, links: &mut Vec<String>) {
        definitions.push(format!(
            "    Node{} [label=\"{:?}\", color={}]",
            node.id(),
            node.borrow().data,
            node.colour()
        ));
        match node.left() {
            Some(ref left) => {
                links.push(format!("    Node{} -- Node{}", node.id(), left.id()));
                Self::dot_subtree(left, definitions, links);
            }
            None => {
                definitions.push(format!("    NullL{} [shape=point]", node.id()));
                links.push(format!("    Node{0} -- NullL{0}", node.id()));
            }
        }
        match node.right() {
            Some(ref right) => {
                links.push(format!("    Node{} -- Node{}", node.id(), right.id()));
                Self::dot_subtree(right, definitions, links);
            }
            None => {
                definitions.push(format!("    NullR{} [shape=point]", node.id()));
                links.push(format!("    Node{0} -- NullR{0}", node.id()));
            }
        }
    }
}

impl<T> Default for RBTree<T>
where
    T: fmt::Debug + Ord,
{
    fn default() -> RBTree<T> {
        RBTree::new()
    }
}

impl<T> Clone for RBTree<T>
where
    T: Clone + fmt::Debug,
{
    fn clone(&self) -> Self {
        RBTree {
            tree: self.tree.clone(),
        }
    }
}

impl<T> Deref for RBTree<T>
where
    T: fmt::Debug,
{
    type Target = SearchTree<T>;

    fn deref(&self) -> &SearchTree<T> {
        &self.tree
    }
}

impl<T> fmt::Display for RBTree<T>
where
    T: fmt::Debug + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.tree.fmt(f)
    }
}
