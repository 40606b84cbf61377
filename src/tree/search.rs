use std::fmt;
use std::rc::Rc;

use super::node::{Colour, Node};

/// Binary search tree ordered by an injected predicate, no balancing policy.
/// `order(a, b)` means "a sorts at or before b"; equality is derived from it.
pub struct SearchTree<T: fmt::Debug> {
    pub(crate) root: Option<Node<T>>,
    order: Rc<dyn Fn(&T, &T) -> bool>,
}

impl<T> SearchTree<T>
where
    T: fmt::Debug,
{
    pub fn new() -> SearchTree<T>
    where
        T: Ord,
    {
        SearchTree::with_order(|a, b| a <= b)
    }

    pub fn with_order<F>(order: F) -> SearchTree<T>
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        SearchTree {
            root: None,
            order: Rc::new(order),
        }
    }

    pub(crate) fn ordered(&self, a: &T, b: &T) -> bool {
        (self.order)(a, b)
    }

    pub(crate) fn equal(&self, a: &T, b: &T) -> bool {
        self.ordered(a, b) && self.ordered(b, a)
    }

    pub fn root(&self) -> Option<Node<T>> {
        self.root.as_ref().map(Node::duplicate)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        Self::count(self.root.as_ref())
    }

    fn count(node: Option<&Node<T>>) -> usize {
        match node {
            Some(node) => {
                1 + Self::count(node.left().as_ref()) + Self::count(node.right().as_ref())
            }
            None => 0,
        }
    }

    pub fn insert(&mut self, data: T) -> Node<T> {
        trace!("insert {:?}", data);
        if let Some(ref root) = self.root {
            self.insert_from(root.duplicate(), data)
        } else {
            let node = Node::from(data);
            self.root = Some(node.duplicate());
            node
        }
    }

    // values comparing equal descend right, so duplicates sort after their peers
    fn insert_from(&mut self, mut root: Node<T>, data: T) -> Node<T> {
        if self.ordered(&root.borrow().data, &data) {
            if let Some(right) = root.right() {
                self.insert_from(right, data)
            } else {
                let mut node = Node::from(data);
                node.set_parent(root.duplicate());
                root.set_right(node.duplicate());
                node
            }
        } else if let Some(left) = root.left() {
            self.insert_from(left, data)
        } else {
            let mut node = Node::from(data);
            node.set_parent(root.duplicate());
            root.set_left(node.duplicate());
            node
        }
    }

    pub fn find(&self, data: &T) -> Option<Node<T>> {
        trace!("find {:?}", data);
        let mut cursor = self.root.as_ref().map(Node::duplicate);
        while let Some(ref node) = cursor {
            if self.equal(&node.borrow().data, data) {
                return Some(node.duplicate());
            }
            cursor = if self.ordered(&node.borrow().data, data) {
                node.right()
            } else {
                node.left()
            };
        }
        None
    }

    pub fn has(&self, data: &T) -> bool {
        self.find(data).is_some()
    }

    pub fn remove(&mut self, data: &T) -> Option<Node<T>> {
        match self.find(data) {
            Some(mut node) => {
                self.delete_node(&mut node);
                Some(node)
            }
            None => None,
        }
    }

    /// Structural removal with no rebalancing: leaves unlink, single children
    /// splice up, two-children nodes take their successor's value and the
    /// successor is removed instead.
    pub fn delete_node(&mut self, node: &mut Node<T>) {
        trace!("delete {:?}", node);
        if node.left().is_some() && node.right().is_some() {
            let right = node.right().expect("two-children node must have a right child");
            let mut successor = Self::leftmost(right);
            node.swap_data(&mut successor);
            self.delete_node(&mut successor);
        } else {
            let next = node.left().or_else(|| node.right());
            self.transplant(node, next);
        }
    }

    /// Detaches `node` from its parent (or the root slot) and installs `next`
    /// in its place; `next` may be absent.
    pub(crate) fn transplant(&mut self, node: &Node<T>, mut next: Option<Node<T>>) {
        match node.parent() {
            Some(ref mut parent) => parent.replace_child(node, next),
            None => {
                if let Some(ref mut n) = next {
                    n.set_parent(None);
                }
                self.root = next;
            }
        }
    }

    pub(crate) fn leftmost(node: Node<T>) -> Node<T> {
        let mut cursor = node;
        while let Some(left) = cursor.left() {
            cursor = left;
        }
        cursor
    }

    pub(crate) fn rotate_left(&mut self, mut node: Node<T>) -> Node<T> {
        trace!("rotate left: {:?}", node);
        let mut promoted = node.right().expect("rotate left requires a right child");
        node.set_right(promoted.left());
        if let Some(ref mut inner) = node.right() {
            inner.set_parent(node.duplicate());
        }
        match node.parent() {
            Some(ref mut parent) => parent.replace_child(&node, Some(promoted.duplicate())),
            None => {
                promoted.set_parent(None);
                self.root = Some(promoted.duplicate());
            }
        }
        promoted.set_left(node.duplicate());
        node.set_parent(promoted.duplicate());
        promoted
    }

    pub(crate) fn rotate_right(&mut self, mut node: Node<T>) -> Node<T> {
        trace!("rotate right: {:?}", node);
        let mut promoted = node.left().expect("rotate right requires a left child");
        node.set_left(promoted.right());
        if let Some(ref mut inner) = node.left() {
            inner.set_parent(node.duplicate());
        }
        match node.parent() {
            Some(ref mut parent) => parent.replace_child(&node, Some(promoted.duplicate())),
            None => {
                promoted.set_parent(None);
                self.root = Some(promoted.duplicate());
            }
        }
        promoted.set_right(node.duplicate());
        node.set_parent(promoted.duplicate());
        promoted
    }

    fn clone_subtree(node: Option<Node<T>>) -> Option<Node<T>>
    where
        T: Clone,
    {
        let sub = node?;

        let mut cloned = Node::from(sub.data());
        cloned.set_colour(sub.colour());
        cloned.set_left(Self::clone_subtree(sub.left()));
        cloned.set_right(Self::clone_subtree(sub.right()));
        if let Some(ref mut left) = cloned.left() {
            left.set_parent(cloned.duplicate());
        }
        if let Some(ref mut right) = cloned.right() {
            right.set_parent(cloned.duplicate());
        }
        Some(cloned)
    }
}

impl<T> Default for SearchTree<T>
where
    T: fmt::Debug + Ord,
{
    fn default() -> SearchTree<T> {
        SearchTree::new()
    }
}

impl<T> Clone for SearchTree<T>
where
    T: Clone + fmt::Debug,
{
    fn clone(&self) -> Self {
        SearchTree {
            root: Self::clone_subtree(self.root.as_ref().map(Node::duplicate)),
            order: Rc::clone(&self.order),
        }
    }
}

impl<T> fmt::Display for SearchTree<T>
where
    T: fmt::Debug + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root {
            Some(ref root) => write_node(f, root),
            None => Ok(()),
        }
    }
}

// childless node: the value, prefixed R when red; otherwise value(left,right)
// with an empty string standing in for an absent child
fn write_node<T>(f: &mut fmt::Formatter, node: &Node<T>) -> fmt::Result
where
    T: fmt::Debug + fmt::Display,
{
    if node.colour() == Colour::Red {
        write!(f, "R")?;
    }
    write!(f, "{}", node.borrow().data)?;
    if node.is_leaf() {
        return Ok(());
    }
    write!(f, "(")?;
    if let Some(ref left) = node.left() {
        write_node(f, left)?;
    }
    write!(f, ",")?;
    if let Some(ref right) = node.right() {
        write_node(f, right)?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_node {
        ($node:expr, $data:expr) => {
            assert_eq!($node.as_ref().unwrap().borrow().data, $data);
        };
    }

    #[test]
    fn insert_descends_by_order() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(3);
        tree.insert(7);
        tree.insert(6);

        assert_node!(tree.root, 5);
        assert_node!(tree.root.as_ref().unwrap().left(), 3);
        assert_node!(tree.root.as_ref().unwrap().right(), 7);
        assert_node!(tree.root.as_ref().unwrap().right().unwrap().left(), 6);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn equal_values_go_right() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(5);

        assert_node!(tree.root, 5);
        assert!(tree.root.as_ref().unwrap().left().is_none());
        assert_node!(tree.root.as_ref().unwrap().right(), 5);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn find_and_has() {
        let mut tree = SearchTree::new();
        assert!(!tree.has(&5));
        tree.insert(5);
        tree.insert(3);
        tree.insert(7);

        assert_eq!(tree.find(&3).unwrap().data(), 3);
        assert!(tree.has(&7));
        assert!(tree.find(&99).is_none());
    }

    #[test]
    fn remove_leaf() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(3);
        tree.insert(7);

        assert!(tree.remove(&3).is_some());
        assert!(tree.root.as_ref().unwrap().left().is_none());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_single_node_empties_the_tree() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        assert!(tree.remove(&5).is_some());
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_node_with_one_child_splices_it_up() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(3);
        tree.insert(2);

        assert!(tree.remove(&3).is_some());
        assert_node!(tree.root.as_ref().unwrap().left(), 2);
        assert_eq!(tree.root.as_ref().unwrap().left().unwrap().parent().unwrap().data(), 5);
    }

    #[test]
    fn remove_node_with_two_children_substitutes_the_successor() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(3);
        tree.insert(8);
        tree.insert(6);
        tree.insert(9);
        tree.insert(7);

        assert!(tree.remove(&8).is_some());
        // the successor's value lands in the removed slot, its node goes away
        assert_node!(tree.root.as_ref().unwrap().right(), 9);
        assert_node!(tree.root.as_ref().unwrap().right().unwrap().left(), 6);
        assert_eq!(tree.len(), 5);
        assert!(!tree.has(&8));
        assert!(tree.has(&7));
    }

    #[test]
    fn remove_absent_value_is_a_no_op() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        assert!(tree.remove(&9).is_none());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn rotate_left_promotes_the_right_child() {
        let mut tree = SearchTree::new();
        tree.insert(10);
        tree.insert(20);
        tree.insert(15);

        let root = tree.root().unwrap();
        let promoted = tree.rotate_left(root);
        assert_eq!(promoted.data(), 20);
        assert_node!(tree.root, 20);
        assert_node!(tree.root.as_ref().unwrap().left(), 10);
        // the promoted node's former left subtree hangs off the demoted node
        assert_node!(tree.root.as_ref().unwrap().left().unwrap().right(), 15);
        assert_eq!(tree.root.as_ref().unwrap().left().unwrap().parent().unwrap().data(), 20);
    }

    #[test]
    fn rotate_right_promotes_the_left_child() {
        let mut tree = SearchTree::new();
        tree.insert(20);
        tree.insert(10);
        tree.insert(15);

        let root = tree.root().unwrap();
        let promoted = tree.rotate_right(root);
        assert_eq!(promoted.data(), 10);
        assert_node!(tree.root, 10);
        assert_node!(tree.root.as_ref().unwrap().right(), 20);
        assert_node!(tree.root.as_ref().unwrap().right().unwrap().left(), 15);
    }

    #[test]
    fn rotate_below_the_root_rewires_the_parent() {
        let mut tree = SearchTree::new();
        tree.insert(5);
        tree.insert(10);
        tree.insert(20);

        let node = tree.find(&10).unwrap();
        tree.rotate_left(node);
        assert_node!(tree.root, 5);
        assert_node!(tree.root.as_ref().unwrap().right(), 20);
        assert_node!(tree.root.as_ref().unwrap().right().unwrap().left(), 10);
    }

    #[test]
    #[should_panic(expected = "rotate left requires a right child")]
    fn rotate_left_without_right_child() {
        let mut tree = SearchTree::new();
        let node = tree.insert(10);
        tree.rotate_left(node);
    }

    #[test]
    #[should_panic(expected = "rotate right requires a left child")]
    fn rotate_right_without_left_child() {
        let mut tree = SearchTree::new();
        let node = tree.insert(10);
        tree.rotate_right(node);
    }

    #[test]
    fn reversed_order_flips_the_descent() {
        let mut tree = SearchTree::with_order(|a: &i32, b: &i32| a >= b);
        tree.insert(5);
        tree.insert(3);
        tree.insert(7);

        assert_node!(tree.root.as_ref().unwrap().right(), 3);
        assert_node!(tree.root.as_ref().unwrap().left(), 7);
        assert!(tree.has(&3));
        assert!(tree.has(&7));
    }
}
