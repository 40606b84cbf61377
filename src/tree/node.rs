use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colour {
    Black,
    Red,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Colour::*;
        match self {
            Black => write!(f, "black"),
            Red => write!(f, "red"),
        }
    }
}

pub struct NodeData<T: fmt::Debug> {
    colour: Colour,
    parent: Option<Weak<RefCell<NodeData<T>>>>,
    left: Option<Node<T>>,
    right: Option<Node<T>>,
    pub(crate) data: T,
}

impl<T> NodeData<T>
where
    T: fmt::Debug,
{
    fn new(data: T) -> NodeData<T> {
        NodeData {
            colour: Colour::Red,
            parent: None,
            left: None,
            right: None,
            data,
        }
    }
}

/// Shared handle on a tree cell. Children are owned through `left`/`right`,
/// the parent link is weak so ownership flows strictly root to leaves.
pub struct Node<T: fmt::Debug>(Rc<RefCell<NodeData<T>>>);

impl<T> Node<T>
where
    T: fmt::Debug,
{
    pub(crate) fn id(&self) -> String {
        let address = format!("{:?}", self.0.as_ptr());
        address[2..].to_owned()
    }

    pub(crate) fn duplicate(&self) -> Node<T> {
        Node(Rc::clone(&self.0))
    }

    pub fn data(&self) -> T
    where
        T: Clone,
    {
        self.borrow().data.clone()
    }

    pub(crate) fn swap_data(&mut self, other: &mut Node<T>) {
        std::mem::swap(&mut self.borrow_mut().data, &mut other.borrow_mut().data)
    }

    pub fn parent(&self) -> Option<Node<T>> {
        self.borrow().parent.as_ref().and_then(Weak::upgrade).map(Node)
    }

    pub(crate) fn set_parent<I>(&mut self, node: I)
    where
        I: Into<Option<Node<T>>>,
    {
        self.borrow_mut().parent = node.into().map(|n| Rc::downgrade(&n.0))
    }

    pub fn left(&self) -> Option<Node<T>> {
        self.borrow().left.as_ref().map(Node::duplicate)
    }

    pub(crate) fn set_left<I>(&mut self, node: I)
    where
        I: Into<Option<Node<T>>>,
    {
        self.borrow_mut().left = node.into()
    }

    pub fn right(&self) -> Option<Node<T>> {
        self.borrow().right.as_ref().map(Node::duplicate)
    }

    pub(crate) fn set_right<I>(&mut self, node: I)
    where
        I: Into<Option<Node<T>>>,
    {
        self.borrow_mut().right = node.into()
    }

    pub fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    pub(crate) fn is_left_child(&self) -> bool {
        self.parent()
            .as_ref()
            .and_then(Node::left)
            .as_ref()
            .map(|n| n == self)
            .unwrap_or(false)
    }

    pub(crate) fn sibling(&self) -> Option<Node<T>> {
        if self.is_left_child() {
            self.parent()?.right()
        } else {
            self.parent()?.left()
        }
    }

    pub(crate) fn uncle(&self) -> Option<Node<T>> {
        self.parent()?.sibling()
    }

    pub fn colour(&self) -> Colour {
        self.borrow().colour
    }

    pub(crate) fn set_colour(&mut self, colour: Colour) {
        self.borrow_mut().colour = colour;
    }

    /// Rewires whichever child pointer currently holds `old` over to `next`,
    /// fixing `next`'s parent link. Pure pointer surgery, no ordering or
    /// colour logic.
    pub(crate) fn replace_child(&mut self, old: &Node<T>, mut next: Option<Node<T>>) {
        if let Some(ref mut n) = next {
            n.set_parent(self.duplicate());
        }
        if self.left().as_ref() == Some(old) {
            self.set_left(next);
        } else if self.right().as_ref() == Some(old) {
            self.set_right(next);
        }
    }
}

impl<T> From<T> for Node<T>
where
    T: fmt::Debug,
{
    fn from(data: T) -> Node<T> {
        Node(Rc::new(RefCell::new(NodeData::new(data))))
    }
}

impl<T> Deref for Node<T>
where
    T: fmt::Debug,
{
    type Target = Rc<RefCell<NodeData<T>>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Node {{id: {}, p: {:?}, l: {:?}, r: {:?}, data: \"{:?}\"}}",
            self.id(),
            self.parent().as_ref().map(Node::id),
            self.left().as_ref().map(Node::id),
            self.right().as_ref().map(Node::id),
            self.borrow().data,
        )
    }
}

impl<T> PartialEq for Node<T>
where
    T: fmt::Debug,
{
    fn eq(&self, other: &Node<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
