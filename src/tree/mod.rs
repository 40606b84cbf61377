mod node;
mod rbtree;
mod search;
mod validate;

pub use node::{Colour, Node};
pub use rbtree::RBTree;
pub use search::SearchTree;
pub use validate::validate_tree;
