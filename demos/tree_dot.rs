use ordtree::tree::RBTree;

fn main() {
    let mut tree = RBTree::new();
    for value in &[2, 11, 6, 10, 26, 7, 18, 8, 13, 22, 12, 15, 17] {
        tree.insert(*value);
    }
    print!("{}", tree.dump_as_dot());
}
