use super::*;

#[test]
fn test_side() {
    assert_eq!(!Side::Smaller, Side::Greater);
    assert_eq!(!Side::Greater, Side::Smaller);
    assert_eq!(Side::Smaller.as_index(), 0);
    assert_eq!(Side::Greater.as_index(), 1);
}

#[test]
fn test_node() {
    let mut node: Node<u32> = Node::new(10);
    assert_eq!(node.is_black(), false);
    assert_eq!(node.parent, None);
    assert_eq!(node.child(Side::Smaller), None);
    assert_eq!(node.child(Side::Greater), None);
    assert_eq!(node.size, 1);

    node.set_black();
    assert_eq!(node.is_black(), true);
    node.set_red();
    assert_eq!(node.is_black(), false);

    node.set_child(Side::Greater, Some(7));
    assert_eq!(node.child(Side::Greater), Some(7));
    assert_eq!(node.child(Side::Smaller), None);
    node.set_child(Side::Greater, None);
    assert_eq!(node.child(Side::Greater), None);
}
