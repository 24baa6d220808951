use vmd_reconcile::*;
use vmd_schemas::ContentItem;

fn abc() -> ContentOrder {
    ContentOrder::load(
        1,
        vec![
            ContentItem::lesson(1, "A"),
            ContentItem::quiz(1, "B"),
            ContentItem::lesson(2, "C"),
        ],
    )
}

#[test]
fn scenario_move_up_swaps_with_previous() {
    let mut o = abc();
    assert!(o.move_item(1, -1));

    let titles: Vec<&str> = o.items().iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["B", "A", "C"]);
    let orders: Vec<u32> = o.items().iter().map(|i| i.order).collect();
    assert_eq!(orders, [1, 2, 3]);
    assert!(o.is_dirty());
}

#[test]
fn scenario_boundary_moves_are_no_ops() {
    let mut o = abc();
    let before = o.clone();

    assert!(!o.move_item(0, -1));
    assert!(!o.move_item(o.len() - 1, 1));

    assert_eq!(o, before);
    assert!(!o.is_dirty());
}

#[test]
fn scenario_down_then_up_restores_sequence() {
    for i in 0..2 {
        let mut o = abc();
        let original = o.items().to_vec();

        assert!(o.move_in(i, Direction::Down));
        assert!(o.move_in(i + 1, Direction::Up));

        assert_eq!(o.items(), original.as_slice());
    }
}

#[test]
fn scenario_move_on_empty_list_does_nothing() {
    let mut o = ContentOrder::load(9, Vec::new());
    assert!(!o.move_item(0, 1));
    assert!(o.is_empty());
    assert!(!o.is_dirty());
}
