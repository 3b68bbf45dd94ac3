//! Executor fleet specs

use crate::prelude::*;
use crate::prelude::assert_eq;
use jd_core::DomainClass;
use jd_tree::paths::executor_key;
use std::cmp::Ordering;

async fn classify(tree: &MemoryTree<FakeClock>, target: Option<&str>) -> DomainClass {
    jd_engine::classify_executor_fleet(tree, target).await.unwrap()
}

#[test]
fn versions_compare_segment_by_segment() {
    let cases = [
        ("1.0.1", "1.1.0", Ordering::Less),
        ("1.0.9", "1.0.10", Ordering::Less),
        ("1.0.1", "1.0.1", Ordering::Equal),
        ("2.0.0", "1.1.9", Ordering::Greater),
        ("1.0.1.0", "1.0.0.10", Ordering::Greater),
    ];
    for (a, b, expected) in cases {
        assert_eq!(compare_version(a, b).unwrap(), expected, "{a} vs {b}");
    }
}

#[tokio::test]
async fn rolling_upgrade_moves_the_fleet_through_every_class() {
    let tree = tree_at(MARCH_1);
    executor(&tree, "e1", &[]);
    executor(&tree, "e2", &[]);

    assert_eq!(classify(&tree, None).await, DomainClass::Legacy);

    tree.put(&executor_key("e1", "version"), "3.0.0");
    assert_eq!(classify(&tree, None).await, DomainClass::Unknown);

    tree.put(&executor_key("e2", "version"), "3.1.0");
    assert_eq!(classify(&tree, None).await, DomainClass::Current);
    assert_eq!(classify(&tree, Some("3.1.0")).await, DomainClass::Mixed);
    assert_eq!(classify(&tree, Some("3.2")).await, DomainClass::AllBelow);

    tree.put(&executor_key("e1", "version"), "3.1.0.1");
    assert_eq!(classify(&tree, Some("3.1.0")).await, DomainClass::AllAboveOrEqual);
}

#[tokio::test]
async fn empty_registry_is_unknown() {
    let tree = tree_at(MARCH_1);
    let class = jd_engine::classify_executor_fleet(&tree, Some("1.0")).await.unwrap();
    assert_eq!(class, DomainClass::Unknown);
    assert_eq!(class.code(), -1);
}
