//! Property-based tests for build ordering.
//!
//! Candidate sets are generated acyclic by only letting a unit depend on, or
//! inherit from, units created before it, then shuffled before ordering.

#[cfg(test)]
mod proptest_tests {
    use crate::ordering::order_dependency_projects;
    use crate::unit::{BuildUnit, UnitKey};
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::collections::HashMap;

    fn key(i: usize) -> UnitKey {
        UnitKey::new("org.example", format!("unit{}", i))
    }

    /// Random acyclic candidate set in random input order
    fn acyclic_units() -> impl Strategy<Value = Vec<BuildUnit>> {
        (1usize..12)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(prop::collection::vec(any::<Index>(), 0..3), n),
                    prop::collection::vec(prop::option::of(any::<Index>()), n),
                    prop::collection::vec(any::<bool>(), n),
                )
                    .prop_map(move |(deps, parents, external)| {
                        (0..n)
                            .map(|i| {
                                let mut unit =
                                    BuildUnit::new("org.example", format!("unit{}", i), "1.0");
                                if i > 0 {
                                    for dep in &deps[i] {
                                        unit = unit.with_dependency(key(dep.index(i)));
                                    }
                                    if let Some(parent) = &parents[i] {
                                        unit = unit.with_parent(key(parent.index(i)));
                                    }
                                }
                                if external[i] {
                                    unit = unit.with_dependency(UnitKey::new("org.other", "lib"));
                                }
                                unit
                            })
                            .collect::<Vec<_>>()
                    })
            })
            .prop_shuffle()
    }

    fn positions(order: &[BuildUnit]) -> HashMap<UnitKey, usize> {
        order
            .iter()
            .enumerate()
            .map(|(i, u)| (u.key().clone(), i))
            .collect()
    }

    proptest! {
        /// Property: every in-set dependency is built before its dependent
        #[test]
        fn dependencies_come_first(units in acyclic_units()) {
            let order = order_dependency_projects(units.clone()).unwrap();
            let pos = positions(&order);

            for unit in &units {
                for dep in unit.dependencies() {
                    if let Some(&dep_pos) = pos.get(dep) {
                        prop_assert!(dep_pos < pos[unit.key()], "{} before {}", dep, unit.key());
                    }
                }
            }
        }

        /// Property: every in-set parent is built before its child
        #[test]
        fn parents_come_first(units in acyclic_units()) {
            let order = order_dependency_projects(units.clone()).unwrap();
            let pos = positions(&order);

            for unit in &units {
                if let Some(&parent_pos) = unit.parent().and_then(|p| pos.get(p)) {
                    prop_assert!(parent_pos < pos[unit.key()]);
                }
            }
        }

        /// Property: the order is a permutation of the input
        #[test]
        fn order_is_a_permutation(units in acyclic_units()) {
            let order = order_dependency_projects(units.clone()).unwrap();
            prop_assert_eq!(order.len(), units.len());

            let mut expected: Vec<String> = units.iter().map(BuildUnit::id).collect();
            let mut actual: Vec<String> = order.iter().map(BuildUnit::id).collect();
            expected.sort();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }

        /// Property: same input, same output
        #[test]
        fn ordering_is_deterministic(units in acyclic_units()) {
            let first = order_dependency_projects(units.clone()).unwrap();
            let second = order_dependency_projects(units).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: unrelated units keep their input order
        #[test]
        fn unrelated_units_keep_input_order(
            names in prop::collection::btree_set("[a-z]{1,10}", 0..20),
            seed in any::<Index>(),
        ) {
            let mut units: Vec<BuildUnit> = names
                .iter()
                .map(|n| BuildUnit::new("org.example", n.as_str(), "1.0"))
                .collect();
            if !units.is_empty() {
                let pivot = seed.index(units.len());
                units.rotate_left(pivot);
            }

            let order = order_dependency_projects(units.clone()).unwrap();
            prop_assert_eq!(order, units);
        }
    }
}
