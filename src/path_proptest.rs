//! Property-based tests for path matching functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{glob_match, to_slash_path, PatternSet};
    use proptest::prelude::*;
    use std::path::PathBuf;

    // ============================================================================
    // glob_match property tests
    // ============================================================================

    proptest! {
        /// Property: glob_match is deterministic
        #[test]
        fn glob_match_is_deterministic(
            pattern in "[a-zA-Z0-9*?_./]+",
            path in "[a-zA-Z0-9_./]+",
        ) {
            let result1 = glob_match(&pattern, &path);
            let result2 = glob_match(&pattern, &path);

            prop_assert_eq!(result1.is_ok(), result2.is_ok());
            if let (Ok(a), Ok(b)) = (result1, result2) {
                prop_assert_eq!(a, b);
            }
        }

        /// Property: exact pattern matches only identical path
        #[test]
        fn glob_exact_match_works(path in "[a-zA-Z0-9_]{1,20}") {
            let result = glob_match(&path, &path);
            prop_assert!(result.is_ok());
            prop_assert!(result.unwrap(), "Exact pattern '{}' should match itself", path);
        }

        /// Property: "**/*.java" matches Java sources at any depth
        #[test]
        fn recursive_java_pattern_matches_any_depth(
            dirs in prop::collection::vec("[a-z][a-z0-9]{0,7}", 0..5),
            name in "[A-Z][a-zA-Z0-9]{0,10}",
        ) {
            let mut parts = dirs.clone();
            parts.push(format!("{}.java", name));
            let path = parts.join("/");

            prop_assert!(glob_match("**/*.java", &path).unwrap(), "should match '{}'", path);
        }

        /// Property: a single "*" never crosses a directory separator
        #[test]
        fn single_star_stays_in_one_directory(
            dir in "[a-z]{1,8}",
            name in "[A-Z][a-zA-Z0-9]{0,10}",
        ) {
            let path = format!("{}/{}.java", dir, name);
            prop_assert!(!glob_match("*.java", &path).unwrap());
        }
    }

    // ============================================================================
    // PatternSet and to_slash_path property tests
    // ============================================================================

    proptest! {
        /// Property: excluding what is included selects nothing
        #[test]
        fn exclude_overrides_include(path in "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.java") {
            let set = PatternSet::new(["**/*.java"], ["**/*.java"]).unwrap();
            prop_assert!(!set.matches(&path));
        }

        /// Property: to_slash_path joins normal components with '/'
        #[test]
        fn slash_path_joins_components(parts in prop::collection::vec("[a-zA-Z0-9_.-]{1,8}", 1..6)) {
            // "." and ".." are not normal components
            prop_assume!(parts.iter().all(|p| p != "." && p != ".."));
            let path: PathBuf = parts.iter().collect();
            prop_assert_eq!(to_slash_path(&path), parts.join("/"));
        }
    }
}
