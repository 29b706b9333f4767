//! Property tests for table construction.

use std::collections::HashSet;

use proptest::prelude::*;
use switchyard_router::{ConfigurationError, HttpMethod, RouteDeclaration, RouteTable};

/// (method index, path id, content-type id); content-type id 0 means "none declared".
type Key = (usize, u8, u8);

fn declaration((method, path, ct): Key) -> RouteDeclaration<Key> {
    let decl = RouteDeclaration::new(
        HttpMethod::ALL[method],
        format!("/p{path}"),
        (method, path, ct),
    );
    if ct == 0 {
        decl
    } else {
        decl.content_type(format!("type/{ct}"))
    }
}

fn keys() -> impl Strategy<Value = HashSet<Key>> {
    prop::collection::hash_set((0..HttpMethod::COUNT, 0u8..16, 0u8..4), 0..64)
}

proptest! {
    #[test]
    fn disjoint_keys_build_and_resolve(keys in keys()) {
        let table = RouteTable::build(keys.iter().copied().map(declaration)).unwrap();
        prop_assert_eq!(table.len(), keys.len());

        for &(method, path, ct) in &keys {
            let content_type = (ct != 0).then(|| format!("type/{ct}"));
            let route = table
                .resolve(HttpMethod::ALL[method], &format!("/p{path}"), content_type.as_deref())
                .unwrap();
            prop_assert_eq!(*route.handler(), (method, path, ct));
        }
    }

    #[test]
    fn repeated_key_always_rejected(
        keys in keys(),
        repeated in (0..HttpMethod::COUNT, 0u8..16, 0u8..4),
        first in any::<prop::sample::Index>(),
        second in any::<prop::sample::Index>(),
    ) {
        let mut declarations: Vec<Key> = keys.into_iter().filter(|k| *k != repeated).collect();
        declarations.insert(first.index(declarations.len() + 1), repeated);
        declarations.insert(second.index(declarations.len() + 1), repeated);

        let err = RouteTable::build(declarations.into_iter().map(declaration)).unwrap_err();
        let is_duplicate = matches!(err, ConfigurationError::DuplicateRoute { .. });
        prop_assert!(is_duplicate);
    }
}
