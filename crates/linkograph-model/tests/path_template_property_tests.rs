use linkograph_model::{Domain, PathTemplateRegistry};
use proptest::prelude::*;

fn slug() -> impl Strategy<Value = String> {
    // Path segments as they occur in the dataset: lowercase kebab-case.
    proptest::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap()
}

fn domain() -> impl Strategy<Value = Domain> {
    proptest::sample::select(Domain::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn canonical_path_is_idempotent(d in domain(), cat in slug(), sub in slug(), id in slug()) {
        let reg = PathTemplateRegistry::default();
        let a = reg.canonical_path(d, &cat, &sub, &id);
        let b = reg.canonical_path(d, &cat, &sub, &id);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn distinct_ids_never_collide_within_scope(
        d in domain(),
        cat in slug(),
        sub in slug(),
        id1 in slug(),
        id2 in slug(),
    ) {
        prop_assume!(id1 != id2);
        let reg = PathTemplateRegistry::default();
        prop_assert_ne!(
            reg.canonical_path(d, &cat, &sub, &id1),
            reg.canonical_path(d, &cat, &sub, &id2)
        );
    }

    #[test]
    fn path_starts_with_domain_prefix(d in domain(), cat in slug(), sub in slug(), id in slug()) {
        let reg = PathTemplateRegistry::default();
        let path = reg.canonical_path(d, &cat, &sub, &id);
        prop_assert!(path.starts_with(&format!("/{}/", d.slug())));
    }
}
