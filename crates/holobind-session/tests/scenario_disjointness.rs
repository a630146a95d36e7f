//! Disjointness refutation of a goal via a declared mutual exclusion.

use holobind_session::Session;

#[test]
fn tokyo_in_europe_is_refuted_via_mutually_disjoint_continents() {
    let mut session = Session::new(1024).unwrap();
    let learned = session.learn(
        "locatedIn Tokyo Japan\n\
         locatedIn Japan Asia\n\
         isA Asia Continent\n\
         isA Europe Continent\n\
         mutuallyDisjoint Continent",
    );
    assert!(learned.success);

    let proof = session.prove("locatedIn Tokyo Europe", None);
    assert!(proof.valid);
    assert_eq!(proof.result, Some(false));
    assert_eq!(proof.method.as_deref(), Some("disjoint_proof"));

    let has_disjoint_check = proof.steps.iter().any(|s| s.operation == "disjoint_check");
    assert!(has_disjoint_check);
}
