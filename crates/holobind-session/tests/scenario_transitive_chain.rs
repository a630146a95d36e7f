//! A transitive chain resolved through the fixed-operator allow-list.

use holobind_session::Session;

#[test]
fn rex_is_an_animal_via_dog_and_mammal() {
    let mut session = Session::new(1024).unwrap();
    let learned = session.learn(
        "isA Rex Dog\n\
         isA Dog Mammal\n\
         isA Mammal Animal\n\
         @goal isA Rex Animal",
    );
    assert!(learned.success);

    let proof = session.prove("isA Rex Animal", None);
    assert!(proof.valid);
    assert_eq!(proof.method.as_deref(), Some("transitive_chain"));

    let facts: Vec<&str> = proof.steps.iter().filter_map(|s| s.fact.as_deref()).collect();
    assert_eq!(facts, vec!["isA Rex Dog", "isA Dog Mammal", "isA Mammal Animal"]);
}

#[test]
fn adding_more_facts_never_breaks_an_existing_proof() {
    let mut session = Session::new(1024).unwrap();
    session.learn("isA Rex Dog\nisA Dog Mammal\nisA Mammal Animal");
    assert!(session.prove("isA Rex Animal", None).valid);

    session.learn("isA Fido Dog\nlocatedIn Tokyo Japan");
    assert!(session.prove("isA Rex Animal", None).valid);
}
