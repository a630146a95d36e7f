//! A conjunctive rule that needs backtracking over its conditions.

use holobind_session::Session;

#[test]
fn alice_is_guilty_when_all_three_conjuncts_hold() {
    let mut session = Session::new(1024).unwrap();
    let learned = session.learn(
        "has Alice Motive\n\
         has Alice Opportunity\n\
         has Alice Means\n\
         @c1 has ?x Motive\n\
         @c2 has ?x Opportunity\n\
         @c3 has ?x Means\n\
         @a1 And $c1 $c2\n\
         @a2 And $a1 $c3\n\
         @conc isGuilty ?x\n\
         @r Implies $a2 $conc",
    );
    assert!(learned.success);

    let proof = session.prove("isGuilty Alice", None);
    assert!(proof.valid);
}

#[test]
fn a_missing_conjunct_blocks_the_rule() {
    let mut session = Session::new(1024).unwrap();
    session.learn(
        "has Alice Motive\n\
         has Alice Opportunity\n\
         @c1 has ?x Motive\n\
         @c2 has ?x Opportunity\n\
         @c3 has ?x Means\n\
         @a1 And $c1 $c2\n\
         @a2 And $a1 $c3\n\
         @conc isGuilty ?x\n\
         @r Implies $a2 $conc",
    );
    let proof = session.prove("isGuilty Alice", None);
    assert!(!proof.valid);
}
