use crate::domain::{AgeBuckets, VoterFact};

/// Partition one county's facts by age, keeping file order inside each age.
pub fn group_by_age(facts: &[VoterFact]) -> AgeBuckets {
    let mut by_age = AgeBuckets::new();
    for fact in facts {
        by_age.entry(fact.age).or_default().push(*fact);
    }
    by_age
}
