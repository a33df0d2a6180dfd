use crate::set_membership::SetMembership;
use std::fmt::{Display, Formatter};

/// Outcome of checking one candidate against a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uniqueness {
    /// The filter has (probably) seen the candidate before.
    AlreadyUsed,
    /// The candidate was definitely new and has now been recorded.
    Unique,
    /// The candidate was empty and was not checked.
    Invalid,
}

impl Display for Uniqueness {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Uniqueness::AlreadyUsed => "already used",
            Uniqueness::Unique => "unique",
            Uniqueness::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// Classifies each candidate in order, recording the unique ones in `filter`.
///
/// A candidate repeated later in the same batch is reported as already used.
pub fn check_uniqueness<F, I, S>(filter: &mut F, candidates: I) -> Vec<(String, Uniqueness)>
where
    F: SetMembership + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let status = if candidate.is_empty() {
                Uniqueness::Invalid
            } else if filter.might_contain(candidate) {
                Uniqueness::AlreadyUsed
            } else {
                filter.add(candidate);
                Uniqueness::Unique
            };
            (candidate.to_owned(), status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::set_membership::bloom::MembershipFilter;

    #[test]
    fn test_repeated_within_batch() {
        let mut filter = MembershipFilter::new(1000, 3).unwrap();

        let results = check_uniqueness(&mut filter, ["guest", "", "guest"]);
        assert_eq!(
            results,
            vec![
                ("guest".to_owned(), Uniqueness::Unique),
                (String::new(), Uniqueness::Invalid),
                ("guest".to_owned(), Uniqueness::AlreadyUsed),
            ]
        );
    }

    #[test]
    fn test_owned_candidates() {
        let mut filter = MembershipFilter::new(1000, 3).unwrap();
        let candidates: Vec<String> = (0..10).map(|i| format!("pw-{i}")).collect();

        let results = check_uniqueness(&mut filter, &candidates);
        assert!(results.iter().all(|(_, status)| *status == Uniqueness::Unique));
        assert!(candidates.iter().all(|c| filter.contains(c)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Uniqueness::AlreadyUsed.to_string(), "already used");
        assert_eq!(Uniqueness::Unique.to_string(), "unique");
        assert_eq!(Uniqueness::Invalid.to_string(), "invalid");
    }
}
