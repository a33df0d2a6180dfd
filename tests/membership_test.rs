use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use stream_sketches::{check_uniqueness, MembershipFilter, SetMembership, Uniqueness};

fn random_items(rng: &mut StdRng, prefix: &str, n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let len = rng.gen_range(1..24);
            let suffix: String = (0..len)
                .map(|_| char::from(rng.sample(Alphanumeric)))
                .collect();
            format!("{prefix}{i}-{suffix}")
        })
        .collect()
}

#[test]
fn test_password_uniqueness_scenario() {
    let mut filter = MembershipFilter::new(1000, 3).unwrap();
    for password in ["password123", "admin123", "qwerty123"] {
        filter.add(password);
    }

    let results = check_uniqueness(
        &mut filter,
        ["password123", "newpassword", "admin123", "guest"],
    );

    assert_eq!(
        results,
        vec![
            ("password123".to_owned(), Uniqueness::AlreadyUsed),
            ("newpassword".to_owned(), Uniqueness::Unique),
            ("admin123".to_owned(), Uniqueness::AlreadyUsed),
            ("guest".to_owned(), Uniqueness::Unique),
        ]
    );
    assert!(filter.contains("newpassword"));
    assert!(filter.contains("guest"));
}

#[test]
fn test_no_false_negatives() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut filter = MembershipFilter::new(2048, 4).unwrap();
    let items = random_items(&mut rng, "in", 5000);

    // Saturates the filter on purpose; inserted items must still be found.
    for item in &items {
        filter.add(item);
        assert!(filter.contains(item), "missing {item}");
    }
    for item in &items {
        assert!(filter.contains(item), "missing {item}");
    }
}

#[test]
fn test_bits_are_monotonic() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut filter = MembershipFilter::new(500, 3).unwrap();
    let mut seen = BTreeSet::new();

    for item in random_items(&mut rng, "in", 400) {
        filter.add(&item);
        let ones: BTreeSet<usize> = filter.ones().collect();
        assert!(seen.is_subset(&ones));
        seen = ones;
    }
    assert_eq!(seen.len(), filter.bits_set());
}

#[test]
fn test_deterministic_state() {
    let mut rng = StdRng::seed_from_u64(3);
    let items = random_items(&mut rng, "in", 1000);

    let mut first = MembershipFilter::new(4096, 5).unwrap();
    let mut second = MembershipFilter::new(4096, 5).unwrap();
    for item in &items {
        first.add(item);
        second.add(item);
    }

    assert_eq!(first, second);
    assert!(first.ones().eq(second.ones()));
}

fn observed_false_positive_rate(num_inserted: usize, num_queries: usize, seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut filter = MembershipFilter::new(1000, 3).unwrap();
    for item in random_items(&mut rng, "in", num_inserted) {
        filter.add(&item);
    }

    let false_positives = random_items(&mut rng, "out", num_queries)
        .iter()
        .filter(|item| filter.contains(item))
        .count();
    false_positives as f64 / num_queries as f64
}

fn theoretical_false_positive_rate(m: f64, k: f64, n: f64) -> f64 {
    (1. - (-k * n / m).exp()).powf(k)
}

#[test]
fn test_false_positive_rate_light_load() {
    let observed = observed_false_positive_rate(100, 100_000, 42);
    let expected = theoretical_false_positive_rate(1000., 3., 100.);
    assert!(
        (observed - expected).abs() < 0.012,
        "observed {observed}, expected {expected}"
    );
}

#[test]
fn test_false_positive_rate_heavy_load() {
    let observed = observed_false_positive_rate(300, 100_000, 43);
    let expected = theoretical_false_positive_rate(1000., 3., 300.);
    assert!(
        (observed - expected).abs() < 0.05,
        "observed {observed}, expected {expected}"
    );
}

#[test]
fn test_fill_based_rate_matches_observed() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut filter = MembershipFilter::new(1000, 3).unwrap();
    for item in random_items(&mut rng, "in", 200) {
        filter.add(&item);
    }

    let queries = random_items(&mut rng, "out", 50_000);
    let observed =
        queries.iter().filter(|q| filter.contains(q)).count() as f64 / queries.len() as f64;
    let predicted = filter.false_positive_rate();
    assert!(
        (observed - predicted).abs() < 0.02,
        "observed {observed}, predicted {predicted}"
    );
}

#[test]
fn test_drive_through_trait() {
    fn absorb(filter: &mut dyn SetMembership, items: &[&str]) -> usize {
        items
            .iter()
            .filter(|item| {
                let fresh = !filter.might_contain(item);
                filter.add(item);
                fresh
            })
            .count()
    }

    let mut filter = MembershipFilter::new(1000, 3).unwrap();
    let fresh = absorb(&mut filter, &["a", "b", "a", "c", "b"]);
    assert_eq!(fresh, 3);
}
