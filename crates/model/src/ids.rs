use rand::Rng;
use rand::distr::{Alphanumeric, Distribution};

/// Default id length for pins and sub-records.
pub const DEFAULT_LEN: usize = 10;

/// Generates a short random identifier: `len` characters drawn uniformly
/// from the 62-symbol alphanumeric alphabet (A-Z, a-z, 0-9).
///
/// Uniqueness is probabilistic, not guaranteed; at the expected collection
/// sizes (tens to low thousands of records) collisions are negligible, and
/// the store rejects duplicate ids on insert anyway.
pub fn generate(len: usize) -> String {
    generate_with(&mut rand::rng(), len)
}

/// `generate` with the default length.
pub fn generate_default() -> String {
    generate(DEFAULT_LEN)
}

/// Generates from an explicit entropy source, for deterministic tests.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len).map(|_| char::from(Alphanumeric.sample(rng))).collect()
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_LEN, generate, generate_default, generate_with};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ids_have_requested_length_and_alphabet() {
        for len in [1, 10, 21] {
            let id = generate(len);
            assert_eq!(id.len(), len);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
        }
        assert_eq!(generate_default().len(), DEFAULT_LEN);
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let a = generate_with(&mut StdRng::seed_from_u64(7), 10);
        let b = generate_with(&mut StdRng::seed_from_u64(7), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn ids_do_not_collide_over_a_realistic_collection() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            assert!(seen.insert(generate_with(&mut rng, DEFAULT_LEN)));
        }
    }
}
