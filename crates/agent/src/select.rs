//! Response pool selection
//!
//! Which member of a pool is returned is presentational variety only.
//! The seam exists so tests can swap the random source for a
//! deterministic one and assert pool membership.

use rand::Rng;

/// Picks one of N acceptable strings
pub trait ResponseSelector: Send + Sync {
    fn pick<'a>(&self, pool: &'a [String]) -> &'a str;
}

/// Uniform random selection
pub struct RandomSelector;

impl ResponseSelector for RandomSelector {
    fn pick<'a>(&self, pool: &'a [String]) -> &'a str {
        if pool.is_empty() {
            return "";
        }
        let idx = rand::thread_rng().gen_range(0..pool.len());
        &pool[idx]
    }
}

/// Always the first entry; deterministic, for tests
pub struct FirstSelector;

impl ResponseSelector for FirstSelector {
    fn pick<'a>(&self, pool: &'a [String]) -> &'a str {
        pool.first().map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_stays_in_pool() {
        let pool = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let selector = RandomSelector;
        for _ in 0..50 {
            let picked = selector.pick(&pool);
            assert!(pool.iter().any(|p| p == picked));
        }
    }

    #[test]
    fn test_first_selector() {
        let pool = vec!["a".to_string(), "b".to_string()];
        assert_eq!(FirstSelector.pick(&pool), "a");
    }
}
