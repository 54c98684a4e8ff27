/*!
 * Randomized Cross-Check
 * Compares the address space with the brute-force reference allocator
 */

use crate::oracle::{random_requests, BitmapAllocator};
use memsim::{MemoryManager, MemoryRequest, MemoryResponse};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 7274;
const MAX_SIZE: usize = 100;

fn serve_both(
    capacity: usize,
    requests: &[MemoryRequest],
) -> (Vec<MemoryResponse>, Vec<MemoryResponse>) {
    let fast = MemoryManager::new(capacity).serve_requests(requests);
    let slow = MemoryManager::with_allocator(BitmapAllocator::new(capacity)).serve_requests(requests);
    (fast, slow)
}

#[test]
fn test_matches_reference_allocator() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for iteration in 0..100 {
        let capacity = rng.gen_range(10..=MAX_SIZE);
        let requests = random_requests(&mut rng, 10_000, 1, MAX_SIZE);

        let (fast, slow) = serve_both(capacity, &requests);
        assert_eq!(fast.len(), slow.len(), "iteration {iteration}");
        if let Some(index) = fast.iter().zip(&slow).position(|(a, b)| a != b) {
            panic!(
                "iteration {iteration} (capacity {capacity}): response {index} was {} but reference gave {}",
                fast[index].data, slow[index].data
            );
        }
    }
}

#[test]
fn test_small_requests_in_large_space() {
    // Many live fragments: exercises deep heaps and arena slot reuse
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    for _ in 0..5 {
        let capacity = rng.gen_range(500..=2_000);
        let requests = random_requests(&mut rng, 4_000, 1, 8);
        let (fast, slow) = serve_both(capacity, &requests);
        assert_eq!(fast, slow);
    }
}

#[test]
fn test_invariants_hold_under_random_load() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);
    for _ in 0..20 {
        let capacity = rng.gen_range(10..=MAX_SIZE);
        let requests = random_requests(&mut rng, 2_000, 1, MAX_SIZE / 2);

        let mut manager = MemoryManager::new(capacity);
        let verified = manager
            .serve_requests_verified(&requests)
            .expect("invariants must hold after every request");
        let plain = MemoryManager::new(capacity).serve_requests(&requests);
        assert_eq!(verified, plain);
    }
}
