/*!
 * Allocation Scenario Tests
 * Hand-checked request sequences against the worst-fit address space
 */

use memsim::memory::Fragment;
use memsim::{AddressSpace, Allocator, MemoryInfo, MemoryManager, MemoryRequest, MemoryResponse};
use pretty_assertions::assert_eq;
use MemoryRequest::{Allocate, Free};

fn handles(responses: &[MemoryResponse]) -> Vec<i64> {
    responses.iter().map(|r| r.data).collect()
}

fn layout(space: &AddressSpace) -> Vec<(usize, usize, bool)> {
    space
        .fragments()
        .iter()
        .map(|f: &Fragment| (f.start, f.end, f.free))
        .collect()
}

#[test]
fn test_full_allocation_then_reuse() {
    let mut manager = MemoryManager::new(10);
    let responses = manager.serve_requests(&[
        Allocate(10),
        Allocate(1),
        Free(0),
        Allocate(5),
        Allocate(5),
        Allocate(1),
    ]);

    assert_eq!(handles(&responses), vec![1, -1, 1, 6, -1]);
    assert!(manager.allocator().validate().is_ok());
}

#[test]
fn test_adjacent_frees_coalesce() {
    let mut manager = MemoryManager::new(10);
    let responses = manager.serve_requests(&[Allocate(3), Allocate(3), Allocate(4), Free(0), Free(1)]);
    assert_eq!(handles(&responses), vec![1, 4, 7]);
    assert_eq!(
        layout(manager.allocator()),
        vec![(0, 6, true), (6, 10, false)]
    );

    let responses = manager.serve_requests(&[Allocate(6)]);
    assert_eq!(handles(&responses), vec![1]);
    assert!(manager.allocator().validate().is_ok());
}

#[test]
fn test_worst_fit_picks_largest_not_tightest() {
    let mut space = AddressSpace::new(20);
    // [0,2) [2,4) [4,20): free the first to leave holes of 2 and 16
    space.allocate(2);
    space.allocate(2);
    space.free(0);

    // A best-fit allocator would reuse [0,2); worst-fit carves the 16-byte run
    assert_eq!(space.allocate(2), 5);
    assert_eq!(
        layout(&space),
        vec![(0, 2, true), (2, 4, false), (4, 6, false), (6, 20, true)]
    );
}

#[test]
fn test_ties_break_towards_lower_address() {
    let mut space = AddressSpace::new(9);
    space.allocate(3);
    space.allocate(3);
    space.allocate(3);
    space.free(0);
    space.free(2);

    // Two free runs of 3 bytes: [0,3) and [6,9)
    assert_eq!(space.allocate(3), 1);
    assert_eq!(space.allocate(3), 7);
}

#[test]
fn test_double_free_is_noop() {
    let mut once = AddressSpace::new(16);
    let mut twice = AddressSpace::new(16);
    for space in [&mut once, &mut twice] {
        space.allocate(4);
        space.allocate(4);
        space.free(0);
    }
    twice.free(0);

    assert_eq!(layout(&once), layout(&twice));
    assert_eq!(once.stats().used_memory, twice.stats().used_memory);
    assert_eq!(once.allocate(8), twice.allocate(8));
    assert!(twice.validate().is_ok());
}

#[test]
fn test_free_of_failed_or_free_request_is_noop() {
    let mut space = AddressSpace::new(4);
    assert_eq!(space.allocate(8), -1);
    space.free(0); // failed allocation
    space.free(1); // a free request
    assert_eq!(layout(&space), vec![(0, 4, true)]);
    assert_eq!(space.stats().requests, 3);
    assert_eq!(space.stats().failed_allocations, 1);
}

#[test]
fn test_free_absorbs_predecessor_and_successor() {
    let mut space = AddressSpace::new(12);
    for _ in 0..4 {
        space.allocate(3);
    }
    space.free(0);
    space.free(2);
    assert_eq!(space.stats().free_fragments, 2);

    space.free(1);
    assert_eq!(
        layout(&space),
        vec![(0, 9, true), (9, 12, false)]
    );
    assert_eq!(space.stats().free_fragments, 1);
    assert_eq!(space.largest_free(), 9);
    assert!(space.validate().is_ok());
}

#[test]
fn test_ordinals_count_free_requests() {
    let mut manager = MemoryManager::new(10);
    // Ordinal 1 is the free itself; ordinal 2 is the second allocation
    let responses = manager.serve_requests(&[Allocate(2), Free(0), Allocate(4), Free(2), Allocate(10)]);
    assert_eq!(handles(&responses), vec![1, 1, 1]);
}

#[test]
fn test_stats_track_usage() {
    let mut space = AddressSpace::new(10);
    space.allocate(3);
    space.allocate(4);
    let stats = space.stats();
    assert_eq!(stats.capacity, 10);
    assert_eq!(stats.used_memory, 7);
    assert_eq!(stats.available_memory, 3);
    assert_eq!(stats.fragments, 3);
    assert_eq!(stats.free_fragments, 1);
    assert_eq!(stats.largest_free, 3);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["used_memory"], 7);
}
