/*!
 * Request Stream Tests
 * Parsing the text format and rendering responses end to end
 */

use memsim::core::limits::MAX_CAPACITY;
use memsim::{parse_requests, read_requests, write_responses, InputError, MemoryManager, MemoryRequest};
use pretty_assertions::assert_eq;
use MemoryRequest::{Allocate, Free};

#[test]
fn test_parse_signed_tokens() {
    let stream = parse_requests("10 6\n10 1 -1 5 5 1\n").unwrap();
    assert_eq!(stream.capacity, 10);
    assert_eq!(
        stream.requests,
        vec![Allocate(10), Allocate(1), Free(0), Allocate(5), Allocate(5), Allocate(1)]
    );
    assert_eq!(stream.skipped, 0);
}

#[test]
fn test_zero_tokens_are_skipped_without_taking_an_ordinal() {
    let stream = parse_requests("8 4  3 0 -1 2").unwrap();
    assert_eq!(stream.requests, vec![Allocate(3), Free(0), Allocate(2)]);
    assert_eq!(stream.skipped, 1);
}

#[test]
fn test_truncated_stream() {
    match parse_requests("10 3 1 2") {
        Err(InputError::Truncated { expected, found }) => {
            assert_eq!((expected, found), (3, 2));
        }
        other => panic!("expected truncation error, got {:?}", other),
    }
}

#[test]
fn test_invalid_request_token() {
    match parse_requests("10 2 4 x") {
        Err(InputError::InvalidToken { position, token }) => {
            assert_eq!(position, 3);
            assert_eq!(token, "x");
        }
        other => panic!("expected invalid token error, got {:?}", other),
    }
}

#[test]
fn test_capacity_bounds() {
    assert!(matches!(
        parse_requests("0 0"),
        Err(InputError::CapacityOutOfRange { capacity: 0, .. })
    ));
    let too_big = format!("{} 0", MAX_CAPACITY + 1);
    assert!(matches!(
        parse_requests(&too_big),
        Err(InputError::CapacityOutOfRange { .. })
    ));
    assert!(matches!(
        parse_requests("-4 0"),
        Err(InputError::InvalidToken { position: 0, .. })
    ));
}

#[test]
fn test_trailing_tokens_ignored() {
    let stream = parse_requests("5 1 2 9 9").unwrap();
    assert_eq!(stream.requests, vec![Allocate(2)]);
}

#[test]
fn test_end_to_end_output() {
    let input = "10 8\n3 3 4 -1 -2 6 1 -6\n";
    let stream = read_requests(input.as_bytes()).unwrap();

    let mut manager = MemoryManager::new(stream.capacity);
    let responses = manager.serve_requests(&stream.requests);

    let mut out = Vec::new();
    write_responses(&responses, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "1\n4\n7\n1\n-1\n");
}
