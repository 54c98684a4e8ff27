/*!
 * Request Stream I/O
 *
 * Input is a whitespace-separated list of integers: the capacity, the number
 * of request tokens, then that many signed tokens. A positive token allocates
 * that many bytes; a negative token `-k` frees whatever the k-th request
 * (counting from 1) allocated; a zero token is skipped and takes no ordinal.
 */

use crate::core::limits::MAX_CAPACITY;
use crate::core::types::Size;
use crate::memory::{MemoryRequest, MemoryResponse};
use std::io::{Read, Write};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Missing {0} in request stream header")]
    MissingHeader(&'static str),

    #[error("Invalid token {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },

    #[error("Request stream announced {expected} requests but only {found} were present")]
    Truncated { expected: usize, found: usize },

    #[error("Capacity {capacity} outside supported range 1..={max}")]
    CapacityOutOfRange { capacity: Size, max: Size },

    #[error("Failed to read request stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Parsed request stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestStream {
    pub capacity: Size,
    pub requests: Vec<MemoryRequest>,
    /// Zero tokens dropped while parsing
    pub skipped: usize,
}

/// Read and parse a complete request stream
pub fn read_requests<R: Read>(mut reader: R) -> Result<RequestStream, InputError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_requests(&input)
}

pub fn parse_requests(input: &str) -> Result<RequestStream, InputError> {
    let mut tokens = input.split_whitespace().enumerate();

    let capacity: Size = header(&mut tokens, "capacity")?;
    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(InputError::CapacityOutOfRange {
            capacity,
            max: MAX_CAPACITY,
        });
    }
    let count: usize = header(&mut tokens, "request count")?;

    let mut requests = Vec::with_capacity(count);
    let mut skipped = 0;
    for found in 0..count {
        let (position, token) = tokens.next().ok_or(InputError::Truncated {
            expected: count,
            found,
        })?;
        let value: i64 = token.parse().map_err(|_| InputError::InvalidToken {
            position,
            token: token.to_string(),
        })?;

        match value {
            v if v > 0 => requests.push(MemoryRequest::Allocate(v as Size)),
            v if v < 0 => requests.push(MemoryRequest::Free((v.unsigned_abs() - 1) as usize)),
            _ => {
                warn!(position, "zero request token skipped");
                skipped += 1;
            }
        }
    }

    let trailing = tokens.count();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the announced requests");
    }
    debug!(capacity, requests = requests.len(), skipped, "request stream parsed");

    Ok(RequestStream {
        capacity,
        requests,
        skipped,
    })
}

fn header<'a, I, T>(tokens: &mut I, what: &'static str) -> Result<T, InputError>
where
    I: Iterator<Item = (usize, &'a str)>,
    T: std::str::FromStr,
{
    let (position, token) = tokens.next().ok_or(InputError::MissingHeader(what))?;
    token.parse().map_err(|_| InputError::InvalidToken {
        position,
        token: token.to_string(),
    })
}

/// Render responses one per line
pub fn write_responses<W: Write>(responses: &[MemoryResponse], mut writer: W) -> std::io::Result<()> {
    for response in responses {
        writeln!(writer, "{}", response.data)?;
    }
    Ok(())
}
