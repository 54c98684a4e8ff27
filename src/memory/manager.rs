/*!
 * Memory Manager
 * Serves an ordered request stream against one allocator
 */

use super::address_space::AddressSpace;
use super::traits::{Allocator, MemoryInfo};
use super::types::{MemoryError, MemoryRequest, MemoryResponse, MemoryResult};
use crate::core::types::Size;
use tracing::{error, instrument};

/// Request processor
///
/// Requests are applied strictly in order. Every request, allocation or
/// free, takes the next ordinal; only allocations produce a response.
#[derive(Debug, Clone)]
pub struct MemoryManager<A = AddressSpace> {
    allocator: A,
}

impl MemoryManager<AddressSpace> {
    pub fn new(capacity: Size) -> Self {
        Self::with_allocator(AddressSpace::new(capacity))
    }
}

impl<A: Allocator> MemoryManager<A> {
    pub fn with_allocator(allocator: A) -> Self {
        Self { allocator }
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    pub fn into_inner(self) -> A {
        self.allocator
    }

    /// Apply one request; allocations yield a response, frees are silent
    pub fn serve_request(&mut self, request: MemoryRequest) -> Option<MemoryResponse> {
        match request {
            MemoryRequest::Allocate(size) => {
                Some(MemoryResponse::new(self.allocator.allocate(size)))
            }
            MemoryRequest::Free(ordinal) => {
                self.allocator.free(ordinal);
                None
            }
        }
    }

    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub fn serve_requests(&mut self, requests: &[MemoryRequest]) -> Vec<MemoryResponse> {
        requests
            .iter()
            .filter_map(|&request| self.serve_request(request))
            .collect()
    }
}

impl<A: Allocator + MemoryInfo> MemoryManager<A> {
    /// Same as `serve_requests`, validating the allocator after every request
    #[instrument(skip(self, requests), fields(requests = requests.len()))]
    pub fn serve_requests_verified(
        &mut self,
        requests: &[MemoryRequest],
    ) -> MemoryResult<Vec<MemoryResponse>> {
        let mut responses = Vec::new();
        for (ordinal, &request) in requests.iter().enumerate() {
            responses.extend(self.serve_request(request));
            if let Err(e) = self.allocator.validate() {
                error!(ordinal, ?request, error = %e, "allocator invariant violated");
                return Err(match e {
                    MemoryError::CorruptionDetected(msg) => MemoryError::CorruptionDetected(
                        format!("after request {ordinal}: {msg}"),
                    ),
                    other => other,
                });
            }
        }
        Ok(responses)
    }

    pub fn capacity(&self) -> Size {
        self.allocator.capacity()
    }
}
