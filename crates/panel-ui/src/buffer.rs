//! Draw buffer allocation with region fallback.
//!
//! The stripe (or host-side full-frame) buffer is first requested from fast
//! internal RAM; if that fails any byte-addressable memory is accepted.
//! Only when both fail is the UI left unstarted.

extern crate alloc;

use alloc::vec::Vec;
use log::{debug, error};

/// Where a buffer may live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryRegion {
    /// Internal, 8-bit capable RAM
    Internal,
    /// Any 8-bit capable RAM (PSRAM included)
    Any,
}

/// Source of RGB565 buffers for a given region
pub trait RegionAllocator {
    type Buffer: AsRef<[u16]> + AsMut<[u16]>;

    /// Zeroed buffer of exactly `pixels` pixels, or `None` if the region is out
    fn try_alloc(&mut self, pixels: usize, region: MemoryRegion) -> Option<Self::Buffer>;
}

/// A successfully allocated draw buffer
#[derive(Debug)]
pub struct Allocation<B> {
    pub buffer: B,
    pub region: MemoryRegion,
    pub pixels: usize,
}

impl<B> Allocation<B> {
    pub fn bytes(&self) -> usize {
        self.pixels * 2
    }
}

/// Draw buffer could not be obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Zero pixels were requested
    Empty,
    /// Neither region could satisfy the request
    OutOfMemory { pixels: usize },
    /// The panel did not expose its framebuffer
    NoPanelFramebuffer,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AllocError::Empty => write!(f, "zero-sized draw buffer requested"),
            AllocError::OutOfMemory { pixels } => {
                write!(f, "no memory for {} byte draw buffer", pixels * 2)
            }
            AllocError::NoPanelFramebuffer => write!(f, "panel framebuffer unavailable"),
        }
    }
}

impl core::error::Error for AllocError {}

/// Allocate `pixels` pixels, strict region first then relaxed
pub fn allocate<A: RegionAllocator>(
    allocator: &mut A,
    pixels: usize,
) -> Result<Allocation<A::Buffer>, AllocError> {
    if pixels == 0 {
        error!("Draw buffer allocate failed: {}", AllocError::Empty);
        return Err(AllocError::Empty);
    }

    if let Some(buffer) = allocator.try_alloc(pixels, MemoryRegion::Internal) {
        return Ok(Allocation {
            buffer,
            region: MemoryRegion::Internal,
            pixels,
        });
    }

    debug!(
        "Draw buffer: internal RAM full for {} bytes, using any region",
        pixels * 2
    );

    if let Some(buffer) = allocator.try_alloc(pixels, MemoryRegion::Any) {
        return Ok(Allocation {
            buffer,
            region: MemoryRegion::Any,
            pixels,
        });
    }

    let err = AllocError::OutOfMemory { pixels };
    error!("Draw buffer allocate failed: {}", err);
    Err(err)
}

/// Fallible heap allocator for host builds
///
/// Budgets are in bytes; `None` means unlimited. A budget that cannot hold a
/// request makes that region fail, which lets tests drive every branch of
/// [`allocate`].
#[derive(Debug, Default, Clone)]
pub struct HeapAllocator {
    internal_budget: Option<usize>,
    any_budget: Option<usize>,
}

impl HeapAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_internal_budget(mut self, bytes: usize) -> Self {
        self.internal_budget = Some(bytes);
        self
    }

    pub fn with_any_budget(mut self, bytes: usize) -> Self {
        self.any_budget = Some(bytes);
        self
    }

    /// Both regions refuse every request
    pub fn exhausted() -> Self {
        Self::new().with_internal_budget(0).with_any_budget(0)
    }

    fn budget(&mut self, region: MemoryRegion) -> &mut Option<usize> {
        match region {
            MemoryRegion::Internal => &mut self.internal_budget,
            MemoryRegion::Any => &mut self.any_budget,
        }
    }
}

impl RegionAllocator for HeapAllocator {
    type Buffer = Vec<u16>;

    fn try_alloc(&mut self, pixels: usize, region: MemoryRegion) -> Option<Vec<u16>> {
        let bytes = pixels.checked_mul(2)?;
        let budget = self.budget(region);
        if let Some(left) = *budget {
            if left < bytes {
                return None;
            }
        }

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(pixels).ok()?;
        buffer.resize(pixels, 0);

        if let Some(left) = budget.as_mut() {
            *left -= bytes;
        }
        Some(buffer)
    }
}
