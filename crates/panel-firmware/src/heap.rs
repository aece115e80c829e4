//! Draw buffers from `heap_caps` regions.

use core::ffi::c_void;
use core::ptr::NonNull;

use esp_idf_svc::sys;
use panel_ui::buffer::{MemoryRegion, RegionAllocator};

/// Zeroed RGB565 buffer owned by the capability allocator
pub struct CapsBuffer {
    ptr: NonNull<u16>,
    len: usize,
}

impl CapsBuffer {
    fn calloc(pixels: usize, caps: u32) -> Option<Self> {
        let raw = unsafe { sys::heap_caps_calloc(pixels, core::mem::size_of::<u16>(), caps) };
        NonNull::new(raw.cast::<u16>()).map(|ptr| Self { ptr, len: pixels })
    }
}

impl AsRef<[u16]> for CapsBuffer {
    fn as_ref(&self) -> &[u16] {
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl AsMut<[u16]> for CapsBuffer {
    fn as_mut(&mut self) -> &mut [u16] {
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for CapsBuffer {
    fn drop(&mut self) {
        unsafe { sys::heap_caps_free(self.ptr.as_ptr().cast::<c_void>()) }
    }
}

/// `Internal` maps to internal 8-bit RAM, `Any` to any 8-bit RAM (PSRAM too)
#[derive(Debug, Default, Clone, Copy)]
pub struct CapsAllocator;

impl CapsAllocator {
    fn caps(region: MemoryRegion) -> u32 {
        match region {
            MemoryRegion::Internal => sys::MALLOC_CAP_INTERNAL | sys::MALLOC_CAP_8BIT,
            MemoryRegion::Any => sys::MALLOC_CAP_8BIT,
        }
    }
}

impl RegionAllocator for CapsAllocator {
    type Buffer = CapsBuffer;

    fn try_alloc(&mut self, pixels: usize, region: MemoryRegion) -> Option<Self::Buffer> {
        CapsBuffer::calloc(pixels, Self::caps(region))
    }
}

/// Storage handed to the UI runtime
pub enum FirmwareBuffer {
    Caps(CapsBuffer),
    /// The RGB panel's scan-out framebuffer
    Mapped(&'static mut [u16]),
}

impl AsRef<[u16]> for FirmwareBuffer {
    fn as_ref(&self) -> &[u16] {
        match self {
            FirmwareBuffer::Caps(buffer) => buffer.as_ref(),
            FirmwareBuffer::Mapped(frame) => frame,
        }
    }
}

impl AsMut<[u16]> for FirmwareBuffer {
    fn as_mut(&mut self) -> &mut [u16] {
        match self {
            FirmwareBuffer::Caps(buffer) => buffer.as_mut(),
            FirmwareBuffer::Mapped(frame) => frame,
        }
    }
}
