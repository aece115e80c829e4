use esp_idf_svc::sys;
use panel_ui::clock::Clock;

/// Log heap usage per region and current task stack headroom.
pub fn log_heap(label: &str) {
    let free_heap = unsafe { sys::esp_get_free_heap_size() };
    let min_free = unsafe { sys::esp_get_minimum_free_heap_size() };
    let free_internal =
        unsafe { sys::heap_caps_get_free_size(sys::MALLOC_CAP_INTERNAL | sys::MALLOC_CAP_8BIT) };
    let largest_internal = unsafe {
        sys::heap_caps_get_largest_free_block(sys::MALLOC_CAP_INTERNAL | sys::MALLOC_CAP_8BIT)
    };
    let free_psram = unsafe { sys::heap_caps_get_free_size(sys::MALLOC_CAP_SPIRAM) };
    let stack_hwm_words = unsafe { sys::uxTaskGetStackHighWaterMark(core::ptr::null_mut()) };
    let stack_hwm_bytes = (stack_hwm_words as usize) * core::mem::size_of::<sys::StackType_t>();
    log::info!(
        "[MEM] {}: free={} min_free={} internal={} largest_internal={} psram={} stack_hwm={}B",
        label,
        free_heap,
        min_free,
        free_internal,
        largest_internal,
        free_psram,
        stack_hwm_bytes
    );
}

/// Milliseconds from the ESP high-resolution timer
#[derive(Debug, Default, Clone, Copy)]
pub struct EspClock;

impl Clock for EspClock {
    fn now_ms(&self) -> u64 {
        let micros = unsafe { sys::esp_timer_get_time() };
        u64::try_from(micros / 1_000).unwrap_or(0)
    }
}
