// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Heap accounting global allocator.
//!
//! Every allocation updates a live-bytes counter and the high-water mark of
//! each active probe slot. Nothing here may allocate.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

const SLOT_COUNT: usize = 64;

static LIVE_BYTES: AtomicUsize = AtomicUsize::new(0);
static GLOBAL_PEAK: AtomicUsize = AtomicUsize::new(0);
static ACTIVE_SLOTS: AtomicU64 = AtomicU64::new(0);
static SLOT_PEAKS: [AtomicUsize; SLOT_COUNT] = [const { AtomicUsize::new(0) }; SLOT_COUNT];

/// [`System`] allocator wrapper that traces live heap bytes.
pub struct TrackingAllocator;

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            record_growth(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            record_growth(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        LIVE_BYTES.fetch_sub(layout.size(), Ordering::Relaxed);
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                record_growth(new_size - old_size);
            } else {
                LIVE_BYTES.fetch_sub(old_size - new_size, Ordering::Relaxed);
            }
        }
        new_ptr
    }
}

fn record_growth(size: usize) {
    let live = LIVE_BYTES.fetch_add(size, Ordering::Relaxed) + size;
    GLOBAL_PEAK.fetch_max(live, Ordering::Relaxed);

    let mut active = ACTIVE_SLOTS.load(Ordering::Acquire);
    while active != 0 {
        let slot = active.trailing_zeros() as usize;
        SLOT_PEAKS[slot].fetch_max(live, Ordering::Relaxed);
        active &= active - 1;
    }
}

pub(crate) fn live_bytes() -> usize {
    LIVE_BYTES.load(Ordering::Relaxed)
}

pub(crate) fn global_peak() -> usize {
    GLOBAL_PEAK.load(Ordering::Relaxed)
}

/// Claim a free peak slot seeded with the current live size.
/// `None` when every slot is taken.
pub(crate) fn acquire_slot() -> Option<usize> {
    loop {
        let active = ACTIVE_SLOTS.load(Ordering::Acquire);
        if active == u64::MAX {
            return None;
        }
        let slot = (!active).trailing_zeros() as usize;
        let claimed = active | (1u64 << slot);
        if ACTIVE_SLOTS
            .compare_exchange(active, claimed, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            SLOT_PEAKS[slot].store(live_bytes(), Ordering::Relaxed);
            return Some(slot);
        }
    }
}

pub(crate) fn slot_peak(slot: usize) -> usize {
    SLOT_PEAKS[slot]
        .load(Ordering::Relaxed)
        .max(live_bytes())
}

pub(crate) fn release_slot(slot: usize) {
    ACTIVE_SLOTS.fetch_and(!(1u64 << slot), Ordering::AcqRel);
}
