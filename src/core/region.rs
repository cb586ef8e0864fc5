//! # Dirty Regions
//!
//! The screen is split into three independently repainted regions. Anything
//! that changes what a region shows marks it dirty; the render pass repaints
//! dirty regions and clears their bits one at a time.
//!
//! The set lives in an atomic so log producers on other threads can mark the
//! content region without waiting for the render pass to finish.

use bitflags::bitflags;
use std::sync::atomic::{AtomicU8, Ordering};

bitflags! {
    /// A set of screen regions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Regions: u8 {
        const LOGO = 0x1;
        const PROMPT = 0x2;
        const CONTENT = 0x4;
    }
}

/// Thread-safe set of regions awaiting a repaint.
#[derive(Debug, Default)]
pub struct DirtyRegions {
    bits: AtomicU8,
}

impl DirtyRegions {
    pub fn new(initial: Regions) -> Self {
        Self {
            bits: AtomicU8::new(initial.bits()),
        }
    }

    /// Schedule `regions` for repaint. Never clears anything.
    pub fn mark(&self, regions: Regions) {
        self.bits.fetch_or(regions.bits(), Ordering::AcqRel);
    }

    /// Clear `region` and report whether it was set.
    ///
    /// Called right before painting a region, so a mark that lands while the
    /// region is being painted stays set for the next pass.
    pub fn take(&self, region: Regions) -> bool {
        let previous = self.bits.fetch_and(!region.bits(), Ordering::AcqRel);
        Regions::from_bits_truncate(previous).intersects(region)
    }

    pub fn pending(&self) -> Regions {
        Regions::from_bits_truncate(self.bits.load(Ordering::Acquire))
    }

    pub fn is_empty(&self) -> bool {
        self.pending().is_empty()
    }
}
