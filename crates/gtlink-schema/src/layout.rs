//! Fixed addresses of the device memory map.

/// Current patch number.
pub const PATCH_NUMBER_ADDRESS: u32 = 0x0000_0000;

/// Current patch name.
pub const PATCH_NAME_ADDRESS: u32 = 0x1000_0000;

/// Patch name length in bytes.
pub const PATCH_NAME_LEN: usize = 16;

/// First byte of the effect parameter region.
pub const EFFECT_REGION_BASE: u32 = 0x1000_1200;

/// Width of every block slot.
pub const BLOCK_SLOT_SIZE: usize = 256;

/// Number of block slots in the effect region.
pub const INSTANCE_COUNT: usize = 100;

/// Size of the effect region and of its local mirror.
pub const EFFECT_REGION_SIZE: usize = INSTANCE_COUNT * BLOCK_SLOT_SIZE;
