//! Static address map of the multi-effects parameter memory.
//!
//! The effect region is a run of 256-byte block slots. Callers name a
//! parameter with an opaque [`ParamId`] (an offset into the local mirror of
//! that region); this crate translates it to and from device addresses and
//! resolves it to the block instance and parameter descriptor it denotes.
//!
//! Nothing here is mutable: both tables are compiled-in data.

pub mod blocks;
pub mod error;
pub mod layout;
pub mod registry;

pub use blocks::{BlockType, ParamDescriptor};
pub use error::{Result, SchemaError};
pub use layout::{
    BLOCK_SLOT_SIZE, EFFECT_REGION_BASE, EFFECT_REGION_SIZE, INSTANCE_COUNT, PATCH_NAME_ADDRESS,
    PATCH_NAME_LEN, PATCH_NUMBER_ADDRESS,
};
pub use registry::{
    block_id, device_address_to_identity, identity_to_device_address, instance, instances,
    is_valid_device_address, is_valid_identity, param_id, resolve_parameter_metadata,
    BlockInstance, ParamId, ParamInfo,
};
