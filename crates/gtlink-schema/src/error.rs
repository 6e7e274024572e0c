use crate::registry::ParamId;

/// Errors that can occur while resolving identities and addresses.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The identity lies outside the mirrored effect region.
    #[error("invalid parameter identity {0}")]
    InvalidIdentity(ParamId),

    /// The device address lies outside the effect parameter region.
    #[error("device address {0:#010x} outside the parameter region")]
    InvalidAddress(u32),

    /// No parameter starts at the identity's offset within its block.
    #[error("no parameter at offset {offset:#04x} of block {block}")]
    UnresolvedParameter { block: &'static str, offset: usize },

    /// No block instance has the given name.
    #[error("unknown block '{0}'")]
    UnknownBlock(String),

    /// The block's type has no parameter with the given name.
    #[error("block {block} has no parameter '{name}'")]
    UnknownParameter { block: &'static str, name: String },

    /// Block-level operations need a slot-aligned identity.
    #[error("identity {0} is not aligned to a block slot")]
    Unaligned(ParamId),
}

pub type Result<T> = std::result::Result<T, SchemaError>;
