use std::fmt;

use crate::blocks::{BlockType, ParamDescriptor};
use crate::error::{Result, SchemaError};
use crate::layout::{BLOCK_SLOT_SIZE, EFFECT_REGION_BASE, EFFECT_REGION_SIZE, INSTANCE_COUNT};

/// Opaque parameter identity: an offset into the local effect-region mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(u32);

impl ParamId {
    /// Wrap a raw mirror offset. Not validated; see [`is_valid_identity`].
    pub const fn from_offset(offset: u32) -> Self {
        Self(offset)
    }

    /// Identity of byte `offset` within slot `slot`.
    pub const fn from_slot(slot: usize, offset: usize) -> Self {
        Self((slot * BLOCK_SLOT_SIZE + offset) as u32)
    }

    /// Offset into the mirror.
    pub const fn offset(self) -> usize {
        self.0 as usize
    }

    /// Block slot index.
    pub const fn slot(self) -> usize {
        self.offset() / BLOCK_SLOT_SIZE
    }

    /// Offset within the block slot.
    pub const fn intra_offset(self) -> usize {
        self.offset() % BLOCK_SLOT_SIZE
    }

    /// Whether this identity names the start of a block slot.
    pub const fn is_block_aligned(self) -> bool {
        self.intra_offset() == 0
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:04X}", self.0)
    }
}

/// One 256-byte block slot in address order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockInstance {
    pub name: &'static str,
    pub block_type: BlockType,
}

const fn entry(name: &'static str, block_type: BlockType) -> BlockInstance {
    BlockInstance { name, block_type }
}

static BLOCK_INSTANCES: [BlockInstance; INSTANCE_COUNT] = [
    entry("COMP", BlockType::Comp),
    entry("DIST1", BlockType::Dist),
    entry("DIST2", BlockType::Dist),
    entry("PREAMP1", BlockType::Preamp),
    entry("PREAMP2", BlockType::Preamp),
    entry("NS1", BlockType::Ns),
    entry("NS2", BlockType::Ns),
    entry("EQ1", BlockType::Eq),
    entry("EQ2", BlockType::Eq),
    entry("EQ3", BlockType::Eq),
    entry("EQ4", BlockType::Eq),
    entry("DELAY1", BlockType::Delay),
    entry("DELAY2", BlockType::Delay),
    entry("DELAY3", BlockType::Delay),
    entry("DELAY4", BlockType::Delay),
    entry("MSTDELAY", BlockType::Mstdelay),
    entry("CHORUS", BlockType::Chorus),
    entry("FX1", BlockType::Fx),
    entry("FX1_AGSIM", BlockType::FxAgsim),
    entry("FX1_ACRESO", BlockType::FxAcreso),
    entry("FX1_AWAH", BlockType::FxAwah),
    entry("FX1_CHORUS", BlockType::FxChorus),
    entry("FX1_CVIBE", BlockType::FxCvibe),
    entry("FX1_COMP", BlockType::FxComp),
    entry("FX1_DEFRETTER", BlockType::FxDefretter),
    entry("FX1_FEEDBACKER", BlockType::FxFeedbacker),
    entry("FX1_FLANGER", BlockType::FxFlanger),
    entry("FX1_HARMONIST", BlockType::FxHarmonist),
    entry("FX1_HUMANIZER", BlockType::FxHumanizer),
    entry("FX1_OCTAVE", BlockType::FxOctave),
    entry("FX1_OVERTONE", BlockType::FxOvertone),
    entry("FX1_PAN", BlockType::FxPan),
    entry("FX1_PHASER", BlockType::FxPhaser),
    entry("FX1_PITCHSHIFT", BlockType::FxPitchshift),
    entry("FX1_RINGMOD", BlockType::FxRingmod),
    entry("FX1_ROTARY", BlockType::FxRotary),
    entry("FX1_SITARSIM", BlockType::FxSitarsim),
    entry("FX1_SLICER", BlockType::FxSlicer),
    entry("FX1_SLOWGEAR", BlockType::FxSlowgear),
    entry("FX1_SOUNDHOLD", BlockType::FxSoundhold),
    entry("FX1_SBEND", BlockType::FxSbend),
    entry("FX1_TREMOLO", BlockType::FxTremolo),
    entry("FX1_TWAH", BlockType::FxTwah),
    entry("FX1_VIBRATO", BlockType::FxVibrato),
    entry("FX2", BlockType::Fx),
    entry("FX2_AGSIM", BlockType::FxAgsim),
    entry("FX2_ACRESO", BlockType::FxAcreso),
    entry("FX2_AWAH", BlockType::FxAwah),
    entry("FX2_CHORUS", BlockType::FxChorus),
    entry("FX2_CVIBE", BlockType::FxCvibe),
    entry("FX2_COMP", BlockType::FxComp),
    entry("FX2_DEFRETTER", BlockType::FxDefretter),
    entry("FX2_FEEDBACKER", BlockType::FxFeedbacker),
    entry("FX2_FLANGER", BlockType::FxFlanger),
    entry("FX2_HARMONIST", BlockType::FxHarmonist),
    entry("FX2_HUMANIZER", BlockType::FxHumanizer),
    entry("FX2_OCTAVE", BlockType::FxOctave),
    entry("FX2_OVERTONE", BlockType::FxOvertone),
    entry("FX2_PAN", BlockType::FxPan),
    entry("FX2_PHASER", BlockType::FxPhaser),
    entry("FX2_PITCHSHIFT", BlockType::FxPitchshift),
    entry("FX2_RINGMOD", BlockType::FxRingmod),
    entry("FX2_ROTARY", BlockType::FxRotary),
    entry("FX2_SITARSIM", BlockType::FxSitarsim),
    entry("FX2_SLICER", BlockType::FxSlicer),
    entry("FX2_SLOWGEAR", BlockType::FxSlowgear),
    entry("FX2_SOUNDHOLD", BlockType::FxSoundhold),
    entry("FX2_SBEND", BlockType::FxSbend),
    entry("FX2_TREMOLO", BlockType::FxTremolo),
    entry("FX2_TWAH", BlockType::FxTwah),
    entry("FX2_VIBRATO", BlockType::FxVibrato),
    entry("FX3", BlockType::Fx),
    entry("FX3_AGSIM", BlockType::FxAgsim),
    entry("FX3_ACRESO", BlockType::FxAcreso),
    entry("FX3_AWAH", BlockType::FxAwah),
    entry("FX3_CHORUS", BlockType::FxChorus),
    entry("FX3_CVIBE", BlockType::FxCvibe),
    entry("FX3_COMP", BlockType::FxComp),
    entry("FX3_DEFRETTER", BlockType::FxDefretter),
    entry("FX3_FEEDBACKER", BlockType::FxFeedbacker),
    entry("FX3_FLANGER", BlockType::FxFlanger),
    entry("FX3_HARMONIST", BlockType::FxHarmonist),
    entry("FX3_HUMANIZER", BlockType::FxHumanizer),
    entry("FX3_OCTAVE", BlockType::FxOctave),
    entry("FX3_OVERTONE", BlockType::FxOvertone),
    entry("FX3_PAN", BlockType::FxPan),
    entry("FX3_PHASER", BlockType::FxPhaser),
    entry("FX3_PITCHSHIFT", BlockType::FxPitchshift),
    entry("FX3_RINGMOD", BlockType::FxRingmod),
    entry("FX3_ROTARY", BlockType::FxRotary),
    entry("FX3_SITARSIM", BlockType::FxSitarsim),
    entry("FX3_SLICER", BlockType::FxSlicer),
    entry("FX3_SLOWGEAR", BlockType::FxSlowgear),
    entry("FX3_SOUNDHOLD", BlockType::FxSoundhold),
    entry("FX3_SBEND", BlockType::FxSbend),
    entry("FX3_TREMOLO", BlockType::FxTremolo),
    entry("FX3_TWAH", BlockType::FxTwah),
    entry("FX3_VIBRATO", BlockType::FxVibrato),
    entry("REVERB", BlockType::Reverb),
    entry("PEDALFX", BlockType::Pedalfx),
];

/// Fully resolved parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamInfo {
    pub id: ParamId,
    pub slot: usize,
    pub instance: &'static BlockInstance,
    pub param: &'static ParamDescriptor,
}

impl ParamInfo {
    /// Width of the value in bytes.
    pub fn size(&self) -> usize {
        usize::from(self.param.size)
    }

    /// Device byte address of the parameter.
    pub fn device_address(&self) -> u32 {
        identity_to_device_address(self.id)
    }
}

/// All block slots in address order.
pub fn instances() -> &'static [BlockInstance] {
    &BLOCK_INSTANCES
}

/// Block slot by index.
pub fn instance(slot: usize) -> Option<&'static BlockInstance> {
    BLOCK_INSTANCES.get(slot)
}

/// Whether `id` lies inside a declared block slot of the mirror.
pub fn is_valid_identity(id: ParamId) -> bool {
    id.offset() < EFFECT_REGION_SIZE && id.slot() < BLOCK_INSTANCES.len()
}

/// Whether `address` lies inside the effect parameter region.
pub fn is_valid_device_address(address: u32) -> bool {
    address
        .checked_sub(EFFECT_REGION_BASE)
        .is_some_and(|rel| (rel as usize) < EFFECT_REGION_SIZE)
}

/// Device address of `id`. Only meaningful for valid identities.
pub fn identity_to_device_address(id: ParamId) -> u32 {
    EFFECT_REGION_BASE.wrapping_add(id.0)
}

/// Identity of `address`. Only meaningful for valid device addresses.
pub fn device_address_to_identity(address: u32) -> ParamId {
    ParamId(address.wrapping_sub(EFFECT_REGION_BASE))
}

/// Block instance and parameter descriptor `id` points at.
///
/// The identity must name the first byte of a parameter.
pub fn resolve_parameter_metadata(id: ParamId) -> Result<ParamInfo> {
    if !is_valid_identity(id) {
        return Err(SchemaError::InvalidIdentity(id));
    }

    let slot = id.slot();
    let instance = &BLOCK_INSTANCES[slot];
    let offset = id.intra_offset();

    match instance.block_type.param_at(offset) {
        Some(param) => Ok(ParamInfo {
            id,
            slot,
            instance,
            param,
        }),
        None => Err(SchemaError::UnresolvedParameter {
            block: instance.name,
            offset,
        }),
    }
}

/// Identity of the first byte of the named block slot (case-insensitive).
pub fn block_id(name: &str) -> Result<ParamId> {
    BLOCK_INSTANCES
        .iter()
        .position(|inst| inst.name.eq_ignore_ascii_case(name))
        .map(|slot| ParamId::from_slot(slot, 0))
        .ok_or_else(|| SchemaError::UnknownBlock(name.to_string()))
}

/// Identity of `param` inside the named block slot.
pub fn param_id(block: &str, param: &str) -> Result<ParamId> {
    let base = block_id(block)?;
    let instance = &BLOCK_INSTANCES[base.slot()];
    let desc = instance
        .block_type
        .param(param)
        .ok_or_else(|| SchemaError::UnknownParameter {
            block: instance.name,
            name: param.to_string(),
        })?;
    Ok(ParamId::from_slot(base.slot(), usize::from(desc.offset)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PATCH_NAME_ADDRESS, PATCH_NUMBER_ADDRESS};

    #[test]
    fn slot_order_matches_device_layout() {
        assert_eq!(instances().len(), 100);
        assert_eq!(instance(0).unwrap().name, "COMP");
        assert_eq!(instance(16).unwrap().name, "CHORUS");
        assert_eq!(instance(17).unwrap().block_type, BlockType::Fx);
        assert_eq!(instance(18).unwrap().name, "FX1_AGSIM");
        assert_eq!(instance(44).unwrap().name, "FX2");
        assert_eq!(instance(71).unwrap().name, "FX3");
        assert_eq!(instance(98).unwrap().block_type, BlockType::Reverb);
        assert_eq!(instance(99).unwrap().block_type, BlockType::Pedalfx);
        assert!(instance(100).is_none());
    }

    #[test]
    fn address_translation_roundtrips() {
        for raw in (0..EFFECT_REGION_SIZE as u32).step_by(37) {
            let id = ParamId::from_offset(raw);
            assert!(is_valid_identity(id));
            let addr = identity_to_device_address(id);
            assert!(is_valid_device_address(addr));
            assert_eq!(device_address_to_identity(addr), id);
        }

        for addr in [EFFECT_REGION_BASE, EFFECT_REGION_BASE + 0x63FF, 0x1000_1300] {
            assert_eq!(
                identity_to_device_address(device_address_to_identity(addr)),
                addr
            );
        }
    }

    #[test]
    fn region_bounds() {
        assert!(!is_valid_device_address(EFFECT_REGION_BASE - 1));
        assert!(!is_valid_device_address(
            EFFECT_REGION_BASE + EFFECT_REGION_SIZE as u32
        ));
        assert!(!is_valid_device_address(PATCH_NUMBER_ADDRESS));
        assert!(!is_valid_device_address(PATCH_NAME_ADDRESS));

        assert!(is_valid_identity(ParamId::from_offset(0)));
        assert!(is_valid_identity(ParamId::from_offset(25_599)));
        assert!(!is_valid_identity(ParamId::from_offset(25_600)));
    }

    #[test]
    fn resolve_first_parameter() {
        let info = resolve_parameter_metadata(ParamId::from_offset(0)).unwrap();
        assert_eq!(info.instance.name, "COMP");
        assert_eq!(info.param.name, "sw");
        assert_eq!(info.size(), 1);
        assert_eq!(info.device_address(), 0x1000_1200);
    }

    #[test]
    fn resolve_multi_byte_parameter() {
        let id = param_id("delay2", "time").unwrap();
        assert_eq!(id.slot(), 12);
        assert_eq!(id.intra_offset(), 1);

        let info = resolve_parameter_metadata(id).unwrap();
        assert_eq!(info.instance.name, "DELAY2");
        assert_eq!(info.size(), 4);
        assert_eq!(info.device_address(), 0x1000_1200 + 12 * 256 + 1);
    }

    #[test]
    fn resolve_fails_inside_a_value_or_past_the_block() {
        let inside = ParamId::from_slot(11, 2);
        assert!(matches!(
            resolve_parameter_metadata(inside),
            Err(SchemaError::UnresolvedParameter {
                block: "DELAY1",
                offset: 2
            })
        ));

        let past_end = ParamId::from_slot(0, 0x80);
        assert!(matches!(
            resolve_parameter_metadata(past_end),
            Err(SchemaError::UnresolvedParameter { .. })
        ));

        assert!(matches!(
            resolve_parameter_metadata(ParamId::from_offset(30_000)),
            Err(SchemaError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn every_declared_parameter_resolves_to_itself() {
        for (slot, inst) in instances().iter().enumerate() {
            for desc in inst.block_type.params() {
                let id = ParamId::from_slot(slot, usize::from(desc.offset));
                let info = resolve_parameter_metadata(id).unwrap();
                assert_eq!(info.param, desc);
                assert_eq!(info.instance, inst);
            }
        }
    }

    #[test]
    fn name_lookups() {
        assert_eq!(block_id("fx2_flanger").unwrap().slot(), 53);
        assert!(block_id("FX2").unwrap().is_block_aligned());
        assert!(matches!(
            block_id("FX4"),
            Err(SchemaError::UnknownBlock(_))
        ));
        assert!(matches!(
            param_id("COMP", "nope"),
            Err(SchemaError::UnknownParameter { block: "COMP", .. })
        ));
    }
}
