//! Static block type metadata.
//!
//! Each type lists its parameters in address order. Offsets are relative to
//! the start of the block's 256-byte slot; multi-byte values occupy
//! consecutive addresses.

/// One parameter inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamDescriptor {
    pub name: &'static str,
    /// Offset from the start of the block slot.
    pub offset: u8,
    /// Width in bytes: 1, 2 or 4.
    pub size: u8,
}

const fn param(name: &'static str, offset: u8, size: u8) -> ParamDescriptor {
    ParamDescriptor { name, offset, size }
}

/// Effect block type. Several slots may share one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Comp,
    Dist,
    Preamp,
    Ns,
    Eq,
    Delay,
    Mstdelay,
    Chorus,
    Fx,
    FxAgsim,
    FxAcreso,
    FxAwah,
    FxChorus,
    FxCvibe,
    FxComp,
    FxDefretter,
    FxFeedbacker,
    FxFlanger,
    FxHarmonist,
    FxHumanizer,
    FxOctave,
    FxOvertone,
    FxPan,
    FxPhaser,
    FxPitchshift,
    FxRingmod,
    FxRotary,
    FxSitarsim,
    FxSlicer,
    FxSlowgear,
    FxSoundhold,
    FxSbend,
    FxTremolo,
    FxTwah,
    FxVibrato,
    Reverb,
    Pedalfx,
}

impl BlockType {
    /// Every type, in declaration order.
    pub const ALL: [BlockType; 37] = [
        BlockType::Comp,
        BlockType::Dist,
        BlockType::Preamp,
        BlockType::Ns,
        BlockType::Eq,
        BlockType::Delay,
        BlockType::Mstdelay,
        BlockType::Chorus,
        BlockType::Fx,
        BlockType::FxAgsim,
        BlockType::FxAcreso,
        BlockType::FxAwah,
        BlockType::FxChorus,
        BlockType::FxCvibe,
        BlockType::FxComp,
        BlockType::FxDefretter,
        BlockType::FxFeedbacker,
        BlockType::FxFlanger,
        BlockType::FxHarmonist,
        BlockType::FxHumanizer,
        BlockType::FxOctave,
        BlockType::FxOvertone,
        BlockType::FxPan,
        BlockType::FxPhaser,
        BlockType::FxPitchshift,
        BlockType::FxRingmod,
        BlockType::FxRotary,
        BlockType::FxSitarsim,
        BlockType::FxSlicer,
        BlockType::FxSlowgear,
        BlockType::FxSoundhold,
        BlockType::FxSbend,
        BlockType::FxTremolo,
        BlockType::FxTwah,
        BlockType::FxVibrato,
        BlockType::Reverb,
        BlockType::Pedalfx,
    ];

    /// Canonical upper-case name, e.g. `FX_FLANGER`.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Comp => "COMP",
            BlockType::Dist => "DIST",
            BlockType::Preamp => "PREAMP",
            BlockType::Ns => "NS",
            BlockType::Eq => "EQ",
            BlockType::Delay => "DELAY",
            BlockType::Mstdelay => "MSTDELAY",
            BlockType::Chorus => "CHORUS",
            BlockType::Fx => "FX",
            BlockType::FxAgsim => "FX_AGSIM",
            BlockType::FxAcreso => "FX_ACRESO",
            BlockType::FxAwah => "FX_AWAH",
            BlockType::FxChorus => "FX_CHORUS",
            BlockType::FxCvibe => "FX_CVIBE",
            BlockType::FxComp => "FX_COMP",
            BlockType::FxDefretter => "FX_DEFRETTER",
            BlockType::FxFeedbacker => "FX_FEEDBACKER",
            BlockType::FxFlanger => "FX_FLANGER",
            BlockType::FxHarmonist => "FX_HARMONIST",
            BlockType::FxHumanizer => "FX_HUMANIZER",
            BlockType::FxOctave => "FX_OCTAVE",
            BlockType::FxOvertone => "FX_OVERTONE",
            BlockType::FxPan => "FX_PAN",
            BlockType::FxPhaser => "FX_PHASER",
            BlockType::FxPitchshift => "FX_PITCHSHIFT",
            BlockType::FxRingmod => "FX_RINGMOD",
            BlockType::FxRotary => "FX_ROTARY",
            BlockType::FxSitarsim => "FX_SITARSIM",
            BlockType::FxSlicer => "FX_SLICER",
            BlockType::FxSlowgear => "FX_SLOWGEAR",
            BlockType::FxSoundhold => "FX_SOUNDHOLD",
            BlockType::FxSbend => "FX_SBEND",
            BlockType::FxTremolo => "FX_TREMOLO",
            BlockType::FxTwah => "FX_TWAH",
            BlockType::FxVibrato => "FX_VIBRATO",
            BlockType::Reverb => "REVERB",
            BlockType::Pedalfx => "PEDALFX",
        }
    }

    /// Look a type up by its canonical name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    /// Parameters in address order.
    pub fn params(self) -> &'static [ParamDescriptor] {
        match self {
            BlockType::Comp => tables::COMP,
            BlockType::Dist => tables::DIST,
            BlockType::Preamp => tables::PREAMP,
            BlockType::Ns => tables::NS,
            BlockType::Eq => tables::EQ,
            BlockType::Delay => tables::DELAY,
            BlockType::Mstdelay => tables::MSTDELAY,
            BlockType::Chorus => tables::CHORUS,
            BlockType::Fx => tables::FX,
            BlockType::FxAgsim => tables::FX_AGSIM,
            BlockType::FxAcreso => tables::FX_ACRESO,
            BlockType::FxAwah => tables::FX_AWAH,
            BlockType::FxChorus => tables::FX_CHORUS,
            BlockType::FxCvibe => tables::FX_CVIBE,
            BlockType::FxComp => tables::FX_COMP,
            BlockType::FxDefretter => tables::FX_DEFRETTER,
            BlockType::FxFeedbacker => tables::FX_FEEDBACKER,
            BlockType::FxFlanger => tables::FX_FLANGER,
            BlockType::FxHarmonist => tables::FX_HARMONIST,
            BlockType::FxHumanizer => tables::FX_HUMANIZER,
            BlockType::FxOctave => tables::FX_OCTAVE,
            BlockType::FxOvertone => tables::FX_OVERTONE,
            BlockType::FxPan => tables::FX_PAN,
            BlockType::FxPhaser => tables::FX_PHASER,
            BlockType::FxPitchshift => tables::FX_PITCHSHIFT,
            BlockType::FxRingmod => tables::FX_RINGMOD,
            BlockType::FxRotary => tables::FX_ROTARY,
            BlockType::FxSitarsim => tables::FX_SITARSIM,
            BlockType::FxSlicer => tables::FX_SLICER,
            BlockType::FxSlowgear => tables::FX_SLOWGEAR,
            BlockType::FxSoundhold => tables::FX_SOUNDHOLD,
            BlockType::FxSbend => tables::FX_SBEND,
            BlockType::FxTremolo => tables::FX_TREMOLO,
            BlockType::FxTwah => tables::FX_TWAH,
            BlockType::FxVibrato => tables::FX_VIBRATO,
            BlockType::Reverb => tables::REVERB,
            BlockType::Pedalfx => tables::PEDALFX,
        }
    }

    /// Bytes spanned by the type's parameters. Always within one slot.
    pub fn size(self) -> usize {
        self.params()
            .iter()
            .map(|p| usize::from(p.offset) + usize::from(p.size))
            .max()
            .unwrap_or(0)
    }

    /// Parameter starting exactly at `offset` within the slot.
    pub fn param_at(self, offset: usize) -> Option<&'static ParamDescriptor> {
        self.params()
            .iter()
            .find(|p| usize::from(p.offset) == offset)
    }

    /// Parameter by name (case-insensitive).
    pub fn param(self, name: &str) -> Option<&'static ParamDescriptor> {
        self.params()
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

mod tables {
    use super::{param, ParamDescriptor};

    pub(super) const COMP: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("sustain", 0x02, 1),
        param("attack", 0x03, 1),
        param("level", 0x04, 1),
        param("tone", 0x05, 1),
        param("ratio", 0x06, 1),
        param("direct_mix", 0x07, 1),
        param("threshold", 0x08, 1),
    ];

    pub(super) const DIST: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("drive", 0x02, 1),
        param("tone", 0x03, 1),
        param("level", 0x04, 1),
        param("bottom", 0x05, 1),
        param("direct_mix", 0x06, 1),
        param("solo_sw", 0x07, 1),
        param("solo_level", 0x08, 1),
    ];

    pub(super) const PREAMP: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("gain", 0x02, 1),
        param("sag", 0x03, 1),
        param("resonance", 0x04, 1),
        param("level", 0x05, 1),
        param("bass", 0x06, 1),
        param("middle", 0x07, 1),
        param("treble", 0x08, 1),
        param("presence", 0x09, 1),
        param("bright", 0x0A, 1),
        param("gain_sw", 0x0B, 1),
        param("solo_sw", 0x0C, 1),
        param("solo_level", 0x0D, 1),
    ];

    pub(super) const NS: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("threshold", 0x01, 1),
        param("release", 0x02, 1),
        param("detect", 0x03, 1),
    ];

    pub(super) const EQ: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("low_gain", 0x02, 1),
        param("high_gain", 0x03, 1),
        param("level", 0x04, 1),
        param("low_mid_freq", 0x05, 1),
        param("low_mid_q", 0x06, 1),
        param("low_mid_gain", 0x07, 1),
        param("high_mid_freq", 0x08, 1),
        param("high_mid_q", 0x09, 1),
        param("high_mid_gain", 0x0A, 1),
        param("low_cut", 0x0B, 1),
        param("high_cut", 0x0C, 1),
        param("graphic_level", 0x0D, 1),
        param("band_31hz", 0x0E, 1),
        param("band_63hz", 0x0F, 1),
        param("band_125hz", 0x10, 1),
        param("band_250hz", 0x11, 1),
        param("band_500hz", 0x12, 1),
        param("band_1k", 0x13, 1),
        param("band_2k", 0x14, 1),
        param("band_4k", 0x15, 1),
        param("band_8k", 0x16, 1),
        param("band_16k", 0x17, 1),
    ];

    pub(super) const DELAY: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("time", 0x01, 4),
        param("feedback", 0x05, 1),
        param("high_cut", 0x06, 1),
        param("effect_level", 0x07, 1),
        param("direct_level", 0x08, 1),
    ];

    pub(super) const MSTDELAY: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("time", 0x02, 4),
        param("feedback", 0x06, 1),
        param("high_cut", 0x07, 1),
        param("effect_level", 0x08, 1),
        param("mod_rate", 0x09, 1),
        param("mod_depth", 0x0A, 1),
        param("duck_sens", 0x0B, 1),
        param("duck_pre_depth", 0x0C, 1),
        param("duck_post_depth", 0x0D, 1),
        param("direct_level", 0x0E, 1),
        param("pitch", 0x0F, 1),
        param("pitch_bal", 0x10, 1),
        param("pitch_feedback", 0x11, 1),
        param("dual_mode", 0x12, 1),
        param("d1_type", 0x13, 1),
        param("d1_time", 0x14, 4),
        param("d1_feedback", 0x18, 1),
        param("d1_high_cut", 0x19, 1),
        param("d1_effect_level", 0x1A, 1),
        param("d2_type", 0x1B, 1),
        param("d2_time", 0x1C, 4),
        param("d2_feedback", 0x20, 1),
        param("d2_high_cut", 0x21, 1),
        param("d2_effect_level", 0x22, 1),
        param("twist_mode", 0x23, 1),
        param("trigger", 0x24, 1),
        param("rise_time", 0x25, 1),
        param("fall_time", 0x26, 1),
        param("level", 0x27, 1),
        param("stage", 0x28, 1),
        param("head", 0x29, 1),
        param("fade_time", 0x2A, 1),
        param("tap_time", 0x2B, 1),
        param("wow_flutter", 0x2C, 1),
        param("drum_echo_head", 0x2D, 1),
        param("selector", 0x2E, 1),
        param("auto_trigger", 0x2F, 1),
        param("duty", 0x30, 1),
        param("tone", 0x31, 1),
    ];

    pub(super) const CHORUS: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("rate", 0x02, 1),
        param("depth", 0x03, 1),
        param("pre_delay", 0x04, 1),
        param("effect_level", 0x05, 1),
        param("waveform", 0x06, 1),
        param("low_cut", 0x07, 1),
        param("high_cut", 0x08, 1),
        param("rate1", 0x09, 1),
        param("depth1", 0x0A, 1),
        param("pre_delay1", 0x0B, 1),
        param("effect_level1", 0x0C, 1),
        param("waveform1", 0x0D, 1),
        param("low_cut1", 0x0E, 1),
        param("high_cut1", 0x0F, 1),
        param("rate2", 0x10, 1),
        param("depth2", 0x11, 1),
        param("pre_delay2", 0x12, 1),
        param("effect_level2", 0x13, 1),
        param("waveform2", 0x14, 1),
        param("low_cut2", 0x15, 1),
        param("high_cut2", 0x16, 1),
        param("direct_level", 0x17, 1),
        param("output_mode", 0x18, 1),
    ];

    pub(super) const FX: &[ParamDescriptor] = &[
        param("fx_sw", 0x00, 1),
        param("fx_type", 0x01, 1),
    ];

    pub(super) const FX_AGSIM: &[ParamDescriptor] = &[
        param("body", 0x00, 1),
        param("low", 0x01, 1),
        param("high", 0x02, 1),
        param("level", 0x03, 1),
    ];

    pub(super) const FX_ACRESO: &[ParamDescriptor] = &[
        param("type", 0x00, 1),
        param("resonance", 0x01, 1),
        param("tone", 0x02, 1),
        param("level", 0x03, 1),
    ];

    pub(super) const FX_AWAH: &[ParamDescriptor] = &[
        param("filter_mode", 0x00, 1),
        param("rate", 0x01, 1),
        param("depth", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("frequency", 0x04, 1),
        param("resonance", 0x05, 1),
        param("waveform", 0x06, 1),
        param("direct_mix", 0x07, 1),
    ];

    pub(super) const FX_CHORUS: &[ParamDescriptor] = &[
        param("type", 0x00, 1),
        param("direct_level", 0x01, 1),
        param("output_mode", 0x02, 1),
        param("sweetness", 0x03, 1),
        param("bell", 0x04, 1),
        param("preamp_sw", 0x05, 1),
        param("preamp_gain", 0x06, 1),
        param("preamp_level", 0x07, 1),
        param("rate", 0x08, 1),
        param("depth", 0x09, 1),
        param("pre_delay", 0x0A, 1),
        param("effect_level", 0x0B, 1),
        param("waveform", 0x0C, 1),
        param("low_cut", 0x0D, 1),
        param("high_cut", 0x0E, 1),
        param("rate1", 0x0F, 1),
        param("depth1", 0x10, 1),
        param("pre_delay1", 0x11, 1),
        param("effect_level1", 0x12, 1),
        param("waveform1", 0x13, 1),
        param("low_cut1", 0x14, 1),
        param("high_cut1", 0x15, 1),
        param("rate2", 0x16, 1),
        param("depth2", 0x17, 1),
        param("pre_delay2", 0x18, 1),
        param("effect_level2", 0x19, 1),
        param("waveform2", 0x1A, 1),
        param("low_cut2", 0x1B, 1),
        param("high_cut2", 0x1C, 1),
    ];

    pub(super) const FX_CVIBE: &[ParamDescriptor] = &[
        param("mode", 0x00, 1),
        param("rate", 0x01, 1),
        param("depth", 0x02, 1),
        param("effect_level", 0x03, 1),
    ];

    pub(super) const FX_COMP: &[ParamDescriptor] = &[
        param("type", 0x00, 1),
        param("sustain", 0x01, 1),
        param("attack", 0x02, 1),
        param("level", 0x03, 1),
        param("tone", 0x04, 1),
        param("ratio", 0x05, 1),
        param("direct_mix", 0x06, 1),
        param("threshold", 0x07, 1),
    ];

    pub(super) const FX_DEFRETTER: &[ParamDescriptor] = &[
        param("sens", 0x00, 1),
        param("depth", 0x01, 1),
        param("tone", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("attack", 0x04, 1),
        param("resonance", 0x05, 1),
        param("direct_mix", 0x06, 1),
        param("sens_bass", 0x07, 1),
        param("attack_bass", 0x08, 1),
        param("tone_bass", 0x09, 1),
        param("effect_level_bass", 0x0A, 1),
        param("direct_mix_bass", 0x0B, 1),
    ];

    pub(super) const FX_FEEDBACKER: &[ParamDescriptor] = &[
        param("mode", 0x00, 1),
        param("trigger", 0x01, 1),
        param("depth", 0x02, 1),
        param("rise_time", 0x03, 1),
        param("oct_rise_time", 0x04, 1),
        param("feedback", 0x05, 1),
        param("oct_feedback", 0x06, 1),
        param("vib_rate", 0x07, 1),
        param("vib_depth", 0x08, 1),
    ];

    pub(super) const FX_FLANGER: &[ParamDescriptor] = &[
        param("rate", 0x00, 1),
        param("depth", 0x01, 1),
        param("resonance", 0x02, 1),
        param("manual", 0x03, 1),
        param("turbo", 0x04, 1),
        param("waveform", 0x05, 1),
        param("step_rate", 0x06, 1),
        param("separation", 0x07, 1),
        param("effect_level", 0x08, 1),
        param("low_damp", 0x09, 2),
        param("high_damp", 0x0B, 2),
        param("low_cut", 0x0D, 1),
        param("high_cut", 0x0E, 1),
        param("direct_mix", 0x0F, 1),
    ];

    pub(super) const FX_HARMONIST: &[ParamDescriptor] = &[
        param("voice", 0x00, 1),
        param("hr1_harmony", 0x01, 1),
        param("hr2_harmony", 0x02, 1),
        param("hr1_level", 0x03, 1),
        param("hr1_pre_delay", 0x04, 4),
        param("hr1_feedback", 0x08, 1),
        param("direct_level", 0x09, 1),
        param("hr2_level", 0x0A, 1),
        param("hr2_pre_delay", 0x0B, 4),
        param("hr1_C", 0x0F, 1),
        param("hr1_Db", 0x10, 1),
        param("hr1_D", 0x11, 1),
        param("hr1_Eb", 0x12, 1),
        param("hr1_E", 0x13, 1),
        param("hr1_F", 0x14, 1),
        param("hr1_Fs", 0x15, 1),
        param("hr1_G", 0x16, 1),
        param("hr1_Ab", 0x17, 1),
        param("hr1_A", 0x18, 1),
        param("hr1_Bb", 0x19, 1),
        param("hr1_B", 0x1A, 1),
        param("hr2_C", 0x1B, 1),
        param("hr2_Db", 0x1C, 1),
        param("hr2_D", 0x1D, 1),
        param("hr2_Eb", 0x1E, 1),
        param("hr2_E", 0x1F, 1),
        param("hr2_F", 0x20, 1),
        param("hr2_Fs", 0x21, 1),
        param("hr2_G", 0x22, 1),
        param("hr2_Ab", 0x23, 1),
        param("hr2_A", 0x24, 1),
        param("hr2_Bb", 0x25, 1),
        param("hr2_B", 0x26, 1),
    ];

    pub(super) const FX_HUMANIZER: &[ParamDescriptor] = &[
        param("mode", 0x00, 1),
        param("vowel1", 0x01, 1),
        param("vowel2", 0x02, 1),
        param("sens", 0x03, 1),
        param("rate", 0x04, 1),
        param("depth", 0x05, 1),
        param("manual", 0x06, 1),
        param("level", 0x07, 1),
    ];

    pub(super) const FX_OCTAVE: &[ParamDescriptor] = &[
        param("type", 0x00, 1),
        param("minus_2oct", 0x01, 1),
        param("minus_1oct", 0x02, 1),
        param("direct_level", 0x03, 1),
        param("range", 0x04, 1),
        param("octave_level", 0x05, 1),
        param("minus_2oct_bass", 0x06, 1),
        param("minus_1oct_bass", 0x07, 1),
        param("direct_level_bass", 0x08, 1),
    ];

    pub(super) const FX_OVERTONE: &[ParamDescriptor] = &[
        param("lower_level", 0x00, 1),
        param("upper_level", 0x01, 1),
        param("unison_level", 0x02, 1),
        param("direct_level", 0x03, 1),
        param("detune", 0x04, 1),
        param("output_mode", 0x05, 1),
        param("low", 0x06, 1),
        param("high", 0x07, 1),
    ];

    pub(super) const FX_PAN: &[ParamDescriptor] = &[
        param("rate", 0x00, 1),
        param("depth", 0x01, 1),
        param("waveform", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("direct_mix", 0x04, 1),
    ];

    pub(super) const FX_PHASER: &[ParamDescriptor] = &[
        param("type", 0x00, 1),
        param("stage", 0x01, 1),
        param("rate", 0x02, 1),
        param("depth", 0x03, 1),
        param("resonance", 0x04, 1),
        param("manual", 0x05, 1),
        param("waveform", 0x06, 1),
        param("step_rate", 0x07, 1),
        param("biphase", 0x08, 1),
        param("separation", 0x09, 1),
        param("low_damp", 0x0A, 2),
        param("high_damp", 0x0C, 2),
        param("low_cut", 0x0E, 1),
        param("high_cut", 0x0F, 1),
        param("effect_level", 0x10, 1),
        param("direct_mix", 0x11, 1),
    ];

    pub(super) const FX_PITCHSHIFT: &[ParamDescriptor] = &[
        param("voice", 0x00, 1),
        param("ps1_pitch", 0x01, 1),
        param("ps2_pitch", 0x02, 1),
        param("direct_level", 0x03, 1),
        param("ps1_mode", 0x04, 1),
        param("ps1_fine", 0x05, 1),
        param("ps1_pre_delay", 0x06, 4),
        param("ps1_level", 0x0A, 1),
        param("ps1_feedback", 0x0B, 1),
        param("ps2_mode", 0x0C, 1),
        param("ps2_fine", 0x0D, 1),
        param("ps2_pre_delay", 0x0E, 4),
        param("ps2_level", 0x12, 1),
    ];

    pub(super) const FX_RINGMOD: &[ParamDescriptor] = &[
        param("intelligent", 0x00, 1),
        param("frequency", 0x01, 1),
        param("freq_mod_rate", 0x02, 1),
        param("freq_mod_depth", 0x03, 1),
        param("effect_level", 0x04, 1),
        param("direct_mix", 0x05, 1),
    ];

    pub(super) const FX_ROTARY: &[ParamDescriptor] = &[
        param("speed_select", 0x00, 1),
        param("slow_rate", 0x01, 1),
        param("fast_rate", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("rise_time", 0x04, 1),
        param("fall_time", 0x05, 1),
        param("mic_distance", 0x06, 1),
        param("rotor_horn", 0x07, 1),
        param("drive", 0x08, 1),
        param("direct_mix", 0x09, 1),
    ];

    pub(super) const FX_SITARSIM: &[ParamDescriptor] = &[
        param("sens", 0x00, 1),
        param("depth", 0x01, 1),
        param("tone", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("resonance", 0x04, 1),
        param("buzz", 0x05, 1),
        param("direct_mix", 0x06, 1),
    ];

    pub(super) const FX_SLICER: &[ParamDescriptor] = &[
        param("pattern", 0x00, 1),
        param("rate", 0x01, 1),
        param("trigger", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("attack", 0x04, 1),
        param("duty", 0x05, 1),
        param("direct_mix", 0x06, 1),
    ];

    pub(super) const FX_SLOWGEAR: &[ParamDescriptor] = &[
        param("sens", 0x00, 1),
        param("rise_time", 0x01, 1),
        param("level", 0x02, 1),
        param("sens_bass", 0x03, 1),
        param("rise_time_bass", 0x04, 1),
        param("level_bass", 0x05, 1),
    ];

    pub(super) const FX_SOUNDHOLD: &[ParamDescriptor] = &[
        param("trigger", 0x00, 1),
        param("rise_time", 0x01, 1),
        param("effect_level", 0x02, 1),
    ];

    pub(super) const FX_SBEND: &[ParamDescriptor] = &[
        param("trigger", 0x00, 1),
        param("pitch", 0x01, 1),
        param("rise_time", 0x02, 1),
        param("fall_time", 0x03, 1),
    ];

    pub(super) const FX_TREMOLO: &[ParamDescriptor] = &[
        param("rate", 0x00, 1),
        param("depth", 0x01, 1),
        param("waveform", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("trigger", 0x04, 1),
        param("rise_time", 0x05, 1),
        param("direct_mix", 0x06, 1),
    ];

    pub(super) const FX_TWAH: &[ParamDescriptor] = &[
        param("filter_mode", 0x00, 1),
        param("polarity", 0x01, 1),
        param("sens", 0x02, 1),
        param("frequency", 0x03, 1),
        param("resonance", 0x04, 1),
        param("decay", 0x05, 1),
        param("effect_level", 0x06, 1),
        param("direct_mix", 0x07, 1),
        param("filter_mode_bass", 0x08, 1),
        param("polarity_bass", 0x09, 1),
        param("sens_bass", 0x0A, 1),
        param("frequency_bass", 0x0B, 1),
        param("resonance_bass", 0x0C, 1),
        param("decay_bass", 0x0D, 1),
        param("effect_level_bass", 0x0E, 1),
        param("direct_mix_bass", 0x0F, 1),
    ];

    pub(super) const FX_VIBRATO: &[ParamDescriptor] = &[
        param("rate", 0x00, 1),
        param("depth", 0x01, 1),
        param("color", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("trigger", 0x04, 1),
        param("rise_time", 0x05, 1),
        param("direct_mix", 0x06, 1),
    ];

    pub(super) const REVERB: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("direct_level", 0x02, 1),
        param("low_damp", 0x03, 1),
        param("high_damp", 0x04, 1),
        param("mod_rate", 0x05, 1),
        param("mod_depth", 0x06, 1),
        param("duck_sens", 0x07, 1),
        param("duck_pre", 0x08, 1),
        param("duck_post", 0x09, 1),
        param("time", 0x0A, 1),
        param("tone", 0x0B, 1),
        param("effect_level", 0x0C, 1),
        param("density", 0x0D, 1),
        param("pre_delay", 0x0E, 2),
        param("low_cut", 0x10, 1),
        param("high_cut", 0x11, 1),
        param("pitch1", 0x12, 1),
        param("level1", 0x13, 1),
        param("type1", 0x14, 1),
        param("time1", 0x15, 1),
        param("tone1", 0x16, 1),
        param("effect_level1", 0x17, 1),
        param("density1", 0x18, 1),
        param("pre_delay1", 0x19, 2),
        param("low_cut1", 0x1B, 1),
        param("high_cut1", 0x1C, 1),
        param("pitch2", 0x1D, 1),
        param("level2", 0x1E, 1),
        param("type2", 0x1F, 1),
        param("time2", 0x20, 1),
        param("tone2", 0x21, 1),
        param("effect_level2", 0x22, 1),
        param("density2", 0x23, 1),
        param("pre_delay2", 0x24, 2),
        param("low_cut2", 0x26, 1),
        param("high_cut2", 0x27, 1),
        param("mode", 0x28, 1),
        param("spread_time", 0x29, 1),
        param("feedback", 0x2A, 1),
        param("trigger", 0x2B, 1),
    ];

    pub(super) const PEDALFX: &[ParamDescriptor] = &[
        param("sw", 0x00, 1),
        param("type", 0x01, 1),
        param("pitch_max", 0x02, 1),
        param("effect_level", 0x03, 1),
        param("direct_mix", 0x04, 1),
        param("wah_type", 0x05, 1),
        param("pedal_min", 0x06, 4),
        param("pedal_max", 0x0A, 4),
        param("wah_pedal_position", 0x0E, 4),
        param("pedalbend_pedal_position", 0x12, 4),
        param("pitch_min", 0x16, 1),
    ];
}
