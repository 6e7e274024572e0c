use gtlink_schema::{ParamInfo, EFFECT_REGION_SIZE, PATCH_NAME_LEN};

/// Size of the patch number field.
const PATCH_NUMBER_SIZE: usize = 4;

/// Local mirror of the device's patch state.
///
/// Only decoded inbound write commands mutate it; everything else reads.
#[derive(Clone)]
pub struct DeviceImage {
    patch_number: u32,
    patch_name: [u8; PATCH_NAME_LEN],
    effects: Box<[u8]>,
}

impl DeviceImage {
    /// A zeroed mirror sized to the effect region.
    pub fn new() -> Self {
        Self {
            patch_number: 0,
            patch_name: [0; PATCH_NAME_LEN],
            effects: vec![0u8; EFFECT_REGION_SIZE].into_boxed_slice(),
        }
    }

    pub fn patch_number(&self) -> u32 {
        self.patch_number
    }

    /// Raw patch name bytes, zero padded.
    pub fn patch_name_bytes(&self) -> &[u8; PATCH_NAME_LEN] {
        &self.patch_name
    }

    /// Patch name with trailing padding removed.
    pub fn patch_name(&self) -> String {
        let end = self
            .patch_name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(PATCH_NAME_LEN);
        String::from_utf8_lossy(&self.patch_name[..end])
            .trim_end()
            .to_string()
    }

    /// The whole effect region mirror.
    pub fn effects(&self) -> &[u8] {
        &self.effects
    }

    /// Raw bytes of a resolved parameter.
    pub fn param_bytes(&self, info: &ParamInfo) -> &[u8] {
        let start = info.id.offset();
        let end = (start + info.size()).min(self.effects.len());
        &self.effects[start.min(end)..end]
    }

    /// Value of a resolved parameter as a big-endian unsigned integer.
    pub fn param_value(&self, info: &ParamInfo) -> u32 {
        be_value(self.param_bytes(info))
    }

    /// Set the patch number from up to four big-endian bytes.
    pub(crate) fn set_patch_number(&mut self, data: &[u8]) -> u32 {
        let used = data.len().min(PATCH_NUMBER_SIZE);
        self.patch_number = be_value(&data[..used]);
        self.patch_number
    }

    /// Replace the patch name with up to sixteen bytes of `data`.
    pub(crate) fn set_patch_name(&mut self, data: &[u8]) {
        let used = data.len().min(PATCH_NAME_LEN);
        self.patch_name = [0; PATCH_NAME_LEN];
        self.patch_name[..used].copy_from_slice(&data[..used]);
    }

    /// Copy `data` into the effect mirror at `offset`, clamped to its end.
    ///
    /// Returns the number of bytes written.
    pub(crate) fn write_effects(&mut self, offset: usize, data: &[u8]) -> usize {
        let Some(room) = self.effects.len().checked_sub(offset) else {
            return 0;
        };
        let used = data.len().min(room);
        self.effects[offset..offset + used].copy_from_slice(&data[..used]);
        used
    }
}

impl Default for DeviceImage {
    fn default() -> Self {
        Self::new()
    }
}

fn be_value(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b))
}
