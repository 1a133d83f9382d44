//! MIDI utility functions

/// Center of the unsigned 14-bit pitch-bend range.
pub const BEND_CENTER: i32 = 8192;

/// Largest unsigned 14-bit value.
pub const BEND_MAX: u16 = 16383;

/// Convert a signed bend offset (0 = center) to the unsigned 14-bit value
/// carried by a pitch-bend message.
#[inline]
pub fn bend_to_14bit(value: i32) -> u16 {
    (value + BEND_CENTER).clamp(0, BEND_MAX as i32) as u16
}

/// Returns `(lsb, msb)`, both 0-127, in pitch-bend data byte order.
#[inline]
pub const fn split_14bit(value: u16) -> (u8, u8) {
    let lsb = (value & 0x7F) as u8;
    let msb = ((value >> 7) & 0x7F) as u8;
    (lsb, msb)
}

#[inline]
pub const fn combine_14bit(lsb: u8, msb: u8) -> u16 {
    ((msb as u16 & 0x7F) << 7) | (lsb as u16 & 0x7F)
}

/// Samples per beat at `bpm`, truncated.
///
/// Returns `None` for tempos that cannot describe a beat length.
#[inline]
pub fn bpm_to_samples_per_beat(bpm: f32, sample_rate: f64) -> Option<u32> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return None;
    }
    let samples = 60.0 / bpm as f64 * sample_rate;
    (samples.is_finite() && samples < u32::MAX as f64).then_some(samples as u32)
}
