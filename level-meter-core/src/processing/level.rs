//! Pure-math loudness pipeline: RMS → dBFS → normalized display level.
//!
//! RMS gives a physically meaningful energy measure; the dB conversion
//! compresses the wide dynamic range logarithmically to match human
//! perception before the linear normalization, so the visual scale is
//! perceptually even rather than energy-linear.

/// Lower bound of the displayed dBFS range.
pub const DB_MIN: f32 = -60.0;

/// Upper bound of the displayed dBFS range (digital full scale).
pub const DB_MAX: f32 = 0.0;

/// RMS floor that keeps `log10` defined for all-zero windows. Smaller
/// than any RMS quantization noise can produce; the exact value is not
/// meaningful beyond that.
pub const RMS_FLOOR: f32 = 1e-7;

/// Root-mean-square energy of a sample window. Empty windows read as 0.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = samples.iter().map(|s| s * s).sum();
    (sum_sq / samples.len() as f32).sqrt()
}

/// Convert an RMS energy to decibels relative to full scale.
pub fn dbfs(rms: f32) -> f32 {
    20.0 * rms.max(RMS_FLOOR).log10()
}

/// Affine map from `[floor, ceiling]` dBFS onto `[0, 1]`.
///
/// Inputs above the ceiling clamp to 1, below the floor to 0, and NaN
/// maps to 0 so a corrupt reading never propagates into the display.
pub fn normalize_db(db: f32, floor: f32, ceiling: f32) -> f32 {
    if db.is_nan() {
        return 0.0;
    }
    let clamped = db.clamp(floor, ceiling);
    (clamped - floor) / (ceiling - floor)
}

/// Downmix interleaved multi-channel audio to mono by averaging channels
/// per frame.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    let frame_count = samples.len() / channels;
    let scale = 1.0 / channels as f32;
    let mut mono = Vec::with_capacity(frame_count);
    for frame in 0..frame_count {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += samples[frame * channels + ch];
        }
        mono.push(sum * scale);
    }
    mono
}
