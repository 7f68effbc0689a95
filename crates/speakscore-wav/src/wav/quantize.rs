//! Float to 16-bit sample quantization.

/// Full-scale multiplier for 16-bit PCM.
const FULL_SCALE: f64 = 32767.0;

/// How samples outside `[-1.0, 1.0]` are mapped to `i16`.
///
/// In range, both policies compute `round(s * 32767)` with halves rounded
/// away from zero. NaN maps to 0 under both. Infinities saturate under
/// `Clamp` and map to 0 under `Wrap`, which has no low bits to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantizePolicy {
    /// Clip to `[-1.0, 1.0]` before scaling.
    #[default]
    Clamp,
    /// Keep the low 16 bits of the rounded value (two's-complement wraparound).
    Wrap,
}

impl QuantizePolicy {
    /// Quantizes a single sample.
    pub fn quantize(self, sample: f32) -> i16 {
        let sample = sample as f64;
        match self {
            QuantizePolicy::Clamp => (sample.clamp(-1.0, 1.0) * FULL_SCALE).round() as i16,
            QuantizePolicy::Wrap => {
                let scaled = (sample * FULL_SCALE).round();
                if !scaled.is_finite() {
                    return 0;
                }
                // `as i64` saturates on huge magnitudes, then `as i16` keeps the low 16 bits.
                scaled as i64 as i16
            }
        }
    }

    /// Short lowercase name, as accepted by [`str::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            QuantizePolicy::Clamp => "clamp",
            QuantizePolicy::Wrap => "wrap",
        }
    }
}

impl std::str::FromStr for QuantizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clamp" => Ok(QuantizePolicy::Clamp),
            "wrap" => Ok(QuantizePolicy::Wrap),
            other => Err(format!(
                "unknown quantize policy '{}' (expected 'clamp' or 'wrap')",
                other
            )),
        }
    }
}

impl std::fmt::Display for QuantizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_policies_agree() {
        for &s in &[0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25, 1.0e-6] {
            assert_eq!(
                QuantizePolicy::Clamp.quantize(s),
                QuantizePolicy::Wrap.quantize(s),
                "sample {}",
                s
            );
        }
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 0.5 * 32767 = 16383.5
        assert_eq!(QuantizePolicy::Clamp.quantize(0.5), 16384);
        assert_eq!(QuantizePolicy::Clamp.quantize(-0.5), -16384);
    }

    #[test]
    fn test_full_scale() {
        assert_eq!(QuantizePolicy::Clamp.quantize(1.0), 32767);
        assert_eq!(QuantizePolicy::Clamp.quantize(-1.0), -32767);
    }

    #[test]
    fn test_clamp_out_of_range() {
        assert_eq!(QuantizePolicy::Clamp.quantize(2.0), 32767);
        assert_eq!(QuantizePolicy::Clamp.quantize(-2.0), -32767);
        assert_eq!(QuantizePolicy::Clamp.quantize(f32::INFINITY), 32767);
    }

    #[test]
    fn test_wrap_out_of_range() {
        // round(1.5 * 32767) = 49151 -> 49151 - 65536
        assert_eq!(QuantizePolicy::Wrap.quantize(1.5), -16385);
        // round(-1.5 * 32767) = -49151 -> -49151 + 65536
        assert_eq!(QuantizePolicy::Wrap.quantize(-1.5), 16385);
        // 2 * 32767 = 65534 -> -2
        assert_eq!(QuantizePolicy::Wrap.quantize(2.0), -2);
    }

    #[test]
    fn test_nan_is_silence() {
        assert_eq!(QuantizePolicy::Clamp.quantize(f32::NAN), 0);
        assert_eq!(QuantizePolicy::Wrap.quantize(f32::NAN), 0);
    }

    #[test]
    fn test_wrap_infinity_is_silence() {
        assert_eq!(QuantizePolicy::Wrap.quantize(f32::INFINITY), 0);
        assert_eq!(QuantizePolicy::Wrap.quantize(f32::NEG_INFINITY), 0);
        assert_eq!(QuantizePolicy::Clamp.quantize(f32::NEG_INFINITY), -32767);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("clamp".parse::<QuantizePolicy>(), Ok(QuantizePolicy::Clamp));
        assert_eq!("WRAP".parse::<QuantizePolicy>(), Ok(QuantizePolicy::Wrap));
        assert!("saturate".parse::<QuantizePolicy>().is_err());
        assert_eq!(QuantizePolicy::default().to_string(), "clamp");
    }
}
