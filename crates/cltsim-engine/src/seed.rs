use std::{fmt, num::ParseIntError, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for deterministic sample generation.
///
/// The same seed, rate, and batch shape always reproduce the same simulation
/// batch, which makes every derived statistic reproducible too.
///
/// In JSON the seed is a 16-character hex string. On the command line it is
/// accepted as a decimal integer or a `0x`-prefixed hex integer.
///
/// # Example
///
/// ```
/// use cltsim_engine::SimulationSeed;
/// use rand::Rng as _;
///
/// let fixed: SimulationSeed = "0x2a".parse().unwrap();
/// assert_eq!(fixed, SimulationSeed::new(42));
///
/// let random: SimulationSeed = rand::rng().random();
/// # let _ = random;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimulationSeed(u64);

impl SimulationSeed {
    /// Seed used when none is configured.
    pub const DEFAULT: Self = Self(20_170_318);

    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl Default for SimulationSeed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SimulationSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

impl FromStr for SimulationSeed {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16)?,
            None => s.parse()?,
        };
        Ok(Self(value))
    }
}

impl Serialize for SimulationSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:016x}", self.0))
    }
}

impl<'de> Deserialize<'de> for SimulationSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 16 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 16 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u64::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num))
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<SimulationSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationSeed {
        SimulationSeed(rng.random())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: SimulationSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: SimulationSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value() {
            let seed = SimulationSeed::new(0x0123_4567_89ab_cdef);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdef\"");
        }

        #[test]
        fn test_zero_is_padded() {
            let serialized = serde_json::to_string(&SimulationSeed::new(0)).unwrap();
            assert_eq!(serialized, "\"0000000000000000\"");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let seed: SimulationSeed = serde_json::from_str("\"00000000DEADBEEF\"").unwrap();
            assert_eq!(seed.value(), 0xDEAD_BEEF);
        }

        #[test]
        fn test_error_wrong_length() {
            for json in ["\"\"", "\"abc\"", "\"0123456789abcdef0\""] {
                let err = serde_json::from_str::<SimulationSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{json}: {err}");
            }
        }

        #[test]
        fn test_error_invalid_hex_characters() {
            let err = serde_json::from_str::<SimulationSeed>("\"ghijklmnopqrstuv\"").unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_decimal() {
            let seed: SimulationSeed = "12345".parse().unwrap();
            assert_eq!(seed.value(), 12345);
        }

        #[test]
        fn test_hex_prefix() {
            assert_eq!("0xff".parse::<SimulationSeed>().unwrap().value(), 255);
            assert_eq!("0XFF".parse::<SimulationSeed>().unwrap().value(), 255);
        }

        #[test]
        fn test_rejects_garbage() {
            assert!("seed".parse::<SimulationSeed>().is_err());
            assert!("-1".parse::<SimulationSeed>().is_err());
            assert!("0x".parse::<SimulationSeed>().is_err());
        }

        #[test]
        fn test_display_roundtrips() {
            let seed = SimulationSeed::new(987_654_321);
            assert_eq!(seed.to_string().parse::<SimulationSeed>().unwrap(), seed);
        }
    }
}
