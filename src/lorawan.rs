//! Fixed-length LoRaWAN identifiers and session keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::byte_format::FormattableBytes;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseBytesError {
    #[error("invalid hex for {kind}: {source}")]
    Hex {
        kind: &'static str,
        #[source]
        source: hex::FromHexError,
    },
    #[error("{kind} must be {expected} bytes, got {actual}")]
    Length {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
}

macro_rules! lorawan_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;
        }

        impl FormattableBytes for $name {
            fn is_empty(&self) -> bool {
                self.0.iter().all(|byte| *byte == 0)
            }

            fn bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&hex::encode_upper(self.0))
            }
        }

        impl FromStr for $name {
            type Err = ParseBytesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let decoded = hex::decode(s.trim()).map_err(|source| ParseBytesError::Hex {
                    kind: stringify!($name),
                    source,
                })?;
                if decoded.len() != Self::LEN {
                    return Err(ParseBytesError::Length {
                        kind: stringify!($name),
                        expected: Self::LEN,
                        actual: decoded.len(),
                    });
                }
                let mut bytes = [0u8; $len];
                bytes.copy_from_slice(&decoded);
                Ok(Self(bytes))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                match Option::<String>::deserialize(deserializer)? {
                    Some(text) if !text.is_empty() => text.parse().map_err(de::Error::custom),
                    _ => Ok(Self::default()),
                }
            }
        }
    };
}

lorawan_bytes!(
    /// 64-bit application EUI.
    AppEui,
    8
);
lorawan_bytes!(
    /// 64-bit device EUI.
    DevEui,
    8
);
lorawan_bytes!(
    /// 32-bit network device address.
    DevAddr,
    4
);
lorawan_bytes!(
    /// Root AES-128 application key used for over-the-air activation.
    AppKey,
    16
);
lorawan_bytes!(AppSKey, 16);
lorawan_bytes!(NwkSKey, 16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_uppercase_hex() {
        let addr: DevAddr = "26011bda".parse().unwrap();
        assert_eq!(addr.0, [0x26, 0x01, 0x1B, 0xDA]);
        assert_eq!(addr.to_string(), "26011BDA");
    }

    #[test]
    fn rejects_wrong_length() {
        let err = "0102".parse::<DevEui>().unwrap_err();
        assert_eq!(
            err,
            ParseBytesError::Length {
                kind: "DevEui",
                expected: 8,
                actual: 2,
            }
        );
        assert!(matches!(
            "zz".parse::<AppKey>(),
            Err(ParseBytesError::Hex { kind: "AppKey", .. })
        ));
    }

    #[test]
    fn zero_value_is_empty() {
        assert!(FormattableBytes::is_empty(&AppSKey::default()));
        assert!(!FormattableBytes::is_empty(&DevAddr([0, 0, 0, 1])));
        assert_eq!(NwkSKey::LEN, 16);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let eui = AppEui([0x70, 0xB3, 0xD5, 0x7E, 0xF0, 0x00, 0x00, 0x01]);
        let json = serde_json::to_string(&eui).unwrap();
        assert_eq!(json, "\"70B3D57EF0000001\"");
        assert_eq!(serde_json::from_str::<AppEui>(&json).unwrap(), eui);
        assert_eq!(
            serde_json::from_str::<AppEui>("\"\"").unwrap(),
            AppEui::default()
        );
        assert!(serde_json::from_str::<DevAddr>("\"010203\"").is_err());
    }

    #[test]
    fn null_deserializes_to_unset_value() {
        let addr: DevAddr = serde_json::from_str("null").unwrap();
        assert_eq!(addr, DevAddr::default());
        assert!(FormattableBytes::is_empty(&addr));
    }
}
