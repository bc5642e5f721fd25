use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Channel id (64-bit snowflake).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(pub u64);

/// Message id (64-bit snowflake).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

/// Guild id (64-bit snowflake).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuildId(pub u64);

macro_rules! snowflake {
    ($ty:ident) => {
        impl From<u64> for $ty {
            fn from(v: u64) -> Self {
                Self(v)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $ty {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }

        // Snowflakes go over the wire as strings; numbers are accepted on input.
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Str(String),
                    Num(u64),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Num(n) => Ok(Self(n)),
                    Raw::Str(s) => s.parse().map_err(de::Error::custom),
                }
            }
        }
    };
}

snowflake!(ChannelId);
snowflake!(MessageId);
snowflake!(GuildId);
