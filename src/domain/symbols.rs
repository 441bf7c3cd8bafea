//! Declarative helpers for closed, symbol-named enumerations
//!
//! The canonical taxonomy and the three vendor taxonomies are all closed sets whose
//! members are addressed by an upper-case symbol. These macros generate the variant
//! list, symbol lookup and serde impls so each enum only declares its data.

/// Declares a closed enum whose variants carry one upper-case symbol.
///
/// The invoking module must implement `FromStr` for the enum; deserialization
/// goes through it so parse rules and error variants stay in one place.
macro_rules! symbol_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Upper-case symbolic name
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol, )+
                }
            }

            /// Case-insensitive symbol match
            pub fn from_symbol(symbol: &str) -> Option<Self> {
                let symbol = symbol.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(symbol))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                raw.parse::<$name>().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Declares a vendor taxonomy: each variant has a cross-reference symbol and the
/// literal wire value the vendor emits.
///
/// Wire values are not required to be unique; `from_wire` returns the first
/// declared variant carrying the value.
macro_rules! provider_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($symbol:literal, $wire:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Cross-reference symbol
            pub fn symbol(&self) -> &'static str {
                match self {
                    $( $name::$variant => $symbol, )+
                }
            }

            /// Literal string the vendor emits
            pub fn wire_value(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )+
                }
            }

            /// Case-insensitive symbol match
            pub fn from_symbol(symbol: &str) -> Option<Self> {
                let symbol = symbol.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.symbol().eq_ignore_ascii_case(symbol))
            }

            /// Wire value match, exact spelling first
            pub fn from_wire(wire: &str) -> Option<Self> {
                let wire = wire.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.wire_value() == wire)
                    .or_else(|| {
                        Self::ALL
                            .iter()
                            .copied()
                            .find(|v| v.wire_value().eq_ignore_ascii_case(wire))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.wire_value())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.symbol())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
                $name::from_symbol(&raw)
                    .or_else(|| $name::from_wire(&raw))
                    .ok_or_else(|| {
                        serde::de::Error::custom(format!(
                            "unknown {} entity type: {}",
                            stringify!($name),
                            raw
                        ))
                    })
            }
        }
    };
}
