//! Enumerations the API sends as wire strings, with their display labels.

use std::fmt;
use std::str::FromStr;

/// Declares a wire-string enum with `as_str`, `label`, `ALL`, `Display` and
/// `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the value as sent by the API.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            /// Returns the human readable label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Maps a wire value to its label, passing unknown values through.
            pub fn label_for(wire: &str) -> String {
                wire.parse::<$name>()
                    .map(|v| v.label().to_string())
                    .unwrap_or_else(|_| wire.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(UnknownVariant(other.to_string())),
                }
            }
        }
    };
}

/// A wire value that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

wire_enum! {
    /// Account role of a user.
    pub enum Role {
        Admin => ("admin", "Admin"),
        User => ("user", "User"),
        ChannelAdmin => ("channel-admin", "Channel admin"),
    }
}

wire_enum! {
    /// Kind of market a market detail describes.
    pub enum MarketType {
        Stock => ("stock", "Stock"),
        Crypto => ("crypto", "Crypto"),
    }
}

wire_enum! {
    /// Kind of messaging channel.
    pub enum ChannelType {
        Vip => ("vip", "VIP"),
        Market => ("market", "Market"),
        Private => ("private", "Private"),
    }
}

wire_enum! {
    /// Kind of published policy document.
    pub enum PolicyType {
        Privacy => ("privacy", "Privacy"),
        Terms => ("terms", "Terms"),
        Consent => ("consent", "Consent"),
        About => ("about", "About"),
    }
}

wire_enum! {
    /// Category of a user report.
    pub enum ReportType {
        User => ("user", "User complaint"),
        General => ("general", "General"),
        Complaint => ("complaint", "Complaint"),
        Spam => ("spam", "Spam report"),
        Channel => ("channel", "Channel complaint"),
    }
}

wire_enum! {
    /// What a blacklist entry's value is matched against.
    pub enum BlacklistValueType {
        UserId => ("user-id", "User ID"),
        Email => ("email", "E-mail"),
        Ip => ("ip", "IP address"),
        Text => ("text", "Text"),
    }
}

wire_enum! {
    /// Where a blacklist entry is enforced.
    pub enum BlacklistScope {
        Register => ("register", "Registration"),
        ChannelMessage => ("channel-message", "Channel message"),
        BannedText => ("banned-text", "Banned text"),
    }
}

/// Label for an `isActive` flag.
pub fn active_label(active: bool) -> &'static str {
    if active { "Active" } else { "Inactive" }
}

/// Label for a yes/no flag.
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
