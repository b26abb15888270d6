//! Reference enums accepted by the Korapay API.

use std::{fmt::Display, str::FromStr};

use korapay_core::errors::Error;
use serde::{Deserialize, Serialize};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The string the API uses for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(Error::validation(format!(
                        concat!("unsupported ", stringify!($name), " {:?}"),
                        other
                    ))),
                }
            }
        }
    };
}

wire_enum! {
    /// Currencies a charge or payout can be made in.
    Currency {
        Ngn => "NGN",
        Kes => "KES",
        Ghs => "GHS",
        Usd => "USD",
    }
}

wire_enum! {
    /// Channels a customer can pay through on the checkout.
    PaymentChannel {
        Card => "card",
        BankTransfer => "bank_transfer",
        MobileMoney => "mobile_money",
    }
}

wire_enum! {
    /// Countries with reference data (banks, mobile money operators).
    Country {
        Nigeria => "NG",
        Kenya => "KE",
        Ghana => "GH",
    }
}

wire_enum! {
    MobileMoneyOperator {
        SafaricomKenya => "safaricom-ke",
        AirtelKenya => "airtel-ke",
        AirtelGhana => "airtel-gh",
        MtnGhana => "mtn-gh",
    }
}
