//! Products, access layers, and the payment-to-access mapping.
//!
//! The three access flags are independent booleans. The intended order
//! (Canon, then Guild, then Fellowship) is a business convention and is not
//! enforced here.

use serde::{Deserialize, Serialize};

/// Length of a paid fellowship term.
pub const FELLOWSHIP_TERM_DAYS: i64 = 365;

/// Lifetime of a fellowship invite.
pub const INVITE_EXPIRY_DAYS: i64 = 7;

/// Currency for every catalogue price.
pub const DEFAULT_CURRENCY: &str = "usd";

define_text_enum! {
    /// A purchasable catalogue item.
    Product("product") {
        Canon = "canon",
        Guild = "guild",
        Fellowship = "fellowship",
        Coaching = "coaching",
    }
}

define_text_enum! {
    /// Processor checkout mode.
    CheckoutMode("checkout mode") {
        Payment = "payment",
        Subscription = "subscription",
    }
}

impl Product {
    pub fn display_name(self) -> &'static str {
        match self {
            Product::Canon => "The Canon",
            Product::Guild => "The Guild",
            Product::Fellowship => "The Fellowship",
            Product::Coaching => "Strategic Coaching Session",
        }
    }

    /// Catalogue price in minor units (cents).
    pub fn price_cents(self) -> i64 {
        match self {
            Product::Canon => 49_700,
            Product::Guild => 299_700,
            Product::Fellowship => 499_700,
            Product::Coaching => 99_700,
        }
    }

    /// Fellowship is billed yearly; everything else is a one-time payment.
    pub fn checkout_mode(self) -> CheckoutMode {
        match self {
            Product::Fellowship => CheckoutMode::Subscription,
            Product::Canon | Product::Guild | Product::Coaching => CheckoutMode::Payment,
        }
    }

    /// The access change a completed payment for this product triggers.
    pub fn grant(self) -> AccessGrant {
        match self {
            Product::Canon => AccessGrant::Canon,
            Product::Fellowship => AccessGrant::Fellowship,
            // Guild access follows manual cohort enrollment.
            Product::Guild => AccessGrant::None,
            Product::Coaching => AccessGrant::None,
        }
    }
}

/// Side effect of a completed checkout, beyond the purchase record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant {
    /// Set `canon_access`.
    Canon,
    /// Set `fellowship_access` and append a fellowship member record.
    Fellowship,
    None,
}

define_text_enum! {
    /// One of the three membership tiers.
    Layer("layer") {
        Canon = "canon",
        Guild = "guild",
        Fellowship = "fellowship",
    }
}

/// The independent capability flags stored on a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessFlags {
    pub canon_access: bool,
    pub guild_access: bool,
    pub fellowship_access: bool,
}

impl AccessFlags {
    pub fn has(&self, layer: Layer) -> bool {
        match layer {
            Layer::Canon => self.canon_access,
            Layer::Guild => self.guild_access,
            Layer::Fellowship => self.fellowship_access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_canon_and_fellowship_grant_on_payment() {
        assert_eq!(Product::Canon.grant(), AccessGrant::Canon);
        assert_eq!(Product::Fellowship.grant(), AccessGrant::Fellowship);
        assert_eq!(Product::Guild.grant(), AccessGrant::None);
        assert_eq!(Product::Coaching.grant(), AccessGrant::None);
    }

    #[test]
    fn fellowship_is_a_subscription() {
        assert_eq!(Product::Fellowship.checkout_mode(), CheckoutMode::Subscription);
        assert_eq!(Product::Canon.checkout_mode(), CheckoutMode::Payment);
        assert_eq!(Product::Coaching.checkout_mode().as_str(), "payment");
    }

    #[test]
    fn prices_are_in_cents() {
        assert_eq!(Product::Canon.price_cents(), 49_700);
        assert_eq!(Product::Guild.price_cents(), 299_700);
        assert_eq!(Product::Fellowship.price_cents(), 499_700);
        assert_eq!(Product::Coaching.price_cents(), 99_700);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let err = "platinum".parse::<Product>().unwrap_err();
        assert!(err.to_string().contains("Invalid product 'platinum'"));
        assert_eq!("guild".parse::<Product>().unwrap(), Product::Guild);
    }

    #[test]
    fn flags_are_independent() {
        let flags = AccessFlags {
            canon_access: false,
            guild_access: false,
            fellowship_access: true,
        };
        assert!(flags.has(Layer::Fellowship));
        assert!(!flags.has(Layer::Canon));
        assert!(!flags.has(Layer::Guild));
    }
}
