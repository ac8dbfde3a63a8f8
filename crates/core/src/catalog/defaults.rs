use crate::models::color::Color;
use crate::models::sector::{SectorType, Subsection};

pub const CRYPTO: &str = "Crypto";
pub const STABLE: &str = "Stable";
pub const CRYPTO_CRYPTO: &str = "Crypto/Crypto";
pub const CRYPTO_STABLE: &str = "Crypto/Stable";
pub const STABLE_STABLE: &str = "Stable/Stable";
pub const CUSTOM: &str = "Custom";

/// Color of the `portfolio` root node.
pub const PORTFOLIO_COLOR: Color = Color::rgb(0x63, 0x66, 0xf1);

/// Color of the `borrow` root node and base color of the `borrow` sector type.
pub const BORROW_COLOR: Color = Color::rgb(0xef, 0x44, 0x44);

/// Sector type whose total bounds how much may be borrowed.
pub const LENDING: &str = "lending";

pub(crate) fn sector_types() -> Vec<SectorType> {
    vec![
        SectorType::new(
            "borrow",
            "Borrow",
            BORROW_COLOR,
            vec![
                Subsection::named(CRYPTO, Color::rgb(0xf8, 0x71, 0x71)),
                Subsection::named(STABLE, Color::rgb(0xfc, 0xa5, 0xa5)),
            ],
        ),
        SectorType::new(
            "lp",
            "Liquidity Provider (LP)",
            Color::rgb(0x3b, 0x82, 0xf6),
            vec![
                Subsection::named(CRYPTO_CRYPTO, Color::rgb(0x60, 0xa5, 0xfa)),
                Subsection::named(CRYPTO_STABLE, Color::rgb(0x93, 0xc5, 0xfd)),
                Subsection::named(STABLE_STABLE, Color::rgb(0x25, 0x63, 0xeb)),
                Subsection::named(CUSTOM, Color::rgb(0x1d, 0x4e, 0xd8)),
            ],
        ),
        SectorType::new(
            LENDING,
            "Lending",
            Color::rgb(0x10, 0xb9, 0x81),
            vec![
                Subsection::named(CRYPTO, Color::rgb(0x34, 0xd3, 0x99)),
                Subsection::named(STABLE, Color::rgb(0x6e, 0xe7, 0xb7)),
                Subsection::named(CUSTOM, Color::rgb(0x05, 0x96, 0x69)),
            ],
        ),
        SectorType::new(
            "hodl",
            "HODL",
            Color::rgb(0xf5, 0x9e, 0x0b),
            vec![
                Subsection::named(CRYPTO, Color::rgb(0xfb, 0xbf, 0x24)),
                Subsection::named(STABLE, Color::rgb(0xfc, 0xd3, 0x4d)),
                Subsection::named(CUSTOM, Color::rgb(0xd9, 0x77, 0x06)),
            ],
        ),
        SectorType::new(
            "custom",
            "Custom Strategy",
            Color::rgb(0x8b, 0x5c, 0xf6),
            vec![Subsection::named(CUSTOM, Color::rgb(0xa7, 0x8b, 0xfa))],
        ),
    ]
}
