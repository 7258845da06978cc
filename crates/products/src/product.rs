use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use liquorledger_core::{validation, Entity, LedgerError, LedgerResult, PrincipalId, ProductId};

/// Closed tag enum with a stable name per variant and case-insensitive parsing.
macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| {
                        LedgerError::invalid(format!(
                            "unknown {} '{}'",
                            stringify!($name),
                            wanted
                        ))
                    })
            }
        }
    };
}

tag_enum!(
    /// Spirit category.
    LiquorType {
        Whiskey,
        Vodka,
        Rum,
        Gin,
        Tequila,
        Brandy,
        Liqueur,
        Other,
    }
);

tag_enum!(
    LiquorBrand {
        Chrome,
        Best,
        County,
        JohnnieWalker,
        JackDaniels,
        Smirnoff,
        Bacardi,
        Tanqueray,
        Patron,
        Hennessy,
        Other,
    }
);

/// Current state of one product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquorProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub liquor_type: LiquorType,
    pub brand: LiquorBrand,
    /// Percent ABV, 0..=100.
    pub alcohol_content: u64,
    pub batch_number: String,
    pub vintage_year: Option<String>,
    pub bottle_size: String,
    pub cost_price: u64,
    pub retail_price: u64,
    pub current_stock: u64,
    pub expiry_date: Option<String>,
    /// Principal that registered the product.
    pub added_by: PrincipalId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for LiquorProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl LiquorProduct {
    /// Copy of this record at a new stock level.
    pub fn with_stock(&self, current_stock: u64, at: DateTime<Utc>) -> Self {
        Self {
            current_stock,
            updated_at: at,
            ..self.clone()
        }
    }

    pub(crate) fn apply(&mut self, details: CheckedDetails) {
        self.name = details.name;
        self.liquor_type = details.liquor_type;
        self.brand = details.brand;
        self.alcohol_content = details.alcohol_content;
        self.batch_number = details.batch_number;
        self.vintage_year = details.vintage_year;
        self.bottle_size = details.bottle_size;
        self.cost_price = details.cost_price;
        self.retail_price = details.retail_price;
        self.expiry_date = details.expiry_date;
    }
}

/// Descriptive fields shared by create and update requests.
///
/// Numbers are signed so that negative input can be reported as a payload
/// error naming the field instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub name: String,
    #[serde(rename = "type")]
    pub liquor_type: LiquorType,
    pub brand: LiquorBrand,
    pub alcohol_content: i64,
    pub batch_number: String,
    pub vintage_year: Option<String>,
    pub bottle_size: String,
    pub cost_price: i64,
    pub retail_price: i64,
    pub expiry_date: Option<String>,
}

/// Request to add a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(flatten)]
    pub details: ProductDetails,
    pub current_stock: i64,
}

/// Request to replace a product's descriptive fields.
///
/// Stock is only touched when `current_stock` is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(flatten)]
    pub details: ProductDetails,
    #[serde(default)]
    pub current_stock: Option<i64>,
}

impl ProductUpdate {
    /// Update that keeps the stored stock level.
    pub fn details_only(details: ProductDetails) -> Self {
        Self {
            details,
            current_stock: None,
        }
    }
}

impl From<ProductPayload> for ProductUpdate {
    fn from(payload: ProductPayload) -> Self {
        Self {
            details: payload.details,
            current_stock: Some(payload.current_stock),
        }
    }
}

/// `ProductDetails` after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckedDetails {
    pub name: String,
    pub liquor_type: LiquorType,
    pub brand: LiquorBrand,
    pub alcohol_content: u64,
    pub batch_number: String,
    pub vintage_year: Option<String>,
    pub bottle_size: String,
    pub cost_price: u64,
    pub retail_price: u64,
    pub expiry_date: Option<String>,
}

impl ProductDetails {
    pub(crate) fn check(&self) -> LedgerResult<CheckedDetails> {
        Ok(CheckedDetails {
            name: validation::required_text("name", &self.name)?,
            liquor_type: self.liquor_type,
            brand: self.brand,
            alcohol_content: validation::alcohol_content(self.alcohol_content)?,
            batch_number: validation::required_text("batch_number", &self.batch_number)?,
            vintage_year: validation::optional_text("vintage_year", self.vintage_year.as_deref())?,
            bottle_size: validation::required_text("bottle_size", &self.bottle_size)?,
            cost_price: validation::non_negative("cost_price", self.cost_price)?,
            retail_price: validation::non_negative("retail_price", self.retail_price)?,
            expiry_date: validation::optional_text("expiry_date", self.expiry_date.as_deref())?,
        })
    }
}
