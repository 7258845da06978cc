use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use liquorledger_core::{Entity, LedgerError, PrincipalId, ProductId, SupplyChainEventId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupplyChainEventType {
    Received,
    Sold,
    Adjusted,
    Damaged,
    Expired,
}

impl SupplyChainEventType {
    pub const ALL: [SupplyChainEventType; 5] = [
        SupplyChainEventType::Received,
        SupplyChainEventType::Sold,
        SupplyChainEventType::Adjusted,
        SupplyChainEventType::Damaged,
        SupplyChainEventType::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupplyChainEventType::Received => "Received",
            SupplyChainEventType::Sold => "Sold",
            SupplyChainEventType::Adjusted => "Adjusted",
            SupplyChainEventType::Damaged => "Damaged",
            SupplyChainEventType::Expired => "Expired",
        }
    }
}

impl core::fmt::Display for SupplyChainEventType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SupplyChainEventType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LedgerError::invalid(format!("unknown supply chain event type '{wanted}'")))
    }
}

/// Audit-trail entry for a physical movement. Never changes stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyChainEvent {
    pub id: SupplyChainEventId,
    pub product_id: ProductId,
    pub event_type: SupplyChainEventType,
    pub location: String,
    pub quantity: u64,
    pub participant_id: String,
    pub logged_by: PrincipalId,
    pub date: DateTime<Utc>,
}

impl Entity for SupplyChainEvent {
    type Id = SupplyChainEventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: append a supply-chain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSupplyChainEvent {
    pub product_id: ProductId,
    pub event_type: SupplyChainEventType,
    pub location: String,
    pub quantity: i64,
    pub participant_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_parses_and_serializes_by_name() {
        assert_eq!("damaged".parse::<SupplyChainEventType>().unwrap(), SupplyChainEventType::Damaged);
        assert!("Lost".parse::<SupplyChainEventType>().is_err());
        assert_eq!(
            serde_json::to_string(&SupplyChainEventType::Received).unwrap(),
            "\"Received\""
        );
    }
}
