use serde::{Deserialize, Serialize};

use crate::amount::i128_str;
use crate::identity::Identity;

/// Inventory item snapshot produced by a simulated read.
///
/// Never mutated locally; a fresh read produces a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: u64,
    pub owner: Identity,
    pub name: String,
    pub description: String,
    #[serde(with = "i128_str")]
    pub rental_price_per_day: i128,
    pub is_available: bool,
}

/// Rental record snapshot produced by a simulated read.
///
/// Dates are ledger timestamps in seconds, exactly as the contract
/// returns them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub rental_id: u64,
    pub item_id: u64,
    pub renter: Identity,
    pub issue_date: u64,
    pub expected_return_date: u64,
    pub actual_return_date: Option<u64>,
    #[serde(with = "i128_str")]
    pub deposit_amount: i128,
    pub is_active: bool,
}

/// Arguments for the add_item write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemRequest {
    pub owner: String,
    pub name: String,
    pub description: String,
    #[serde(with = "i128_str")]
    pub rental_price_per_day: i128,
}

/// Arguments for the issue_item write.
///
/// Addresses stay raw strings here; the precondition rules decide whether
/// they are acceptable before anything is submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRequest {
    pub renter: String,
    pub item_id: u64,
    pub rental_days: u64,
    #[serde(with = "i128_str")]
    pub deposit_amount: i128,
}

/// Arguments for the return_item write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub rental_id: u64,
    pub returner: String,
}

/// Arguments for the owner-only availability toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub item_id: u64,
    pub is_available: bool,
    pub caller: String,
}
