//! Tool request payload types.
//!
//! Field names are camelCase so requests can be forwarded to the relocation
//! API as-is. Optional fields that are absent are dropped before forwarding.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lookup of a single record by identifier.
#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct RecordIdRequest {
    #[schemars(description = "Identifier of the record.")]
    pub id: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ListMovesRequest {
    #[schemars(description = "Optional move status filter, for example 'planning' or 'in_transit'.")]
    pub status: Option<String>,
    #[schemars(description = "Optional employer identifier to limit results to one employer.")]
    pub employer_id: Option<String>,
    #[schemars(description = "Maximum number of moves to return.")]
    pub limit: Option<u32>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoveRequest {
    #[schemars(description = "Employee being relocated.")]
    pub employee_id: String,
    #[schemars(description = "City the employee is moving from.")]
    pub origin_city: String,
    #[schemars(description = "City the employee is moving to.")]
    pub destination_city: String,
    #[schemars(description = "Planned move date (ISO 8601).")]
    pub move_date: Option<String>,
    #[schemars(description = "Free-form notes for the relocation coordinator.")]
    pub notes: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMoveRequest {
    #[schemars(description = "Identifier of the move to update.")]
    pub id: String,
    pub origin_city: Option<String>,
    pub destination_city: Option<String>,
    #[schemars(description = "New planned move date (ISO 8601).")]
    pub move_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[schemars(description = "Identifier of the record to update.")]
    pub id: String,
    #[schemars(description = "New status value.")]
    pub status: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestMoveRequest {
    #[schemars(description = "Optional employer to attach the generated move to.")]
    pub employer_id: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MoveScopedRequest {
    #[schemars(description = "Move whose records should be listed.")]
    pub move_id: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchHousingRequest {
    #[schemars(description = "City to search in.")]
    pub city: String,
    #[schemars(description = "Maximum monthly price.")]
    pub max_price: Option<f64>,
    #[schemars(description = "Minimum number of bedrooms.")]
    pub bedrooms: Option<u32>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateHousingOptionRequest {
    #[schemars(description = "Move the housing option belongs to.")]
    pub move_id: String,
    pub address: String,
    #[schemars(description = "Monthly price.")]
    pub price: f64,
    pub bedrooms: Option<u32>,
    #[schemars(description = "First available date (ISO 8601).")]
    pub available_from: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SelectHousingOptionRequest {
    pub move_id: String,
    #[schemars(description = "Housing option chosen for the move.")]
    pub housing_option_id: String,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesRequest {
    #[schemars(description = "Optional move filter.")]
    pub move_id: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub move_id: String,
    #[serde(rename = "type")]
    #[schemars(description = "Service type, for example 'flight', 'shipping' or 'storage'.")]
    pub service_type: String,
    pub vendor: Option<String>,
    #[schemars(description = "Scheduled date (ISO 8601).")]
    pub scheduled_date: Option<String>,
    pub cost: Option<f64>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ListInvoicesRequest {
    pub move_id: Option<String>,
    #[schemars(description = "Optional invoice status filter, for example 'pending' or 'paid'.")]
    pub status: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    pub move_id: String,
    #[schemars(description = "Invoice amount in the employer's billing currency.")]
    pub amount: f64,
    #[schemars(description = "Due date (ISO 8601).")]
    pub due_date: Option<String>,
    pub description: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MarkInvoicePaidRequest {
    pub id: String,
    #[schemars(description = "Payment timestamp (ISO 8601); defaults to now on the server.")]
    pub paid_at: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySearchRequest {
    #[schemars(description = "Optional case-insensitive name filter.")]
    pub search: Option<String>,
}

#[derive(JsonSchema, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ListEmployeesRequest {
    #[schemars(description = "Optional employer filter.")]
    pub employer_id: Option<String>,
    #[schemars(description = "Optional case-insensitive name filter.")]
    pub search: Option<String>,
}
