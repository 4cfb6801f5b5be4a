use chrono::{DateTime, Utc};
use serde::Deserialize;

use vendorhub_analytics::{OrderStatus, RecommendationReport};
use vendorhub_connections::{ConnectionRequest, ConnectionStatus};
use vendorhub_core::ProductId;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProductRequest {
    pub product_name: String,
    pub quantity: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOrderRequest {
    pub product_id: ProductId,
    pub order_quantity: u64,
    pub status: OrderStatus,
    /// Defaults to the time the order is received.
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequestBody {
    pub vendor_name: String,
    #[serde(default)]
    pub vendor_shop_name: String,
    pub agent_name: String,
    #[serde(default)]
    pub agency_name: String,
}

// -------------------------
// Response mapping
// -------------------------

pub fn recommendations_to_json(report: RecommendationReport) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "count": report.count,
        "recommendations": report.recommendations,
    })
}

pub fn connection_to_json(c: &ConnectionRequest) -> serde_json::Value {
    serde_json::json!({
        "id": c.id_typed().to_string(),
        "vendorId": c.vendor_id(),
        "agentId": c.agent_id(),
        "vendorName": c.vendor().name,
        "vendorShopName": c.vendor().shop_name,
        "agentName": c.agent().name,
        "agencyName": c.agent().agency_name,
        "connectionStatus": status_str(c.status()),
        "requestedAt": c.requested_at(),
        "decidedAt": c.decided_at(),
    })
}

pub fn connections_to_json(cs: &[ConnectionRequest]) -> serde_json::Value {
    serde_json::json!({
        "count": cs.len(),
        "connections": cs.iter().map(connection_to_json).collect::<Vec<_>>(),
    })
}

fn status_str(s: ConnectionStatus) -> &'static str {
    match s {
        ConnectionStatus::Pending => "pending",
        ConnectionStatus::Accepted => "accepted",
        ConnectionStatus::Rejected => "rejected",
    }
}
