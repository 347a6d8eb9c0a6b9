use serde::{Deserialize, Serialize};

/// Acknowledgement of an `updateOne`, including upserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

impl UpdateOutcome {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<String>) -> Self {
        UpdateOutcome {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: upserted_id.is_some() as u64,
            upserted_id,
        }
    }
}

/// Acknowledgement of an `insertOne`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertOutcome {
    pub fn new(inserted_id: String) -> Self {
        InsertOutcome {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Acknowledgement of a `deleteOne`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteOutcome {
    pub fn new(deleted_count: u64) -> Self {
        DeleteOutcome {
            acknowledged: true,
            deleted_count,
        }
    }
}
