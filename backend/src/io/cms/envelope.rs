//! Response envelopes of the upstream content API.
//!
//! Reads wrap every record as `{id, attributes: {...}}`, with relations
//! nested one level deeper under `data`. [`flatten_attributes`] collapses
//! those envelopes into plain records; the typed containers here separate
//! success from error envelopes before any field is read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{InvoiceStatus, PaginationMeta};

use crate::error::DashboardError;

/// Error body the upstream embeds in failed responses.
#[derive(Debug, Clone, Deserialize)]
pub struct CmsErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub name: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CmsMeta {
    #[serde(default)]
    pagination: Option<PaginationMeta>,
}

/// Envelope of every upstream response: a `data` payload, optional `meta`,
/// and possibly an `error` body even under a success status.
#[derive(Debug, Deserialize)]
pub struct CmsDocument {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    meta: Option<CmsMeta>,
    #[serde(default)]
    error: Option<CmsErrorBody>,
}

impl CmsDocument {
    /// Separate the success envelope from the error envelope and flatten the
    /// payload. A success status with an embedded error body is still an
    /// error; both checks are required.
    pub fn into_result(
        self,
        status: reqwest::StatusCode,
    ) -> Result<(Value, Option<PaginationMeta>), DashboardError> {
        if let Some(error) = self.error {
            return Err(DashboardError::Upstream {
                status: error.status.unwrap_or_else(|| status.as_u16()),
                message: error.message,
            });
        }
        if !status.is_success() {
            return Err(DashboardError::Upstream {
                status: status.as_u16(),
                message: format!("upstream responded with status {}", status.as_u16()),
            });
        }
        let data = self
            .data
            .ok_or_else(|| DashboardError::Payload("response carried no data".to_string()))?;
        let meta = self.meta.and_then(|meta| meta.pagination);
        Ok((flatten_attributes(data), meta))
    }
}

/// Collapse `{id, attributes: {...}}` envelopes and relation `data` wrappers
/// into flat objects, recursively.
///
/// Running it twice equals running it once: after the first pass no
/// `attributes` or `data` object keys remain to merge.
pub fn flatten_attributes(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(flatten_attributes).collect()),
        Value::Object(fields) => {
            let mut flat = Map::new();
            for (key, child) in fields {
                let child = flatten_attributes(child);
                if key == "attributes" || key == "data" {
                    match child {
                        Value::Object(inner) => flat.extend(inner),
                        // an empty relation ({"data": null}) flattens away
                        Value::Null => {}
                        other => {
                            flat.insert(key, other);
                        }
                    }
                } else {
                    flat.insert(key, child);
                }
            }
            Value::Object(flat)
        }
        other => other,
    }
}

/// Write payload for invoice create/update: the record under `data`, with
/// the customer attached by reference.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceWrite {
    pub data: InvoiceWriteData,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceWriteData {
    pub amount: i64,
    pub status: InvoiceStatus,
    pub date: String,
    pub customer: CustomerConnect,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerConnect {
    pub connect: Vec<ConnectRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectRef {
    pub id: String,
}

/// Aggregate payload of the precomputed status endpoints. Absent counts and
/// totals default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusAggregate {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub total_owed: i64,
    #[serde(default)]
    pub total_paid: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enveloped_invoice() -> Value {
        json!({
            "id": 12,
            "attributes": {
                "amount": 3750,
                "status": "pending",
                "date": "2024-01-15",
                "customer": {
                    "data": {
                        "id": 3,
                        "attributes": {
                            "name": "Amy",
                            "email": "amy@example.com",
                            "image": {
                                "data": {
                                    "id": 9,
                                    "attributes": { "url": "/uploads/amy.png" }
                                }
                            }
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_flatten_merges_id_alongside_attributes() {
        let flat = flatten_attributes(enveloped_invoice());
        assert_eq!(flat["id"], json!(12));
        assert_eq!(flat["amount"], json!(3750));
        assert_eq!(flat["customer"]["name"], json!("Amy"));
        assert_eq!(flat["customer"]["image"]["url"], json!("/uploads/amy.png"));
        assert!(flat.get("attributes").is_none());
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let once = flatten_attributes(enveloped_invoice());
        let twice = flatten_attributes(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_flatten_drops_empty_relations() {
        let flat = flatten_attributes(json!({
            "id": 1,
            "attributes": { "customer": { "data": null } }
        }));
        assert_eq!(flat, json!({ "id": 1, "customer": {} }));
    }

    #[test]
    fn test_flatten_walks_arrays() {
        let flat = flatten_attributes(json!([
            { "id": 1, "attributes": { "month": "Jan", "revenue": 200 } },
            { "id": 2, "attributes": { "month": "Feb", "revenue": 180 } }
        ]));
        assert_eq!(
            flat,
            json!([
                { "id": 1, "month": "Jan", "revenue": 200 },
                { "id": 2, "month": "Feb", "revenue": 180 }
            ])
        );
    }

    #[test]
    fn test_success_status_with_error_body_is_an_error() {
        let document: CmsDocument = serde_json::from_value(json!({
            "data": null,
            "error": { "status": 400, "name": "ValidationError", "message": "amount is required" }
        }))
        .unwrap();
        match document.into_result(reqwest::StatusCode::OK) {
            Err(DashboardError::Upstream { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "amount is required");
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_status_without_body_reports_the_status() {
        let document: CmsDocument = serde_json::from_value(json!({})).unwrap();
        match document.into_result(reqwest::StatusCode::BAD_GATEWAY) {
            Err(DashboardError::Upstream { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[test]
    fn test_success_without_data_is_a_payload_error() {
        let document: CmsDocument = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            document.into_result(reqwest::StatusCode::OK),
            Err(DashboardError::Payload(_))
        ));
    }

    #[test]
    fn test_meta_pagination_passes_through() {
        let document: CmsDocument = serde_json::from_value(json!({
            "data": [],
            "meta": { "pagination": { "page": 2, "pageSize": 6, "pageCount": 4, "total": 19 } }
        }))
        .unwrap();
        let (_, meta) = document.into_result(reqwest::StatusCode::OK).unwrap();
        let meta = meta.unwrap();
        assert_eq!(meta.page, 2);
        assert_eq!(meta.page_size, 6);
        assert_eq!(meta.page_count, 4);
        assert_eq!(meta.total, 19);
    }

    #[test]
    fn test_invoice_write_wire_shape() {
        let payload = InvoiceWrite {
            data: InvoiceWriteData {
                amount: 3750,
                status: InvoiceStatus::Pending,
                date: "2024-01-15".to_string(),
                customer: CustomerConnect {
                    connect: vec![ConnectRef {
                        id: "c1".to_string(),
                    }],
                },
            },
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "data": {
                    "amount": 3750,
                    "status": "pending",
                    "date": "2024-01-15",
                    "customer": { "connect": [ { "id": "c1" } ] }
                }
            })
        );
    }

    #[test]
    fn test_status_aggregate_defaults_missing_counts_to_zero() {
        let aggregate: StatusAggregate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(aggregate.count, 0);
        assert_eq!(aggregate.total_owed, 0);
        assert_eq!(aggregate.total_paid, 0);

        let aggregate: StatusAggregate =
            serde_json::from_value(json!({ "totalOwed": 12800 })).unwrap();
        assert_eq!(aggregate.total_owed, 12800);
    }
}
