use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// One recorded scan. The recognized payload is stored as JSON text so the
/// history endpoint can replay what the recognizer reported at the time.
#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = crate::schema::scan_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ScanRecord {
    pub id: i32,
    pub user_id: i32,
    pub scan_id: Uuid,
    pub mode: String,
    pub recognized: String,
    pub created_at: NaiveDateTime,
}

impl ScanRecord {
    pub fn to_response(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "scan_id": self.scan_id,
            "mode": self.mode,
            "recognized": serde_json::from_str::<serde_json::Value>(&self.recognized)
                .unwrap_or(serde_json::Value::Null),
            "created_at": self.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::scan_records)]
pub struct NewScanRecord {
    pub user_id: i32,
    pub scan_id: Uuid,
    pub mode: String,
    pub recognized: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_decodes_stored_payload() {
        let record = ScanRecord {
            id: 1,
            user_id: 1,
            scan_id: Uuid::new_v4(),
            mode: "single".to_string(),
            recognized: r#"{"item":{"name":"Apple"}}"#.to_string(),
            created_at: Utc::now().naive_utc(),
        };
        let json = record.to_response();
        assert_eq!(json["recognized"]["item"]["name"], "Apple");
    }

    #[test]
    fn corrupt_stored_payload_degrades_to_null() {
        let record = ScanRecord {
            id: 2,
            user_id: 1,
            scan_id: Uuid::new_v4(),
            mode: "multi".to_string(),
            recognized: "{broken".to_string(),
            created_at: Utc::now().naive_utc(),
        };
        assert!(record.to_response()["recognized"].is_null());
    }
}
