//! The fetched record.

use serde::Deserialize;

/// The three-field value fetched from the endpoint.
///
/// Constructed only by decoding a JSON object of the shape
/// `{"userId": <int>, "id": <int>, "title": <string>}`. All three fields are
/// required and type-checked at decode time; unknown fields are ignored.
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Identifier of the owning user.
    pub user_id: u64,
    /// Identifier of the record itself.
    pub id: u64,
    /// Display title.
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decode() {
        let record: Record =
            serde_json::from_str(r#"{"userId":1,"id":1,"title":"quidem molestiae enim"}"#)
                .expect("deserialize");

        assert_eq!(
            record,
            Record {
                user_id: 1,
                id: 1,
                title: "quidem molestiae enim".to_string(),
            }
        );
    }

    #[test]
    fn record_decode_ignores_unknown_fields() {
        let record: Record =
            serde_json::from_str(r#"{"userId":2,"id":7,"title":"t","completed":false}"#)
                .expect("deserialize");

        assert_eq!(record.user_id, 2);
        assert_eq!(record.id, 7);
    }

    #[test]
    fn record_decode_missing_field() {
        let result: std::result::Result<Record, _> =
            serde_json::from_str(r#"{"userId":1,"id":1}"#);

        let err = result.expect_err("should fail");
        assert!(err.to_string().contains("title"), "unexpected error: {err}");
    }

    #[test]
    fn record_decode_wrong_type() {
        let result: std::result::Result<Record, _> =
            serde_json::from_str(r#"{"userId":"1","id":1,"title":"t"}"#);

        assert!(result.is_err());
    }
}
