use serde::{Deserialize, Serialize};

/// Maximum number of coordinates the lookup service accepts per request.
pub const MAX_COORDINATES_PER_REQUEST: usize = 128;

/// Request body for a component report lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRequest {
    pub coordinates: Vec<String>,
}

impl AuditRequest {
    pub fn new(coordinates: Vec<String>) -> Self {
        Self { coordinates }
    }

    /// Splits `coordinates` into requests of at most `size` entries each.
    ///
    /// Order is preserved. A `size` of zero is treated as one.
    pub fn batches(coordinates: &[String], size: usize) -> Vec<AuditRequest> {
        coordinates
            .chunks(size.max(1))
            .map(|chunk| AuditRequest::new(chunk.to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("pkg:npm/pkg-{}@1.0.{}", i, i)).collect()
    }

    #[test]
    fn test_batches_split_at_limit() {
        let batches = AuditRequest::batches(&coords(300), MAX_COORDINATES_PER_REQUEST);
        let sizes: Vec<usize> = batches.iter().map(|b| b.coordinates.len()).collect();
        assert_eq!(sizes, vec![128, 128, 44]);
        assert_eq!(batches[1].coordinates[0], "pkg:npm/pkg-128@1.0.128");
    }

    #[test]
    fn test_batches_empty_input() {
        assert!(AuditRequest::batches(&[], MAX_COORDINATES_PER_REQUEST).is_empty());
    }

    #[test]
    fn test_batches_zero_size() {
        assert_eq!(AuditRequest::batches(&coords(3), 0).len(), 3);
    }

    #[test]
    fn test_serialize_wire_shape() {
        let request = AuditRequest::new(vec!["pkg:npm/a@1.0.0".to_string()]);
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"coordinates":["pkg:npm/a@1.0.0"]}"#);
    }
}
