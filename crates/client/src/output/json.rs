//! JSON output formatting.

use crate::error::Result;

/// Format a value as pretty-printed JSON.
pub fn format_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use appschema_core::apply::ApplyStatus;
    use appschema_core::provision::{CollectionReport, ProvisioningReport};

    #[test]
    fn test_report_shape() {
        let report = ProvisioningReport {
            collections: vec![CollectionReport {
                id: "users".to_string(),
                status: ApplyStatus::Failed {
                    message: "boom".to_string(),
                },
                attributes: Vec::new(),
            }],
        };
        let value: serde_json::Value = serde_json::from_str(&format_json(&report).unwrap()).unwrap();
        assert_eq!(value["collections"][0]["id"], "users");
        assert_eq!(value["collections"][0]["status"], "failed");
        assert_eq!(value["collections"][0]["message"], "boom");
    }
}
