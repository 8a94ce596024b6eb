use std::collections::BTreeMap;

use serde::Serialize;

/// Contact information served by `/api/account-info`, `/cards/card-info`
/// and `/loans/loans-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub message: String,
    pub contact_details: BTreeMap<String, String>,
    pub on_call_support: Vec<String>,
}
