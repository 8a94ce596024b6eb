use serde::{Deserialize, Serialize};

/// Status body returned by the accounts service's write endpoints.
///
/// ```json
/// { "statusCode": "201", "statusMsg": "Account created successfully" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status_code: String,
    pub status_msg: String,
}

impl StatusResponse {
    pub fn created() -> Self {
        Self {
            status_code: "201".to_string(),
            status_msg: "Account created successfully".to_string(),
        }
    }

    pub fn processed() -> Self {
        Self {
            status_code: "200".to_string(),
            status_msg: "Request processed successfully".to_string(),
        }
    }
}
