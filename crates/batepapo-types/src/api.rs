use serde::Deserialize;

// Fields are optional so that missing values reach the validator instead of
// failing deserialization.

// -- Participants --

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

// -- Messages --

#[derive(Debug, Default, Deserialize)]
pub struct SendMessageRequest {
    pub to: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MessageQuery {
    /// Kept as raw text: anything that is not a positive integer means "no limit".
    pub limit: Option<String>,
}

impl MessageQuery {
    pub fn limit(&self) -> Option<usize> {
        self.limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
    }
}
