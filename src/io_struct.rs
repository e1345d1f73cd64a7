use serde::{Deserialize, Serialize};

/// Body of a generation request. Missing fields deserialize to empty
/// strings so that absent and empty parameters are rejected the same way.
#[derive(Debug, Deserialize, Serialize)]
pub struct GenerateNpcRequest {
    #[serde(default)]
    pub role: String,
    // `trait` is a keyword, keep the wire name through serde
    #[serde(rename = "trait", default)]
    pub key_trait: String,
}

impl GenerateNpcRequest {
    pub fn has_required_fields(&self) -> bool {
        !self.role.is_empty() && !self.key_trait.is_empty()
    }

    /// Render the fixed prompt template with both parameters verbatim.
    pub fn prompt(&self) -> String {
        format!(
            "Generate a brief description for a Tabletop RPG NPC with the following characteristics:\n\
             Role: {}\n\
             Key Trait: {}\n\
             \n\
             Provide the output in the following format:\n\
             Name: [NPC Name]\n\
             Appearance: [Brief appearance hint]\n\
             Motivation: [Key motivation or goal]",
            self.role, self.key_trait
        )
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NpcResponse {
    #[serde(rename = "npcDescription")]
    pub npc_description: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}
