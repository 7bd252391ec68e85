//! Board configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Board and session gate configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Free questions per session before the email gate engages
    #[serde(default = "default_max_free_questions")]
    pub max_free_questions: u32,
}

impl BoardConfig {
    /// Validate board configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_free_questions == 0 {
            return Err(ValidationError::InvalidQuestionBudget);
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_free_questions: default_max_free_questions(),
        }
    }
}

fn default_max_free_questions() -> u32 {
    3
}
