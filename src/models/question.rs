// SPDX-License-Identifier: MIT

//! Trainer question model.

use serde::{Deserialize, Serialize};

/// A question submitted to a trainer.
///
/// Two-state lifecycle: Open (no `response`) → Answered (`response`,
/// `trainerId`, and `dateResponded` all set). Answered questions accept no
/// further transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, alias = "_firestore_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainer_id: Option<String>,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    /// Stamped server-side at creation, never client-supplied.
    pub date_asked: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_responded: Option<String>,
}

impl Question {
    /// Whether this question has already been answered.
    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }
}
