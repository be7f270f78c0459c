use serde::{Deserialize, Serialize};

/// One email in a training thread. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Ordered exchange for one training session, oldest first.
pub type EmailThread = Vec<EmailMessage>;
