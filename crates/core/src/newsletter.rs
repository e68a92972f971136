//! Newsletter signup validation and outcome messages.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Consent as sent by a checkbox (`"on"`, `"true"`) or a JSON boolean.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConsentValue {
    Flag(bool),
    Text(String),
}

impl ConsentValue {
    pub fn is_given(&self) -> bool {
        match self {
            ConsentValue::Flag(flag) => *flag,
            ConsentValue::Text(text) => matches!(text.trim(), "on" | "true"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsletterSignup {
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[serde(default)]
    pub consent: Option<ConsentValue>,
}

/// A signup that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub email: String,
    pub consent: bool,
}

impl NewsletterSignup {
    pub fn into_subscription(self) -> Result<Subscription, CoreError> {
        let signup = Self {
            email: self.email.trim().to_string(),
            consent: self.consent,
        };
        signup.validate()?;
        Ok(Subscription {
            consent: signup.consent.as_ref().is_some_and(ConsentValue::is_given),
            email: signup.email,
        })
    }
}

/// Result of a subscribe attempt. A duplicate address is still a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
}

impl SubscribeOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SubscribeOutcome::Subscribed => "Thanks! We'll keep you posted.",
            SubscribeOutcome::AlreadySubscribed => "You are already subscribed.",
        }
    }
}
