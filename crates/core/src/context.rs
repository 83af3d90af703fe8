//! Call configuration supplied by the operator before (or between) calls

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name used when none is configured
pub const DEFAULT_PRINCIPAL: &str = "Manohar";

/// What the assistant is calling about and what it is allowed to say
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Person the assistant represents; the handoff target
    #[serde(default = "default_principal")]
    pub principal_name: String,
    /// Free-text reason for the call
    pub purpose: String,
    /// Script lines, delivered in order
    #[serde(default)]
    pub talking_points: Vec<String>,
    /// Human-readable escalation triggers, shown to the operator only
    #[serde(default)]
    pub handoff_conditions: Vec<String>,
    /// Whether a post-call summary may be produced
    #[serde(default)]
    pub consent_to_summary: bool,
}

fn default_principal() -> String {
    DEFAULT_PRINCIPAL.to_string()
}

impl Default for CallContext {
    fn default() -> Self {
        Self {
            principal_name: default_principal(),
            purpose: String::new(),
            talking_points: Vec::new(),
            handoff_conditions: Vec::new(),
            consent_to_summary: false,
        }
    }
}

impl CallContext {
    pub fn new(purpose: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
            ..Self::default()
        }
    }

    pub fn with_principal(mut self, name: impl Into<String>) -> Self {
        self.principal_name = name.into();
        self
    }

    pub fn with_talking_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.talking_points = points.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_handoff_conditions<I, S>(mut self, conditions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handoff_conditions = conditions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_consent(mut self, consent: bool) -> Self {
        self.consent_to_summary = consent;
        self
    }

    /// Reject contexts the engine cannot run a call with
    pub fn validate(&self) -> Result<()> {
        if self.principal_name.trim().is_empty() {
            return Err(Error::invalid_context(
                "principal_name",
                "Principal name must not be blank",
            ));
        }
        if self.purpose.trim().is_empty() {
            return Err(Error::invalid_context("purpose", "Purpose must not be blank"));
        }
        Ok(())
    }
}
