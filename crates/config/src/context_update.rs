//! Operator edits to the call context
//!
//! Talking points and handoff conditions arrive from the form as raw
//! newline-delimited text. They are split here, before reaching the engine,
//! into trimmed non-empty lines.

use serde::{Deserialize, Serialize};

use call_agent_core::CallContext;

/// Raw form fields as submitted by the operator. All fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextForm {
    #[serde(default)]
    pub principal_name: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    /// One talking point per line
    #[serde(default)]
    pub talking_points: Option<String>,
    /// One handoff condition per line
    #[serde(default)]
    pub handoff_conditions: Option<String>,
    #[serde(default)]
    pub consent_to_summary: Option<bool>,
}

/// Validated partial update to a `CallContext`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextUpdate {
    pub principal_name: Option<String>,
    pub purpose: Option<String>,
    pub talking_points: Option<Vec<String>>,
    pub handoff_conditions: Option<Vec<String>>,
    pub consent_to_summary: Option<bool>,
}

/// Split newline-delimited text into trimmed, non-empty lines
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

impl ContextUpdate {
    pub fn from_form(form: ContextForm) -> Self {
        Self {
            principal_name: form.principal_name.map(|s| s.trim().to_string()),
            purpose: form.purpose.map(|s| s.trim().to_string()),
            talking_points: form.talking_points.as_deref().map(split_lines),
            handoff_conditions: form.handoff_conditions.as_deref().map(split_lines),
            consent_to_summary: form.consent_to_summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.principal_name.is_none()
            && self.purpose.is_none()
            && self.talking_points.is_none()
            && self.handoff_conditions.is_none()
            && self.consent_to_summary.is_none()
    }

    /// Whether this update replaces the talking point list
    pub fn touches_talking_points(&self) -> bool {
        self.talking_points.is_some()
    }

    /// Produce the context that results from applying this update
    pub fn apply_to(&self, base: &CallContext) -> CallContext {
        let mut next = base.clone();
        if let Some(name) = &self.principal_name {
            next.principal_name = name.clone();
        }
        if let Some(purpose) = &self.purpose {
            next.purpose = purpose.clone();
        }
        if let Some(points) = &self.talking_points {
            next.talking_points = points.clone();
        }
        if let Some(conditions) = &self.handoff_conditions {
            next.handoff_conditions = conditions.clone();
        }
        if let Some(consent) = self.consent_to_summary {
            next.consent_to_summary = consent;
        }
        next
    }
}

impl From<ContextForm> for ContextUpdate {
    fn from(form: ContextForm) -> Self {
        Self::from_form(form)
    }
}
