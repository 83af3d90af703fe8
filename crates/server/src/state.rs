//! Application State
//!
//! Shared state across all handlers. There is exactly one call assistant;
//! the mutex serialises requests so one utterance is processed at a time.

use parking_lot::Mutex;
use std::sync::Arc;

use call_agent_agent::CallAssistant;
use call_agent_config::Settings;
use call_agent_core::{CallContext, TurnStamper, UuidStamper};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub assistant: Arc<Mutex<CallAssistant>>,
}

impl AppState {
    /// State seeded from the configured call defaults, stamping turns with uuids
    pub fn new(config: Settings) -> Self {
        let context = config.call.to_context();
        Self::with_assistant(config, CallAssistant::new(context, Box::new(UuidStamper)))
    }

    /// State with a custom context and stamper
    pub fn with_context(
        config: Settings,
        context: CallContext,
        stamper: Box<dyn TurnStamper>,
    ) -> Self {
        Self::with_assistant(config, CallAssistant::new(context, stamper))
    }

    fn with_assistant(config: Settings, assistant: CallAssistant) -> Self {
        Self {
            config: Arc::new(config),
            assistant: Arc::new(Mutex::new(assistant)),
        }
    }
}
