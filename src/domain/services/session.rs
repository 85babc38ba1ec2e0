#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use crate::domain::models::render_prompt;
use crate::domain::models::ChatCommand;
use crate::domain::models::ConversationMemory;
use crate::domain::models::CredentialStore;
use crate::domain::models::CredentialValidator;
use crate::domain::models::ModelDescriptor;
use crate::domain::models::ModelRegistry;
use crate::domain::models::ProviderBox;
use crate::domain::models::ProviderError;
use crate::domain::models::ProviderName;
use crate::infrastructure::providers::ProviderManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    AwaitingInput,
    Terminated,
}

/// The binding of one descriptor, one live client, and one memory. Replaced
/// wholesale on every successful model switch; never patched in place.
struct ActiveModel {
    descriptor: ModelDescriptor,
    client: ProviderBox,
    memory: ConversationMemory,
}

/// Result of one selection attempt. The caller owns the retry loop.
pub enum SelectOutcome {
    Selected {
        display_name: String,
        provider: ProviderName,
    },
    Rejected {
        reason: String,
        guidance: Option<String>,
    },
}

/// Result of handling one line of input. Everything except `Terminated`
/// means the caller should prompt for the next line.
pub enum TurnOutcome {
    Terminated,
    SwitchRequested,
    Cleared,
    ModelMenuRequested,
    EmptyInput,
    Reply {
        text: String,
        turn_count: usize,
    },
    Failed {
        error: ProviderError,
        guidance: Option<String>,
    },
}

pub struct ConversationSession {
    registry: ModelRegistry,
    credentials: CredentialStore,
    state: SessionState,
    active: Option<ActiveModel>,
}

impl ConversationSession {
    pub fn new(registry: ModelRegistry, credentials: CredentialStore) -> ConversationSession {
        return ConversationSession {
            registry,
            credentials,
            state: SessionState::Uninitialized,
            active: None,
        };
    }

    pub fn state(&self) -> SessionState {
        return self.state;
    }

    pub fn registry(&self) -> &ModelRegistry {
        return &self.registry;
    }

    pub fn credentials(&self) -> &CredentialStore {
        return &self.credentials;
    }

    pub fn configured_count(&self) -> usize {
        return self
            .registry
            .list()
            .iter()
            .filter(|descriptor| {
                return CredentialValidator::is_configured(&self.credentials, descriptor);
            })
            .count();
    }

    pub fn active_model_name(&self) -> Option<String> {
        return self
            .active
            .as_ref()
            .map(|active| return active.descriptor.display_name.clone());
    }

    pub fn turn_count(&self) -> usize {
        return self
            .active
            .as_ref()
            .map_or(0, |active| return active.memory.turn_count());
    }

    /// The rendered history of the active conversation, empty when no model
    /// is bound.
    pub fn history(&self) -> String {
        return self
            .active
            .as_ref()
            .map_or(String::new(), |active| return active.memory.render());
    }

    /// One selection attempt. A rejection leaves any previously active
    /// model and its memory untouched; only a successful selection replaces
    /// the binding, and the new model always starts with empty memory.
    pub fn select_model(&mut self, choice: &str) -> SelectOutcome {
        let id = match choice.trim().parse::<usize>() {
            Ok(id) => id,
            Err(_) => {
                return SelectOutcome::Rejected {
                    reason: "Invalid selection. Please enter a model number.".to_string(),
                    guidance: None,
                };
            }
        };

        let descriptor = match self.registry.get(id) {
            Some(descriptor) => descriptor.clone(),
            None => {
                return SelectOutcome::Rejected {
                    reason: format!("No model with number {id}. Please try again."),
                    guidance: None,
                };
            }
        };

        if !CredentialValidator::is_configured(&self.credentials, &descriptor) {
            return SelectOutcome::Rejected {
                reason: format!("{} API key not configured!", descriptor.provider),
                guidance: Some(credential_guidance(descriptor.provider)),
            };
        }

        let credential = self.credentials.get(descriptor.credential_key);
        let client = match ProviderManager::build(&descriptor, credential) {
            Ok(client) => client,
            Err(err) => {
                return SelectOutcome::Rejected {
                    reason: format!("Error initializing {}: {err}", descriptor.display_name),
                    guidance: None,
                };
            }
        };

        let display_name = descriptor.display_name.clone();
        let provider = descriptor.provider;

        tracing::info!(model = display_name, provider = %provider, "model selected");

        self.active = Some(ActiveModel {
            descriptor,
            client,
            memory: ConversationMemory::new(),
        });
        self.state = SessionState::Ready;

        return SelectOutcome::Selected {
            display_name,
            provider,
        };
    }

    /// Marks the session as waiting on the user and returns the prompt
    /// label to display.
    pub fn await_input(&mut self) -> String {
        self.state = SessionState::AwaitingInput;
        let name = self
            .active_model_name()
            .unwrap_or_else(|| return "no model".to_string());

        return format!("💬 You [{name}]: ");
    }

    pub async fn handle_turn(&mut self, raw_input: &str) -> TurnOutcome {
        self.state = SessionState::Ready;
        let trimmed = raw_input.trim();

        if let Some(command) = ChatCommand::parse(trimmed) {
            match command {
                ChatCommand::Quit => {
                    self.state = SessionState::Terminated;
                    return TurnOutcome::Terminated;
                }
                ChatCommand::Switch => {
                    return TurnOutcome::SwitchRequested;
                }
                ChatCommand::Clear => {
                    if let Some(active) = self.active.as_mut() {
                        active.memory.clear();
                    }
                    return TurnOutcome::Cleared;
                }
                ChatCommand::Models => {
                    return TurnOutcome::ModelMenuRequested;
                }
            }
        }

        if trimmed.is_empty() {
            return TurnOutcome::EmptyInput;
        }

        let active = match self.active.as_mut() {
            Some(active) => active,
            None => {
                return TurnOutcome::Failed {
                    error: ProviderError::Configuration("no model selected".to_string()),
                    guidance: None,
                };
            }
        };

        let prompt = render_prompt(&active.memory.render(), trimmed);
        match active.client.invoke(&prompt).await {
            Ok(reply) => {
                active.memory.record(trimmed, &reply);
                return TurnOutcome::Reply {
                    text: reply,
                    turn_count: active.memory.turn_count(),
                };
            }
            Err(err) => {
                // Failed exchanges never reach memory.
                let guidance = provider_guidance(active.descriptor.provider, &err);
                return TurnOutcome::Failed {
                    error: err,
                    guidance,
                };
            }
        }
    }
}

fn credential_guidance(provider: ProviderName) -> String {
    let source = match provider {
        ProviderName::Google => "https://aistudio.google.com/app/apikey",
        ProviderName::Groq => "https://console.groq.com/keys",
    };

    return format!("Get an API key from {source}, set it in your environment, and restart.");
}

fn provider_guidance(provider: ProviderName, error: &ProviderError) -> Option<String> {
    match error {
        ProviderError::Authentication(_) => {
            return Some(format!("Please check your {provider} API key."));
        }
        ProviderError::QuotaExceeded(_) => {
            return Some(
                "You may have reached your quota limit. Try switching to another model with 'switch'."
                    .to_string(),
            );
        }
        ProviderError::Transient(_) => {
            return Some("The backend looks temporarily unavailable. Try again, or switch models.".to_string());
        }
        _ => {
            return None;
        }
    }
}
