#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

use crate::configuration::ConfigKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum ProviderName {
    Google,
    Groq,
}

impl ProviderName {
    pub fn credential_key(&self) -> ConfigKey {
        match self {
            ProviderName::Google => return ConfigKey::GoogleApiKey,
            ProviderName::Groq => return ConfigKey::GroqApiKey,
        }
    }
}

/// One selectable provider/model combination. Built once from the builtin
/// catalog and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub id: usize,
    pub display_name: String,
    pub provider: ProviderName,
    pub model_identifier: String,
    pub credential_key: ConfigKey,
}

pub struct ModelRegistry {
    entries: Vec<ModelDescriptor>,
}

impl ModelRegistry {
    pub fn builtin() -> ModelRegistry {
        let catalog = [
            (1, "Gemini 1.5 Pro", ProviderName::Google, "gemini-1.5-pro"),
            (2, "Gemini 2.0 Flash", ProviderName::Google, "gemini-2.0-flash"),
            (3, "Llama 3.1 70B", ProviderName::Groq, "llama-3.1-70b-versatile"),
            (4, "Llama 3.1 8B", ProviderName::Groq, "llama-3.1-8b-instant"),
            (5, "Mixtral 8x7B", ProviderName::Groq, "mixtral-8x7b-32768"),
        ];

        let entries = catalog
            .iter()
            .map(|(id, display_name, provider, model_identifier)| {
                return ModelDescriptor {
                    id: *id,
                    display_name: display_name.to_string(),
                    provider: *provider,
                    model_identifier: model_identifier.to_string(),
                    credential_key: provider.credential_key(),
                };
            })
            .collect::<Vec<ModelDescriptor>>();

        return ModelRegistry { entries };
    }

    /// Declaration order, which is also menu order.
    pub fn list(&self) -> &[ModelDescriptor] {
        return &self.entries;
    }

    pub fn get(&self, id: usize) -> Option<&ModelDescriptor> {
        return self.entries.iter().find(|entry| return entry.id == id);
    }
}
