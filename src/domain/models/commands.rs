#[cfg(test)]
#[path = "commands_test.rs"]
mod tests;

/// The fixed command vocabulary. Matching is whitespace-trimmed and
/// case-insensitive; anything that does not match exactly is a chat
/// message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatCommand {
    Quit,
    Switch,
    Clear,
    Models,
}

impl ChatCommand {
    pub fn parse(text: &str) -> Option<ChatCommand> {
        let normalized = text.trim().to_lowercase();

        if ["quit", "exit", "bye"].contains(&normalized.as_str()) {
            return Some(ChatCommand::Quit);
        }
        if normalized == "switch" {
            return Some(ChatCommand::Switch);
        }
        if normalized == "clear" {
            return Some(ChatCommand::Clear);
        }
        if normalized == "models" {
            return Some(ChatCommand::Models);
        }

        return None;
    }
}
