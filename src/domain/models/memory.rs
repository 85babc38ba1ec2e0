#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

/// One completed human/assistant exchange. Order is carried by position in
/// the memory sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub human: String,
    pub assistant: String,
}

/// Ordered, unbounded store of prior turns, owned by a single session.
/// Grows only through `record` and resets only through `clear`.
#[derive(Default)]
pub struct ConversationMemory {
    turns: Vec<Turn>,
}

impl ConversationMemory {
    pub fn new() -> ConversationMemory {
        return ConversationMemory { turns: vec![] };
    }

    pub fn record(&mut self, human: &str, assistant: &str) {
        self.turns.push(Turn {
            human: human.to_string(),
            assistant: assistant.to_string(),
        });
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Projects the full history into the block injected into prompts.
    /// Turns are never truncated or summarized; a provider with a smaller
    /// context window surfaces that as a provider error. An empty sequence
    /// renders to an empty string so the prompt template degrades cleanly on
    /// the first turn.
    pub fn render(&self) -> String {
        return self
            .turns
            .iter()
            .map(|turn| {
                return format!("Human: {}\nAI: {}", turn.human, turn.assistant);
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    /// Counted from the sequence itself, not the rendered projection, so
    /// multi-line turns cannot skew the number.
    pub fn turn_count(&self) -> usize {
        return self.turns.len();
    }

    pub fn turns(&self) -> &[Turn] {
        return &self.turns;
    }
}
