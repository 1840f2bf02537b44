//! Prompt text for battle mode

/// Battle-mode prompt helpers
pub struct BattlePrompt;

impl BattlePrompt {
    /// Instruction sent with every automatic battle turn
    pub fn system_instruction() -> &'static str {
        r#"You are in a live debate against another AI model.
The latest message is your opponent's claim (or, at the start, the topic set by the user).
Do not answer the user directly and do not agree for the sake of politeness.
Attack the opposing party's most recent claim: point out flaws, missing evidence, and weak reasoning, then state your counter-position.
Keep it sharp and under 150 words."#
    }

    /// Fold an instruction into the prompt text itself, for providers that
    /// get no separate system channel.
    pub fn inline(instruction: &str, prompt: &str) -> String {
        format!("{}\n\n{}", instruction, prompt)
    }

    /// Fixed prompt used to check that a provider answers at all
    pub fn probe() -> &'static str {
        "Hello, are you working?"
    }
}
