// Shared prompt constants.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every rewriting prompt.
pub const TRUTHFULNESS_INSTRUCTION: &str = "\
    CRITICAL: Keep every fact accurate. Do NOT invent employers, titles, dates, \
    metrics, technologies or skills that are not present in the source material. \
    Rephrase and reorder to emphasize relevance; never embellish.";

/// Builds a system prompt from a role description plus the JSON-only rules.
pub fn json_system(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_system_appends_rules() {
        let system = json_system("You are a resume writer.");
        assert!(system.starts_with("You are a resume writer. You MUST respond with valid JSON only."));
    }
}
