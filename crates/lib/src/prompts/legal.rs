//! # Legal Analysis Prompts
//!
//! The fixed prompt the advisor sends to the model for every case. The user
//! prompt carries two slots, `{case_description}` and `{legal_provisions}`, and
//! asks for four sections. The sections are a request to the model; nothing
//! downstream enforces them.

/// The persona given to the model as its system prompt.
pub const LEGAL_ANALYSIS_SYSTEM_PROMPT: &str = "You are an experienced Indian legal advisor. Analyze the case you are given and provide clear, actionable advice in a well-structured format.";

/// The per-case prompt.
///
/// Placeholders: `{case_description}`, `{legal_provisions}`
pub const LEGAL_ANALYSIS_USER_PROMPT: &str = r#"**Case Details:**
{case_description}

**Relevant Legal Provisions:**
{legal_provisions}

Please provide your analysis with these clear sections:

1. **Case Summary**:
   - Briefly summarize the key facts
   - Identify the main legal issues

2. **Applicable Laws**:
   - List the most relevant laws/sections
   - Explain how each law applies to this case
   - Mention possible punishments/remedies

3. **Recommended Actions**:
   - Step-by-step advice on what to do next
   - Suggested legal procedures to follow
   - Any immediate precautions to take

4. **Additional Considerations**:
   - Potential challenges or complications
   - Estimated timelines if relevant
   - Suggestions for documentation/evidence

Use clear headings, bullet points, and maintain a professional yet accessible tone. Focus on practical guidance rather than theoretical discussion."#;

/// The four section headings the prompt asks for, in order.
pub const ANALYSIS_SECTIONS: [&str; 4] = [
    "Case Summary",
    "Applicable Laws",
    "Recommended Actions",
    "Additional Considerations",
];

/// Fills both placeholders of a legal analysis template.
///
/// Substitution happens on the template pieces only, so user text that happens
/// to contain `{legal_provisions}` is never expanded.
pub fn fill_legal_analysis_prompt(
    template: &str,
    case_description: &str,
    legal_provisions: &str,
) -> String {
    template
        .split("{case_description}")
        .map(|piece| piece.replace("{legal_provisions}", legal_provisions))
        .collect::<Vec<_>>()
        .join(case_description)
}
