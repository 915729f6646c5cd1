//! # Legal Prompt Tests
//!
//! Validates how the per-case prompt is filled from a case description and the
//! retrieved provision blocks.

use legalrag::prompts::legal::{
    fill_legal_analysis_prompt, ANALYSIS_SECTIONS, LEGAL_ANALYSIS_USER_PROMPT,
};

/// Both placeholders are replaced and no placeholder text survives.
#[test]
fn test_fill_replaces_both_placeholders() {
    let prompt = fill_legal_analysis_prompt(
        LEGAL_ANALYSIS_USER_PROMPT,
        "A tenant dispute.",
        "Transfer of Property Act, 1882: Governs transfer.",
    );
    assert!(prompt.contains("**Case Details:**\nA tenant dispute."));
    assert!(prompt.contains(
        "**Relevant Legal Provisions:**\nTransfer of Property Act, 1882: Governs transfer."
    ));
    assert!(!prompt.contains("{case_description}"));
    assert!(!prompt.contains("{legal_provisions}"));
}

/// The case text comes before the provisions, which come before the instructions.
#[test]
fn test_fill_keeps_template_order() {
    let prompt = fill_legal_analysis_prompt(LEGAL_ANALYSIS_USER_PROMPT, "CASE", "PROVISIONS");
    let case_at = prompt.find("CASE").unwrap();
    let provisions_at = prompt.find("PROVISIONS").unwrap();
    let instructions_at = prompt.find("Please provide your analysis").unwrap();
    assert!(case_at < provisions_at);
    assert!(provisions_at < instructions_at);
}

/// The prompt asks for the four sections in order.
#[test]
fn test_template_requests_four_sections_in_order() {
    let positions: Vec<usize> = ANALYSIS_SECTIONS
        .iter()
        .map(|section| {
            LEGAL_ANALYSIS_USER_PROMPT
                .find(&format!("**{section}**"))
                .unwrap_or_else(|| panic!("section '{section}' missing"))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

/// User text containing placeholder syntax is inserted literally.
#[test]
fn test_case_text_with_placeholder_is_not_expanded() {
    let prompt = fill_legal_analysis_prompt(
        "{case_description} | {legal_provisions}",
        "I typed {legal_provisions} by mistake",
        "LAW",
    );
    assert_eq!(prompt, "I typed {legal_provisions} by mistake | LAW");
}

/// Non-ASCII case text survives untouched.
#[test]
fn test_unicode_case_text_is_kept() {
    let case = "मेरे मकान मालिक ने जमा राशि वापस नहीं की।";
    let prompt = fill_legal_analysis_prompt(LEGAL_ANALYSIS_USER_PROMPT, case, "LAW");
    assert!(prompt.contains(case));
}
