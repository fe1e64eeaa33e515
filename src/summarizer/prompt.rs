use super::types::SummaryStyle;

pub const SYSTEM_PROMPT: &str = "You are a professional text summarizer. Provide accurate, concise, and well-structured summaries.";

pub fn style_instruction(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Brief => {
            "Create a concise, brief summary that captures only the most essential points."
        }
        SummaryStyle::Detailed => {
            "Create a comprehensive summary that covers all important points and key details."
        }
        SummaryStyle::BulletPoints => {
            "Create a summary in bullet point format, highlighting key points clearly.\n- Put each point on its own line starting with \"- \""
        }
    }
}

/// Builds the user turn. `text` is expected to be cleaned already.
pub fn build_prompt(text: &str, style: SummaryStyle, max_words: u32, language: &str) -> String {
    format!(
        r#"You are an expert text summarizer. Your task is to create a high-quality summary of the provided text.

INSTRUCTIONS:
- {instruction}
- Maximum length: approximately {max_words} words
- Output language: {language}
- Maintain the original meaning and context
- Use clear, professional language
- Focus on key facts, main ideas, and important details
- Do not add information not present in the original text

TEXT TO SUMMARIZE:
{text}

SUMMARY:"#,
        instruction = style_instruction(style),
    )
}
