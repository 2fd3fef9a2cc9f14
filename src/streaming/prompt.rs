//! Prompt templates for the chat backend

/// Default template: English to Chinese with phonetics, examples and usage,
/// Chinese to English plainly, anything else to Chinese
pub const DEFAULT_PROMPT: &str = "你是一个智能的翻译，如果下面引号内部的内容是英文，那么将下面的英文翻译成中文, 输出中文，并给出音标，英文例句和常用用法; 如果是中文，那么将内容翻译成英文, 不需要音标例句等内容；其他语种，直接翻译成中文即可，也不需要音标例句。要求尽可能详细: \"%s\"";

/// Placeholder replaced by the query
pub const PLACEHOLDER: &str = "%s";

/// Substitute `query` into `template`
///
/// Only the first placeholder is replaced. A template without one gets the
/// query appended in quotes.
pub fn build_prompt(template: &str, query: &str) -> String {
    if template.contains(PLACEHOLDER) {
        template.replacen(PLACEHOLDER, query, 1)
    } else {
        format!("{} \"{}\"", template, query)
    }
}
