pub const PATTERN_DETECTION_PROMPT: &str = r#"You are a cybersecurity expert analyzing penetration testing logs.

TASK: Determine if this specific security pattern/indicator is present in the log.

PATTERN TO DETECT: {pattern}
CONTEXT: {context}

ANALYSIS REQUIREMENTS:
1. Search for direct evidence of the pattern in the log
2. Look for related indicators that confirm the pattern
3. Consider the context and attack progression

RESPONSE FORMAT (be precise):
DETECTED: [YES/NO]
REASONING: [Brief explanation of why the pattern was/wasn't detected]

Be conservative - only respond YES if you have clear evidence.

Below is the complete log content for analysis:

LOG CONTENT:
{log_content}
"#;

pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt asking whether `pattern` is evidenced by `log_content`
    ///
    /// Placeholders are filled in one pass over the template, so braces inside
    /// any of the values are copied through verbatim.
    pub fn build_pattern_prompt(pattern: &str, context: &str, log_content: &str) -> String {
        render(
            PATTERN_DETECTION_PROMPT,
            &[
                ("{pattern}", pattern),
                ("{context}", context),
                ("{log_content}", log_content),
            ],
        )
    }
}

fn render(template: &str, values: &[(&str, &str)]) -> String {
    let capacity = template.len() + values.iter().map(|(_, value)| value.len()).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
