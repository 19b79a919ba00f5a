// Minimal `${name}` page templating
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
    #[error("template variable `{0}` has no value")]
    MissingVariable(String),
    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

/// Replace every `${name}` with its value in a single pass; substituted text is not rescanned.
pub fn render_template(template: &str, vars: &HashMap<&str, String>) -> Result<String, TemplateError> {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find("${") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or(TemplateError::Unterminated(offset + start))?;
        let name = after[..end].trim();
        let value = vars
            .get(name)
            .ok_or_else(|| TemplateError::MissingVariable(name.to_string()))?;
        output.push_str(value);

        let consumed = start + 2 + end + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }

    output.push_str(rest);
    Ok(output)
}
