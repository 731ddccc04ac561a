/// System instruction for translating one source string
pub fn system_prompt(target_lang_name: &str) -> String {
    format!(
        "You are a professional BIM/IFC translator. \
         Translate the user text into {target_lang_name} with precise technical terminology. \
         Do NOT modify tokens enclosed in double square brackets [[...]] or IFC class names; \
         copy them exactly as-is. Preserve punctuation, capitalization, and placeholders. \
         Reply with the translation only."
    )
}

/// Follow-up request after the model dropped or altered protected tokens
pub fn correction_prompt(missing: &[&str]) -> String {
    format!(
        "Your translation is missing these protected tokens: {}. \
         Reply with the corrected full translation only, containing every one of them \
         exactly as written, including the double square brackets.",
        missing.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_prompt_names_target_language() {
        let prompt = system_prompt("Turkish");
        assert!(prompt.contains("into Turkish"));
        assert!(prompt.contains("[[...]]"));
    }

    #[test]
    fn correction_prompt_lists_tokens() {
        let prompt = correction_prompt(&["[[IfcWall]]", "[[IfcSlab]]"]);
        assert!(prompt.contains("[[IfcWall]], [[IfcSlab]]"));
    }
}
