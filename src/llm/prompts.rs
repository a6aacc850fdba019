// Prompt contract for the shoot-notes extraction call.
//
// The key list below must stay in step with `schema::RESPONSE_KEYS` and the
// normalizers that consume them; bump PROMPT_VERSION whenever either changes.

pub const PROMPT_VERSION: u32 = 1;

pub const NOTES_SEPARATOR: &str = "\n\n--- Shoot Notes ---\n";

pub const SYSTEM_INSTRUCTION: &str = r#"You are generating metadata for an editorial photo shoot based on the shoot notes.
Return ONLY valid JSON (no code fences, no extra text) with exactly these keys:
  slug_words: string (1–3 words naming the subject; no punctuation)
  title: string (short shoot title)
  shortDescription: string (present-tense clause that fits after ": " and before " on {iptcmonthname} {day0}")
  longDescription: string (1–2 sentences expanding context; do NOT include date; do NOT include city/state; do NOT include any {tags}; do NOT include photographer credit; do NOT end with a period)
  keywords: array of strings (6–12 useful keywords for photo ingest/search; include proper nouns if present in notes; avoid generic words like "photo"; do NOT include any {tags})
If details are missing, stay accurate and generic rather than guessing."#;

/// Joins the fixed instruction and the operator's notes into one prompt.
pub fn build_prompt(notes: &str) -> String {
    format!("{}{}{}", SYSTEM_INSTRUCTION, NOTES_SEPARATOR, notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RESPONSE_KEYS;

    #[test]
    fn test_instruction_names_every_response_key() {
        for key in RESPONSE_KEYS {
            assert!(
                SYSTEM_INSTRUCTION.contains(&format!("  {}:", key)),
                "instruction does not describe `{}`",
                key
            );
        }
    }

    #[test]
    fn test_build_prompt_appends_notes() {
        let prompt = build_prompt("Night market in Cairo, vendors selling koshari.");
        assert!(prompt.starts_with(SYSTEM_INSTRUCTION));
        assert!(prompt.ends_with("--- Shoot Notes ---\nNight market in Cairo, vendors selling koshari."));
    }
}
