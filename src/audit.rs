//! Audit record of an encoded sentence.
//!
//! Describes how a sentence was turned into a bit-stream: the per-character
//! integer and binary ASCII codes plus the final stream. The record is a
//! pure projection of the sentence and its encoding - it knows nothing
//! about which carrier the stream went into.

use serde::Serialize;

use crate::bitstream::{Encoding, SkippedChar};

/// Structured description of a sentence's encoding.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    /// The original sentence.
    pub sentence: String,
    /// 7-bit ASCII code of each encoded character, in order.
    pub integer_codes: Vec<u8>,
    /// 7-character binary representation of each encoded character.
    pub binary_codes: Vec<String>,
    /// The full bit-stream as a string of `0`/`1`.
    pub bitstream: String,
    /// Characters that were outside the 7-bit range and contributed no bits.
    pub skipped: Vec<SkippedChar>,
}

impl AuditRecord {
    /// Builds the record for a sentence and its encoding.
    pub fn build(sentence: &str, encoding: &Encoding) -> AuditRecord {
        let mut integer_codes = Vec::new();
        let mut binary_codes = Vec::new();

        for ch in sentence.chars() {
            if (ch as u32) < 128 {
                let code = (ch as u8) & 0x7F;
                integer_codes.push(code);
                binary_codes.push(format!("{:07b}", code));
            }
        }

        AuditRecord {
            sentence: sentence.to_string(),
            integer_codes,
            binary_codes,
            bitstream: encoding.bits.to_string(),
            skipped: encoding.skipped.clone(),
        }
    }

    /// Renders the record as a plain-text report.
    pub fn render_text(&self) -> String {
        let integers: Vec<String> = self.integer_codes.iter().map(|c| c.to_string()).collect();

        let mut report = String::new();
        report.push_str(&format!("Sentence: {}\n", self.sentence));
        report.push_str(&format!("Integer ASCII codes: {}\n", integers.join(", ")));
        report.push_str(&format!(
            "Binary ASCII codes: {}\n",
            self.binary_codes.join(" ")
        ));
        report.push_str(&format!("Binary Stream: {}\n", self.bitstream));

        if !self.skipped.is_empty() {
            let skipped: Vec<String> = self
                .skipped
                .iter()
                .map(|s| format!("'{}' (index {})", s.ch, s.index))
                .collect();
            report.push_str(&format!("Skipped characters: {}\n", skipped.join(", ")));
        }

        report
    }

    /// Renders the record as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitstream;

    #[test]
    fn test_build_projects_sentence_and_stream() {
        let encoding = bitstream::encode("Hi");
        let record = AuditRecord::build("Hi", &encoding);

        assert_eq!(record.sentence, "Hi");
        assert_eq!(record.integer_codes, vec![72, 105]);
        assert_eq!(record.binary_codes, vec!["1001000", "1101001"]);
        assert_eq!(record.bitstream, "10010001101001");
        assert!(record.skipped.is_empty());
    }

    #[test]
    fn test_skipped_characters_reported() {
        let sentence = "a\u{e9}b";
        let encoding = bitstream::encode(sentence);
        let record = AuditRecord::build(sentence, &encoding);

        // Only the in-range characters appear in the code columns...
        assert_eq!(record.integer_codes, vec![97, 98]);
        // ...and the rejection is carried as a diagnostic.
        assert_eq!(record.skipped.len(), 1);
        assert_eq!(record.skipped[0].ch, '\u{e9}');

        let report = record.render_text();
        assert!(report.contains("Skipped characters: '\u{e9}' (index 1)"));
    }

    #[test]
    fn test_render_text_layout() {
        let encoding = bitstream::encode("Hi");
        let report = AuditRecord::build("Hi", &encoding).render_text();

        assert!(report.contains("Sentence: Hi\n"));
        assert!(report.contains("Integer ASCII codes: 72, 105\n"));
        assert!(report.contains("Binary ASCII codes: 1001000 1101001\n"));
        assert!(report.contains("Binary Stream: 10010001101001\n"));
    }

    #[test]
    fn test_json_rendering() {
        let encoding = bitstream::encode("Hi");
        let json = AuditRecord::build("Hi", &encoding).to_json().unwrap();

        assert!(json.contains("\"sentence\": \"Hi\""));
        assert!(json.contains("\"bitstream\": \"10010001101001\""));
    }
}
