use crate::Pipeline;
use crate::annotation::{Annotation, Span};
use crate::error::PipelineError;
use lazy_static::lazy_static;
use regex::Regex;
use std::hint::black_box;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE_TOKEN: Regex =
        Regex::new(r"[\p{Alphabetic}\p{N}]+(?:['’-][\p{Alphabetic}\p{N}]+)*|\S").unwrap();
}

/// NFC-normalizes the text, then tokenizes it with a compiled regex.
///
/// Token offsets refer to the normalized text.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexPipeline;

impl RegexPipeline {
    pub const NAME: &'static str = "regex";

    pub fn new() -> Self {
        Self
    }

    pub fn annotate(&self, text: &str) -> Annotation {
        let normalized: String = text.nfc().collect();
        let spans: Vec<Span> = RE_TOKEN
            .find_iter(&normalized)
            .map(|m| Span { range: m.range() })
            .collect();
        Annotation::from_spans(&normalized, &spans)
    }
}

impl Pipeline for RegexPipeline {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, text: &str) -> Result<(), PipelineError> {
        black_box(self.annotate(text));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes_words_and_punctuation() {
        let annotation = RegexPipeline::new().annotate("Don't stop-gap, Paris!");

        assert_eq!(
            annotation.token_texts(),
            vec!["Don't", "stop-gap", ",", "Paris", "!"]
        );
        assert_eq!(annotation.entities[0].text, "Paris");
    }

    #[test]
    fn test_normalizes_combining_marks() {
        let annotation = RegexPipeline::new().annotate("cafe\u{301} noir");

        assert_eq!(annotation.token_texts(), vec!["café", "noir"]);
    }
}
