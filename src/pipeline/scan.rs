use crate::Pipeline;
use crate::annotation::{Annotation, Span};
use crate::error::PipelineError;
use std::hint::black_box;

/// Tokenizes with a hand-written character scanner; no regex engine and no
/// normalization.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanPipeline;

impl ScanPipeline {
    pub const NAME: &'static str = "scan";

    pub fn new() -> Self {
        Self
    }

    pub fn annotate(&self, text: &str) -> Annotation {
        Annotation::from_spans(text, &scan_spans(text))
    }
}

impl Pipeline for ScanPipeline {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn run(&self, text: &str) -> Result<(), PipelineError> {
        black_box(self.annotate(text));
        Ok(())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c.is_numeric()
}

fn is_joiner(c: char) -> bool {
    matches!(c, '\'' | '’' | '-')
}

pub(crate) fn scan_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if !is_word_char(c) {
            spans.push(Span {
                range: start..start + c.len_utf8(),
            });
            continue;
        }

        let mut end = start + c.len_utf8();
        loop {
            match chars.peek().copied() {
                Some((i, next)) if is_word_char(next) => {
                    end = i + next.len_utf8();
                    chars.next();
                }
                Some((i, next)) if is_joiner(next) => {
                    // A joiner only counts when a word character follows it.
                    let after = text[i + next.len_utf8()..].chars().next();
                    match after {
                        Some(a) if is_word_char(a) => {
                            chars.next();
                            end = i + next.len_utf8();
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }
        spans.push(Span { range: start..end });
    }

    spans
}
