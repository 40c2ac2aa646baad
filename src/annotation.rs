//! Annotation output shared by the built-in pipelines.
//!
//! Pipelines differ in how they find token boundaries; tagging, sentence
//! segmentation and entity grouping are done here so that both produce the
//! same [`Annotation`] for the same token stream.

use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashSet;
use std::ops::Range;
use stopwords::{Language, NLTK, Stopwords};

const ADVERB_SUFFIXES: &[&str] = &["ly"];
const VERB_SUFFIXES: &[&str] = &["ing", "ed", "ize", "ise"];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ical", "ish", "ic", "al",
];
const SENTENCE_TERMINATORS: &[&str] = &[".", "!", "?"];

lazy_static! {
    static ref STOP_WORDS: HashSet<String> = NLTK::stopwords(Language::English)
        .unwrap_or_default()
        .iter()
        .map(|s| s.to_string())
        .collect();
}

pub fn is_stop_word(lower: &str) -> bool {
    STOP_WORDS.contains(lower)
}

/// Coarse part-of-speech tag assigned from surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tag {
    Number,
    Punct,
    Function,
    Adverb,
    Verb,
    Adjective,
    ProperNoun,
    Noun,
}

/// A token boundary found by a pipeline's tokenizer, as a byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub text: String,
    pub lower: String,
    pub tag: Tag,
    pub is_stop: bool,
    pub start: usize,
    pub end: usize,
}

/// A run of adjacent proper nouns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotation {
    /// Byte ranges of each sentence in the processed text.
    pub sentences: Vec<(usize, usize)>,
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Annotation {
    /// Tags, segments and groups entities over pre-computed token spans.
    pub fn from_spans(text: &str, spans: &[Span]) -> Self {
        let mut tokens = Vec::with_capacity(spans.len());
        let mut sentences = Vec::new();
        let mut sentence_start: Option<usize> = None;

        for (i, span) in spans.iter().enumerate() {
            let surface = &text[span.range.clone()];
            let sentence_initial = sentence_start.is_none();
            if sentence_initial {
                sentence_start = Some(span.range.start);
            }

            let lower = surface.to_lowercase();
            let is_stop = is_stop_word(&lower);
            let tag = tag_token(surface, &lower, is_stop, sentence_initial);
            tokens.push(Token {
                text: surface.to_string(),
                lower,
                tag,
                is_stop,
                start: span.range.start,
                end: span.range.end,
            });

            // A run of terminators ("...", "?!") closes the sentence once, at its end.
            let next_is_terminator = spans
                .get(i + 1)
                .is_some_and(|next| SENTENCE_TERMINATORS.contains(&&text[next.range.clone()]));
            if SENTENCE_TERMINATORS.contains(&surface) && !next_is_terminator {
                if let Some(start) = sentence_start.take() {
                    sentences.push((start, span.range.end));
                }
            }
        }
        if let (Some(start), Some(last)) = (sentence_start, spans.last()) {
            sentences.push((start, last.range.end));
        }

        let entities = group_entities(text, &tokens);
        Self {
            sentences,
            tokens,
            entities,
        }
    }

    pub fn token_texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}

pub fn tag_token(surface: &str, lower: &str, is_stop: bool, sentence_initial: bool) -> Tag {
    let mut chars = surface.chars();
    let Some(first) = chars.next() else {
        return Tag::Punct;
    };

    if surface.chars().all(|c| c.is_numeric() || c == '.' || c == ',') && first.is_numeric() {
        return Tag::Number;
    }
    if !surface.chars().any(char::is_alphanumeric) {
        return Tag::Punct;
    }
    if is_stop {
        return Tag::Function;
    }
    if first.is_uppercase() && !sentence_initial {
        return Tag::ProperNoun;
    }
    if has_suffix(lower, ADVERB_SUFFIXES) {
        Tag::Adverb
    } else if has_suffix(lower, VERB_SUFFIXES) {
        Tag::Verb
    } else if has_suffix(lower, ADJECTIVE_SUFFIXES) {
        Tag::Adjective
    } else {
        Tag::Noun
    }
}

// Suffix must leave a stem of at least three characters.
fn has_suffix(lower: &str, suffixes: &[&str]) -> bool {
    suffixes
        .iter()
        .any(|s| lower.len() >= s.len() + 3 && lower.ends_with(s))
}

fn group_entities(text: &str, tokens: &[Token]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for token in tokens {
        if token.tag == Tag::ProperNoun {
            current = match current {
                Some((start, _)) => Some((start, token.end)),
                None => Some((token.start, token.end)),
            };
        } else if let Some((start, end)) = current.take() {
            entities.push(Entity {
                text: text[start..end].to_string(),
                start,
                end,
            });
        }
    }
    if let Some((start, end)) = current {
        entities.push(Entity {
            text: text[start..end].to_string(),
            start,
            end,
        });
    }
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(ranges: &[(usize, usize)]) -> Vec<Span> {
        ranges
            .iter()
            .map(|&(s, e)| Span { range: s..e })
            .collect()
    }

    #[test]
    fn test_tagging_rules() {
        assert_eq!(tag_token("42", "42", false, false), Tag::Number);
        assert_eq!(tag_token(",", ",", false, false), Tag::Punct);
        assert_eq!(tag_token("the", "the", true, false), Tag::Function);
        assert_eq!(tag_token("quickly", "quickly", false, false), Tag::Adverb);
        assert_eq!(tag_token("walking", "walking", false, false), Tag::Verb);
        assert_eq!(tag_token("famous", "famous", false, false), Tag::Adjective);
        assert_eq!(tag_token("London", "london", false, false), Tag::ProperNoun);
        assert_eq!(tag_token("London", "london", false, true), Tag::Noun);
        assert_eq!(tag_token("fly", "fly", false, false), Tag::Noun);
    }

    #[test]
    fn test_sentences_and_entities() {
        let text = "We met Ada Lovelace. Then left";
        let annotation = Annotation::from_spans(
            text,
            &spans(&[(0, 2), (3, 6), (7, 10), (11, 19), (19, 20), (21, 25), (26, 30)]),
        );

        assert_eq!(annotation.sentences, vec![(0, 20), (21, 30)]);
        assert_eq!(annotation.entities.len(), 1);
        assert_eq!(annotation.entities[0].text, "Ada Lovelace");
        assert!(annotation.tokens[0].is_stop);
    }

    #[test]
    fn test_ellipsis_closes_one_sentence() {
        let text = "Wait... what?!";
        let annotation = Annotation::from_spans(
            text,
            &spans(&[(0, 4), (4, 5), (5, 6), (6, 7), (8, 12), (12, 13), (13, 14)]),
        );

        assert_eq!(annotation.sentences, vec![(0, 7), (8, 14)]);
    }

    #[test]
    fn test_empty_text() {
        let annotation = Annotation::from_spans("", &[]);
        assert_eq!(annotation, Annotation::default());
    }
}
