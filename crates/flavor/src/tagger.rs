//! Word tokenisation and lexical class tagging.
//!
//! Only nouns and adjectives are worth matching against the flavor wheel;
//! the tagger's job is to throw away everything else.

use regex::Regex;
use std::sync::OnceLock;

/// Lexical class of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexicalClass {
    /// Noun
    Noun,
    /// Adjective
    Adjective,
    /// Verb or auxiliary
    Verb,
    /// Adverb
    Adverb,
    /// Pronoun
    Pronoun,
    /// Determiner
    Determiner,
    /// Preposition
    Preposition,
    /// Conjunction
    Conjunction,
    /// Numeral
    Number,
    /// Contractions and anything unclassified
    Other,
}

impl LexicalClass {
    /// Whether words of this class are flavor candidates.
    pub fn is_candidate(&self) -> bool {
        matches!(self, Self::Noun | Self::Adjective)
    }
}

/// A word with its lexical class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    /// Word as written
    pub text: String,
    /// Lexical class
    pub class: LexicalClass,
}

/// Splits text into words and tags them.
pub trait WordTagger: Send + Sync {
    /// Tag every word of `text` in occurrence order. Punctuation and
    /// whitespace are dropped.
    fn tag(&self, text: &str) -> Vec<TaggedWord>;

    /// Nouns and adjectives in occurrence order.
    fn candidate_words(&self, text: &str) -> Vec<String> {
        self.tag(text)
            .into_iter()
            .filter(|w| w.class.is_candidate())
            .map(|w| w.text)
            .collect()
    }
}

/// Rule-based tagger for English tasting notes.
///
/// Closed word classes are recognised from fixed lists; remaining words
/// are treated as adjectives or nouns depending on their suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Create a new tagger.
    pub fn new() -> Self {
        Self
    }

    /// Classify a single word.
    pub fn classify(word: &str) -> LexicalClass {
        let lower = word.to_lowercase();

        if lower.chars().all(|c| c.is_numeric()) {
            return LexicalClass::Number;
        }
        if is_contraction(&lower) {
            return LexicalClass::Other;
        }

        match lower.as_str() {
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "each" | "every"
            | "some" | "any" | "no" | "another" | "such" | "what" | "which" | "whose" | "my"
            | "your" | "his" | "her" | "its" | "our" | "their" | "all" | "both" | "either"
            | "neither" => LexicalClass::Determiner,

            "i" | "me" | "you" | "he" | "him" | "she" | "it" | "we" | "us" | "they" | "them"
            | "myself" | "yourself" | "itself" | "ourselves" | "themselves" | "mine"
            | "yours" | "hers" | "ours" | "theirs" | "who" | "whom" | "something"
            | "nothing" | "anything" | "everything" | "someone" => LexicalClass::Pronoun,

            "of" | "in" | "on" | "at" | "by" | "for" | "with" | "without" | "from" | "to"
            | "into" | "onto" | "over" | "under" | "about" | "after" | "before" | "between"
            | "through" | "during" | "against" | "among" | "around" | "behind" | "beyond"
            | "near" | "like" | "than" | "via" | "per" | "across" | "along" | "toward"
            | "towards" | "upon" | "up" | "down" | "off" | "out" => LexicalClass::Preposition,

            "and" | "or" | "but" | "nor" | "so" | "yet" | "because" | "although" | "though"
            | "while" | "if" | "unless" | "whereas" | "plus" => LexicalClass::Conjunction,

            "is" | "am" | "are" | "was" | "were" | "be" | "been" | "being" | "has" | "have"
            | "had" | "do" | "does" | "did" | "will" | "would" | "shall" | "should" | "can"
            | "could" | "may" | "might" | "must" | "get" | "gets" | "got" | "tastes"
            | "tasted" | "smells" | "smelled" | "feels" | "felt" | "seems" | "seemed"
            | "think" | "thought" | "found" | "find" | "makes" | "made" | "pulled" | "tried"
            | "used" | "using" | "went" | "came" | "comes" | "brewed" | "ground" | "became"
            | "becomes" | "opens" | "opened" | "lingers" | "lingered" => LexicalClass::Verb,

            "very" | "really" | "quite" | "too" | "also" | "just" | "not" | "never"
            | "always" | "rather" | "somewhat" | "slightly" | "super" | "much" | "more"
            | "most" | "less" | "least" | "again" | "still" | "even" | "here" | "there"
            | "then" | "now" | "almost" | "maybe" | "perhaps" => LexicalClass::Adverb,

            "lovely" | "early" | "jelly" | "smelly" | "ugly" | "holy" | "silly" | "woolly"
            | "curly" => LexicalClass::Adjective,

            _ if lower.len() > 4 && lower.ends_with("ly") => LexicalClass::Adverb,
            _ if has_adjective_suffix(&lower) => LexicalClass::Adjective,
            _ => LexicalClass::Noun,
        }
    }
}

impl WordTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Vec<TaggedWord> {
        word_pattern()
            .find_iter(text)
            .map(|m| TaggedWord {
                text: m.as_str().to_string(),
                class: Self::classify(m.as_str()),
            })
            .collect()
    }
}

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    // Letters and digits, keeping inner hyphens and apostrophes ("hay-like", "it's")
    WORD.get_or_init(|| {
        Regex::new(r"[\p{L}\p{N}]+(?:['’-][\p{L}\p{N}]+)*").expect("word pattern is valid")
    })
}

fn is_contraction(lower: &str) -> bool {
    let normalized = lower.replace('’', "'");
    ["n't", "'s", "'re", "'ve", "'ll", "'d", "'m"]
        .iter()
        .any(|suffix| normalized.ends_with(suffix))
}

fn has_adjective_suffix(lower: &str) -> bool {
    const SUFFIXES: &[&str] = &[
        "y", "ish", "ful", "ous", "ic", "al", "ive", "less", "like", "ant", "ent", "ed",
    ];
    lower.len() > 3 && SUFFIXES.iter().any(|s| lower.ends_with(s))
}
