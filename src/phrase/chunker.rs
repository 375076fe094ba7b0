//! Noun chunk detection
//!
//! Identifies noun-phrase-like chunks with a fixed tag grammar. Rules are
//! applied in order, each scanning the sentence left to right; a rule only
//! sees tokens that no earlier match has claimed.
//!
//! ```text
//! CHUNK: {<NN>+<IN|DT>*<NN>+}
//!        {<NN>+<IN|DT>*<NNP>+}
//!        {<NNP>+<NNS>*}
//! ```

use crate::types::{ChunkSpan, PosTag, Token};

/// How often an element of a rule may repeat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Exactly once
    One,
    /// `+`
    OneOrMore,
    /// `*`
    ZeroOrMore,
}

/// One tag class of a rule, e.g. `<IN|DT>*`
#[derive(Debug, Clone, Copy)]
pub struct TagPattern {
    pub tags: &'static [PosTag],
    pub repeat: Repeat,
}

impl TagPattern {
    const fn new(tags: &'static [PosTag], repeat: Repeat) -> Self {
        Self { tags, repeat }
    }

    fn accepts(&self, tag: PosTag) -> bool {
        self.tags.contains(&tag)
    }
}

/// A sequence of tag patterns matched greedily with backtracking
#[derive(Debug, Clone, Copy)]
pub struct ChunkRule {
    pub name: &'static str,
    pub patterns: &'static [TagPattern],
}

const NN: &[PosTag] = &[PosTag::Noun];
const NNS: &[PosTag] = &[PosTag::PluralNoun];
const NNP: &[PosTag] = &[PosTag::ProperNoun];
const IN_DT: &[PosTag] = &[PosTag::Preposition, PosTag::Determiner];

/// The chunk grammar used for question subjects
pub const DEFAULT_GRAMMAR: [ChunkRule; 3] = [
    ChunkRule {
        name: "noun-noun",
        patterns: &[
            TagPattern::new(NN, Repeat::OneOrMore),
            TagPattern::new(IN_DT, Repeat::ZeroOrMore),
            TagPattern::new(NN, Repeat::OneOrMore),
        ],
    },
    ChunkRule {
        name: "noun-proper",
        patterns: &[
            TagPattern::new(NN, Repeat::OneOrMore),
            TagPattern::new(IN_DT, Repeat::ZeroOrMore),
            TagPattern::new(NNP, Repeat::OneOrMore),
        ],
    },
    ChunkRule {
        name: "proper-plural",
        patterns: &[
            TagPattern::new(NNP, Repeat::OneOrMore),
            TagPattern::new(NNS, Repeat::ZeroOrMore),
        ],
    },
];

impl ChunkRule {
    /// Match this rule at `start`, never reading at or past `limit`.
    ///
    /// Returns the exclusive end of the longest greedy match.
    pub fn match_at(&self, tags: &[PosTag], start: usize, limit: usize) -> Option<usize> {
        match_patterns(self.patterns, tags, start, limit.min(tags.len()))
    }
}

fn match_patterns(
    patterns: &[TagPattern],
    tags: &[PosTag],
    pos: usize,
    limit: usize,
) -> Option<usize> {
    let Some((first, rest)) = patterns.split_first() else {
        return Some(pos);
    };

    let mut run = 0;
    while pos + run < limit && first.accepts(tags[pos + run]) {
        run += 1;
    }

    let (min, max) = match first.repeat {
        Repeat::One => (1, run.min(1)),
        Repeat::OneOrMore => (1, run),
        Repeat::ZeroOrMore => (0, run),
    };
    if max < min {
        return None;
    }

    // Greedy first, then give tokens back
    (min..=max)
        .rev()
        .find_map(|taken| match_patterns(rest, tags, pos + taken, limit))
}

/// Noun chunk detector
#[derive(Debug, Clone)]
pub struct NounChunker {
    rules: Vec<ChunkRule>,
}

impl Default for NounChunker {
    fn default() -> Self {
        Self::new()
    }
}

impl NounChunker {
    /// Create a new chunker with the default grammar
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_GRAMMAR.to_vec(),
        }
    }

    /// Extract chunks from tokens, never merging across sentences.
    pub fn extract_chunks(&self, tokens: &[Token]) -> Vec<ChunkSpan> {
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < tokens.len() {
            let sentence_idx = tokens[start].sentence_idx;
            let end = tokens[start..]
                .iter()
                .position(|t| t.sentence_idx != sentence_idx)
                .map_or(tokens.len(), |offset| start + offset);

            let tags: Vec<PosTag> = tokens[start..end].iter().map(|t| t.pos).collect();
            for (s, e) in self.chunk_tags(&tags) {
                chunks.push(ChunkSpan {
                    start_token: tokens[start + s].token_idx,
                    end_token: tokens[start + e - 1].token_idx + 1,
                    sentence_idx,
                });
            }

            start = end;
        }

        chunks
    }

    /// Chunk a single tagged sentence, returning `[start, end)` index pairs
    /// in sentence order.
    pub fn chunk_tags(&self, tags: &[PosTag]) -> Vec<(usize, usize)> {
        let mut claimed = vec![false; tags.len()];
        let mut spans = Vec::new();

        for rule in &self.rules {
            let mut i = 0;
            while i < tags.len() {
                if claimed[i] {
                    i += 1;
                    continue;
                }
                let limit = claimed[i..]
                    .iter()
                    .position(|&c| c)
                    .map_or(tags.len(), |offset| i + offset);

                match rule.match_at(tags, i, limit) {
                    Some(end) if end > i => {
                        claimed[i..end].iter_mut().for_each(|c| *c = true);
                        spans.push((i, end));
                        i = end;
                    }
                    _ => i += 1,
                }
            }
        }

        spans.sort_unstable();
        spans
    }
}

/// Join the token texts of a chunk with single spaces
///
/// `tokens` must be the tokens of the chunk's sentence, indexed by
/// `token_idx`.
pub fn chunk_text(tokens: &[Token], chunk: &ChunkSpan) -> String {
    tokens[chunk.start_token..chunk.end_token]
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical chunk key: trimmed, upper-cased chunk text
pub fn chunk_key(tokens: &[Token], chunk: &ChunkSpan) -> String {
    chunk_text(tokens, chunk).trim().to_uppercase()
}
