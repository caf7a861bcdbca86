//! Join-code passphrase generation.
//!
//! A join code is 4 tokens concatenated with no separator. When the host can
//! supply a live word source (in-game item names, a word list), each token
//! is a random lowercase alphabetic word piece; otherwise each token is 5
//! characters from a restricted alphabet chosen to avoid ambiguous glyphs.
//! Either way the result passes join-code validation unchanged.

use rand::Rng;

/// Tokens per passphrase.
pub const TOKEN_COUNT: usize = 4;

/// Characters per fallback token.
pub const FALLBACK_TOKEN_LEN: usize = 5;

/// Restricted fallback alphabet — lowercase consonants and vowels minus the
/// easily-confused `e`, `i`, `o`, `u`.
pub const FALLBACK_ALPHABET: &str = "abcdfghjklmnpqrstvwxyz";

/// Draw budget per token in word-source mode. Exhausting it abandons the
/// word source for this passphrase and falls back, guaranteeing termination
/// on pathological sources.
const MAX_DRAWS_PER_TOKEN: usize = 512;

// ---------------------------------------------------------------------------
// Word source contract (host implements)
// ---------------------------------------------------------------------------

/// A live source of candidate words, indexed densely from `0..len()`.
///
/// The host adapts whatever it has — an item-name table, a dictionary file.
/// Entries may be multi-word, empty, or junk; the generator filters and
/// re-draws, so the source does not need to pre-clean anything.
pub trait WordSource {
    fn len(&self) -> usize;

    /// The entry at `index`, if the source can resolve it.
    fn word(&self, index: usize) -> Option<String>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate a join-code passphrase.
///
/// Prefers `source` when one is available and usable; falls back to the
/// restricted alphabet otherwise (including when the source keeps producing
/// unusable candidates). Deterministic in structure, random in content.
pub fn generate_passphrase<R: Rng>(source: Option<&dyn WordSource>, rng: &mut R) -> String {
    if let Some(source) = source {
        if !source.is_empty() {
            if let Some(code) = generate_from_words(source, rng) {
                log::debug!("Generated group passphrase from word source");
                return code;
            }
            log::debug!("Word source exhausted the draw budget, using fallback alphabet");
        }
    }
    generate_fallback(rng)
}

fn generate_from_words<R: Rng>(source: &dyn WordSource, rng: &mut R) -> Option<String> {
    let mut code = String::new();
    for _ in 0..TOKEN_COUNT {
        code.push_str(&draw_token(source, rng)?);
    }
    Some(code)
}

/// Draw one usable token: a whitespace-split piece of a random entry that is
/// all-alphabetic and longer than 2 characters, lowercased. Bounded retries.
fn draw_token<R: Rng>(source: &dyn WordSource, rng: &mut R) -> Option<String> {
    for _ in 0..MAX_DRAWS_PER_TOKEN {
        let name = match source.word(rng.gen_range(0..source.len())) {
            Some(name) => name,
            None => continue,
        };
        if name.is_empty() || name == "null" {
            continue;
        }

        let pieces: Vec<&str> = name.split_whitespace().collect();
        if pieces.is_empty() {
            continue;
        }
        let piece = pieces[rng.gen_range(0..pieces.len())];
        if piece.len() <= 2 || !piece.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }

        return Some(piece.to_ascii_lowercase());
    }
    None
}

fn generate_fallback<R: Rng>(rng: &mut R) -> String {
    let alphabet: Vec<char> = FALLBACK_ALPHABET.chars().collect();
    let mut code = String::with_capacity(TOKEN_COUNT * FALLBACK_TOKEN_LEN);
    for _ in 0..TOKEN_COUNT * FALLBACK_TOKEN_LEN {
        code.push(alphabet[rng.gen_range(0..alphabet.len())]);
    }
    code
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
