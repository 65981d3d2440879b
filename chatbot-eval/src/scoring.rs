//! Text normalization and similarity for argument values
//!
//! Argument values are compared fuzzily: both sides are normalized, then a
//! Ratcliff/Obershelp block-matching ratio is computed and checked against a threshold.

use std::collections::{HashMap, HashSet};

use crate::criteria::DEFAULT_SIMILARITY_THRESHOLD;

/// Normalize text for comparison.
///
/// Lower-cases, drops everything that is not an ASCII letter, ASCII digit or
/// whitespace, collapses whitespace runs to a single space and trims.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether two values are similar at the default threshold (0.95)
pub fn is_similar(a: &str, b: &str) -> bool {
    is_similar_with_threshold(a, b, DEFAULT_SIMILARITY_THRESHOLD)
}

/// Whether the normalized forms of `a` and `b` have a similarity ratio of at least `threshold`
pub fn is_similar_with_threshold(a: &str, b: &str, threshold: f64) -> bool {
    similarity_ratio(&normalize(a), &normalize(b)) >= threshold
}

/// Length of `b` from which frequent characters stop seeding matches
pub const POPULAR_MIN_LEN: usize = 200;

/// Ratcliff/Obershelp similarity: `2 * M / T`, where `M` is the number of characters in
/// matching blocks and `T` the combined length. Two empty strings are identical.
///
/// The ratio is not symmetric. When `b` has at least [`POPULAR_MIN_LEN`] characters, any
/// character occurring in `b` more than `len(b) / 100 + 1` times is popular: a block can
/// only be found through non-popular characters, and is then extended over equal
/// neighbours of any kind.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let popular = popular_characters(&b);
    2.0 * matching_characters(&a, &b, &popular) as f64 / total as f64
}

fn popular_characters(b: &[char]) -> HashSet<char> {
    if b.len() < POPULAR_MIN_LEN {
        return HashSet::new();
    }

    let limit = b.len() / 100 + 1;
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in b {
        *counts.entry(*c).or_default() += 1;
    }
    counts.into_iter().filter(|(_, n)| *n > limit).map(|(c, _)| c).collect()
}

/// Total size of the matching blocks between `a` and `b`.
///
/// Takes the longest common block, then recurses on the pieces left and right of it.
fn matching_characters(a: &[char], b: &[char], popular: &HashSet<char>) -> usize {
    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, popular, (a_lo, a_hi), (b_lo, b_hi));
        if size == 0 {
            continue;
        }
        total += size;
        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    total
}

/// Longest common block of `a[a_lo..a_hi]` and `b[b_lo..b_hi]` as `(i, j, size)`.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    popular: &HashSet<char>,
    (a_lo, a_hi): (usize, usize),
    (b_lo, b_hi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // prev[j + 1]: length of the common run ending at a[i - 1] and b[j]
    let mut prev = vec![0usize; b.len() + 1];

    for i in a_lo..a_hi {
        let mut current = vec![0usize; b.len() + 1];
        for j in b_lo..b_hi {
            if a[i] == b[j] && !popular.contains(&b[j]) {
                let run = prev[j] + 1;
                current[j + 1] = run;
                if run > best_size {
                    best_i = i + 1 - run;
                    best_j = j + 1 - run;
                    best_size = run;
                }
            }
        }
        prev = current;
    }

    // Popular characters never seed a block but still extend one
    while best_i > a_lo && best_j > b_lo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < a_hi
        && best_j + best_size < b_hi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    (best_i, best_j, best_size)
}

/// Arithmetic mean, `None` when there are no values
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.into_iter().fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Round to two decimals from the exact binary value, ties to even.
///
/// `0.225` is stored slightly above the tie and rounds up; `0.125` is an exact tie and
/// rounds down.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}
