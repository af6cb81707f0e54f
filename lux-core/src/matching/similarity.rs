//! Gestalt (Ratcliff/Obershelp) similarity between normalized questions
//!
//! The longest common block of characters is matched first, then the pieces
//! left and right of it, recursively. Scores are the same as Python difflib's
//! `SequenceMatcher(None, a, b).ratio()`, including its automatic junk
//! heuristic for long inputs, so they are not symmetric in general.

use std::cmp::Ordering;
use std::collections::HashMap;

/// From this length on, characters of `b` that are too frequent stop
/// anchoring matching blocks
const AUTOJUNK_MIN_LEN: usize = 200;

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character of `b`, popular characters removed
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges,
    /// earliest in `a` then in `b` on ties
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|prev| j2len.get(&prev)).copied().unwrap_or(0) + 1;
                    next.insert(j, k);
                    if k > best_k {
                        (best_i, best_j, best_k) = (i + 1 - k, j + 1 - k, k);
                    }
                }
            }
            j2len = next;
        }

        // Grow through characters dropped from the index as popular
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi && best_j + best_k < bhi && self.a[best_i + best_k] == self.b[best_j + best_k] {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }

    /// Total size of all matching blocks
    fn matched(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

fn score(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (2 * matched) as f64 / total as f64
}

/// Similarity ratio `2 * M / T`, where `M` counts the characters in matching
/// blocks and `T` is the combined length. `b` is the indexed side.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    score(BlockMatcher::new(&a, &b).matched(), a.len() + b.len())
}

/// Upper bound on [`ratio`] from the lengths alone
fn length_bound(a_len: usize, b_len: usize) -> f64 {
    score(a_len.min(b_len), a_len + b_len)
}

/// Upper bound on [`ratio`] from shared character counts, order ignored
fn count_bound(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_default() += 1;
    }

    let mut shared = 0;
    let mut a_len = 0;
    for c in a.chars() {
        a_len += 1;
        if let Some(n) = available.get_mut(&c).filter(|n| **n > 0) {
            *n -= 1;
            shared += 1;
        }
    }

    score(shared, a_len + b.chars().count())
}

/// Winning candidate of a [`best_match`] search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub ratio: f64,
}

/// Single best candidate scoring at least `cutoff` against `query`.
///
/// Each candidate is scored as `ratio(candidate, query)`. The highest ratio
/// wins; equal ratios go to the lexicographically greater candidate, and
/// identical candidates to the earliest one.
pub fn best_match<'a, I>(query: &str, candidates: I, cutoff: f64) -> Option<Candidate>
where
    I: IntoIterator<Item = &'a str>,
{
    let query_len = query.chars().count();
    let mut best: Option<(Candidate, &'a str)> = None;

    for (index, candidate) in candidates.into_iter().enumerate() {
        let floor = best.map_or(cutoff, |(b, _)| b.ratio.max(cutoff));
        if length_bound(candidate.chars().count(), query_len) < floor || count_bound(candidate, query) < floor {
            continue;
        }

        let similarity = ratio(candidate, query);
        if similarity < cutoff {
            continue;
        }

        let wins = match best {
            None => true,
            Some((b, text)) => match similarity.partial_cmp(&b.ratio) {
                Some(Ordering::Greater) => true,
                Some(Ordering::Equal) => candidate > text,
                _ => false,
            },
        };
        if wins {
            best = Some((Candidate { index, ratio: similarity }, candidate));
        }
    }

    best.map(|(candidate, _)| candidate)
}
