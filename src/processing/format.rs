/*! Word-type formatting

Turns segmented utterances into the format expected by the phonotactic scorer:
one word type per line, with its symbols separated by spaces (`want` -> `w a n t`).
!*/
use std::collections::HashSet;

/// What to do with held-out lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeldOutPolicy {
    /// Held-out lines are discarded.
    #[default]
    Drop,
    /// Held-out lines lose their segmentation and are kept as a single word.
    Unsegmented,
}

impl std::str::FromStr for HeldOutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(Self::Drop),
            "unsegmented" => Ok(Self::Unsegmented),
            other => Err(format!(
                "unknown held-out policy {:?} (expected drop or unsegmented)",
                other
            )),
        }
    }
}

/// Separate each character of `word` by a single space.
#[inline]
pub fn space_chars(word: &str) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for (idx, c) in word.chars().enumerate() {
        if idx > 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Insert `item` if not seen yet, keeping first-occurrence order.
#[inline]
fn push_unique(item: String, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    if !seen.contains(&item) {
        seen.insert(item.clone());
        out.push(item);
    }
}

/// Build the list of distinct formatted words of `corpus`.
///
/// Lines whose index is in `held_out` are handled according to `policy`.
/// Output keeps first-occurrence order and has no duplicates.
pub fn process_corpus<S: AsRef<str>>(
    corpus: &[S],
    held_out: &HashSet<usize>,
    policy: HeldOutPolicy,
) -> Vec<String> {
    let mut processed = Vec::new();
    let mut seen = HashSet::new();

    for (idx, line) in corpus.iter().enumerate() {
        let line = line.as_ref();
        if held_out.contains(&idx) {
            if policy == HeldOutPolicy::Unsegmented {
                let joined: String = line.split_whitespace().collect();
                if !joined.is_empty() {
                    push_unique(space_chars(&joined), &mut seen, &mut processed);
                }
            }
            continue;
        }

        for word in line.split_whitespace() {
            push_unique(space_chars(word), &mut seen, &mut processed);
        }
    }

    processed
}
