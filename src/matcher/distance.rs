/// Levenshtein edit distance between `a` and `b`, counted in `char`s.
///
/// Insertions, deletions and substitutions each cost 1. The comparison is
/// exact: callers normalize first if case or accents should not matter.
/// Only two rows sized by the shorter string are kept alive, so long names
/// do not blow up memory.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_len = a.chars().count();
    let b_len = b.chars().count();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let (long, short) = if a_len >= b_len { (a, b) } else { (b, a) };
    let short: Vec<char> = short.chars().collect();

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, long_ch) in long.chars().enumerate() {
        curr[0] = i + 1;
        for (j, short_ch) in short.iter().enumerate() {
            let cost = usize::from(long_ch != *short_ch);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
