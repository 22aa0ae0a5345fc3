use std::fmt::Display;

/// The tallest an AVL tree holding `len` keys can be:
/// `⌈1.4405·log₂(len + 2) − 0.3277⌉`. See [the Wikipedia page][wiki] for the derivation.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Properties
pub fn max_height(len: usize) -> usize {
    let bound = 1.4405 * ((len + 2) as f64).log2() - 0.3277;
    bound.ceil() as usize
}

/// Joins keys with single spaces, the format used for key sequences in interpreter output.
pub(crate) fn join_keys<'a, K, I>(keys: I) -> String
where
    K: Display + 'a,
    I: IntoIterator<Item = &'a K>,
{
    keys.into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_bounds() {
        assert_eq!(max_height(0), 2);
        assert_eq!(max_height(1), 2);
        assert_eq!(max_height(7), 5);
        assert!(max_height(1_000_000) <= 29);
    }

    #[test]
    fn joins_with_spaces() {
        assert_eq!(join_keys(&[1, 2, 3]), "1 2 3");
        assert_eq!(join_keys::<i32, _>(&[]), "");
    }
}
