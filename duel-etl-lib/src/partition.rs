/// Split `items` into exactly `n` contiguous chunks whose sizes differ by at
/// most one. The first `len % n` chunks carry the extra item, and
/// concatenating the chunks in order reproduces the input.
///
/// Returns no chunks when `n` is zero. Chunks may be empty when there are
/// fewer items than chunks.
pub fn chunkify<T: Clone>(items: &[T], n: usize) -> Vec<Vec<T>> {
    if n == 0 {
        return Vec::new();
    }
    let (k, m) = (items.len() / n, items.len() % n);
    (0..n)
        .map(|i| {
            let start = i * k + i.min(m);
            let end = (i + 1) * k + (i + 1).min(m);
            items[start..end].to_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remainder_goes_to_leading_chunks() {
        let items: Vec<u32> = (0..10).collect();
        let chunks = chunkify(&items, 3);
        assert_eq!(chunks, vec![vec![0, 1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    }

    #[test]
    fn more_chunks_than_items() {
        let chunks = chunkify(&["a", "b"], 4);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0], vec!["a"]);
        assert_eq!(chunks[1], vec!["b"]);
        assert!(chunks[2].is_empty());
        assert!(chunks[3].is_empty());
    }

    #[test]
    fn zero_chunks() {
        assert!(chunkify(&[1, 2, 3], 0).is_empty());
    }

    #[test]
    fn balanced_and_lossless_for_many_shapes() {
        for len in 0..40usize {
            let items: Vec<usize> = (0..len).collect();
            for n in 1..12usize {
                let chunks = chunkify(&items, n);
                assert_eq!(chunks.len(), n);

                let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
                let max = sizes.iter().max().copied().unwrap_or(0);
                let min = sizes.iter().min().copied().unwrap_or(0);
                assert!(max - min <= 1, "len={len} n={n} sizes={sizes:?}");

                // Larger chunks come first.
                assert!(sizes.windows(2).all(|w| w[0] >= w[1]));

                let flat: Vec<usize> = chunks.into_iter().flatten().collect();
                assert_eq!(flat, items);
            }
        }
    }
}
