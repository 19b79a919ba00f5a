// Palette cycling

/// Repeat `palette` until `length` entries: element `i` is `palette[i % palette.len()]`.
pub fn cycle_palette<T: Clone>(length: usize, palette: &[T]) -> Vec<T> {
    if palette.is_empty() {
        return Vec::new();
    }

    let whole = length / palette.len();
    let remainder = length % palette.len();

    let mut colors = Vec::with_capacity(length);
    for _ in 0..whole {
        colors.extend_from_slice(palette);
    }
    colors.extend_from_slice(&palette[..remainder]);
    colors
}
