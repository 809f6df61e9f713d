use crate::occupancy::sampling::ColorSample;

/// Returns true when two samples are the same color.
///
/// Passes outright if every channel is within `max_channel_diff`. Otherwise
/// the per-channel brightness ratios are compared pairwise (red-green,
/// green-blue, blue-red); if no two ratios differ by more than
/// `max_ratio_diff` the samples are the same hue at a different
/// brightness and still count as similar. One is added to both sides of
/// each ratio so a zero channel cannot divide by zero.
pub fn similar_color(a: &ColorSample, b: &ColorSample, max_ratio_diff: f64, max_channel_diff: [u16; 3]) -> bool {
    let (a, b) = (a.channels(), b.channels());

    if (0..3).all(|i| a[i].abs_diff(b[i]) <= max_channel_diff[i]) {
        return true;
    }

    let ratios: [f64; 3] =
        std::array::from_fn(|i| (a[i].max(b[i]) as f64 + 1.0) / (a[i].min(b[i]) as f64 + 1.0));

    (0..3).all(|i| {
        let (x, y) = (ratios[i], ratios[(i + 1) % 3]);
        (x.max(y) / x.min(y) - 1.0).abs() <= max_ratio_diff
    })
}

/// Returns true when the mean channel brightness of two samples differs by
/// at most `max_intensity_diff`.
pub fn similar_intensity(a: &ColorSample, b: &ColorSample, max_intensity_diff: u32) -> bool {
    a.intensity().abs_diff(b.intensity()) / 3 <= max_intensity_diff
}
