/// Mean of the present dimension scores, rounded to one decimal.
///
/// Non-finite values are skipped and ties round to even. Returns exactly
/// `0.0` when nothing is present.
pub fn overall_score<I>(scores: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = scores
        .into_iter()
        .filter(|s| s.is_finite())
        .fold((0.0, 0usize), |(sum, n), s| (sum + s, n + 1));
    if n == 0 {
        return 0.0;
    }
    round1(sum / n as f64)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round_ties_even() / 10.0
}
