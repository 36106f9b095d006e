/// Rounds to the nearest integer, with halves going up.
///
/// `round_half_up(2.5) == 3`, `round_half_up(2.4) == 2`. The backpressure
/// formula can pass a negative product once the queue overshoots its soft
/// limit; negatives round toward zero here and the caller clamps to one.
pub fn round_half_up(value: f64) -> i64 {
    let fract = value.fract();
    let trunc = value.trunc() as i64;

    if fract >= 0.5 {
        trunc + 1
    } else {
        trunc
    }
}
