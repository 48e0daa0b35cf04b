/// Compares two byte slices in constant time.
///
/// Every byte of the longer input is visited regardless of where the inputs
/// first differ; a length mismatch is folded into the result instead of
/// returning early.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len = a.len().max(b.len());
    let mut diff = (a.len() ^ b.len()) as u64;

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        diff |= u64::from(x ^ y);
    }

    // 1 when diff == 0, 0 otherwise, without branching on diff
    let eq = ((diff | diff.wrapping_neg()) >> 63) ^ 1;
    std::hint::black_box(eq) == 1
}
