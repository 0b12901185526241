#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharStatus {
    Correct,
    Incorrect,
    Current,
    Pending,
}

/// Number of positions where `input` disagrees with `target`.
///
/// Only the overlapping prefix is compared; characters typed past the end of
/// the target are not counted.
pub fn count_mismatches(input: &[char], target: &[char]) -> usize {
    input
        .iter()
        .zip(target.iter())
        .filter(|(typed, expected)| typed != expected)
        .count()
}
