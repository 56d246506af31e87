//! Text formatting shared by the score and result displays.

use tracing::instrument;

/// Fixed width of every score display.
pub const SCORE_WIDTH: usize = 6;

/// Left-pads `text` with `'0'` up to `width` characters.
///
/// Text already at or beyond `width` is returned unchanged, never truncated.
#[instrument]
pub fn pad_zeros(text: &str, width: usize) -> String {
    format!("{:0>width$}", text, width = width)
}

/// Renders a score as zero-padded decimal text of [`SCORE_WIDTH`] characters.
#[instrument]
pub fn filled_zero_text(score: u64) -> String {
    pad_zeros(&score.to_string(), SCORE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_score() {
        assert_eq!(filled_zero_text(7), "000007");
        assert_eq!(filled_zero_text(0), "000000");
    }

    #[test]
    fn test_long_score_is_not_truncated() {
        assert_eq!(filled_zero_text(1_234_567), "1234567");
        assert_eq!(filled_zero_text(999_999), "999999");
    }

    #[test]
    fn test_padding_is_idempotent() {
        let once = pad_zeros("42", SCORE_WIDTH);
        assert_eq!(pad_zeros(&once, SCORE_WIDTH), once);
    }
}
