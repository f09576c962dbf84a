/// Points awarded for clearing `lines` rows with a single lock.
///
/// The score grows with the square of the line count:
/// 1 line → 100, 2 → 400, 3 → 900, 4 → 1600.
#[must_use]
pub const fn line_clear_score(lines: usize) -> usize {
    100 * lines * lines
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: Points earned from line clears ([`line_clear_score`])
/// - **Completed pieces**: Total number of pieces locked
/// - **Line clear distribution**: How many locks cleared 0, 1, 2, 3 or 4+ lines
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.add_cleared_lines(4);
/// stats.record_lock(4);
///
/// assert_eq!(stats.score(), 1600);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl GameStats {
    /// Creates a new game statistics tracker with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of lines cleared.
    ///
    /// Index 4 counts every lock that cleared four or more lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Adds the lines removed by one line clear pass and scores them.
    pub const fn add_cleared_lines(&mut self, lines: usize) {
        self.total_cleared_lines += lines;
        self.score += line_clear_score(lines);
    }

    /// Counts a locked piece that cleared `lines` rows.
    pub fn record_lock(&mut self, lines: usize) {
        self.completed_pieces += 1;
        let last = self.line_cleared_counter.len() - 1;
        self.line_cleared_counter[lines.min(last)] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score_is_quadratic() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 100);
        assert_eq!(line_clear_score(2), 400);
        assert_eq!(line_clear_score(3), 900);
        assert_eq!(line_clear_score(4), 1600);
    }

    #[test]
    fn test_zero_lines_keeps_score() {
        let mut stats = GameStats::new();
        stats.add_cleared_lines(0);
        stats.record_lock(0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_accumulates_across_locks() {
        let mut stats = GameStats::new();
        for lines in [1, 2, 1, 3] {
            stats.add_cleared_lines(lines);
            stats.record_lock(lines);
        }
        assert_eq!(stats.score(), 100 + 400 + 100 + 900);
        assert_eq!(stats.total_cleared_lines(), 7);
        assert_eq!(stats.completed_pieces(), 4);
        assert_eq!(stats.line_cleared_counter(), &[0, 2, 1, 1, 0]);
    }

    #[test]
    fn test_large_clears_share_last_bucket() {
        let mut stats = GameStats::new();
        stats.record_lock(4);
        stats.record_lock(6);
        assert_eq!(stats.line_cleared_counter()[4], 2);
    }
}
