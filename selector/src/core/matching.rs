//! Minimum-cost perfect matching
//!
//! Hungarian algorithm with row/column potentials, O(n³). Used by the
//! optimal strategy for pools too large to enumerate: the tally matrix is the
//! cost matrix, and self-pairs are priced out of reach.

use super::tally::TallyMatrix;

const INFINITY: i64 = i64::MAX / 4;

/// Solve the square assignment problem for `costs`
///
/// Returns `assignment` with `assignment[row] = column`, minimizing the
/// summed cost. Rows are inserted in order; for equal-cost optima the result
/// is whichever the potentials method settles on first, which is fixed for a
/// given matrix.
pub fn min_cost_assignment(costs: &[Vec<i64>]) -> Vec<usize> {
    let n = costs.len();
    if n == 0 {
        return Vec::new();
    }

    // 1-based potentials; column 0 is the virtual start column
    let mut row_potential = vec![0i64; n + 1];
    let mut col_potential = vec![0i64; n + 1];
    let mut matched_row = vec![0usize; n + 1];
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        matched_row[0] = row;
        let mut col0 = 0usize;
        let mut min_slack = vec![INFINITY; n + 1];
        let mut used = vec![false; n + 1];

        loop {
            used[col0] = true;
            let row0 = matched_row[col0];
            let mut delta = INFINITY;
            let mut col1 = 0usize;

            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let slack = costs[row0 - 1][col - 1] - row_potential[row0] - col_potential[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = col0;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    col1 = col;
                }
            }

            for col in 0..=n {
                if used[col] {
                    row_potential[matched_row[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }

            col0 = col1;
            if matched_row[col0] == 0 {
                break;
            }
        }

        // Augment along the alternating path
        loop {
            let col1 = way[col0];
            matched_row[col0] = matched_row[col1];
            col0 = col1;
            if col0 == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; n];
    for col in 1..=n {
        if matched_row[col] != 0 {
            assignment[matched_row[col] - 1] = col - 1;
        }
    }
    assignment
}

/// Minimum-score derangement of the tally matrix
///
/// Self-pairs cost one more than every off-diagonal cell combined, so any
/// matching that uses the diagonal is worse than every derangement. Requires
/// at least two rows for a derangement to exist.
pub fn min_cost_derangement(matrix: &TallyMatrix) -> Vec<usize> {
    let forbidden = i64::try_from(matrix.off_diagonal_total())
        .unwrap_or(INFINITY / 2)
        .saturating_add(1)
        .min(INFINITY / 2);

    let costs: Vec<Vec<i64>> = matrix
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(|(j, &count)| if i == j { forbidden } else { i64::from(count) })
                .collect()
        })
        .collect();

    min_cost_assignment(&costs)
}
