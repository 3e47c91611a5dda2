use super::lines::CommentTable;

/// Claim the unclaimed comments on `lines`, in ascending line order.
///
/// Each returned comment is marked in `visited` so no later anchor can take
/// it. Lines with no table entry or outside the table are skipped. Callers
/// passing at most two lines must pass them already sorted.
pub fn resolve(lines: &mut [usize], table: &CommentTable<'_>, visited: &mut [bool]) -> Vec<String> {
    if lines.len() > 2 {
        lines.sort_unstable();
    }

    let mut claimed = Vec::with_capacity(lines.len());
    for &line in lines.iter() {
        let Some(text) = table.get(line) else {
            continue;
        };
        let Some(seen) = visited.get_mut(line) else {
            continue;
        };
        if !*seen {
            *seen = true;
            claimed.push(text.to_string());
        }
    }
    claimed
}
