//! Static bin packing of sub-step counts onto cores
//!
//! Groups the sub-step counts of a scheme into the fewest bins whose sums
//! stay at or below the largest count. One bin becomes one worker thread,
//! so this keeps every worker's load within one `max(counts)` unit of any
//! other's while spawning as few threads as the load allows.

/// Attempt to pack `sorted` (descending) into `k` bins of height at most
/// `maxheight` using first-fit descending. Returns `None` if any element
/// fails to place.
fn try_partition(sorted: &[usize], k: usize, maxheight: usize) -> Option<Vec<Vec<usize>>> {
    let mut bins = vec![Vec::new(); k];
    let mut sums = vec![0usize; k];
    let mut used = vec![false; sorted.len()];

    // fill each bin with as much of the remaining data as fits
    for (bin, sum) in bins.iter_mut().zip(sums.iter_mut()) {
        for (jj, &value) in sorted.iter().enumerate() {
            if !used[jj] && *sum + value <= maxheight {
                used[jj] = true;
                *sum += value;
                bin.push(value);
            }
        }
    }

    if used.iter().all(|&u| u) {
        Some(bins)
    } else {
        None
    }
}

/// Partition `counts` into the minimum number of bins such that no bin
/// sums to more than the largest element.
///
/// The bins hold the count values themselves; ordering within a bin is
/// descending, ordering of the bins is unspecified. The height ceiling
/// `max(counts)` is always feasible since the largest element alone
/// saturates one bin, so the search over increasing bin counts always
/// terminates, at worst with one element per bin.
pub fn partition(counts: &[usize]) -> Vec<Vec<usize>> {
    if counts.is_empty() {
        return Vec::new();
    }

    let mut sorted = counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let maxheight = sorted[0];
    let sum: usize = sorted.iter().sum();

    // fewest bins that could possibly hold the load at this height
    let first = sum.div_ceil(maxheight);

    for k in first..=sorted.len() {
        if let Some(bins) = try_partition(&sorted, k, maxheight) {
            return bins;
        }
    }
    unreachable!("one element per bin always fits under max(counts)")
}
