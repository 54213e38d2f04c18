//! Random draws without replacement used by the selector.
//!
//! All helpers take the RNG explicitly so a run is reproducible from its seed.
use rand::RngCore;

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01<R: RngCore + ?Sized>(rng: &mut R) -> f64 {
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Uniform index in `0..n`. `n` must be > 0.
#[inline]
pub fn index_below<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> usize {
    debug_assert!(n > 0, "n must be > 0");
    let i = (rand01(rng) * n as f64) as usize;
    i.min(n - 1)
}

/// Draw `k` distinct indices from `0..n` uniformly (partial Fisher-Yates).
///
/// Returns all of `0..n` in shuffled order when `k >= n`.
pub fn draw_uniform<R: RngCore + ?Sized>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let k = k.min(n);
    let mut pool: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = i + index_below(rng, n - i);
        pool.swap(i, j);
    }
    pool.truncate(k);
    pool
}

/// Draw `k` distinct indices with probability proportional to `weights`.
///
/// Negative and NaN weights count as zero. If every weight is equal, or no weight is
/// positive, this is exactly [`draw_uniform`] and consumes the RNG the same way.
/// Infinite weights outrank every finite one: they are drawn first, uniformly among
/// themselves. Zero-weight indices are only drawn once every positive weight is used.
pub fn draw_weighted<R: RngCore + ?Sized>(weights: &[f64], k: usize, rng: &mut R) -> Vec<usize> {
    let n = weights.len();
    let mut weights: Vec<f64> = weights.iter().map(|&w| sanitize(w)).collect();
    let uniform = weights.windows(2).all(|w| w[0] == w[1]);
    if uniform {
        return draw_uniform(n, k, rng);
    }

    let k = k.min(n);
    let infinite: Vec<usize> = (0..n).filter(|&i| weights[i].is_infinite()).collect();
    if !infinite.is_empty() {
        let mut out: Vec<usize> = draw_uniform(infinite.len(), k, rng)
            .into_iter()
            .map(|i| infinite[i])
            .collect();
        if out.len() < k {
            let finite: Vec<usize> = (0..n).filter(|&i| weights[i].is_finite()).collect();
            let finite_weights: Vec<f64> = finite.iter().map(|&i| weights[i]).collect();
            out.extend(
                draw_weighted(&finite_weights, k - out.len(), rng)
                    .into_iter()
                    .map(|i| finite[i]),
            );
        }
        return out;
    }

    // Scale by the largest weight so the running totals cannot overflow.
    let max = weights.iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return draw_uniform(n, k, rng);
    }
    for w in &mut weights {
        *w /= max;
    }

    let mut remaining: Vec<usize> = (0..n).collect();
    let mut out = Vec::with_capacity(k);
    for _ in 0..k {
        let pos = pick_position(&remaining, &weights, rng);
        out.push(remaining.swap_remove(pos));
    }
    out
}

/// Roulette pick over the remaining indices; falls back to a uniform pick when only
/// zero weights are left.
fn pick_position<R: RngCore + ?Sized>(remaining: &[usize], weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = remaining.iter().map(|&i| weights[i]).sum();
    if total <= 0.0 {
        return index_below(rng, remaining.len());
    }

    let mut roll = rand01(rng) * total;
    let mut last_positive = 0;
    for (pos, &i) in remaining.iter().enumerate() {
        let w = weights[i];
        if w <= 0.0 {
            continue;
        }
        if roll < w {
            return pos;
        }
        roll -= w;
        last_positive = pos;
    }

    // Rounding can leave a sliver of roll past the last weight.
    last_positive
}

#[inline]
fn sanitize(w: f64) -> f64 {
    if w.is_nan() || w < 0.0 {
        0.0
    } else {
        w
    }
}
