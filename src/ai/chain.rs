use crate::Pip;
use crate::tiles::Domino;

/// Depth-first search over every way the given tiles can chain off the
/// required pip, keeping the chain worth the most points. Ties break
/// toward the longer chain. `seed` is a prefix already committed to the
/// chain (a just-drawn tile); `cap` stops the search at the first chain
/// of that length, which is how the medium tier limits its lookahead.
pub fn highest_score_chain(
    available: &[Domino],
    pip: Pip,
    seed: Vec<Domino>,
    cap: Option<usize>,
) -> Vec<Domino> {
    descend_score(available, pip, seed, Vec::new(), cap)
}

/// Same search, but keeping the longest chain. Ties break toward the
/// chain worth more points.
pub fn longest_chain(available: &[Domino], pip: Pip) -> Vec<Domino> {
    descend_length(available, pip, Vec::new(), Vec::new())
}

fn total(chain: &[Domino]) -> u32 {
    chain.iter().map(Domino::score).sum()
}

fn descend_score(
    available: &[Domino],
    pip: Pip,
    chain: Vec<Domino>,
    mut best: Vec<Domino>,
    cap: Option<usize>,
) -> Vec<Domino> {
    let mut matched = false;
    for (i, &tile) in available.iter().enumerate() {
        if tile.matches(pip) {
            matched = true;
            let mut rest = available.to_vec();
            rest.remove(i);
            let mut longer = chain.clone();
            longer.push(tile);
            best = descend_score(&rest, tile.other(pip), longer, best, cap);
            if cap.is_some_and(|c| best.len() >= c) {
                return best;
            }
        }
    }
    if !matched
        && (total(&chain) > total(&best)
            || (total(&chain) == total(&best) && chain.len() > best.len()))
    {
        return chain;
    }
    best
}

fn descend_length(
    available: &[Domino],
    pip: Pip,
    chain: Vec<Domino>,
    mut best: Vec<Domino>,
) -> Vec<Domino> {
    let mut matched = false;
    for (i, &tile) in available.iter().enumerate() {
        if tile.matches(pip) {
            matched = true;
            let mut rest = available.to_vec();
            rest.remove(i);
            let mut longer = chain.clone();
            longer.push(tile);
            best = descend_length(&rest, tile.other(pip), longer, best);
        }
    }
    if !matched
        && (chain.len() > best.len()
            || (chain.len() == best.len() && total(&chain) > total(&best)))
    {
        return chain;
    }
    best
}
