// Probability-based salvo targeting for the computer opponent.
// Uses no_std and avoids heap allocations in the density pass.

use rand::Rng;

use crate::{
    bitboard::CellSet,
    common::PlayerId,
    config::{BOARD_SIZE, FLEET, NUM_SHIPS},
    coord::{footprint, Coord, Orientation},
    firing::{salvo_cells, SalvoOrder},
    rng::SeededRng,
    state::GameState,
};

const GRID_SIZE: usize = BOARD_SIZE;

/// Density matrix indexed `[y][x]`.
pub type Pdf = [[f64; GRID_SIZE]; GRID_SIZE];

/// Placements covering more observed hits get this much more weight per hit,
/// which pulls the next salvo toward wounded ships.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature sharpens the distribution toward likely cells.
const TEMPERATURE: f64 = 0.5;

/// Relative likelihood of an enemy segment occupying each cell, given the
/// attacker's current hit and miss markers and the hull lengths still afloat.
/// Cells already marked carry no weight.
pub fn calc_pdf(hits: &CellSet, misses: &CellSet, remaining_lengths: &[usize; NUM_SHIPS]) -> Pdf {
    let mut matrix = [[0.0f64; GRID_SIZE]; GRID_SIZE];

    for &len in remaining_lengths.iter() {
        if len == 0 || len > GRID_SIZE {
            continue;
        }
        for orient in Orientation::ALL {
            let (span_x, span_y) = match orient {
                Orientation::Horizontal => (GRID_SIZE - len + 1, GRID_SIZE),
                Orientation::Vertical => (GRID_SIZE, GRID_SIZE - len + 1),
            };
            for y in 0..span_y {
                for x in 0..span_x {
                    let anchor = Coord::new(x as i32, y as i32);
                    let hull = footprint(anchor, orient, len);
                    if hull.clone().any(|c| misses.contains(c)) {
                        continue;
                    }
                    let n_hits = hull.clone().filter(|&c| hits.contains(c)).count();
                    let weight = if n_hits == 0 {
                        1.0
                    } else {
                        libm::pow(HIT_BIAS, n_hits as f64)
                    };
                    for c in hull.filter(|&c| !hits.contains(c)) {
                        matrix[c.y as usize][c.x as usize] += weight;
                    }
                }
            }
        }
    }

    normalize(matrix)
}

fn normalize(mut matrix: Pdf) -> Pdf {
    let total: f64 = matrix.iter().flat_map(|row| row.iter()).sum();
    if total == 0.0 {
        let uniform = 1.0 / (GRID_SIZE * GRID_SIZE) as f64;
        for row in matrix.iter_mut() {
            row.fill(uniform);
        }
        return matrix;
    }
    for row in matrix.iter_mut() {
        for v in row.iter_mut() {
            *v /= total;
        }
    }
    matrix
}

/// Sample a cell from a probability matrix using a temperature parameter.
pub fn sample_pdf<R: Rng + ?Sized>(pdf: &Pdf, temperature: f64, rng: &mut R) -> Coord {
    let mut adjusted = [[0.0f64; GRID_SIZE]; GRID_SIZE];
    let mut total = 0.0;
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let v = libm::pow(pdf[y][x], 1.0 / temperature);
            adjusted[y][x] = v;
            total += v;
        }
    }
    if total == 0.0 {
        return Coord::new(
            rng.random_range(0..GRID_SIZE) as i32,
            rng.random_range(0..GRID_SIZE) as i32,
        );
    }
    let mut cumulative = 0.0;
    let threshold: f64 = rng.random_range(0.0..total);
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            cumulative += adjusted[y][x];
            if threshold < cumulative {
                return Coord::new(x as i32, y as i32);
            }
        }
    }
    Coord::new(GRID_SIZE as i32 - 1, GRID_SIZE as i32 - 1)
}

/// Hull lengths of the enemy ships `attacker` has not destroyed, zero for
/// destroyed ones, in catalog order.
pub fn enemy_lengths_remaining(state: &GameState, attacker: PlayerId) -> [usize; NUM_SHIPS] {
    let destroyed = state.player(attacker).destroyed();
    core::array::from_fn(|i| {
        let template = &FLEET[i];
        if destroyed.iter().any(|uid| uid.class == template.class()) {
            0
        } else {
            template.size()
        }
    })
}

/// Density over the opponent's board from `attacker`'s point of view.
pub fn targeting_pdf(state: &GameState, attacker: PlayerId) -> Pdf {
    let me = state.player(attacker);
    calc_pdf(
        me.ephemeral_hits(),
        me.misses(),
        &enemy_lengths_remaining(state, attacker),
    )
}

/// Orientation whose salvo covers the most probability mass around `target`.
/// Horizontal wins ties.
pub fn best_orientation(pdf: &Pdf, target: Coord, guns: usize) -> Orientation {
    let mass = |orientation| -> f64 {
        salvo_cells(target, orientation, guns)
            .into_iter()
            .filter(|c| c.in_bounds())
            .map(|c| pdf[c.y as usize][c.x as usize])
            .sum()
    };
    if mass(Orientation::Vertical) > mass(Orientation::Horizontal) {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

/// Pick the next salvo for `attacker`: the first ship in fleet order that may
/// still fire, aimed by sampling the targeting density. `None` when the
/// player has nothing left to fire this round.
pub fn plan_salvo(state: &GameState, attacker: PlayerId, rng: &mut SeededRng) -> Option<SalvoOrder> {
    let ship = state.unfired_ships(attacker).into_iter().next()?;
    let guns = state.ship(ship)?.template().guns();
    let pdf = targeting_pdf(state, attacker);
    let target = sample_pdf(&pdf, TEMPERATURE, rng);
    Some(SalvoOrder {
        ship,
        target,
        orientation: best_orientation(&pdf, target, guns),
    })
}
