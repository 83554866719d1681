use std::collections::BTreeMap;

use crate::config::DeclutterConfig;
use crate::ir::Point;

const PROGRESS_LOG_EVERY: usize = 100;

/// How a declutter run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// The last pass moved nothing.
    Converged { iterations: usize },
    /// `max_iterations` passes ran and the last one still moved something.
    IterationCap { iterations: usize },
}

impl Convergence {
    pub fn iterations(self) -> usize {
        match self {
            Self::Converged { iterations } | Self::IterationCap { iterations } => iterations,
        }
    }

    pub fn is_converged(self) -> bool {
        matches!(self, Self::Converged { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclutterReport {
    pub convergence: Convergence,
    /// Largest distance any single place travelled from where it started.
    pub max_displacement: f64,
}

/// Pushes apart places that sit closer than `min_distance`.
///
/// Places are visited in name order and each nudge is applied immediately,
/// so later places in a pass see the moves made earlier in that pass. Only
/// pairs inside `min_distance` interact and the push is proportional to the
/// offset, not normalized. Two places at exactly the same point have no
/// direction to separate along and are left together.
pub fn declutter(places: &mut BTreeMap<String, Point>, config: &DeclutterConfig) -> DeclutterReport {
    let mut positions: Vec<Point> = places.values().copied().collect();
    let start = positions.clone();
    let n = positions.len();
    let mut convergence = Convergence::IterationCap { iterations: 0 };

    for iteration in 0..config.max_iterations {
        if iteration % PROGRESS_LOG_EVERY == 0 {
            log::debug!(iteration = iteration, places = n; "Declutter pass");
        }

        let mut moved = false;
        for i in 0..n {
            let here = positions[i];
            let (mut nudge_x, mut nudge_y) = (0.0, 0.0);
            for (j, there) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (dx, dy) = (there.x - here.x, there.y - here.y);
                let distance = dx.hypot(dy);
                if distance == 0.0 || distance >= config.min_distance {
                    continue;
                }
                nudge_x -= dx * config.alpha;
                nudge_y -= dy * config.alpha;
            }
            if nudge_x.abs() > config.tolerance || nudge_y.abs() > config.tolerance {
                positions[i] = Point::new(here.x + nudge_x, here.y + nudge_y);
                moved = true;
            }
        }

        if !moved {
            convergence = Convergence::Converged {
                iterations: iteration + 1,
            };
            break;
        }
        convergence = Convergence::IterationCap {
            iterations: iteration + 1,
        };
    }

    let max_displacement = start
        .iter()
        .zip(&positions)
        .map(|(a, b)| a.distance(*b))
        .fold(0.0, f64::max);

    for (slot, position) in places.values_mut().zip(positions) {
        *slot = position;
    }

    match convergence {
        Convergence::Converged { iterations } => {
            log::info!(iterations = iterations, max_displacement = max_displacement; "Declutter converged");
        }
        Convergence::IterationCap { iterations } => {
            log::info!(iterations = iterations, max_displacement = max_displacement; "Declutter stopped at iteration cap");
        }
    }

    DeclutterReport {
        convergence,
        max_displacement,
    }
}
