use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::drawing::{BrushKind, Mark, Point};

/// Max offset, per axis, of each oil bristle from the pointer.
const OIL_SPLATTER: i32 = 2;
const OIL_BRISTLES: usize = 3;

/// Turns drag samples into brush marks. Owns the jitter source so callers can
/// seed it and get repeatable strokes.
pub struct BrushGenerator {
    rng: StdRng,
}

impl BrushGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Marks left by one drag sample at `at`.
    pub fn dabs(&mut self, brush: &BrushKind, at: Point, thickness: u32) -> Vec<Mark> {
        let radius = thickness as i32;
        match brush {
            BrushKind::Pen | BrushKind::Ink => vec![Mark::Dot { center: at, radius }],
            BrushKind::Pencil => {
                let jitter_x = self.rng.random_range(-1..=1);
                let jitter_y = self.rng.random_range(-1..=1);
                vec![Mark::Grain {
                    from: at,
                    to: [at[0] + jitter_x, at[1] + jitter_y],
                }]
            }
            BrushKind::Oil => (0..OIL_BRISTLES)
                .map(|_| {
                    let ox = self.rng.random_range(-OIL_SPLATTER..=OIL_SPLATTER);
                    let oy = self.rng.random_range(-OIL_SPLATTER..=OIL_SPLATTER);
                    Mark::Dot {
                        center: [at[0] + ox, at[1] + oy],
                        radius,
                    }
                })
                .collect(),
            BrushKind::Paint => vec![Mark::Square { center: at, half: radius }],
            BrushKind::Custom(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_and_ink_leave_one_dot() {
        let mut brushes = BrushGenerator::new(Some(7));
        for brush in [BrushKind::Pen, BrushKind::Ink] {
            let marks = brushes.dabs(&brush, [30, 40], 4);
            assert_eq!(marks, vec![Mark::Dot { center: [30, 40], radius: 4 }]);
        }
    }

    #[test]
    fn pencil_grain_stays_within_one_pixel() {
        let mut brushes = BrushGenerator::new(None);
        for _ in 0..50 {
            match brushes.dabs(&BrushKind::Pencil, [10, 10], 1).as_slice() {
                [Mark::Grain { from, to }] => {
                    assert_eq!(*from, [10, 10]);
                    assert!((to[0] - 10).abs() <= 1 && (to[1] - 10).abs() <= 1);
                }
                other => panic!("unexpected pencil marks: {other:?}"),
            }
        }
    }

    #[test]
    fn oil_splatters_three_bristles() {
        let mut brushes = BrushGenerator::new(None);
        let marks = brushes.dabs(&BrushKind::Oil, [100, 100], 8);
        assert_eq!(marks.len(), 3);
        for mark in marks {
            let Mark::Dot { center, radius } = mark else {
                panic!("oil must leave dots");
            };
            assert_eq!(radius, 8);
            assert!((center[0] - 100).abs() <= 2 && (center[1] - 100).abs() <= 2);
        }
    }

    #[test]
    fn paint_is_a_square_of_twice_the_thickness() {
        let mut brushes = BrushGenerator::new(None);
        let marks = brushes.dabs(&BrushKind::Paint, [5, 5], 12);
        assert_eq!(marks, vec![Mark::Square { center: [5, 5], half: 12 }]);
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = BrushGenerator::new(Some(42));
        let mut b = BrushGenerator::new(Some(42));
        for _ in 0..10 {
            assert_eq!(
                a.dabs(&BrushKind::Oil, [0, 0], 3),
                b.dabs(&BrushKind::Oil, [0, 0], 3)
            );
        }
    }

    #[test]
    fn custom_brush_leaves_nothing() {
        let mut brushes = BrushGenerator::new(None);
        assert!(brushes.dabs(&BrushKind::Custom("chalk".into()), [0, 0], 5).is_empty());
    }
}
