use emath::{Pos2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    Right,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Vertical {
    Top,
    Bottom,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionSample {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl DirectionSample {
    pub fn classify(last: Pos2, current: Pos2) -> Self {
        let horizontal = if last.x > current.x {
            Horizontal::Left
        } else if last.x < current.x {
            Horizontal::Right
        } else {
            Horizontal::None
        };
        let vertical = if last.y > current.y {
            Vertical::Top
        } else if last.y < current.y {
            Vertical::Bottom
        } else {
            Vertical::None
        };
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Debounces pan jitter: an axis only moves once two consecutive samples agree on its
/// direction. A reversal therefore costs one sample before the pan follows again.
#[derive(Debug, Clone, Default)]
pub struct DirectionGate {
    pending: DirectionSample,
    confirmed: DirectionSample,
}

impl DirectionGate {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Per axis, the last direction that let a delta through.
    pub fn confirmed(&self) -> DirectionSample {
        self.confirmed
    }

    /// Returns the part of `current - last` that may be applied to the pan.
    pub fn gate(&mut self, last: Pos2, current: Pos2) -> Vec2 {
        let direction = DirectionSample::classify(last, current);
        let raw = current - last;
        let mut delta = Vec2::ZERO;

        if direction.horizontal == self.pending.horizontal {
            delta.x = raw.x;
            self.confirmed.horizontal = direction.horizontal;
        }
        if direction.vertical == self.pending.vertical {
            delta.y = raw.y;
            self.confirmed.vertical = direction.vertical;
        }
        self.pending = direction;
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_axes() {
        let o = Pos2::new(10.0, 10.0);
        assert_eq!(
            DirectionSample::classify(o, Pos2::new(5.0, 12.0)),
            DirectionSample {
                horizontal: Horizontal::Left,
                vertical: Vertical::Bottom
            }
        );
        assert_eq!(
            DirectionSample::classify(o, Pos2::new(11.0, 9.0)),
            DirectionSample {
                horizontal: Horizontal::Right,
                vertical: Vertical::Top
            }
        );
        assert_eq!(DirectionSample::classify(o, o), DirectionSample::default());
    }

    #[test]
    fn first_move_is_suppressed() {
        let mut gate = DirectionGate::default();
        let delta = gate.gate(Pos2::new(0.0, 0.0), Pos2::new(3.0, 4.0));
        assert_eq!(delta, Vec2::ZERO);
        assert_eq!(gate.confirmed(), DirectionSample::default());
    }

    #[test]
    fn second_move_in_same_direction_passes() {
        let mut gate = DirectionGate::default();
        gate.gate(Pos2::new(0.0, 0.0), Pos2::new(3.0, 4.0));
        let delta = gate.gate(Pos2::new(3.0, 4.0), Pos2::new(5.0, 10.0));
        assert_eq!(delta, Vec2::new(2.0, 6.0));
        assert_eq!(
            gate.confirmed(),
            DirectionSample {
                horizontal: Horizontal::Right,
                vertical: Vertical::Bottom
            }
        );
    }

    #[test]
    fn axes_are_gated_independently() {
        let mut gate = DirectionGate::default();
        gate.gate(Pos2::new(0.0, 0.0), Pos2::new(3.0, 3.0));
        // x keeps going right, y reverses
        let delta = gate.gate(Pos2::new(3.0, 3.0), Pos2::new(6.0, 1.0));
        assert_eq!(delta, Vec2::new(3.0, 0.0));
        // y confirms upward motion on the next sample
        let delta = gate.gate(Pos2::new(6.0, 1.0), Pos2::new(9.0, 0.0));
        assert_eq!(delta, Vec2::new(3.0, -1.0));
    }

    #[test]
    fn alternating_directions_never_pan() {
        let mut gate = DirectionGate::default();
        let mut last = Pos2::new(50.0, 50.0);
        let mut total = Vec2::ZERO;
        for i in 0..20 {
            let step = if i % 2 == 0 { 7.0 } else { -7.0 };
            let current = last + Vec2::splat(step);
            total += gate.gate(last, current);
            last = current;
        }
        assert_eq!(total, Vec2::ZERO);
    }

    #[test]
    fn reset_requires_fresh_confirmation() {
        let mut gate = DirectionGate::default();
        gate.gate(Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0));
        gate.reset();
        let delta = gate.gate(Pos2::new(1.0, 0.0), Pos2::new(2.0, 0.0));
        assert_eq!(delta, Vec2::ZERO);
    }
}
