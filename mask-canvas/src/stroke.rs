use emath::Pos2;
use tiny_skia::PathBuilder;

/// Minimum per-axis pointer travel before a new curve segment is appended.
pub const MIN_SEGMENT_DISTANCE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Quad { control: Pos2, end: Pos2 },
    Line { end: Pos2 },
}

/// Canvas-space stroke geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    start: Pos2,
    segments: Vec<Segment>,
}

impl StrokePath {
    fn new(start: Pos2) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the geometry never left its starting point (a tap).
    pub fn is_dot(&self) -> bool {
        self.segments
            .iter()
            .flat_map(|s| match s {
                Segment::Quad { control, end } => [*control, *end],
                Segment::Line { end } => [*end, *end],
            })
            .all(|p| p == self.start)
    }

    pub fn to_skia_path(&self) -> Option<tiny_skia::Path> {
        let mut builder = PathBuilder::new();
        builder.move_to(self.start.x, self.start.y);
        for segment in &self.segments {
            match segment {
                Segment::Quad { control, end } => {
                    builder.quad_to(control.x, control.y, end.x, end.y)
                }
                Segment::Line { end } => builder.line_to(end.x, end.y),
            }
        }
        builder.finish()
    }
}

/// Builds a smoothed path from a pointer stream.
///
/// Each accepted sample adds a quadratic segment whose control point is the previous
/// sample and whose end is the midpoint between both samples.
#[derive(Debug, Default)]
pub struct StrokeBuilder {
    path: Option<StrokePath>,
    last_point: Pos2,
}

impl StrokeBuilder {
    pub fn begin(&mut self, point: Pos2) {
        self.path = Some(StrokePath::new(point));
        self.last_point = point;
    }

    /// Returns `true` if the sample added a segment.
    pub fn extend(&mut self, point: Pos2) -> bool {
        let Some(path) = &mut self.path else {
            return false;
        };
        let dx = (point.x - self.last_point.x).abs();
        let dy = (point.y - self.last_point.y).abs();
        if dx < MIN_SEGMENT_DISTANCE && dy < MIN_SEGMENT_DISTANCE {
            return false;
        }
        path.segments.push(Segment::Quad {
            control: self.last_point,
            end: self.last_point.lerp(point, 0.5),
        });
        self.last_point = point;
        true
    }

    /// Finish the stroke with a line to the last accepted sample and hand it out.
    ///
    /// The pointer-up position itself is not used.
    pub fn end(&mut self, _point: Pos2) -> Option<StrokePath> {
        let mut path = self.path.take()?;
        path.segments.push(Segment::Line {
            end: self.last_point,
        });
        Some(path)
    }

    pub fn cancel(&mut self) {
        self.path = None;
    }

    pub fn is_active(&self) -> bool {
        self.path.is_some()
    }

    pub fn live_path(&self) -> Option<&StrokePath> {
        self.path.as_ref()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_moves_are_ignored() {
        let mut builder = StrokeBuilder::default();
        builder.begin(Pos2::new(10.0, 10.0));
        assert!(!builder.extend(Pos2::new(13.0, 13.5)));
        assert!(!builder.extend(Pos2::new(7.0, 6.5)));
        assert_eq!(builder.live_path().unwrap().segments(), &[]);
    }

    #[test]
    fn threshold_on_either_axis_adds_quad() {
        let mut builder = StrokeBuilder::default();
        builder.begin(Pos2::new(10.0, 10.0));
        assert!(builder.extend(Pos2::new(14.0, 11.0)));
        assert!(builder.extend(Pos2::new(14.0, 20.0)));
        assert_eq!(
            builder.live_path().unwrap().segments(),
            &[
                Segment::Quad {
                    control: Pos2::new(10.0, 10.0),
                    end: Pos2::new(12.0, 10.5)
                },
                Segment::Quad {
                    control: Pos2::new(14.0, 11.0),
                    end: Pos2::new(14.0, 15.5)
                },
            ]
        );
    }

    #[test]
    fn end_closes_to_last_recorded_point() {
        let mut builder = StrokeBuilder::default();
        builder.begin(Pos2::new(0.0, 0.0));
        builder.extend(Pos2::new(10.0, 0.0));
        builder.extend(Pos2::new(11.0, 1.0));
        let path = builder.end(Pos2::new(99.0, 99.0)).unwrap();
        assert_eq!(
            path.segments().last(),
            Some(&Segment::Line {
                end: Pos2::new(10.0, 0.0)
            })
        );
        assert!(!builder.is_active());
        assert!(path.to_skia_path().is_some());
    }

    #[test]
    fn tap_is_a_dot() {
        let mut builder = StrokeBuilder::default();
        builder.begin(Pos2::new(5.0, 5.0));
        builder.extend(Pos2::new(6.0, 6.0));
        let path = builder.end(Pos2::new(6.0, 6.0)).unwrap();
        assert!(path.is_dot());
    }

    #[test]
    fn cancel_discards() {
        let mut builder = StrokeBuilder::default();
        builder.begin(Pos2::new(5.0, 5.0));
        builder.extend(Pos2::new(20.0, 5.0));
        builder.cancel();
        assert!(builder.live_path().is_none());
        assert!(builder.end(Pos2::new(0.0, 0.0)).is_none());
        assert!(!builder.extend(Pos2::new(40.0, 5.0)));
    }
}
