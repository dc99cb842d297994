// Shape module organization
// One file per geometry; `Shape` is the closed set the search works over.

pub mod circle;
pub mod ellipse;
pub mod line;
pub mod polyline;
pub mod quadratic_bezier;
pub mod rectangle;
pub mod rotated_rectangle;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use line::Line;
pub use polyline::Polyline;
pub use quadratic_bezier::QuadraticBezier;
pub use rectangle::Rectangle;
pub use rotated_rectangle::RotatedRectangle;

use serde::{Deserialize, Serialize};

use crate::geom::Bounds;
use crate::rng::SplitMix64;
use crate::scanline::Scanline;

/// which geometry to instantiate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeType {
    Rectangle,
    RotatedRectangle,
    Circle,
    Ellipse,
    Line,
    Polyline,
    QuadraticBezier,
}

impl ShapeType {
    pub const ALL: [ShapeType; 7] = [
        ShapeType::Rectangle,
        ShapeType::RotatedRectangle,
        ShapeType::Circle,
        ShapeType::Ellipse,
        ShapeType::Line,
        ShapeType::Polyline,
        ShapeType::QuadraticBezier,
    ];

    /// a zeroed shape of this type; call `Shape::setup` before use
    pub fn create(self) -> Shape {
        match self {
            ShapeType::Rectangle => Shape::Rectangle(Rectangle::default()),
            ShapeType::RotatedRectangle => Shape::RotatedRectangle(RotatedRectangle::default()),
            ShapeType::Circle => Shape::Circle(Circle::default()),
            ShapeType::Ellipse => Shape::Ellipse(Ellipse::default()),
            ShapeType::Line => Shape::Line(Line::default()),
            ShapeType::Polyline => Shape::Polyline(Polyline::default()),
            ShapeType::QuadraticBezier => Shape::QuadraticBezier(QuadraticBezier::default()),
        }
    }
}

/// a candidate geometry. cloning yields a fully independent value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Rectangle(Rectangle),
    RotatedRectangle(RotatedRectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Polyline(Polyline),
    QuadraticBezier(QuadraticBezier),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::RotatedRectangle(_) => ShapeType::RotatedRectangle,
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Ellipse(_) => ShapeType::Ellipse,
            Shape::Line(_) => ShapeType::Line,
            Shape::Polyline(_) => ShapeType::Polyline,
            Shape::QuadraticBezier(_) => ShapeType::QuadraticBezier,
        }
    }

    /// randomize every parameter inside `bounds`
    pub fn setup(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match self {
            Shape::Rectangle(s) => s.setup(bounds, rng),
            Shape::RotatedRectangle(s) => s.setup(bounds, rng),
            Shape::Circle(s) => s.setup(bounds, rng),
            Shape::Ellipse(s) => s.setup(bounds, rng),
            Shape::Line(s) => s.setup(bounds, rng),
            Shape::Polyline(s) => s.setup(bounds, rng),
            Shape::QuadraticBezier(s) => s.setup(bounds, rng),
        }
    }

    /// nudge one parameter by a bounded random delta, then clamp into `bounds`
    pub fn mutate(&mut self, bounds: &Bounds, rng: &mut SplitMix64) {
        match self {
            Shape::Rectangle(s) => s.mutate(bounds, rng),
            Shape::RotatedRectangle(s) => s.mutate(bounds, rng),
            Shape::Circle(s) => s.mutate(bounds, rng),
            Shape::Ellipse(s) => s.mutate(bounds, rng),
            Shape::Line(s) => s.mutate(bounds, rng),
            Shape::Polyline(s) => s.mutate(bounds, rng),
            Shape::QuadraticBezier(s) => s.mutate(bounds, rng),
        }
    }

    /// trimmed, duplicate-free coverage. empty for shapes whose rows all lie off-canvas.
    pub fn rasterize(&self, bounds: &Bounds) -> Vec<Scanline> {
        profiling::scope!("Shape::rasterize");
        match self {
            Shape::Rectangle(s) => s.rasterize(bounds),
            Shape::RotatedRectangle(s) => s.rasterize(bounds),
            Shape::Circle(s) => s.rasterize(bounds),
            Shape::Ellipse(s) => s.rasterize(bounds),
            Shape::Line(s) => s.rasterize(bounds),
            Shape::Polyline(s) => s.rasterize(bounds),
            Shape::QuadraticBezier(s) => s.rasterize(bounds),
        }
    }
}

/// shape factory that picks uniformly among `types` with the candidate's generator.
/// an empty list falls back to rectangles.
pub fn random_shape_creator(types: Vec<ShapeType>) -> impl Fn(&mut SplitMix64) -> Shape + Sync {
    move |rng: &mut SplitMix64| {
        if types.is_empty() {
            return ShapeType::Rectangle.create();
        }
        let i = rng.next_in_range(0, types.len() as i32 - 1) as usize;
        types[i].create()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn covered_pixels(lines: &[Scanline]) -> Vec<(i32, i32)> {
        lines.iter().flat_map(|l| (l.x1..=l.x2).map(move |x| (x, l.y))).collect()
    }

    #[test]
    fn test_every_type_rasterizes_in_bounds_without_duplicates() {
        let bounds = Bounds::of_canvas(48, 40).unwrap();
        let mut rng = SplitMix64::new(77);
        for ty in ShapeType::ALL {
            let mut shape = ty.create();
            assert_eq!(shape.shape_type(), ty);
            shape.setup(&bounds, &mut rng);
            for _ in 0..50 {
                shape.mutate(&bounds, &mut rng);
                let pixels = covered_pixels(&shape.rasterize(&bounds));
                let unique: HashSet<_> = pixels.iter().copied().collect();
                assert_eq!(unique.len(), pixels.len(), "{ty:?} double-covers pixels");
                assert!(pixels.iter().all(|&(x, y)| bounds.contains(x, y)));
            }
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let bounds = Bounds::of_canvas(32, 32).unwrap();
        let mut rng = SplitMix64::new(4);
        let original = Shape::Polyline(Polyline::new(vec![(1, 1), (5, 5), (9, 1), (12, 8)]));
        let mut copy = original.clone();
        assert_eq!(copy, original);
        for _ in 0..10 {
            copy.mutate(&bounds, &mut rng);
        }
        assert_ne!(copy, original);
        assert_eq!(original, Shape::Polyline(Polyline::new(vec![(1, 1), (5, 5), (9, 1), (12, 8)])));
    }

    #[test]
    fn test_structural_equality_across_variants() {
        let a = Shape::Rectangle(Rectangle::new(1, 2, 3, 4));
        let b = Shape::Line(Line::new(1, 2, 3, 4));
        assert_ne!(a, b);
        assert_eq!(a, Shape::Rectangle(Rectangle::new(1, 2, 3, 4)));
    }

    #[test]
    fn test_serde_tagged_roundtrip() {
        let shape = Shape::Ellipse(Ellipse::new(10, 12, 4, 6));
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"type\":\"Ellipse\""));
        let back: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shape);
    }

    #[test]
    fn test_random_creator_respects_types() {
        let creator = random_shape_creator(vec![ShapeType::Circle, ShapeType::Line]);
        let mut rng = SplitMix64::new(8);
        for _ in 0..50 {
            let ty = creator(&mut rng).shape_type();
            assert!(ty == ShapeType::Circle || ty == ShapeType::Line);
        }
    }
}
