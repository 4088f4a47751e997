use derive_new::new;
use piet::Color;
use rand::Rng;

/// A 2D sample with its display color.
///
/// The color is drawn once, uniformly over the full 24-bit RGB space, and
/// never changes afterwards. The engine's point collection is the sole
/// owner; renderers only ever see points through a borrowed frame.
#[derive(Clone, Debug, new)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    color: Color,
}

impl Point {
    /// A point at the given coordinates with a freshly drawn random color.
    pub fn with_random_color(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        Point::new(x, y, random_color(rng))
    }

    /// A point sampled uniformly in `[0, width) × [0, height)`.
    pub fn sample(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        Point::with_random_color(x, y, rng)
    }

    pub fn color(&self) -> &Color {
        &self.color
    }

    pub fn pos(&self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

fn random_color(rng: &mut impl Rng) -> Color {
    Color::rgb8(rng.gen(), rng.gen(), rng.gen())
}
