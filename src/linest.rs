use kurbo::Line;

use crate::point::Point;

/// Running sums for a two-variable ordinary least squares fit.
#[derive(Clone, Copy, Default, Debug)]
pub struct Linest {
    x_sum: f64,
    x2_sum: f64,
    y_sum: f64,
    y2_sum: f64,
    xy_sum: f64,
    n: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinestResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
}

impl Linest {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut linest = Linest::default();
        for p in points {
            linest.push(p.x, p.y);
        }
        linest
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x_sum += x;
        self.x2_sum += x * x;
        self.y_sum += y;
        self.y2_sum += y * y;
        self.xy_sum += x * y;
        self.n += 1;
    }

    /// `None` with fewer than two samples. When every sample shares one
    /// x-coordinate the denominator is zero and the result fields are
    /// non-finite; callers that care must check `is_finite`.
    pub fn estimate(&self) -> Option<LinestResult> {
        (self.n > 1).then(|| {
            let n = self.n as f64;
            let denom = n * self.x2_sum - self.x_sum * self.x_sum;
            let covar = n * self.xy_sum - self.x_sum * self.y_sum;
            let slope = covar / denom;
            let intercept = (self.x2_sum * self.y_sum - self.xy_sum * self.x_sum) / denom;
            let r2 = covar * covar / denom / (n * self.y2_sum - self.y_sum * self.y_sum);
            LinestResult {
                slope,
                intercept,
                r2,
            }
        })
    }
}

/// Best-fit line spanning `x = 0 ..= width`, recomputed from scratch on
/// every call. `None` with fewer than two points.
pub fn best_fit_line(points: &[Point], width: f64) -> Option<Line> {
    let fit = Linest::from_points(points).estimate()?;
    Some(Line::new(
        (0.0, fit.intercept),
        (width, fit.intercept + fit.slope * width),
    ))
}
