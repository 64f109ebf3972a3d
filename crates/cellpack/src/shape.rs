/// Rectangular footprint preferred for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

impl Shape {
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn perimeter(&self) -> usize {
        2 * (self.width + self.height)
    }

    /// (row, col) offsets of the first `amount` cells of the rectangle, row-major
    pub(crate) fn footprint(&self, amount: usize) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width.max(1);
        (0..amount.min(self.area())).map(move |i| (i / width, i % width))
    }
}

/// Squarest exact rectangle for `amount` cells no wider than `max_width`
///
/// Widths are scanned ascending and the first minimal perimeter wins, so
/// `amount = 6` on a 4-wide grid gives 2x3 rather than 3x2.
pub fn best_shape(amount: usize, max_width: usize) -> Shape {
    let amount = amount.max(1);
    (1..=amount.min(max_width))
        .filter(|width| amount % width == 0)
        .map(|width| Shape {
            width,
            height: amount / width,
        })
        .min_by_key(Shape::perimeter)
        .unwrap_or_else(|| approximate_shape(amount, max_width))
}

/// Near-square rectangle that may hold more than `amount` cells
fn approximate_shape(amount: usize, max_width: usize) -> Shape {
    let root = amount.isqrt();
    let side = if root * root < amount { root + 1 } else { root };
    let width = side.min(max_width).max(1);
    Shape {
        width,
        height: amount.div_ceil(width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(width: usize, height: usize) -> Shape {
        Shape { width, height }
    }

    #[test]
    fn test_square_amounts() {
        assert_eq!(best_shape(4, 4), shape(2, 2));
        assert_eq!(best_shape(9, 4), shape(3, 3));
        assert_eq!(best_shape(1, 4), shape(1, 1));
    }

    #[test]
    fn test_ties_prefer_narrow() {
        assert_eq!(best_shape(2, 4), shape(1, 2));
        assert_eq!(best_shape(6, 4), shape(2, 3));
        assert_eq!(best_shape(12, 6), shape(3, 4));
    }

    #[test]
    fn test_width_limited_by_grid() {
        assert_eq!(best_shape(12, 3), shape(3, 4));
        assert_eq!(best_shape(12, 2), shape(2, 6));
        assert_eq!(best_shape(16, 1), shape(1, 16));
    }

    #[test]
    fn test_prime_falls_back_to_column() {
        assert_eq!(best_shape(7, 4), shape(1, 7));
    }

    #[test]
    fn test_approximate_shape() {
        assert_eq!(approximate_shape(7, 4), shape(3, 3));
        assert_eq!(approximate_shape(7, 2), shape(2, 4));
        assert_eq!(approximate_shape(16, 8), shape(4, 4));
        // a zero-width grid still yields a usable column
        assert_eq!(best_shape(5, 0), shape(1, 5));
    }

    #[test]
    fn test_footprint_crops_row_major() {
        let offsets: Vec<_> = shape(3, 3).footprint(7).collect();
        assert_eq!(
            offsets,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (2, 0)]
        );
        assert_eq!(shape(2, 2).footprint(9).count(), 4);
    }
}
