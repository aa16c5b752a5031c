use crate::float::{from_f64, from_usize, Float};

struct Point<T: Float> {
    x: T,
    y: T,
}

/// Walk forward from lag 0 while `arr` is strictly decreasing and return the
/// first index where it stops. This steps past the trivial peak at lag 0.
/// The result is always a valid index of a non-empty `arr`.
pub fn skip_initial_descent<T: Float>(arr: &[T]) -> usize {
    let mut idx = 0;
    while idx + 1 < arr.len() && arr[idx] > arr[idx + 1] {
        idx += 1;
    }
    idx
}

/// The first position of the largest value of `arr[start..]`.
pub fn find_max<T: Float>(arr: &[T], start: usize) -> Option<(usize, T)> {
    arr.iter()
        .enumerate()
        .skip(start)
        .fold(None, |best, (i, &val)| match best {
            Some((_, best_val)) if val <= best_val => best,
            _ => Some((i, val)),
        })
}

/// Refine `peak` to sub-sample precision. Peaks on either boundary of `data`
/// have no neighbour on one side and are returned unchanged.
pub fn correct_peak<T: Float>(peak: (usize, T), data: &[T]) -> (T, T) {
    let (idx, val) = peak;
    if idx == 0 || idx + 1 >= data.len() {
        return (from_usize(idx), val);
    }
    let point = quadratic_interpolation(
        Point {
            x: from_usize(idx - 1),
            y: data[idx - 1],
        },
        Point {
            x: from_usize(idx),
            y: data[idx],
        },
        Point {
            x: from_usize(idx + 1),
            y: data[idx + 1],
        },
    );
    (point.x, point.y)
}

/// Vertex of the parabola through three equally spaced points. With zero
/// curvature the center point is returned as is.
fn quadratic_interpolation<T: Float>(
    left: Point<T>,
    center: Point<T>,
    right: Point<T>,
) -> Point<T> {
    let curvature = from_f64::<T>(2.0) * center.y - left.y - right.y;
    if curvature == T::zero() {
        return center;
    }
    let shift = from_f64::<T>(0.5) * (right.y - left.y) / curvature;
    let x = center.x + shift;
    let y = center.y + from_f64::<T>(0.25) * (right.y - left.y) * shift;
    Point { x, y }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_correction() {
        let point = quadratic_interpolation(
            Point {
                x: -1.5,
                y: -(1.5 * 1.5) + 4.0,
            },
            Point {
                x: -0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
            Point {
                x: 0.5,
                y: -(0.5 * 0.5) + 4.0,
            },
        );
        assert_eq!(point.x, 0.0);
        assert_eq!(point.y, 4.0);
    }

    #[test]
    fn flat_neighbourhood_is_not_shifted() {
        let data = [1.0f64, 3.0, 5.0, 7.0];
        // Collinear points have zero curvature.
        assert_eq!(correct_peak((2, 5.0), &data), (2.0, 5.0));
    }

    #[test]
    fn boundary_peaks_are_not_refined() {
        let data = [4.0f64, 3.0, 2.0, 5.0];
        assert_eq!(correct_peak((0, 4.0), &data), (0.0, 4.0));
        assert_eq!(correct_peak((3, 5.0), &data), (3.0, 5.0));
    }

    #[test]
    fn descent_stops_at_first_rise() {
        assert_eq!(skip_initial_descent(&[5.0f64, 3.0, 1.0, 2.0, 0.0]), 2);
        assert_eq!(skip_initial_descent(&[3.0f64, 2.0, 1.0]), 2);
        assert_eq!(skip_initial_descent(&[1.0f64, 1.0]), 0);
        assert_eq!(skip_initial_descent::<f64>(&[]), 0);
    }

    #[test]
    fn first_maximum_wins() {
        let data = [9.0f64, 1.0, 4.0, 2.0, 4.0];
        assert_eq!(find_max(&data, 1), Some((2, 4.0)));
        assert_eq!(find_max(&data, 0), Some((0, 9.0)));
        assert_eq!(find_max(&data, 5), None);
    }
}
