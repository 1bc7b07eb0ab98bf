//! Polygonal face type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygonal face: a cyclic list of point indices.
///
/// The face normal follows the right-hand rule over the point order. For a
/// boundary face it points out of the owner cell; for an internal face it
/// points from the owner into the neighbour.
///
/// # Example
///
/// ```
/// use mesh_poly::Face;
///
/// let quad = Face::new(vec![0, 1, 2, 3]);
/// assert_eq!(quad.len(), 4);
/// assert_eq!(quad.next_label(3), 0);
/// assert_eq!(quad.edges().count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Face(Vec<usize>);

impl Face {
    /// Create a face from its point indices.
    #[inline]
    #[must_use]
    pub const fn new(points: Vec<usize>) -> Self {
        Self(points)
    }

    /// Create a triangle.
    #[inline]
    #[must_use]
    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        Self(vec![a, b, c])
    }

    /// Number of points, which equals the number of edges.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the face has no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Point indices in order.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[usize] {
        &self.0
    }

    /// The point after position `i`, wrapping around.
    #[inline]
    #[must_use]
    pub fn next_label(&self, i: usize) -> usize {
        self.0[(i + 1) % self.0.len()]
    }

    /// Iterate over directed edges `(v[i], v[i+1])`, closing the loop.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.0.len()).map(|i| (self.0[i], self.next_label(i)))
    }

    /// Check whether the face walks the edge `a -> b` in its own order.
    #[must_use]
    pub fn has_directed_edge(&self, a: usize, b: usize) -> bool {
        self.edges().any(|e| e == (a, b))
    }

    /// The face with point order reversed, keeping the first point first.
    ///
    /// ```
    /// use mesh_poly::Face;
    ///
    /// let f = Face::new(vec![0, 1, 2, 3]);
    /// assert_eq!(f.reversed().points(), &[0, 3, 2, 1]);
    /// ```
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = Vec::with_capacity(self.0.len());
        if let Some((&first, rest)) = self.0.split_first() {
            points.push(first);
            points.extend(rest.iter().rev());
        }
        Self(points)
    }

    /// Average of the face's point positions.
    #[must_use]
    pub fn average(&self, points: &[Point3<f64>]) -> Point3<f64> {
        let sum = self
            .0
            .iter()
            .fold(Vector3::zeros(), |acc, &p| acc + points[p].coords);
        #[allow(clippy::cast_precision_loss)]
        let n = self.0.len().max(1) as f64;
        Point3::from(sum / n)
    }

    /// Area-weighted centroid and area vector of the face.
    ///
    /// Triangles are returned exactly. Larger polygons are fanned into
    /// triangles around the point average; the centroid is the area-weighted
    /// mean of the triangle centroids. The area vector has the magnitude of
    /// the face area and points along the face normal.
    #[must_use]
    pub fn centre_and_area(&self, points: &[Point3<f64>]) -> (Point3<f64>, Vector3<f64>) {
        if self.0.len() == 3 {
            let (a, b, c) = (points[self.0[0]], points[self.0[1]], points[self.0[2]]);
            let centre = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            return (centre, 0.5 * (b - a).cross(&(c - a)));
        }

        let mid = self.average(points);
        let mut sum_n = Vector3::zeros();
        let mut sum_a = 0.0;
        let mut sum_ac = Vector3::zeros();

        for (a, b) in self.edges() {
            let (pa, pb) = (points[a], points[b]);
            let n = (pb - pa).cross(&(mid - pa));
            let area = n.norm();
            sum_n += n;
            sum_a += area;
            sum_ac += area * (pa.coords + pb.coords + mid.coords);
        }

        let centre = if sum_a > f64::EPSILON * f64::EPSILON {
            Point3::from(sum_ac / (3.0 * sum_a))
        } else {
            mid
        };
        (centre, 0.5 * sum_n)
    }

    /// Face area.
    #[must_use]
    pub fn area(&self, points: &[Point3<f64>]) -> f64 {
        self.centre_and_area(points).1.norm()
    }
}

impl From<Vec<usize>> for Face {
    fn from(points: Vec<usize>) -> Self {
        Self(points)
    }
}

impl<const N: usize> From<[usize; N]> for Face {
    fn from(points: [usize; N]) -> Self {
        Self(points.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_edges_close_the_loop() {
        let f = Face::new(vec![4, 7, 9]);
        let edges: Vec<_> = f.edges().collect();
        assert_eq!(edges, vec![(4, 7), (7, 9), (9, 4)]);
        assert!(f.has_directed_edge(9, 4));
        assert!(!f.has_directed_edge(4, 9));
    }

    #[test]
    fn test_reversed_flips_edge_direction() {
        let f = Face::new(vec![0, 1, 2, 3, 4]);
        let r = f.reversed();
        assert!(f.has_directed_edge(1, 2));
        assert!(r.has_directed_edge(2, 1));
        assert_eq!(r.len(), 5);
    }

    #[test]
    fn test_square_centre_and_area() {
        let points = unit_square();
        let f = Face::new(vec![0, 1, 2, 3]);
        let (centre, area) = f.centre_and_area(&points);
        assert_relative_eq!(centre, Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(area, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_reversed_area_points_the_other_way() {
        let points = unit_square();
        let f = Face::new(vec![0, 1, 2, 3]).reversed();
        let (_, area) = f.centre_and_area(&points);
        assert_relative_eq!(area.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_centre() {
        let points = unit_square();
        let f = Face::triangle(0, 1, 3);
        let (centre, area) = f.centre_and_area(&points);
        assert_relative_eq!(centre.x, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centre.y, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(area.norm(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_is_area_weighted() {
        // L-shaped hexagon: vertex average and area centroid differ
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ];
        let f = Face::new(vec![0, 1, 2, 3, 4, 5]);
        let (centre, area) = f.centre_and_area(&points);
        assert_relative_eq!(area.norm(), 3.0, epsilon = 1e-12);
        // Two unit squares at (0.5, 0.5), (1.5, 0.5) and one at (0.5, 1.5)
        assert_relative_eq!(centre.x, 2.5 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(centre.y, 2.5 / 3.0, epsilon = 1e-12);
    }
}
