use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use crate::feq;
use crate::tuple::Tuple4D;
use crate::error::GeometryError;

/// Declares a row-major square matrix of fixed size with `(row, col)`
/// indexing and construction from a flat array.
macro_rules! square_matrix {
    ($name:ident, $n:expr) => {
        #[derive(Copy, Clone, Debug, PartialOrd)]
        pub(crate) struct $name {
            data: [f64; $n * $n],
        }

        impl From<[f64; $n * $n]> for $name {
            fn from(data: [f64; $n * $n]) -> $name {
                $name { data }
            }
        }

        impl Index<(usize, usize)> for $name {
            type Output = f64;

            fn index(&self, index: (usize, usize)) -> &f64 {
                &self.data[(index.0 * $n) + index.1]
            }
        }

        impl IndexMut<(usize, usize)> for $name {
            fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
                &mut self.data[(index.0 * $n) + index.1]
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &$name) -> bool {
                self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
            }
        }
    }
}

/// Implements cofactor expansion for an `$n`-sized matrix whose submatrices
/// are `$sub` (size `$n - 1`).
macro_rules! cofactor_expansion {
    ($name:ident, $n:expr, $sub:ident) => {
        impl $name {
            /// Removes row `row` and column `col`, yielding a smaller matrix.
            pub(crate) fn submatrix(&self, row: usize, col: usize) -> $sub {
                let mut buf = [0.0; ($n - 1) * ($n - 1)];
                let mut count = 0;

                for r in (0..$n).filter(|&r| r != row) {
                    for c in (0..$n).filter(|&c| c != col) {
                        buf[count] = self[(r, c)];
                        count += 1;
                    }
                }

                $sub::from(buf)
            }

            /// The determinant of the submatrix at `row`, `col`.
            pub fn minor(&self, row: usize, col: usize) -> f64 {
                self.submatrix(row, col).determinant()
            }

            /// The minor at `row`, `col`, negated when `row + col` is odd.
            pub fn cofactor(&self, row: usize, col: usize) -> f64 {
                let m = self.minor(row, col);
                if (row + col) % 2 == 0 { m } else { -m }
            }

            /// Determinant by cofactor expansion along the first row.
            pub fn determinant(&self) -> f64 {
                (0..$n).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
            }
        }
    }
}

square_matrix!(Matrix2D, 2);
square_matrix!(Matrix3D, 3);

cofactor_expansion!(Matrix3D, 3, Matrix2D);
cofactor_expansion!(Matrix4D, 4, Matrix3D);

impl Matrix2D {
    pub(crate) fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

/// A 4x4 matrix.
///
/// Every transformation in the tracer is one of these: shape transforms,
/// pattern transforms and the camera's view transform. Points (`w == 1.0`)
/// pick up translations, vectors (`w == 0.0`) don't.
///
/// Matrices are plain values. Composition is multiplication, which is not
/// commutative; `A * B` applied to a point applies `B` first.
///
/// The 2x2 and 3x3 matrices that show up during cofactor expansion are
/// private to this module.
///
/// # Examples
///
/// ```
/// # use ray_tracer::tuple::Tuple4D;
/// # use ray_tracer::matrix::Matrix4D;
/// let m = Matrix4D::translation(10.0, 5.0, 7.0)
///     * Matrix4D::scaling(5.0, 5.0, 5.0);
/// assert_eq!(m * Tuple4D::point(1.0, 0.0, 1.0), Tuple4D::point(15.0, 5.0, 12.0));
/// ```
#[derive(Copy, Clone, Debug, PartialOrd)]
pub struct Matrix4D {
    data: [f64; 16],
}

impl Default for Matrix4D {
    fn default() -> Matrix4D {
        Matrix4D::identity()
    }
}

/// Element-wise approximate equality.
impl PartialEq for Matrix4D {
    fn eq(&self, other: &Matrix4D) -> bool {
        self.data.iter().zip(other.data.iter()).all(|(x, y)| feq(*x, *y))
    }
}

impl Matrix4D {
    /// A matrix of zeros.
    pub fn zero() -> Matrix4D {
        Matrix4D { data: [0.0; 16] }
    }

    pub fn identity() -> Matrix4D {
        let mut buf = Self::zero();
        for i in 0..4 {
            buf[(i, i)] = 1.0;
        }

        buf
    }

    /// Offsets points by `x`, `y` and `z`. Vectors are unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut trans = Self::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Scales along the X, Y and Z axes. Negative factors reflect.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix4D {
        let mut scale = Self::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Rotation by `r` radians about the X axis.
    ///
    /// ```
    /// # use ray_tracer::tuple::Tuple4D;
    /// # use ray_tracer::matrix::Matrix4D;
    /// let m = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * Tuple4D::point(0.0, 1.0, 0.0), Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation by `r` radians about the Y axis.
    pub fn rotation_y(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Rotation by `r` radians about the Z axis.
    pub fn rotation_z(r: f64) -> Matrix4D {
        let mut rotate = Self::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// A shearing matrix.
    ///
    /// Each parameter moves one component in proportion to another; `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    ///
    /// ```
    /// # use ray_tracer::tuple::Tuple4D;
    /// # use ray_tracer::matrix::Matrix4D;
    /// let m = Matrix4D::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * Tuple4D::point(2.0, 3.0, 4.0), Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix4D {
        let mut shear = Self::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Builds a view transformation for an eye at `from`, looking at `to`,
    /// with `up` roughly pointing up.
    ///
    /// The result moves the *world* in front of the eye; the eye itself stays
    /// at the origin looking down negative Z.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D) -> Matrix4D {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let orientation: Matrix4D = [
                left.x,     left.y,     left.z,    0.0,
             true_up.x,  true_up.y,  true_up.z,    0.0,
            -forward.x, -forward.y, -forward.z,    0.0,
                   0.0,        0.0,        0.0,    1.0,
        ].into();

        orientation * Matrix4D::translation(-from.x, -from.y, -from.z)
    }

    /// Returns the transpose of this matrix, leaving `self` untouched.
    pub fn transposition(&self) -> Matrix4D {
        let mut buf = Self::zero();
        for r in 0..4 {
            for c in 0..4 {
                buf[(c, r)] = self[(r, c)];
            }
        }

        buf
    }

    pub fn is_invertible(&self) -> bool {
        self.determinant() != 0.0
    }

    /// Calculates the inverse of this matrix.
    ///
    /// Each cofactor is divided by the determinant and stored *transposed*,
    /// which yields the adjugate over the determinant. A determinant of
    /// exactly zero is an error.
    pub fn inverse(&self) -> Result<Matrix4D, GeometryError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(GeometryError::NonInvertibleMatrix {
                description: format!("determinant is zero for\n{}", self)
            });
        }

        let mut inv = Matrix4D::zero();
        for r in 0..4 {
            for c in 0..4 {
                inv[(c, r)] = self.cofactor(r, c) / det;
            }
        }

        Ok(inv)
    }
}

impl From<[f64; 16]> for Matrix4D {
    fn from(data: [f64; 16]) -> Matrix4D {
        Matrix4D { data }
    }
}

impl Index<(usize, usize)> for Matrix4D {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.data[(index.0 * 4) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix4D {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.data[(index.0 * 4) + index.1]
    }
}

impl Mul<Matrix4D> for Matrix4D {
    type Output = Matrix4D;

    fn mul(self, other: Matrix4D) -> Matrix4D {
        let mut res = Matrix4D::zero();

        for r in 0..4 {
            for c in 0..4 {
                res[(r, c)] = (0..4).map(|k| self[(r, k)] * other[(k, c)]).sum::<f64>();
            }
        }

        res
    }
}

/// Multiplies a matrix by a `Tuple4D` treated as a column vector.
impl Mul<Tuple4D> for Matrix4D {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        let row = |r: usize| self[(r, 0)] * other.x
            + self[(r, 1)] * other.y
            + self[(r, 2)] * other.z
            + self[(r, 3)] * other.w;

        Tuple4D { x: row(0), y: row(1), z: row(2), w: row(3) }
    }
}

impl fmt::Display for Matrix4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            write!(f, "|")?;
            for c in 0..4 {
                write!(f, " {} |", self[(r, c)])?;
            }

            // No newline after the final row
            if r != 3 {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn identity() {
    let i = Matrix4D::identity();
    let a: Matrix4D = [ 0.0, 1.0,  2.0,  4.0,
                        1.0, 2.0,  4.0,  8.0,
                        2.0, 4.0,  8.0, 16.0,
                        4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * Tuple4D::tuple(1.0, 2.0, 3.0, 4.0),
        Tuple4D::tuple(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn multiply_matrices() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        5.0, 6.0, 7.0, 8.0,
                        9.0, 8.0, 7.0, 6.0,
                        5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix4D = [ -2.0, 1.0, 2.0,  3.0,
                         3.0, 2.0, 1.0, -1.0,
                         4.0, 3.0, 6.0,  5.0,
                         1.0, 2.0, 7.0,  8.0, ].into();

    let ab: Matrix4D = [ 20.0, 22.0,  50.0,  48.0,
                         44.0, 54.0, 114.0, 108.0,
                         40.0, 58.0, 110.0, 102.0,
                         16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, ab);
}

#[test]
fn multiply_matrix_by_tuple() {
    let a: Matrix4D = [ 1.0, 2.0, 3.0, 4.0,
                        2.0, 4.0, 4.0, 2.0,
                        8.0, 6.0, 4.0, 1.0,
                        0.0, 0.0, 0.0, 1.0, ].into();

    assert_eq!(a * Tuple4D::tuple(1.0, 2.0, 3.0, 1.0),
        Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn transpose() {
    let a: Matrix4D = [ 0.0, 9.0, 3.0, 0.0,
                        9.0, 8.0, 0.0, 8.0,
                        1.0, 8.0, 5.0, 3.0,
                        0.0, 0.0, 5.0, 8.0, ].into();

    let t: Matrix4D = [ 0.0, 9.0, 1.0, 0.0,
                        9.0, 8.0, 8.0, 0.0,
                        3.0, 0.0, 5.0, 5.0,
                        0.0, 8.0, 3.0, 8.0, ].into();

    assert_eq!(t, a.transposition());
    assert_eq!(t.transposition(), a);
    assert_eq!(Matrix4D::identity().transposition(), Matrix4D::identity());
}

#[test]
fn mat2_determinant() {
    let a: Matrix2D = [ 1.0, 5.0,
                       -3.0, 2.0 ].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3D = [  1.0, 5.0,  0.0,
                        -3.0, 2.0,  7.0,
                         0.0, 6.0, -3.0, ].into();

    let s: Matrix2D = [ -3.0, 2.0,
                         0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4D = [ -6.0, 1.0,  1.0, 6.0,
                        -8.0, 5.0,  8.0, 6.0,
                        -1.0, 0.0,  8.0, 2.0,
                        -7.0, 1.0, -1.0, 1.0, ].into();

    let s: Matrix3D = [ -6.0,  1.0, 6.0,
                        -8.0,  8.0, 6.0,
                        -7.0, -1.0, 1.0, ].into();

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_minor_and_cofactor() {
    let a: Matrix3D = [ 3.0,  5.0,  0.0,
                        2.0, -1.0, -7.0,
                        6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix3D = [  1.0, 2.0,  6.0,
                        -5.0, 8.0, -4.0,
                         2.0, 6.0,  4.0, ].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix4D = [ -2.0, -8.0,  3.0,  5.0,
                        -3.0,  1.0,  7.0,  3.0,
                         1.0,  2.0, -9.0,  6.0,
                        -6.0,  7.0,  7.0, -9.0, ].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn non_invertible_matrix() {
    let a: Matrix4D = [ -4.0,  2.0, -2.0, -3.0,
                         9.0,  6.0,  2.0,  6.0,
                         0.0, -5.0,  1.0, -5.0,
                         0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), 0.0);
    assert!(!a.is_invertible());
    assert!(a.inverse().is_err());
    assert!(Matrix4D::scaling(1.0, 0.0, 1.0).inverse().is_err());
}

#[test]
fn mat4_inverse() {
    let a: Matrix4D = [ -5.0,  2.0,  6.0, -8.0,
                         1.0, -5.0,  1.0,  8.0,
                         7.0,  7.0, -6.0, -7.0,
                         1.0, -3.0,  7.0,  4.0, ].into();

    let b = a.inverse().unwrap();

    assert_eq!(a.determinant(), 532.0);
    assert_eq!(a.cofactor(2, 3), -160.0);
    assert!(crate::feq(b[(3, 2)], -160.0 / 532.0));
    assert_eq!(a.cofactor(3, 2), 105.0);
    assert!(crate::feq(b[(2, 3)], 105.0 / 532.0));

    let expected: Matrix4D = [
         0.21805,  0.45113,  0.24060, -0.04511,
        -0.80827, -1.45677, -0.44361,  0.52068,
        -0.07895, -0.22368, -0.05263,  0.19737,
        -0.52256, -0.81391, -0.30075,  0.30639, ].into();

    // Expected values are rounded to five places
    for r in 0..4 {
        for c in 0..4 {
            assert!((b[(r, c)] - expected[(r, c)]).abs() < 0.0001);
        }
    }
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4D = [  3.0, -9.0,  7.0,  3.0,
                         3.0,  8.0,  2.0, -9.0,
                        -4.0,  4.0,  4.0,  1.0,
                        -6.0,  5.0, -1.0,  1.0, ].into();

    let b: Matrix4D = [ 8.0,  2.0, 2.0, 2.0,
                        3.0, -1.0, 7.0, 0.0,
                        7.0,  0.0, 5.0, 4.0,
                        6.0, -2.0, 0.0, 5.0  ].into();

    let c = a * b;
    assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn inverse_round_trips() {
    let ms = [
        Matrix4D::translation(5.0, -3.0, 2.0),
        Matrix4D::scaling(2.0, 3.0, 4.0) * Matrix4D::rotation_x(0.7),
        Matrix4D::shearing(1.0, 0.0, 0.5, 0.0, 0.0, 2.0)
            * Matrix4D::rotation_z(1.3),
        Matrix4D::view_transform(
            Tuple4D::point(1.0, 3.0, 2.0),
            Tuple4D::point(4.0, -2.0, 8.0),
            Tuple4D::vector(1.0, 1.0, 0.0)),
    ];

    for m in ms.iter() {
        let inv = m.inverse().unwrap();
        assert_eq!(inv.inverse().unwrap(), *m);
        assert_eq!(*m * inv, Matrix4D::identity());
    }
}

#[test]
fn mat4_translation() {
    let transform = Matrix4D::translation(5.0, -3.0, 2.0);
    let inv = transform.inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
    assert_eq!(inv * point, Tuple4D::point(-8.0, 7.0, 3.0));
    assert_eq!(transform * vector, vector);
}

#[test]
fn mat4_scaling() {
    let transform = Matrix4D::scaling(2.0, 3.0, 4.0);
    let inv = transform.inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-8.0, 18.0, 32.0));
    assert_eq!(inv * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
    assert_eq!(Matrix4D::scaling(-1.0, 1.0, 1.0) * Tuple4D::point(2.0, 3.0, 4.0),
        Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn mat4_rotations() {
    let h = 2.0f64.sqrt() / 2.0;
    let quarter = std::f64::consts::PI / 2.0;
    let eighth = std::f64::consts::PI / 4.0;

    let px = Tuple4D::point(0.0, 1.0, 0.0);
    assert_eq!(Matrix4D::rotation_x(quarter) * px, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(Matrix4D::rotation_x(eighth) * px, Tuple4D::point(0.0, h, h));

    let py = Tuple4D::point(0.0, 0.0, 1.0);
    assert_eq!(Matrix4D::rotation_y(quarter) * py, Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(Matrix4D::rotation_y(eighth) * py, Tuple4D::point(h, 0.0, h));

    let pz = Tuple4D::point(0.0, 1.0, 0.0);
    assert_eq!(Matrix4D::rotation_z(quarter) * pz, Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(Matrix4D::rotation_z(eighth) * pz, Tuple4D::point(-h, h, 0.0));
}

#[test]
fn mat4_shearing() {
    let p = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Tuple4D::point(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Tuple4D::point(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Tuple4D::point(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Tuple4D::point(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Tuple4D::point(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Tuple4D::point(2.0, 3.0, 7.0)),
    ];

    for (s, expected) in cases.iter() {
        let m = Matrix4D::shearing(s[0], s[1], s[2], s[3], s[4], s[5]);
        assert_eq!(m * p, *expected);
    }
}

#[test]
fn chained_transforms() {
    let a = Matrix4D::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix4D::scaling(5.0, 5.0, 5.0);
    let c = Matrix4D::translation(10.0, 5.0, 7.0);

    let t = c * b * a;
    let p = Tuple4D::point(1.0, 0.0, 1.0);

    assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::identity(), Matrix4D::view_transform(from, to, up));
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix4D::view_transform(from, to, up),
        Matrix4D::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let expected: Matrix4D = [ -0.50709, 0.50709,  0.67612, -2.36643,
                                0.76772, 0.60609,  0.12122, -2.82843,
                               -0.35857, 0.59761, -0.71714,  0.00000,
                                0.00000, 0.00000,  0.00000,  1.00000, ].into();

    let view = Matrix4D::view_transform(from, to, up);
    for r in 0..4 {
        for c in 0..4 {
            assert!((view[(r, c)] - expected[(r, c)]).abs() < 0.0001);
        }
    }
}
