use rayon::prelude::*;

use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::world::World;
use crate::canvas::Canvas;
use crate::error::GeometryError;
use crate::consts::RECURSION_DEPTH;

/// A pinhole camera looking down `-z` in its own space.
///
/// The canvas sits one unit in front of the eye. `transform` orients the
/// world relative to the camera, typically a `Matrix4D::view_transform`.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resulting canvas, in pixels.
    pub hsize: usize,

    /// The vertical size of the resulting canvas, in pixels.
    pub vsize: usize,

    /// The angle, in radians, describing how much the camera can see.
    pub field_of_view: f64,

    /// How deep reflection and refraction may recurse per pixel.
    pub depth: usize,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    transform: Matrix4D,
    inverse: Matrix4D,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2.0 / (hsize as f64);
        Camera {
            hsize,
            vsize,
            field_of_view,
            depth: RECURSION_DEPTH,
            half_width,
            half_height,
            pixel_size,
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    /// The world-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Assigns the view transform, failing if it cannot be inverted.
    pub fn set_transform(&mut self, transform: Matrix4D)
        -> Result<(), GeometryError> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder form of `set_transform`.
    pub fn with_transform(mut self, transform: Matrix4D)
        -> Result<Camera, GeometryError> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// The world-space ray through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray4D {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let pixel = self.inverse * Tuple4D::point(world_x, world_y, -1.0);
        let origin = self.inverse * Tuple4D::origin();
        let direction = (pixel - origin).normalize();

        Ray4D::new(origin, direction)
    }

    fn render_row(&self, w: &World, y: usize, row: &mut [Color]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            let ray = self.ray_for_pixel(x, y);
            *pixel = w.color_at(&ray, self.depth);
        }
    }

    /// Renders `w` one pixel at a time on the calling thread.
    pub fn render(&self, w: &World) -> Canvas {
        info!("Rendering {}x{} image with {} objects and {} lights",
            self.hsize, self.vsize, w.objects.len(), w.lights.len());

        let mut image = Canvas::new(self.hsize, self.vsize);
        if self.hsize == 0 {
            return image;
        }

        for (y, row) in image.pixels_mut().chunks_mut(self.hsize).enumerate() {
            self.render_row(w, y, row);
            trace!("Rendered row {}/{}", y + 1, self.vsize);
        }

        info!("Finished rendering");
        image
    }

    /// Renders `w` with one rayon task per row. The output is identical to
    /// `render`.
    pub fn render_parallel(&self, w: &World) -> Canvas {
        info!("Rendering {}x{} image with {} objects and {} lights on {} threads",
            self.hsize, self.vsize, w.objects.len(), w.lights.len(),
            rayon::current_num_threads());

        let mut image = Canvas::new(self.hsize, self.vsize);
        if self.hsize == 0 {
            return image;
        }

        image.pixels_mut().par_chunks_mut(self.hsize).enumerate()
            .for_each(|(y, row)| {
                self.render_row(w, y, row);
                trace!("Rendered row {}/{}", y + 1, self.vsize);
            });

        info!("Finished rendering");
        image
    }
}

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, std::f64::consts::PI / 2.0);

    assert_eq!(c.hsize, 160);
    assert_eq!(c.vsize, 120);
    assert_eq!(c.field_of_view, std::f64::consts::PI / 2.0);
    assert_eq!(c.depth, RECURSION_DEPTH);
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, std::f64::consts::PI / 2.0);
    assert!((c.pixel_size() - 0.01).abs() < 1e-9);
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, std::f64::consts::PI / 2.0);
    assert!((c.pixel_size() - 0.01).abs() < 1e-9);
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0)
        .with_transform(Matrix4D::rotation_y(std::f64::consts::PI / 4.0)
            * Matrix4D::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn singular_camera_transform_is_rejected() {
    let mut c = Camera::new(10, 10, std::f64::consts::PI / 2.0);

    assert!(c.set_transform(Matrix4D::zero()).is_err());
    assert_eq!(*c.transform(), Matrix4D::identity());
}

#[cfg(test)]
fn default_view() -> Camera {
    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    Camera::new(11, 11, std::f64::consts::PI / 2.0)
        .with_transform(Matrix4D::view_transform(from, to, up))
        .unwrap()
}

#[test]
fn render_world_with_camera() {
    let w = World::default();
    let image = default_view().render(&w);

    assert_eq!(image.read_pixel(5, 5), Some(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn parallel_render_matches_sequential() {
    let w = World::default();
    let c = default_view();

    let sequential = c.render(&w);
    let parallel = c.render_parallel(&w);

    assert_eq!(parallel.read_pixel(5, 5), Some(Color::rgb(0.38066, 0.47583, 0.2855)));
    assert_eq!(sequential, parallel);
}
