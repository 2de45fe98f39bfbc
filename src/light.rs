use crate::color::Color;
use crate::pattern::Pattern;
use crate::tuple::Tuple4D;
use crate::shape::Shape;
use crate::consts::VACUUM_RI;

/// A point light: a position and the color/intensity it emits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl Default for PointLight {
    fn default() -> PointLight {
        PointLight::new(Color::white(), Tuple4D::point(-10.0, 10.0, -10.0))
    }
}

impl PointLight {
    /// Creates a point light. `position` is forced to be a point.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        position.w = 1.0;

        PointLight { intensity, position }
    }
}

/// Surface properties for the Phong reflection model, plus the reflective
/// and refractive parameters used by `World`.
///
/// `reflective` and `transparency` lie in `[0, 1]`; `refractive_index` is
/// positive, 1.0 being vacuum. Equality is structural.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub pattern: Option<Pattern>,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),
            pattern: None,

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            transparency: 0.0,
            refractive_index: VACUUM_RI,
        }
    }
}

impl Material {
    /// A clear, glass-like material.
    pub fn glass() -> Material {
        Material {
            transparency: 1.0,
            refractive_index: crate::consts::GLASS_RI,
            ..Default::default()
        }
    }
}

/// Phong shading of `point` on `obj` under a single light.
///
/// The surface color comes from the material's pattern when it has one,
/// otherwise from its flat color. A shadowed point only receives the ambient
/// term. Diffuse and specular drop to black when the light is behind the
/// surface, and specular also drops when the reflection points away from the
/// eye.
pub fn lighting(obj: &Shape, light: &PointLight, point: Tuple4D,
    eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> Color {
    let m = obj.material();

    let color = match m.pattern {
        Some(ref pattern) => pattern.pattern_at_shape(obj, point),
        None => m.color,
    };

    let effective_color = color * light.intensity;
    let ambient = effective_color * m.ambient;

    if in_shadow {
        return ambient;
    }

    let lightv = (light.position - point).normalize();

    // Negative means the light is on the other side of the surface
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        return ambient;
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    let reflectv = (-lightv).reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);

    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        light.intensity * m.specular * reflect_dot_eye.powf(m.shininess)
    };

    ambient + diffuse + specular
}

#[cfg(test)]
fn lit(eyev: Tuple4D, light_position: Tuple4D, in_shadow: bool) -> Color {
    let s = Shape::sphere();
    let light = PointLight::new(Color::white(), light_position);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    lighting(&s, &light, Tuple4D::origin(), eyev, normalv, in_shadow)
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
    assert!(m.pattern.is_none());
}

#[test]
fn eye_between_light_and_surface() {
    let res = lit(Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, -10.0), false);

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let h = 2.0f64.sqrt() / 2.0;
    let res = lit(Tuple4D::vector(0.0, h, -h),
        Tuple4D::point(0.0, 0.0, -10.0), false);

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_surface_light_offset_45() {
    let res = lit(Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 10.0, -10.0), false);

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let h = 2.0f64.sqrt() / 2.0;
    let res = lit(Tuple4D::vector(0.0, -h, -h),
        Tuple4D::point(0.0, 10.0, -10.0), false);

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let res = lit(Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, 10.0), false);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let res = lit(Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::point(0.0, 0.0, -10.0), true);

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_with_stripe_pattern() {
    let mut s = Shape::sphere();
    s.material = Material {
        pattern: Some(Pattern::stripe(Color::white(), Color::black())),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };

    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, -10.0)
    );

    assert_eq!(
        lighting(&s, &light, Tuple4D::point(0.9, 0.0, 0.0),
            eyev, normalv, false),
        Color::white()
    );

    assert_eq!(
        lighting(&s, &light, Tuple4D::point(1.1, 0.0, 0.0),
            eyev, normalv, false),
        Color::black()
    );
}
