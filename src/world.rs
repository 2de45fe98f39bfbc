use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::light::{ PointLight, Material, lighting };
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world with objects and lights.
///
/// Worlds collect every shape and light in a scene; most of the shading logic
/// lives here. A `World` is built up mutably and then only borrowed during a
/// render, so any number of render threads may share one.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub lights: Vec<PointLight>,
}

/// Two concentric spheres lit from the upper left. The outer one is a unit
/// sphere with a green-ish material; the inner one is half its size.
impl Default for World {
    fn default() -> World {
        let outer = Shape::sphere().with_material(Material {
            color: Color::rgb(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Default::default()
        });

        let inner = Shape::sphere().with_inverted_transform(
            Matrix4D::scaling(0.5, 0.5, 0.5),
            Matrix4D::scaling(2.0, 2.0, 2.0),
        );

        World {
            objects: vec![outer, inner],
            lights: vec![PointLight::default()],
        }
    }
}

impl World {
    /// Creates the default two-sphere world.
    pub fn new() -> World {
        Default::default()
    }

    /// Creates a world with no objects and no lights.
    pub fn empty() -> World {
        World { objects: Vec::new(), lights: Vec::new() }
    }

    /// The light used for shadow tests, if any.
    pub fn light(&self) -> Option<&PointLight> {
        self.lights.first()
    }

    /// Intersects a ray against every object, sorted by ascending `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections {
        let mut xs = Intersections::new();
        for obj in self.objects.iter() {
            xs.append(obj.intersect(r));
        }

        xs.sort();
        xs
    }

    /// Whether something lies between `p` and the world's first light.
    /// Nothing is shadowed in a world without lights.
    pub fn is_shadowed(&self, p: Tuple4D) -> bool {
        match self.light() {
            Some(light) => self.is_shadowed_from(light, p),
            None => false,
        }
    }

    /// Whether something lies between `p` and `light`.
    pub fn is_shadowed_from(&self, light: &PointLight, p: Tuple4D) -> bool {
        let v = light.position - p;
        let distance = v.magnitude();
        let r = Ray4D::new(p, v.normalize());

        match self.intersect(&r).hit() {
            Some(i) => i.t < distance,
            None => false,
        }
    }

    /// The color at a prepared hit: direct lighting from every light plus
    /// reflected and refracted contributions.
    ///
    /// Only the first light casts shadows. Its shadow flag is applied to
    /// every light's contribution.
    ///
    /// `remaining` bounds the reflection/refraction recursion. A material that
    /// is both reflective and transparent mixes the two by its Schlick
    /// reflectance.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Color {
        let shadowed = self.is_shadowed(comps.over_point);
        let surface = self.lights.iter().fold(Color::black(), |acc, light| {
            acc + lighting(comps.obj, light, comps.over_point,
                comps.eyev, comps.normalv, shadowed)
        });

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        let m = comps.obj.material();
        if m.reflective > 0.0 && m.transparency > 0.0 {
            let reflectance = comps.schlick();
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// The color seen in a reflective surface at a hit.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let reflective = comps.obj.material().reflective;
        if reflective == 0.0 {
            return Color::black();
        }

        if remaining == 0 {
            trace!("Recursion depth exhausted while reflecting at t = {}", comps.t);
            return Color::black();
        }

        let r = Ray4D::new(comps.over_point, comps.reflectv);
        self.color_at(&r, remaining - 1) * reflective
    }

    /// The color seen through a transparent surface at a hit. Black under
    /// total internal reflection.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Color {
        let transparency = comps.obj.material().transparency;
        if transparency == 0.0 {
            return Color::black();
        }

        if remaining == 0 {
            trace!("Recursion depth exhausted while refracting at t = {}", comps.t);
            return Color::black();
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));
        if sin2_t > 1.0 {
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t)
            - comps.eyev * n_ratio;

        let r = Ray4D::new(comps.under_point, direction);
        self.color_at(&r, remaining - 1) * transparency
    }

    /// The color seen along a ray; black when it hits nothing.
    pub fn color_at(&self, r: &Ray4D, remaining: usize) -> Color {
        let mut xs = self.intersect(r);

        match xs.hit() {
            None => Color::black(),
            Some(hit) => {
                let comps = IntersectionComputation::new(r, &hit, &xs);
                self.shade_hit(&comps, remaining)
            },
        }
    }
}

#[cfg(test)]
fn assert_color_near(actual: Color, expected: Color) {
    let near = |a: f64, b: f64| (a - b).abs() < 0.001;
    assert!(
        near(actual.r, expected.r)
            && near(actual.g, expected.g)
            && near(actual.b, expected.b),
        "{:?} is not close to {:?}", actual, expected
    );
}

#[cfg(test)]
fn ray(origin: Tuple4D, direction: Tuple4D) -> Ray4D {
    Ray4D::new(origin, direction)
}

#[test]
fn default_world() {
    let w = World::default();

    assert_eq!(w.objects.len(), 2);
    assert_eq!(w.lights, vec![PointLight::new(
        Color::white(), Tuple4D::point(-10.0, 10.0, -10.0)
    )]);
    assert_eq!(w.objects[0].material.color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(*w.objects[1].transform(), Matrix4D::scaling(0.5, 0.5, 0.5));
    assert_eq!(w.objects[1].world_to_object(Tuple4D::point(0.5, 0.0, 0.0)),
        Tuple4D::point(1.0, 0.0, 0.0));
}

#[test]
fn intersect_default_world_with_ray() {
    let w = World::default();
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    let xs = w.intersect(&r);
    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    use crate::intersect::Intersection;

    let w = World::default();
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[0]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    use crate::intersect::Intersection;

    let mut w = World::default();
    w.lights = vec![
        PointLight::new(Color::white(), Tuple4D::point(0.0, 0.25, 0.0))
    ];

    let r = ray(Tuple4D::origin(), Tuple4D::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(0.5, &w.objects[1]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_color_near(w.shade_hit(&comps, 5), Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    use crate::intersect::Intersection;

    let mut w = World::empty();
    w.lights.push(PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0)));
    w.objects.push(Shape::sphere());
    w.objects.push(Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0)).unwrap());

    let r = ray(Tuple4D::point(0.0, 0.0, 5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, &w.objects[1]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn shade_hit_sums_every_light() {
    use crate::intersect::Intersection;

    let single = World::default();
    let mut w = World::default();
    w.lights.push(PointLight::default());

    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    let i = Intersection::new(4.0, &single.objects[0]);
    let xs = Intersections::from(vec![i]);
    let once = single.shade_hit(&IntersectionComputation::new(&r, &i, &xs), 5);

    let i = Intersection::new(4.0, &w.objects[0]);
    let xs = Intersections::from(vec![i]);
    let twice = w.shade_hit(&IntersectionComputation::new(&r, &i, &xs), 5);

    assert_eq!(twice, once * 2.0);
}

#[test]
fn only_first_light_casts_shadows() {
    use crate::intersect::Intersection;

    let mut w = World::empty();
    w.lights.push(PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0)));
    w.lights.push(PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, 20.0)));
    w.objects.push(Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 5.0)).unwrap());

    // The hit faces the second light and is hidden from the first
    let r = ray(Tuple4D::point(0.0, 0.0, 10.0), Tuple4D::vector(0.0, 0.0, -1.0));
    let i = Intersection::new(4.0, &w.objects[0]);
    let xs = Intersections::from(vec![i]);
    let comps = IntersectionComputation::new(&r, &i, &xs);

    assert!(w.is_shadowed(comps.over_point));
    assert!(!w.is_shadowed_from(&w.lights[1], comps.over_point));
    assert_eq!(w.shade_hit(&comps, 5), Color::rgb(0.2, 0.2, 0.2));
}

#[test]
fn world_without_lights_is_black() {
    let mut w = World::default();
    w.lights.clear();

    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    assert_eq!(w.color_at(&r, 5), Color::black());
    assert!(!w.is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)));
}

#[test]
fn color_ray_miss() {
    let w = World::default();
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r, 5), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = World::default();
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r, 5), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w = World::default();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = ray(Tuple4D::point(0.0, 0.0, 0.75), Tuple4D::vector(0.0, 0.0, -1.0));

    assert_eq!(w.color_at(&r, 5), w.objects[1].material.color);
}

#[test]
fn shadow_collinear_point_and_light() {
    let w = World::default();
    assert!(!w.is_shadowed(Tuple4D::point(0.0, 10.0, 0.0)));
}

#[test]
fn shadow_object_between_point_and_light() {
    let w = World::default();
    assert!(w.is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)));
}

#[test]
fn shadow_object_behind_light() {
    let w = World::default();
    assert!(!w.is_shadowed(Tuple4D::point(-20.0, 20.0, -20.0)));
}

#[test]
fn shadow_object_behind_point() {
    let w = World::default();
    assert!(!w.is_shadowed(Tuple4D::point(-2.0, 2.0, -2.0)));
}

#[test]
fn shadow_lifts_when_occluder_removed() {
    let mut w = World::default();
    let p = Tuple4D::point(10.0, -10.0, 10.0);
    assert!(w.is_shadowed(p));

    w.objects.clear();
    assert!(!w.is_shadowed(p));
}

#[test]
fn reflected_color_for_nonreflective_material() {
    use crate::intersect::Intersection;

    let mut w = World::default();
    w.objects[1].material.ambient = 1.0;

    let r = ray(Tuple4D::origin(), Tuple4D::vector(0.0, 0.0, 1.0));
    let i = Intersection::new(1.0, &w.objects[1]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_eq!(w.reflected_color(&comps, 5), Color::black());
}

#[cfg(test)]
fn world_with_mirror_floor() -> World {
    let mut w = World::default();
    let mut floor = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap();
    floor.material.reflective = 0.5;
    w.objects.push(floor);
    w
}

#[test]
fn reflected_color_for_reflective_material() {
    use crate::intersect::Intersection;

    let w = world_with_mirror_floor();
    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -h, h));
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_color_near(w.reflected_color(&comps, 5),
        Color::rgb(0.19032, 0.2379, 0.14274));
}

#[test]
fn shade_hit_with_reflective_material() {
    use crate::intersect::Intersection;

    let w = world_with_mirror_floor();
    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -h, h));
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_color_near(w.shade_hit(&comps, 5),
        Color::rgb(0.87677, 0.92436, 0.82918));
}

#[test]
fn reflected_color_at_maximum_depth() {
    use crate::intersect::Intersection;

    let w = world_with_mirror_floor();
    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -h, h));
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections::from(vec![i]);

    let comps = IntersectionComputation::new(&r, &i, &xs);
    assert_eq!(w.reflected_color(&comps, 0), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::empty();
    w.lights.push(PointLight::new(Color::white(), Tuple4D::origin()));

    let mut lower = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap();
    lower.material.reflective = 1.0;

    let mut upper = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0)).unwrap();
    upper.material.reflective = 1.0;

    w.objects.push(lower);
    w.objects.push(upper);

    let r = ray(Tuple4D::origin(), Tuple4D::vector(0.0, 1.0, 0.0));
    let c = w.color_at(&r, crate::consts::RECURSION_DEPTH);

    assert!(c.r.is_finite() && c.g.is_finite() && c.b.is_finite());
}

#[test]
fn refracted_color_with_opaque_surface() {
    use crate::intersect::Intersection;

    let w = World::default();
    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let xs = Intersections::from(vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ]);

    let comps = IntersectionComputation::new(&r, &xs[0], &xs);
    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn refracted_color_at_maximum_depth() {
    use crate::intersect::Intersection;

    let mut w = World::default();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;

    let r = ray(Tuple4D::point(0.0, 0.0, -5.0), Tuple4D::vector(0.0, 0.0, 1.0));
    let xs = Intersections::from(vec![
        Intersection::new(4.0, &w.objects[0]),
        Intersection::new(6.0, &w.objects[0]),
    ]);

    let comps = IntersectionComputation::new(&r, &xs[0], &xs);
    assert_eq!(w.refracted_color(&comps, 0), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    use crate::intersect::Intersection;

    let mut w = World::default();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;

    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, h), Tuple4D::vector(0.0, 1.0, 0.0));
    let xs = Intersections::from(vec![
        Intersection::new(-h, &w.objects[0]),
        Intersection::new(h, &w.objects[0]),
    ]);

    // Inside the sphere, so look at the second intersection
    let comps = IntersectionComputation::new(&r, &xs[1], &xs);
    assert_eq!(w.refracted_color(&comps, 5), Color::black());
}

#[test]
fn refracted_color_with_refracted_ray() {
    use crate::intersect::Intersection;
    use crate::pattern::Pattern;

    let mut w = World::default();
    w.objects[0].material.ambient = 1.0;
    w.objects[0].material.pattern = Some(Pattern::test());
    w.objects[1].material.transparency = 1.0;
    w.objects[1].material.refractive_index = 1.5;

    let r = ray(Tuple4D::point(0.0, 0.0, 0.1), Tuple4D::vector(0.0, 1.0, 0.0));
    let xs = Intersections::from(vec![
        Intersection::new(-0.9899, &w.objects[0]),
        Intersection::new(-0.4899, &w.objects[1]),
        Intersection::new(0.4899, &w.objects[1]),
        Intersection::new(0.9899, &w.objects[0]),
    ]);

    let comps = IntersectionComputation::new(&r, &xs[2], &xs);
    assert_color_near(w.refracted_color(&comps, 5),
        Color::rgb(0.0, 0.99888, 0.04725));
}

#[cfg(test)]
fn world_with_glass_floor_and_ball() -> World {
    let mut w = World::default();

    let mut floor = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0)).unwrap();
    floor.material.transparency = 0.5;
    floor.material.refractive_index = 1.5;

    let ball = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5)).unwrap()
        .with_material(Material {
            color: Color::rgb(1.0, 0.0, 0.0),
            ambient: 0.5,
            ..Default::default()
        });

    w.objects.push(floor);
    w.objects.push(ball);
    w
}

#[test]
fn shade_hit_with_transparent_material() {
    use crate::intersect::Intersection;

    let w = world_with_glass_floor_and_ball();
    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -h, h));
    let xs = Intersections::from(vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ]);

    let comps = IntersectionComputation::new(&r, &xs[0], &xs);
    assert_color_near(w.shade_hit(&comps, 5),
        Color::rgb(0.93642, 0.68642, 0.68642));
}

#[test]
fn shade_hit_with_reflective_transparent_material() {
    use crate::intersect::Intersection;

    let mut w = world_with_glass_floor_and_ball();
    w.objects[2].material.reflective = 0.5;

    let h = 2.0f64.sqrt() / 2.0;
    let r = ray(Tuple4D::point(0.0, 0.0, -3.0), Tuple4D::vector(0.0, -h, h));
    let xs = Intersections::from(vec![
        Intersection::new(2.0f64.sqrt(), &w.objects[2]),
    ]);

    let comps = IntersectionComputation::new(&r, &xs[0], &xs);
    assert_color_near(w.shade_hit(&comps, 5),
        Color::rgb(0.93391, 0.69643, 0.69243));
}

#[test]
fn worlds_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<World>();
}
