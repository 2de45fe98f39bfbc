use std::convert::TryFrom;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple4D;
use crate::matrix::Matrix4D;
use crate::color::Color;
use crate::pattern::Pattern;
use crate::light::{ PointLight, Material };
use crate::shape::Shape;
use crate::world::World;
use crate::camera::Camera;
use crate::error::SceneError;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, GLASS_RI };

/// A world together with the camera that looks at it.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene from a JSON file.
    pub fn from_file(path: &Path) -> Result<Scene, SceneError> {
        let contents = fs::read_to_string(path).map_err(|e|
            SceneError::FailedToRead {
                description: format!("{}: {}", path.display(), e)
            }
        )?;

        info!("Loading scene from {}", path.display());
        contents.parse()
    }

    /// A checkered, mirrored floor with a glassy sphere, a tilted red cube
    /// and an orange cylinder.
    pub fn demo() -> Result<Scene, SceneError> {
        let mut floor = Shape::plane().with_material(Material {
            color: Color::rgb(0.5, 0.5, 0.5),
            specular: 0.0,
            reflective: 0.3,
            pattern: Some(Pattern::checker(Color::white(), Color::black())),
            ..Default::default()
        });
        floor.set_transform(Matrix4D::scaling(10.0, 0.01, 10.0))?;
        if let Some(pattern) = floor.material.pattern.as_mut() {
            pattern.set_transform(Matrix4D::scaling(0.1, 0.1, 0.1))?;
        }

        let middle = Shape::sphere()
            .with_transform(Matrix4D::translation(-0.5, 1.0, 0.5))?
            .with_material(Material {
                color: Color::rgb(1.0, 0.4666, 0.2666),
                diffuse: 0.7,
                specular: 0.3,
                reflective: 0.5,
                transparency: 0.5,
                refractive_index: GLASS_RI,
                ..Default::default()
            });

        let left = Shape::cube()
            .with_transform(Matrix4D::translation(-1.5, 0.33, -0.75)
                * Matrix4D::scaling(0.33, 0.33, 0.33)
                * Matrix4D::rotation_y(std::f64::consts::PI / 4.0))?
            .with_material(Material {
                color: Color::rgb(0.8666, 0.2, 0.2),
                diffuse: 0.7,
                specular: 0.3,
                ..Default::default()
            });

        let right = Shape::cylinder()
            .with_transform(Matrix4D::translation(1.5, 0.0, 0.5)
                * Matrix4D::scaling(0.5, 1.0, 0.5))?
            .with_material(Material {
                color: Color::rgb(1.0, 0.6666, 0.2666),
                diffuse: 0.7,
                specular: 0.3,
                reflective: 0.2,
                ..Default::default()
            });

        let world = World {
            objects: vec![floor, middle, left, right],
            lights: vec![PointLight::default()],
        };

        let camera = Camera::new(CANVAS_WIDTH, CANVAS_HEIGHT,
            std::f64::consts::PI / 3.0)
            .with_transform(Matrix4D::view_transform(
                Tuple4D::point(0.0, 1.5, -5.0),
                Tuple4D::point(0.0, 1.0, 0.0),
                Tuple4D::vector(0.0, 1.0, 0.0),
            ))?;

        Ok(Scene { world, camera })
    }
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(s).map_err(|e|
            SceneError::FailedToParse { description: e.to_string() }
        )?;

        Scene::try_from(scene_json)
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        if scene_json.canvas_width == 0 || scene_json.canvas_height == 0 {
            return Err(invalid("canvas dimensions must be non-zero"));
        }

        if !(scene_json.field_of_view > 0.0) {
            return Err(invalid("field of view must be positive"));
        }

        let from = point(scene_json.camera_from);
        let to = point(scene_json.camera_to);
        let up = vector(scene_json.camera_up);

        // A camera looking at itself, or with `up` parallel to its line of
        // sight, has no orientation
        (to - from).try_normalize()?;
        (to - from).cross(&up).try_normalize()?;

        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            scene_json.field_of_view,
        ).with_transform(Matrix4D::view_transform(from, to, up))?;

        let mut world = World::empty();
        world.lights = scene_json.lights.iter()
            .map(|l| PointLight::new(color(l.intensity), point(l.position)))
            .collect();
        world.objects = scene_json.shapes.into_iter()
            .map(Shape::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if world.lights.is_empty() {
            warn!("Scene has no lights; every surface will render black");
        }

        debug!("Loaded scene with {} objects and {} lights",
            world.objects.len(), world.lights.len());

        Ok(Scene { world, camera })
    }
}

fn invalid(description: &str) -> SceneError {
    SceneError::InvalidScene { description: description.to_string() }
}

fn point(v: [f64; 3]) -> Tuple4D {
    Tuple4D::point(v[0], v[1], v[2])
}

fn vector(v: [f64; 3]) -> Tuple4D {
    Tuple4D::vector(v[0], v[1], v[2])
}

fn color(v: [f64; 3]) -> Color {
    Color::rgb(v[0], v[1], v[2])
}

/// The JSON layout of a scene file.
#[derive(Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: [f64; 3],
    camera_to: [f64; 3],
    camera_up: [f64; 3],

    #[serde(default)]
    lights: Vec<LightJson>,

    #[serde(default)]
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct LightJson {
    intensity: [f64; 3],
    position: [f64; 3],
}

/// One step of an object or pattern transform.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
}

impl From<TransformJson> for Matrix4D {
    fn from(t: TransformJson) -> Matrix4D {
        match t {
            TransformJson::Translate(v) => Matrix4D::translation(v[0], v[1], v[2]),
            TransformJson::Scale(v) => Matrix4D::scaling(v[0], v[1], v[2]),
            TransformJson::RotateX(r) => Matrix4D::rotation_x(r),
            TransformJson::RotateY(r) => Matrix4D::rotation_y(r),
            TransformJson::RotateZ(r) => Matrix4D::rotation_z(r),
            TransformJson::Shear(s) =>
                Matrix4D::shearing(s[0], s[1], s[2], s[3], s[4], s[5]),
        }
    }
}

/// Chains transforms so the first listed is applied first.
fn compose(transforms: &[TransformJson]) -> Matrix4D {
    transforms.iter().fold(Matrix4D::identity(), |acc, t| {
        Matrix4D::from(*t) * acc
    })
}

#[derive(Clone, Serialize, Deserialize)]
pub struct PatternJson {
    ty: String,
    a: [f64; 3],
    b: [f64; 3],

    #[serde(default)]
    transforms: Vec<TransformJson>,
}

impl TryFrom<PatternJson> for Pattern {
    type Error = SceneError;

    fn try_from(pattern_json: PatternJson) -> Result<Pattern, SceneError> {
        let a = color(pattern_json.a);
        let b = color(pattern_json.b);

        let pattern = match pattern_json.ty.as_str() {
            "stripe" => Pattern::stripe(a, b),
            "gradient" => Pattern::gradient(a, b),
            "ring" => Pattern::ring(a, b),
            "checker" => Pattern::checker(a, b),
            "spherical_checker" => Pattern::spherical_checker(a, b),
            other => return Err(SceneError::InvalidScene {
                description: format!("unrecognized pattern type \"{}\"", other)
            }),
        };

        Ok(pattern.with_transform(compose(&pattern_json.transforms))?)
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct MaterialJson {
    color: Option<[f64; 3]>,
    pattern: Option<PatternJson>,

    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,

    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<f64>,
}

/// Unset fields keep their `Material::default()` values.
impl TryFrom<MaterialJson> for Material {
    type Error = SceneError;

    fn try_from(material_json: MaterialJson) -> Result<Material, SceneError> {
        let defaults = Material::default();

        let pattern = match material_json.pattern {
            Some(p) => Some(Pattern::try_from(p)?),
            None => None,
        };

        let m = Material {
            color: material_json.color.map_or(defaults.color, color),
            pattern,
            ambient: material_json.ambient.unwrap_or(defaults.ambient),
            diffuse: material_json.diffuse.unwrap_or(defaults.diffuse),
            specular: material_json.specular.unwrap_or(defaults.specular),
            shininess: material_json.shininess.unwrap_or(defaults.shininess),
            reflective: material_json.reflective.unwrap_or(defaults.reflective),
            transparency: material_json.transparency
                .unwrap_or(defaults.transparency),
            refractive_index: material_json.refractive_index
                .unwrap_or(defaults.refractive_index),
        };

        if !(0.0..=1.0).contains(&m.reflective) {
            return Err(invalid("reflective must lie in [0, 1]"));
        }

        if !(0.0..=1.0).contains(&m.transparency) {
            return Err(invalid("transparency must lie in [0, 1]"));
        }

        if !(m.refractive_index > 0.0) {
            return Err(invalid("refractive index must be positive"));
        }

        Ok(m)
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ShapeJson {
    ty: String,

    #[serde(default)]
    transforms: Vec<TransformJson>,

    #[serde(default)]
    material: MaterialJson,
}

impl TryFrom<ShapeJson> for Shape {
    type Error = SceneError;

    fn try_from(shape_json: ShapeJson) -> Result<Shape, SceneError> {
        let shape = match shape_json.ty.as_str() {
            "sphere" => Shape::sphere(),
            "plane" => Shape::plane(),
            "cube" => Shape::cube(),
            "cylinder" => Shape::cylinder(),
            other => return Err(SceneError::InvalidScene {
                description: format!("unrecognized shape type \"{}\"", other)
            }),
        };

        let material = Material::try_from(shape_json.material)?;
        Ok(shape.with_transform(compose(&shape_json.transforms))?
            .with_material(material))
    }
}

#[cfg(test)]
const MINIMAL_SCENE: &str = r#"{
    "canvas_width": 11,
    "canvas_height": 11,
    "field_of_view": 1.5707963267948966,
    "camera_from": [0, 0, -5],
    "camera_to": [0, 0, 0],
    "camera_up": [0, 1, 0],
    "lights": [{"intensity": [1, 1, 1], "position": [-10, 10, -10]}],
    "shapes": [
        {"ty": "sphere",
         "material": {"color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2}},
        {"ty": "sphere", "transforms": [{"scale": [0.5, 0.5, 0.5]}]}
    ]
}"#;

#[test]
fn parse_minimal_scene() {
    let scene: Scene = MINIMAL_SCENE.parse().unwrap();

    assert_eq!(scene.camera.hsize, 11);
    assert_eq!(scene.camera.vsize, 11);
    assert_eq!(scene.world.lights, World::default().lights);
    assert_eq!(scene.world.objects, World::default().objects);
}

#[test]
fn parsed_scene_renders_like_default_world() {
    let scene: Scene = MINIMAL_SCENE.parse().unwrap();
    let image = scene.camera.render(&scene.world);

    assert_eq!(image.read_pixel(5, 5), Some(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn transforms_apply_in_listed_order() {
    let json = r#"[
        {"translate": [1, 0, 0]},
        {"scale": [2, 2, 2]},
        {"rotate_z": 0.0}
    ]"#;
    let transforms: Vec<TransformJson> = serde_json::from_str(json).unwrap();
    let m = compose(&transforms);

    assert_eq!(m * Tuple4D::point(1.0, 1.0, 1.0), Tuple4D::point(4.0, 2.0, 2.0));
}

#[test]
fn material_fields_default_when_missing() {
    let m = Material::try_from(MaterialJson {
        reflective: Some(0.5),
        ..Default::default()
    }).unwrap();

    assert_eq!(m, Material { reflective: 0.5, ..Default::default() });
}

#[test]
fn parse_material_pattern() {
    let json = r#"{"ty": "plane", "material": {"pattern": {
        "ty": "stripe", "a": [1, 1, 1], "b": [0, 0, 0],
        "transforms": [{"scale": [0.5, 0.5, 0.5]}]
    }}}"#;
    let shape_json: ShapeJson = serde_json::from_str(json).unwrap();
    let shape = Shape::try_from(shape_json).unwrap();

    let expected = Pattern::stripe(Color::white(), Color::black())
        .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5)).unwrap();
    assert_eq!(shape.material.pattern, Some(expected));
}

#[test]
fn parse_spherical_checker_pattern() {
    let json = r#"{"ty": "sphere", "material": {"pattern": {
        "ty": "spherical_checker", "a": [1, 1, 1], "b": [0, 0, 0]
    }}}"#;
    let shape_json: ShapeJson = serde_json::from_str(json).unwrap();
    let shape = Shape::try_from(shape_json).unwrap();

    assert_eq!(shape.material.pattern,
        Some(Pattern::spherical_checker(Color::white(), Color::black())));
}

#[test]
fn unknown_shape_type_is_rejected() {
    let json = MINIMAL_SCENE.replace("\"ty\": \"sphere\", \"transforms\"",
        "\"ty\": \"teapot\", \"transforms\"");

    match json.parse::<Scene>() {
        Err(SceneError::InvalidScene { .. }) => (),
        _ => panic!("expected an invalid scene"),
    }
}

#[test]
fn malformed_vector_fails_to_parse() {
    let json = MINIMAL_SCENE.replace("[0, 0, -5]", "[0, -5]");

    match json.parse::<Scene>() {
        Err(SceneError::FailedToParse { .. }) => (),
        _ => panic!("expected a parse failure"),
    }
}

#[test]
fn singular_transform_is_rejected() {
    let json = MINIMAL_SCENE.replace("[0.5, 0.5, 0.5]", "[0.5, 0, 0.5]");

    match json.parse::<Scene>() {
        Err(SceneError::InvalidScene { .. }) => (),
        _ => panic!("expected an invalid scene"),
    }
}

#[test]
fn degenerate_camera_is_rejected() {
    let json = MINIMAL_SCENE.replace("[0, 0, -5]", "[0, 0, 0]");

    assert!(json.parse::<Scene>().is_err());
}

#[test]
fn missing_file_fails_to_read() {
    match Scene::from_file(Path::new("/nonexistent/scene.json")) {
        Err(SceneError::FailedToRead { .. }) => (),
        _ => panic!("expected a read failure"),
    }
}

#[test]
fn demo_scene_builds() {
    let scene = Scene::demo().unwrap();

    assert_eq!(scene.world.objects.len(), 4);
    assert_eq!(scene.world.lights.len(), 1);
    assert_eq!(scene.camera.hsize, CANVAS_WIDTH);
}
