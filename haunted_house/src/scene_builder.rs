//! Haunted house scene construction
//!
//! ```text
//! root
//! ├── ground
//! ├── house
//! │    ├── walls, roof, door
//! │    ├── bush 1-4
//! │    └── door light
//! ├── graves
//! │    └── grave 1-N
//! ├── ambient light, moonlight
//! ├── ghost 1-3
//! └── sky
//! ```

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use haunt_engine::assets::{TextureHandle, TextureLibrary, TextureLoader};
use haunt_engine::foundation::math::{Transform, Vec3};
use haunt_engine::scene::{
    FogHandle, Geometry, GeometryHandle, Light, LightHandle, MaterialHandle, NodeId, SceneGraph, SceneNode,
    ShadowFlags,
};
use haunt_engine::AppError;
use rand::Rng;

use crate::assets::{load_surfaces, Surface};
use crate::config::{GraveLayout, HauntedConfig};
use crate::ghosts::Ghost;

const WALL_HEIGHT: f32 = 2.5;
const ROOF_HEIGHT: f32 = 1.5;

/// Bush placements as (scale, position)
const BUSHES: [(f32, [f32; 3]); 4] = [
    (0.5, [1.8, 0.2, 2.2]),
    (0.25, [2.2, 0.1, 2.6]),
    (0.4, [-1.8, 0.1, 2.2]),
    (0.15, [-2.2, 0.05, 2.6]),
];

/// The built scene and handles to everything the app edits later
#[derive(Debug)]
pub struct HauntedScene {
    /// Scene graph
    pub graph: SceneGraph,
    /// House group
    pub house: NodeId,
    /// Graves group
    pub graves: NodeId,
    /// Materials by surface
    pub materials: BTreeMap<Surface, MaterialHandle>,
    /// Ambient light
    pub ambient: LightHandle,
    /// Moonlight
    pub moonlight: LightHandle,
    /// Light above the door
    pub door_light: LightHandle,
    /// Animated ghosts
    pub ghosts: Vec<Ghost>,
    /// Scene fog
    pub fog: FogHandle,
}

impl HauntedScene {
    /// Material of a surface
    pub fn material(&self, surface: Surface) -> Option<&MaterialHandle> {
        self.materials.get(&surface)
    }

    /// Color map of the roof, if it has one
    pub fn roof_color_map(&self) -> Option<TextureHandle> {
        self.material(Surface::Roof)?.borrow().color_map.clone()
    }
}

/// Random local transforms for the graves
///
/// Each grave sits on a ring around the origin at a random angle and
/// distance, slightly raised and tilted on every axis.
pub fn grave_transforms<R: Rng + ?Sized>(layout: &GraveLayout, rng: &mut R) -> Vec<Transform> {
    (0..layout.count)
        .map(|_| {
            let angle = rng.gen::<f32>() * TAU;
            let radius = layout.min_radius + rng.gen::<f32>() * layout.radius_range;
            let height = rng.gen::<f32>() * layout.max_height;
            let mut tilt = || (rng.gen::<f32>() - 0.5) * layout.jitter;
            let (y, x, z) = (tilt(), tilt(), tilt());
            Transform::from_position(Vec3::new(angle.sin() * radius, height, angle.cos() * radius)).with_euler(x, y, z)
        })
        .collect()
}

/// Build the complete scene
///
/// Textures load through `library`; a surface missing from the texture table
/// fails the build. Grave placement draws from `rng`.
pub fn build_scene<L: TextureLoader, R: Rng + ?Sized>(
    config: &HauntedConfig,
    library: &mut TextureLibrary<L>,
    rng: &mut R,
) -> Result<HauntedScene, AppError> {
    let surfaces = load_surfaces(&config.textures, library)?;
    let materials: BTreeMap<Surface, MaterialHandle> = surfaces
        .iter()
        .map(|(surface, maps)| (*surface, maps.material(surface.name()).into_handle()))
        .collect();
    let material = |surface: Surface| {
        materials
            .get(&surface)
            .cloned()
            .ok_or_else(|| AppError::Setup(format!("No material for surface '{}'", surface)))
    };

    let mut graph = SceneGraph::new();
    let root = graph.root();

    graph.spawn(
        root,
        SceneNode::mesh("ground", Geometry::subdivided_plane(20.0, 20.0, 100, 100), material(Surface::Ground)?)
            .with_transform(Transform::identity().with_euler(-FRAC_PI_2, 0.0, 0.0))
            .with_shadows(ShadowFlags::RECEIVE),
    )?;

    // House
    let house = graph.spawn(root, SceneNode::group("house"))?;
    graph.spawn(
        house,
        SceneNode::mesh("walls", Geometry::cuboid(4.0, WALL_HEIGHT, 4.0), material(Surface::Wall)?)
            .at(Vec3::new(0.0, WALL_HEIGHT / 2.0, 0.0))
            .with_shadows(ShadowFlags::BOTH),
    )?;
    graph.spawn(
        house,
        SceneNode::mesh("roof", Geometry::cone(3.5, ROOF_HEIGHT, 4), material(Surface::Roof)?)
            .with_transform(
                Transform::identity()
                    .with_position(0.0, WALL_HEIGHT + ROOF_HEIGHT / 2.0, 0.0)
                    .with_euler(0.0, FRAC_PI_4, 0.0),
            )
            .with_shadows(ShadowFlags::BOTH),
    )?;
    graph.spawn(
        house,
        SceneNode::mesh("door", Geometry::plane(2.2, 2.2), material(Surface::Door)?)
            .at(Vec3::new(0.0, 1.0, 2.0 + 0.01)),
    )?;

    let bush_geometry = GeometryHandle::new(Geometry::sphere(1.0, 16, 16));
    let bush_material = material(Surface::Bush)?;
    for (i, (scale, [x, y, z])) in BUSHES.iter().enumerate() {
        graph.spawn(
            house,
            SceneNode::mesh(format!("bush {}", i + 1), bush_geometry.clone(), bush_material.clone()).with_transform(
                Transform::identity()
                    .with_position(*x, *y, *z)
                    .with_euler(-0.75, 0.0, 0.0)
                    .with_uniform_scale(*scale),
            ),
        )?;
    }

    let door = &config.lights.door;
    let door_light = Light::point(door.color, door.intensity, 0.0).into_handle();
    graph.spawn(
        house,
        SceneNode::light("door light", door_light.clone()).at(Vec3::from(door.position)),
    )?;

    // Graves
    let graves = graph.spawn(root, SceneNode::group("graves"))?;
    let grave_geometry = GeometryHandle::new(Geometry::cuboid(0.6, 0.8, 0.2));
    let grave_material = material(Surface::Grave)?;
    for (i, transform) in grave_transforms(&config.layout, rng).into_iter().enumerate() {
        graph.spawn(
            graves,
            SceneNode::mesh(format!("grave {}", i + 1), grave_geometry.clone(), grave_material.clone())
                .with_transform(transform)
                .with_shadows(ShadowFlags::BOTH),
        )?;
    }

    // Lights
    let lights = &config.lights;
    let ambient = Light::ambient(lights.ambient.color, lights.ambient.intensity).into_handle();
    graph.spawn(root, SceneNode::light("ambient light", ambient.clone()))?;

    let moon = &lights.directional;
    let moonlight = Light::directional(moon.color, moon.intensity, Vec3::zeros())
        .with_shadow(moon.shadow)
        .into_handle();
    graph.spawn(
        root,
        SceneNode::light("moonlight", moonlight.clone()).at(Vec3::from(moon.position)),
    )?;

    let mut ghosts = Vec::with_capacity(config.ghosts.len());
    for (i, orbit) in config.ghosts.iter().enumerate() {
        let light = Light::point(orbit.color, orbit.intensity, orbit.distance)
            .with_shadow(lights.ghost_shadow)
            .into_handle();
        let node = graph.spawn(
            root,
            SceneNode::light(format!("ghost {}", i + 1), light.clone()).at(orbit.position(0.0)),
        )?;
        ghosts.push(Ghost { node, light, orbit: *orbit });
    }

    graph.spawn(root, SceneNode::sky(config.sky.params, config.sky.scale))?;
    let fog = graph.set_fog(config.fog);

    log::info!(
        "Built haunted house: {} nodes, {} graves, {} ghosts",
        graph.len(),
        config.layout.count,
        ghosts.len()
    );

    Ok(HauntedScene {
        graph,
        house,
        graves,
        materials,
        ambient,
        moonlight,
        door_light,
        ghosts,
        fog,
    })
}
