//! Surface texture sets
//!
//! Every textured surface of the scene has a [`SurfaceConfig`] naming its
//! maps. [`load_surfaces`] resolves them through a [`TextureLibrary`], tags
//! color maps as sRGB and applies the surface's UV repeat.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use haunt_engine::assets::{AssetError, ColorSpace, TextureHandle, TextureLibrary, TextureLoader};
use haunt_engine::scene::MaterialDescriptor;
use serde::{Deserialize, Serialize};

/// Textured surfaces of the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Terrain plane
    Ground,
    /// House walls
    Wall,
    /// House roof
    Roof,
    /// Front door
    Door,
    /// Bushes around the door
    Bush,
    /// Grave stones
    Grave,
}

impl Surface {
    /// Every surface, in build order
    pub const ALL: [Self; 6] = [Self::Ground, Self::Wall, Self::Roof, Self::Door, Self::Bush, Self::Grave];

    /// Lowercase name, as used in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Wall => "wall",
            Self::Roof => "roof",
            Self::Door => "door",
            Self::Bush => "bush",
            Self::Grave => "grave",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map paths and sampling for one surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Albedo map (sRGB)
    pub color: Option<PathBuf>,
    /// Tangent-space normal map
    pub normal: Option<PathBuf>,
    /// Occlusion, roughness and metalness packed in R, G and B
    pub arm: Option<PathBuf>,
    /// Separate occlusion map
    pub ambient_occlusion: Option<PathBuf>,
    /// Separate roughness map
    pub roughness: Option<PathBuf>,
    /// Opacity mask; makes the material transparent
    pub alpha: Option<PathBuf>,
    /// Height map
    pub displacement: Option<PathBuf>,
    /// Height map scale
    pub displacement_scale: f32,
    /// Height map offset
    pub displacement_bias: f32,
    /// UV repeat along U and V, applied to every map except the alpha mask
    pub repeat: [f32; 2],
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            color: None,
            normal: None,
            arm: None,
            ambient_occlusion: None,
            roughness: None,
            alpha: None,
            displacement: None,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            repeat: [1.0, 1.0],
        }
    }
}

impl SurfaceConfig {
    /// Color, normal and ARM maps following the `<dir>/<set>_1k/textures/<set>_<map>_1k.jpg` layout
    pub fn packed(dir: &str, set: &str) -> Self {
        let map = |kind: &str| Some(PathBuf::from(format!("{dir}/{set}_1k/textures/{set}_{kind}_1k.jpg")));
        Self {
            color: map("diff"),
            normal: map("nor_gl"),
            arm: map("arm"),
            ..Self::default()
        }
    }

    #[must_use]
    fn with_repeat(mut self, x: f32, y: f32) -> Self {
        self.repeat = [x, y];
        self
    }
}

/// Texture table of the default scene
pub fn default_surfaces() -> BTreeMap<Surface, SurfaceConfig> {
    let ground = SurfaceConfig {
        alpha: Some(PathBuf::from("ground/alpha.jpg")),
        displacement: Some(PathBuf::from(
            "ground/coast_sand_rocks_02_1k/textures/coast_sand_rocks_02_disp_1k.jpg",
        )),
        displacement_scale: 0.38,
        displacement_bias: -0.24,
        ..SurfaceConfig::packed("ground", "coast_sand_rocks_02")
    }
    .with_repeat(8.0, 8.0);

    let door = SurfaceConfig {
        color: Some(PathBuf::from("door/color.jpg")),
        alpha: Some(PathBuf::from("door/alpha.jpg")),
        normal: Some(PathBuf::from("door/normal.jpg")),
        displacement: Some(PathBuf::from("door/height.jpg")),
        displacement_scale: 0.1,
        roughness: Some(PathBuf::from("door/roughness.jpg")),
        ambient_occlusion: Some(PathBuf::from("door/ambientOcclusion.jpg")),
        ..SurfaceConfig::default()
    };

    BTreeMap::from([
        (Surface::Ground, ground),
        (Surface::Wall, SurfaceConfig::packed("wall", "worn_planks")),
        (Surface::Roof, SurfaceConfig::packed("roof", "reed_roof_03").with_repeat(2.0, 1.0)),
        (Surface::Door, door),
        (Surface::Bush, SurfaceConfig::packed("bush", "leaves_forest_ground").with_repeat(2.0, 1.0)),
        (Surface::Grave, SurfaceConfig::packed("grave", "plastered_stone_wall")),
    ])
}

/// Loaded maps of one surface
#[derive(Debug, Clone, Default)]
pub struct SurfaceMaps {
    /// Albedo
    pub color: Option<TextureHandle>,
    /// Normals
    pub normal: Option<TextureHandle>,
    /// Packed occlusion/roughness/metalness
    pub arm: Option<TextureHandle>,
    /// Occlusion
    pub ambient_occlusion: Option<TextureHandle>,
    /// Roughness
    pub roughness: Option<TextureHandle>,
    /// Opacity
    pub alpha: Option<TextureHandle>,
    /// Height
    pub displacement: Option<TextureHandle>,
    displacement_scale: f32,
    displacement_bias: f32,
}

impl SurfaceMaps {
    /// Material named after the surface with every loaded map bound
    pub fn material(&self, name: &str) -> MaterialDescriptor {
        let mut material = MaterialDescriptor::standard().with_name(name);
        if let Some(t) = &self.color {
            material = material.with_color_map(t.clone());
        }
        if let Some(t) = &self.normal {
            material = material.with_normal_map(t.clone());
        }
        if let Some(t) = &self.arm {
            material = material.with_arm_map(t.clone());
        }
        if let Some(t) = &self.ambient_occlusion {
            material = material.with_ao_map(t.clone());
        }
        if let Some(t) = &self.roughness {
            material = material.with_roughness_map(t.clone());
        }
        if let Some(t) = &self.alpha {
            material = material.with_alpha_map(t.clone());
        }
        if let Some(t) = &self.displacement {
            material = material.with_displacement(t.clone(), self.displacement_scale, self.displacement_bias);
        }
        material
    }
}

/// Load every surface of `table`
///
/// A surface absent from the table is a [`AssetError::NotFound`]; a single
/// map that fails to load only marks that texture missing.
pub fn load_surfaces<L: TextureLoader>(
    table: &BTreeMap<Surface, SurfaceConfig>,
    library: &mut TextureLibrary<L>,
) -> Result<BTreeMap<Surface, SurfaceMaps>, AssetError> {
    let mut surfaces = BTreeMap::new();
    for surface in Surface::ALL {
        let config = table
            .get(&surface)
            .ok_or_else(|| AssetError::NotFound(format!("texture set for surface '{}'", surface)))?;
        surfaces.insert(surface, load_surface(config, library));
    }
    log::info!(
        "Loaded {} textures for {} surfaces ({} missing)",
        library.len(),
        surfaces.len(),
        library.failures()
    );
    Ok(surfaces)
}

fn load_surface<L: TextureLoader>(config: &SurfaceConfig, library: &mut TextureLibrary<L>) -> SurfaceMaps {
    let [x, y] = config.repeat;
    let mut load = |path: &Option<PathBuf>, color_space: ColorSpace, tiled: bool| {
        path.as_deref().map(|p: &Path| {
            let handle = library.load(p, color_space);
            if tiled {
                handle.borrow_mut().set_repeat(x, y);
            }
            handle
        })
    };

    SurfaceMaps {
        color: load(&config.color, ColorSpace::Srgb, true),
        normal: load(&config.normal, ColorSpace::Linear, true),
        arm: load(&config.arm, ColorSpace::Linear, true),
        ambient_occlusion: load(&config.ambient_occlusion, ColorSpace::Linear, true),
        roughness: load(&config.roughness, ColorSpace::Linear, true),
        alpha: load(&config.alpha, ColorSpace::Linear, false),
        displacement: load(&config.displacement, ColorSpace::Linear, true),
        displacement_scale: config.displacement_scale,
        displacement_bias: config.displacement_bias,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use haunt_engine::assets::{AssetPaths, WrapMode};
    use haunt_engine::core::config::AssetConfig;

    /// Loader that knows every image and reports it as 1k square
    #[derive(Default)]
    pub(crate) struct AllPresent;

    impl TextureLoader for AllPresent {
        fn load(&mut self, _path: &Path) -> Result<(u32, u32), AssetError> {
            Ok((1024, 1024))
        }
    }

    pub(crate) fn library() -> TextureLibrary<AllPresent> {
        TextureLibrary::new(AllPresent, AssetPaths::new(&AssetConfig { search_paths: Vec::new() }))
    }

    #[test]
    fn test_default_table_covers_every_surface() {
        let table = default_surfaces();
        for surface in Surface::ALL {
            assert!(table.contains_key(&surface), "{} missing", surface);
        }
        assert_eq!(
            table[&Surface::Wall].color,
            Some(PathBuf::from("wall/worn_planks_1k/textures/worn_planks_diff_1k.jpg"))
        );
    }

    #[test]
    fn test_color_maps_are_srgb_and_data_maps_linear() {
        let surfaces = load_surfaces(&default_surfaces(), &mut library()).unwrap();
        let ground = &surfaces[&Surface::Ground];
        assert_eq!(ground.color.as_ref().unwrap().borrow().color_space, ColorSpace::Srgb);
        assert_eq!(ground.normal.as_ref().unwrap().borrow().color_space, ColorSpace::Linear);
        assert_eq!(ground.displacement.as_ref().unwrap().borrow().color_space, ColorSpace::Linear);
    }

    #[test]
    fn test_repeat_applies_to_all_but_alpha() {
        let surfaces = load_surfaces(&default_surfaces(), &mut library()).unwrap();
        let ground = &surfaces[&Surface::Ground];
        assert_eq!(ground.arm.as_ref().unwrap().borrow().repeat, [8.0, 8.0]);
        assert_eq!(ground.alpha.as_ref().unwrap().borrow().repeat, [1.0, 1.0]);

        let roof = surfaces[&Surface::Roof].color.clone().unwrap();
        let roof = roof.borrow();
        assert_eq!(roof.wrap_s, WrapMode::Repeat);
        assert_eq!(roof.wrap_t, WrapMode::ClampToEdge);
    }

    #[test]
    fn test_missing_surface_is_not_found() {
        let mut table = default_surfaces();
        table.remove(&Surface::Door);
        let result = load_surfaces(&table, &mut library());
        assert!(matches!(result, Err(AssetError::NotFound(msg)) if msg.contains("door")));
    }

    #[test]
    fn test_door_material_uses_separate_maps() {
        let surfaces = load_surfaces(&default_surfaces(), &mut library()).unwrap();
        let door = surfaces[&Surface::Door].material("door");
        assert!(door.transparent);
        assert!(door.metalness_map.is_none());
        assert!(door.ao_map.is_some());
        assert_eq!(door.displacement_scale, 0.1);
    }
}
