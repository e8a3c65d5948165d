//! Debug panel entries of the haunted house

use haunt_engine::debug::{ParamRange, ParameterPanel};

use crate::assets::Surface;
use crate::scene_builder::HauntedScene;

const REPEAT: ParamRange = ParamRange::new(0.0, 5.0, 0.01);
const DISPLACEMENT_SCALE: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
const DISPLACEMENT_BIAS: ParamRange = ParamRange::new(-0.5, 0.5, 0.001);
const LIGHT_INTENSITY: ParamRange = ParamRange::new(0.0, 3.0, 0.001);
const GHOST_INTENSITY: ParamRange = ParamRange::new(0.0, 10.0, 0.01);
const FOG_DENSITY: ParamRange = ParamRange::new(0.0, 0.3, 0.001);

/// Register the scene's tweakable fields
pub fn build_panel(scene: &HauntedScene) -> ParameterPanel {
    let mut panel = ParameterPanel::new("Haunted House");

    if let Some(roof) = scene.roof_color_map() {
        panel
            .add_float("roof color repeat x", &roof, "repeat.x", REPEAT, |t| t.repeat[0], |t, v| t.repeat[0] = v)
            .add_float("roof color repeat y", &roof, "repeat.y", REPEAT, |t| t.repeat[1], |t, v| t.repeat[1] = v);
    }

    if let Some(ground) = scene.material(Surface::Ground) {
        panel
            .add_float(
                "ground displacement",
                ground,
                "displacement_scale",
                DISPLACEMENT_SCALE,
                |m| m.displacement_scale,
                |m, v| m.displacement_scale = v,
            )
            .add_float(
                "ground displacement bias",
                ground,
                "displacement_bias",
                DISPLACEMENT_BIAS,
                |m| m.displacement_bias,
                |m, v| m.displacement_bias = v,
            );
    }

    panel
        .add_float(
            "ambient intensity",
            &scene.ambient,
            "intensity",
            LIGHT_INTENSITY,
            |l| l.intensity,
            |l, v| l.intensity = v,
        )
        .add_float(
            "moonlight intensity",
            &scene.moonlight,
            "intensity",
            LIGHT_INTENSITY,
            |l| l.intensity,
            |l, v| l.intensity = v,
        )
        .add_toggle(
            "moonlight shadows",
            &scene.moonlight,
            "cast_shadow",
            |l| l.cast_shadow,
            |l, v| l.cast_shadow = v,
        );

    for (i, ghost) in scene.ghosts.iter().enumerate() {
        panel.add_float(
            format!("ghost {} intensity", i + 1),
            &ghost.light,
            "intensity",
            GHOST_INTENSITY,
            |l| l.intensity,
            |l, v| l.intensity = v,
        );
    }

    panel.add_float("fog density", &scene.fog, "density", FOG_DENSITY, |f| f.density, |f, v| f.density = v);
    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::tests::library;
    use crate::config::HauntedConfig;
    use crate::scene_builder::build_scene;
    use haunt_engine::assets::WrapMode;
    use haunt_engine::debug::ParamValue;
    use haunt_engine::render::{RenderBackend, SceneStatsRenderer, Camera};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> HauntedScene {
        build_scene(&HauntedConfig::default(), &mut library(), &mut StdRng::seed_from_u64(5)).unwrap()
    }

    #[test]
    fn test_every_entry_is_registered() {
        let scene = scene();
        let panel = build_panel(&scene);
        let labels: Vec<String> = panel.entries().into_iter().map(|e| e.label).collect();
        assert_eq!(
            labels,
            [
                "roof color repeat x",
                "roof color repeat y",
                "ground displacement",
                "ground displacement bias",
                "ambient intensity",
                "moonlight intensity",
                "moonlight shadows",
                "ghost 1 intensity",
                "ghost 2 intensity",
                "ghost 3 intensity",
                "fog density",
            ]
        );
        assert_eq!(panel.read("ambient intensity").unwrap(), ParamValue::Float(0.275));
    }

    #[test]
    fn test_roof_repeat_edits_only_the_repeat_field() {
        let scene = scene();
        let panel = build_panel(&scene);
        let roof = scene.roof_color_map().unwrap();
        assert_eq!(roof.borrow().wrap_t, WrapMode::ClampToEdge);

        panel.write("roof color repeat y", ParamValue::Float(3.0)).unwrap();
        assert_eq!(roof.borrow().repeat, [2.0, 3.0]);
        assert_eq!(roof.borrow().wrap_s, WrapMode::Repeat);
        assert_eq!(roof.borrow().wrap_t, WrapMode::ClampToEdge);

        panel.write("roof color repeat y", ParamValue::Float(1.0)).unwrap();
        assert_eq!(roof.borrow().repeat, [2.0, 1.0]);
        assert_eq!(roof.borrow().wrap_t, WrapMode::ClampToEdge);
    }

    #[test]
    fn test_writes_are_seen_by_the_renderer() {
        let scene = scene();
        let panel = build_panel(&scene);
        let camera = Camera::default();
        let mut renderer = SceneStatsRenderer::new();

        renderer.render(&scene.graph, &camera).unwrap();
        assert_eq!(renderer.last_frame().shadow_maps, 4);

        panel.write("moonlight shadows", ParamValue::Bool(false)).unwrap();
        renderer.render(&scene.graph, &camera).unwrap();
        assert_eq!(renderer.last_frame().shadow_maps, 3);
    }

    #[test]
    fn test_fog_density_is_clamped() {
        let scene = scene();
        let panel = build_panel(&scene);
        assert_eq!(panel.write("fog density", ParamValue::Float(1.0)).unwrap(), ParamValue::Float(0.3));
        assert_eq!(scene.fog.borrow().density, 0.3);
        assert_eq!(scene.graph.fog().unwrap().borrow().density, 0.3);
    }
}
