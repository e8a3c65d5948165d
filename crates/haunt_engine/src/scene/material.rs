//! Surface materials
//!
//! A [`MaterialDescriptor`] is created once per surface and shared by every
//! mesh that uses it through a [`MaterialHandle`]. Edits through any handle,
//! including parameter-panel bindings, are seen by all of them.

use crate::assets::TextureHandle;
use crate::foundation::collections::Shared;
use crate::foundation::math::Color;

/// Texture slots a material can bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color
    Color,
    /// Tangent-space normals
    Normal,
    /// Opacity mask
    Alpha,
    /// Ambient occlusion
    AmbientOcclusion,
    /// Roughness
    Roughness,
    /// Metalness
    Metalness,
    /// Vertex displacement
    Displacement,
}

/// Physically based surface description
#[derive(Debug, Clone)]
pub struct MaterialDescriptor {
    /// Debug name
    pub name: String,
    /// Base color, multiplied with the color map
    pub color: Color,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// World units a white displacement texel moves a vertex
    pub displacement_scale: f32,
    /// Offset added to every displacement
    pub displacement_bias: f32,
    /// Whether the alpha channel blends
    pub transparent: bool,
    /// Base color map
    pub color_map: Option<TextureHandle>,
    /// Normal map
    pub normal_map: Option<TextureHandle>,
    /// Opacity map
    pub alpha_map: Option<TextureHandle>,
    /// Ambient occlusion map (red channel)
    pub ao_map: Option<TextureHandle>,
    /// Roughness map (green channel)
    pub roughness_map: Option<TextureHandle>,
    /// Metalness map (blue channel)
    pub metalness_map: Option<TextureHandle>,
    /// Displacement map
    pub displacement_map: Option<TextureHandle>,
}

/// Shared material handle
pub type MaterialHandle = Shared<MaterialDescriptor>;

impl MaterialDescriptor {
    /// White, fully rough, non-metallic material with no maps
    pub fn standard() -> Self {
        Self {
            name: String::from("standard"),
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            displacement_scale: 1.0,
            displacement_bias: 0.0,
            transparent: false,
            color_map: None,
            normal_map: None,
            alpha_map: None,
            ao_map: None,
            roughness_map: None,
            metalness_map: None,
            displacement_map: None,
        }
    }

    /// Set the debug name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the base color
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Bind the base color map
    #[must_use]
    pub fn with_color_map(mut self, texture: TextureHandle) -> Self {
        self.color_map = Some(texture);
        self
    }

    /// Bind the normal map
    #[must_use]
    pub fn with_normal_map(mut self, texture: TextureHandle) -> Self {
        self.normal_map = Some(texture);
        self
    }

    /// Bind an opacity map and enable blending
    #[must_use]
    pub fn with_alpha_map(mut self, texture: TextureHandle) -> Self {
        self.alpha_map = Some(texture);
        self.transparent = true;
        self
    }

    /// Bind one packed texture to the occlusion, roughness and metalness slots
    #[must_use]
    pub fn with_arm_map(mut self, texture: TextureHandle) -> Self {
        self.ao_map = Some(texture.clone());
        self.roughness_map = Some(texture.clone());
        self.metalness_map = Some(texture);
        self
    }

    /// Bind a separate ambient occlusion map
    #[must_use]
    pub fn with_ao_map(mut self, texture: TextureHandle) -> Self {
        self.ao_map = Some(texture);
        self
    }

    /// Bind a separate roughness map
    #[must_use]
    pub fn with_roughness_map(mut self, texture: TextureHandle) -> Self {
        self.roughness_map = Some(texture);
        self
    }

    /// Bind a separate metalness map
    #[must_use]
    pub fn with_metalness_map(mut self, texture: TextureHandle) -> Self {
        self.metalness_map = Some(texture);
        self
    }

    /// Bind a displacement map with its scale and bias
    #[must_use]
    pub fn with_displacement(mut self, texture: TextureHandle, scale: f32, bias: f32) -> Self {
        self.displacement_map = Some(texture);
        self.displacement_scale = scale;
        self.displacement_bias = bias;
        self
    }

    /// Wrap in a shared handle
    pub fn into_handle(self) -> MaterialHandle {
        Shared::new(self)
    }

    /// Texture bound to `slot`, if any
    pub fn texture(&self, slot: TextureSlot) -> Option<&TextureHandle> {
        match slot {
            TextureSlot::Color => self.color_map.as_ref(),
            TextureSlot::Normal => self.normal_map.as_ref(),
            TextureSlot::Alpha => self.alpha_map.as_ref(),
            TextureSlot::AmbientOcclusion => self.ao_map.as_ref(),
            TextureSlot::Roughness => self.roughness_map.as_ref(),
            TextureSlot::Metalness => self.metalness_map.as_ref(),
            TextureSlot::Displacement => self.displacement_map.as_ref(),
        }
    }

    /// Bound slots whose texture failed to load
    pub fn missing_slots(&self) -> Vec<TextureSlot> {
        const SLOTS: [TextureSlot; 7] = [
            TextureSlot::Color,
            TextureSlot::Normal,
            TextureSlot::Alpha,
            TextureSlot::AmbientOcclusion,
            TextureSlot::Roughness,
            TextureSlot::Metalness,
            TextureSlot::Displacement,
        ];
        SLOTS
            .into_iter()
            .filter(|&slot| self.texture(slot).is_some_and(|t| !t.borrow().is_loaded()))
            .collect()
    }
}

impl Default for MaterialDescriptor {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Texture, TextureStatus};

    fn texture(loaded: bool) -> TextureHandle {
        let status = if loaded {
            TextureStatus::Loaded { width: 4, height: 4 }
        } else {
            TextureStatus::Missing("not found".to_string())
        };
        Shared::new(Texture::new("t.jpg", status))
    }

    #[test]
    fn test_arm_map_fills_three_slots() {
        let arm = texture(true);
        let material = MaterialDescriptor::standard().with_arm_map(arm.clone());
        for slot in [TextureSlot::AmbientOcclusion, TextureSlot::Roughness, TextureSlot::Metalness] {
            assert!(material.texture(slot).is_some_and(|t| t.ptr_eq(&arm)));
        }
        assert!(material.texture(TextureSlot::Color).is_none());
    }

    #[test]
    fn test_alpha_map_enables_transparency() {
        let material = MaterialDescriptor::standard().with_alpha_map(texture(true));
        assert!(material.transparent);
    }

    #[test]
    fn test_missing_slots_lists_failed_textures() {
        let material = MaterialDescriptor::standard()
            .with_color_map(texture(true))
            .with_normal_map(texture(false))
            .with_displacement(texture(false), 0.38, -0.24);
        assert_eq!(material.missing_slots(), vec![TextureSlot::Normal, TextureSlot::Displacement]);
        assert_eq!(material.displacement_bias, -0.24);
    }

    #[test]
    fn test_edit_through_handle_is_shared() {
        let handle = MaterialDescriptor::standard().with_name("grave").into_handle();
        let other = handle.clone();
        handle.borrow_mut().roughness = 0.25;
        assert_eq!(other.borrow().roughness, 0.25);
    }
}
