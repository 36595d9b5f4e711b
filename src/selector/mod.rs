use crate::palette::{Palette, Role, Swatch};

// Preference order per toolbar role, tried top to bottom.
const LIGHT_ROLE_ORDER: [Role; 4] = [
    Role::LightVibrant,
    Role::Vibrant,
    Role::LightMuted,
    Role::Muted,
];
const DARK_ROLE_ORDER: [Role; 4] = [
    Role::DarkMuted,
    Role::DarkVibrant,
    Role::Muted,
    Role::Vibrant,
];

/// Best swatch for a light/bright background role, or `None` when no swatch
/// qualifies. Total for empty palettes.
pub fn select_light(palette: &Palette) -> Option<&Swatch> {
    LIGHT_ROLE_ORDER
        .iter()
        .find_map(|role| palette.swatch_for(*role).filter(|swatch| swatch.is_light()))
}

/// Best swatch for a dark/muted background role, or `None` when no swatch
/// qualifies.
pub fn select_dark(palette: &Palette) -> Option<&Swatch> {
    DARK_ROLE_ORDER
        .iter()
        .find_map(|role| palette.swatch_for(*role).filter(|swatch| !swatch.is_light()))
}
