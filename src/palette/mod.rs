mod quantize;

use crate::color::Rgb;
use crate::config::PaletteConfig;
use crate::icon::ServerIcon;

const WEIGHT_SATURATION: f32 = 3.0;
const WEIGHT_LUMA: f32 = 6.0;
const WEIGHT_POPULATION: f32 = 1.0;

/// A representative color measured from one icon, weighted by how much of
/// the image it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    rgb: Rgb,
    population: u32,
}

impl Swatch {
    pub(crate) fn new(rgb: Rgb, population: u32) -> Self {
        Self { rgb, population }
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn relative_luminance(&self) -> f32 {
        self.rgb.relative_luminance()
    }

    pub fn is_light(&self) -> bool {
        self.rgb.is_light()
    }
}

/// Toolbar color roles a swatch can fill, in the light/dark x vibrant/muted
/// grid. Each role constrains saturation and HSL luma to a target band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Vibrant,
    LightVibrant,
    DarkVibrant,
    Muted,
    LightMuted,
    DarkMuted,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Vibrant,
        Role::LightVibrant,
        Role::DarkVibrant,
        Role::Muted,
        Role::LightMuted,
        Role::DarkMuted,
    ];

    /// (min, target, max) HSL luma band.
    fn luma_band(self) -> (f32, f32, f32) {
        match self {
            Role::LightVibrant | Role::LightMuted => (0.55, 0.74, 1.0),
            Role::Vibrant | Role::Muted => (0.3, 0.5, 0.7),
            Role::DarkVibrant | Role::DarkMuted => (0.0, 0.26, 0.45),
        }
    }

    /// (min, target, max) saturation band.
    fn saturation_band(self) -> (f32, f32, f32) {
        match self {
            Role::Vibrant | Role::LightVibrant | Role::DarkVibrant => (0.35, 1.0, 1.0),
            Role::Muted | Role::LightMuted | Role::DarkMuted => (0.0, 0.3, 0.4),
        }
    }
}

/// The swatch set produced by one analysis pass, with the best candidate
/// per role pre-selected.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    swatches: Vec<Swatch>,
    by_role: [Option<Swatch>; 6],
}

impl Palette {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_swatches(swatches: Vec<Swatch>) -> Self {
        let max_population = swatches.iter().map(Swatch::population).max().unwrap_or(0);
        let mut by_role = [None; 6];
        for (slot, role) in by_role.iter_mut().zip(Role::ALL) {
            *slot = best_for_role(&swatches, role, max_population);
        }
        Self { swatches, by_role }
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    pub fn swatch_for(&self, role: Role) -> Option<&Swatch> {
        let index = Role::ALL.iter().position(|r| *r == role)?;
        self.by_role[index].as_ref()
    }

    /// The swatch covering the most pixels, regardless of role fit.
    pub fn dominant(&self) -> Option<&Swatch> {
        self.swatches.iter().max_by_key(|swatch| swatch.population)
    }
}

fn best_for_role(swatches: &[Swatch], role: Role, max_population: u32) -> Option<Swatch> {
    let mut best: Option<(f32, Swatch)> = None;
    for swatch in swatches {
        let Some(score) = role_score(swatch, role, max_population) else {
            continue;
        };
        match best {
            Some((top, _)) if score <= top => {}
            _ => best = Some((score, *swatch)),
        }
    }
    best.map(|(_, swatch)| swatch)
}

fn role_score(swatch: &Swatch, role: Role, max_population: u32) -> Option<f32> {
    let (_hue, saturation, luma) = swatch.rgb.to_hsl();
    let (sat_min, sat_target, sat_max) = role.saturation_band();
    let (luma_min, luma_target, luma_max) = role.luma_band();
    if saturation < sat_min || saturation > sat_max || luma < luma_min || luma > luma_max {
        return None;
    }

    let population_share = if max_population == 0 {
        0.0
    } else {
        swatch.population as f32 / max_population as f32
    };
    let score = WEIGHT_SATURATION * (1.0 - (saturation - sat_target).abs())
        + WEIGHT_LUMA * (1.0 - (luma - luma_target).abs())
        + WEIGHT_POPULATION * population_share;
    Some(score / (WEIGHT_SATURATION + WEIGHT_LUMA + WEIGHT_POPULATION))
}

/// Measure the icon's representative swatches.
///
/// Total for any icon: degenerate input yields an empty palette, never an
/// error. Population counts grow with pixel coverage in the sampled image.
pub fn analyze(icon: &ServerIcon, config: &PaletteConfig) -> Palette {
    let samples = quantize::sample_pixels(icon.pixels(), config.max_samples, config.alpha_cutoff);
    if samples.is_empty() {
        tracing::debug!(
            width = icon.width(),
            height = icon.height(),
            "no opaque pixels to sample; palette is empty"
        );
        return Palette::empty();
    }

    let clusters = quantize::cluster(&samples, config.cluster_count, config.max_iterations);
    let swatches: Vec<Swatch> = clusters
        .iter()
        .filter(|cluster| cluster.count > 0)
        .map(|cluster| {
            let rgb = Rgb::new(
                cluster.centroid[0].clamp(0.0, 255.0).round() as u8,
                cluster.centroid[1].clamp(0.0, 255.0).round() as u8,
                cluster.centroid[2].clamp(0.0, 255.0).round() as u8,
            );
            Swatch::new(rgb, u32::try_from(cluster.count).unwrap_or(u32::MAX))
        })
        .collect();

    Palette::from_swatches(swatches)
}

/// Run [`analyze`] on a worker thread and hand the palette to `on_complete`.
///
/// The callback fires exactly once, on the worker thread, whether or not the
/// caller still cares about the result by then.
pub fn analyze_async<F>(icon: &ServerIcon, config: &PaletteConfig, on_complete: F)
where
    F: FnOnce(Palette) + Send + 'static,
{
    let icon = icon.clone();
    let config = config.clone();
    std::thread::spawn(move || {
        let palette = analyze(&icon, &config);
        on_complete(palette);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::mpsc;

    fn icon_of(width: u32, height: u32, fill: impl Fn(u32) -> [u8; 4]) -> ServerIcon {
        let mut image = RgbaImage::new(width, height);
        for (x, _, pixel) in image.enumerate_pixels_mut() {
            *pixel = image::Rgba(fill(x));
        }
        ServerIcon::from(image)
    }

    fn white_navy_icon() -> ServerIcon {
        // Left half white, right half navy.
        icon_of(32, 32, |x| {
            if x < 16 {
                [255, 255, 255, 255]
            } else {
                [0, 0, 128, 255]
            }
        })
    }

    #[test]
    fn analyze_of_zero_sized_icon_is_empty() {
        let icon = ServerIcon::from(RgbaImage::new(0, 0));
        let palette = analyze(&icon, &PaletteConfig::default());
        assert!(palette.is_empty());
        assert!(palette.swatch_for(Role::Vibrant).is_none());
    }

    #[test]
    fn analyze_of_transparent_icon_is_empty() {
        let icon = icon_of(16, 16, |_| [90, 40, 200, 0]);
        assert!(analyze(&icon, &PaletteConfig::default()).is_empty());
    }

    #[test]
    fn analyze_recovers_solid_color() {
        let icon = icon_of(16, 16, |_| [255, 0, 0, 255]);
        let palette = analyze(&icon, &PaletteConfig::default());
        let dominant = palette.dominant().expect("solid icon has a swatch");
        assert_eq!(dominant.rgb(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn population_tracks_pixel_coverage() {
        // Three quarters blue, one quarter white.
        let icon = icon_of(32, 32, |x| {
            if x < 24 {
                [0, 0, 255, 255]
            } else {
                [255, 255, 255, 255]
            }
        });
        let palette = analyze(&icon, &PaletteConfig::default());
        let blue = palette
            .swatches()
            .iter()
            .find(|s| s.rgb() == Rgb::new(0, 0, 255))
            .expect("blue swatch");
        let white = palette
            .swatches()
            .iter()
            .find(|s| s.rgb() == Rgb::new(255, 255, 255))
            .expect("white swatch");
        assert!(blue.population() > white.population());
    }

    #[test]
    fn roles_pick_fitting_swatches() {
        let palette = analyze(&white_navy_icon(), &PaletteConfig::default());
        assert_eq!(
            palette.swatch_for(Role::LightMuted).map(Swatch::rgb),
            Some(Rgb::new(255, 255, 255))
        );
        assert_eq!(
            palette.swatch_for(Role::DarkVibrant).map(Swatch::rgb),
            Some(Rgb::new(0, 0, 128))
        );
        assert!(palette.swatch_for(Role::LightVibrant).is_none());
    }

    #[test]
    fn role_score_rejects_out_of_band_swatches() {
        let white = Swatch::new(Rgb::new(255, 255, 255), 10);
        assert!(role_score(&white, Role::DarkVibrant, 10).is_none());
        assert!(role_score(&white, Role::LightMuted, 10).is_some());
    }

    #[test]
    fn analyze_async_completes_exactly_once_off_thread() {
        let (tx, rx) = mpsc::channel();
        let caller = std::thread::current().id();
        analyze_async(
            &white_navy_icon(),
            &PaletteConfig::default(),
            move |palette| {
                let _ = tx.send((std::thread::current().id(), palette.swatches().len()));
            },
        );

        let (worker, swatch_count) = rx.recv().expect("callback must fire");
        assert_ne!(worker, caller);
        assert!(swatch_count >= 2);
        assert!(rx.recv().is_err());
    }
}
