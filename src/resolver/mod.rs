use std::sync::mpsc;
use std::sync::Arc;

use crate::config::PaletteConfig;
use crate::generator;
use crate::icon::ServerIcon;
use crate::palette::{self, Palette};
use crate::selector;
use crate::server::MediaServer;
use crate::store::{ResolvedTheme, ThemeStore};

/// Result of one resolution attempt.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// The server already had a resolved record; nothing was written.
    AlreadyResolved(ResolvedTheme),
    /// Resolution completed on the calling thread.
    Resolved(ResolvedTheme),
    /// Fallback colors are claimed and visible; palette refinement is still
    /// running on a worker thread.
    Pending(ResolveHandle),
}

impl ResolveOutcome {
    /// The colors visible in the store right now, refined or provisional.
    pub fn current(&self) -> ResolvedTheme {
        match self {
            Self::AlreadyResolved(theme) | Self::Resolved(theme) => *theme,
            Self::Pending(handle) => handle.provisional,
        }
    }
}

/// Completion side of an in-flight asynchronous resolution.
///
/// Dropping the handle does not cancel anything: the worker still refines
/// the stored record. There is no cancellation primitive.
#[derive(Debug)]
pub struct ResolveHandle {
    rx: mpsc::Receiver<ResolvedTheme>,
    provisional: ResolvedTheme,
}

impl ResolveHandle {
    /// Block until the worker has written the refined record, and return it.
    /// Falls back to the provisional colors if the worker died, so this is
    /// total.
    pub fn wait(self) -> ResolvedTheme {
        self.rx.recv().unwrap_or(self.provisional)
    }

    pub fn provisional(&self) -> ResolvedTheme {
        self.provisional
    }
}

/// Resolves and caches toolbar theme colors for discovered servers.
///
/// Total by construction: degenerate icons, empty palettes, and swatchless
/// roles all degrade to the name-derived fallback pair; no resolution path
/// returns an error.
#[derive(Debug)]
pub struct ThemeResolver<S> {
    store: Arc<S>,
    config: PaletteConfig,
}

impl<S: ThemeStore + 'static> ThemeResolver<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, PaletteConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: PaletteConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Resolve on the calling thread. Returns after the store holds the
    /// final colors.
    pub fn resolve(&self, server: &MediaServer, icon: Option<&ServerIcon>) -> ResolveOutcome {
        let provisional = match self.claim(server) {
            Ok(provisional) => provisional,
            Err(outcome) => return outcome,
        };

        let palette = match icon {
            Some(icon) => palette::analyze(icon, &self.config),
            None => Palette::empty(),
        };
        let theme = refine_with_palette(provisional, &palette);
        self.store.refine(server.udn(), theme);
        tracing::debug!(
            udn = %server.udn(),
            expanded = %theme.expanded,
            collapsed = %theme.collapsed,
            "resolved server theme"
        );
        ResolveOutcome::Resolved(theme)
    }

    /// Resolve without blocking on image analysis.
    ///
    /// The guard and the provisional fallback colors are written before this
    /// returns, so a concurrent reader always observes a complete record.
    /// With an icon present, the swatch override runs on the extractor's
    /// worker thread and lands via [`ThemeStore::refine`].
    pub fn resolve_async(&self, server: &MediaServer, icon: Option<&ServerIcon>) -> ResolveOutcome {
        let provisional = match self.claim(server) {
            Ok(provisional) => provisional,
            Err(outcome) => return outcome,
        };

        let Some(icon) = icon else {
            // Nothing to analyze; the claimed record is already final.
            tracing::debug!(udn = %server.udn(), "no icon; fallback colors are final");
            return ResolveOutcome::Resolved(provisional);
        };

        let (tx, rx) = mpsc::channel();
        let store = Arc::clone(&self.store);
        let udn = server.udn().clone();
        palette::analyze_async(icon, &self.config, move |palette| {
            let theme = refine_with_palette(provisional, &palette);
            store.refine(&udn, theme);
            tracing::debug!(
                %udn,
                expanded = %theme.expanded,
                collapsed = %theme.collapsed,
                "refined server theme from icon palette"
            );
            let _ = tx.send(theme);
        });

        ResolveOutcome::Pending(ResolveHandle { rx, provisional })
    }

    /// Guard and single-flight step: claim the store slot with fallback
    /// colors, or report the existing record.
    fn claim(&self, server: &MediaServer) -> Result<ResolvedTheme, ResolveOutcome> {
        if let Some(existing) = self.store.get(server.udn()) {
            return Err(ResolveOutcome::AlreadyResolved(existing));
        }

        let provisional = fallback_theme(server);
        if self.store.claim(server.udn(), provisional) {
            Ok(provisional)
        } else {
            // Lost a first-resolution race; the winner's record stands.
            tracing::debug!(udn = %server.udn(), "another resolution claimed this server first");
            let existing = self.store.get(server.udn()).unwrap_or(provisional);
            Err(ResolveOutcome::AlreadyResolved(existing))
        }
    }
}

fn fallback_theme(server: &MediaServer) -> ResolvedTheme {
    let (base, dark) = generator::fallback_colors(server.friendly_name());
    ResolvedTheme {
        expanded: base,
        collapsed: dark,
    }
}

fn refine_with_palette(provisional: ResolvedTheme, palette: &Palette) -> ResolvedTheme {
    let mut theme = provisional;
    if let Some(light) = selector::select_light(palette) {
        theme.expanded = light.rgb();
    }
    if let Some(dark) = selector::select_dark(palette) {
        theme.collapsed = dark.rgb();
    }
    theme
}
