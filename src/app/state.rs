//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).
//! Each interactive surface owns its own models; mounting a surface creates
//! them and unmounting drops them.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::{AppConfig, ThemeMode};
use crate::core::{
    cart::CartLedger,
    catalog,
    motion::FrameClock,
    pointer::{MagneticPull, PointerModel, Tilt},
    scroll::{visible_fraction, ElementSpan, ScrollMetrics, ScrollProgress, VisibilityLatch},
};
use crate::ui::layout::{self, AppLayout, Section};
use crate::ui::smooth_scroll::SmoothScroll;
use crate::ui::theme::Theme;

/// Rows the page must move before the navbar switches to its glass style.
const NAV_SCROLLED_ROWS: f64 = 2.0;
/// Ease-out factor of the page scroll per reference frame.
const PAGE_SCROLL_SPEED: f64 = 0.25;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Storefront,
    SettingsMenu,
}

/// The slide-in bag.  Exists only while open.
#[derive(Debug, Clone)]
pub struct CartPanel {
    /// Highlighted line.
    pub selected: usize,
    pub checkout: PointerModel<MagneticPull>,
}

impl CartPanel {
    pub fn mount(config: &AppConfig) -> Self {
        Self {
            selected: 0,
            checkout: PointerModel::new(config.magnetic, config.magnetic_spring),
        }
    }
}

/// Reveal-on-enter state of one page section.
#[derive(Debug, Clone, Copy, Default)]
pub struct SectionReveal {
    pub latch: VisibilityLatch,
    /// Clock time (seconds) at which the latch fired.
    pub revealed_at: Option<f64>,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// Palette for the active presentation mode.
    pub theme: Theme,
    /// The bag.  Badge and panel both read this one ledger.
    pub cart: CartLedger,
    pub cart_panel: Option<CartPanel>,
    /// Page scroll position (rows).
    pub scroll: SmoothScroll,
    pub page_progress: ScrollProgress,
    pub featured_progress: ScrollProgress,
    pub about_progress: ScrollProgress,
    /// Indexed by [`Section::index`].
    pub reveals: Vec<SectionReveal>,
    pub hero_cta: PointerModel<MagneticPull>,
    pub category_cards: Vec<PointerModel<Tilt>>,
    pub clock: FrameClock,
    /// Seconds since start, as of the last frame.
    pub elapsed: f64,
    /// Last known terminal size; input handling derives geometry from it.
    pub terminal_area: Rect,
    pub active_view: ActiveView,
    pub settings_selected: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, terminal_area: Rect, now: Instant) -> Self {
        let mut cart = CartLedger::new(config.shipping);
        cart.add_or_seed(catalog::demo_cart_lines());

        let span = |s: Section| ElementSpan {
            top: s.offset() as f64,
            height: f64::from(s.height()),
        };

        let mut state = Self {
            theme: Theme::new(config.theme),
            cart,
            cart_panel: None,
            scroll: SmoothScroll::new(PAGE_SCROLL_SPEED),
            page_progress: ScrollProgress::document(),
            featured_progress: ScrollProgress::element(span(Section::Featured)),
            about_progress: ScrollProgress::element(span(Section::About)),
            reveals: vec![SectionReveal::default(); Section::ALL.len()],
            hero_cta: PointerModel::new(config.magnetic, config.magnetic_spring),
            category_cards: catalog::Category::ALL
                .iter()
                .map(|_| PointerModel::new(config.tilt, config.tilt_spring))
                .collect(),
            clock: FrameClock::new(now),
            elapsed: 0.0,
            terminal_area,
            active_view: ActiveView::default(),
            settings_selected: 0,
            status_message: None,
            should_quit: false,
            config,
        };
        // Initial layout must be right before the first scroll event.
        state.refresh_scroll();
        state
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area, self.cart_panel.is_some())
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
        self.refresh_scroll();
    }

    // ── bag panel ───────────────────────────────────────────────

    pub fn open_cart(&mut self) {
        if self.cart_panel.is_none() {
            self.cart_panel = Some(CartPanel::mount(&self.config));
            tracing::debug!("bag panel mounted");
            self.refresh_scroll();
        }
    }

    pub fn close_cart(&mut self) {
        if self.cart_panel.take().is_some() {
            tracing::debug!("bag panel unmounted");
            self.refresh_scroll();
        }
    }

    pub fn toggle_cart(&mut self) {
        if self.cart_panel.is_some() {
            self.close_cart();
        } else {
            self.open_cart();
        }
    }

    /// Keep the panel's highlighted line inside the ledger.
    pub fn clamp_cart_selection(&mut self) {
        let len = self.cart.len();
        if let Some(panel) = self.cart_panel.as_mut() {
            panel.selected = panel.selected.min(len.saturating_sub(1));
        }
    }

    /// Product id of the highlighted bag line.
    pub fn selected_cart_product(&self) -> Option<String> {
        let panel = self.cart_panel.as_ref()?;
        self.cart
            .lines()
            .get(panel.selected)
            .map(|l| l.product_id.clone())
    }

    // ── presentation mode ───────────────────────────────────────

    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.config.theme = mode;
        self.theme = Theme::new(mode);
        self.persist_config();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.config.theme.toggled());
        self.status_message = Some(format!("Theme: {}", self.theme.mode()));
    }

    /// Push motion tuning from the config into every live pointer model.
    pub fn apply_motion_config(&mut self) {
        let (magnetic, magnetic_spring) = (self.config.magnetic, self.config.magnetic_spring);
        let (tilt, tilt_spring) = (self.config.tilt, self.config.tilt_spring);

        self.hero_cta.set_mapping(magnetic);
        self.hero_cta.set_spring(magnetic_spring);
        if let Some(panel) = self.cart_panel.as_mut() {
            panel.checkout.set_mapping(magnetic);
            panel.checkout.set_spring(magnetic_spring);
        }
        for card in &mut self.category_cards {
            card.set_mapping(tilt);
            card.set_spring(tilt_spring);
        }
    }

    pub fn persist_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("{e}");
        }
    }

    // ── scroll & frames ─────────────────────────────────────────

    /// Recompute every scroll-derived value: range, progress, reveals.
    pub fn refresh_scroll(&mut self) {
        let viewport = self.layout().page_area.height;
        let doc_height = layout::document_height();
        self.scroll
            .set_max_target(doc_height.saturating_sub(usize::from(viewport)));

        let metrics = ScrollMetrics {
            scroll_top: self.scroll.position(),
            scroll_height: doc_height as f64,
            viewport_height: f64::from(viewport),
        };
        self.page_progress.compute_progress(metrics);
        self.featured_progress.compute_progress(metrics);
        self.about_progress.compute_progress(metrics);

        let threshold = self.config.reveal_threshold;
        for &section in Section::ALL {
            let reveal = &mut self.reveals[section.index()];
            if reveal.latch.has_entered_view() {
                continue;
            }
            let fraction = visible_fraction(
                metrics.viewport_height,
                layout::section_top(section, metrics.scroll_top),
                f64::from(section.height()),
            );
            if reveal.latch.check_visibility(fraction, threshold) {
                reveal.revealed_at = Some(self.elapsed);
                tracing::debug!(section = section.label(), fraction, "section revealed");
            }
        }
    }

    /// Advance every animation to `now`.  Called once per frame.
    pub fn advance_frame(&mut self, now: Instant) {
        let frame = self.clock.advance(now);
        self.elapsed = frame.elapsed;

        self.hero_cta.sample(frame.dt);
        for card in &mut self.category_cards {
            card.sample(frame.dt);
        }
        if let Some(panel) = self.cart_panel.as_mut() {
            panel.checkout.sample(frame.dt);
        }

        if self.scroll.is_animating() {
            self.scroll.tick(frame.dt);
            self.refresh_scroll();
        }
    }

    pub fn scroll_by(&mut self, rows: i64) {
        self.scroll.scroll_by(rows);
        self.refresh_scroll();
    }

    pub fn scroll_to_section(&mut self, section: Section) {
        self.scroll.set_target(section.offset());
        self.refresh_scroll();
    }

    /// Section at the top of the viewport (by logical target).
    pub fn current_section(&self) -> Section {
        Section::at_row(self.scroll.target() as f64)
    }

    /// Whole-row scroll offset the page is drawn at.  Hit testing uses the
    /// same value so what is drawn is what is clicked.
    pub fn page_scroll(&self) -> f64 {
        self.scroll.position().round()
    }

    pub fn nav_scrolled(&self) -> bool {
        self.scroll.position() > NAV_SCROLLED_ROWS
    }

    pub fn reveal(&self, section: Section) -> SectionReveal {
        self.reveals[section.index()]
    }

    /// Page rows per screenful.
    pub fn page_rows(&self) -> i64 {
        i64::from(self.layout().page_area.height.saturating_sub(2).max(1))
    }
}
