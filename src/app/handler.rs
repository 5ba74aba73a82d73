//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::catalog::{self, format_price, Material, Product};
use crate::core::pointer::{ElementBounds, OffsetMapping, PointerModel};
use crate::ui::layout::{
    self, cart_footer_fits, cart_line_rects, checkout_button_rect, nav_link_rects,
    point_in_rect, rect_bounds, section_bounds, CartLineLayout, NavLayout, Section,
};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Storefront => {
            if state.cart_panel.is_some() && handle_cart_key(state, key) {
                return;
            }
            handle_storefront_key(state, key);
        }
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

// ── Storefront (configurable bindings) ──────────────────────────

fn handle_storefront_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::ScrollUp => state.scroll_by(-1),
        Action::ScrollDown => state.scroll_by(1),
        Action::PageUp => {
            let rows = state.page_rows();
            state.scroll_by(-rows);
        }
        Action::PageDown => {
            let rows = state.page_rows();
            state.scroll_by(rows);
        }
        Action::NextSection => {
            let current = state.current_section();
            let next = Section::ALL
                .get(current.index() + 1)
                .copied()
                .unwrap_or(current);
            state.scroll_to_section(next);
        }
        Action::PrevSection => {
            let current = state.current_section();
            // Mid-section goes back to the section's own top first.
            let target = if state.scroll.target() > current.offset() {
                current
            } else {
                current
                    .index()
                    .checked_sub(1)
                    .and_then(|i| Section::ALL.get(i).copied())
                    .unwrap_or(current)
            };
            state.scroll_to_section(target);
        }
        Action::ToggleCart => state.toggle_cart(),
        Action::ToggleTheme => state.toggle_theme(),
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::Quit => state.should_quit = true,
    }
}

// ── Bag panel (hardcoded keys) ──────────────────────────────────

/// Returns true when the key was consumed by the open bag panel.
fn handle_cart_key(state: &mut AppState, key: KeyEvent) -> bool {
    let line_count = state.cart.len();
    let Some(panel) = state.cart_panel.as_mut() else {
        return false;
    };

    match key.code {
        KeyCode::Esc => state.close_cart(),
        KeyCode::Up | KeyCode::Char('k') => {
            panel.selected = panel.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if panel.selected + 1 < line_count {
                panel.selected += 1;
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => adjust_selected(state, 1),
        KeyCode::Char('-') | KeyCode::Left => adjust_selected(state, -1),
        KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => remove_selected(state),
        KeyCode::Enter => checkout(state),
        _ => return false,
    }
    true
}

fn adjust_selected(state: &mut AppState, delta: i64) {
    if let Some(id) = state.selected_cart_product() {
        state.cart.increment_quantity(&id, delta);
    }
}

fn remove_selected(state: &mut AppState) {
    if let Some(id) = state.selected_cart_product() {
        state.cart.remove_line(&id);
        state.clamp_cart_selection();
    }
}

/// Checkout itself is out of scope; report what would be charged.
fn checkout(state: &mut AppState) {
    if state.cart.is_empty() {
        state.status_message = Some("Your bag is empty".to_string());
        return;
    }
    let totals = state.cart.compute_totals();
    let pieces: u64 = state.cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
    tracing::info!(
        subtotal = totals.subtotal,
        shipping = totals.shipping,
        total = totals.total,
        "checkout requested"
    );
    state.status_message = Some(format!(
        "Checkout: {pieces} piece(s), {} due",
        format_price(totals.total)
    ));
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Storefront;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => cycle(state),
                }
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Storefront {
        return;
    }

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            pointer_moved(state, mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            click(state, mouse.column, mouse.row);
        }
        MouseEventKind::ScrollUp => wheel(state, mouse.column, mouse.row, -1),
        MouseEventKind::ScrollDown => wheel(state, mouse.column, mouse.row, 1),
        _ => {}
    }
}

/// Feed the pointer to a model, or make it leave when the element is clipped
/// away at that cell.
fn track_clipped<M: OffsetMapping>(
    model: &mut PointerModel<M>,
    x: f64,
    y: f64,
    bounds: ElementBounds,
    visible: bool,
) {
    if visible {
        model.track(x, y, bounds);
    } else if model.is_hovered() {
        model.on_pointer_leave();
    }
}

/// Route a pointer position to every pointer-reactive element.
fn pointer_moved(state: &mut AppState, col: u16, row: u16) {
    // Cell centre in screen space.
    let (x, y) = (f64::from(col) + 0.5, f64::from(row) + 0.5);
    let layout = state.layout();
    let page = layout.page_area;
    let scroll = state.page_scroll();
    let in_page = point_in_rect(page, col, row);

    let cta = section_bounds(page, Section::Hero, scroll, layout::hero_cta_rect(page.width));
    track_clipped(&mut state.hero_cta, x, y, cta, in_page);

    let cards = layout::category_card_rects(page.width);
    for (model, rect) in state.category_cards.iter_mut().zip(cards) {
        let bounds = section_bounds(page, Section::Categories, scroll, rect);
        track_clipped(model, x, y, bounds, in_page);
    }

    if let (Some(panel), Some(area)) = (state.cart_panel.as_mut(), layout.cart_area) {
        let bounds = rect_bounds(checkout_button_rect(area));
        let visible = cart_footer_fits(area) && point_in_rect(area, col, row);
        track_clipped(&mut panel.checkout, x, y, bounds, visible);
    }
}

fn click(state: &mut AppState, col: u16, row: u16) {
    let layout = state.layout();

    if point_in_rect(layout.nav_area, col, row) {
        click_navbar(state, layout.nav_area, col, row);
        return;
    }

    if let Some(area) = layout.cart_area {
        if point_in_rect(area, col, row) {
            click_cart(state, area, col, row);
            return;
        }
    }

    if point_in_rect(layout.page_area, col, row) {
        // The page acts as the bag's backdrop.
        if state.cart_panel.is_some() {
            state.close_cart();
            return;
        }
        let page = layout.page_area;
        let scroll = state.page_scroll();
        let (x, y) = (f64::from(col) + 0.5, f64::from(row) + 0.5);
        let cta = section_bounds(page, Section::Hero, scroll, layout::hero_cta_rect(page.width));
        if cta.contains(x, y) {
            state.scroll_to_section(Section::Featured);
            return;
        }

        let progress = state.featured_progress.progress();
        let hit = layout::featured_card_rects(page.width, progress)
            .into_iter()
            .zip(catalog::featured())
            .find(|(rect, _)| section_bounds(page, Section::Featured, scroll, *rect).contains(x, y));
        if let Some((_, product)) = hit {
            add_to_bag(state, product);
        }
    }
}

/// One more piece of `product` in the bag.  A new line takes the first
/// listed material.
fn add_to_bag(state: &mut AppState, product: &Product) {
    if state.cart.line(product.id).is_some() {
        state.cart.increment_quantity(product.id, 1);
    } else {
        let material = product.materials.first().copied().unwrap_or(Material::Gold);
        state.cart.add_or_seed([product.to_line(material)]);
    }
    state.status_message = Some(format!("Added {} to your bag", product.name));
}

fn click_navbar(state: &mut AppState, nav_area: Rect, col: u16, row: u16) {
    let nav = NavLayout::from_area(nav_area);
    if point_in_rect(nav.cart_badge, col, row) {
        state.toggle_cart();
    } else if point_in_rect(nav.theme_toggle, col, row) {
        state.toggle_theme();
    } else if point_in_rect(nav.brand, col, row) {
        state.scroll_to_section(Section::Hero);
    } else if let Some((section, _)) = nav_link_rects(nav.links)
        .into_iter()
        .find(|(_, r)| point_in_rect(*r, col, row))
    {
        state.scroll_to_section(section);
    }
}

fn click_cart(state: &mut AppState, area: Rect, col: u16, row: u16) {
    if !state.cart.is_empty()
        && cart_footer_fits(area)
        && point_in_rect(checkout_button_rect(area), col, row)
    {
        checkout(state);
        return;
    }

    let selected = state.cart_panel.as_ref().map_or(0, |p| p.selected);
    let hit = cart_line_rects(area, state.cart.len(), selected)
        .into_iter()
        .find(|(_, r)| point_in_rect(*r, col, row));
    let Some((index, rect)) = hit else {
        return;
    };
    let Some(id) = state.cart.lines().get(index).map(|l| l.product_id.clone()) else {
        return;
    };

    let line = CartLineLayout::from_rect(rect);
    if point_in_rect(line.remove, col, row) {
        state.cart.remove_line(&id);
        state.clamp_cart_selection();
        return;
    }
    if point_in_rect(line.minus, col, row) {
        state.cart.increment_quantity(&id, -1);
    } else if point_in_rect(line.plus, col, row) {
        state.cart.increment_quantity(&id, 1);
    }
    if let Some(panel) = state.cart_panel.as_mut() {
        panel.selected = index;
    }
}

fn wheel(state: &mut AppState, col: u16, row: u16, direction: i64) {
    let line_count = state.cart.len();
    let over_cart = state
        .layout()
        .cart_area
        .is_some_and(|area| point_in_rect(area, col, row));

    if over_cart {
        if let Some(panel) = state.cart_panel.as_mut() {
            panel.selected = if direction < 0 {
                panel.selected.saturating_sub(1)
            } else {
                (panel.selected + 1).min(line_count.saturating_sub(1))
            };
        }
        return;
    }
    state.scroll_by(direction * WHEEL_ROWS);
}
