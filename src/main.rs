//! A terminal storefront for a fine-jewelry house.
//!
//! Run the binary to browse the shop.  Run with `--summary` to print the
//! bag and its totals without opening the interface.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Datelike;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::config::{AppConfig, ThemeMode};
use crate::core::{cart::CartLedger, catalog};
use crate::ui::{
    cart_panel::{shipping_label, CartPanelView},
    navbar::{Navbar, ScrollProgressBar},
    popup,
    storefront::Storefront,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal jewelry storefront")]
struct Cli {
    /// Start in this theme (not saved unless toggled in the app).
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Config file to load and save instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame interval in milliseconds.
    #[arg(long = "frame-ms", default_value_t = 16)]
    frame_ms: u64,

    /// Print the bag and its totals, then exit.
    #[arg(long)]
    summary: bool,

    /// Leave the mouse to the terminal (no hover effects or clicks).
    #[arg(long = "no-mouse")]
    no_mouse: bool,
}

/// Plain-text bag summary for `--summary`.
fn bag_summary(cart: &CartLedger) -> String {
    let mut out = String::new();
    for line in cart.lines() {
        out.push_str(&format!(
            "{:<24} {:<14} {:>3} × {:>9}  {:>10}\n",
            line.name,
            line.selected_material.label(),
            line.quantity,
            catalog::format_price(line.unit_price),
            catalog::format_price(line.line_total()),
        ));
    }
    let totals = cart.compute_totals();
    out.push_str(&format!("{:>64}\n", format!("Subtotal {}", catalog::format_price(totals.subtotal))));
    out.push_str(&format!("{:>64}\n", format!("Shipping {}", shipping_label(&totals))));
    out.push_str(&format!("{:>64}\n", format!("Total {}", catalog::format_price(totals.total))));
    out
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    // ── summary mode ──────────────────────────────────────────
    if cli.summary {
        let mut cart = CartLedger::new(config.shipping);
        cart.add_or_seed(catalog::demo_cart_lines());
        print!("{}", bag_summary(&cart));
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    // Restore the terminal before the panic message is printed.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    if !cli.no_mouse {
        execute!(stderr_handle, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut state = AppState::new(
        config,
        Rect::new(0, 0, size.width, size.height),
        Instant::now(),
    );
    tracing::info!(width = size.width, height = size.height, "storefront opened");

    let mut events = spawn_event_reader();
    let mut frames = tokio::time::interval(Duration::from_millis(cli.frame_ms.max(1)));
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let year = chrono::Local::now().year();

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            let layout = state.layout();

            frame.render_widget(
                Navbar {
                    theme: &state.theme,
                    current: state.current_section(),
                    scrolled: state.nav_scrolled(),
                    bag_count: state.cart.len(),
                },
                layout.nav_area,
            );
            frame.render_widget(
                ScrollProgressBar {
                    theme: &state.theme,
                    progress: state.page_progress.progress(),
                },
                layout.progress_area,
            );
            frame.render_widget(Storefront { state: &state, year }, layout.page_area);

            if let (Some(panel), Some(area)) = (state.cart_panel.as_ref(), layout.cart_area) {
                frame.render_widget(
                    CartPanelView {
                        theme: &state.theme,
                        ledger: &state.cart,
                        panel,
                    },
                    area,
                );
            }

            let hint = state.config.status_bar_hint();
            let status_text = match state.active_view {
                ActiveView::Storefront => state.status_message.as_deref().unwrap_or(&hint),
                ActiveView::SettingsMenu => "",
            };
            let status = Paragraph::new(status_text).style(state.theme.status_bar_style());
            frame.render_widget(status, layout.status_area);

            if state.active_view == ActiveView::SettingsMenu {
                frame.render_widget(popup::SettingsPopup { state: &state }, frame.area());
            }
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => state.resize(w, h),
                }
            }

            _ = frames.tick() => {
                state.advance_frame(Instant::now());
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    if !cli.no_mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    terminal.show_cursor()?;

    tracing::info!(
        frames = state.clock.frames(),
        secs = state.clock.elapsed().as_secs_f64(),
        "storefront closed"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cart::ShippingPolicy;

    #[test]
    fn summary_lists_lines_and_totals() {
        let mut cart = CartLedger::new(ShippingPolicy::default());
        cart.add_or_seed(catalog::demo_cart_lines());
        let text = bag_summary(&cart);
        assert!(text.contains("Eternal Solitaire"));
        assert!(text.contains("Subtotal $20,900"));
        assert!(text.contains("Shipping $500"));
        assert!(text.contains("Total $21,400"));
    }

    #[test]
    fn cli_parses_overrides() {
        let cli = Cli::parse_from(["aurea", "--theme", "light", "--frame-ms", "33", "--no-mouse"]);
        assert_eq!(cli.theme, Some(ThemeMode::Light));
        assert_eq!(cli.frame_ms, 33);
        assert!(cli.no_mouse);
        assert!(!cli.summary);
    }
}
