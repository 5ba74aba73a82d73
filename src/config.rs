//! User configuration — theme preference, shop policy, motion tuning and
//! keybindings, with persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/aurea/config.toml` (default `~/.config/aurea/config.toml`).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::cart::ShippingPolicy;
use crate::core::pointer::{MagneticPull, SpringConfig, Tilt};

/// Default visible fraction at which a section counts as "in view".
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown theme `{0}` (expected `dark` or `light`)")]
    UnknownTheme(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("no usable key in `{value}` for `{key}`")]
    InvalidBinding { key: String, value: String },
    #[error("failed to write config to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ───────────────────────────────────────── theme mode ────────

/// Presentation mode, persisted as the user's preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ThemeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(ConfigError::UnknownTheme(other.to_string())),
        }
    }
}

// ───────────────────────────────────────── actions ───────────

/// Configurable storefront actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    NextSection,
    PrevSection,
    ToggleCart,
    ToggleTheme,
    OpenSettings,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::NextSection,
        Action::PrevSection,
        Action::ToggleCart,
        Action::ToggleTheme,
        Action::OpenSettings,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::NextSection => "next_section",
            Action::PrevSection => "prev_section",
            Action::ToggleCart => "toggle_cart",
            Action::ToggleTheme => "toggle_theme",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// Key code + modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT take part in the comparison.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    fn prefix(&self) -> String {
        let mut s = String::new();
        for (flag, label) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(label);
            }
        }
        s
    }

    /// Short label for hints (e.g. `"↑"`, `"Ctrl+c"`, `"?"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::PageUp => "PgUp".to_string(),
            KeyCode::PageDown => "PgDn".to_string(),
            _ => config_key_name(self.code),
        };
        format!("{}{key}", self.prefix())
    }

    fn to_config_string(&self) -> String {
        format!("{}{}", self.prefix(), config_key_name(self.code))
    }

    /// Parse `"Ctrl+c"`, `"Shift+BackTab"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.pop()?;
        let mut modifiers = KeyModifiers::NONE;
        for part in parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key_part.to_ascii_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };
        Some(Self { code, modifiers })
    }
}

fn config_key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::BackTab => "BackTab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Delete => "Delete".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub theme: ThemeMode,
    pub shipping: ShippingPolicy,
    pub magnetic: MagneticPull,
    pub magnetic_spring: SpringConfig,
    pub tilt: Tilt,
    pub tilt_spring: SpringConfig,
    /// Visible fraction at which a section reveals itself.
    pub reveal_threshold: f64,
    /// Where `save` writes.  `None` keeps the config in memory only.
    path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            theme: ThemeMode::default(),
            shipping: ShippingPolicy::default(),
            magnetic: MagneticPull::default(),
            magnetic_spring: SpringConfig::MAGNETIC,
            tilt: Tilt::default(),
            tilt_spring: SpringConfig::TILT,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            path: None,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(
            Action::PageDown,
            vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)],
        );
        m.insert(NextSection, vec![KeyBind::new(Tab, n), KeyBind::new(Char('n'), n)]);
        m.insert(
            PrevSection,
            vec![
                KeyBind::new(BackTab, KeyModifiers::SHIFT),
                KeyBind::new(Char('p'), n),
            ],
        );
        m.insert(ToggleCart, vec![KeyBind::new(Char('c'), n)]);
        m.insert(ToggleTheme, vec![KeyBind::new(Char('t'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);
        m
    }

    /// Action bound to `event`; the binding with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: next section | {}: bag | {}: theme | {}: settings | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::ToggleCart),
            self.short_binding(Action::ToggleTheme),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load from `path`; a missing or unreadable file gives defaults.
    /// `save` will write back to `path`.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => {
                let (config, problems) = Self::parse(&contents);
                for problem in problems {
                    tracing::warn!("{}: {problem}", path.display());
                }
                config
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!("cannot read {}: {e}", path.display());
                }
                Self::default()
            }
        };
        config.path = Some(path.to_path_buf());
        config
    }

    /// Persist to the path this config was loaded from.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, self.serialise())
        };
        write().map_err(|source| ConfigError::Write {
            path: path.clone(),
            source,
        })
    }

    /// Parse config text.  Bad values keep their defaults and are reported.
    pub fn parse(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Self::default();
        let mut problems = Vec::new();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if let Err(e) = config.apply(key.trim(), value.trim()) {
                problems.push(e);
            }
        }

        (config, problems)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "theme" => self.theme = value.parse()?,
            "free_shipping_threshold" => self.shipping.free_threshold = number(key, value)?,
            "flat_shipping_fee" => self.shipping.flat_fee = number(key, value)?,
            "magnetic_strength" => self.magnetic.strength = non_negative(key, value)?,
            "magnetic_stiffness" => self.magnetic_spring.stiffness = positive(key, value)?,
            "magnetic_damping" => self.magnetic_spring.damping = non_negative(key, value)?,
            "magnetic_mass" => self.magnetic_spring.mass = positive(key, value)?,
            "tilt_range_deg" => self.tilt.max_angle_deg = non_negative(key, value)?,
            "tilt_stiffness" => self.tilt_spring.stiffness = positive(key, value)?,
            "tilt_damping" => self.tilt_spring.damping = non_negative(key, value)?,
            "tilt_mass" => self.tilt_spring.mass = positive(key, value)?,
            "reveal_threshold" => {
                let v = positive(key, value)?;
                if v > 1.0 {
                    return Err(invalid(key, value));
                }
                self.reveal_threshold = v;
            }
            _ => {
                // Unknown keys are ignored so older binaries accept newer files.
                let Some(action) = Action::from_config_key(key) else {
                    return Ok(());
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    return Err(ConfigError::InvalidBinding {
                        key: key.to_string(),
                        value: value.to_string(),
                    });
                }
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# aurea configuration".to_string(),
            String::new(),
            "# Presentation".to_string(),
            format!("theme = {}", self.theme),
            format!("reveal_threshold = {}", self.reveal_threshold),
            String::new(),
            "# Bag".to_string(),
            format!("free_shipping_threshold = {}", self.shipping.free_threshold),
            format!("flat_shipping_fee = {}", self.shipping.flat_fee),
            String::new(),
            "# Motion".to_string(),
            format!("magnetic_strength = {}", self.magnetic.strength),
            format!("magnetic_stiffness = {}", self.magnetic_spring.stiffness),
            format!("magnetic_damping = {}", self.magnetic_spring.damping),
            format!("magnetic_mass = {}", self.magnetic_spring.mass),
            format!("tilt_range_deg = {}", self.tilt.max_angle_deg),
            format!("tilt_stiffness = {}", self.tilt_spring.stiffness),
            format!("tilt_damping = {}", self.tilt_spring.damping),
            format!("tilt_mass = {}", self.tilt_spring.mass),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn number<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn non_negative(key: &str, value: &str) -> Result<f64, ConfigError> {
    let v: f64 = number(key, value)?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(invalid(key, value))
    }
}

fn positive(key: &str, value: &str) -> Result<f64, ConfigError> {
    let v = non_negative(key, value)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(invalid(key, value))
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/aurea/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("aurea").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shop_policy() {
        let c = AppConfig::default();
        assert_eq!(c.theme, ThemeMode::Dark);
        assert_eq!(c.shipping.free_threshold, 50_000);
        assert_eq!(c.shipping.flat_fee, 500);
        assert_eq!(c.magnetic.strength, 0.3);
        assert_eq!(c.tilt.max_angle_deg, 15.0);
    }

    #[test]
    fn parses_values_and_bindings() {
        let text = "\
# comment
theme = light
free_shipping_threshold = 1000
magnetic_strength = 0.5
tilt_range_deg = 10
toggle_cart = b, Ctrl+o
";
        let (c, problems) = AppConfig::parse(text);
        assert!(problems.is_empty());
        assert_eq!(c.theme, ThemeMode::Light);
        assert_eq!(c.shipping.free_threshold, 1000);
        assert_eq!(c.magnetic.strength, 0.5);
        assert_eq!(c.tilt.max_angle_deg, 10.0);
        let b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert_eq!(c.match_key(b), Some(Action::ToggleCart));
        assert_eq!(c.match_key(ctrl_o), Some(Action::ToggleCart));
        assert_eq!(
            c.match_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn bad_values_keep_defaults() {
        let text = "theme = sepia\nflat_shipping_fee = -3\nmagnetic_mass = 0\nreveal_threshold = 2\nquit = Hyper+q\n";
        let (c, problems) = AppConfig::parse(text);
        assert_eq!(problems.len(), 5);
        assert!(matches!(problems[0], ConfigError::UnknownTheme(_)));
        assert_eq!(c.theme, ThemeMode::Dark);
        assert_eq!(c.shipping.flat_fee, 500);
        assert_eq!(c.magnetic_spring.mass, 0.5);
        assert_eq!(c.reveal_threshold, DEFAULT_REVEAL_THRESHOLD);
        assert_eq!(
            c.match_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut c = AppConfig::default();
        c.theme = ThemeMode::Light;
        c.tilt.max_angle_deg = 20.0;
        c.shipping.flat_fee = 750;
        let (back, problems) = AppConfig::parse(&c.serialise());
        assert!(problems.is_empty());
        assert_eq!(back.theme, ThemeMode::Light);
        assert_eq!(back.tilt.max_angle_deg, 20.0);
        assert_eq!(back.shipping.flat_fee, 750);
        assert_eq!(back.bindings, c.bindings);
    }

    #[test]
    fn shift_tab_goes_back() {
        let c = AppConfig::default();
        let ev = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(c.match_key(ev), Some(Action::PrevSection));
    }

    #[test]
    fn in_memory_config_saves_nowhere() {
        assert!(AppConfig::default().save().is_ok());
    }

    #[test]
    fn theme_toggles_both_ways() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Light.toggled().toggled(), ThemeMode::Light);
        assert_eq!("LIGHT".parse::<ThemeMode>().ok(), Some(ThemeMode::Light));
    }
}
