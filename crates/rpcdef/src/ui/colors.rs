use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{Ansi256Color, AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorMode {
  Always,
  #[default]
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  #[default]
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// What a piece of terminal output is, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
  Timestamp,
  Primary,
  Label,
  Value,
  Service,
  Method,
  Object,
  Accent,
  Success,
}

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Reset => ComfyColor::Reset,
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  pub const fn get(&self, role: Role) -> Color {
    if !self.enabled {
      return Color::Reset;
    }

    let (r, g, b) = match (self.theme, role) {
      (Theme::Dark, Role::Timestamp) => (118, 166, 166),
      (Theme::Light, Role::Timestamp) => (92, 62, 38),
      (Theme::Dark, Role::Primary) => (191, 126, 4),
      (Theme::Light, Role::Primary) => (70, 42, 25),
      (Theme::Dark, Role::Label) => (217, 164, 4),
      (Theme::Light, Role::Label) => (176, 103, 66),
      (Theme::Dark, Role::Value) => (242, 211, 56),
      (Theme::Light, Role::Value) => (199, 146, 76),
      (Theme::Dark, Role::Service) => (129, 180, 222),
      (Theme::Light, Role::Service) => (31, 86, 140),
      (Theme::Dark, Role::Method) => (166, 200, 120),
      (Theme::Light, Role::Method) => (64, 112, 40),
      (Theme::Dark, Role::Object) => (200, 160, 220),
      (Theme::Light, Role::Object) => (112, 60, 140),
      (Theme::Dark, Role::Accent) => (166, 84, 55),
      (Theme::Light, Role::Accent) => (211, 99, 70),
      (Theme::Dark, Role::Success) => (118, 166, 166),
      (Theme::Light, Role::Success) => (34, 142, 90),
    };
    Color::Rgb { r, g, b }
  }

  pub fn comfy(&self, role: Role) -> ComfyColor {
    IntoComfyColor::into(self.get(role))
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Black => Some(ClapColor::Ansi(AnsiColor::Black)),
      Color::Blue | Color::DarkBlue => Some(ClapColor::Ansi(AnsiColor::Blue)),
      Color::Cyan | Color::DarkCyan => Some(ClapColor::Ansi(AnsiColor::Cyan)),
      Color::DarkGreen | Color::Green => Some(ClapColor::Ansi(AnsiColor::Green)),
      Color::DarkGrey | Color::Grey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      Color::DarkMagenta | Color::Magenta => Some(ClapColor::Ansi(AnsiColor::Magenta)),
      Color::DarkRed | Color::Red => Some(ClapColor::Ansi(AnsiColor::Red)),
      Color::DarkYellow | Color::Yellow => Some(ClapColor::Ansi(AnsiColor::Yellow)),
      Color::White => Some(ClapColor::Ansi(AnsiColor::White)),
      Color::AnsiValue(val) => Some(ClapColor::Ansi256(Ansi256Color(val))),
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
    }
  }

  /// Help output styles, always in the dark palette.
  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(colors.get(Role::Label))))
      .usage(Style::new().bold().fg_color(Self::to_clap(colors.get(Role::Label))))
      .literal(Style::new().fg_color(Self::to_clap(colors.get(Role::Service))))
      .placeholder(Style::new().fg_color(Self::to_clap(colors.get(Role::Method))))
      .error(Style::new().bold().fg_color(Self::to_clap(colors.get(Role::Accent))))
      .valid(Style::new().fg_color(Self::to_clap(colors.get(Role::Success))))
      .invalid(Style::new().bold().fg_color(Self::to_clap(colors.get(Role::Accent))))
  }
}

/// Color is decided on stderr, where the log goes.
pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()),
  }
}

/// `COLORFGBG` is `fg;bg`; a background of 8 or above is light.
fn theme_from_colorfgbg(value: Option<&str>) -> Theme {
  if let Some(value) = value
    && let Some(bg) = value.split(';').next_back()
    && let Ok(bg) = bg.parse::<u8>()
    && bg >= 8
  {
    return Theme::Light;
  }
  Theme::Dark
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.get(Role::Service), Color::Reset);
    assert_eq!(colors.comfy(Role::Label), ComfyColor::Reset);
  }

  #[test]
  fn test_themes_differ() {
    let dark = Colors::new(true, Theme::Dark);
    let light = Colors::new(true, Theme::Light);
    assert_ne!(dark.get(Role::Primary), light.get(Role::Primary));
  }

  #[test]
  fn test_theme_from_colorfgbg() {
    assert_eq!(theme_from_colorfgbg(Some("0;15")), Theme::Light);
    assert_eq!(theme_from_colorfgbg(Some("15;0")), Theme::Dark);
    assert_eq!(theme_from_colorfgbg(Some("garbage")), Theme::Dark);
    assert_eq!(theme_from_colorfgbg(None), Theme::Dark);
  }

  #[test]
  fn test_explicit_modes() {
    assert!(colors_enabled(ColorMode::Always));
    assert!(!colors_enabled(ColorMode::Never));
    assert_eq!(detect_theme(ThemeMode::Light), Theme::Light);
  }
}
