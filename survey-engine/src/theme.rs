//! Theme derivation: six author-picked inputs expand into the full token set.
//!
//! `build_theme` is a pure function. Every derived color is computed with
//! integer rounding and formatted with fixed precision, so identical inputs
//! always yield byte-identical tokens.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use survey_engine_types::{CardShadow, ThemeSettings};

/// Backgrounds darker than this relative luminance get the dark branch.
pub const DARK_LUMINANCE_THRESHOLD: f64 = 0.35;

const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xff, 0xff, 0xff);
const DEFAULT_ACCENT: Rgb = Rgb::new(0x63, 0x66, 0xf1);
const DEFAULT_CARD_BACKGROUND: Rgb = Rgb::new(0xff, 0xff, 0xff);
const DEFAULT_INPUT_BACKGROUND: Rgb = Rgb::new(0xff, 0xff, 0xff);
const DEFAULT_FONT: Rgb = Rgb::new(0x1f, 0x29, 0x37);

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned for strings that are not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid hex color: {0:?}")]
pub struct InvalidColor(pub String);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` / `#rrggbb` (the `#` is optional, case-insensitive).
    pub fn parse_hex(input: &str) -> Result<Self, InvalidColor> {
        let invalid = || InvalidColor(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(invalid()),
        };
        let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// WCAG relative luminance in `[0, 1]`.
    pub fn relative_luminance(&self) -> f64 {
        fn linearize(channel: u8) -> f64 {
            let c = f64::from(channel) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// Check if this color counts as a dark background.
    pub fn is_dark(&self) -> bool {
        is_dark_luminance(self.relative_luminance())
    }

    /// Move each channel toward white by `amount` (0..=1).
    pub fn lighten(&self, amount: f64) -> Self {
        self.map(|c| c + (255.0 - c) * amount)
    }

    /// Move each channel toward black by `amount` (0..=1).
    pub fn darken(&self, amount: f64) -> Self {
        self.map(|c| c * (1.0 - amount))
    }

    /// Blend toward `other`; `weight` 0 keeps `self`, 1 yields `other`.
    pub fn mix(&self, other: Rgb, weight: f64) -> Self {
        let blend = |a: u8, b: u8| {
            round_channel(f64::from(a) * (1.0 - weight) + f64::from(b) * weight)
        };
        Self::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    /// CSS `rgba(...)` with two-decimal alpha.
    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {:.2})", self.r, self.g, self.b, alpha)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            round_channel(f(f64::from(self.r))),
            round_channel(f(f64::from(self.g))),
            round_channel(f(f64::from(self.b))),
        )
    }
}

fn round_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

/// Classify a luminance value; exactly at the threshold counts as light.
pub fn is_dark_luminance(luminance: f64) -> bool {
    luminance < DARK_LUMINANCE_THRESHOLD
}

/// The full set of derived theme tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeTokens {
    pub is_dark: bool,
    pub background: String,
    pub card_background: String,
    pub input_background: String,
    pub text: String,
    pub text_muted: String,
    pub text_subtle: String,
    pub accent: String,
    pub accent_hover: String,
    pub accent_active: String,
    pub accent_soft: String,
    pub accent_contrast: String,
    pub border: String,
    pub border_strong: String,
    pub border_focus: String,
    pub input_border: String,
    pub input_hover_background: String,
    pub input_placeholder: String,
    pub option_hover_background: String,
    pub option_selected_background: String,
    pub option_selected_border: String,
    pub progress_track: String,
    pub progress_fill: String,
    pub glow: String,
    pub focus_ring: String,
    pub card_shadow: String,
    pub error: String,
    pub success: String,
}

impl ThemeTokens {
    /// Tokens as CSS custom properties, ordered by name.
    pub fn to_css_variables(&self) -> BTreeMap<&'static str, String> {
        let entries: [(&'static str, &String); 27] = [
            ("--survey-background", &self.background),
            ("--survey-card-background", &self.card_background),
            ("--survey-input-background", &self.input_background),
            ("--survey-text", &self.text),
            ("--survey-text-muted", &self.text_muted),
            ("--survey-text-subtle", &self.text_subtle),
            ("--survey-accent", &self.accent),
            ("--survey-accent-hover", &self.accent_hover),
            ("--survey-accent-active", &self.accent_active),
            ("--survey-accent-soft", &self.accent_soft),
            ("--survey-accent-contrast", &self.accent_contrast),
            ("--survey-border", &self.border),
            ("--survey-border-strong", &self.border_strong),
            ("--survey-border-focus", &self.border_focus),
            ("--survey-input-border", &self.input_border),
            ("--survey-input-hover-background", &self.input_hover_background),
            ("--survey-input-placeholder", &self.input_placeholder),
            ("--survey-option-hover-background", &self.option_hover_background),
            ("--survey-option-selected-background", &self.option_selected_background),
            ("--survey-option-selected-border", &self.option_selected_border),
            ("--survey-progress-track", &self.progress_track),
            ("--survey-progress-fill", &self.progress_fill),
            ("--survey-glow", &self.glow),
            ("--survey-focus-ring", &self.focus_ring),
            ("--survey-card-shadow", &self.card_shadow),
            ("--survey-error", &self.error),
            ("--survey-success", &self.success),
        ];
        entries
            .into_iter()
            .map(|(name, value)| (name, value.clone()))
            .collect()
    }
}

/// Derive the theme tokens from the six author-picked inputs.
///
/// Unparseable colors fall back to the default for their slot.
pub fn build_theme(
    bg_color: &str,
    accent_color: &str,
    card_bg_color: &str,
    card_shadow: CardShadow,
    input_bg_color: &str,
    font_color: &str,
) -> ThemeTokens {
    let bg = color_or(bg_color, DEFAULT_BACKGROUND);
    let accent = color_or(accent_color, DEFAULT_ACCENT);
    let card = color_or(card_bg_color, DEFAULT_CARD_BACKGROUND);
    let input = color_or(input_bg_color, DEFAULT_INPUT_BACKGROUND);
    let font = color_or(font_color, DEFAULT_FONT);

    let dark = bg.is_dark();
    // Dark themes derive by lightening, light themes by darkening.
    let shift = |color: Rgb, amount: f64| {
        if dark {
            color.lighten(amount)
        } else {
            color.darken(amount)
        }
    };
    let pick = |dark_value: f64, light_value: f64| if dark { dark_value } else { light_value };

    ThemeTokens {
        is_dark: dark,
        background: bg.to_string(),
        card_background: card.to_string(),
        input_background: input.to_string(),
        text: font.to_string(),
        text_muted: font.mix(bg, 0.40).to_string(),
        text_subtle: font.mix(bg, 0.60).to_string(),
        accent: accent.to_string(),
        accent_hover: shift(accent, 0.12).to_string(),
        accent_active: shift(accent, 0.20).to_string(),
        accent_soft: accent.rgba(pick(0.18, 0.10)),
        accent_contrast: if accent.is_dark() { "#ffffff" } else { "#111827" }.to_string(),
        border: shift(bg, pick(0.15, 0.12)).to_string(),
        border_strong: shift(bg, pick(0.25, 0.22)).to_string(),
        border_focus: accent.to_string(),
        input_border: shift(input, pick(0.18, 0.15)).to_string(),
        input_hover_background: shift(input, pick(0.06, 0.03)).to_string(),
        input_placeholder: font.mix(input, 0.50).to_string(),
        option_hover_background: shift(card, pick(0.08, 0.04)).to_string(),
        option_selected_background: accent.rgba(pick(0.25, 0.12)),
        option_selected_border: accent.to_string(),
        progress_track: shift(bg, pick(0.10, 0.08)).to_string(),
        progress_fill: accent.to_string(),
        glow: accent.rgba(pick(0.45, 0.25)),
        focus_ring: format!("0 0 0 3px {}", accent.rgba(pick(0.35, 0.20))),
        card_shadow: card_shadow_token(card_shadow, dark),
        error: if dark { "#f87171" } else { "#dc2626" }.to_string(),
        success: if dark { "#4ade80" } else { "#16a34a" }.to_string(),
    }
}

/// Derive the tokens for a survey's stored theme settings.
pub fn build_theme_from_settings(settings: &ThemeSettings) -> ThemeTokens {
    build_theme(
        &settings.bg_color,
        &settings.accent_color,
        &settings.card_bg_color,
        settings.card_shadow,
        &settings.input_bg_color,
        &settings.font_color,
    )
}

fn color_or(input: &str, fallback: Rgb) -> Rgb {
    Rgb::parse_hex(input).unwrap_or_else(|err| {
        tracing::debug!(%err, %fallback, "falling back to default theme color");
        fallback
    })
}

fn card_shadow_token(shadow: CardShadow, dark: bool) -> String {
    let (geometry, light_alpha, dark_alpha) = match shadow {
        CardShadow::None => return "none".to_string(),
        CardShadow::Subtle => ("0 1px 3px", 0.08, 0.40),
        CardShadow::Medium => ("0 4px 12px", 0.12, 0.50),
        CardShadow::Strong => ("0 10px 30px", 0.18, 0.60),
    };
    let alpha = if dark { dark_alpha } else { light_alpha };
    format!("{geometry} {}", Rgb::new(0, 0, 0).rgba(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_theme() -> ThemeTokens {
        build_theme(
            "#1a1a2e",
            "#e94560",
            "#16213e",
            CardShadow::Medium,
            "#0f3460",
            "#eaeaea",
        )
    }

    fn light_theme() -> ThemeTokens {
        build_theme(
            "#ffffff",
            "#6366f1",
            "#ffffff",
            CardShadow::Subtle,
            "#ffffff",
            "#1f2937",
        )
    }

    #[test]
    fn same_inputs_give_identical_tokens() {
        assert_eq!(dark_theme(), dark_theme());
        assert_eq!(dark_theme().to_css_variables(), dark_theme().to_css_variables());
        assert_eq!(light_theme(), light_theme());
        assert_eq!(
            light_theme().to_css_variables(),
            light_theme().to_css_variables()
        );
    }

    #[test]
    fn dark_background_lightens_derived_tokens() {
        let theme = dark_theme();
        assert!(theme.is_dark);
        assert_eq!(theme.background, "#1a1a2e");
        assert_eq!(theme.border, "#3c3c4d");
        assert_eq!(theme.error, "#f87171");
        assert_eq!(theme.card_shadow, "0 4px 12px rgba(0, 0, 0, 0.50)");
    }

    #[test]
    fn light_background_darkens_derived_tokens() {
        let theme = light_theme();
        assert!(!theme.is_dark);
        assert_eq!(theme.border, "#e0e0e0");
        assert_eq!(theme.border_strong, "#c7c7c7");
        assert_eq!(theme.progress_track, "#ebebeb");
        assert_eq!(theme.accent_hover, "#575ad4");
        assert_eq!(theme.accent_contrast, "#ffffff");
        assert_eq!(theme.glow, "rgba(99, 102, 241, 0.25)");
        assert_eq!(theme.focus_ring, "0 0 0 3px rgba(99, 102, 241, 0.20)");
    }

    #[test]
    fn luminance_threshold_boundary() {
        assert!(is_dark_luminance(0.34));
        assert!(!is_dark_luminance(0.35));
        assert!(!is_dark_luminance(0.36));

        let just_below = Rgb::parse_hex("#9f9f9f").unwrap();
        let just_above = Rgb::parse_hex("#a0a0a0").unwrap();
        assert!(just_below.relative_luminance() < 0.35);
        assert!(just_above.relative_luminance() > 0.35);
        assert!(build_theme("#9f9f9f", "", "", CardShadow::None, "", "").is_dark);
        assert!(!build_theme("#a0a0a0", "", "", CardShadow::None, "", "").is_dark);
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(Rgb::new(0, 0, 0).relative_luminance(), 0.0);
        assert!((Rgb::new(255, 255, 255).relative_luminance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::parse_hex("#FFF").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::parse_hex("1a1a2e").unwrap(), Rgb::new(0x1a, 0x1a, 0x2e));
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#+12345").is_err());
        assert!(Rgb::parse_hex("teal").is_err());
        assert_eq!(Rgb::new(10, 11, 255).to_string(), "#0a0bff");
    }

    #[test]
    fn invalid_inputs_fall_back_to_defaults() {
        let theme = build_theme("nope", "", "??", CardShadow::None, "", "bad");
        assert_eq!(theme.background, "#ffffff");
        assert_eq!(theme.accent, "#6366f1");
        assert_eq!(theme.text, "#1f2937");
        assert_eq!(theme.card_shadow, "none");
    }

    #[test]
    fn css_variables_cover_every_token() {
        let vars = light_theme().to_css_variables();
        assert_eq!(vars.len(), 27);
        assert_eq!(vars["--survey-accent"], "#6366f1");
        assert!(vars.keys().all(|k| k.starts_with("--survey-")));
    }

    #[test]
    fn settings_helper_matches_direct_call() {
        let settings = ThemeSettings::default();
        assert_eq!(build_theme_from_settings(&settings), light_theme());
    }
}
