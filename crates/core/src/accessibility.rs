//! Accessibility preferences and the presentation they imply.
//!
//! [`AccessibilitySettings`] is plain state. [`Presentation`] is derived from
//! it, and an [`EffectsApplier`] is the only place where presentation changes
//! reach the screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Multiplier applied to the base font size while `large_text` is on.
pub const LARGE_TEXT_FACTOR: f32 = 1.25;

/// Root font size before any scaling, in CSS pixels.
pub const BASE_FONT_PX: f32 = 16.0;

//
// ─── FONT SCALE ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FontScaleError {
    #[error("font scale must be between {min} and {max}", min = FontScale::MIN, max = FontScale::MAX)]
    OutOfRange,

    #[error("font scale must be a multiple of {step}", step = FontScale::STEP)]
    OffStep,
}

/// Font scale percentage: `80..=150` in steps of `10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FontScale(u8);

impl FontScale {
    pub const MIN: u8 = 80;
    pub const MAX: u8 = 150;
    pub const STEP: u8 = 10;
    pub const DEFAULT: FontScale = FontScale(100);

    /// # Errors
    ///
    /// Returns `FontScaleError` if `percent` is outside the range or not on a step.
    pub fn new(percent: u8) -> Result<Self, FontScaleError> {
        if !(Self::MIN..=Self::MAX).contains(&percent) {
            return Err(FontScaleError::OutOfRange);
        }
        if percent % Self::STEP != 0 {
            return Err(FontScaleError::OffStep);
        }
        Ok(Self(percent))
    }

    #[must_use]
    pub fn percent(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn factor(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    /// One step up, saturating at `MAX`.
    #[must_use]
    pub fn increased(self) -> Self {
        Self(self.0.saturating_add(Self::STEP).min(Self::MAX))
    }

    /// One step down, saturating at `MIN`.
    #[must_use]
    pub fn decreased(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP).max(Self::MIN))
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for FontScale {
    type Error = FontScaleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FontScale> for u8 {
    fn from(scale: FontScale) -> Self {
        scale.0
    }
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// The on/off preferences of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    HighContrast,
    LargeText,
    ReducedMotion,
    DarkMode,
    KeyboardNav,
    ScreenReaderAnnounce,
}

impl Toggle {
    pub const ALL: [Toggle; 6] = [
        Self::HighContrast,
        Self::LargeText,
        Self::ReducedMotion,
        Self::DarkMode,
        Self::KeyboardNav,
        Self::ScreenReaderAnnounce,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::HighContrast => "High contrast",
            Self::LargeText => "Large text",
            Self::ReducedMotion => "Reduce motion",
            Self::DarkMode => "Dark mode",
            Self::KeyboardNav => "Keyboard navigation",
            Self::ScreenReaderAnnounce => "Screen reader announcements",
        }
    }
}

/// A polite live-region message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement(String);

impl Announcement {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// What the live region shows, with a counter bumped on every post.
///
/// An expiry timer only clears the message it was started for, so a repeat
/// of the same text is not cut short by the earlier timer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementSlot {
    current: Option<Announcement>,
    generation: u64,
}

impl AnnouncementSlot {
    /// Show `announcement` and return the generation to pass to `expire`.
    pub fn post(&mut self, announcement: Announcement) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.current = Some(announcement);
        self.generation
    }

    #[must_use]
    pub fn current(&self) -> Option<&Announcement> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while `generation` is the latest post and still showing.
    #[must_use]
    pub fn is_showing(&self, generation: u64) -> bool {
        self.generation == generation && self.current.is_some()
    }

    /// Clear the message posted as `generation`. Later posts are kept.
    pub fn expire(&mut self, generation: u64) -> bool {
        let cleared = self.is_showing(generation);
        if cleared {
            self.current = None;
        }
        cleared
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibilitySettings {
    high_contrast: bool,
    large_text: bool,
    reduced_motion: bool,
    dark_mode: bool,
    keyboard_nav: bool,
    screen_reader_announce: bool,
    font_scale: FontScale,
}

impl AccessibilitySettings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::HighContrast => self.high_contrast,
            Toggle::LargeText => self.large_text,
            Toggle::ReducedMotion => self.reduced_motion,
            Toggle::DarkMode => self.dark_mode,
            Toggle::KeyboardNav => self.keyboard_nav,
            Toggle::ScreenReaderAnnounce => self.screen_reader_announce,
        }
    }

    #[must_use]
    pub fn font_scale(&self) -> FontScale {
        self.font_scale
    }

    /// Set a toggle. Returns an announcement when one should be read out.
    pub fn set(&mut self, toggle: Toggle, value: bool) -> Option<Announcement> {
        if self.get(toggle) == value {
            return None;
        }
        *self.slot(toggle) = value;
        let state = if value { "on" } else { "off" };
        let message = format!("{} {state}", toggle.label());
        // Switching announcements off is still read out once.
        if toggle == Toggle::ScreenReaderAnnounce {
            return Some(Announcement::new(message));
        }
        self.announce(message)
    }

    pub fn toggle(&mut self, toggle: Toggle) -> Option<Announcement> {
        let next = !self.get(toggle);
        self.set(toggle, next)
    }

    pub fn set_font_scale(&mut self, scale: FontScale) -> Option<Announcement> {
        if self.font_scale == scale {
            return None;
        }
        self.font_scale = scale;
        self.announce(format!("Text size {}%", scale.percent()))
    }

    pub fn increase_font_scale(&mut self) -> Option<Announcement> {
        self.set_font_scale(self.font_scale.increased())
    }

    pub fn decrease_font_scale(&mut self) -> Option<Announcement> {
        self.set_font_scale(self.font_scale.decreased())
    }

    /// Restore defaults. Always produces exactly one announcement.
    pub fn reset(&mut self) -> Announcement {
        *self = Self::default();
        Announcement::new("Accessibility settings reset to defaults")
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    fn slot(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::HighContrast => &mut self.high_contrast,
            Toggle::LargeText => &mut self.large_text,
            Toggle::ReducedMotion => &mut self.reduced_motion,
            Toggle::DarkMode => &mut self.dark_mode,
            Toggle::KeyboardNav => &mut self.keyboard_nav,
            Toggle::ScreenReaderAnnounce => &mut self.screen_reader_announce,
        }
    }

    fn announce(&self, message: String) -> Option<Announcement> {
        self.screen_reader_announce
            .then(|| Announcement::new(message))
    }
}

//
// ─── PRESENTATION ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Document-level presentation derived from the settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub root_classes: Vec<&'static str>,
    pub color_scheme: ColorScheme,
    pub base_font_px: f32,
    /// Animation/transition duration override, `None` for the stylesheet default.
    pub animation_duration: Option<&'static str>,
}

impl Presentation {
    #[must_use]
    pub fn from_settings(settings: &AccessibilitySettings) -> Self {
        let mut root_classes = Vec::new();
        if settings.high_contrast {
            root_classes.push("a11y-high-contrast");
        }
        if settings.large_text {
            root_classes.push("a11y-large-text");
        }
        if settings.reduced_motion {
            root_classes.push("a11y-reduced-motion");
        }
        if settings.dark_mode {
            root_classes.push("a11y-dark");
        }
        if settings.keyboard_nav {
            root_classes.push("a11y-keyboard-nav");
        }

        let large = if settings.large_text {
            LARGE_TEXT_FACTOR
        } else {
            1.0
        };

        Self {
            root_classes,
            color_scheme: if settings.dark_mode {
                ColorScheme::Dark
            } else {
                ColorScheme::Light
            },
            base_font_px: BASE_FONT_PX * large * settings.font_scale.factor(),
            animation_duration: settings.reduced_motion.then_some("0.01ms"),
        }
    }

    #[must_use]
    pub fn class_list(&self) -> String {
        self.root_classes.join(" ")
    }

    /// Inline CSS custom properties for the root element.
    #[must_use]
    pub fn root_style(&self) -> String {
        let mut style = format!(
            "--base-font-size: {}px; color-scheme: {};",
            self.base_font_px,
            self.color_scheme.as_str()
        );
        if let Some(duration) = self.animation_duration {
            style.push_str(&format!(" --animation-duration: {duration};"));
        }
        style
    }
}

/// Boundary that applies presentation and announcements to the screen.
pub trait EffectsApplier {
    fn apply(&mut self, presentation: &Presentation);
    fn announce(&mut self, announcement: &Announcement);
}

/// Apply the presentation for `settings` and forward any announcement.
pub fn apply_change(
    applier: &mut dyn EffectsApplier,
    settings: &AccessibilitySettings,
    announcement: Option<&Announcement>,
) {
    applier.apply(&Presentation::from_settings(settings));
    if let Some(announcement) = announcement {
        applier.announce(announcement);
    }
}
