//! Window size settings and the settings screen state
//!
//! The chosen resolution only sizes the window. The simulation arena is
//! always `ARENA_WIDTH` x `ARENA_HEIGHT`.

use crate::consts::{MIN_CUSTOM_DIMENSION, WINDOW_SCALE};
use crate::error::InputError;

/// A logical resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Physical window size requested from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl From<Resolution> for WindowSize {
    fn from(res: Resolution) -> Self {
        Self {
            width: res.width * WINDOW_SCALE,
            height: res.height * WINDOW_SCALE,
        }
    }
}

/// Built-in resolutions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenPreset {
    #[default]
    Vga,
    Svga,
    Xga,
}

impl ScreenPreset {
    pub const ALL: [ScreenPreset; 3] = [ScreenPreset::Vga, ScreenPreset::Svga, ScreenPreset::Xga];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenPreset::Vga => "640 x 480",
            ScreenPreset::Svga => "800 x 600",
            ScreenPreset::Xga => "1024 x 768",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(' ', "").as_str() {
            "640x480" | "vga" => Some(ScreenPreset::Vga),
            "800x600" | "svga" => Some(ScreenPreset::Svga),
            "1024x768" | "xga" => Some(ScreenPreset::Xga),
            _ => None,
        }
    }

    pub fn resolution(&self) -> Resolution {
        match self {
            ScreenPreset::Vga => Resolution::new(640, 480),
            ScreenPreset::Svga => Resolution::new(800, 600),
            ScreenPreset::Xga => Resolution::new(1024, 768),
        }
    }
}

/// The currently selected resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenChoice {
    Preset(ScreenPreset),
    Custom(Resolution),
}

impl Default for ScreenChoice {
    fn default() -> Self {
        ScreenChoice::Preset(ScreenPreset::default())
    }
}

impl ScreenChoice {
    pub fn resolution(&self) -> Resolution {
        match self {
            ScreenChoice::Preset(preset) => preset.resolution(),
            ScreenChoice::Custom(res) => *res,
        }
    }

    /// Dropdown label
    pub fn label(&self) -> String {
        match self {
            ScreenChoice::Preset(preset) => preset.as_str().to_string(),
            ScreenChoice::Custom(res) => format!("Custom: {}x{}", res.width, res.height),
        }
    }
}

/// Game settings (session-only, not persisted)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub screen: ScreenChoice,
}

impl Settings {
    /// Window size for the current choice
    pub fn window_size(&self) -> WindowSize {
        self.screen.resolution().into()
    }
}

/// Parse `width,height`; each side must be at least `MIN_CUSTOM_DIMENSION`
pub fn parse_custom_resolution(input: &str) -> Result<Resolution, InputError> {
    let format_err = || InputError::ResolutionFormat {
        input: input.to_string(),
    };

    let (w, h) = input.split_once(',').ok_or_else(format_err)?;
    let width: u32 = w.trim().parse().map_err(|_| format_err())?;
    let height: u32 = h.trim().parse().map_err(|_| format_err())?;

    if width < MIN_CUSTOM_DIMENSION || height < MIN_CUSTOM_DIMENSION {
        return Err(InputError::ResolutionTooSmall {
            width,
            height,
            min: MIN_CUSTOM_DIMENSION,
        });
    }
    Ok(Resolution::new(width, height))
}

/// Entries in the resolution dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownOption {
    Preset(ScreenPreset),
    Custom,
}

impl DropdownOption {
    pub const ALL: [DropdownOption; 4] = [
        DropdownOption::Preset(ScreenPreset::Vga),
        DropdownOption::Preset(ScreenPreset::Svga),
        DropdownOption::Preset(ScreenPreset::Xga),
        DropdownOption::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DropdownOption::Preset(preset) => preset.as_str(),
            DropdownOption::Custom => "Custom...",
        }
    }
}

/// Transient settings screen state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMenu {
    pub dropdown_open: bool,
    /// `Some` while the custom `width,height` prompt is showing
    pub custom_input: Option<String>,
}

impl SettingsMenu {
    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Pick a dropdown entry. Presets apply immediately; Custom opens the prompt.
    /// Ignored while the dropdown is closed.
    pub fn select(
        &mut self,
        option: DropdownOption,
        settings: &mut Settings,
    ) -> Option<WindowSize> {
        if !self.dropdown_open {
            log::debug!("Ignoring {:?} with the dropdown closed", option);
            return None;
        }
        self.dropdown_open = false;
        match option {
            DropdownOption::Preset(preset) => {
                settings.screen = ScreenChoice::Preset(preset);
                log::info!("Screen size set to {}", preset.as_str());
                Some(settings.window_size())
            }
            DropdownOption::Custom => {
                self.custom_input = Some(String::new());
                None
            }
        }
    }

    pub fn is_editing(&self) -> bool {
        self.custom_input.is_some()
    }

    /// Append typed characters; only digits and `,` are accepted
    pub fn type_chars(&mut self, chars: &[char]) {
        if let Some(buf) = self.custom_input.as_mut() {
            buf.extend(chars.iter().filter(|c| c.is_ascii_digit() || **c == ','));
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buf) = self.custom_input.as_mut() {
            buf.pop();
        }
    }

    /// Apply the custom prompt. On error the prompt stays open for correction.
    pub fn submit_custom(&mut self, settings: &mut Settings) -> Result<WindowSize, InputError> {
        let Some(buf) = self.custom_input.as_deref() else {
            return Err(InputError::ResolutionFormat {
                input: String::new(),
            });
        };
        let res = parse_custom_resolution(buf)?;
        settings.screen = ScreenChoice::Custom(res);
        self.custom_input = None;
        log::info!("Screen size set to custom {}x{}", res.width, res.height);
        Ok(settings.window_size())
    }

    pub fn cancel_custom(&mut self) {
        self.custom_input = None;
    }
}
