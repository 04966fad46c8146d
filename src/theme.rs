use ratatui::style::{Color, Modifier, Style};

use crate::models::Severity;

/// An sRGB triple that can be blended toward another color, for the toast
/// fade where the terminal has no real alpha channel.
#[derive(Debug, Clone, Copy)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn blend(self, toward: Rgb, alpha: f64) -> Color {
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (f64::from(fg) * alpha + f64::from(bg) * (1.0 - alpha)) as u8;
        Color::Rgb(
            mix(self.0, toward.0),
            mix(self.1, toward.1),
            mix(self.2, toward.2),
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ToastPalette {
    pub background: Rgb,
    pub border: Rgb,
}

pub struct Theme {
    pub title: Style,
    pub info: Style,
    pub success: Style,
    pub error: Style,
    pub highlight: Style,
    pub dimmed: Style,
    pub input: Style,
    pub placeholder: Style,
    pub footer: Style,

    pub commit_hash: Style,
    pub commit_author: Style,
    pub commit_files: Style,

    pub toast_success: ToastPalette,
    pub toast_error: ToastPalette,
    pub toast_text: Rgb,
    /// What the toast blends toward while fading.
    pub toast_backdrop: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
                .bg(Color::Rgb(0x7D, 0x56, 0xF4))
                .add_modifier(Modifier::BOLD),
            info: Style::default()
                .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
                .bg(Color::Rgb(0x2D, 0x37, 0x48)),
            success: Style::default()
                .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
                .bg(Color::Rgb(0x38, 0xA1, 0x69)),
            error: Style::default()
                .fg(Color::Rgb(0xFA, 0xFA, 0xFA))
                .bg(Color::Rgb(0xE5, 0x3E, 0x3E)),
            highlight: Style::default().fg(Color::Rgb(0x7D, 0x56, 0xF4)),
            dimmed: Style::default().fg(Color::Rgb(0x9E, 0x9E, 0x9E)),
            input: Style::default().fg(Color::White),
            placeholder: Style::default()
                .fg(Color::Rgb(0x9E, 0x9E, 0x9E))
                .add_modifier(Modifier::DIM),
            footer: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::DIM),

            commit_hash: Style::default()
                .fg(Color::Rgb(0x90, 0xCD, 0xF4))
                .add_modifier(Modifier::BOLD),
            commit_author: Style::default().fg(Color::Rgb(0x38, 0xA1, 0x69)),
            commit_files: Style::default().fg(Color::Rgb(0x7D, 0x56, 0xF4)),

            toast_success: ToastPalette {
                background: Rgb(0x38, 0xA1, 0x69),
                border: Rgb(0x2F, 0x85, 0x5A),
            },
            toast_error: ToastPalette {
                background: Rgb(0xE5, 0x3E, 0x3E),
                border: Rgb(0xC5, 0x30, 0x30),
            },
            toast_text: Rgb(0xFA, 0xFA, 0xFA),
            toast_backdrop: Rgb(0x1A, 0x1A, 0x1A),
        }
    }
}

impl Theme {
    pub fn severity(&self, severity: Severity) -> Style {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Error => self.error,
        }
    }

    pub fn toast_palette(&self, severity: Severity) -> ToastPalette {
        match severity {
            Severity::Error => self.toast_error,
            _ => self.toast_success,
        }
    }
}
