use crate::console::output::LineStyle;

pub const BACKGROUND: u32 = 0x0a0a0a;
pub const SURFACE: u32 = 0x141414;
pub const SURFACE_RAISED: u32 = 0x1a1a1a;
pub const BORDER: u32 = 0x2a2a2a;
pub const TEXT: u32 = 0xcccccc;
pub const TEXT_MUTED: u32 = 0x7a7a7a;
pub const ACCENT: u32 = 0x6b9eff;

pub const MONO_FONT: &str = "Cascadia Code";

pub fn line_color(style: LineStyle) -> u32 {
    match style {
        LineStyle::Plain => 0xdddddd,
        LineStyle::Prompt => 0xffe29a,
        LineStyle::Info => 0x79c0ff,
        LineStyle::Success => 0x8bd06f,
        LineStyle::Warning => 0xf2cc60,
        LineStyle::Error => 0xff7b72,
        LineStyle::Network => 0xd2a8ff,
        LineStyle::Output => 0xeeeeee,
    }
}
