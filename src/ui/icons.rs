use crate::console::output::LineStyle;
use crate::ui::theme;
use gpui::*;
use lucide_icons::Icon;

pub fn lucide_icon(icon: Icon, size: f32, color: u32) -> Div {
    div()
        .font_family("lucide")
        .text_size(px(size))
        .text_color(rgb(color))
        .child(char::from(icon).to_string())
}

/// Leading marker for status lines. Command output and echoed prompts have none.
pub fn status_icon(style: LineStyle) -> Option<Div> {
    let icon = match style {
        LineStyle::Success => Icon::Check,
        LineStyle::Warning => Icon::TriangleAlert,
        LineStyle::Error => Icon::CircleX,
        LineStyle::Info => Icon::Info,
        LineStyle::Network => Icon::Wifi,
        LineStyle::Plain | LineStyle::Prompt | LineStyle::Output => return None,
    };
    Some(lucide_icon(icon, 12.0, theme::line_color(style)))
}
