use gpui::*;
use std::borrow::Cow;
use tracing_subscriber::EnvFilter;

mod console;
mod terminal;
mod ui;

use crate::console::context::ConsoleContext;
use crate::console::settings;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_context() -> ConsoleContext {
    let settings_path = settings::settings_file();
    let saved = settings_path.as_deref().and_then(settings::load_from);
    let target_dir = settings::resolve_target_dir(saved.as_ref());
    tracing::info!(dir = %target_dir.display(), "starting quick console");
    ConsoleContext::new(target_dir).with_settings_path(settings_path)
}

fn main() {
    init_logging();
    let context = load_context();

    Application::new().run(move |cx: &mut App| {
        cx.text_system()
            .add_fonts(vec![Cow::Borrowed(lucide_icons::LUCIDE_FONT_BYTES)])
            .ok();

        let bounds = Bounds::centered(None, size(px(1000.0), px(700.0)), cx);
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            titlebar: Some(TitlebarOptions {
                title: Some("Quick Console".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let opened = cx.open_window(options, |_, cx| {
            cx.new(|cx| ui::Workspace::new(context, cx))
        });
        if let Err(err) = opened {
            tracing::error!("failed to open window: {err:#}");
            eprintln!(
                "Quick Console could not open its window: {err:#}\n\
                 Make sure a graphical session is running and GPU drivers (Vulkan on Linux) are installed."
            );
            cx.quit();
        }
    });
}
