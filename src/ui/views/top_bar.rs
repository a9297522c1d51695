use crate::ui::icons::lucide_icon;
use crate::ui::theme;
use gpui::*;
use lucide_icons::Icon;
use std::path::{Path, PathBuf};

pub enum TopBarEvent {
    ChangeTargetDir(PathBuf),
    StopTasks,
}

pub struct TopBar {
    target_dir: PathBuf,
    running: usize,
}

impl TopBar {
    pub fn new(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            running: 0,
        }
    }

    pub fn set_target_dir(&mut self, dir: &Path, cx: &mut Context<Self>) {
        self.target_dir = dir.to_path_buf();
        cx.notify();
    }

    pub fn set_running(&mut self, running: usize, cx: &mut Context<Self>) {
        if self.running != running {
            self.running = running;
            cx.notify();
        }
    }

    fn on_change_folder(
        &mut self,
        _event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let prompt = cx.prompt_for_paths(PathPromptOptions {
            files: false,
            directories: true,
            multiple: false,
            prompt: Some("Choose target folder".into()),
        });

        cx.spawn(|view: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut cx = cx.clone();
            async move {
                let selected = match prompt.await {
                    Ok(Ok(Some(mut paths))) => paths.pop(),
                    _ => None,
                };

                if let Some(path) = selected {
                    let _ = view.update(&mut cx, |_view, cx| {
                        cx.emit(TopBarEvent::ChangeTargetDir(path));
                    });
                }
            }
        })
        .detach();
    }

    fn on_stop(&mut self, _event: &MouseDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        cx.emit(TopBarEvent::StopTasks);
    }

    fn render_running(&self, cx: &Context<Self>) -> Div {
        if self.running == 0 {
            return div();
        }
        let label = if self.running == 1 {
            "1 task running".to_string()
        } else {
            format!("{} tasks running", self.running)
        };

        div()
            .flex()
            .items_center()
            .gap(px(8.0))
            .child(lucide_icon(Icon::LoaderCircle, 12.0, theme::ACCENT))
            .child(
                div()
                    .text_size(px(12.0))
                    .text_color(rgb(theme::TEXT))
                    .child(label),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(4.0))
                    .px(px(8.0))
                    .py(px(4.0))
                    .rounded(px(4.0))
                    .bg(rgb(0x2a1515))
                    .border_1()
                    .border_color(rgb(0x4a2020))
                    .on_mouse_down(gpui::MouseButton::Left, cx.listener(Self::on_stop))
                    .child(lucide_icon(Icon::Square, 10.0, 0xff7b72))
                    .child(
                        div()
                            .text_size(px(11.0))
                            .text_color(rgb(0xffa3a3))
                            .child("Stop"),
                    ),
            )
    }
}

impl Render for TopBar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .items_center()
            .justify_between()
            .h(px(40.0))
            .bg(rgb(theme::BACKGROUND))
            .border_b_1()
            .border_color(rgb(theme::BORDER))
            .px(px(12.0))
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(12.0))
                    .child(lucide_icon(Icon::Terminal, 16.0, theme::ACCENT))
                    .child(
                        div()
                            .text_size(px(13.0))
                            .text_color(rgb(theme::TEXT))
                            .font_weight(FontWeight::BOLD)
                            .child("Quick Console"),
                    )
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(8.0))
                            .px(px(10.0))
                            .py(px(4.0))
                            .rounded(px(6.0))
                            .bg(rgb(theme::SURFACE))
                            .border_1()
                            .border_color(rgb(theme::BORDER))
                            .on_mouse_down(
                                gpui::MouseButton::Left,
                                cx.listener(Self::on_change_folder),
                            )
                            .child(lucide_icon(Icon::Folder, 12.0, theme::ACCENT))
                            .child(
                                div()
                                    .text_size(px(12.0))
                                    .text_color(rgb(0xcfcfcf))
                                    .child(self.target_dir.display().to_string()),
                            ),
                    ),
            )
            .child(self.render_running(cx))
    }
}

impl EventEmitter<TopBarEvent> for TopBar {}
