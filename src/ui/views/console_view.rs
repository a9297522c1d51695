use crate::console::context::ConsoleContext;
use crate::console::dispatch::{self, ConsoleHost, Dispatcher, NameKind};
use crate::console::error::ConsoleResult;
use crate::console::files;
use crate::console::output::OutputLine;
use crate::console::panels::{self, Panel};
use crate::terminal::buffer::ConsoleBuffer;
use crate::terminal::task::{Job, JobOutput, TaskReport, TaskRunner};
use crate::ui::icons::{lucide_icon, status_icon};
use crate::ui::input::InputLine;
use crate::ui::theme;
use crate::ui::views::action_bar::{ActionTarget, QuickAction};
use futures::StreamExt;
use gpui::*;
use lucide_icons::Icon;
use std::path::{Path, PathBuf};

const MAX_SCROLLBACK: usize = 5000;

pub enum ConsoleEvent {
    TargetDirChanged(PathBuf),
    TasksChanged(usize),
    Quit,
}

enum Overlay {
    Panel(Panel),
    Prompt { kind: NameKind, input: InputLine },
}

/// Receives everything the dispatcher asks for. Kept apart from the view so
/// the dispatcher, context and sink can be borrowed at the same time.
struct ConsoleSink {
    buffer: ConsoleBuffer,
    runner: TaskRunner,
    overlay: Option<Overlay>,
    quit_requested: bool,
}

impl ConsoleHost for ConsoleSink {
    fn print(&mut self, line: OutputLine) {
        self.buffer.push_line(line);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn show_panel(&mut self, panel: Panel) {
        self.overlay = Some(Overlay::Panel(panel));
    }

    fn prompt_name(&mut self, kind: NameKind) {
        self.overlay = Some(Overlay::Prompt {
            kind,
            input: InputLine::new(),
        });
    }

    fn open_folder(&mut self, path: &Path) -> ConsoleResult<()> {
        files::open_in_file_manager(path).inspect_err(|err| {
            tracing::warn!(path = %path.display(), error = %err, "file manager did not start");
        })
    }

    fn spawn(&mut self, job: Job) {
        self.runner.spawn(job);
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}

pub struct ConsoleView {
    focus_handle: FocusHandle,
    dispatcher: Dispatcher,
    context: ConsoleContext,
    sink: ConsoleSink,
    input: InputLine,
    scroll_handle: ScrollHandle,
    auto_focus: bool,
}

impl ConsoleView {
    pub fn new(context: ConsoleContext, cx: &mut Context<Self>) -> Self {
        let (runner, mut reports) = TaskRunner::new();

        cx.spawn(|view: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut cx = cx.clone();
            async move {
                while let Some(report) = reports.next().await {
                    if view
                        .update(&mut cx, |view, cx| view.on_task_report(report, cx))
                        .is_err()
                    {
                        break;
                    }
                }
            }
        })
        .detach();

        let mut sink = ConsoleSink {
            buffer: ConsoleBuffer::new(MAX_SCROLLBACK),
            runner,
            overlay: None,
            quit_requested: false,
        };
        sink.print_all(panels::welcome_lines(context.target_dir()));

        Self {
            focus_handle: cx.focus_handle(),
            dispatcher: Dispatcher::new(),
            context,
            sink,
            input: InputLine::new(),
            scroll_handle: ScrollHandle::new(),
            auto_focus: true,
        }
    }

    pub fn set_target_dir(&mut self, dir: PathBuf, cx: &mut Context<Self>) {
        self.context.set_target_dir(dir);
        self.context.persist();
        let dir = self.context.target_dir().to_path_buf();
        self.sink
            .print(OutputLine::success(format!("Target folder: {}", dir.display())));
        cx.emit(ConsoleEvent::TargetDirChanged(dir));
        self.after_command(cx);
    }

    pub fn run_action(&mut self, action: QuickAction, cx: &mut Context<Self>) {
        tracing::debug!(?action, "quick action");
        self.sink.overlay = None;
        match action.target() {
            ActionTarget::Command(command) => {
                dispatch::execute(command, &mut self.context, &mut self.sink)
            }
            ActionTarget::Panel(panel) => self.sink.show_panel(panel),
            ActionTarget::Refresh => {
                cx.emit(ConsoleEvent::TargetDirChanged(
                    self.context.target_dir().to_path_buf(),
                ));
                self.sink.print(OutputLine::success("Information refreshed"));
            }
        }
        self.after_command(cx);
    }

    pub fn stop_tasks(&mut self, cx: &mut Context<Self>) {
        let stopped = self.sink.runner.cancel_all();
        if stopped > 0 {
            self.sink.print(OutputLine::warning(format!(
                "Stopping {stopped} running task(s)..."
            )));
        }
        self.after_command(cx);
    }

    fn submit(&mut self, cx: &mut Context<Self>) {
        let line = self.input.take();
        self.dispatcher
            .dispatch(&line, &mut self.context, &mut self.sink);
        self.after_command(cx);
    }

    fn on_task_report(&mut self, report: TaskReport, cx: &mut Context<Self>) {
        self.sink.runner.finish(report.id);
        tracing::debug!(id = report.id, label = %report.label, "task finished");

        if let JobOutput::Monitor(snapshot) = &report.output {
            let prompt_open = matches!(self.sink.overlay, Some(Overlay::Prompt { .. }));
            if prompt_open {
                for line in snapshot.lines() {
                    self.sink.print(OutputLine::output(line));
                }
            } else {
                self.sink.show_panel(Panel::Monitor(snapshot.clone()));
            }
        }
        self.sink.print_all(report.lines());
        self.after_command(cx);
    }

    fn after_command(&mut self, cx: &mut Context<Self>) {
        if self.sink.quit_requested {
            cx.emit(ConsoleEvent::Quit);
            return;
        }
        cx.emit(ConsoleEvent::TasksChanged(self.sink.runner.running()));
        self.scroll_handle.scroll_to_bottom();
        cx.notify();
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, _window: &mut Window, cx: &mut Context<Self>) {
        let key = event.keystroke.key.as_str();

        if let Some(action) = QuickAction::from_key(key) {
            self.run_action(action, cx);
            cx.stop_propagation();
            return;
        }

        if self.handle_overlay_key(event, cx) {
            cx.stop_propagation();
            return;
        }

        let ctrl = event.keystroke.modifiers.control;
        if ctrl && key.eq_ignore_ascii_case("c") && self.sink.runner.running() > 0 {
            self.stop_tasks(cx);
            cx.stop_propagation();
            return;
        }

        match key {
            "enter" | "return" | "numpadenter" => {
                self.submit(cx);
                cx.stop_propagation();
                return;
            }
            "up" | "arrowup" => {
                if let Some(entry) = self.dispatcher.history_mut().recall_previous() {
                    self.input.set(entry);
                }
            }
            "down" | "arrowdown" => {
                if let Some(entry) = self.dispatcher.history_mut().recall_next() {
                    self.input.set(entry);
                }
            }
            "escape" => {
                if self.sink.runner.running() > 0 {
                    self.stop_tasks(cx);
                } else {
                    self.input.clear();
                    self.dispatcher.history_mut().reset_cursor();
                }
            }
            _ => {
                if !edit_input(&mut self.input, &event.keystroke) {
                    return;
                }
            }
        }
        cx.notify();
        cx.stop_propagation();
    }

    /// Routes keys to an open panel or prompt. Returns false when none is open.
    fn handle_overlay_key(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) -> bool {
        let Some(overlay) = self.sink.overlay.as_mut() else {
            return false;
        };

        match event.keystroke.key.as_str() {
            "escape" => {
                self.sink.overlay = None;
                cx.notify();
            }
            "enter" | "return" | "numpadenter" => self.accept_overlay(cx),
            _ => {
                if let Overlay::Prompt { input, .. } = overlay {
                    if edit_input(input, &event.keystroke) {
                        cx.notify();
                    }
                }
            }
        }
        true
    }

    fn accept_overlay(&mut self, cx: &mut Context<Self>) {
        if let Some(Overlay::Prompt { kind, input }) = self.sink.overlay.take() {
            let name = input.as_str().trim();
            if !name.is_empty() {
                dispatch::create(kind, name, &mut self.context, &mut self.sink);
            }
        }
        self.after_command(cx);
    }

    fn on_focus_input(
        &mut self,
        _event: &MouseDownEvent,
        window: &mut Window,
        _cx: &mut Context<Self>,
    ) {
        window.focus(&self.focus_handle);
    }

    fn on_overlay_dismiss(
        &mut self,
        _event: &MouseDownEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.sink.overlay = None;
        cx.notify();
    }

    fn render_line(line: &OutputLine) -> Div {
        div()
            .flex()
            .items_center()
            .gap(px(6.0))
            .min_h(px(16.0))
            .children(status_icon(line.style))
            .child(
                div()
                    .text_color(rgb(theme::line_color(line.style)))
                    .child(line.text.clone()),
            )
    }

    fn render_input_text(input: &InputLine, is_focused: bool, placeholder: &'static str) -> Div {
        let caret = div()
            .w(px(2.0))
            .h(px(16.0))
            .rounded(px(1.0))
            .bg(if is_focused {
                rgb(theme::ACCENT)
            } else {
                rgb(theme::BORDER)
            });

        let text = |text: &str| {
            div()
                .text_size(px(14.0))
                .text_color(rgb(0xdddddd))
                .font_family(theme::MONO_FONT)
                .child(text.to_string())
        };

        if input.is_empty() {
            return div().flex().items_center().child(caret).child(
                div()
                    .text_size(px(14.0))
                    .text_color(rgb(0x666666))
                    .child(placeholder),
            );
        }

        let (left, right) = input.split_at_cursor();
        div()
            .flex()
            .items_center()
            .child(text(left))
            .child(caret)
            .child(text(right))
    }

    fn render_input_bar(&self, window: &Window) -> Div {
        let is_focused = self.focus_handle.is_focused(window) && self.sink.overlay.is_none();
        div()
            .flex()
            .items_center()
            .gap(px(8.0))
            .px(px(16.0))
            .py(px(10.0))
            .bg(rgb(theme::SURFACE_RAISED))
            .border_t_1()
            .border_color(rgb(theme::BORDER))
            .child(lucide_icon(Icon::ChevronRight, 16.0, theme::ACCENT))
            .child(Self::render_input_text(
                &self.input,
                is_focused,
                "Type a command or `help`...",
            ))
    }

    fn render_overlay(&self, cx: &Context<Self>) -> Div {
        let Some(ref overlay) = self.sink.overlay else {
            return div();
        };

        let (icon, title, body, hint) = match overlay {
            Overlay::Panel(panel) => {
                let lines = panel.body().into_iter().map(|line| {
                    div()
                        .min_h(px(16.0))
                        .text_size(px(13.0))
                        .text_color(rgb(0xdddddd))
                        .font_family(theme::MONO_FONT)
                        .child(line)
                });
                (
                    Icon::PanelTop,
                    panel.title(),
                    div()
                        .id("panel_body")
                        .flex()
                        .flex_col()
                        .gap(px(2.0))
                        .max_h(px(420.0))
                        .overflow_y_scroll()
                        .children(lines)
                        .into_any_element(),
                    "Esc to close",
                )
            }
            Overlay::Prompt { kind, input } => (
                match kind {
                    NameKind::Folder => Icon::FolderPlus,
                    NameKind::Notebook => Icon::FilePlus,
                },
                kind.title(),
                div()
                    .px(px(12.0))
                    .py(px(10.0))
                    .rounded(px(6.0))
                    .bg(rgb(0x111111))
                    .border_1()
                    .border_color(rgb(0x252525))
                    .child(Self::render_input_text(input, true, "Name..."))
                    .into_any_element(),
                "Enter to create, Esc to cancel",
            ),
        };

        div()
            .size_full()
            .absolute()
            .top_0()
            .left_0()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgba(0x00000088))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_overlay_dismiss))
            .child(
                div()
                    .w(px(600.0))
                    .flex()
                    .flex_col()
                    .gap(px(12.0))
                    .p(px(16.0))
                    .rounded(px(10.0))
                    .bg(rgb(0x171717))
                    .border_1()
                    .border_color(rgb(theme::BORDER))
                    .shadow_lg()
                    .on_mouse_down(MouseButton::Left, |_, _, cx| cx.stop_propagation())
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap(px(10.0))
                            .child(lucide_icon(icon, 16.0, theme::ACCENT))
                            .child(
                                div()
                                    .text_size(px(14.0))
                                    .text_color(rgb(0xeeeeee))
                                    .font_weight(FontWeight::BOLD)
                                    .child(title),
                            ),
                    )
                    .child(body)
                    .child(
                        div()
                            .text_size(px(11.0))
                            .text_color(rgb(theme::TEXT_MUTED))
                            .child(hint),
                    ),
            )
    }
}

/// Applies an editing key to `input`. Returns false for keys it does not handle.
fn edit_input(input: &mut InputLine, keystroke: &Keystroke) -> bool {
    match keystroke.key.as_str() {
        "backspace" => input.backspace(),
        "delete" => input.delete_forward(),
        "left" | "arrowleft" => input.move_left(),
        "right" | "arrowright" => input.move_right(),
        "home" => input.move_home(),
        "end" => input.move_end(),
        "space" => input.insert(" "),
        _ => {
            if keystroke.modifiers.control || keystroke.modifiers.platform {
                return false;
            }
            match keystroke.key_char.as_deref() {
                Some(text) if !text.is_empty() => input.insert(text),
                _ if keystroke.key.chars().count() == 1 => input.insert(&keystroke.key),
                _ => return false,
            }
        }
    }
    true
}

impl Render for ConsoleView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if self.auto_focus {
            window.focus(&self.focus_handle);
            self.auto_focus = false;
        }

        let lines: Vec<Div> = self
            .sink
            .buffer
            .get_lines()
            .iter()
            .map(Self::render_line)
            .collect();

        div()
            .id("console_root")
            .track_focus(&self.focus_handle)
            .relative()
            .flex()
            .flex_col()
            .size_full()
            .min_h(px(0.0))
            .bg(rgb(theme::BACKGROUND))
            .on_key_down(cx.listener(Self::on_key_down))
            .on_mouse_down(gpui::MouseButton::Left, cx.listener(Self::on_focus_input))
            .child(
                div()
                    .flex_1()
                    .min_h(px(0.0))
                    .p(px(16.0))
                    .id("console_output")
                    .track_scroll(&self.scroll_handle)
                    .overflow_scroll()
                    .font_family(theme::MONO_FONT)
                    .text_size(px(13.0))
                    .text_color(rgb(theme::TEXT))
                    .child(div().flex().flex_col().gap(px(2.0)).children(lines)),
            )
            .child(self.render_input_bar(window))
            .child(self.render_overlay(cx))
    }
}

impl Focusable for ConsoleView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl EventEmitter<ConsoleEvent> for ConsoleView {}
