use crate::console::context::ConsoleContext;
use gpui::*;

pub mod views {
    pub mod action_bar;
    pub mod console_view;
    pub mod top_bar;
}

pub mod icons;
pub mod input;
pub mod theme;

use views::action_bar::{ActionBar, ActionBarEvent};
use views::console_view::{ConsoleEvent, ConsoleView};
use views::top_bar::{TopBar, TopBarEvent};

/// Root view: top bar, console and quick-action bar stacked vertically.
pub struct Workspace {
    top_bar: Entity<TopBar>,
    console: Entity<ConsoleView>,
    action_bar: Entity<ActionBar>,
}

impl Workspace {
    pub fn new(context: ConsoleContext, cx: &mut Context<Self>) -> Self {
        let top_bar = cx.new(|_| TopBar::new(context.target_dir().to_path_buf()));
        let console = cx.new(|cx| ConsoleView::new(context, cx));
        let action_bar = cx.new(|_| ActionBar::new());

        cx.subscribe(&top_bar, |workspace, _bar, event: &TopBarEvent, cx| {
            workspace.on_top_bar_event(event, cx);
        })
        .detach();
        cx.subscribe(&console, |workspace, _console, event: &ConsoleEvent, cx| {
            workspace.on_console_event(event, cx);
        })
        .detach();
        cx.subscribe(
            &action_bar,
            |workspace, _bar, ActionBarEvent(action): &ActionBarEvent, cx| {
                let action = *action;
                let _ = workspace.console.update(cx, |console, cx| {
                    console.run_action(action, cx);
                });
            },
        )
        .detach();

        Self {
            top_bar,
            console,
            action_bar,
        }
    }

    fn on_top_bar_event(&mut self, event: &TopBarEvent, cx: &mut Context<Self>) {
        match event {
            TopBarEvent::ChangeTargetDir(path) => {
                let path = path.clone();
                let _ = self.console.update(cx, |console, cx| {
                    console.set_target_dir(path, cx);
                });
            }
            TopBarEvent::StopTasks => {
                let _ = self.console.update(cx, |console, cx| {
                    console.stop_tasks(cx);
                });
            }
        }
    }

    fn on_console_event(&mut self, event: &ConsoleEvent, cx: &mut Context<Self>) {
        match event {
            ConsoleEvent::TargetDirChanged(dir) => {
                let _ = self.top_bar.update(cx, |bar, cx| {
                    bar.set_target_dir(dir, cx);
                });
            }
            ConsoleEvent::TasksChanged(running) => {
                let running = *running;
                let _ = self.top_bar.update(cx, |bar, cx| {
                    bar.set_running(running, cx);
                });
            }
            ConsoleEvent::Quit => {
                tracing::info!("exit requested");
                cx.quit();
            }
        }
    }
}

impl Render for Workspace {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .size_full()
            .bg(rgb(theme::BACKGROUND))
            .child(self.top_bar.clone())
            .child(
                div()
                    .flex_1()
                    .min_h(px(0.0))
                    .child(self.console.clone()),
            )
            .child(self.action_bar.clone())
    }
}
