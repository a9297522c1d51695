use crate::console::command::ConsoleCommand;
use crate::console::panels::Panel;
use crate::ui::icons::lucide_icon;
use crate::ui::theme;
use gpui::*;
use lucide_icons::Icon;

/// Buttons in the bottom bar, in function-key order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickAction {
    Help,
    OpenFolder,
    Notebook,
    Folder,
    Refresh,
    Clear,
    Developer,
    Monitor,
    Network,
    Security,
    Bios,
    Optimize,
}

/// What a quick action does once the console receives it.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionTarget {
    Command(ConsoleCommand),
    Panel(Panel),
    Refresh,
}

impl QuickAction {
    pub const ALL: [QuickAction; 12] = [
        QuickAction::Help,
        QuickAction::OpenFolder,
        QuickAction::Notebook,
        QuickAction::Folder,
        QuickAction::Refresh,
        QuickAction::Clear,
        QuickAction::Developer,
        QuickAction::Monitor,
        QuickAction::Network,
        QuickAction::Security,
        QuickAction::Bios,
        QuickAction::Optimize,
    ];

    /// Maps a key name such as `f3` to its action.
    pub fn from_key(key: &str) -> Option<Self> {
        let number: usize = key.strip_prefix('f')?.parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    pub fn hot_key(self) -> String {
        let index = Self::ALL.iter().position(|a| *a == self).unwrap_or(0);
        format!("F{}", index + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            QuickAction::Help => "Help",
            QuickAction::OpenFolder => "Open",
            QuickAction::Notebook => "Notebook",
            QuickAction::Folder => "Folder",
            QuickAction::Refresh => "Refresh",
            QuickAction::Clear => "Clear",
            QuickAction::Developer => "Developer",
            QuickAction::Monitor => "Monitor",
            QuickAction::Network => "Network",
            QuickAction::Security => "Security",
            QuickAction::Bios => "BIOS",
            QuickAction::Optimize => "Optimize",
        }
    }

    pub fn icon(self) -> Icon {
        match self {
            QuickAction::Help => Icon::BookOpen,
            QuickAction::OpenFolder => Icon::FolderOpen,
            QuickAction::Notebook => Icon::FilePlus,
            QuickAction::Folder => Icon::FolderPlus,
            QuickAction::Refresh => Icon::RefreshCw,
            QuickAction::Clear => Icon::Eraser,
            QuickAction::Developer => Icon::Wrench,
            QuickAction::Monitor => Icon::Activity,
            QuickAction::Network => Icon::Globe,
            QuickAction::Security => Icon::Shield,
            QuickAction::Bios => Icon::Cpu,
            QuickAction::Optimize => Icon::Gauge,
        }
    }

    pub fn target(self) -> ActionTarget {
        match self {
            QuickAction::Help => ActionTarget::Command(ConsoleCommand::Help),
            QuickAction::OpenFolder => ActionTarget::Command(ConsoleCommand::OpenFolder),
            QuickAction::Notebook => ActionTarget::Command(ConsoleCommand::Notebook(None)),
            QuickAction::Folder => ActionTarget::Command(ConsoleCommand::MakeFolder(None)),
            QuickAction::Refresh => ActionTarget::Refresh,
            QuickAction::Clear => ActionTarget::Command(ConsoleCommand::Clear),
            QuickAction::Developer => ActionTarget::Panel(Panel::Developer),
            QuickAction::Monitor => ActionTarget::Command(ConsoleCommand::Monitor),
            QuickAction::Network => ActionTarget::Panel(Panel::Network),
            QuickAction::Security => ActionTarget::Panel(Panel::Security),
            QuickAction::Bios => ActionTarget::Command(ConsoleCommand::Bios),
            QuickAction::Optimize => ActionTarget::Command(ConsoleCommand::Optimize),
        }
    }
}

pub struct ActionBarEvent(pub QuickAction);

pub struct ActionBar;

impl ActionBar {
    pub fn new() -> Self {
        Self
    }
}

fn action_button(
    action: QuickAction,
    on_click: impl Fn(&MouseDownEvent, &mut Window, &mut App) + 'static,
) -> Div {
    div()
        .flex()
        .items_center()
        .gap(px(6.0))
        .px(px(10.0))
        .py(px(6.0))
        .bg(rgb(theme::SURFACE_RAISED))
        .rounded(px(6.0))
        .border_1()
        .border_color(rgb(theme::BORDER))
        .on_mouse_down(gpui::MouseButton::Left, move |event, window, cx| {
            on_click(event, window, cx)
        })
        .child(lucide_icon(action.icon(), 13.0, theme::TEXT))
        .child(
            div()
                .text_size(px(12.0))
                .text_color(rgb(theme::TEXT))
                .child(action.label()),
        )
        .child(
            div()
                .text_size(px(10.0))
                .text_color(rgb(theme::TEXT_MUTED))
                .child(action.hot_key()),
        )
}

impl Render for ActionBar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let handle = cx.entity().downgrade();
        let buttons = QuickAction::ALL.into_iter().map(|action| {
            let handle = handle.clone();
            action_button(action, move |_event, _window, cx| {
                let _ = handle.update(cx, |_bar, cx| {
                    cx.emit(ActionBarEvent(action));
                });
            })
        });

        div()
            .flex()
            .flex_wrap()
            .items_center()
            .gap(px(8.0))
            .px(px(12.0))
            .py(px(8.0))
            .bg(rgb(theme::BACKGROUND))
            .border_t_1()
            .border_color(rgb(theme::BORDER))
            .children(buttons)
    }
}

impl EventEmitter<ActionBarEvent> for ActionBar {}
