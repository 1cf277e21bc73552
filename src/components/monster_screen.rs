use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Block,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use super::{
    CatalogList, CatalogListProps, Component, DetailOverlayProps, DetailOverlayView, FilterBar,
    FilterBarProps, theme,
};
use crate::action::Action;
use crate::detail::DetailPanel;
use crate::state::AppState;

pub struct MonsterScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Where each part of the screen goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub filter_bar: Rect,
    pub list: Rect,
    pub status: Rect,
}

/// Filter bar, catalog list and status line, with the detail overlay on top.
pub struct MonsterScreen {
    pub filter_bar: FilterBar,
    pub list: CatalogList,
    pub detail: DetailOverlayView,
    status_bar: StatusBar,
}

impl Default for MonsterScreen {
    fn default() -> Self {
        Self {
            filter_bar: FilterBar,
            list: CatalogList::new(),
            detail: DetailOverlayView::new(),
            status_bar: StatusBar::new(),
        }
    }
}

impl MonsterScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(area: Rect) -> ScreenLayout {
        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);
        ScreenLayout {
            filter_bar: chunks[0],
            list: chunks[1],
            status: chunks[2],
        }
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints = status_hints(state);
        let status = status_text(state);
        let status_items = [StatusBarItem::span(Span::styled(
            status.as_str(),
            Style::default().fg(theme::ACCENT_GOLD),
        ))];

        let style = StatusBarStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: Some(theme::BG_BASE),
                fg: Some(theme::TEXT_MAIN),
            },
            text: Style::default().fg(theme::TEXT_DIM),
            hint_key: Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
            hint_label: Style::default().fg(theme::TEXT_DIM),
            separator: Style::default().fg(theme::TEXT_DIM),
        };

        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints).with_separator("  "),
            center: StatusBarSection::empty(),
            right: StatusBarSection::items(&status_items),
            style,
            is_focused: false,
        };
        Component::<Action>::render(&mut self.status_bar, frame, area, props);
    }
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.detail.is_some() {
        return vec![
            StatusBarHint::new("↑/↓", "Scroll"),
            StatusBarHint::new("Esc", "Close"),
        ];
    }
    if state.search_active {
        return vec![
            StatusBarHint::new("Enter", "Apply"),
            StatusBarHint::new("Esc", "Cancel"),
            StatusBarHint::new("Bksp", "Delete"),
        ];
    }
    vec![
        StatusBarHint::new("/", "Search"),
        StatusBarHint::new("r/R", "Region"),
        StatusBarHint::new("t/T", "Type"),
        StatusBarHint::new("x", "Clear"),
        StatusBarHint::new("Enter", "Open"),
        StatusBarHint::new("e/c", "Expand/Collapse"),
        StatusBarHint::new("F5", "Reload"),
        StatusBarHint::new("q", "Quit"),
    ]
}

fn status_text(state: &AppState) -> String {
    if state.catalog.is_loading() {
        return "Loading...".to_string();
    }
    if state.catalog.is_failed() {
        return "Load failed".to_string();
    }
    match state.loaded_catalog() {
        Some(catalog) => format!(
            "{} monsters in {} regions",
            catalog.len(),
            catalog.regions().len()
        ),
        None => String::new(),
    }
}

impl Component<Action> for MonsterScreen {
    type Props<'a> = MonsterScreenProps<'a>;

    /// Routes to the overlay when it is open, to the search box while
    /// typing, and to the list otherwise.
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        if !props.is_focused {
            return Vec::new();
        }
        if let Some(monster) = state.detail_monster() {
            let panel = DetailPanel::build(monster);
            let scroll = state.detail.as_ref().map(|detail| detail.scroll).unwrap_or(0);
            return self
                .detail
                .handle_event(
                    event,
                    DetailOverlayProps {
                        panel: &panel,
                        scroll,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
        }
        if state.search_active {
            return self
                .filter_bar
                .handle_event(
                    event,
                    FilterBarProps {
                        state,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
        }
        self.list
            .handle_event(
                event,
                CatalogListProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

        let layout = Self::layout(area);
        self.filter_bar.render(
            frame,
            layout.filter_bar,
            FilterBarProps {
                state,
                is_focused: props.is_focused && state.search_active,
            },
        );
        self.list.render(
            frame,
            layout.list,
            CatalogListProps {
                state,
                is_focused: props.is_focused && !state.search_active && state.detail.is_none(),
            },
        );
        self.render_status(frame, layout.status, state);

        if let (Some(overlay), Some(monster)) = (state.detail.as_ref(), state.detail_monster()) {
            let panel = DetailPanel::build(monster);
            self.detail.render(
                frame,
                area,
                DetailOverlayProps {
                    panel: &panel,
                    scroll: overlay.scroll,
                    is_focused: props.is_focused,
                },
            );
        }
    }
}
