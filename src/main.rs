//! monsterdex - browse a monster catalog in the terminal

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use monsterdex::action::Action;
use monsterdex::components::{Component, MonsterScreen, MonsterScreenProps};
use monsterdex::config::Args;
use monsterdex::effect::Effect;
use monsterdex::loader::{self, DataSource};
use monsterdex::logging;
use monsterdex::reducer::reducer;
use monsterdex::state::{AppState, Sources};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{DebugRunOutput, DebugSession, DebugSessionError, ReplayItem};

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum MonsterComponentId {
    List,
    Search,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum MonsterContext {
    List,
    Search,
    Detail,
}

impl EventRoutingState<MonsterComponentId, MonsterContext> for AppState {
    fn focused(&self) -> Option<MonsterComponentId> {
        if self.detail.is_some() {
            Some(MonsterComponentId::Detail)
        } else if self.search_active {
            Some(MonsterComponentId::Search)
        } else {
            Some(MonsterComponentId::List)
        }
    }

    fn modal(&self) -> Option<MonsterComponentId> {
        if self.detail.is_some() {
            Some(MonsterComponentId::Detail)
        } else if self.search_active {
            Some(MonsterComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: MonsterComponentId) -> MonsterContext {
        match id {
            MonsterComponentId::List => MonsterContext::List,
            MonsterComponentId::Search => MonsterContext::Search,
            MonsterComponentId::Detail => MonsterContext::Detail,
        }
    }

    fn default_context(&self) -> MonsterContext {
        MonsterContext::List
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config().map_err(io::Error::other)?;
    let _log_guard = logging::init(config.log_file.as_deref());
    tracing::info!(source = %config.source, fallback = %config.fallback, "starting");

    let debug = DebugSession::new(args.debug);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let sources = Sources {
        primary: config.source.to_string(),
        fallback: config.fallback.to_string(),
    };
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::new(sources);
            if let Ok(size) = crossterm::terminal::size() {
                state.terminal_size = size;
            }
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("exiting");
    Ok(())
}

struct MonsterUi {
    screen: MonsterScreen,
}

impl MonsterUi {
    fn new() -> Self {
        Self {
            screen: MonsterScreen::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<MonsterComponentId>,
    ) {
        let layout = MonsterScreen::layout(area);
        event_ctx.set_component_area(MonsterComponentId::List, layout.list);
        event_ctx.set_component_area(MonsterComponentId::Search, layout.filter_bar);
        if state.detail.is_some() {
            event_ctx.set_component_area(MonsterComponentId::Detail, area);
        } else {
            event_ctx
                .component_areas
                .remove(&MonsterComponentId::Detail);
        }

        let props = MonsterScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = MonsterScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(MonsterUi::new()));
    let mut bus: EventBus<AppState, Action, MonsterComponentId, MonsterContext> =
        EventBus::new();
    let keybindings: Keybindings<MonsterContext> = Keybindings::new();

    for id in [
        MonsterComponentId::List,
        MonsterComponentId::Search,
        MonsterComponentId::Detail,
    ] {
        let ui = Rc::clone(&ui);
        bus.register(id, move |event, state| {
            ui.borrow_mut().handle_event(&event.kind, state)
        });
    }

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::CatalogLoad),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadCatalog { primary, fallback } => {
            let primary = DataSource::parse(&primary);
            let fallback = DataSource::parse(&fallback);
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match loader::load_catalog(&primary, &fallback).await {
                    Ok(monsters) => Action::CatalogDidLoad(monsters),
                    Err(error) => Action::CatalogDidError(loader::failure_report(&error, &fallback)),
                }
            });
        }
    }
}
