//! Screen and run loop
//!
//! The screen owns the top-level widgets, the event queue, the dispatcher, an
//! optional modal and the loading overlay. Each iteration of the loop:
//!
//! 1. polls the backend for one key and posts it
//! 2. drains the queue (a quit key stops the drain and drops the rest)
//! 3. once the frame interval has elapsed, dispatches `render_tick` and
//!    repaints if anything changed
//! 4. sleeps for the idle quantum
//!
//! A modal, while set, receives every event and the dispatcher none.

use std::time::Instant;

use ratatui::layout::Rect;

use crate::backend::{Backend, Session, Surface};
use crate::config::{Config, OverlayConfig};
use crate::error::Result;
use crate::event::{Dispatcher, Event, EventContext, EventQueue, Request, RENDER_TICK};
use crate::theme::{ColorPair, Palette};
use crate::widget::text::center;
use crate::widget::{Frame, Label, Node, Widget, WidgetId, WidgetTree};

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Initializing,
    Running,
    Exiting,
}

/// Handler that offers an event to the top-level widgets in insertion order,
/// stopping at the first one that consumes it. Register it for [`crate::event::KEY`]
/// to get focus-driven key routing.
pub fn forward_to_widgets(
    event: &Event,
    widgets: &mut WidgetTree,
    ctx: &mut EventContext<'_>,
) -> anyhow::Result<()> {
    for (_, widget) in widgets.iter_mut() {
        if widget.handle_event(event, ctx) {
            break;
        }
    }
    Ok(())
}

#[derive(Debug)]
pub struct Screen {
    config: Config,
    palette: Palette,
    widgets: WidgetTree,
    dispatcher: Dispatcher,
    queue: EventQueue,
    modal: Option<Node>,
    loading: Option<String>,
    state: LoopState,
    dirty: bool,
    last_render: Option<Instant>,
}

impl Screen {
    pub fn new(config: Config) -> Self {
        Self::with_dispatcher(config, Dispatcher::new())
    }

    pub fn with_dispatcher(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            palette: Palette::standard(),
            widgets: WidgetTree::new(),
            dispatcher,
            queue: EventQueue::new(),
            modal: None,
            loading: None,
            state: LoopState::Initializing,
            dirty: true,
            last_render: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn add_widget(&mut self, widget: impl Into<Node>) -> WidgetId {
        self.dirty = true;
        self.widgets.insert(widget)
    }

    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Node> {
        self.dirty = true;
        self.widgets.remove(id)
    }

    pub fn widgets(&self) -> &WidgetTree {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut WidgetTree {
        &mut self.widgets
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Show `modal`, replacing any modal already open
    pub fn set_modal(&mut self, modal: impl Into<Node>) {
        if self.modal.replace(modal.into()).is_some() {
            tracing::debug!("replaced open modal");
        }
        self.dirty = true;
    }

    pub fn clear_modal(&mut self) -> Option<Node> {
        self.dirty = true;
        self.modal.take()
    }

    pub fn modal(&self) -> Option<&Node> {
        self.modal.as_ref()
    }

    pub fn set_loading(&mut self, message: impl Into<String>) {
        self.loading = Some(message.into());
        self.dirty = true;
    }

    pub fn clear_loading(&mut self) {
        self.loading = None;
        self.dirty = true;
    }

    pub fn loading(&self) -> Option<&str> {
        self.loading.as_deref()
    }

    /// Queue an event for the next drain
    pub fn post(&mut self, event: Event) {
        self.queue.post(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stop the loop at the end of the current iteration
    pub fn exit(&mut self) {
        self.state = LoopState::Exiting;
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run until a quit key or an exit request.
    ///
    /// The backend is initialized on entry and torn down on every exit path,
    /// including errors from inside the loop.
    pub fn run(&mut self, backend: &mut dyn Backend) -> Result<()> {
        let mut session = Session::acquire(backend, &self.palette)?;
        if self.state == LoopState::Initializing {
            self.state = LoopState::Running;
        }
        self.dirty = true;
        tracing::info!(
            frame_interval_ms = self.config.run_loop.frame_interval_ms,
            widgets = self.widgets.len(),
            "screen loop started"
        );

        let idle = self.config.run_loop.idle_sleep();
        while self.state != LoopState::Exiting {
            self.tick(session.backend(), Instant::now())?;
            std::thread::sleep(idle);
        }

        tracing::info!("screen loop stopped");
        session.release()
    }

    /// One loop iteration at time `now`, without the trailing sleep
    pub fn tick(&mut self, backend: &mut dyn Backend, now: Instant) -> Result<()> {
        self.poll_input(backend);
        self.drain();

        let interval = self.config.run_loop.frame_interval();
        let due = self
            .last_render
            .map_or(true, |last| now.saturating_duration_since(last) >= interval);
        if !due {
            return Ok(());
        }

        let requests = self.dispatch(&Event::custom(RENDER_TICK));
        self.apply(requests);
        if self.dirty {
            self.render(backend)?;
            self.dirty = false;
        }
        self.last_render = Some(now);
        Ok(())
    }

    fn poll_input(&mut self, backend: &mut dyn Backend) {
        match backend.read_key() {
            Ok(Some(key)) => self.queue.post(Event::key(key)),
            Ok(None) => {}
            Err(e) => tracing::debug!("dropping unreadable input: {}", e),
        }
    }

    fn drain(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.dirty = true;
            if event.is_quit() {
                self.state = LoopState::Exiting;
                let dropped = self.queue.clear();
                if dropped > 0 {
                    tracing::debug!(dropped, "quit key pressed, discarding queued events");
                }
                break;
            }
            let requests = self.route(&event);
            self.apply(requests);
        }
    }

    /// Deliver one event to the modal if any, otherwise to the dispatcher
    fn route(&mut self, event: &Event) -> Vec<Request> {
        if let Some(modal) = self.modal.as_mut() {
            let mut ctx = EventContext::new(&mut self.queue);
            modal.handle_event(event, &mut ctx);
            return ctx.into_requests();
        }
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: &Event) -> Vec<Request> {
        let mut ctx = EventContext::new(&mut self.queue);
        self.dispatcher.dispatch(event, &mut self.widgets, &mut ctx);
        ctx.into_requests()
    }

    fn apply(&mut self, requests: Vec<Request>) {
        for request in requests {
            match request {
                Request::Exit => self.exit(),
                Request::OpenModal(modal) => self.set_modal(modal),
                Request::CloseModal => {
                    self.clear_modal();
                }
                Request::SetLoading(Some(message)) => self.set_loading(message),
                Request::SetLoading(None) => self.clear_loading(),
                Request::Render => self.dirty = true,
            }
        }
    }

    fn render(&mut self, backend: &mut dyn Backend) -> Result<()> {
        backend.clear()?;

        let mut surface = Surface::new(&mut *backend);
        let area = surface.area();
        for (_, widget) in self.widgets.iter_mut() {
            widget.render(&mut surface, area);
        }
        if let Some(message) = &self.loading {
            draw_overlay(&mut surface, area, &self.config.overlay, message);
        }
        if let Some(modal) = self.modal.as_mut() {
            // Widgets underneath don't get the cursor
            surface.clear_cursor();
            modal.render(&mut surface, area);
        }
        let cursor = surface.cursor();

        match cursor {
            Some((x, y)) => {
                backend.move_cursor(y, x)?;
                backend.set_cursor_visible(true)?;
            }
            None => backend.set_cursor_visible(false)?,
        }
        backend.flush()?;
        tracing::trace!(
            widgets = self.widgets.len(),
            modal = self.modal.is_some(),
            loading = self.loading.is_some(),
            "frame rendered"
        );
        Ok(())
    }
}

/// Blank centered box with a framed title and the message
fn draw_overlay(surface: &mut Surface<'_>, area: Rect, overlay: &OverlayConfig, message: &str) {
    let width = overlay.width.min(area.width);
    let height = overlay.height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;

    surface.fill(Rect::new(x, y, width, height), ' ', ColorPair::Default);
    Frame::new(overlay.title.as_str(), x, y, width, height)
        .color(ColorPair::Accent)
        .render(surface, area);

    let inner = width.saturating_sub(4);
    Label::new(center(message, inner as usize), x + 2, y + height / 2)
        .width(inner)
        .color(ColorPair::Warning)
        .render(surface, area);
}
