use super::{Event, EventQueue};
use crate::widget::Node;

/// Change a handler or widget callback asks the screen to make
#[derive(Debug)]
pub enum Request {
    Exit,
    OpenModal(Node),
    CloseModal,
    /// `Some(message)` shows the loading overlay, `None` hides it
    SetLoading(Option<String>),
    /// Repaint on the next frame even if no input arrived
    Render,
}

/// Handle passed to event handlers and widget callbacks.
///
/// Events posted here join the tail of the queue and are processed in the same
/// drain. Requests are applied by the screen, in order, once the handler returns.
pub struct EventContext<'a> {
    queue: &'a mut EventQueue,
    requests: Vec<Request>,
}

impl<'a> EventContext<'a> {
    pub fn new(queue: &'a mut EventQueue) -> Self {
        Self {
            queue,
            requests: Vec::new(),
        }
    }

    pub fn post(&mut self, event: Event) {
        self.queue.post(event);
    }

    pub fn exit(&mut self) {
        self.requests.push(Request::Exit);
    }

    pub fn open_modal(&mut self, modal: impl Into<Node>) {
        self.requests.push(Request::OpenModal(modal.into()));
    }

    pub fn close_modal(&mut self) {
        self.requests.push(Request::CloseModal);
    }

    pub fn set_loading(&mut self, message: Option<String>) {
        self.requests.push(Request::SetLoading(message));
    }

    pub fn request_render(&mut self) {
        self.requests.push(Request::Render);
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<Request> {
        self.requests
    }
}
