use std::collections::HashMap;

use super::{Event, EventContext};
use crate::widget::WidgetTree;

/// Event handler. Receives the screen's top-level widgets so it can route the
/// event to (or update) the widgets it cares about.
pub type Handler = Box<dyn FnMut(&Event, &mut WidgetTree, &mut EventContext<'_>) -> anyhow::Result<()>>;

/// Registry mapping event kinds to ordered handler lists.
///
/// Registration is append-only: there is no way to unregister. A widget that is
/// removed from the screen keeps its handlers, so handlers must tolerate the
/// widget they target being gone (look it up by id and skip when missing).
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Vec<Handler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler<F>(&mut self, kind: impl Into<String>, handler: F)
    where
        F: FnMut(&Event, &mut WidgetTree, &mut EventContext<'_>) -> anyhow::Result<()> + 'static,
    {
        self.handlers
            .entry(kind.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Number of handlers registered for a kind
    pub fn handler_count(&self, kind: &str) -> usize {
        self.handlers.get(kind).map_or(0, Vec::len)
    }

    /// Run every handler registered for `event.kind()`, in registration order.
    ///
    /// A failing handler is logged and does not stop the ones after it.
    /// Returns the number of handlers invoked.
    pub fn dispatch(
        &mut self,
        event: &Event,
        widgets: &mut WidgetTree,
        ctx: &mut EventContext<'_>,
    ) -> usize {
        let Some(handlers) = self.handlers.get_mut(event.kind()) else {
            return 0;
        };

        for (index, handler) in handlers.iter_mut().enumerate() {
            if let Err(e) = handler(event, widgets, ctx) {
                tracing::warn!(kind = event.kind(), index, "event handler failed: {:#}", e);
            }
        }
        handlers.len()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, list)| (kind.as_str(), list.len()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("Dispatcher").field("handlers", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventQueue, Key, Request};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(dispatcher: &mut Dispatcher, event: &Event) -> (usize, Vec<Request>) {
        let mut queue = EventQueue::new();
        let mut widgets = WidgetTree::new();
        let mut ctx = EventContext::new(&mut queue);
        let count = dispatcher.dispatch(event, &mut widgets, &mut ctx);
        (count, ctx.into_requests())
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = Dispatcher::new();

        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            dispatcher.register_handler("key", move |_, _, _| {
                log.borrow_mut().push(name);
                Ok(())
            });
        }

        let (count, _) = run(&mut dispatcher, &Event::key(Key::Enter));
        assert_eq!(count, 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_failing_handler_does_not_skip_later_ones() {
        let reached = Rc::new(RefCell::new(false));
        let mut dispatcher = Dispatcher::new();

        dispatcher.register_handler("tick", |_, _, _| anyhow::bail!("boom"));
        let flag = Rc::clone(&reached);
        dispatcher.register_handler("tick", move |_, _, _| {
            *flag.borrow_mut() = true;
            Ok(())
        });

        let (count, _) = run(&mut dispatcher, &Event::custom("tick"));
        assert_eq!(count, 2);
        assert!(*reached.borrow());
    }

    #[test]
    fn test_unregistered_kind_is_ignored() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_handler("key", |_, _, _| Ok(()));

        let (count, _) = run(&mut dispatcher, &Event::custom("other"));
        assert_eq!(count, 0);
        assert_eq!(dispatcher.handler_count("key"), 1);
        assert_eq!(dispatcher.handler_count("other"), 0);
    }

    #[test]
    fn test_handler_requests_are_collected() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_handler("key", |_, _, ctx| {
            ctx.request_render();
            ctx.exit();
            Ok(())
        });

        let (_, requests) = run(&mut dispatcher, &Event::key(Key::Esc));
        assert!(matches!(requests.as_slice(), [Request::Render, Request::Exit]));
    }
}
