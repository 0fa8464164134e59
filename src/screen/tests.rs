//! Run loop scenarios against the headless backend

use super::*;
use crate::backend::TestBackend;
use crate::event::{Key, KEY};
use crate::widget::{Button, Choice, Dialog, List, TextInput};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn screen() -> Screen {
    Screen::new(Config::default())
}

fn ms(start: Instant, millis: u64) -> Instant {
    start + Duration::from_millis(millis)
}

/// Record the char of every key event the dispatcher sees
fn record_keys(screen: &mut Screen) -> Rc<RefCell<Vec<char>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    screen.dispatcher_mut().register_handler(KEY, move |event, _, _| {
        if let Some(key) = event.as_key() {
            if let Key::Char(c) = key.code {
                sink.borrow_mut().push(c);
            }
        }
        Ok(())
    });
    seen
}

#[test]
fn test_typing_into_focused_input() {
    let mut screen = screen();
    screen.dispatcher_mut().register_handler(KEY, forward_to_widgets);

    let mut input = TextInput::new("", 0, 0, 10);
    input.set_focused(true);
    let input_id = screen.add_widget(input);

    let clicks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&clicks);
    screen.add_widget(Button::new("Go", 0, 2).on_click(move |_| counter.set(counter.get() + 1)));

    let selections = Rc::new(Cell::new(0));
    let counter = Rc::clone(&selections);
    screen.add_widget(
        List::new(["one", "two"], 0, 4, 10, 2).on_select(move |_, _| counter.set(counter.get() + 1)),
    );

    let mut backend = TestBackend::new(20, 6);
    backend.push_str("hi\n");
    let start = Instant::now();
    for step in 0..3 {
        screen.tick(&mut backend, ms(start, step * 20)).unwrap();
    }

    match screen.widgets().get(input_id) {
        Some(Node::TextInput(input)) => {
            assert_eq!(input.text(), "hi");
            assert_eq!(input.cursor(), 2);
        }
        other => panic!("expected text input, got {other:?}"),
    }
    assert_eq!(clicks.get(), 0);
    assert_eq!(selections.get(), 0);
    assert_eq!(backend.row_text(0), "hi                  ");
    assert_eq!(backend.cursor(), (0, 2));
    assert!(backend.cursor_visible());
}

#[test]
fn test_quit_truncates_queue() {
    let mut screen = screen();
    let seen = record_keys(&mut screen);

    screen.post(Event::key(Key::Char('a')));
    screen.post(Event::key(Key::Char('q')));
    screen.post(Event::key(Key::Char('b')));
    screen.post(Event::custom("later"));

    let mut backend = TestBackend::new(10, 3);
    screen.tick(&mut backend, Instant::now()).unwrap();

    assert_eq!(*seen.borrow(), vec!['a']);
    assert_eq!(screen.state(), LoopState::Exiting);
    assert_eq!(screen.pending(), 0);
}

#[test]
fn test_uppercase_quit() {
    let mut screen = screen();
    let mut backend = TestBackend::new(10, 3);
    backend.push_key(Key::Char('Q'));
    screen.tick(&mut backend, Instant::now()).unwrap();
    assert_eq!(screen.state(), LoopState::Exiting);
}

#[test]
fn test_quit_bypasses_modal() {
    let mut screen = screen();
    screen.set_modal(Dialog::new("Confirm", "Leave?"));
    screen.post(Event::key(Key::Char('q')));

    let mut backend = TestBackend::new(60, 12);
    screen.tick(&mut backend, Instant::now()).unwrap();
    assert_eq!(screen.state(), LoopState::Exiting);
}

#[test]
fn test_modal_takes_input_exclusively() {
    let mut screen = screen();
    let seen = record_keys(&mut screen);
    let chosen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&chosen);
    screen.set_modal(Dialog::new("Confirm", "Apply?").on_no(move |_| sink.borrow_mut().push(Choice::No)));

    let mut backend = TestBackend::new(60, 12);
    let start = Instant::now();
    screen.post(Event::key(Key::Tab));
    screen.post(Event::key(Key::Char('z')));
    screen.tick(&mut backend, start).unwrap();

    assert!(seen.borrow().is_empty());
    match screen.modal() {
        Some(Node::Dialog(dialog)) => assert_eq!(dialog.focused_choice(), Choice::No),
        other => panic!("expected dialog, got {other:?}"),
    }

    // Choosing closes the modal; later keys reach the dispatcher again
    screen.post(Event::key(Key::Enter));
    screen.post(Event::key(Key::Char('x')));
    screen.tick(&mut backend, ms(start, 20)).unwrap();

    assert!(screen.modal().is_none());
    assert_eq!(*chosen.borrow(), vec![Choice::No]);
    assert_eq!(*seen.borrow(), vec!['x']);
}

#[test]
fn test_handler_requests_are_applied() {
    let mut screen = screen();
    screen.dispatcher_mut().register_handler(KEY, |event, _, ctx| {
        match event.as_key().map(|key| key.code) {
            Some(Key::Char('d')) => ctx.open_modal(Dialog::new("Delete", "Sure?")),
            Some(Key::Char('l')) => ctx.set_loading(Some("Fetching".to_string())),
            Some(Key::Char('x')) => ctx.exit(),
            _ => {}
        }
        Ok(())
    });

    let mut backend = TestBackend::new(60, 12);
    screen.post(Event::key(Key::Char('l')));
    screen.post(Event::key(Key::Char('d')));
    screen.tick(&mut backend, Instant::now()).unwrap();

    assert!(matches!(screen.modal(), Some(Node::Dialog(_))));
    assert_eq!(screen.loading(), Some("Fetching"));
    assert_eq!(screen.state(), LoopState::Initializing);

    screen.clear_modal();
    screen.post(Event::key(Key::Char('x')));
    screen.tick(&mut backend, Instant::now()).unwrap();
    assert_eq!(screen.state(), LoopState::Exiting);
}

#[test]
fn test_failing_handler_does_not_stop_loop() {
    let mut screen = screen();
    screen
        .dispatcher_mut()
        .register_handler(KEY, |_, _, _| anyhow::bail!("handler exploded"));
    let seen = record_keys(&mut screen);

    screen.post(Event::key(Key::Char('a')));
    screen.post(Event::key(Key::Char('b')));
    let mut backend = TestBackend::new(10, 3);
    screen.tick(&mut backend, Instant::now()).unwrap();

    assert_eq!(*seen.borrow(), vec!['a', 'b']);
}

#[test]
fn test_render_only_when_dirty() {
    let mut screen = screen();
    screen.add_widget(Label::new("status", 0, 0));
    let mut backend = TestBackend::new(10, 3);
    let start = Instant::now();

    screen.tick(&mut backend, start).unwrap();
    assert_eq!(backend.flush_count(), 1);
    assert!(!screen.is_dirty());

    // Interval elapsed but nothing changed
    screen.tick(&mut backend, ms(start, 20)).unwrap();
    assert_eq!(backend.flush_count(), 1);

    // Input arrives before the next frame is due
    backend.push_key(Key::Char('a'));
    screen.tick(&mut backend, ms(start, 25)).unwrap();
    assert_eq!(backend.flush_count(), 1);
    assert!(screen.is_dirty());

    screen.tick(&mut backend, ms(start, 40)).unwrap();
    assert_eq!(backend.flush_count(), 2);
    assert_eq!(backend.row_text(0), "status    ");
}

#[test]
fn test_render_tick_fires_without_changes() {
    let mut screen = screen();
    let ticks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ticks);
    screen.dispatcher_mut().register_handler(RENDER_TICK, move |_, _, _| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    let mut backend = TestBackend::new(10, 3);
    let start = Instant::now();

    for step in 0..4 {
        screen.tick(&mut backend, ms(start, step * 16)).unwrap();
    }
    // Not due yet
    screen.tick(&mut backend, ms(start, 50)).unwrap();

    assert_eq!(ticks.get(), 4);
    assert_eq!(backend.flush_count(), 1);
}

#[test]
fn test_render_tick_reaches_dispatcher_while_modal_open() {
    let mut screen = screen();
    let ticks = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ticks);
    screen.dispatcher_mut().register_handler(RENDER_TICK, move |_, _, _| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    screen.set_modal(Dialog::new("Wait", "..."));

    let mut backend = TestBackend::new(60, 12);
    screen.tick(&mut backend, Instant::now()).unwrap();
    assert_eq!(ticks.get(), 1);
}

#[test]
fn test_tick_handler_can_request_render() {
    let mut screen = screen();
    let label = screen.add_widget(Label::new("0", 0, 0));
    screen.dispatcher_mut().register_handler(RENDER_TICK, move |_, widgets, ctx| {
        if let Some(Node::Label(label)) = widgets.get_mut(label) {
            let next = label.text().parse::<u32>()? + 1;
            label.set_text(next.to_string());
            ctx.request_render();
        }
        Ok(())
    });
    let mut backend = TestBackend::new(4, 1);
    let start = Instant::now();

    screen.tick(&mut backend, start).unwrap();
    screen.tick(&mut backend, ms(start, 16)).unwrap();
    assert_eq!(backend.flush_count(), 2);
    assert_eq!(backend.row_text(0), "2   ");
}

#[test]
fn test_invisible_widget_writes_nothing() {
    let mut screen = screen();
    let mut label = Label::new("hidden", 0, 0);
    label.set_visible(false);
    screen.add_widget(label);

    let mut backend = TestBackend::new(10, 3);
    screen.tick(&mut backend, Instant::now()).unwrap();

    assert_eq!(backend.flush_count(), 1);
    assert_eq!(backend.write_count(), 0);
    assert!(!backend.cursor_visible());
}

#[test]
fn test_invisible_widget_still_receives_keys() {
    let mut screen = screen();
    screen.dispatcher_mut().register_handler(KEY, forward_to_widgets);
    let mut input = TextInput::new("", 0, 0, 5);
    input.set_focused(true);
    input.set_visible(false);
    let id = screen.add_widget(input);

    screen.post(Event::key(Key::Char('k')));
    let mut backend = TestBackend::new(10, 3);
    screen.tick(&mut backend, Instant::now()).unwrap();

    match screen.widgets().get(id) {
        Some(Node::TextInput(input)) => assert_eq!(input.text(), "k"),
        other => panic!("expected text input, got {other:?}"),
    }
}

#[test]
fn test_loading_overlay() {
    let mut screen = screen();
    screen.add_widget(Label::new("x".repeat(60), 0, 5));
    screen.set_loading("Working");

    let mut backend = TestBackend::new(60, 12);
    screen.tick(&mut backend, Instant::now()).unwrap();

    // 40x5 box at (10, 3)
    assert_eq!(backend.cell(10, 3).unwrap().glyph, '+');
    assert!(backend.row_text(3).contains(" SYSTEM "));
    assert!(backend.row_text(5).contains("Working"));
    assert_eq!(&backend.row_text(5)[..10], "xxxxxxxxxx");
    assert_eq!(backend.cell(11, 4).unwrap().glyph, ' ');

    screen.clear_loading();
    screen.tick(&mut backend, Instant::now() + Duration::from_secs(1)).unwrap();
    assert_eq!(backend.row_text(5), "x".repeat(60));
}

#[test]
fn test_run_tears_down_after_quit() {
    let mut screen = screen();
    let mut backend = TestBackend::new(10, 3);
    backend.push_key(Key::Char('q'));

    screen.run(&mut backend).unwrap();

    assert_eq!(screen.state(), LoopState::Exiting);
    assert_eq!(backend.init_count(), 1);
    assert_eq!(backend.teardown_count(), 1);
    assert!(!backend.is_initialized());
}

#[test]
fn test_run_tears_down_after_failed_init() {
    let mut screen = screen();
    let mut backend = TestBackend::new(10, 3);
    backend.fail_init(true);

    assert!(screen.run(&mut backend).is_err());
    assert_eq!(backend.teardown_count(), 1);
    assert_eq!(screen.state(), LoopState::Initializing);
}

#[test]
fn test_run_tears_down_after_loop_error() {
    let mut screen = screen();
    let mut backend = TestBackend::new(10, 3);
    backend.fail_flush(true);

    assert!(screen.run(&mut backend).is_err());
    assert_eq!(backend.init_count(), 1);
    assert_eq!(backend.teardown_count(), 1);
    assert!(!backend.is_initialized());
}

#[test]
fn test_modal_hides_cursor_of_widgets_below() {
    let mut screen = screen();
    let mut input = TextInput::new("abc", 0, 0, 10);
    input.set_focused(true);
    screen.add_widget(input);
    let mut backend = TestBackend::new(60, 12);
    let start = Instant::now();

    screen.tick(&mut backend, start).unwrap();
    assert!(backend.cursor_visible());
    assert_eq!(backend.cursor(), (0, 3));

    screen.set_modal(Dialog::new("Confirm", "Leave?"));
    screen.tick(&mut backend, ms(start, 100)).unwrap();
    assert!(!backend.cursor_visible());
}

#[test]
fn test_run_exits_on_handler_request() {
    let mut screen = screen();
    screen.dispatcher_mut().register_handler(RENDER_TICK, |_, _, ctx| {
        ctx.exit();
        Ok(())
    });
    let mut backend = TestBackend::new(10, 3);

    screen.run(&mut backend).unwrap();
    assert_eq!(backend.teardown_count(), 1);
}
