//! Page lifecycle tests against the headless host
//!
//! Layout mirrors a browser page: 8px body margin, a 1000px buffer section,
//! then the element under test at offset 1008.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrollhook_core::prelude::*;
use scrollhook_headless::{HeadlessDocument, HeadlessElement, HeadlessWindow};

const THROTTLE: Duration = Duration::from_millis(50);

fn setup() -> (Rc<HeadlessWindow>, HeadlessDocument) {
    let window = Rc::new(HeadlessWindow::new(600));
    let mut doc = HeadlessDocument::new();
    doc.spacer(1000);
    (window, doc)
}

fn test_element(doc: &mut HeadlessDocument, classes: &[&str]) -> HeadlessElement {
    doc.append("test", 400).unwrap().classes(classes.iter().copied())
}

#[test]
fn test_transitions_when_scrolled_into_view() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &["foo"]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(
        el.clone(),
        RegisterOptions::new().initial_states("foo").final_states("bar"),
    )
    .start();

    window.scroll_view_bottom_to(1008);
    assert_eq!(el.class_name(), "bar");
}

#[test]
fn test_transitions_at_specified_position() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &["foo"]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(
        el.clone(),
        RegisterOptions::new()
            .position(1100)
            .initial_states("foo")
            .final_states("bar"),
    )
    .start();

    // The natural offset would have fired here
    window.scroll_view_bottom_to(1008);
    assert_eq!(el.class_name(), "foo");

    window.scroll_view_bottom_to(1100);
    assert_eq!(el.class_name(), "bar");
}

#[test]
fn test_initial_states_only() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &["one", "two"]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el.clone(), RegisterOptions::new().initial_states(["one", "two"]))
        .start();

    assert_eq!(el.class_name(), "one two");
    window.scroll_view_bottom_to(1008);
    assert_eq!(el.class_name(), "");
}

#[test]
fn test_final_states_only() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el.clone(), RegisterOptions::new().final_states(["three", "four"]))
        .start();

    assert_eq!(el.class_name(), "");
    window.scroll_view_bottom_to(1008);
    assert_eq!(el.class_name(), "three four");
}

#[test]
fn test_removes_positions_as_they_fire() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(
        el.clone(),
        RegisterOptions::new().position(1100).final_states(["three", "four"]),
    )
    .start();

    assert!(page.pending_positions().contains(&1100));
    assert_eq!(page.tracker().registrations_at(1100).len(), 1);

    window.scroll_view_bottom_to(1100);
    assert_eq!(el.class_name(), "three four");
    assert!(!page.pending_positions().contains(&1100));
    assert!(page.tracker().registrations_at(1100).is_empty());
}

#[test]
fn test_shared_position_fires_together() {
    let (window, _doc) = setup();
    let left = HeadlessElement::new("left", 0).classes(["left"]);
    let right = HeadlessElement::new("right", 0).classes(["right"]);
    let options = RegisterOptions::new().position(2000).final_states("donezo");

    let mut page = Page::new(Rc::clone(&window));
    page.register(left.clone(), options.clone())
        .register(right.clone(), options);

    window.set_scroll_y(1400);
    assert_eq!(page.transition_elements(), 2);

    assert!(left.has_class("donezo"));
    assert!(right.has_class("donezo"));
    assert!(page.pending_positions().is_empty());
    assert_eq!(page.min(), None);
}

#[test]
fn test_raw_scroll_goes_through_throttle() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &["hidden"]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(
        el.clone(),
        RegisterOptions::new().initial_states("hidden").final_states("shown"),
    )
    .start();

    for y in (0..=500).step_by(100) {
        window.scroll_to(y);
    }

    // Nothing happens until the throttle window closes
    assert_eq!(el.class_name(), "hidden");

    window.advance(THROTTLE);
    assert_eq!(el.class_name(), "shown");
    assert_eq!(
        window.dispatch_count(EventTarget::Window, event_names::OPTIMIZED_SCROLL),
        1
    );
}

#[test]
fn test_listeners_removed_after_everything_fires() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el.clone(), RegisterOptions::new().final_states("done"))
        .start();

    assert_eq!(window.listener_count(EventTarget::Window, event_names::SCROLL), 1);
    assert_eq!(
        window.listener_count(EventTarget::Window, event_names::OPTIMIZED_SCROLL),
        1
    );

    window.scroll_view_bottom_to(1008);
    assert_eq!(el.class_name(), "done");

    // Scroll listeners stay until a firing observes there is nothing left
    assert_eq!(window.listener_count(EventTarget::Window, event_names::SCROLL), 1);

    window.scroll_view_bottom_to(1200);
    assert_eq!(window.listener_count(EventTarget::Window, event_names::SCROLL), 0);
    assert_eq!(
        window.listener_count(EventTarget::Window, event_names::OPTIMIZED_SCROLL),
        0
    );
    assert!(page.is_started());
}

#[test]
fn test_scroll_above_min_is_ignored() {
    let (window, _doc) = setup();
    let el = HeadlessElement::new("far", 5000);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el.clone(), RegisterOptions::new().final_states("seen"))
        .start();

    window.scroll_view_bottom_to(1000);
    window.scroll_view_bottom_to(4999);
    assert_eq!(el.class_name(), "");
    assert_eq!(page.min(), Some(5000));
    assert_eq!(window.listener_count(EventTarget::Window, event_names::SCROLL), 1);
}

#[test]
fn test_document_ready_fires_elements_already_in_view() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &["hidden"]);
    let below = HeadlessElement::new("below", 9000);

    let mut page = Page::new(Rc::clone(&window));
    page.register(
        el.clone(),
        RegisterOptions::new().initial_states("hidden").final_states("shown"),
    )
    .register(below.clone(), RegisterOptions::new().final_states("shown"))
    .start();

    // Page restored with the scroll position preserved
    window.set_scroll_y(900);
    assert_eq!(
        window.listener_count(EventTarget::Document, event_names::DOM_CONTENT_LOADED),
        1
    );

    window.load();
    assert_eq!(el.class_name(), "shown");
    assert_eq!(below.class_name(), "");
    assert_eq!(
        window.listener_count(EventTarget::Document, event_names::DOM_CONTENT_LOADED),
        0
    );

    // The ready listener is one-shot
    window.set_scroll_y(9000);
    window.load();
    assert_eq!(below.class_name(), "");
    assert_eq!(page.pending_positions(), vec![9000]);
}

#[test]
fn test_register_after_start() {
    let (window, _doc) = setup();
    let first = HeadlessElement::new("first", 3000);
    let late = HeadlessElement::new("late", 700);

    let mut page = Page::new(Rc::clone(&window));
    page.register(first.clone(), RegisterOptions::new().final_states("on"))
        .start();
    page.register(late.clone(), RegisterOptions::new().final_states("on"));

    assert_eq!(page.min(), Some(700));
    window.scroll_view_bottom_to(800);
    assert!(late.has_class("on"));
    assert!(!first.has_class("on"));
}

#[test]
fn test_duplicate_start_is_ignored() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el, RegisterOptions::default()).start().start();

    assert_eq!(window.listener_count(EventTarget::Window, event_names::SCROLL), 1);
    assert_eq!(
        window.listener_count(EventTarget::Document, event_names::DOM_CONTENT_LOADED),
        1
    );
}

#[test]
fn test_restart_after_listeners_removed_themselves() {
    let (window, _doc) = setup();
    let first = HeadlessElement::new("first", 100);

    let mut page = Page::new(Rc::clone(&window));
    page.register(first.clone(), RegisterOptions::new().final_states("on"))
        .start();

    window.scroll_view_bottom_to(100);
    assert!(first.has_class("on"));

    // Second pass sees nothing pending, then ready removes itself
    window.scroll_view_bottom_to(100);
    window.load();
    assert!(page.is_started());
    assert!(!page.is_listening());
    assert_eq!(window.total_listeners(), 0);

    let late = HeadlessElement::new("late", 700);
    page.register(late.clone(), RegisterOptions::new().final_states("on"))
        .start();
    assert!(page.is_listening());
    assert_eq!(window.total_listeners(), 3);

    window.scroll_view_bottom_to(800);
    assert!(late.has_class("on"));
    assert!(page.pending_positions().is_empty());
}

#[test]
fn test_stop_removes_listeners_and_pending_dispatch() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    let mut page = Page::new(Rc::clone(&window));
    page.register(el.clone(), RegisterOptions::new().final_states("done"))
        .start();

    window.scroll_to(600);
    assert_eq!(window.pending_timers(), 1);

    assert!(page.stop());
    assert!(!page.stop());
    assert_eq!(window.total_listeners(), 0);
    assert_eq!(window.pending_timers(), 0);

    window.advance(THROTTLE * 2);
    assert_eq!(el.class_name(), "");
    assert_eq!(page.pending_positions(), vec![1008]);

    // Restart picks up where it left off
    page.start();
    window.scroll_to(610);
    window.advance(THROTTLE);
    assert_eq!(el.class_name(), "done");
}

#[test]
fn test_drop_tears_down() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);

    {
        let mut page = Page::new(Rc::clone(&window));
        page.register(el, RegisterOptions::default()).start();
        assert!(page.is_listening());
        assert_eq!(window.total_listeners(), 3);
    }

    assert_eq!(window.total_listeners(), 0);
}

#[test]
fn test_create_throttle_dispatches_once() {
    let (window, _doc) = setup();
    let mut page: Page<HeadlessWindow> = Page::new(Rc::clone(&window));
    page.set_throttle_time(1);

    let seen: Rc<RefCell<Vec<Duration>>> = Rc::new(RefCell::new(Vec::new()));
    let seen_clone = Rc::clone(&seen);
    let clock = Rc::clone(&window);
    window.add_listener(
        EventTarget::Window,
        "foobarEvent",
        Rc::new(move || seen_clone.borrow_mut().push(clock.now())),
    );

    let throttle = page.create_throttle("foobarEvent");
    assert_eq!(throttle.delay(), Duration::from_millis(1));

    throttle.call();
    throttle.call();
    window.advance(Duration::from_millis(51));

    assert_eq!(*seen.borrow(), vec![Duration::from_millis(1)]);
}

#[test]
fn test_throttle_time_applies_to_new_throttles_only() {
    let (window, _doc) = setup();
    let mut page: Page<HeadlessWindow> = Page::new(Rc::clone(&window));

    let before = page.create_throttle("x");
    page.set_throttle_time(2000);
    let after = page.create_throttle("x");

    assert_eq!(before.delay(), THROTTLE);
    assert_eq!(after.delay(), Duration::from_millis(2000));
    assert_eq!(page.tracker().throttle_time(), Duration::from_millis(2000));
}

#[test]
fn test_custom_event_names() {
    let (window, mut doc) = setup();
    let el = test_element(&mut doc, &[]);
    let config = HookConfig::default()
        .scroll_event(event_names::WHEEL)
        .synthetic_event("settled")
        .throttle_ms(20);

    let mut page = Page::with_config(Rc::clone(&window), config).unwrap();
    page.register(el.clone(), RegisterOptions::new().final_states("on"))
        .start();

    window.set_scroll_y(500);
    window.dispatch(EventTarget::Window, event_names::WHEEL);
    window.advance(Duration::from_millis(20));

    assert_eq!(el.class_name(), "on");
    assert_eq!(window.dispatch_count(EventTarget::Window, "settled"), 1);
}

#[test]
fn test_with_config_rejects_invalid_config() {
    let (window, _doc) = setup();

    let empty = HookConfig::default().ready_event("");
    assert!(matches!(
        Page::with_config(Rc::clone(&window), empty),
        Err(ConfigError::EmptyEventName("ready_event"))
    ));

    let looping = HookConfig::default().synthetic_event(event_names::SCROLL);
    assert!(matches!(
        Page::with_config(Rc::clone(&window), looping),
        Err(ConfigError::SyntheticEventLoop(_))
    ));
    assert_eq!(window.total_listeners(), 0);
}
