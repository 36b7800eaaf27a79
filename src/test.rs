use crate::config::{Config, IntegrationMode, VirtualKeyboardConfig};
use crate::input_method::{InputMethod, InputMethodType};
use crate::integration::{KeyboardIntegration, KeyboardProperty, NullKeyboardIntegration, PropertyUpdate};
use crate::kirigami::Kirigami;
use crate::notify::Signal;
use crate::watcher::VirtualKeyboardWatcher;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// What a scripted compositor has been asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Enabled(bool),
    Active(bool),
}

/// Stands in for a compositor: writes are recorded, updates are pushed by the test.
#[derive(Default)]
struct Compositor {
    requests: RefCell<Vec<Request>>,
    pending: RefCell<VecDeque<PropertyUpdate>>,
}

impl Compositor {
    fn push(&self, property: KeyboardProperty, value: bool) {
        self.pending
            .borrow_mut()
            .push_back(PropertyUpdate::new(property, value));
    }

    /// Confirms every recorded write, as the real compositor would.
    fn confirm_requests(&self) {
        for request in self.requests.borrow_mut().drain(..) {
            let update = match request {
                Request::Enabled(value) => PropertyUpdate::new(KeyboardProperty::Enabled, value),
                Request::Active(value) => PropertyUpdate::new(KeyboardProperty::Active, value),
            };
            self.pending.borrow_mut().push_back(update);
        }
    }
}

struct ScriptedIntegration(Rc<Compositor>);

impl KeyboardIntegration for ScriptedIntegration {
    fn forwards_writes(&self) -> bool {
        true
    }

    fn request_enabled(&self, enabled: bool) {
        self.0.requests.borrow_mut().push(Request::Enabled(enabled));
    }

    fn request_active(&self, active: bool) {
        self.0.requests.borrow_mut().push(Request::Active(active));
    }

    fn take_updates(&self) -> Vec<PropertyUpdate> {
        self.0.pending.borrow_mut().drain(..).collect()
    }
}

fn scripted_watcher() -> (Rc<Compositor>, Rc<VirtualKeyboardWatcher>) {
    let compositor = Rc::new(Compositor::default());
    let watcher = Rc::new(VirtualKeyboardWatcher::new(Box::new(ScriptedIntegration(
        Rc::clone(&compositor),
    ))));
    (compositor, watcher)
}

fn record<T: Copy + 'static>(signal: &Signal<T>) -> Rc<RefCell<Vec<T>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    signal.connect(move |value| sink.borrow_mut().push(value));
    seen
}

#[test]
fn type_follows_every_available_toggle() {
    let (compositor, watcher) = scripted_watcher();
    let input_method = InputMethod::new(Rc::clone(&watcher));

    let observed = record(input_method.type_changed());

    let toggles = [true, false, false, true, true, false, true];
    for available in toggles {
        compositor.push(KeyboardProperty::Available, available);
        assert_eq!(watcher.dispatch_pending(), 1);
        let expected = if available {
            InputMethodType::VirtualKeyboard
        } else {
            InputMethodType::NoInputMethod
        };
        assert_eq!(input_method.input_type(), expected);
    }

    // Every notification is forwarded, including repeats.
    assert_eq!(observed.borrow().len(), toggles.len());
    assert!(!observed.borrow().contains(&InputMethodType::Other));
}

#[test]
fn unchanged_write_emits_nothing() {
    let (compositor, watcher) = scripted_watcher();
    let seen = record(&watcher.enabled_changed);

    watcher.set_enabled(false);
    watcher.set_active(false);
    assert!(compositor.requests.borrow().is_empty());
    assert_eq!(watcher.dispatch_pending(), 0);
    assert!(seen.borrow().is_empty());

    let null_watcher = VirtualKeyboardWatcher::new(Box::new(NullKeyboardIntegration));
    null_watcher.set_enabled(true);
    let seen = record(&null_watcher.enabled_changed);
    null_watcher.set_enabled(true);
    assert!(seen.borrow().is_empty());
}

#[test]
fn new_view_is_seeded_from_current_state() {
    let (compositor, watcher) = scripted_watcher();
    compositor.push(KeyboardProperty::Available, true);
    compositor.push(KeyboardProperty::Enabled, true);
    compositor.push(KeyboardProperty::Active, false);
    compositor.push(KeyboardProperty::Visible, false);
    assert_eq!(watcher.dispatch_pending(), 4);

    let input_method = InputMethod::new(Rc::clone(&watcher));
    assert_eq!(input_method.input_type(), InputMethodType::VirtualKeyboard);
    assert!(input_method.enabled());
    assert!(!input_method.active());
}

#[test]
fn without_integration_writes_are_local_and_immediate() {
    let kirigami = Kirigami::new(Config {
        virtual_keyboard: VirtualKeyboardConfig {
            mode: IntegrationMode::Disabled,
            ..Default::default()
        },
    });
    let watcher = kirigami.virtual_keyboard_watcher();
    let seen = record(&watcher.enabled_changed);

    assert!(!watcher.available());
    watcher.set_enabled(true);
    assert!(watcher.enabled());
    assert_eq!(*seen.borrow(), vec![true]);

    assert_eq!(watcher.dispatch_pending(), 0);
    assert!(!watcher.available());
    assert!(!watcher.visible());
}

#[test]
fn watcher_update_overrides_local_view_write() {
    let (compositor, watcher) = scripted_watcher();
    let input_method = InputMethod::new(Rc::clone(&watcher));
    let seen = record(input_method.active_changed());

    input_method.set_active(true);
    assert!(input_method.active());
    // The view does not write back.
    assert!(!watcher.active());
    assert!(compositor.requests.borrow().is_empty());

    compositor.push(KeyboardProperty::Active, false);
    watcher.dispatch_pending();
    assert!(!input_method.active());
    assert_eq!(*seen.borrow(), vec![true, false]);
}

#[test]
fn view_setters_skip_unchanged_values() {
    let (_compositor, watcher) = scripted_watcher();
    let input_method = InputMethod::new(watcher);
    let seen = record(input_method.enabled_changed());
    input_method.set_enabled(false);
    input_method.set_enabled(true);
    input_method.set_enabled(true);
    assert_eq!(*seen.borrow(), vec![true]);
}

#[test]
fn watcher_is_created_once() {
    let compositor = Rc::new(Compositor::default());
    let kirigami = Kirigami::with_integration(
        Config::default(),
        Box::new(ScriptedIntegration(Rc::clone(&compositor))),
    );

    let first = kirigami.virtual_keyboard_watcher();
    let second = kirigami.virtual_keyboard_watcher();
    assert!(Rc::ptr_eq(&first, &second));

    first.set_active(true);
    assert!(second.active());

    compositor.push(KeyboardProperty::Visible, true);
    second.dispatch_pending();
    assert!(first.visible());

    let input_method = kirigami.input_method();
    assert!(Rc::ptr_eq(input_method.watcher(), &first));
}

#[test]
fn forwarded_write_notifies_on_confirmation() {
    let (compositor, watcher) = scripted_watcher();
    let input_method = InputMethod::new(Rc::clone(&watcher));
    let watcher_seen = record(&watcher.enabled_changed);
    let view_seen = record(input_method.enabled_changed());

    watcher.set_enabled(true);
    assert!(watcher.enabled());
    assert_eq!(*compositor.requests.borrow(), vec![Request::Enabled(true)]);
    assert!(watcher_seen.borrow().is_empty());
    // The view only learns about it through the notification.
    assert!(!input_method.enabled());

    compositor.confirm_requests();
    assert_eq!(watcher.dispatch_pending(), 1);
    assert_eq!(*watcher_seen.borrow(), vec![true]);
    assert_eq!(*view_seen.borrow(), vec![true]);
    assert!(input_method.enabled());
}

#[test]
fn compositor_may_reject_a_write() {
    let (compositor, watcher) = scripted_watcher();
    watcher.set_active(true);
    assert!(watcher.active());
    compositor.requests.borrow_mut().clear();

    compositor.push(KeyboardProperty::Active, false);
    watcher.dispatch_pending();
    assert!(!watcher.active());
}

#[test]
fn dropped_view_is_disconnected() {
    let (compositor, watcher) = scripted_watcher();
    let baseline = watcher.available_changed.handler_count();

    let input_method = InputMethod::new(Rc::clone(&watcher));
    assert_eq!(watcher.available_changed.handler_count(), baseline + 1);
    assert_eq!(watcher.enabled_changed.handler_count(), 1);
    assert_eq!(watcher.active_changed.handler_count(), 1);
    assert_eq!(watcher.visible_changed.handler_count(), 0);

    drop(input_method);
    assert_eq!(watcher.available_changed.handler_count(), baseline);
    assert_eq!(watcher.enabled_changed.handler_count(), 0);
    assert_eq!(watcher.active_changed.handler_count(), 0);

    compositor.push(KeyboardProperty::Available, true);
    assert_eq!(watcher.dispatch_pending(), 1);
}

#[test]
fn updates_apply_in_arrival_order() {
    let (compositor, watcher) = scripted_watcher();
    let seen = record(&watcher.enabled_changed);
    compositor.push(KeyboardProperty::Enabled, true);
    compositor.push(KeyboardProperty::Enabled, false);
    compositor.push(KeyboardProperty::Enabled, true);
    assert_eq!(watcher.dispatch_pending(), 3);
    assert_eq!(*seen.borrow(), vec![true, false, true]);
    assert!(watcher.enabled());
}

#[test]
fn views_share_one_watcher() {
    let (compositor, watcher) = scripted_watcher();
    let first = InputMethod::new(Rc::clone(&watcher));
    let second = InputMethod::new(Rc::clone(&watcher));

    first.set_enabled(true);
    assert!(!second.enabled());

    compositor.push(KeyboardProperty::Available, true);
    compositor.push(KeyboardProperty::Enabled, false);
    watcher.dispatch_pending();
    for view in [&first, &second] {
        assert_eq!(view.input_type(), InputMethodType::VirtualKeyboard);
        assert!(!view.enabled());
    }
}
