use chatpad::capabilities::{ConnectivityOperation, ConnectivityOutput, NetworkState};
use chatpad::connectivity::ConnectivitySignal;
use chatpad::view::StatusTone;
use chatpad::{App, CruxApp, Effect, Event, Model};
use crux_core::testing::AppTester;
use crux_core::Request;

fn subscription(effects: Vec<Effect>) -> Option<Request<ConnectivityOperation>> {
    effects.into_iter().find_map(|e| match e {
        Effect::Connectivity(request) => Some(request),
        _ => None,
    })
}

fn state(connected: bool, reachable: Option<bool>) -> ConnectivityOutput {
    ConnectivityOutput::State(NetworkState::new(connected, reachable))
}

/// Pushes one stream update through the subscription and into the app.
fn push(
    app: &AppTester<App, Effect>,
    request: &mut Request<ConnectivityOperation>,
    output: ConnectivityOutput,
    model: &mut Model,
) {
    let update = app.resolve(request, output).expect("stream update");
    for event in update.events {
        app.update(event, model);
    }
}

fn type_and_send(app: &AppTester<App, Effect>, model: &mut Model, text: &str) {
    app.update(
        Event::DraftChanged {
            text: text.to_string(),
        },
        model,
    );
    app.update(Event::SendPressed, model);
}

#[test]
fn starts_unknown_and_subscribes_once() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let request = subscription(update.effects).expect("subscribe");
    assert_eq!(request.operation, ConnectivityOperation::Subscribe);
    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);
    assert_eq!(App.view(&model).status.tone, StatusTone::Pending);

    let update = app.update(Event::AppStarted, &mut model);
    assert!(subscription(update.effects).is_none());
}

#[test]
fn disconnect_mid_session_blocks_text_until_reconnect() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");

    push(&app, &mut request, state(true, Some(true)), &mut model);
    assert_eq!(model.connectivity(), ConnectivitySignal::Connected);
    type_and_send(&app, &mut model, "before");
    assert_eq!(model.messages().len(), 1);

    push(&app, &mut request, state(false, Some(false)), &mut model);
    assert_eq!(model.connectivity(), ConnectivitySignal::Disconnected);
    let view = App.view(&model);
    assert!(!view.composer.input_enabled);
    assert_eq!(view.composer.placeholder, "No Network Connection");

    for _ in 0..3 {
        type_and_send(&app, &mut model, "x");
    }
    assert_eq!(model.messages().len(), 1);

    push(&app, &mut request, state(true, Some(true)), &mut model);
    type_and_send(&app, &mut model, "x");
    assert_eq!(model.messages().len(), 2);
    assert_eq!(model.messages().newest().map(|m| m.text()), Some("x"));
}

#[test]
fn unreachable_internet_counts_as_disconnected() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    push(&app, &mut request, state(true, None), &mut model);
    assert_eq!(model.connectivity(), ConnectivitySignal::Disconnected);
}

#[test]
fn missing_capability_leaves_signal_unknown_and_input_enabled() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    push(
        &app,
        &mut request,
        ConnectivityOutput::Unavailable {
            reason: "not supported".into(),
        },
        &mut model,
    );

    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);
    type_and_send(&app, &mut model, "still works");
    assert_eq!(model.messages().len(), 1);
}

#[test]
fn updates_after_stop_are_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    push(&app, &mut request, state(true, Some(true)), &mut model);

    let update = app.update(Event::AppStopped, &mut model);
    let unsubscribe = subscription(update.effects).expect("unsubscribe");
    assert_eq!(unsubscribe.operation, ConnectivityOperation::Unsubscribe);

    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);

    push(&app, &mut request, state(false, Some(false)), &mut model);
    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);
}

#[test]
fn restart_after_offline_stop_resubscribes_and_sends() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    push(&app, &mut request, state(false, Some(false)), &mut model);
    app.update(Event::AppStopped, &mut model);

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe again after restart");
    assert_eq!(request.operation, ConnectivityOperation::Subscribe);
    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);

    push(&app, &mut request, state(true, Some(true)), &mut model);
    type_and_send(&app, &mut model, "hi");
    assert_eq!(model.messages().len(), 1);
    assert_eq!(model.messages().newest().map(|m| m.text()), Some("hi"));
}

#[test]
fn capability_loss_mid_session_unblocks_input() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    push(&app, &mut request, state(false, Some(false)), &mut model);
    push(
        &app,
        &mut request,
        ConnectivityOutput::Unavailable {
            reason: "module unloaded".into(),
        },
        &mut model,
    );

    assert_eq!(model.connectivity(), ConnectivitySignal::Unknown);
    type_and_send(&app, &mut model, "back");
    assert_eq!(model.messages().len(), 1);
}

#[test]
fn disconnect_drops_focus() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::AppStarted, &mut model);
    let mut request = subscription(update.effects).expect("subscribe");
    app.update(Event::InputFocusChanged { focused: true }, &mut model);
    push(&app, &mut request, state(false, Some(false)), &mut model);
    assert!(!model.composer().is_focused());
}
