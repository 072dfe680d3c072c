use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use observable::{
    BusConfig, EventBus, EventConfig, EventError, EventName, EventSource, Handler, ListenerOptions, RelayOptions,
    TriggerMode, Value,
};
use parking_lot::Mutex;
use serde_json::json;

fn recorder(log: &Arc<Mutex<Vec<Vec<Value>>>>) -> Handler {
    let log = Arc::clone(log);
    Handler::new(move |args: &[Value]| log.lock().push(args.to_vec()))
}

#[test]
fn relay_forwards_arguments_until_unrelayed() {
    let a = EventBus::new();
    let b = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    b.on("e", recorder(&seen)).unwrap();

    let relay = RelayOptions::new(Arc::new(a.clone()), "e");
    b.relay(&relay).unwrap();
    a.trigger("e", vec![json!(1), json!(2)]).unwrap();
    assert_eq!(*seen.lock(), vec![vec![json!(1), json!(2)]]);

    assert!(b.unrelay(&relay));
    a.trigger("e", vec![json!(1), json!(2)]).unwrap();
    assert_eq!(seen.lock().len(), 1);
}

#[test]
fn relay_twice_subscribes_once() {
    let a = EventBus::new();
    let b = EventBus::new();
    let count = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&count);
    b.on(
        "e",
        Handler::new(move |_: &[Value]| {
            sink.fetch_add(1, Ordering::SeqCst);
        }),
    )
    .unwrap();

    let relay = RelayOptions::new(Arc::new(a.clone()), "e");
    b.relay(&relay).unwrap();
    b.relay(&relay).unwrap();
    a.trigger("e", vec![]).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn relay_aliases_local_name() {
    let a = EventBus::new();
    let b = EventBus::new();
    let prefixed = Arc::new(Mutex::new(Vec::new()));
    let aliased = Arc::new(Mutex::new(Vec::new()));
    b.on("remote.e", recorder(&prefixed)).unwrap();
    b.on("alias", recorder(&aliased)).unwrap();

    b.relay(&RelayOptions::new(Arc::new(a.clone()), "e").with_prefix("remote."))
        .unwrap();
    b.relay(&RelayOptions::new(Arc::new(a.clone()), "f").with_local_name("alias"))
        .unwrap();
    a.trigger("e", vec![json!("x")]).unwrap();
    a.trigger("f", vec![json!("y")]).unwrap();

    assert_eq!(*prefixed.lock(), vec![vec![json!("x")]]);
    assert_eq!(*aliased.lock(), vec![vec![json!("y")]]);
}

#[test]
fn relay_result_flows_back_to_source() {
    let a = EventBus::new();
    let b = EventBus::new();
    b.on("price", Handler::new(|args: &[Value]| json!(args[0].as_i64().unwrap_or(0) + 1)))
        .unwrap();
    b.on("price", Handler::new(|args: &[Value]| json!(args[0].as_i64().unwrap_or(0) * 2)))
        .unwrap();
    b.relay(&RelayOptions::new(Arc::new(a.clone()), "price").with_mode(TriggerMode::Pipe))
        .unwrap();

    let results = a.all("price", vec![json!(3)]).unwrap();
    assert_eq!(results.into_ready(), Some(json!([8])));
}

#[test]
fn wildcard_relay_forwards_every_event() {
    let a = EventBus::new();
    let b = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    b.on("a.one", recorder(&seen)).unwrap();
    b.on("a.two", recorder(&seen)).unwrap();

    let relay = RelayOptions::new(Arc::new(a.clone()), "*").with_prefix("a.");
    b.relay(&relay).unwrap();
    a.trigger("one", vec![json!(1)]).unwrap();
    a.trigger("two", vec![json!(2)]).unwrap();
    assert_eq!(*seen.lock(), vec![vec![json!(1)], vec![json!(2)]]);

    assert!(b.unrelay(&relay));
    a.trigger("one", vec![json!(1)]).unwrap();
    assert_eq!(seen.lock().len(), 2);
}

#[test]
fn unrelay_without_relay_is_false() {
    let a = EventBus::new();
    let b = EventBus::new();
    assert!(!b.unrelay(&RelayOptions::new(Arc::new(a), "e")));
}

#[test]
fn interceptor_blocks_named_and_wildcard_delivery() {
    let bus = EventBus::new();
    let named = Arc::new(Mutex::new(Vec::new()));
    let wildcard = Arc::new(Mutex::new(Vec::new()));
    bus.on("e", recorder(&named)).unwrap();
    bus.add_all_events_listener(recorder(&wildcard), ListenerOptions::default())
        .unwrap();

    bus.intercept(|_, args, _, _| args.first() != Some(&json!("blocked")));
    bus.trigger("e", vec![json!("blocked")]).unwrap();
    bus.trigger("e", vec![json!("open")]).unwrap();

    assert_eq!(*named.lock(), vec![vec![json!("open")]]);
    assert_eq!(wildcard.lock().len(), 1);
}

#[test]
fn tag_scope_limits_bus_dispatch() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let tagged = Arc::clone(&seen);
    let untagged = Arc::clone(&seen);
    bus.add_listener(
        "e",
        Handler::new(move |_: &[Value]| tagged.lock().push("a")),
        ListenerOptions::default().with_tags(["a", "x"]),
    )
    .unwrap();
    bus.add_listener(
        "e",
        Handler::new(move |_: &[Value]| untagged.lock().push("b")),
        ListenerOptions::default().with_tags(["b"]),
    )
    .unwrap();

    bus.with_tags(["a"], || bus.trigger("e", vec![])).unwrap();
    assert_eq!(*seen.lock(), vec!["a"]);
}

#[test]
fn max_listeners_error_names_the_limit() {
    let name = EventName::new("e").unwrap();
    let bus = EventBus::with_config(
        BusConfig::default().with_event(name.clone(), EventConfig::default().with_max_listeners(2)),
    );
    bus.on(&name, Handler::new(|_: &[Value]| ())).unwrap();
    bus.on(&name, Handler::new(|_: &[Value]| ())).unwrap();

    let err = bus.on(&name, Handler::new(|_: &[Value]| ())).unwrap_err();
    assert!(matches!(err, EventError::TooManyListeners { limit: 2 }));
    assert!(err.to_string().contains("(2)"));
}

#[test]
fn source_declining_a_name_is_not_subscribed() {
    struct OnlyAudit {
        calls: AtomicUsize,
    }

    impl EventSource for OnlyAudit {
        fn on(&self, _: &EventName, _: Handler) -> Result<(), EventError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn un(&self, _: &EventName, _: &Handler) -> bool {
            true
        }

        fn accepts(&self, name: &EventName) -> bool {
            name.as_str() == "audit"
        }
    }

    let bus = EventBus::new();
    let source = Arc::new(OnlyAudit {
        calls: AtomicUsize::new(0),
    });
    bus.add_event_source(source.clone()).unwrap();
    bus.on("audit", Handler::new(|_: &[Value]| ())).unwrap();
    bus.on("other", Handler::new(|_: &[Value]| ())).unwrap();
    bus.on("other", Handler::new(|_: &[Value]| ())).unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn resolved_relay_hands_back_a_future() {
    let a = EventBus::new();
    let b = EventBus::new();
    b.on(
        "load",
        Handler::from_future(|args: Vec<Value>| async move { Ok(json!({ "id": args[0].clone() })) }),
    )
    .unwrap();
    b.relay(
        &RelayOptions::new(Arc::new(a.clone()), "load")
            .with_mode(TriggerMode::Merge)
            .resolved(),
    )
    .unwrap();

    let merged = a.resolve_all("load", vec![json!(7)]).await.unwrap();
    assert_eq!(merged, json!([{ "id": 7 }]));
}

#[tokio::test]
async fn promise_on_bus_event() {
    let bus = EventBus::new();
    let ready = bus.promise("ready", ListenerOptions::default()).unwrap();
    bus.trigger("ready", vec![json!(true)]).unwrap();
    assert_eq!(ready.await.unwrap(), vec![json!(true)]);
}
