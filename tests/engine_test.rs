//! End-to-end engine tests: key events in over a channel, recorded
//! keystrokes out.

use chat_macro::dispatch::{RecordingSink, SinkEvent};
use chat_macro::{
    parse_key, Controls, EngineState, Error, ExitCombination, KeyEvent, OutputKey, PasteDispatcher,
    PhrasePool, TriggerEngine, SETTLE_DELAY,
};
use std::collections::HashSet;
use std::sync::mpsc;

fn key(name: &str) -> chat_macro::Key {
    parse_key(name).unwrap()
}

fn tap(tx: &mpsc::Sender<KeyEvent>, name: &str) {
    tx.send(KeyEvent::Pressed(key(name))).unwrap();
    tx.send(KeyEvent::Released(key(name))).unwrap();
}

fn pasted_texts(events: &[SinkEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            SinkEvent::Text(text) => Some(text.trim_end_matches('\n').to_string()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_session_pastes_each_phrase_once_per_cycle() {
    let pool = PhrasePool::new(["gg", "wp", "glhf"]).unwrap();
    let controls = Controls::new(key("f3"), pool, false);
    let mut engine = TriggerEngine::new(
        ExitCombination::default(),
        controls,
        PasteDispatcher::new(RecordingSink::new()),
    );

    let (tx, rx) = mpsc::channel();
    for _ in 0..4 {
        tap(&tx, "f3");
    }
    tap(&tx, "a");
    tx.send(KeyEvent::Pressed(key("alt_l"))).unwrap();
    tx.send(KeyEvent::Pressed(key("right"))).unwrap();
    tap(&tx, "f3");

    engine.run(rx).unwrap();
    assert_eq!(engine.state(), EngineState::Terminating);

    let texts = pasted_texts(&engine.dispatcher().sink().events);
    assert_eq!(texts.len(), 4);

    let first_cycle: HashSet<&str> = texts[..3].iter().map(String::as_str).collect();
    let expected: HashSet<&str> = ["gg", "wp", "glhf"].into_iter().collect();
    assert_eq!(first_cycle, expected);
    assert!(expected.contains(texts[3].as_str()));
}

#[test]
fn test_panel_reconfiguration_while_running() {
    let controls = Controls::default();
    let panel = controls.clone();
    let mut engine = TriggerEngine::new(
        ExitCombination::parse("ctrl+q").unwrap(),
        controls,
        PasteDispatcher::new(RecordingSink::new()),
    );

    let (tx, rx) = mpsc::channel();
    let worker = std::thread::spawn(move || {
        let result = engine.run(rx);
        result.map(|()| engine)
    });

    panel.configure_pastes("hello").unwrap();
    assert_eq!(panel.configure_trigger("f9").unwrap(), "f9");
    assert_eq!(
        panel.configure_trigger("not_a_real_key"),
        Err(Error::InvalidKeyName("not_a_real_key".to_string()))
    );
    panel.set_broadcast(true);

    tap(&tx, "f3");
    tap(&tx, "f9");
    tx.send(KeyEvent::Pressed(key("ctrl"))).unwrap();
    tx.send(KeyEvent::Pressed(key("q"))).unwrap();

    let engine = worker.join().unwrap().unwrap();
    assert_eq!(
        engine.dispatcher().sink().events,
        vec![
            SinkEvent::Down(OutputKey::Shift),
            SinkEvent::Down(OutputKey::Return),
            SinkEvent::Up(OutputKey::Shift),
            SinkEvent::Settle(SETTLE_DELAY),
            SinkEvent::Text("hello\n".to_string()),
        ]
    );
}

#[test]
fn test_exit_needs_whole_combination_held_at_once() {
    let mut engine = TriggerEngine::new(
        ExitCombination::default(),
        Controls::default(),
        PasteDispatcher::new(RecordingSink::new()),
    );

    let (tx, rx) = mpsc::channel();
    tap(&tx, "alt_l");
    tap(&tx, "right");
    drop(tx);

    // never exits; the listener going away ends the run instead
    assert!(matches!(engine.run(rx), Err(Error::Listener(_))));
    assert_eq!(engine.state(), EngineState::Running);
    assert!(engine.tracker().held().is_empty());
}
