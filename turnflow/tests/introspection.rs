//! Read-only views of a running flow: phase, active path, node lookup.

use turnflow::test_support::{Log, players, record, record_and_advance};
use turnflow::{Engine, FlowPhase, NodeConfig};

#[test]
fn phase_tracks_queued_actions() {
    let mut engine: Engine<Log> = Engine::new(players(&["p1"]), Log::new());
    engine
        .define_flow(|f| {
            let one = f.action("one", record("one"));
            let two = f.action("two", record("two"));
            f.leaf(NodeConfig::new().id("setup").action(one).action(two));
            Ok(())
        })
        .expect("define");

    assert_eq!(engine.flow().expect("flow").phase(), FlowPhase::Idle);
    engine.start().expect("start");
    assert_eq!(engine.flow().expect("flow").phase(), FlowPhase::BetweenActions);
    engine.next().expect("next");
    assert_eq!(engine.flow().expect("flow").phase(), FlowPhase::Active);
}

#[test]
fn active_path_skips_pending_siblings() {
    let mut engine: Engine<Log> = Engine::new(players(&["p1"]), Log::new());
    engine
        .define_flow(|f| {
            let a1 = f.leaf(NodeConfig::new().id("A1"));
            let a2 = f.leaf(NodeConfig::new().id("A2"));
            f.node(NodeConfig::new().id("A"), vec![a1, a2]);
            f.leaf(NodeConfig::new().id("B"));
            Ok(())
        })
        .expect("define");

    let mut paths = Vec::new();
    engine.start().expect("start");
    paths.push(engine.flow().expect("flow").active_path());
    for _ in 0..3 {
        engine.next().expect("next");
        paths.push(engine.flow().expect("flow").active_path());
    }
    assert_eq!(paths, vec!["A", "A/A1", "A/A2", "B"]);
}

#[test]
fn nodes_are_found_by_handle_and_id() {
    let mut engine: Engine<Log> = Engine::new(players(&["p1", "p2"]), Log::new());
    let mut round = None;
    engine
        .define_flow(|f| {
            let turns = f.for_each_player(|p| NodeConfig::new().id(format!("turn-{}", p.id)));
            round = Some(f.node(NodeConfig::new().id("round"), turns));
            Ok(())
        })
        .expect("define");

    let flow = engine.flow().expect("flow");
    let round = flow.node(round.expect("handle")).expect("round");
    assert_eq!(round.id, "round");
    assert!(!round.is_leaf());

    let turn = flow.find("turn-p2").expect("turn");
    assert!(turn.is_leaf());
    assert_eq!(turn.player_id.as_deref(), Some("p2"));
    assert!(flow.find("turn-p3").is_none());
    assert_eq!(
        flow.render_tree(),
        "round\n  turn-p1 [player=p1]\n  turn-p2 [player=p2]"
    );
}

#[test]
fn identical_source_shares_one_registered_action() {
    let mut engine: Engine<Log> = Engine::new(players(&["p1"]), Log::new());
    engine
        .define_flow(|f| {
            let source = "push 'hop' then advance";
            let first = f.action_from_source(source, record_and_advance("hop"));
            let second = f.action_from_source(source, record_and_advance("hop"));
            assert_eq!(first, second);
            let close = f.cleanup_from_source("push 'close'", record("close"));
            let wait = f.action("wait", record("b"));
            f.leaf(NodeConfig::new().id("a").action(first).cleanup(close));
            f.leaf(NodeConfig::new().id("b").action(wait));
            Ok(())
        })
        .expect("define");

    let registry = engine.flow().expect("flow").registry();
    assert_eq!(registry.action_count(), 2);
    assert_eq!(registry.cleanup_count(), 1);

    engine.start().expect("start");
    assert_eq!(engine.current_node().expect("node").id, "b");
    assert_eq!(engine.players().len(), 1);
    assert_eq!(engine.into_state(), vec!["hop", "close", "b"]);
}
