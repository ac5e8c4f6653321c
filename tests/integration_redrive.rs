mod common;

use common::{RedriveQueue, recording_consumer};
use sqs_fault_consumer::FailureKind;
use sqs_fault_consumer::domain::InvocationContext;

#[test]
fn test_message_is_dead_lettered_after_max_receives() {
    common::setup_tracing();
    let max_receive_count = 3;
    let mut queue = RedriveQueue::new(max_receive_count);
    queue.send("m1", "hello");
    let (consumer, sink) = recording_consumer();

    let mut invocations = 0;
    while let Some(payload) = queue.receive(10) {
        invocations += 1;
        let ctx = InvocationContext::new(format!("inv-{invocations}"));
        let failure = consumer.handle(&payload, &ctx).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::SimulatedFailure);
        queue.settle(Err(&failure));
    }

    assert_eq!(invocations, 3);
    assert_eq!(queue.dead_letters, ["m1"]);
    assert_eq!(queue.receive_count("m1"), max_receive_count);
    assert!(queue.is_drained());

    let counts: Vec<_> = sink.entries().iter().map(|e| e.receive_count).collect();
    assert_eq!(counts, [Some(1), Some(2), Some(3)], "receive count must rise on each redelivery");

    // Once dead-lettered, the message never reaches the handler again.
    assert!(queue.receive(10).is_none());
    assert_eq!(sink.entries().len(), 3);
}

#[test]
fn test_whole_batch_is_redelivered_together() {
    common::setup_tracing();
    let mut queue = RedriveQueue::new(2);
    for id in ["a", "b", "c"] {
        queue.send(id, id);
    }
    let (consumer, sink) = recording_consumer();

    let mut invocations = 0;
    while let Some(payload) = queue.receive(10) {
        invocations += 1;
        let failure = consumer.handle(&payload, &InvocationContext::new(format!("inv-{invocations}"))).unwrap_err();
        queue.settle(Err(&failure));
    }

    assert_eq!(invocations, 2);
    assert_eq!(sink.message_ids(), ["a", "b", "c", "a", "b", "c"]);
    assert_eq!(queue.dead_letters, ["a", "b", "c"]);
}
