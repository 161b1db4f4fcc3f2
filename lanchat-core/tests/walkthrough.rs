//! Full-script walkthrough of the built-in conversation.
//!
//! Drives the session from the greeting to the final node and back via
//! the "Start over" reply, checking the transcript shape along the way.

use lanchat_core::testing::{assert_last_message, assert_message_count, ChatHarness};
use lanchat_core::{Script, Sender};

#[test]
fn builtin_script_validates() {
    Script::builtin()
        .validate(Script::START_ID)
        .expect("builtin script is hand-verified and must validate");
}

#[test]
fn full_walkthrough_reaches_the_finale_and_loops() {
    let mut harness = ChatHarness::new();
    assert_message_count(&harness, 1);

    // 32 transitions take node 0 to node 64; each adds a user echo and
    // a narrator answer.
    let mut transitions = 0;
    while harness.reply_texts() != ["Start over"] {
        harness.choose_and_deliver(0);
        transitions += 1;
        assert!(transitions <= Script::builtin().len(), "walk did not terminate");
    }

    assert_eq!(transitions, 32);
    assert_message_count(&harness, 1 + 2 * 32);
    assert_last_message(&harness, Sender::Narrator, "thinking like a real network engineer");

    // The loop closes: starting over reproduces the opening exactly.
    let opening = Script::builtin().get(0).expect("start node");
    harness.choose_and_deliver(0);

    let last = harness.last_message().expect("looped greeting");
    assert_eq!(last.sender, Sender::Narrator);
    assert_eq!(last.text, opening.body);
    assert_eq!(harness.session.replies(), opening.replies);
}

#[test]
fn transcript_alternates_user_and_narrator() {
    let mut harness = ChatHarness::new();
    for _ in 0..5 {
        harness.choose_and_deliver(0);
    }

    for (i, message) in harness.session.messages().iter().enumerate() {
        let expected = if i % 2 == 0 { Sender::Narrator } else { Sender::User };
        assert_eq!(message.sender, expected, "message {i} has the wrong sender");
    }
}

#[test]
fn images_appear_on_the_expected_nodes() {
    let script = Script::builtin();
    let with_images: Vec<u32> = script
        .nodes()
        .iter()
        .filter(|n| n.image.is_some())
        .map(|n| n.id)
        .collect();

    assert_eq!(with_images, vec![2, 6, 8, 12, 16, 38, 40, 44, 62]);
}
