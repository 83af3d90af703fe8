//! End-to-end call flows through the public `CallAssistant` API

use chrono::Utc;

use call_agent_agent::{
    CallAssistant, CallStatus, EscalationReason, CLARIFICATION_PROMPTS, CLOSING_PROMPT,
    CONNECTIVES,
};
use call_agent_core::{CallContext, Sender, SequentialStamper};

fn context(points: &[&str], consent: bool) -> CallContext {
    CallContext::new("Follow up on job application")
        .with_talking_points(points.iter().copied())
        .with_handoff_conditions(["Caller asks for Manohar"])
        .with_consent(consent)
}

fn assistant(points: &[&str], consent: bool) -> CallAssistant {
    CallAssistant::new(context(points, consent), Box::new(SequentialStamper::default()))
}

const POINTS: [&str; 4] = [
    "Confirm the interview slot",
    "Share the onboarding checklist",
    "Mention the parking instructions",
    "Note the dress code",
];

/// Delivered point index parsed back out of the assistant line
fn delivered_index(line: &str, points: &[&str]) -> Option<usize> {
    points
        .iter()
        .position(|p| line.ends_with(&format!("{}.", p)))
}

#[test]
fn test_unrelated_utterances_cover_whole_script() {
    for n in 0..=POINTS.len() {
        let points = &POINTS[..n];
        let mut a = assistant(points, true);
        a.start_call();

        for _ in 0..n {
            a.submit_caller_utterance("Okay, sure");
        }
        assert!(a.session().covered_points().iter().all(|c| *c));
        assert_eq!(a.session().next_point_index(), n);

        let before = a.session().clone();
        let turns = a.submit_caller_utterance("Alright");
        assert_eq!(turns.last().map(|t| t.content.as_str()), Some(CLOSING_PROMPT));
        assert_eq!(a.session().covered_points(), before.covered_points());
        assert_eq!(a.session().next_point_index(), before.next_point_index());
    }
}

#[test]
fn test_points_delivered_in_strictly_increasing_order() {
    let mut a = assistant(&POINTS, true);
    a.start_call();

    let inputs = [
        "Yes",
        "What is the salary?",
        "Great",
        "Why is the sky blue?",
        "Fine",
        "Sure thing",
    ];
    let mut delivered = Vec::new();
    for input in inputs {
        for turn in a.submit_caller_utterance(input) {
            if turn.sender == Sender::Assistant {
                if let Some(i) = delivered_index(&turn.content, &POINTS) {
                    delivered.push(i);
                }
            }
        }
    }

    assert_eq!(delivered, vec![0, 1, 2, 3]);
    assert!(delivered.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_connective_prefix_matches_index() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    for (i, point) in POINTS.iter().enumerate() {
        let turns = a.submit_caller_utterance("go on");
        assert_eq!(turns[1].content, format!("{}{}.", CONNECTIVES[i % CONNECTIVES.len()], point));
    }
}

#[test]
fn test_third_unrecognized_question_escalates() {
    let mut a = assistant(&POINTS, true);
    a.start_call();

    let first = a.submit_caller_utterance("What about the salary range?");
    assert_eq!(first[1].content, CLARIFICATION_PROMPTS[0]);

    let second = a.submit_caller_utterance("How much vacation do I get?");
    assert_eq!(second[1].content, CLARIFICATION_PROMPTS[1]);
    assert_eq!(a.session().clarifications_used(), 2);

    let third = a.submit_caller_utterance("Is there a signing bonus?");
    assert_eq!(third.len(), 3);
    assert_eq!(third[1].sender, Sender::SystemNote);
    assert!(third[1]
        .content
        .contains("Caller asked for information beyond prepared context."));
    assert_eq!(third[2].sender, Sender::Assistant);
    assert_eq!(
        a.session().handoff_reason(),
        Some(&EscalationReason::BeyondPreparedContext)
    );
    assert!(!a.is_active());
    assert_eq!(a.session().next_point_index(), 0);
}

#[test]
fn test_recognized_utterance_resumes_script_between_questions() {
    let mut a = assistant(&POINTS, true);
    a.start_call();

    a.submit_caller_utterance("What about the salary range?");
    let resumed = a.submit_caller_utterance("Got it, go ahead");
    assert!(resumed[1].content.ends_with("Confirm the interview slot."));
    assert_eq!(a.session().clarifications_used(), 1);
    assert!(a.is_active());
}

#[test]
fn test_explicit_request_short_circuits_everything() {
    let phrases = ["I need to speak with Manohar", "connect me with Manohar now"];

    for phrase in phrases {
        // Mid-script with the budget partially spent
        let mut a = assistant(&POINTS, true);
        a.start_call();
        a.submit_caller_utterance("sure");
        a.submit_caller_utterance("What about the salary?");
        let cursor = a.session().next_point_index();

        let turns = a.submit_caller_utterance(phrase);
        let notes = turns.iter().filter(|t| t.sender == Sender::SystemNote).count();
        let spoken = turns.iter().filter(|t| t.sender == Sender::Assistant).count();

        assert_eq!(turns.len(), 3, "{}", phrase);
        assert_eq!(notes, 1);
        assert_eq!(spoken, 1);
        assert!(turns[1].content.contains("Caller requested Manohar directly."));
        assert!(!a.is_active());
        assert_eq!(a.session().status(), CallStatus::Ended);
        assert_eq!(a.session().next_point_index(), cursor);
    }
}

#[test]
fn test_explicit_request_wins_with_budget_spent() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    a.submit_caller_utterance("What about the salary range?");
    a.submit_caller_utterance("How much vacation do I get?");
    assert_eq!(a.session().clarifications_used(), 2);

    let turns = a.submit_caller_utterance("Then let me speak with Manohar");

    assert_eq!(turns.len(), 3);
    assert_eq!(turns[1].sender, Sender::SystemNote);
    assert!(turns[1].content.contains("Caller requested Manohar directly."));
    assert_eq!(
        a.session().handoff_reason(),
        Some(&EscalationReason::CallerRequested {
            principal: "Manohar".to_string()
        })
    );
    assert_eq!(a.session().clarifications_used(), 2);
    assert!(!a.is_active());
}

#[test]
fn test_escalation_is_terminal() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    a.submit_caller_utterance("Can I talk to Manohar?");
    let len = a.log().len();

    assert!(a.submit_caller_utterance("hello?").is_empty());
    a.trigger_silence_escalation();
    a.close_call();
    assert_eq!(a.log().len(), len);
}

#[test]
fn test_summary_is_idempotent_and_pure() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    a.submit_caller_utterance("Sounds good");
    a.submit_caller_utterance("Tuesday works for me");
    a.close_call();

    let covered = a.session().covered_points().to_vec();
    let log_len = a.log().len();

    let first = a.generate_summary();
    let second = a.generate_summary();
    assert_eq!(first, second);
    assert_eq!(a.session().covered_points(), covered.as_slice());
    assert_eq!(a.log().len(), log_len);

    assert!(first.starts_with("Purpose: Follow up on job application."));
    assert!(first.contains("- Confirm the interview slot\n- Share the onboarding checklist"));
    assert!(first.contains("- Sounds good\n- Tuesday works for me"));
}

#[test]
fn test_summary_next_step_from_closing_prompt() {
    let mut a = assistant(&POINTS[..1], true);
    a.start_call();
    a.submit_caller_utterance("ok");
    a.submit_caller_utterance("anything else");
    a.close_call();

    let summary = a.generate_summary();
    assert!(summary.ends_with(&format!("Recommended next step:\n{}", CLOSING_PROMPT)));
}

#[test]
fn test_summary_before_end() {
    let mut a = assistant(&POINTS, true);
    assert_eq!(a.generate_summary(), "End the call first to generate a summary.");
    a.start_call();
    assert_eq!(a.generate_summary(), "End the call first to generate a summary.");
}

#[test]
fn test_consent_gate_never_leaks_turns() {
    let mut a = assistant(&POINTS, false);
    a.start_call();
    a.submit_caller_utterance("My account number is 12345");
    a.submit_caller_utterance("I live on Elm Street");
    a.close_call();

    let summary = a.generate_summary();
    for turn in a.log().turns() {
        assert!(!summary.contains(&turn.content));
    }
    assert!(summary.contains("withheld"));
}

#[test]
fn test_reset_is_total() {
    let mut a = assistant(&POINTS, true);
    let now = Utc::now();
    let baseline = a.snapshot_at(now);
    let baseline_session = a.session().clone();

    a.start_call();
    a.submit_caller_utterance("sure");
    a.submit_caller_utterance("What is the salary?");
    a.submit_caller_utterance("Put me through to Manohar");
    a.reset_session();

    assert_eq!(a.snapshot_at(now), baseline);
    assert_eq!(a.session(), &baseline_session);
    assert!(a.log().is_empty());
    assert_eq!(a.context(), &context(&POINTS, true));

    // Reset also works mid-call
    a.start_call();
    a.submit_caller_utterance("sure");
    a.reset_session();
    assert_eq!(a.session(), &baseline_session);
}

#[test]
fn test_new_call_replaces_previous() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    a.submit_caller_utterance("sure");
    a.submit_caller_utterance("What is the salary?");
    a.close_call();

    let intro = a.start_call().expect("new call after close");
    assert_eq!(a.log().len(), 1);
    assert_eq!(a.log().turns()[0], intro);
    assert_eq!(a.session().next_point_index(), 0);
    assert_eq!(a.session().clarifications_used(), 0);
    assert!(a.session().covered_points().iter().all(|c| !*c));
    assert!(a.session().handoff_reason().is_none());
}

#[test]
fn test_snapshot_serializes_for_renderers() {
    let mut a = assistant(&POINTS, true);
    a.start_call();
    a.submit_caller_utterance("sure");

    let json = serde_json::to_value(a.snapshot()).unwrap();
    assert_eq!(json["status"], "active");
    assert_eq!(json["next_point_index"], 1);
    assert_eq!(json["turns"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["turns"][1]["sender"], "caller");
}
