//! Message processor tests: chunk assembly, fallback, and the outer safety net

mod common;

use std::sync::Arc;

use serde_json::json;

use chat_relay_gateway::backend::EMPTY_RESPONSE_APOLOGY;
use chat_relay_gateway::processor::{self, NO_MODEL_REPLY};
use chat_relay_gateway::session::{BackendMode, Session};

use common::{
    credential, ok_direct, AgentScript, ScriptedAgent, ScriptedDirect, ScriptedProvider,
};

fn agent_session(script: AgentScript, provider: ScriptedProvider) -> Session {
    Session::from_parts(
        BackendMode::PrimaryAgent,
        Some(Arc::new(ScriptedAgent(script))),
        None,
        Arc::new(provider),
        credential(),
    )
}

fn direct_session(reply: std::result::Result<String, String>) -> Session {
    Session::from_parts(
        BackendMode::SecondaryDirect,
        None,
        Some(Arc::new(ScriptedDirect(reply))),
        Arc::new(ScriptedProvider::unavailable()),
        credential(),
    )
}

#[tokio::test]
async fn test_content_chunks_concatenate_in_arrival_order() {
    let session = agent_session(
        AgentScript::Chunks(vec![
            json!({ "content": "Hel" }),
            json!({ "content": "lo" }),
            json!({ "content": "  " }),
        ]),
        ScriptedProvider::unavailable(),
    );
    assert_eq!(processor::process(&session, "hi").await, "Hello");
}

#[tokio::test]
async fn test_heterogeneous_chunk_fields_follow_precedence() {
    let session = agent_session(
        AgentScript::Chunks(vec![
            json!({ "content": "a" }),
            json!({ "text": "b" }),
            json!({ "output": "c" }),
            json!("d"),
        ]),
        ScriptedProvider::unavailable(),
    );
    assert_eq!(processor::process(&session, "hi").await, "abcd");
}

#[tokio::test]
async fn test_all_whitespace_chunks_yield_apology() {
    let session = agent_session(
        AgentScript::Chunks(vec![
            json!({ "content": "   " }),
            json!({ "text": "\n\t" }),
            json!(""),
        ]),
        ScriptedProvider::unavailable(),
    );
    assert_eq!(
        processor::process(&session, "hi").await,
        EMPTY_RESPONSE_APOLOGY
    );
}

#[tokio::test]
async fn test_empty_stream_yields_apology() {
    let session = agent_session(AgentScript::Chunks(vec![]), ScriptedProvider::unavailable());
    assert_eq!(
        processor::process(&session, "hi").await,
        EMPTY_RESPONSE_APOLOGY
    );
}

#[tokio::test]
async fn test_reprocessing_same_chunks_is_deterministic() {
    let session = agent_session(
        AgentScript::Chunks(vec![json!({ "content": " one " }), json!({ "content": "two" })]),
        ScriptedProvider::unavailable(),
    );
    let first = processor::process(&session, "hi").await;
    let second = processor::process(&session, "hi").await;
    assert_eq!(first, second);
    assert_eq!(first, "one two");
}

#[tokio::test]
async fn test_direct_mode_returns_text_verbatim() {
    let session = direct_session(Ok("  plain reply  ".to_string()));
    assert_eq!(processor::process(&session, "hello").await, "  plain reply  ");
}

#[tokio::test]
async fn test_direct_mode_failure_hits_outer_net() {
    let session = direct_session(Err("quota exceeded".to_string()));
    let reply = processor::process(&session, "hello").await;
    assert!(reply.starts_with("Error processing your message:"));
    assert!(reply.contains("quota exceeded"));
}

#[test]
fn test_unavailable_mode_returns_fixed_reply() {
    let session = Session::from_parts(
        BackendMode::Unavailable,
        None,
        None,
        Arc::new(ScriptedProvider::unavailable()),
        credential(),
    );
    let reply = tokio_test::block_on(processor::process(&session, "hi"));
    assert_eq!(reply, NO_MODEL_REPLY);
}

#[tokio::test]
async fn test_agent_failure_without_direct_names_primary_only() {
    let session = agent_session(
        AgentScript::FailAtRequest("stream refused".to_string()),
        ScriptedProvider::unavailable(),
    );
    let reply = processor::process(&session, "hi").await;
    assert!(reply.contains("stream refused"));
    assert!(reply.contains("no direct backend is available"));
    assert!(!reply.contains("Direct:"));
}

#[tokio::test]
async fn test_agent_failure_falls_back_to_on_demand_direct() {
    let session = agent_session(
        AgentScript::FailAtRequest("stream refused".to_string()),
        ScriptedProvider {
            agent: None,
            direct: ok_direct("fallback reply"),
        },
    );
    assert_eq!(processor::process(&session, "hi").await, "fallback reply");
}

#[tokio::test]
async fn test_mid_stream_failure_falls_back_to_direct() {
    let session = agent_session(
        AgentScript::FailMidStream {
            chunks: vec![json!({ "content": "partial" })],
            error: "connection reset".to_string(),
        },
        ScriptedProvider {
            agent: None,
            direct: ok_direct("recovered"),
        },
    );
    assert_eq!(processor::process(&session, "hi").await, "recovered");
}

#[tokio::test]
async fn test_both_backends_failing_names_both() {
    let session = agent_session(
        AgentScript::FailAtRequest("agent down".to_string()),
        ScriptedProvider {
            agent: None,
            direct: Some(Ok(Arc::new(ScriptedDirect(Err(
                "direct down".to_string()
            ))))),
        },
    );
    let reply = processor::process(&session, "hi").await;
    assert!(reply.contains("agent down"));
    assert!(reply.contains("direct down"));
    assert!(reply.contains("Both backends failed"));
}

#[tokio::test]
async fn test_direct_construction_failure_counts_as_secondary_failure() {
    let session = agent_session(
        AgentScript::FailAtRequest("agent down".to_string()),
        ScriptedProvider {
            agent: None,
            direct: Some(Err("direct would not build".to_string())),
        },
    );
    let reply = processor::process(&session, "hi").await;
    assert!(reply.contains("agent down"));
    assert!(reply.contains("direct would not build"));
}
