//! End-to-end pipeline tests over scripted input
//!
//! Each scenario feeds raw wire lines through the full
//! validate/decode/classify/dispatch path with a recording sink, checking
//! which handlers ran and what reached the sink.

mod common;

use common::builders::{data_line, frame_line, info_line, manifest_line};
use common::mock_helpers::{RecordingSink, ScriptedSource};
use helm_reporter::dispatch::{Dispatcher, Handler, HandlerRegistry};
use helm_reporter::message::{DecodedMessage, MessageType};
use helm_reporter::pipeline::{Pipeline, PipelineStats};
use helm_reporter::{ReporterError, Result};
use serde_json::json;

fn run_lines(lines: Vec<String>) -> (PipelineStats, RecordingSink) {
    let sink = RecordingSink::new();
    let registry = HandlerRegistry::with_defaults(Box::new(sink.clone()));
    let pipeline = Pipeline::new(ScriptedSource::new(lines), Dispatcher::new(registry));
    (pipeline.run().expect("pipeline run failed"), sink)
}

#[test]
fn info_line_is_logged_and_nothing_posted() {
    let (stats, sink) = run_lines(vec!["!{\"INFO\": \"boot ok\"}\n".to_string()]);
    assert_eq!(stats.dispatched, 1);
    assert!(sink.posted().is_empty());
}

#[test]
fn missing_start_marker_never_reaches_a_handler() {
    let (stats, sink) = run_lines(vec!["{\"DATA\": {}}\n".to_string()]);
    assert_eq!(stats.frame_errors, 1);
    assert_eq!(stats.dispatched, 0);
    assert!(sink.posted().is_empty());
}

#[test]
fn missing_terminator_never_reaches_a_handler() {
    let (stats, _) = run_lines(vec![data_line("temp", 21, "C", 500.0).trim_end().to_string()]);
    assert_eq!(stats.frame_errors, 1);
    assert_eq!(stats.dispatched, 0);
}

#[test]
fn invalid_json_never_reaches_a_handler() {
    let (stats, sink) = run_lines(vec!["!not-json\n".to_string()]);
    assert_eq!(stats.decode_errors, 1);
    assert_eq!(stats.dispatched, 0);
    assert!(sink.posted().is_empty());
}

#[test]
fn two_type_keys_fail_classification() {
    let (stats, sink) = run_lines(vec![
        "!{\"DATA\": {}, \"SENSORS_MANIFEST\": []}\n".to_string(),
    ]);
    assert_eq!(stats.classify_errors, 1);
    assert_eq!(stats.dispatched, 0);
    assert!(sink.posted().is_empty());
}

#[test]
fn unrecognized_type_is_rejected_and_pipeline_continues() {
    let (stats, _) = run_lines(vec![
        "!{\"FOO\": 1}\n".to_string(),
        info_line("next message still processed"),
    ]);
    assert_eq!(stats.unhandled, 1);
    assert_eq!(stats.dispatched, 1);
}

#[test]
fn data_round_trip_invokes_exactly_the_data_handler() {
    let body = json!({"type": "temp", "value": 21, "unit": "C", "period": 500});
    let line = frame_line(&json!({"DATA": body, "TIME": 1234}));

    let (stats, sink) = run_lines(vec![line]);
    assert_eq!(stats.dispatched, 1);

    let posted = sink.posted();
    assert_eq!(posted.len(), 1);
    // The sink sees the original message: body unchanged, TIME preserved
    assert_eq!(posted[0].get("DATA"), Some(&body));
    assert_eq!(posted[0].get("TIME"), Some(&json!(1234)));
}

#[test]
fn sink_failure_does_not_stop_the_pipeline() {
    let sink = RecordingSink::new().failing();
    let registry = HandlerRegistry::with_defaults(Box::new(sink));
    let stats = Pipeline::new(
        ScriptedSource::new(vec![
            data_line("temp", 21, "C", 500.0),
            info_line("after the failed post"),
        ]),
        Dispatcher::new(registry),
    )
    .run()
    .unwrap();
    // The DATA handler logs the sink failure but does not raise
    assert_eq!(stats.dispatched, 2);
    assert_eq!(stats.handler_errors, 0);
}

#[test]
fn non_success_status_is_not_a_handler_failure() {
    let sink = RecordingSink::new().with_status(503);
    let registry = HandlerRegistry::with_defaults(Box::new(sink.clone()));
    let stats = Pipeline::new(
        ScriptedSource::new(vec![data_line("ph", 6.8, "pH", 1000.0)]),
        Dispatcher::new(registry),
    )
    .run()
    .unwrap();
    assert_eq!(stats.dispatched, 1);
    assert_eq!(sink.posted().len(), 1);
}

#[test]
fn handler_failure_does_not_prevent_subsequent_messages() {
    /// Handler that always fails
    struct PanickySensor;

    impl Handler for PanickySensor {
        fn handle(&self, _msg: &DecodedMessage) -> Result<()> {
            Err(ReporterError::Sink("handler blew up".to_string()))
        }
    }

    let sink = RecordingSink::new();
    let registry = HandlerRegistry::with_defaults(Box::new(sink.clone()))
        .with(MessageType::Info, PanickySensor);
    let stats = Pipeline::new(
        ScriptedSource::new(vec![
            info_line("this one fails"),
            data_line("temp", 21, "C", 500.0),
        ]),
        Dispatcher::new(registry),
    )
    .run()
    .unwrap();

    assert_eq!(stats.handler_errors, 1);
    assert_eq!(stats.dispatched, 1);
    assert_eq!(sink.posted().len(), 1);
}

#[test]
fn manifest_is_enumerated_without_posting() {
    let (stats, sink) = run_lines(vec![manifest_line(&[
        ("flow", "http://example.com/fs300a", "D2"),
        ("salinity", "http://example.com/ec-k1", "A0"),
    ])]);
    assert_eq!(stats.dispatched, 1);
    assert!(sink.posted().is_empty());
}

#[test]
fn mixed_stream_is_fully_accounted_for() {
    let (stats, sink) = run_lines(vec![
        info_line("boot ok"),
        manifest_line(&[("temp", "http://example.com/ds18b20", "D4")]),
        data_line("temp", 21, "C", 500.0),
        "garbage\n".to_string(),
        "!{\"TIME\": 99}\n".to_string(), // TIME alone is not a type
        data_line("temp", 22, "C", 500.0),
    ]);
    assert_eq!(stats.lines_read, 6);
    assert_eq!(stats.dispatched, 4);
    assert_eq!(stats.frame_errors, 1);
    assert_eq!(stats.classify_errors, 1);
    assert_eq!(sink.posted().len(), 2);
}
