mod scripted_forwarder;

pub use scripted_forwarder::{test_app, ScriptedForwarder, TestApp};
