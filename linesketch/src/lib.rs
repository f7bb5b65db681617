//! interactive editor for sketching transit route modifications: new trip
//! patterns and reroutes drawn as segment sequences over a map. the
//! `editor` module holds the interaction state machine; `app` wraps it in
//! a command line tool operating on modification JSON files.

pub mod app;
pub mod editor;
