// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive session.
//
// Module responsibilities:
// - `api`: blocking HTTP calls against the wallet service (login,
//   logout, keystore replacement, wallet/address/balance queries,
//   send) and the response envelope handling.
// - `error`: the error taxonomy shared by `api` and the UI flows.
// - `ui`: terminal prompts and the command loop, behind a console
//   abstraction so the flow can be tested with scripted input instead
//   of a real terminal.
pub mod api;
pub mod error;
pub mod ui;
