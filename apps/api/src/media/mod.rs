//! Resume files as `data:<mimetype>;base64,<payload>` URIs.

pub mod data_uri;

pub use data_uri::{mime_from_filename, short_label, DataUri};
