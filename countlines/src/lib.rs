//! # countlines
//!
//! Command-line front end and web server for [`countlineslib`].
//!
//! ```bash
//! # Count a directory
//! countlines ./src
//!
//! # Skip generated code, emit JSON
//! countlines . -e generated --exclude=vendor -o json
//!
//! # Serve the web UI on port 8080, or on a given port
//! countlines --web
//! countlines --web 3000 --web-root ./web
//! ```

pub mod cli;
pub mod render;
pub mod server;
