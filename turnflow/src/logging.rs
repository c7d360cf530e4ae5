//! Tracing setup for hosts of the engine.
//!
//! Events emitted by the library, all under the `turnflow` target:
//!
//! | Level   | Message                         | Fields                       |
//! |---------|---------------------------------|------------------------------|
//! | `debug` | `declared node` / `built flow`  | `node`, `children` / `nodes`, `roots` |
//! | `debug` | `starting traversal`            | `cycle`, `roots`             |
//! | `debug` | `entered node` / `exited node`  | `node`, `player`, `actions`  |
//! | `debug` | `running action`                | `node`, `action`             |
//! | `debug` | `resuming interrupted exit`     | `node`                       |
//! | `debug` | `auto-advancing`                | `auto_steps`                 |
//! | `info`  | `game over`                     |                              |
//! | `warn`  | `next called after game over, ignoring` |                      |

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber printing compact lines to stderr.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`, which keeps
/// game output on stdout free of traversal noise. Call once per process.
///
/// ```bash
/// RUST_LOG=turnflow::core::flow=debug tictactoe play
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
