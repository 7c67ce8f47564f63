//! Render option layering for the CLI.
//!
//! Merges settings from CLI flags, `SWADDLE_*` environment variables and the
//! config file.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod loading;
mod tests;

pub use conversions::render_overrides;
pub use loading::{ENV_PREFIX, env_key, layer_render_options};
