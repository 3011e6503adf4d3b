//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod rules;

pub(crate) use render::RenderArgs;
pub(crate) use rules::RulesArgs;
