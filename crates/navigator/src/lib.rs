//! Cross-tool navigation: translating typed intents to router paths and
//! `navigate:` command strings, parsing those commands back out of
//! assistant output, suggesting follow-up tools from recorded context,
//! and carrying transient map view state across a page navigation.

mod directives;
mod parse;
mod suggest;
mod urls;
mod view_handoff;

pub use directives::{parse_action_directive, ActionDirective};
pub use parse::parse_navigate_command;
pub use suggest::{continue_in_suggestions, CrossToolContext, Suggestion};
pub use urls::{build_navigate_command, build_url};
pub use view_handoff::{restore_map_view, stash_map_view};
