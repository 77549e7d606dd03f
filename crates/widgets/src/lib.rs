//! Tool result interpretation and widget dispatch.
//!
//! Given the name of a tool and the raw JSON text it returned, this crate
//! decides which chat widget should render the result and projects the
//! payload into a stable shape for that widget. Everything here is pure: no
//! I/O, no shared mutable state, and failures degrade to "render as text".

mod classify;
mod presenter;
mod registry;

pub use classify::{ClassifiedResult, classify, classify_value, is_truthy};
pub use presenter::{Presentation, Presenter};
pub use registry::WidgetRegistry;
pub use relo_types::WidgetKey;
