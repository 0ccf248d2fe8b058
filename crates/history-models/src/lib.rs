pub mod calendar;
pub mod display;
pub mod node;
pub mod preference;
pub mod record;
pub mod state;

pub use calendar::{Calendar, DayBoundary};
pub use display::{DateFormat, DisplayOptions};
pub use node::{ContentType, DisplayKey, DisplayNode, KeyedNode};
pub use preference::{PreferenceGroup, PreferenceItem, PreferenceKey};
pub use record::HistoryRecord;
pub use state::{Dialog, LoadPhase};
