mod ids;
mod interaction;
mod record;

pub use ids::RecordId;
pub use interaction::{InteractionLogEntry, PASS_THRESHOLD, Verdict};
pub use record::Record;
