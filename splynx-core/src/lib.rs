//! splynx-core: record model and the pure report pipeline stages
//! (resolve, sanitize, classify, group, render).

pub mod classify;
pub mod group;
pub mod render;
pub mod resolve;
pub mod sanitize;
pub mod source;
pub mod task;
pub mod time;

pub use classify::{comments_by_task, comments_on, is_reportable, is_scheduled_on, scheduled_on, Bucket};
pub use group::{group_summary, DigestGroup, SummaryGroup};
pub use render::{render_digest, render_summary};
pub use resolve::{NameLookup, TechnicianTable, NO_TECHNICIAN, UNASSIGNED};
pub use sanitize::{sanitize, TECHNICIAN_MAX_LEN, TITLE_MAX_LEN};
pub use source::{FetchError, Location, Project, TicketSource};
pub use task::{Comment, Named, Task};
