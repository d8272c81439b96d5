pub mod bill;
pub mod category;
pub mod common;
pub mod depositor;
pub mod profile;

pub use bill::{
    derive_status, Bill, BillDirection, BillDraft, BillStatus, DisplayStatus,
    AGGREGATE_DUE_SOON_DAYS, BADGE_DUE_SOON_DAYS,
};
pub use category::Category;
pub use common::{Displayable, Identifiable, NamedEntity};
pub use depositor::Depositor;
pub use profile::UserProfile;
