//! Profile module - the typed slots a conversation collects.

mod profile;
mod slot;
mod values;

pub use profile::{Profile, ProfileUpdate};
pub use slot::{RequiredSlots, SlotName};
pub use values::{normalize_digits, normalize_feature, Budget, FeaturesAnswer, LocationPref, ManagementPref, RoomType};
