pub mod alert_dialog;
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod evidence_tile;
pub mod file_slot;
pub mod form_select;
pub mod input;
pub mod pagination;
pub mod step_indicator;
pub mod toast;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use data_table::*;
pub use evidence_tile::*;
pub use file_slot::*;
pub use form_select::*;
pub use input::*;
pub use pagination::*;
pub use step_indicator::*;
pub use toast::*;
