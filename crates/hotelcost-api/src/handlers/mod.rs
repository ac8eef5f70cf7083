mod diagnostics;
mod estimate;
mod health;
mod reference;

pub use diagnostics::get_diagnostics;
pub use estimate::handle_estimate;
pub use health::health_check;
pub use reference::{get_assemblies, list_brands, list_locations};
