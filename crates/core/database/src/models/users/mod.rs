mod model;
mod ops;
#[cfg(feature = "rocket-impl")]
mod rocket;
#[cfg(feature = "rocket-impl")]
mod schema;

pub use model::*;
pub use ops::*;

#[cfg(feature = "rocket-impl")]
pub use self::rocket::*;
