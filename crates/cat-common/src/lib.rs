pub mod kinds;
pub mod message;

pub use driver::Driver;

mod driver;
