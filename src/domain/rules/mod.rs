pub mod address;
pub mod cell;
pub mod crew;
pub mod datetime;
pub mod flight;
pub mod text;
pub mod vehicle;

pub use address::HotelDirectory;
pub use crew::{CrewClassifier, CrewRule, Customer};
pub use flight::FlightFormat;
pub use vehicle::VehicleClass;
