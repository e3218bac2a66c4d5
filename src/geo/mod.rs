//! Geographic inputs: where daily solar events and clock rules come from.
//!
//! ## Module Structure
//!
//! - [`source`]: The [`EventSource`] interface and conversion of raw UTC
//!   instants into an [`EventTable`](crate::table::EventTable)
//! - [`solar`]: Offline source computing events from coordinates, with
//!   explicit handling of polar day and polar night
//! - [`timezone`]: IANA timezone lookup for coordinates
//!
//! ## Key Features
//!
//! - **Sentinel conversion**: instants far from their date, or missing
//!   altogether, become `NeverOccurs` at this boundary and nowhere else
//! - **Polar handling**: a day without a sunset because the sun never sets is
//!   distinguished from a day without one because it never rises
//! - **Timezone detection**: coordinates are enough to pick a clock when the
//!   configuration names neither an offset nor a zone

pub mod solar;
pub mod source;
pub mod timezone;

pub use solar::SolarEventSource;
pub use source::{EventSource, RawDayEvents, build_table};
pub use timezone::{parse_timezone, timezone_for_coordinates};
