pub mod address;
pub mod case;
pub mod dictionary;
pub mod enums;
pub mod hash;
pub mod json;
pub mod patterns;
pub mod signature;
pub mod strings;
pub mod uri;

pub use crate::domain::model::{BasicCredentials, CodeOptions, LocalZone, SplitAddress};
pub use crate::domain::ports::{EnumContract, TimeZoneProvider};
pub use crate::utils::error::Result;
