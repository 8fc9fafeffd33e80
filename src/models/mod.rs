//! Models contains all structures that are used in different
//! modules of the app

pub mod address;
pub mod cart;
pub mod company;
pub mod order;
pub mod payment;
pub mod product;
pub mod search;

pub use self::address::*;
pub use self::cart::*;
pub use self::company::*;
pub use self::order::*;
pub use self::payment::*;
pub use self::product::*;
pub use self::search::*;
