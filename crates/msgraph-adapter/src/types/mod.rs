/*
[INPUT]:  Graph resource schemas and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the Graph schema changes or new resources are added
*/

pub mod directory;
pub mod errors;
pub mod reports;
pub mod requests;
pub mod responses;
pub mod workbook;

pub use directory::*;
pub use errors::*;
pub use reports::*;
pub use requests::*;
pub use responses::*;
pub use workbook::*;
