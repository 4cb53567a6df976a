//! Schema-driven transcoding between GML/WFS/CityGML element trees and
//! feature records.
//!
//! ```no_run
//! use gmlwfs::dialect;
//! use gmlwfs::types::{ReadOptions, WriteOptions};
//!
//! # fn main() -> Result<(), gmlwfs::Error> {
//! let wfs = dialect::dialect(dialect::WFS_2_0_0)?;
//! let request = wfs.write_get_feature_xml(
//!     &WriteOptions::new()
//!         .with_feature_type("roads")
//!         .with_feature_ns("topp", "http://www.openplans.org/topp")
//!         .with_count(10),
//! )?;
//! # let response = request;
//! let result = wfs.read_str(&response, &ReadOptions::new())?;
//! println!("{} features", result.features.len());
//! # Ok(())
//! # }
//! ```

pub mod dialect;
pub mod error;
pub mod handler;
pub mod namespace;
pub mod read;
pub mod write;

pub use gmlwfs_types as types;
pub use gmlwfs_xml as xml;

pub use dialect::{Dialect, DialectCatalog, DialectDescriptor, EntryPoint};
pub use error::{DialectError, Error, WriteError};
pub use handler::{compose, Handler, HandlerSet, HandlerTable};
pub use namespace::NamespaceTable;
pub use read::{ReadResult, ReadSession};
pub use write::{WriteInput, WriteSession};
