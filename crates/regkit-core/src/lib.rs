//! regkit core - typed access to the Windows registry through `reg.exe`.
//!
//! No in-process registry API is assumed. Every read and write goes through
//! the `reg.exe` command line tool, and this crate owns the part that is easy
//! to get wrong:
//!
//! - converting native values to and from the tool's typed wire text
//!   ([`codec`]),
//! - normalizing key paths and type names ([`normalize`]),
//! - spawning the tool and classifying its output as data, "not found", or
//!   failure ([`process`]).
//!
//! Building argument lists for specific operations (query, add, delete,
//! export) is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use regkit_core::{codec, normalize_path, RegData, RegType};
//!
//! #[tokio::main]
//! async fn main() -> regkit_core::Result<()> {
//!     let encoded = RegData::from(vec!["a".to_string(), "b".to_string()]).encode(None);
//!     assert_eq!(encoded.value_type, RegType::MultiSz);
//!
//!     let args = vec![
//!         "ADD".to_string(),
//!         normalize_path("HKCU/Software/Example"),
//!         "/v".to_string(),
//!         "List".to_string(),
//!         "/t".to_string(),
//!         encoded.value_type.to_string(),
//!         "/d".to_string(),
//!         encoded.data,
//!         "/f".to_string(),
//!     ];
//!     regkit_core::execute(&args).await?;
//!
//!     let decoded = codec::decode("a\\0b", RegType::MultiSz)?;
//!     println!("{decoded:?}");
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod normalize;
pub mod options;
pub mod process;
pub mod types;

pub use codec::{decode, decode_with, encode, DecodeOptions, Encoded, RegData};
pub use error::{RegError, Result, ToolError};
pub use normalize::{normalize_path, normalize_type};
pub use options::{
    default_options, merge_options, set_default_options, Options, OutputFormat, PartialOptions,
};
pub use process::{
    detect_error_messages, execute, CommandExecutor, ProcessSpawner, RawInvocation, RegSpawner,
};
pub use types::RegType;
