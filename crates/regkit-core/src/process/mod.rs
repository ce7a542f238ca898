//! Process layer: spawning `reg.exe` and classifying what it printed.
//!
//! [`ProcessSpawner`] is the only place the crate touches the OS process
//! table. [`CommandExecutor`] sits on top and maps stderr into three
//! outcomes: stdout text, absence, or a [`ToolError`](crate::ToolError).
//!
//! # Example
//!
//! ```rust,no_run
//! use regkit_core::process::CommandExecutor;
//!
//! #[tokio::main]
//! async fn main() -> regkit_core::Result<()> {
//!     let executor = CommandExecutor::global();
//!     executor.detect_error_messages().await;
//!
//!     let args = vec!["QUERY".to_string(), "HKCU\\Software\\Foo".to_string()];
//!     match executor.execute(&args).await? {
//!         Some(stdout) => println!("{stdout}"),
//!         None => println!("not found"),
//!     }
//!     Ok(())
//! }
//! ```

mod executor;
mod invoker;

pub use executor::{detect_error_messages, execute, CommandExecutor};
pub use invoker::{ProcessSpawner, RawInvocation, RegSpawner};
