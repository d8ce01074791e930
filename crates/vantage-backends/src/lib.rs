//! # Vantage Backends
//!
//! CPU accelerators and kernel executors for the vantage accessor model.
//!
//! Two accelerators are provided: [`CpuSerial`] runs kernels as a plain
//! loop on the calling thread, [`CpuThreads`] fans the global thread grid
//! out over a work-stealing pool. Both address host memory through the
//! plain-pointer handle, so accessors built for one work identically on
//! the other.
//!
//! ## Example
//!
//! ```
//! use vantage_backends::{CpuSerial, Launch, WorkDiv};
//! use vantage_core::{access, read_access};
//!
//! let mut data = vec![0.0f32; 1024];
//! {
//!     let out = access::<CpuSerial, _, 1>(&mut data);
//!     CpuSerial::exec(&WorkDiv::linear(1024), move |[i]| {
//!         out.set(i, i as f32);
//!     })?;
//! }
//! let input = read_access::<CpuSerial, _, 1>(&data);
//! assert_eq!(input.at(511), 511.0);
//! # Ok::<(), vantage_backends::BackendError>(())
//! ```

pub mod accel;
pub mod error;
pub mod exec;
pub mod workdiv;

pub use accel::{CpuSerial, CpuThreads};
pub use error::{BackendError, Result};
pub use exec::Launch;
pub use workdiv::WorkDiv;
