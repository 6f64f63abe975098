// Matrix data structures and operations

pub mod config;
pub mod conversion;
pub mod coo;
pub mod csc;
pub mod csr;
pub mod index;
pub mod matvec;
pub mod storage;

pub use config::{MatvecConfig, SystemParameters};
pub use coo::{build_compressed_column, CoordinateAssembly, CoordinateBuffers, DefaultCombine};
pub use csc::SparseMatrixCSC;
pub use csr::SparseMatrixCSR;
pub use index::CsrIndex;
pub use storage::SparseStorage;
