//! Generic structures, used but not specific to the library.

pub mod index_heap;
