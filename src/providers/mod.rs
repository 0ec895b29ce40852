//! Concrete data provider adapters.

pub mod internet_archive;
pub mod open_library;

pub use internet_archive::InternetArchiveProvider;
pub use open_library::OpenLibraryProvider;
