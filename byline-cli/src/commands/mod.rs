//! CLI command implementations.

pub mod authors;
pub mod build;
pub mod dev;
pub mod init;

pub use authors::list_authors;
pub use build::build_site;
pub use dev::dev_server;
pub use init::init_project;
