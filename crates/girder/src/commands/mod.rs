//! Command implementations shared by the CLI and library users.

pub mod init;
