//! Outbound HTTP for the Folio site.
//!
//! [`GithubImporter`] lists a repository folder through the GitHub contents
//! API and turns its image files into gallery entries. [`InquiryRelay`] posts
//! contact-form submissions to a form-relay service.

pub mod error;
pub mod github;
pub mod naming;
pub mod relay;

pub use error::{Error, Result};
pub use github::{GithubImporter, RepoConfig};
pub use relay::InquiryRelay;
