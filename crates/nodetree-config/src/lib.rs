//! File formats and configuration for nodetree.
//!
//! This crate loads authoring trees and freeze options from TOML, validates
//! authoring data before it reaches the builder, and locates the user's
//! default options file.
//!
//! # Features
//!
//! - **Tree files**: load and save [`AuthoringTree`]s as TOML
//! - **Options files**: pass-through idnames and cycle policy for freezing
//! - **Validation**: report every problem in a tree at once
//! - **Paths**: platform-specific config directory (`std` feature)
//!
//! # Example
//!
//! ```rust,no_run
//! use nodetree_config::{OptionsFile, load_tree_checked};
//! use nodetree_core::TreeBuilder;
//!
//! let tree = load_tree_checked("displace.toml").unwrap();
//! let options = OptionsFile::load("options.toml").unwrap().into_freeze_options();
//!
//! let mut builder = TreeBuilder::new();
//! builder.add_all_of_tree(&tree).unwrap();
//! let vtree = builder.freeze_and_index_with(&options).unwrap();
//! println!("{} sockets", vtree.socket_count());
//! ```

mod error;
mod options_file;
mod tree_file;

/// Platform-specific configuration paths.
#[cfg(feature = "std")]
pub mod paths;

/// Authoring tree and options validation.
pub mod validation;

pub use error::ConfigError;
pub use options_file::{OptionsFile, OptionsSource, resolve_options};
#[cfg(feature = "std")]
pub use paths::{
    default_options_path, ensure_user_config_dir, list_tree_files, tree_name_from_path,
    user_config_dir,
};
pub use tree_file::{load_tree, load_tree_checked, save_tree, tree_from_toml, tree_to_toml};
pub use validation::{ValidationError, ValidationResult, validate_options, validate_tree};

/// Re-export of the authoring model and options this crate reads and writes.
pub use nodetree_core::{AuthoringTree, CyclePolicy, FreezeOptions};
